use crate::error::IngestError;
use crate::table::RawTable;
use configuration::IngestionSettings;
use core_types::{ClientCategory, Outcome, SalesLog, SalesRecord, parse_amount};

pub const STATUS: &str = "status";
pub const CLIENT: &str = "client";
pub const PRODUCT: &str = "product";
pub const AMOUNT: &str = "amount";
pub const SALES_PITCH_ID: &str = "sales_pitch_id";

pub const REQUIRED_COLUMNS: [&str; 4] = [STATUS, CLIENT, PRODUCT, AMOUNT];

/// Column positions of the fields a `SalesRecord` is built from.
struct Layout {
    status: usize,
    client: usize,
    product: usize,
    amount: usize,
    pitch_id: Option<usize>,
}

impl Layout {
    fn resolve(table: &RawTable) -> Result<Self, IngestError> {
        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| table.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect();

        if !missing.is_empty() {
            missing.sort();
            return Err(IngestError::MissingColumns(missing));
        }

        // All four are known to exist at this point.
        let idx = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(Self {
            status: idx(STATUS),
            client: idx(CLIENT),
            product: idx(PRODUCT),
            amount: idx(AMOUNT),
            pitch_id: table.column_index(SALES_PITCH_ID),
        })
    }
}

/// Cleans and validates a raw table into an ordered `SalesLog`.
///
/// Steps run in this order: duplicate rows are dropped (if enabled), the unnamed
/// index column is renamed, required columns are checked, then every row is typed.
/// The first row with a non-numeric amount aborts the whole load.
pub fn clean_table(
    mut table: RawTable,
    settings: &IngestionSettings,
) -> Result<SalesLog, IngestError> {
    let rows_read = table.rows.len();

    let duplicates = if settings.drop_duplicates {
        table.drop_duplicates()
    } else {
        0
    };

    if table.rename_first_of(&settings.index_aliases, SALES_PITCH_ID) {
        tracing::debug!("Renamed index column to '{}'", SALES_PITCH_ID);
    }

    let layout = Layout::resolve(&table)?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let text = |i: usize| row.cells.get(i).cloned().flatten().unwrap_or_default();

        let raw_amount = text(layout.amount);
        let amount = parse_amount(&raw_amount).map_err(|_| IngestError::InvalidAmount {
            row: row.number,
            value: raw_amount.clone(),
        })?;

        let mut record = SalesRecord::new(
            Outcome::from_label(&text(layout.status)),
            ClientCategory::from_label(&text(layout.client)),
            text(layout.product),
            amount,
        );
        if let Some(id) = layout.pitch_id.and_then(|i| row.cells.get(i).cloned().flatten()) {
            record = record.with_pitch_id(id);
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(IngestError::Empty);
    }

    tracing::info!(
        rows_read,
        duplicates_dropped = duplicates,
        records = records.len(),
        "Sales log cleaned and validated"
    );

    Ok(SalesLog::new(records))
}
