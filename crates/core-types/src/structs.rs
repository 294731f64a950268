use crate::enums::{ClientCategory, Outcome};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of a salesperson's log: a single pitch and how it ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub outcome: Outcome,
    pub client: ClientCategory,
    pub product: String,
    /// Always non-negative. The sign carries no meaning in this domain.
    pub amount: Decimal,
    /// The source file's unnamed index column, kept only for traceability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_pitch_id: Option<String>,
}

impl SalesRecord {
    /// Creates a record, normalising `amount` to its absolute value.
    pub fn new(
        outcome: Outcome,
        client: ClientCategory,
        product: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            outcome,
            client,
            product: product.into(),
            amount: amount.abs(),
            sales_pitch_id: None,
        }
    }

    pub fn with_pitch_id(mut self, id: impl Into<String>) -> Self {
        self.sales_pitch_id = Some(id.into());
        self
    }
}

/// The ordered sequence of records for one session.
///
/// Order is significant: streaks and transition probabilities are read off it,
/// so nothing here ever re-sorts the records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesLog {
    records: Vec<SalesRecord>,
}

impl SalesLog {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.records.iter().map(|r| r.amount)
    }
}

impl From<Vec<SalesRecord>> for SalesLog {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a SalesLog {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parses a raw amount cell, accepting plain (`"-1250.50"`) and scientific (`"1.5e3"`) notation.
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidAmount(String::new()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::InvalidAmount(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_amounts_are_normalised() {
        let record = SalesRecord::new(Outcome::Won, ClientCategory::New, "Widget", dec!(-42.5));
        assert_eq!(record.amount, dec!(42.5));
    }

    #[test]
    fn parse_amount_accepts_plain_and_scientific() {
        assert_eq!(parse_amount(" 120.25 ").unwrap(), dec!(120.25));
        assert_eq!(parse_amount("-7").unwrap(), dec!(-7));
        assert_eq!(parse_amount("1.5e3").unwrap(), dec!(1500));
    }

    #[test]
    fn parse_amount_rejects_text() {
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn log_preserves_insertion_order() {
        let log = SalesLog::new(vec![
            SalesRecord::new(Outcome::Lost, ClientCategory::New, "B", dec!(2)),
            SalesRecord::new(Outcome::Won, ClientCategory::New, "A", dec!(1)),
        ]);
        let products: Vec<_> = log.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(products, vec!["B", "A"]);
        assert_eq!(log.amounts().collect::<Vec<_>>(), vec![dec!(2), dec!(1)]);
    }
}
