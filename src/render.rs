use analyzer::{ProductRanking, SessionReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::SalesLog;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_WIDTH: usize = 40;
const HISTOGRAM_BINS: usize = 10;

/// The two-column `Metrics | Values` summary.
pub fn summary_table(session: &SessionReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metrics", "Values"]);

    for metric in session.report.metrics() {
        table.add_row(vec![
            Cell::new(metric.label),
            Cell::new(metric.value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One equal-width bucket of the amount distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
}

/// Splits the amounts into `bins` equal-width buckets over `[min, max]`.
///
/// The maximum lands in the last bucket. If every amount is equal there is a
/// single bucket holding them all.
pub fn histogram(log: &SalesLog, bins: usize) -> Vec<Bin> {
    let (min, max) = match log.amounts().fold(None, |acc: Option<(Decimal, Decimal)>, a| {
        Some(acc.map_or((a, a), |(lo, hi)| (lo.min(a), hi.max(a))))
    }) {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };

    let single = || vec![Bin { lower: min, upper: max, count: log.len() }];
    if min == max || bins <= 1 {
        return single();
    }

    // A range narrower than the smallest representable step per bin.
    let width = (max - min) / Decimal::from(bins);
    if width.is_zero() {
        return single();
    }
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: min + width * Decimal::from(i),
            upper: if i + 1 == bins { max } else { min + width * Decimal::from(i + 1) },
            count: 0,
        })
        .collect();

    for amount in log.amounts() {
        let slot = ((amount - min) / width)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(bins - 1);
        out[slot].count += 1;
    }
    out
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

/// Text rendering of the amount distribution.
pub fn amount_distribution(log: &SalesLog) -> String {
    let bins = histogram(log, HISTOGRAM_BINS);
    let tallest = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    bins.iter()
        .map(|b| {
            let range = format!("{:.2} - {:.2}", b.lower, b.upper);
            format!(
                "{range:>24} | {} {}",
                bar(b.count as f64 / tallest as f64),
                b.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Horizontal bar chart of the product ranking, labelled with one-decimal percentages.
pub fn product_chart(ranking: &ProductRanking) -> String {
    let label_width = ranking
        .entries()
        .iter()
        .map(|e| e.product.chars().count())
        .max()
        .unwrap_or(0);

    ranking
        .entries()
        .iter()
        .map(|e| {
            let fraction = e.win_rate_pct.to_f64().unwrap_or(0.0) / 100.0;
            format!(
                "{:<label_width$} | {} {:.1}%",
                e.product,
                bar(fraction),
                e.win_rate_pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ClientCategory, Outcome, SalesRecord};
    use rust_decimal_macros::dec;

    fn log_with_amounts(amounts: &[Decimal]) -> SalesLog {
        amounts
            .iter()
            .map(|a| SalesRecord::new(Outcome::Won, ClientCategory::New, "A", *a))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn histogram_covers_every_amount() {
        let log = log_with_amounts(&[dec!(0), dec!(5), dec!(9.99), dec!(10), dec!(100)]);
        let bins = histogram(&log, 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[9].count, 1);
        assert_eq!(bins[9].upper, dec!(100));
    }

    #[test]
    fn equal_amounts_share_one_bin() {
        let bins = histogram(&log_with_amounts(&[dec!(7), dec!(7), dec!(7)]), 10);
        assert_eq!(bins, vec![Bin { lower: dec!(7), upper: dec!(7), count: 3 }]);
    }

    #[test]
    fn tiny_range_falls_back_to_one_bin() {
        let amounts = [dec!(0), dec!(0.0000000000000000000000000001)];
        let bins = histogram(&log_with_amounts(&amounts), 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].upper, amounts[1]);
    }

    #[test]
    fn empty_log_has_no_bins() {
        assert!(histogram(&SalesLog::default(), 10).is_empty());
    }

    #[test]
    fn bars_scale_to_the_fixed_width() {
        assert_eq!(bar(1.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(0.5).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0), "");
    }
}
