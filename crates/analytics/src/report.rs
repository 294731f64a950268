use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of performance metrics for one salesperson's log.
///
/// This struct is the final output of the `AnalyticsEngine`. Percentages are in
/// `[0, 100]`; streaks are counts of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    // I. Volume
    pub total_records: usize,
    pub won: usize,
    pub lost: usize,

    // II. Overall rates. These need not sum to 100 when other outcomes exist.
    pub success_rate_pct: Decimal,
    pub failure_rate_pct: Decimal,

    // III. Segmented rates. `None` when the segment has no records.
    pub new_client_win_rate_pct: Option<Decimal>,
    pub current_client_win_rate_pct: Option<Decimal>,

    // IV. Sequence metrics
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    /// 0 when no record is followed by another after a win.
    pub p_win_after_win_pct: Decimal,
    /// 0 when no record is followed by another after a non-win.
    pub p_win_after_loss_pct: Decimal,

    // V. Amounts
    /// Sample standard deviation of the amounts. `None` for a single record.
    pub spread: Option<Decimal>,
}

/// How a metric's value should be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Percent(Option<Decimal>),
    Count(usize),
    Amount(Option<Decimal>),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Percent(Some(v)) => write!(f, "{v}%"),
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Amount(Some(v)) => write!(f, "{v}"),
            MetricValue::Percent(None) | MetricValue::Amount(None) => f.write_str("N/A"),
        }
    }
}

/// A labelled row of the summary table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: MetricValue,
}

impl PerformanceReport {
    /// The nine headline metrics, in display order.
    pub fn metrics(&self) -> [Metric; 9] {
        use MetricValue::*;
        [
            Metric { label: "Success Rate", value: Percent(Some(self.success_rate_pct)) },
            Metric { label: "Failure Rate", value: Percent(Some(self.failure_rate_pct)) },
            Metric { label: "New Client Win Rate", value: Percent(self.new_client_win_rate_pct) },
            Metric {
                label: "Current Client Win Rate",
                value: Percent(self.current_client_win_rate_pct),
            },
            Metric { label: "Longest Win Streak", value: Count(self.longest_win_streak) },
            Metric { label: "Longest Loss Streak", value: Count(self.longest_loss_streak) },
            Metric {
                label: "Probability of a win after a win",
                value: Percent(Some(self.p_win_after_win_pct)),
            },
            Metric {
                label: "Probability of a win after a loss",
                value: Percent(Some(self.p_win_after_loss_pct)),
            },
            Metric { label: "Spread", value: Amount(self.spread) },
        ]
    }
}
