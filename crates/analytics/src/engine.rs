use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use crate::stats::{self, Transitions};
use configuration::Precision;
use core_types::{ClientCategory, SalesLog};
use rust_decimal::Decimal;

/// A stateless calculator for deriving performance metrics from a sales log.
#[derive(Debug, Default, Clone)]
pub struct AnalyticsEngine {
    precision: Precision,
}

impl AnalyticsEngine {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `log` - The ordered records of one session. Must not be empty.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceReport` or an `AnalyticsError`.
    pub fn calculate(&self, log: &SalesLog) -> Result<PerformanceReport, AnalyticsError> {
        if log.is_empty() {
            return Err(AnalyticsError::EmptyLog);
        }

        let p = &self.precision;
        let total = log.len();
        let won = log.iter().filter(|r| r.outcome.is_won()).count();
        let lost = log.iter().filter(|r| r.outcome.is_lost()).count();

        let rate = |hits| stats::percentage(hits, total, p.rate_decimals).unwrap_or_default();

        let indicators = stats::indicators(log);
        let transitions = Transitions::from_indicators(&indicators);

        // Empty buckets fall back to 0 rather than failing on short logs.
        let p_win_after_win = stats::percentage(
            transitions.wins_after_win,
            transitions.pairs_after_win,
            p.rate_decimals,
        )
        .unwrap_or(Decimal::ZERO);
        let p_win_after_loss = stats::percentage(
            transitions.wins_after_loss,
            transitions.pairs_after_loss,
            p.rate_decimals,
        )
        .unwrap_or(Decimal::ZERO);

        let amounts: Vec<Decimal> = log.amounts().collect();
        let spread = stats::sample_std_dev(&amounts)?.map(|s| s.round_dp(p.spread_decimals));

        let report = PerformanceReport {
            total_records: total,
            won,
            lost,
            success_rate_pct: rate(won),
            failure_rate_pct: rate(lost),
            new_client_win_rate_pct: self.segment_win_rate(log, &ClientCategory::New),
            current_client_win_rate_pct: self.segment_win_rate(log, &ClientCategory::Current),
            longest_win_streak: stats::longest_run(&indicators, 1),
            longest_loss_streak: stats::longest_run(&indicators, 0),
            p_win_after_win_pct: p_win_after_win,
            p_win_after_loss_pct: p_win_after_loss,
            spread,
        };

        tracing::debug!(
            total,
            won,
            lost,
            win_streak = report.longest_win_streak,
            loss_streak = report.longest_loss_streak,
            "Performance metrics calculated"
        );

        Ok(report)
    }

    /// Win rate among records made to `category`, or `None` if there are none.
    pub fn segment_win_rate(&self, log: &SalesLog, category: &ClientCategory) -> Option<Decimal> {
        stats::win_rate(
            log.iter().filter(|r| &r.client == category),
            self.precision.segment_rate_decimals,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Outcome, SalesRecord};
    use rust_decimal_macros::dec;

    fn record(outcome: &str, client: &str, amount: Decimal) -> SalesRecord {
        SalesRecord::new(
            Outcome::from_label(outcome),
            ClientCategory::from_label(client),
            "Widget",
            amount,
        )
    }

    fn log_of(outcomes: &[&str]) -> SalesLog {
        outcomes
            .iter()
            .map(|o| record(o, "New", dec!(10)))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn empty_log_is_insufficient_data() {
        let err = AnalyticsEngine::default().calculate(&SalesLog::default()).unwrap_err();
        assert_eq!(err, AnalyticsError::EmptyLog);
    }

    #[test]
    fn streaks_and_transitions_for_the_reference_sequence() {
        let log = log_of(&["Won", "Won", "Lost", "Won", "Lost", "Lost", "Lost"]);
        let report = AnalyticsEngine::default().calculate(&log).unwrap();

        assert_eq!(report.longest_win_streak, 2);
        assert_eq!(report.longest_loss_streak, 3);
        assert_eq!(report.p_win_after_win_pct, dec!(50));
        assert_eq!(report.p_win_after_loss_pct, dec!(33.33));
        assert_eq!(report.success_rate_pct, dec!(42.86));
        assert_eq!(report.failure_rate_pct, dec!(57.14));
    }

    #[test]
    fn other_outcomes_only_count_in_denominators() {
        let log = log_of(&["Won", "Lost", "Pending", "Won"]);
        let report = AnalyticsEngine::default().calculate(&log).unwrap();

        assert_eq!(report.success_rate_pct, dec!(50));
        assert_eq!(report.failure_rate_pct, dec!(25));
        assert!(report.success_rate_pct + report.failure_rate_pct < dec!(100));
        // "Pending" collapses to a non-win in the indicator sequence.
        assert_eq!(report.longest_loss_streak, 2);
    }

    #[test]
    fn single_record_log_uses_fallbacks() {
        let report = AnalyticsEngine::default().calculate(&log_of(&["Won"])).unwrap();

        assert_eq!(report.p_win_after_win_pct, Decimal::ZERO);
        assert_eq!(report.p_win_after_loss_pct, Decimal::ZERO);
        assert_eq!(report.spread, None);
        assert_eq!(report.longest_win_streak, 1);
        assert_eq!(report.longest_loss_streak, 0);
    }

    #[test]
    fn empty_client_segment_is_reported_as_none() {
        let log: SalesLog = vec![
            record("Won", "New", dec!(1)),
            record("Lost", "New", dec!(1)),
            record("Won", "New", dec!(1)),
        ]
        .into();
        let report = AnalyticsEngine::default().calculate(&log).unwrap();

        assert_eq!(report.new_client_win_rate_pct, Some(dec!(66.7)));
        assert_eq!(report.current_client_win_rate_pct, None);
    }

    #[test]
    fn spread_uses_sample_standard_deviation() {
        let log: SalesLog = vec![
            record("Won", "New", dec!(10)),
            record("Lost", "Current", dec!(-20)),
            record("Won", "Current", dec!(30)),
        ]
        .into();
        let report = AnalyticsEngine::default().calculate(&log).unwrap();
        assert_eq!(report.spread, Some(dec!(10)));
    }

    #[test]
    fn precision_is_configurable() {
        let engine = AnalyticsEngine::new(Precision {
            rate_decimals: 0,
            ..Precision::default()
        });
        let report = engine.calculate(&log_of(&["Won", "Lost", "Lost"])).unwrap();
        assert_eq!(report.success_rate_pct, dec!(33));
    }

    #[test]
    fn repeated_calculation_is_identical() {
        let log = log_of(&["Won", "Lost", "Won", "Won", "Lost"]);
        let engine = AnalyticsEngine::default();
        assert_eq!(engine.calculate(&log).unwrap(), engine.calculate(&log).unwrap());
    }
}
