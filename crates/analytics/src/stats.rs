//! Sequence and sample statistics used by the engine.
//!
//! Everything here is a pure function of its input.

use crate::error::AnalyticsError;
use core_types::{SalesLog, SalesRecord};
use rust_decimal::{Decimal, MathematicalOps};

/// Collapses a log to `1` for every Won record and `0` for everything else, in order.
pub fn indicators(log: &SalesLog) -> Vec<u8> {
    log.iter().map(|r| u8::from(r.outcome.is_won())).collect()
}

/// Length of the longest run of consecutive `target` values. An empty sequence gives 0.
pub fn longest_run(seq: &[u8], target: u8) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &value in seq {
        if value == target {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Successor tallies for every adjacent pair `(seq[i], seq[i + 1])`.
///
/// The last element has no successor and is never counted as a predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    pub wins_after_win: usize,
    pub pairs_after_win: usize,
    pub wins_after_loss: usize,
    pub pairs_after_loss: usize,
}

impl Transitions {
    pub fn from_indicators(seq: &[u8]) -> Self {
        let mut t = Self::default();
        for pair in seq.windows(2) {
            let won_next = usize::from(pair[1] == 1);
            if pair[0] == 1 {
                t.pairs_after_win += 1;
                t.wins_after_win += won_next;
            } else {
                t.pairs_after_loss += 1;
                t.wins_after_loss += won_next;
            }
        }
        t
    }
}

/// `hits / total * 100` rounded to `decimals`, or `None` when `total` is zero.
pub fn percentage(hits: usize, total: usize, decimals: u32) -> Option<Decimal> {
    if total == 0 {
        return None;
    }
    let pct = Decimal::from(hits) * Decimal::ONE_HUNDRED / Decimal::from(total);
    Some(pct.round_dp(decimals))
}

/// Share of `records` that were won, as a rounded percentage. `None` for an empty subset.
pub fn win_rate<'a, I>(records: I, decimals: u32) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let (won, total) = records.into_iter().fold((0usize, 0usize), |(won, total), r| {
        (won + usize::from(r.outcome.is_won()), total + 1)
    });
    percentage(won, total, decimals)
}

/// Sample standard deviation (n - 1 denominator). `None` for fewer than two values.
pub fn sample_std_dev(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if values.len() < 2 {
        return Ok(None);
    }

    // Running mean: never sums the raw amounts, so large logs cannot overflow.
    let mean = values
        .iter()
        .enumerate()
        .fold(Decimal::ZERO, |mean, (i, v)| {
            mean + (*v - mean) / Decimal::from(i + 1)
        });

    // Deviations are scaled into [-1, 1] before squaring; the scale is restored after `sqrt`.
    let scale = values
        .iter()
        .map(|v| (*v - mean).abs())
        .max()
        .unwrap_or_default();
    if scale.is_zero() {
        return Ok(Some(Decimal::ZERO));
    }

    let squared_deviations: Decimal = values
        .iter()
        .map(|v| {
            let d = (*v - mean) / scale;
            d * d
        })
        .sum();
    let variance = squared_deviations / Decimal::from(values.len() - 1);

    variance.sqrt().map(|root| Some(root * scale)).ok_or_else(|| {
        AnalyticsError::Calculation("Failed to calculate square root for variance".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn longest_run_of_empty_sequence_is_zero() {
        assert_eq!(longest_run(&[], 1), 0);
        assert_eq!(longest_run(&[], 0), 0);
    }

    #[test]
    fn longest_run_finds_the_maximal_block() {
        let seq = [1, 1, 0, 1, 1, 1, 0];
        assert_eq!(longest_run(&seq, 1), 3);
        assert_eq!(longest_run(&seq, 0), 1);
        assert_eq!(longest_run(&[0, 0, 0, 0], 1), 0);
        assert_eq!(longest_run(&[0, 0, 0, 0], 0), 4);
    }

    #[test]
    fn transitions_skip_the_final_element() {
        let t = Transitions::from_indicators(&[1, 1, 0, 1, 0, 0, 0]);
        assert_eq!(
            t,
            Transitions {
                wins_after_win: 1,
                pairs_after_win: 2,
                wins_after_loss: 1,
                pairs_after_loss: 4,
            }
        );
    }

    #[test]
    fn transitions_of_a_single_element_are_empty() {
        assert_eq!(Transitions::from_indicators(&[1]), Transitions::default());
        assert_eq!(Transitions::from_indicators(&[]), Transitions::default());
    }

    #[test]
    fn percentage_rounds_half_to_even() {
        assert_eq!(percentage(1, 3, 2), Some(dec!(33.33)));
        assert_eq!(percentage(2, 3, 2), Some(dec!(66.67)));
        assert_eq!(percentage(1, 8, 1), Some(dec!(12.5)));
        // 12.345% at two places: the 4 is even, so it stays.
        assert_eq!(percentage(2469, 20000, 2), Some(dec!(12.34)));
        assert_eq!(percentage(0, 0, 2), None);
    }

    #[test]
    fn std_dev_matches_the_sample_formula() {
        let spread = sample_std_dev(&[dec!(10), dec!(20), dec!(30)]).unwrap().unwrap();
        assert_eq!(spread.round_dp(3), dec!(10));

        let spread = sample_std_dev(&[dec!(2), dec!(4), dec!(4), dec!(4), dec!(5), dec!(5), dec!(7), dec!(9)])
            .unwrap()
            .unwrap();
        // variance = 32 / 7
        assert_eq!(spread.round_dp(3), dec!(2.138));
    }

    #[test]
    fn std_dev_needs_two_values() {
        assert_eq!(sample_std_dev(&[]).unwrap(), None);
        assert_eq!(sample_std_dev(&[dec!(5)]).unwrap(), None);
        assert_eq!(sample_std_dev(&[dec!(5), dec!(5)]).unwrap(), Some(Decimal::ZERO));
    }

    #[test]
    fn std_dev_survives_amounts_far_apart() {
        let spread = sample_std_dev(&[dec!(0), dec!(1000000000000000)]).unwrap().unwrap();
        // 1e15 / sqrt(2)
        assert!((spread - dec!(707106781186547.524)).abs() < dec!(0.01));

        let spread = sample_std_dev(&[dec!(100000000000000000000); 3]).unwrap();
        assert_eq!(spread, Some(Decimal::ZERO));
    }
}
