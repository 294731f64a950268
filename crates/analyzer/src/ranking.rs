use analytics::stats;
use core_types::SalesLog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One product's share of won attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWinRate {
    pub product: String,
    pub win_rate_pct: Decimal,
    pub attempts: usize,
}

/// Products ordered by win rate, best first, truncated to the configured size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRanking(Vec<ProductWinRate>);

impl ProductRanking {
    pub fn entries(&self) -> &[ProductWinRate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Groups the log by product and keeps the `top_n` best win rates.
///
/// Groups are formed in first-encounter order and the sort is stable, so products
/// with equal (rounded) win rates keep the order they first appeared in the log.
pub fn rank_products(log: &SalesLog, top_n: usize, decimals: u32) -> ProductRanking {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, usize, usize)> = Vec::new();

    for record in log {
        let slot = *index.entry(record.product.as_str()).or_insert_with(|| {
            tallies.push((record.product.as_str(), 0, 0));
            tallies.len() - 1
        });
        let (_, won, total) = &mut tallies[slot];
        *won += usize::from(record.outcome.is_won());
        *total += 1;
    }

    let mut ranked: Vec<ProductWinRate> = tallies
        .into_iter()
        .map(|(product, won, total)| ProductWinRate {
            product: product.to_string(),
            // Every group has at least one record.
            win_rate_pct: stats::percentage(won, total, decimals).unwrap_or_default(),
            attempts: total,
        })
        .collect();

    ranked.sort_by(|a, b| b.win_rate_pct.cmp(&a.win_rate_pct));
    ranked.truncate(top_n);

    ProductRanking(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ClientCategory, Outcome, SalesRecord};
    use rust_decimal_macros::dec;

    fn log(rows: &[(&str, &str)]) -> SalesLog {
        rows.iter()
            .map(|(product, outcome)| {
                SalesRecord::new(
                    Outcome::from_label(outcome),
                    ClientCategory::New,
                    *product,
                    dec!(1),
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn names(ranking: &ProductRanking) -> Vec<&str> {
        ranking.entries().iter().map(|e| e.product.as_str()).collect()
    }

    #[test]
    fn products_are_sorted_by_win_rate() {
        let ranking = rank_products(
            &log(&[
                ("A", "Lost"),
                ("B", "Won"),
                ("A", "Won"),
                ("C", "Lost"),
                ("B", "Won"),
            ]),
            5,
            2,
        );

        assert_eq!(names(&ranking), vec!["B", "A", "C"]);
        assert_eq!(ranking.entries()[0].win_rate_pct, dec!(100));
        assert_eq!(ranking.entries()[1].win_rate_pct, dec!(50));
        assert_eq!(ranking.entries()[1].attempts, 2);
        assert_eq!(ranking.entries()[2].win_rate_pct, Decimal::ZERO);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let ranking = rank_products(
            &log(&[("Z", "Won"), ("M", "Lost"), ("A", "Won"), ("M", "Won"), ("Q", "Won")]),
            5,
            2,
        );
        assert_eq!(names(&ranking), vec!["Z", "A", "Q", "M"]);
    }

    #[test]
    fn ranking_is_truncated_to_top_n() {
        let rows: Vec<(String, &str)> = (0..8).map(|i| (format!("P{i}"), "Won")).collect();
        let borrowed: Vec<(&str, &str)> = rows.iter().map(|(p, o)| (p.as_str(), *o)).collect();

        let ranking = rank_products(&log(&borrowed), 5, 2);
        assert_eq!(ranking.len(), 5);
        assert_eq!(names(&ranking), vec!["P0", "P1", "P2", "P3", "P4"]);

        let short = rank_products(&log(&[("A", "Won"), ("B", "Lost")]), 5, 2);
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn ranking_is_non_increasing() {
        let ranking = rank_products(
            &log(&[
                ("A", "Won"),
                ("B", "Lost"),
                ("B", "Won"),
                ("C", "Won"),
                ("C", "Won"),
                ("C", "Lost"),
                ("D", "Lost"),
            ]),
            5,
            2,
        );
        assert!(
            ranking
                .entries()
                .windows(2)
                .all(|w| w[0].win_rate_pct >= w[1].win_rate_pct)
        );
    }
}
