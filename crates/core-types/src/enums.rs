use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of a single sales attempt, as recorded in the `status` column.
///
/// Matching is exact and case-sensitive: only `"Won"` and `"Lost"` are recognised.
/// Anything else is kept verbatim as `Other` and only counts towards denominators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    Other(String),
}

impl Outcome {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Won" => Outcome::Won,
            "Lost" => Outcome::Lost,
            other => Outcome::Other(other.to_string()),
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, Outcome::Won)
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Outcome::Lost)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won => f.write_str("Won"),
            Outcome::Lost => f.write_str("Lost"),
            Outcome::Other(label) => f.write_str(label),
        }
    }
}

/// Which kind of client the attempt was made to (`client` column).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientCategory {
    New,
    Current,
    Other(String),
}

impl ClientCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "New" => ClientCategory::New,
            "Current" => ClientCategory::Current,
            other => ClientCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCategory::New => f.write_str("New"),
            ClientCategory::Current => f.write_str("Current"),
            ClientCategory::Other(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_case_sensitive() {
        assert_eq!(Outcome::from_label("Won"), Outcome::Won);
        assert_eq!(Outcome::from_label("Lost"), Outcome::Lost);
        assert_eq!(Outcome::from_label("won"), Outcome::Other("won".to_string()));
        assert_eq!(Outcome::from_label("Pending").to_string(), "Pending");
    }

    #[test]
    fn client_labels_round_trip_through_display() {
        for label in ["New", "Current", "Partner"] {
            assert_eq!(ClientCategory::from_label(label).to_string(), label);
        }
    }
}
