use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The salespeople a session may be opened for. Empty means "anyone".
    pub roster: Vec<String>,
    pub analysis: AnalysisSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the statistics and ranking step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// How many products the win-rate ranking keeps.
    pub top_products: usize,
    pub precision: Precision,
}

/// Decimal places each family of metrics is rounded to.
///
/// Rounding is half-to-even, so `12.345` becomes `12.34`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Success/failure rates and the two conditional probabilities.
    pub rate_decimals: u32,
    /// New/current client win rates.
    pub segment_rate_decimals: u32,
    /// Per-product win rates in the ranking.
    pub ranking_decimals: u32,
    /// Sample standard deviation of the amounts.
    pub spread_decimals: u32,
}

/// Controls how an uploaded table is cleaned before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    /// Drop rows that are exact duplicates of an earlier row.
    pub drop_duplicates: bool,
    /// Header names treated as an unnamed index column and renamed to `sales_pitch_id`.
    pub index_aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

/// How the binary presents a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

const MAX_DECIMALS: u32 = 10;

impl Settings {
    /// Rejects settings the analysis cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.top_products == 0 {
            return Err(ConfigError::invalid("analysis.top_products", "must be at least 1"));
        }

        let p = &self.analysis.precision;
        for (name, value) in [
            ("rate_decimals", p.rate_decimals),
            ("segment_rate_decimals", p.segment_rate_decimals),
            ("ranking_decimals", p.ranking_decimals),
            ("spread_decimals", p.spread_decimals),
        ] {
            if value > MAX_DECIMALS {
                return Err(ConfigError::invalid(
                    &format!("analysis.precision.{name}"),
                    format!("must be at most {MAX_DECIMALS}, got {value}"),
                ));
            }
        }

        let mut seen = HashSet::new();
        for name in &self.roster {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid("roster", "entries must not be blank"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::invalid(
                    "roster",
                    format!("'{name}' is listed more than once"),
                ));
            }
        }

        Ok(())
    }
}

// --- Default Implementations ---
// These let a user run without any config.toml at all.

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster: [
                "Amir", "Karl", "Splendor", "Shalom", "Tosin", "John", "Tessa", "Sekinat",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            analysis: AnalysisSettings::default(),
            ingestion: IngestionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_products: 5,
            precision: Precision::default(),
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            rate_decimals: 2,
            segment_rate_decimals: 1,
            ranking_decimals: 2,
            spread_decimals: 3,
        }
    }
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            drop_duplicates: true,
            index_aliases: vec!["Unnamed: 0".to_string(), String::new()],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
