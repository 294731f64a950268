use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};

/// Who the current run is analysing.
///
/// Passed explicitly into the analyzer so nothing depends on ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    salesperson: String,
}

impl Session {
    /// Opens a session for `name`, which must appear on `roster`.
    /// An empty roster accepts any non-blank name.
    pub fn open(name: &str, roster: &[String]) -> Result<Self, AnalyzerError> {
        let name = name.trim();
        let listed = roster.is_empty() || roster.iter().any(|r| r == name);
        if name.is_empty() || !listed {
            return Err(AnalyzerError::UnknownSalesperson(name.to_string()));
        }

        Ok(Self {
            salesperson: name.to_string(),
        })
    }

    pub fn salesperson(&self) -> &str {
        &self.salesperson
    }
}
