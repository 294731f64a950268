use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyzerError {
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("'{0}' is not on the roster. Please select a valid name to continue.")]
    UnknownSalesperson(String),
}
