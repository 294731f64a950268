use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    /// Rates and streaks are meaningless without at least one record.
    #[error("The sales log has no records to analyse")]
    EmptyLog,

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
