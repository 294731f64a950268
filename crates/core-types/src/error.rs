use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Amount '{0}' is not numeric")]
    InvalidAmount(String),
}
