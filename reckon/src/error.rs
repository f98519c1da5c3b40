//! Errors surfaced to host applications
//!
//! Arity violations and flattening bugs are programming errors and panic;
//! everything here is recoverable.

use reckon_core::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

#[derive(Debug, Error)]
pub enum ReckonError {
    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("Invalid display config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ReckonError {
    /// Machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            ReckonError::Number(NumberError::ParseError(_)) => codes::PARSE_ERROR,
            ReckonError::Number(NumberError::DivisionByZero) => codes::DIV_ZERO,
            ReckonError::Number(NumberError::DomainError(_)) => codes::DOMAIN_ERROR,
            ReckonError::Number(NumberError::Overflow) => codes::OVERFLOW,
            ReckonError::Config(_) => codes::CONFIG_ERROR,
        }
    }
}
