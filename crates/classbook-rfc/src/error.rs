use thiserror::Error;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    RRuleError(#[from] rrule::RRuleError),

    #[error(transparent)]
    CoreError(#[from] classbook_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
