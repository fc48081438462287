use thiserror::Error;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error(transparent)]
    Rule(#[from] crate::rfc::recur::RuleError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
