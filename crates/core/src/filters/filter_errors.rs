use thiserror::Error;

/// Errors raised while turning request filters into a predicate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("value '{value}' for numeric field '{field}' is not a number")]
    InvalidFilterValue { field: String, value: String },

    #[error("unknown filter field '{0}'")]
    UnknownFilterField(String),
}
