use thiserror::Error;

/// Result type for model conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while converting a generic parsed tree into the typed
/// city model
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing `{0}` field")]
    MissingField(&'static str),

    #[error("expected {expected} in `{field}`")]
    UnexpectedShape {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid vertex entry: {0}")]
    InvalidVertex(String),

    #[error("invalid transform block: {0}")]
    InvalidTransform(String),
}
