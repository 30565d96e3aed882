use thiserror::Error;

/// Result type for mesh generation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while triangulating a city object.
///
/// Degenerate polygons and unsupported geometry kinds are deliberately
/// not errors: the first yields zero triangles, the second is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("object `{0}` is not in the model's object list")]
    OwnerNotFound(String),

    #[error("object type `{0}` is not a registered category")]
    ObjectTypeNotFound(String),
}
