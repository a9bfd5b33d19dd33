use thiserror::Error;

/// Errors surfaced by the map core. Out-of-range event coordinates are not
/// errors anywhere; projection and containment fail closed instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("basemap contains no regions")]
    EmptyBasemap,

    #[error("invalid theme: {0} must not be empty")]
    InvalidTheme(&'static str),

    #[error("basemap source has not been resolved yet")]
    UnresolvedBasemap,
}
