/// Convenience result type used across glyphcomp.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Top-level error taxonomy used by scene and render APIs.
///
/// Every error is reported to the immediate caller; nothing is retried or swallowed, and a
/// failed operation leaves the scene exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Invalid user-provided parameters (colors, influence, viewports, layer effects).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed object content (ragged rows, empty grids).
    #[error("content format error: {0}")]
    ContentFormat(String),

    /// Operation on an object id that is not in the scene.
    #[error("unknown object: {0}")]
    NotFound(String),

    /// Adding an object whose id is already in the scene.
    #[error("duplicate object: {0}")]
    Duplicate(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphError::ContentFormat`] value.
    pub fn content_format(msg: impl Into<String>) -> Self {
        Self::ContentFormat(msg.into())
    }

    /// Build a [`GlyphError::NotFound`] value for object `id`.
    pub fn not_found(id: &str) -> Self {
        Self::NotFound(format!("no object with id '{id}'"))
    }

    /// Build a [`GlyphError::Duplicate`] value for object `id`.
    pub fn duplicate(id: &str) -> Self {
        Self::Duplicate(format!("an object with id '{id}' already exists"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
