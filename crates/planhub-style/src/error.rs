//! Error types for the style surface.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the style surface.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A custom property name was empty or contained characters CSS does
    /// not allow in an unescaped identifier.
    #[error("Invalid CSS variable name '{name}'")]
    InvalidVariableName { name: String },
}

impl Error {
    /// Create a variable name error.
    pub fn invalid_variable_name(name: impl Into<String>) -> Self {
        Self::InvalidVariableName { name: name.into() }
    }
}
