use std::fmt;

/// Result type for theme-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validation errors raised while building label and command mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A label token was the empty string (reserved for paging)
    EmptyToken { label: String },

    /// The same token was mapped twice
    DuplicateToken(String),

    /// A label token clashes with a command token, or two commands share one
    TokenCollision { token: String, command: String },

    /// The label map has no entries
    NoLabels,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyToken { label } => {
                write!(f, "Label '{}' is mapped to an empty token", label)
            }
            Error::DuplicateToken(token) => write!(f, "Token '{}' is mapped twice", token),
            Error::TokenCollision { token, command } => write!(
                f,
                "'{}' is already used by the '{}' command. Either change the command or the label token",
                token, command
            ),
            Error::NoLabels => write!(f, "At least one label token is required"),
        }
    }
}

impl std::error::Error for Error {}
