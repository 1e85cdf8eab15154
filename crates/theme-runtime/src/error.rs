use std::fmt;

/// Result type for theme-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Storage layer error (schema, CSV, cache or output write)
    Store(theme_store::Error),

    /// Session state machine misuse
    Engine(theme_engine::Error),

    /// Label or command token validation failed
    Types(theme_types::Error),

    /// Configuration error
    Config(String),

    /// Console IO failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "{}", err),
            Error::Engine(err) => write!(f, "Session error: {}", err),
            Error::Types(err) => write!(f, "Configuration error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<theme_store::Error> for Error {
    fn from(err: theme_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<theme_engine::Error> for Error {
    fn from(err: theme_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<theme_types::Error> for Error {
    fn from(err: theme_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
