use std::fmt;

/// Result type for theme-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `step` was called while a decision still waits for `commit`
    UncommittedDecision,

    /// `commit` was called with no decision in flight
    NothingToCommit,

    /// The session already terminated
    Terminated,

    /// Break options are incomplete or out of range
    InvalidBreaks(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UncommittedDecision => {
                write!(f, "Invalid operation: previous decision has not been committed")
            }
            Error::NothingToCommit => write!(f, "Invalid operation: no decision to commit"),
            Error::Terminated => write!(f, "Invalid operation: session already terminated"),
            Error::InvalidBreaks(msg) => write!(f, "Invalid break schedule: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
