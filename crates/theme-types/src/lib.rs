pub mod error;
pub mod labels;
pub mod record;
pub mod session;

pub use error::{Error, Result};
pub use labels::{Command, CommandTokens, LabelMap};
pub use record::{Record, RecordId};
pub use session::{SessionCounts, SessionMetadata};
