// Storage layer - everything that touches the filesystem.
// The source table is read once; the output table, cache and metadata are
// rewritten whole and atomically swapped in, so a crash never leaves a
// half-written file behind.

mod atomic;
pub mod cache;
pub mod error;
pub mod meta;
pub mod output;
pub mod records;
pub mod schema;

pub use cache::{CachedSession, SessionCache, SessionSummary};
pub use error::{Error, Result};
pub use meta::{metadata_path, read_metadata, write_metadata};
pub use output::{OutputWriter, RelabelPolicy};
pub use records::RecordStore;
pub use schema::{Schema, SchemaSpec};
