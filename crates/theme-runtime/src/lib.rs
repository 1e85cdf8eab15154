pub mod config;
pub mod console;
pub mod error;
pub mod runner;

pub use config::{BreaksConfig, CacheConfig, Config, MetaConfig, Settings};
pub use console::{Console, InputEvent, Notice, RecordView};
pub use error::{Error, Result};
pub use runner::{Outcome, Runner};
