// NOTE: Layering
//
// theme-types    tokens, records, counters (no IO)
// theme-store    CSV source/output, cache.json, meta.json
// theme-engine   the labeling state machine, paging, breaks
// theme-runtime  config + the driver that ties engine and store together
// theme (here)   argument parsing, terminal console, logging
//
// Nothing below this crate touches stdin/stdout; the Console trait is the
// only way the driver talks to the operator.

mod args;
mod commands;
pub mod console;
mod handlers;
pub mod logging;
pub mod types;
pub mod views;

pub use args::{Cli, Commands, RunArgs};
pub use commands::run;
