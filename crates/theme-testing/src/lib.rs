//! Testing infrastructure for theme integration tests.
//!
//! - `TestWorld`: isolated directory with data files, runs the `theme` binary
//! - `assertions`: checks against the output table, cache and metadata
//! - `fixtures`: small CSV datasets and matching config files

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
