//! CLI command implementations

pub mod bench;
pub mod config;
pub mod list;
pub mod run;
