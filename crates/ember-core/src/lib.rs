//! Ember Core - Shared foundations for the Ember workspace
//!
//! The particle engine itself is infallible; everything that can fail
//! (effect lookup, configuration loading) reports through the types here:
//! - `EmberError` - Error enum for the fallible edges
//! - `Result` - Alias over `EmberError`

mod error;

pub use error::{EmberError, Result};
