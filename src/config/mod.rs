//! Batch configuration.
//!
//! The engine itself takes no configuration: every operation is a function
//! of the snapshot and its explicit arguments. [`BatchConfig`] carries the
//! values a router batch applies to all of its commands.

mod batch;

pub use batch::{BatchConfig, DEFAULT_SWAP_STRIKE_LIMIT};
