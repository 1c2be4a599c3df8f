//! Trait seams to external collaborators.
//!
//! [`SnapshotSource`] is the only one: it supplies the pair and strike
//! records a batch simulates against.

mod snapshot_source;

pub use snapshot_source::SnapshotSource;
