//! Q128 wire records delivered by the on-chain reader.
//!
//! [`PairSnapshot`] and [`StrikeSnapshot`] mirror the storage layout of the
//! engine contract. Converting them into [`PairData`](crate::state::PairData)
//! validates every range invariant the ledger relies on; converting back
//! floors fractions to the Q128 precision the contract stores.
//!
//! [`MemorySnapshotSource`] serves records from memory and is what tests and
//! offline simulations plug into a
//! [`BatchExecutor`](crate::batch::BatchExecutor).

mod memory;
mod pair_snapshot;
mod strike_snapshot;

pub use memory::MemorySnapshotSource;
pub use pair_snapshot::PairSnapshot;
pub use strike_snapshot::StrikeSnapshot;
