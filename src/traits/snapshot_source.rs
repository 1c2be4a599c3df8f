//! Seam between the engine and whatever reads ledger state from chain.
//!
//! The engine never performs I/O. A batch asks a [`SnapshotSource`] for the
//! pair record the first time a command touches a pair, and for each strike
//! record the first time a command needs it. Implementations may block on
//! RPC, read a fixture file, or serve from memory; the engine only sees the
//! returned records.

use crate::domain::{Pair, Strike};
use crate::snapshot::{PairSnapshot, StrikeSnapshot};

/// Provider of on-chain pair and strike records.
///
/// # Errors
///
/// Implementations report read failures as
/// [`EngineError::SnapshotUnavailable`](crate::error::EngineError::SnapshotUnavailable).
/// Validation of the returned records is done by the caller.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use dry_powder_engine::domain::{Pair, Strike, Token};
/// use dry_powder_engine::snapshot::{MemorySnapshotSource, PairSnapshot};
/// use dry_powder_engine::traits::SnapshotSource;
///
/// let pair = Pair::new(
///     Token::new(Address::repeat_byte(1), 18),
///     Token::new(Address::repeat_byte(2), 6),
///     0,
/// )
/// .expect("distinct tokens");
///
/// let mut source = MemorySnapshotSource::new();
/// assert_eq!(source.pair(&pair), Ok(PairSnapshot::default()));
/// assert_eq!(source.strike(&pair, Strike::ZERO), Ok(None));
/// ```
pub trait SnapshotSource {
    /// Reads the pair-level record. A pair that was never created is
    /// reported as a zeroed, uninitialized record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn pair(&mut self, pair: &Pair) -> crate::error::Result<PairSnapshot>;

    /// Reads the record of `strike`, or `None` if the strike has never held
    /// liquidity.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn strike(&mut self, pair: &Pair, strike: Strike) -> crate::error::Result<Option<StrikeSnapshot>>;
}
