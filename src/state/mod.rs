//! Ledger state of a pair.
//!
//! [`PairData`] owns one [`StrikeData`] per touched strike in an ordered map
//! plus the per-tier price cursors. Operations in [`crate::engine`] mutate it
//! in place so that later calls in a batch observe earlier ones.

mod pair_data;
mod strike_data;

pub use pair_data::PairData;
pub use strike_data::StrikeData;
