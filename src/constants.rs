//! Protocol-wide constants.
//!
//! These mirror the immutable parameters of the on-chain ledger and are
//! never configurable.

use alloy_primitives::{U256, U512};

/// Number of spread tiers per strike.
pub const NUM_SPREADS: usize = 5;

/// Exclusive lower bound of the strike range.
pub const MIN_STRIKE: i32 = -776_363;

/// Exclusive upper bound of the strike range.
pub const MAX_STRIKE: i32 = 776_363;

/// `2^128`, the scale of Q128 fixed-point values.
pub const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);

/// `2^128` widened for 512-bit intermediates.
pub(crate) const Q128_WIDE: U512 = U512::from_limbs([0, 0, 1, 0, 0, 0, 0, 0]);

/// `2^128 - 1`, the largest liquidity value a tier can hold.
pub const MAX_LIQUIDITY: u128 = u128::MAX;

/// Largest Q128-encoded collateral multiplier (`2^136 - 1`).
pub const MAX_MULTIPLIER_X128: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xff, 0]);

/// Numerator of the minimum collateral multiplier (`1 / 2000`).
pub const MIN_MULTIPLIER_NUMERATOR: u64 = 1;

/// Denominator of the minimum collateral multiplier (`1 / 2000`).
pub const MIN_MULTIPLIER_DENOMINATOR: u64 = 2_000;

/// Block-ticks after which a tier's borrowed liquidity has fully accrued.
pub const ACCRUAL_SATURATION: u128 = 2_000_000;
