//! Conversions between liquidity units and token amounts.
//!
//! One unit of liquidity at a strike is worth exactly one unit of token1, or
//! `1 / ratio(strike)` units of token0. Liquidity at the tier's current
//! strike is split between the two tokens by the tier's composition.

use alloy_primitives::U256;

use super::strike_math::ratio_x128_at_strike;
use super::{mul_div, Fraction};
use crate::constants::Q128;
use crate::domain::{Rounding, Spread, Strike};
use crate::error::EngineError;
use crate::state::PairData;

/// Token0 value of `liquidity` at `strike`, `liquidity / ratio`.
///
/// # Errors
///
/// - [`EngineError::StrikeOutOfRange`] for sentinel strikes.
/// - [`EngineError::Overflow`] if the amount exceeds 256 bits.
pub fn get_amount0(liquidity: U256, strike: Strike, rounding: Rounding) -> crate::error::Result<U256> {
    let ratio = ratio_x128_at_strike(strike)?;
    mul_div(liquidity, Q128, ratio, rounding)
}

/// Token1 value of `liquidity`, which is the liquidity itself.
#[must_use]
pub const fn get_amount1(liquidity: U256) -> U256 {
    liquidity
}

/// Liquidity bought by `amount0` of token0 at `strike`, rounded down.
///
/// # Errors
///
/// - [`EngineError::StrikeOutOfRange`] for sentinel strikes.
/// - [`EngineError::Overflow`] if the liquidity exceeds 256 bits.
pub fn get_liquidity_for_amount0(amount0: U256, strike: Strike) -> crate::error::Result<U256> {
    let ratio = ratio_x128_at_strike(strike)?;
    mul_div(amount0, ratio, Q128, Rounding::Down)
}

/// Liquidity bought by `amount1` of token1, which is the amount itself.
#[must_use]
pub const fn get_liquidity_for_amount1(amount1: U256) -> U256 {
    amount1
}

/// Token0 part of `liquidity` at its tier's current strike given the tier
/// composition (the share already held in token1).
///
/// Uses `2^128 - 1 - q128(composition)` as the token0 share, so a fully
/// unconsumed tier rounds one unit below the full token0 value when rounding
/// down. A composition of one yields zero.
///
/// # Errors
///
/// - [`EngineError::Overflow`] if the composition exceeds one or the result
///   overflows.
pub fn get_amount0_composition(
    composition: &Fraction,
    liquidity: U256,
    strike: Strike,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    let q = composition.to_q128()?;
    let complement = U256::from(u128::MAX).saturating_sub(q);
    let ratio = ratio_x128_at_strike(strike)?;
    mul_div(liquidity, complement, ratio, rounding)
}

/// Token1 part of `liquidity` at its tier's current strike.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if the composition exceeds 256-bit
/// Q128 range.
pub fn get_amount1_composition(
    composition: &Fraction,
    liquidity: U256,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    let q = composition.to_q128()?;
    mul_div(liquidity, q, Q128, rounding)
}

/// Token amounts `(amount0, amount1)` backing `liquidity` deposited at
/// `(strike, spread)`.
///
/// Liquidity above the tier's current strike is all token0, below it all
/// token1, and at it split by the tier composition.
///
/// # Errors
///
/// Propagates the errors of the underlying conversions.
pub fn get_amounts(
    pair_data: &PairData,
    strike: Strike,
    spread: Spread,
    liquidity: U256,
    rounding: Rounding,
) -> crate::error::Result<(U256, U256)> {
    let strike_current = pair_data.strike_current(spread);
    if strike > strike_current {
        Ok((get_amount0(liquidity, strike, rounding)?, U256::ZERO))
    } else if strike < strike_current {
        Ok((U256::ZERO, get_amount1(liquidity)))
    } else {
        let composition = pair_data.composition(spread);
        Ok((
            get_amount0_composition(&composition, liquidity, strike, rounding)?,
            get_amount1_composition(&composition, liquidity, rounding)?,
        ))
    }
}

/// Scales internal liquidity up by the pair's scaling factor.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if set bits would be shifted out.
pub const fn scale_liquidity_up(liquidity: u128, scaling_factor: u8) -> crate::error::Result<u128> {
    let shift = scaling_factor as u32;
    if liquidity == 0 {
        return Ok(0);
    }
    if liquidity.leading_zeros() < shift {
        return Err(EngineError::Overflow("scaled liquidity exceeds 128 bits"));
    }
    Ok(liquidity << shift)
}

/// Scales liquidity down by the pair's scaling factor, truncating.
#[must_use]
pub const fn scale_liquidity_down(liquidity: u128, scaling_factor: u8) -> u128 {
    let shift = scaling_factor as u32;
    if shift >= u128::BITS {
        return 0;
    }
    liquidity >> shift
}
