//! Position balance to liquidity conversions.
//!
//! Liquidity provider balances are shares of a tier whose exchange rate is
//! the tier's growth factor. Debt balances shrink against the collateral
//! multiplier as the strike's liquidity growth advances.

use alloy_primitives::U256;

use super::wide::narrow_u128;
use super::Fraction;
use crate::domain::Rounding;
use crate::error::EngineError;

/// Liquidity redeemable for `balance` shares, `floor(balance * growth)`.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if the liquidity exceeds 128 bits.
pub fn balance_to_liquidity(balance: U256, growth_spread: &Fraction) -> crate::error::Result<u128> {
    let liquidity = growth_spread.mul_floor(balance)?;
    narrow_u128(liquidity).ok_or(EngineError::Overflow("liquidity exceeds 128 bits"))
}

/// Shares minted for `liquidity`, `floor(liquidity / growth)`.
///
/// # Errors
///
/// Returns [`EngineError::DivisionByZero`] for a zero growth factor.
pub fn liquidity_to_balance(liquidity: u128, growth_spread: &Fraction) -> crate::error::Result<U256> {
    super::mul_div(
        U256::from(liquidity),
        growth_spread.denominator(),
        growth_spread.numerator(),
        Rounding::Down,
    )
}

/// Liquidity still owed by a debt position,
/// `floor(balance * (multiplier - growth_delta) / multiplier)`.
///
/// A growth delta at or beyond the multiplier means the debt is fully
/// repaid by accrual and yields zero.
///
/// # Errors
///
/// - [`EngineError::DivisionByZero`] for a zero multiplier.
/// - [`EngineError::Overflow`] if the liquidity exceeds 128 bits.
pub fn debt_balance_to_liquidity(
    balance: U256,
    multiplier: &Fraction,
    growth_delta: &Fraction,
) -> crate::error::Result<u128> {
    if multiplier.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    if growth_delta >= multiplier {
        return Ok(0);
    }
    let remaining = multiplier.checked_sub(growth_delta)?.checked_div(multiplier)?;
    balance_to_liquidity(balance, &remaining)
}
