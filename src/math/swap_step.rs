//! Single-strike swap step.

use alloy_primitives::U256;

use super::liquidity_math::{get_amount0, get_amount1, get_liquidity_for_amount0};
use super::mul_div;
use super::strike_math::ratio_x128_at_strike;
use crate::constants::Q128;
use crate::domain::{Pair, Rounding, Strike, TokenAmount, TokenSelector};
use crate::error::EngineError;

/// Result of trading against the liquidity of one strike.
///
/// `amount_in` is denominated in the token the user pays, `amount_out` in
/// the token the user receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    /// Amount paid into the strike.
    pub amount_in: U256,
    /// Amount paid out of the strike.
    pub amount_out: U256,
    /// Swappable liquidity left at the strike after the step.
    pub liquidity_remaining: U256,
}

/// Trades `amount_desired` against `liquidity` at `strike`.
///
/// A positive desired amount is an exact input of that token, a negative one
/// an exact output. The filled side is capped at what `liquidity` can absorb
/// or provide at the strike's price. The counter amount is converted at the
/// strike ratio and rounded down.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for a zero desired amount.
/// - [`EngineError::InvalidToken`] if the token is not in `pair`.
/// - [`EngineError::StrikeOutOfRange`] for sentinel strikes.
/// - [`EngineError::Overflow`] if an intermediate amount overflows.
pub fn compute_swap_step(
    pair: &Pair,
    strike: Strike,
    liquidity: U256,
    amount_desired: &TokenAmount,
) -> crate::error::Result<SwapStep> {
    if amount_desired.is_zero() {
        return Err(EngineError::InvalidAmount("swap amount must be non-zero"));
    }
    let is_token0 = pair.selector_of(&amount_desired.token())? == TokenSelector::Token0;
    let is_exact_in = amount_desired.is_positive();
    let desired = amount_desired.amount().unsigned_abs();
    let ratio = ratio_x128_at_strike(strike)?;

    let max_amount = if is_token0 {
        get_amount0(liquidity, strike, Rounding::from_round_up(is_exact_in))?
    } else {
        get_amount1(liquidity)
    };

    let filled = desired.min(max_amount);
    let counter = if is_token0 {
        mul_div(filled, ratio, Q128, Rounding::Down)?
    } else {
        mul_div(filled, Q128, ratio, Rounding::Down)?
    };

    let liquidity_remaining = if desired > max_amount {
        U256::ZERO
    } else if is_token0 {
        get_liquidity_for_amount0(max_amount - desired, strike)?
    } else {
        max_amount - desired
    };

    let (amount_in, amount_out) = if is_exact_in {
        (filled, counter)
    } else {
        (counter, filled)
    };
    Ok(SwapStep {
        amount_in,
        amount_out,
        liquidity_remaining,
    })
}
