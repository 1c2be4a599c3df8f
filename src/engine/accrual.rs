//! Interest accrual on borrowed liquidity.
//!
//! Each tier up to the active spread accrues
//! `borrowed * min((tier + 1) * blocks, 2_000_000) / 2_000_000`. Accrued
//! liquidity raises the tier's share exchange rate and the strike-wide
//! growth index, and frees the part of the debt that open positions have
//! pre-committed through the repay rate.

use alloy_primitives::U256;
use tracing::debug;

use crate::constants::{ACCRUAL_SATURATION, Q128, Q128_WIDE};
use crate::domain::{Rounding, Strike};
use crate::error::EngineError;
use crate::math::wide::{narrow, narrow_u128, widen};
use crate::math::{div_round, mul_div, Fraction};
use crate::state::PairData;

/// Brings `strike` up to `block` and returns the liquidity to hand back to
/// swappers via [`repay_liquidity`](super::repay_liquidity).
///
/// The first touch of a strike creates its entry at `block` and accrues
/// nothing. A second call in the same block is a no-op.
///
/// The returned liquidity is `floor(repay_rate * growth_increment)`, the
/// reduction of the liquidity owed by all open debt positions when the
/// strike growth index advances by `growth_increment`. It never exceeds
/// the borrowed total of the strike.
///
/// # Errors
///
/// - [`EngineError::StrikeOutOfRange`] for sentinel strikes.
/// - [`EngineError::BlockRegression`] if `block` precedes the strike's last
///   accrual.
/// - [`EngineError::Overflow`] if an accumulator leaves its range.
pub fn accrue(pair_data: &mut PairData, block: u64, strike: Strike) -> crate::error::Result<u128> {
    if pair_data.touch_strike(strike, block)? {
        return Ok(0);
    }
    let data = pair_data.strike_mut(strike)?;

    if block < data.block_last {
        return Err(EngineError::BlockRegression {
            current: block,
            last: data.block_last,
        });
    }
    let blocks = block - data.block_last;
    if blocks == 0 {
        return Ok(0);
    }

    let mut accrued_total = U256::ZERO;
    let mut borrowed_total = U256::ZERO;
    let mut growth_spread = data.liquidity_growth_spread;
    for (i, tier) in data.liquidity[..=data.active_spread.index()].iter().enumerate() {
        if tier.borrowed == 0 {
            continue;
        }
        let fee = u128::from(blocks).saturating_mul(i as u128 + 1);
        let accrued = if fee > ACCRUAL_SATURATION {
            U256::from(tier.borrowed)
        } else {
            mul_div(
                U256::from(tier.borrowed),
                U256::from(fee),
                U256::from(ACCRUAL_SATURATION),
                Rounding::Down,
            )?
        };
        accrued_total += accrued;
        borrowed_total += U256::from(tier.borrowed);

        let tier_total = U256::from(tier.swap) + U256::from(tier.borrowed);
        let increment = mul_div(accrued, Q128, tier_total, Rounding::Down)?;
        growth_spread[i] = growth_spread[i].checked_add(&Fraction::from_q128(increment))?;
    }

    data.block_last = block;
    if accrued_total.is_zero() {
        return Ok(0);
    }

    let increment_x128 = mul_div(accrued_total, Q128, borrowed_total, Rounding::Down)?;
    let growth = data
        .liquidity_growth
        .checked_add(&Fraction::from_q128(increment_x128))?;

    // floor(rate * increment_x128 / 2^128) over a 512-bit product
    let rate = data.liquidity_repay_rate;
    let restored = div_round(
        widen(rate.numerator()) * widen(increment_x128),
        widen(rate.denominator()) * Q128_WIDE,
        Rounding::Down,
    )
    .and_then(narrow)
    .ok_or(EngineError::Overflow("restored liquidity"))?;
    let restored = narrow_u128(restored.min(borrowed_total)).unwrap_or(u128::MAX);

    data.liquidity_growth_spread = growth_spread;
    data.liquidity_growth = growth;
    debug!(
        %strike,
        block,
        blocks,
        accrued = %accrued_total,
        restored,
        "accrued borrowed liquidity"
    );
    Ok(restored)
}
