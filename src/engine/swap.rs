//! Multi-strike swap stepper.
//!
//! A swap starts at the best-priced tier cursor and trades against the
//! liquidity of every tier currently sitting at the visited strike. When
//! the strike is exhausted, those tiers move on to the next initialized
//! strike in the swap direction and the walk continues.
//!
//! At a tier's current strike its composition is the share of its swap
//! liquidity already held in token1. A token0 seller can therefore take
//! `composition * swap` of it, a token1 seller `(1 - composition) * swap`.

use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

use crate::constants::NUM_SPREADS;
use crate::domain::{to_signed, Pair, Rounding, Spread, Strike, TokenAmount, TokenSelector};
use crate::error::EngineError;
use crate::math::{compute_swap_step, mul_div, Fraction};
use crate::state::PairData;

/// Token deltas of a swap in the ledger sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Signed token0 delta.
    pub amount0: TokenAmount,
    /// Signed token1 delta.
    pub amount1: TokenAmount,
}

/// Per-tier swappable liquidity at the strike being visited.
#[derive(Debug, Default)]
struct StrikeLiquidity {
    /// Tier swap bucket at the strike, for tiers whose cursor is there.
    total: [U256; NUM_SPREADS],
    /// Part of `total` the swap direction can consume.
    available: [U256; NUM_SPREADS],
    /// Whether the tier cursor sits at the strike.
    present: [bool; NUM_SPREADS],
    /// Sum of `available`.
    sum: U256,
}

fn count_liquidity(
    pair_data: &PairData,
    strike: Strike,
    zero_to_one: bool,
) -> crate::error::Result<StrikeLiquidity> {
    let data = pair_data.strike_ref(strike)?;
    let mut out = StrikeLiquidity::default();
    for spread in Spread::ALL {
        if pair_data.strike_current(spread) != strike {
            continue;
        }
        let i = spread.index();
        let total = U256::from(data.liquidity(spread).swap);
        let composition = pair_data.composition(spread);
        let share = if zero_to_one {
            composition
        } else {
            Fraction::ONE.checked_sub(&composition)?
        };
        let available = share.mul_floor(total)?;
        out.total[i] = total;
        out.available[i] = available;
        out.present[i] = true;
        out.sum += available;
    }
    Ok(out)
}

/// Re-derives the compositions of the tiers that traded at the strike from
/// the liquidity the step left unconsumed.
fn update_compositions(
    pair_data: &mut PairData,
    liquidity: &StrikeLiquidity,
    remaining: U256,
    zero_to_one: bool,
) -> crate::error::Result<()> {
    if liquidity.sum.is_zero() {
        return Ok(());
    }
    for spread in Spread::ALL {
        let i = spread.index();
        if !liquidity.present[i] || liquidity.total[i].is_zero() {
            continue;
        }
        let left = mul_div(liquidity.available[i], remaining, liquidity.sum, Rounding::Down)?;
        let left = left.min(liquidity.total[i]);
        let composition = if zero_to_one {
            Fraction::new(left, liquidity.total[i])?
        } else {
            Fraction::new(liquidity.total[i] - left, liquidity.total[i])?
        };
        pair_data.set_composition(spread, composition);
    }
    Ok(())
}

/// Returns `true` when `amount_desired` sells token0 for token1.
pub(crate) fn is_zero_to_one(pair: &Pair, amount_desired: &TokenAmount) -> crate::error::Result<bool> {
    let selector = pair.selector_of(&amount_desired.token())?;
    Ok(amount_desired.is_positive() == (selector == TokenSelector::Token0))
}

/// Best-priced tier cursor for the swap direction.
pub(crate) fn start_strike(pair_data: &PairData, zero_to_one: bool) -> crate::error::Result<Strike> {
    let cursors = pair_data.strikes_current();
    if zero_to_one {
        cursors.iter().copied().max()
    } else {
        cursors.iter().copied().min()
    }
    .ok_or(EngineError::StrikeUninitialized)
}

/// Swaps `amount_desired` against `pair_data`.
///
/// A positive desired amount is an exact input of that token, a negative
/// one an exact output. Tier cursors and compositions are updated in place.
///
/// # Errors
///
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::InvalidAmount`] for a zero amount.
/// - [`EngineError::InvalidToken`] if the token is not in `pair`.
/// - [`EngineError::StrikeUninitialized`] if the walk reaches a linked
///   strike that is not loaded.
/// - [`EngineError::SwapOutOfBounds`] if the walk passes the last strike
///   before the amount is satisfied.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, I256};
/// use dry_powder_engine::domain::{Pair, Spread, Strike, Token, TokenAmount};
/// use dry_powder_engine::engine::{calculate_add_liquidity, calculate_initialize, calculate_swap};
///
/// let pair = Pair::new(
///     Token::new(Address::repeat_byte(1), 18),
///     Token::new(Address::repeat_byte(2), 18),
///     0,
/// )
/// .expect("distinct tokens");
/// let mut data = calculate_initialize(Strike::ZERO).expect("interior strike");
/// calculate_add_liquidity(&pair, &mut data, 0, Strike::ZERO, Spread::One, 1_000)
///     .expect("deposit");
///
/// let input = TokenAmount::new(pair.token1(), I256::try_from(500).unwrap_or_default());
/// let out = calculate_swap(&pair, &mut data, &input).expect("swap");
/// assert_eq!(out.amount1.amount(), I256::try_from(500).unwrap_or_default());
/// assert_eq!(out.amount0.amount(), I256::try_from(-500).unwrap_or_default());
/// ```
pub fn calculate_swap(
    pair: &Pair,
    pair_data: &mut PairData,
    amount_desired: &TokenAmount,
) -> crate::error::Result<SwapOutcome> {
    pair_data.ensure_initialized()?;
    if amount_desired.is_zero() {
        return Err(EngineError::InvalidAmount("swap amount must be non-zero"));
    }
    let desired_selector = pair.selector_of(&amount_desired.token())?;
    let zero_to_one = is_zero_to_one(pair, amount_desired)?;
    let mut strike = start_strike(pair_data, zero_to_one)?;

    let mut remaining = *amount_desired;
    // amount_a is in the desired token, amount_b in the other one
    let mut amount_a = I256::ZERO;
    let mut amount_b = I256::ZERO;

    loop {
        let liquidity = count_liquidity(pair_data, strike, zero_to_one)?;
        if !liquidity.sum.is_zero() {
            let step = compute_swap_step(pair, strike, liquidity.sum, &remaining)?;
            let amount_in = to_signed(step.amount_in)?;
            let amount_out = to_signed(step.amount_out)?;
            let left = if remaining.is_positive() {
                amount_a = amount_a
                    .checked_add(amount_in)
                    .ok_or(EngineError::Overflow("swap input sum"))?;
                amount_b = amount_b
                    .checked_sub(amount_out)
                    .ok_or(EngineError::Overflow("swap output sum"))?;
                remaining.amount() - amount_in
            } else {
                amount_a = amount_a
                    .checked_sub(amount_out)
                    .ok_or(EngineError::Overflow("swap output sum"))?;
                amount_b = amount_b
                    .checked_add(amount_in)
                    .ok_or(EngineError::Overflow("swap input sum"))?;
                remaining.amount() + amount_out
            };
            remaining = TokenAmount::new(remaining.token(), left);
            update_compositions(pair_data, &liquidity, step.liquidity_remaining, zero_to_one)?;
            trace!(
                %strike,
                liquidity = %liquidity.sum,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                "swap step"
            );
            if remaining.is_zero() {
                break;
            }
        }

        let next = pair_data.next_strike(strike, zero_to_one);
        if !next.is_interior() {
            return Err(EngineError::SwapOutOfBounds);
        }
        if !pair_data.contains_strike(next) {
            return Err(EngineError::StrikeUninitialized);
        }
        let reset = if zero_to_one { Fraction::ONE } else { Fraction::ZERO };
        for spread in Spread::ALL {
            if pair_data.strike_current(spread) == strike {
                pair_data.set_strike_current(spread, next);
                pair_data.set_composition(spread, reset);
            }
        }
        trace!(from = %strike, to = %next, "crossed strike");
        strike = next;
    }

    let (amount0, amount1) = match desired_selector {
        TokenSelector::Token0 => (amount_a, amount_b),
        TokenSelector::Token1 => (amount_b, amount_a),
    };
    debug!(%amount0, %amount1, final_strike = %strike, "swapped");
    Ok(SwapOutcome {
        amount0: TokenAmount::new(pair.token0(), amount0),
        amount1: TokenAmount::new(pair.token1(), amount1),
    })
}
