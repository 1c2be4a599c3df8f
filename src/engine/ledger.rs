//! Liquidity ledger primitives.
//!
//! These four functions are the only place liquidity moves between the
//! swap and borrowed buckets of a strike. Each validates its preconditions
//! before touching state, so a failed call leaves the pair unchanged.
//!
//! | Primitive | Effect |
//! |-----------|--------|
//! | [`add_swap_liquidity`] | deposit into a tier |
//! | [`remove_swap_liquidity`] | withdraw from a tier |
//! | [`borrow_liquidity`] | drain tiers upward from `active_spread` |
//! | [`repay_liquidity`] | refill tiers downward from `active_spread` |

use tracing::trace;

use crate::constants::MAX_LIQUIDITY;
use crate::domain::{Spread, Strike};
use crate::error::EngineError;
use crate::state::PairData;

/// Deposits `liquidity` into `(strike, spread)`.
///
/// A tier below the strike's active spread is fully lent out, so liquidity
/// added there is classified as borrowed at once and returned as displaced
/// liquidity. The caller must repay the same amount elsewhere at the strike
/// to keep the borrowed total unchanged. Otherwise the liquidity joins the
/// tier's swap bucket and zero is returned.
///
/// # Errors
///
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::StrikeUninitialized`] if the strike has no entry.
/// - [`EngineError::StrikeOutOfRange`] if `strike ± spread` is not usable.
/// - [`EngineError::LiquidityOverflow`] if the tier would exceed
///   `2^128 - 1`.
pub fn add_swap_liquidity(
    pair_data: &mut PairData,
    strike: Strike,
    spread: Spread,
    liquidity: u128,
) -> crate::error::Result<u128> {
    pair_data.ensure_initialized()?;
    let data = pair_data.strike_mut(strike)?;
    strike.offset(-spread.width())?;
    strike.offset(spread.width())?;

    let tier = &mut data.liquidity[spread.index()];
    let total = tier
        .total()
        .and_then(|t| t.checked_add(liquidity))
        .filter(|t| *t <= MAX_LIQUIDITY);
    if total.is_none() {
        return Err(EngineError::LiquidityOverflow(
            "total liquidity in a strike tier must fit into 128 bits",
        ));
    }

    if spread < data.active_spread {
        tier.borrowed += liquidity;
        trace!(%strike, %spread, liquidity, "deposit displaced into borrowed");
        Ok(liquidity)
    } else {
        tier.swap += liquidity;
        Ok(0)
    }
}

/// Withdraws `liquidity` from `(strike, spread)`.
///
/// Below the active spread the withdrawal comes out of the borrowed bucket
/// and the amount is returned as displaced. At or above it the swap bucket
/// pays. Only the active tier may overdraw its swap bucket, in which case
/// the excess comes out of its borrowed bucket and is returned as displaced.
/// The caller must borrow the displaced amount elsewhere at the strike.
///
/// # Errors
///
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::StrikeUninitialized`] if the strike has no entry.
/// - [`EngineError::InsufficientLiquidity`] if the tier cannot cover the
///   withdrawal.
pub fn remove_swap_liquidity(
    pair_data: &mut PairData,
    strike: Strike,
    spread: Spread,
    liquidity: u128,
) -> crate::error::Result<u128> {
    pair_data.ensure_initialized()?;
    let data = pair_data.strike_mut(strike)?;
    let active = data.active_spread;
    let tier = &mut data.liquidity[spread.index()];

    if spread < active {
        tier.borrowed = tier.borrowed.checked_sub(liquidity).ok_or(
            EngineError::InsufficientLiquidity("removing more than the tier holds"),
        )?;
        return Ok(liquidity);
    }

    if liquidity <= tier.swap {
        tier.swap -= liquidity;
        return Ok(0);
    }

    if spread != active {
        return Err(EngineError::InsufficientLiquidity(
            "removing more liquidity than is available",
        ));
    }
    let excess = liquidity - tier.swap;
    if excess > tier.borrowed {
        return Err(EngineError::InsufficientLiquidity(
            "removing more than the tier holds",
        ));
    }
    tier.swap = 0;
    tier.borrowed -= excess;
    trace!(%strike, %spread, excess, "withdrawal displaced borrowed liquidity");
    Ok(excess)
}

/// Moves `liquidity` from swap to borrowed at `strike`.
///
/// Drains tiers starting at the active spread and advances the active
/// spread past every tier it empties.
///
/// # Errors
///
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::StrikeUninitialized`] if the strike has no entry.
/// - [`EngineError::InsufficientLiquidity`] if the tiers from the active
///   spread upward cannot supply `liquidity`.
pub fn borrow_liquidity(pair_data: &mut PairData, strike: Strike, liquidity: u128) -> crate::error::Result<()> {
    pair_data.ensure_initialized()?;
    let data = pair_data.strike_mut(strike)?;

    let available = data.liquidity[data.active_spread.index()..]
        .iter()
        .fold(0u128, |acc, t| acc.saturating_add(t.swap));
    if available < liquidity {
        return Err(EngineError::InsufficientLiquidity(
            "borrowing more than the strike can supply",
        ));
    }

    let mut remaining = liquidity;
    loop {
        let tier = &mut data.liquidity[data.active_spread.index()];
        if tier.swap >= remaining {
            tier.swap -= remaining;
            tier.borrowed += remaining;
            break;
        }
        remaining -= tier.swap;
        tier.borrowed += tier.swap;
        tier.swap = 0;

        data.active_spread = data.active_spread.next().ok_or(
            EngineError::InsufficientLiquidity("borrowing past the outermost tier"),
        )?;
    }
    trace!(%strike, liquidity, active_spread = %data.active_spread, "borrowed liquidity");
    Ok(())
}

/// Moves `liquidity` from borrowed back to swap at `strike`.
///
/// Refills tiers starting at the active spread and retreats the active
/// spread past every tier left without borrowed liquidity.
///
/// # Errors
///
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::StrikeUninitialized`] if the strike has no entry.
/// - [`EngineError::InsufficientLiquidity`] if `liquidity` exceeds what is
///   borrowed at the strike.
pub fn repay_liquidity(pair_data: &mut PairData, strike: Strike, liquidity: u128) -> crate::error::Result<()> {
    pair_data.ensure_initialized()?;
    let data = pair_data.strike_mut(strike)?;

    let outstanding = data.liquidity[..=data.active_spread.index()]
        .iter()
        .fold(0u128, |acc, t| acc.saturating_add(t.borrowed));
    if outstanding < liquidity {
        return Err(EngineError::InsufficientLiquidity(
            "repaying more than is borrowed at the strike",
        ));
    }

    let mut remaining = liquidity;
    loop {
        let tier = &mut data.liquidity[data.active_spread.index()];
        if tier.borrowed >= remaining {
            tier.swap += remaining;
            tier.borrowed -= remaining;
            break;
        }
        remaining -= tier.borrowed;
        tier.swap += tier.borrowed;
        tier.borrowed = 0;

        data.active_spread = data.active_spread.prev().ok_or(
            EngineError::InsufficientLiquidity("repaying past the innermost tier"),
        )?;
    }
    trace!(%strike, liquidity, active_spread = %data.active_spread, "repaid liquidity");
    Ok(())
}
