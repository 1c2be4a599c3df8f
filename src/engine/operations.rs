//! Public liquidity operations.
//!
//! Each operation brings the target strike up to date with [`accrue`] and
//! hands the freed liquidity back to swappers before making its own change.
//! Results follow the ledger sign convention: positive token amounts are
//! paid by the user, negative amounts are paid to the user.
//!
//! Operations check their inputs before mutating the snapshot. A failure in
//! a later step may leave the snapshot partially updated; callers discard
//! the snapshot in that case.

use alloy_primitives::{I256, U256};
use tracing::debug;

use super::accrual::accrue;
use super::ledger::{add_swap_liquidity, borrow_liquidity, remove_swap_liquidity, repay_liquidity};
use crate::constants::MAX_MULTIPLIER_X128;
use crate::domain::{
    to_signed, Pair, Position, PositionData, Rounding, Spread, Strike, TokenAmount, TokenSelector,
};
use crate::error::EngineError;
use crate::math::{
    balance_to_liquidity, debt_balance_to_liquidity, get_amount0, get_amount1, get_amounts,
    get_liquidity_for_amount0, get_liquidity_for_amount1, liquidity_to_balance, Fraction,
};
use crate::state::PairData;

/// Token and position deltas produced by a liquidity operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityOutcome {
    /// Signed token0 delta.
    pub amount0: TokenAmount,
    /// Signed token1 delta.
    pub amount1: TokenAmount,
    /// Signed balance delta of the position.
    pub position: PositionData,
}

impl LiquidityOutcome {
    fn new(pair: &Pair, amount0: I256, amount1: I256, position: PositionData) -> Self {
        Self {
            amount0: TokenAmount::new(pair.token0(), amount0),
            amount1: TokenAmount::new(pair.token1(), amount1),
            position,
        }
    }
}

/// Accrues `strike` and repays whatever the accrual freed.
fn settle_accrual(pair_data: &mut PairData, block: u64, strike: Strike) -> crate::error::Result<()> {
    calculate_accrue(pair_data, block, strike).map(|_| ())
}

fn amounts_signed(
    pair_data: &PairData,
    strike: Strike,
    spread: Spread,
    liquidity: u128,
    rounding: Rounding,
) -> crate::error::Result<(I256, I256)> {
    let (a0, a1) = get_amounts(pair_data, strike, spread, U256::from(liquidity), rounding)?;
    Ok((to_signed(a0)?, to_signed(a1)?))
}

fn checked_sum(a: I256, b: I256) -> crate::error::Result<I256> {
    a.checked_add(b).ok_or(EngineError::Overflow("token amount sum"))
}

fn checked_diff(a: I256, b: I256) -> crate::error::Result<I256> {
    a.checked_sub(b).ok_or(EngineError::Overflow("token amount difference"))
}

// ---------------------------------------------------------------------------
// Initialize / accrue
// ---------------------------------------------------------------------------

/// Creates the state of a new pair whose every tier starts at `strike`.
///
/// # Errors
///
/// Returns [`EngineError::StrikeOutOfRange`] for sentinel strikes.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::{Spread, Strike};
/// use dry_powder_engine::engine::calculate_initialize;
///
/// let data = calculate_initialize(Strike::ZERO).expect("interior strike");
/// assert_eq!(data.strike_current(Spread::One), Strike::ZERO);
/// ```
pub fn calculate_initialize(strike: Strike) -> crate::error::Result<PairData> {
    let data = PairData::initialize(strike, 0)?;
    debug!(%strike, "initialized pair");
    Ok(data)
}

/// Accrues interest at `strike` and returns the liquidity handed back to
/// swappers.
///
/// # Errors
///
/// Propagates the errors of [`accrue`] and [`repay_liquidity`].
pub fn calculate_accrue(pair_data: &mut PairData, block: u64, strike: Strike) -> crate::error::Result<u128> {
    let restored = accrue(pair_data, block, strike)?;
    if restored > 0 {
        repay_liquidity(pair_data, strike, restored)?;
    }
    Ok(restored)
}

// ---------------------------------------------------------------------------
// Liquidity provision
// ---------------------------------------------------------------------------

/// Deposits `liquidity` at `(strike, spread)`.
///
/// The user pays the token value of the liquidity rounded up and receives
/// `liquidity / growth` shares of the tier.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for zero liquidity.
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - Any error of the ledger primitives and amount conversions.
pub fn calculate_add_liquidity(
    pair: &Pair,
    pair_data: &mut PairData,
    block: u64,
    strike: Strike,
    spread: Spread,
    liquidity: u128,
) -> crate::error::Result<LiquidityOutcome> {
    if liquidity == 0 {
        return Err(EngineError::InvalidAmount("liquidity to add must be positive"));
    }
    pair_data.ensure_initialized()?;
    let strike = strike.ensure_interior()?;

    settle_accrual(pair_data, block, strike)?;
    let displaced = add_swap_liquidity(pair_data, strike, spread, liquidity)?;
    if displaced > 0 {
        repay_liquidity(pair_data, strike, displaced)?;
    }

    let (amount0, amount1) = amounts_signed(pair_data, strike, spread, liquidity, Rounding::Up)?;
    let growth = pair_data.strike_ref(strike)?.liquidity_growth_spread(spread);
    let balance = to_signed(liquidity_to_balance(liquidity, &growth)?)?;

    debug!(%strike, %spread, liquidity, %amount0, %amount1, "added liquidity");
    Ok(LiquidityOutcome::new(
        pair,
        amount0,
        amount1,
        PositionData::new(Position::bi_directional(*pair, strike, spread), balance),
    ))
}

/// Redeems `balance` shares of `(strike, spread)`.
///
/// The user receives the token value of the redeemed liquidity rounded
/// down.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for a zero balance, or one worth no
///   liquidity.
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - Any error of the ledger primitives and amount conversions.
pub fn calculate_remove_liquidity(
    pair: &Pair,
    pair_data: &mut PairData,
    block: u64,
    strike: Strike,
    spread: Spread,
    balance: U256,
) -> crate::error::Result<LiquidityOutcome> {
    if balance.is_zero() {
        return Err(EngineError::InvalidAmount("balance to remove must be positive"));
    }
    pair_data.ensure_initialized()?;
    let strike = strike.ensure_interior()?;
    let signed_balance = to_signed(balance)?;

    settle_accrual(pair_data, block, strike)?;
    let growth = pair_data.strike_ref(strike)?.liquidity_growth_spread(spread);
    let liquidity = balance_to_liquidity(balance, &growth)?;
    if liquidity == 0 {
        return Err(EngineError::InvalidAmount("balance is worth no liquidity"));
    }

    let displaced = remove_swap_liquidity(pair_data, strike, spread, liquidity)?;
    if displaced > 0 {
        borrow_liquidity(pair_data, strike, displaced)?;
    }

    let (amount0, amount1) = amounts_signed(pair_data, strike, spread, liquidity, Rounding::Down)?;
    debug!(%strike, %spread, liquidity, %amount0, %amount1, "removed liquidity");
    Ok(LiquidityOutcome::new(
        pair,
        -amount0,
        -amount1,
        PositionData::new(Position::bi_directional(*pair, strike, spread), -signed_balance),
    ))
}

// ---------------------------------------------------------------------------
// Borrowing
// ---------------------------------------------------------------------------

/// Borrows `debt` liquidity at `strike` against `collateral`.
///
/// The user receives the token value of the borrowed tiers rounded down and
/// pays the collateral. The collateral multiplier is
/// `(collateral_liquidity - debt) / debt` and must lie within
/// `[1/2000, (2^136 - 1) / 2^128]`. The strike's repay rate grows by
/// `debt / multiplier`.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for a zero debt or non-positive
///   collateral.
/// - [`EngineError::InvalidToken`] if the collateral token is not in the
///   pair.
/// - [`EngineError::Undercollateralization`] if the collateral does not
///   cover the debt with the minimum multiplier.
/// - [`EngineError::Overcollateralization`] if the multiplier exceeds its
///   maximum.
/// - [`EngineError::InsufficientLiquidity`] if the strike cannot lend
///   `debt`.
pub fn calculate_borrow_liquidity(
    pair: &Pair,
    pair_data: &mut PairData,
    block: u64,
    strike: Strike,
    collateral: &TokenAmount,
    debt: u128,
) -> crate::error::Result<LiquidityOutcome> {
    if debt == 0 {
        return Err(EngineError::InvalidAmount("debt must be positive"));
    }
    if !collateral.is_positive() {
        return Err(EngineError::InvalidAmount("collateral must be positive"));
    }
    let selector_collateral = pair.selector_of(&collateral.token())?;
    pair_data.ensure_initialized()?;
    let strike = strike.ensure_interior()?;

    let collateral_amount = collateral.amount().unsigned_abs();
    let liquidity_collateral = match selector_collateral {
        TokenSelector::Token0 => get_liquidity_for_amount0(collateral_amount, strike)?,
        TokenSelector::Token1 => get_liquidity_for_amount1(collateral_amount),
    };
    let debt_wide = U256::from(debt);
    if liquidity_collateral < debt_wide {
        return Err(EngineError::Undercollateralization("collateral is less than debt"));
    }
    let multiplier = Fraction::new(liquidity_collateral - debt_wide, debt_wide)?;
    if multiplier < Fraction::MIN_MULTIPLIER {
        return Err(EngineError::Undercollateralization(
            "collateral multiplier below 1/2000",
        ));
    }
    match multiplier.to_q128() {
        Ok(q) if q <= MAX_MULTIPLIER_X128 => {}
        _ => {
            return Err(EngineError::Overcollateralization(
                "collateral multiplier exceeds 2^136 - 1 in Q128",
            ))
        }
    }

    settle_accrual(pair_data, block, strike)?;
    borrow_liquidity(pair_data, strike, debt)?;

    let mut amount0 = I256::ZERO;
    let mut amount1 = I256::ZERO;
    let mut spread = pair_data.strike_ref(strike)?.active_spread();
    let mut remaining = debt;
    loop {
        let borrowed = pair_data.strike_ref(strike)?.liquidity(spread).borrowed;
        if borrowed >= remaining {
            let (a0, a1) = amounts_signed(pair_data, strike, spread, remaining, Rounding::Down)?;
            amount0 = checked_diff(amount0, a0)?;
            amount1 = checked_diff(amount1, a1)?;
            break;
        }
        if borrowed > 0 {
            let (a0, a1) = amounts_signed(pair_data, strike, spread, borrowed, Rounding::Down)?;
            amount0 = checked_diff(amount0, a0)?;
            amount1 = checked_diff(amount1, a1)?;
            remaining -= borrowed;
        }
        spread = spread.prev().ok_or(EngineError::InsufficientLiquidity(
            "borrowed tiers do not cover the debt",
        ))?;
    }

    let collateral_signed = collateral.amount();
    match selector_collateral {
        TokenSelector::Token0 => amount0 = checked_sum(amount0, collateral_signed)?,
        TokenSelector::Token1 => amount1 = checked_sum(amount1, collateral_signed)?,
    }

    let data = pair_data.strike_mut(strike)?;
    let rate_increase = Fraction::from_integer(debt).checked_mul(&multiplier.invert()?)?;
    data.liquidity_repay_rate = data.liquidity_repay_rate.checked_add(&rate_increase)?;
    let growth_last = data.liquidity_growth;

    debug!(%strike, debt, %multiplier, %amount0, %amount1, "borrowed liquidity");
    Ok(LiquidityOutcome::new(
        pair,
        amount0,
        amount1,
        PositionData::new(
            Position::debt(*pair, strike, selector_collateral, growth_last, multiplier),
            I256::try_from(debt).map_err(|_| EngineError::Overflow("debt balance"))?,
        ),
    ))
}

/// Repays `balance` of a debt position opened at `strike`.
///
/// The liquidity still owed is `balance * (multiplier - growth_delta) /
/// multiplier`, where `growth_delta` is the strike growth since the position
/// opened. The user pays the token value of that liquidity rounded up and
/// receives `debt + floor(multiplier * debt)` liquidity worth of collateral
/// rounded down. The strike's repay rate shrinks by `balance / multiplier`.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for a zero balance.
/// - [`EngineError::PairUninitialized`] before the pair exists.
/// - [`EngineError::Underflow`] if `growth_last` is ahead of the strike.
/// - Any error of the ledger primitives and amount conversions.
#[allow(clippy::too_many_arguments)]
pub fn calculate_repay_liquidity(
    pair: &Pair,
    pair_data: &mut PairData,
    block: u64,
    strike: Strike,
    selector_collateral: TokenSelector,
    growth_last: Fraction,
    multiplier: Fraction,
    balance: U256,
) -> crate::error::Result<LiquidityOutcome> {
    if balance.is_zero() {
        return Err(EngineError::InvalidAmount("balance to repay must be positive"));
    }
    pair_data.ensure_initialized()?;
    let strike = strike.ensure_interior()?;
    let signed_balance = to_signed(balance)?;

    settle_accrual(pair_data, block, strike)?;
    let growth_delta = pair_data
        .strike_ref(strike)?
        .liquidity_growth()
        .checked_sub(&growth_last)?;
    let liquidity_debt = debt_balance_to_liquidity(balance, &multiplier, &growth_delta)?;
    if liquidity_debt > 0 {
        repay_liquidity(pair_data, strike, liquidity_debt)?;
    }

    let mut amount0 = I256::ZERO;
    let mut amount1 = I256::ZERO;
    let mut spread = pair_data.strike_ref(strike)?.active_spread();
    let mut remaining = liquidity_debt;
    loop {
        let swap = pair_data.strike_ref(strike)?.liquidity(spread).swap;
        if swap >= remaining {
            let (a0, a1) = amounts_signed(pair_data, strike, spread, remaining, Rounding::Up)?;
            amount0 = checked_sum(amount0, a0)?;
            amount1 = checked_sum(amount1, a1)?;
            break;
        }
        if swap > 0 {
            let (a0, a1) = amounts_signed(pair_data, strike, spread, swap, Rounding::Up)?;
            amount0 = checked_sum(amount0, a0)?;
            amount1 = checked_sum(amount1, a1)?;
            remaining -= swap;
        }
        spread = spread.next().ok_or(EngineError::InsufficientLiquidity(
            "repaid tiers do not cover the debt",
        ))?;
    }

    let liquidity_debt_wide = U256::from(liquidity_debt);
    let liquidity_collateral = liquidity_debt_wide
        .checked_add(multiplier.mul_floor(liquidity_debt_wide)?)
        .ok_or(EngineError::Overflow("collateral liquidity"))?;
    match selector_collateral {
        TokenSelector::Token0 => {
            let c = to_signed(get_amount0(liquidity_collateral, strike, Rounding::Down)?)?;
            amount0 = checked_diff(amount0, c)?;
        }
        TokenSelector::Token1 => {
            let c = to_signed(get_amount1(liquidity_collateral))?;
            amount1 = checked_diff(amount1, c)?;
        }
    }

    let data = pair_data.strike_mut(strike)?;
    let rate_decrease = Fraction::new(balance, U256::from(1u8))?.checked_div(&multiplier)?;
    data.liquidity_repay_rate = data
        .liquidity_repay_rate
        .checked_sub(&rate_decrease)
        .unwrap_or(Fraction::ZERO);

    debug!(%strike, liquidity_debt, %amount0, %amount1, "repaid liquidity");
    Ok(LiquidityOutcome::new(
        pair,
        amount0,
        amount1,
        PositionData::new(
            Position::debt(*pair, strike, selector_collateral, growth_last, multiplier),
            -signed_balance,
        ),
    ))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::Address;

    use super::*;
    use crate::domain::{PositionKind, TierLiquidity, Token};

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    fn pair() -> Pair {
        let Ok(p) = Pair::new(
            Token::new(Address::repeat_byte(0x11), 18),
            Token::new(Address::repeat_byte(0x22), 18),
            0,
        ) else {
            panic!("valid pair");
        };
        p
    }

    fn int(v: i128) -> I256 {
        let Ok(x) = I256::try_from(v) else {
            panic!("fits");
        };
        x
    }

    fn tier(p: &PairData, spread: Spread) -> TierLiquidity {
        let Some(d) = p.strike(Strike::ZERO) else {
            panic!("strike present");
        };
        d.liquidity(spread)
    }

    fn seeded() -> (Pair, PairData) {
        let p = pair();
        let Ok(mut data) = calculate_initialize(Strike::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(_) = calculate_add_liquidity(&p, &mut data, 0, Strike::ZERO, Spread::One, ONE_ETHER)
        else {
            panic!("expected Ok");
        };
        (p, data)
    }

    fn borrowed() -> (Pair, PairData, LiquidityOutcome) {
        let (p, mut data) = seeded();
        let collateral = TokenAmount::new(p.token0(), int(3 * ONE_ETHER as i128 / 2));
        let Ok(out) =
            calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, ONE_ETHER / 2)
        else {
            panic!("expected Ok");
        };
        (p, data, out)
    }

    // -- initialize / add / remove --------------------------------------------

    #[test]
    fn initialize_at_positive_strike() {
        let Ok(s) = Strike::new(1) else {
            panic!("valid strike");
        };
        let Ok(data) = calculate_initialize(s) else {
            panic!("expected Ok");
        };
        assert_eq!(data.strikes_current(), &[s; 5]);
        assert_eq!(data.strike_count(), 1);
        assert!(data.is_initialized());
    }

    #[test]
    fn add_liquidity_at_current_strike() {
        let p = pair();
        let Ok(mut data) = calculate_initialize(Strike::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(out) =
            calculate_add_liquidity(&p, &mut data, 0, Strike::ZERO, Spread::One, ONE_ETHER)
        else {
            panic!("expected Ok");
        };
        assert_eq!(out.amount0.amount(), int(ONE_ETHER as i128));
        assert_eq!(out.amount1.amount(), I256::ZERO);
        assert_eq!(out.position.balance(), int(ONE_ETHER as i128));
        assert_eq!(tier(&data, Spread::One), TierLiquidity::new(ONE_ETHER, 0));
        for spread in [Spread::Two, Spread::Three, Spread::Four, Spread::Five] {
            assert_eq!(tier(&data, spread), TierLiquidity::ZERO);
        }
    }

    #[test]
    fn add_requires_positive_amount_and_pair() {
        let p = pair();
        let mut empty = PairData::default();
        assert!(matches!(
            calculate_add_liquidity(&p, &mut empty, 0, Strike::ZERO, Spread::One, 0),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(
            calculate_add_liquidity(&p, &mut empty, 0, Strike::ZERO, Spread::One, 1),
            Err(EngineError::PairUninitialized)
        );
    }

    #[test]
    fn remove_liquidity_round_trip() {
        let (p, mut data) = seeded();
        let Ok(out) = calculate_remove_liquidity(
            &p,
            &mut data,
            0,
            Strike::ZERO,
            Spread::One,
            U256::from(ONE_ETHER),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out.amount0.amount(), int(1 - ONE_ETHER as i128));
        assert_eq!(out.amount1.amount(), I256::ZERO);
        assert_eq!(out.position.balance(), int(-(ONE_ETHER as i128)));
        assert_eq!(tier(&data, Spread::One), TierLiquidity::ZERO);
    }

    #[test]
    fn remove_zero_rejected() {
        let (p, mut data) = seeded();
        assert!(matches!(
            calculate_remove_liquidity(&p, &mut data, 0, Strike::ZERO, Spread::One, U256::ZERO),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    // -- borrow / repay -------------------------------------------------------

    #[test]
    fn borrow_moves_tier_one() {
        let (_, data, out) = borrowed();
        assert_eq!(
            tier(&data, Spread::One),
            TierLiquidity::new(ONE_ETHER / 2, ONE_ETHER / 2)
        );
        let Some(d) = data.strike(Strike::ZERO) else {
            panic!("strike present");
        };
        assert_eq!(d.active_spread(), Spread::One);
        assert_eq!(
            d.liquidity_repay_rate(),
            Fraction::from_integer(ONE_ETHER / 4)
        );
        assert_eq!(out.amount0.amount(), int(ONE_ETHER as i128 + 1));
        assert_eq!(out.amount1.amount(), I256::ZERO);
        assert_eq!(out.position.balance(), int((ONE_ETHER / 2) as i128));
        let PositionKind::Debt {
            selector_collateral,
            liquidity_growth_last,
            multiplier,
        } = out.position.position().kind()
        else {
            panic!("debt position");
        };
        assert_eq!(selector_collateral, TokenSelector::Token0);
        assert_eq!(liquidity_growth_last, Fraction::ZERO);
        assert_eq!(multiplier, Fraction::from_integer(2));
    }

    #[test]
    fn borrow_rejects_thin_collateral() {
        let (p, mut data) = seeded();
        let collateral = TokenAmount::new(p.token1(), int((ONE_ETHER / 2) as i128));
        assert!(matches!(
            calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, ONE_ETHER / 2),
            Err(EngineError::Undercollateralization(_))
        ));
        let collateral = TokenAmount::new(p.token1(), int((ONE_ETHER / 4) as i128));
        assert!(matches!(
            calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, ONE_ETHER / 2),
            Err(EngineError::Undercollateralization(_))
        ));
    }

    #[test]
    fn borrow_rejects_excess_collateral() {
        let (p, mut data) = seeded();
        let collateral = TokenAmount::new(p.token1(), I256::MAX);
        assert!(matches!(
            calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, 1),
            Err(EngineError::Overcollateralization(_))
        ));
    }

    #[test]
    fn borrow_rejects_foreign_collateral() {
        let (p, mut data) = seeded();
        let other = Token::new(Address::repeat_byte(0x33), 18);
        let collateral = TokenAmount::new(other, int(ONE_ETHER as i128));
        assert!(matches!(
            calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, 1),
            Err(EngineError::InvalidToken(_))
        ));
    }

    #[test]
    fn repay_in_same_block_restores_tier() {
        let (p, mut data, _) = borrowed();
        let Ok(out) = calculate_repay_liquidity(
            &p,
            &mut data,
            0,
            Strike::ZERO,
            TokenSelector::Token0,
            Fraction::ZERO,
            Fraction::from_integer(2),
            U256::from(ONE_ETHER / 2),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out.amount0.amount(), int(-(ONE_ETHER as i128)));
        assert_eq!(out.amount1.amount(), I256::ZERO);
        assert_eq!(out.position.balance(), int(-((ONE_ETHER / 2) as i128)));
        assert_eq!(tier(&data, Spread::One), TierLiquidity::new(ONE_ETHER, 0));
        let Some(d) = data.strike(Strike::ZERO) else {
            panic!("strike present");
        };
        assert_eq!(d.liquidity_repay_rate(), Fraction::ZERO);
    }

    #[test]
    fn accrual_restores_committed_liquidity() {
        let (_, mut data, _) = borrowed();
        assert_eq!(calculate_accrue(&mut data, 100, Strike::ZERO), Ok(12_499_999_999_999));
        assert_eq!(
            tier(&data, Spread::One).borrowed,
            ONE_ETHER / 2 - 12_499_999_999_999
        );
    }

    #[test]
    fn repay_after_accrual_owes_less() {
        let (p, mut data, _) = borrowed();
        let Ok(out) = calculate_repay_liquidity(
            &p,
            &mut data,
            100,
            Strike::ZERO,
            TokenSelector::Token0,
            Fraction::ZERO,
            Fraction::from_integer(2),
            U256::from(ONE_ETHER / 2),
        ) else {
            panic!("expected Ok");
        };
        // all debt is settled: nothing stays borrowed beyond rounding
        assert!(tier(&data, Spread::One).borrowed <= 1);
        assert!(out.amount0.amount().is_negative());
    }
}
