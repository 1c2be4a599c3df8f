//! Property-based tests for the ledger state machine.
//!
//! 1. **Add/remove round trip**: removing the balance minted by a deposit
//!    restores the tier.
//! 2. **Borrow/repay symmetry**: repaying the borrowed amount restores every
//!    tier and the active spread.
//! 3. **Tier-one borrow**: a borrow covered by tier one moves exactly that
//!    amount and keeps the active spread.
//! 4. **Accrual monotonicity**: growth never decreases and a repeated block
//!    is a no-op.
//! 5. **Ratio monotonicity**: the strike ratio strictly increases.
//! 6. **Swap direction**: an exact-input swap pays in the input token and
//!    pays out the other one.

use alloy_primitives::{Address, I256, U256};
use proptest::prelude::*;

use super::{
    accrue, borrow_liquidity, calculate_add_liquidity, calculate_initialize,
    calculate_remove_liquidity, calculate_swap, repay_liquidity,
};
use crate::domain::{Pair, Spread, Strike, TierLiquidity, Token, TokenAmount};
use crate::math::ratio_x128_at_strike;
use crate::state::PairData;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pair() -> Pair {
    let Ok(pair) = Pair::new(
        Token::new(Address::repeat_byte(0xaa), 18),
        Token::new(Address::repeat_byte(0xbb), 6),
        0,
    ) else {
        panic!("valid pair");
    };
    pair
}

fn make_strike(v: i32) -> Strike {
    let Ok(s) = Strike::new(v) else {
        panic!("valid strike");
    };
    s
}

fn make_spread(v: u8) -> Spread {
    let Ok(s) = Spread::new(v) else {
        panic!("valid spread");
    };
    s
}

fn tiers(data: &PairData, strike: Strike) -> [TierLiquidity; 5] {
    let Some(d) = data.strike(strike) else {
        panic!("strike present");
    };
    *d.tiers()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

fn liquidity_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000_000_000u128
}

fn strike_strategy() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000i32
}

fn spread_strategy() -> impl Strategy<Value = u8> {
    1u8..=5u8
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_remove_round_trip(
        current in strike_strategy(),
        offset in -3i32..=3i32,
        spread in spread_strategy(),
        liquidity in liquidity_strategy(),
    ) {
        let pair = make_pair();
        let current = make_strike(current);
        let strike = make_strike(current.get() + offset);
        let spread = make_spread(spread);
        let Ok(mut data) = calculate_initialize(current) else {
            panic!("expected Ok");
        };

        let Ok(added) = calculate_add_liquidity(&pair, &mut data, 1, strike, spread, liquidity) else {
            panic!("expected Ok");
        };
        let balance = added.position.balance().unsigned_abs();
        let Ok(removed) = calculate_remove_liquidity(&pair, &mut data, 1, strike, spread, balance) else {
            panic!("expected Ok");
        };

        prop_assert_eq!(tiers(&data, strike), [TierLiquidity::ZERO; 5]);
        prop_assert_eq!(removed.position.balance(), -added.position.balance());
        // the user never withdraws more than was deposited
        prop_assert!(-removed.amount0.amount() <= added.amount0.amount());
        prop_assert!(-removed.amount1.amount() <= added.amount1.amount());
    }

    #[test]
    fn prop_borrow_repay_symmetry(
        deposits in proptest::collection::vec(0u128..=1_000_000u128, 5),
        fraction in 1u32..=100u32,
    ) {
        let Ok(mut data) = PairData::initialize(Strike::ZERO, 0) else {
            panic!("expected Ok");
        };
        let Ok(entry) = data.strike_mut(Strike::ZERO) else {
            panic!("strike present");
        };
        for (tier, amount) in entry.liquidity.iter_mut().zip(deposits.iter()) {
            tier.swap = *amount;
        }
        let total: u128 = deposits.iter().sum();
        let borrow = total * u128::from(fraction) / 100;
        let before = data.clone();

        prop_assert!(borrow_liquidity(&mut data, Strike::ZERO, borrow).is_ok());
        let after_borrow = tiers(&data, Strike::ZERO);
        let borrowed: u128 = after_borrow.iter().map(|t| t.borrowed).sum();
        prop_assert_eq!(borrowed, borrow);

        prop_assert!(repay_liquidity(&mut data, Strike::ZERO, borrow).is_ok());
        prop_assert_eq!(tiers(&data, Strike::ZERO), tiers(&before, Strike::ZERO));
        let (Some(a), Some(b)) = (data.strike(Strike::ZERO), before.strike(Strike::ZERO)) else {
            panic!("strike present");
        };
        // an emptied leading tier may leave the cursor one step further out
        prop_assert!(a.active_spread() >= b.active_spread());
    }

    #[test]
    fn prop_tier_one_borrow(
        swap in 1u128..=u128::from(u64::MAX),
        share in 1u32..=100u32,
    ) {
        let Ok(mut data) = PairData::initialize(Strike::ZERO, 0) else {
            panic!("expected Ok");
        };
        let Ok(entry) = data.strike_mut(Strike::ZERO) else {
            panic!("strike present");
        };
        entry.liquidity[0].swap = swap;
        let borrow = swap * u128::from(share) / 100;

        prop_assert!(borrow_liquidity(&mut data, Strike::ZERO, borrow).is_ok());
        let t = tiers(&data, Strike::ZERO);
        prop_assert_eq!(t[0], TierLiquidity::new(swap - borrow, borrow));
        let Some(d) = data.strike(Strike::ZERO) else {
            panic!("strike present");
        };
        prop_assert_eq!(d.active_spread(), Spread::One);
    }

    #[test]
    fn prop_accrual_monotone_and_idempotent(
        borrow in 1u128..=1_000_000_000_000u128,
        steps in proptest::collection::vec(0u64..=500_000u64, 1..6),
    ) {
        let Ok(mut data) = PairData::initialize(Strike::ZERO, 0) else {
            panic!("expected Ok");
        };
        let Ok(entry) = data.strike_mut(Strike::ZERO) else {
            panic!("strike present");
        };
        entry.liquidity[0].swap = 2 * borrow;
        prop_assert!(borrow_liquidity(&mut data, Strike::ZERO, borrow).is_ok());

        let mut block = 0u64;
        for step in steps {
            block += step;
            let Some(prior) = data.strike(Strike::ZERO).map(|d| d.liquidity_growth()) else {
                panic!("strike present");
            };
            prop_assert!(accrue(&mut data, block, Strike::ZERO).is_ok());
            let snapshot = data.clone();
            prop_assert_eq!(accrue(&mut data, block, Strike::ZERO), Ok(0));
            prop_assert_eq!(&data, &snapshot);
            let Some(current) = data.strike(Strike::ZERO).map(|d| d.liquidity_growth()) else {
                panic!("strike present");
            };
            prop_assert!(current >= prior);
        }
    }

    #[test]
    fn prop_ratio_monotone(strike in -776_361i32..=776_361i32) {
        let (Ok(lo), Ok(hi)) = (
            ratio_x128_at_strike(make_strike(strike)),
            ratio_x128_at_strike(make_strike(strike + 1)),
        ) else {
            panic!("interior strikes");
        };
        prop_assert!(hi > lo);
    }

    #[test]
    fn prop_swap_direction(
        liquidity in 1_000u128..=1_000_000_000_000u128,
        percent in 1u32..=90u32,
        token0_in in any::<bool>(),
    ) {
        let pair = make_pair();
        let Ok(mut data) = calculate_initialize(Strike::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(_) = calculate_add_liquidity(&pair, &mut data, 0, Strike::ZERO, Spread::One, liquidity) else {
            panic!("expected Ok");
        };
        if token0_in {
            // make token1 available first
            let prime = TokenAmount::new(pair.token1(), I256::try_from(liquidity).unwrap_or_default());
            prop_assert!(calculate_swap(&pair, &mut data, &prime).is_ok());
        }

        let amount = U256::from(liquidity) * U256::from(percent) / U256::from(100u8);
        let token = if token0_in { pair.token0() } else { pair.token1() };
        let Ok(input) = TokenAmount::from_magnitude(token, amount, false) else {
            panic!("fits");
        };
        let Ok(out) = calculate_swap(&pair, &mut data, &input) else {
            panic!("expected Ok");
        };
        if token0_in {
            prop_assert!(out.amount0.amount().is_positive());
            prop_assert!(!out.amount1.amount().is_positive());
        } else {
            prop_assert!(out.amount1.amount().is_positive());
            prop_assert!(!out.amount0.amount().is_positive());
        }
    }
}
