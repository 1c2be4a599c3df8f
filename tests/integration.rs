//! Integration tests exercising the engine through its public API.
//!
//! These tests verify end-to-end flows: the debt lifecycle across blocks,
//! snapshot ingestion through a [`SnapshotSource`], and router batches.

#![allow(clippy::panic)]

use alloy_primitives::{Address, I256, U256};
use dry_powder_engine::batch::{BatchExecutor, Command, SwapAmount};
use dry_powder_engine::config::BatchConfig;
use dry_powder_engine::domain::{
    Pair, PositionKind, Spread, Strike, TierLiquidity, Token, TokenAmount, TokenSelector,
};
use dry_powder_engine::engine::{
    calculate_accrue, calculate_add_liquidity, calculate_borrow_liquidity, calculate_initialize,
    calculate_remove_liquidity, calculate_repay_liquidity, calculate_swap,
};
use dry_powder_engine::error::EngineError;
use dry_powder_engine::math::Fraction;
use dry_powder_engine::snapshot::{MemorySnapshotSource, PairSnapshot, StrikeSnapshot};
use dry_powder_engine::state::PairData;
use dry_powder_engine::traits::SnapshotSource;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn pair() -> Pair {
    let Ok(p) = Pair::new(
        Token::new(Address::repeat_byte(0xc0), 18),
        Token::new(Address::repeat_byte(0xd0), 18),
        0,
    ) else {
        panic!("valid pair");
    };
    p
}

fn strike(v: i32) -> Strike {
    let Ok(s) = Strike::new(v) else {
        panic!("valid strike");
    };
    s
}

fn int(v: i128) -> I256 {
    let Ok(x) = I256::try_from(v) else {
        panic!("fits");
    };
    x
}

fn tier(data: &PairData, s: Strike, spread: Spread) -> TierLiquidity {
    let Some(d) = data.strike(s) else {
        panic!("strike present");
    };
    d.liquidity(spread)
}

/// A pair at strike zero with one ether of tier-one liquidity there.
fn seeded() -> PairData {
    let Ok(mut data) = calculate_initialize(Strike::ZERO) else {
        panic!("expected Ok");
    };
    let Ok(_) = calculate_add_liquidity(&pair(), &mut data, 0, Strike::ZERO, Spread::One, ONE_ETHER)
    else {
        panic!("expected Ok");
    };
    data
}

// ---------------------------------------------------------------------------
// Debt lifecycle
// ---------------------------------------------------------------------------

#[test]
fn debt_lifecycle_pays_interest_to_providers() {
    let p = pair();
    let mut data = seeded();

    // borrow half the tier against 1.5 ether of token0: multiplier 2
    let collateral = TokenAmount::new(p.token0(), int(3 * ONE_ETHER as i128 / 2));
    let Ok(borrow) =
        calculate_borrow_liquidity(&p, &mut data, 0, Strike::ZERO, &collateral, ONE_ETHER / 2)
    else {
        panic!("expected Ok");
    };
    let PositionKind::Debt {
        liquidity_growth_last,
        multiplier,
        ..
    } = borrow.position.position().kind()
    else {
        panic!("debt position");
    };

    // a hundred blocks later accrual frees part of the debt
    assert_eq!(calculate_accrue(&mut data, 100, Strike::ZERO), Ok(12_499_999_999_999));
    let Some(growth) = data.strike(Strike::ZERO).map(|d| d.liquidity_growth()) else {
        panic!("strike present");
    };
    assert!(growth > Fraction::ZERO);

    // repaying the full balance settles what is still borrowed
    let Ok(repay) = calculate_repay_liquidity(
        &p,
        &mut data,
        100,
        Strike::ZERO,
        TokenSelector::Token0,
        liquidity_growth_last,
        multiplier,
        U256::from(ONE_ETHER / 2),
    ) else {
        panic!("expected Ok");
    };
    assert!(repay.amount0.amount().is_negative());
    assert!(tier(&data, Strike::ZERO, Spread::One).borrowed <= 1);
    let Some(rate) = data.strike(Strike::ZERO).map(|d| d.liquidity_repay_rate()) else {
        panic!("strike present");
    };
    assert_eq!(rate, Fraction::ZERO);

    // half of the provider's shares now redeem for more than half a deposit
    let Ok(removed) = calculate_remove_liquidity(
        &p,
        &mut data,
        100,
        Strike::ZERO,
        Spread::One,
        U256::from(ONE_ETHER / 2),
    ) else {
        panic!("expected Ok");
    };
    assert!(-removed.amount0.amount() > int((ONE_ETHER / 2) as i128));
}

#[test]
fn accrual_cannot_run_backwards() {
    let mut data = seeded();
    assert_eq!(calculate_accrue(&mut data, 50, Strike::ZERO), Ok(0));
    assert_eq!(
        calculate_accrue(&mut data, 49, Strike::ZERO),
        Err(EngineError::BlockRegression {
            current: 49,
            last: 50
        })
    );
}

#[test]
fn swap_crosses_into_next_strike() {
    let p = pair();
    let mut data = seeded();
    let Ok(_) = calculate_add_liquidity(&p, &mut data, 0, strike(1), Spread::One, ONE_ETHER) else {
        panic!("expected Ok");
    };

    let input = TokenAmount::new(p.token1(), int(3 * ONE_ETHER as i128 / 2));
    let Ok(out) = calculate_swap(&p, &mut data, &input) else {
        panic!("expected Ok");
    };
    assert_eq!(out.amount1.amount(), input.amount());
    // strike 1 is priced above strike 0, so less than 1.5 ether comes out
    assert!(-out.amount0.amount() < input.amount());
    assert_eq!(data.strike_current(Spread::One), strike(1));
}

// ---------------------------------------------------------------------------
// Snapshot ingestion
// ---------------------------------------------------------------------------

#[test]
fn batch_over_snapshots_matches_direct_calls() {
    let p = pair();
    let seeded = seeded();
    let mut source = MemorySnapshotSource::new();
    let Ok(()) = source.record(&p, &seeded) else {
        panic!("expected Ok");
    };

    let mut direct = seeded.clone();
    let Ok(expected) = calculate_add_liquidity(&p, &mut direct, 5, Strike::ZERO, Spread::Three, 777)
    else {
        panic!("expected Ok");
    };

    let Ok(config) = BatchConfig::new(5, Fraction::ZERO) else {
        panic!("expected Ok");
    };
    let commands = [Command::AddLiquidity {
        pair: p,
        strike: Strike::ZERO,
        spread: Spread::Three,
        liquidity: 777,
    }];
    let Ok(outcome) = BatchExecutor::new(source, config).run(&commands) else {
        panic!("expected Ok");
    };

    assert_eq!(outcome.pairs.get(&p.id()), Some(&direct));
    assert_eq!(outcome.account.token_total(&p.token0()), expected.amount0);
    assert_eq!(outcome.account.positions(), &[expected.position]);
}

#[test]
fn invalid_snapshot_aborts_batch() {
    let p = pair();
    let mut source = MemorySnapshotSource::new();
    source.insert_pair(
        &p,
        PairSnapshot {
            composition_x128: [U256::MAX; 5],
            strike_current: [0; 5],
            initialized: true,
        },
    );
    let commands = [Command::Accrue {
        pair: p,
        strike: Strike::ZERO,
    }];
    let result = BatchExecutor::new(source, BatchConfig::default()).run(&commands);
    assert!(matches!(result, Err(EngineError::InvalidSnapshot(_))));
}

#[test]
fn source_serves_recorded_strikes() {
    let p = pair();
    let mut source = MemorySnapshotSource::new();
    let Ok(()) = source.record(&p, &seeded()) else {
        panic!("expected Ok");
    };
    let Ok(Some(raw)) = source.strike(&p, Strike::ZERO) else {
        panic!("strike recorded");
    };
    assert_eq!(raw.liquidity[0], TierLiquidity::new(ONE_ETHER, 0));
    assert_eq!(raw.active_spread, 0);
    assert_eq!(source.strike(&p, strike(1)), Ok(None));
}

#[cfg(feature = "serde")]
#[test]
fn strike_snapshot_json_round_trip() {
    let Some(data) = seeded().strike(Strike::ZERO).cloned() else {
        panic!("strike present");
    };
    let Ok(raw) = StrikeSnapshot::from_strike_data(&data) else {
        panic!("expected Ok");
    };
    let Ok(json) = serde_json::to_string(&raw) else {
        panic!("serializable");
    };
    let Ok(back) = serde_json::from_str::<StrikeSnapshot>(&json) else {
        panic!("deserializable");
    };
    assert_eq!(back, raw);
}

// ---------------------------------------------------------------------------
// Router batches
// ---------------------------------------------------------------------------

#[test]
fn create_provide_borrow_repay_in_one_batch() {
    let p = pair();
    let commands = [
        Command::CreatePair {
            pair: p,
            strike: Strike::ZERO,
        },
        Command::AddLiquidity {
            pair: p,
            strike: Strike::ZERO,
            spread: Spread::One,
            liquidity: ONE_ETHER,
        },
        Command::BorrowLiquidity {
            pair: p,
            strike: Strike::ZERO,
            collateral: TokenAmount::new(p.token0(), int(3 * ONE_ETHER as i128 / 2)),
            debt: ONE_ETHER / 2,
        },
        Command::RepayLiquidity {
            pair: p,
            strike: Strike::ZERO,
            selector_collateral: TokenSelector::Token0,
            liquidity_growth_last: Fraction::ZERO,
            multiplier: Fraction::from_integer(2),
            balance: U256::from(ONE_ETHER / 2),
        },
    ];
    let source = MemorySnapshotSource::new();
    let Ok(outcome) = BatchExecutor::new(source, BatchConfig::default()).run(&commands) else {
        panic!("expected Ok");
    };

    // deposit + (collateral - payout) - (collateral back - repayment)
    assert_eq!(
        outcome.account.token_total(&p.token0()).amount(),
        int(ONE_ETHER as i128 + 1)
    );
    let positions = outcome.account.positions();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].balance(), int(ONE_ETHER as i128));
    assert_eq!(positions[1].balance(), I256::ZERO);
    assert!(outcome.transfers.positions.is_empty());
    assert_eq!(outcome.transfers.tokens[0].amount, U256::from(ONE_ETHER + 1));
}

#[test]
fn swap_visits_strike_added_between_snapshot_strikes() {
    let p = pair();
    let mut gapped = seeded();
    let Ok(_) = calculate_add_liquidity(&p, &mut gapped, 0, strike(20), Spread::One, ONE_ETHER) else {
        panic!("expected Ok");
    };
    let mut source = MemorySnapshotSource::new();
    let Ok(()) = source.record(&p, &gapped) else {
        panic!("expected Ok");
    };

    let input = TokenAmount::new(p.token1(), int(3 * ONE_ETHER as i128 / 2));
    let mut direct = gapped.clone();
    let Ok(_) = calculate_add_liquidity(&p, &mut direct, 0, strike(10), Spread::One, ONE_ETHER) else {
        panic!("expected Ok");
    };
    let Ok(expected) = calculate_swap(&p, &mut direct, &input) else {
        panic!("expected Ok");
    };
    assert_eq!(direct.strike_current(Spread::One), strike(10));

    let commands = [
        Command::AddLiquidity {
            pair: p,
            strike: strike(10),
            spread: Spread::One,
            liquidity: ONE_ETHER,
        },
        Command::Swap {
            pair: p,
            amount: SwapAmount::Exact(input),
        },
    ];
    let Ok(outcome) = BatchExecutor::new(source, BatchConfig::default()).run(&commands) else {
        panic!("expected Ok");
    };
    let Some(data) = outcome.pairs.get(&p.id()) else {
        panic!("pair touched");
    };
    assert_eq!(data.strike_current(Spread::One), strike(10));
    assert_eq!(data, &direct);
    assert_eq!(
        outcome.account.token_total(&p.token0()).amount(),
        tier_deposit0(&p) + expected.amount0.amount()
    );
}

/// Token0 owed for one ether at strike 10, all of it above the price.
fn tier_deposit0(p: &Pair) -> I256 {
    let mut data = seeded();
    let Ok(added) = calculate_add_liquidity(p, &mut data, 0, strike(10), Spread::One, ONE_ETHER) else {
        panic!("expected Ok");
    };
    added.amount0.amount()
}

#[test]
fn swap_on_missing_pair_fails() {
    let p = pair();
    let commands = [Command::Swap {
        pair: p,
        amount: SwapAmount::Exact(TokenAmount::new(p.token0(), int(1_000))),
    }];
    let result = BatchExecutor::new(MemorySnapshotSource::new(), BatchConfig::default()).run(&commands);
    assert_eq!(result.map(|o| o.account), Err(EngineError::PairUninitialized));
}
