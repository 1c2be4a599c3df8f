//! Router batch simulation example.
//!
//! Seeds an in-memory snapshot source with a pair that already holds
//! liquidity, then simulates a batch that provides liquidity, borrows,
//! swaps through two strikes and accrues interest. Prints the net account
//! deltas and the transfers the user would sign.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=dry_powder_engine=debug cargo run --example batch
//! ```

use alloy_primitives::{Address, I256, U256};
use dry_powder_engine::batch::{BatchExecutor, Command, SwapAmount};
use dry_powder_engine::config::BatchConfig;
use dry_powder_engine::domain::{Pair, Spread, Strike, Token, TokenAmount};
use dry_powder_engine::engine::{calculate_add_liquidity, calculate_initialize};
use dry_powder_engine::math::Fraction;
use dry_powder_engine::snapshot::MemorySnapshotSource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dry_powder_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Dry Powder batch simulation ===\n");

    // ── 1. Define the pair ──────────────────────────────────────────────
    let weth = Token::new(Address::repeat_byte(0x0a), 18);
    let dai = Token::new(Address::repeat_byte(0x0b), 18);
    let pair = Pair::new(weth, dai, 0)?;
    println!("Pair id: {}", pair.id());

    // ── 2. Seed the on-chain state ──────────────────────────────────────
    //    Ten ether of tier-one liquidity at strikes -2..=2 and five ether
    //    of tier-two liquidity at strike 0, all deposited at block 100.
    let mut seeded = calculate_initialize(Strike::ZERO)?;
    for s in -2..=2 {
        calculate_add_liquidity(&pair, &mut seeded, 100, Strike::new(s)?, Spread::One, 10 * ONE_ETHER)?;
    }
    calculate_add_liquidity(&pair, &mut seeded, 100, Strike::ZERO, Spread::Two, 5 * ONE_ETHER)?;

    let mut source = MemorySnapshotSource::new();
    source.record(&pair, &seeded)?;
    println!("Seeded {} strikes\n", seeded.strike_count());

    // ── 3. Configure the batch ──────────────────────────────────────────
    let slippage = Fraction::new(U256::from(5u8), U256::from(1_000u16))?;
    let config = BatchConfig::new(200, slippage)?;
    println!("Block {}, slippage {}", config.block(), config.slippage());

    // ── 4. Build the commands ───────────────────────────────────────────
    let collateral = TokenAmount::new(pair.token0(), I256::try_from(3 * ONE_ETHER)?);
    let swap_in = TokenAmount::new(pair.token1(), I256::try_from(20 * ONE_ETHER)?);
    let commands = [
        Command::AddLiquidity {
            pair,
            strike: Strike::new(1)?,
            spread: Spread::One,
            liquidity: ONE_ETHER,
        },
        Command::BorrowLiquidity {
            pair,
            strike: Strike::ZERO,
            collateral,
            debt: ONE_ETHER,
        },
        Command::Swap {
            pair,
            amount: SwapAmount::Exact(swap_in),
        },
        Command::Accrue {
            pair,
            strike: Strike::ZERO,
        },
    ];

    // ── 5. Simulate ─────────────────────────────────────────────────────
    let executor = BatchExecutor::new(source, config);
    let outcome = executor.run(&commands)?;

    println!("\nNet token deltas (positive = user pays):");
    for t in outcome.account.tokens() {
        println!("  {}: {}", t.token().address(), t.amount());
    }

    println!("\nPosition deltas:");
    for p in outcome.account.positions() {
        println!("  {:?} at strike {}: {}", p.position().kind(), p.position().strike(), p.balance());
    }

    println!("\nTransfers to sign:");
    for t in &outcome.transfers.tokens {
        println!("  token {}: {}", t.token.address(), t.amount);
    }
    for p in &outcome.transfers.positions {
        println!("  position at strike {}: {}", p.position.strike(), p.balance);
    }

    if let Some(data) = outcome.pairs.get(&pair.id()) {
        println!("\nTier cursors after the batch:");
        for spread in Spread::ALL {
            println!(
                "  spread {}: strike {}, composition {}",
                spread,
                data.strike_current(spread),
                data.composition(spread)
            );
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
