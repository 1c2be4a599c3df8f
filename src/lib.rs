//! # Dry Powder Engine
//!
//! Off-chain arithmetic engine for the Dry Powder concentrated-liquidity
//! AMM, where liquidity providers' funds can also be borrowed.
//!
//! The engine mirrors the ledger of the on-chain contract exactly: given a
//! snapshot of a pair it computes the token amounts, position balances and
//! state changes a liquidity, debt, swap or accrual call would produce, so a
//! client can size and batch transactions before sending them. Nothing here
//! performs I/O; state arrives through [`traits::SnapshotSource`].
//!
//! # Quick Start
//!
//! ```rust
//! use alloy_primitives::{Address, I256};
//! use dry_powder_engine::domain::{Pair, Spread, Strike, Token, TokenAmount};
//! use dry_powder_engine::engine::{calculate_add_liquidity, calculate_initialize, calculate_swap};
//!
//! let pair = Pair::new(
//!     Token::new(Address::repeat_byte(0x0a), 18),
//!     Token::new(Address::repeat_byte(0x0b), 18),
//!     0,
//! )
//! .expect("distinct tokens");
//!
//! // 1. Create the pair with every tier at strike 0
//! let mut data = calculate_initialize(Strike::ZERO).expect("interior strike");
//!
//! // 2. Provide liquidity in the tightest tier
//! let added = calculate_add_liquidity(&pair, &mut data, 1, Strike::ZERO, Spread::One, 10_000)
//!     .expect("deposit");
//! assert_eq!(added.amount0.amount(), I256::try_from(10_000).unwrap_or_default());
//!
//! // 3. Buy token0 with token1
//! let input = TokenAmount::new(pair.token1(), I256::try_from(2_500).unwrap_or_default());
//! let swapped = calculate_swap(&pair, &mut data, &input).expect("swap");
//! assert!(swapped.amount0.amount().is_negative());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  SnapshotSource  │  on-chain reader, Q128 wire records
//! └────────┬─────────┘
//!          │ PairSnapshot / StrikeSnapshot
//!          ▼
//! ┌──────────────────┐
//! │  BatchExecutor   │  router commands, account ledger, transfers
//! └────────┬─────────┘
//!          │ &mut PairData
//!          ▼
//! ┌──────────────────┐
//! │      Engine      │  calculate_* operations, accrual, swap stepper
//! └────────┬─────────┘
//!          │ ledger primitives
//!          ▼
//! ┌──────────────────┐
//! │   State / Math   │  PairData, StrikeData, Fraction, strike ratios
//! └──────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated value types: [`Strike`](domain::Strike), [`Spread`](domain::Spread), [`Pair`](domain::Pair), [`TokenAmount`](domain::TokenAmount), positions |
//! | [`math`] | [`Fraction`](math::Fraction), strike ratios, liquidity/amount conversions, swap steps |
//! | [`state`] | [`PairData`](state::PairData) and [`StrikeData`](state::StrikeData) |
//! | [`engine`] | Ledger primitives, accrual and the public `calculate_*` operations |
//! | [`snapshot`] | Wire records and their validated conversion into state |
//! | [`traits`] | [`SnapshotSource`](traits::SnapshotSource) seam |
//! | [`config`] | [`BatchConfig`](config::BatchConfig) |
//! | [`batch`] | Router command simulation |
//! | [`constants`] | Strike bounds, Q128 and collateral limits |
//! | [`error`] | [`EngineError`](error::EngineError) |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on value types and snapshot records |

pub mod batch;
pub mod config;
pub mod constants;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod prelude;
pub mod snapshot;
pub mod state;
pub mod traits;
