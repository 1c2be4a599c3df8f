//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use dry_powder_engine::prelude::*;
//! ```

pub use crate::batch::{Account, BatchExecutor, BatchOutcome, Command, SwapAmount};
pub use crate::config::BatchConfig;
pub use crate::domain::{
    Pair, Position, PositionData, Rounding, Spread, Strike, TierLiquidity, Token, TokenAmount,
    TokenSelector,
};
pub use crate::engine::{
    calculate_accrue, calculate_add_liquidity, calculate_borrow_liquidity, calculate_initialize,
    calculate_remove_liquidity, calculate_repay_liquidity, calculate_swap,
};
pub use crate::error::{EngineError, Result};
pub use crate::math::Fraction;
pub use crate::snapshot::{MemorySnapshotSource, PairSnapshot, StrikeSnapshot};
pub use crate::state::{PairData, StrikeData};
pub use crate::traits::SnapshotSource;
