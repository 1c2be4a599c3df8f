//! State transitions of the liquidity ledger.
//!
//! | Layer | Items |
//! |-------|-------|
//! | Ledger primitives | [`add_swap_liquidity`], [`remove_swap_liquidity`], [`borrow_liquidity`], [`repay_liquidity`] |
//! | Accrual | [`accrue`] |
//! | Operations | [`calculate_initialize`], [`calculate_add_liquidity`], [`calculate_remove_liquidity`], [`calculate_borrow_liquidity`], [`calculate_repay_liquidity`], [`calculate_accrue`] |
//! | Swaps | [`calculate_swap`] |
//!
//! Every operation takes the pair snapshot by exclusive reference and
//! mutates it in place.

mod accrual;
mod ledger;
mod operations;
mod swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use accrual::accrue;
pub use ledger::{add_swap_liquidity, borrow_liquidity, remove_swap_liquidity, repay_liquidity};
pub use operations::{
    calculate_accrue, calculate_add_liquidity, calculate_borrow_liquidity, calculate_initialize,
    calculate_remove_liquidity, calculate_repay_liquidity, LiquidityOutcome,
};
pub use swap::{calculate_swap, SwapOutcome};
pub(crate) use swap::{is_zero_to_one, start_strike};
