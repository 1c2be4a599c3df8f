//! Unified error types for the Dry Powder engine.
//!
//! Every fallible operation in the crate returns [`EngineError`]. All
//! variants describe precondition or invariant violations; none of them is
//! a transient condition worth retrying. A simulation that fails is simply
//! discarded before any transaction is built from it.

use thiserror::Error;

/// Errors raised by the liquidity/price state machine.
///
/// Variants carrying a `&'static str` include a short context message naming
/// the check that failed.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::Strike;
/// use dry_powder_engine::error::EngineError;
///
/// let err = Strike::new(1_000_000);
/// assert!(matches!(err, Err(EngineError::StrikeOutOfRange(_))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A requested or computed strike falls outside `(MIN_STRIKE, MAX_STRIKE)`.
    #[error("strike out of range: {0}")]
    StrikeOutOfRange(&'static str),

    /// The pair has not been created yet.
    #[error("pair is not initialized")]
    PairUninitialized,

    /// The strike holds no ledger entry.
    #[error("strike is not initialized")]
    StrikeUninitialized,

    /// Combined swap and borrowed liquidity would exceed `2^128 - 1`.
    #[error("liquidity overflow: {0}")]
    LiquidityOverflow(&'static str),

    /// A removal or borrow exceeds what the strike can provide.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// A caller supplied amount is zero or negative where a positive amount is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Collateral multiplier exceeds the representable maximum.
    #[error("overcollateralized: {0}")]
    Overcollateralization(&'static str),

    /// Collateral does not cover the debt with the minimum multiplier.
    #[error("undercollateralized: {0}")]
    Undercollateralization(&'static str),

    /// The swap walked past the strike range before it was satisfied.
    #[error("swap walked out of the strike range")]
    SwapOutOfBounds,

    /// A spread tier outside `1..=5`.
    #[error("invalid spread: {0}")]
    InvalidSpread(&'static str),

    /// A token that is not part of the pair, or an invalid pair of tokens.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Accrual was requested for a block earlier than the last accrued block.
    #[error("block {current} precedes last accrued block {last}")]
    BlockRegression {
        /// Block passed by the caller.
        current: u64,
        /// Block stored on the strike.
        last: u64,
    },

    /// A snapshot record violates the state invariants.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),

    /// The snapshot source could not provide the requested record.
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(&'static str),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, EngineError>;
