//! Per-tier liquidity buckets.

use crate::error::EngineError;

/// Liquidity of one spread tier at one strike, split between what is
/// available to swappers and what is currently lent out.
///
/// Invariant: `swap + borrowed <= 2^128 - 1`.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::TierLiquidity;
///
/// let t = TierLiquidity::new(10, 5);
/// assert_eq!(t.total(), Some(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierLiquidity {
    /// Liquidity available for swapping.
    pub swap: u128,
    /// Liquidity lent out to borrowers.
    pub borrowed: u128,
}

impl TierLiquidity {
    /// Empty tier.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a tier record.
    #[must_use]
    pub const fn new(swap: u128, borrowed: u128) -> Self {
        Self { swap, borrowed }
    }

    /// Combined liquidity, or `None` if it does not fit in 128 bits.
    #[must_use]
    pub const fn total(&self) -> Option<u128> {
        self.swap.checked_add(self.borrowed)
    }

    /// Returns `true` if both buckets are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.swap == 0 && self.borrowed == 0
    }

    /// Checks the 128-bit width invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LiquidityOverflow`] if `swap + borrowed`
    /// overflows.
    pub const fn validate(&self) -> crate::error::Result<()> {
        match self.total() {
            Some(_) => Ok(()),
            None => Err(EngineError::LiquidityOverflow(
                "tier liquidity must fit into 128 bits",
            )),
        }
    }
}
