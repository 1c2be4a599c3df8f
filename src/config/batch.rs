//! Configuration of a simulated router batch.

use crate::error::EngineError;
use crate::math::Fraction;

/// Default cap on the strikes a single swap may preload.
pub const DEFAULT_SWAP_STRIKE_LIMIT: usize = 64;

/// Parameters shared by every command of a batch.
///
/// # Validation
///
/// - `slippage` must lie in `[0, 1]`.
/// - `swap_strike_limit` must be non-zero.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use dry_powder_engine::config::BatchConfig;
/// use dry_powder_engine::math::Fraction;
///
/// let half_percent = Fraction::new(U256::from(5u8), U256::from(1_000u16)).expect("non-zero");
/// let config = BatchConfig::new(19_000_000, half_percent).expect("valid slippage");
/// assert_eq!(config.block(), 19_000_000);
/// assert_eq!(config.swap_strike_limit(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    block: u64,
    slippage: Fraction,
    swap_strike_limit: usize,
}

impl BatchConfig {
    /// Creates a configuration with the default swap strike limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `slippage` exceeds
    /// one.
    pub fn new(block: u64, slippage: Fraction) -> crate::error::Result<Self> {
        let config = Self {
            block,
            slippage,
            swap_strike_limit: DEFAULT_SWAP_STRIKE_LIMIT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the swap strike limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] for a zero limit.
    pub fn with_swap_strike_limit(self, swap_strike_limit: usize) -> crate::error::Result<Self> {
        let config = Self {
            swap_strike_limit,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if a value is out of
    /// range.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.slippage > Fraction::ONE {
            return Err(EngineError::InvalidConfiguration("slippage must lie within [0, 1]"));
        }
        if self.swap_strike_limit == 0 {
            return Err(EngineError::InvalidConfiguration("swap strike limit must be non-zero"));
        }
        Ok(())
    }

    /// Block number every command accrues to.
    #[must_use]
    pub const fn block(&self) -> u64 {
        self.block
    }

    /// Slippage tolerance applied to transfer requests.
    #[must_use]
    pub const fn slippage(&self) -> Fraction {
        self.slippage
    }

    /// Maximum number of strikes a swap preloads beyond its start strike.
    #[must_use]
    pub const fn swap_strike_limit(&self) -> usize {
        self.swap_strike_limit
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            block: 0,
            slippage: Fraction::ZERO,
            swap_strike_limit: DEFAULT_SWAP_STRIKE_LIMIT,
        }
    }
}
