//! Per-strike ledger record.

use crate::constants::NUM_SPREADS;
use crate::domain::{Spread, Strike, TierLiquidity};
use crate::math::Fraction;

/// Ledger entry of one strike: tier liquidity, accrual accumulators and
/// links to the neighbouring initialized strikes.
///
/// Tiers below [`active_spread`](Self::active_spread) are fully borrowed,
/// the active tier may be partially borrowed and tiers above it are
/// untouched by borrowers.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::{Spread, Strike};
/// use dry_powder_engine::math::Fraction;
/// use dry_powder_engine::state::StrikeData;
///
/// let s = StrikeData::new(7);
/// assert_eq!(s.block_last(), 7);
/// assert_eq!(s.liquidity_growth(), Fraction::ZERO);
/// assert_eq!(s.liquidity_growth_spread(Spread::Three), Fraction::ONE);
/// assert_eq!(s.next_0_to_1(), Strike::MIN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeData {
    pub(crate) liquidity_growth: Fraction,
    pub(crate) liquidity_repay_rate: Fraction,
    pub(crate) liquidity_growth_spread: [Fraction; NUM_SPREADS],
    pub(crate) liquidity: [TierLiquidity; NUM_SPREADS],
    pub(crate) block_last: u64,
    pub(crate) next_0_to_1: Strike,
    pub(crate) next_1_to_0: Strike,
    pub(crate) active_spread: Spread,
}

impl StrikeData {
    /// A fresh strike: no liquidity, neutral growth factors and links to the
    /// range sentinels.
    #[must_use]
    pub const fn new(block_last: u64) -> Self {
        Self {
            liquidity_growth: Fraction::ZERO,
            liquidity_repay_rate: Fraction::ZERO,
            liquidity_growth_spread: [Fraction::ONE; NUM_SPREADS],
            liquidity: [TierLiquidity::ZERO; NUM_SPREADS],
            block_last,
            next_0_to_1: Strike::MIN,
            next_1_to_0: Strike::MAX,
            active_spread: Spread::One,
        }
    }

    /// Strike-wide growth index used to convert debt balances.
    #[must_use]
    pub const fn liquidity_growth(&self) -> Fraction {
        self.liquidity_growth
    }

    /// Aggregate `debt / multiplier` of the open debt positions.
    #[must_use]
    pub const fn liquidity_repay_rate(&self) -> Fraction {
        self.liquidity_repay_rate
    }

    /// Share exchange rate of a tier.
    #[must_use]
    pub const fn liquidity_growth_spread(&self, spread: Spread) -> Fraction {
        self.liquidity_growth_spread[spread.index()]
    }

    /// Liquidity buckets of a tier.
    #[must_use]
    pub const fn liquidity(&self, spread: Spread) -> TierLiquidity {
        self.liquidity[spread.index()]
    }

    /// Liquidity buckets of every tier, innermost first.
    #[must_use]
    pub const fn tiers(&self) -> &[TierLiquidity; NUM_SPREADS] {
        &self.liquidity
    }

    /// Block of the last accrual.
    #[must_use]
    pub const fn block_last(&self) -> u64 {
        self.block_last
    }

    /// Next initialized strike below this one, or [`Strike::MIN`].
    #[must_use]
    pub const fn next_0_to_1(&self) -> Strike {
        self.next_0_to_1
    }

    /// Next initialized strike above this one, or [`Strike::MAX`].
    #[must_use]
    pub const fn next_1_to_0(&self) -> Strike {
        self.next_1_to_0
    }

    /// Highest tier currently borrowed into.
    #[must_use]
    pub const fn active_spread(&self) -> Spread {
        self.active_spread
    }

    /// Sum of borrowed liquidity over all tiers.
    #[must_use]
    pub fn total_borrowed(&self) -> u128 {
        self.liquidity
            .iter()
            .fold(0u128, |acc, t| acc.saturating_add(t.borrowed))
    }

    /// Sum of swappable liquidity over all tiers.
    #[must_use]
    pub fn total_swap(&self) -> u128 {
        self.liquidity
            .iter()
            .fold(0u128, |acc, t| acc.saturating_add(t.swap))
    }
}

impl Default for StrikeData {
    fn default() -> Self {
        Self::new(0)
    }
}
