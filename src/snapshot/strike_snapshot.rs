//! Wire record of a strike.

use alloy_primitives::U256;

use crate::constants::{NUM_SPREADS, Q128};
use crate::domain::{Spread, Strike, TierLiquidity};
use crate::error::EngineError;
use crate::math::Fraction;
use crate::state::{PairData, StrikeData};

/// A strike as the on-chain reader delivers it, with growth factors and
/// rates in Q128.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeSnapshot {
    /// Strike-wide growth index, Q128.
    pub liquidity_growth_x128: U256,
    /// Aggregate repay rate, Q128.
    pub liquidity_repay_rate_x128: U256,
    /// Per-tier share exchange rates, Q128, each at least `2^128`.
    pub liquidity_growth_spread_x128: [U256; NUM_SPREADS],
    /// Per-tier liquidity buckets.
    pub liquidity: [TierLiquidity; NUM_SPREADS],
    /// Block of the last accrual.
    pub block_last: u64,
    /// Next initialized strike below, or the lower sentinel.
    pub next_0_to_1: i32,
    /// Next initialized strike above, or the upper sentinel.
    pub next_1_to_0: i32,
    /// Zero-based index of the highest borrowed tier, `0..=4`.
    pub active_spread: u8,
}

impl StrikeSnapshot {
    /// Validates the record and converts it into ledger state.
    ///
    /// # Errors
    ///
    /// - [`EngineError::StrikeOutOfRange`] for links outside the strike
    ///   range.
    /// - [`EngineError::InvalidSnapshot`] for an active spread above 4, a
    ///   tier growth factor below one, or a tier over 128 bits.
    pub fn to_strike_data(&self) -> crate::error::Result<StrikeData> {
        let active_spread = Spread::from_index(usize::from(self.active_spread))
            .map_err(|_| EngineError::InvalidSnapshot("active spread must be within 0..=4"))?;

        let mut growth_spread = [Fraction::ONE; NUM_SPREADS];
        for (slot, raw) in growth_spread.iter_mut().zip(self.liquidity_growth_spread_x128) {
            if raw < Q128 {
                return Err(EngineError::InvalidSnapshot("tier growth factor below one"));
            }
            *slot = Fraction::from_q128(raw);
        }
        for tier in &self.liquidity {
            tier.validate()
                .map_err(|_| EngineError::InvalidSnapshot("tier liquidity exceeds 128 bits"))?;
        }

        Ok(StrikeData {
            liquidity_growth: Fraction::from_q128(self.liquidity_growth_x128),
            liquidity_repay_rate: Fraction::from_q128(self.liquidity_repay_rate_x128),
            liquidity_growth_spread: growth_spread,
            liquidity: self.liquidity,
            block_last: self.block_last,
            next_0_to_1: Strike::link(self.next_0_to_1)?,
            next_1_to_0: Strike::link(self.next_1_to_0)?,
            active_spread,
        })
    }

    /// Encodes ledger state, flooring every fraction to Q128.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if a fraction exceeds the Q128
    /// range.
    pub fn from_strike_data(data: &StrikeData) -> crate::error::Result<Self> {
        let mut growth_spread = [Q128; NUM_SPREADS];
        for (slot, growth) in growth_spread.iter_mut().zip(data.liquidity_growth_spread) {
            *slot = growth.to_q128()?;
        }
        Ok(Self {
            liquidity_growth_x128: data.liquidity_growth.to_q128()?,
            liquidity_repay_rate_x128: data.liquidity_repay_rate.to_q128()?,
            liquidity_growth_spread_x128: growth_spread,
            liquidity: data.liquidity,
            block_last: data.block_last,
            next_0_to_1: data.next_0_to_1.get(),
            next_1_to_0: data.next_1_to_0.get(),
            active_spread: data.active_spread.get() - 1,
        })
    }

    /// Validates the record and stores it as the entry of `strike`,
    /// replacing any entry already loaded there.
    ///
    /// # Errors
    ///
    /// - [`EngineError::StrikeOutOfRange`] for sentinel strikes.
    /// - [`EngineError::InvalidSnapshot`] if the links do not bracket
    ///   `strike`.
    /// - Any error of [`StrikeSnapshot::to_strike_data`].
    pub fn load_into(&self, pair_data: &mut PairData, strike: Strike) -> crate::error::Result<()> {
        let strike = strike.ensure_interior()?;
        let data = self.to_strike_data()?;
        if data.next_0_to_1 >= strike || data.next_1_to_0 <= strike {
            return Err(EngineError::InvalidSnapshot("strike links do not bracket the strike"));
        }
        pair_data.insert_strike(strike, data);
        Ok(())
    }
}
