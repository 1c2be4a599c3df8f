//! Wire record of a pair.

use alloy_primitives::U256;

use crate::constants::{NUM_SPREADS, Q128};
use crate::domain::{Spread, Strike};
use crate::error::EngineError;
use crate::math::Fraction;
use crate::state::PairData;

/// Pair-level state as the on-chain reader delivers it.
///
/// An uninitialized pair is delivered with zeroed fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairSnapshot {
    /// Per-tier share of current-strike liquidity held in token1, Q128.
    pub composition_x128: [U256; NUM_SPREADS],
    /// Per-tier current strike.
    pub strike_current: [i32; NUM_SPREADS],
    /// Whether the pair has been created.
    pub initialized: bool,
}

impl PairSnapshot {
    /// Validates the record and converts it into pair state holding no
    /// strikes.
    ///
    /// # Errors
    ///
    /// - [`EngineError::StrikeOutOfRange`] for a current strike outside the
    ///   usable range.
    /// - [`EngineError::InvalidSnapshot`] for a composition above one, or
    ///   for current strikes that are not ordered in one direction from
    ///   the innermost tier outwards.
    pub fn to_pair_data(&self) -> crate::error::Result<PairData> {
        let mut composition = [Fraction::ZERO; NUM_SPREADS];
        for (slot, raw) in composition.iter_mut().zip(self.composition_x128) {
            if raw > Q128 {
                return Err(EngineError::InvalidSnapshot("composition above one"));
            }
            *slot = Fraction::from_q128(raw);
        }
        let mut strike_current = [Strike::ZERO; NUM_SPREADS];
        for (slot, raw) in strike_current.iter_mut().zip(self.strike_current) {
            *slot = Strike::new(raw)?;
        }
        let rising = strike_current.windows(2).all(|w| w[0] <= w[1]);
        let falling = strike_current.windows(2).all(|w| w[0] >= w[1]);
        if !rising && !falling {
            return Err(EngineError::InvalidSnapshot(
                "tier cursors must move away from the price as spreads widen",
            ));
        }
        Ok(PairData::from_parts(composition, strike_current, self.initialized))
    }

    /// Encodes pair state, flooring compositions to Q128.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if a composition exceeds the Q128
    /// range.
    pub fn from_pair_data(data: &PairData) -> crate::error::Result<Self> {
        let mut composition_x128 = [U256::ZERO; NUM_SPREADS];
        for (slot, spread) in composition_x128.iter_mut().zip(Spread::ALL) {
            *slot = data.composition(spread).to_q128()?;
        }
        Ok(Self {
            composition_x128,
            strike_current: data.strikes_current().map(|s| s.get()),
            initialized: data.is_initialized(),
        })
    }
}
