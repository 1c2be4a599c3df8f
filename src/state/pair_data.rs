//! Pair-wide state: the strike map and per-tier price cursors.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::trace;

use super::StrikeData;
use crate::constants::NUM_SPREADS;
use crate::domain::{Spread, Strike};
use crate::error::EngineError;
use crate::math::Fraction;

/// In-memory snapshot of a pair.
///
/// Holds the ledger entries of every strike that has ever held liquidity,
/// the current strike of each spread tier, and for each tier the share of
/// its current-strike liquidity that is already held in token1.
///
/// Strike entries are created only by [`PairData::initialize`] and by
/// [`PairData::touch_strike`], which the accrual step calls on first contact
/// with a strike. Entries are never removed.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::{Spread, Strike};
/// use dry_powder_engine::state::PairData;
///
/// let strike = Strike::new(10).expect("usable strike");
/// let pair = PairData::initialize(strike, 0).expect("interior strike");
/// assert!(pair.is_initialized());
/// assert_eq!(pair.strike_current(Spread::Five), strike);
/// assert_eq!(pair.strike_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairData {
    strikes: BTreeMap<Strike, StrikeData>,
    composition: [Fraction; NUM_SPREADS],
    strike_current: [Strike; NUM_SPREADS],
    initialized: bool,
}

impl PairData {
    // -- Construction -------------------------------------------------------

    /// Creates an initialized pair whose tiers all sit at `strike`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] for sentinel strikes.
    pub fn initialize(strike: Strike, block: u64) -> crate::error::Result<Self> {
        let strike = strike.ensure_interior()?;
        let mut strikes = BTreeMap::new();
        strikes.insert(strike, StrikeData::new(block));
        Ok(Self {
            strikes,
            composition: [Fraction::ZERO; NUM_SPREADS],
            strike_current: [strike; NUM_SPREADS],
            initialized: true,
        })
    }

    /// Rebuilds pair state from snapshot parts, without strikes.
    pub(crate) const fn from_parts(
        composition: [Fraction; NUM_SPREADS],
        strike_current: [Strike; NUM_SPREADS],
        initialized: bool,
    ) -> Self {
        Self {
            strikes: BTreeMap::new(),
            composition,
            strike_current,
            initialized,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Returns `true` once the pair has been created.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fails with [`EngineError::PairUninitialized`] before creation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PairUninitialized`] if the pair is not
    /// initialized.
    pub const fn ensure_initialized(&self) -> crate::error::Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(EngineError::PairUninitialized)
        }
    }

    /// Composition of a tier at its current strike.
    #[must_use]
    pub const fn composition(&self, spread: Spread) -> Fraction {
        self.composition[spread.index()]
    }

    /// Current strike of a tier.
    #[must_use]
    pub const fn strike_current(&self, spread: Spread) -> Strike {
        self.strike_current[spread.index()]
    }

    /// Current strikes of every tier, innermost first.
    #[must_use]
    pub const fn strikes_current(&self) -> &[Strike; NUM_SPREADS] {
        &self.strike_current
    }

    /// Compositions of every tier, innermost first.
    #[must_use]
    pub const fn compositions(&self) -> &[Fraction; NUM_SPREADS] {
        &self.composition
    }

    /// Ledger entry of `strike`, if loaded.
    #[must_use]
    pub fn strike(&self, strike: Strike) -> Option<&StrikeData> {
        self.strikes.get(&strike)
    }

    /// Returns `true` if `strike` has a ledger entry.
    #[must_use]
    pub fn contains_strike(&self, strike: Strike) -> bool {
        self.strikes.contains_key(&strike)
    }

    /// Number of strike entries.
    #[must_use]
    pub fn strike_count(&self) -> usize {
        self.strikes.len()
    }

    /// All strike entries in ascending order.
    pub fn strikes(&self) -> impl Iterator<Item = (&Strike, &StrikeData)> {
        self.strikes.iter()
    }

    // -- Crate-internal mutation --------------------------------------------

    /// Ledger entry of `strike` for mutation.
    pub(crate) fn strike_mut(&mut self, strike: Strike) -> crate::error::Result<&mut StrikeData> {
        self.strikes
            .get_mut(&strike)
            .ok_or(EngineError::StrikeUninitialized)
    }

    /// Ledger entry of `strike`, or [`EngineError::StrikeUninitialized`].
    pub(crate) fn strike_ref(&self, strike: Strike) -> crate::error::Result<&StrikeData> {
        self.strikes.get(&strike).ok_or(EngineError::StrikeUninitialized)
    }

    pub(crate) fn set_strike_current(&mut self, spread: Spread, strike: Strike) {
        self.strike_current[spread.index()] = strike;
    }

    pub(crate) fn set_composition(&mut self, spread: Spread, composition: Fraction) {
        self.composition[spread.index()] = composition;
    }

    /// Inserts a strike entry exactly as read from a snapshot, links included.
    pub(crate) fn insert_strike(&mut self, strike: Strike, data: StrikeData) {
        self.strikes.insert(strike, data);
    }

    /// Creates the ledger entry of `strike` if it does not exist yet.
    ///
    /// The new entry starts at `block` and is spliced between its nearest
    /// loaded neighbours, whose links are updated to point at it. Returns
    /// `true` if an entry was created.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] for sentinel strikes.
    pub fn touch_strike(&mut self, strike: Strike, block: u64) -> crate::error::Result<bool> {
        let strike = strike.ensure_interior()?;
        if self.strikes.contains_key(&strike) {
            return Ok(false);
        }

        let below = self
            .strikes
            .range(..strike)
            .next_back()
            .map_or(Strike::MIN, |(s, _)| *s);
        let above = self
            .strikes
            .range((Bound::Excluded(strike), Bound::Unbounded))
            .next()
            .map_or(Strike::MAX, |(s, _)| *s);

        let mut data = StrikeData::new(block);
        data.next_0_to_1 = below;
        data.next_1_to_0 = above;
        if let Some(lower) = self.strikes.get_mut(&below) {
            lower.next_1_to_0 = strike;
        }
        if let Some(upper) = self.strikes.get_mut(&above) {
            upper.next_0_to_1 = strike;
        }
        self.strikes.insert(strike, data);
        trace!(%strike, %below, %above, block, "created strike entry");
        Ok(true)
    }

    /// A strike linked from the nearest loaded neighbours of `strike` that
    /// has no entry yet.
    ///
    /// Returns `None` once both neighbours only link to loaded strikes or
    /// sentinels, which is when [`PairData::touch_strike`] splices `strike`
    /// between its real neighbours.
    pub(crate) fn unloaded_link_around(&self, strike: Strike) -> Option<Strike> {
        let below = self
            .strikes
            .range(..strike)
            .next_back()
            .map(|(_, d)| d.next_1_to_0);
        let above = self
            .strikes
            .range((Bound::Excluded(strike), Bound::Unbounded))
            .next()
            .map(|(_, d)| d.next_0_to_1);
        [below, above]
            .into_iter()
            .flatten()
            .find(|link| link.is_interior() && *link != strike && !self.strikes.contains_key(link))
    }

    /// Next strike a swap visits after `from`.
    ///
    /// Follows the loaded entry's link, or the nearest loaded strike when
    /// `from` has no entry. Returns a sentinel when nothing lies beyond.
    #[must_use]
    pub fn next_strike(&self, from: Strike, zero_to_one: bool) -> Strike {
        if let Some(data) = self.strikes.get(&from) {
            return if zero_to_one {
                data.next_0_to_1
            } else {
                data.next_1_to_0
            };
        }
        if zero_to_one {
            self.strikes
                .range(..from)
                .next_back()
                .map_or(Strike::MIN, |(s, _)| *s)
        } else {
            self.strikes
                .range((Bound::Excluded(from), Bound::Unbounded))
                .next()
                .map_or(Strike::MAX, |(s, _)| *s)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn strike(v: i32) -> Strike {
        let Ok(s) = Strike::new(v) else {
            panic!("valid strike");
        };
        s
    }

    #[test]
    fn default_is_uninitialized() {
        let p = PairData::default();
        assert!(!p.is_initialized());
        assert_eq!(p.ensure_initialized(), Err(EngineError::PairUninitialized));
        assert_eq!(p.strike_count(), 0);
    }

    #[test]
    fn initialize_sets_every_tier() {
        let Ok(p) = PairData::initialize(strike(-3), 0) else {
            panic!("expected Ok");
        };
        for spread in Spread::ALL {
            assert_eq!(p.strike_current(spread), strike(-3));
            assert_eq!(p.composition(spread), Fraction::ZERO);
        }
        assert!(p.contains_strike(strike(-3)));
    }

    #[test]
    fn initialize_rejects_sentinel() {
        assert!(matches!(
            PairData::initialize(Strike::MAX, 0),
            Err(EngineError::StrikeOutOfRange(_))
        ));
    }

    #[test]
    fn touch_links_neighbours() {
        let Ok(mut p) = PairData::initialize(strike(0), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(p.touch_strike(strike(10), 5), Ok(true));
        assert_eq!(p.touch_strike(strike(4), 6), Ok(true));
        assert_eq!(p.touch_strike(strike(4), 7), Ok(false));

        let Some(mid) = p.strike(strike(4)) else {
            panic!("strike 4 present");
        };
        assert_eq!(mid.next_0_to_1(), strike(0));
        assert_eq!(mid.next_1_to_0(), strike(10));
        assert_eq!(mid.block_last(), 6);

        let (Some(low), Some(high)) = (p.strike(strike(0)), p.strike(strike(10))) else {
            panic!("neighbours present");
        };
        assert_eq!(low.next_1_to_0(), strike(4));
        assert_eq!(low.next_0_to_1(), Strike::MIN);
        assert_eq!(high.next_0_to_1(), strike(4));
        assert_eq!(high.next_1_to_0(), Strike::MAX);
    }

    #[test]
    fn next_strike_without_entry_searches_map() {
        let Ok(mut p) = PairData::initialize(strike(0), 0) else {
            panic!("expected Ok");
        };
        let _ = p.touch_strike(strike(20), 0);
        assert_eq!(p.next_strike(strike(7), true), strike(0));
        assert_eq!(p.next_strike(strike(7), false), strike(20));
        assert_eq!(p.next_strike(strike(20), false), Strike::MAX);
        assert_eq!(p.next_strike(strike(-5), true), Strike::MIN);
    }

    #[test]
    fn unloaded_links_lead_to_real_neighbours() {
        let mut p = PairData::from_parts([Fraction::ZERO; NUM_SPREADS], [strike(0); NUM_SPREADS], true);
        let mut low = StrikeData::new(0);
        low.next_1_to_0 = strike(20);
        p.insert_strike(strike(0), low);
        assert_eq!(p.unloaded_link_around(strike(10)), Some(strike(20)));
        assert_eq!(p.unloaded_link_around(strike(-3)), None);

        let mut high = StrikeData::new(0);
        high.next_0_to_1 = strike(0);
        p.insert_strike(strike(20), high);
        assert_eq!(p.unloaded_link_around(strike(10)), None);

        assert_eq!(p.touch_strike(strike(10), 1), Ok(true));
        assert_eq!(p.next_strike(strike(0), false), strike(10));
        assert_eq!(p.next_strike(strike(20), true), strike(10));
    }

    #[test]
    fn strike_mut_requires_entry() {
        let mut p = PairData::default();
        assert!(matches!(
            p.strike_mut(strike(1)),
            Err(EngineError::StrikeUninitialized)
        ));
    }
}
