//! In-memory snapshot source.

use std::collections::BTreeMap;

use alloy_primitives::B256;

use super::{PairSnapshot, StrikeSnapshot};
use crate::domain::{Pair, Strike};
use crate::state::PairData;
use crate::traits::SnapshotSource;

/// A [`SnapshotSource`] backed by maps keyed by pair id.
///
/// Pairs that were never recorded read as zeroed, uninitialized records.
/// The number of reads served is counted so callers can check how lazily a
/// batch loaded its state.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotSource {
    pairs: BTreeMap<B256, PairSnapshot>,
    strikes: BTreeMap<(B256, Strike), StrikeSnapshot>,
    reads: usize,
}

impl MemorySnapshotSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the pair-level record of `pair`.
    pub fn insert_pair(&mut self, pair: &Pair, snapshot: PairSnapshot) {
        self.pairs.insert(pair.id(), snapshot);
    }

    /// Stores the record of one strike of `pair`.
    pub fn insert_strike(&mut self, pair: &Pair, strike: Strike, snapshot: StrikeSnapshot) {
        self.strikes.insert((pair.id(), strike), snapshot);
    }

    /// Encodes `data` and stores it, pair record and every strike, as the
    /// state of `pair`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`](crate::error::EngineError::Overflow)
    /// if a fraction exceeds the Q128 range.
    pub fn record(&mut self, pair: &Pair, data: &PairData) -> crate::error::Result<()> {
        self.insert_pair(pair, PairSnapshot::from_pair_data(data)?);
        for (strike, strike_data) in data.strikes() {
            self.insert_strike(pair, *strike, StrikeSnapshot::from_strike_data(strike_data)?);
        }
        Ok(())
    }

    /// Number of reads served so far.
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }
}

impl SnapshotSource for MemorySnapshotSource {
    fn pair(&mut self, pair: &Pair) -> crate::error::Result<PairSnapshot> {
        self.reads += 1;
        Ok(self.pairs.get(&pair.id()).cloned().unwrap_or_default())
    }

    fn strike(&mut self, pair: &Pair, strike: Strike) -> crate::error::Result<Option<StrikeSnapshot>> {
        self.reads += 1;
        Ok(self.strikes.get(&(pair.id(), strike)).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::Address;

    use super::*;
    use crate::domain::{Spread, Token};

    fn pair() -> Pair {
        let Ok(p) = Pair::new(
            Token::new(Address::repeat_byte(0x01), 18),
            Token::new(Address::repeat_byte(0x02), 18),
            0,
        ) else {
            panic!("valid pair");
        };
        p
    }

    #[test]
    fn record_then_reload_matches_state() {
        let Ok(strike) = Strike::new(12) else {
            panic!("valid strike");
        };
        let Ok(mut data) = PairData::initialize(strike, 3) else {
            panic!("expected Ok");
        };
        let Ok(true) = data.touch_strike(Strike::ZERO, 5) else {
            panic!("new strike");
        };

        let mut source = MemorySnapshotSource::new();
        let Ok(()) = source.record(&pair(), &data) else {
            panic!("expected Ok");
        };

        let Ok(record) = source.pair(&pair()) else {
            panic!("expected Ok");
        };
        let Ok(mut reloaded) = record.to_pair_data() else {
            panic!("expected Ok");
        };
        for s in [strike, Strike::ZERO] {
            let Ok(Some(raw)) = source.strike(&pair(), s) else {
                panic!("strike recorded");
            };
            let Ok(()) = raw.load_into(&mut reloaded, s) else {
                panic!("expected Ok");
            };
        }
        assert_eq!(reloaded, data);
        assert_eq!(reloaded.strike_current(Spread::One), strike);
        assert_eq!(source.reads(), 3);
    }

    #[test]
    fn unknown_pair_reads_zeroed() {
        let mut source = MemorySnapshotSource::new();
        assert_eq!(source.pair(&pair()), Ok(PairSnapshot::default()));
        assert_eq!(source.strike(&pair(), Strike::ZERO), Ok(None));
    }
}
