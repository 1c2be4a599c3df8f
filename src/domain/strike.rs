//! Discrete price level of a pair.

use core::fmt;

use crate::constants::{MAX_STRIKE, MIN_STRIKE};
use crate::error::EngineError;

/// A discrete price level where `price = 1.0001^strike`.
///
/// Usable strikes lie strictly inside `(MIN_STRIKE, MAX_STRIKE)`. The two
/// bounds themselves exist only as [`Strike::MIN`] and [`Strike::MAX`],
/// which terminate the neighbour links of the outermost strikes and can
/// never hold liquidity.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::Strike;
///
/// let s = Strike::new(-12);
/// assert!(s.is_ok());
/// assert!(Strike::new(776_363).is_err());
/// assert!(!Strike::MAX.is_interior());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike(i32);

impl Strike {
    /// Lower sentinel (`-776363`), not a usable strike.
    pub const MIN: Self = Self(MIN_STRIKE);

    /// Upper sentinel (`776363`), not a usable strike.
    pub const MAX: Self = Self(MAX_STRIKE);

    /// Strike where `price = 1`.
    pub const ZERO: Self = Self(0);

    // -- Construction -------------------------------------------------------

    /// Creates a usable strike.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] unless
    /// `-776363 < value < 776363`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value <= MIN_STRIKE || value >= MAX_STRIKE {
            return Err(EngineError::StrikeOutOfRange(
                "strike must lie strictly within (-776363, 776363)",
            ));
        }
        Ok(Self(value))
    }

    /// Creates a neighbour link, which may also be one of the sentinels.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] unless
    /// `-776363 <= value <= 776363`.
    pub const fn link(value: i32) -> crate::error::Result<Self> {
        if value < MIN_STRIKE || value > MAX_STRIKE {
            return Err(EngineError::StrikeOutOfRange(
                "strike link must lie within [-776363, 776363]",
            ));
        }
        Ok(Self(value))
    }

    // -- Accessors ----------------------------------------------------------

    /// Returns the underlying `i32` index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns `true` unless this is one of the sentinels.
    #[must_use]
    pub const fn is_interior(&self) -> bool {
        self.0 > MIN_STRIKE && self.0 < MAX_STRIKE
    }

    /// Returns `self` if it is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] for the sentinels.
    pub const fn ensure_interior(self) -> crate::error::Result<Self> {
        if self.is_interior() {
            Ok(self)
        } else {
            Err(EngineError::StrikeOutOfRange(
                "sentinel strikes cannot be traded or hold liquidity",
            ))
        }
    }

    /// Returns the usable strike `delta` levels away.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StrikeOutOfRange`] if the result is not a
    /// usable strike.
    pub const fn offset(&self, delta: i32) -> crate::error::Result<Self> {
        match self.0.checked_add(delta) {
            Some(v) => Self::new(v),
            None => Err(EngineError::StrikeOutOfRange("strike offset overflows")),
        }
    }
}

impl fmt::Display for Strike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strike({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn valid_zero() {
        let Ok(s) = Strike::new(0) else {
            panic!("expected Ok");
        };
        assert_eq!(s, Strike::ZERO);
    }

    #[test]
    fn valid_inner_edges() {
        let Ok(lo) = Strike::new(-776_362) else {
            panic!("expected Ok");
        };
        let Ok(hi) = Strike::new(776_362) else {
            panic!("expected Ok");
        };
        assert!(lo < hi);
    }

    #[test]
    fn bounds_are_exclusive() {
        assert!(matches!(
            Strike::new(-776_363),
            Err(EngineError::StrikeOutOfRange(_))
        ));
        assert!(matches!(
            Strike::new(776_363),
            Err(EngineError::StrikeOutOfRange(_))
        ));
    }

    #[test]
    fn links_accept_sentinels() {
        assert_eq!(Strike::link(776_363), Ok(Strike::MAX));
        assert_eq!(Strike::link(-776_363), Ok(Strike::MIN));
        assert!(Strike::link(776_364).is_err());
    }

    // -- Interior checks ----------------------------------------------------

    #[test]
    fn sentinels_are_not_interior() {
        assert!(!Strike::MIN.is_interior());
        assert!(!Strike::MAX.is_interior());
        assert!(Strike::MAX.ensure_interior().is_err());
        assert_eq!(Strike::ZERO.ensure_interior(), Ok(Strike::ZERO));
    }

    #[test]
    fn offset_within_range() {
        let Ok(s) = Strike::new(10) else {
            panic!("expected Ok");
        };
        assert_eq!(s.offset(-3).map(|x| x.get()), Ok(7));
    }

    #[test]
    fn offset_onto_bound_fails() {
        let Ok(s) = Strike::new(776_360) else {
            panic!("expected Ok");
        };
        assert!(s.offset(2).is_ok());
        assert!(matches!(s.offset(3), Err(EngineError::StrikeOutOfRange(_))));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Strike::ZERO), "Strike(0)");
    }
}
