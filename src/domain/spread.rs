//! Spread tiers.

use core::fmt;

use crate::constants::NUM_SPREADS;
use crate::error::EngineError;

/// Risk/fee tier of liquidity at a strike, `1..=5`.
///
/// Tier arrays are indexed by [`Spread::index`] (`0..=4`). Lower tiers are
/// borrowed into first; higher tiers earn proportionally more interest.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::Spread;
///
/// let s = Spread::new(2).unwrap_or(Spread::One);
/// assert_eq!(s.index(), 1);
/// assert_eq!(s.next(), Some(Spread::Three));
/// assert!(Spread::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Spread {
    /// Innermost tier, borrowed into first.
    #[default]
    One = 1,
    /// Second tier.
    Two = 2,
    /// Third tier.
    Three = 3,
    /// Fourth tier.
    Four = 4,
    /// Outermost tier.
    Five = 5,
}

impl Spread {
    /// All tiers from innermost to outermost.
    pub const ALL: [Self; NUM_SPREADS] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Creates a spread from its `1..=5` tier number.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSpread`] for any other value.
    pub const fn new(value: u8) -> crate::error::Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            _ => Err(EngineError::InvalidSpread("spread must be within 1..=5")),
        }
    }

    /// Creates a spread from its `0..=4` array index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSpread`] for an index above 4.
    pub const fn from_index(index: usize) -> crate::error::Result<Self> {
        if index >= NUM_SPREADS {
            return Err(EngineError::InvalidSpread("spread index must be within 0..=4"));
        }
        Self::new(index as u8 + 1)
    }

    /// Returns the tier number, `1..=5`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self as u8
    }

    /// Returns the tier array index, `0..=4`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the tier width in strikes.
    #[must_use]
    pub const fn width(self) -> i32 {
        self as i32
    }

    /// The next wider tier, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => Some(Self::Three),
            Self::Three => Some(Self::Four),
            Self::Four => Some(Self::Five),
            Self::Five => None,
        }
    }

    /// The next narrower tier, if any.
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::One => None,
            Self::Two => Some(Self::One),
            Self::Three => Some(Self::Two),
            Self::Four => Some(Self::Three),
            Self::Five => Some(Self::Four),
        }
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spread({})", self.get())
    }
}
