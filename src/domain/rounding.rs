//! Explicit rounding direction for integer division.

/// Rounding direction for divisions in amount and liquidity conversions.
///
/// Amounts the user pays in are rounded [`Up`](Self::Up), amounts paid out
/// are rounded [`Down`](Self::Down).
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::from_round_up(false), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Maps a `round_up` flag to a direction.
    #[must_use]
    pub const fn from_round_up(round_up: bool) -> Self {
        if round_up {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_mapping() {
        assert_eq!(Rounding::from_round_up(true), Rounding::Up);
        assert_eq!(Rounding::from_round_up(false), Rounding::Down);
    }

    #[test]
    fn predicates_are_exclusive() {
        assert!(Rounding::Up.is_up() && !Rounding::Up.is_down());
        assert!(Rounding::Down.is_down() && !Rounding::Down.is_up());
    }
}
