//! Rounding helpers for wide integer division.
//!
//! [`div_round`] performs 512-bit division with an explicit [`Rounding`]
//! direction. It is the building block of every amount and liquidity
//! conversion in the crate.
//!
//! # Convention
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Amount paid out to the user | [`Rounding::Down`] |
//! | Amount paid in by the user | [`Rounding::Up`] |
//! | Liquidity credited to the user | [`Rounding::Down`] |

use alloy_primitives::U512;

use crate::domain::Rounding;

/// Integer division of `U512` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U512;
/// use dry_powder_engine::domain::Rounding;
/// use dry_powder_engine::math::div_round;
///
/// let seven = U512::from(7u8);
/// let two = U512::from(2u8);
/// assert_eq!(div_round(seven, two, Rounding::Down), Some(U512::from(3u8)));
/// assert_eq!(div_round(seven, two, Rounding::Up), Some(U512::from(4u8)));
/// ```
#[must_use]
pub fn div_round(numerator: U512, denominator: U512, rounding: Rounding) -> Option<U512> {
    if denominator.is_zero() {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a non-zero remainder implies q < U512::MAX.
        Rounding::Up if !(numerator % denominator).is_zero() => Some(q + U512::from(1u8)),
        Rounding::Up => Some(q),
    }
}
