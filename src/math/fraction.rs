//! Exact rational numbers with Q128 conversions.
//!
//! Growth indices, repay rates, compositions and collateral multipliers are
//! all rationals. A [`Fraction`] keeps them as a reduced `U256`
//! numerator/denominator pair and does every operation over 512-bit
//! intermediates. A result whose reduced form does not fit in 256 bits is
//! collapsed to its floored Q128 value, which is the precision the on-chain
//! ledger stores.

use core::cmp::Ordering;
use core::fmt;

use alloy_primitives::{U256, U512};
use tracing::trace;

use super::div_round;
use super::wide::{narrow, widen};
use crate::constants::{MIN_MULTIPLIER_DENOMINATOR, MIN_MULTIPLIER_NUMERATOR, Q128, Q128_WIDE};
use crate::domain::Rounding;
use crate::error::EngineError;

/// A non-negative rational number in lowest terms.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use dry_powder_engine::constants::Q128;
/// use dry_powder_engine::math::Fraction;
///
/// let f = Fraction::new(U256::from(5u8), U256::from(2u8)).expect("non-zero denominator");
/// assert_eq!(f.to_q128(), Ok(Q128 * U256::from(5u8) / U256::from(2u8)));
/// assert_eq!(Fraction::from_q128(Q128), Fraction::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fraction {
    numerator: U256,
    denominator: U256,
}

impl Fraction {
    /// `0 / 1`.
    pub const ZERO: Self = Self::raw(0, 1);

    /// `1 / 1`.
    pub const ONE: Self = Self::raw(1, 1);

    /// Smallest collateral multiplier a debt position may open with.
    pub const MIN_MULTIPLIER: Self = Self::raw(MIN_MULTIPLIER_NUMERATOR, MIN_MULTIPLIER_DENOMINATOR);

    const fn raw(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator: U256::from_limbs([numerator, 0, 0, 0]),
            denominator: U256::from_limbs([denominator, 0, 0, 0]),
        }
    }

    // -- Construction -------------------------------------------------------

    /// Creates `numerator / denominator` in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DivisionByZero`] if `denominator` is zero.
    pub fn new(numerator: U256, denominator: U256) -> crate::error::Result<Self> {
        Self::from_wide(widen(numerator), widen(denominator))
    }

    /// Creates `value / 1`.
    #[must_use]
    pub fn from_integer(value: u128) -> Self {
        Self {
            numerator: U256::from(value),
            denominator: U256::from(1u8),
        }
    }

    /// Interprets `value` as a Q128 fixed-point number, `value / 2^128`.
    #[must_use]
    pub fn from_q128(value: U256) -> Self {
        let (numerator, denominator) = reduce(widen(value), Q128_WIDE);
        // Both parts only shrink under reduction.
        Self {
            numerator: narrow(numerator).unwrap_or(value),
            denominator: narrow(denominator).unwrap_or(Q128),
        }
    }

    /// Builds a fraction from 512-bit parts, collapsing to Q128 precision
    /// when the reduced parts do not fit in 256 bits.
    pub(crate) fn from_wide(numerator: U512, denominator: U512) -> crate::error::Result<Self> {
        if denominator.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        if numerator.is_zero() {
            return Ok(Self::ZERO);
        }
        let (n, d) = reduce(numerator, denominator);
        if let (Some(numerator), Some(denominator)) = (narrow(n), narrow(d)) {
            return Ok(Self {
                numerator,
                denominator,
            });
        }

        let scaled = n
            .checked_mul(Q128_WIDE)
            .ok_or(EngineError::Overflow("fraction exceeds Q128 range"))?;
        let q = div_round(scaled, d, Rounding::Down).ok_or(EngineError::DivisionByZero)?;
        let q = narrow(q).ok_or(EngineError::Overflow("fraction exceeds Q128 range"))?;
        trace!(q128 = %q, "collapsed fraction to Q128 precision");
        Ok(Self::from_q128(q))
    }

    // -- Accessors ----------------------------------------------------------

    /// Returns the numerator.
    #[must_use]
    pub const fn numerator(&self) -> U256 {
        self.numerator
    }

    /// Returns the denominator, never zero.
    #[must_use]
    pub const fn denominator(&self) -> U256 {
        self.denominator
    }

    /// Returns `true` for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Converts to Q128, `floor(numerator * 2^128 / denominator)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the value is `2^128` or larger.
    pub fn to_q128(&self) -> crate::error::Result<U256> {
        super::mul_div(self.numerator, Q128, self.denominator, Rounding::Down)
    }

    /// Returns `floor(self * value)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the product exceeds 256 bits.
    pub fn mul_floor(&self, value: U256) -> crate::error::Result<U256> {
        self.mul_round(value, Rounding::Down)
    }

    /// Returns `self * value` rounded in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the product exceeds 256 bits.
    pub fn mul_round(&self, value: U256, rounding: Rounding) -> crate::error::Result<U256> {
        super::mul_div(value, self.numerator, self.denominator, rounding)
    }

    // -- Arithmetic ---------------------------------------------------------

    /// Exact sum.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the sum exceeds the Q128 range.
    pub fn checked_add(&self, other: &Self) -> crate::error::Result<Self> {
        let n = widen(self.numerator) * widen(other.denominator)
            + widen(other.numerator) * widen(self.denominator);
        let d = widen(self.denominator) * widen(other.denominator);
        Self::from_wide(n, d)
    }

    /// Exact difference.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Underflow`] if `other > self`.
    pub fn checked_sub(&self, other: &Self) -> crate::error::Result<Self> {
        let lhs = widen(self.numerator) * widen(other.denominator);
        let rhs = widen(other.numerator) * widen(self.denominator);
        if rhs > lhs {
            return Err(EngineError::Underflow("fraction difference is negative"));
        }
        Self::from_wide(lhs - rhs, widen(self.denominator) * widen(other.denominator))
    }

    /// Exact product.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the product exceeds the Q128 range.
    pub fn checked_mul(&self, other: &Self) -> crate::error::Result<Self> {
        Self::from_wide(
            widen(self.numerator) * widen(other.numerator),
            widen(self.denominator) * widen(other.denominator),
        )
    }

    /// Exact quotient.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DivisionByZero`] if `other` is zero.
    /// - [`EngineError::Overflow`] if the quotient exceeds the Q128 range.
    pub fn checked_div(&self, other: &Self) -> crate::error::Result<Self> {
        Self::from_wide(
            widen(self.numerator) * widen(other.denominator),
            widen(self.denominator) * widen(other.numerator),
        )
    }

    /// Reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DivisionByZero`] for zero.
    pub fn invert(&self) -> crate::error::Result<Self> {
        if self.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Self {
            numerator: self.denominator,
            denominator: self.numerator,
        })
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = widen(self.numerator) * widen(other.denominator);
        let rhs = widen(other.numerator) * widen(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: U512, mut b: U512) -> U512 {
    while !b.is_zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn reduce(numerator: U512, denominator: U512) -> (U512, U512) {
    let g = gcd(numerator, denominator);
    if g.is_zero() {
        return (numerator, denominator);
    }
    (numerator / g, denominator / g)
}
