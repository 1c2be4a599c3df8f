//! 256/512-bit widening helpers.
//!
//! Intermediate products of two 256-bit values are computed in `U512` and
//! narrowed back with an explicit overflow check.

use alloy_primitives::{U256, U512};

use super::div_round;
use crate::domain::Rounding;
use crate::error::EngineError;

/// Widens a `U256` into a `U512`.
#[must_use]
pub(crate) fn widen(value: U256) -> U512 {
    let l = value.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

/// Narrows a `U512` into a `U256`, or `None` if the upper limbs are set.
#[must_use]
pub(crate) fn narrow(value: U512) -> Option<U256> {
    let l = value.as_limbs();
    if l[4] != 0 || l[5] != 0 || l[6] != 0 || l[7] != 0 {
        return None;
    }
    Some(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

/// Narrows a `U256` into a `u128`, or `None` if it does not fit.
#[must_use]
pub(crate) fn narrow_u128(value: U256) -> Option<u128> {
    let l = value.as_limbs();
    if l[2] != 0 || l[3] != 0 {
        return None;
    }
    Some(((l[1] as u128) << 64) | l[0] as u128)
}

/// Computes `a * b / denominator` with a 512-bit intermediate product.
///
/// # Errors
///
/// - [`EngineError::DivisionByZero`] if `denominator` is zero.
/// - [`EngineError::Overflow`] if the quotient does not fit in 256 bits.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use dry_powder_engine::domain::Rounding;
/// use dry_powder_engine::math::mul_div;
///
/// let r = mul_div(U256::MAX, U256::from(2u8), U256::from(4u8), Rounding::Down);
/// assert_eq!(r, Ok(U256::MAX >> 1));
/// ```
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> crate::error::Result<U256> {
    let product = widen(a) * widen(b);
    let q = div_round(product, widen(denominator), rounding).ok_or(EngineError::DivisionByZero)?;
    narrow(q).ok_or(EngineError::Overflow("mul_div result exceeds 256 bits"))
}
