//! Signed token amounts.

use core::fmt;

use alloy_primitives::{I256, U256};

use super::Token;
use crate::error::EngineError;

/// A signed amount of a specific token.
///
/// Positive amounts flow from the user into the ledger, negative amounts
/// flow out to the user. For a swap input the sign selects exact-input
/// (positive) or exact-output (negative).
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, I256};
/// use dry_powder_engine::domain::{Token, TokenAmount};
///
/// let t = Token::new(Address::repeat_byte(1), 18);
/// let a = TokenAmount::new(t, I256::try_from(5).unwrap_or_default());
/// assert!(a.is_positive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAmount {
    token: Token,
    amount: I256,
}

impl TokenAmount {
    /// Creates a new amount.
    #[must_use]
    pub const fn new(token: Token, amount: I256) -> Self {
        Self { token, amount }
    }

    /// Zero of `token`.
    #[must_use]
    pub const fn zero(token: Token) -> Self {
        Self::new(token, I256::ZERO)
    }

    /// Creates an amount from an unsigned magnitude and a sign.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the magnitude does not fit a
    /// signed 256-bit integer.
    pub fn from_magnitude(token: Token, magnitude: U256, negative: bool) -> crate::error::Result<Self> {
        let value = to_signed(magnitude)?;
        let amount = if negative { -value } else { value };
        Ok(Self::new(token, amount))
    }

    /// Returns the token.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Returns the signed amount.
    #[must_use]
    pub const fn amount(&self) -> I256 {
        self.amount
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds two amounts of the same token.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidToken`] if the tokens differ.
    /// - [`EngineError::Overflow`] if the sum overflows.
    pub fn checked_add(&self, other: &Self) -> crate::error::Result<Self> {
        if self.token != other.token {
            return Err(EngineError::InvalidToken("cannot add amounts of different tokens"));
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(EngineError::Overflow("token amount sum"))?;
        Ok(Self::new(self.token, amount))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.amount, self.token.address())
    }
}

/// Reinterprets an unsigned magnitude as a non-negative `I256`.
pub(crate) fn to_signed(value: U256) -> crate::error::Result<I256> {
    if value.bit(255) {
        return Err(EngineError::Overflow("amount exceeds the signed 256-bit range"));
    }
    Ok(I256::from_raw(value))
}
