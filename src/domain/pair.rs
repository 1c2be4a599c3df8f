//! Trading pair identity.

use alloy_primitives::{keccak256, B256};

use super::{Token, TokenSelector};
use crate::error::EngineError;

/// A trading pair: two distinct tokens ordered by address plus the
/// liquidity scaling factor the pair was created with.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use dry_powder_engine::domain::{Pair, Token};
///
/// let a = Token::new(Address::repeat_byte(1), 18);
/// let b = Token::new(Address::repeat_byte(2), 6);
///
/// // Order is enforced automatically:
/// let pair = Pair::new(b, a, 0).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    token0: Token,
    token1: Token,
    scaling_factor: u8,
}

impl Pair {
    /// Creates a pair, sorting the tokens so that `token0` has the lower
    /// address.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if both tokens share an address.
    pub fn new(token_a: Token, token_b: Token, scaling_factor: u8) -> crate::error::Result<Self> {
        if token_a.address() == token_b.address() {
            return Err(EngineError::InvalidToken(
                "pair requires two distinct token addresses",
            ));
        }

        let (token0, token1) = if token_a.address() < token_b.address() {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(Self {
            token0,
            token1,
            scaling_factor,
        })
    }

    /// Returns the lower-address token.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Returns the higher-address token.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Returns the liquidity scaling factor.
    #[must_use]
    pub const fn scaling_factor(&self) -> u8 {
        self.scaling_factor
    }

    /// Returns the token picked by `selector`.
    #[must_use]
    pub const fn token(&self, selector: TokenSelector) -> Token {
        match selector {
            TokenSelector::Token0 => self.token0,
            TokenSelector::Token1 => self.token1,
        }
    }

    /// Returns which side of the pair `token` is.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidToken`] if `token` is not in the pair.
    pub fn selector_of(&self, token: &Token) -> crate::error::Result<TokenSelector> {
        if *token == self.token0 {
            Ok(TokenSelector::Token0)
        } else if *token == self.token1 {
            Ok(TokenSelector::Token1)
        } else {
            Err(EngineError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Pair id used by the ledger:
    /// `keccak256(token0 ++ token1 ++ scaling_factor)` over the packed
    /// 20-byte addresses and the single scaling byte.
    #[must_use]
    pub fn id(&self) -> B256 {
        let mut packed = [0u8; 41];
        packed[..20].copy_from_slice(self.token0.address().as_slice());
        packed[20..40].copy_from_slice(self.token1.address().as_slice());
        packed[40] = self.scaling_factor;
        keccak256(packed)
    }
}
