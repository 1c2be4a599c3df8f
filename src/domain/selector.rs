//! Wire-level selectors shared with the router's command encoding.

use crate::error::EngineError;

/// Which token of a pair an input refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenSelector {
    /// The lower-address token.
    Token0 = 0,
    /// The higher-address token.
    Token1 = 1,
}

/// Token selector of a swap, which may also point at the account's running
/// balance instead of an explicit amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SwapTokenSelector {
    /// Explicit amount of token0.
    Token0 = 0,
    /// Explicit amount of token1.
    Token1 = 1,
    /// Amount read from the batch account.
    Account = 2,
}

/// Kind of a liquidity position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OrderType {
    /// Liquidity provided at a strike and spread.
    BiDirectional = 0,
    /// Liquidity borrowed against collateral.
    Debt = 1,
}

macro_rules! wire_id {
    ($ty:ident, $err:literal, $($variant:ident = $id:literal),+ $(,)?) => {
        impl $ty {
            /// Returns the wire id.
            #[must_use]
            pub const fn id(self) -> u8 {
                self as u8
            }

            /// Parses a wire id.
            ///
            /// # Errors
            ///
            /// Returns [`EngineError::InvalidToken`] for unknown ids.
            pub const fn from_id(id: u8) -> crate::error::Result<Self> {
                match id {
                    $($id => Ok(Self::$variant),)+
                    _ => Err(EngineError::InvalidToken($err)),
                }
            }
        }
    };
}

wire_id!(TokenSelector, "unknown token selector", Token0 = 0, Token1 = 1);
wire_id!(
    SwapTokenSelector,
    "unknown swap token selector",
    Token0 = 0,
    Token1 = 1,
    Account = 2,
);
wire_id!(OrderType, "unknown order type", BiDirectional = 0, Debt = 1);
