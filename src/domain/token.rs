//! Token identity type.

use alloy_primitives::Address;

/// An ERC-20 token: its contract address plus decimals.
///
/// Two tokens are equal only if both address and decimals match; pair
/// ordering only looks at the address.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use dry_powder_engine::domain::Token;
///
/// let weth = Token::new(Address::repeat_byte(0x11), 18);
/// assert_eq!(weth.decimals(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    address: Address,
    decimals: u8,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    /// Returns the contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }
}
