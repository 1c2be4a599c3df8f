//! Router commands.

use alloy_primitives::U256;

use crate::domain::{Pair, Spread, Strike, TokenAmount, TokenSelector};
use crate::math::Fraction;

/// Router command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CommandKind {
    /// Swap against a pair.
    Swap = 0,
    /// Wrap native ether.
    WrapWeth = 1,
    /// Unwrap WETH to native ether.
    UnwrapWeth = 2,
    /// Provide liquidity.
    AddLiquidity = 3,
    /// Withdraw liquidity.
    RemoveLiquidity = 4,
    /// Open a debt position.
    BorrowLiquidity = 5,
    /// Close a debt position.
    RepayLiquidity = 6,
    /// Accrue interest at a strike.
    Accrue = 7,
    /// Create a pair.
    CreatePair = 8,
}

impl CommandKind {
    /// Returns the wire id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Parses a wire id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Swap),
            1 => Some(Self::WrapWeth),
            2 => Some(Self::UnwrapWeth),
            3 => Some(Self::AddLiquidity),
            4 => Some(Self::RemoveLiquidity),
            5 => Some(Self::BorrowLiquidity),
            6 => Some(Self::RepayLiquidity),
            7 => Some(Self::Accrue),
            8 => Some(Self::CreatePair),
            _ => None,
        }
    }
}

/// Amount a swap command sells or buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapAmount {
    /// Explicit signed amount: positive for exact input, negative for exact
    /// output.
    Exact(TokenAmount),
    /// Sell everything the batch has paid out of this token so far.
    Account(TokenSelector),
}

/// One step of a router batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Create `pair` with every tier at `strike`.
    CreatePair {
        /// Pair to create.
        pair: Pair,
        /// Initial strike.
        strike: Strike,
    },
    /// Deposit `liquidity` at `strike` in tier `spread`.
    AddLiquidity {
        /// Target pair.
        pair: Pair,
        /// Strike to provide at.
        strike: Strike,
        /// Spread tier.
        spread: Spread,
        /// Liquidity to deposit.
        liquidity: u128,
    },
    /// Burn `balance` position shares at `strike` in tier `spread`.
    RemoveLiquidity {
        /// Target pair.
        pair: Pair,
        /// Strike of the position.
        strike: Strike,
        /// Spread tier of the position.
        spread: Spread,
        /// Position balance to burn.
        balance: U256,
    },
    /// Borrow `debt` liquidity at `strike` against `collateral`.
    BorrowLiquidity {
        /// Target pair.
        pair: Pair,
        /// Strike to borrow at.
        strike: Strike,
        /// Collateral deposited.
        collateral: TokenAmount,
        /// Liquidity borrowed.
        debt: u128,
    },
    /// Repay `balance` of a debt position.
    RepayLiquidity {
        /// Target pair.
        pair: Pair,
        /// Strike of the debt.
        strike: Strike,
        /// Token the collateral is held in.
        selector_collateral: TokenSelector,
        /// Strike growth when the debt was opened.
        liquidity_growth_last: Fraction,
        /// Collateral multiplier of the debt.
        multiplier: Fraction,
        /// Debt balance to repay.
        balance: U256,
    },
    /// Accrue interest at `strike`.
    Accrue {
        /// Target pair.
        pair: Pair,
        /// Strike to accrue.
        strike: Strike,
    },
    /// Swap against `pair`.
    Swap {
        /// Target pair.
        pair: Pair,
        /// Amount to trade.
        amount: SwapAmount,
    },
    /// Wrap native ether held by the router.
    WrapWeth {
        /// Wei to wrap.
        amount: U256,
    },
    /// Unwrap the WETH balance at an account token index.
    UnwrapWeth {
        /// Index of WETH in the batch account.
        weth_index: usize,
    },
}

impl Command {
    /// Returns the command id.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::CreatePair { .. } => CommandKind::CreatePair,
            Self::AddLiquidity { .. } => CommandKind::AddLiquidity,
            Self::RemoveLiquidity { .. } => CommandKind::RemoveLiquidity,
            Self::BorrowLiquidity { .. } => CommandKind::BorrowLiquidity,
            Self::RepayLiquidity { .. } => CommandKind::RepayLiquidity,
            Self::Accrue { .. } => CommandKind::Accrue,
            Self::Swap { .. } => CommandKind::Swap,
            Self::WrapWeth { .. } => CommandKind::WrapWeth,
            Self::UnwrapWeth { .. } => CommandKind::UnwrapWeth,
        }
    }

    /// Pair the command acts on, or `None` for ether wrapping.
    #[must_use]
    pub const fn pair(&self) -> Option<&Pair> {
        match self {
            Self::CreatePair { pair, .. }
            | Self::AddLiquidity { pair, .. }
            | Self::RemoveLiquidity { pair, .. }
            | Self::BorrowLiquidity { pair, .. }
            | Self::RepayLiquidity { pair, .. }
            | Self::Accrue { pair, .. }
            | Self::Swap { pair, .. } => Some(pair),
            Self::WrapWeth { .. } | Self::UnwrapWeth { .. } => None,
        }
    }
}
