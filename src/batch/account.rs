//! Running totals of a batch and the transfers that settle them.

use alloy_primitives::{I256, U256};

use crate::domain::{Position, PositionData, Token, TokenAmount};
use crate::error::EngineError;
use crate::math::Fraction;

/// Net token and position deltas of a batch, in first-seen order.
///
/// The order matters: the router refers to account entries by index.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, I256};
/// use dry_powder_engine::batch::Account;
/// use dry_powder_engine::domain::{Token, TokenAmount};
///
/// let weth = Token::new(Address::repeat_byte(1), 18);
/// let mut account = Account::default();
/// account.update_token(&TokenAmount::new(weth, I256::try_from(10).unwrap_or_default())).expect("no overflow");
/// account.update_token(&TokenAmount::new(weth, I256::try_from(-4).unwrap_or_default())).expect("no overflow");
/// assert_eq!(account.token_index(&weth), Some(0));
/// assert_eq!(account.tokens()[0].amount(), I256::try_from(6).unwrap_or_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    tokens: Vec<TokenAmount>,
    positions: Vec<PositionData>,
}

impl Account {
    /// Adds a token delta.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the running total overflows.
    pub fn update_token(&mut self, delta: &TokenAmount) -> crate::error::Result<()> {
        match self.tokens.iter_mut().find(|t| t.token() == delta.token()) {
            Some(total) => *total = total.checked_add(delta)?,
            None => self.tokens.push(*delta),
        }
        Ok(())
    }

    /// Adds a position balance delta.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the running balance overflows.
    pub fn update_position(&mut self, delta: &PositionData) -> crate::error::Result<()> {
        match self
            .positions
            .iter_mut()
            .find(|p| p.position() == delta.position())
        {
            Some(total) => *total = total.checked_add(delta)?,
            None => self.positions.push(*delta),
        }
        Ok(())
    }

    /// Net token totals.
    #[must_use]
    pub fn tokens(&self) -> &[TokenAmount] {
        &self.tokens
    }

    /// Net position balances.
    #[must_use]
    pub fn positions(&self) -> &[PositionData] {
        &self.positions
    }

    /// Index of `token` in [`Account::tokens`].
    #[must_use]
    pub fn token_index(&self, token: &Token) -> Option<usize> {
        self.tokens.iter().position(|t| t.token() == *token)
    }

    /// Net total of `token`, zero if the batch never touched it.
    #[must_use]
    pub fn token_total(&self, token: &Token) -> TokenAmount {
        self.tokens
            .iter()
            .find(|t| t.token() == *token)
            .copied()
            .unwrap_or_else(|| TokenAmount::zero(*token))
    }

    /// Transfers the user must sign for the batch to settle, padded by
    /// `slippage`.
    ///
    /// Every token gets an entry, in account order: `floor(amount * (1 +
    /// slippage))` when the user owes it and zero otherwise. Only positions
    /// the user gives shares back to appear, with
    /// `floor(-balance * (1 + slippage))`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if a padded amount overflows.
    pub fn transfer_requests(&self, slippage: &Fraction) -> crate::error::Result<TransferRequests> {
        let tokens = self
            .tokens
            .iter()
            .map(|t| {
                let amount = if t.is_positive() {
                    pad(t.amount().unsigned_abs(), slippage)?
                } else {
                    U256::ZERO
                };
                Ok(TokenTransfer {
                    token: t.token(),
                    amount,
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        let positions = self
            .positions
            .iter()
            .filter(|p| p.balance() < I256::ZERO)
            .map(|p| {
                Ok(PositionTransfer {
                    position: *p.position(),
                    balance: pad(p.balance().unsigned_abs(), slippage)?,
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        Ok(TransferRequests { tokens, positions })
    }
}

fn pad(amount: U256, slippage: &Fraction) -> crate::error::Result<U256> {
    amount
        .checked_add(slippage.mul_floor(amount)?)
        .ok_or(EngineError::Overflow("slippage-padded transfer"))
}

/// A token pull the user authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenTransfer {
    /// Token pulled.
    pub token: Token,
    /// Maximum amount pulled.
    pub amount: U256,
}

/// A position share transfer the user authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionTransfer {
    /// Position whose shares move.
    pub position: Position,
    /// Maximum balance moved.
    pub balance: U256,
}

/// Signed-transfer list of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferRequests {
    /// One entry per account token.
    pub tokens: Vec<TokenTransfer>,
    /// One entry per position the user burns shares of.
    pub positions: Vec<PositionTransfer>,
}
