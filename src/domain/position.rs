//! Liquidity positions and position balance deltas.

use alloy_primitives::I256;

use super::{OrderType, Pair, Spread, Strike, TokenSelector};
use crate::error::EngineError;
use crate::math::Fraction;

/// What distinguishes one position from another at the same strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionKind {
    /// Liquidity provided at a spread tier.
    BiDirectional {
        /// Tier the liquidity was deposited into.
        spread: Spread,
    },
    /// Liquidity borrowed against collateral.
    Debt {
        /// Token the collateral is held in.
        selector_collateral: TokenSelector,
        /// Strike liquidity growth when the debt was opened.
        liquidity_growth_last: Fraction,
        /// Collateral multiplier fixed at open time.
        multiplier: Fraction,
    },
}

/// A position token: the pair, the strike and the position kind.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use dry_powder_engine::domain::{OrderType, Pair, Position, Spread, Strike, Token};
///
/// let pair = Pair::new(
///     Token::new(Address::repeat_byte(1), 18),
///     Token::new(Address::repeat_byte(2), 18),
///     0,
/// )
/// .expect("distinct tokens");
/// let p = Position::bi_directional(pair, Strike::ZERO, Spread::One);
/// assert_eq!(p.order_type(), OrderType::BiDirectional);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pair: Pair,
    strike: Strike,
    kind: PositionKind,
}

impl Position {
    /// A liquidity provider position.
    #[must_use]
    pub const fn bi_directional(pair: Pair, strike: Strike, spread: Spread) -> Self {
        Self {
            pair,
            strike,
            kind: PositionKind::BiDirectional { spread },
        }
    }

    /// A debt position.
    #[must_use]
    pub const fn debt(
        pair: Pair,
        strike: Strike,
        selector_collateral: TokenSelector,
        liquidity_growth_last: Fraction,
        multiplier: Fraction,
    ) -> Self {
        Self {
            pair,
            strike,
            kind: PositionKind::Debt {
                selector_collateral,
                liquidity_growth_last,
                multiplier,
            },
        }
    }

    /// Returns the pair.
    #[must_use]
    pub const fn pair(&self) -> Pair {
        self.pair
    }

    /// Returns the strike.
    #[must_use]
    pub const fn strike(&self) -> Strike {
        self.strike
    }

    /// Returns the kind-specific data.
    #[must_use]
    pub const fn kind(&self) -> PositionKind {
        self.kind
    }

    /// Returns the order type tag.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self.kind {
            PositionKind::BiDirectional { .. } => OrderType::BiDirectional,
            PositionKind::Debt { .. } => OrderType::Debt,
        }
    }
}

/// A signed change to the balance of one position.
///
/// Positive balances are minted to the user, negative balances are burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionData {
    position: Position,
    balance: I256,
}

impl PositionData {
    /// Creates a balance delta.
    #[must_use]
    pub const fn new(position: Position, balance: I256) -> Self {
        Self { position, balance }
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the signed balance delta.
    #[must_use]
    pub const fn balance(&self) -> I256 {
        self.balance
    }

    /// Adds another delta of the same position.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidToken`] if the positions differ.
    /// - [`EngineError::Overflow`] if the balance overflows.
    pub fn checked_add(&self, other: &Self) -> crate::error::Result<Self> {
        if self.position != other.position {
            return Err(EngineError::InvalidToken("cannot add balances of different positions"));
        }
        let balance = self
            .balance
            .checked_add(other.balance)
            .ok_or(EngineError::Overflow("position balance sum"))?;
        Ok(Self::new(self.position, balance))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::Address;

    use super::*;
    use crate::domain::Token;

    fn pair() -> Pair {
        let Ok(p) = Pair::new(
            Token::new(Address::repeat_byte(1), 18),
            Token::new(Address::repeat_byte(2), 18),
            0,
        ) else {
            panic!("valid pair");
        };
        p
    }

    fn i(v: i64) -> I256 {
        I256::try_from(v).unwrap_or_default()
    }

    #[test]
    fn debt_order_type() {
        let p = Position::debt(
            pair(),
            Strike::ZERO,
            TokenSelector::Token0,
            Fraction::ZERO,
            Fraction::from_integer(2),
        );
        assert_eq!(p.order_type(), OrderType::Debt);
    }

    #[test]
    fn balances_of_same_position_add() {
        let p = Position::bi_directional(pair(), Strike::ZERO, Spread::Two);
        let Ok(sum) = PositionData::new(p, i(10)).checked_add(&PositionData::new(p, i(-3))) else {
            panic!("expected Ok");
        };
        assert_eq!(sum.balance(), i(7));
    }

    #[test]
    fn different_spreads_are_different_positions() {
        let a = Position::bi_directional(pair(), Strike::ZERO, Spread::One);
        let b = Position::bi_directional(pair(), Strike::ZERO, Spread::Two);
        assert!(PositionData::new(a, i(1))
            .checked_add(&PositionData::new(b, i(1)))
            .is_err());
    }
}
