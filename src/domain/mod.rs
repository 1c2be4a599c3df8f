//! Fundamental domain value types.
//!
//! Strikes, spreads, tokens, pairs, signed amounts, tier liquidity and
//! positions. Newtypes with validated constructors enforce the range
//! invariants of the on-chain ledger at construction time.

mod amount;
mod liquidity;
mod pair;
mod position;
mod rounding;
mod selector;
mod spread;
mod strike;
mod token;

pub use amount::TokenAmount;
pub(crate) use amount::to_signed;
pub use liquidity::TierLiquidity;
pub use pair::Pair;
pub use position::{Position, PositionData, PositionKind};
pub use rounding::Rounding;
pub use selector::{OrderType, SwapTokenSelector, TokenSelector};
pub use spread::Spread;
pub use strike::Strike;
pub use token::Token;
