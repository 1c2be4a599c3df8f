//! Router batch simulation.
//!
//! A batch is a list of [`Command`]s the router executes in one
//! transaction. [`BatchExecutor`] replays them against in-memory pair state,
//! summing what the user pays and receives in an [`Account`], and derives
//! the slippage-padded [`TransferRequests`] the user signs.
//!
//! | Item | Role |
//! |------|------|
//! | [`Command`], [`CommandKind`], [`SwapAmount`] | command model and router ids |
//! | [`Account`] | net token and position deltas |
//! | [`BatchExecutor`] | lazy loading and sequential dispatch |
//! | [`TransferRequests`] | signed pulls settling the batch |

mod account;
mod command;
mod executor;

pub use account::{Account, PositionTransfer, TokenTransfer, TransferRequests};
pub use command::{Command, CommandKind, SwapAmount};
pub use executor::{BatchExecutor, BatchOutcome};
