//! Sequential execution of router commands against lazily loaded state.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::B256;
use tracing::{debug, trace};

use super::{Account, Command, SwapAmount, TransferRequests};
use crate::config::BatchConfig;
use crate::domain::{Pair, Strike, TokenAmount};
use crate::engine::{
    calculate_accrue, calculate_add_liquidity, calculate_borrow_liquidity, calculate_initialize,
    calculate_remove_liquidity, calculate_repay_liquidity, calculate_swap, is_zero_to_one,
    start_strike, LiquidityOutcome,
};
use crate::error::EngineError;
use crate::state::PairData;
use crate::traits::SnapshotSource;

/// Result of a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Net token and position deltas.
    pub account: Account,
    /// Transfers the user signs to settle the batch.
    pub transfers: TransferRequests,
    /// Simulated state of every pair the batch touched, keyed by pair id.
    pub pairs: BTreeMap<B256, PairData>,
}

/// Runs router commands in order against one in-memory snapshot per pair.
///
/// Pair and strike records are read from the [`SnapshotSource`] the first
/// time a command needs them and are never re-read, so later commands see
/// the effects of earlier ones. A failed command leaves the executor in an
/// unspecified state; discard it.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use dry_powder_engine::batch::{BatchExecutor, Command};
/// use dry_powder_engine::config::BatchConfig;
/// use dry_powder_engine::domain::{Pair, Spread, Strike, Token};
/// use dry_powder_engine::snapshot::MemorySnapshotSource;
///
/// let pair = Pair::new(
///     Token::new(Address::repeat_byte(1), 18),
///     Token::new(Address::repeat_byte(2), 18),
///     0,
/// )
/// .expect("distinct tokens");
///
/// let commands = [
///     Command::CreatePair { pair, strike: Strike::ZERO },
///     Command::AddLiquidity { pair, strike: Strike::ZERO, spread: Spread::One, liquidity: 1_000 },
/// ];
/// let outcome = BatchExecutor::new(MemorySnapshotSource::new(), BatchConfig::default())
///     .run(&commands)
///     .expect("batch");
/// assert_eq!(outcome.account.tokens().len(), 2);
/// assert_eq!(outcome.transfers.tokens[0].amount, alloy_primitives::U256::from(1_000u32));
/// ```
#[derive(Debug)]
pub struct BatchExecutor<S> {
    source: S,
    config: BatchConfig,
    pairs: BTreeMap<B256, PairData>,
    missing: BTreeSet<(B256, Strike)>,
    account: Account,
}

impl<S: SnapshotSource> BatchExecutor<S> {
    /// Creates an executor reading from `source`.
    #[must_use]
    pub fn new(source: S, config: BatchConfig) -> Self {
        Self {
            source,
            config,
            pairs: BTreeMap::new(),
            missing: BTreeSet::new(),
            account: Account::default(),
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Net deltas of the commands executed so far.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Simulated state of `pair`, if a command has touched it.
    #[must_use]
    pub fn pair_data(&self, pair: &Pair) -> Option<&PairData> {
        self.pairs.get(&pair.id())
    }

    /// Returns the snapshot source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Transfers settling the commands executed so far.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if a padded amount overflows.
    pub fn transfer_requests(&self) -> crate::error::Result<TransferRequests> {
        self.account.transfer_requests(&self.config.slippage())
    }

    // -- Execution ----------------------------------------------------------

    /// Executes `commands` in order and returns the batch result.
    ///
    /// # Errors
    ///
    /// Returns the first error any command raises.
    pub fn run(mut self, commands: &[Command]) -> crate::error::Result<BatchOutcome> {
        for command in commands {
            self.execute(command)?;
        }
        let transfers = self.transfer_requests()?;
        debug!(
            commands = commands.len(),
            pairs = self.pairs.len(),
            tokens = transfers.tokens.len(),
            positions = transfers.positions.len(),
            "batch simulated"
        );
        Ok(BatchOutcome {
            account: self.account,
            transfers,
            pairs: self.pairs,
        })
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidAmount`] for an account swap when the batch
    ///   has paid out nothing of that token.
    /// - Any error of the snapshot source, of snapshot validation, or of
    ///   the engine operation behind the command.
    pub fn execute(&mut self, command: &Command) -> crate::error::Result<()> {
        let block = self.config.block();
        debug!(kind = ?command.kind(), pair = ?command.pair().map(Pair::id), "dispatching command");

        match *command {
            Command::CreatePair { pair, strike } => {
                self.pairs.insert(pair.id(), calculate_initialize(strike)?);
            }
            Command::AddLiquidity {
                pair,
                strike,
                spread,
                liquidity,
            } => {
                let data = self.prepare(&pair, strike)?;
                let outcome = calculate_add_liquidity(&pair, data, block, strike, spread, liquidity)?;
                self.record(&outcome)?;
            }
            Command::RemoveLiquidity {
                pair,
                strike,
                spread,
                balance,
            } => {
                let data = self.prepare(&pair, strike)?;
                let outcome = calculate_remove_liquidity(&pair, data, block, strike, spread, balance)?;
                self.record(&outcome)?;
            }
            Command::BorrowLiquidity {
                pair,
                strike,
                collateral,
                debt,
            } => {
                let data = self.prepare(&pair, strike)?;
                let outcome =
                    calculate_borrow_liquidity(&pair, data, block, strike, &collateral, debt)?;
                self.record(&outcome)?;
            }
            Command::RepayLiquidity {
                pair,
                strike,
                selector_collateral,
                liquidity_growth_last,
                multiplier,
                balance,
            } => {
                let data = self.prepare(&pair, strike)?;
                let outcome = calculate_repay_liquidity(
                    &pair,
                    data,
                    block,
                    strike,
                    selector_collateral,
                    liquidity_growth_last,
                    multiplier,
                    balance,
                )?;
                self.record(&outcome)?;
            }
            Command::Accrue { pair, strike } => {
                let data = self.prepare(&pair, strike)?;
                calculate_accrue(data, block, strike)?;
            }
            Command::Swap { pair, amount } => {
                let amount = self.resolve_swap_amount(&pair, amount)?;
                self.load_pair(&pair)?;
                self.preload_swap(&pair, &amount)?;
                let data = self.pair_mut(&pair)?;
                let outcome = calculate_swap(&pair, data, &amount)?;
                self.account.update_token(&outcome.amount0)?;
                self.account.update_token(&outcome.amount1)?;
            }
            Command::WrapWeth { .. } | Command::UnwrapWeth { .. } => {}
        }
        Ok(())
    }

    fn record(&mut self, outcome: &LiquidityOutcome) -> crate::error::Result<()> {
        self.account.update_token(&outcome.amount0)?;
        self.account.update_token(&outcome.amount1)?;
        self.account.update_position(&outcome.position)
    }

    /// An account swap sells what the batch has paid out of the token.
    fn resolve_swap_amount(&self, pair: &Pair, amount: SwapAmount) -> crate::error::Result<TokenAmount> {
        match amount {
            SwapAmount::Exact(amount) => Ok(amount),
            SwapAmount::Account(selector) => {
                let total = self.account.token_total(&pair.token(selector));
                if !total.amount().is_negative() {
                    return Err(EngineError::InvalidAmount(
                        "account holds no paid-out balance of the swap token",
                    ));
                }
                Ok(TokenAmount::new(total.token(), -total.amount()))
            }
        }
    }

    // -- Lazy loading -------------------------------------------------------

    fn prepare(&mut self, pair: &Pair, strike: Strike) -> crate::error::Result<&mut PairData> {
        self.load_pair(pair)?;
        if !self.load_strike(pair, strike)? {
            self.load_neighbours(pair, strike)?;
        }
        self.pair_mut(pair)
    }

    /// Loads the snapshot strikes bracketing the absent `strike`, so the
    /// entry accrual creates for it links to its real neighbours.
    ///
    /// Starts from the tier cursors when nothing is loaded yet and follows
    /// the links of the nearest loaded strikes until they meet.
    fn load_neighbours(&mut self, pair: &Pair, strike: Strike) -> crate::error::Result<()> {
        let cursors = {
            let data = self.pair_mut(pair)?;
            if !data.is_initialized() || !strike.is_interior() {
                return Ok(());
            }
            (data.strike_count() == 0).then(|| *data.strikes_current())
        };
        for cursor in cursors.into_iter().flatten() {
            self.load_strike(pair, cursor)?;
        }
        loop {
            let Some(link) = self.pair_mut(pair)?.unloaded_link_around(strike) else {
                break;
            };
            if !self.load_strike(pair, link)? {
                return Err(EngineError::InvalidSnapshot(
                    "strike link points at a missing strike",
                ));
            }
        }
        trace!(pair = %pair.id(), %strike, "loaded neighbours of new strike");
        Ok(())
    }

    fn pair_mut(&mut self, pair: &Pair) -> crate::error::Result<&mut PairData> {
        self.pairs
            .get_mut(&pair.id())
            .ok_or(EngineError::SnapshotUnavailable("pair was not loaded"))
    }

    fn load_pair(&mut self, pair: &Pair) -> crate::error::Result<()> {
        let id = pair.id();
        if self.pairs.contains_key(&id) {
            return Ok(());
        }
        let data = self.source.pair(pair)?.to_pair_data()?;
        trace!(pair = %id, initialized = data.is_initialized(), "loaded pair");
        self.pairs.insert(id, data);
        Ok(())
    }

    /// Loads `strike` unless it is already loaded or known to be absent.
    /// Returns `true` if the strike has an entry afterwards.
    fn load_strike(&mut self, pair: &Pair, strike: Strike) -> crate::error::Result<bool> {
        let id = pair.id();
        let data = self
            .pairs
            .get_mut(&id)
            .ok_or(EngineError::SnapshotUnavailable("pair was not loaded"))?;
        if data.contains_strike(strike) {
            return Ok(true);
        }
        if !strike.is_interior() || self.missing.contains(&(id, strike)) {
            return Ok(false);
        }
        match self.source.strike(pair, strike)? {
            Some(raw) => {
                raw.load_into(data, strike)?;
                trace!(pair = %id, %strike, "loaded strike");
                Ok(true)
            }
            None => {
                self.missing.insert((id, strike));
                Ok(false)
            }
        }
    }

    /// Loads the tier cursors and then follows strike links in the swap
    /// direction, up to the configured strike limit.
    fn preload_swap(&mut self, pair: &Pair, amount: &TokenAmount) -> crate::error::Result<()> {
        let zero_to_one = is_zero_to_one(pair, amount)?;
        let (cursors, mut strike) = {
            let data = self.pair_mut(pair)?;
            data.ensure_initialized()?;
            (*data.strikes_current(), start_strike(data, zero_to_one)?)
        };
        for cursor in cursors {
            self.load_strike(pair, cursor)?;
        }

        for _ in 0..self.config.swap_strike_limit() {
            let next = self.pair_mut(pair)?.next_strike(strike, zero_to_one);
            if !next.is_interior() || !self.load_strike(pair, next)? {
                break;
            }
            strike = next;
        }
        Ok(())
    }
}
