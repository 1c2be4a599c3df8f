//! Exact integer and rational arithmetic for ledger calculations.
//!
//! Everything here reproduces the on-chain integer rules: 256-bit values,
//! 512-bit intermediates, Q128 fixed point and explicit rounding.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Fraction`] | reduced rationals for growth, rates and compositions |
//! | [`mul_div`], [`div_round`] | wide multiply-divide with rounding |
//! | [`get_ratio_at_strike`] | `1.0001^strike` as an exact ratio |
//! | [`get_amounts`] and friends | liquidity to token amount conversions |
//! | [`balance_to_liquidity`] and friends | position share conversions |
//! | [`compute_swap_step`] | one strike of a swap |

mod balance;
mod fraction;
mod liquidity_math;
mod rounding;
mod strike_math;
mod swap_step;
pub(crate) mod wide;

pub use balance::{balance_to_liquidity, debt_balance_to_liquidity, liquidity_to_balance};
pub use fraction::Fraction;
pub use liquidity_math::{
    get_amount0, get_amount0_composition, get_amount1, get_amount1_composition, get_amounts,
    get_liquidity_for_amount0, get_liquidity_for_amount1, scale_liquidity_down, scale_liquidity_up,
};
pub use rounding::div_round;
pub use strike_math::{get_ratio_at_strike, ratio_x128_at_strike};
pub use swap_step::{compute_swap_step, SwapStep};
pub use wide::mul_div;
