//! Strike to price ratio conversion.
//!
//! `ratio(strike) = 1.0001^strike`, evaluated exactly the way the ledger
//! does it: a 20-step bit decomposition of `|strike|` over precomputed
//! 128-bit factors, a squaring step, and an inversion for positive strikes.

use alloy_primitives::U256;

use super::wide::{narrow, widen};
use super::Fraction;
use crate::constants::{Q128, Q128_WIDE};
use crate::domain::Strike;
use crate::error::EngineError;

/// `sqrt(1/1.0001)^(2^k) * 2^128` for `k = 0..19`.
const RATIO_FACTORS: [u128; 20] = [
    0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001,
    0xfff9_7272_373d_4132_59a4_6990_580e_213a,
    0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc,
    0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0,
    0xffcb_9843_d60f_6159_c9db_5883_5c92_6644,
    0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0,
    0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861,
    0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053,
    0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4,
    0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54,
    0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3,
    0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9,
    0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825,
    0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5,
    0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7,
    0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6,
    0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9,
    0x005d_6af8_dedb_8119_6699_c329_225e_e604,
    0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98,
    0x0000_0000_048a_1703_91f7_dc42_444e_8fa2,
];

/// Price ratio at `strike` as a Q128 value (`ratio * 2^128`).
///
/// # Errors
///
/// Returns [`EngineError::StrikeOutOfRange`] for the sentinel strikes.
pub fn ratio_x128_at_strike(strike: Strike) -> crate::error::Result<U256> {
    let strike = strike.ensure_interior()?;
    let x = strike.get().unsigned_abs();

    let mut ratio = Q128;
    for (bit, factor) in RATIO_FACTORS.iter().enumerate() {
        if x & (1 << bit) != 0 {
            // ratio <= 2^128 and factor < 2^128, so the product fits.
            ratio = ratio
                .checked_mul(U256::from(*factor))
                .ok_or(EngineError::Overflow("strike ratio factor product"))?
                >> 128;
        }
    }

    let squared = widen(ratio) * widen(ratio) / Q128_WIDE;
    let mut ratio = narrow(squared).ok_or(EngineError::Overflow("strike ratio square"))?;
    if ratio.is_zero() {
        return Err(EngineError::StrikeOutOfRange("strike ratio underflows Q128 precision"));
    }

    if strike.get() > 0 {
        ratio = U256::MAX / ratio;
    }
    Ok(ratio)
}

/// Exact price ratio of token1 per token0 at `strike`.
///
/// # Errors
///
/// Returns [`EngineError::StrikeOutOfRange`] for the sentinel strikes.
///
/// # Examples
///
/// ```
/// use dry_powder_engine::domain::Strike;
/// use dry_powder_engine::math::{get_ratio_at_strike, Fraction};
///
/// assert_eq!(get_ratio_at_strike(Strike::ZERO), Ok(Fraction::ONE));
/// ```
pub fn get_ratio_at_strike(strike: Strike) -> crate::error::Result<Fraction> {
    ratio_x128_at_strike(strike).map(Fraction::from_q128)
}
