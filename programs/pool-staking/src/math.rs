// =============================================================================
// Fixed-Point Reward Math
// =============================================================================
// All per-share reward accounting goes through these helpers so that the
// precision behaviour lives in one place.
//
// - The per-share accumulator is kept scaled by ACC_PRECISION.
// - Position amounts meet the accumulator only through mul_div, which keeps
//   the full 256-bit product and descales in the same step.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::ACC_PRECISION;
use crate::error::StakingError;

const LOW_MASK: u128 = u64::MAX as u128;

/// Scale a raw amount up by ACC_PRECISION
pub fn scale(value: u128) -> Result<u128> {
    value
        .checked_mul(ACC_PRECISION)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// Scale a fixed-point amount back down, rounding toward zero
pub fn descale(value: u128) -> u128 {
    value / ACC_PRECISION
}

/// Compute floor(a * b / c) without overflowing on the intermediate product
///
/// # Errors
/// * `DivisionByZero` when `c == 0`
/// * `MathOverflow` when the quotient does not fit in a u128
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    require!(c > 0, StakingError::DivisionByZero);

    let (hi, lo) = full_mul(a, b);
    if hi == 0 {
        return Ok(lo / c);
    }

    // The quotient fits in 128 bits only if the high word is below the divisor
    require!(hi < c, StakingError::MathOverflow);

    Ok(div_wide(hi, lo, c))
}

/// Narrow a descaled amount into token units
pub fn to_token_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(StakingError::MathOverflow))
}

/// 128 x 128 -> 256 bit multiplication, returned as (high, low) words
fn full_mul(a: u128, b: u128) -> (u128, u128) {
    let (a_hi, a_lo) = (a >> 64, a & LOW_MASK);
    let (b_hi, b_lo) = (b >> 64, b & LOW_MASK);

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // Sum of the middle terms, at most three 64-bit values
    let mid = (lo_lo >> 64) + (lo_hi & LOW_MASK) + (hi_lo & LOW_MASK);

    let low = (lo_lo & LOW_MASK) | ((mid & LOW_MASK) << 64);
    let high = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (mid >> 64);

    (high, low)
}

/// Restoring long division of the 256-bit value (hi, lo) by `divisor`.
/// Requires hi < divisor, which keeps the quotient within 128 bits.
fn div_wide(hi: u128, lo: u128, divisor: u128) -> u128 {
    let mut remainder = hi;
    let mut quotient: u128 = 0;

    for bit in (0..128).rev() {
        let carry = remainder >> 127;
        remainder = (remainder << 1) | ((lo >> bit) & 1);
        quotient <<= 1;

        // carry means the shifted remainder is >= 2^128 > divisor
        if carry == 1 || remainder >= divisor {
            remainder = remainder.wrapping_sub(divisor);
            quotient |= 1;
        }
    }

    quotient
}
