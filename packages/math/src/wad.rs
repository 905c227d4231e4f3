// SPDX-License-Identifier: MIT
// WAD (1e18) fixed-point helpers: mul/div, ln, exp and pow
//
// ln is computed through log2 by repeated squaring of the mantissa,
// exp through range reduction by ln(2) and a Taylor series.

use soroban_sdk::Env;
use crate::constants::{LN2_WAD, WAD};
use crate::error::VammError;
use crate::q96::mul_div;

const WAD_I: i128 = WAD as i128;

/// e^x * WAD stops fitting in u128 just above x = 47.27
const MAX_EXP_INPUT: i128 = 47 * WAD_I;

/// e^x * WAD rounds to zero below x = -42
const MIN_EXP_INPUT: i128 = -42 * WAD_I;

const MAX_TAYLOR_TERMS: i128 = 40;

#[inline]
pub fn mul_wad(env: &Env, a: u128, b: u128) -> Result<u128, VammError> {
    mul_div(env, a, b, WAD)
}

#[inline]
pub fn div_wad(env: &Env, a: u128, b: u128) -> Result<u128, VammError> {
    mul_div(env, a, WAD, b)
}

/// log2(x) for a WAD input, as a signed WAD
pub fn log2_wad(x: u128) -> Result<i128, VammError> {
    if x == 0 {
        return Err(VammError::MathDomain);
    }

    // log2(x) = -log2(1/x) for x < 1
    let (negative, x) = if x >= WAD {
        (false, x)
    } else {
        (true, (WAD * WAD) / x)
    };

    let integer_part = 127 - (x / WAD).leading_zeros();
    let mut result = integer_part as i128 * WAD_I;

    // mantissa in [1, 2)
    let mut y = x >> integer_part;
    let mut delta = WAD_I / 2;
    while delta > 0 && y != WAD {
        y = y * y / WAD;
        if y >= 2 * WAD {
            result += delta;
            y >>= 1;
        }
        delta >>= 1;
    }

    Ok(if negative { -result } else { result })
}

/// ln(x) for a WAD input, as a signed WAD
pub fn ln_wad(x: u128) -> Result<i128, VammError> {
    let log2 = log2_wad(x)?;
    log2.checked_mul(LN2_WAD)
        .map(|v| v / WAD_I)
        .ok_or(VammError::Overflow)
}

/// e^x for a signed WAD input
pub fn exp_wad(x: i128) -> Result<u128, VammError> {
    if x < MIN_EXP_INPUT {
        return Ok(0);
    }
    if x > MAX_EXP_INPUT {
        return Err(VammError::Overflow);
    }

    // x = k * ln2 + r, |r| < ln2
    let k = x / LN2_WAD;
    let r = x - k * LN2_WAD;

    let mut sum = WAD_I;
    let mut term = WAD_I;
    let mut i = 1;
    while i <= MAX_TAYLOR_TERMS {
        term = term * r / (i * WAD_I);
        if term == 0 {
            break;
        }
        sum += term;
        i += 1;
    }

    let sum = sum as u128;
    if k >= 0 {
        let shift = k as u32;
        if sum.leading_zeros() <= shift {
            return Err(VammError::Overflow);
        }
        Ok(sum << shift)
    } else {
        Ok(sum >> k.unsigned_abs())
    }
}

/// x^y for WAD inputs, computed as e^(y * ln x)
pub fn pow_wad(x: u128, y: u128) -> Result<u128, VammError> {
    if y == 0 || x == WAD {
        return Ok(WAD);
    }
    if x == 0 {
        return Ok(0);
    }

    let exponent = i128::try_from(y).map_err(|_| VammError::Overflow)?;
    let product = ln_wad(x)?
        .checked_mul(exponent)
        .ok_or(VammError::Overflow)?;
    exp_wad(product / WAD_I)
}
