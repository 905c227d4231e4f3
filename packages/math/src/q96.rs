// SPDX-License-Identifier: MIT
// Wide multiply-divide helpers backing the Q64.96 and WAD math

use soroban_sdk::{Env, U256};
use crate::error::VammError;

/// Calculates floor(a * b / denominator) with a 256-bit intermediate.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, VammError> {
    if denominator == 0 {
        return Err(VammError::DivisionByZero);
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product
        .div(&U256::from_u128(env, denominator))
        .to_u128()
        .ok_or(VammError::Overflow)
}

/// Calculates ceil(a * b / denominator) with a 256-bit intermediate.
pub fn mul_div_rounding_up(
    env: &Env,
    a: u128,
    b: u128,
    denominator: u128,
) -> Result<u128, VammError> {
    if denominator == 0 {
        return Err(VammError::DivisionByZero);
    }

    let den = U256::from_u128(env, denominator);
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&den);
    let remainder = product.rem_euclid(&den);

    let mut result = quotient.to_u128().ok_or(VammError::Overflow)?;
    if remainder != U256::from_u32(env, 0) {
        result = result.checked_add(1).ok_or(VammError::Overflow)?;
    }
    Ok(result)
}

/// Signed variant of `mul_div`; the quotient truncates toward zero.
pub fn mul_div_signed(env: &Env, a: i128, b: u128, denominator: u128) -> Result<i128, VammError> {
    let magnitude = u128_to_i128(mul_div(env, a.unsigned_abs(), b, denominator)?)?;
    Ok(if a < 0 { -magnitude } else { magnitude })
}

#[inline]
pub fn u128_to_i128(x: u128) -> Result<i128, VammError> {
    i128::try_from(x).map_err(|_| VammError::Overflow)
}

/// Divide with rounding up
#[inline]
pub fn div_round_up(numerator: u128, denominator: u128) -> Result<u128, VammError> {
    if denominator == 0 {
        return Err(VammError::DivisionByZero);
    }
    let result = numerator / denominator;
    if numerator % denominator != 0 {
        Ok(result + 1)
    } else {
        Ok(result)
    }
}
