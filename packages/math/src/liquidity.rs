// SPDX-License-Identifier: MIT
// Base / liquidity conversions

use soroban_sdk::Env;
use crate::constants::Q96;
use crate::error::VammError;
use crate::q96::{mul_div, mul_div_rounding_up};

/// Base amount spanned by `liquidity` between two sqrt prices:
/// L * |sqrtB - sqrtA| / 2^96
pub fn get_amount_base_delta(
    env: &Env,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, VammError> {
    let delta = sqrt_price_a.abs_diff(sqrt_price_b);
    if delta == 0 || liquidity == 0 {
        return Ok(0);
    }

    if round_up {
        mul_div_rounding_up(env, liquidity, delta, Q96)
    } else {
        mul_div(env, liquidity, delta, Q96)
    }
}

/// Liquidity that spreads `base` evenly (in sqrt price) across a range:
/// base * 2^96 / (sqrtUpper - sqrtLower)
pub fn get_liquidity_for_base(
    env: &Env,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    base: u128,
) -> Result<u128, VammError> {
    if sqrt_price_lower >= sqrt_price_upper {
        return Err(VammError::InvalidRange);
    }
    mul_div(env, base, Q96, sqrt_price_upper - sqrt_price_lower)
}

/// Signed variant: a negative base yields a negative liquidity delta.
pub fn get_liquidity_delta_for_base(
    env: &Env,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    base: i128,
) -> Result<i128, VammError> {
    let liquidity = get_liquidity_for_base(env, sqrt_price_lower, sqrt_price_upper, base.unsigned_abs())?;
    let liquidity = i128::try_from(liquidity).map_err(|_| VammError::LiquidityOverflow)?;
    Ok(if base < 0 { -liquidity } else { liquidity })
}

/// Apply a signed liquidity delta to an unsigned liquidity value
#[inline]
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, VammError> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(VammError::InvalidLiquidityAmount)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(VammError::LiquidityOverflow)
    }
}

/// Base still available on each side of `sqrt_price_current` for a range.
///
/// Returns `(below, above)`: base that would be released if the price moved
/// down to the lower bound, and base that could be absorbed if it moved up to
/// the upper bound.
pub fn get_base_split_for_liquidity(
    env: &Env,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    sqrt_price_current: u128,
    liquidity: u128,
) -> Result<(u128, u128), VammError> {
    let clamped = sqrt_price_current.clamp(sqrt_price_lower, sqrt_price_upper);
    let below = get_amount_base_delta(env, sqrt_price_lower, clamped, liquidity, false)?;
    let above = get_amount_base_delta(env, clamped, sqrt_price_upper, liquidity, false)?;
    Ok((below, above))
}
