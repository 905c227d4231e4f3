// SPDX-License-Identifier: MIT
// Tick -> fixed rate conversions
//
// The VAMM quotes the fixed rate in percent as 1 / 1.0001^tick, so a higher
// tick means a lower rate.

use soroban_sdk::Env;
use crate::constants::{PERCENT_SCALE, Q96, WAD};
use crate::error::VammError;
use crate::q96::mul_div;
use crate::sqrt_price::get_sqrt_ratio_at_tick;

/// Fixed rate in percent (WAD) for a Q64.96 sqrt price
pub fn get_price_from_sqrt_price(env: &Env, sqrt_price_x96: u128) -> Result<u128, VammError> {
    let price_x96 = mul_div(env, sqrt_price_x96, sqrt_price_x96, Q96)?;
    mul_div(env, WAD, Q96, price_x96)
}

/// Fixed rate in percent (WAD) at a tick, e.g. 5e18 for 5%
pub fn get_price_from_tick(env: &Env, tick: i32) -> Result<u128, VammError> {
    get_price_from_sqrt_price(env, get_sqrt_ratio_at_tick(env, tick)?)
}

/// Fixed rate as a WAD fraction at a tick, e.g. 0.05e18 for 5%
pub fn get_rate_from_tick(env: &Env, tick: i32) -> Result<u128, VammError> {
    Ok(get_price_from_tick(env, tick)? / PERCENT_SCALE)
}

/// Fixed rate as a WAD fraction for a Q64.96 sqrt price
pub fn get_rate_from_sqrt_price(env: &Env, sqrt_price_x96: u128) -> Result<u128, VammError> {
    Ok(get_price_from_sqrt_price(env, sqrt_price_x96)? / PERCENT_SCALE)
}
