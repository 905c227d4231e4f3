// Quote owed for a swap step

use soroban_sdk::Env;
use ratevamm_math::{
    get_rate_from_sqrt_price, mul_div, mul_div_signed, mul_wad, VammError, SECONDS_PER_YEAR, WAD,
};
use crate::types::QuoteContext;

/// Taker quote for `taker_base` filled while the price moved from
/// `sqrt_price_start` to `sqrt_price_end`:
/// -base * index * (1 + avgRate * secondsToMaturity / year)
pub fn compute_step_quote(
    env: &Env,
    taker_base: i128,
    sqrt_price_start: u128,
    sqrt_price_end: u128,
    ctx: &QuoteContext,
) -> Result<i128, VammError> {
    if taker_base == 0 {
        return Ok(0);
    }

    let rate_start = get_rate_from_sqrt_price(env, sqrt_price_start)?;
    let rate_end = get_rate_from_sqrt_price(env, sqrt_price_end)?;
    let average_rate = rate_start / 2 + rate_end / 2;

    let time_factor = mul_div(
        env,
        average_rate,
        ctx.seconds_to_maturity as u128,
        SECONDS_PER_YEAR as u128,
    )?;
    let multiplier = mul_wad(env, ctx.liquidity_index_wad, WAD + time_factor)?;

    Ok(-mul_div_signed(env, taker_base, multiplier, WAD)?)
}
