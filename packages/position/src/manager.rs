// Position Management Logic

use soroban_sdk::Env;
use ratevamm_math::{add_delta, mul_div_signed, VammError, Q64};
use ratevamm_tick::TrackerGrowth;
use crate::types::Position;

/// Balances owed to `liquidity` for a change in inside growth:
/// liquidity * delta / 2^64, truncated toward zero
pub fn balances_for_growth_delta(
    env: &Env,
    liquidity: u128,
    delta: &TrackerGrowth,
) -> Result<(i128, i128), VammError> {
    if liquidity == 0 {
        return Ok((0, 0));
    }
    let base = mul_div_signed(env, delta.base, liquidity, Q64)?;
    let quote = mul_div_signed(env, delta.quote, liquidity, Q64)?;
    Ok((base, quote))
}

/// Accrue filled balances up to the given inside growth and move the
/// checkpoints forward.
pub fn update_position(
    env: &Env,
    pos: &mut Position,
    inside: &TrackerGrowth,
) -> Result<(), VammError> {
    let last = TrackerGrowth::new(
        pos.base_growth_inside_last,
        pos.quote_growth_inside_last,
    );
    let (base, quote) = balances_for_growth_delta(env, pos.liquidity, &inside.wrapping_sub(&last))?;

    pos.base_balance = pos.base_balance.checked_add(base).ok_or(VammError::Overflow)?;
    pos.quote_balance = pos.quote_balance.checked_add(quote).ok_or(VammError::Overflow)?;

    pos.base_growth_inside_last = inside.base;
    pos.quote_growth_inside_last = inside.quote;
    Ok(())
}

/// Accrue, then apply a liquidity delta.
pub fn modify_position(
    env: &Env,
    pos: &mut Position,
    liquidity_delta: i128,
    inside: &TrackerGrowth,
) -> Result<(), VammError> {
    update_position(env, pos, inside)?;

    pos.liquidity = add_delta(pos.liquidity, liquidity_delta).map_err(|err| match err {
        VammError::InvalidLiquidityAmount => VammError::InsufficientPositionLiquidity,
        other => other,
    })?;
    Ok(())
}

/// Enforce the per-account cap on distinct maker ranges
pub fn check_position_limit(
    existing_ranges: u32,
    limit: u32,
    is_new_range: bool,
) -> Result<(), VammError> {
    if is_new_range && existing_ranges >= limit {
        return Err(VammError::PositionLimitExceeded);
    }
    Ok(())
}
