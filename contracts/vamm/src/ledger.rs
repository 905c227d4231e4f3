// Liquidity ledger: tick entries, positions and account views

use soroban_sdk::Env;

use ratevamm_math::{add_delta, get_sqrt_ratio_at_tick, VammError};
use ratevamm_position::{
    calculate_filled_balances, calculate_unfilled_bases, modify_position, FilledBalances,
    PositionInfo, UnfilledBases,
};
use ratevamm_tick::{get_tracker_growth_inside, update_tick, validate_tick_range, TrackerGrowth};

use crate::storage::*;
use crate::types::{TickRange, VammImmutableConfig, VammMutableConfig, VammState};

pub fn tracker_growth_global(state: &VammState) -> TrackerGrowth {
    TrackerGrowth::new(state.tracker_base_growth_global, state.tracker_quote_growth_global)
}

fn growth_inside(env: &Env, id: VammId, state: &VammState, range: &TickRange) -> TrackerGrowth {
    get_tracker_growth_inside(
        env,
        |e, t| read_tick_info(e, id, t),
        range.tick_lower,
        range.tick_upper,
        state.tick,
        &tracker_growth_global(state),
    )
}

/// Apply `liquidity_delta` to an account's range.
///
/// Both tick entries and the position are computed before anything is
/// written, so a failure leaves storage untouched. Active liquidity in
/// `state` moves when the range contains the current tick; persisting
/// `state` is up to the caller.
pub fn update_position(
    env: &Env,
    id: VammId,
    state: &mut VammState,
    immutable: &VammImmutableConfig,
    mutable: &VammMutableConfig,
    account_id: u128,
    range: &TickRange,
    liquidity_delta: i128,
) -> Result<(), VammError> {
    validate_tick_range(
        range.tick_lower,
        range.tick_upper,
        immutable.tick_spacing,
        mutable.min_tick_allowed,
        mutable.max_tick_allowed,
    )?;

    let global = tracker_growth_global(state);

    let mut lower_info = read_tick_info(env, id, range.tick_lower);
    let mut upper_info = read_tick_info(env, id, range.tick_upper);
    update_tick(
        &mut lower_info,
        range.tick_lower,
        state.tick,
        liquidity_delta,
        &global,
        false,
        immutable.max_liquidity_per_tick,
    )?;
    update_tick(
        &mut upper_info,
        range.tick_upper,
        state.tick,
        liquidity_delta,
        &global,
        true,
        immutable.max_liquidity_per_tick,
    )?;

    let inside = get_tracker_growth_inside(
        env,
        |_, t| {
            if t == range.tick_lower {
                lower_info.clone()
            } else {
                upper_info.clone()
            }
        },
        range.tick_lower,
        range.tick_upper,
        state.tick,
        &global,
    );

    let mut position = read_position(env, id, account_id, range);
    modify_position(env, &mut position, liquidity_delta, &inside)?;

    if state.tick >= range.tick_lower && state.tick < range.tick_upper {
        state.liquidity = add_delta(state.liquidity, liquidity_delta)?;
    }

    write_tick_info(env, id, range.tick_lower, &lower_info);
    write_tick_info(env, id, range.tick_upper, &upper_info);
    write_position(env, id, account_id, range, &position);

    Ok(())
}

/// Net liquidity applied when the price crosses `tick` left to right
pub fn net_liquidity_at(env: &Env, id: VammId, tick: i32) -> i128 {
    read_tick_info(env, id, tick).liquidity_net
}

pub fn position_info(
    env: &Env,
    id: VammId,
    state: &VammState,
    account_id: u128,
    range: &TickRange,
) -> Result<PositionInfo, VammError> {
    let position = read_position(env, id, account_id, range);
    let filled = calculate_filled_balances(env, &position, &growth_inside(env, id, state, range))?;
    let unfilled = calculate_unfilled_bases(
        env,
        position.liquidity,
        get_sqrt_ratio_at_tick(env, range.tick_lower)?,
        get_sqrt_ratio_at_tick(env, range.tick_upper)?,
        state.sqrt_price_x96,
    )?;

    Ok(PositionInfo {
        tick_lower: range.tick_lower,
        tick_upper: range.tick_upper,
        liquidity: position.liquidity,
        filled_base: filled.base,
        filled_quote: filled.quote,
        unfilled_base_long: unfilled.long,
        unfilled_base_short: unfilled.short,
    })
}

/// Maker fills across every range of the account plus its taker fills
pub fn account_filled_balances(
    env: &Env,
    id: VammId,
    state: &VammState,
    account_id: u128,
) -> Result<FilledBalances, VammError> {
    let mut total = read_taker_balances(env, id, account_id);

    for range in read_account_ranges(env, id, account_id).iter() {
        let position = read_position(env, id, account_id, &range);
        let filled = calculate_filled_balances(env, &position, &growth_inside(env, id, state, &range))?;
        total.base = total.base.checked_add(filled.base).ok_or(VammError::Overflow)?;
        total.quote = total.quote.checked_add(filled.quote).ok_or(VammError::Overflow)?;
    }

    Ok(total)
}

pub fn account_unfilled_bases(
    env: &Env,
    id: VammId,
    state: &VammState,
    account_id: u128,
) -> Result<UnfilledBases, VammError> {
    let mut total = UnfilledBases::default();

    for range in read_account_ranges(env, id, account_id).iter() {
        let info = position_info(env, id, state, account_id, &range)?;
        total.long = total.long.checked_add(info.unfilled_base_long).ok_or(VammError::Overflow)?;
        total.short = total.short.checked_add(info.unfilled_base_short).ok_or(VammError::Overflow)?;
    }

    Ok(total)
}
