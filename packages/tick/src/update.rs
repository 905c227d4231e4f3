// Tick Update, Crossing and Search Logic

use soroban_sdk::Env;
use ratevamm_math::{
    constants::{MAX_TICK, MAX_TICK_SEARCH_STEPS, MIN_TICK},
    snap_tick_to_spacing, VammError,
};
use crate::types::{TickInfo, TrackerGrowth};

/// Apply a liquidity delta to a tick entry.
///
/// Returns whether the tick flipped between referenced and unreferenced.
/// The entry is modified in place; persisting it is up to the caller.
pub fn update_tick(
    info: &mut TickInfo,
    tick: i32,
    current_tick: i32,
    liquidity_delta: i128,
    global: &TrackerGrowth,
    upper: bool,
    max_liquidity_per_tick: u128,
) -> Result<bool, VammError> {
    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = if liquidity_delta >= 0 {
        liquidity_gross_before
            .checked_add(liquidity_delta as u128)
            .ok_or(VammError::LiquidityOverflow)?
    } else {
        liquidity_gross_before
            .checked_sub(liquidity_delta.unsigned_abs())
            .ok_or(VammError::InvalidLiquidityAmount)?
    };

    if liquidity_gross_after > max_liquidity_per_tick {
        return Err(VammError::LiquidityOverflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 && liquidity_gross_after > 0 {
        // By convention all growth before initialization happened below the tick
        if current_tick >= tick {
            info.tracker_base_growth_outside = global.base;
            info.tracker_quote_growth_outside = global.quote;
        } else {
            info.tracker_base_growth_outside = 0;
            info.tracker_quote_growth_outside = 0;
        }
    }

    info.liquidity_gross = liquidity_gross_after;
    info.liquidity_net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(VammError::LiquidityOverflow)?;
    info.initialized = liquidity_gross_after > 0;

    Ok(flipped)
}

/// Cross a tick boundary during a swap, returning its net liquidity
pub fn cross_tick(info: &mut TickInfo, global: &TrackerGrowth) -> i128 {
    info.tracker_base_growth_outside = global.base.wrapping_sub(info.tracker_base_growth_outside);
    info.tracker_quote_growth_outside = global.quote.wrapping_sub(info.tracker_quote_growth_outside);
    info.liquidity_net
}

/// Find the next initialized tick in the given direction, clamped to
/// `[min_tick, max_tick]`.
///
/// Moving left (`lte`) the search includes the current spaced tick; moving
/// right it starts one spacing above. Returns the boundary and whether an
/// initialized entry sits there. When the search step cap is hit an
/// uninitialized intermediate boundary is returned.
pub fn find_next_initialized_tick(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> TickInfo,
    current_tick: i32,
    tick_spacing: i32,
    lte: bool,
    min_tick: i32,
    max_tick: i32,
) -> Result<(i32, bool), VammError> {
    let snapped = snap_tick_to_spacing(current_tick, tick_spacing)?;
    let step = if lte { -tick_spacing } else { tick_spacing };
    let mut tick = if lte { snapped } else { snapped + tick_spacing };

    for _ in 0..MAX_TICK_SEARCH_STEPS {
        if lte && tick <= min_tick {
            return Ok((min_tick, read_tick(env, min_tick).initialized));
        }
        if !lte && tick >= max_tick {
            return Ok((max_tick, read_tick(env, max_tick).initialized));
        }

        if read_tick(env, tick).initialized {
            return Ok((tick, true));
        }

        tick += step;
    }

    Ok((tick - step, false))
}

/// Validate a maker range against spacing and the allowed tick window
pub fn validate_tick_range(
    tick_lower: i32,
    tick_upper: i32,
    tick_spacing: i32,
    min_tick_allowed: i32,
    max_tick_allowed: i32,
) -> Result<(), VammError> {
    if tick_spacing <= 0 {
        return Err(VammError::InvalidTickSpacing);
    }
    if tick_lower >= tick_upper {
        return Err(VammError::InvalidRange);
    }
    if tick_lower % tick_spacing != 0 || tick_upper % tick_spacing != 0 {
        return Err(VammError::InvalidRange);
    }
    if tick_lower < min_tick_allowed.max(MIN_TICK) || tick_upper > max_tick_allowed.min(MAX_TICK) {
        return Err(VammError::OutOfBoundsTick);
    }
    Ok(())
}

/// Largest per-tick gross liquidity that keeps total liquidity within u128
/// when every spaced tick is referenced.
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> Result<u128, VammError> {
    if tick_spacing <= 0 {
        return Err(VammError::InvalidTickSpacing);
    }
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    Ok(u128::MAX / num_ticks)
}
