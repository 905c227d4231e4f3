use soroban_sdk::{Env, Map};
use ratevamm_math::{
    add_delta, compute_swap_step, constants::{MAX_SWAP_ITERATIONS, Q64},
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, mul_div_signed, u128_to_i128, VammError,
};
use ratevamm_tick::{cross_tick, find_next_initialized_tick, TickInfo};

use crate::quote::compute_step_quote;
use crate::types::{QuoteContext, SwapParams, SwapResult, SwapState, SwapStop};

// ============================================================
// PUBLIC SWAP FUNCTIONS
// ============================================================

/// Execute a taker swap with callbacks for storage access.
///
/// Crossed tick entries are staged and only handed to `write_tick` once the
/// loop has settled, and `state` is only replaced on success, so an error
/// leaves both untouched.
pub fn engine_swap<F1, F2>(
    env: &Env,
    state: &mut SwapState,
    read_tick: F1,
    write_tick: F2,
    params: &SwapParams,
    quote: &QuoteContext,
) -> Result<SwapResult, VammError>
where
    F1: Fn(&Env, i32) -> TickInfo,
    F2: Fn(&Env, i32, &TickInfo),
{
    let mut working = state.clone();
    let mut crossed: Map<i32, TickInfo> = Map::new(env);

    let result = engine_swap_internal(env, &mut working, &read_tick, &mut crossed, params, quote)?;

    for (tick, info) in crossed.iter() {
        write_tick(env, tick, &info);
    }
    *state = working;

    Ok(result)
}

/// Quote a swap without executing (read-only simulation)
///
/// # Returns
/// The swap result and the state the VAMM would end in
pub fn quote_swap<F>(
    env: &Env,
    state: &SwapState,
    read_tick: F,
    params: &SwapParams,
    quote: &QuoteContext,
) -> Result<(SwapResult, SwapState), VammError>
where
    F: Fn(&Env, i32) -> TickInfo,
{
    let mut sim_state = state.clone();
    let mut crossed: Map<i32, TickInfo> = Map::new(env);

    let result = engine_swap_internal(env, &mut sim_state, &read_tick, &mut crossed, params, quote)?;
    Ok((result, sim_state))
}

/// Default price limit for a trade direction: the allowed tick bound.
pub fn default_price_limit(env: &Env, state: &SwapState, base_amount: i128) -> Result<u128, VammError> {
    let bound = if base_amount > 0 { state.min_tick } else { state.max_tick };
    get_sqrt_ratio_at_tick(env, bound)
}

// ============================================================
// INTERNAL SWAP LOGIC
// ============================================================

fn validate_swap(env: &Env, state: &SwapState, params: &SwapParams) -> Result<(), VammError> {
    if params.base_amount == 0 {
        return Err(VammError::ZeroAmount);
    }

    let limit = params.sqrt_price_limit_x96;
    let valid_limit = if params.base_amount > 0 {
        limit < state.sqrt_price_x96 && limit >= get_sqrt_ratio_at_tick(env, state.min_tick)?
    } else {
        limit > state.sqrt_price_x96 && limit <= get_sqrt_ratio_at_tick(env, state.max_tick)?
    };
    if !valid_limit {
        return Err(VammError::InvalidPriceLimit);
    }
    Ok(())
}

/// Bounded loop over tick steps. Settles when the amount is exhausted, the
/// price limit or tick bound is reached, or the iteration cap is hit.
///
/// Regions without active liquidity are traversed at no cost. A swap that
/// never meets liquidity before it settles fails with `InsufficientLiquidity`.
fn engine_swap_internal<F>(
    env: &Env,
    state: &mut SwapState,
    read_tick: &F,
    crossed: &mut Map<i32, TickInfo>,
    params: &SwapParams,
    quote: &QuoteContext,
) -> Result<SwapResult, VammError>
where
    F: Fn(&Env, i32) -> TickInfo,
{
    validate_swap(env, state, params)?;

    let price_down = params.base_amount > 0;
    let limit = params.sqrt_price_limit_x96;
    let bound_tick = if price_down { state.min_tick } else { state.max_tick };
    let bound_sqrt = get_sqrt_ratio_at_tick(env, bound_tick)?;

    let mut amount_remaining = params.base_amount.unsigned_abs();
    let mut executed: u128 = 0;
    let mut quote_total: i128 = 0;
    let mut ticks_crossed: u32 = 0;
    let mut stop = SwapStop::IterationLimit;
    let mut met_liquidity = state.liquidity > 0;

    for _ in 0..MAX_SWAP_ITERATIONS {
        if amount_remaining == 0 {
            stop = SwapStop::AmountExhausted;
            break;
        }
        if state.sqrt_price_x96 == limit {
            stop = if limit == bound_sqrt {
                SwapStop::TickBoundReached
            } else {
                SwapStop::PriceLimitReached
            };
            break;
        }

        let (next_tick, initialized) = find_next_initialized_tick(
            env,
            read_tick,
            state.current_tick,
            state.tick_spacing,
            price_down,
            state.min_tick,
            state.max_tick,
        )?;
        let sqrt_next_tick = get_sqrt_ratio_at_tick(env, next_tick)?;

        let sqrt_target = if price_down {
            sqrt_next_tick.max(limit)
        } else {
            sqrt_next_tick.min(limit)
        };

        let step = compute_swap_step(
            env,
            state.sqrt_price_x96,
            sqrt_target,
            state.liquidity,
            amount_remaining,
        )?;

        if step.amount > 0 {
            let amount = u128_to_i128(step.amount)?;
            let taker_base = if price_down { amount } else { -amount };
            let taker_quote = compute_step_quote(
                env,
                taker_base,
                state.sqrt_price_x96,
                step.sqrt_price_next_x96,
                quote,
            )?;

            // Makers take the other side, spread per unit of active liquidity
            let growth = &mut state.tracker_growth_global;
            growth.base = growth
                .base
                .wrapping_add(mul_div_signed(env, -taker_base, Q64, state.liquidity)?);
            growth.quote = growth
                .quote
                .wrapping_add(mul_div_signed(env, -taker_quote, Q64, state.liquidity)?);

            amount_remaining -= step.amount;
            executed += step.amount;
            quote_total = quote_total.checked_add(taker_quote).ok_or(VammError::Overflow)?;
        }

        if step.sqrt_price_next_x96 == sqrt_next_tick {
            if next_tick == bound_tick {
                // Parked on the allowed bound; never cross it
                state.current_tick = bound_tick;
            } else {
                if initialized {
                    let mut info = read_tick(env, next_tick);
                    let liquidity_net = cross_tick(&mut info, &state.tracker_growth_global);
                    crossed.set(next_tick, info);

                    let delta = if price_down { -liquidity_net } else { liquidity_net };
                    state.liquidity = add_delta(state.liquidity, delta)?;
                    met_liquidity |= state.liquidity > 0;
                    ticks_crossed += 1;
                }
                state.current_tick = if price_down { next_tick - 1 } else { next_tick };
            }
        } else if step.sqrt_price_next_x96 != state.sqrt_price_x96 {
            state.current_tick = get_tick_at_sqrt_ratio(env, step.sqrt_price_next_x96)?;
        }
        state.sqrt_price_x96 = step.sqrt_price_next_x96;
    }

    if !met_liquidity {
        return Err(VammError::InsufficientLiquidity);
    }

    let executed = u128_to_i128(executed)?;
    Ok(SwapResult {
        executed_base: if price_down { executed } else { -executed },
        executed_quote: quote_total,
        tick: state.current_tick,
        sqrt_price_x96: state.sqrt_price_x96,
        ticks_crossed,
        stop,
    })
}
