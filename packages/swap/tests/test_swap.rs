use core::cell::RefCell;

use ratevamm_math::{get_sqrt_ratio_at_tick, VammError, Q64, SECONDS_PER_YEAR, WAD};
use ratevamm_swap::*;
use ratevamm_tick::{TickInfo, TrackerGrowth};
use soroban_sdk::{Env, Map};

const LIQUIDITY: u128 = 50_351_905_911;
const LOWER: i32 = -19500;
const UPPER: i32 = -11040;
const START_TICK: i32 = -16096;
const TRADE: i128 = 100_000_000;

fn tick_store(env: &Env) -> RefCell<Map<i32, TickInfo>> {
    let mut ticks = Map::new(env);
    ticks.set(
        LOWER,
        TickInfo {
            liquidity_gross: LIQUIDITY,
            liquidity_net: LIQUIDITY as i128,
            initialized: true,
            ..TickInfo::default()
        },
    );
    ticks.set(
        UPPER,
        TickInfo {
            liquidity_gross: LIQUIDITY,
            liquidity_net: -(LIQUIDITY as i128),
            initialized: true,
            ..TickInfo::default()
        },
    );
    RefCell::new(ticks)
}

fn start_state(env: &Env) -> SwapState {
    SwapState {
        sqrt_price_x96: get_sqrt_ratio_at_tick(env, START_TICK).unwrap(),
        current_tick: START_TICK,
        liquidity: LIQUIDITY,
        tick_spacing: 60,
        min_tick: -69100,
        max_tick: 69100,
        tracker_growth_global: TrackerGrowth::default(),
    }
}

/// Unit liquidity index, no time to maturity: quote mirrors base
fn flat_quote() -> QuoteContext {
    QuoteContext {
        liquidity_index_wad: WAD,
        seconds_to_maturity: 0,
    }
}

fn params(env: &Env, state: &SwapState, base_amount: i128) -> SwapParams {
    SwapParams {
        base_amount,
        sqrt_price_limit_x96: default_price_limit(env, state, base_amount).unwrap(),
    }
}

fn run(env: &Env, state: &mut SwapState, ticks: &RefCell<Map<i32, TickInfo>>, base: i128) -> Result<SwapResult, VammError> {
    let p = params(env, state, base);
    engine_swap(
        env,
        state,
        |_, t| ticks.borrow().get(t).unwrap_or_default(),
        |_, t, info| ticks.borrow_mut().set(t, info.clone()),
        &p,
        &flat_quote(),
    )
}

// ============================================================
// SINGLE BAND
// ============================================================

#[test]
fn test_long_swap_within_band() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    let start_price = state.sqrt_price_x96;

    let result = run(&env, &mut state, &ticks, TRADE).unwrap();

    assert_eq!(result.executed_base, TRADE);
    assert_eq!(result.executed_quote, -TRADE);
    assert_eq!(result.stop, SwapStop::AmountExhausted);
    assert_eq!(result.ticks_crossed, 0);
    assert!(state.sqrt_price_x96 < start_price);
    assert!(state.current_tick < START_TICK);
    assert_eq!(state.liquidity, LIQUIDITY);

    // Makers took the short side
    let expected = -((TRADE as u128 * Q64 / LIQUIDITY) as i128);
    assert_eq!(state.tracker_growth_global.base, expected);
    assert_eq!(state.tracker_growth_global.quote, -expected);
}

#[test]
fn test_short_swap_within_band() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    let start_price = state.sqrt_price_x96;

    let result = run(&env, &mut state, &ticks, -TRADE).unwrap();

    assert_eq!(result.executed_base, -TRADE);
    assert_eq!(result.executed_quote, TRADE);
    assert!(state.sqrt_price_x96 > start_price);
    assert!(state.current_tick >= START_TICK);
    assert!(state.tracker_growth_global.base > 0);
}

#[test]
fn test_round_trip_returns_near_start() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    let start_price = state.sqrt_price_x96;

    run(&env, &mut state, &ticks, -TRADE).unwrap();
    run(&env, &mut state, &ticks, TRADE).unwrap();

    // Exact-in rounds against the taker on the way up, exact-out on the way down
    assert!(state.sqrt_price_x96 <= start_price);
    assert!(start_price - state.sqrt_price_x96 < 1_000_000);
}

// ============================================================
// CROSSING
// ============================================================

#[test]
fn test_swap_crosses_lower_tick_and_parks() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);

    let result = run(&env, &mut state, &ticks, 100 * TRADE).unwrap();

    assert_eq!(result.stop, SwapStop::TickBoundReached);
    assert_eq!(result.ticks_crossed, 1);
    assert_eq!(result.tick, -69100);
    assert!(result.executed_base < 100 * TRADE);
    assert_eq!(state.liquidity, 0);

    // Crossing flipped the lower tick's outside growth to the global value
    let lower = ticks.borrow().get(LOWER).unwrap();
    assert_eq!(lower.tracker_base_growth_outside, state.tracker_growth_global.base);
    assert_eq!(lower.liquidity_net, LIQUIDITY as i128);
}

#[test]
fn test_swap_crosses_upper_tick() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);

    let result = run(&env, &mut state, &ticks, -100 * TRADE).unwrap();

    assert_eq!(result.stop, SwapStop::TickBoundReached);
    assert_eq!(result.ticks_crossed, 1);
    assert_eq!(result.tick, 69100);
    assert_eq!(state.liquidity, 0);
}

#[test]
fn test_swap_crosses_empty_region_into_band() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    state.sqrt_price_x96 = get_sqrt_ratio_at_tick(&env, -69100).unwrap();
    state.current_tick = -69100;
    state.liquidity = 0;

    let result = run(&env, &mut state, &ticks, -TRADE).unwrap();

    assert_eq!(result.executed_base, -TRADE);
    assert_eq!(result.stop, SwapStop::AmountExhausted);
    assert_eq!(result.ticks_crossed, 1);
    assert_eq!(state.liquidity, LIQUIDITY);
    assert!(state.current_tick >= LOWER && state.current_tick < START_TICK);

    // Growth only accrues once liquidity is met
    let lower = ticks.borrow().get(LOWER).unwrap();
    assert_eq!(lower.tracker_base_growth_outside, 0);
    assert!(state.tracker_growth_global.base > 0);
}

/// Range A [-16980, -11040) holds L1, range B [-19500, -15000) holds L2 = 2 * L1
fn overlapping_store(env: &Env) -> RefCell<Map<i32, TickInfo>> {
    let mut ticks = Map::new(env);
    for (tick, net) in [
        (-19500, 2 * LIQUIDITY as i128),
        (-16980, LIQUIDITY as i128),
        (-15000, -2 * LIQUIDITY as i128),
        (-11040, -(LIQUIDITY as i128)),
    ] {
        ticks.set(
            tick,
            TickInfo {
                liquidity_gross: net.unsigned_abs(),
                liquidity_net: net,
                initialized: true,
                ..TickInfo::default()
            },
        );
    }
    RefCell::new(ticks)
}

fn swap_down_to(env: &Env, state: &mut SwapState, ticks: &RefCell<Map<i32, TickInfo>>, tick: i32) -> SwapResult {
    engine_swap(
        env,
        state,
        |_, t| ticks.borrow().get(t).unwrap_or_default(),
        |_, t, info| ticks.borrow_mut().set(t, info.clone()),
        &SwapParams {
            base_amount: 1_000 * TRADE,
            sqrt_price_limit_x96: get_sqrt_ratio_at_tick(env, tick).unwrap(),
        },
        &flat_quote(),
    )
    .unwrap()
}

#[test]
fn test_swap_crosses_overlapping_ranges() {
    let env = Env::default();
    let ticks = overlapping_store(&env);

    // Inside range A only
    let mut state = start_state(&env);
    state.sqrt_price_x96 = get_sqrt_ratio_at_tick(&env, -14000).unwrap();
    state.current_tick = -14000;
    let mut single = state.clone();

    // Into the overlap: L1 -> L1 + L2
    let first = swap_down_to(&env, &mut state, &ticks, -15500);
    assert_eq!(first.ticks_crossed, 1);
    assert_eq!(state.liquidity, 3 * LIQUIDITY);

    // Out of range A: L1 + L2 -> L2
    let second = swap_down_to(&env, &mut state, &ticks, -17500);
    assert_eq!(second.ticks_crossed, 1);
    assert_eq!(second.stop, SwapStop::PriceLimitReached);
    assert_eq!(state.liquidity, 2 * LIQUIDITY);
    assert_eq!(state.current_tick, -17500);

    // Same path in one swap
    let whole = swap_down_to(&env, &mut single, &overlapping_store(&env), -17500);
    assert_eq!(whole.ticks_crossed, 2);
    assert_eq!(whole.stop, SwapStop::PriceLimitReached);
    assert_eq!(single.liquidity, 2 * LIQUIDITY);
    assert_eq!(single.sqrt_price_x96, state.sqrt_price_x96);
}

#[test]
fn test_swap_stops_at_price_limit() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    let limit = get_sqrt_ratio_at_tick(&env, -17000).unwrap();

    let result = engine_swap(
        &env,
        &mut state,
        |_, t| ticks.borrow().get(t).unwrap_or_default(),
        |_, t, info| ticks.borrow_mut().set(t, info.clone()),
        &SwapParams { base_amount: 100 * TRADE, sqrt_price_limit_x96: limit },
        &flat_quote(),
    )
    .unwrap();

    assert_eq!(result.stop, SwapStop::PriceLimitReached);
    assert_eq!(result.sqrt_price_x96, limit);
    assert_eq!(result.tick, -17000);
}

// ============================================================
// VALIDATION
// ============================================================

#[test]
fn test_swap_rejections_leave_state_untouched() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let mut state = start_state(&env);
    let before = state.clone();

    assert_eq!(run(&env, &mut state, &ticks, 0), Err(VammError::ZeroAmount));

    let above = get_sqrt_ratio_at_tick(&env, -16000).unwrap();
    let result = engine_swap(
        &env,
        &mut state,
        |_, t| ticks.borrow().get(t).unwrap_or_default(),
        |_, t, info| ticks.borrow_mut().set(t, info.clone()),
        &SwapParams { base_amount: TRADE, sqrt_price_limit_x96: above },
        &flat_quote(),
    );
    assert_eq!(result, Err(VammError::InvalidPriceLimit));

    // A dry market: nothing initialized in either direction
    let dry = RefCell::new(Map::new(&env));
    let mut empty = start_state(&env);
    empty.liquidity = 0;
    let empty_before = empty.clone();
    assert_eq!(run(&env, &mut empty, &dry, TRADE), Err(VammError::InsufficientLiquidity));
    assert_eq!(run(&env, &mut empty, &dry, -TRADE), Err(VammError::InsufficientLiquidity));
    assert_eq!(empty, empty_before);

    assert_eq!(state, before);
}

#[test]
fn test_quote_swap_matches_engine() {
    let env = Env::default();
    let ticks = tick_store(&env);
    let state = start_state(&env);
    let p = params(&env, &state, 100 * TRADE);

    let (quoted, end_state) =
        quote_swap(&env, &state, |_, t| ticks.borrow().get(t).unwrap_or_default(), &p, &flat_quote()).unwrap();
    // The simulation never touches the tick store
    assert_eq!(ticks.borrow().get(LOWER).unwrap().tracker_base_growth_outside, 0);

    let mut executed_state = state.clone();
    let executed = run(&env, &mut executed_state, &ticks, 100 * TRADE).unwrap();
    assert_eq!(quoted, executed);
    assert_eq!(end_state, executed_state);
}

// ============================================================
// QUOTE PRICING
// ============================================================

#[test]
fn test_step_quote_scales_with_time_and_index() {
    let env = Env::default();
    let sqrt_price = get_sqrt_ratio_at_tick(&env, START_TICK).unwrap();

    // ~5% fixed rate for a full year, index 1.1
    let ctx = QuoteContext {
        liquidity_index_wad: 1_100_000_000_000_000_000,
        seconds_to_maturity: SECONDS_PER_YEAR,
    };
    let quote = compute_step_quote(&env, 1_000_000, sqrt_price, sqrt_price, &ctx).unwrap();
    // -1e6 * 1.1 * (1 + 0.050004...)
    assert_eq!(quote, -1_155_004);

    assert_eq!(compute_step_quote(&env, 0, sqrt_price, sqrt_price, &ctx).unwrap(), 0);
    assert_eq!(compute_step_quote(&env, -1_000_000, sqrt_price, sqrt_price, &flat_quote()).unwrap(), 1_000_000);
}
