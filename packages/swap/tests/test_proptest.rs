// Property-based tests for the swap loop
// Run with: cargo test -p ratevamm-swap --test test_proptest

use core::cell::RefCell;

use proptest::prelude::*;
use ratevamm_math::{get_sqrt_ratio_at_tick, WAD};
use ratevamm_swap::*;
use ratevamm_tick::{TickInfo, TrackerGrowth};
use soroban_sdk::{Env, Map};

const LIQUIDITY: u128 = 50_351_905_911;

fn setup(env: &Env) -> (SwapState, RefCell<Map<i32, TickInfo>>) {
    let mut ticks = Map::new(env);
    for (tick, net) in [(-19500, LIQUIDITY as i128), (-11040, -(LIQUIDITY as i128))] {
        ticks.set(
            tick,
            TickInfo {
                liquidity_gross: LIQUIDITY,
                liquidity_net: net,
                initialized: true,
                ..TickInfo::default()
            },
        );
    }

    let state = SwapState {
        sqrt_price_x96: get_sqrt_ratio_at_tick(env, -16096).unwrap(),
        current_tick: -16096,
        liquidity: LIQUIDITY,
        tick_spacing: 60,
        min_tick: -69100,
        max_tick: 69100,
        tracker_growth_global: TrackerGrowth::default(),
    };
    (state, RefCell::new(ticks))
}

fn swap(env: &Env, state: &mut SwapState, ticks: &RefCell<Map<i32, TickInfo>>, base: i128) -> SwapResult {
    let params = SwapParams {
        base_amount: base,
        sqrt_price_limit_x96: default_price_limit(env, state, base).unwrap(),
    };
    let quote = QuoteContext {
        liquidity_index_wad: WAD,
        seconds_to_maturity: 86_400 * 90,
    };
    engine_swap(
        env,
        state,
        |_, t| ticks.borrow().get(t).unwrap_or_default(),
        |_, t, info| ticks.borrow_mut().set(t, info.clone()),
        &params,
        &quote,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the taker never gets more than asked, in the asked direction
    #[test]
    fn prop_executed_bounded_by_request(base in -20_000_000_000i128..20_000_000_000i128) {
        prop_assume!(base != 0);
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (mut state, ticks) = setup(&env);

        let result = swap(&env, &mut state, &ticks, base);

        prop_assert!(result.executed_base.unsigned_abs() <= base.unsigned_abs());
        prop_assert_eq!(result.executed_base.signum(), base.signum());
        // Quote always flows against base
        prop_assert!(result.executed_quote.signum() == -base.signum());
    }

    /// Property: price moves in the trade direction and the tick matches it
    #[test]
    fn prop_price_direction_and_tick(base in -5_000_000_000i128..5_000_000_000i128) {
        prop_assume!(base.unsigned_abs() > 1_000);
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (mut state, ticks) = setup(&env);
        let start = state.sqrt_price_x96;

        swap(&env, &mut state, &ticks, base);

        if base > 0 {
            prop_assert!(state.sqrt_price_x96 < start);
        } else {
            prop_assert!(state.sqrt_price_x96 > start);
        }
        prop_assert!(get_sqrt_ratio_at_tick(&env, state.current_tick).unwrap() <= state.sqrt_price_x96);
        prop_assert!(get_sqrt_ratio_at_tick(&env, state.current_tick + 1).unwrap() >= state.sqrt_price_x96);
    }

    /// Property: trades that fit inside the band fill completely
    #[test]
    fn prop_small_trades_fill(base in -3_000_000_000i128..3_000_000_000i128) {
        prop_assume!(base != 0);
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let (mut state, ticks) = setup(&env);

        let result = swap(&env, &mut state, &ticks, base);
        prop_assert_eq!(result.executed_base, base);
        prop_assert_eq!(result.stop, SwapStop::AmountExhausted);
        prop_assert_eq!(state.liquidity, LIQUIDITY);
    }
}
