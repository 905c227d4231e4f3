#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, testutils::Ledger, vec, Address, Env};
use ratevamm_tick::tick_spacing_to_max_liquidity_per_tick;
use ratevamm_vamm::{
    DatedIrsVamm, DatedIrsVammClient, MarketConfig, VammImmutableConfig, VammMutableConfig,
};

// Test constants
pub const T0: u64 = 1_700_000_000;
pub const DAY: u64 = 86_400;
pub const WEEK: u64 = 7 * DAY;
pub const WAD: u128 = 1_000_000_000_000_000_000;

pub const MARKET_ID: u128 = 1;
pub const MATURITY: u64 = T0 + 365 * DAY;
pub const TICK_SPACING: i32 = 60;

pub const INITIAL_TICK: i32 = -16096;
pub const INITIAL_SQRT_PRICE_X96: u128 = 35_430_465_601_290_701_888_012_765_807; // ~5%
pub const MIN_TICK_ALLOWED: i32 = -69100;
pub const MAX_TICK_ALLOWED: i32 = 69100;

pub const MAKER_LOWER: i32 = -19500;
pub const MAKER_UPPER: i32 = -11040;
pub const MAKER_BASE: i128 = 10_000_000_000;
pub const MAKER_LIQUIDITY: i128 = 50_351_905_911;

pub const MAKER: u128 = 1;
pub const TAKER: u128 = 2;

pub fn default_market() -> MarketConfig {
    MarketConfig {
        market_id: MARKET_ID,
        positions_per_account_limit: 3,
        twap_lookback_window: WEEK,
        liquidity_index: WAD,
    }
}

pub fn default_immutable() -> VammImmutableConfig {
    VammImmutableConfig {
        market_id: MARKET_ID,
        maturity_timestamp: MATURITY,
        tick_spacing: TICK_SPACING,
        max_liquidity_per_tick: tick_spacing_to_max_liquidity_per_tick(TICK_SPACING).unwrap(),
    }
}

pub fn default_mutable() -> VammMutableConfig {
    VammMutableConfig {
        price_impact_phi: 0,
        price_impact_beta: 0,
        spread: 0,
        min_secs_between_observations: 3_600,
        min_tick_allowed: MIN_TICK_ALLOWED,
        max_tick_allowed: MAX_TICK_ALLOWED,
        inactive_window_pre_maturity: DAY,
    }
}

/// Register and initialize the contract with the default market, no VAMM yet
pub fn setup_contract(env: &Env) -> (DatedIrsVammClient<'_>, Address, Address) {
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();
    env.ledger().set_timestamp(T0);

    let admin = Address::generate(env);
    let product = Address::generate(env);

    let contract_id = env.register(DatedIrsVamm, ());
    let client = DatedIrsVammClient::new(env, &contract_id);

    client.initialize(&admin, &product);
    client.configure_market(&default_market());

    (client, admin, product)
}

/// Setup with a VAMM seeded at `INITIAL_TICK` over the last day
pub fn setup_vamm(env: &Env) -> (DatedIrsVammClient<'_>, Address, Address) {
    setup_custom_vamm(env, default_immutable(), default_mutable())
}

pub fn setup_custom_vamm(
    env: &Env,
    immutable: VammImmutableConfig,
    mutable: VammMutableConfig,
) -> (DatedIrsVammClient<'_>, Address, Address) {
    let (client, admin, product) = setup_contract(env);

    client.create_vamm(
        &INITIAL_SQRT_PRICE_X96,
        &vec![env, T0 - DAY, T0],
        &vec![env, INITIAL_TICK, INITIAL_TICK],
        &immutable,
        &mutable,
    );

    (client, admin, product)
}

/// Setup with the standard maker range in place and room for 100 observations
pub fn setup_with_maker(env: &Env) -> (DatedIrsVammClient<'_>, Address, Address) {
    let (client, admin, product) = setup_vamm(env);

    client.execute_maker_order(&MARKET_ID, &MATURITY, &MAKER, &MAKER_BASE, &MAKER_LOWER, &MAKER_UPPER);
    client.increase_obs_cardinality_next(&MARKET_ID, &MATURITY, &100);

    (client, admin, product)
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}

/// One taker trade per day starting the day after `first_day - 1`
pub fn trade_daily(env: &Env, client: &DatedIrsVammClient, first_day: u64, days: u64, base: i128) {
    for day in first_day..first_day + days {
        set_time(env, T0 + day * DAY);
        client.execute_taker_order(&MARKET_ID, &MATURITY, &TAKER, &base, &None);
    }
}
