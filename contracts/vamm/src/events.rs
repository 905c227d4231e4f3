//! VAMM events

use soroban_sdk::{Address, Env, Symbol};
use ratevamm_swap::SwapResult;

/// Emitted when the contract is initialized
pub fn emit_initialized(env: &Env, admin: &Address, product: &Address) {
    env.events().publish(
        (Symbol::new(env, "VammInit"),),
        (admin.clone(), product.clone()),
    );
}

pub fn emit_admin_set(env: &Env, old_admin: &Address, new_admin: &Address) {
    env.events().publish(
        (Symbol::new(env, "AdminSet"),),
        (old_admin.clone(), new_admin.clone()),
    );
}

pub fn emit_market_configured(env: &Env, market_id: u128, positions_limit: u32, lookback: u64) {
    env.events().publish(
        (Symbol::new(env, "MarketCfg"), market_id),
        (positions_limit, lookback),
    );
}

/// Emitted when a VAMM is created and its oracle seeded
pub fn emit_vamm_created(
    env: &Env,
    market_id: u128,
    maturity: u64,
    sqrt_price_x96: u128,
    tick: i32,
    seed_observations: u32,
) {
    env.events().publish(
        (Symbol::new(env, "VammCreated"), market_id, maturity),
        (sqrt_price_x96, tick, seed_observations),
    );
}

pub fn emit_vamm_configured(env: &Env, market_id: u128, maturity: u64, min_tick: i32, max_tick: i32) {
    env.events().publish(
        (Symbol::new(env, "VammCfg"), market_id, maturity),
        (min_tick, max_tick),
    );
}

/// Emitted when a maker order changes liquidity
pub fn emit_maker_order(
    env: &Env,
    market_id: u128,
    maturity: u64,
    account_id: u128,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) {
    env.events().publish(
        (Symbol::new(env, "MakerOrder"), market_id, maturity),
        (account_id, tick_lower, tick_upper, liquidity_delta),
    );
}

/// Emitted when a taker order settles
pub fn emit_taker_order(env: &Env, market_id: u128, maturity: u64, account_id: u128, result: &SwapResult) {
    env.events().publish(
        (Symbol::new(env, "TakerOrder"), market_id, maturity),
        (account_id, result.executed_base, result.executed_quote, result.tick),
    );
}

pub fn emit_observation_cardinality_next(
    env: &Env,
    market_id: u128,
    maturity: u64,
    old_next: u32,
    new_next: u32,
) {
    env.events().publish(
        (Symbol::new(env, "ObsCardNext"), market_id, maturity),
        (old_next, new_next),
    );
}
