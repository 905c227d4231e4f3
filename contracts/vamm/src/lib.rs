#![no_std]

//! # Dated IRS VAMM
//!
//! Concentrated-liquidity virtual AMM pricing an interest rate swap market
//! up to a fixed maturity.
//!
//! ## Responsibilities:
//! 1. Market and per-maturity VAMM configuration (admin)
//! 2. Maker orders: liquidity over tick ranges
//! 3. Taker orders: bounded swap loop over the liquidity ledger
//! 4. Observation buffer and spread / price-impact adjusted TWAP

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use ratevamm_math::{
    constants::{MAX_TICK, MIN_TICK, WAD},
    get_liquidity_delta_for_base, get_rate_from_tick, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio,
};
use ratevamm_oracle::{
    adjust_twap, average_tick, AdjustmentParams, Observation, OracleState, TwapDirection,
};
use ratevamm_position::{check_position_limit, FilledBalances, PositionInfo, UnfilledBases};
use ratevamm_swap::{
    default_price_limit, engine_swap, quote_swap, QuoteContext, SwapParams, SwapResult, SwapState,
};
use ratevamm_tick::{tick_spacing_to_max_liquidity_per_tick, TickInfo};

mod events;
mod ledger;
mod storage;
mod types;

pub use ratevamm_math::VammError;
pub use ratevamm_swap::SwapStop;
pub use types::*;

use events::*;
use storage::*;

// ============================================================
// CONSTANTS
// ============================================================

/// Largest tick spacing accepted at creation
const MAX_TICK_SPACING: i32 = 16_384;

// ============================================================
// CONTRACT
// ============================================================

#[contract]
pub struct DatedIrsVamm;

#[contractimpl]
impl DatedIrsVamm {
    // ========================================================
    // ADMIN FUNCTIONS
    // ========================================================

    /// Initialize the contract roles
    pub fn initialize(env: Env, admin: Address, product: Address) -> Result<(), VammError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(VammError::AlreadyInitialized);
        }

        write_config(
            &env,
            &ContractConfig {
                admin: admin.clone(),
                product: product.clone(),
            },
        );
        set_initialized(&env);

        emit_initialized(&env, &admin, &product);
        Ok(())
    }

    /// Hand the configurator role to `new_admin`
    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), VammError> {
        let mut config = Self::require_admin(&env)?;
        let old_admin = config.admin.clone();

        config.admin = new_admin.clone();
        write_config(&env, &config);

        emit_admin_set(&env, &old_admin, &new_admin);
        Ok(())
    }

    /// Create or update a market's configuration
    pub fn configure_market(env: Env, config: MarketConfig) -> Result<(), VammError> {
        Self::require_admin(&env)?;

        if config.positions_per_account_limit == 0 || config.liquidity_index == 0 {
            return Err(VammError::InvalidConfig);
        }

        write_market_config(&env, &config);
        emit_market_configured(
            &env,
            config.market_id,
            config.positions_per_account_limit,
            config.twap_lookback_window,
        );
        Ok(())
    }

    /// Create the VAMM for `(immutable.market_id, immutable.maturity_timestamp)`
    /// and seed its observation buffer.
    ///
    /// `seed_ticks[i]` is the tick that held over the interval ending at
    /// `seed_times[i]`.
    pub fn create_vamm(
        env: Env,
        initial_sqrt_price_x96: u128,
        seed_times: Vec<u64>,
        seed_ticks: Vec<i32>,
        immutable: VammImmutableConfig,
        mutable: VammMutableConfig,
    ) -> Result<(), VammError> {
        Self::require_admin(&env)?;
        read_market_config(&env, immutable.market_id)?;

        let id = VammId::new(immutable.market_id, immutable.maturity_timestamp);
        if has_vamm(&env, id) {
            return Err(VammError::VammAlreadyExists);
        }

        Self::validate_immutable_config(&env, &immutable)?;

        let min_sqrt = get_sqrt_ratio_at_tick(&env, Self::checked_bound(mutable.min_tick_allowed)?)?;
        let max_sqrt = get_sqrt_ratio_at_tick(&env, Self::checked_bound(mutable.max_tick_allowed)?)?;
        if initial_sqrt_price_x96 < min_sqrt || initial_sqrt_price_x96 >= max_sqrt {
            return Err(VammError::InvalidSqrtPrice);
        }
        let tick = get_tick_at_sqrt_ratio(&env, initial_sqrt_price_x96)?;
        Self::validate_mutable_config(&mutable, tick)?;

        let oracle = ratevamm_oracle::initialize(
            &env,
            |e, i, obs| write_observation(e, id, i, obs),
            &seed_times,
            &seed_ticks,
        )?;

        let state = VammState {
            sqrt_price_x96: initial_sqrt_price_x96,
            tick,
            liquidity: 0,
            tracker_base_growth_global: 0,
            tracker_quote_growth_global: 0,
            oracle,
        };

        write_vamm_immutable(&env, id, &immutable);
        write_vamm_mutable(&env, id, &mutable);
        write_vamm_state(&env, id, &state);

        emit_vamm_created(
            &env,
            id.market_id,
            id.maturity,
            initial_sqrt_price_x96,
            tick,
            seed_times.len(),
        );
        Ok(())
    }

    /// Replace a VAMM's mutable configuration
    pub fn configure_vamm(
        env: Env,
        market_id: u128,
        maturity: u64,
        mutable: VammMutableConfig,
    ) -> Result<(), VammError> {
        Self::require_admin(&env)?;

        let id = VammId::new(market_id, maturity);
        let state = read_vamm_state(&env, id)?;
        Self::validate_mutable_config(&mutable, state.tick)?;

        write_vamm_mutable(&env, id, &mutable);
        emit_vamm_configured(&env, market_id, maturity, mutable.min_tick_allowed, mutable.max_tick_allowed);
        Ok(())
    }

    /// Pre-allocate observation slots. Anyone may pay for the storage.
    pub fn increase_obs_cardinality_next(
        env: Env,
        market_id: u128,
        maturity: u64,
        observation_cardinality_next: u32,
    ) -> Result<(), VammError> {
        let id = VammId::new(market_id, maturity);
        let mut state = read_vamm_state(&env, id)?;
        let old_next = state.oracle.cardinality_next;

        let grown = ratevamm_oracle::grow(
            &env,
            |e, i, obs| write_observation(e, id, i, obs),
            &mut state.oracle,
            observation_cardinality_next,
        )?;

        if grown {
            write_vamm_state(&env, id, &state);
            emit_observation_cardinality_next(&env, market_id, maturity, old_next, observation_cardinality_next);
        }
        Ok(())
    }

    // ========================================================
    // ORDER FUNCTIONS
    // ========================================================

    /// Add (positive base) or remove (negative base) maker liquidity over
    /// `[tick_lower, tick_upper)`. Returns the liquidity delta applied.
    pub fn execute_maker_order(
        env: Env,
        market_id: u128,
        maturity: u64,
        account_id: u128,
        base_amount: i128,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<i128, VammError> {
        Self::require_product(&env)?;

        let id = VammId::new(market_id, maturity);
        let market = read_market_config(&env, market_id)?;
        let immutable = read_vamm_immutable(&env, id)?;
        let mutable = read_vamm_mutable(&env, id)?;
        let mut state = read_vamm_state(&env, id)?;

        let now = env.ledger().timestamp();
        if now.saturating_add(mutable.inactive_window_pre_maturity) >= maturity {
            return Err(VammError::CloseToMaturity);
        }
        if base_amount == 0 {
            return Err(VammError::ZeroAmount);
        }

        let range = TickRange { tick_lower, tick_upper };
        ratevamm_tick::validate_tick_range(
            tick_lower,
            tick_upper,
            immutable.tick_spacing,
            mutable.min_tick_allowed,
            mutable.max_tick_allowed,
        )?;

        let mut ranges = read_account_ranges(&env, id, account_id);
        let is_new_range = !has_position(&env, id, account_id, &range);
        check_position_limit(ranges.len(), market.positions_per_account_limit, is_new_range)?;

        let liquidity_delta = get_liquidity_delta_for_base(
            &env,
            get_sqrt_ratio_at_tick(&env, tick_lower)?,
            get_sqrt_ratio_at_tick(&env, tick_upper)?,
            base_amount,
        )?;
        if liquidity_delta == 0 {
            return Err(VammError::InvalidLiquidityAmount);
        }

        ledger::update_position(
            &env,
            id,
            &mut state,
            &immutable,
            &mutable,
            account_id,
            &range,
            liquidity_delta,
        )?;

        if is_new_range {
            ranges.push_back(range);
            write_account_ranges(&env, id, account_id, &ranges);
        }
        write_vamm_state(&env, id, &state);

        emit_maker_order(&env, market_id, maturity, account_id, tick_lower, tick_upper, liquidity_delta);
        Ok(liquidity_delta)
    }

    /// Execute a taker order. Positive base goes long variable and pushes
    /// the price down; negative base pushes it up. Partial fills are normal.
    pub fn execute_taker_order(
        env: Env,
        market_id: u128,
        maturity: u64,
        account_id: u128,
        base_amount: i128,
        sqrt_price_limit_x96: Option<u128>,
    ) -> Result<SwapResult, VammError> {
        Self::require_product(&env)?;

        let id = VammId::new(market_id, maturity);
        let market = read_market_config(&env, market_id)?;
        let immutable = read_vamm_immutable(&env, id)?;
        let mutable = read_vamm_mutable(&env, id)?;
        let mut state = read_vamm_state(&env, id)?;

        let now = env.ledger().timestamp();
        if now >= maturity {
            return Err(VammError::MaturityReached);
        }

        let mut swap_state = Self::swap_state(&state, &immutable, &mutable);
        let params = SwapParams {
            base_amount,
            sqrt_price_limit_x96: match sqrt_price_limit_x96 {
                Some(limit) => limit,
                None => default_price_limit(&env, &swap_state, base_amount)?,
            },
        };
        let quote = QuoteContext {
            liquidity_index_wad: market.liquidity_index,
            seconds_to_maturity: maturity - now,
        };

        let tick_before = state.tick;
        let result = engine_swap(
            &env,
            &mut swap_state,
            |e, t| read_tick_info(e, id, t),
            |e, t, info| write_tick_info(e, id, t, info),
            &params,
            &quote,
        )?;

        // The tick that held up to now is what the oracle integrates
        if swap_state.current_tick != tick_before {
            ratevamm_oracle::write(
                &env,
                |e, i| read_observation(e, id, i),
                |e, i, obs| write_observation(e, id, i, obs),
                &mut state.oracle,
                now,
                tick_before,
                mutable.min_secs_between_observations,
            )?;
        }

        state.sqrt_price_x96 = swap_state.sqrt_price_x96;
        state.tick = swap_state.current_tick;
        state.liquidity = swap_state.liquidity;
        state.tracker_base_growth_global = swap_state.tracker_growth_global.base;
        state.tracker_quote_growth_global = swap_state.tracker_growth_global.quote;
        write_vamm_state(&env, id, &state);

        let mut balances = read_taker_balances(&env, id, account_id);
        balances.base = balances.base.checked_add(result.executed_base).ok_or(VammError::Overflow)?;
        balances.quote = balances.quote.checked_add(result.executed_quote).ok_or(VammError::Overflow)?;
        write_taker_balances(&env, id, account_id, &balances);

        emit_taker_order(&env, market_id, maturity, account_id, &result);
        Ok(result)
    }

    /// Simulate a taker order without touching state
    pub fn preview_taker_order(
        env: Env,
        market_id: u128,
        maturity: u64,
        base_amount: i128,
        sqrt_price_limit_x96: Option<u128>,
    ) -> Result<SwapResult, VammError> {
        let id = VammId::new(market_id, maturity);
        let market = read_market_config(&env, market_id)?;
        let immutable = read_vamm_immutable(&env, id)?;
        let mutable = read_vamm_mutable(&env, id)?;
        let state = read_vamm_state(&env, id)?;

        let now = env.ledger().timestamp();
        if now >= maturity {
            return Err(VammError::MaturityReached);
        }

        let swap_state = Self::swap_state(&state, &immutable, &mutable);
        let params = SwapParams {
            base_amount,
            sqrt_price_limit_x96: match sqrt_price_limit_x96 {
                Some(limit) => limit,
                None => default_price_limit(&env, &swap_state, base_amount)?,
            },
        };
        let quote = QuoteContext {
            liquidity_index_wad: market.liquidity_index,
            seconds_to_maturity: maturity - now,
        };

        let (result, _) = quote_swap(&env, &swap_state, |e, t| read_tick_info(e, id, t), &params, &quote)?;
        Ok(result)
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_config(env: Env) -> Result<ContractConfig, VammError> {
        read_config(&env)
    }

    pub fn get_market_config(env: Env, market_id: u128) -> Result<MarketConfig, VammError> {
        read_market_config(&env, market_id)
    }

    pub fn get_vamm_config(env: Env, market_id: u128, maturity: u64) -> Result<VammConfig, VammError> {
        let id = VammId::new(market_id, maturity);
        Ok(VammConfig {
            immutable: read_vamm_immutable(&env, id)?,
            mutable: read_vamm_mutable(&env, id)?,
        })
    }

    pub fn get_vamm_state(env: Env, market_id: u128, maturity: u64) -> Result<VammState, VammError> {
        read_vamm_state(&env, VammId::new(market_id, maturity))
    }

    pub fn get_vamm_tick(env: Env, market_id: u128, maturity: u64) -> Result<i32, VammError> {
        Ok(read_vamm_state(&env, VammId::new(market_id, maturity))?.tick)
    }

    /// Time-weighted mean tick over the last `lookback` seconds
    pub fn get_average_tick(
        env: Env,
        market_id: u128,
        maturity: u64,
        lookback: u64,
    ) -> Result<i32, VammError> {
        let id = VammId::new(market_id, maturity);
        let state = read_vamm_state(&env, id)?;
        Self::average_tick_for(&env, id, &state.oracle, state.tick, lookback)
    }

    /// TWAP fixed rate (WAD fraction) over the market lookback window,
    /// adjusted for spread and price impact of an order of
    /// `order_size_wad` base units in `direction`.
    pub fn get_adjusted_twap(
        env: Env,
        market_id: u128,
        maturity: u64,
        direction: TwapDirection,
        order_size_wad: u128,
    ) -> Result<u128, VammError> {
        let id = VammId::new(market_id, maturity);
        let market = read_market_config(&env, market_id)?;
        let mutable = read_vamm_mutable(&env, id)?;
        let state = read_vamm_state(&env, id)?;

        let mean_tick =
            Self::average_tick_for(&env, id, &state.oracle, state.tick, market.twap_lookback_window)?;
        let twap = get_rate_from_tick(&env, mean_tick)?;

        adjust_twap(
            &env,
            twap,
            direction,
            order_size_wad,
            &AdjustmentParams {
                spread: mutable.spread,
                phi: mutable.price_impact_phi,
                beta: mutable.price_impact_beta,
            },
        )
    }

    pub fn get_tick_info(env: Env, market_id: u128, maturity: u64, tick: i32) -> TickInfo {
        read_tick_info(&env, VammId::new(market_id, maturity), tick)
    }

    pub fn get_net_liquidity_at(env: Env, market_id: u128, maturity: u64, tick: i32) -> i128 {
        ledger::net_liquidity_at(&env, VammId::new(market_id, maturity), tick)
    }

    pub fn get_observation(env: Env, market_id: u128, maturity: u64, index: u32) -> Observation {
        read_observation(&env, VammId::new(market_id, maturity), index)
    }

    pub fn get_position(
        env: Env,
        market_id: u128,
        maturity: u64,
        account_id: u128,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<PositionInfo, VammError> {
        let id = VammId::new(market_id, maturity);
        let state = read_vamm_state(&env, id)?;
        ledger::position_info(&env, id, &state, account_id, &TickRange { tick_lower, tick_upper })
    }

    pub fn get_account_ranges(env: Env, market_id: u128, maturity: u64, account_id: u128) -> Vec<TickRange> {
        read_account_ranges(&env, VammId::new(market_id, maturity), account_id)
    }

    /// Base and quote filled so far for an account, maker and taker sides combined
    pub fn get_account_filled_balances(
        env: Env,
        market_id: u128,
        maturity: u64,
        account_id: u128,
    ) -> Result<FilledBalances, VammError> {
        let id = VammId::new(market_id, maturity);
        let state = read_vamm_state(&env, id)?;
        ledger::account_filled_balances(&env, id, &state, account_id)
    }

    pub fn get_account_unfilled_bases(
        env: Env,
        market_id: u128,
        maturity: u64,
        account_id: u128,
    ) -> Result<UnfilledBases, VammError> {
        let id = VammId::new(market_id, maturity);
        let state = read_vamm_state(&env, id)?;
        ledger::account_unfilled_bases(&env, id, &state, account_id)
    }

    // ========================================================
    // INTERNAL HELPERS
    // ========================================================

    fn require_admin(env: &Env) -> Result<ContractConfig, VammError> {
        let config = read_config(env)?;
        config.admin.require_auth();
        Ok(config)
    }

    fn require_product(env: &Env) -> Result<ContractConfig, VammError> {
        let config = read_config(env)?;
        config.product.require_auth();
        Ok(config)
    }

    fn checked_bound(tick: i32) -> Result<i32, VammError> {
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            return Err(VammError::OutOfBoundsTick);
        }
        Ok(tick)
    }

    fn validate_immutable_config(env: &Env, config: &VammImmutableConfig) -> Result<(), VammError> {
        if config.tick_spacing <= 0 || config.tick_spacing > MAX_TICK_SPACING {
            return Err(VammError::InvalidTickSpacing);
        }
        if config.maturity_timestamp <= env.ledger().timestamp() {
            return Err(VammError::MaturityReached);
        }
        let max_per_tick = tick_spacing_to_max_liquidity_per_tick(config.tick_spacing)?;
        if config.max_liquidity_per_tick == 0 || config.max_liquidity_per_tick > max_per_tick {
            return Err(VammError::InvalidConfig);
        }
        Ok(())
    }

    fn validate_mutable_config(config: &VammMutableConfig, current_tick: i32) -> Result<(), VammError> {
        Self::checked_bound(config.min_tick_allowed)?;
        Self::checked_bound(config.max_tick_allowed)?;
        if config.min_tick_allowed >= config.max_tick_allowed {
            return Err(VammError::InvalidConfig);
        }
        if current_tick < config.min_tick_allowed || current_tick > config.max_tick_allowed {
            return Err(VammError::InvalidConfig);
        }
        if config.spread >= WAD {
            return Err(VammError::InvalidConfig);
        }
        Ok(())
    }

    fn swap_state(
        state: &VammState,
        immutable: &VammImmutableConfig,
        mutable: &VammMutableConfig,
    ) -> SwapState {
        SwapState {
            sqrt_price_x96: state.sqrt_price_x96,
            current_tick: state.tick,
            liquidity: state.liquidity,
            tick_spacing: immutable.tick_spacing,
            min_tick: mutable.min_tick_allowed,
            max_tick: mutable.max_tick_allowed,
            tracker_growth_global: ledger::tracker_growth_global(state),
        }
    }

    fn average_tick_for(
        env: &Env,
        id: VammId,
        oracle: &OracleState,
        current_tick: i32,
        lookback: u64,
    ) -> Result<i32, VammError> {
        average_tick(
            env,
            |e, i| read_observation(e, id, i),
            oracle,
            env.ledger().timestamp(),
            lookback,
            current_tick,
        )
    }
}
