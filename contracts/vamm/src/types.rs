// VAMM contract types

use soroban_sdk::{contracttype, Address};
use ratevamm_oracle::OracleState;

/// Contract-wide roles
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractConfig {
    /// Privileged configurator
    pub admin: Address,
    /// Only caller allowed to submit maker and taker orders
    pub product: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketConfig {
    pub market_id: u128,
    pub positions_per_account_limit: u32,
    /// Lookback used by `get_adjusted_twap` (seconds)
    pub twap_lookback_window: u64,
    /// Rate oracle index (WAD) used to price quote
    pub liquidity_index: u128,
}

/// Parameters fixed when a VAMM is created
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VammImmutableConfig {
    pub market_id: u128,
    pub maturity_timestamp: u64,
    pub tick_spacing: i32,
    pub max_liquidity_per_tick: u128,
}

/// Parameters the configurator may change after creation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VammMutableConfig {
    /// Price impact magnitude (WAD)
    pub price_impact_phi: u128,
    /// Price impact exponent (WAD)
    pub price_impact_beta: u128,
    /// Fixed spread (WAD)
    pub spread: u128,
    pub min_secs_between_observations: u64,
    pub min_tick_allowed: i32,
    pub max_tick_allowed: i32,
    /// Makers are locked out this long before maturity
    pub inactive_window_pre_maturity: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VammConfig {
    pub immutable: VammImmutableConfig,
    pub mutable: VammMutableConfig,
}

/// Mutable state of one (market, maturity) VAMM
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VammState {
    pub sqrt_price_x96: u128,
    pub tick: i32,
    /// Active liquidity at the current tick
    pub liquidity: u128,
    pub tracker_base_growth_global: i128,
    pub tracker_quote_growth_global: i128,
    pub oracle: OracleState,
}

/// A maker range owned by an account
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickRange {
    pub tick_lower: i32,
    pub tick_upper: i32,
}
