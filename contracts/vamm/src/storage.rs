// SPDX-License-Identifier: MIT
// VAMM storage module

use soroban_sdk::{contracttype, Env, Vec};

use ratevamm_math::VammError;
use ratevamm_oracle::Observation;
use ratevamm_position::{FilledBalances, Position};
use ratevamm_tick::TickInfo;

use crate::types::{
    ContractConfig, MarketConfig, TickRange, VammImmutableConfig, VammMutableConfig, VammState,
};

// ============================================================
// STORAGE KEYS
// ============================================================

/// All storage keys used in the contract.
/// VAMM-scoped keys lead with (market_id, maturity_timestamp).
#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    Market(u128),
    VammImmutable(u128, u64),
    VammMutable(u128, u64),
    VammState(u128, u64),
    Tick(u128, u64, i32),
    Observation(u128, u64, u32),
    /// (market, maturity, account, tick_lower, tick_upper)
    Position(u128, u64, u128, i32, i32),
    AccountRanges(u128, u64, u128),
    TakerBalances(u128, u64, u128),
}

/// Identifies one VAMM
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VammId {
    pub market_id: u128,
    pub maturity: u64,
}

impl VammId {
    pub fn new(market_id: u128, maturity: u64) -> Self {
        Self { market_id, maturity }
    }
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// About 1 year at 5s per ledger
const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    extend_ttl(env, key);
}

// ============================================================
// INITIALIZATION / CONFIG
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    write(env, &DataKey::Initialized, &true);
}

pub fn write_config(env: &Env, config: &ContractConfig) {
    write(env, &DataKey::Config, config);
}

pub fn read_config(env: &Env) -> Result<ContractConfig, VammError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .ok_or(VammError::NotInitialized)
}

// ============================================================
// MARKETS
// ============================================================

pub fn write_market_config(env: &Env, config: &MarketConfig) {
    write(env, &DataKey::Market(config.market_id), config);
}

pub fn read_market_config(env: &Env, market_id: u128) -> Result<MarketConfig, VammError> {
    env.storage()
        .persistent()
        .get(&DataKey::Market(market_id))
        .ok_or(VammError::MarketNotFound)
}

// ============================================================
// VAMM CONFIG & STATE
// ============================================================

pub fn has_vamm(env: &Env, id: VammId) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::VammState(id.market_id, id.maturity))
}

pub fn write_vamm_immutable(env: &Env, id: VammId, config: &VammImmutableConfig) {
    write(env, &DataKey::VammImmutable(id.market_id, id.maturity), config);
}

pub fn read_vamm_immutable(env: &Env, id: VammId) -> Result<VammImmutableConfig, VammError> {
    env.storage()
        .persistent()
        .get(&DataKey::VammImmutable(id.market_id, id.maturity))
        .ok_or(VammError::VammNotFound)
}

pub fn write_vamm_mutable(env: &Env, id: VammId, config: &VammMutableConfig) {
    write(env, &DataKey::VammMutable(id.market_id, id.maturity), config);
}

pub fn read_vamm_mutable(env: &Env, id: VammId) -> Result<VammMutableConfig, VammError> {
    env.storage()
        .persistent()
        .get(&DataKey::VammMutable(id.market_id, id.maturity))
        .ok_or(VammError::VammNotFound)
}

pub fn write_vamm_state(env: &Env, id: VammId, state: &VammState) {
    write(env, &DataKey::VammState(id.market_id, id.maturity), state);
}

pub fn read_vamm_state(env: &Env, id: VammId) -> Result<VammState, VammError> {
    env.storage()
        .persistent()
        .get(&DataKey::VammState(id.market_id, id.maturity))
        .ok_or(VammError::VammNotFound)
}

// ============================================================
// TICKS
// ============================================================

pub fn read_tick_info(env: &Env, id: VammId, tick: i32) -> TickInfo {
    env.storage()
        .persistent()
        .get(&DataKey::Tick(id.market_id, id.maturity, tick))
        .unwrap_or_default()
}

pub fn write_tick_info(env: &Env, id: VammId, tick: i32, info: &TickInfo) {
    write(env, &DataKey::Tick(id.market_id, id.maturity, tick), info);
}

// ============================================================
// OBSERVATIONS
// ============================================================

pub fn read_observation(env: &Env, id: VammId, index: u32) -> Observation {
    env.storage()
        .persistent()
        .get(&DataKey::Observation(id.market_id, id.maturity, index))
        .unwrap_or_default()
}

pub fn write_observation(env: &Env, id: VammId, index: u32, observation: &Observation) {
    write(env, &DataKey::Observation(id.market_id, id.maturity, index), observation);
}

// ============================================================
// POSITIONS
// ============================================================

fn position_key(id: VammId, account_id: u128, range: &TickRange) -> DataKey {
    DataKey::Position(id.market_id, id.maturity, account_id, range.tick_lower, range.tick_upper)
}

pub fn has_position(env: &Env, id: VammId, account_id: u128, range: &TickRange) -> bool {
    env.storage().persistent().has(&position_key(id, account_id, range))
}

pub fn read_position(env: &Env, id: VammId, account_id: u128, range: &TickRange) -> Position {
    env.storage()
        .persistent()
        .get(&position_key(id, account_id, range))
        .unwrap_or_default()
}

pub fn write_position(env: &Env, id: VammId, account_id: u128, range: &TickRange, position: &Position) {
    write(env, &position_key(id, account_id, range), position);
}

pub fn read_account_ranges(env: &Env, id: VammId, account_id: u128) -> Vec<TickRange> {
    env.storage()
        .persistent()
        .get(&DataKey::AccountRanges(id.market_id, id.maturity, account_id))
        .unwrap_or(Vec::new(env))
}

pub fn write_account_ranges(env: &Env, id: VammId, account_id: u128, ranges: &Vec<TickRange>) {
    write(env, &DataKey::AccountRanges(id.market_id, id.maturity, account_id), ranges);
}

// ============================================================
// TAKER BALANCES
// ============================================================

pub fn read_taker_balances(env: &Env, id: VammId, account_id: u128) -> FilledBalances {
    env.storage()
        .persistent()
        .get(&DataKey::TakerBalances(id.market_id, id.maturity, account_id))
        .unwrap_or_default()
}

pub fn write_taker_balances(env: &Env, id: VammId, account_id: u128, balances: &FilledBalances) {
    write(env, &DataKey::TakerBalances(id.market_id, id.maturity, account_id), balances);
}
