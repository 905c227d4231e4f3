use soroban_sdk::contracttype;
use ratevamm_tick::TrackerGrowth;

/// Why the swap loop settled
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapStop {
    AmountExhausted,
    PriceLimitReached,
    TickBoundReached,
    IterationLimit,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapResult {
    /// Base filled for the taker, signed like the request
    pub executed_base: i128,
    /// Quote owed to (+) or by (-) the taker
    pub executed_quote: i128,
    pub tick: i32,
    pub sqrt_price_x96: u128,
    pub ticks_crossed: u32,
    pub stop: SwapStop,
}

/// VAMM state the swap loop reads and advances
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapState {
    pub sqrt_price_x96: u128,
    pub current_tick: i32,
    pub liquidity: u128,
    pub tick_spacing: i32,
    pub min_tick: i32,
    pub max_tick: i32,
    pub tracker_growth_global: TrackerGrowth,
}

/// A taker request. Positive base moves the price down (taker goes long
/// variable), negative base moves it up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapParams {
    pub base_amount: i128,
    pub sqrt_price_limit_x96: u128,
}

/// Inputs for turning filled base into quote
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuoteContext {
    pub liquidity_index_wad: u128,
    pub seconds_to_maturity: u64,
}
