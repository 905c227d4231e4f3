// Tick Types

use soroban_sdk::contracttype;

/// Liquidity ledger entry kept for every referenced tick
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick (bounded by max liquidity per tick)
    pub liquidity_gross: u128,
    /// Net liquidity change when crossing left-to-right
    pub liquidity_net: i128,
    /// Maker base growth per unit of liquidity on the other side of this tick (Q64.64)
    pub tracker_base_growth_outside: i128,
    /// Maker quote growth per unit of liquidity on the other side of this tick (Q64.64)
    pub tracker_quote_growth_outside: i128,
    /// Whether any position currently references this tick
    pub initialized: bool,
}

impl Default for TickInfo {
    fn default() -> Self {
        Self {
            liquidity_gross: 0,
            liquidity_net: 0,
            tracker_base_growth_outside: 0,
            tracker_quote_growth_outside: 0,
            initialized: false,
        }
    }
}

/// Pair of base/quote tracker growths, either global or inside a range.
/// Values wrap; only differences are meaningful.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrackerGrowth {
    pub base: i128,
    pub quote: i128,
}

impl TrackerGrowth {
    pub fn new(base: i128, quote: i128) -> Self {
        Self { base, quote }
    }

    #[inline]
    pub fn wrapping_sub(&self, other: &TrackerGrowth) -> TrackerGrowth {
        TrackerGrowth {
            base: self.base.wrapping_sub(other.base),
            quote: self.quote.wrapping_sub(other.quote),
        }
    }
}
