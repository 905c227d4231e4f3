use soroban_sdk::contracttype;

/// Maker position over one tick range
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub liquidity: u128,
    pub base_growth_inside_last: i128,
    pub quote_growth_inside_last: i128,
    /// Base filled against takers and accrued so far
    pub base_balance: i128,
    /// Quote filled against takers and accrued so far
    pub quote_balance: i128,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            liquidity: 0,
            base_growth_inside_last: 0,
            quote_growth_inside_last: 0,
            base_balance: 0,
            quote_balance: 0,
        }
    }
}

/// Read-only view of a position, including balances not yet accrued
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub filled_base: i128,
    pub filled_quote: i128,
    pub unfilled_base_long: u128,
    pub unfilled_base_short: u128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilledBalances {
    pub base: i128,
    pub quote: i128,
}

/// Base a maker still offers at the current price.
/// `long` is what long takers (price moving down) can still fill,
/// `short` is what short takers (price moving up) can still fill.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnfilledBases {
    pub long: u128,
    pub short: u128,
}
