use soroban_sdk::contracttype;

/// One slot of the observation ring buffer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Observation {
    pub timestamp: u64,
    /// Tick in effect over the interval ending at `timestamp`
    pub tick: i32,
    /// Tick integrated over time since the first observation
    pub tick_cumulative: i64,
    pub initialized: bool,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            timestamp: 0,
            tick: 0,
            tick_cumulative: 0,
            initialized: false,
        }
    }
}

/// Cursor and capacity of the ring buffer
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OracleState {
    /// Slot holding the newest observation
    pub index: u32,
    /// Slots currently in use
    pub cardinality: u32,
    /// Capacity the buffer grows into on the next wrap
    pub cardinality_next: u32,
}

/// Outcome of an append attempt
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObservationWrite {
    Recorded,
    Throttled,
}

/// Direction of the order a TWAP is adjusted for
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TwapDirection {
    Zero = 0,
    Long = 1,
    Short = 2,
}

/// Spread and price-impact coefficients (all WAD)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjustmentParams {
    pub spread: u128,
    pub phi: u128,
    pub beta: u128,
}
