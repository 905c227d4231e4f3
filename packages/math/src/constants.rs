// Constants for the dated VAMM
//
// Grouped by functionality. Fixed-point scales are named after their
// bit width (Q96, Q64) or decimal precision (WAD).

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick. A fixed rate of roughly 1000% (1.0001^69100 ≈ 1000).
pub const MIN_TICK: i32 = -69100;

/// Maximum valid tick. A fixed rate of roughly 0.001%.
pub const MAX_TICK: i32 = 69100;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.96 format)
// ============================================================

/// sqrt(1.0001^MIN_TICK) * 2^96
pub const MIN_SQRT_RATIO: u128 = 2_503_036_416_286_949_174_936_592_462;

/// sqrt(1.0001^MAX_TICK) * 2^96
pub const MAX_SQRT_RATIO: u128 = 2_507_794_810_551_837_817_144_115_957_740;

// ============================================================
// FIXED-POINT SCALES
// ============================================================

/// 2^96, unit of the sqrt price representation
pub const Q96: u128 = 1u128 << 96;

/// 2^64, unit of the per-liquidity tracker growths
pub const Q64: u128 = 1u128 << 64;

/// 1e18
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// ln(2) in WAD
pub const LN2_WAD: i128 = 693_147_180_559_945_309;

/// Prices are quoted in percent; divide by this to get a WAD fraction.
pub const PERCENT_SCALE: u128 = 100;

// ============================================================
// TIME CONSTANTS
// ============================================================

pub const SECONDS_PER_DAY: u64 = 86_400;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ============================================================
// SWAP CONSTANTS
// ============================================================

/// Upper bound on swap loop iterations (one per initialized tick crossed)
pub const MAX_SWAP_ITERATIONS: u32 = 1024;

/// Upper bound on spacing-sized steps when searching for the next
/// initialized tick. Reaching it yields an intermediate boundary.
pub const MAX_TICK_SEARCH_STEPS: u32 = 256;

// ============================================================
// ORACLE CONSTANTS
// ============================================================

/// Upper bound on the observation ring buffer capacity
pub const MAX_OBSERVATION_CARDINALITY: u32 = 65_535;

/// Upper bound on seed observations accepted at VAMM creation
pub const MAX_SEED_OBSERVATIONS: u32 = 1_024;
