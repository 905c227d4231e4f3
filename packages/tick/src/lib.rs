#![no_std]

pub mod types;
pub mod update;
pub mod tracker_growth;

pub use types::{TickInfo, TrackerGrowth};
pub use update::{
    cross_tick, find_next_initialized_tick, tick_spacing_to_max_liquidity_per_tick,
    update_tick, validate_tick_range,
};
pub use tracker_growth::get_tracker_growth_inside;

// Re-export from math
pub use ratevamm_math::{is_valid_tick, snap_tick_to_spacing};
