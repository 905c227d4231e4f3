#![no_std]

//! Observation buffer, time-weighted average tick and the spread /
//! price-impact adjustor layered on top of it.

pub mod types;
pub mod observations;
pub mod adjust;

pub use types::{AdjustmentParams, Observation, ObservationWrite, OracleState, TwapDirection};
pub use observations::{average_tick, grow, initialize, observe_single, transform, write};
pub use adjust::{adjust_twap, compute_price_impact};
