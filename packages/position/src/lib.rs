#![no_std]

pub mod types;
pub mod manager;
pub mod balances;

pub use types::{FilledBalances, Position, PositionInfo, UnfilledBases};
pub use manager::{check_position_limit, modify_position, update_position};
pub use balances::{calculate_filled_balances, calculate_unfilled_bases};
