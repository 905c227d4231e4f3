// Dated VAMM math package

#![no_std]

pub mod constants;
pub mod error;
pub mod liquidity;
pub mod price;
pub mod q96;
pub mod sqrt_price;
pub mod wad;

pub use constants::*;
pub use error::VammError;

pub use q96::{div_round_up, mul_div, mul_div_rounding_up, mul_div_signed, u128_to_i128};

pub use sqrt_price::{
    compute_swap_step,
    get_next_sqrt_price_from_base_in,
    get_next_sqrt_price_from_base_out,
    get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio,
    is_valid_tick,
    SwapStep,
};

pub use liquidity::{
    add_delta,
    get_amount_base_delta,
    get_base_split_for_liquidity,
    get_liquidity_delta_for_base,
    get_liquidity_for_base,
};

pub use price::{
    get_price_from_sqrt_price,
    get_price_from_tick,
    get_rate_from_sqrt_price,
    get_rate_from_tick,
};

pub use wad::{div_wad, exp_wad, ln_wad, log2_wad, mul_wad, pow_wad};

/// Round a tick down to the nearest multiple of `spacing`
pub fn snap_tick_to_spacing(tick: i32, spacing: i32) -> Result<i32, VammError> {
    if spacing <= 0 {
        return Err(VammError::InvalidTickSpacing);
    }
    Ok(tick - tick.rem_euclid(spacing))
}
