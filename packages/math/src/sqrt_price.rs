// SPDX-License-Identifier: MIT
// Tick <-> sqrt price codec and single-step swap math (Q64.96)

use soroban_sdk::{Env, U256};
use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, Q96};
use crate::error::VammError;
use crate::liquidity::get_amount_base_delta;
use crate::q96::{mul_div, mul_div_rounding_up};

/// sqrt(1.0001^-(2^i)) * 2^128 for i = 1..=16. Bit 0 is handled separately.
const RATIO_MULTIPLIERS: [(u32, u128); 16] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x09aa508b5b7a84e1c677de54f3e99bc9),
];

const RATIO_BIT_0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// Convert tick to sqrt price in Q64.96 format
/// Formula: sqrt(1.0001^tick) * 2^96, rounded up
pub fn get_sqrt_ratio_at_tick(env: &Env, tick: i32) -> Result<u128, VammError> {
    if !is_valid_tick(tick) {
        return Err(VammError::OutOfBoundsTick);
    }

    let abs_tick = tick.unsigned_abs();

    // Q128.128 accumulator
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from_u128(env, RATIO_BIT_0)
    } else {
        U256::from_u32(env, 1).shl(128)
    };

    for (bit, multiplier) in RATIO_MULTIPLIERS.iter() {
        if abs_tick & bit != 0 {
            ratio = ratio.mul(&U256::from_u128(env, *multiplier)).shr(128);
        }
    }

    if tick > 0 {
        let max = U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX);
        ratio = max.div(&ratio);
    }

    // Q128.128 -> Q64.96, rounding up so the codec inverts cleanly
    let remainder = ratio.rem_euclid(&U256::from_u32(env, 1).shl(32));
    let shifted = ratio.shr(32).to_u128().ok_or(VammError::Overflow)?;
    if remainder == U256::from_u32(env, 0) {
        Ok(shifted)
    } else {
        shifted.checked_add(1).ok_or(VammError::Overflow)
    }
}

/// Greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x96`.
pub fn get_tick_at_sqrt_ratio(env: &Env, sqrt_price_x96: u128) -> Result<i32, VammError> {
    if !(MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        return Err(VammError::InvalidSqrtPrice);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(env, mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}

/// Check if a tick is within the codec domain
#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Next sqrt price after `amount_in` of base enters the pool (price moves up).
pub fn get_next_sqrt_price_from_base_in(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u128,
) -> Result<u128, VammError> {
    if amount_in == 0 {
        return Ok(sqrt_price);
    }
    if liquidity == 0 {
        return Err(VammError::InsufficientLiquidity);
    }

    let quotient = mul_div(env, amount_in, Q96, liquidity)?;
    sqrt_price.checked_add(quotient).ok_or(VammError::Overflow)
}

/// Next sqrt price after `amount_out` of base leaves the pool (price moves down).
pub fn get_next_sqrt_price_from_base_out(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount_out: u128,
) -> Result<u128, VammError> {
    if amount_out == 0 {
        return Ok(sqrt_price);
    }
    if liquidity == 0 {
        return Err(VammError::InsufficientLiquidity);
    }

    let quotient = mul_div_rounding_up(env, amount_out, Q96, liquidity)?;

    if sqrt_price <= quotient {
        return Err(VammError::InsufficientLiquidity);
    }
    Ok(sqrt_price - quotient)
}

/// Outcome of a single swap step inside one liquidity band
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapStep {
    pub sqrt_price_next_x96: u128,
    /// Base moved by the step (always non-negative)
    pub amount: u128,
}

/// Compute a swap step from `sqrt_price_current` toward `sqrt_price_target`.
///
/// Moving up consumes base as exact input, rounding the amount needed to
/// reach the target up. Moving down releases base as exact output, rounding
/// it down. When the remainder does not reach the target the whole remainder
/// is consumed.
pub fn compute_swap_step(
    env: &Env,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_remaining: u128,
) -> Result<SwapStep, VammError> {
    let price_up = sqrt_price_target > sqrt_price_current;

    let amount_to_target =
        get_amount_base_delta(env, sqrt_price_current, sqrt_price_target, liquidity, price_up)?;

    if amount_remaining >= amount_to_target {
        return Ok(SwapStep {
            sqrt_price_next_x96: sqrt_price_target,
            amount: amount_to_target,
        });
    }

    // Rounding may land one unit past the target; never overshoot it.
    let sqrt_price_next_x96 = if price_up {
        get_next_sqrt_price_from_base_in(env, sqrt_price_current, liquidity, amount_remaining)?
            .min(sqrt_price_target)
    } else {
        get_next_sqrt_price_from_base_out(env, sqrt_price_current, liquidity, amount_remaining)?
            .max(sqrt_price_target)
    };

    Ok(SwapStep {
        sqrt_price_next_x96,
        amount: amount_remaining,
    })
}
