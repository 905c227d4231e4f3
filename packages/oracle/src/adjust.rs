// Spread and price-impact adjustment of a TWAP

use soroban_sdk::Env;
use ratevamm_math::{mul_wad, pow_wad, VammError, WAD};
use crate::types::{AdjustmentParams, TwapDirection};

/// Price impact for an order: phi * size^beta (WAD)
pub fn compute_price_impact(
    env: &Env,
    params: &AdjustmentParams,
    order_size_wad: u128,
) -> Result<u128, VammError> {
    if params.phi == 0 || order_size_wad == 0 {
        return Ok(0);
    }
    let weight = pow_wad(order_size_wad, params.beta)?;
    mul_wad(env, params.phi, weight)
}

/// Apply spread and price impact to `twap` in the order's direction.
///
/// Long orders pay `twap * (1 + spread + impact)`, short orders receive
/// `twap * (1 - spread - impact)`. The zero direction returns `twap`.
pub fn adjust_twap(
    env: &Env,
    twap: u128,
    direction: TwapDirection,
    order_size_wad: u128,
    params: &AdjustmentParams,
) -> Result<u128, VammError> {
    if direction == TwapDirection::Zero {
        return Ok(twap);
    }

    let delta = params
        .spread
        .checked_add(compute_price_impact(env, params, order_size_wad)?)
        .ok_or(VammError::Overflow)?;

    match direction {
        TwapDirection::Long => mul_wad(env, twap, WAD.checked_add(delta).ok_or(VammError::Overflow)?),
        TwapDirection::Short => {
            if delta >= WAD {
                return Err(VammError::TwapNotAdjustable);
            }
            mul_wad(env, twap, WAD - delta)
        }
        TwapDirection::Zero => Ok(twap),
    }
}
