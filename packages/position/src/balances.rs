// Filled and unfilled balance views

use soroban_sdk::Env;
use ratevamm_math::{get_base_split_for_liquidity, VammError};
use ratevamm_tick::TrackerGrowth;
use crate::manager::balances_for_growth_delta;
use crate::types::{FilledBalances, Position, UnfilledBases};

/// Filled balances of a position as if it were accrued now
pub fn calculate_filled_balances(
    env: &Env,
    pos: &Position,
    inside: &TrackerGrowth,
) -> Result<FilledBalances, VammError> {
    let last = TrackerGrowth::new(
        pos.base_growth_inside_last,
        pos.quote_growth_inside_last,
    );
    let (base, quote) = balances_for_growth_delta(env, pos.liquidity, &inside.wrapping_sub(&last))?;

    Ok(FilledBalances {
        base: pos.base_balance.checked_add(base).ok_or(VammError::Overflow)?,
        quote: pos.quote_balance.checked_add(quote).ok_or(VammError::Overflow)?,
    })
}

/// Base left in a position's range on each side of the current price
pub fn calculate_unfilled_bases(
    env: &Env,
    liquidity: u128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    sqrt_price_current: u128,
) -> Result<UnfilledBases, VammError> {
    let (below, above) = get_base_split_for_liquidity(
        env,
        sqrt_price_lower,
        sqrt_price_upper,
        sqrt_price_current,
        liquidity,
    )?;
    Ok(UnfilledBases { long: below, short: above })
}
