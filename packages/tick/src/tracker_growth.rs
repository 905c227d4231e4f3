// Tracker growth accounting across tick boundaries

use soroban_sdk::Env;
use crate::types::{TickInfo, TrackerGrowth};

/// Maker base/quote growth per unit of liquidity accumulated strictly
/// inside `[lower_tick, upper_tick)`.
pub fn get_tracker_growth_inside(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> TickInfo,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    global: &TrackerGrowth,
) -> TrackerGrowth {
    let lower_info = read_tick(env, lower_tick);
    let upper_info = read_tick(env, upper_tick);

    let lower_outside = TrackerGrowth::new(
        lower_info.tracker_base_growth_outside,
        lower_info.tracker_quote_growth_outside,
    );
    let upper_outside = TrackerGrowth::new(
        upper_info.tracker_base_growth_outside,
        upper_info.tracker_quote_growth_outside,
    );

    let below = if current_tick >= lower_tick {
        lower_outside
    } else {
        global.wrapping_sub(&lower_outside)
    };

    let above = if current_tick < upper_tick {
        upper_outside
    } else {
        global.wrapping_sub(&upper_outside)
    };

    global.wrapping_sub(&below).wrapping_sub(&above)
}
