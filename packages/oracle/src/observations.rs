// Observation ring buffer: seeding, appends, growth and lookups

use soroban_sdk::{Env, Vec};
use ratevamm_math::{
    constants::{MAX_OBSERVATION_CARDINALITY, MAX_SEED_OBSERVATIONS},
    VammError,
};
use crate::types::{Observation, ObservationWrite, OracleState};

/// Extend `last` to `timestamp`, assuming `tick` held since `last.timestamp`.
pub fn transform(last: &Observation, timestamp: u64, tick: i32) -> Result<Observation, VammError> {
    let elapsed = timestamp
        .checked_sub(last.timestamp)
        .ok_or(VammError::InvalidSeedObservations)?;
    let elapsed = i64::try_from(elapsed).map_err(|_| VammError::Overflow)?;

    let tick_cumulative = (tick as i64)
        .checked_mul(elapsed)
        .and_then(|delta| last.tick_cumulative.checked_add(delta))
        .ok_or(VammError::Overflow)?;

    Ok(Observation {
        timestamp,
        tick,
        tick_cumulative,
        initialized: true,
    })
}

/// Seed the buffer with historical observations.
///
/// `ticks[i]` is the tick that held over the interval ending at `times[i]`;
/// the first entry anchors the accumulator at zero. Times must be strictly
/// increasing and not in the future.
pub fn initialize<W>(
    env: &Env,
    write_observation: W,
    times: &Vec<u64>,
    ticks: &Vec<i32>,
) -> Result<OracleState, VammError>
where
    W: Fn(&Env, u32, &Observation),
{
    let len = times.len();
    if len == 0 || len != ticks.len() || len > MAX_SEED_OBSERVATIONS {
        return Err(VammError::InvalidSeedObservations);
    }

    let now = env.ledger().timestamp();
    let mut previous: Option<Observation> = None;

    for (i, (time, tick)) in times.iter().zip(ticks.iter()).enumerate() {
        if time > now {
            return Err(VammError::InvalidSeedObservations);
        }

        let observation = match &previous {
            None => Observation {
                timestamp: time,
                tick,
                tick_cumulative: 0,
                initialized: true,
            },
            Some(prev) => {
                if time <= prev.timestamp {
                    return Err(VammError::InvalidSeedObservations);
                }
                transform(prev, time, tick)?
            }
        };

        write_observation(env, i as u32, &observation);
        previous = Some(observation);
    }

    Ok(OracleState {
        index: len - 1,
        cardinality: len,
        cardinality_next: len,
    })
}

/// Append an observation for `tick` at `timestamp`.
///
/// Throttled (no-op) when less than `min_seconds_between` has passed since
/// the newest observation, and always when the timestamp is not newer.
pub fn write<R, W>(
    env: &Env,
    read_observation: R,
    write_observation: W,
    state: &mut OracleState,
    timestamp: u64,
    tick: i32,
    min_seconds_between: u64,
) -> Result<ObservationWrite, VammError>
where
    R: Fn(&Env, u32) -> Observation,
    W: Fn(&Env, u32, &Observation),
{
    let last = read_observation(env, state.index);

    if timestamp <= last.timestamp || timestamp - last.timestamp < min_seconds_between {
        return Ok(ObservationWrite::Throttled);
    }

    // Grow only when the cursor sits on the last live slot
    let cardinality = if state.cardinality_next > state.cardinality
        && state.index == state.cardinality - 1
    {
        state.cardinality_next
    } else {
        state.cardinality
    };

    let index = (state.index + 1) % cardinality;
    write_observation(env, index, &transform(&last, timestamp, tick)?);

    state.index = index;
    state.cardinality = cardinality;
    Ok(ObservationWrite::Recorded)
}

/// Pre-allocate slots up to `next`. Returns whether capacity changed.
pub fn grow<W>(
    env: &Env,
    write_observation: W,
    state: &mut OracleState,
    next: u32,
) -> Result<bool, VammError>
where
    W: Fn(&Env, u32, &Observation),
{
    if state.cardinality == 0 {
        return Err(VammError::NotInitialized);
    }
    if next > MAX_OBSERVATION_CARDINALITY {
        return Err(VammError::InvalidCardinality);
    }
    if next <= state.cardinality_next {
        return Ok(false);
    }

    // Placeholder slots stay uninitialized so lookups skip them
    let placeholder = Observation {
        timestamp: 1,
        ..Observation::default()
    };
    for i in state.cardinality_next..next {
        write_observation(env, i, &placeholder);
    }

    state.cardinality_next = next;
    Ok(true)
}

/// Cumulative tick at `now - seconds_ago`, interpolating between the
/// bracketing observations and extrapolating past the newest one with
/// `current_tick`.
pub fn observe_single<R>(
    env: &Env,
    read_observation: R,
    state: &OracleState,
    now: u64,
    seconds_ago: u64,
    current_tick: i32,
) -> Result<i64, VammError>
where
    R: Fn(&Env, u32) -> Observation,
{
    if state.cardinality == 0 {
        return Err(VammError::NotInitialized);
    }

    let target = now
        .checked_sub(seconds_ago)
        .ok_or(VammError::InsufficientObservationHistory)?;

    let newest = read_observation(env, state.index);
    if target >= newest.timestamp {
        if target == newest.timestamp {
            return Ok(newest.tick_cumulative);
        }
        return Ok(transform(&newest, target, current_tick)?.tick_cumulative);
    }

    let (before, after) = get_surrounding_observations(env, &read_observation, state, target)?;

    if target == before.timestamp {
        Ok(before.tick_cumulative)
    } else if target == after.timestamp {
        Ok(after.tick_cumulative)
    } else {
        let span = (after.timestamp - before.timestamp) as i64;
        let into = (target - before.timestamp) as i64;
        let slope = (after.tick_cumulative - before.tick_cumulative) / span;
        Ok(before.tick_cumulative + slope * into)
    }
}

/// Time-weighted mean tick over `[now - lookback, now]`, truncated toward
/// zero. A zero lookback returns `current_tick`.
pub fn average_tick<R>(
    env: &Env,
    read_observation: R,
    state: &OracleState,
    now: u64,
    lookback: u64,
    current_tick: i32,
) -> Result<i32, VammError>
where
    R: Fn(&Env, u32) -> Observation,
{
    if lookback == 0 {
        return Ok(current_tick);
    }

    let cumulative_now = observe_single(env, &read_observation, state, now, 0, current_tick)?;
    let cumulative_then = observe_single(env, &read_observation, state, now, lookback, current_tick)?;

    let window = i64::try_from(lookback).map_err(|_| VammError::Overflow)?;
    let mean = (cumulative_now - cumulative_then) / window;
    i32::try_from(mean).map_err(|_| VammError::Overflow)
}

/// Oldest live observation and the newest one at or before `target`,
/// paired with its successor.
fn get_surrounding_observations<R>(
    env: &Env,
    read_observation: &R,
    state: &OracleState,
    target: u64,
) -> Result<(Observation, Observation), VammError>
where
    R: Fn(&Env, u32) -> Observation,
{
    let mut oldest = read_observation(env, (state.index + 1) % state.cardinality);
    if !oldest.initialized {
        oldest = read_observation(env, 0);
    }
    if target < oldest.timestamp {
        return Err(VammError::InsufficientObservationHistory);
    }

    binary_search(env, read_observation, state, target)
}

fn binary_search<R>(
    env: &Env,
    read_observation: &R,
    state: &OracleState,
    target: u64,
) -> Result<(Observation, Observation), VammError>
where
    R: Fn(&Env, u32) -> Observation,
{
    let cardinality = state.cardinality;
    let mut left = (state.index + 1) % cardinality;
    let mut right = left + cardinality - 1;

    // log2(65535) < 17
    for _ in 0..32 {
        let i = (left + right) / 2;
        let before = read_observation(env, i % cardinality);

        if !before.initialized {
            left = i + 1;
            continue;
        }

        let after = read_observation(env, (i + 1) % cardinality);
        let target_at_or_after = before.timestamp <= target;

        if target_at_or_after && target <= after.timestamp {
            return Ok((before, after));
        }

        if !target_at_or_after {
            right = i.checked_sub(1).ok_or(VammError::InsufficientObservationHistory)?;
        } else {
            left = i + 1;
        }
    }

    Err(VammError::InsufficientObservationHistory)
}
