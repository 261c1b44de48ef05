use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::Planet;

/// Advance one resource by `rate` per `game_speed` slots over `elapsed` slots,
/// clamped to `[0, cap]`. A zero rate or zero interval leaves it untouched.
pub fn grow(amount: u64, cap: u64, rate: i64, elapsed: u64, game_speed: u64) -> u64 {
    if rate == 0 || elapsed == 0 || game_speed == 0 {
        return amount;
    }
    let delta = rate as i128 * elapsed as i128 / game_speed as i128;
    (amount as i128 + delta).clamp(0, cap as i128) as u64
}

/// Compute the planet as of `now` via lazy generation.
///
/// Rates and caps are the ones stored on the record, i.e. those in force at
/// the start of the interval. Only owned planets generate; native garrisons
/// stay put, though the interval is still consumed.
pub fn materialize(planet: &Planet, now: u64, game_speed: u64) -> Result<Planet> {
    require!(now >= planet.last_updated, ErrorCode::TimeRegression);

    let mut next = planet.clone();
    if now == planet.last_updated {
        return Ok(next);
    }

    let elapsed = now - planet.last_updated;
    if planet.owner.is_some() {
        next.population = grow(
            planet.population,
            planet.population_cap,
            planet.population_growth,
            elapsed,
            game_speed,
        );
        next.silver = grow(
            planet.silver,
            planet.silver_cap,
            planet.silver_growth,
            elapsed,
            game_speed,
        );
    }
    next.last_updated = now;

    Ok(next)
}
