use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::ArrivalResolved;
use crate::growth::materialize;
use crate::state::{Arrival, ArrivalQueue, CombatParams, Planet, MAX_PENDING_ARRIVALS};

/// Ships remaining after travelling `distance`: the fleet halves once per
/// full `range` covered.
pub fn apply_distance_decay(ships: u64, distance: u64, range: u64) -> u64 {
    if range == 0 {
        return 0;
    }
    let halvings = distance / range;
    if halvings >= u64::BITS as u64 {
        return 0;
    }
    ships >> halvings
}

/// Compute the arrival slot based on distance and fleet speed.
pub fn compute_arrival_time(
    departure_time: u64,
    distance: u64,
    speed: u64,
    game_speed: u64,
) -> u64 {
    if speed == 0 {
        return u64::MAX;
    }
    // Travel time in slots = distance * game_speed / speed
    let travel_time = distance.saturating_mul(game_speed) / speed;
    departure_time.saturating_add(travel_time)
}

/// Attacking strength after the defender's defense is applied.
pub fn effective_attack(ships: u64, defense: u64, combat: &CombatParams) -> u64 {
    let scaled = ships as u128 * combat.defense_scale as u128 / defense.max(1) as u128;
    scaled.min(u64::MAX as u128) as u64
}

/// A fleet leaving `from` for `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    pub from: [u8; 32],
    pub to: [u8; 32],
    pub player: Pubkey,
    pub departure_time: u64,
    pub distance: u64,
    pub ships_sent: u64,
    pub silver_sent: u64,
}

/// Deduct the fleet from `source` and queue it at the destination.
///
/// `source` must already be materialized at `departure.departure_time`.
pub fn enqueue(
    source: &mut Planet,
    queue: &mut ArrivalQueue,
    next_arrival_id: &mut u64,
    departure: &Departure,
    game_speed: u64,
) -> Result<Arrival> {
    require!(source.is_owned_by(&departure.player), ErrorCode::Unauthorized);
    require!(departure.ships_sent > 0, ErrorCode::MustSendShips);
    require!(
        source.population >= departure.ships_sent && source.silver >= departure.silver_sent,
        ErrorCode::InsufficientResources
    );

    let ships_arriving =
        apply_distance_decay(departure.ships_sent, departure.distance, source.range);
    require!(ships_arriving > 0, ErrorCode::NoShipsSurviveDistance);
    require!(
        queue.pending() < MAX_PENDING_ARRIVALS,
        ErrorCode::TooManyPendingArrivals
    );

    let arrival = Arrival {
        id: *next_arrival_id,
        from: departure.from,
        to: departure.to,
        player: departure.player,
        departure_time: departure.departure_time,
        arrival_time: compute_arrival_time(
            departure.departure_time,
            departure.distance,
            source.speed,
            game_speed,
        ),
        ships_sent: departure.ships_sent,
        ships_arriving,
        silver_sent: departure.silver_sent,
        resolved: false,
    };

    source.population -= departure.ships_sent;
    source.silver -= departure.silver_sent;
    *next_arrival_id += 1;
    queue.arrivals.push(arrival.clone());

    Ok(arrival)
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrivalOutcome {
    Reinforced,
    Defended,
    Captured,
}

/// Apply one landed fleet to the planet.
pub fn land(planet: &mut Planet, arrival: &Arrival, combat: &CombatParams) -> ArrivalOutcome {
    if planet.is_owned_by(&arrival.player) {
        planet.population = planet
            .population
            .saturating_add(arrival.ships_arriving)
            .min(planet.population_cap);
        planet.silver = planet
            .silver
            .saturating_add(arrival.silver_sent)
            .min(planet.silver_cap);
        return ArrivalOutcome::Reinforced;
    }

    let attack = effective_attack(arrival.ships_arriving, planet.defense, combat);
    if attack > planet.population {
        // Defender's silver is lost; the attacker keeps part of what it carried.
        let carried = arrival.silver_sent as u128 * combat.capture_silver_bps as u128 / 10_000;
        planet.owner = Some(arrival.player);
        planet.population = (attack - planet.population).min(planet.population_cap);
        planet.silver = (carried as u64).min(planet.silver_cap);
        ArrivalOutcome::Captured
    } else {
        // Tie goes to the defender.
        planet.population -= attack;
        ArrivalOutcome::Defended
    }
}

/// Resolve every arrival at `planet` that has landed by `now`.
///
/// Arrivals are applied in `(arrival_time, id)` order, with the planet
/// materialized up to each landing before it is applied, then up to `now`.
/// Each arrival is applied once; resolved entries are compacted out of the
/// queue and reported back as events.
pub fn resolve_due(
    planet: &mut Planet,
    queue: &mut ArrivalQueue,
    now: u64,
    game_speed: u64,
    combat: &CombatParams,
) -> Result<Vec<ArrivalResolved>> {
    require!(now >= planet.last_updated, ErrorCode::TimeRegression);

    queue.arrivals.sort_by_key(|a| (a.arrival_time, a.id));

    let mut resolved = Vec::new();
    for arrival in queue.arrivals.iter_mut() {
        if arrival.resolved {
            continue;
        }
        if arrival.arrival_time > now {
            break;
        }

        *planet = materialize(planet, arrival.arrival_time, game_speed)?;
        let outcome = land(planet, arrival, combat);
        planet.check_invariants()?;
        arrival.resolved = true;

        resolved.push(ArrivalResolved {
            arrival_id: arrival.id,
            loc: planet.location,
            player: arrival.player,
            ships_arriving: arrival.ships_arriving,
            silver_sent: arrival.silver_sent,
            arrival_time: arrival.arrival_time,
            outcome,
            owner: planet.owner,
            population: planet.population,
        });
    }

    *planet = materialize(planet, now, game_speed)?;
    queue.compact();

    Ok(resolved)
}
