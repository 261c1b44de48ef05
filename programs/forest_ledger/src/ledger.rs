use anchor_lang::prelude::*;

use crate::arrivals::{enqueue, resolve_due, Departure};
use crate::errors::ErrorCode;
use crate::events::{ArrivalQueued, ArrivalResolved, PlanetUpgraded, PlayerInitialized};
use crate::ownership::claim_home;
use crate::planet::{planet_traits, space_type};
use crate::state::{ArrivalQueue, Game, Planet, Player};
use crate::upgrade::{upgrade, UpgradeBranch};

// ---------------------------------------------------------------------------
// Instruction arguments
// ---------------------------------------------------------------------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitArgs {
    pub perlin: u64,
    pub radius: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveArgs {
    /// Environment of the target, used only if it has never been revealed.
    pub new_perlin: u64,
    pub new_radius: u64,
    pub max_dist: u64,
    pub ships_sent: u64,
    pub silver_sent: u64,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Initialized {
    pub event: PlayerInitialized,
    pub resolved: Vec<ArrivalResolved>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    pub event: ArrivalQueued,
    pub resolved: Vec<ArrivalResolved>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upgraded {
    pub event: PlanetUpgraded,
    pub resolved: Vec<ArrivalResolved>,
}

// ---------------------------------------------------------------------------
// Transitions
//
// Each transition works on copies of the records it touches and writes them
// back only once every check has passed. A failed call leaves the inputs
// exactly as they were.
// ---------------------------------------------------------------------------

/// Run genesis for a location that has never been revealed. Revealed planets
/// are left alone.
pub fn reveal(
    planet: &mut Planet,
    queue: &mut ArrivalQueue,
    game: &Game,
    location: [u8; 32],
    perlin: u64,
    radius: u64,
    now: u64,
) -> Result<()> {
    if planet.is_revealed {
        return Ok(());
    }
    require!(radius <= game.world_radius, ErrorCode::OutOfBounds);
    let traits =
        planet_traits(&location, &game.planet_thresholds).ok_or(ErrorCode::DeadSpace)?;

    *planet = Planet::genesis(location, traits, space_type(perlin, &game.perlin_thresholds), now);
    *queue = ArrivalQueue::new(game.game_id, location);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn initialize_player(
    game: &Game,
    player: &mut Player,
    planet: &mut Planet,
    queue: &mut ArrivalQueue,
    caller: Pubkey,
    location: [u8; 32],
    args: &InitArgs,
    now: u64,
) -> Result<Initialized> {
    require!(!player.initialized, ErrorCode::AlreadyInitialized);

    let mut next_player = player.clone();
    let mut next_planet = planet.clone();
    let mut next_queue = queue.clone();

    reveal(
        &mut next_planet,
        &mut next_queue,
        game,
        location,
        args.perlin,
        args.radius,
        now,
    )?;
    let resolved = resolve_due(
        &mut next_planet,
        &mut next_queue,
        now,
        game.game_speed,
        &game.combat,
    )?;
    claim_home(&mut next_player, &mut next_planet, caller, game, now)?;
    next_planet.check_invariants()?;

    *player = next_player;
    *planet = next_planet;
    *queue = next_queue;

    Ok(Initialized {
        event: PlayerInitialized {
            player: caller,
            loc: location,
        },
        resolved,
    })
}

/// Send `args.ships_sent` ships and `args.silver_sent` silver from `from` to
/// `to`, revealing the target on first contact. Both endpoints have their due
/// arrivals resolved first, so the source is debited from its current state.
#[allow(clippy::too_many_arguments)]
pub fn move_fleet(
    game: &mut Game,
    source: &mut Planet,
    source_queue: &mut ArrivalQueue,
    target: &mut Planet,
    target_queue: &mut ArrivalQueue,
    caller: Pubkey,
    from: [u8; 32],
    to: [u8; 32],
    args: &MoveArgs,
    now: u64,
) -> Result<Moved> {
    let mut next_source = source.clone();
    let mut next_source_queue = source_queue.clone();
    let mut resolved = resolve_due(
        &mut next_source,
        &mut next_source_queue,
        now,
        game.game_speed,
        &game.combat,
    )?;
    // Unrevealed planets have no owner, so this also covers them.
    require!(next_source.is_owned_by(&caller), ErrorCode::Unauthorized);
    require!(from != to, ErrorCode::MoveToSelf);

    let mut next_target = target.clone();
    let mut next_target_queue = target_queue.clone();
    let mut next_arrival_id = game.next_arrival_id;

    reveal(
        &mut next_target,
        &mut next_target_queue,
        game,
        to,
        args.new_perlin,
        args.new_radius,
        now,
    )?;
    resolved.extend(resolve_due(
        &mut next_target,
        &mut next_target_queue,
        now,
        game.game_speed,
        &game.combat,
    )?);

    let departure = Departure {
        from,
        to,
        player: caller,
        departure_time: now,
        distance: args.max_dist,
        ships_sent: args.ships_sent,
        silver_sent: args.silver_sent,
    };
    let arrival = enqueue(
        &mut next_source,
        &mut next_target_queue,
        &mut next_arrival_id,
        &departure,
        game.game_speed,
    )?;
    next_source.check_invariants()?;
    next_target.check_invariants()?;

    *source = next_source;
    *source_queue = next_source_queue;
    *target = next_target;
    *target_queue = next_target_queue;
    game.next_arrival_id = next_arrival_id;

    Ok(Moved {
        event: ArrivalQueued {
            arrival_id: arrival.id,
            from,
            to,
            player: caller,
            ships_sent: arrival.ships_sent,
            ships_arriving: arrival.ships_arriving,
            silver_sent: arrival.silver_sent,
            arrival_time: arrival.arrival_time,
        },
        resolved,
    })
}

/// Bring a planet up to `now` and apply everything that has landed.
/// Anyone may call this; calling it twice at the same slot is a no-op.
pub fn refresh_planet(
    game: &Game,
    planet: &mut Planet,
    queue: &mut ArrivalQueue,
    now: u64,
) -> Result<Vec<ArrivalResolved>> {
    require!(planet.is_revealed, ErrorCode::PlanetNotRevealed);

    let mut next_planet = planet.clone();
    let mut next_queue = queue.clone();
    let resolved = resolve_due(
        &mut next_planet,
        &mut next_queue,
        now,
        game.game_speed,
        &game.combat,
    )?;
    next_planet.check_invariants()?;

    *planet = next_planet;
    *queue = next_queue;
    Ok(resolved)
}

pub fn upgrade_planet(
    game: &Game,
    planet: &mut Planet,
    queue: &mut ArrivalQueue,
    caller: Pubkey,
    branch: u8,
    now: u64,
) -> Result<Upgraded> {
    let mut next_planet = planet.clone();
    let mut next_queue = queue.clone();
    let resolved = resolve_due(
        &mut next_planet,
        &mut next_queue,
        now,
        game.game_speed,
        &game.combat,
    )?;
    require!(next_planet.is_owned_by(&caller), ErrorCode::Unauthorized);
    let branch = UpgradeBranch::from_index(branch).ok_or(ErrorCode::InvalidUpgradeBranch)?;
    let silver_spent = upgrade(&mut next_planet, branch, &caller)?;
    next_planet.check_invariants()?;

    *planet = next_planet;
    *queue = next_queue;

    Ok(Upgraded {
        event: PlanetUpgraded {
            loc: planet.location,
            player: caller,
            branch,
            level: planet.level,
            silver_spent,
        },
        resolved,
    })
}
