use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::{Game, Planet, Player};

/// Hand an unowned home-class planet to a player that has not played yet.
///
/// This is the only path by which an unowned planet gains an owner outside
/// of combat. The planet must already be materialized and have had its due
/// arrivals resolved.
pub fn claim_home(
    player: &mut Player,
    planet: &mut Planet,
    caller: Pubkey,
    game: &Game,
    now: u64,
) -> Result<()> {
    require!(!player.initialized, ErrorCode::AlreadyInitialized);
    require!(planet.owner.is_none(), ErrorCode::PlanetAlreadyOwned);
    require!(planet.is_home_class(), ErrorCode::InvalidInitialPlanet);

    planet.owner = Some(caller);
    planet.population = game.home_population.min(planet.population_cap);
    planet.silver = game.home_silver.min(planet.silver_cap);

    player.identity = caller;
    player.game_id = game.game_id;
    player.initialized = true;
    player.home_planet = planet.location;
    player.initialized_at = now;

    Ok(())
}

/// Locations among `planets` currently owned by `who`.
pub fn owned_planets<'a, I>(planets: I, who: &Pubkey) -> Vec<[u8; 32]>
where
    I: IntoIterator<Item = &'a Planet>,
{
    planets
        .into_iter()
        .filter(|p| p.is_owned_by(who))
        .map(|p| p.location)
        .collect()
}
