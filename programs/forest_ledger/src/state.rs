use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Maximum number of unresolved arrivals queued at one planet
pub const MAX_PENDING_ARRIVALS: usize = 32;

// ===========================================================================
// Account Structures - State
// ===========================================================================

#[account]
#[derive(InitSpace)]
pub struct Game {
    pub admin: Pubkey,
    pub game_id: u64,
    /// Slots per unit of growth rate and per unit of fleet speed.
    pub game_speed: u64,
    pub world_radius: u64,
    pub next_arrival_id: u64,
    pub home_population: u64,
    pub home_silver: u64,
    pub planet_thresholds: PlanetThresholds,
    pub perlin_thresholds: PerlinThresholds,
    pub combat: CombatParams,
}

impl Game {
    pub fn from_config(admin: Pubkey, game_id: u64, config: &GameConfig) -> Self {
        Self {
            admin,
            game_id,
            game_speed: config.game_speed,
            world_radius: config.world_radius,
            next_arrival_id: 0,
            home_population: config.home_population,
            home_silver: config.home_silver,
            planet_thresholds: config.planet_thresholds,
            perlin_thresholds: config.perlin_thresholds,
            combat: config.combat,
        }
    }
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct Player {
    pub identity: Pubkey,
    pub game_id: u64,
    pub initialized: bool,
    pub home_planet: [u8; 32],
    pub initialized_at: u64,
}

/// A zero-initialized account (`Default`) is an unrevealed planet.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct Planet {
    pub location: [u8; 32],
    pub is_revealed: bool,
    pub owner: Option<Pubkey>,
    pub class: PlanetClass,
    pub space: SpaceType,
    pub level: u8,
    pub population: u64,
    pub population_cap: u64,
    pub population_growth: i64,
    pub silver: u64,
    pub silver_cap: u64,
    pub silver_growth: i64,
    pub range: u64,
    pub speed: u64,
    pub defense: u64,
    pub upgrade_ranks: [u8; 4],
    pub last_updated: u64,
}

impl Planet {
    pub fn is_owned_by(&self, who: &Pubkey) -> bool {
        self.owner.as_ref() == Some(who)
    }

    /// Resources must sit inside their caps. Anything else means a corrupted
    /// record and aborts the call.
    pub fn check_invariants(&self) -> Result<()> {
        require!(
            self.population <= self.population_cap && self.silver <= self.silver_cap,
            ErrorCode::CorruptedInvariant
        );
        Ok(())
    }
}

#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ArrivalQueue {
    pub game_id: u64,
    pub location: [u8; 32],
    /// Arrivals resolved and compacted out of `arrivals` so far.
    pub resolved_count: u64,
    pub arrivals: Vec<Arrival>,
}

impl ArrivalQueue {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // game_id
        + 32  // location
        + 8   // resolved_count
        + 4 + (MAX_PENDING_ARRIVALS * Arrival::SIZE); // arrivals vec

    pub fn new(game_id: u64, location: [u8; 32]) -> Self {
        Self {
            game_id,
            location,
            resolved_count: 0,
            arrivals: Vec::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.arrivals.iter().filter(|a| !a.resolved).count()
    }

    /// Drop resolved arrivals, keeping a running count of them.
    pub fn compact(&mut self) {
        let before = self.arrivals.len();
        self.arrivals.retain(|a| !a.resolved);
        self.resolved_count += (before - self.arrivals.len()) as u64;
    }
}

// ===========================================================================
// Supporting Structs & Enums
// ===========================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub id: u64,
    pub from: [u8; 32],
    pub to: [u8; 32],
    pub player: Pubkey,
    pub departure_time: u64,
    pub arrival_time: u64,
    pub ships_sent: u64,
    pub ships_arriving: u64,
    pub silver_sent: u64,
    pub resolved: bool,
}

impl Arrival {
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum PlanetClass {
    #[default]
    Planet,
    Quasar,
    SpacetimeRip,
    AsteroidField,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum SpaceType {
    #[default]
    Nebula,
    Space,
    DeepSpace,
}

/// Thresholds applied to the bytes of a location id at genesis.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PlanetThresholds {
    pub dead_space: u8,
    pub planet: u8,
    pub quasar: u8,
    pub spacetime_rip: u8,
    /// Byte 2 below `level[i]` yields natural level `i`; above all of them, level 5.
    pub level: [u8; 5],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PerlinThresholds {
    pub space: u64,
    pub deep_space: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct CombatParams {
    /// Attacking ships are scaled by `defense_scale / defense`.
    pub defense_scale: u64,
    /// Share of carried silver kept by a capturing fleet, in basis points.
    pub capture_silver_bps: u64,
}

/// Parameters accepted by `create_game`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub game_speed: u64,
    pub world_radius: u64,
    pub home_population: u64,
    pub home_silver: u64,
    pub planet_thresholds: PlanetThresholds,
    pub perlin_thresholds: PerlinThresholds,
    pub combat: CombatParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_speed: 1,
            world_radius: 10_000,
            home_population: 250_000,
            home_silver: 0,
            planet_thresholds: PlanetThresholds {
                dead_space: 32,
                planet: 128,
                quasar: 160,
                spacetime_rip: 192,
                level: [96, 160, 208, 236, 250],
            },
            perlin_thresholds: PerlinThresholds {
                space: 18,
                deep_space: 22,
            },
            combat: CombatParams {
                defense_scale: 100,
                capture_silver_bps: 10_000,
            },
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.game_speed > 0, ErrorCode::InvalidConfig);
        require!(self.world_radius > 0, ErrorCode::InvalidConfig);
        require!(self.combat.defense_scale > 0, ErrorCode::InvalidConfig);
        require!(
            self.combat.capture_silver_bps <= 10_000,
            ErrorCode::InvalidConfig
        );

        let t = &self.planet_thresholds;
        require!(
            t.planet <= t.quasar && t.quasar <= t.spacetime_rip,
            ErrorCode::InvalidConfig
        );
        require!(
            t.level.windows(2).all(|w| w[0] <= w[1]),
            ErrorCode::InvalidConfig
        );
        require!(
            self.perlin_thresholds.space <= self.perlin_thresholds.deep_space,
            ErrorCode::InvalidConfig
        );
        Ok(())
    }
}
