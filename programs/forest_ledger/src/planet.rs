use crate::state::{PerlinThresholds, Planet, PlanetClass, PlanetThresholds, SpaceType};

/// Highest level reachable through the Capacity upgrade branch.
pub const MAX_PLANET_LEVEL: u8 = 9;
/// Highest level a planet can be born with.
pub const MAX_NATURAL_LEVEL: u8 = 5;

// ---------------------------------------------------------------------------
// Location ids
// ---------------------------------------------------------------------------

/// Compute the location id from coordinates and game_id using blake3.
///
/// Client-side helper: the result is the `location` instruction argument and
/// the seed of the planet and arrivals PDAs. The program itself only ever
/// receives the id, never the coordinates.
pub fn location_id(x: i64, y: i64, game_id: u64) -> [u8; 32] {
    let mut input = [0u8; 24];
    input[0..8].copy_from_slice(&x.to_le_bytes());
    input[8..16].copy_from_slice(&y.to_le_bytes());
    input[16..24].copy_from_slice(&game_id.to_le_bytes());
    *blake3::hash(&input).as_bytes()
}

/// Properties read off a location id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanetTraits {
    pub class: PlanetClass,
    pub level: u8,
}

/// Determine class and natural level from a location id.
/// Returns None if the id represents dead space.
pub fn planet_traits(location: &[u8; 32], thresholds: &PlanetThresholds) -> Option<PlanetTraits> {
    // Byte 0: dead space check
    if location[0] < thresholds.dead_space {
        return None;
    }

    // Byte 1: class
    let byte1 = location[1];
    let class = if byte1 < thresholds.planet {
        PlanetClass::Planet
    } else if byte1 < thresholds.quasar {
        PlanetClass::Quasar
    } else if byte1 < thresholds.spacetime_rip {
        PlanetClass::SpacetimeRip
    } else {
        PlanetClass::AsteroidField
    };

    // Byte 2: natural level (0-5)
    let level = thresholds
        .level
        .iter()
        .position(|t| location[2] < *t)
        .unwrap_or(thresholds.level.len()) as u8;

    Some(PlanetTraits { class, level })
}

pub fn space_type(perlin: u64, thresholds: &PerlinThresholds) -> SpaceType {
    if perlin < thresholds.space {
        SpaceType::Nebula
    } else if perlin < thresholds.deep_space {
        SpaceType::Space
    } else {
        SpaceType::DeepSpace
    }
}

// ---------------------------------------------------------------------------
// Stat tables
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanetStats {
    pub population_cap: u64,
    pub population_growth: i64,
    pub silver_cap: u64,
    pub silver_growth: i64,
    pub range: u64,
    pub speed: u64,
    pub defense: u64,
    pub natives: u64,
}

/// Base stats for a class at a level.
/// Capacities scale quadratically with level, rates linearly.
pub fn base_stats(class: PlanetClass, level: u8) -> PlanetStats {
    let s = level as u64 + 1;
    let s_sq = s * s;

    match class {
        PlanetClass::Planet => PlanetStats {
            population_cap: 1_000_000 * s_sq,
            population_growth: 1_000 * s as i64,
            silver_cap: 100_000 * s_sq,
            silver_growth: 50 * s as i64,
            range: 100 * s,
            speed: 75 + 25 * s,
            defense: 100,
            natives: if level == 0 { 0 } else { 5_000 * s_sq },
        },
        PlanetClass::Quasar => PlanetStats {
            population_cap: 5_000_000 * s_sq,
            population_growth: 0,
            silver_cap: 5_000_000 * s_sq,
            silver_growth: 0,
            range: 50 * s,
            speed: 50 + 25 * s,
            defense: 200,
            natives: 20_000 * s_sq,
        },
        // Rips bleed population while held.
        PlanetClass::SpacetimeRip => PlanetStats {
            population_cap: 500_000 * s_sq,
            population_growth: -500 * s as i64,
            silver_cap: 0,
            silver_growth: 0,
            range: 150 * s,
            speed: 100 + 25 * s,
            defense: 50,
            natives: 15_000 * s_sq,
        },
        PlanetClass::AsteroidField => PlanetStats {
            population_cap: 800_000 * s_sq,
            population_growth: 0,
            silver_cap: 2_000_000 * s_sq,
            silver_growth: 200 * s as i64,
            range: 80 * s,
            speed: 75 + 25 * s,
            defense: 100,
            natives: 10_000 * s_sq,
        },
    }
}

pub fn apply_space_modifiers(stats: &mut PlanetStats, space: SpaceType) {
    match space {
        SpaceType::Nebula => {}
        SpaceType::Space => {
            stats.range = stats.range * 5 / 4;
            stats.speed = stats.speed * 5 / 4;
            stats.defense = stats.defense * 3 / 4;
        }
        SpaceType::DeepSpace => {
            stats.range = stats.range * 3 / 2;
            stats.speed = stats.speed * 3 / 2;
            stats.defense = stats.defense / 2;
        }
    }
}

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

impl Planet {
    /// Fresh, unowned planet holding its native garrison.
    pub fn genesis(location: [u8; 32], traits: PlanetTraits, space: SpaceType, now: u64) -> Self {
        let mut stats = base_stats(traits.class, traits.level);
        apply_space_modifiers(&mut stats, space);

        Self {
            location,
            is_revealed: true,
            owner: None,
            class: traits.class,
            space,
            level: traits.level,
            population: stats.natives.min(stats.population_cap),
            population_cap: stats.population_cap,
            population_growth: stats.population_growth,
            silver: 0,
            silver_cap: stats.silver_cap,
            silver_growth: stats.silver_growth,
            range: stats.range,
            speed: stats.speed,
            defense: stats.defense,
            upgrade_ranks: [0; 4],
            last_updated: now,
        }
    }

    /// Home planets are level 0 Planets in a nebula.
    pub fn is_home_class(&self) -> bool {
        self.class == PlanetClass::Planet && self.level == 0 && self.space == SpaceType::Nebula
    }
}
