use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::planet::MAX_PLANET_LEVEL;
use crate::state::{Planet, PlanetClass};

/// Ranks available in each secondary branch.
pub const MAX_BRANCH_RANK: u8 = 4;
/// Silver price of a level 0 Capacity upgrade.
pub const UPGRADE_BASE_COST: u64 = 1_000;

/// Stat multipliers, in percent, indexed by the rank being bought.
const DEFENSE_BONUS_PCT: [u64; MAX_BRANCH_RANK as usize] = [120, 120, 130, 150];
const RANGE_BONUS_PCT: [u64; MAX_BRANCH_RANK as usize] = [125, 125, 125, 150];
const SPEED_BONUS_PCT: [u64; MAX_BRANCH_RANK as usize] = [125, 125, 150, 150];

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeBranch {
    /// Primary branch: raises the planet level.
    Capacity,
    Defense,
    Range,
    Speed,
}

impl UpgradeBranch {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Capacity),
            1 => Some(Self::Defense),
            2 => Some(Self::Range),
            3 => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn max_rank(self) -> u8 {
        match self {
            Self::Capacity => MAX_PLANET_LEVEL,
            _ => MAX_BRANCH_RANK,
        }
    }
}

/// Rank already reached in `branch`. For Capacity this is the planet level.
pub fn current_rank(planet: &Planet, branch: UpgradeBranch) -> u8 {
    match branch {
        UpgradeBranch::Capacity => planet.level,
        _ => planet.upgrade_ranks[branch.index()],
    }
}

/// Silver cost of the next rank in `branch` for a planet at `level`.
/// Exponential in level: 1000 * 2^level for Capacity, scaled by rank otherwise.
pub fn upgrade_cost(level: u8, branch: UpgradeBranch, rank: u8) -> u64 {
    let base = UPGRADE_BASE_COST.saturating_mul(1u64 << (level as u32));
    match branch {
        UpgradeBranch::Capacity => base,
        _ => base.saturating_mul(rank as u64 + 1) / 2,
    }
}

fn scale_pct(value: u64, pct: u64) -> u64 {
    value.saturating_mul(pct) / 100
}

/// Trade silver for the next rank in `branch`. Returns the silver spent.
///
/// The planet must already be materialized; level changes only affect
/// intervals that start after this call.
pub fn upgrade(planet: &mut Planet, branch: UpgradeBranch, caller: &Pubkey) -> Result<u64> {
    require!(planet.is_owned_by(caller), ErrorCode::Unauthorized);
    require!(
        planet.class == PlanetClass::Planet,
        ErrorCode::CannotUpgradeNonPlanet
    );

    let rank = current_rank(planet, branch);
    require!(rank < branch.max_rank(), ErrorCode::LevelCapped);

    let cost = upgrade_cost(planet.level, branch, rank);
    require!(planet.silver >= cost, ErrorCode::InsufficientResources);
    planet.silver -= cost;

    match branch {
        UpgradeBranch::Capacity => {
            planet.population_cap = planet.population_cap.saturating_mul(2);
            planet.silver_cap = planet.silver_cap.saturating_mul(2);
            planet.population_growth = planet.population_growth.saturating_mul(2);
            planet.silver_growth = planet.silver_growth.saturating_mul(2);
            planet.level += 1;
        }
        UpgradeBranch::Defense => {
            planet.defense = scale_pct(planet.defense, DEFENSE_BONUS_PCT[rank as usize]);
        }
        UpgradeBranch::Range => {
            planet.range = scale_pct(planet.range, RANGE_BONUS_PCT[rank as usize]);
        }
        UpgradeBranch::Speed => {
            planet.speed = scale_pct(planet.speed, SPEED_BONUS_PCT[rank as usize]);
        }
    }
    if branch != UpgradeBranch::Capacity {
        planet.upgrade_ranks[branch.index()] += 1;
    }

    Ok(cost)
}
