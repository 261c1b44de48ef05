use anchor_lang::prelude::*;

use crate::arrivals::ArrivalOutcome;
use crate::upgrade::UpgradeBranch;

// ===========================================================================
// Events
// ===========================================================================

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerInitialized {
    pub player: Pubkey,
    pub loc: [u8; 32],
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalQueued {
    pub arrival_id: u64,
    pub from: [u8; 32],
    pub to: [u8; 32],
    pub player: Pubkey,
    pub ships_sent: u64,
    pub ships_arriving: u64,
    pub silver_sent: u64,
    pub arrival_time: u64,
}

/// Full record of an arrival at the moment it was applied. Resolved arrivals
/// are compacted out of their queue, so this is the lasting trace of them.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalResolved {
    pub arrival_id: u64,
    pub loc: [u8; 32],
    pub player: Pubkey,
    pub ships_arriving: u64,
    pub silver_sent: u64,
    pub arrival_time: u64,
    pub outcome: ArrivalOutcome,
    pub owner: Option<Pubkey>,
    pub population: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanetUpgraded {
    pub loc: [u8; 32],
    pub player: Pubkey,
    pub branch: UpgradeBranch,
    pub level: u8,
    pub silver_spent: u64,
}
