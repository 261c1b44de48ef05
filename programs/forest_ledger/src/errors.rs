use anchor_lang::prelude::*;

// ===========================================================================
// Error Codes
// ===========================================================================

#[error_code]
pub enum ErrorCode {
    #[msg("Caller does not control this planet")]
    Unauthorized,
    #[msg("Insufficient population or silver")]
    InsufficientResources,
    #[msg("Must send at least one ship")]
    MustSendShips,
    #[msg("No ships would survive the journey")]
    NoShipsSurviveDistance,
    #[msg("Player has already initialized")]
    AlreadyInitialized,
    #[msg("Planet already has an owner")]
    PlanetAlreadyOwned,
    #[msg("Invalid home planet - must be a level 0 Planet in a nebula")]
    InvalidInitialPlanet,
    #[msg("Upgrade branch is at its maximum level")]
    LevelCapped,
    #[msg("Planet has not been revealed")]
    PlanetNotRevealed,
    #[msg("Location is dead space")]
    DeadSpace,
    #[msg("Radius is outside the world")]
    OutOfBounds,
    #[msg("Too many pending arrivals on target planet")]
    TooManyPendingArrivals,
    #[msg("Source and target planet must differ")]
    MoveToSelf,
    #[msg("Unknown upgrade branch")]
    InvalidUpgradeBranch,
    #[msg("Only Planet type can be upgraded")]
    CannotUpgradeNonPlanet,
    #[msg("Invalid game configuration")]
    InvalidConfig,
    #[msg("Clock is behind the planet's last update")]
    TimeRegression,
    #[msg("Planet resources are outside their caps")]
    CorruptedInvariant,
}

/// Coarse classification of [`ErrorCode`] as seen by callers of the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    InsufficientResources,
    InvalidState,
    AlreadyInitialized,
    /// Host precondition violated. Never a user error.
    Defect,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::Unauthorized => ErrorKind::Unauthorized,
            ErrorCode::InsufficientResources
            | ErrorCode::MustSendShips
            | ErrorCode::NoShipsSurviveDistance => ErrorKind::InsufficientResources,
            ErrorCode::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            ErrorCode::TimeRegression | ErrorCode::CorruptedInvariant => ErrorKind::Defect,
            ErrorCode::PlanetAlreadyOwned
            | ErrorCode::InvalidInitialPlanet
            | ErrorCode::LevelCapped
            | ErrorCode::PlanetNotRevealed
            | ErrorCode::DeadSpace
            | ErrorCode::OutOfBounds
            | ErrorCode::TooManyPendingArrivals
            | ErrorCode::MoveToSelf
            | ErrorCode::InvalidUpgradeBranch
            | ErrorCode::CannotUpgradeNonPlanet
            | ErrorCode::InvalidConfig => ErrorKind::InvalidState,
        }
    }
}

/// Numeric code carried by an anchor error, if it came from this program.
pub fn error_code_number(err: &anchor_lang::error::Error) -> Option<u32> {
    match err {
        anchor_lang::error::Error::AnchorError(e) => Some(e.error_code_number),
        anchor_lang::error::Error::ProgramError(_) => None,
    }
}
