use anchor_lang::prelude::*;

pub mod arrivals;
pub mod errors;
pub mod events;
pub mod growth;
pub mod ledger;
pub mod ownership;
pub mod planet;
pub mod state;
pub mod upgrade;

pub use arrivals::ArrivalOutcome;
pub use errors::{ErrorCode, ErrorKind};
pub use events::*;
pub use ledger::{InitArgs, MoveArgs};
pub use state::*;
pub use upgrade::UpgradeBranch;

declare_id!("qyBgbBtwzqEq5RABxe27UE3rUzqBYbkJbquMa56n87W");

/// Emit one event per resolved arrival.
fn publish_resolved(resolved: Vec<ArrivalResolved>) {
    for event in resolved {
        if event.outcome == ArrivalOutcome::Captured {
            msg!(
                "Arrival {} captured planet, garrison {}",
                event.arrival_id,
                event.population
            );
        }
        emit!(event);
    }
}

// ===========================================================================
// Program
// ===========================================================================

#[program]
pub mod forest_ledger {
    use super::*;

    // -----------------------------------------------------------------------
    // Game Management
    // -----------------------------------------------------------------------

    /// Create a new game instance. Permissionless; the creator becomes admin.
    pub fn create_game(ctx: Context<CreateGame>, game_id: u64, config: GameConfig) -> Result<()> {
        config.validate()?;

        let game = &mut ctx.accounts.game;
        game.set_inner(Game::from_config(
            ctx.accounts.admin.key(),
            game_id,
            &config,
        ));

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Reveal `location` if needed and make it the caller's home planet.
    pub fn initialize_player(
        ctx: Context<InitializePlayer>,
        _game_id: u64,
        location: [u8; 32],
        args: InitArgs,
    ) -> Result<()> {
        let now = Clock::get()?.slot;
        let caller = ctx.accounts.caller.key();

        let outcome = ledger::initialize_player(
            &ctx.accounts.game,
            &mut ctx.accounts.player,
            &mut ctx.accounts.planet,
            &mut ctx.accounts.arrivals,
            caller,
            location,
            &args,
            now,
        )?;

        publish_resolved(outcome.resolved);
        msg!("Player {} initialized at slot {}", caller, now);
        emit!(outcome.event);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Fleets
    // -----------------------------------------------------------------------

    /// Send ships (and optionally silver) from `from` to `to`.
    /// Due arrivals on both planets are resolved before the source is debited.
    pub fn move_fleet(
        ctx: Context<MoveFleet>,
        _game_id: u64,
        from: [u8; 32],
        to: [u8; 32],
        args: MoveArgs,
    ) -> Result<()> {
        let now = Clock::get()?.slot;
        let caller = ctx.accounts.caller.key();

        let outcome = ledger::move_fleet(
            &mut ctx.accounts.game,
            &mut ctx.accounts.source_planet,
            &mut ctx.accounts.source_arrivals,
            &mut ctx.accounts.target_planet,
            &mut ctx.accounts.target_arrivals,
            caller,
            from,
            to,
            &args,
            now,
        )?;

        publish_resolved(outcome.resolved);
        emit!(outcome.event);

        Ok(())
    }

    /// Resolve everything that has landed on a planet. Permissionless.
    pub fn refresh_planet(
        ctx: Context<RefreshPlanet>,
        _game_id: u64,
        _location: [u8; 32],
    ) -> Result<()> {
        let now = Clock::get()?.slot;

        let resolved = ledger::refresh_planet(
            &ctx.accounts.game,
            &mut ctx.accounts.planet,
            &mut ctx.accounts.arrivals,
            now,
        )?;

        publish_resolved(resolved);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Upgrade
    // -----------------------------------------------------------------------

    /// Spend silver on the next rank of `branch`
    /// (0 = Capacity, 1 = Defense, 2 = Range, 3 = Speed).
    pub fn upgrade_planet(
        ctx: Context<UpgradePlanet>,
        _game_id: u64,
        _location: [u8; 32],
        branch: u8,
    ) -> Result<()> {
        let now = Clock::get()?.slot;

        let outcome = ledger::upgrade_planet(
            &ctx.accounts.game,
            &mut ctx.accounts.planet,
            &mut ctx.accounts.arrivals,
            ctx.accounts.caller.key(),
            branch,
            now,
        )?;

        publish_resolved(outcome.resolved);
        msg!(
            "Upgraded {:?} to level {} for {} silver",
            outcome.event.branch,
            outcome.event.level,
            outcome.event.silver_spent
        );
        emit!(outcome.event);

        Ok(())
    }
}

// ===========================================================================
// Account Contexts
// ===========================================================================

// --- Game Management ---

#[derive(Accounts)]
#[instruction(game_id: u64)]
pub struct CreateGame<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        init,
        payer = admin,
        space = 8 + Game::INIT_SPACE,
        seeds = [b"game", game_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,
    pub system_program: Program<'info, System>,
}

// --- Players ---

/// `caller` is the acting identity. It may be a program-derived address
/// signing through CPI, so rent is paid by a separate `payer`.
#[derive(Accounts)]
#[instruction(game_id: u64, location: [u8; 32])]
pub struct InitializePlayer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    pub caller: Signer<'info>,
    #[account(
        seeds = [b"game", game_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Player::INIT_SPACE,
        seeds = [b"player", game_id.to_le_bytes().as_ref(), caller.key().as_ref()],
        bump,
    )]
    pub player: Account<'info, Player>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Planet::INIT_SPACE,
        seeds = [b"planet", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub planet: Box<Account<'info, Planet>>,
    #[account(
        init_if_needed,
        payer = payer,
        space = ArrivalQueue::MAX_SIZE,
        seeds = [b"arrivals", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub arrivals: Box<Account<'info, ArrivalQueue>>,
    pub system_program: Program<'info, System>,
}

// --- Fleets ---

#[derive(Accounts)]
#[instruction(game_id: u64, from: [u8; 32], to: [u8; 32])]
pub struct MoveFleet<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    pub caller: Signer<'info>,
    #[account(
        mut,
        seeds = [b"game", game_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,
    #[account(
        mut,
        seeds = [b"planet", game_id.to_le_bytes().as_ref(), from.as_ref()],
        bump,
    )]
    pub source_planet: Box<Account<'info, Planet>>,
    #[account(
        mut,
        seeds = [b"arrivals", game_id.to_le_bytes().as_ref(), from.as_ref()],
        bump,
    )]
    pub source_arrivals: Box<Account<'info, ArrivalQueue>>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Planet::INIT_SPACE,
        seeds = [b"planet", game_id.to_le_bytes().as_ref(), to.as_ref()],
        bump,
    )]
    pub target_planet: Box<Account<'info, Planet>>,
    #[account(
        init_if_needed,
        payer = payer,
        space = ArrivalQueue::MAX_SIZE,
        seeds = [b"arrivals", game_id.to_le_bytes().as_ref(), to.as_ref()],
        bump,
    )]
    pub target_arrivals: Box<Account<'info, ArrivalQueue>>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(game_id: u64, location: [u8; 32])]
pub struct RefreshPlanet<'info> {
    #[account(
        seeds = [b"game", game_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,
    #[account(
        mut,
        seeds = [b"planet", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub planet: Box<Account<'info, Planet>>,
    #[account(
        mut,
        seeds = [b"arrivals", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub arrivals: Box<Account<'info, ArrivalQueue>>,
}

// --- Upgrade ---

#[derive(Accounts)]
#[instruction(game_id: u64, location: [u8; 32])]
pub struct UpgradePlanet<'info> {
    pub caller: Signer<'info>,
    #[account(
        seeds = [b"game", game_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,
    #[account(
        mut,
        seeds = [b"planet", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub planet: Box<Account<'info, Planet>>,
    #[account(
        mut,
        seeds = [b"arrivals", game_id.to_le_bytes().as_ref(), location.as_ref()],
        bump,
    )]
    pub arrivals: Box<Account<'info, ArrivalQueue>>,
}
