use anchor_lang::prelude::Pubkey;
use forest_ledger::errors::error_code_number;
use forest_ledger::ledger::{self, InitArgs, MoveArgs};
use forest_ledger::ownership::owned_planets;
use forest_ledger::planet::{location_id, planet_traits};
use forest_ledger::{
    ArrivalOutcome, ArrivalQueue, ErrorCode, Game, GameConfig, Planet, PlanetClass, Player,
    UpgradeBranch,
};

const LARGE_INTERVAL: u64 = 10_000;

/// Builds a location id with chosen class and level bytes.
fn loc(class_byte: u8, level_byte: u8, tag: u8) -> [u8; 32] {
    let mut id = [tag; 32];
    id[0] = 200;
    id[1] = class_byte;
    id[2] = level_byte;
    id
}

struct Slot {
    planet: Planet,
    queue: ArrivalQueue,
}

impl Slot {
    fn empty() -> Self {
        Self {
            planet: Planet::default(),
            queue: ArrivalQueue::default(),
        }
    }
}

fn new_game() -> Game {
    Game::from_config(Pubkey::new_unique(), 7, &GameConfig::default())
}

fn join(game: &Game, who: Pubkey, location: [u8; 32], now: u64) -> (Player, Slot) {
    let mut player = Player::default();
    let mut home = Slot::empty();
    ledger::initialize_player(
        game,
        &mut player,
        &mut home.planet,
        &mut home.queue,
        who,
        location,
        &InitArgs {
            perlin: 17,
            radius: 2_000,
        },
        now,
    )
    .unwrap();
    (player, home)
}

#[allow(clippy::too_many_arguments)]
fn send(
    game: &mut Game,
    from: &mut Slot,
    to: &mut Slot,
    who: Pubkey,
    to_loc: [u8; 32],
    distance: u64,
    ships: u64,
    now: u64,
) -> anchor_lang::Result<ledger::Moved> {
    let from_loc = from.planet.location;
    ledger::move_fleet(
        game,
        &mut from.planet,
        &mut from.queue,
        &mut to.planet,
        &mut to.queue,
        who,
        from_loc,
        to_loc,
        &MoveArgs {
            new_perlin: 10,
            new_radius: 500,
            max_dist: distance,
            ships_sent: ships,
            silver_sent: 0,
        },
        now,
    )
}

#[test]
fn initialize_then_move() {
    let mut game = new_game();
    let player = Pubkey::new_unique();
    let a_loc = loc(0, 0, 1);
    let b_loc = loc(0, 0, 2);
    let (profile, mut a) = join(&game, player, a_loc, 0);
    let mut b = Slot::empty();
    let before = a.planet.population;

    let moved = send(&mut game, &mut a, &mut b, player, b_loc, 100, 50_000, 0).unwrap();

    assert!(profile.initialized);
    assert_eq!(moved.event.arrival_id, 0);
    assert_eq!(moved.event.from, a_loc);
    assert_eq!(moved.event.to, b_loc);
    assert!(moved.event.arrival_time > 0);
    assert_eq!(a.planet.population, before - 50_000);
    assert_eq!(b.queue.pending(), 1);
}

#[test]
fn repeated_reinforcement_then_upgrade_through_an_empire() {
    let mut game = new_game();
    // Acts on behalf of players through its own identity.
    let empire = Pubkey::new_unique();
    let a_loc = loc(0, 0, 1);
    // Level 3 Planet: large caps and a native garrison of 80_000.
    let b_loc = loc(0, 220, 3);
    let (_, mut a) = join(&game, empire, a_loc, 0);
    let mut b = Slot::empty();

    let mut now = 0;
    for _ in 0..4 {
        send(&mut game, &mut a, &mut b, empire, b_loc, 100, 250_000, now).unwrap();
        now += LARGE_INTERVAL;
    }
    assert_eq!(game.next_arrival_id, 4);

    let resolved = ledger::refresh_planet(&game, &mut b.planet, &mut b.queue, now).unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].outcome, ArrivalOutcome::Reinforced);
    assert_eq!(b.queue.resolved_count, 4);
    assert_eq!(b.planet.owner, Some(empire));
    assert_eq!(owned_planets([&a.planet, &b.planet], &empire), vec![a_loc, b_loc]);

    let level = b.planet.level;
    let upgraded =
        ledger::upgrade_planet(&game, &mut b.planet, &mut b.queue, empire, 0, now).unwrap();

    assert_eq!(upgraded.event.loc, b_loc);
    assert_eq!(upgraded.event.branch, UpgradeBranch::Capacity);
    assert_eq!(upgraded.event.level, level + 1);
    assert_eq!(b.planet.level, level + 1);
}

#[test]
fn contest_with_insufficient_force_keeps_ownership() {
    let mut game = new_game();
    let attacker = Pubkey::new_unique();
    let defender = Pubkey::new_unique();
    let c_loc = loc(0, 1, 4);
    let (_, mut a) = join(&game, attacker, loc(0, 0, 1), 0);
    let (_, mut c) = join(&game, defender, c_loc, 0);
    let garrison = c.planet.population;

    send(&mut game, &mut a, &mut c, attacker, c_loc, 0, 100_000, 0).unwrap();
    let resolved = ledger::refresh_planet(&game, &mut c.planet, &mut c.queue, 0).unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].outcome, ArrivalOutcome::Defended);
    assert_eq!(c.planet.owner, Some(defender));
    assert_eq!(c.planet.population, garrison - 100_000);
    assert!(owned_planets([&c.planet], &attacker).is_empty());
}

#[test]
fn strangers_cannot_move_or_upgrade() {
    let mut game = new_game();
    let owner = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();
    let (_, mut a) = join(&game, owner, loc(0, 0, 1), 0);
    let mut b = Slot::empty();
    let snapshot = a.planet.clone();

    let err = send(&mut game, &mut a, &mut b, stranger, loc(0, 0, 2), 0, 10, 0).unwrap_err();
    assert_eq!(error_code_number(&err), Some(u32::from(ErrorCode::Unauthorized)));

    let err =
        ledger::upgrade_planet(&game, &mut a.planet, &mut a.queue, stranger, 1, 0).unwrap_err();
    assert_eq!(error_code_number(&err), Some(u32::from(ErrorCode::Unauthorized)));

    assert_eq!(a.planet, snapshot);
    assert_eq!(b.planet, Planet::default());
    assert_eq!(game.next_arrival_id, 0);
}

#[test]
fn coordinates_resolve_to_a_claimable_home() {
    let game = new_game();
    let player = Pubkey::new_unique();
    let thresholds = game.planet_thresholds;

    // Scan coordinates the way a client would until a home-class id turns up.
    let (x, home_loc) = (0..10_000i64)
        .map(|x| (x, location_id(x, 0, game.game_id)))
        .find(|(_, id)| {
            planet_traits(id, &thresholds)
                .is_some_and(|t| t.class == PlanetClass::Planet && t.level == 0)
        })
        .unwrap();

    let (profile, home) = join(&game, player, home_loc, 0);

    assert_eq!(profile.home_planet, location_id(x, 0, game.game_id));
    assert_eq!(home.planet.location, home_loc);
    assert_eq!(home.planet.owner, Some(player));
}
