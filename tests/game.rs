use bomber::config::Config;
use bomber::entity::Groups;
use bomber::error::{GameError, SessionError};
use bomber::game::state::GameStage;
use bomber::game::world::World;
use bomber::game::{Game, RoundRequest};
use bomber::input::controller::{ControlScheme, LocalController, NetworkController};
use bomber::input::{InputEvent, KeyCode};
use bomber::map::direction::Direction;
use bomber::net::protocol::Message;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{CORRIDOR, DT};

/// P0 can hide below its start; P1 is stuck next to it.
const POCKET: &str = "5 5 2\nWWWWW\nW12 W\nW W W\nW   W\nWWWWW\n";

fn running(source: &str, players: usize) -> Game {
    let mut game = Game::new(Config::default());
    game.start_round(common::level(source), players, 7).unwrap();
    game
}

fn run_round(game: &mut Game, max_ticks: usize) {
    for _ in 0..max_ticks {
        if !game.stage().is_running() {
            break;
        }
        game.tick(DT);
    }
}

#[test]
fn test_local_round_end_to_end() {
    let mut game = running(POCKET, 2);
    for player in 0..2 {
        let scheme = ControlScheme::for_local_player(player).unwrap();
        game.router_mut().register(Box::new(LocalController::new(player, scheme)));
    }

    game.handle_input(InputEvent::KeyDown(KeyCode::Space));
    game.handle_input(InputEvent::KeyDown(KeyCode::Down));
    run_round(&mut game, 300);

    assert_eq!(game.stage(), GameStage::RoundOver { winner: Some(0) });
    assert_that(&game.world()).is_none();
    assert_eq!(game.scoreboard().final_scores(), Some(&[1, 0][..]));
    assert_eq!(game.scoreboard().table()[0].1, 1);

    // Scores carry over into the next round.
    game.next_round().unwrap();
    assert_eq!(game.stage(), GameStage::Loading);
    game.start_round(common::level(POCKET), 2, 8).unwrap();
    assert_eq!(game.rounds(), 2);
    assert_eq!(game.scoreboard().scores(), &[1, 0]);
    assert_that(&game.scoreboard().final_scores()).is_none();
}

#[test]
fn test_stage_transitions() {
    let mut game = running(CORRIDOR, 2);

    let result = game.start_round(common::level(CORRIDOR), 2, 0);
    assert_that(&matches!(
        result,
        Err(GameError::Session(SessionError::InvalidStage {
            stage: GameStage::Running,
            ..
        }))
    ))
    .is_true();

    let result = game.next_round();
    assert_that(&matches!(result, Err(GameError::Session(SessionError::InvalidStage { .. })))).is_true();

    game.router_mut().register(Box::new(NetworkController::new(0)));
    game.handle_input(InputEvent::Quit);
    assert_eq!(game.stage(), GameStage::Terminated);
    assert_that(&game.world()).is_none();
    assert_that(&game.router_mut().is_empty()).is_true();

    // Nothing revives a terminated game.
    game.tick(DT);
    let result = game.start_round(common::level(CORRIDOR), 2, 0);
    assert_that(&result.is_err()).is_true();
}

#[test]
fn test_too_many_players() {
    let result = World::new(common::level(CORRIDOR), 3, 0, Default::default());
    assert_that(&matches!(
        result,
        Err(SessionError::TooManyPlayers { requested: 3, max: 2 })
    ))
    .is_true();
}

#[test]
fn test_insufficient_spawn_points() {
    let result = World::new(common::level("3 5 3\nWWWWW\nW1S W\nWWWWW\n"), 3, 0, Default::default());
    assert_that(&matches!(
        result,
        Err(SessionError::InsufficientSpawnPoints {
            requested: 3,
            available: 2
        })
    ))
    .is_true();
}

#[test]
fn test_spawn_assignment_is_seeded() {
    let source = "4 6 3\nWWWWWW\nWS  SW\nW S  W\nWWWWWW\n";
    let spawns = |seed| {
        let world = World::new(common::level(source), 3, seed, Default::default()).unwrap();
        (0..3).map(|player| common::position(&world, common::entity(&world, player))).collect::<Vec<Vec2>>()
    };

    let first = spawns(11);
    assert_eq!(first, spawns(11));

    let mut sorted: Vec<(i32, i32)> = first.iter().map(|cell| (cell.x as i32, cell.y as i32)).collect();
    sorted.sort();
    assert_eq!(sorted, vec![(1, 1), (2, 2), (4, 1)]);
}

#[test]
fn test_single_player_round_never_ends() {
    let mut game = running("3 5 1\nWWWWW\nW1  W\nWWWWW\n", 1);
    game.router_mut().register(Box::new(LocalController::new(0, ControlScheme::Arrows)));

    game.handle_input(InputEvent::KeyDown(KeyCode::Space));
    run_round(&mut game, 200);

    assert_that(&game.stage().is_running()).is_true();
    assert_eq!(game.ticks(), 200);
    let world = game.world().unwrap();
    assert_eq!(world.alive_count(), 0);
    // Blowing yourself up costs a point.
    assert_eq!(game.scoreboard().score(0), Some(-1));
}

#[test]
fn test_network_input_applies_on_echo() {
    let mut game = running(CORRIDOR, 2);
    game.router_mut().register(Box::new(NetworkController::new(0)));

    game.handle_input(InputEvent::KeyDown(KeyCode::Right));
    let outbound = game.drain_outbound();
    assert_eq!(
        outbound,
        vec![Message::Moved {
            player_id: 0,
            dest: Some(Direction::Right.to_wire()),
            cur_line: 1,
        }]
    );
    // Not applied until the server relays it back.
    assert_eq!(game.world().and_then(|world| world.player(0)).and_then(|player| player.intent), None);

    for message in outbound {
        game.push_inbound(message);
    }
    game.tick(DT);
    let world = game.world().unwrap();
    assert_eq!(world.player(0).and_then(|player| player.intent), Some(Direction::Right));
    assert_that(&world.player(0).unwrap().is_stepping()).is_true();

    game.handle_input(InputEvent::KeyUp(KeyCode::Right));
    game.handle_input(InputEvent::KeyDown(KeyCode::Space));
    assert_eq!(
        game.drain_outbound(),
        vec![
            Message::Moved {
                player_id: 0,
                dest: None,
                cur_line: 1,
            },
            Message::PutBomb { player_id: 0 },
        ]
    );
}

#[test]
fn test_vertical_move_reports_column() {
    let mut game = running(POCKET, 2);
    game.router_mut().register(Box::new(NetworkController::new(1)));

    game.handle_input(InputEvent::KeyDown(KeyCode::Down));

    assert_eq!(
        game.drain_outbound(),
        vec![Message::Moved {
            player_id: 1,
            dest: Some([0, 1]),
            cur_line: 2,
        }]
    );
}

#[test]
fn test_remote_bomb_and_out_of_roster_ids() {
    let mut game = running(CORRIDOR, 2);

    game.push_inbound(Message::PutBomb { player_id: 5 });
    game.push_inbound(Message::Moved {
        player_id: 9,
        dest: Some([1, 0]),
        cur_line: 0,
    });
    game.push_inbound(Message::Unknown);
    game.tick(DT);
    assert_eq!(common::count(game.world().unwrap(), Groups::BOMBS), 0);

    game.push_inbound(Message::PutBomb { player_id: 1 });
    game.tick(DT);
    assert_eq!(common::cells(game.world().unwrap(), Groups::BOMBS), vec![(6, 1)]);
}

#[test]
fn test_invalid_direction_ignored() {
    let mut game = running(CORRIDOR, 2);
    game.push_inbound(Message::Moved {
        player_id: 0,
        dest: Some([1, 1]),
        cur_line: 1,
    });
    game.tick(DT);

    assert_eq!(game.world().and_then(|world| world.player(0)).and_then(|player| player.intent), None);
}

#[test]
fn test_kill_message_ends_round_without_score() {
    let mut game = running(CORRIDOR, 2);

    game.push_inbound(Message::Kill { player_id: 1 });
    game.tick(DT);

    assert_eq!(game.stage(), GameStage::RoundOver { winner: Some(0) });
    assert_eq!(game.scoreboard().final_scores(), Some(&[0, 0][..]));
}

#[test]
fn test_start_game_request() {
    let mut game = Game::new(Config::default());

    game.push_inbound(Message::StartGame {
        level: "arena".into(),
        player_id: 2,
        num_players: 2,
        random_seed: 1,
    });
    game.tick(DT);
    assert_that(&game.take_round_request()).is_none();

    game.push_inbound(Message::StartGame {
        level: "arena".into(),
        player_id: 1,
        num_players: 2,
        random_seed: 1,
    });
    game.tick(DT);
    assert_eq!(
        game.take_round_request(),
        Some(RoundRequest {
            level: "arena".into(),
            player_id: 1,
            num_players: 2,
            random_seed: 1,
        })
    );
    assert_that(&game.take_round_request()).is_none();
    assert_eq!(game.stage(), GameStage::Loading);
}
