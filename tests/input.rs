use std::str::FromStr;

use bomber::input::commands::{GameCommand, PlayerCommand};
use bomber::input::controller::{ControlScheme, LocalController, NetworkController};
use bomber::input::{InputEvent, InputRouter, KeyCode};
use bomber::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn local_pair() -> InputRouter {
    let mut router = InputRouter::new();
    for player in 0..2 {
        let scheme = ControlScheme::for_local_player(player).unwrap();
        router.register(Box::new(LocalController::new(player, scheme)));
    }
    router
}

fn player(player: usize, command: PlayerCommand) -> GameCommand {
    GameCommand::Player { player, command }
}

fn send(command: PlayerCommand) -> GameCommand {
    GameCommand::Send { player: 0, command }
}

#[test]
fn test_key_names() {
    assert_eq!(KeyCode::from_str("lctrl"), Ok(KeyCode::LCtrl));
    assert_eq!(KeyCode::from_str("SPACE"), Ok(KeyCode::Space));
    assert_eq!(KeyCode::Return.as_ref(), "Return");
    assert_that(&KeyCode::from_str("F1").is_err()).is_true();
}

#[test]
fn test_two_local_layouts() {
    let mut router = local_pair();

    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Up)),
        vec![player(0, PlayerCommand::SetIntent(Direction::Up))]
    );
    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::A)),
        vec![player(1, PlayerCommand::SetIntent(Direction::Left))]
    );
    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::LCtrl)),
        vec![player(1, PlayerCommand::PutBomb)]
    );
    assert_eq!(
        router.dispatch(&InputEvent::KeyUp(KeyCode::D)),
        vec![player(1, PlayerCommand::Release(Direction::Right))]
    );
    assert_that(&router.dispatch(&InputEvent::KeyUp(KeyCode::Space))).is_empty();
    assert_that(&router.dispatch(&InputEvent::KeyDown(KeyCode::Escape))).is_empty();
    assert_eq!(ControlScheme::for_local_player(2), None);
}

#[test]
fn test_first_handler_consumes_event() {
    let mut router = InputRouter::new();
    let first = router.register(Box::new(LocalController::new(0, ControlScheme::Arrows)));
    router.register(Box::new(LocalController::new(1, ControlScheme::Arrows)));

    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Space)),
        vec![player(0, PlayerCommand::PutBomb)]
    );

    assert_that(&router.unregister(first)).is_true();
    assert_that(&router.unregister(first)).is_false();
    assert_eq!(router.len(), 1);
    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Space)),
        vec![player(1, PlayerCommand::PutBomb)]
    );

    router.clear();
    assert_that(&router.is_empty()).is_true();
    assert_that(&router.dispatch(&InputEvent::KeyDown(KeyCode::Space))).is_empty();
}

#[test]
fn test_network_controller_sends() {
    let mut router = InputRouter::new();
    router.register(Box::new(NetworkController::new(0)));

    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Right)),
        vec![send(PlayerCommand::SetIntent(Direction::Right))]
    );
    // Key repeat of the held direction.
    assert_that(&router.dispatch(&InputEvent::KeyDown(KeyCode::Right))).is_empty();
    // Releasing a key that is not held changes nothing.
    assert_that(&router.dispatch(&InputEvent::KeyUp(KeyCode::Left))).is_empty();

    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Up)),
        vec![send(PlayerCommand::SetIntent(Direction::Up))]
    );
    assert_that(&router.dispatch(&InputEvent::KeyUp(KeyCode::Right))).is_empty();
    assert_eq!(router.dispatch(&InputEvent::KeyUp(KeyCode::Up)), vec![send(PlayerCommand::Stop)]);
    assert_eq!(
        router.dispatch(&InputEvent::KeyDown(KeyCode::Space)),
        vec![send(PlayerCommand::PutBomb)]
    );
}
