use std::collections::HashMap;

use crate::entity::PlayerId;
use crate::input::commands::{GameCommand, PlayerCommand};
use crate::input::{Handled, InputEvent, InputHandler, KeyCode};
use crate::map::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Move(Direction),
    PutBomb,
}

/// The two keyboard layouts available to local players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    /// Arrow keys, Space drops a bomb.
    Arrows,
    /// WASD, left Ctrl drops a bomb.
    Wasd,
}

impl ControlScheme {
    /// The scheme of the `index`-th local player. Only two local players are supported.
    pub fn for_local_player(index: usize) -> Option<ControlScheme> {
        match index {
            0 => Some(ControlScheme::Arrows),
            1 => Some(ControlScheme::Wasd),
            _ => None,
        }
    }

    fn bindings(self) -> HashMap<KeyCode, Action> {
        let keys = match self {
            ControlScheme::Arrows => [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right, KeyCode::Space],
            ControlScheme::Wasd => [KeyCode::W, KeyCode::S, KeyCode::A, KeyCode::D, KeyCode::LCtrl],
        };
        let actions = [
            Action::Move(Direction::Up),
            Action::Move(Direction::Down),
            Action::Move(Direction::Left),
            Action::Move(Direction::Right),
            Action::PutBomb,
        ];
        keys.into_iter().zip(actions).collect()
    }
}

/// Drives a player on this machine: commands apply to the simulation directly.
pub struct LocalController {
    player: PlayerId,
    bindings: HashMap<KeyCode, Action>,
}

impl LocalController {
    pub fn new(player: PlayerId, scheme: ControlScheme) -> Self {
        LocalController {
            player,
            bindings: scheme.bindings(),
        }
    }
}

impl InputHandler for LocalController {
    fn handle(&mut self, event: &InputEvent, commands: &mut Vec<GameCommand>) -> Handled {
        let command = match *event {
            InputEvent::KeyDown(key) => match self.bindings.get(&key) {
                Some(Action::Move(direction)) => PlayerCommand::SetIntent(*direction),
                Some(Action::PutBomb) => PlayerCommand::PutBomb,
                None => return Handled::Continue,
            },
            InputEvent::KeyUp(key) => match self.bindings.get(&key) {
                Some(Action::Move(direction)) => PlayerCommand::Release(*direction),
                Some(Action::PutBomb) | None => return Handled::Continue,
            },
            InputEvent::Quit => return Handled::Continue,
        };
        commands.push(GameCommand::Player {
            player: self.player,
            command,
        });
        Handled::Stop
    }
}

/// Drives the local player of a networked match.
///
/// Nothing is applied locally; every change is sent to the server and takes effect
/// when the relayed message comes back, so all peers apply it on the same frame.
pub struct NetworkController {
    player: PlayerId,
    bindings: HashMap<KeyCode, Action>,
    held: Option<Direction>,
}

impl NetworkController {
    pub fn new(player: PlayerId) -> Self {
        NetworkController {
            player,
            bindings: ControlScheme::Arrows.bindings(),
            held: None,
        }
    }
}

impl InputHandler for NetworkController {
    fn handle(&mut self, event: &InputEvent, commands: &mut Vec<GameCommand>) -> Handled {
        let command = match *event {
            InputEvent::KeyDown(key) => match self.bindings.get(&key) {
                Some(Action::Move(direction)) if self.held == Some(*direction) => return Handled::Stop,
                Some(Action::Move(direction)) => {
                    self.held = Some(*direction);
                    PlayerCommand::SetIntent(*direction)
                }
                Some(Action::PutBomb) => PlayerCommand::PutBomb,
                None => return Handled::Continue,
            },
            InputEvent::KeyUp(key) => match self.bindings.get(&key) {
                Some(Action::Move(direction)) if self.held == Some(*direction) => {
                    self.held = None;
                    PlayerCommand::Stop
                }
                Some(_) => return Handled::Stop,
                None => return Handled::Continue,
            },
            InputEvent::Quit => return Handled::Continue,
        };
        commands.push(GameCommand::Send {
            player: self.player,
            command,
        });
        Handled::Stop
    }
}
