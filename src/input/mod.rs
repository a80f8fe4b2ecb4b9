//! Keyboard events and the router dispatching them to controllers.

use strum_macros::{AsRefStr, EnumString};
use tracing::{debug, trace};

use crate::input::commands::GameCommand;

pub mod commands;
pub mod controller;

/// The keys the game binds. Names parse case-insensitively, e.g. `"lctrl"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Space,
    W,
    A,
    S,
    D,
    LCtrl,
    Escape,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Quit,
}

/// Whether later handlers should also see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Continue,
    Stop,
}

pub trait InputHandler {
    /// Reacts to `event`, pushing any resulting commands.
    fn handle(&mut self, event: &InputEvent, commands: &mut Vec<GameCommand>) -> Handled;
}

/// Token returned by [`InputRouter::register`], needed to unregister the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u32);

/// Dispatches events to handlers in registration order.
#[derive(Default)]
pub struct InputRouter {
    handlers: Vec<(HandlerId, Box<dyn InputHandler>)>,
    next_id: u32,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn InputHandler>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        debug!(handler = id.0, "Input handler registered");
        id
    }

    /// Returns whether the handler was registered.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler, _)| *handler != id);
        before != self.handlers.len()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offers `event` to each handler until one stops propagation.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<GameCommand> {
        let mut commands = Vec::new();
        for (id, handler) in &mut self.handlers {
            if handler.handle(event, &mut commands) == Handled::Stop {
                trace!(handler = id.0, ?event, "Event consumed");
                break;
            }
        }
        commands
    }
}
