use crate::entity::PlayerId;
use crate::map::direction::Direction;

/// An order for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    SetIntent(Direction),
    Release(Direction),
    Stop,
    PutBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Apply to the local simulation right away.
    Player { player: PlayerId, command: PlayerCommand },
    /// Send to the server; applied once the relayed message comes back.
    Send { player: PlayerId, command: PlayerCommand },
    Quit,
}
