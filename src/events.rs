use glam::IVec2;

use crate::entity::{BonusKind, PlayerId};

/// Something that happened during a tick, collected by the world and folded into
/// the session (scores, logs) once the tick has completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    BombPlaced { player: PlayerId, cell: IVec2 },
    Detonated { owner: PlayerId, cell: IVec2 },
    BonusCollected { player: PlayerId, kind: BonusKind },
    /// `killer` equals `victim` for a self-kill.
    PlayerKilled { victim: PlayerId, killer: PlayerId },
    /// The player's connection went away. Never scored.
    PlayerLeft { player: PlayerId },
}
