//! JSON messages exchanged between the server and its clients.
//!
//! Transport is out of scope: a message is one JSON object per line, tagged by its
//! `action` field.

use serde::{Deserialize, Serialize};

use crate::entity::PlayerId;
use crate::error::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Message {
    /// Sent by the server to every client, each with its own `player_id`.
    StartGame {
        level: String,
        player_id: PlayerId,
        num_players: usize,
        random_seed: u64,
    },
    /// A change of intent. `dest` is a unit `[dx, dy]` vector, `None` to stop.
    Moved {
        player_id: PlayerId,
        dest: Option<[i32; 2]>,
        /// The sender's lane: its row when moving horizontally or idle, its column
        /// when moving vertically.
        cur_line: i32,
    },
    PutBomb {
        player_id: PlayerId,
    },
    /// The player's connection closed.
    Kill {
        player_id: PlayerId,
    },
    /// Any action this version does not know. Ignored.
    #[serde(other)]
    Unknown,
}

impl Message {
    /// The player the message speaks for, if any.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Message::StartGame { player_id, .. }
            | Message::Moved { player_id, .. }
            | Message::PutBomb { player_id }
            | Message::Kill { player_id } => Some(*player_id),
            Message::Unknown => None,
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(line: &str) -> Result<Message, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }
}
