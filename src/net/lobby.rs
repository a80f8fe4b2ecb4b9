use tracing::{info, warn};

use crate::entity::PlayerId;
use crate::net::protocol::Message;

/// A message to deliver to one connection.
pub type Outgoing = (PlayerId, Message);

/// Server-side bookkeeping of connected clients.
///
/// Each connection is identified by the player id it was assigned on arrival.
/// Messages from clients are relayed to every connected client, the sender included,
/// which is how a client learns its own input took effect.
#[derive(Debug, Default)]
pub struct Lobby {
    connected: Vec<bool>,
    started: bool,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn num_players(&self) -> usize {
        self.connected.len()
    }

    fn connections(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.connected
            .iter()
            .enumerate()
            .filter_map(|(player, connected)| connected.then_some(player))
    }

    /// Assigns the next player id, or refuses once the game has started.
    pub fn connect(&mut self) -> Option<PlayerId> {
        if self.started {
            warn!("Connection refused, game already started");
            return None;
        }
        let player = self.connected.len();
        self.connected.push(true);
        info!(player, "Client connected");
        Some(player)
    }

    /// Drops a connection. During a game the others are told to remove the player.
    pub fn disconnect(&mut self, player: PlayerId) -> Vec<Outgoing> {
        let Some(connected) = self.connected.get_mut(player).filter(|connected| **connected) else {
            return Vec::new();
        };
        *connected = false;
        info!(player, "Client disconnected");

        if !self.started {
            return Vec::new();
        }
        self.broadcast(Message::Kill { player_id: player })
    }

    /// Starts the game, sending every client its own `start_game`.
    pub fn start(&mut self, level: &str, random_seed: u64) -> Vec<Outgoing> {
        self.started = true;
        let num_players = self.connected.len();
        info!(level, num_players, random_seed, "Game started");
        self.connections()
            .map(|player| {
                let message = Message::StartGame {
                    level: level.to_owned(),
                    player_id: player,
                    num_players,
                    random_seed,
                };
                (player, message)
            })
            .collect()
    }

    /// Relays a message received from `sender`.
    ///
    /// Only `moved` and `put_bomb` are relayed, and only when their `player_id` is the
    /// sender's own id.
    pub fn relay(&self, sender: PlayerId, message: Message) -> Vec<Outgoing> {
        if !self.started {
            warn!(sender, ?message, "Message before game start dropped");
            return Vec::new();
        }
        match message {
            Message::Moved { player_id, .. } | Message::PutBomb { player_id } if player_id == sender => {
                self.broadcast(message)
            }
            Message::Moved { .. } | Message::PutBomb { .. } => {
                warn!(sender, claimed = message.player_id(), "Spoofed message dropped");
                Vec::new()
            }
            _ => {
                warn!(sender, ?message, "Unexpected message from client dropped");
                Vec::new()
            }
        }
    }

    fn broadcast(&self, message: Message) -> Vec<Outgoing> {
        self.connections().map(|player| (player, message.clone())).collect()
    }
}
