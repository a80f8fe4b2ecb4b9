//! The state of a single round.

use glam::IVec2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::Tuning;
use crate::entity::registry::Registry;
use crate::entity::{Body, EntityId, Player, PlayerId};
use crate::error::SessionError;
use crate::events::GameEvent;
use crate::map::direction::Direction;
use crate::map::parser::Tile;
use crate::map::Level;

/// Everything a round simulates, passed explicitly to every system.
#[derive(Debug)]
pub struct World {
    pub level: Level,
    pub registry: Registry,
    pub tuning: Tuning,
    /// Seeded from the round seed, so every peer draws the same numbers.
    pub rng: ChaCha8Rng,
    /// Seconds simulated by the current tick.
    pub dt: f32,
    roster: Vec<Option<EntityId>>,
    alive: usize,
    events: Vec<GameEvent>,
}

impl World {
    /// Builds the board for a new round and places `num_players` players.
    ///
    /// Players with a digit marker in the level start there; everyone else is given
    /// one of the `S` markers in a seeded random order.
    pub fn new(level: Level, num_players: usize, seed: u64, tuning: Tuning) -> Result<World, SessionError> {
        if num_players > level.max_players() {
            return Err(SessionError::TooManyPlayers {
                requested: num_players,
                max: level.max_players(),
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let starts = assign_starts(&level, num_players, &mut rng)?;

        let mut registry = Registry::new();
        for (cell, tile) in level.cells() {
            match tile {
                Tile::Wall => {
                    registry.spawn(cell.as_vec2(), Body::Wall);
                }
                Tile::Box => {
                    registry.spawn(cell.as_vec2(), Body::Box);
                }
                Tile::Empty | Tile::Spawn | Tile::Start(_) => {}
            }
        }

        let roster = starts
            .iter()
            .enumerate()
            .map(|(id, cell)| Some(registry.spawn(cell.as_vec2(), Body::Player(Player::new(id, &tuning)))))
            .collect();

        info!(players = num_players, seed, entities = registry.len(), "Round prepared");

        Ok(World {
            level,
            registry,
            tuning,
            rng,
            dt: 0.0,
            roster,
            alive: num_players,
            events: Vec::new(),
        })
    }

    pub fn num_players(&self) -> usize {
        self.roster.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.player_entity(player).is_some()
    }

    pub fn player_entity(&self, player: PlayerId) -> Option<EntityId> {
        self.roster.get(player).copied().flatten()
    }

    pub fn living_players(&self) -> impl Iterator<Item = (PlayerId, EntityId)> + '_ {
        self.roster
            .iter()
            .enumerate()
            .filter_map(|(player, entity)| entity.map(|entity| (player, entity)))
    }

    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.registry.get(self.player_entity(player)?)?.as_player()
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut Player> {
        let entity = self.player_entity(player)?;
        self.registry.get_mut(entity)?.as_player_mut()
    }

    /// The lane a player moving in `direction` is on: its column when moving
    /// vertically, its row otherwise.
    pub fn lane_of(&self, player: PlayerId, direction: Option<Direction>) -> Option<i32> {
        let cell = self.registry.get(self.player_entity(player)?)?.cell();
        Some(match direction {
            Some(direction) if !direction.is_horizontal() => cell.x,
            _ => cell.y,
        })
    }

    /// The only player left, if exactly one is alive.
    pub fn survivor(&self) -> Option<PlayerId> {
        let mut living = self.living_players();
        match (living.next(), living.next()) {
            (Some((player, _)), None) => Some(player),
            _ => None,
        }
    }

    /// Removes a player hit by fire from `killer`'s bomb and credits the kill.
    ///
    /// Killing an already dead player does nothing.
    pub fn kill_player(&mut self, victim: PlayerId, killer: PlayerId) {
        if !self.remove_player(victim) {
            return;
        }
        if killer != victim {
            if let Some(player) = self.player_mut(killer) {
                player.kills += 1;
            }
        }
        info!(victim, killer, alive = self.alive, "Player killed");
        self.events.push(GameEvent::PlayerKilled { victim, killer });
    }

    /// Removes a player whose connection closed.
    pub fn disconnect(&mut self, player: PlayerId) {
        if self.remove_player(player) {
            info!(player, alive = self.alive, "Player left");
            self.events.push(GameEvent::PlayerLeft { player });
        }
    }

    fn remove_player(&mut self, player: PlayerId) -> bool {
        let Some(entity) = self.roster.get_mut(player).and_then(Option::take) else {
            return false;
        };
        self.registry.remove(entity);
        self.alive -= 1;
        true
    }

    pub fn push_event(&mut self, event: GameEvent) {
        debug!(?event, "World event");
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn assign_starts(level: &Level, num_players: usize, rng: &mut ChaCha8Rng) -> Result<Vec<IVec2>, SessionError> {
    let fixed: Vec<Option<IVec2>> = (0..num_players).map(|player| level.fixed_start(player)).collect();
    let unplaced = fixed.iter().filter(|cell| cell.is_none()).count();

    let mut spawns = level.spawn_points();
    if spawns.len() < unplaced {
        return Err(SessionError::InsufficientSpawnPoints {
            requested: num_players,
            available: num_players - unplaced + spawns.len(),
        });
    }
    spawns.shuffle(rng);

    let mut spawns = spawns.into_iter();
    Ok(fixed
        .into_iter()
        .map(|cell| cell.or_else(|| spawns.next()).unwrap_or_default())
        .collect())
}
