//! The match session: stages, rounds, input and network plumbing.

use std::collections::VecDeque;

use tracing::{debug, info, info_span, warn};

use crate::config::Config;
use crate::entity::PlayerId;
use crate::error::{GameResult, SessionError};
use crate::formatter;
use crate::game::score::Scoreboard;
use crate::game::state::GameStage;
use crate::game::world::World;
use crate::input::commands::{GameCommand, PlayerCommand};
use crate::input::{InputEvent, InputRouter};
use crate::map::direction::Direction;
use crate::map::Level;
use crate::net::protocol::Message;
use crate::systems;

pub mod score;
pub mod state;
pub mod world;

/// A round the server asked this client to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRequest {
    pub level: String,
    pub player_id: PlayerId,
    pub num_players: usize,
    pub random_seed: u64,
}

/// Drives a match from round to round.
pub struct Game {
    config: Config,
    stage: GameStage,
    world: Option<World>,
    scoreboard: Scoreboard,
    router: InputRouter,
    inbound: VecDeque<Message>,
    outbound: VecDeque<Message>,
    round_request: Option<RoundRequest>,
    rounds: u32,
    ticks: u64,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Game {
            config,
            stage: GameStage::Loading,
            world: None,
            scoreboard: Scoreboard::default(),
            router: InputRouter::new(),
            inbound: VecDeque::new(),
            outbound: VecDeque::new(),
            round_request: None,
            rounds: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// Rounds started so far in this match.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn expect_stage(&self, action: &'static str, allowed: impl Fn(&GameStage) -> bool) -> Result<(), SessionError> {
        if allowed(&self.stage) {
            Ok(())
        } else {
            Err(SessionError::InvalidStage {
                action,
                stage: self.stage,
            })
        }
    }

    /// Starts a round on `level`. The scoreboard carries over while the number of
    /// players stays the same.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidStage`] outside of `Loading`, and any error from
    /// building the round's world.
    pub fn start_round(&mut self, level: Level, num_players: usize, seed: u64) -> GameResult<()> {
        self.expect_stage("start a round", |stage| *stage == GameStage::Loading)?;

        let world = World::new(level, num_players, seed, self.config.tuning.clone())?;
        if self.scoreboard.len() != num_players {
            let names = (0..num_players).map(|player| self.config.player_name(player)).collect();
            self.scoreboard = Scoreboard::new(names);
        }
        self.scoreboard.thaw();

        self.world = Some(world);
        self.rounds += 1;
        self.stage = GameStage::Running;
        info!(round = self.rounds, num_players, seed, "Round started");
        Ok(())
    }

    /// Leaves the result screen for the next round.
    pub fn next_round(&mut self) -> GameResult<()> {
        self.expect_stage("continue", |stage| matches!(stage, GameStage::RoundOver { .. }))?;
        self.stage = GameStage::Loading;
        Ok(())
    }

    /// Tears everything down. Final from any stage.
    pub fn quit(&mut self) {
        if self.stage == GameStage::Terminated {
            return;
        }
        self.world = None;
        self.router.clear();
        self.inbound.clear();
        self.round_request = None;
        self.stage = GameStage::Terminated;
        info!(rounds = self.rounds, "Game terminated");
    }

    /// Routes an input event through the registered controllers.
    pub fn handle_input(&mut self, event: InputEvent) {
        if event == InputEvent::Quit {
            self.quit();
            return;
        }
        for command in self.router.dispatch(&event) {
            self.apply_command(command);
        }
    }

    pub fn apply_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::Player { player, command } => {
                if let Some(world) = self.world.as_mut().filter(|_| self.stage.is_running()) {
                    systems::player::apply(world, player, command);
                }
            }
            GameCommand::Send { player, command } => self.send(player, command),
            GameCommand::Quit => self.quit(),
        }
    }

    fn send(&mut self, player: PlayerId, command: PlayerCommand) {
        let message = match command {
            PlayerCommand::SetIntent(direction) => self.moved(player, Some(direction)),
            PlayerCommand::Release(_) | PlayerCommand::Stop => self.moved(player, None),
            PlayerCommand::PutBomb => Message::PutBomb { player_id: player },
        };
        self.outbound.push_back(message);
    }

    fn moved(&self, player: PlayerId, direction: Option<Direction>) -> Message {
        let cur_line = self
            .world
            .as_ref()
            .and_then(|world| world.lane_of(player, direction))
            .unwrap_or_default();
        Message::Moved {
            player_id: player,
            dest: direction.map(Direction::to_wire),
            cur_line,
        }
    }

    /// Queues a message received from the server for the next tick.
    pub fn push_inbound(&mut self, message: Message) {
        self.inbound.push_back(message);
    }

    /// Messages to send to the server, oldest first.
    pub fn drain_outbound(&mut self) -> Vec<Message> {
        self.outbound.drain(..).collect()
    }

    /// The last `start_game` received and not yet acted on.
    pub fn take_round_request(&mut self) -> Option<RoundRequest> {
        self.round_request.take()
    }

    fn receive(&mut self, message: Message) {
        match message {
            Message::StartGame {
                level,
                player_id,
                num_players,
                random_seed,
            } => {
                if player_id >= num_players {
                    warn!(player_id, num_players, "Invalid start_game ignored");
                    return;
                }
                self.round_request = Some(RoundRequest {
                    level,
                    player_id,
                    num_players,
                    random_seed,
                });
            }
            Message::Moved {
                player_id,
                dest,
                cur_line,
            } => {
                let Some(world) = self.running_world(player_id) else {
                    return;
                };
                let direction = match dest {
                    Some(vector) => match Direction::from_wire(vector) {
                        Some(direction) => Some(direction),
                        None => {
                            warn!(player_id, ?vector, "Invalid direction ignored");
                            return;
                        }
                    },
                    None => None,
                };
                if let Some(lane) = world.lane_of(player_id, direction) {
                    if lane != cur_line {
                        warn!(player_id, local = lane, remote = cur_line, "Player out of sync");
                    }
                }
                let command = direction.map_or(PlayerCommand::Stop, PlayerCommand::SetIntent);
                systems::player::apply(world, player_id, command);
            }
            Message::PutBomb { player_id } => {
                if let Some(world) = self.running_world(player_id) {
                    systems::player::apply(world, player_id, PlayerCommand::PutBomb);
                }
            }
            Message::Kill { player_id } => {
                if let Some(world) = self.running_world(player_id) {
                    world.disconnect(player_id);
                }
            }
            Message::Unknown => debug!("Unknown message ignored"),
        }
    }

    fn running_world(&mut self, player: PlayerId) -> Option<&mut World> {
        if !self.stage.is_running() {
            return None;
        }
        let world = self.world.as_mut()?;
        if player >= world.num_players() {
            warn!(player, "Message for a player outside the roster ignored");
            return None;
        }
        Some(world)
    }

    /// Simulates one frame of `dt` seconds.
    ///
    /// Inbound messages are applied first. The round ends at the end of the tick in
    /// which fewer than two players remain, so an explosion in progress always
    /// completes.
    pub fn tick(&mut self, dt: f32) {
        let messages: Vec<Message> = self.inbound.drain(..).collect();
        for message in messages {
            self.receive(message);
        }

        if !self.stage.is_running() {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        self.ticks += 1;
        formatter::increment_tick();
        let _span = info_span!("tick", round = self.rounds).entered();

        world.dt = dt;
        systems::update(world);

        for event in world.drain_events() {
            self.scoreboard.record(&event);
        }

        if world.num_players() >= 2 && world.alive_count() < 2 {
            let winner = world.survivor();
            self.scoreboard.freeze();
            self.world = None;
            self.stage = GameStage::RoundOver { winner };
            info!(?winner, scores = ?self.scoreboard.scores(), "Round over");
        }
    }
}
