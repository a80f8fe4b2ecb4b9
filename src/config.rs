use figment::{
    providers::{Env, Serialized},
    Figment,
};
use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{self, bomb, bonus, fire, player};
use crate::entity::PlayerId;
use crate::error::ConfigError;

/// Prefix of environment variables read by [`Config::load`]. Nested keys are separated
/// by a double underscore, e.g. `BOMBER_TUNING__FUSE=2.5`.
pub const ENV_PREFIX: &str = "BOMBER_";

/// Gameplay constants. Every peer of a networked match must use the same values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub step_length: f32,
    pub player_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub initial_bombs: u32,
    pub initial_radius: u32,
    pub fuse: f32,
    pub low_fuse: f32,
    pub bomb_slide_speed: f32,
    pub fire_lifetime: f32,
    pub bonus_chance: f64,
    pub debuff_duration: f32,
    pub slow_speed: f32,
    pub reduced_radius: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            step_length: player::STEP_LENGTH,
            player_speed: player::SPEED,
            speed_step: player::SPEED_STEP,
            max_speed: player::MAX_SPEED,
            initial_bombs: player::BOMBS,
            initial_radius: player::RADIUS,
            fuse: bomb::FUSE,
            low_fuse: bomb::LOW_FUSE,
            bomb_slide_speed: bomb::SLIDE_SPEED,
            fire_lifetime: fire::LIFETIME,
            bonus_chance: bonus::SPAWN_CHANCE,
            debuff_duration: bonus::DEBUFF_DURATION,
            slow_speed: bonus::SLOW_SPEED,
            reduced_radius: bonus::REDUCED_RADIUS,
        }
    }
}

impl Tuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("step_length", self.step_length),
            ("player_speed", self.player_speed),
            ("max_speed", self.max_speed),
            ("bomb_slide_speed", self.bomb_slide_speed),
            ("slow_speed", self.slow_speed),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0.0 || !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("tuning.{name} must be positive, got {value}")));
        }
        if self.initial_radius == 0 || self.reduced_radius == 0 {
            return Err(ConfigError::Invalid("blast radius must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.bonus_chance) {
            return Err(ConfigError::Invalid(format!(
                "tuning.bonus_chance must be within [0, 1], got {}",
                self.bonus_chance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation frames per second; the time step is its inverse.
    pub framerate: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Display names by player id. Missing entries fall back to `Player N`.
    pub player_names: Vec<String>,
    pub server_port: u16,
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            framerate: constants::FRAMERATE,
            screen_width: constants::DEFAULT_SCREEN_SIZE.x,
            screen_height: constants::DEFAULT_SCREEN_SIZE.y,
            player_names: Vec::new(),
            server_port: 5555,
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by `BOMBER_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Config, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Config, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.framerate == 0 {
            return Err(ConfigError::Invalid("framerate must be positive".into()));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid("screen size must be positive".into()));
        }
        self.tuning.validate()
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.framerate as f32
    }

    pub fn screen_size(&self) -> UVec2 {
        UVec2::new(self.screen_width, self.screen_height)
    }

    pub fn player_name(&self, player: PlayerId) -> String {
        self.player_names
            .get(player)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player + 1))
    }
}
