use glam::Vec2;

use crate::config::Tuning;
use crate::map::direction::Direction;

/// Index of a player in the round roster, stable for the whole match.
pub type PlayerId = usize;

/// A temporary override of an attribute that restores the saved baseline on expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEffect<T> {
    pub baseline: T,
    pub remaining: f32,
}

impl<T: Copy> TimedEffect<T> {
    /// Overrides `field` with `value` for `duration` seconds.
    ///
    /// Re-applying while active only resets the countdown; the baseline saved by the
    /// first application is kept.
    pub fn apply(slot: &mut Option<Self>, field: &mut T, value: T, duration: f32) {
        match slot {
            Some(effect) => effect.remaining = duration,
            None => {
                *slot = Some(TimedEffect {
                    baseline: *field,
                    remaining: duration,
                })
            }
        }
        *field = value;
    }

    /// Counts the effect down. Returns `true` when it expired on this tick.
    pub fn tick(slot: &mut Option<Self>, field: &mut T, dt: f32) -> bool {
        let Some(effect) = slot else {
            return false;
        };
        effect.remaining -= dt;
        if effect.remaining > 0.0 {
            return false;
        }
        *field = effect.baseline;
        *slot = None;
        true
    }
}

/// A step in progress from one cell towards the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub origin: Vec2,
    pub direction: Direction,
    /// Seconds of movement left.
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Bombs that can still be placed.
    pub bombs: u32,
    /// Cells per second.
    pub speed: f32,
    pub radius: u32,
    pub can_move_bombs: bool,
    pub kills: u32,
    pub intent: Option<Direction>,
    pub facing: Direction,
    pub step: Option<Step>,
    pub speed_effect: Option<TimedEffect<f32>>,
    pub radius_effect: Option<TimedEffect<u32>>,
}

impl Player {
    pub fn new(id: PlayerId, tuning: &Tuning) -> Self {
        Player {
            id,
            bombs: tuning.initial_bombs,
            speed: tuning.player_speed,
            radius: tuning.initial_radius,
            can_move_bombs: false,
            kills: 0,
            intent: None,
            facing: Direction::default(),
            step: None,
            speed_effect: None,
            radius_effect: None,
        }
    }

    pub fn set_intent(&mut self, direction: Direction) {
        self.intent = Some(direction);
        self.facing = direction;
    }

    /// Clears the intent, but only if it is still `direction`.
    pub fn release(&mut self, direction: Direction) {
        if self.intent == Some(direction) {
            self.intent = None;
        }
    }

    pub fn stop(&mut self) {
        self.intent = None;
    }

    pub fn is_stepping(&self) -> bool {
        self.step.is_some()
    }

    pub fn speed_up(&mut self, step: f32, max: f32) {
        match &mut self.speed_effect {
            Some(effect) => effect.baseline = (effect.baseline + step).min(max),
            None => self.speed = (self.speed + step).min(max),
        }
    }

    pub fn increase_radius(&mut self) {
        match &mut self.radius_effect {
            Some(effect) => effect.baseline += 1,
            None => self.radius += 1,
        }
    }

    pub fn slow_down(&mut self, speed: f32, duration: f32) {
        TimedEffect::apply(&mut self.speed_effect, &mut self.speed, speed, duration);
    }

    pub fn reduce_radius(&mut self, radius: u32, duration: f32) {
        TimedEffect::apply(&mut self.radius_effect, &mut self.radius, radius, duration);
    }

    /// Advances both debuff timers.
    pub fn tick_effects(&mut self, dt: f32) {
        TimedEffect::tick(&mut self.speed_effect, &mut self.speed, dt);
        TimedEffect::tick(&mut self.radius_effect, &mut self.radius, dt);
    }
}
