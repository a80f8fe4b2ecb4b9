use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::bonus::{ANIMATION_FRAMES, FRAME_TIME};

/// Every kind of bonus a destroyed box may leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BonusKind {
    SpeedUp,
    AddBomb,
    MoveBombs,
    IncreaseRadius,
    SpeedDown,
    ReduceRadius,
    ExchangePlaces,
}

impl BonusKind {
    /// Bad bonuses are temporary and wear off.
    pub const fn is_bad(self) -> bool {
        matches!(self, BonusKind::SpeedDown | BonusKind::ReduceRadius)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    /// Current frame of the looping pickup animation.
    pub frame: u8,
    frame_timer: f32,
}

impl Bonus {
    pub fn new(kind: BonusKind) -> Self {
        Bonus {
            kind,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.frame_timer += dt;
        while self.frame_timer >= FRAME_TIME {
            self.frame_timer -= FRAME_TIME;
            self.frame = (self.frame + 1) % ANIMATION_FRAMES;
        }
    }
}
