use smallvec::SmallVec;

use crate::entity::{EntityId, PlayerId};
use crate::map::direction::Direction;

/// A placed bomb counting down to its explosion.
#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    pub owner: PlayerId,
    /// The owner's radius when the bomb was placed. Only used if the owner is gone by
    /// the time it explodes.
    pub radius: u32,
    /// Seconds until detonation.
    pub fuse: f32,
    /// Entities that stood on the cell when the bomb was placed. The bomb lets them
    /// walk off and blocks them once they have.
    pub standing: SmallVec<[EntityId; 2]>,
    /// Set while the bomb is sliding after being pushed.
    pub push: Option<Direction>,
}

impl Bomb {
    pub fn new(owner: PlayerId, radius: u32, fuse: f32) -> Self {
        Bomb {
            owner,
            radius,
            fuse,
            standing: SmallVec::new(),
            push: None,
        }
    }

    pub fn is_standing(&self, entity: EntityId) -> bool {
        self.standing.contains(&entity)
    }

    pub fn add_standing(&mut self, entity: EntityId) {
        if !self.is_standing(entity) {
            self.standing.push(entity);
        }
    }

    /// Called when `entity` stops overlapping the bomb.
    pub fn step_off(&mut self, entity: EntityId) {
        self.standing.retain(|id| *id != entity);
    }

    /// Whether the fuse is below the given threshold. Purely cosmetic.
    pub fn is_low_fuse(&self, threshold: f32) -> bool {
        self.fuse <= threshold
    }

    /// Advances the fuse. Returns `true` once it has burnt down.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.fuse -= dt;
        self.fuse <= 0.0
    }
}

/// One cell of an explosion.
#[derive(Debug, Clone, PartialEq)]
pub struct Fire {
    /// The player whose bomb started this fire, credited for kills.
    pub owner: PlayerId,
    /// Seconds left before the fire dies out.
    pub remaining: f32,
}

impl Fire {
    pub fn new(owner: PlayerId, lifetime: f32) -> Self {
        Fire {
            owner,
            remaining: lifetime,
        }
    }
}
