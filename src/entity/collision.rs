use glam::{IVec2, Vec2};

use crate::constants::BOX_INSET;
use crate::entity::{Entity, EntityId, EntityKind};

/// Axis-aligned bounding box in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// The collision box of an entity whose top-left corner is at `position`.
    pub fn at(position: Vec2) -> Self {
        Aabb {
            min: position + Vec2::splat(BOX_INSET),
            max: position + Vec2::splat(1.0 - BOX_INSET),
        }
    }

    pub fn cell(cell: IVec2) -> Self {
        Self::at(cell.as_vec2())
    }

    /// Strict overlap: boxes that only touch do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x && self.min.y < other.max.y && other.min.y < self.max.y
    }
}

/// How one entity reacts to another overlapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Pass,
    Block,
    /// Block unless the other entity stood on this bomb when it was placed.
    Footing,
}

/// The reaction of a `this` entity to an `other` entity. Unlisted pairs pass.
pub const fn response(this: EntityKind, other: EntityKind) -> Response {
    use EntityKind::*;

    match (this, other) {
        (Wall | Box, Player | Bomb) => Response::Block,
        (Bomb, Player) => Response::Footing,
        (Bomb, Bomb) => Response::Block,
        _ => Response::Pass,
    }
}

/// Whether `this` lets `other` overlap it.
pub fn allows(this: &Entity, other: &Entity, other_id: EntityId) -> bool {
    match response(this.kind(), other.kind()) {
        Response::Pass => true,
        Response::Block => false,
        Response::Footing => this.as_bomb().is_some_and(|bomb| bomb.is_standing(other_id)),
    }
}
