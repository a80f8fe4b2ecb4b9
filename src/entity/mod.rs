//! The entity model: every live object in a round is an [`Entity`] owned by the
//! [`registry::Registry`].

use std::fmt;

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use strum_macros::{Display, EnumDiscriminants, EnumIter};

use crate::entity::collision::Aabb;

pub mod bomb;
pub mod bonus;
pub mod collision;
pub mod player;
pub mod registry;

pub use bomb::{Bomb, Fire};
pub use bonus::{Bonus, BonusKind};
pub use player::{Player, PlayerId};

/// Stable identifier of an entity within one registry.
///
/// Ids are handed out in increasing order and never reused, so ordering by id is
/// insertion order and a stale id simply misses on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Named collections an entity belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Groups: u16 {
        const ALL = 1 << 0;
        const OBSTACLES = 1 << 1;
        const DESTROYABLE = 1 << 2;
        const WALLS = 1 << 3;
        const DYNAMIC = 1 << 4;
        const BOMBS = 1 << 5;
        const BONUSES = 1 << 6;
        const FIRES = 1 << 7;
        const PLAYERS = 1 << 8;
    }
}

impl Groups {
    /// The default memberships of each entity kind.
    pub const fn for_kind(kind: EntityKind) -> Groups {
        match kind {
            EntityKind::Wall => Groups::ALL.union(Groups::OBSTACLES).union(Groups::WALLS),
            EntityKind::Box => Groups::ALL.union(Groups::OBSTACLES).union(Groups::DESTROYABLE),
            EntityKind::Bomb => Groups::ALL
                .union(Groups::OBSTACLES)
                .union(Groups::DESTROYABLE)
                .union(Groups::DYNAMIC)
                .union(Groups::BOMBS),
            EntityKind::Fire => Groups::ALL.union(Groups::DYNAMIC).union(Groups::FIRES),
            EntityKind::Player => Groups::ALL
                .union(Groups::DESTROYABLE)
                .union(Groups::DYNAMIC)
                .union(Groups::PLAYERS),
            EntityKind::Bonus => Groups::ALL
                .union(Groups::DESTROYABLE)
                .union(Groups::DYNAMIC)
                .union(Groups::BONUSES),
        }
    }
}

/// The kind-specific state of an entity.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EntityKind), derive(Hash, Display, EnumIter))]
pub enum Body {
    Wall,
    Box,
    Bomb(Bomb),
    Fire(Fire),
    Player(Player),
    Bonus(Bonus),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner, in grid units.
    pub position: Vec2,
    pub body: Body,
    pub(crate) groups: Groups,
    /// Entities overlapped after this entity's last move.
    pub(crate) touching: SmallVec<[EntityId; 4]>,
}

impl Entity {
    pub fn new(position: Vec2, body: Body, groups: Groups) -> Self {
        Entity {
            position,
            body,
            groups,
            touching: SmallVec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::from(&self.body)
    }

    pub fn groups(&self) -> Groups {
        self.groups
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position)
    }

    /// The cell this entity is mostly in.
    pub fn cell(&self) -> IVec2 {
        self.position.round().as_ivec2()
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.body {
            Body::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.body {
            Body::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_bomb(&self) -> Option<&Bomb> {
        match &self.body {
            Body::Bomb(bomb) => Some(bomb),
            _ => None,
        }
    }

    pub fn as_bomb_mut(&mut self) -> Option<&mut Bomb> {
        match &mut self.body {
            Body::Bomb(bomb) => Some(bomb),
            _ => None,
        }
    }
}
