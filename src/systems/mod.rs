//! Per-tick behaviour of the entities in a [`World`].
//!
//! Systems are plain functions taking the world explicitly. [`update`] runs one pass
//! over every dynamic entity in registry order.

use crate::entity::{EntityKind, Groups};
use crate::game::world::World;

pub mod bomb;
pub mod bonus;
pub mod lifetime;
pub mod movement;
pub mod player;

/// Advances every dynamic entity by `world.dt`.
///
/// Entities spawned during the pass are first updated on the next tick, and entities
/// removed earlier in the pass are skipped.
pub fn update(world: &mut World) {
    for id in world.registry.ids(Groups::DYNAMIC) {
        let Some(kind) = world.registry.get(id).map(|entity| entity.kind()) else {
            continue;
        };
        match kind {
            EntityKind::Bomb => bomb::update(world, id),
            EntityKind::Fire => lifetime::update(world, id),
            EntityKind::Player => player::update(world, id),
            EntityKind::Bonus => bonus::animate(world, id),
            EntityKind::Wall | EntityKind::Box => {}
        }
    }
}
