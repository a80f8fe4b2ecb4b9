use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::entity::collision::allows;
use crate::entity::registry::Registry;
use crate::entity::{EntityId, Groups};

pub type Blockers = SmallVec<[EntityId; 4]>;

/// Moves an entity by `delta` if nothing it would overlap objects.
///
/// Returns whether the move happened. A rejected move leaves the position exactly as
/// it was.
pub fn move_entity(registry: &mut Registry, id: EntityId, delta: Vec2) -> bool {
    try_move(registry, id, delta).is_ok()
}

/// Like [`move_entity`], but reports which entities rejected the move.
pub fn try_move(registry: &mut Registry, id: EntityId, delta: Vec2) -> Result<(), Blockers> {
    let Some(entity) = registry.get(id) else {
        return Err(Blockers::new());
    };
    let target = entity.position + delta;
    try_move_to(registry, id, target)
}

/// Moves an entity to exactly `target`, or leaves it where it is.
///
/// Every pair is checked both ways: the move goes through only if the mover lets the
/// other entity overlap it and the other lets the mover overlap it. Whatever the
/// outcome, entities that were overlapped before and no longer are get notified.
pub fn try_move_to(registry: &mut Registry, id: EntityId, target: Vec2) -> Result<(), Blockers> {
    let Some(entity) = registry.get(id) else {
        return Err(Blockers::new());
    };
    let start = entity.position;
    let mut previous = entity.touching.clone();
    for other in registry.collide_with(id, Groups::ALL) {
        if !previous.contains(&other) {
            previous.push(other);
        }
    }

    set_position(registry, id, target);
    let overlaps = registry.collide_with(id, Groups::ALL);
    let blockers: Blockers = overlaps
        .iter()
        .copied()
        .filter(|other| !mutually_allowed(registry, id, *other))
        .collect();

    let current = if blockers.is_empty() {
        overlaps
    } else {
        trace!(%id, ?blockers, "Move rejected");
        set_position(registry, id, start);
        registry.collide_with(id, Groups::ALL)
    };

    for other in previous.iter().copied().filter(|other| !current.contains(other)) {
        stop_colliding(registry, other, id);
        stop_colliding(registry, id, other);
    }
    if let Some(entity) = registry.get_mut(id) {
        entity.touching = current.into_iter().collect();
    }

    if blockers.is_empty() {
        Ok(())
    } else {
        Err(blockers)
    }
}

/// Tells `this` that `other` no longer overlaps it. Bombs use it to stop letting a
/// player who walked off pass through again.
pub fn stop_colliding(registry: &mut Registry, this: EntityId, other: EntityId) {
    if let Some(bomb) = registry.get_mut(this).and_then(|entity| entity.as_bomb_mut()) {
        bomb.step_off(other);
    }
}

fn mutually_allowed(registry: &Registry, a: EntityId, b: EntityId) -> bool {
    match (registry.get(a), registry.get(b)) {
        (Some(first), Some(second)) => allows(first, second, b) && allows(second, first, a),
        _ => true,
    }
}

fn set_position(registry: &mut Registry, id: EntityId, position: Vec2) {
    if let Some(entity) = registry.get_mut(id) {
        entity.position = position;
    }
}
