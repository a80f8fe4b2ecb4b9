use std::collections::BTreeMap;

use glam::Vec2;
use tracing::trace;

use crate::entity::collision::Aabb;
use crate::entity::{Body, Entity, EntityId, EntityKind, Groups};

/// Owns every entity of a round.
///
/// Entities live in a single map keyed by id, and group membership is a flag set on
/// the entity itself, so removing an entity drops it from all of its groups at once.
/// Iteration is always in insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity with the default groups of its kind.
    pub fn spawn(&mut self, position: Vec2, body: Body) -> EntityId {
        let groups = Groups::for_kind(EntityKind::from(&body));
        self.insert(position, body, groups)
    }

    /// Adds an entity with an explicit group membership.
    pub fn insert(&mut self, position: Vec2, body: Body, groups: Groups) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        trace!(%id, kind = %EntityKind::from(&body), x = position.x, y = position.y, "Spawned entity");
        self.entities.insert(id, Entity::new(position, body, groups));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(&id);
        if let Some(entity) = &removed {
            trace!(%id, kind = %entity.kind(), "Removed entity");
        }
        removed
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entities in any of the given groups, in insertion order.
    pub fn iter(&self, group: Groups) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities
            .iter()
            .filter(move |(_, entity)| entity.groups.intersects(group))
            .map(|(id, entity)| (*id, entity))
    }

    /// A snapshot of the ids in `group`, for loops that mutate the registry.
    pub fn ids(&self, group: Groups) -> Vec<EntityId> {
        self.iter(group).map(|(id, _)| id).collect()
    }

    /// Entities in `group` whose boxes overlap `aabb`.
    pub fn query_box(&self, aabb: &Aabb, group: Groups) -> Vec<EntityId> {
        self.iter(group)
            .filter(|(_, entity)| entity.aabb().overlaps(aabb))
            .map(|(id, _)| id)
            .collect()
    }

    /// Entities in `group` overlapping `id`, never including `id` itself.
    ///
    /// An unknown id collides with nothing.
    pub fn collide_with(&self, id: EntityId, group: Groups) -> Vec<EntityId> {
        let Some(entity) = self.entities.get(&id) else {
            return Vec::new();
        };
        let aabb = entity.aabb();
        self.iter(group)
            .filter(|(other, entity)| *other != id && entity.aabb().overlaps(&aabb))
            .map(|(other, _)| other)
            .collect()
    }

    /// Removes and returns every entity in `group` overlapping `id`.
    pub fn consume_colliding(&mut self, id: EntityId, group: Groups) -> Vec<(EntityId, Entity)> {
        self.collide_with(id, group)
            .into_iter()
            .filter_map(|other| self.remove(other).map(|entity| (other, entity)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
