//! Bomb fuses, sliding bombs and explosions.

use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::entity::collision::Aabb;
use crate::entity::{Body, Bomb, Bonus, BonusKind, EntityId, EntityKind, Fire, Groups, PlayerId};
use crate::events::GameEvent;
use crate::game::world::World;
use crate::map::direction::Direction;
use crate::systems::movement::{try_move, try_move_to};

/// Places a bomb for `player` on the cell they are mostly in.
///
/// Does nothing if the player is dead, has no bombs left, or a bomb already sits
/// on that cell. Every player on the cell may walk off the new bomb.
pub fn put_bomb(world: &mut World, player: PlayerId) -> Option<EntityId> {
    let entity_id = world.player_entity(player)?;
    let entity = world.registry.get(entity_id)?;
    let cell = entity.cell();
    let stats = entity.as_player()?;
    if stats.bombs == 0 {
        return None;
    }
    let radius = stats.radius;

    let area = Aabb::cell(cell);
    if !world.registry.query_box(&area, Groups::BOMBS).is_empty() {
        return None;
    }

    if let Some(stats) = world.player_mut(player) {
        stats.bombs -= 1;
    }
    let mut bomb = Bomb::new(player, radius, world.tuning.fuse);
    for standing in world.registry.query_box(&area, Groups::PLAYERS) {
        bomb.add_standing(standing);
    }

    let id = world.registry.spawn(cell.as_vec2(), Body::Bomb(bomb));
    world.push_event(GameEvent::BombPlaced { player, cell });
    Some(id)
}

/// Counts a bomb's fuse down, moving it along if it was pushed.
pub fn update(world: &mut World, id: EntityId) {
    let dt = world.dt;
    let low_fuse = world.tuning.low_fuse;
    let Some(bomb) = world.registry.get_mut(id).and_then(|entity| entity.as_bomb_mut()) else {
        return;
    };

    let was_low = bomb.is_low_fuse(low_fuse);
    if bomb.tick(dt) {
        detonate(world, id);
        return;
    }
    if !was_low && bomb.is_low_fuse(low_fuse) {
        trace!(%id, fuse = bomb.fuse, "Fuse running low");
    }

    if let Some(direction) = bomb.push {
        slide(world, id, direction);
    }
}

fn slide(world: &mut World, id: EntityId, direction: Direction) {
    let delta = direction.as_vec2() * world.tuning.bomb_slide_speed * world.dt;
    if try_move(&mut world.registry, id, delta).is_ok() {
        if !world.registry.collide_with(id, Groups::FIRES).is_empty() {
            debug!(%id, "Sliding bomb ran into fire");
            detonate(world, id);
        }
        return;
    }

    let Some(entity) = world.registry.get_mut(id) else {
        return;
    };
    if let Some(bomb) = entity.as_bomb_mut() {
        bomb.push = None;
    }
    let cell = entity.position.round();
    if cell != entity.position && try_move_to(&mut world.registry, id, cell).is_err() {
        trace!(%id, x = cell.x, y = cell.y, "Snap to cell rejected, bomb rests off-grid");
    }
    trace!(%id, "Bomb stopped sliding");
}

/// Explodes a bomb right away.
///
/// Fire spreads from the bomb's cell in all four directions up to the owner's blast
/// radius. A ray stops at the edge of the map, at a wall, or after destroying a box
/// or a bomb. Bombs caught in the blast explode within the same call.
pub fn detonate(world: &mut World, bomb_id: EntityId) {
    detonate_nested(world, bomb_id, 0);
}

fn detonate_nested(world: &mut World, bomb_id: EntityId, depth: usize) {
    debug_assert!(
        depth <= world.level.width() * world.level.height(),
        "chained detonation deeper than the number of cells"
    );

    if world.registry.get(bomb_id).map(|entity| entity.kind()) != Some(EntityKind::Bomb) {
        return;
    }
    let Some(entity) = world.registry.remove(bomb_id) else {
        return;
    };
    let center = entity.cell();
    let Body::Bomb(bomb) = entity.body else {
        return;
    };

    let owner = bomb.owner;
    let radius = match world.player_mut(owner) {
        Some(player) => {
            player.bombs += 1;
            player.radius
        }
        None => bomb.radius,
    };
    debug!(%bomb_id, owner, radius, x = center.x, y = center.y, depth, "Bomb detonated");
    world.push_event(GameEvent::Detonated { owner, cell: center });

    burn(world, center, owner, depth);
    for direction in Direction::DIRECTIONS {
        for distance in 1..=radius as i32 {
            if !burn(world, center + direction.as_ivec2() * distance, owner, depth) {
                break;
            }
        }
    }
}

/// Sets one cell on fire. Returns whether the ray may continue past it.
fn burn(world: &mut World, cell: IVec2, owner: PlayerId, depth: usize) -> bool {
    if !world.level.in_bounds(cell) {
        return false;
    }

    let area = Aabb::cell(cell);
    let created = ignite(world, cell, &area, owner);

    if !world.registry.query_box(&area, Groups::WALLS).is_empty() {
        if let Some(fire) = created {
            world.registry.remove(fire);
        }
        return false;
    }

    let mut blocked = false;
    for target in world.registry.query_box(&area, Groups::DESTROYABLE) {
        let Some(kind) = world.registry.get(target).map(|entity| entity.kind()) else {
            continue;
        };
        match kind {
            EntityKind::Bomb => {
                detonate_nested(world, target, depth + 1);
                blocked = true;
            }
            EntityKind::Player => {
                let victim = world.registry.get(target).and_then(|entity| entity.as_player()).map(|player| player.id);
                if let Some(victim) = victim {
                    world.kill_player(victim, owner);
                }
            }
            EntityKind::Box => {
                world.registry.remove(target);
                drop_bonus(world, cell);
                blocked = true;
            }
            EntityKind::Bonus => {
                world.registry.remove(target);
            }
            EntityKind::Wall | EntityKind::Fire => {}
        }
    }
    !blocked
}

/// Spawns a fire on `cell`, or refreshes the one already burning there.
///
/// Returns the id of a newly created fire.
fn ignite(world: &mut World, cell: IVec2, area: &Aabb, owner: PlayerId) -> Option<EntityId> {
    let lifetime = world.tuning.fire_lifetime;
    let existing = world
        .registry
        .query_box(area, Groups::FIRES)
        .into_iter()
        .find(|id| world.registry.get(*id).is_some_and(|entity| entity.cell() == cell));

    if let Some(existing) = existing {
        if let Some(Body::Fire(fire)) = world.registry.get_mut(existing).map(|entity| &mut entity.body) {
            fire.remaining = lifetime;
        }
        return None;
    }
    Some(world.registry.spawn(cell.as_vec2(), Body::Fire(Fire::new(owner, lifetime))))
}

fn drop_bonus(world: &mut World, cell: IVec2) {
    if !world.rng.random_bool(world.tuning.bonus_chance) {
        return;
    }
    let kinds: Vec<BonusKind> = BonusKind::iter().collect();
    if let Some(kind) = kinds.choose(&mut world.rng).copied() {
        trace!(%kind, x = cell.x, y = cell.y, "Bonus dropped");
        world.registry.spawn(cell.as_vec2(), Body::Bonus(Bonus::new(kind)));
    }
}
