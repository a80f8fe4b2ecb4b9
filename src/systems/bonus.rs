use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::entity::{Body, BonusKind, EntityId, Groups};
use crate::events::GameEvent;
use crate::game::world::World;

/// Applies a picked-up bonus to the player entity `id`.
pub fn affect_player(world: &mut World, id: EntityId, kind: BonusKind) {
    let tuning = world.tuning.clone();
    let Some(player) = world.registry.get_mut(id).and_then(|entity| entity.as_player_mut()) else {
        return;
    };
    let player_id = player.id;
    debug!(player = player_id, %kind, "Bonus collected");

    match kind {
        BonusKind::SpeedUp => player.speed_up(tuning.speed_step, tuning.max_speed),
        BonusKind::AddBomb => player.bombs += 1,
        BonusKind::MoveBombs => player.can_move_bombs = true,
        BonusKind::IncreaseRadius => player.increase_radius(),
        BonusKind::SpeedDown => player.slow_down(tuning.slow_speed, tuning.debuff_duration),
        BonusKind::ReduceRadius => player.reduce_radius(tuning.reduced_radius, tuning.debuff_duration),
        BonusKind::ExchangePlaces => exchange_places(world, id),
    }
    world.push_event(GameEvent::BonusCollected { player: player_id, kind });
}

/// Swaps `id` with a random other living player. Both abandon their current step.
fn exchange_places(world: &mut World, id: EntityId) {
    let others: Vec<EntityId> = world.living_players().map(|(_, entity)| entity).filter(|entity| *entity != id).collect();
    let Some(other) = others.choose(&mut world.rng).copied() else {
        trace!(%id, "Nobody to exchange places with");
        return;
    };

    let (Some(first), Some(second)) = (
        world.registry.get(id).map(|entity| entity.position),
        world.registry.get(other).map(|entity| entity.position),
    ) else {
        return;
    };

    for (entity, position) in [(id, second), (other, first)] {
        if let Some(entity) = world.registry.get_mut(entity) {
            entity.position = position;
            if let Some(player) = entity.as_player_mut() {
                player.step = None;
            }
        }
    }
    refresh_footing(world, id);
    refresh_footing(world, other);
}

/// Re-derives which bombs a teleported entity stands on.
fn refresh_footing(world: &mut World, id: EntityId) {
    let overlapping = world.registry.collide_with(id, Groups::ALL);
    for bomb_id in world.registry.ids(Groups::BOMBS) {
        if let Some(bomb) = world.registry.get_mut(bomb_id).and_then(|entity| entity.as_bomb_mut()) {
            if overlapping.contains(&bomb_id) {
                bomb.add_standing(id);
            } else {
                bomb.step_off(id);
            }
        }
    }
    if let Some(entity) = world.registry.get_mut(id) {
        entity.touching = overlapping.into_iter().collect();
    }
}

/// Advances the looping animation of a bonus lying on the floor.
pub fn animate(world: &mut World, id: EntityId) {
    let dt = world.dt;
    if let Some(Body::Bonus(bonus)) = world.registry.get_mut(id).map(|entity| &mut entity.body) {
        bonus.animate(dt);
    }
}
