use tracing::trace;

use crate::entity::player::Step;
use crate::entity::{Body, EntityId, Groups, PlayerId};
use crate::game::world::World;
use crate::input::commands::PlayerCommand;
use crate::systems::movement::try_move_to;
use crate::systems::{bomb, bonus};

/// Applies a command to a living player. Commands for dead players are dropped.
pub fn apply(world: &mut World, player: PlayerId, command: PlayerCommand) {
    if command == PlayerCommand::PutBomb {
        bomb::put_bomb(world, player);
        return;
    }
    let Some(stats) = world.player_mut(player) else {
        trace!(player, ?command, "Command for a dead player dropped");
        return;
    };
    match command {
        PlayerCommand::SetIntent(direction) => stats.set_intent(direction),
        PlayerCommand::Release(direction) => stats.release(direction),
        PlayerCommand::Stop => stats.stop(),
        PlayerCommand::PutBomb => {}
    }
}

/// One tick of a player: effect timers, movement, bonus pickup and fire contact.
pub fn update(world: &mut World, id: EntityId) {
    let dt = world.dt;
    let Some(player) = world.registry.get_mut(id).and_then(|entity| entity.as_player_mut()) else {
        return;
    };
    player.tick_effects(dt);

    advance_step(world, id);
    pick_up_bonuses(world, id);
    touch_fire(world, id);
}

fn advance_step(world: &mut World, id: EntityId) {
    let dt = world.dt;
    let step_length = world.tuning.step_length;
    let Some(entity) = world.registry.get_mut(id) else {
        return;
    };
    let position = entity.position;
    let Some(player) = entity.as_player_mut() else {
        return;
    };

    if player.step.is_none() {
        if let Some(direction) = player.intent {
            player.step = Some(Step {
                origin: position,
                direction,
                remaining: step_length / player.speed,
            });
        }
    }
    let Some(step) = player.step else {
        return;
    };
    let can_move_bombs = player.can_move_bombs;

    let slice = step.remaining.min(dt);
    let remaining = step.remaining - slice;
    let target = if remaining <= 0.0 {
        step.origin + step.direction.as_vec2() * step_length
    } else {
        position + step.direction.as_vec2() * slice * player.speed
    };

    match try_move_to(&mut world.registry, id, target) {
        Ok(()) => {
            if let Some(player) = world.registry.get_mut(id).and_then(|entity| entity.as_player_mut()) {
                player.step = (remaining > 0.0).then_some(Step { remaining, ..step });
            }
        }
        Err(blockers) => {
            if let Some(player) = world.registry.get_mut(id).and_then(|entity| entity.as_player_mut()) {
                player.step = None;
            }
            if position != step.origin {
                let _ = try_move_to(&mut world.registry, id, step.origin);
            }
            if can_move_bombs {
                for blocker in blockers {
                    push_bomb(world, blocker, step);
                }
            }
        }
    }
}

fn push_bomb(world: &mut World, blocker: EntityId, step: Step) {
    if let Some(bomb) = world.registry.get_mut(blocker).and_then(|entity| entity.as_bomb_mut()) {
        if bomb.push.is_none() {
            trace!(bomb = %blocker, direction = step.direction.as_ref(), "Bomb pushed");
            bomb.push = Some(step.direction);
        }
    }
}

fn pick_up_bonuses(world: &mut World, id: EntityId) {
    for (_, entity) in world.registry.consume_colliding(id, Groups::BONUSES) {
        if let Body::Bonus(picked) = entity.body {
            bonus::affect_player(world, id, picked.kind);
        }
    }
}

fn touch_fire(world: &mut World, id: EntityId) {
    let Some(victim) = world.registry.get(id).and_then(|entity| entity.as_player()).map(|player| player.id) else {
        return;
    };
    let killer = world.registry.collide_with(id, Groups::FIRES).into_iter().find_map(|fire| {
        match world.registry.get(fire).map(|entity| &entity.body) {
            Some(Body::Fire(fire)) => Some(fire.owner),
            _ => None,
        }
    });
    if let Some(killer) = killer {
        world.kill_player(victim, killer);
    }
}
