use bomber::config::Tuning;
use bomber::entity::{Body, Bomb, Bonus, BonusKind, Fire, Groups};
use bomber::input::commands::PlayerCommand;
use bomber::map::direction::Direction;
use bomber::systems::bomb::put_bomb;
use bomber::systems::bonus::affect_player;
use bomber::systems::player::apply;
use glam::Vec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{entity, player, position, CORRIDOR};

const LANE: &str = "3 7 1\nWWWWWWW\nW1    W\nWWWWWWW\n";

#[test]
fn test_step_lands_exactly_on_next_cell() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::tick(&mut world);
    apply(&mut world, 0, PlayerCommand::Stop);
    assert_that(&player(&world, 0).is_stepping()).is_true();

    // The step is finished even though the intent was dropped.
    common::run_ticks(&mut world, 30);
    assert_eq!(position(&world, hero), Vec2::new(2.0, 1.0));
    assert_that(&player(&world, 0).is_stepping()).is_false();
}

#[test]
fn test_walks_until_wall() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::run_ticks(&mut world, 200);

    // Passes through the other player and stops in front of the wall.
    assert_eq!(position(&world, hero), Vec2::new(6.0, 1.0));
    assert_eq!(player(&world, 0).facing, Direction::Right);
}

#[test]
fn test_release_keeps_other_intent() {
    let mut world = common::world(CORRIDOR, 2);
    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    apply(&mut world, 0, PlayerCommand::Release(Direction::Left));
    assert_eq!(player(&world, 0).intent, Some(Direction::Right));

    apply(&mut world, 0, PlayerCommand::Release(Direction::Right));
    assert_eq!(player(&world, 0).intent, None);
}

#[test]
fn test_blocked_step_retreats_to_origin() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::run_ticks(&mut world, 2);
    apply(&mut world, 0, PlayerCommand::Stop);
    let fuse = world.tuning.fuse;
    world.registry.spawn(Vec2::new(2.0, 1.0), Body::Bomb(Bomb::new(1, 1, fuse)));

    common::tick(&mut world);

    assert_eq!(position(&world, hero), Vec2::new(1.0, 1.0));
    assert_that(&player(&world, 0).is_stepping()).is_false();
}

#[test]
fn test_push_bomb_slides_to_wall() {
    let tuning = Tuning {
        fuse: 10.0,
        ..Tuning::default()
    };
    let mut world = common::world_with(LANE, 1, tuning);
    world.player_mut(0).unwrap().can_move_bombs = true;
    let bomb = world.registry.spawn(Vec2::new(2.0, 1.0), Body::Bomb(Bomb::new(0, 1, 10.0)));

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::tick(&mut world);
    apply(&mut world, 0, PlayerCommand::Stop);
    common::run_ticks(&mut world, 60);

    assert_eq!(position(&world, bomb), Vec2::new(5.0, 1.0));
    let push = world.registry.get(bomb).and_then(|entity| entity.as_bomb()).and_then(|bomb| bomb.push);
    assert_eq!(push, None);
}

#[test]
fn test_bomb_stays_without_push_ability() {
    let mut world = common::world(LANE, 1);
    let bomb = world.registry.spawn(Vec2::new(2.0, 1.0), Body::Bomb(Bomb::new(0, 1, 10.0)));

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::run_ticks(&mut world, 20);

    assert_eq!(position(&world, bomb), Vec2::new(2.0, 1.0));
    assert_eq!(position(&world, entity(&world, 0)), Vec2::new(1.0, 1.0));
}

#[test]
fn test_put_bomb_rules() {
    let mut world = common::world(CORRIDOR, 2);

    assert_that(&put_bomb(&mut world, 0).is_some()).is_true();
    assert_eq!(player(&world, 0).bombs, 0);
    assert_that(&put_bomb(&mut world, 0)).is_none();

    let hero = entity(&world, 0);
    affect_player(&mut world, hero, BonusKind::AddBomb);
    // Capacity is back, but the cell is taken.
    assert_that(&put_bomb(&mut world, 0)).is_none();
    assert_eq!(player(&world, 0).bombs, 1);

    // Dead players place nothing.
    world.kill_player(1, 0);
    assert_that(&put_bomb(&mut world, 1)).is_none();
}

#[test]
fn test_bonus_picked_up_on_contact() {
    let mut world = common::world(CORRIDOR, 2);
    world.registry.spawn(Vec2::new(2.0, 1.0), Body::Bonus(Bonus::new(BonusKind::AddBomb)));

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::tick(&mut world);

    assert_that(&world.registry.ids(Groups::BONUSES)).is_empty();
    assert_eq!(player(&world, 0).bombs, 2);
}

#[test]
fn test_speed_down_round_trip() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);
    let base = player(&world, 0).speed;

    affect_player(&mut world, hero, BonusKind::SpeedDown);
    assert_eq!(player(&world, 0).speed, world.tuning.slow_speed);

    world.player_mut(0).unwrap().tick_effects(8.0);
    assert_eq!(player(&world, 0).speed, base);
    assert_that(&player(&world, 0).speed_effect).is_none();
}

#[test]
fn test_speed_down_reapplied_resets_timer() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);
    let base = player(&world, 0).speed;

    affect_player(&mut world, hero, BonusKind::SpeedDown);
    world.player_mut(0).unwrap().tick_effects(5.0);
    affect_player(&mut world, hero, BonusKind::SpeedDown);
    world.player_mut(0).unwrap().tick_effects(5.0);
    assert_eq!(player(&world, 0).speed, world.tuning.slow_speed);

    world.player_mut(0).unwrap().tick_effects(3.0);
    assert_eq!(player(&world, 0).speed, base);
}

#[test]
fn test_debuff_expires_while_ticking() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);
    affect_player(&mut world, hero, BonusKind::IncreaseRadius);
    affect_player(&mut world, hero, BonusKind::ReduceRadius);
    assert_eq!(player(&world, 0).radius, 1);

    common::run_ticks(&mut world, 410);
    assert_eq!(player(&world, 0).radius, 2);
}

#[test]
fn test_good_bonuses() {
    let mut world = common::world(CORRIDOR, 2);
    let hero = entity(&world, 0);
    let tuning = world.tuning.clone();

    affect_player(&mut world, hero, BonusKind::SpeedUp);
    affect_player(&mut world, hero, BonusKind::MoveBombs);
    assert_eq!(player(&world, 0).speed, tuning.player_speed + tuning.speed_step);
    assert_that(&player(&world, 0).can_move_bombs).is_true();

    for _ in 0..20 {
        affect_player(&mut world, hero, BonusKind::SpeedUp);
    }
    assert_eq!(player(&world, 0).speed, tuning.max_speed);
}

#[test]
fn test_exchange_places_refreshes_footing() {
    let mut world = common::world(CORRIDOR, 2);
    let (first, second) = (entity(&world, 0), entity(&world, 1));
    let bomb = put_bomb(&mut world, 0).unwrap();

    affect_player(&mut world, first, BonusKind::ExchangePlaces);

    assert_eq!(position(&world, first), Vec2::new(6.0, 1.0));
    assert_eq!(position(&world, second), Vec2::new(1.0, 1.0));
    let stats = world.registry.get(bomb).and_then(|entity| entity.as_bomb()).unwrap();
    assert_that(&stats.is_standing(second)).is_true();
    assert_that(&stats.is_standing(first)).is_false();
}

#[test]
fn test_exchange_places_alone_is_noop() {
    let mut world = common::world(LANE, 1);
    let hero = entity(&world, 0);

    affect_player(&mut world, hero, BonusKind::ExchangePlaces);

    assert_eq!(position(&world, hero), Vec2::new(1.0, 1.0));
}

#[test]
fn test_walking_into_fire_kills() {
    let mut world = common::world(CORRIDOR, 2);
    world.registry.spawn(Vec2::new(2.0, 1.0), Body::Fire(Fire::new(1, 1.0)));

    apply(&mut world, 0, PlayerCommand::SetIntent(Direction::Right));
    common::tick(&mut world);

    assert_that(&world.is_alive(0)).is_false();
    assert_eq!(player(&world, 1).kills, 1);
    assert_eq!(world.alive_count(), 1);
}
