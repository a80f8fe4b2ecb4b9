#![allow(dead_code)]

use bomber::config::Tuning;
use bomber::constants::DEFAULT_SCREEN_SIZE;
use bomber::entity::{EntityId, Groups, Player};
use bomber::game::world::World;
use bomber::map::Level;
use bomber::systems;
use glam::Vec2;

pub const DT: f32 = 1.0 / 50.0;

/// Two players in a one-row corridor, walls all around.
pub const CORRIDOR: &str = "3 8 2\nWWWWWWWW\nW1    2W\nWWWWWWWW\n";

pub fn level(source: &str) -> Level {
    Level::load(source, DEFAULT_SCREEN_SIZE).unwrap()
}

pub fn world(source: &str, players: usize) -> World {
    world_with(source, players, Tuning::default())
}

pub fn world_with(source: &str, players: usize, tuning: Tuning) -> World {
    World::new(level(source), players, 0, tuning).unwrap()
}

pub fn tick(world: &mut World) {
    world.dt = DT;
    systems::update(world);
}

pub fn run_ticks(world: &mut World, ticks: usize) {
    for _ in 0..ticks {
        tick(world);
    }
}

pub fn entity(world: &World, player: usize) -> EntityId {
    world.player_entity(player).unwrap()
}

pub fn position(world: &World, id: EntityId) -> Vec2 {
    world.registry.get(id).unwrap().position
}

pub fn player(world: &World, player: usize) -> &Player {
    world.player(player).unwrap()
}

/// Moves an entity without going through collision handling.
pub fn teleport(world: &mut World, id: EntityId, cell: (i32, i32)) {
    world.registry.get_mut(id).unwrap().position = Vec2::new(cell.0 as f32, cell.1 as f32);
}

pub fn count(world: &World, group: Groups) -> usize {
    world.registry.iter(group).count()
}

pub fn cells(world: &World, group: Groups) -> Vec<(i32, i32)> {
    let mut cells: Vec<(i32, i32)> = world
        .registry
        .iter(group)
        .map(|(_, entity)| (entity.cell().x, entity.cell().y))
        .collect();
    cells.sort();
    cells
}
