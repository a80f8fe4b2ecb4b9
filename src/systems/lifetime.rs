use tracing::trace;

use crate::entity::{Body, EntityId};
use crate::game::world::World;

/// Burns a fire down and removes it once its lifetime is spent.
pub fn update(world: &mut World, id: EntityId) {
    let dt = world.dt;
    let Some(Body::Fire(fire)) = world.registry.get_mut(id).map(|entity| &mut entity.body) else {
        return;
    };

    fire.remaining -= dt;
    if fire.remaining <= 0.0 {
        trace!(%id, "Fire burnt out");
        world.registry.remove(id);
    }
}
