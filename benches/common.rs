#![allow(dead_code)]

use sim_store::{Component, ElementKind, Schema, World};

pub const AGENTS_SMALL: usize = 100_000;
pub const AGENTS_MED: usize = 1_000_000;

pub struct Fixture {
    pub world: World,
    pub position: Component,
    pub velocity: Component,
    pub frozen: Component,
}

/// Builds a world with double the agent count in headroom and `agent_count`
/// agents carrying position + velocity, with `velocity.dx` preset to 1.0.
pub fn setup_world(agent_count: usize) -> Fixture {
    let mut world = World::new((agent_count * 2) as u32);
    let position = world
        .create_component(
            &Schema::new()
                .field("x", ElementKind::F32)
                .field("y", ElementKind::F32),
        )
        .unwrap();
    let mut velocity = world
        .create_component(
            &Schema::new()
                .field("dx", ElementKind::F32)
                .field("dy", ElementKind::F32),
        )
        .unwrap();
    let frozen = world.create_component(&Schema::new()).unwrap();

    for _ in 0..agent_count {
        let entity = world.create_entity().unwrap();
        world.add_component(&position, entity).unwrap();
        world.add_component(&velocity, entity).unwrap();
    }
    let dx = velocity.column_mut::<f32>("dx").unwrap();
    for entity in 0..agent_count {
        dx[entity] = 1.0;
    }

    Fixture {
        world,
        position,
        velocity,
        frozen,
    }
}
