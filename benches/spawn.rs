use criterion::*;
use std::hint::black_box;

mod common;
use common::*;

use sim_store::{ElementKind, Schema, World};

const BATCH: usize = 10_000;

fn spawn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    group.bench_function("create_10k", |b| {
        b.iter_batched(
            || World::new(BATCH as u32),
            |mut world| {
                for _ in 0..BATCH {
                    world.create_entity().unwrap();
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("create_attach_two_10k", |b| {
        b.iter_batched(
            || {
                let mut world = World::new(BATCH as u32);
                let position = world
                    .create_component(&Schema::new().field("x", ElementKind::F32))
                    .unwrap();
                let velocity = world
                    .create_component(&Schema::new().field("dx", ElementKind::F32))
                    .unwrap();
                (world, position, velocity)
            },
            |(mut world, position, velocity)| {
                for _ in 0..BATCH {
                    let entity = world.create_entity().unwrap();
                    world.add_component(&position, entity).unwrap();
                    world.add_component(&velocity, entity).unwrap();
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("churn_detach_destroy_10k", |b| {
        b.iter_batched(
            || {
                let fixture = setup_world(BATCH);
                (fixture.world, fixture.position, fixture.velocity)
            },
            |(mut world, position, velocity)| {
                for entity in 0..BATCH as u32 {
                    world.remove_component(&position, entity).unwrap();
                    world.remove_component(&velocity, entity).unwrap();
                    world.remove_entity(entity).unwrap();
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, spawn_benchmark);
criterion_main!(benches);
