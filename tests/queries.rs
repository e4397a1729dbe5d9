use std::collections::HashSet;

use sim_store::{Component, ElementKind, EntityId, Schema, World};

fn fielded(world: &mut World, name: &str) -> Component {
    world
        .create_component(&Schema::new().field(name, ElementKind::F32))
        .unwrap()
}

fn as_set(ids: &[EntityId]) -> HashSet<EntityId> {
    ids.iter().copied().collect()
}

#[test]
fn scan_returns_exactly_the_matching_set() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    let b = fielded(&mut world, "b");

    let mut expected = HashSet::new();
    for _ in 0..5 {
        let entity = world.create_entity().unwrap();
        world.add_component(&a, entity).unwrap();
        world.add_component(&b, entity).unwrap();
        expected.insert(entity);
    }
    // Entities with only one of the two must not match.
    for _ in 0..3 {
        let entity = world.create_entity().unwrap();
        world.add_component(&a, entity).unwrap();
    }

    let mut query = world.query().with(&a).with(&b).build();
    let matches = query.run(&world);
    assert_eq!(matches.len(), 5);
    assert_eq!(as_set(matches), expected);
}

#[test]
fn exclusion_mask_filters_matches_out() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    let blocked = world.create_component(&Schema::new()).unwrap();

    let plain = world.create_entity().unwrap();
    world.add_component(&a, plain).unwrap();

    let tagged = world.create_entity().unwrap();
    world.add_component(&a, tagged).unwrap();
    world.add_component(&blocked, tagged).unwrap();

    let mut query = world.query().with(&a).without(&blocked).build();
    assert_eq!(query.run(&world), &[plain]);

    // Dropping the tag brings the entity back in.
    world.remove_component(&blocked, tagged).unwrap();
    assert_eq!(as_set(query.run(&world)), as_set(&[plain, tagged]));
}

#[test]
fn scan_is_idempotent_without_mutation() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    for _ in 0..10 {
        let entity = world.create_entity().unwrap();
        world.add_component(&a, entity).unwrap();
    }

    let mut query = world.query().with(&a).build();
    let first: Vec<EntityId> = query.run(&world).to_vec();
    let second: Vec<EntityId> = query.run(&world).to_vec();
    assert_eq!(first, second);
}

#[test]
fn scan_cost_follows_the_high_water_mark_not_live_count() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");

    let keeper = world.create_entity().unwrap();
    world.add_component(&a, keeper).unwrap();
    for _ in 0..20 {
        let entity = world.create_entity().unwrap();
        world.remove_entity(entity).unwrap();
    }

    // Freed ids below the mark are scanned but never match.
    let mut query = world.query().with(&a).build();
    assert_eq!(query.run(&world), &[keeper]);
    assert_eq!(world.issued(), 2);
    assert_eq!(world.live_count(), 1);
}

#[test]
fn entry_query_reports_only_new_matches() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    let b = fielded(&mut world, "b");

    let mut seen = Vec::new();
    for _ in 0..4 {
        let entity = world.create_entity().unwrap();
        world.add_component(&a, entity).unwrap();
        world.add_component(&b, entity).unwrap();
        seen.push(entity);
    }

    let mut query = world.query().with(&a).with(&b).build_entry();

    // Everything is new on the first evaluation.
    let (matches, entered) = query.run(&world);
    assert_eq!(as_set(matches), as_set(&seen));
    assert_eq!(as_set(entered), as_set(&seen));

    // No mutation: same matches, nothing new.
    let (matches, entered) = query.run(&world);
    assert_eq!(matches.len(), 4);
    assert!(entered.is_empty());

    // One newcomer: only it is reported as entered.
    let newcomer = world.create_entity().unwrap();
    world.add_component(&a, newcomer).unwrap();
    world.add_component(&b, newcomer).unwrap();
    let (matches, entered) = query.run(&world);
    assert_eq!(matches.len(), 5);
    assert_eq!(entered, &[newcomer]);
}

#[test]
fn entry_query_reports_reentry_as_new() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");

    let entity = world.create_entity().unwrap();
    world.add_component(&a, entity).unwrap();

    let mut query = world.query().with(&a).build_entry();
    let (_, entered) = query.run(&world);
    assert_eq!(entered, &[entity]);

    // Leaving the match set is not reported...
    world.remove_component(&a, entity).unwrap();
    let (matches, entered) = query.run(&world);
    assert!(matches.is_empty());
    assert!(entered.is_empty());

    // ...but coming back is new again.
    world.add_component(&a, entity).unwrap();
    let (_, entered) = query.run(&world);
    assert_eq!(entered, &[entity]);
}

#[test]
fn tracked_query_follows_mutations_eagerly() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    let b = fielded(&mut world, "b");

    let mut tracked = world.query().with(&a).with(&b).build_tracked();
    assert!(tracked.is_empty());

    let entity = world.create_entity().unwrap();
    world
        .add_component_with(&a, entity, &mut [&mut tracked])
        .unwrap();
    // Only half the mask is present; no transition yet.
    assert!(tracked.is_empty());

    world
        .add_component_with(&b, entity, &mut [&mut tracked])
        .unwrap();
    assert_eq!(tracked.matches(), &[entity]);
    assert!(tracked.contains(entity));

    world
        .remove_component_with(&b, entity, &mut [&mut tracked])
        .unwrap();
    assert!(tracked.is_empty());
    assert!(!tracked.contains(entity));
}

#[test]
fn tracked_query_swap_removal_keeps_the_set_consistent() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");

    let mut tracked = world.query().with(&a).build_tracked();
    let mut live = Vec::new();
    for _ in 0..6 {
        let entity = world.create_entity().unwrap();
        world
            .add_component_with(&a, entity, &mut [&mut tracked])
            .unwrap();
        live.push(entity);
    }

    // Remove from the middle: order may change, the set must not.
    let departing = live.remove(2);
    world
        .remove_component_with(&a, departing, &mut [&mut tracked])
        .unwrap();

    assert_eq!(tracked.len(), 5);
    assert!(!tracked.contains(departing));
    assert_eq!(as_set(tracked.matches()), as_set(&live));

    // Every slot the index claims must agree with the dense array.
    for &entity in live.iter() {
        assert!(tracked.contains(entity));
    }
}

#[test]
fn tracked_query_is_seeded_from_current_state() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");

    let mut seeded = Vec::new();
    for _ in 0..3 {
        let entity = world.create_entity().unwrap();
        world.add_component(&a, entity).unwrap();
        seeded.push(entity);
    }

    let tracked = world.query().with(&a).build_tracked();
    assert_eq!(as_set(tracked.matches()), as_set(&seeded));
}

#[test]
fn tracked_query_agrees_with_rescan_under_churn() {
    let mut world = World::new(100);
    let a = fielded(&mut world, "a");
    let blocked = world.create_component(&Schema::new()).unwrap();

    let mut tracked = world.query().with(&a).without(&blocked).build_tracked();
    let mut scan = world.query().with(&a).without(&blocked).build();

    let mut entities = Vec::new();
    for _ in 0..10 {
        let entity = world.create_entity().unwrap();
        world
            .add_component_with(&a, entity, &mut [&mut tracked])
            .unwrap();
        entities.push(entity);
    }
    for &entity in entities.iter().step_by(3) {
        world
            .add_component_with(&blocked, entity, &mut [&mut tracked])
            .unwrap();
    }
    for &entity in entities.iter().step_by(4) {
        if world.has_component(&blocked, entity) {
            world
                .remove_component_with(&blocked, entity, &mut [&mut tracked])
                .unwrap();
        }
    }

    assert_eq!(as_set(tracked.matches()), as_set(scan.run(&world)));
}

#[test]
#[should_panic(expected = "different world")]
fn cross_world_components_are_rejected() {
    let mut home = World::new(8);
    let mut other = World::new(8);
    let foreign = other.create_component(&Schema::new()).unwrap();

    let entity = home.create_entity().unwrap();
    let _ = home.add_component(&foreign, entity);
}
