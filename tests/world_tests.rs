use approx::assert_relative_eq;
use arcade_physics::{
    BodyConfig, BodyType, ColliderDesc, ConfigurationError, OwnerId, PhysicsError, PhysicsEvent, Rect, Sides,
    Vec2, World, WorldConfig,
};

fn mover(world: &mut World<f64>, x: f64, y: f64) -> arcade_physics::BodyHandle {
    world.create_body(OwnerId(0), &BodyConfig::new().with_rect(x, y, 10.0, 10.0)).unwrap()
}

#[test]
fn fixed_step_accumulates_and_carries_remainder() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_fps(4.0)).unwrap();
    let b = mover(&mut world, 0.0, 0.0);
    world.set_velocity(b, Vec2::new(8.0, 0.0)).unwrap();

    assert_eq!(world.update(0.625).unwrap(), 2);
    assert_eq!(world.accumulator(), 0.125);
    assert_eq!(world.body(b).unwrap().position().x, 4.0);

    assert_eq!(world.update(0.125).unwrap(), 1);
    assert_eq!(world.accumulator(), 0.0);
    assert_eq!(world.body(b).unwrap().position().x, 6.0);

    assert_eq!(world.update(0.125).unwrap(), 0);
    assert_eq!(world.accumulator(), 0.125);
}

#[test]
fn pause_freezes_update_but_not_step() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_fps(4.0)).unwrap();
    let b = mover(&mut world, 0.0, 0.0);
    world.set_velocity(b, Vec2::new(8.0, 0.0)).unwrap();
    world.update(0.125).unwrap();

    world.pause();
    assert!(world.is_paused());
    assert_eq!(world.update(10.0).unwrap(), 0);
    assert_eq!(world.accumulator(), 0.125);
    assert_eq!(world.body(b).unwrap().position().x, 0.0);

    world.step(0.25).unwrap();
    assert_eq!(world.body(b).unwrap().position().x, 2.0);

    world.resume();
    assert_eq!(world.update(0.125).unwrap(), 1);
    assert_eq!(world.body(b).unwrap().position().x, 4.0);
}

#[test]
fn variable_step_runs_once_per_update() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_fixed_step(false)).unwrap();
    let b = mover(&mut world, 0.0, 0.0);
    world.set_velocity(b, Vec2::new(10.0, 0.0)).unwrap();
    assert_eq!(world.update(0.5).unwrap(), 1);
    assert_eq!(world.body(b).unwrap().position().x, 5.0);
    assert_eq!(world.accumulator(), 0.0);
}

#[test]
fn world_bounds_stop_body_and_emit_event() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_bounds(0.0, 0.0, 100.0, 100.0)).unwrap();
    let b = world
        .create_body(
            OwnerId(9),
            &BodyConfig::new()
                .with_rect(2.0, 50.0, 10.0, 10.0)
                .with_collide_world_bounds(true)
                .with_on_world_bounds(true),
        )
        .unwrap();
    world.set_velocity(b, Vec2::new(-40.0, 0.0)).unwrap();

    let report = world.step(0.25).unwrap();
    assert_eq!(report.world_bounds_hits, 1);

    let body = world.body(b).unwrap();
    assert_eq!(body.position().x, 0.0);
    assert_eq!(body.velocity.x, 0.0);
    assert!(body.blocked.left);

    let events: Vec<_> = world.drain_events().collect();
    assert_eq!(
        events,
        [PhysicsEvent::WorldBounds { body: b, owner: OwnerId(9), edges: Sides::new(false, false, true, false) }]
    );
}

#[test]
fn open_world_edge_lets_bodies_through() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_bounds(0.0, 0.0, 100.0, 100.0)).unwrap();
    world.set_bounds_collision(Sides::new(true, true, false, true));
    let b = world
        .create_body(OwnerId(0), &BodyConfig::new().with_rect(2.0, 50.0, 10.0, 10.0).with_collide_world_bounds(true))
        .unwrap();
    world.set_velocity(b, Vec2::new(-40.0, 0.0)).unwrap();
    world.step(0.25).unwrap();
    assert_eq!(world.body(b).unwrap().position().x, -8.0);
}

#[test]
fn set_bounds_moves_the_walls() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let b = world
        .create_body(OwnerId(0), &BodyConfig::new().with_rect(40.0, 0.0, 10.0, 10.0).with_collide_world_bounds(true))
        .unwrap();
    world.set_bounds(0.0, 0.0, 45.0, 100.0).unwrap();
    world.step(0.0).unwrap();
    assert_eq!(world.body(b).unwrap().position().x, 35.0);
    assert_eq!(world.bounds(), Rect::new(0.0, 0.0, 45.0, 100.0));
    assert!(world.set_bounds(0.0, 0.0, -1.0, 10.0).is_err());
}

#[test]
fn world_gravity_pulls_down() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let b = mover(&mut world, 0.0, 0.0);
    world.set_gravity(0.0, 100.0).unwrap();
    world.step(0.5).unwrap();
    let body = world.body(b).unwrap();
    assert_eq!(body.velocity.y, 50.0);
    assert_eq!(body.position().y, 25.0);
    assert_eq!(
        world.set_gravity(f64::NAN, 0.0),
        Err(PhysicsError::Configuration(ConfigurationError::NonFiniteVector))
    );
}

#[test]
fn invalid_body_config_leaves_world_unmodified() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let bad_bounce = BodyConfig::new().with_rect(0.0, 0.0, 10.0, 10.0).with_bounce(1.5, 0.0);
    assert_eq!(
        world.create_body(OwnerId(1), &bad_bounce),
        Err(PhysicsError::Configuration(ConfigurationError::InvalidBounce))
    );
    let bad_size = BodyConfig::new().with_rect(0.0, 0.0, f64::INFINITY, 10.0);
    assert!(world.create_static_body(OwnerId(1), &bad_size).is_err());
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.static_body_count(), 0);
}

#[test]
fn invalid_world_config_is_rejected() {
    let bad = [
        WorldConfig::new().with_fps(0.0),
        WorldConfig::new().with_cell_size(-4.0),
        WorldConfig::new().with_bounds(0.0, 0.0, f64::NAN, 10.0),
        WorldConfig::new().with_gravity(f64::INFINITY, 0.0),
    ];
    for config in bad {
        assert!(World::new(config).is_err());
    }
}

#[test]
fn removing_a_body_purges_its_colliders() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let a = mover(&mut world, 0.0, 0.0);
    let b = mover(&mut world, 5.0, 0.0);
    let c = mover(&mut world, 50.0, 0.0);
    let direct = world.add_collider(ColliderDesc::new(a, b)).unwrap();
    let unrelated = world.add_collider(ColliderDesc::new(b, c)).unwrap();

    world.remove_body(a).unwrap();
    assert!(world.collider(direct).is_none());
    assert!(world.collider(unrelated).is_some());
    assert_eq!(world.remove_body(a).unwrap_err(), PhysicsError::StaleHandle);
    assert_eq!(world.set_velocity(a, Vec2::zero()), Err(PhysicsError::StaleHandle));
    assert!(world.step(1.0 / 60.0).is_ok());
}

#[test]
fn emptied_group_pair_is_purged() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let g1 = world.create_group(BodyType::Dynamic);
    let g2 = world.create_group(BodyType::Dynamic);
    let g3 = world.create_group(BodyType::Dynamic);
    let a = mover(&mut world, 0.0, 0.0);
    let b = mover(&mut world, 50.0, 0.0);
    let c = mover(&mut world, 100.0, 0.0);
    world.add_to_group(g1, a).unwrap();
    world.add_to_group(g2, b).unwrap();
    world.add_to_group(g3, a).unwrap();
    world.add_to_group(g3, c).unwrap();
    let pair = world.add_collider(ColliderDesc::new(g1, g2)).unwrap();
    let kept = world.add_collider(ColliderDesc::new(g3, g2)).unwrap();

    world.remove_body(b).unwrap();
    // g2 is empty but g1 still has a member
    assert!(world.collider(pair).is_some());

    world.remove_body(a).unwrap();
    assert!(world.collider(pair).is_none());
    assert!(world.collider(kept).is_some());
    assert!(world.group(g1).unwrap().is_empty());
    assert_eq!(world.group(g3).unwrap().members(), [c]);
}

#[test]
fn removing_a_group_purges_its_colliders() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let g = world.create_group(BodyType::Dynamic);
    let a = mover(&mut world, 0.0, 0.0);
    world.add_to_group(g, a).unwrap();
    world.add_collider(ColliderDesc::new(g, g)).unwrap();
    world.remove_group(g).unwrap();
    assert_eq!(world.collider_count(), 0);
    assert!(world.contains(a));
    assert_eq!(world.add_to_group(g, a), Err(PhysicsError::StaleHandle));
}

#[test]
fn owner_position_accounts_for_offset() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let b = world
        .create_body(OwnerId(3), &BodyConfig::new().with_size(10.0, 10.0).with_offset(2.0, 4.0))
        .unwrap();
    world.set_owner_position(b, Vec2::new(100.0, 50.0)).unwrap();
    assert_eq!(world.body(b).unwrap().position(), Vec2::new(102.0, 54.0));

    world.set_velocity(b, Vec2::new(10.0, 0.0)).unwrap();
    world.step(0.5).unwrap();
    let origin = world.owner_position(b).unwrap();
    assert_relative_eq!(origin.x, 105.0);
    assert_relative_eq!(origin.y, 50.0);
}

#[test]
fn disabled_body_is_ignored() {
    let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
    let a = mover(&mut world, 0.0, 0.0);
    let b = mover(&mut world, 5.0, 0.0);
    world.add_collider(ColliderDesc::new(a, b)).unwrap();
    world.set_velocity(a, Vec2::new(10.0, 0.0)).unwrap();
    world.disable(a).unwrap();

    let report = world.step(0.5).unwrap();
    assert_eq!(report.integrated, 1);
    assert_eq!(report.collisions, 0);
    assert_eq!(world.body(a).unwrap().position().x, 0.0);

    world.enable(a).unwrap();
    assert_eq!(world.step(0.0).unwrap().collisions, 1);
}

#[test]
fn events_can_be_switched_off() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_record_events(false)).unwrap();
    let a = mover(&mut world, 0.0, 0.0);
    let b = mover(&mut world, 5.0, 0.0);
    world.add_collider(ColliderDesc::overlap(a, b)).unwrap();
    assert_eq!(world.step(0.0).unwrap().overlaps, 1);
    assert!(world.events().is_empty());
}

#[test]
fn static_bodies_keep_their_place() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_gravity(0.0, 100.0)).unwrap();
    let wall = world.create_static_body(OwnerId(1), &BodyConfig::new().with_rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    // a static body has no velocity to set
    world.set_velocity(wall, Vec2::new(5.0, 5.0)).unwrap();
    world.step(1.0).unwrap();
    assert_eq!(world.static_body(wall).unwrap().position(), Vec2::zero());
    assert!(world.body(wall).is_none());
}

#[test]
fn created_bodies_start_at_their_offset() {
    let mut world: World<f32> = World::new(WorldConfig::new()).unwrap();
    let config = BodyConfig::new().with_rect(10.0, 0.0, 5.0, 5.0).with_offset(5.0, 0.0);
    let dynamic = world.create_body(OwnerId(1), &config).unwrap();
    let fixed = world.create_static_body(OwnerId(2), &config).unwrap();
    for handle in [dynamic, fixed] {
        assert_eq!(world.get(handle).unwrap().bounds().x, 15.0);
        assert_eq!(world.owner_position(handle), Some(Vec2::new(10.0, 0.0)));
    }
}
