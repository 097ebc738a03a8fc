use arcade_physics::{BodyConfig, CandidatePair, OwnerId, World, WorldConfig, spatial::MAX_CELLS};

#[test]
fn candidates_cover_every_overlap() {
    let mut world: World<f32> = World::new(WorldConfig::new().with_cell_size(32.0)).unwrap();
    let mut handles = Vec::new();
    for i in 0..30 {
        let x = (i * 37 % 700) as f32;
        let y = (i * 53 % 500) as f32;
        let config = BodyConfig::new().with_rect(x, y, 24.0 + (i % 4) as f32 * 10.0, 24.0);
        handles.push(world.create_body(OwnerId(i), &config).unwrap());
    }
    world.step(0.0).unwrap();

    let pairs = world.spatial_index().pairs();
    for (i, &a) in handles.iter().enumerate() {
        for &b in &handles[i + 1..] {
            let overlapping = world.get(a).unwrap().bounds().intersects(&world.get(b).unwrap().bounds());
            let listed = pairs.contains(&CandidatePair { a, b }) || pairs.contains(&CandidatePair { a: b, b: a });
            if overlapping {
                assert!(listed, "missed overlapping pair {:?} {:?}", a, b);
            }
        }
    }
}

#[test]
fn static_geometry_never_pairs_with_itself() {
    let mut world: World<f32> = World::new(WorldConfig::new()).unwrap();
    for i in 0..10 {
        let config = BodyConfig::new().with_rect(i as f32 * 20.0, 400.0, 30.0, 30.0);
        world.create_static_body(OwnerId(i), &config).unwrap();
    }
    let report = world.step(1.0 / 60.0).unwrap();
    assert_eq!(report.candidate_pairs, 0);
}

#[test]
fn tiny_cells_are_grown_to_fit() {
    let mut world: World<f64> =
        World::new(WorldConfig::new().with_bounds(0.0, 0.0, 100_000.0, 100_000.0).with_cell_size(1.0)).unwrap();
    world.create_body(OwnerId(0), &BodyConfig::new().with_rect(10.0, 10.0, 5.0, 5.0)).unwrap();
    world.step(0.0).unwrap();
    let (cols, rows) = world.spatial_index().dimensions();
    assert!(cols * rows <= MAX_CELLS);
    assert!(world.spatial_index().cell_size() > 1.0);
}
