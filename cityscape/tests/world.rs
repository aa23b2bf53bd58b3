use cityscape::markings::{LightState, MarkingKind};
use cityscape::{Graph, Point, Segment, World, WorldParams};

fn straight_road(len: f64) -> Graph {
    let mut g = Graph::new();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(len, 0.0);
    g.try_add_point(a);
    g.try_add_point(b);
    g.try_add_segment(Segment::new(a, b));
    g
}

#[test]
fn empty_graph_generates_nothing() {
    let world = World::default();
    assert!(world.envelopes.is_empty());
    assert!(world.road_borders.is_empty());
    assert!(world.buildings.is_empty());
    assert!(world.trees.is_empty());
    assert!(world.scene_items(Point::new(0.0, 0.0)).is_empty());
}

#[test]
fn short_road_has_no_buildings_long_road_does() {
    let params = WorldParams {
        road_width: 100.0,
        building_min_length: 150.0,
        spacing: 50.0,
        ..WorldParams::default()
    };
    let short = World::new(straight_road(100.0), params.clone());
    assert_eq!(short.envelopes.len(), 1);
    assert!(short.buildings.is_empty());

    let long = World::new(straight_road(400.0), params);
    assert!(!long.buildings.is_empty());
}

#[test]
fn sync_only_regenerates_on_change() {
    let mut world = World::new(straight_road(400.0), WorldParams::default());
    assert!(!world.sync());

    let c = Point::new(400.0, 400.0);
    world.graph_mut().try_add_point(c);
    world.graph_mut().try_add_segment(Segment::new(Point::new(400.0, 0.0), c));
    assert!(world.sync());
    assert_eq!(world.envelopes.len(), 2);
    assert!(!world.sync());
}

#[test]
fn markings_survive_regeneration() {
    let mut world = World::new(straight_road(400.0), WorldParams::default());
    let stop = world
        .marking_intent(MarkingKind::Stop, Point::new(200.0, 10.0), 50.0)
        .expect("near the road");
    assert_eq!(stop.center, Point::new(200.0, 0.0));
    world.add_marking(stop);
    assert!(world
        .marking_intent(MarkingKind::Stop, Point::new(200.0, 300.0), 50.0)
        .is_none());

    world.graph_mut().move_point(Point::new(400.0, 0.0), Point::new(500.0, 0.0));
    assert!(world.sync());
    assert_eq!(world.markings.len(), 1);

    assert!(!world.remove_marking_at(Point::new(0.0, 300.0)));
    assert!(world.remove_marking_at(Point::new(200.0, 0.0)));
    assert!(world.markings.is_empty());
}

#[test]
fn light_marking_is_sized_from_road_width() {
    let world = World::new(straight_road(400.0), WorldParams::default());
    let light = world
        .marking_intent(MarkingKind::Light { state: LightState::Off }, Point::new(100.0, 0.0), 10.0)
        .expect("on the road");
    assert_eq!(light.width, 50.0);
    assert_eq!(light.height, 18.0);
    let crossing = world
        .marking_intent(MarkingKind::Crossing, Point::new(100.0, 0.0), 10.0)
        .expect("on the road");
    assert_eq!((crossing.width, crossing.height), (100.0, 50.0));
}

#[test]
fn scene_items_are_far_to_near() {
    let mut g = straight_road(600.0);
    let c = Point::new(600.0, 600.0);
    g.try_add_point(c);
    g.try_add_segment(Segment::new(Point::new(600.0, 0.0), c));
    let world = World::new(g, WorldParams::default());
    let view = Point::new(300.0, 300.0);
    let items = world.scene_items(view);
    assert_eq!(items.len(), world.trees.len() + world.buildings.len());
    for pair in items.windows(2) {
        let d0 = pair[0].footprint().distance_to_point(view);
        let d1 = pair[1].footprint().distance_to_point(view);
        assert!(d0 >= d1, "{} drawn before {}", d0, d1);
    }
}

#[test]
fn same_seed_same_trees() {
    let a = World::new(straight_road(600.0), WorldParams::default());
    let b = World::new(straight_road(600.0), WorldParams::default());
    let centers = |w: &World| w.trees.iter().map(|t| t.center).collect::<Vec<_>>();
    assert_eq!(centers(&a), centers(&b));
}

#[test]
fn invalid_params_leave_world_untouched() {
    let mut world = World::new(straight_road(400.0), WorldParams::default());
    let buildings = world.buildings.len();
    let bad = WorldParams { building_min_length: 0.0, spacing: 0.0, ..WorldParams::default() };
    assert!(world.set_params(bad).is_err());
    assert_eq!(world.params, WorldParams::default());
    assert_eq!(world.buildings.len(), buildings);

    let wider = WorldParams { road_width: 60.0, ..WorldParams::default() };
    assert!(world.set_params(wider).is_ok());
    assert_eq!(world.params.road_width, 60.0);
}
