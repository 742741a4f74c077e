use softchain::{BodyConfig, SoftBody, SoftBodyError, StepObserver, Vec2, World, WorldConfig};

fn chain(x: f32, y: f32, points: usize) -> SoftBody<f32> {
    SoftBody::new(Vec2::new(x, y), points, BodyConfig::new(10.0).with_gravity(false)).unwrap()
}

#[test]
fn connect_stores_mirrored_records() {
    let mut world = World::new();
    let a = world.spawn(chain(0.0, 0.0, 3));
    let b = world.spawn(chain(0.0, 30.0, 3));

    let rest = world.connect(a, 1, b, 2).unwrap();
    let expected = Vec2::new(10.0f32, 0.0).distance(Vec2::new(20.0, 30.0));
    assert!((rest - expected).abs() < 1e-5);

    let ja = world.get(a).unwrap().joints();
    let jb = world.get(b).unwrap().joints();
    assert_eq!(ja.len(), 1);
    assert_eq!(jb.len(), 1);
    assert_eq!(ja[0].other, b);
    assert_eq!((ja[0].this_segment, ja[0].other_segment), (1, 2));
    assert_eq!(jb[0].other, a);
    assert_eq!((jb[0].this_segment, jb[0].other_segment), (2, 1));
    assert_eq!(ja[0].rest_length, jb[0].rest_length);
    assert_eq!(ja[0].rest_length, rest);
}

#[test]
fn rest_length_is_fixed_at_connect_time() {
    let mut world = World::new();
    let a = world.spawn(chain(0.0, 0.0, 2));
    let b = world.spawn(chain(0.0, 40.0, 2));
    let rest = world.connect(a, 0, b, 0).unwrap();

    world.get_mut(b).unwrap().set_segment_position(0, Vec2::new(0.0, 90.0));
    assert_eq!(world.get(a).unwrap().joints()[0].rest_length, rest);
}

#[test]
fn self_joint_adds_both_records_to_one_body() {
    let mut world = World::new();
    let a = world.spawn(chain(0.0, 0.0, 3));
    let rest = world.connect(a, 0, a, 2).unwrap();
    assert!((rest - 20.0).abs() < 1e-6);

    let joints = world.get(a).unwrap().joints();
    assert_eq!(joints.len(), 2);
    assert!(joints.iter().all(|j| j.other == a));
}

#[test]
fn connect_rejects_bad_targets() {
    let mut world = World::new();
    let a = world.spawn(chain(0.0, 0.0, 2));
    let b = world.spawn(chain(0.0, 0.0, 2));
    world.destroy(b);

    assert_eq!(world.connect(a, 0, b, 0), Err(SoftBodyError::UnknownBody(b)));
    assert_eq!(
        world.connect(a, 5, a, 0),
        Err(SoftBodyError::SegmentOutOfBounds { index: 5, count: 2 })
    );
    assert!(world.get(a).unwrap().joints().is_empty());
}

#[test]
fn destroy_prunes_partner_records() {
    let mut world = World::new();
    let a = world.spawn(chain(0.0, 0.0, 3));
    let b = world.spawn(chain(0.0, 20.0, 3));
    let c = world.spawn(chain(0.0, 40.0, 3));
    world.connect(a, 0, b, 0).unwrap();
    world.connect(a, 2, c, 2).unwrap();

    let destroyed = world.destroy(b).unwrap();
    assert_eq!(destroyed.joints().len(), 1);

    let remaining = world.get(a).unwrap().joints();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].other, c);
    assert_eq!(world.len(), 2);
}

#[test]
fn joints_are_descriptive_by_default() {
    let mut world = World::new();
    let a = world.spawn(SoftBody::new(Vec2::new(0.0f32, 0.0), 4, BodyConfig::new(10.0)).unwrap());
    let b = world.spawn(SoftBody::new(Vec2::new(0.0f32, 15.0), 4, BodyConfig::new(10.0)).unwrap());
    world.connect(a, 3, b, 0).unwrap();

    let mut lone_a = world.get(a).unwrap().clone();
    let mut lone_b = world.get(b).unwrap().clone();

    for _ in 0..60 {
        world.step();
        lone_a.update();
        lone_b.update();
    }

    assert_eq!(world.get(a).unwrap().positions(), lone_a.positions());
    assert_eq!(world.get(b).unwrap().positions(), lone_b.positions());
}

#[test]
fn joint_resolution_pulls_points_to_rest_length() {
    let mut world = World::with_config(WorldConfig::new().with_joint_resolution(1));
    let a = world.spawn(chain(0.0, 0.0, 1));
    let b = world.spawn(chain(10.0, 0.0, 1));
    let rest = world.connect(a, 0, b, 0).unwrap();
    assert!((rest - 10.0).abs() < 1e-6);

    world.get_mut(b).unwrap().set_segment_position(0, Vec2::new(30.0, 0.0));
    world.step();

    let pa = world.get(a).unwrap().position(0).unwrap();
    let pb = world.get(b).unwrap().position(0).unwrap();
    assert!((pa.distance(pb) - 10.0).abs() < 1e-4, "distance = {}", pa.distance(pb));
    assert!((pa.x - 10.0).abs() < 1e-4);
    assert!((pb.x - 20.0).abs() < 1e-4);
}

#[test]
fn joint_resolution_respects_pins() {
    let mut world = World::with_config(WorldConfig::new().with_joint_resolution(8));
    let a = world.spawn(chain(0.0, 0.0, 1));
    let b = world.spawn(chain(10.0, 0.0, 1));
    world.connect(a, 0, b, 0).unwrap();
    world.get_mut(a).unwrap().set_pinned(0, true);
    world.get_mut(b).unwrap().set_segment_position(0, Vec2::new(40.0, 0.0));

    world.step();

    assert_eq!(world.get(a).unwrap().position(0), Some(Vec2::new(0.0, 0.0)));
    let pb = world.get(b).unwrap().position(0).unwrap();
    assert!((pb.x - 10.0).abs() < 0.5, "pb.x = {}", pb.x);
}

#[test]
fn stale_joint_indices_are_skipped() {
    let mut world = World::with_config(WorldConfig::new().with_joint_resolution(2));
    let a = world.spawn(chain(0.0, 0.0, 3));
    let b = world.spawn(chain(0.0, 20.0, 3));
    world.connect(a, 2, b, 2).unwrap();
    world.get_mut(a).unwrap().remove_segment(2);

    world.step();
    assert!(world.iter().all(|(_, body)| body.positions().iter().all(|p| p.is_finite())));
}

#[derive(Default)]
struct StepCounter {
    integrations: usize,
    completed: usize,
}

impl StepObserver<f32> for StepCounter {
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }
    fn on_step_complete(&mut self) {
        self.completed += 1;
    }
}

#[test]
fn observed_world_step_reports_every_body() {
    let mut world = World::new();
    world.spawn(chain(0.0, 0.0, 3));
    world.spawn(chain(0.0, 20.0, 2));
    world.spawn(chain(0.0, 40.0, 1));

    let mut counter = StepCounter::default();
    world.step_observed(&mut counter);
    world.step_observed(&mut counter);
    assert_eq!(counter.integrations, 6);
    assert_eq!(counter.completed, 6);
}
