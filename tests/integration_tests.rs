use approx::assert_relative_eq;
use impulse2d::config::DEFAULT_GRAVITY;
use impulse2d::*;

const DT: f32 = 1.0 / 60.0;

#[test]
fn dynamic_body_accelerates_under_gravity() {
    let mut world = PhysicsWorld::new(DT).unwrap();
    let handle = world
        .register(PhysicsBody::new(Shape::circle(1.0)).unwrap())
        .unwrap();

    for _ in 0..10 {
        world.tick(DT).unwrap();
    }

    let body = world.body(handle).unwrap();
    let g = -DEFAULT_GRAVITY[1];
    assert_relative_eq!(body.velocity.y, 10.0 * g, epsilon = 1e-5);
    // Sum of 1..=10 steps of accumulated velocity.
    assert_relative_eq!(body.position().y, 55.0 * g, epsilon = 1e-4);
    assert_eq!(body.position().x, 0.0);
}

#[test]
fn static_bodies_and_zero_gravity_scale_stay_put() {
    let mut world = PhysicsWorld::new(DT).unwrap();
    let anchor = world
        .register(
            PhysicsBody::builder(Shape::rectangle(2.0, 2.0))
                .position(Vec2::new(5.0, 5.0))
                .dynamic(false)
                .build()
                .unwrap(),
        )
        .unwrap();
    let floating = world
        .register(
            PhysicsBody::builder(Shape::circle(1.0))
                .position(Vec2::new(-5.0, 0.0))
                .gravity_scale(Vec2::ZERO)
                .build()
                .unwrap(),
        )
        .unwrap();

    for _ in 0..30 {
        world.tick(DT).unwrap();
    }

    assert_eq!(world.body(anchor).unwrap().position(), Vec2::new(5.0, 5.0));
    assert_eq!(world.body(floating).unwrap().position(), Vec2::new(-5.0, 0.0));
}

#[test]
fn angular_velocity_spins_the_cached_shape() {
    let mut world = PhysicsWorld::with_config(WorldConfig::default().with_gravity(Vec2::ZERO))
        .unwrap();
    let spinner = world
        .register(
            PhysicsBody::builder(Shape::rectangle(4.0, 2.0))
                .angular_velocity(std::f32::consts::FRAC_PI_2)
                .build()
                .unwrap(),
        )
        .unwrap();

    world.tick(DT).unwrap();

    let body = world.body(spinner).unwrap();
    assert_relative_eq!(body.rotation(), std::f32::consts::FRAC_PI_2);
    let max_y = body
        .world_shape()
        .vertices()
        .iter()
        .map(|v| v.y)
        .fold(f32::MIN, f32::max);
    assert_relative_eq!(max_y, 2.0, epsilon = 1e-5);
}

#[test]
fn friction_slows_a_sliding_body() {
    let mut world = PhysicsWorld::new(DT).unwrap();
    world
        .register(
            PhysicsBody::builder(Shape::rectangle(200.0, 10.0))
                .dynamic(false)
                .friction(0.1)
                .build()
                .unwrap(),
        )
        .unwrap();
    let slider = world
        .register(
            PhysicsBody::builder(Shape::rectangle(4.0, 4.0))
                .position(Vec2::new(0.0, -7.0))
                .velocity(Vec2::new(0.5, 0.0))
                .friction(0.1)
                .build()
                .unwrap(),
        )
        .unwrap();

    for _ in 0..120 {
        world.tick(DT).unwrap();
    }

    let body = world.body(slider).unwrap();
    assert!(body.velocity.x.abs() < 0.5, "velocity {:?}", body.velocity);
    assert!(body.velocity.x >= -1e-4);
}

#[test]
fn listener_sees_every_landing() {
    let mut world = PhysicsWorld::new(DT).unwrap();
    let recorder = EventRecorder::new();
    world.set_listener(recorder.clone());

    let ground = world
        .register(
            PhysicsBody::builder(Shape::rectangle(100.0, 10.0))
                .dynamic(false)
                .build()
                .unwrap(),
        )
        .unwrap();
    let balls: Vec<_> = (0..3)
        .map(|i| {
            world
                .register(
                    PhysicsBody::builder(Shape::circle(2.0))
                        .position(Vec2::new(i as f32 * 20.0 - 20.0, -10.0))
                        .build()
                        .unwrap(),
                )
                .unwrap()
        })
        .collect();

    for _ in 0..120 {
        world.tick(DT).unwrap();
    }

    let events = recorder.drain();
    for &ball in &balls {
        assert!(
            events.iter().any(|event| matches!(
                event,
                CollisionEvent::Collide { body, contact } if *body == ball && contact.partner == ground
            )),
            "ball {ball:?} never landed"
        );
    }
    assert!(world.profiler().callbacks_fired >= 6);
}

#[test]
fn parallel_integration_matches_sequential() {
    let build = |parallel: bool| {
        let mut world = PhysicsWorld::new(DT).unwrap();
        world.set_parallel_enabled(parallel);
        world
            .register(
                PhysicsBody::builder(Shape::rectangle(200.0, 10.0))
                    .dynamic(false)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        for i in 0..16 {
            world
                .register(
                    PhysicsBody::builder(Shape::circle(1.5))
                        .position(Vec2::new(i as f32 * 4.0 - 32.0, -20.0 - i as f32))
                        .bounciness(0.3)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        for _ in 0..90 {
            world.tick(DT).unwrap();
        }
        world
            .teardown()
            .into_iter()
            .map(|body| body.position())
            .collect::<Vec<_>>()
    };

    assert_eq!(build(false), build(true));
}

#[test]
fn velocity_under_rotated_and_scaled_parent_moves_in_world_space() {
    let mut world = PhysicsWorld::with_config(WorldConfig::default().with_gravity(Vec2::ZERO))
        .unwrap();
    let child = world
        .register(
            PhysicsBody::builder(Shape::circle(1.0))
                .velocity(Vec2::new(1.0, 0.0))
                .inherited(InheritedTransform {
                    position: Vec2::ZERO,
                    rotation: std::f32::consts::FRAC_PI_2,
                    scale: Vec2::splat(2.0),
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    let before = world.body(child).unwrap().world_center();

    world.tick(0.0).unwrap();

    let moved = world.body(child).unwrap().world_center() - before;
    assert_relative_eq!(moved.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(moved.y, 0.0, epsilon = 1e-5);
}
