use impulse2d::*;

fn main() -> Result<()> {
    let mut world = PhysicsWorld::new(1.0 / 60.0)?;

    for y in [0.0, 10.0] {
        let block = PhysicsBody::builder(Shape::rectangle(40.0, 10.0))
            .position(Vec2::new(0.0, y))
            .dynamic(false)
            .build()?;
        world.register(block)?;
    }

    let ball = PhysicsBody::builder(Shape::circle(5.0))
        .position(Vec2::new(0.0, -30.0))
        .bounciness(0.0)
        .build()?;
    let ball = world.register(ball)?;
    let floor = world.handles()[0];

    for _ in 0..600 {
        world.tick(1.0 / 60.0)?;
    }

    let penetration = world
        .contact_between(floor, ball)
        .map(|contact| contact.penetration)
        .unwrap_or(0.0);
    if let Some(body) = world.body(ball) {
        println!(
            "Ball settled at {:?} with speed {:.4} and penetration {:.3}",
            body.position(),
            body.velocity.length(),
            penetration
        );
    }
    world.profiler().report();
    Ok(())
}
