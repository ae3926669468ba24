use impulse2d::*;

fn main() -> Result<()> {
    let mut world = PhysicsWorld::new(1.0 / 60.0)?;
    world.set_parallel_enabled(true);

    let ground = PhysicsBody::builder(Shape::rectangle(100.0, 10.0))
        .dynamic(false)
        .build()?;
    world.register(ground)?;

    let ball = PhysicsBody::builder(Shape::circle(5.0))
        .position(Vec2::new(0.0, -40.0))
        .material(Material::rubber())
        .build()?;
    let ball = world.register(ball)?;

    let recorder = EventRecorder::new();
    world.set_listener(recorder.clone());

    for frame in 0..240 {
        world.tick(1.0 / 60.0)?;
        for event in recorder.drain() {
            if event.body() == ball {
                println!("frame {frame}: {event:?}");
            }
        }
    }

    if let Some(body) = world.body(ball) {
        println!(
            "Ball after 4 seconds: position {:?}, velocity {:?}",
            body.position(),
            body.velocity
        );
    }
    Ok(())
}
