//! Timing runs, printed as CSV on stdout

use std::time::Instant;

use crate::math::vector::NVec3;
use crate::simulation::drag::Wind;
use crate::simulation::forces::{ForceContext, ForceSet, Gravity};
use crate::simulation::states::Body;
use crate::simulation::world::World;

/// `n` unit-mass spheres scattered deterministically in a 10 m box
fn cloud(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new((i_f * 0.37).sin() * 5.0, (i_f * 0.13).cos() * 5.0, (i_f * 0.07).sin() * 5.0);
            Body::sphere_unchecked(1.0, 0.01, Some(x), None)
        })
        .collect()
}

/// Time one pairwise gravity pass for growing body counts
pub fn bench_pairwise() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    println!("n,seconds");

    for n in ns {
        let mut bodies = cloud(n);
        let mut forces = ForceSet::new().with(Gravity::with_strength(0.1, None));

        // Warm up
        forces.apply_all(&mut ForceContext::new(&mut bodies, 0.001, 0.0));

        let t0 = Instant::now();
        forces.apply_all(&mut ForceContext::new(&mut bodies, 0.001, 0.0));
        let elapsed = t0.elapsed().as_secs_f64();

        println!("{n},{elapsed:.6}");
    }
}

/// Time full world ticks (gravity, drag, integration, traces)
pub fn bench_tick() {
    let ns = [100, 200, 400, 800, 1600];
    let steps = 10;
    println!("n,steps,seconds_per_step");

    for n in ns {
        let mut world = World::new(0.001);
        for body in cloud(n) {
            world.add_body(body);
        }
        world.add_force(Gravity::with_strength(0.1, None));
        world.add_force(Wind::earth(None));

        let t0 = Instant::now();
        for _ in 0..steps {
            world.update();
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("{n},{steps},{per_step:.6}");
    }
}
