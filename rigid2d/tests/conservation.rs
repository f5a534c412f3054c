// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Integration tests verifying conservation and dissipation over whole ticks

use approx::assert_abs_diff_eq;
use rigid2d::integration::{kinetic_energy, total_kinetic_energy};
use rigid2d::{ContactFriction, DVec2, World, WorldConfig};

fn frictionless_world() -> World {
    let config = WorldConfig::builder()
        .no_global_forces()
        .contact_friction(ContactFriction::NONE)
        .build()
        .unwrap();
    World::with_config(config).unwrap()
}

#[test]
fn test_head_on_collision_swaps_velocities() {
    let mut world = frictionless_world();
    let a = world.create_ball(0.0, 0.0, 5.0);
    let b = world.create_ball(9.0, 0.0, 5.0);
    world.body_mut(a).unwrap().set_velocity(DVec2::new(1.0, 0.0));
    world.body_mut(b).unwrap().set_velocity(DVec2::new(-1.0, 0.0));
    let energy_before = total_kinetic_energy(world.bodies());

    world.step();

    assert_abs_diff_eq!(world.body(a).unwrap().velocity().x, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(world.body(b).unwrap().velocity().x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        total_kinetic_energy(world.bodies()),
        energy_before,
        epsilon = 1e-9
    );
}

#[test]
fn test_elastic_bounce_off_wall_keeps_speed() {
    let mut world = frictionless_world();
    let ball = world.create_ball(50.0, 47.0, 5.0);
    world.create_wall(0.0, 50.0, 100.0, 10.0);
    world.body_mut(ball).unwrap().set_velocity(DVec2::new(1.0, 2.0));

    world.step();

    let velocity = world.body(ball).unwrap().velocity();
    assert_abs_diff_eq!(velocity.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(velocity.y, -2.0, epsilon = 1e-12);
}

#[test]
fn test_spring_pair_conserves_momentum() {
    let mut world = frictionless_world();
    let a = world.create_ball(0.0, 0.0, 3.0);
    let b = world.create_ball(80.0, 0.0, 3.0);
    world.create_spring(0.1, 0.0, a, b).unwrap();

    // Equal and opposite kick sets the pair oscillating
    world.apply_force(a, DVec2::new(-4.0, 0.0), 0.0).unwrap();
    world.apply_force(b, DVec2::new(4.0, 0.0), 0.0).unwrap();

    for _ in 0..200 {
        world.step();
        let momentum: DVec2 = world
            .bodies()
            .iter()
            .map(|body| body.velocity() * body.mass())
            .sum();
        assert_abs_diff_eq!(momentum.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(momentum.y, 0.0, epsilon = 1e-9);

        let center = (world.body(a).unwrap().location() + world.body(b).unwrap().location()) / 2.0;
        assert_abs_diff_eq!(center.x, 40.0, epsilon = 1e-9);
    }
}

#[test]
fn test_damped_spring_loses_energy() {
    let mut world = frictionless_world();
    let a = world.create_ball(0.0, 0.0, 3.0);
    let b = world.create_ball(80.0, 0.0, 3.0);
    world.create_spring(0.1, 0.5, a, b).unwrap();
    world.apply_force(a, DVec2::new(-4.0, 0.0), 0.0).unwrap();
    world.apply_force(b, DVec2::new(4.0, 0.0), 0.0).unwrap();
    world.step();
    let initial = total_kinetic_energy(world.bodies());

    for _ in 0..300 {
        world.step();
    }

    assert!(total_kinetic_energy(world.bodies()) < initial * 0.01);
}

#[test]
fn test_drag_dissipates_monotonically() {
    let config = WorldConfig::builder()
        .gravity_enabled(false)
        .build()
        .unwrap();
    let mut world = World::with_config(config).unwrap();
    let ball = world.create_ball(0.0, 0.0, 5.0);
    world.body_mut(ball).unwrap().set_velocity(DVec2::new(6.0, 8.0));

    let mut previous = kinetic_energy(world.body(ball).unwrap());
    for _ in 0..100 {
        world.step();
        let energy = kinetic_energy(world.body(ball).unwrap());
        assert!(energy <= previous, "energy rose from {previous} to {energy}");
        previous = energy;
    }
    assert!(previous < 1.0);
}

#[test]
fn test_gravity_accelerates_uniformly() {
    let config = WorldConfig::builder()
        .drag(false)
        .friction(false)
        .build()
        .unwrap();
    let mut world = World::with_config(config).unwrap();
    let ball = world.create_ball(0.0, 0.0, 2.0);

    for _ in 0..40 {
        world.step();
    }

    let body = world.body(ball).unwrap();
    assert_abs_diff_eq!(body.velocity().y, 40.0 * 0.025, epsilon = 1e-12);
    // Semi-implicit Euler: y = g * n(n + 1) / 2
    assert_abs_diff_eq!(body.location().y, 0.025 * 40.0 * 41.0 / 2.0, epsilon = 1e-9);
}
