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
//! Behavioral guarantees of the collision pipeline, checked through the
//! public `World` API

use approx::assert_abs_diff_eq;
use rigid2d::{ContactFriction, DVec2, RigidBody, Shadow, World, WorldConfig};

/// World with no global forces, so only contacts and springs act
fn quiet_world() -> World {
    let config = WorldConfig::builder().no_global_forces().build().unwrap();
    World::with_config(config).unwrap()
}

fn separated(a: &Shadow, b: &Shadow) -> bool {
    const EPS: f64 = 1e-9;
    a.max.x <= b.min.x + EPS
        || b.max.x <= a.min.x + EPS
        || a.max.y <= b.min.y + EPS
        || b.max.y <= a.min.y + EPS
}

#[test]
fn test_overlapping_circles_are_separated() {
    let offsets = [
        DVec2::new(3.0, 0.0),
        DVec2::new(0.0, -5.5),
        DVec2::new(2.0, 2.0),
        DVec2::new(-4.0, 1.0),
        DVec2::new(0.5, 0.1),
    ];

    for offset in offsets {
        let mut world = quiet_world();
        let a = world.create_ball(100.0, 100.0, 4.0);
        let b = world.create_ball(100.0 + offset.x, 100.0 + offset.y, 3.0);

        world.step();

        let distance = world
            .body(a)
            .unwrap()
            .location()
            .distance(world.body(b).unwrap().location());
        assert!(
            distance >= 7.0 - 1e-9,
            "offset {offset:?} left the balls {distance} apart"
        );
        assert_eq!(world.last_step_stats().contacts, 1);
    }
}

#[test]
fn test_overlapping_boxes_detected_and_separated() {
    let mut world = quiet_world();
    let a = world.create_box(0.0, 0.0, 10.0, 10.0);
    let b = world.create_box(6.0, 3.0, 10.0, 10.0);

    world.step();

    assert_eq!(world.last_step_stats().contacts, 1);
    let shadow_a = world.body(a).unwrap().shadow();
    let shadow_b = world.body(b).unwrap().shadow();
    assert!(separated(&shadow_a, &shadow_b), "{shadow_a:?} / {shadow_b:?}");
}

#[test]
fn test_normal_momentum_conserved_for_equal_masses() {
    let config = WorldConfig::builder()
        .no_global_forces()
        .contact_friction(ContactFriction::NONE)
        .build()
        .unwrap();
    let mut world = World::with_config(config).unwrap();
    let a = world.create_ball(0.0, 0.0, 5.0);
    let b = world.create_ball(9.0, 2.0, 5.0);
    world.body_mut(a).unwrap().set_velocity(DVec2::new(2.0, 1.0));
    world.body_mut(b).unwrap().set_velocity(DVec2::new(-1.0, 0.5));

    let momentum = |world: &World| {
        world
            .bodies()
            .iter()
            .map(|body| body.velocity() * body.mass())
            .sum::<DVec2>()
    };
    let before = momentum(&world);

    world.step();
    assert_eq!(world.last_step_stats().impulses, 1);

    let after = momentum(&world);
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-9);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-9);
}

#[test]
fn test_immovable_body_never_moves() {
    let mut world = World::new();
    let floor = world.create_wall(0.0, 200.0, 400.0, 20.0);
    let side = world.create_wall(380.0, 0.0, 20.0, 200.0);
    for i in 0..5 {
        let x = 40.0 + 60.0 * i as f64;
        world.create_ball(x, 150.0, 6.0);
        world.create_box(x - 10.0, 100.0, 20.0, 15.0);
    }
    let snapshot = [
        world.body(floor).unwrap().clone(),
        world.body(side).unwrap().clone(),
    ];

    for tick in 0..500 {
        if tick % 50 == 0 {
            world
                .apply_force(floor, DVec2::new(0.0, -1000.0), 5.0)
                .unwrap();
        }
        world.step();
    }

    for (handle, before) in [floor, side].into_iter().zip(snapshot.iter()) {
        let after = world.body(handle).unwrap();
        assert_eq!(after.location(), before.location());
        assert_eq!(after.velocity(), before.velocity());
        assert_eq!(after.vertices(), before.vertices());
    }
}

#[test]
fn test_speed_never_exceeds_limit() {
    let mut world = World::new();
    let ball = world.create_ball(0.0, 0.0, 2.0);

    for _ in 0..100 {
        world
            .apply_force(ball, DVec2::new(500.0, -300.0), 0.0)
            .unwrap();
        world.step();
        let speed = world.body(ball).unwrap().velocity().length();
        assert!(speed <= 10.0 + 1e-9, "speed {speed}");
    }
}

#[test]
fn test_spring_at_rest_length_exerts_nothing() {
    let mut world = quiet_world();
    let a = world.create_ball(50.0, 50.0, 3.0);
    let b = world.create_ball(150.0, 50.0, 3.0);
    let spring = world.create_spring(1.0, 0.0, a, b).unwrap();
    assert_eq!(world.spring(spring).unwrap().rest_length(), 100.0);

    world.step();

    assert_eq!(world.body(a).unwrap().velocity(), DVec2::ZERO);
    assert_eq!(world.body(b).unwrap().velocity(), DVec2::ZERO);
}

#[test]
fn test_distant_balls_skip_narrow_phase() {
    let mut world = World::new();
    world.create_ball(50.0, 50.0, 3.0);
    world.create_ball(150.0, 50.0, 3.0);

    world.step();

    let stats = world.last_step_stats();
    assert_eq!(stats.shadow_tests, 1);
    assert_eq!(stats.narrow_phase_calls, 0);
    assert_eq!(stats.contacts, 0);
}

#[test]
fn test_walls_never_tested_against_each_other() {
    let mut world = World::new();
    world.create_wall(0.0, 0.0, 10.0, 10.0);
    world.create_wall(5.0, 5.0, 10.0, 10.0);
    world.create_ball(100.0, 100.0, 2.0);

    world.step();

    // Only ball-vs-wall pairs are considered
    assert_eq!(world.last_step_stats().shadow_tests, 2);
}

#[test]
fn test_correction_visible_to_later_pairs() {
    // The middle ball is pushed by its first neighbour into the third one,
    // whose shadow it only reaches after that correction
    let mut world = quiet_world();
    world.create_ball(0.0, 0.0, 5.0);
    world.create_ball(8.0, 0.0, 5.0);
    world.create_ball(18.5, 0.0, 5.0);

    world.step();

    let stats = world.last_step_stats();
    assert_eq!(stats.shadow_tests, 3);
    assert_eq!(stats.contacts, 2);
}

#[test]
fn test_shadow_of_standalone_body() {
    let ball = RigidBody::ball(50.0, 50.0, 3.0);
    let far = RigidBody::ball(150.0, 50.0, 3.0);
    assert!(!ball.shadow().overlaps(&far.shadow()));
}
