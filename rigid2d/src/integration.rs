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
//! Semi-implicit Euler integration with a fixed tick
//!
//! The timestep is one tick; there is no `dt`. Each call flushes the force
//! accumulators of one body into its velocity and moves it:
//!
//! 1. `v += accel`, clamp `|v|` to the speed limit, clear `accel`
//! 2. `ω += ang_accel`, clamp `|ω|` to the angular limit, clear `ang_accel`
//! 3. `location += v`, then translate the geometry by `v`
//! 4. rotate the geometry by `ω` about the *new* location
//!
//! Walls are never integrated.

use crate::body::RigidBody;
use crate::math::{clamp_magnitude, limit_scalar};

/// Advance one body by one tick
///
/// Returns `false` (and leaves the body untouched) for walls.
pub fn integrate_body(body: &mut RigidBody, max_speed: f64, max_angular_speed: f64) -> bool {
    if body.is_static() {
        return false;
    }

    body.velocity = clamp_magnitude(body.velocity + body.accel, max_speed);
    body.accel = glam::DVec2::ZERO;

    body.angular_velocity = limit_scalar(body.angular_velocity + body.ang_accel, max_angular_speed);
    body.ang_accel = 0.0;

    let velocity = body.velocity;
    body.translate(velocity);
    body.rotate(body.angular_velocity);
    true
}

/// Kinetic energy of one body: `½·m·|v|² + ½·I·ω²`
///
/// Immovable bodies report zero.
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    if body.is_immovable() {
        return 0.0;
    }
    let linear = 0.5 * body.mass() * body.velocity().length_squared();
    let angular = 0.5 * body.inertia() * body.angular_velocity().powi(2);
    linear + angular
}

/// Sum of [`kinetic_energy`] over a set of bodies
pub fn total_kinetic_energy<'a, I>(bodies: I) -> f64
where
    I: IntoIterator<Item = &'a RigidBody>,
{
    bodies.into_iter().map(kinetic_energy).sum()
}
