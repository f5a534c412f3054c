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
//! Impulse-based collision response
//!
//! All three resolvers share one algorithm and differ only in their lever
//! arms and in which bodies take part in the angular response.
//!
//! # Algorithm
//!
//! With `r_X` the lever arm of body X and `n` the contact normal:
//!
//! ```text
//! v_rel = (v_A + ω_A·perp(r_A)) − (v_B + ω_B·perp(r_B))
//! j     = −(1 + e)·(v_rel · n) / (1/m_A + 1/m_B + Σ (perp(r_X) · n)² / I_X)
//! ```
//!
//! The sum runs over the bodies that take the angular response. Nothing
//! happens unless `v_rel · n < 0`, i.e. the bodies approach each other.
//!
//! The impulse is deposited into the `accel` / `ang_accel` accumulators, not
//! into the velocities, so it takes effect at the next integration.
//!
//! # Contact friction
//!
//! A tangential term is folded into the same deposit:
//! `t = normalize(perp(n) · (v_rel · perp(n)))`, scaled by
//! [`ContactFriction::linear`] on the linear side and
//! [`ContactFriction::angular`] on the angular side. This is a heuristic
//! tuned for the demo scenes, not Coulomb friction.
//!
//! | Resolver             | Arm of A                 | Arm of B                 | Angular response |
//! |----------------------|--------------------------|--------------------------|------------------|
//! | [`resolve_ball_ball`] | `−n·r_A`                 | `n·r_B`                  | friction only    |
//! | [`resolve_ball_box`]  | `−n·r`                   | `contact − B.location`   | box only         |
//! | [`resolve_box_box`]   | `contact − A.location`   | `contact − B.location`   | both             |

use glam::DVec2;

use crate::body::RigidBody;
use crate::config::ContactFriction;
use crate::math::{normalize, perp};
use crate::narrow_phase::Contact;

/// Coefficient of restitution (perfectly elastic)
pub const RESTITUTION: f64 = 1.0;

/// One side of a contact
#[derive(Debug, Clone, Copy)]
struct Lever {
    /// Vector from the body's centroid to the point of application
    arm: DVec2,
    /// Whether the normal impulse produces torque on this body
    spins: bool,
}

impl Lever {
    fn angular_term(&self, normal: DVec2, inertia: f64) -> f64 {
        if self.spins {
            perp(self.arm).dot(normal).powi(2) / inertia
        } else {
            0.0
        }
    }
}

/// Shared impulse exchange
///
/// Returns `true` when an impulse was deposited.
fn exchange_impulse(
    a: &mut RigidBody,
    lever_a: Lever,
    b: &mut RigidBody,
    lever_b: Lever,
    normal: DVec2,
    friction: ContactFriction,
) -> bool {
    let perp_a = perp(lever_a.arm);
    let perp_b = perp(lever_b.arm);

    let relative = (a.velocity + perp_a * a.angular_velocity)
        - (b.velocity + perp_b * b.angular_velocity);
    let approach = relative.dot(normal);
    if !(approach < 0.0) {
        return false;
    }

    let linear = normal.dot(normal * (1.0 / a.mass + 1.0 / b.mass));
    let angular = lever_a.angular_term(normal, a.inertia) + lever_b.angular_term(normal, b.inertia);
    let denominator = linear + angular;
    if denominator == 0.0 || !denominator.is_finite() {
        return false;
    }
    let j = -(1.0 + RESTITUTION) * approach / denominator;

    let tangent_axis = perp(normal);
    let tangent = normalize(tangent_axis * relative.dot(tangent_axis));

    a.accel += normal * (j / a.mass) + tangent * (friction.linear * -j / a.mass);
    b.accel += normal * (-j / b.mass) + tangent * (friction.linear * j / b.mass);

    let mut spin_a = tangent * (friction.angular * -j / a.inertia);
    if lever_a.spins {
        spin_a += normal * (j / a.inertia);
    }
    let mut spin_b = tangent * (friction.angular * j / b.inertia);
    if lever_b.spins {
        spin_b += normal * (-j / b.inertia);
    }
    a.ang_accel += perp_a.dot(spin_a);
    b.ang_accel += perp_b.dot(spin_b);

    log::trace!("impulse j={j:.4} along ({:.3}, {:.3})", normal.x, normal.y);
    true
}

/// Resolve a ball-ball contact
///
/// Only the normal is used; the lever arms run from each center to the rim
/// along the normal. Neither ball picks up spin from the normal impulse.
pub fn resolve_ball_ball(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    friction: ContactFriction,
) -> bool {
    let (Some(radius_a), Some(radius_b)) = (a.radius(), b.radius()) else {
        return false;
    };
    let normal = contact.normal;
    exchange_impulse(
        a,
        Lever {
            arm: normal * -radius_a,
            spins: false,
        },
        b,
        Lever {
            arm: normal * radius_b,
            spins: false,
        },
        normal,
        friction,
    )
}

/// Resolve a contact between `ball` and a box (or wall)
pub fn resolve_ball_box(
    ball: &mut RigidBody,
    target: &mut RigidBody,
    contact: &Contact,
    friction: ContactFriction,
) -> bool {
    let Some(radius) = ball.radius() else {
        return false;
    };
    let normal = contact.normal;
    let arm_b = contact.point - target.location;
    exchange_impulse(
        ball,
        Lever {
            arm: normal * -radius,
            spins: false,
        },
        target,
        Lever {
            arm: arm_b,
            spins: true,
        },
        normal,
        friction,
    )
}

/// Resolve a contact between two boxes (either may be a wall)
pub fn resolve_box_box(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    friction: ContactFriction,
) -> bool {
    let arm_a = contact.point - a.location;
    let arm_b = contact.point - b.location;
    exchange_impulse(
        a,
        Lever {
            arm: arm_a,
            spins: true,
        },
        b,
        Lever {
            arm: arm_b,
            spins: true,
        },
        contact.normal,
        friction,
    )
}
