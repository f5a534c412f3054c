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
//! Exact collision tests
//!
//! Each detector answers "do these two bodies overlap right now?" and, on a
//! hit, immediately pushes them apart and returns a [`Contact`] for the
//! matching resolver in [`crate::resolution`]. Detectors therefore mutate
//! positions; they never touch velocities or accumulators.
//!
//! | Detector            | Correction                                      |
//! |---------------------|-------------------------------------------------|
//! | [`detect_ball_ball`] | split evenly between both balls                 |
//! | [`detect_box_box`]   | split evenly; an infinite-mass box does not move |
//! | [`detect_ball_box`]  | ball only, by the full penetration depth        |
//!
//! Shape mismatches (e.g. passing a ball to the box-box detector) are not an
//! error; the detector just reports no contact.

use glam::DVec2;

use crate::body::{RigidBody, BOX_CORNERS};
use crate::math::{normalize, perp, project_onto_segment, segment_intersect, set_magnitude};

/// Contact produced by a detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Point where the impulse is applied
    pub point: DVec2,
    /// Unit normal pointing from the second body toward the first
    pub normal: DVec2,
}

/// Circle-circle overlap
///
/// Collides when the center distance is strictly less than the sum of the
/// radii. Coincident centers produce a zero normal, which the resolver
/// ignores.
pub fn detect_ball_ball(a: &mut RigidBody, b: &mut RigidBody) -> Option<Contact> {
    let radius_a = a.radius()?;
    let radius_b = b.radius()?;

    let reach = radius_a + radius_b;
    let distance = a.location.distance(b.location);
    if distance >= reach {
        return None;
    }

    let overlap = set_magnitude(a.location - b.location, reach - distance);
    a.correct_position(overlap * 0.5);
    b.correct_position(overlap * -0.5);

    let normal = normalize(overlap);
    Some(Contact {
        point: a.location - normal * radius_a,
        normal,
    })
}

/// Corner-of-`a` into edge-of-`b` test
///
/// For every corner `i` of `a` and edge `j` of `b`: the diagonal from `a`'s
/// centroid to the corner must cross the edge, and so must the line between
/// the two centroids. The test is asymmetric; callers try `(a, b)` and then
/// `(b, a)`.
///
/// The penetrating part of the diagonal is projected onto the edge normal to
/// get the translation that separates the boxes, half of which is applied to
/// each body.
pub fn detect_box_box(a: &mut RigidBody, b: &mut RigidBody) -> Option<Contact> {
    let a_vertices = *a.vertices()?;
    let b_vertices = *b.vertices()?;

    for (i, corner) in a_vertices.iter().take(BOX_CORNERS).enumerate() {
        for j in 0..BOX_CORNERS {
            let (e0, e1) = (b_vertices[j], b_vertices[j + 1]);

            let Some(diagonal) = segment_intersect(a.location, *corner, e0, e1) else {
                continue;
            };
            if segment_intersect(a.location, b.location, e0, e1).is_none() {
                continue;
            }

            let edge_normal = normalize(perp(e1 - e0));
            let penetration = (*corner - a.location) * (1.0 - diagonal.s);
            let mtv = edge_normal * -edge_normal.dot(penetration);

            a.correct_position(mtv * 0.5);
            b.correct_position(mtv * -0.5);

            let point = a.vertices().map_or(*corner, |v| v[i]);
            return Some(Contact {
                point,
                normal: normalize(mtv),
            });
        }
    }

    None
}

/// Circle against the edges and corners of a box
///
/// Edges are visited in order. For each edge, a corner within the radius of
/// the edge start wins outright and is reported without moving the ball.
/// Otherwise, when the ball's center projects onto the edge and the
/// perpendicular distance is below the radius, the ball alone is pushed out
/// along the perpendicular.
pub fn detect_ball_box(ball: &mut RigidBody, target: &RigidBody) -> Option<Contact> {
    let radius = ball.radius()?;
    let vertices = *target.vertices()?;

    for j in 0..BOX_CORNERS {
        let start = vertices[j];

        let to_ball = ball.location - start;
        if to_ball.length() < radius {
            return Some(Contact {
                point: start,
                normal: normalize(to_ball),
            });
        }

        let Some(projection) = project_onto_segment(ball.location, start, vertices[j + 1]) else {
            continue;
        };
        let distance = projection.rejection.length();
        if distance < radius {
            ball.correct_position(set_magnitude(projection.rejection, radius - distance));
            return Some(Contact {
                point: start + projection.along,
                normal: normalize(projection.rejection),
            });
        }
    }

    None
}
