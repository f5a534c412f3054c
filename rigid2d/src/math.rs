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
//! 2D vector helpers used by every stage of the engine
//!
//! Plain arithmetic (add, subtract, scale, divide, dot, length) comes from
//! [`glam::DVec2`]'s operators. This module adds the operations the engine
//! needs with slightly different semantics than glam's built-ins:
//!
//! - [`normalize`] is a no-op on the exact zero vector instead of producing NaN
//! - [`clamp_magnitude`] preserves direction and only shrinks
//! - [`rotate_about`] rotates around an arbitrary pivot with a rotation matrix
//! - [`segment_intersect`] treats touching endpoints as a miss
//!
//! All functions are total: degenerate input yields a zero vector or `None`,
//! never a panic.

use glam::DVec2;

/// Result of a proper intersection between two segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Point where the segments cross
    pub point: DVec2,
    /// Parametric position of `point` along the first segment, in `(0, 1)`
    pub s: f64,
}

/// Foot of the perpendicular from a point onto a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Offset from the segment start to the foot of the perpendicular
    pub along: DVec2,
    /// Vector from the foot of the perpendicular to the projected point
    pub rejection: DVec2,
}

/// Normalize `v`, leaving it untouched when its length is exactly zero
#[inline]
pub fn normalize(v: DVec2) -> DVec2 {
    let len = v.length();
    if len != 0.0 {
        v / len
    } else {
        v
    }
}

/// Rescale `v` to the given magnitude, keeping its direction
///
/// A zero vector stays zero.
#[inline]
pub fn set_magnitude(v: DVec2, magnitude: f64) -> DVec2 {
    normalize(v) * magnitude
}

/// Shrink `v` to at most `max` in length, preserving direction
#[inline]
pub fn clamp_magnitude(v: DVec2, max: f64) -> DVec2 {
    if v.length_squared() > max * max {
        set_magnitude(v, max)
    } else {
        v
    }
}

/// Clamp the magnitude of a scalar, preserving its sign
///
/// `limit_scalar(-3.0, 2.0) == -2.0`. Zero is treated as positive.
#[inline]
pub fn limit_scalar(value: f64, limit: f64) -> f64 {
    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    value.abs().min(limit) * sign
}

/// Counter-clockwise perpendicular `(-y, x)`
#[inline]
pub fn perp(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Scalar (z component) of the 2D cross product
#[inline]
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotate `point` around `pivot` by `angle` radians
#[inline]
pub fn rotate_about(point: DVec2, pivot: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - pivot;
    DVec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + pivot
}

/// Intersect segment `a0 -> a1` with segment `b0 -> b1`
///
/// Uses the determinant method. Returns a hit only when both parametric
/// positions lie strictly inside `(0, 1)`, so touching endpoints are not an
/// intersection. Parallel segments never intersect.
pub fn segment_intersect(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> Option<SegmentHit> {
    let a = a1 - a0;
    let b = b1 - b0;
    let den_a = cross(a, b);
    if den_a == 0.0 {
        return None;
    }
    let den_b = cross(b, a);

    let s = cross(b0 - a0, b) / den_a;
    let u = cross(a0 - b0, a) / den_b;
    if s > 0.0 && s < 1.0 && u > 0.0 && u < 1.0 {
        Some(SegmentHit {
            point: a0 + a * s,
            s,
        })
    } else {
        None
    }
}

/// Project `p` onto the segment `a0 -> a1`
///
/// Defined only when the scalar projection falls in `(0, length]`.
pub fn project_onto_segment(p: DVec2, a0: DVec2, a1: DVec2) -> Option<SegmentProjection> {
    let edge = a1 - a0;
    let to_p = p - a0;
    let length = edge.length();
    let dir = normalize(edge);
    let sp = dir.dot(to_p);

    if sp > 0.0 && sp <= length {
        let along = dir * sp;
        Some(SegmentProjection {
            along,
            rejection: to_p - along,
        })
    } else {
        None
    }
}

/// Perpendicular distance from `p` to the segment `a0 -> a1`
///
/// `None` when the perpendicular does not land on the segment.
pub fn point_to_segment_distance(p: DVec2, a0: DVec2, a1: DVec2) -> Option<f64> {
    project_onto_segment(p, a0, a1).map(|proj| proj.rejection.length())
}
