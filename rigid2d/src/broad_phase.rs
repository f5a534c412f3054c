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
//! Axis-aligned bounding box prefilter
//!
//! Every body casts a "shadow": the smallest axis-aligned box containing it.
//! Two bodies are only handed to a narrow-phase detector when their shadows
//! overlap. The test uses closed intervals, so shadows that merely touch
//! still count as overlapping and the filter never rejects a real contact.

use glam::DVec2;

use crate::body::{RigidBody, Shape, BOX_CORNERS};

/// Axis-aligned bounds of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Lower-left corner
    pub min: DVec2,
    /// Upper-right corner
    pub max: DVec2,
}

impl Shadow {
    /// Compute the shadow of a body in its current pose
    ///
    /// Balls cast a square of side `2r`; boxes cast the bounds of their four
    /// corners (the closing sentinel vertex is ignored).
    pub fn of(body: &RigidBody) -> Self {
        match &body.shape {
            Shape::Ball { radius, .. } => {
                let r = DVec2::splat(*radius);
                Shadow {
                    min: body.location - r,
                    max: body.location + r,
                }
            }
            Shape::Box { vertices } => {
                let mut min = DVec2::splat(f64::INFINITY);
                let mut max = DVec2::splat(f64::NEG_INFINITY);
                for v in vertices.iter().take(BOX_CORNERS) {
                    min = min.min(*v);
                    max = max.max(*v);
                }
                Shadow { min, max }
            }
        }
    }

    /// Closed-interval overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Shadow) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// Whether two bodies are candidates for a narrow-phase test
#[inline]
pub fn shadows_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    Shadow::of(a).overlaps(&Shadow::of(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_shadow() {
        let s = Shadow::of(&RigidBody::ball(50.0, 50.0, 3.0));
        assert_eq!(s.min, DVec2::new(47.0, 47.0));
        assert_eq!(s.max, DVec2::new(53.0, 53.0));
    }

    #[test]
    fn test_box_shadow_after_rotation() {
        let mut b = RigidBody::new_box(0.0, 0.0, 2.0, 2.0);
        b.rotate(std::f64::consts::FRAC_PI_4);
        let s = Shadow::of(&b);
        let half_diag = 2.0_f64.sqrt();
        assert!((s.min.x - (1.0 - half_diag)).abs() < 1e-12);
        assert!((s.max.y - (1.0 + half_diag)).abs() < 1e-12);
    }

    #[test]
    fn test_distant_balls_do_not_overlap() {
        let a = RigidBody::ball(50.0, 50.0, 3.0);
        let b = RigidBody::ball(150.0, 50.0, 3.0);
        assert!(!shadows_overlap(&a, &b));
    }

    #[test]
    fn test_touching_shadows_overlap() {
        let a = RigidBody::new_box(0.0, 0.0, 10.0, 10.0);
        let b = RigidBody::new_box(10.0, 0.0, 10.0, 10.0);
        assert!(shadows_overlap(&a, &b));
        assert!(shadows_overlap(&b, &a));
    }
}
