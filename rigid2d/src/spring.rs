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
//! Damped springs between two bodies

use glam::DVec2;

use crate::body::RigidBody;
use crate::handle::BodyHandle;
use crate::math::normalize;

/// Hooke spring with linear damping along the connecting line
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    a: BodyHandle,
    b: BodyHandle,
    stiffness: f64,
    damping: f64,
    rest_length: f64,
}

impl Spring {
    /// Create a spring with an explicit rest length
    pub fn new(a: BodyHandle, b: BodyHandle, stiffness: f64, damping: f64, rest_length: f64) -> Self {
        Spring {
            a,
            b,
            stiffness,
            damping,
            rest_length,
        }
    }

    /// First endpoint
    pub fn a(&self) -> BodyHandle {
        self.a
    }

    /// Second endpoint
    pub fn b(&self) -> BodyHandle {
        self.b
    }

    /// Stiffness `k`
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping `d`
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Length at which the spring exerts no force
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Force the spring exerts on `b`; `a` receives the negation
    pub fn force(&self, a: &RigidBody, b: &RigidBody) -> DVec2 {
        let displacement = b.location() - a.location();
        let expansion = displacement.length() - self.rest_length;
        let direction = normalize(displacement);

        let stretch = direction * (-self.stiffness * expansion);
        let closing_speed = direction.dot(b.velocity() - a.velocity());
        let damping = direction * (closing_speed * -self.damping);

        stretch + damping
    }

    /// Deposit the spring force into both endpoints
    ///
    /// Endpoints outside `bodies` are ignored; handles are checked when the
    /// spring is created.
    pub fn apply(&self, bodies: &mut [RigidBody]) {
        let (Some(a), Some(b)) = (bodies.get(self.a.raw()), bodies.get(self.b.raw())) else {
            return;
        };
        let total = self.force(a, b);

        if let Some(a) = bodies.get_mut(self.a.raw()) {
            a.apply_force(-total, 0.0);
        }
        if let Some(b) = bodies.get_mut(self.b.raw()) {
            b.apply_force(total, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pair(distance: f64) -> Vec<RigidBody> {
        vec![RigidBody::ball(0.0, 0.0, 1.0), RigidBody::ball(distance, 0.0, 1.0)]
    }

    #[test]
    fn test_spring_at_rest_length_is_inert() {
        let mut bodies = pair(100.0);
        let spring = Spring::new(BodyHandle::new(0), BodyHandle::new(1), 1.0, 0.0, 100.0);
        assert_eq!(spring.force(&bodies[0], &bodies[1]), DVec2::ZERO);

        spring.apply(&mut bodies);
        assert_eq!(bodies[0].accel(), DVec2::ZERO);
        assert_eq!(bodies[1].accel(), DVec2::ZERO);
    }

    #[test]
    fn test_stretched_spring_pulls_together() {
        let mut bodies = pair(110.0);
        let spring = Spring::new(BodyHandle::new(0), BodyHandle::new(1), 0.5, 0.0, 100.0);
        spring.apply(&mut bodies);

        // |F| = k * 10 = 5, divided by mass 2
        assert_abs_diff_eq!(bodies[0].accel().x, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(bodies[1].accel().x, -2.5, epsilon = 1e-12);
        assert_eq!(bodies[0].ang_accel(), 0.0);
    }

    #[test]
    fn test_damping_resists_separation() {
        let mut bodies = pair(100.0);
        bodies[1].set_velocity(DVec2::new(1.0, 0.0));
        let spring = Spring::new(BodyHandle::new(0), BodyHandle::new(1), 0.0, 0.5, 100.0);

        let force = spring.force(&bodies[0], &bodies[1]);
        assert_abs_diff_eq!(force.x, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(force.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dangling_endpoint_is_ignored() {
        let mut bodies = pair(50.0);
        let spring = Spring::new(BodyHandle::new(0), BodyHandle::new(7), 1.0, 0.0, 10.0);
        spring.apply(&mut bodies);
        assert_eq!(bodies[0].accel(), DVec2::ZERO);
    }
}
