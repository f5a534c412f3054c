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
//! Rigid body model
//!
//! A [`RigidBody`] is either a ball or a quadrilateral box. Walls are boxes
//! with infinite mass and inertia; they are not a separate shape, the
//! [`BodyKind::Wall`] classification is derived from the mass.
//!
//! # Mass model
//!
//! Mass and inertia are derived from the shape with deliberately simple
//! formulas that the collision response is tuned against:
//!
//! | Shape | mass        | inertia   |
//! |-------|-------------|-----------|
//! | Box   | `2(w + h)`  | `w·h·w`   |
//! | Ball  | `2r`        | `r³ / 2`  |
//!
//! An immovable body has `mass == inertia == f64::INFINITY`, so every
//! `1 / mass` term in the impulse solver vanishes on its side.
//!
//! # Force accumulation
//!
//! Forces never touch velocity directly. [`RigidBody::apply_force`] adds into
//! the `accel` / `ang_accel` accumulators, which the integrator flushes once
//! per tick and then resets to zero.

use glam::DVec2;

use crate::broad_phase::Shadow;
use crate::math::rotate_about;

/// Number of distinct corners of a box
pub const BOX_CORNERS: usize = 4;

/// Classification of a body as seen by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Movable quadrilateral
    Box,
    /// Circle
    Ball,
    /// Immovable quadrilateral
    Wall,
}

/// Geometry of a body
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Circle with a spin marker
    Ball {
        /// Radius
        radius: f64,
        /// Point on the rim, rotated with the ball to visualize spin
        orientation: DVec2,
    },
    /// Quadrilateral
    Box {
        /// Corners in order; the fifth entry repeats the first so edge `j`
        /// is always `vertices[j] -> vertices[j + 1]`
        vertices: [DVec2; BOX_CORNERS + 1],
    },
}

/// A 2D rigid body
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub(crate) shape: Shape,
    pub(crate) location: DVec2,
    pub(crate) velocity: DVec2,
    pub(crate) angular_velocity: f64,
    pub(crate) accel: DVec2,
    pub(crate) ang_accel: f64,
    pub(crate) mass: f64,
    pub(crate) inertia: f64,
}

impl RigidBody {
    /// Create a ball centered at `(x, y)`
    ///
    /// # Examples
    ///
    /// ```
    /// use rigid2d::{RigidBody, BodyKind};
    ///
    /// let ball = RigidBody::ball(50.0, 50.0, 3.0);
    /// assert_eq!(ball.kind(), BodyKind::Ball);
    /// assert_eq!(ball.mass(), 6.0);
    /// ```
    pub fn ball(x: f64, y: f64, radius: f64) -> Self {
        RigidBody {
            shape: Shape::Ball {
                radius,
                orientation: DVec2::new(x + radius, y),
            },
            location: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            accel: DVec2::ZERO,
            ang_accel: 0.0,
            mass: radius * 2.0,
            inertia: radius * radius * radius / 2.0,
        }
    }

    /// Create an axis-aligned box from its top-left corner and size
    pub fn new_box(x: f64, y: f64, w: f64, h: f64) -> Self {
        let first = DVec2::new(x, y);
        RigidBody {
            shape: Shape::Box {
                vertices: [
                    first,
                    DVec2::new(x + w, y),
                    DVec2::new(x + w, y + h),
                    DVec2::new(x, y + h),
                    first,
                ],
            },
            location: DVec2::new(x + w / 2.0, y + h / 2.0),
            velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            accel: DVec2::ZERO,
            ang_accel: 0.0,
            mass: (w + h) * 2.0,
            inertia: w * h * w,
        }
    }

    /// Create an immovable wall from its top-left corner and size
    pub fn wall(x: f64, y: f64, w: f64, h: f64) -> Self {
        let mut wall = Self::new_box(x, y, w, h);
        wall.make_immovable();
        wall
    }

    /// Derived classification: an infinite-mass box is a wall
    pub fn kind(&self) -> BodyKind {
        match self.shape {
            Shape::Ball { .. } => BodyKind::Ball,
            Shape::Box { .. } if self.is_immovable() => BodyKind::Wall,
            Shape::Box { .. } => BodyKind::Box,
        }
    }

    /// Whether the body is a wall (static set, never integrated)
    pub fn is_static(&self) -> bool {
        self.kind() == BodyKind::Wall
    }

    /// Whether the body has infinite mass
    pub fn is_immovable(&self) -> bool {
        self.mass == f64::INFINITY
    }

    /// Geometry of the body
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Centroid
    pub fn location(&self) -> DVec2 {
        self.location
    }

    /// Linear velocity in units per tick
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Set the linear velocity
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    /// Angular velocity in radians per tick
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Set the angular velocity
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    /// Linear acceleration accumulated so far this tick
    pub fn accel(&self) -> DVec2 {
        self.accel
    }

    /// Angular acceleration accumulated so far this tick
    pub fn ang_accel(&self) -> f64 {
        self.ang_accel
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Moment of inertia
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Override the derived mass and inertia
    ///
    /// Callers are responsible for keeping the two consistent: an infinite
    /// mass must come with an infinite inertia.
    pub fn set_mass_properties(&mut self, mass: f64, inertia: f64) {
        self.mass = mass;
        self.inertia = inertia;
    }

    /// Give the body infinite mass and inertia
    pub fn make_immovable(&mut self) {
        self.set_mass_properties(f64::INFINITY, f64::INFINITY);
    }

    /// Ball radius, `None` for boxes
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Ball { radius, .. } => Some(radius),
            Shape::Box { .. } => None,
        }
    }

    /// Ball spin marker, `None` for boxes
    pub fn orientation(&self) -> Option<DVec2> {
        match self.shape {
            Shape::Ball { orientation, .. } => Some(orientation),
            Shape::Box { .. } => None,
        }
    }

    /// Box vertices including the closing sentinel, `None` for balls
    pub fn vertices(&self) -> Option<&[DVec2; BOX_CORNERS + 1]> {
        match &self.shape {
            Shape::Box { vertices } => Some(vertices),
            Shape::Ball { .. } => None,
        }
    }

    /// Axis-aligned bounds in the current pose
    pub fn shadow(&self) -> Shadow {
        Shadow::of(self)
    }

    /// Deposit a force and torque into the accumulators
    ///
    /// Torque is divided by mass, not inertia. The collision resolvers use
    /// inertia for their angular terms; this path does not.
    pub fn apply_force(&mut self, force: DVec2, torque: f64) {
        self.accel += force / self.mass;
        self.ang_accel += torque / self.mass;
    }

    /// Push the body out of an overlap
    ///
    /// Boxes with infinite mass stay put. Balls are always moved, whatever
    /// their mass.
    pub fn correct_position(&mut self, offset: DVec2) {
        match self.shape {
            Shape::Box { .. } if self.is_immovable() => {}
            _ => self.translate(offset),
        }
    }

    /// Rotate the geometry about the centroid
    ///
    /// Only the vertices (or the spin marker) move; the angular velocity is
    /// untouched.
    pub fn rotate(&mut self, angle: f64) {
        let pivot = self.location;
        match &mut self.shape {
            Shape::Box { vertices } => {
                for v in vertices.iter_mut().take(BOX_CORNERS) {
                    *v = rotate_about(*v, pivot, angle);
                }
                vertices[BOX_CORNERS] = vertices[0];
            }
            Shape::Ball { orientation, .. } => {
                *orientation = rotate_about(*orientation, pivot, angle);
            }
        }
    }

    pub(crate) fn translate(&mut self, offset: DVec2) {
        self.location += offset;
        match &mut self.shape {
            Shape::Box { vertices } => {
                for v in vertices.iter_mut().take(BOX_CORNERS) {
                    *v += offset;
                }
                vertices[BOX_CORNERS] = vertices[0];
            }
            Shape::Ball { orientation, .. } => {
                *orientation += offset;
            }
        }
    }
}
