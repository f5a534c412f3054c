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
//! Read-only drawing interface
//!
//! The engine ships no drawing backend. A host implements [`SceneRenderer`]
//! and calls [`World::render`](crate::World::render) once per tick, after
//! stepping.

use glam::DVec2;

use crate::body::{BodyKind, RigidBody, Shape, BOX_CORNERS};
use crate::handle::BodyHandle;
use crate::kick::DragVector;

/// Drawable outline of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline<'a> {
    /// Circle with a spin marker on its rim
    Circle {
        /// Radius
        radius: f64,
        /// Spin marker
        orientation: DVec2,
    },
    /// Closed polygon (the four distinct corners)
    Polygon(&'a [DVec2]),
}

/// What a renderer gets to see of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView<'a> {
    /// Arena handle
    pub handle: BodyHandle,
    /// Box, ball or wall
    pub kind: BodyKind,
    /// Centroid
    pub location: DVec2,
    /// Geometry to draw
    pub outline: Outline<'a>,
}

impl<'a> BodyView<'a> {
    /// Borrow a drawable view of `body`
    pub fn new(handle: BodyHandle, body: &'a RigidBody) -> Self {
        let outline = match &body.shape {
            Shape::Ball {
                radius,
                orientation,
            } => Outline::Circle {
                radius: *radius,
                orientation: *orientation,
            },
            Shape::Box { vertices } => Outline::Polygon(&vertices[..BOX_CORNERS]),
        };
        BodyView {
            handle,
            kind: body.kind(),
            location: body.location,
            outline,
        }
    }
}

/// Drawing collaborator
///
/// Only [`draw_body`](SceneRenderer::draw_body) is required.
pub trait SceneRenderer {
    /// Draw one body
    fn draw_body(&mut self, body: &BodyView<'_>);

    /// Draw a spring as a line between its endpoints
    fn draw_spring(&mut self, _from: DVec2, _to: DVec2) {}

    /// Draw the kick arrow while a body is being dragged
    fn draw_drag(&mut self, _drag: &DragVector) {}
}
