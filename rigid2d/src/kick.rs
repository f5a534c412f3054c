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
//! Pointer kick controller
//!
//! Lets a user grab a body with the pointer, drag out an arrow, and release
//! to kick the body toward the pointer. The host feeds one
//! [`PointerSnapshot`] per tick; the controller keeps only its own latch.
//!
//! ```text
//!            down, body within radius            up
//!   Idle ─────────────────────────────▶ Dragging ─────▶ Idle (force applied)
//!    ▲ │ down, nothing in reach             │ down
//!    └─┘                                    └─▶ Dragging (arrow only)
//! ```

use glam::DVec2;

use crate::body::RigidBody;
use crate::handle::BodyHandle;

/// Pointer state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSnapshot {
    /// The pointer button is held
    pub pointer_down: bool,
    /// The pointer button was released
    pub pointer_up: bool,
    /// Pointer x in world coordinates
    pub x: f64,
    /// Pointer y in world coordinates
    pub y: f64,
}

impl PointerSnapshot {
    /// Button held at `(x, y)`
    pub fn down(x: f64, y: f64) -> Self {
        PointerSnapshot {
            pointer_down: true,
            pointer_up: false,
            x,
            y,
        }
    }

    /// Button released at `(x, y)`
    pub fn up(x: f64, y: f64) -> Self {
        PointerSnapshot {
            pointer_down: false,
            pointer_up: true,
            x,
            y,
        }
    }

    /// Pointer position
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Latch state of the controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum KickState {
    /// Nothing grabbed
    #[default]
    Idle,
    /// A body is grabbed
    Dragging {
        /// Grabbed body
        body: BodyHandle,
        /// Body location at the moment it was grabbed
        base: DVec2,
    },
}

/// Arrow from the grab point to the pointer, for display only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragVector {
    /// Where the body was grabbed
    pub base: DVec2,
    /// Current pointer position
    pub target: DVec2,
}

/// Grab-and-release controller
#[derive(Debug, Clone)]
pub struct KickController {
    state: KickState,
    radius: f64,
    drag: Option<DragVector>,
}

impl KickController {
    /// Create an idle controller with the given grab radius
    pub fn new(radius: f64) -> Self {
        KickController {
            state: KickState::Idle,
            radius,
            drag: None,
        }
    }

    /// Current latch state
    pub fn state(&self) -> KickState {
        self.state
    }

    /// Grab radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Drag arrow of the last update, if a body was being dragged
    pub fn drag_vector(&self) -> Option<DragVector> {
        self.drag
    }

    /// Advance the state machine by one tick
    ///
    /// Walls are never grabbed. On release the kick force
    /// `pointer − body.location` is applied with zero torque.
    pub fn update(&mut self, input: &PointerSnapshot, bodies: &mut [RigidBody]) {
        self.drag = None;
        let pointer = input.position();

        match self.state {
            KickState::Idle if input.pointer_down => {
                let grabbed = bodies.iter().enumerate().find(|(_, body)| {
                    !body.is_static() && body.location().distance(pointer) < self.radius
                });
                if let Some((index, body)) = grabbed {
                    let handle = BodyHandle::new(index);
                    log::debug!("kick: grabbed {handle}");
                    self.state = KickState::Dragging {
                        body: handle,
                        base: body.location(),
                    };
                }
            }
            KickState::Dragging { base, .. } if input.pointer_down => {
                self.drag = Some(DragVector {
                    base,
                    target: pointer,
                });
            }
            KickState::Dragging { body, .. } if input.pointer_up => {
                if let Some(target) = bodies.get_mut(body.raw()) {
                    let force = pointer - target.location();
                    target.apply_force(force, 0.0);
                    log::debug!("kick: released {body} with force ({:.2}, {:.2})", force.x, force.y);
                }
                self.state = KickState::Idle;
            }
            _ => {}
        }
    }
}
