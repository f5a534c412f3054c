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
//! # rigid2d
//!
//! A small, deterministic 2D rigid-body engine for balls, boxes and walls,
//! stepped once per animation frame.
//!
//! ## Features
//!
//! - **Shapes**: balls, movable boxes and immovable walls in one arena
//! - **Collisions**: shadow (AABB) prefilter, exact ball/box tests with
//!   immediate position correction, elastic impulse response with a contact
//!   friction heuristic
//! - **Global forces**: gravity, quadratic drag and kinetic friction behind a
//!   [`GlobalForce`](forces::GlobalForce) trait, open to custom providers
//! - **Springs**: damped Hooke springs between any two bodies
//! - **Pointer kick**: grab a body, drag, release to fling it
//!
//! Units are pixels and ticks with +y pointing down the screen. The engine
//! is single-threaded and has no timestep: one call to [`World::step`] is
//! one tick.
//!
//! ## Example
//!
//! ```rust
//! use rigid2d::{World, WorldConfig};
//!
//! let config = WorldConfig::builder().drag(false).build().unwrap();
//! let mut world = World::with_config(config).unwrap();
//!
//! let a = world.create_ball(50.0, 50.0, 3.0);
//! let b = world.create_ball(150.0, 50.0, 3.0);
//! world.create_spring(0.1, 0.5, a, b).unwrap();
//! world.create_wall(5.0, 470.0, 780.0, 30.0);
//!
//! for _ in 0..60 {
//!     world.step();
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Contacts and tick summaries are logged at `trace`, creation and kick
//! transitions at `debug`, skipped non-finite forces at `warn`.

#![warn(missing_docs)]

/// 2D vector helpers
pub mod math;

/// Arena handles
pub mod handle;

/// Rigid body model
pub mod body;

/// World configuration
pub mod config;

/// Error types
pub mod error;

/// Shadow (AABB) prefilter
pub mod broad_phase;

/// Exact collision tests with position correction
pub mod narrow_phase;

/// Impulse-based collision response
pub mod resolution;

/// Global force providers
pub mod forces;

/// Damped springs
pub mod spring;

/// Pointer kick controller
pub mod kick;

/// Per-tick integration
pub mod integration;

/// Drawing interface
pub mod render;

/// World and tick pipeline
pub mod world;

pub use body::{BodyKind, RigidBody, Shape};
pub use broad_phase::Shadow;
pub use config::{ContactFriction, WorldConfig, WorldConfigBuilder};
pub use error::{ConfigError, PhysicsError};
pub use handle::{BodyHandle, SpringHandle};
pub use kick::{DragVector, KickState, PointerSnapshot};
pub use narrow_phase::Contact;
pub use render::{BodyView, Outline, SceneRenderer};
pub use spring::Spring;
pub use world::{StepStats, World};

pub use glam::DVec2;
