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
//! Global force providers
//!
//! Forces that act on every body each tick, independent of contacts. Each
//! provider implements [`GlobalForce`] and is registered in a
//! [`ForceRegistry`]; the registry walks all bodies once per tick and
//! deposits every provider's contribution through
//! [`RigidBody::apply_force`].
//!
//! Built-in providers, with `v` the velocity and `ω` the angular velocity:
//!
//! | Provider            | Force                              | Torque                              |
//! |---------------------|------------------------------------|-------------------------------------|
//! | [`Gravity`]         | `g · mass` (finite mass only)      | none                                |
//! | [`Drag`]            | `−v̂ · c · |v|²`                    | `±c_ω · |v|²`, at most `|ω|`        |
//! | [`KineticFriction`] | `−v̂ · μ`, at most `|v|`            | `±μ · f_ω`, at most `|ω|`           |
//!
//! Torques always oppose the current spin. The magnitude clamps keep the
//! damping forces from reversing a body's motion within a tick.
//!
//! # Custom providers
//!
//! ```
//! use rigid2d::forces::{AppliedForce, GlobalForce};
//! use rigid2d::RigidBody;
//! use glam::DVec2;
//!
//! struct Wind(DVec2);
//!
//! impl GlobalForce for Wind {
//!     fn name(&self) -> &str {
//!         "wind"
//!     }
//!
//!     fn force_on(&self, _body: &RigidBody) -> Option<AppliedForce> {
//!         Some(AppliedForce::linear(self.0))
//!     }
//! }
//! ```

use glam::DVec2;

use crate::body::RigidBody;
use crate::config::WorldConfig;
use crate::math::{clamp_magnitude, limit_scalar, normalize};

/// Force and torque produced by a provider for one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedForce {
    /// Linear force
    pub force: DVec2,
    /// Torque (divided by mass when applied)
    pub torque: f64,
}

impl AppliedForce {
    /// Force without torque
    pub fn linear(force: DVec2) -> Self {
        AppliedForce { force, torque: 0.0 }
    }

    /// Check that both components are finite
    pub fn is_valid(&self) -> bool {
        self.force.is_finite() && self.torque.is_finite()
    }
}

/// A force field acting on every body
pub trait GlobalForce: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Compute the contribution for `body`
    ///
    /// `None` means the provider does not act on this body.
    fn force_on(&self, body: &RigidBody) -> Option<AppliedForce>;
}

/// Sign that opposes the current spin; a body at rest counts as positive
#[inline]
fn against_spin(angular_velocity: f64) -> f64 {
    if angular_velocity < 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Constant acceleration scaled by mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Acceleration vector
    pub acceleration: DVec2,
}

impl GlobalForce for Gravity {
    fn name(&self) -> &str {
        "gravity"
    }

    fn force_on(&self, body: &RigidBody) -> Option<AppliedForce> {
        if body.is_immovable() {
            return None;
        }
        Some(AppliedForce::linear(self.acceleration * body.mass()))
    }
}

/// Quadratic air drag with a matching angular term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Linear coefficient
    pub coefficient: f64,
    /// Angular coefficient
    pub angular_coefficient: f64,
}

impl GlobalForce for Drag {
    fn name(&self) -> &str {
        "drag"
    }

    fn force_on(&self, body: &RigidBody) -> Option<AppliedForce> {
        let velocity = body.velocity();
        let speed_sq = velocity.length_squared();
        let spin = body.angular_velocity();

        let force = normalize(-velocity) * (self.coefficient * speed_sq);
        let torque = limit_scalar(
            self.angular_coefficient * speed_sq * against_spin(spin),
            spin.abs(),
        );
        Some(AppliedForce { force, torque })
    }
}

/// Constant-magnitude sliding friction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticFriction {
    /// Magnitude of the linear friction force
    pub coefficient: f64,
    /// Fraction of `coefficient` applied against spin
    pub angular_factor: f64,
}

impl GlobalForce for KineticFriction {
    fn name(&self) -> &str {
        "kinetic friction"
    }

    fn force_on(&self, body: &RigidBody) -> Option<AppliedForce> {
        let velocity = body.velocity();
        let spin = body.angular_velocity();

        let force = clamp_magnitude(normalize(velocity) * -self.coefficient, velocity.length());
        let torque = limit_scalar(
            self.coefficient * self.angular_factor * against_spin(spin),
            spin.abs(),
        );
        Some(AppliedForce { force, torque })
    }
}

/// Ordered set of global force providers
///
/// Providers run in registration order. A provider that yields a NaN or
/// infinite force is skipped for that body and a warning is logged.
#[derive(Default)]
pub struct ForceRegistry {
    providers: Vec<Box<dyn GlobalForce>>,
}

impl ForceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry the world uses: gravity, drag, then friction,
    /// each only when enabled in `config`
    pub fn from_config(config: &WorldConfig) -> Self {
        let mut registry = Self::new();
        if config.enable_gravity {
            registry.register(Box::new(Gravity {
                acceleration: config.gravity,
            }));
        }
        if config.enable_drag {
            registry.register(Box::new(Drag {
                coefficient: config.drag_coefficient,
                angular_coefficient: config.angular_drag_coefficient,
            }));
        }
        if config.enable_friction {
            registry.register(Box::new(KineticFriction {
                coefficient: config.friction_coefficient,
                angular_factor: config.angular_friction_factor,
            }));
        }
        registry
    }

    /// Append a provider
    pub fn register(&mut self, provider: Box<dyn GlobalForce>) {
        log::debug!("registered global force '{}'", provider.name());
        self.providers.push(provider);
    }

    /// Number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Names of the registered providers in application order
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// Deposit every provider's force into every body
    ///
    /// Returns the number of forces applied.
    pub fn apply(&self, bodies: &mut [RigidBody]) -> usize {
        let mut applied = 0;
        for (index, body) in bodies.iter_mut().enumerate() {
            for provider in &self.providers {
                let Some(contribution) = provider.force_on(body) else {
                    continue;
                };
                if !contribution.is_valid() {
                    log::warn!(
                        "global force '{}' produced a non-finite value for body {}, skipping",
                        provider.name(),
                        index
                    );
                    continue;
                }
                body.apply_force(contribution.force, contribution.torque);
                applied += 1;
            }
        }
        applied
    }
}

impl std::fmt::Debug for ForceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceRegistry")
            .field("providers", &self.provider_names().collect::<Vec<_>>())
            .finish()
    }
}
