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
//! World configuration
//!
//! All tunable constants of the engine in one place. Units are pixels and
//! ticks: velocities are in pixels per tick, the gravity vector is an
//! acceleration per tick, and +y points down the screen.
//!
//! The defaults reproduce the reference tuning. Use [`WorldConfig::builder`]
//! to change individual values; [`WorldConfigBuilder::build`] validates them.

use glam::DVec2;

use crate::error::ConfigError;

/// Default gravity acceleration (pixels per tick², +y down)
pub const DEFAULT_GRAVITY: DVec2 = DVec2::new(0.0, 0.025);

/// Default coefficient of the quadratic linear drag
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.3;

/// Default coefficient of the angular drag
pub const DEFAULT_ANGULAR_DRAG_COEFFICIENT: f64 = 0.001;

/// Default kinetic friction magnitude
pub const DEFAULT_FRICTION_COEFFICIENT: f64 = 0.005;

/// Default factor applied to the friction coefficient for spin
pub const DEFAULT_ANGULAR_FRICTION_FACTOR: f64 = 0.05;

/// Default speed limit (pixels per tick)
pub const DEFAULT_MAX_SPEED: f64 = 10.0;

/// Default angular speed limit (radians per tick)
pub const DEFAULT_MAX_ANGULAR_SPEED: f64 = 0.05;

/// Default linear coefficient of the contact friction heuristic
pub const DEFAULT_CONTACT_FRICTION: f64 = 0.05;

/// Default angular coefficient of the contact friction heuristic
pub const DEFAULT_CONTACT_ANGULAR_FRICTION: f64 = 0.1;

/// Default pick radius of the pointer kick (pixels)
pub const DEFAULT_KICK_RADIUS: f64 = 15.0;

/// Coefficients of the tangential friction term added to every impulse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactFriction {
    /// Scale of the tangential linear contribution
    pub linear: f64,
    /// Scale of the tangential angular contribution
    pub angular: f64,
}

impl ContactFriction {
    /// No tangential friction at contacts
    pub const NONE: ContactFriction = ContactFriction {
        linear: 0.0,
        angular: 0.0,
    };
}

impl Default for ContactFriction {
    fn default() -> Self {
        ContactFriction {
            linear: DEFAULT_CONTACT_FRICTION,
            angular: DEFAULT_CONTACT_ANGULAR_FRICTION,
        }
    }
}

/// Engine-wide tunables
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Constant acceleration applied to every finite-mass body
    pub gravity: DVec2,
    /// Quadratic drag coefficient
    pub drag_coefficient: f64,
    /// Angular drag coefficient (scaled by linear speed squared)
    pub angular_drag_coefficient: f64,
    /// Kinetic friction magnitude
    pub friction_coefficient: f64,
    /// Fraction of `friction_coefficient` applied against spin
    pub angular_friction_factor: f64,
    /// Linear speed limit enforced at integration
    pub max_speed: f64,
    /// Angular speed limit enforced at integration
    pub max_angular_speed: f64,
    /// Contact friction heuristic
    pub contact_friction: ContactFriction,
    /// Pick radius of the pointer kick
    pub kick_radius: f64,
    /// Whether gravity is applied
    pub enable_gravity: bool,
    /// Whether drag is applied
    pub enable_drag: bool,
    /// Whether kinetic friction is applied
    pub enable_friction: bool,
}

impl WorldConfig {
    /// Start a builder from the default configuration
    pub fn builder() -> WorldConfigBuilder {
        WorldConfigBuilder::new()
    }

    /// Check every value for sign and finiteness
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity);
        }

        let scalars = [
            ("drag_coefficient", self.drag_coefficient),
            ("angular_drag_coefficient", self.angular_drag_coefficient),
            ("friction_coefficient", self.friction_coefficient),
            ("angular_friction_factor", self.angular_friction_factor),
            ("contact_friction.linear", self.contact_friction.linear),
            ("contact_friction.angular", self.contact_friction.angular),
            ("kick_radius", self.kick_radius),
        ];
        for (name, value) in scalars {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidCoefficient { name, value });
            }
        }

        let limits = [
            ("max_speed", self.max_speed),
            ("max_angular_speed", self.max_angular_speed),
        ];
        for (name, value) in limits {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidLimit { name, value });
            }
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            gravity: DEFAULT_GRAVITY,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            angular_drag_coefficient: DEFAULT_ANGULAR_DRAG_COEFFICIENT,
            friction_coefficient: DEFAULT_FRICTION_COEFFICIENT,
            angular_friction_factor: DEFAULT_ANGULAR_FRICTION_FACTOR,
            max_speed: DEFAULT_MAX_SPEED,
            max_angular_speed: DEFAULT_MAX_ANGULAR_SPEED,
            contact_friction: ContactFriction::default(),
            kick_radius: DEFAULT_KICK_RADIUS,
            enable_gravity: true,
            enable_drag: true,
            enable_friction: true,
        }
    }
}

/// Builder for [`WorldConfig`]
///
/// # Example
///
/// ```
/// use rigid2d::WorldConfig;
/// use glam::DVec2;
///
/// let config = WorldConfig::builder()
///     .gravity(DVec2::new(0.0, 0.05))
///     .drag(false)
///     .build()
///     .unwrap();
/// assert!(!config.enable_drag);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorldConfigBuilder {
    config: WorldConfig,
}

impl WorldConfigBuilder {
    /// Get a builder holding the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Gravity acceleration vector
    pub fn gravity(mut self, gravity: DVec2) -> Self {
        self.config.gravity = gravity;
        self
    }

    /// Linear and angular drag coefficients
    pub fn drag_coefficients(mut self, linear: f64, angular: f64) -> Self {
        self.config.drag_coefficient = linear;
        self.config.angular_drag_coefficient = angular;
        self
    }

    /// Kinetic friction magnitude and the fraction of it applied to spin
    pub fn friction_coefficients(mut self, linear: f64, angular_factor: f64) -> Self {
        self.config.friction_coefficient = linear;
        self.config.angular_friction_factor = angular_factor;
        self
    }

    /// Linear and angular speed limits
    pub fn speed_limits(mut self, max_speed: f64, max_angular_speed: f64) -> Self {
        self.config.max_speed = max_speed;
        self.config.max_angular_speed = max_angular_speed;
        self
    }

    /// Contact friction heuristic coefficients
    pub fn contact_friction(mut self, contact_friction: ContactFriction) -> Self {
        self.config.contact_friction = contact_friction;
        self
    }

    /// Pick radius of the pointer kick
    pub fn kick_radius(mut self, radius: f64) -> Self {
        self.config.kick_radius = radius;
        self
    }

    /// Enable or disable gravity
    pub fn gravity_enabled(mut self, enabled: bool) -> Self {
        self.config.enable_gravity = enabled;
        self
    }

    /// Enable or disable drag
    pub fn drag(mut self, enabled: bool) -> Self {
        self.config.enable_drag = enabled;
        self
    }

    /// Enable or disable kinetic friction
    pub fn friction(mut self, enabled: bool) -> Self {
        self.config.enable_friction = enabled;
        self
    }

    /// Disable every global force
    pub fn no_global_forces(self) -> Self {
        self.gravity_enabled(false).drag(false).friction(false)
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<WorldConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
