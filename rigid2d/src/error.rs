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
//! Error types for the API boundary
//!
//! The simulation itself never fails: missing contacts and degenerate
//! geometry are ordinary outcomes. Errors only arise when configuring a world
//! or when a caller names a body that does not exist.

use thiserror::Error;

use crate::handle::BodyHandle;

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A coefficient was negative, NaN or infinite
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidCoefficient {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// A speed limit was not strictly positive and finite
    #[error("{name} must be positive and finite, got {value}")]
    InvalidLimit {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// The gravity vector had a NaN or infinite component
    #[error("gravity must be finite")]
    NonFiniteGravity,
}

/// Errors surfaced by [`World`](crate::World)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A handle did not refer to a body in this world
    #[error("unknown body {0}")]
    UnknownBody(BodyHandle),
}
