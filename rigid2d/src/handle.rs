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
//! Arena handles
//!
//! Bodies and springs live in flat arenas owned by the [`World`](crate::World)
//! and are never removed during a session, so a plain index is a stable
//! reference. Handles are passed by value into detectors and resolvers
//! instead of sharing references to bodies.

use std::fmt;

/// Stable index of a body in the world's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Create a handle from a raw arena index
    pub fn new(index: usize) -> Self {
        BodyHandle(index)
    }

    /// Get the raw arena index
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Stable index of a spring in the world's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpringHandle(usize);

impl SpringHandle {
    /// Create a handle from a raw arena index
    pub fn new(index: usize) -> Self {
        SpringHandle(index)
    }

    /// Get the raw arena index
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SpringHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spring({})", self.0)
    }
}
