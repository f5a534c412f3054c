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
//! The simulation world and its tick pipeline
//!
//! A [`World`] owns every body and spring in flat arenas and advances them
//! one tick at a time. Each tick runs these phases in order, each to
//! completion before the next starts:
//!
//! 1. pointer kick (only in [`World::step_with_input`])
//! 2. every dynamic pair: shadow test, then detect, correct and resolve
//! 3. every dynamic body against every wall, the same way
//! 4. global forces
//! 5. springs
//! 6. integration of every non-wall body
//!
//! Phases 1 to 5 only deposit into the force accumulators (plus the
//! position corrections of the detectors); velocities change in phase 6.
//!
//! Shadows are computed per pair from the current state, so a correction
//! made for an earlier pair is visible to every later pair in the same tick.

use glam::DVec2;

use crate::body::{BodyKind, RigidBody};
use crate::broad_phase::shadows_overlap;
use crate::config::{ContactFriction, WorldConfig};
use crate::error::PhysicsError;
use crate::forces::ForceRegistry;
use crate::handle::{BodyHandle, SpringHandle};
use crate::integration::integrate_body;
use crate::kick::{DragVector, KickController, KickState, PointerSnapshot};
use crate::narrow_phase::{detect_ball_ball, detect_ball_box, detect_box_box};
use crate::render::{BodyView, SceneRenderer};
use crate::resolution::{resolve_ball_ball, resolve_ball_box, resolve_box_box};
use crate::spring::Spring;

/// Counters for the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Pairs whose shadows were compared
    pub shadow_tests: usize,
    /// Pairs handed to a narrow-phase detector
    pub narrow_phase_calls: usize,
    /// Detected contacts
    pub contacts: usize,
    /// Contacts that produced an impulse
    pub impulses: usize,
}

/// Borrow two distinct bodies mutably
fn pair_mut(
    bodies: &mut [RigidBody],
    i: usize,
    j: usize,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if i == j || i.max(j) >= bodies.len() {
        return None;
    }
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        Some((&mut hi[0], &mut lo[j]))
    }
}

/// Shadow test, detection and resolution for one ordered pair
///
/// Balls always go first into the ball-box routines. Two boxes are tried
/// as `(first, second)` and, only on a miss, as `(second, first)`; the
/// resolver always sees the ordering whose detection hit.
fn collide_pair(
    bodies: &mut [RigidBody],
    first: usize,
    second: usize,
    friction: ContactFriction,
    stats: &mut StepStats,
) {
    let Some((a, b)) = pair_mut(bodies, first, second) else {
        return;
    };

    stats.shadow_tests += 1;
    if !shadows_overlap(a, b) {
        return;
    }
    stats.narrow_phase_calls += 1;

    let outcome = match (a.kind(), b.kind()) {
        (BodyKind::Ball, BodyKind::Ball) => {
            detect_ball_ball(a, b).map(|contact| resolve_ball_ball(a, b, &contact, friction))
        }
        (BodyKind::Ball, _) => {
            detect_ball_box(a, b).map(|contact| resolve_ball_box(a, b, &contact, friction))
        }
        (_, BodyKind::Ball) => {
            detect_ball_box(b, a).map(|contact| resolve_ball_box(b, a, &contact, friction))
        }
        _ => match detect_box_box(a, b) {
            Some(contact) => Some(resolve_box_box(a, b, &contact, friction)),
            None => detect_box_box(b, a).map(|contact| resolve_box_box(b, a, &contact, friction)),
        },
    };

    if let Some(impulse) = outcome {
        stats.contacts += 1;
        if impulse {
            stats.impulses += 1;
        }
        log::trace!("contact Body({first}) / Body({second}), impulse: {impulse}");
    }
}

/// Simulation world
///
/// # Example
///
/// ```
/// use rigid2d::World;
///
/// let mut world = World::new();
/// let ball = world.create_ball(100.0, 50.0, 5.0);
/// world.create_wall(0.0, 200.0, 400.0, 20.0);
///
/// for _ in 0..10 {
///     world.step();
/// }
/// assert!(world.body(ball).unwrap().location().y > 50.0);
/// ```
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    bodies: Vec<RigidBody>,
    springs: Vec<Spring>,
    forces: ForceRegistry,
    kick: KickController,
    stats: StepStats,
    ticks: u64,
}

impl World {
    /// Create an empty world with the default configuration
    pub fn new() -> Self {
        Self::build(WorldConfig::default())
    }

    /// Create an empty world after validating `config`
    pub fn with_config(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        World {
            forces: ForceRegistry::from_config(&config),
            kick: KickController::new(config.kick_radius),
            config,
            bodies: Vec::new(),
            springs: Vec::new(),
            stats: StepStats::default(),
            ticks: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Global force providers, e.g. to register a custom one
    pub fn forces_mut(&mut self) -> &mut ForceRegistry {
        &mut self.forces
    }

    /// Add a ball centered at `(x, y)`
    pub fn create_ball(&mut self, x: f64, y: f64, radius: f64) -> BodyHandle {
        self.create_body(RigidBody::ball(x, y, radius))
    }

    /// Add a movable box from its top-left corner and size
    pub fn create_box(&mut self, x: f64, y: f64, w: f64, h: f64) -> BodyHandle {
        self.create_body(RigidBody::new_box(x, y, w, h))
    }

    /// Add a wall from its top-left corner and size
    pub fn create_wall(&mut self, x: f64, y: f64, w: f64, h: f64) -> BodyHandle {
        self.create_body(RigidBody::wall(x, y, w, h))
    }

    /// Add a prepared body
    ///
    /// The body joins the static set when it is an infinite-mass box and the
    /// dynamic set otherwise.
    pub fn create_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle::new(self.bodies.len());
        log::debug!(
            "created {handle} as {:?} at ({:.1}, {:.1})",
            body.kind(),
            body.location().x,
            body.location().y
        );
        self.bodies.push(body);
        handle
    }

    /// Connect two bodies with a damped spring
    ///
    /// The rest length is the distance between the bodies right now.
    pub fn create_spring(
        &mut self,
        stiffness: f64,
        damping: f64,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<SpringHandle, PhysicsError> {
        let rest_length = self
            .body(a)
            .ok_or(PhysicsError::UnknownBody(a))?
            .location()
            .distance(self.body(b).ok_or(PhysicsError::UnknownBody(b))?.location());

        let handle = SpringHandle::new(self.springs.len());
        log::debug!("created {handle} between {a} and {b}, rest length {rest_length:.2}");
        self.springs
            .push(Spring::new(a, b, stiffness, damping, rest_length));
        Ok(handle)
    }

    /// Deposit a force and torque into one body's accumulators
    pub fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: DVec2,
        torque: f64,
    ) -> Result<(), PhysicsError> {
        let body = self
            .body_mut(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        body.apply_force(force, torque);
        Ok(())
    }

    /// Look up a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.raw())
    }

    /// Look up a body for modification
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.raw())
    }

    /// All bodies in creation order
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Look up a spring
    pub fn spring(&self, handle: SpringHandle) -> Option<&Spring> {
        self.springs.get(handle.raw())
    }

    /// All springs in creation order
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Handles of the bodies that move: balls and finite-mass boxes
    pub fn dynamic_bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| !body.is_static())
            .map(|(i, _)| BodyHandle::new(i))
    }

    /// Handles of the walls
    pub fn static_bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_static())
            .map(|(i, _)| BodyHandle::new(i))
    }

    /// Run one tick without pointer input
    pub fn step(&mut self) {
        self.tick(None);
    }

    /// Run one tick, feeding `input` to the kick controller first
    pub fn step_with_input(&mut self, input: &PointerSnapshot) {
        self.tick(Some(input));
    }

    fn tick(&mut self, input: Option<&PointerSnapshot>) {
        let mut stats = StepStats::default();

        if let Some(input) = input {
            self.kick.update(input, &mut self.bodies);
        }

        let (walls, dynamic): (Vec<usize>, Vec<usize>) =
            (0..self.bodies.len()).partition(|&i| self.bodies[i].is_static());
        let friction = self.config.contact_friction;

        for (n, &i) in dynamic.iter().enumerate() {
            for &j in &dynamic[n + 1..] {
                collide_pair(&mut self.bodies, i, j, friction, &mut stats);
            }
        }
        for &i in &dynamic {
            for &w in &walls {
                collide_pair(&mut self.bodies, i, w, friction, &mut stats);
            }
        }

        self.forces.apply(&mut self.bodies);

        for spring in &self.springs {
            spring.apply(&mut self.bodies);
        }

        let (max_speed, max_angular_speed) = (self.config.max_speed, self.config.max_angular_speed);
        for body in &mut self.bodies {
            integrate_body(body, max_speed, max_angular_speed);
        }

        self.ticks += 1;
        self.stats = stats;
        log::trace!(
            "tick {}: {} shadow tests, {} narrow-phase calls, {} contacts",
            self.ticks,
            stats.shadow_tests,
            stats.narrow_phase_calls,
            stats.contacts
        );
    }

    /// Counters of the most recent tick
    pub fn last_step_stats(&self) -> StepStats {
        self.stats
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Latch state of the kick controller
    pub fn kick_state(&self) -> KickState {
        self.kick.state()
    }

    /// Kick arrow of the last tick, while a body is being dragged
    pub fn drag_vector(&self) -> Option<DragVector> {
        self.kick.drag_vector()
    }

    /// Hand every body, spring and the kick arrow to `renderer`
    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        for (i, body) in self.bodies.iter().enumerate() {
            renderer.draw_body(&BodyView::new(BodyHandle::new(i), body));
        }
        for spring in &self.springs {
            if let (Some(a), Some(b)) = (self.body(spring.a()), self.body(spring.b())) {
                renderer.draw_spring(a.location(), b.location());
            }
        }
        if let Some(drag) = self.kick.drag_vector() {
            renderer.draw_drag(&drag);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn still_world() -> World {
        let config = WorldConfig::builder().no_global_forces().build().unwrap();
        World::with_config(config).unwrap()
    }

    #[test]
    fn test_pair_mut_orders() {
        let mut bodies = vec![
            RigidBody::ball(0.0, 0.0, 1.0),
            RigidBody::ball(1.0, 0.0, 1.0),
        ];
        let (a, b) = pair_mut(&mut bodies, 1, 0).unwrap();
        assert_eq!(a.location().x, 1.0);
        assert_eq!(b.location().x, 0.0);
        assert!(pair_mut(&mut bodies, 1, 1).is_none());
        assert!(pair_mut(&mut bodies, 0, 2).is_none());
    }

    #[test]
    fn test_unknown_handles_rejected() {
        let mut world = World::new();
        let a = world.create_ball(0.0, 0.0, 1.0);
        let ghost = BodyHandle::new(9);

        assert_eq!(
            world.create_spring(1.0, 0.0, a, ghost),
            Err(PhysicsError::UnknownBody(ghost))
        );
        assert_eq!(
            world.apply_force(ghost, DVec2::X, 0.0),
            Err(PhysicsError::UnknownBody(ghost))
        );
        assert!(world.springs().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            max_speed: -1.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::with_config(config),
            Err(PhysicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_static_and_dynamic_sets() {
        let mut world = World::new();
        let ball = world.create_ball(0.0, 0.0, 1.0);
        let bx = world.create_box(10.0, 10.0, 5.0, 5.0);
        let wall = world.create_wall(0.0, 100.0, 50.0, 5.0);

        assert_eq!(world.dynamic_bodies().collect::<Vec<_>>(), [ball, bx]);
        assert_eq!(world.static_bodies().collect::<Vec<_>>(), [wall]);
        assert_eq!(world.body_count(), 3);
    }

    #[test]
    fn test_spring_rest_length_from_creation() {
        let mut world = World::new();
        let a = world.create_ball(0.0, 0.0, 1.0);
        let b = world.create_ball(30.0, 40.0, 1.0);
        let s = world.create_spring(0.1, 0.5, a, b).unwrap();
        assert_eq!(world.spring(s).unwrap().rest_length(), 50.0);
    }

    #[test]
    fn test_apply_force_flushed_on_step() {
        let mut world = still_world();
        let ball = world.create_ball(0.0, 0.0, 2.0);
        world.apply_force(ball, DVec2::new(4.0, 0.0), 0.0).unwrap();
        world.step();

        let body = world.body(ball).unwrap();
        assert_eq!(body.velocity(), DVec2::new(1.0, 0.0));
        assert_eq!(body.location(), DVec2::new(1.0, 0.0));
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn test_ball_bounces_off_wall() {
        let mut world = still_world();
        let ball = world.create_ball(50.0, 47.0, 5.0);
        world.create_wall(0.0, 50.0, 100.0, 10.0);
        world.body_mut(ball).unwrap().set_velocity(DVec2::new(0.0, 2.0));

        world.step();
        let stats = world.last_step_stats();
        assert_eq!(stats.shadow_tests, 1);
        assert_eq!(stats.narrow_phase_calls, 1);
        assert_eq!(stats.contacts, 1);
        assert_eq!(stats.impulses, 1);

        // Pushed out to rest on the top edge, then the velocity reverses
        let body = world.body(ball).unwrap();
        assert_abs_diff_eq!(body.velocity().y, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.location().y, 43.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_pair_uses_reverse_ordering_on_miss() {
        let mut world = still_world();
        // b's corner pokes into a, a's corners stay outside b
        let a = world.create_box(0.0, 0.0, 40.0, 10.0);
        let b = world.create_box(15.0, 8.0, 10.0, 10.0);
        world.body_mut(b).unwrap().set_velocity(DVec2::new(0.0, -1.0));

        world.step();
        assert_eq!(world.last_step_stats().contacts, 1);
        assert!(world.body(a).unwrap().velocity().y < 0.0);
    }

    #[derive(Default)]
    struct Recorder {
        bodies: Vec<BodyKind>,
        springs: usize,
        drags: usize,
    }

    impl SceneRenderer for Recorder {
        fn draw_body(&mut self, body: &BodyView<'_>) {
            self.bodies.push(body.kind);
        }

        fn draw_spring(&mut self, _from: DVec2, _to: DVec2) {
            self.springs += 1;
        }

        fn draw_drag(&mut self, _drag: &DragVector) {
            self.drags += 1;
        }
    }

    #[test]
    fn test_render_visits_everything() {
        let mut world = still_world();
        let a = world.create_ball(10.0, 10.0, 3.0);
        let b = world.create_ball(40.0, 10.0, 3.0);
        world.create_wall(0.0, 100.0, 100.0, 10.0);
        world.create_spring(0.1, 0.5, a, b).unwrap();

        world.step_with_input(&PointerSnapshot::down(10.0, 10.0));
        world.step_with_input(&PointerSnapshot::down(30.0, 30.0));

        let mut recorder = Recorder::default();
        world.render(&mut recorder);
        assert_eq!(
            recorder.bodies,
            [BodyKind::Ball, BodyKind::Ball, BodyKind::Wall]
        );
        assert_eq!(recorder.springs, 1);
        assert_eq!(recorder.drags, 1);
    }
}
