//! Dynamic bodies: kinematic state and per-step integration.

use crate::config::{validate_size, BodyConfig};
use crate::error::ConfigurationError;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::{Axis, Vec2};

/// Opaque key of the game object that owns a body.
///
/// The world never dereferences it; it only hands it back so the caller can
/// route corrected positions and events to the right object.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

/// Whether a body is integrated or fixed geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BodyType {
    Dynamic,
    Static,
}

/// Per-face flags. `none` is true when no face is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sides {
    pub none: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Sides {
    /// No face set.
    pub const fn empty() -> Self {
        Sides { none: true, up: false, down: false, left: false, right: false }
    }

    /// Every face set.
    pub const fn all() -> Self {
        Sides { none: false, up: true, down: true, left: true, right: true }
    }

    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Sides { none: !(up || down || left || right), up, down, left, right }
    }

    pub fn clear(&mut self) {
        *self = Sides::empty();
    }

    /// The face on the low (`max == false`) or high side of `axis`.
    pub fn get(&self, axis: Axis, max: bool) -> bool {
        match (axis, max) {
            (Axis::X, false) => self.left,
            (Axis::X, true) => self.right,
            (Axis::Y, false) => self.up,
            (Axis::Y, true) => self.down,
        }
    }

    pub fn set(&mut self, axis: Axis, max: bool) {
        match (axis, max) {
            (Axis::X, false) => self.left = true,
            (Axis::X, true) => self.right = true,
            (Axis::Y, false) => self.up = true,
            (Axis::Y, true) => self.down = true,
        }
        self.none = false;
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Set every face that is set in `other`.
    pub fn merge(&mut self, other: Sides) {
        self.up |= other.up;
        self.down |= other.down;
        self.left |= other.left;
        self.right |= other.right;
        self.none = !self.any();
    }
}

impl Default for Sides {
    fn default() -> Self {
        Sides::empty()
    }
}

/// A dynamic body: integrated every step and corrected by separation.
///
/// `position` is the top-left corner of the bounds. Coordinates are screen
/// space, so `+y` points down and "up" is the face with the smaller `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Body<F: Float> {
    position: Vec2<F>,
    prev: Vec2<F>,
    offset: Vec2<F>,
    width: F,
    height: F,
    mass: F,
    owner: OwnerId,

    pub velocity: Vec2<F>,
    pub acceleration: Vec2<F>,
    pub gravity: Vec2<F>,
    pub allow_gravity: bool,
    pub drag: Vec2<F>,
    pub bounce: Vec2<F>,
    pub friction: Vec2<F>,
    pub max_velocity: Option<Vec2<F>>,
    pub max_speed: Option<F>,
    pub immovable: bool,
    pub enabled: bool,
    pub collide_world_bounds: bool,
    pub on_world_bounds: bool,
    pub check_collision: Sides,

    pub touching: Sides,
    pub was_touching: Sides,
    pub blocked: Sides,
}

impl<F: Float> Body<F> {
    /// Build a body from a config, rejecting invalid values.
    ///
    /// `config.position` is the owner's origin; the bounds start at that
    /// origin plus `config.offset`.
    pub fn new(owner: OwnerId, config: &BodyConfig<F>) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let position = config.position + config.offset;
        if !position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        Ok(Body {
            position,
            prev: position,
            offset: config.offset,
            width: config.width,
            height: config.height,
            mass: config.mass,
            owner,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            gravity: config.gravity,
            allow_gravity: config.allow_gravity,
            drag: config.drag,
            bounce: config.bounce,
            friction: config.friction,
            max_velocity: config.max_velocity,
            max_speed: config.max_speed,
            immovable: config.immovable,
            enabled: config.enabled,
            collide_world_bounds: config.collide_world_bounds,
            on_world_bounds: config.on_world_bounds,
            check_collision: config.check_collision,
            touching: Sides::empty(),
            was_touching: Sides::empty(),
            blocked: Sides::empty(),
        })
    }

    pub fn owner(&self) -> OwnerId { self.owner }
    pub fn position(&self) -> Vec2<F> { self.position }
    /// Position at the start of the current step.
    pub fn prev(&self) -> Vec2<F> { self.prev }
    pub fn offset(&self) -> Vec2<F> { self.offset }
    pub fn width(&self) -> F { self.width }
    pub fn height(&self) -> F { self.height }
    pub fn mass(&self) -> F { self.mass }

    pub fn bounds(&self) -> Rect<F> {
        Rect::from_position(self.position, self.width, self.height)
    }

    pub fn center(&self) -> Vec2<F> {
        self.bounds().center()
    }

    /// Movement over the current step.
    pub fn delta(&self) -> Vec2<F> {
        self.position - self.prev
    }

    /// Inverse mass used to split corrections; zero when immovable.
    pub fn inv_mass(&self) -> F {
        if self.immovable { F::zero() } else { F::one() / self.mass }
    }

    pub fn set_mass(&mut self, mass: F) -> Result<(), ConfigurationError> {
        if !(mass.is_finite() && mass > F::zero()) {
            return Err(ConfigurationError::InvalidMass);
        }
        self.mass = mass;
        Ok(())
    }

    pub fn set_size(&mut self, width: F, height: F) -> Result<(), ConfigurationError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_offset(&mut self, offset: Vec2<F>) -> Result<(), ConfigurationError> {
        if !offset.is_finite() {
            return Err(ConfigurationError::NonFiniteOffset);
        }
        self.offset = offset;
        Ok(())
    }

    /// Move the bounds without treating it as motion (`delta` becomes zero).
    pub fn set_position(&mut self, position: Vec2<F>) -> Result<(), ConfigurationError> {
        if !position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        self.position = position;
        self.prev = position;
        Ok(())
    }

    /// Place the bounds relative to the owner's origin.
    pub fn set_owner_position(&mut self, origin: Vec2<F>) -> Result<(), ConfigurationError> {
        self.set_position(origin + self.offset)
    }

    /// Owner origin implied by the current (corrected) bounds.
    pub fn owner_position(&self) -> Vec2<F> {
        self.position - self.offset
    }

    /// Teleport to `position` and stop all motion.
    pub fn reset(&mut self, position: Vec2<F>) -> Result<(), ConfigurationError> {
        self.set_position(position)?;
        self.velocity = Vec2::zero();
        self.acceleration = Vec2::zero();
        self.touching.clear();
        self.was_touching.clear();
        self.blocked.clear();
        Ok(())
    }

    /// Shift along one axis. Separation is the only caller.
    pub(crate) fn translate(&mut self, axis: Axis, amount: F) {
        let current = self.position.get(axis);
        self.position.set(axis, current + amount);
    }

    pub(crate) fn begin_step(&mut self) {
        self.was_touching = self.touching;
        self.touching.clear();
        self.blocked.clear();
    }

    /// Push the body back inside `world` on every edge enabled in `edges`.
    ///
    /// Velocity heading out through a clamped edge is reflected and scaled by
    /// `bounce` (zeroed with no bounce). Returns the edges that were hit; they
    /// are also recorded in `blocked`.
    pub(crate) fn clamp_to_bounds(&mut self, world: &Rect<F>, edges: Sides) -> Sides {
        let mut hit = Sides::empty();
        if !self.enabled || !self.collide_world_bounds {
            return hit;
        }
        for axis in [Axis::X, Axis::Y] {
            let low = self.position.get(axis);
            let extent = self.bounds().extent(axis);
            let velocity = self.velocity.get(axis);
            let bounce = self.bounce.get(axis);
            if low < world.min(axis) && edges.get(axis, false) {
                self.position.set(axis, world.min(axis));
                if velocity < F::zero() {
                    self.velocity.set(axis, -velocity * bounce);
                }
                hit.set(axis, false);
            } else if low + extent > world.max(axis) && edges.get(axis, true) {
                self.position.set(axis, world.max(axis) - extent);
                if velocity > F::zero() {
                    self.velocity.set(axis, -velocity * bounce);
                }
                hit.set(axis, true);
            }
        }
        self.blocked.merge(hit);
        hit
    }

    /// Advance velocity and position by `dt` (semi-implicit Euler).
    ///
    /// `world_gravity` is added to the body's own gravity unless gravity is
    /// disabled for this body. Returns true when a non-finite velocity had to
    /// be clamped.
    pub fn integrate(&mut self, dt: F, world_gravity: Vec2<F>) -> bool {
        self.prev = self.position;
        if !self.enabled {
            return false;
        }

        let mut accel = self.acceleration;
        if self.allow_gravity {
            accel = accel + self.gravity + world_gravity;
        }
        self.velocity = self.velocity + accel.scale(dt);

        let damp = |drag: F| (F::one() - drag * dt).max(F::zero());
        self.velocity = self.velocity.component_mul(Vec2::new(damp(self.drag.x), damp(self.drag.y)));

        let clamped = self.sanitize_velocity();
        self.apply_velocity_limits();

        self.position = self.position + self.velocity.scale(dt);
        clamped
    }

    /// Replace NaN with zero and infinities with the axis limit (or zero).
    fn sanitize_velocity(&mut self) -> bool {
        if self.velocity.is_finite() {
            return false;
        }
        let limit = self.max_velocity;
        let fix = |v: F, max: Option<F>| {
            if v.is_nan() {
                F::zero()
            } else if !v.is_finite() {
                max.map_or(F::zero(), |m| m * v.signum())
            } else {
                v
            }
        };
        log::warn!(
            "non-finite velocity ({}, {}) on body owned by {:?}; clamping",
            self.velocity.x,
            self.velocity.y,
            self.owner
        );
        self.velocity = Vec2::new(
            fix(self.velocity.x, limit.map(|m| m.x)),
            fix(self.velocity.y, limit.map(|m| m.y)),
        );
        true
    }

    fn apply_velocity_limits(&mut self) {
        if let Some(max) = self.max_velocity {
            self.velocity.x = self.velocity.x.clamp(-max.x, max.x);
            self.velocity.y = self.velocity.y.clamp(-max.y, max.y);
        }
        if let Some(speed) = self.max_speed {
            self.velocity = self.velocity.clamp_length(speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(config: BodyConfig<f64>) -> Body<f64> {
        Body::new(OwnerId(1), &config).unwrap()
    }

    #[test]
    fn integrates_velocity_then_position() {
        let mut b = body(BodyConfig::new().with_size(10.0, 10.0));
        b.velocity = Vec2::new(100.0, 0.0);
        b.integrate(0.1, Vec2::zero());
        assert_eq!(b.position(), Vec2::new(10.0, 0.0));
        assert_eq!(b.delta(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn gravity_is_combined_with_world_gravity() {
        let mut b = body(BodyConfig::new().with_gravity(0.0, 10.0));
        b.integrate(1.0, Vec2::new(0.0, 5.0));
        assert_eq!(b.velocity, Vec2::new(0.0, 15.0));
        assert_eq!(b.position().y, 15.0);
    }

    #[test]
    fn gravity_can_be_disabled() {
        let mut b = body(BodyConfig::new().with_allow_gravity(false));
        b.integrate(1.0, Vec2::new(0.0, 5.0));
        assert_eq!(b.velocity, Vec2::zero());
    }

    #[test]
    fn drag_never_flips_sign() {
        let mut b = body(BodyConfig::new().with_drag(50.0, 0.5));
        b.velocity = Vec2::new(10.0, 10.0);
        b.integrate(0.1, Vec2::zero());
        assert_eq!(b.velocity.x, 0.0);
        assert!((b.velocity.y - 9.5).abs() < 1e-12);
    }

    #[test]
    fn max_velocity_clamps_each_axis() {
        let mut b = body(BodyConfig::new().with_max_velocity(5.0, 50.0));
        b.velocity = Vec2::new(-20.0, 20.0);
        b.integrate(0.0, Vec2::zero());
        assert_eq!(b.velocity, Vec2::new(-5.0, 20.0));
    }

    #[test]
    fn nan_velocity_is_clamped_not_propagated() {
        let mut b = body(BodyConfig::new().with_max_velocity(5.0, 5.0));
        b.velocity = Vec2::new(f64::NAN, f64::INFINITY);
        let clamped = b.integrate(1.0, Vec2::zero());
        assert!(clamped);
        assert_eq!(b.velocity, Vec2::new(0.0, 5.0));
        assert!(b.position().is_finite());
    }

    #[test]
    fn disabled_body_does_not_move() {
        let mut b = body(BodyConfig::new().with_enabled(false));
        b.velocity = Vec2::new(1.0, 1.0);
        b.integrate(1.0, Vec2::new(0.0, 10.0));
        assert_eq!(b.position(), Vec2::zero());
    }

    #[test]
    fn offset_applies_at_creation() {
        let b = body(BodyConfig::new().with_rect(10.0, 0.0, 5.0, 5.0).with_offset(5.0, 0.0));
        assert_eq!(b.bounds().x, 15.0);
        assert_eq!(b.owner_position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn owner_position_round_trips_through_offset() {
        let mut b = body(BodyConfig::new().with_offset(4.0, -2.0));
        b.set_owner_position(Vec2::new(10.0, 10.0)).unwrap();
        assert_eq!(b.position(), Vec2::new(14.0, 8.0));
        assert_eq!(b.owner_position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn begin_step_resets_flags() {
        let mut b = body(BodyConfig::new());
        b.touching.set(Axis::X, true);
        b.blocked.set(Axis::Y, false);
        b.begin_step();
        assert!(b.was_touching.right);
        assert!(b.touching.none);
        assert!(!b.blocked.up);
    }

    #[test]
    fn world_bounds_reflect_with_bounce() {
        let mut b = body(
            BodyConfig::new()
                .with_rect(95.0, -5.0, 10.0, 10.0)
                .with_bounce(0.5, 0.0)
                .with_collide_world_bounds(true),
        );
        b.velocity = Vec2::new(40.0, -30.0);
        let world = Rect::new(0.0, 0.0, 100.0, 100.0);
        let hit = b.clamp_to_bounds(&world, Sides::all());
        assert!(hit.right && hit.up);
        assert_eq!(b.position(), Vec2::new(90.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(-20.0, 0.0));
        assert!(b.blocked.right && b.blocked.up);
    }

    #[test]
    fn world_bounds_respect_open_edges() {
        let mut b = body(BodyConfig::new().with_rect(-5.0, 0.0, 10.0, 10.0).with_collide_world_bounds(true));
        let world = Rect::new(0.0, 0.0, 100.0, 100.0);
        let hit = b.clamp_to_bounds(&world, Sides::new(true, true, false, true));
        assert!(hit.none);
        assert_eq!(b.position().x, -5.0);
    }

    #[test]
    fn sides_bookkeeping() {
        let mut s = Sides::empty();
        assert!(!s.any());
        s.set(Axis::Y, true);
        assert!(s.down && !s.none);
        assert!(s.get(Axis::Y, true));
        assert_eq!(Sides::new(false, false, false, false), Sides::empty());
    }
}
