//! Configuration types for worlds and bodies.

use crate::body::Sides;
use crate::error::ConfigurationError;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::Vec2;

/// Configuration for a [`World`](crate::World).
///
/// # Builder Pattern
/// ```
/// use arcade_physics::WorldConfig;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(0.0, 300.0)
///     .with_bounds(0.0, 0.0, 1280.0, 720.0)
///     .with_fps(120.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig<F: Float> {
    /// Acceleration applied to every body that allows gravity. Default: zero.
    pub gravity: Vec2<F>,
    /// World extents used for bounds clamping and the broad-phase grid.
    /// Default: 800x600 at the origin.
    pub bounds: Rect<F>,
    /// Which world edges stop bodies that collide with world bounds. Default: all.
    pub bounds_collision: Sides,
    /// Simulation rate; a fixed step lasts `1 / fps` seconds. Default: 60.
    pub fps: F,
    /// Run fixed-size sub-steps from an accumulator instead of one variable step
    /// per update. Default: true.
    pub fixed_step: bool,
    /// Broad-phase cell size. `None` derives it from the average body size.
    pub cell_size: Option<F>,
    /// Queue collision, overlap and world-bounds events for `drain_events`. Default: true.
    pub record_events: bool,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::zero(),
            bounds: Rect::new(F::zero(), F::zero(), F::from_f32(800.0), F::from_f32(600.0)),
            bounds_collision: Sides::all(),
            fps: F::from_f32(60.0),
            fixed_step: true,
            cell_size: None,
            record_events: true,
        }
    }

    /// Set the world gravity.
    pub fn with_gravity(mut self, x: F, y: F) -> Self {
        self.gravity = Vec2::new(x, y);
        self
    }

    /// Set the world bounds.
    pub fn with_bounds(mut self, x: F, y: F, width: F, height: F) -> Self {
        self.bounds = Rect::new(x, y, width, height);
        self
    }

    /// Set which world edges collide.
    pub fn with_bounds_collision(mut self, sides: Sides) -> Self {
        self.bounds_collision = sides;
        self
    }

    /// Set the simulation rate.
    pub fn with_fps(mut self, fps: F) -> Self {
        self.fps = fps;
        self
    }

    /// Choose between fixed sub-steps and one variable step per update.
    pub fn with_fixed_step(mut self, fixed_step: bool) -> Self {
        self.fixed_step = fixed_step;
        self
    }

    /// Use a fixed broad-phase cell size.
    pub fn with_cell_size(mut self, cell_size: F) -> Self {
        self.cell_size = Some(cell_size);
        self
    }

    /// Turn the event queue on or off.
    pub fn with_record_events(mut self, record_events: bool) -> Self {
        self.record_events = record_events;
        self
    }

    /// Length of one fixed step in seconds.
    pub fn step_size(&self) -> F {
        F::one() / self.fps
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.gravity.is_finite() {
            return Err(ConfigurationError::NonFiniteVector);
        }
        validate_world_bounds(&self.bounds)?;
        if !(self.fps.is_finite() && self.fps > F::zero()) {
            return Err(ConfigurationError::InvalidFps);
        }
        if let Some(cell) = self.cell_size {
            if !(cell.is_finite() && cell > F::zero()) {
                return Err(ConfigurationError::InvalidCellSize);
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_world_bounds<F: Float>(bounds: &Rect<F>) -> Result<(), ConfigurationError> {
    let finite = bounds.x.is_finite()
        && bounds.y.is_finite()
        && bounds.width.is_finite()
        && bounds.height.is_finite();
    if !finite || bounds.width < F::zero() || bounds.height < F::zero() {
        return Err(ConfigurationError::InvalidWorldBounds);
    }
    Ok(())
}

/// Initial state for a dynamic or static body.
///
/// Every option has a neutral default: origin position, zero size (no collision
/// footprint), zero offset, mass 1, no bounce, no drag, no extra gravity,
/// friction `(1, 0)`, movable, not clamped to world bounds.
///
/// Static bodies only read the geometry options (`position`, size, `offset`,
/// `enabled`, `check_collision`).
#[derive(Clone, Debug, PartialEq)]
pub struct BodyConfig<F: Float> {
    /// Origin of the owning object. The bounds' top-left corner starts at
    /// `position + offset`.
    pub position: Vec2<F>,
    pub width: F,
    pub height: F,
    /// Displacement of the bounds from the owning object's origin.
    pub offset: Vec2<F>,
    pub mass: F,
    pub bounce: Vec2<F>,
    pub drag: Vec2<F>,
    /// Per-body gravity, added to the world's.
    pub gravity: Vec2<F>,
    pub friction: Vec2<F>,
    pub max_velocity: Option<Vec2<F>>,
    pub max_speed: Option<F>,
    pub immovable: bool,
    pub collide_world_bounds: bool,
    pub allow_gravity: bool,
    pub on_world_bounds: bool,
    pub check_collision: Sides,
    pub enabled: bool,
}

impl<F: Float> BodyConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        BodyConfig {
            position: Vec2::zero(),
            width: F::zero(),
            height: F::zero(),
            offset: Vec2::zero(),
            mass: F::one(),
            bounce: Vec2::zero(),
            drag: Vec2::zero(),
            gravity: Vec2::zero(),
            friction: Vec2::new(F::one(), F::zero()),
            max_velocity: None,
            max_speed: None,
            immovable: false,
            collide_world_bounds: false,
            allow_gravity: true,
            on_world_bounds: false,
            check_collision: Sides::all(),
            enabled: true,
        }
    }

    /// Set the owner origin.
    pub fn with_position(mut self, x: F, y: F) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the width and height of the bounds.
    pub fn with_size(mut self, width: F, height: F) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Shorthand for position and size together.
    pub fn with_rect(self, x: F, y: F, width: F, height: F) -> Self {
        self.with_position(x, y).with_size(width, height)
    }

    /// Set the offset of the bounds from the owner origin.
    pub fn with_offset(mut self, x: F, y: F) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Set the mass. Must be positive.
    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Set the restitution per axis, in `[0, 1]`.
    pub fn with_bounce(mut self, x: F, y: F) -> Self {
        self.bounce = Vec2::new(x, y);
        self
    }

    /// Set the drag per axis, in units per second squared.
    pub fn with_drag(mut self, x: F, y: F) -> Self {
        self.drag = Vec2::new(x, y);
        self
    }

    /// Set the per-body gravity.
    pub fn with_gravity(mut self, x: F, y: F) -> Self {
        self.gravity = Vec2::new(x, y);
        self
    }

    /// Set how much of this body's motion it passes to riders while immovable.
    pub fn with_friction(mut self, x: F, y: F) -> Self {
        self.friction = Vec2::new(x, y);
        self
    }

    /// Clamp each velocity component to `[-x, x]` and `[-y, y]`.
    pub fn with_max_velocity(mut self, x: F, y: F) -> Self {
        self.max_velocity = Some(Vec2::new(x, y));
        self
    }

    /// Clamp the velocity length.
    pub fn with_max_speed(mut self, speed: F) -> Self {
        self.max_speed = Some(speed);
        self
    }

    /// Make the body ignore separation pushes.
    pub fn with_immovable(mut self, immovable: bool) -> Self {
        self.immovable = immovable;
        self
    }

    /// Keep the body inside the world bounds.
    pub fn with_collide_world_bounds(mut self, collide: bool) -> Self {
        self.collide_world_bounds = collide;
        self
    }

    /// Let world and body gravity act on the body.
    pub fn with_allow_gravity(mut self, allow: bool) -> Self {
        self.allow_gravity = allow;
        self
    }

    /// Queue a world-bounds event when the body hits an edge.
    pub fn with_on_world_bounds(mut self, emit: bool) -> Self {
        self.on_world_bounds = emit;
        self
    }

    /// Set which faces take part in separation.
    pub fn with_check_collision(mut self, sides: Sides) -> Self {
        self.check_collision = sides;
        self
    }

    /// Start enabled or disabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_size(self.width, self.height)?;
        if !self.position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        if !self.offset.is_finite() {
            return Err(ConfigurationError::NonFiniteOffset);
        }
        if !(self.mass.is_finite() && self.mass > F::zero()) {
            return Err(ConfigurationError::InvalidMass);
        }
        let unit = |v: F| v.is_finite() && v >= F::zero() && v <= F::one();
        if !(unit(self.bounce.x) && unit(self.bounce.y)) {
            return Err(ConfigurationError::InvalidBounce);
        }
        let non_negative = |v: F| v.is_finite() && v >= F::zero();
        if !(non_negative(self.drag.x) && non_negative(self.drag.y)) {
            return Err(ConfigurationError::InvalidDrag);
        }
        if !(self.gravity.is_finite() && self.friction.is_finite()) {
            return Err(ConfigurationError::NonFiniteVector);
        }
        if let Some(max) = self.max_velocity {
            if !(non_negative(max.x) && non_negative(max.y)) {
                return Err(ConfigurationError::InvalidMaxVelocity);
            }
        }
        if let Some(speed) = self.max_speed {
            if !non_negative(speed) {
                return Err(ConfigurationError::InvalidMaxVelocity);
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_size<F: Float>(width: F, height: F) -> Result<(), ConfigurationError> {
    let ok = width.is_finite() && height.is_finite() && width >= F::zero() && height >= F::zero();
    if ok { Ok(()) } else { Err(ConfigurationError::InvalidSize) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let c: BodyConfig<f32> = BodyConfig::new();
        assert_eq!(c.mass, 1.0);
        assert_eq!(c.bounce, Vec2::zero());
        assert_eq!(c.drag, Vec2::zero());
        assert!(!c.immovable);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn negative_size_rejected() {
        let c: BodyConfig<f64> = BodyConfig::new().with_size(-1.0, 4.0);
        assert_eq!(c.validate(), Err(ConfigurationError::InvalidSize));
    }

    #[test]
    fn non_finite_position_rejected() {
        let c: BodyConfig<f32> = BodyConfig::new().with_position(f32::NAN, 0.0);
        assert_eq!(c.validate(), Err(ConfigurationError::NonFinitePosition));
    }

    #[test]
    fn bounce_must_be_unit() {
        let c: BodyConfig<f32> = BodyConfig::new().with_bounce(1.5, 0.0);
        assert_eq!(c.validate(), Err(ConfigurationError::InvalidBounce));
    }

    #[test]
    fn world_step_size() {
        let c: WorldConfig<f64> = WorldConfig::new().with_fps(50.0);
        assert_eq!(c.step_size(), 0.02);
        assert!(WorldConfig::<f32>::new().with_fps(0.0).validate().is_err());
        assert!(WorldConfig::<f32>::new().with_cell_size(-2.0).validate().is_err());
    }
}
