//! Static bodies: immovable collision geometry.

use crate::body::{OwnerId, Sides};
use crate::config::{validate_size, BodyConfig};
use crate::error::ConfigurationError;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::Vec2;

/// Fixed geometry. Never integrated and never moved by separation; only
/// `set_position`/`reset` change where it is.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticBody<F: Float> {
    position: Vec2<F>,
    offset: Vec2<F>,
    width: F,
    height: F,
    owner: OwnerId,

    pub enabled: bool,
    pub check_collision: Sides,
    pub touching: Sides,
    pub was_touching: Sides,
    pub blocked: Sides,
}

impl<F: Float> StaticBody<F> {
    /// Build a static body. Only the geometry options of `config` are used.
    pub fn new(owner: OwnerId, config: &BodyConfig<F>) -> Result<Self, ConfigurationError> {
        validate_size(config.width, config.height)?;
        if !config.position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        if !config.offset.is_finite() {
            return Err(ConfigurationError::NonFiniteOffset);
        }
        let position = config.position + config.offset;
        if !position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        Ok(StaticBody {
            position,
            offset: config.offset,
            width: config.width,
            height: config.height,
            owner,
            enabled: config.enabled,
            check_collision: config.check_collision,
            touching: Sides::empty(),
            was_touching: Sides::empty(),
            blocked: Sides::empty(),
        })
    }

    pub fn owner(&self) -> OwnerId { self.owner }
    pub fn position(&self) -> Vec2<F> { self.position }
    pub fn offset(&self) -> Vec2<F> { self.offset }
    pub fn width(&self) -> F { self.width }
    pub fn height(&self) -> F { self.height }

    pub fn bounds(&self) -> Rect<F> {
        Rect::from_position(self.position, self.width, self.height)
    }

    pub fn center(&self) -> Vec2<F> {
        self.bounds().center()
    }

    pub fn set_position(&mut self, position: Vec2<F>) -> Result<(), ConfigurationError> {
        if !position.is_finite() {
            return Err(ConfigurationError::NonFinitePosition);
        }
        self.position = position;
        Ok(())
    }

    pub fn set_owner_position(&mut self, origin: Vec2<F>) -> Result<(), ConfigurationError> {
        self.set_position(origin + self.offset)
    }

    pub fn owner_position(&self) -> Vec2<F> {
        self.position - self.offset
    }

    pub fn set_size(&mut self, width: F, height: F) -> Result<(), ConfigurationError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Move to `position` and forget any contact state.
    pub fn reset(&mut self, position: Vec2<F>) -> Result<(), ConfigurationError> {
        self.set_position(position)?;
        self.touching.clear();
        self.was_touching.clear();
        self.blocked.clear();
        Ok(())
    }

    pub(crate) fn begin_step(&mut self) {
        self.was_touching = self.touching;
        self.touching.clear();
        self.blocked.clear();
    }
}
