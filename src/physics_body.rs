//! Tagged union over dynamic and static bodies.

use crate::body::{Body, BodyType, OwnerId, Sides};
use crate::float::Float;
use crate::rect::Rect;
use crate::static_body::StaticBody;
use crate::vec::{Axis, Vec2};
use slotmap::DenseSlotMap;

slotmap::new_key_type! {
    /// Stable reference to a body owned by a [`World`](crate::World).
    ///
    /// Stops resolving once the body is removed, even if its slot is reused.
    pub struct BodyHandle;
}

/// Dense body storage: per-step passes walk the values contiguously.
pub(crate) type BodySet<F> = DenseSlotMap<BodyHandle, PhysicsBody<F>>;

/// Any body stored in a [`World`](crate::World).
///
/// Integration and world-bounds clamping only touch the `Dynamic` variant;
/// separation reads both through the accessors below.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsBody<F: Float> {
    Dynamic(Body<F>),
    Static(StaticBody<F>),
}

impl<F: Float> PhysicsBody<F> {
    pub fn body_type(&self) -> BodyType {
        match self {
            PhysicsBody::Dynamic(_) => BodyType::Dynamic,
            PhysicsBody::Static(_) => BodyType::Static,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, PhysicsBody::Static(_))
    }

    pub fn as_dynamic(&self) -> Option<&Body<F>> {
        match self {
            PhysicsBody::Dynamic(b) => Some(b),
            PhysicsBody::Static(_) => None,
        }
    }

    pub fn as_dynamic_mut(&mut self) -> Option<&mut Body<F>> {
        match self {
            PhysicsBody::Dynamic(b) => Some(b),
            PhysicsBody::Static(_) => None,
        }
    }

    pub fn as_static(&self) -> Option<&StaticBody<F>> {
        match self {
            PhysicsBody::Static(s) => Some(s),
            PhysicsBody::Dynamic(_) => None,
        }
    }

    pub fn as_static_mut(&mut self) -> Option<&mut StaticBody<F>> {
        match self {
            PhysicsBody::Static(s) => Some(s),
            PhysicsBody::Dynamic(_) => None,
        }
    }

    pub fn owner(&self) -> OwnerId {
        match self {
            PhysicsBody::Dynamic(b) => b.owner(),
            PhysicsBody::Static(s) => s.owner(),
        }
    }

    pub fn bounds(&self) -> Rect<F> {
        match self {
            PhysicsBody::Dynamic(b) => b.bounds(),
            PhysicsBody::Static(s) => s.bounds(),
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            PhysicsBody::Dynamic(b) => b.enabled,
            PhysicsBody::Static(s) => s.enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            PhysicsBody::Dynamic(b) => b.enabled = enabled,
            PhysicsBody::Static(s) => s.enabled = enabled,
        }
    }

    /// Static bodies always count as immovable.
    pub fn immovable(&self) -> bool {
        match self {
            PhysicsBody::Dynamic(b) => b.immovable,
            PhysicsBody::Static(_) => true,
        }
    }

    pub fn inv_mass(&self) -> F {
        match self {
            PhysicsBody::Dynamic(b) => b.inv_mass(),
            PhysicsBody::Static(_) => F::zero(),
        }
    }

    pub fn velocity(&self) -> Vec2<F> {
        match self {
            PhysicsBody::Dynamic(b) => b.velocity,
            PhysicsBody::Static(_) => Vec2::zero(),
        }
    }

    pub fn delta(&self) -> Vec2<F> {
        match self {
            PhysicsBody::Dynamic(b) => b.delta(),
            PhysicsBody::Static(_) => Vec2::zero(),
        }
    }

    pub fn check_collision(&self) -> Sides {
        match self {
            PhysicsBody::Dynamic(b) => b.check_collision,
            PhysicsBody::Static(s) => s.check_collision,
        }
    }

    pub fn touching(&self) -> Sides {
        match self {
            PhysicsBody::Dynamic(b) => b.touching,
            PhysicsBody::Static(s) => s.touching,
        }
    }

    pub fn blocked(&self) -> Sides {
        match self {
            PhysicsBody::Dynamic(b) => b.blocked,
            PhysicsBody::Static(s) => s.blocked,
        }
    }

    pub(crate) fn touching_mut(&mut self) -> &mut Sides {
        match self {
            PhysicsBody::Dynamic(b) => &mut b.touching,
            PhysicsBody::Static(s) => &mut s.touching,
        }
    }

    pub(crate) fn blocked_mut(&mut self) -> &mut Sides {
        match self {
            PhysicsBody::Dynamic(b) => &mut b.blocked,
            PhysicsBody::Static(s) => &mut s.blocked,
        }
    }

    /// Bodies with no area never enter the broad phase.
    pub fn is_collidable(&self) -> bool {
        self.enabled() && !self.bounds().is_empty()
    }

    pub(crate) fn begin_step(&mut self) {
        match self {
            PhysicsBody::Dynamic(b) => b.begin_step(),
            PhysicsBody::Static(s) => s.begin_step(),
        }
    }

    /// Positional correction; a no-op for anything immovable.
    pub(crate) fn translate(&mut self, axis: Axis, amount: F) {
        if let PhysicsBody::Dynamic(b) = self {
            if !b.immovable {
                b.translate(axis, amount);
            }
        }
    }

    pub(crate) fn set_velocity_axis(&mut self, axis: Axis, value: F) {
        if let PhysicsBody::Dynamic(b) = self {
            if !b.immovable {
                b.velocity.set(axis, value);
            }
        }
    }

    pub(crate) fn bounce(&self, axis: Axis) -> F {
        match self {
            PhysicsBody::Dynamic(b) => b.bounce.get(axis),
            PhysicsBody::Static(_) => F::zero(),
        }
    }

    pub(crate) fn friction(&self, axis: Axis) -> F {
        match self {
            PhysicsBody::Dynamic(b) => b.friction.get(axis),
            PhysicsBody::Static(_) => F::zero(),
        }
    }
}
