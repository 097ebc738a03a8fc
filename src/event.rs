//! Notifications produced by a step.

use crate::body::{OwnerId, Sides};
use crate::float::Float;
use crate::physics_body::BodyHandle;
use crate::vec::Vec2;

/// One resolved collision or overlap.
///
/// `body1` always belongs to the collider's first object and `body2` to its
/// second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision<F: Float> {
    pub body1: BodyHandle,
    pub body2: BodyHandle,
    /// Faces of `body1` that made contact.
    pub touching1: Sides,
    /// Faces of `body2` that made contact.
    pub touching2: Sides,
    /// Penetration depth on each axis before any correction.
    pub overlap: Vec2<F>,
    pub overlap_only: bool,
}

/// Queued for [`World::drain_events`](crate::World::drain_events) in the order
/// they happened: collider registration order, then candidate discovery order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PhysicsEvent<F: Float> {
    Collide(Collision<F>),
    Overlap(Collision<F>),
    /// A body with `on_world_bounds` set was clamped against these world edges.
    WorldBounds {
        body: BodyHandle,
        owner: OwnerId,
        edges: Sides,
    },
}
