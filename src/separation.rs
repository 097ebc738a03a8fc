//! Narrow phase: exact AABB overlap and minimum-translation separation.

use crate::body::Sides;
use crate::float::Float;
use crate::physics_body::PhysicsBody;
use crate::vec::{Axis, Vec2};

/// Outcome of a narrow-phase check between two bodies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    /// Penetration depth on each axis before any correction.
    pub overlap: Vec2<F>,
    /// Faces of the first body that made contact.
    pub touching1: Sides,
    /// Faces of the second body that made contact.
    pub touching2: Sides,
}

impl<F: Float> Contact<F> {
    fn new(overlap: Vec2<F>) -> Self {
        Contact { overlap, touching1: Sides::empty(), touching2: Sides::empty() }
    }
}

/// The axis with the shallower penetration; X wins ties.
pub fn first_axis<F: Float>(overlap: Vec2<F>) -> Axis {
    if overlap.x <= overlap.y { Axis::X } else { Axis::Y }
}

/// True when both bodies are collidable and their bounds strictly intersect.
pub fn intersects<F: Float>(a: &PhysicsBody<F>, b: &PhysicsBody<F>) -> bool {
    a.is_collidable() && b.is_collidable() && a.bounds().intersects(&b.bounds())
}

fn penetration<F: Float>(a: &PhysicsBody<F>, b: &PhysicsBody<F>) -> Vec2<F> {
    let (ra, rb) = (a.bounds(), b.bounds());
    Vec2::new(ra.overlap(&rb, Axis::X), ra.overlap(&rb, Axis::Y))
}

/// Report an overlap without moving anything.
///
/// Only the touching flags change: the faces along the shallower axis are
/// marked on both bodies.
pub fn overlap<F: Float>(a: &mut PhysicsBody<F>, b: &mut PhysicsBody<F>) -> Option<Contact<F>> {
    if !intersects(a, b) {
        return None;
    }
    let depth = penetration(a, b);
    let axis = first_axis(depth);
    let a_min = a.bounds().on_min_side(&b.bounds(), axis);

    let mut contact = Contact::new(depth);
    mark_touching(a, b, axis, a_min, &mut contact);
    Some(contact)
}

/// Push two overlapping bodies apart.
///
/// The shallower axis is resolved first. The other axis is only tried when
/// the facing sides on the first one have collision checks disabled, so a
/// contact moves the bodies along a single axis. Returns `None` when the
/// bodies do not overlap or no face allowed a resolution.
pub fn separate<F: Float>(a: &mut PhysicsBody<F>, b: &mut PhysicsBody<F>) -> Option<Contact<F>> {
    if !intersects(a, b) {
        return None;
    }
    let depth = penetration(a, b);
    let first = first_axis(depth);

    let mut contact = Contact::new(depth);
    for axis in [first, first.other()] {
        if resolve_axis(a, b, axis, &mut contact) {
            return Some(contact);
        }
    }
    None
}

fn resolve_axis<F: Float>(
    a: &mut PhysicsBody<F>,
    b: &mut PhysicsBody<F>,
    axis: Axis,
    contact: &mut Contact<F>,
) -> bool {
    let (ra, rb) = (a.bounds(), b.bounds());
    // a's high face meets b's low face when a sits on the min side
    let a_min = ra.on_min_side(&rb, axis);
    if !a.check_collision().get(axis, a_min) || !b.check_collision().get(axis, !a_min) {
        return false;
    }

    let depth = ra.overlap(&rb, axis);
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let total = inv_a + inv_b;

    if total > F::zero() {
        let dir = if a_min { -F::one() } else { F::one() };
        a.translate(axis, dir * depth * (inv_a / total));
        b.translate(axis, -dir * depth * (inv_b / total));
        respond(a, b, axis, a_min, inv_a, inv_b);
        carry(a, b, axis, inv_a, inv_b);
    }

    mark_touching(a, b, axis, a_min, contact);
    if a.immovable() && !b.immovable() {
        b.blocked_mut().set(axis, !a_min);
    }
    if b.immovable() && !a.immovable() {
        a.blocked_mut().set(axis, a_min);
    }
    true
}

/// Restitution along `axis`, only while the bodies close on each other.
///
/// Each movable body bounces off the pair's centre-of-mass velocity, which is
/// simply the partner's velocity when the partner is immovable.
fn respond<F: Float>(
    a: &mut PhysicsBody<F>,
    b: &mut PhysicsBody<F>,
    axis: Axis,
    a_min: bool,
    inv_a: F,
    inv_b: F,
) {
    let va = a.velocity().get(axis);
    let vb = b.velocity().get(axis);
    let closing = if a_min { va - vb > F::zero() } else { va - vb < F::zero() };
    if !closing {
        return;
    }
    let vc = (va * inv_b + vb * inv_a) / (inv_a + inv_b);
    if inv_a > F::zero() {
        let bounce = a.bounce(axis);
        a.set_velocity_axis(axis, vc - (va - vc) * bounce);
    }
    if inv_b > F::zero() {
        let bounce = b.bounce(axis);
        b.set_velocity_axis(axis, vc - (vb - vc) * bounce);
    }
}

/// Moving platforms drag what rests on them along the tangential axis.
fn carry<F: Float>(a: &mut PhysicsBody<F>, b: &mut PhysicsBody<F>, axis: Axis, inv_a: F, inv_b: F) {
    let tangent = axis.other();
    if inv_a == F::zero() && inv_b > F::zero() {
        let shift = a.delta().get(tangent) * a.friction(tangent);
        if shift != F::zero() {
            b.translate(tangent, shift);
        }
    } else if inv_b == F::zero() && inv_a > F::zero() {
        let shift = b.delta().get(tangent) * b.friction(tangent);
        if shift != F::zero() {
            a.translate(tangent, shift);
        }
    }
}

fn mark_touching<F: Float>(
    a: &mut PhysicsBody<F>,
    b: &mut PhysicsBody<F>,
    axis: Axis,
    a_min: bool,
    contact: &mut Contact<F>,
) {
    a.touching_mut().set(axis, a_min);
    b.touching_mut().set(axis, !a_min);
    contact.touching1.set(axis, a_min);
    contact.touching2.set(axis, !a_min);
}
