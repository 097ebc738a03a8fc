//! Axis-aligned rectangles.

use crate::float::Float;
use crate::vec::{Axis, Vec2};

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect<F: Float> {
    pub x: F,
    pub y: F,
    pub width: F,
    pub height: F,
}

impl<F: Float> Rect<F> {
    pub fn new(x: F, y: F, width: F, height: F) -> Self {
        Rect { x, y, width, height }
    }

    pub fn from_position(position: Vec2<F>, width: F, height: F) -> Self {
        Rect { x: position.x, y: position.y, width, height }
    }

    pub fn left(&self) -> F { self.x }
    pub fn right(&self) -> F { self.x + self.width }
    pub fn top(&self) -> F { self.y }
    pub fn bottom(&self) -> F { self.y + self.height }

    pub fn center(&self) -> Vec2<F> {
        Vec2::new(self.x + self.width * F::half(), self.y + self.height * F::half())
    }

    /// Lower edge along `axis` (left or top).
    pub fn min(&self, axis: Axis) -> F {
        match axis {
            Axis::X => self.left(),
            Axis::Y => self.top(),
        }
    }

    /// Upper edge along `axis` (right or bottom).
    pub fn max(&self, axis: Axis) -> F {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> F {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > F::zero() && self.height > F::zero())
    }

    /// Strict intersection: edges that merely touch do not count.
    pub fn intersects(&self, other: &Rect<F>) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Penetration depth along `axis`, or zero when the projections are disjoint.
    ///
    /// This is the smaller of the two ways to push the rectangles apart.
    pub fn overlap(&self, other: &Rect<F>, axis: Axis) -> F {
        let forward = self.max(axis) - other.min(axis);
        let backward = other.max(axis) - self.min(axis);
        let depth = forward.min(backward);
        if depth > F::zero() { depth } else { F::zero() }
    }

    /// Whether `self` should be pushed toward the negative side of `axis` to leave `other`.
    pub fn on_min_side(&self, other: &Rect<F>, axis: Axis) -> bool {
        self.max(axis) - other.min(axis) <= other.max(axis) - self.min(axis)
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect<F>) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2<F>) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
