//! Colliders: which bodies are tested against which, and what happens when
//! they meet.

use crate::event::Collision;
use crate::float::Float;
use crate::group::GroupHandle;
use crate::physics_body::BodyHandle;
use crate::world::World;
use alloc::boxed::Box;
use core::fmt;
use hashbrown::HashSet;

/// Fired for every pair a collider separates (or reports, when overlap-only).
pub type CollideCallback<F> = Box<dyn FnMut(&mut World<F>, &Collision<F>)>;

/// Asked before a pair is resolved; returning false skips it.
pub type ProcessCallback<F> = Box<dyn FnMut(&World<F>, BodyHandle, BodyHandle) -> bool>;

/// One side of a collider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColliderObject {
    Body(BodyHandle),
    Group(GroupHandle),
}

impl From<BodyHandle> for ColliderObject {
    fn from(handle: BodyHandle) -> Self {
        ColliderObject::Body(handle)
    }
}

impl From<GroupHandle> for ColliderObject {
    fn from(handle: GroupHandle) -> Self {
        ColliderObject::Group(handle)
    }
}

/// Stable reference to a collider owned by a [`World`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub(crate) u64);

/// Description of a collider, consumed by [`World::add_collider`].
///
/// # Builder Pattern
/// ```
/// use arcade_physics::{BodyConfig, ColliderDesc, OwnerId, World, WorldConfig};
///
/// let mut world: World<f32> = World::new(WorldConfig::new()).unwrap();
/// let player = world
///     .create_body(OwnerId(1), &BodyConfig::new().with_rect(0.0, 0.0, 16.0, 16.0))
///     .unwrap();
/// let coin = world
///     .create_static_body(OwnerId(2), &BodyConfig::new().with_rect(8.0, 8.0, 8.0, 8.0))
///     .unwrap();
///
/// let desc = ColliderDesc::overlap(player, coin).on_collide(|world, hit| {
///     let _ = world.disable(hit.body2);
/// });
/// world.add_collider(desc).unwrap();
/// ```
pub struct ColliderDesc<F: Float> {
    pub(crate) object1: ColliderObject,
    pub(crate) object2: ColliderObject,
    pub(crate) overlap_only: bool,
    pub(crate) on_collide: Option<CollideCallback<F>>,
    pub(crate) process: Option<ProcessCallback<F>>,
}

impl<F: Float> ColliderDesc<F> {
    /// A colliding (separating) collider between two objects.
    pub fn new(object1: impl Into<ColliderObject>, object2: impl Into<ColliderObject>) -> Self {
        ColliderDesc {
            object1: object1.into(),
            object2: object2.into(),
            overlap_only: false,
            on_collide: None,
            process: None,
        }
    }

    /// An overlap-only collider: reports contacts without moving anything.
    pub fn overlap(object1: impl Into<ColliderObject>, object2: impl Into<ColliderObject>) -> Self {
        Self::new(object1, object2).with_overlap_only(true)
    }

    pub fn with_overlap_only(mut self, overlap_only: bool) -> Self {
        self.overlap_only = overlap_only;
        self
    }

    pub fn on_collide(mut self, callback: impl FnMut(&mut World<F>, &Collision<F>) + 'static) -> Self {
        self.on_collide = Some(Box::new(callback));
        self
    }

    pub fn with_process(
        mut self,
        callback: impl FnMut(&World<F>, BodyHandle, BodyHandle) -> bool + 'static,
    ) -> Self {
        self.process = Some(Box::new(callback));
        self
    }
}

/// A registered collider. Evaluated every step while `active`.
pub struct Collider<F: Float> {
    handle: ColliderHandle,
    object1: ColliderObject,
    object2: ColliderObject,
    overlap_only: bool,
    pub(crate) active: bool,
    pub(crate) on_collide: Option<CollideCallback<F>>,
    pub(crate) process: Option<ProcessCallback<F>>,
}

impl<F: Float> Collider<F> {
    pub(crate) fn new(handle: ColliderHandle, desc: ColliderDesc<F>, active: bool) -> Self {
        Collider {
            handle,
            object1: desc.object1,
            object2: desc.object2,
            overlap_only: desc.overlap_only,
            active,
            on_collide: desc.on_collide,
            process: desc.process,
        }
    }

    pub fn handle(&self) -> ColliderHandle { self.handle }
    pub fn object1(&self) -> ColliderObject { self.object1 }
    pub fn object2(&self) -> ColliderObject { self.object2 }
    pub fn overlap_only(&self) -> bool { self.overlap_only }
    pub fn active(&self) -> bool { self.active }

    /// Both sides name the same body or group.
    pub fn is_self_collision(&self) -> bool {
        self.object1 == self.object2
    }

    pub(crate) fn references(&self, object: ColliderObject) -> bool {
        self.object1 == object || self.object2 == object
    }
}

impl<F: Float> fmt::Debug for Collider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("handle", &self.handle)
            .field("object1", &self.object1)
            .field("object2", &self.object2)
            .field("overlap_only", &self.overlap_only)
            .field("active", &self.active)
            .field("on_collide", &self.on_collide.is_some())
            .field("process", &self.process.is_some())
            .finish()
    }
}

/// Membership snapshot of one collider side, taken once per evaluation.
#[derive(Clone, Debug)]
pub(crate) enum Members {
    Empty,
    One(BodyHandle),
    Many(HashSet<BodyHandle>),
}

impl Members {
    pub(crate) fn contains(&self, body: BodyHandle) -> bool {
        match self {
            Members::Empty => false,
            Members::One(h) => *h == body,
            Members::Many(set) => set.contains(&body),
        }
    }
}

/// Orient a candidate pair so the first handle belongs to side one.
pub(crate) fn orient(
    a: BodyHandle,
    b: BodyHandle,
    side1: &Members,
    side2: &Members,
) -> Option<(BodyHandle, BodyHandle)> {
    if side1.contains(a) && side2.contains(b) {
        Some((a, b))
    } else if side1.contains(b) && side2.contains(a) {
        Some((b, a))
    } else {
        None
    }
}
