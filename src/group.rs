//! Homogeneous collections of bodies that colliders can reference.

use crate::body::BodyType;
use crate::physics_body::BodyHandle;
use alloc::vec::Vec as AllocVec;

slotmap::new_key_type! {
    /// Stable reference to a group owned by a [`World`](crate::World).
    pub struct GroupHandle;
}

/// An ordered set of bodies of a single [`BodyType`].
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    kind: BodyType,
    members: AllocVec<BodyHandle>,
}

impl Group {
    pub fn new(kind: BodyType) -> Self {
        Group { kind, members: AllocVec::new() }
    }

    pub fn kind(&self) -> BodyType { self.kind }

    /// Members in insertion order.
    pub fn members(&self) -> &[BodyHandle] { &self.members }

    pub fn contains(&self, body: BodyHandle) -> bool {
        self.members.contains(&body)
    }

    /// Returns false when the body was already a member.
    pub(crate) fn insert(&mut self, body: BodyHandle) -> bool {
        if self.contains(body) {
            return false;
        }
        self.members.push(body);
        true
    }

    /// Returns false when the body was not a member.
    pub(crate) fn remove(&mut self, body: BodyHandle) -> bool {
        match self.members.iter().position(|m| *m == body) {
            Some(i) => {
                self.members.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
}
