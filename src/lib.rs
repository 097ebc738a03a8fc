//! Axis-aligned arcade physics for 2D games.
//!
//! `arcade-physics` moves rectangular bodies with simple kinematics and keeps
//! them from overlapping. It is the kind of physics platformers, shooters and
//! top-down games want: cheap, predictable and easy to reason about.
//!
//! # Features
//!
//! - **Bodies**: dynamic bodies with velocity, drag, gravity, bounce and speed
//!   limits; static bodies for level geometry
//! - **Broad phase**: uniform grid rebuilt every step, de-duplicated pairs
//! - **Separation**: minimum-translation AABB resolution split by mass, with
//!   restitution, one-way faces and moving-platform friction
//! - **Colliders**: body/group pairs with collide and process callbacks, or
//!   overlap-only triggers
//! - **Fixed timestep**: accumulator-driven `update`, plus explicit `step`
//! - **Observable**: per-step counters via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! Coordinates are screen space: `+y` points down.

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod rect;
pub mod body;
pub mod static_body;
pub mod physics_body;
pub mod group;
pub mod spatial;
pub mod separation;
pub mod collider;
pub mod event;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Axis, Vec2};
pub use rect::Rect;
pub use body::{Body, BodyType, OwnerId, Sides};
pub use static_body::StaticBody;
pub use physics_body::{BodyHandle, PhysicsBody};
pub use group::{Group, GroupHandle};
pub use spatial::{CandidatePair, SpatialIndex};
pub use separation::Contact;
pub use collider::{Collider, ColliderDesc, ColliderHandle, ColliderObject, CollideCallback, ProcessCallback};
pub use event::{Collision, PhysicsEvent};
pub use world::World;
pub use config::{BodyConfig, WorldConfig};
pub use observer::{StepObserver, NoOpStepObserver, StepReport};
pub use error::{ConfigurationError, PhysicsError};
