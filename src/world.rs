//! The world: owns every body, group and collider and drives the step.
//!
//! A step runs in a fixed order:
//!
//! 1. reset per-step contact flags
//! 2. integrate enabled dynamic bodies
//! 3. clamp bodies that collide with world bounds
//! 4. rebuild the broad phase
//! 5. evaluate colliders in registration order
//!
//! Callbacks run synchronously inside step 5. They receive the world itself,
//! so they may create, remove or reconfigure anything, but stepping again from
//! inside a callback fails with [`PhysicsError::Reentrancy`].

use crate::body::{Body, BodyType, OwnerId, Sides};
use crate::collider::{orient, Collider, ColliderDesc, ColliderHandle, ColliderObject, Members};
use crate::config::{validate_world_bounds, BodyConfig, WorldConfig};
use crate::error::{ConfigurationError, PhysicsError};
use crate::event::{Collision, PhysicsEvent};
use crate::float::Float;
use crate::group::{Group, GroupHandle};
use crate::observer::{NoOpStepObserver, StepObserver, StepReport};
use crate::physics_body::{BodyHandle, BodySet, PhysicsBody};
use crate::rect::Rect;
use crate::separation;
use crate::spatial::{CandidatePair, SpatialIndex};
use crate::static_body::StaticBody;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use slotmap::DenseSlotMap;

/// An arcade physics world.
///
/// # Example
/// ```
/// use arcade_physics::{BodyConfig, ColliderDesc, OwnerId, World, WorldConfig};
///
/// let mut world: World<f32> = World::new(
///     WorldConfig::new().with_gravity(0.0, 600.0).with_bounds(0.0, 0.0, 320.0, 240.0),
/// )
/// .unwrap();
/// let player = world
///     .create_body(OwnerId(1), &BodyConfig::new().with_rect(100.0, 100.0, 16.0, 16.0))
///     .unwrap();
/// let ground = world
///     .create_static_body(OwnerId(2), &BodyConfig::new().with_rect(0.0, 200.0, 320.0, 40.0))
///     .unwrap();
/// world.add_collider(ColliderDesc::new(player, ground)).unwrap();
///
/// for _ in 0..120 {
///     world.update(1.0 / 60.0).unwrap();
/// }
/// let body = world.body(player).unwrap();
/// assert!(body.bounds().bottom() <= 200.001);
/// assert!(body.touching.down);
/// ```
pub struct World<F: Float> {
    config: WorldConfig<F>,
    bodies: BodySet<F>,
    groups: DenseSlotMap<GroupHandle, Group>,
    colliders: AllocVec<Collider<F>>,
    next_collider: u64,
    index: SpatialIndex<F>,
    events: AllocVec<PhysicsEvent<F>>,
    accumulator: F,
    paused: bool,
    stepping: bool,
}

impl<F: Float> World<F> {
    /// Create an empty world. The config is validated first.
    pub fn new(config: WorldConfig<F>) -> Result<Self, PhysicsError> {
        config.validate()?;
        let index = SpatialIndex::new(config.bounds, config.cell_size);
        Ok(World {
            config,
            bodies: BodySet::with_key(),
            groups: DenseSlotMap::with_key(),
            colliders: AllocVec::new(),
            next_collider: 0,
            index,
            events: AllocVec::new(),
            accumulator: F::zero(),
            paused: false,
            stepping: false,
        })
    }

    /// Current settings, including any changed through the setters.
    pub fn config(&self) -> &WorldConfig<F> { &self.config }

    /// World extents used for clamping and the broad-phase grid.
    pub fn bounds(&self) -> Rect<F> { self.config.bounds }

    /// World gravity.
    pub fn gravity(&self) -> Vec2<F> { self.config.gravity }

    /// Broad phase as left by the last step.
    pub fn spatial_index(&self) -> &SpatialIndex<F> { &self.index }

    // ------------------------------------------------------------------
    // Bodies
    // ------------------------------------------------------------------

    /// Add a dynamic body. Nothing is added when the config is rejected.
    pub fn create_body(&mut self, owner: OwnerId, config: &BodyConfig<F>) -> Result<BodyHandle, PhysicsError> {
        let body = Body::new(owner, config)?;
        let handle = self.bodies.insert(PhysicsBody::Dynamic(body));
        log::debug!("created dynamic body {:?} for owner {:?}", handle, owner);
        Ok(handle)
    }

    /// Add a static body. Only the geometry options of `config` are read.
    pub fn create_static_body(
        &mut self,
        owner: OwnerId,
        config: &BodyConfig<F>,
    ) -> Result<BodyHandle, PhysicsError> {
        let body = StaticBody::new(owner, config)?;
        let handle = self.bodies.insert(PhysicsBody::Static(body));
        log::debug!("created static body {:?} for owner {:?}", handle, owner);
        Ok(handle)
    }

    /// Remove a body and everything that only existed for it.
    ///
    /// The body leaves every group. Colliders naming it directly are removed,
    /// as are colliders between two groups that are now both empty because of
    /// this removal.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<PhysicsBody<F>, PhysicsError> {
        let body = self.bodies.remove(handle).ok_or(PhysicsError::StaleHandle)?;

        let mut emptied = AllocVec::new();
        for (group_handle, group) in self.groups.iter_mut() {
            if group.remove(handle) && group.is_empty() {
                emptied.push(ColliderObject::Group(group_handle));
            }
        }

        let target = ColliderObject::Body(handle);
        let groups = &self.groups;
        let is_empty_group = |object: ColliderObject| match object {
            ColliderObject::Group(g) => groups.get(g).map_or(true, Group::is_empty),
            ColliderObject::Body(_) => false,
        };
        self.colliders.retain(|c| {
            let orphaned = is_empty_group(c.object1())
                && is_empty_group(c.object2())
                && (emptied.contains(&c.object1()) || emptied.contains(&c.object2()));
            let purge = c.references(target) || orphaned;
            if purge {
                log::debug!("purged collider {:?} after removing body {:?}", c.handle(), handle);
            }
            !purge
        });

        log::debug!("removed body {:?}", handle);
        Ok(body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&PhysicsBody<F>> {
        self.bodies.get(handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody<F>> {
        self.bodies.get_mut(handle)
    }

    /// The dynamic body behind `handle`, if it is one.
    pub fn body(&self, handle: BodyHandle) -> Option<&Body<F>> {
        self.get(handle).and_then(PhysicsBody::as_dynamic)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<F>> {
        self.get_mut(handle).and_then(PhysicsBody::as_dynamic_mut)
    }

    /// The static body behind `handle`, if it is one.
    pub fn static_body(&self, handle: BodyHandle) -> Option<&StaticBody<F>> {
        self.get(handle).and_then(PhysicsBody::as_static)
    }

    pub fn static_body_mut(&mut self, handle: BodyHandle) -> Option<&mut StaticBody<F>> {
        self.get_mut(handle).and_then(PhysicsBody::as_static_mut)
    }

    fn live_mut(&mut self, handle: BodyHandle) -> Result<&mut PhysicsBody<F>, PhysicsError> {
        self.bodies.get_mut(handle).ok_or(PhysicsError::StaleHandle)
    }

    /// Static bodies have no velocity; for them this only validates the handle.
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2<F>) -> Result<(), PhysicsError> {
        if !velocity.is_finite() {
            return Err(ConfigurationError::NonFiniteVector.into());
        }
        if let PhysicsBody::Dynamic(body) = self.live_mut(handle)? {
            body.velocity = velocity;
        }
        Ok(())
    }

    /// Static bodies have no acceleration; for them this only validates the handle.
    pub fn set_acceleration(&mut self, handle: BodyHandle, acceleration: Vec2<F>) -> Result<(), PhysicsError> {
        if !acceleration.is_finite() {
            return Err(ConfigurationError::NonFiniteVector.into());
        }
        if let PhysicsBody::Dynamic(body) = self.live_mut(handle)? {
            body.acceleration = acceleration;
        }
        Ok(())
    }

    /// Takes effect from the next step.
    pub fn enable(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.live_mut(handle)?.set_enabled(true);
        Ok(())
    }

    /// Takes effect from the next step.
    pub fn disable(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.live_mut(handle)?.set_enabled(false);
        Ok(())
    }

    /// Move a body so that its bounds sit at `origin + offset`.
    pub fn set_owner_position(&mut self, handle: BodyHandle, origin: Vec2<F>) -> Result<(), PhysicsError> {
        match self.live_mut(handle)? {
            PhysicsBody::Dynamic(body) => body.set_owner_position(origin)?,
            PhysicsBody::Static(body) => body.set_owner_position(origin)?,
        }
        Ok(())
    }

    /// Owner origin implied by the body's current bounds.
    pub fn owner_position(&self, handle: BodyHandle) -> Option<Vec2<F>> {
        self.get(handle).map(|body| match body {
            PhysicsBody::Dynamic(b) => b.owner_position(),
            PhysicsBody::Static(s) => s.owner_position(),
        })
    }

    /// Every body in storage order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &PhysicsBody<F>)> + '_ {
        self.bodies.iter()
    }

    /// Number of dynamic bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.values().filter(|b| !b.is_static()).count()
    }

    pub fn static_body_count(&self) -> usize {
        self.bodies.values().filter(|b| b.is_static()).count()
    }

    /// Enabled bodies whose bounds intersect `rect`, in storage order.
    pub fn overlap_rect(&self, rect: Rect<F>) -> AllocVec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.enabled() && b.bounds().intersects(&rect))
            .map(|(h, _)| h)
            .collect()
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    pub fn create_group(&mut self, kind: BodyType) -> GroupHandle {
        self.groups.insert(Group::new(kind))
    }

    pub fn group(&self, handle: GroupHandle) -> Option<&Group> {
        self.groups.get(handle)
    }

    /// Returns `Ok(false)` when the body was already a member.
    pub fn add_to_group(&mut self, group: GroupHandle, body: BodyHandle) -> Result<bool, PhysicsError> {
        let kind = self.get(body).ok_or(PhysicsError::StaleHandle)?.body_type();
        let group = self.groups.get_mut(group).ok_or(PhysicsError::StaleHandle)?;
        if group.kind() != kind {
            return Err(PhysicsError::GroupKindMismatch);
        }
        Ok(group.insert(body))
    }

    /// Returns `Ok(false)` when the body was not a member.
    pub fn remove_from_group(&mut self, group: GroupHandle, body: BodyHandle) -> Result<bool, PhysicsError> {
        let group = self.groups.get_mut(group).ok_or(PhysicsError::StaleHandle)?;
        Ok(group.remove(body))
    }

    /// Remove a group and every collider that references it. Member bodies stay.
    pub fn remove_group(&mut self, handle: GroupHandle) -> Result<Group, PhysicsError> {
        let group = self.groups.remove(handle).ok_or(PhysicsError::StaleHandle)?;
        let target = ColliderObject::Group(handle);
        self.colliders.retain(|c| {
            let purge = c.references(target);
            if purge {
                log::debug!("purged collider {:?} after removing group {:?}", c.handle(), handle);
            }
            !purge
        });
        Ok(group)
    }

    // ------------------------------------------------------------------
    // Colliders
    // ------------------------------------------------------------------

    fn object_exists(&self, object: ColliderObject) -> bool {
        match object {
            ColliderObject::Body(h) => self.bodies.contains_key(h),
            ColliderObject::Group(g) => self.groups.contains_key(g),
        }
    }

    fn is_empty_group(&self, object: ColliderObject) -> bool {
        match object {
            ColliderObject::Group(g) => self.groups.get(g).map_or(true, Group::is_empty),
            ColliderObject::Body(_) => false,
        }
    }

    /// Register a collider. It is evaluated after every collider added before it.
    ///
    /// A collider between two empty groups has nothing to test and starts
    /// inactive; activate it with [`set_collider_active`](Self::set_collider_active)
    /// once the groups are populated.
    pub fn add_collider(&mut self, desc: ColliderDesc<F>) -> Result<ColliderHandle, PhysicsError> {
        if !self.object_exists(desc.object1) || !self.object_exists(desc.object2) {
            return Err(PhysicsError::StaleHandle);
        }
        let active = !(self.is_empty_group(desc.object1) && self.is_empty_group(desc.object2));
        let handle = ColliderHandle(self.next_collider);
        self.next_collider += 1;
        log::debug!(
            "added collider {:?} between {:?} and {:?} (overlap_only: {}, active: {})",
            handle,
            desc.object1,
            desc.object2,
            desc.overlap_only,
            active
        );
        self.colliders.push(Collider::new(handle, desc, active));
        Ok(handle)
    }

    /// Position of a collider in registration order. Handles are issued in
    /// increasing order and removal keeps the order, so the list stays sorted.
    fn collider_index(&self, handle: ColliderHandle) -> Option<usize> {
        self.colliders.binary_search_by_key(&handle, Collider::handle).ok()
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<(), PhysicsError> {
        let i = self.collider_index(handle).ok_or(PhysicsError::StaleHandle)?;
        self.colliders.remove(i);
        log::debug!("removed collider {:?}", handle);
        Ok(())
    }

    /// An inactive collider is skipped entirely. Deactivating a collider from
    /// its own callback stops it for the rest of the step.
    pub fn set_collider_active(&mut self, handle: ColliderHandle, active: bool) -> Result<(), PhysicsError> {
        let i = self.collider_index(handle).ok_or(PhysicsError::StaleHandle)?;
        self.colliders[i].active = active;
        Ok(())
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider<F>> {
        self.collider_index(handle).map(|i| &self.colliders[i])
    }

    /// Colliders in registration order.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider<F>> + '_ {
        self.colliders.iter()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn members(&self, object: ColliderObject) -> Members {
        match object {
            ColliderObject::Body(h) if self.bodies.contains_key(h) => Members::One(h),
            ColliderObject::Body(_) => Members::Empty,
            ColliderObject::Group(g) => match self.groups.get(g) {
                Some(group) if !group.is_empty() => Members::Many(group.members().iter().copied().collect()),
                _ => Members::Empty,
            },
        }
    }

    fn member_list(&self, object: ColliderObject) -> AllocVec<BodyHandle> {
        match object {
            ColliderObject::Body(h) if self.bodies.contains_key(h) => {
                let mut list = AllocVec::with_capacity(1);
                list.push(h);
                list
            }
            ColliderObject::Body(_) => AllocVec::new(),
            ColliderObject::Group(g) => self.groups.get(g).map_or_else(AllocVec::new, |group| group.members().to_vec()),
        }
    }

    /// Separate every overlapping pair between two objects right now, outside
    /// the step. No callbacks fire and no events are queued. Returns whether
    /// any pair collided.
    pub fn collide_now(
        &mut self,
        object1: impl Into<ColliderObject>,
        object2: impl Into<ColliderObject>,
    ) -> Result<bool, PhysicsError> {
        self.check_now(object1.into(), object2.into(), false)
    }

    /// Like [`collide_now`](Self::collide_now) but only reports overlaps;
    /// positions and velocities are left untouched.
    pub fn overlap_now(
        &mut self,
        object1: impl Into<ColliderObject>,
        object2: impl Into<ColliderObject>,
    ) -> Result<bool, PhysicsError> {
        self.check_now(object1.into(), object2.into(), true)
    }

    fn check_now(
        &mut self,
        object1: ColliderObject,
        object2: ColliderObject,
        overlap_only: bool,
    ) -> Result<bool, PhysicsError> {
        if !self.object_exists(object1) || !self.object_exists(object2) {
            return Err(PhysicsError::StaleHandle);
        }
        let first = self.member_list(object1);
        let second = self.member_list(object2);
        let same = object1 == object2;

        let mut hit = false;
        for (i, &h1) in first.iter().enumerate() {
            let others = if same { &second[i + 1..] } else { &second[..] };
            for &h2 in others {
                let Some([a, b]) = self.bodies.get_disjoint_mut([h1, h2]) else {
                    continue;
                };
                if a.is_static() && b.is_static() {
                    continue;
                }
                let contact = if overlap_only {
                    separation::overlap(a, b)
                } else {
                    separation::separate(a, b)
                };
                hit |= contact.is_some();
            }
        }
        Ok(hit)
    }

    // ------------------------------------------------------------------
    // World settings
    // ------------------------------------------------------------------

    pub fn set_bounds(&mut self, x: F, y: F, width: F, height: F) -> Result<(), PhysicsError> {
        let bounds = Rect::new(x, y, width, height);
        validate_world_bounds(&bounds)?;
        self.config.bounds = bounds;
        self.index.set_bounds(bounds);
        Ok(())
    }

    /// Which world edges stop bodies that collide with world bounds.
    pub fn set_bounds_collision(&mut self, sides: Sides) {
        self.config.bounds_collision = sides;
    }

    pub fn set_gravity(&mut self, x: F, y: F) -> Result<(), PhysicsError> {
        let gravity = Vec2::new(x, y);
        if !gravity.is_finite() {
            return Err(ConfigurationError::NonFiniteVector.into());
        }
        self.config.gravity = gravity;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Queued events, oldest first.
    pub fn events(&self) -> &[PhysicsEvent<F>] {
        &self.events
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = PhysicsEvent<F>> + '_ {
        self.events.drain(..)
    }

    fn record(&mut self, event: PhysicsEvent<F>) {
        if self.config.record_events {
            self.events.push(event);
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Stop `update` from advancing. Explicit `step` calls still run.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool { self.paused }

    /// Unsimulated time carried over to the next `update`.
    pub fn accumulator(&self) -> F { self.accumulator }

    /// Advance by a frame's worth of time.
    ///
    /// With a fixed step, `delta` is accumulated and as many `1 / fps` steps
    /// as fit are run; the remainder carries over. Otherwise exactly one step
    /// of `delta` runs. Returns the number of steps taken; a paused world
    /// takes none and leaves the accumulator alone.
    pub fn update(&mut self, delta: F) -> Result<usize, PhysicsError> {
        self.update_observed(delta, &mut NoOpStepObserver)
    }

    /// [`update`](Self::update) reporting every sub-step to `observer`.
    pub fn update_observed<O: StepObserver>(&mut self, delta: F, observer: &mut O) -> Result<usize, PhysicsError> {
        self.guard_reentrancy()?;
        validate_delta(delta)?;
        if self.paused {
            return Ok(0);
        }
        if !self.config.fixed_step {
            self.step_observed(delta, observer)?;
            return Ok(1);
        }

        let step = self.config.step_size();
        self.accumulator = self.accumulator + delta;
        let mut steps = 0;
        while self.accumulator >= step {
            self.accumulator = self.accumulator - step;
            self.step_observed(step, observer)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Run exactly one step of `dt` seconds, paused or not.
    pub fn step(&mut self, dt: F) -> Result<StepReport, PhysicsError> {
        self.step_observed(dt, &mut NoOpStepObserver)
    }

    /// [`step`](Self::step) with an observer.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<StepReport, PhysicsError> {
        self.guard_reentrancy()?;
        validate_delta(dt)?;

        self.stepping = true;
        let report = self.run_step(dt, observer);
        self.stepping = false;

        log::trace!(
            "step dt={}: {} integrated, {} candidates, {} tested, {} collisions, {} overlaps",
            dt,
            report.integrated,
            report.candidate_pairs,
            report.pairs_tested,
            report.collisions,
            report.overlaps
        );
        observer.on_step_complete(&report);
        Ok(report)
    }

    fn guard_reentrancy(&self) -> Result<(), PhysicsError> {
        if self.stepping {
            log::warn!("rejected a step requested from inside a step");
            return Err(PhysicsError::Reentrancy);
        }
        Ok(())
    }

    fn run_step<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> StepReport {
        let mut report = StepReport::default();

        for body in self.bodies.values_mut() {
            body.begin_step();
        }

        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            if let PhysicsBody::Dynamic(b) = body {
                let enabled = b.enabled;
                if b.integrate(dt, gravity) {
                    report.clamped_velocities += 1;
                }
                if enabled {
                    report.integrated += 1;
                }
            }
        }
        observer.on_integrate(report.integrated);

        self.clamp_to_world(&mut report);

        self.index.rebuild(&self.bodies);
        report.candidate_pairs = self.index.pairs().len();
        observer.on_broad_phase(report.candidate_pairs);

        let pairs = self.index.take_pairs();
        let order: AllocVec<ColliderHandle> = self.colliders.iter().map(Collider::handle).collect();
        for handle in order {
            self.run_collider(handle, &pairs, &mut report, observer);
        }
        self.index.restore_pairs(pairs);

        report
    }

    fn clamp_to_world(&mut self, report: &mut StepReport) {
        let bounds = self.config.bounds;
        let edges = self.config.bounds_collision;
        let mut hits = AllocVec::new();
        for (handle, body) in self.bodies.iter_mut() {
            if let PhysicsBody::Dynamic(b) = body {
                let hit = b.clamp_to_bounds(&bounds, edges);
                if hit.any() {
                    report.world_bounds_hits += 1;
                    if b.on_world_bounds {
                        hits.push(PhysicsEvent::WorldBounds {
                            body: handle,
                            owner: b.owner(),
                            edges: hit,
                        });
                    }
                }
            }
        }
        for event in hits {
            self.record(event);
        }
    }

    fn is_live_and_active(&self, handle: ColliderHandle) -> bool {
        self.collider(handle).is_some_and(Collider::active)
    }

    fn run_collider<O: StepObserver>(
        &mut self,
        handle: ColliderHandle,
        pairs: &[CandidatePair],
        report: &mut StepReport,
        observer: &mut O,
    ) {
        let (object1, object2, overlap_only, same) = match self.collider(handle) {
            Some(c) if c.active() => (c.object1(), c.object2(), c.overlap_only(), c.is_self_collision()),
            _ => return,
        };
        let side1 = self.members(object1);
        let side2 = if same { side1.clone() } else { self.members(object2) };
        if matches!(side1, Members::Empty) || matches!(side2, Members::Empty) {
            return;
        }

        for pair in pairs {
            // callbacks may have removed or deactivated this collider
            if !self.is_live_and_active(handle) {
                return;
            }
            if let Some((h1, h2)) = orient(pair.a, pair.b, &side1, &side2) {
                self.resolve_pair(handle, h1, h2, overlap_only, report, observer);
            }
        }
    }

    fn resolve_pair<O: StepObserver>(
        &mut self,
        handle: ColliderHandle,
        h1: BodyHandle,
        h2: BodyHandle,
        overlap_only: bool,
        report: &mut StepReport,
        observer: &mut O,
    ) {
        // bodies removed by an earlier callback are skipped
        if !self.bodies.contains_key(h1) || !self.bodies.contains_key(h2) {
            return;
        }
        report.pairs_tested += 1;
        observer.on_pair_tested(h1, h2);

        let (Some(a), Some(b)) = (self.bodies.get(h1), self.bodies.get(h2)) else {
            return;
        };
        if !separation::intersects(a, b) {
            return;
        }
        if !self.allow_pair(handle, h1, h2) {
            return;
        }

        let Some([a, b]) = self.bodies.get_disjoint_mut([h1, h2]) else {
            return;
        };
        let contact = if overlap_only {
            separation::overlap(a, b)
        } else {
            separation::separate(a, b)
        };
        let Some(contact) = contact else {
            return;
        };

        let collision = Collision {
            body1: h1,
            body2: h2,
            touching1: contact.touching1,
            touching2: contact.touching2,
            overlap: contact.overlap,
            overlap_only,
        };
        if overlap_only {
            report.overlaps += 1;
            self.record(PhysicsEvent::Overlap(collision));
        } else {
            report.collisions += 1;
            self.record(PhysicsEvent::Collide(collision));
        }
        self.fire_collide(handle, &collision);
    }

    /// Ask the collider's process callback about a pair. The callback is
    /// taken out of the collider while it runs so it can borrow the world.
    fn allow_pair(&mut self, handle: ColliderHandle, h1: BodyHandle, h2: BodyHandle) -> bool {
        let Some(i) = self.collider_index(handle) else {
            return false;
        };
        let Some(mut process) = self.colliders[i].process.take() else {
            return true;
        };
        let allowed = process(&*self, h1, h2);
        if let Some(i) = self.collider_index(handle) {
            self.colliders[i].process = Some(process);
        }
        allowed
    }

    fn fire_collide(&mut self, handle: ColliderHandle, collision: &Collision<F>) {
        let Some(i) = self.collider_index(handle) else {
            return;
        };
        let Some(mut callback) = self.colliders[i].on_collide.take() else {
            return;
        };
        callback(self, collision);
        // the callback may have removed its own collider
        if let Some(i) = self.collider_index(handle) {
            self.colliders[i].on_collide = Some(callback);
        }
    }
}

fn validate_delta<F: Float>(delta: F) -> Result<(), PhysicsError> {
    if !(delta.is_finite() && delta >= F::zero()) {
        return Err(ConfigurationError::InvalidTimeStep.into());
    }
    Ok(())
}
