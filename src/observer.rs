//! Step observer trait for monitoring physics simulation progress.

use crate::physics_body::BodyHandle;

/// Counters describing one completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Dynamic bodies integrated.
    pub integrated: usize,
    /// Bodies whose non-finite velocity was clamped.
    pub clamped_velocities: usize,
    /// Bodies pushed back inside the world bounds.
    pub world_bounds_hits: usize,
    /// Pairs produced by the broad phase.
    pub candidate_pairs: usize,
    /// Candidate pairs that matched a collider and reached the narrow phase.
    pub pairs_tested: usize,
    /// Pairs separated by a colliding collider.
    pub collisions: usize,
    /// Pairs reported by an overlap-only collider.
    pub overlaps: usize,
}

/// Trait for observing physics simulation steps.
///
/// Implement this trait to monitor a step (e.g., for debugging, visualization,
/// or performance profiling). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after every enabled dynamic body has been integrated.
    fn on_integrate(&mut self, _bodies: usize) {}

    /// Called after the broad phase rebuilt its candidate list.
    fn on_broad_phase(&mut self, _candidates: usize) {}

    /// Called for each candidate pair a collider hands to the narrow phase.
    fn on_pair_tested(&mut self, _body1: BodyHandle, _body2: BodyHandle) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self, _report: &StepReport) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
