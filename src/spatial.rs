//! Uniform-grid broad phase.
//!
//! The grid covers the world bounds and is rebuilt from scratch every step.
//! Bodies are inserted into every cell their bounds touch; each cell then
//! emits its co-resident pairs and a seen-pair set drops the duplicates that
//! come from bodies sharing more than one cell.

use crate::float::Float;
use crate::physics_body::{BodyHandle, BodySet};
use crate::rect::Rect;
use alloc::vec::Vec as AllocVec;
use hashbrown::HashSet;

/// Upper bound on the number of grid cells; the cell size grows to respect it.
pub const MAX_CELLS: usize = 1 << 16;

/// Cell size used when there is nothing to average.
const FALLBACK_CELL_SIZE: f32 = 64.0;

/// Two bodies whose bounds share at least one cell.
///
/// Dynamic bodies are inserted before static ones, so when a pair mixes the
/// two kinds the static body is always `b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

#[derive(Copy, Clone, Debug)]
struct Entry<F: Float> {
    handle: BodyHandle,
    bounds: Rect<F>,
    is_static: bool,
}

/// Broad-phase grid producing de-duplicated candidate pairs.
pub struct SpatialIndex<F: Float> {
    bounds: Rect<F>,
    configured_cell: Option<F>,
    cell_size: F,
    cols: usize,
    rows: usize,
    cells: AllocVec<AllocVec<u32>>,
    entries: AllocVec<Entry<F>>,
    seen: HashSet<(u32, u32)>,
    pairs: AllocVec<CandidatePair>,
}

impl<F: Float> SpatialIndex<F> {
    /// `cell_size` of `None` derives the size from the bodies on each rebuild.
    pub fn new(bounds: Rect<F>, cell_size: Option<F>) -> Self {
        SpatialIndex {
            bounds,
            configured_cell: cell_size,
            cell_size: cell_size.unwrap_or_else(|| F::from_f32(FALLBACK_CELL_SIZE)),
            cols: 0,
            rows: 0,
            cells: AllocVec::new(),
            entries: AllocVec::new(),
            seen: HashSet::new(),
            pairs: AllocVec::new(),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect<F>) {
        self.bounds = bounds;
    }

    /// Cell size used by the last rebuild.
    pub fn cell_size(&self) -> F { self.cell_size }

    /// Grid dimensions `(cols, rows)` of the last rebuild.
    pub fn dimensions(&self) -> (usize, usize) { (self.cols, self.rows) }

    /// Number of bodies inserted by the last rebuild.
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Candidate pairs in discovery order.
    pub fn pairs(&self) -> &[CandidatePair] { &self.pairs }

    pub(crate) fn take_pairs(&mut self) -> AllocVec<CandidatePair> {
        core::mem::take(&mut self.pairs)
    }

    /// Hand the pair buffer back so its allocation is reused next step.
    pub(crate) fn restore_pairs(&mut self, mut pairs: AllocVec<CandidatePair>) {
        pairs.clear();
        self.pairs = pairs;
    }

    /// Rebuild the grid and the candidate list from every collidable body.
    pub(crate) fn rebuild(&mut self, bodies: &BodySet<F>) {
        self.entries.clear();
        for want_static in [false, true] {
            for (handle, body) in bodies.iter() {
                if body.is_static() != want_static || !body.is_collidable() {
                    continue;
                }
                self.entries.push(Entry {
                    handle,
                    bounds: body.bounds(),
                    is_static: want_static,
                });
            }
        }

        self.layout();
        self.fill_cells();
        self.collect_pairs();
    }

    fn layout(&mut self) {
        let mut cell = match self.configured_cell {
            Some(size) => size,
            None => self.average_cell_size(),
        };
        let (mut cols, mut rows) = self.grid_for(cell);
        while cols.saturating_mul(rows) > MAX_CELLS {
            cell = cell * F::two();
            let (c, r) = self.grid_for(cell);
            cols = c;
            rows = r;
        }
        self.cell_size = cell;
        self.cols = cols;
        self.rows = rows;

        let count = cols * rows;
        self.cells.truncate(count);
        for bucket in self.cells.iter_mut() {
            bucket.clear();
        }
        self.cells.resize_with(count, AllocVec::new);
    }

    /// Twice the mean of each body's larger dimension.
    fn average_cell_size(&self) -> F {
        if self.entries.is_empty() {
            return F::from_f32(FALLBACK_CELL_SIZE);
        }
        let mut total = F::zero();
        for e in &self.entries {
            total = total + e.bounds.width.max(e.bounds.height);
        }
        let mean = total / F::from_usize(self.entries.len());
        if mean.is_finite() && mean > F::zero() {
            mean * F::two()
        } else {
            F::from_f32(FALLBACK_CELL_SIZE)
        }
    }

    fn grid_for(&self, cell: F) -> (usize, usize) {
        let span = |extent: F| -> usize {
            let n = (extent / cell).ceil().to_i64();
            if n < 1 { 1 } else { n as usize }
        };
        (span(self.bounds.width), span(self.bounds.height))
    }

    /// Grid coordinate of `value` along one axis, clamped into the grid.
    fn coord(&self, value: F, origin: F, cells: usize) -> usize {
        let raw = ((value - origin) / self.cell_size).floor().to_i64();
        raw.clamp(0, cells as i64 - 1) as usize
    }

    fn fill_cells(&mut self) {
        for (i, e) in self.entries.iter().enumerate() {
            let x0 = self.coord(e.bounds.left(), self.bounds.x, self.cols);
            let x1 = self.coord(e.bounds.right(), self.bounds.x, self.cols);
            let y0 = self.coord(e.bounds.top(), self.bounds.y, self.rows);
            let y1 = self.coord(e.bounds.bottom(), self.bounds.y, self.rows);
            for row in y0..=y1 {
                for col in x0..=x1 {
                    let idx = row * self.cols + col;
                    self.cells[idx].push(i as u32);
                }
            }
        }
    }

    fn collect_pairs(&mut self) {
        self.seen.clear();
        self.pairs.clear();
        for cell in &self.cells {
            for (n, &i) in cell.iter().enumerate() {
                for &j in &cell[n + 1..] {
                    let (a, b) = (&self.entries[i as usize], &self.entries[j as usize]);
                    if a.is_static && b.is_static {
                        continue;
                    }
                    if self.seen.insert((i, j)) {
                        self.pairs.push(CandidatePair { a: a.handle, b: b.handle });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, OwnerId};
    use crate::config::BodyConfig;
    use crate::physics_body::PhysicsBody;
    use crate::static_body::StaticBody;

    fn dynamic(x: f32, y: f32, w: f32, h: f32) -> PhysicsBody<f32> {
        let config = BodyConfig::new().with_rect(x, y, w, h);
        PhysicsBody::Dynamic(Body::new(OwnerId(0), &config).unwrap())
    }

    fn fixed(x: f32, y: f32, w: f32, h: f32) -> PhysicsBody<f32> {
        let config = BodyConfig::new().with_rect(x, y, w, h);
        PhysicsBody::Static(StaticBody::new(OwnerId(0), &config).unwrap())
    }

    #[test]
    fn far_apart_bodies_are_not_paired() {
        let mut bodies = BodySet::with_key();
        bodies.insert(dynamic(0.0, 0.0, 10.0, 10.0));
        bodies.insert(dynamic(500.0, 500.0, 10.0, 10.0));
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), Some(32.0));
        index.rebuild(&bodies);
        assert!(index.pairs().is_empty());
    }

    #[test]
    fn shared_cells_produce_one_pair() {
        let mut bodies = BodySet::with_key();
        // both span the same four cells
        let a = bodies.insert(dynamic(20.0, 20.0, 30.0, 30.0));
        let b = bodies.insert(dynamic(25.0, 25.0, 30.0, 30.0));
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), Some(32.0));
        index.rebuild(&bodies);
        assert_eq!(index.pairs(), &[CandidatePair { a, b }]);
    }

    #[test]
    fn static_pairs_are_skipped_and_static_comes_second() {
        let mut bodies = BodySet::with_key();
        let ground = bodies.insert(fixed(0.0, 0.0, 100.0, 10.0));
        bodies.insert(fixed(50.0, 0.0, 100.0, 10.0));
        let player = bodies.insert(dynamic(10.0, 0.0, 10.0, 10.0));
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), None);
        index.rebuild(&bodies);
        assert!(index.pairs().iter().all(|p| p.a == player));
        assert!(index.pairs().contains(&CandidatePair { a: player, b: ground }));
    }

    #[test]
    fn disabled_and_empty_bodies_are_excluded() {
        let mut bodies = BodySet::with_key();
        bodies.insert(dynamic(0.0, 0.0, 10.0, 10.0));
        bodies.insert(dynamic(0.0, 0.0, 0.0, 10.0));
        let mut off = dynamic(0.0, 0.0, 10.0, 10.0);
        off.set_enabled(false);
        bodies.insert(off);
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), None);
        index.rebuild(&bodies);
        assert_eq!(index.len(), 1);
        assert!(index.pairs().is_empty());
    }

    #[test]
    fn bodies_outside_bounds_still_pair() {
        let mut bodies = BodySet::with_key();
        bodies.insert(dynamic(-500.0, -500.0, 10.0, 10.0));
        bodies.insert(dynamic(-495.0, -495.0, 10.0, 10.0));
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), Some(16.0));
        index.rebuild(&bodies);
        assert_eq!(index.pairs().len(), 1);
    }

    #[test]
    fn auto_cell_size_follows_body_size() {
        let mut bodies = BodySet::with_key();
        bodies.insert(dynamic(0.0, 0.0, 10.0, 20.0));
        bodies.insert(dynamic(100.0, 0.0, 30.0, 5.0));
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 800.0, 600.0), None);
        index.rebuild(&bodies);
        assert_eq!(index.cell_size(), 50.0);
        assert_eq!(index.dimensions(), (16, 12));
    }

    #[test]
    fn huge_world_is_capped() {
        let bodies: BodySet<f64> = BodySet::with_key();
        let mut index = SpatialIndex::new(Rect::new(0.0, 0.0, 1.0e9, 1.0e9), Some(1.0));
        index.rebuild(&bodies);
        let (cols, rows) = index.dimensions();
        assert!(cols * rows <= MAX_CELLS);
    }
}
