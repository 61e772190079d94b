//! The lifted graph G*: a graph over edge-pairs rather than voxels, so
//! curvature (needs 3 points) and torsion (needs 4 points) can be scored
//! on an ordinary edge of *some* graph, at the cost of one extra
//! dimension of state.
//!
//! A lifted node encodes `(root, e1, e2)`: `root` is the voxel the triple
//! starts from, `e1`/`e2` are connectivity-template indices for its first
//! and second step. One additional sentinel id, one past the last encoded
//! node, is the super-source: a single node with an edge to every lifted
//! node whose `root` lies in the start set, carrying the one-time
//! bootstrap cost of the first two steps (data + length + curvature;
//! torsion needs a fourth point no super-source edge has).

use std::cell::Cell;

use crate::connectivity::Connectivity;
use crate::cost::CostFunctors;
use crate::grid::{Shape, VoxelPoint};
use crate::regularization::RegularizationCache;
use crate::search::Successors;
use crate::settings::Settings;

/// Encodes `(root, e1, e2)` as `root*K^2 + e1*K + e2`.
#[inline]
pub fn encode(root: usize, e1: usize, e2: usize, k: usize) -> usize {
    (root * k + e1) * k + e2
}

/// Inverse of [`encode`].
#[inline]
pub fn decode(node: usize, k: usize) -> (usize, usize, usize) {
    let e2 = node % k;
    let rem = node / k;
    let e1 = rem % k;
    let root = rem / k;
    (root, e1, e2)
}

#[inline]
pub fn num_lifted_nodes(num_voxels: usize, k: usize) -> usize {
    num_voxels * k * k
}

/// One past the last encoded lifted node id.
#[inline]
pub fn super_source(num_voxels: usize, k: usize) -> usize {
    num_lifted_nodes(num_voxels, k)
}

fn step(shape: &Shape, p: VoxelPoint, offset: [i32; 3]) -> Option<VoxelPoint> {
    let (x, y, z) = p.offset(offset);
    if !shape.valid(x, y, z) {
        return None;
    }
    Some(VoxelPoint::new(x as usize, y as usize, z as usize))
}

fn is_reversal(a: [i32; 3], b: [i32; 3]) -> bool {
    a[0] == -b[0] && a[1] == -b[1] && a[2] == -b[2]
}

/// Adapts the cost functors and regularization cache into the lifted
/// graph's [`Successors`] implementation.
pub struct LiftedSuccessors<'d, 'f, 'c> {
    pub shape: Shape,
    pub connectivity: &'f Connectivity,
    pub functors: &'f CostFunctors<'d>,
    pub cache: &'c RegularizationCache<'d, 'f>,
    pub settings: &'f Settings,
    pub start_roots: &'f [usize],
    /// Counts individual successor-edge cost evaluations: once per
    /// continuation actually scored, from the super-source's lifted start
    /// edges or from a lifted node's `e3` continuations.
    evaluations: Cell<u64>,
}

impl<'d, 'f, 'c> LiftedSuccessors<'d, 'f, 'c> {
    pub fn new(
        shape: Shape,
        connectivity: &'f Connectivity,
        functors: &'f CostFunctors<'d>,
        cache: &'c RegularizationCache<'d, 'f>,
        settings: &'f Settings,
        start_roots: &'f [usize],
    ) -> Self {
        Self {
            shape,
            connectivity,
            functors,
            cache,
            settings,
            start_roots,
            evaluations: Cell::new(0),
        }
    }

    fn k(&self) -> usize {
        self.connectivity.k()
    }

    fn num_voxels(&self) -> usize {
        self.shape.num_cells()
    }

    fn super_source_id(&self) -> usize {
        super_source(self.num_voxels(), self.k())
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    #[inline]
    fn tick(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
    }
}

impl<'d, 'f, 'c> Successors for LiftedSuccessors<'d, 'f, 'c> {
    fn successors(&self, node: usize, _cost_so_far: f64, visit: &mut dyn FnMut(usize, f64)) {
        let k = self.k();

        if node == self.super_source_id() {
            for &root in self.start_roots {
                let p = self.shape.ind2sub(root);
                for (e1, off1) in self.connectivity.iter() {
                    let Some(q) = step(&self.shape, p, off1) else {
                        continue;
                    };
                    for (e2, off2) in self.connectivity.iter() {
                        let Some(r) = step(&self.shape, q, off2) else {
                            continue;
                        };
                        self.tick();
                        let data = self.functors.data.raw(p, q) + self.functors.data.raw(q, r);
                        let length = crate::cost::weighted(
                            self.settings.length_penalty,
                            self.functors.length.raw(p, q),
                        ) + crate::cost::weighted(
                            self.settings.length_penalty,
                            self.functors.length.raw(q, r),
                        );
                        let curvature = crate::cost::weighted(
                            self.settings.curvature_penalty,
                            self.functors.curvature.raw(p, q, r),
                        );
                        let lifted = encode(root, e1, e2, k);
                        visit(lifted, data + length + curvature);
                    }
                }
            }
            return;
        }

        let (root, e1, e2) = decode(node, k);
        let p = self.shape.ind2sub(root);
        let off1 = self.connectivity.offset(e1);
        let off2 = self.connectivity.offset(e2);
        let Some(q) = step(&self.shape, p, off1) else {
            return;
        };
        let Some(r) = step(&self.shape, q, off2) else {
            return;
        };

        for (e3, off3) in self.connectivity.iter() {
            if is_reversal(off2, off3) {
                continue;
            }
            let Some(s) = step(&self.shape, r, off3) else {
                continue;
            };
            self.tick();
            let data = self.functors.data.raw(r, s);
            let regularization = self.cache.combined(
                (e1, e2, e3),
                off1,
                off2,
                off3,
                p,
                q,
                r,
                s,
            );
            let next = encode(self.shape.sub2ind(q), e2, e3, k);
            visit(next, data + regularization);
        }
    }
}
