//! A* admissible heuristic: a separate, unlifted voxel-graph search using
//! only data and length costs (no curvature, no torsion; both would only
//! make a true lower bound smaller, so dropping them keeps the heuristic
//! admissible), with the start and end sets swapped.
//!
//! Swapping start and end turns "distance to the nearest end voxel" into
//! "distance from the nearest end voxel", computed once for every voxel
//! via a single `compute_all_distances` search, which is exactly the
//! lower bound the lifted search needs at every voxel it might visit.
//! Only worth the extra search when parents aren't being recorded, since
//! this heuristic doesn't know how to produce a matching path.

use crate::connectivity::Connectivity;
use crate::cost::{weighted, CostFunctors};
use crate::grid::{Shape, VoxelPoint};
use crate::search::{shortest_path, SearchOptions, Successors};
use crate::settings::Settings;

struct VoxelSuccessors<'d, 'f> {
    shape: Shape,
    connectivity: &'f Connectivity,
    functors: &'f CostFunctors<'d>,
    length_penalty: f64,
}

impl<'d, 'f> Successors for VoxelSuccessors<'d, 'f> {
    fn successors(&self, node: usize, _cost_so_far: f64, visit: &mut dyn FnMut(usize, f64)) {
        let p = self.shape.ind2sub(node);
        for (_e, offset) in self.connectivity.iter() {
            let (x, y, z) = p.offset(offset);
            if !self.shape.valid(x, y, z) {
                continue;
            }
            let q = VoxelPoint::new(x as usize, y as usize, z as usize);
            let cost = self.functors.data.raw(p, q)
                + weighted(self.length_penalty, self.functors.length.raw(p, q));
            visit(self.shape.sub2ind(q), cost);
        }
    }
}

/// Per-voxel lower bound on the remaining cost to the end set, computed
/// by running the plain (unlifted) voxel search backward from the end
/// set. Unreachable voxels get `f64::INFINITY`, which simply disables the
/// heuristic there and falls back to plain Dijkstra behavior locally.
pub fn voxel_distance_to_end(
    shape: Shape,
    connectivity: &Connectivity,
    functors: &CostFunctors<'_>,
    settings: &Settings,
    end_voxels: &[usize],
) -> Vec<f64> {
    let successors = VoxelSuccessors {
        shape,
        connectivity,
        functors,
        length_penalty: settings.length_penalty,
    };
    let sources: Vec<(usize, f64)> = end_voxels.iter().map(|&v| (v, 0.0)).collect();
    let options = SearchOptions {
        compute_all_distances: true,
        ..Default::default()
    };
    let result = shortest_path(shape.num_cells(), &sources, &|_| false, &successors, None, &options);
    result.distances.expect("compute_all_distances was requested")
}
