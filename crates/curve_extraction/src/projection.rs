//! Projects a lifted-graph search result back into a sequence of voxel
//! points.
//!
//! A lifted node names three points `(p, q, r)`; consecutive nodes on a
//! path share `(q, r)` of one with `(p, q)` of the next, so the point
//! sequence is the first node's `p, q` followed by every node's `r`.

use crate::connectivity::Connectivity;
use crate::errors::Error;
use crate::grid::{Shape, VoxelPoint};
use crate::lifted::decode;

pub(crate) fn node_points(shape: &Shape, connectivity: &Connectivity, node: usize, k: usize) -> (VoxelPoint, VoxelPoint, VoxelPoint) {
    let (root, e1, e2) = decode(node, k);
    let p = shape.ind2sub(root);
    let (x1, y1, z1) = p.offset(connectivity.offset(e1));
    let q = VoxelPoint::new(x1 as usize, y1 as usize, z1 as usize);
    let (x2, y2, z2) = q.offset(connectivity.offset(e2));
    let r = VoxelPoint::new(x2 as usize, y2 as usize, z2 as usize);
    (p, q, r)
}

/// Turns an explicit path of lifted node ids (super-source excluded) into
/// its voxel points.
pub fn path_to_points(
    shape: &Shape,
    connectivity: &Connectivity,
    path: &[usize],
) -> Result<Vec<VoxelPoint>, Error> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let k = connectivity.k();
    let mut points = Vec::with_capacity(path.len() + 2);
    let (p0, q0, r0) = node_points(shape, connectivity, path[0], k);
    points.push(p0);
    points.push(q0);
    points.push(r0);
    for &node in &path[1..] {
        let (_, _, r) = node_points(shape, connectivity, node, k);
        points.push(r);
    }
    Ok(points)
}

/// Reconstructs the path from a settled-parent table by walking backward
/// from `sink` to the super-source, then reversing. Returns the lifted
/// node ids, excluding the super-source itself.
pub fn path_from_parents(sink: usize, super_source: usize, parents: &[Option<usize>]) -> Vec<usize> {
    let mut path = Vec::new();
    let mut cur = Some(sink);
    while let Some(node) = cur {
        if node == super_source {
            break;
        }
        path.push(node);
        cur = parents[node];
    }
    path.reverse();
    path
}

/// Projects settling times into per-voxel visit times and, optionally, a
/// per-voxel parent pointer.
///
/// Each visited lifted node `(p1,p2,p3)` touches up to three voxels. A
/// voxel's visit time is the earliest time any lifted node touching it was
/// settled (smallest time wins on conflict). When `want_parents` is set, a
/// voxel `v` is given a parent the first time a lifted node reaches it as
/// its `p2` or `p3` at exactly that voxel's recorded visit time: `p2`'s
/// parent is `p1`, `p3`'s parent is `p2`. This reproduces the "first visit
/// wins" rule using the same settled order the search itself used.
pub fn project_visited(
    shape: &Shape,
    connectivity: &Connectivity,
    k: usize,
    visit_time: &[i64],
    num_lifted: usize,
    want_parents: bool,
) -> (Vec<i64>, Option<Vec<i64>>) {
    let num_voxels = shape.num_cells();
    let mut by_voxel = vec![-1i64; num_voxels];

    for node in 0..num_lifted {
        let t = visit_time[node];
        if t < 0 {
            continue;
        }
        let (p, q, r) = node_points(shape, connectivity, node, k);
        for v in [p, q, r] {
            if !shape.valid_point(v) {
                continue;
            }
            let idx = shape.sub2ind(v);
            if by_voxel[idx] < 0 || t < by_voxel[idx] {
                by_voxel[idx] = t;
            }
        }
    }

    let parents = if want_parents {
        let mut parent = vec![-1i64; num_voxels];
        for node in 0..num_lifted {
            let t = visit_time[node];
            if t < 0 {
                continue;
            }
            let (p, q, r) = node_points(shape, connectivity, node, k);
            if shape.valid_point(q) {
                let qi = shape.sub2ind(q);
                if by_voxel[qi] == t {
                    parent[qi] = shape.sub2ind(p) as i64;
                }
            }
            if shape.valid_point(r) {
                let ri = shape.sub2ind(r);
                if by_voxel[ri] == t {
                    parent[ri] = shape.sub2ind(q) as i64;
                }
            }
        }
        Some(parent)
    } else {
        None
    };

    (by_voxel, parents)
}
