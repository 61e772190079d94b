//! Top-level entry point: wires shape validation, functor construction,
//! the optional A* heuristic, the lifted search, and result projection
//! into one call.

use std::time::Instant;

use tracing::{debug, info};

use crate::connectivity::Connectivity;
use crate::cost::build_functors;
use crate::errors::Error;
use crate::grid::{Grid, Shape, VoxelPoint};
use crate::heuristic::voxel_distance_to_end;
use crate::lifted::{self, LiftedSuccessors};
use crate::projection::{path_from_parents, path_to_points, project_visited};
use crate::regularization::RegularizationCache;
use crate::search::{shortest_path, SearchOptions};
use crate::settings::Settings;

/// Mesh-map voxel tags: 0 is free, 2 marks a start cell, 3 marks an end cell.
pub const TAG_FREE: u8 = 0;
pub const TAG_START: u8 = 2;
pub const TAG_END: u8 = 3;

pub struct SegmentationOutput {
    pub cost: f64,
    pub path: Vec<VoxelPoint>,
    pub evaluations: usize,
    pub elapsed: std::time::Duration,
    /// Per-voxel earliest settling time, present iff `settings.store_visited`.
    pub visited: Option<Vec<i64>>,
    /// Per-voxel predecessor (as a linear index, `-1` for none), present
    /// iff `settings.store_parents`. This is the voxel-grid projection of
    /// settled lifted nodes, distinct from the lifted-graph parent
    /// pointers used internally to reconstruct `path`.
    pub parents: Option<Vec<i64>>,
    pub distances: Option<Vec<f64>>,
}

fn validate_shapes(data: &Grid<f64>, mesh_map: &Grid<u8>) -> Result<(), Error> {
    if data.shape != mesh_map.shape {
        return Err(Error::ShapeMismatch {
            what: "data/mesh_map",
            detail: format!(
                "data shape {:?} does not match mesh_map shape {:?}",
                data.shape, mesh_map.shape
            ),
        });
    }
    Ok(())
}

fn tagged_voxels(mesh_map: &Grid<u8>, tag: u8) -> Vec<usize> {
    mesh_map
        .as_slice()
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| (v == tag).then_some(i))
        .collect()
}

/// Finds the minimum-cost curve through `data` from the mesh map's start
/// voxels (tag [`TAG_START`], plus `settings.extra_start_points`) to its
/// end voxels (tag [`TAG_END`], plus `settings.extra_end_points`).
pub fn segment(
    problem_type: &str,
    data: &Grid<f64>,
    mesh_map: &Grid<u8>,
    connectivity: &Connectivity,
    settings: &Settings,
) -> Result<SegmentationOutput, Error> {
    validate_shapes(data, mesh_map)?;
    let shape: Shape = data.shape;
    let k = connectivity.k();

    let mut start_roots = tagged_voxels(mesh_map, TAG_START);
    for p in &settings.extra_start_points {
        if !shape.valid_point(*p) {
            return Err(Error::ShapeMismatch {
                what: "extra_start_points",
                detail: format!("{p:?} lies outside the grid"),
            });
        }
        start_roots.push(shape.sub2ind(*p));
    }
    let mut end_voxels = tagged_voxels(mesh_map, TAG_END);
    for p in &settings.extra_end_points {
        if !shape.valid_point(*p) {
            return Err(Error::ShapeMismatch {
                what: "extra_end_points",
                detail: format!("{p:?} lies outside the grid"),
            });
        }
        end_voxels.push(shape.sub2ind(*p));
    }
    info!(
        starts = start_roots.len(),
        ends = end_voxels.len(),
        problem_type,
        "starting segmentation"
    );

    let functors = build_functors(problem_type, data, settings.voxel_dimensions, settings)?;
    let cache = RegularizationCache::new(&functors, settings);

    let use_heuristic = settings.use_a_star && !settings.store_parents;
    let heuristic_start = Instant::now();
    let voxel_heuristic = if use_heuristic {
        Some(voxel_distance_to_end(
            shape,
            connectivity,
            &functors,
            settings,
            &end_voxels,
        ))
    } else {
        None
    };
    if use_heuristic {
        debug!(elapsed = ?heuristic_start.elapsed(), "voxel heuristic precomputed");
    }

    let num_lifted = lifted::num_lifted_nodes(shape.num_cells(), k);
    let super_source_id = lifted::super_source(shape.num_cells(), k);
    let num_nodes = num_lifted + 1;

    // Lift the per-voxel heuristic onto lifted nodes via p3, the
    // edge-pair's last point: the admissible lower bound for `(p1,p2,p3)`
    // is the unlifted distance from p3 to the end set, not from the root
    // p1. A node whose p3 doesn't even land on a valid voxel is never
    // actually produced by `LiftedSuccessors`, so its heuristic value is
    // never read; `f64::INFINITY` is a harmless placeholder.
    let lifted_heuristic: Option<Vec<f64>> = voxel_heuristic.as_ref().map(|h| {
        let mut out = vec![0.0; num_nodes];
        for node in 0..num_lifted {
            let (root, e1, e2) = lifted::decode(node, k);
            let p = shape.ind2sub(root);
            let (x1, y1, z1) = p.offset(connectivity.offset(e1));
            out[node] = if !shape.valid(x1, y1, z1) {
                f64::INFINITY
            } else {
                let q = VoxelPoint::new(x1 as usize, y1 as usize, z1 as usize);
                let (x2, y2, z2) = q.offset(connectivity.offset(e2));
                if !shape.valid(x2, y2, z2) {
                    f64::INFINITY
                } else {
                    let r_ind = shape.sub2ind(VoxelPoint::new(x2 as usize, y2 as usize, z2 as usize));
                    h[r_ind]
                }
            };
        }
        out
    });

    let successors = LiftedSuccessors::new(shape, connectivity, &functors, &cache, settings, &start_roots);

    let is_end_voxel = |v: usize| end_voxels.contains(&v);
    let is_sink = |node: usize| -> bool {
        if node >= num_lifted {
            return false;
        }
        let (root, e1, e2) = lifted::decode(node, k);
        let p = shape.ind2sub(root);
        let (x1, y1, z1) = p.offset(connectivity.offset(e1));
        if !shape.valid(x1, y1, z1) {
            return false;
        }
        let q = VoxelPoint::new(x1 as usize, y1 as usize, z1 as usize);
        let (x2, y2, z2) = q.offset(connectivity.offset(e2));
        if !shape.valid(x2, y2, z2) {
            return false;
        }
        is_end_voxel(shape.sub2ind(VoxelPoint::new(x2 as usize, y2 as usize, z2 as usize)))
    };

    // `store_parents` is always requested internally: the returned `path`
    // is reconstructed by walking lifted-graph parent pointers from the
    // settled sink back to the super-source, regardless of whether the
    // caller also wants the projected voxel-grid parent output. The
    // caller's request for that voxel-grid output also forces
    // `store_visited` on, since the grid projection breaks ties by
    // settling time.
    let options = SearchOptions {
        store_visited: settings.store_visited || settings.store_parents,
        store_parents: true,
        compute_all_distances: settings.store_distances,
    };

    let search_start = Instant::now();
    let result = shortest_path(
        num_nodes,
        &[(super_source_id, 0.0)],
        &is_sink,
        &successors,
        lifted_heuristic.as_deref(),
        &options,
    );
    let elapsed = search_start.elapsed();
    info!(cost = result.cost, elapsed = ?elapsed, "segmentation search finished");

    let path = match result.sink {
        Some(sink) => {
            let parents = result
                .parents
                .as_ref()
                .expect("store_parents is always requested internally");
            let node_path = path_from_parents(sink, super_source_id, parents);
            path_to_points(&shape, connectivity, &node_path)?
        }
        None => Vec::new(),
    };

    let (visited_grid, parents_grid) = match &result.visit_time {
        Some(vt) => {
            let (by_voxel, parents) =
                project_visited(&shape, connectivity, k, vt, num_lifted, settings.store_parents);
            (settings.store_visited.then_some(by_voxel), parents)
        }
        None => (None, None),
    };

    Ok(SegmentationOutput {
        cost: result.cost,
        path,
        evaluations: successors.evaluations() as usize,
        elapsed,
        visited: visited_grid,
        parents: parents_grid,
        distances: result.distances,
    })
}
