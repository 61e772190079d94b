//! Query configuration.

use serde::{Deserialize, Serialize};

use crate::grid::VoxelPoint;

fn default_voxel_dimensions() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_power() -> f64 {
    1.0
}

/// Every recognized option from the host interface, plus the extra
/// start/end point sets. `regularization_radius` is accepted and carried
/// for forward compatibility but read by no code path in this crate (no
/// semantics are invented for it).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub voxel_dimensions: [f64; 3],
    pub length_penalty: f64,
    pub curvature_penalty: f64,
    pub curvature_power: f64,
    pub torsion_penalty: f64,
    pub torsion_power: f64,
    pub use_a_star: bool,
    pub store_parents: bool,
    pub store_distances: bool,
    pub store_visited: bool,
    pub regularization_radius: Option<f64>,
    pub extra_start_points: Vec<VoxelPoint>,
    pub extra_end_points: Vec<VoxelPoint>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voxel_dimensions: default_voxel_dimensions(),
            length_penalty: 0.0,
            curvature_penalty: 0.0,
            curvature_power: default_power(),
            torsion_penalty: 0.0,
            torsion_power: default_power(),
            use_a_star: false,
            store_parents: false,
            store_distances: false,
            store_visited: false,
            regularization_radius: None,
            extra_start_points: Vec::new(),
            extra_end_points: Vec::new(),
        }
    }
}

impl Settings {
    /// A weight of 0 or below zeros the corresponding term.
    #[inline]
    pub fn length_active(&self) -> bool {
        self.length_penalty > 0.0
    }

    #[inline]
    pub fn curvature_active(&self) -> bool {
        self.curvature_penalty > 0.0
    }

    #[inline]
    pub fn torsion_active(&self) -> bool {
        self.torsion_penalty > 0.0
    }
}
