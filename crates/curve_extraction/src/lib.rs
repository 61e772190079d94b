//! Minimum-cost curve extraction through a 3D voxel grid.
//!
//! Finds the cheapest path between tagged start and end voxels under a
//! cost model that can include data, length, curvature, and torsion
//! terms. Curvature and torsion need 3 and 4 consecutive points
//! respectively, so the search runs on a lifted graph of edge-pairs (see
//! [`lifted`]) rather than on the voxel grid directly.
//!
//! The top-level entry points are [`driver::segment`] and
//! [`metrics::curve_info`].

pub mod connectivity;
pub mod cost;
pub mod driver;
pub mod errors;
pub mod grid;
pub mod heuristic;
pub mod lifted;
pub mod metrics;
pub mod projection;
pub mod regularization;
pub mod search;
pub mod settings;

pub use connectivity::Connectivity;
pub use driver::{segment, SegmentationOutput};
pub use errors::Error;
pub use grid::{Grid, Shape, VoxelPoint};
pub use metrics::{curve_info, CurveInfo};
pub use settings::Settings;
