//! `edge` problem type: data cost rewards following ridges/boundaries in
//! the data volume rather than integrating its raw magnitude.

use nalgebra::Vector3;

use super::line_integral::LineIntegral;
use super::DataTerm;
use crate::grid::{Grid, Shape, VoxelPoint};

/// Maps a raw data-volume sample (an edge-strength magnitude) to a cost
/// contribution. Pluggable so callers can swap in a different response
/// curve without touching the search; the exact response formula is host
/// policy, so this and [`DefaultEdgeResponse`] are a reasonable default.
pub trait EdgeResponse {
    fn response(&self, value: f64) -> f64;
}

/// `exp(-value)`: low cost where the edge response is strong, approaching
/// 1 (full cost) as it fades to 0. Monotonically decreasing and always
/// positive, so it never produces a negative edge weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEdgeResponse;

impl EdgeResponse for DefaultEdgeResponse {
    fn response(&self, value: f64) -> f64 {
        (-value).exp()
    }
}

pub struct EdgeDataCost {
    responded: Grid<f64>,
    voxel_dimensions: [f64; 3],
    integral: Box<dyn LineIntegral>,
}

impl EdgeDataCost {
    pub fn new<R: EdgeResponse, I: LineIntegral + 'static>(
        data: &Grid<f64>,
        voxel_dimensions: [f64; 3],
        response: R,
        integral: I,
    ) -> Self {
        let shape: Shape = data.shape;
        let responded_values: Vec<f64> = data.as_slice().iter().map(|v| response.response(*v)).collect();
        let responded = Grid::from_vec(shape, responded_values)
            .expect("transformed buffer matches the source grid's shape");
        Self {
            responded,
            voxel_dimensions,
            integral: Box::new(integral),
        }
    }

    fn physical_length(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        let vd = self.voxel_dimensions;
        let a = Vector3::new(p.x as f64 * vd[0], p.y as f64 * vd[1], p.z as f64 * vd[2]);
        let b = Vector3::new(q.x as f64 * vd[0], q.y as f64 * vd[1], q.z as f64 * vd[2]);
        (b - a).norm()
    }
}

impl DataTerm for EdgeDataCost {
    fn data_dependent(&self) -> bool {
        true
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        self.integral.integrate(&self.responded, p, q) * self.physical_length(p, q)
    }
}
