//! `linear_interpolation` problem type: data cost is the trilinearly
//! interpolated data volume integrated along the edge, scaled by the
//! edge's physical length.

use nalgebra::Vector3;

use super::line_integral::LineIntegral;
use super::DataTerm;
use crate::grid::{Grid, VoxelPoint};

pub struct LinearInterpolationData<'d, I> {
    data: &'d Grid<f64>,
    voxel_dimensions: [f64; 3],
    integral: I,
}

impl<'d, I: LineIntegral> LinearInterpolationData<'d, I> {
    pub fn new(data: &'d Grid<f64>, voxel_dimensions: [f64; 3], integral: I) -> Self {
        Self {
            data,
            voxel_dimensions,
            integral,
        }
    }

    fn physical_length(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        let vd = self.voxel_dimensions;
        let a = Vector3::new(p.x as f64 * vd[0], p.y as f64 * vd[1], p.z as f64 * vd[2]);
        let b = Vector3::new(q.x as f64 * vd[0], q.y as f64 * vd[1], q.z as f64 * vd[2]);
        (b - a).norm()
    }
}

impl<'d, I: LineIntegral> DataTerm for LinearInterpolationData<'d, I> {
    fn data_dependent(&self) -> bool {
        true
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        self.integral.integrate(self.data, p, q) * self.physical_length(p, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::line_integral::DefaultLineIntegral;
    use crate::grid::Shape;

    #[test]
    fn uniform_data_scales_with_length() {
        let shape = Shape::new(4, 4, 4);
        let data = Grid::filled(shape, 2.0);
        let term = LinearInterpolationData::new(&data, [1.0, 1.0, 1.0], DefaultLineIntegral::default());
        let p = VoxelPoint::new(0, 0, 0);
        let q = VoxelPoint::new(1, 0, 0);
        assert!((term.raw(p, q) - 2.0).abs() < 1e-9);
    }
}
