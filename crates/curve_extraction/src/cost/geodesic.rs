//! `geodesic` problem type: zero data cost, but length and curvature are
//! weighted by the data volume (an image-derived speed/metric field)
//! rather than being purely Euclidean. Torsion is not used by this
//! problem type (`ZeroTorsion` in [`super::euclidean`]).

use super::euclidean::EuclideanCurvature;
use super::line_integral::LineIntegral;
use super::{CurvatureTerm, LengthTerm};
use crate::grid::{Grid, VoxelPoint};

/// Euclidean length weighted by the data volume integrated along the edge.
pub struct GeodesicLength<'d, I> {
    data: &'d Grid<f64>,
    voxel_dimensions: [f64; 3],
    integral: I,
}

impl<'d, I: LineIntegral> GeodesicLength<'d, I> {
    pub fn new(data: &'d Grid<f64>, voxel_dimensions: [f64; 3], integral: I) -> Self {
        Self {
            data,
            voxel_dimensions,
            integral,
        }
    }

    fn euclidean_raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        let vd = self.voxel_dimensions;
        let a = nalgebra::Vector3::new(p.x as f64 * vd[0], p.y as f64 * vd[1], p.z as f64 * vd[2]);
        let b = nalgebra::Vector3::new(q.x as f64 * vd[0], q.y as f64 * vd[1], q.z as f64 * vd[2]);
        (b - a).norm()
    }
}

impl<'d, I: LineIntegral> LengthTerm for GeodesicLength<'d, I> {
    fn data_dependent(&self) -> bool {
        true
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        self.euclidean_raw(p, q) * self.integral.integrate(self.data, p, q)
    }

    fn raw_from_offsets(&self, _d_pq: [i32; 3]) -> f64 {
        unreachable!("geodesic length is data-dependent; never cached by translation-invariant offsets")
    }
}

/// Euclidean turning-angle curvature weighted by the data volume sampled
/// at the shared vertex of the two segments.
pub struct GeodesicCurvature<'d, I> {
    data: &'d Grid<f64>,
    euclidean: EuclideanCurvature,
    integral: I,
}

impl<'d, I: LineIntegral> GeodesicCurvature<'d, I> {
    pub fn new(data: &'d Grid<f64>, voxel_dimensions: [f64; 3], power: f64, integral: I) -> Self {
        Self {
            data,
            euclidean: EuclideanCurvature::new(voxel_dimensions, power),
            integral,
        }
    }
}

impl<'d, I: LineIntegral> CurvatureTerm for GeodesicCurvature<'d, I> {
    fn data_dependent(&self) -> bool {
        true
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint, r: VoxelPoint) -> f64 {
        let weight = self.integral.integrate(self.data, q, q);
        self.euclidean.raw(p, q, r) * weight
    }

    fn raw_from_offsets(&self, _d_pq: [i32; 3], _d_qr: [i32; 3]) -> f64 {
        unreachable!("geodesic curvature is data-dependent; never cached by translation-invariant offsets")
    }
}
