//! Cost functors: pluggable data/length/curvature/torsion evaluators.
//!
//! Purpose
//! - A common evaluation contract for all four cost arities, and a small
//!   run-time registry that picks the right quadruple for a problem-type
//!   string. Run-time trait objects stand in for a compile-time generic
//!   dispatch, so the problem type can be chosen from a plain string at
//!   the query boundary instead of a type parameter.
//!
//! Why raw, unweighted functors
//! - Keeping `raw()` free of weighting lets the same value feed both the
//!   search (weighted, zero-guarded) and `curve_info` (both raw and
//!   weighted are reported) from one implementation, instead of
//!   duplicating the zero-weight guard in every functor.

mod edge;
mod euclidean;
mod geodesic;
mod line_integral;
mod linear_interp;

pub use edge::{DefaultEdgeResponse, EdgeDataCost, EdgeResponse};
pub use euclidean::{EuclideanCurvature, EuclideanLength, EuclideanTorsion, ZeroData, ZeroTorsion};
pub use geodesic::{GeodesicCurvature, GeodesicLength};
pub use line_integral::{DefaultLineIntegral, LineIntegral};
pub use linear_interp::LinearInterpolationData;

use crate::errors::Error;
use crate::grid::{Grid, VoxelPoint};
use crate::settings::Settings;

/// Per-directed-edge data cost.
pub trait DataTerm {
    fn data_dependent(&self) -> bool;
    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64;
}

/// Per-pair length cost.
pub trait LengthTerm {
    fn data_dependent(&self) -> bool;
    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64;
    /// Translation-invariant evaluation from bare connectivity offsets,
    /// used by the regularization cache to key on offset triples rather
    /// than absolute coordinates. Only called when `data_dependent()` is
    /// false.
    fn raw_from_offsets(&self, d_pq: [i32; 3]) -> f64;
}

/// Per-triple curvature cost (already raised to `curvature_power`).
pub trait CurvatureTerm {
    fn data_dependent(&self) -> bool;
    fn raw(&self, p: VoxelPoint, q: VoxelPoint, r: VoxelPoint) -> f64;
    fn raw_from_offsets(&self, d_pq: [i32; 3], d_qr: [i32; 3]) -> f64;
}

/// Per-quadruple torsion cost (already raised to `torsion_power`).
pub trait TorsionTerm {
    fn data_dependent(&self) -> bool;
    fn raw(&self, p: VoxelPoint, q: VoxelPoint, r: VoxelPoint, s: VoxelPoint) -> f64;
    fn raw_from_offsets(&self, d_pq: [i32; 3], d_qr: [i32; 3], d_rs: [i32; 3]) -> f64;
}

/// The four functors selected for one query. Borrows the data volume for
/// the query's lifetime `'d` rather than cloning it.
pub struct CostFunctors<'d> {
    pub data: Box<dyn DataTerm + 'd>,
    pub length: Box<dyn LengthTerm + 'd>,
    pub curvature: Box<dyn CurvatureTerm + 'd>,
    pub torsion: Box<dyn TorsionTerm + 'd>,
}

/// A weight of 0 or below zeros the term, even if the functor would
/// otherwise return a nonzero value. Applied identically at search time
/// and in `curve_info`.
#[inline]
pub fn weighted(weight: f64, raw: f64) -> f64 {
    if weight > 0.0 {
        weight * raw
    } else {
        0.0
    }
}

/// Builds the cost-functor quadruple for a recognized problem type.
pub fn build_functors<'d>(
    problem_type: &str,
    data: &'d Grid<f64>,
    voxel_dimensions: [f64; 3],
    settings: &Settings,
) -> Result<CostFunctors<'d>, Error> {
    match problem_type {
        "linear_interpolation" => Ok(CostFunctors {
            data: Box::new(LinearInterpolationData::new(
                data,
                voxel_dimensions,
                DefaultLineIntegral::default(),
            )),
            length: Box::new(EuclideanLength::new(voxel_dimensions)),
            curvature: Box::new(EuclideanCurvature::new(
                voxel_dimensions,
                settings.curvature_power,
            )),
            torsion: Box::new(EuclideanTorsion::new(
                voxel_dimensions,
                settings.torsion_power,
            )),
        }),
        "edge" => Ok(CostFunctors {
            data: Box::new(EdgeDataCost::new(
                data,
                voxel_dimensions,
                DefaultEdgeResponse::default(),
                DefaultLineIntegral::default(),
            )),
            length: Box::new(EuclideanLength::new(voxel_dimensions)),
            curvature: Box::new(EuclideanCurvature::new(
                voxel_dimensions,
                settings.curvature_power,
            )),
            torsion: Box::new(EuclideanTorsion::new(
                voxel_dimensions,
                settings.torsion_power,
            )),
        }),
        "geodesic" => Ok(CostFunctors {
            data: Box::new(ZeroData),
            length: Box::new(GeodesicLength::new(
                data,
                voxel_dimensions,
                DefaultLineIntegral::default(),
            )),
            curvature: Box::new(GeodesicCurvature::new(
                data,
                voxel_dimensions,
                settings.curvature_power,
                DefaultLineIntegral::default(),
            )),
            torsion: Box::new(ZeroTorsion),
        }),
        other => Err(Error::UnknownProblemType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_problem_type_is_an_error() {
        let data = Grid::filled(crate::grid::Shape::new(1, 1, 1), 0.0);
        let settings = Settings::default();
        let err = build_functors("not_a_real_problem", &data, [1.0, 1.0, 1.0], &settings);
        assert!(matches!(err, Err(Error::UnknownProblemType(_))));
    }

    #[test]
    fn weighted_zeros_on_nonpositive_weight() {
        assert_eq!(weighted(0.0, 5.0), 0.0);
        assert_eq!(weighted(-1.0, 5.0), 0.0);
        assert_eq!(weighted(2.0, 5.0), 10.0);
    }
}
