//! Euclidean geometric terms and the always-zero terms.
//!
//! None of these read the data volume, so `data_dependent()` is `false`
//! for all of them, including the zero functors, whose output doesn't
//! depend on data either.

use nalgebra::Vector3;

use super::{CurvatureTerm, DataTerm, LengthTerm, TorsionTerm};
use crate::grid::VoxelPoint;

const EPS: f64 = 1e-12;

fn to_physical(p: VoxelPoint, vd: [f64; 3]) -> Vector3<f64> {
    Vector3::new(p.x as f64 * vd[0], p.y as f64 * vd[1], p.z as f64 * vd[2])
}

fn offset_physical(d: [i32; 3], vd: [f64; 3]) -> Vector3<f64> {
    Vector3::new(d[0] as f64 * vd[0], d[1] as f64 * vd[1], d[2] as f64 * vd[2])
}

/// Euclidean length, scaled by `voxel_dimensions`.
pub struct EuclideanLength {
    vd: [f64; 3],
}

impl EuclideanLength {
    pub fn new(vd: [f64; 3]) -> Self {
        Self { vd }
    }
}

impl LengthTerm for EuclideanLength {
    fn data_dependent(&self) -> bool {
        false
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint) -> f64 {
        (to_physical(q, self.vd) - to_physical(p, self.vd)).norm()
    }

    fn raw_from_offsets(&self, d_pq: [i32; 3]) -> f64 {
        offset_physical(d_pq, self.vd).norm()
    }
}

/// Turning-angle curvature estimate: the angle between consecutive
/// segments divided by their average length, raised to `curvature_power`.
pub struct EuclideanCurvature {
    vd: [f64; 3],
    power: f64,
}

impl EuclideanCurvature {
    pub fn new(vd: [f64; 3], power: f64) -> Self {
        Self { vd, power }
    }

    fn raw_from_vectors(&self, v1: Vector3<f64>, v2: Vector3<f64>) -> f64 {
        let (l1, l2) = (v1.norm(), v2.norm());
        if l1 < EPS || l2 < EPS {
            return 0.0;
        }
        let cos_theta = (v1.dot(&v2) / (l1 * l2)).clamp(-1.0, 1.0);
        let theta = cos_theta.acos();
        let avg_len = 0.5 * (l1 + l2);
        if avg_len < EPS {
            return 0.0;
        }
        (theta / avg_len).powf(self.power)
    }
}

impl CurvatureTerm for EuclideanCurvature {
    fn data_dependent(&self) -> bool {
        false
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint, r: VoxelPoint) -> f64 {
        let v1 = to_physical(q, self.vd) - to_physical(p, self.vd);
        let v2 = to_physical(r, self.vd) - to_physical(q, self.vd);
        self.raw_from_vectors(v1, v2)
    }

    fn raw_from_offsets(&self, d_pq: [i32; 3], d_qr: [i32; 3]) -> f64 {
        self.raw_from_vectors(offset_physical(d_pq, self.vd), offset_physical(d_qr, self.vd))
    }
}

/// Out-of-plane twist estimate: the angle between the third segment and
/// the plane spanned by the first two, divided by average length, raised
/// to `torsion_power`.
///
/// Using `asin` of the normalized scalar triple product (rather than the
/// angle between consecutive binormals) keeps this identically 0 whenever
/// all four points are coplanar, regardless of turning direction: the
/// scalar triple product `(v1 x v2) . v3` vanishes exactly when `v3` lies
/// in the plane of `v1, v2`.
pub struct EuclideanTorsion {
    vd: [f64; 3],
    power: f64,
}

impl EuclideanTorsion {
    pub fn new(vd: [f64; 3], power: f64) -> Self {
        Self { vd, power }
    }

    fn raw_from_vectors(&self, v1: Vector3<f64>, v2: Vector3<f64>, v3: Vector3<f64>) -> f64 {
        let n1 = v1.cross(&v2);
        let n1_norm = n1.norm();
        let v3_norm = v3.norm();
        if n1_norm < EPS || v3_norm < EPS {
            return 0.0;
        }
        let sin_phi = (n1.dot(&v3) / (n1_norm * v3_norm)).clamp(-1.0, 1.0);
        let phi = sin_phi.asin().abs();
        let avg_len = (v1.norm() + v2.norm() + v3.norm()) / 3.0;
        if avg_len < EPS {
            return 0.0;
        }
        (phi / avg_len).powf(self.power)
    }
}

impl TorsionTerm for EuclideanTorsion {
    fn data_dependent(&self) -> bool {
        false
    }

    fn raw(&self, p: VoxelPoint, q: VoxelPoint, r: VoxelPoint, s: VoxelPoint) -> f64 {
        let v1 = to_physical(q, self.vd) - to_physical(p, self.vd);
        let v2 = to_physical(r, self.vd) - to_physical(q, self.vd);
        let v3 = to_physical(s, self.vd) - to_physical(r, self.vd);
        self.raw_from_vectors(v1, v2, v3)
    }

    fn raw_from_offsets(&self, d_pq: [i32; 3], d_qr: [i32; 3], d_rs: [i32; 3]) -> f64 {
        self.raw_from_vectors(
            offset_physical(d_pq, self.vd),
            offset_physical(d_qr, self.vd),
            offset_physical(d_rs, self.vd),
        )
    }
}

/// Always-zero data cost, used by the `geodesic` problem type.
pub struct ZeroData;

impl DataTerm for ZeroData {
    fn data_dependent(&self) -> bool {
        false
    }

    fn raw(&self, _p: VoxelPoint, _q: VoxelPoint) -> f64 {
        0.0
    }
}

/// Always-zero torsion, used by the `geodesic` problem type.
pub struct ZeroTorsion;

impl TorsionTerm for ZeroTorsion {
    fn data_dependent(&self) -> bool {
        false
    }

    fn raw(&self, _p: VoxelPoint, _q: VoxelPoint, _r: VoxelPoint, _s: VoxelPoint) -> f64 {
        0.0
    }

    fn raw_from_offsets(&self, _d_pq: [i32; 3], _d_qr: [i32; 3], _d_rs: [i32; 3]) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_has_zero_curvature() {
        let c = EuclideanCurvature::new([1.0, 1.0, 1.0], 2.0);
        let p = VoxelPoint::new(0, 0, 0);
        let q = VoxelPoint::new(1, 0, 0);
        let r = VoxelPoint::new(2, 0, 0);
        assert!(c.raw(p, q, r).abs() < 1e-9);
    }

    #[test]
    fn right_angle_turn_has_positive_curvature() {
        let c = EuclideanCurvature::new([1.0, 1.0, 1.0], 1.0);
        let p = VoxelPoint::new(0, 0, 0);
        let q = VoxelPoint::new(1, 0, 0);
        let r = VoxelPoint::new(1, 1, 0);
        assert!(c.raw(p, q, r) > 0.0);
    }

    #[test]
    fn coplanar_points_have_zero_torsion() {
        let t = EuclideanTorsion::new([1.0, 1.0, 1.0], 2.0);
        let p = VoxelPoint::new(0, 0, 0);
        let q = VoxelPoint::new(1, 0, 0);
        let r = VoxelPoint::new(1, 1, 0);
        let s = VoxelPoint::new(2, 1, 0);
        assert!(t.raw(p, q, r, s).abs() < 1e-9);
    }

    #[test]
    fn out_of_plane_twist_has_positive_torsion() {
        let t = EuclideanTorsion::new([1.0, 1.0, 1.0], 1.0);
        let p = VoxelPoint::new(0, 0, 0);
        let q = VoxelPoint::new(1, 0, 0);
        let r = VoxelPoint::new(1, 1, 0);
        let s = VoxelPoint::new(1, 1, 1);
        assert!(t.raw(p, q, r, s) > 0.0);
    }
}
