//! Pluggable line-integral evaluator along a voxel-to-voxel segment.
//!
//! Autodiff-based boundary-crossing evaluation against a polygon mesh is
//! host territory, not this crate's. This evaluator only needs to
//! integrate a scalar field along a straight segment, which the `edge`
//! and `geodesic` problem types both reduce to.

use crate::grid::{Grid, VoxelPoint};

/// Integrates a scalar field sampled at grid points along the straight
/// segment from `p` to `q`, in grid (not physical) coordinates.
pub trait LineIntegral {
    fn integrate(&self, field: &Grid<f64>, p: VoxelPoint, q: VoxelPoint) -> f64;
}

/// Trapezoidal quadrature over `samples` evenly spaced points, each read
/// from `field` via trilinear interpolation between the 8 surrounding
/// voxel centers.
#[derive(Clone, Copy, Debug)]
pub struct DefaultLineIntegral {
    samples: usize,
}

impl DefaultLineIntegral {
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(2),
        }
    }
}

impl Default for DefaultLineIntegral {
    fn default() -> Self {
        Self::new(8)
    }
}

fn trilinear(field: &Grid<f64>, x: f64, y: f64, z: f64) -> f64 {
    let shape = field.shape;
    let x0 = x.floor();
    let y0 = y.floor();
    let z0 = z.floor();
    let (fx, fy, fz) = (x - x0, y - y0, z - z0);

    let clamp = |v: f64, hi: usize| -> usize { v.clamp(0.0, (hi.max(1) - 1) as f64) as usize };

    let mut acc = 0.0;
    for (dz, wz) in [(0.0, 1.0 - fz), (1.0, fz)] {
        for (dy, wy) in [(0.0, 1.0 - fy), (1.0, fy)] {
            for (dx, wx) in [(0.0, 1.0 - fx), (1.0, fx)] {
                let xi = clamp(x0 + dx, shape.m);
                let yi = clamp(y0 + dy, shape.n);
                let zi = clamp(z0 + dz, shape.o);
                let p = VoxelPoint::new(xi, yi, zi);
                let value = field.get(p).copied().unwrap_or(0.0);
                acc += wx * wy * wz * value;
            }
        }
    }
    acc
}

impl LineIntegral for DefaultLineIntegral {
    fn integrate(&self, field: &Grid<f64>, p: VoxelPoint, q: VoxelPoint) -> f64 {
        let (px, py, pz) = (p.x as f64, p.y as f64, p.z as f64);
        let (qx, qy, qz) = (q.x as f64, q.y as f64, q.z as f64);
        let n = self.samples;
        let mut sum = 0.0;
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let x = px + t * (qx - px);
            let y = py + t * (qy - py);
            let z = pz + t * (qz - pz);
            let w = if i == 0 || i == n { 0.5 } else { 1.0 };
            sum += w * trilinear(field, x, y, z);
        }
        sum / n as f64
    }
}
