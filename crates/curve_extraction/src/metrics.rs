//! `curve_info`: recomputes the cost of an explicit polyline, independent
//! of any search. Used to score a curve found elsewhere, or to sanity
//! check a search result against its own claimed cost.

use crate::cost::{weighted, CostFunctors};
use crate::errors::Error;
use crate::grid::VoxelPoint;
use crate::settings::Settings;

/// The 8 scalars reported by `curve_info`, in this fixed order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveInfo {
    pub total_cost: f64,
    pub total_data: f64,
    pub total_weighted_length: f64,
    pub total_weighted_curvature: f64,
    pub total_weighted_torsion: f64,
    pub raw_length: f64,
    pub raw_curvature: f64,
    pub raw_torsion: f64,
}

/// Evaluates every cost term over an explicit polyline.
///
/// A path shorter than a term's arity contributes 0 for that term rather
/// than erroring. Only a wholly empty path is rejected, since no cost at
/// all (not even "no edges") is well defined for it.
pub fn curve_info(points: &[VoxelPoint], functors: &CostFunctors<'_>, settings: &Settings) -> Result<CurveInfo, Error> {
    if points.is_empty() {
        return Err(Error::PathTooShort {
            what: "curve_info",
            detail: "path has no points".to_string(),
        });
    }

    let mut total_data = 0.0;
    let mut raw_length = 0.0;
    let mut total_weighted_length = 0.0;
    for w in points.windows(2) {
        let (p, q) = (w[0], w[1]);
        total_data += functors.data.raw(p, q);
        let raw = functors.length.raw(p, q);
        raw_length += raw;
        total_weighted_length += weighted(settings.length_penalty, raw);
    }

    let mut raw_curvature = 0.0;
    let mut total_weighted_curvature = 0.0;
    for w in points.windows(3) {
        let (p, q, r) = (w[0], w[1], w[2]);
        let raw = functors.curvature.raw(p, q, r);
        raw_curvature += raw;
        total_weighted_curvature += weighted(settings.curvature_penalty, raw);
    }

    let mut raw_torsion = 0.0;
    let mut total_weighted_torsion = 0.0;
    for w in points.windows(4) {
        let (p, q, r, s) = (w[0], w[1], w[2], w[3]);
        let raw = functors.torsion.raw(p, q, r, s);
        raw_torsion += raw;
        total_weighted_torsion += weighted(settings.torsion_penalty, raw);
    }

    let total_cost = total_data + total_weighted_length + total_weighted_curvature + total_weighted_torsion;

    Ok(CurveInfo {
        total_cost,
        total_data,
        total_weighted_length,
        total_weighted_curvature,
        total_weighted_torsion,
        raw_length,
        raw_curvature,
        raw_torsion,
    })
}
