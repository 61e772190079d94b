//! Regularization cache: memoizes the combined, weighted length +
//! curvature + torsion cost of an edge-pair transition keyed by its
//! connectivity-offset indices rather than by absolute voxel coordinates.
//!
//! This is valid only because length/curvature/torsion are evaluated from
//! offsets between points, which are translation invariant whenever the
//! corresponding functor does not read the data volume. A term is only
//! served from the cache when it is either not data-dependent, or its
//! penalty weight is non-positive (in which case it always contributes 0
//! and caching it is trivially correct).

use std::cell::RefCell;
use std::collections::HashMap;

use crate::cost::{CostFunctors, weighted};
use crate::grid::VoxelPoint;
use crate::settings::Settings;

/// Key: (e1, e2, e3) indices into the connectivity template, naming the
/// three consecutive steps of an edge-pair transition.
type CacheKey = (usize, usize, usize);

pub struct RegularizationCache<'d, 'f> {
    functors: &'f CostFunctors<'d>,
    length_penalty: f64,
    curvature_penalty: f64,
    torsion_penalty: f64,
    length_cacheable: bool,
    curvature_cacheable: bool,
    torsion_cacheable: bool,
    cache: RefCell<HashMap<CacheKey, f64>>,
}

impl<'d, 'f> RegularizationCache<'d, 'f> {
    pub fn new(functors: &'f CostFunctors<'d>, settings: &Settings) -> Self {
        let length_cacheable = !functors.length.data_dependent() || !settings.length_active();
        let curvature_cacheable = !functors.curvature.data_dependent() || !settings.curvature_active();
        let torsion_cacheable = !functors.torsion.data_dependent() || !settings.torsion_active();
        Self {
            functors,
            length_penalty: settings.length_penalty,
            curvature_penalty: settings.curvature_penalty,
            torsion_penalty: settings.torsion_penalty,
            length_cacheable,
            curvature_cacheable,
            torsion_cacheable,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// True when every term that could be served from the cache is; the
    /// caller can skip the `HashMap` entirely and always evaluate from
    /// offsets when this is true.
    pub fn fully_cacheable(&self) -> bool {
        self.length_cacheable && self.curvature_cacheable && self.torsion_cacheable
    }

    fn from_offsets(&self, d_pq: [i32; 3], d_qr: [i32; 3], d_rs: [i32; 3]) -> f64 {
        let length = weighted(self.length_penalty, self.functors.length.raw_from_offsets(d_rs));
        let curvature = weighted(
            self.curvature_penalty,
            self.functors.curvature.raw_from_offsets(d_qr, d_rs),
        );
        let torsion = weighted(
            self.torsion_penalty,
            self.functors.torsion.raw_from_offsets(d_pq, d_qr, d_rs),
        );
        length + curvature + torsion
    }

    /// Combined weighted cost of advancing the edge-pair `(p, q, r)` to
    /// `(q, r, s)`: the new edge's length, the curvature at the new
    /// vertex `r` (from `q, r, s`), and the torsion introduced by `s`
    /// (from all of `p, q, r, s`). `(e1, e2, e3)` serves as the cache key
    /// when every term involved is cacheable.
    pub fn combined(
        &self,
        key: CacheKey,
        d_pq: [i32; 3],
        d_qr: [i32; 3],
        d_rs: [i32; 3],
        p: VoxelPoint,
        q: VoxelPoint,
        r: VoxelPoint,
        s: VoxelPoint,
    ) -> f64 {
        if self.fully_cacheable() {
            if let Some(&cached) = self.cache.borrow().get(&key) {
                return cached;
            }
            let value = self.from_offsets(d_pq, d_qr, d_rs);
            self.cache.borrow_mut().insert(key, value);
            return value;
        }

        let length = if self.length_cacheable {
            weighted(self.length_penalty, self.functors.length.raw_from_offsets(d_rs))
        } else {
            weighted(self.length_penalty, self.functors.length.raw(r, s))
        };
        let curvature = if self.curvature_cacheable {
            weighted(
                self.curvature_penalty,
                self.functors.curvature.raw_from_offsets(d_qr, d_rs),
            )
        } else {
            weighted(self.curvature_penalty, self.functors.curvature.raw(q, r, s))
        };
        let torsion = if self.torsion_cacheable {
            weighted(
                self.torsion_penalty,
                self.functors.torsion.raw_from_offsets(d_pq, d_qr, d_rs),
            )
        } else {
            weighted(self.torsion_penalty, self.functors.torsion.raw(p, q, r, s))
        };
        length + curvature + torsion
    }
}
