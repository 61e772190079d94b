//! Discrete connectivity template: the finite set of legal single-step moves.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// An ordered list of K integer offset triples (dx,dy,dz). Index `e` in
/// `[0,K)` identifies a directed step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Connectivity {
    offsets: Vec<[i32; 3]>,
}

impl Connectivity {
    /// Builds a connectivity table from a (K,3) row-major buffer, the shape
    /// the host interface passes a connectivity matrix in.
    pub fn from_rows(rows: &[i32], k: usize) -> Result<Self, Error> {
        if rows.len() != k * 3 {
            return Err(Error::ShapeMismatch {
                what: "connectivity",
                detail: format!(
                    "expected {} entries for K={k} rows of 3, got {}",
                    k * 3,
                    rows.len()
                ),
            });
        }
        let offsets = rows.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self { offsets })
    }

    pub fn new(offsets: Vec<[i32; 3]>) -> Self {
        Self { offsets }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn offset(&self, e: usize) -> [i32; 3] {
        self.offsets[e]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, [i32; 3])> + '_ {
        self.offsets.iter().copied().enumerate()
    }
}
