//! Brute-force search over a bounded box of candidate rock velocities.
//!
//! A candidate survives when, on every axis, every pair of hailstone
//! congruences it induces is mutually consistent. The check is O(N²) per
//! candidate, so the box has to stay small. Candidates are independent and
//! are tested in parallel; results keep enumeration order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use hail_core::{Hailstone, Vec3};

use crate::arith::congruences_consistent;
use crate::reduce::{axis_congruences, AxisCongruence};

/// Inclusive integer range for one velocity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub lo: i64,
    pub hi: i64,
}

impl AxisRange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// Number of values in the range (0 when `lo > hi`), saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        if self.lo > self.hi {
            0
        } else {
            u64::try_from(self.hi as i128 - self.lo as i128 + 1).unwrap_or(u64::MAX)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lo, self.hi)
    }
}

/// Box of candidate velocities, one inclusive range per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBox {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl SearchBox {
    pub fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Box holding exactly one velocity.
    pub fn single(velocity: Vec3) -> Self {
        let [x, y, z] = velocity;
        Self::new(AxisRange::new(x, x), AxisRange::new(y, y), AxisRange::new(z, z))
    }

    pub fn len(&self) -> u64 {
        self.x.len().saturating_mul(self.y.len()).saturating_mul(self.z.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, velocity: &Vec3) -> bool {
        self.x.contains(velocity[0]) && self.y.contains(velocity[1]) && self.z.contains(velocity[2])
    }

    /// Candidate at `index` in enumeration order: z outermost, then y, x innermost.
    ///
    /// `index` must be below `len()`.
    pub fn nth_candidate(&self, index: u64) -> Vec3 {
        let (nx, ny) = (self.x.len(), self.y.len());
        let offset = |range: &AxisRange, k: u64| (range.lo as i128 + k as i128) as i64;
        [
            offset(&self.x, index % nx),
            offset(&self.y, index / nx % ny),
            offset(&self.z, index / nx / ny),
        ]
    }
}

impl fmt::Display for SearchBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x {}, y {}, z {}", self.x, self.y, self.z)
    }
}

/// Whether every pair of congruences `candidate` induces agrees on every axis.
///
/// A candidate equal to some hailstone's velocity is rejected outright.
pub fn velocity_is_consistent(hailstones: &[Hailstone], candidate: &Vec3) -> bool {
    let mut congruences: Vec<[AxisCongruence; 3]> = Vec::with_capacity(hailstones.len());
    for stone in hailstones {
        match axis_congruences(stone, candidate) {
            Some(c) => congruences.push(c),
            None => return false,
        }
    }

    (0..3).all(|axis| {
        congruences.iter().enumerate().all(|(i, a)| {
            let a = a[axis];
            congruences[i + 1..].iter().all(|b| {
                let b = b[axis];
                congruences_consistent(&a.residue, &a.modulus, &b.residue, &b.modulus)
            })
        })
    })
}

/// All candidates in `search` that pass [`velocity_is_consistent`], in enumeration order.
pub fn filter_candidates(hailstones: &[Hailstone], search: &SearchBox) -> Vec<Vec3> {
    log::info!(
        "Searching {} candidate velocities ({}) against {} hailstones",
        search.len(),
        search,
        hailstones.len()
    );

    let passing: Vec<Vec3> = (0..search.len())
        .into_par_iter()
        .map(|index| search.nth_candidate(index))
        .filter(|candidate| velocity_is_consistent(hailstones, candidate))
        .collect();

    for v in &passing {
        log::debug!("Consistent velocity {:?}", v);
    }
    log::info!("{} candidate velocities passed", passing.len());
    passing
}
