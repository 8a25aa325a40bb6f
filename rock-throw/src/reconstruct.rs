//! Rock position residues from a validated velocity, by partial CRT.
//!
//! Each axis starts from `0 mod 1` and folds in the hailstones' congruences
//! left to right. A congruence whose modulus shares a factor with the
//! accumulated modulus is skipped rather than merged, so the result is only
//! the true coordinate when the surviving moduli multiply past its magnitude.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Serialize, Serializer};

use hail_core::{Hailstone, Vec3, AXIS_NAMES};

use crate::arith::crt_combine;
use crate::reduce::{axis_congruences, AxisCongruence};
use crate::SolveError;

/// Serialize a `BigInt` as a decimal string.
pub(crate) fn as_decimal<S: Serializer>(n: &BigInt, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(n)
}

/// Accumulated `residue mod modulus` for one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisResidue {
    #[serde(serialize_with = "as_decimal")]
    pub residue: BigInt,
    #[serde(serialize_with = "as_decimal")]
    pub modulus: BigInt,
    /// Congruences merged into the accumulator.
    pub combined: usize,
    /// Congruences dropped for sharing a factor with the accumulator.
    pub skipped: usize,
}

impl AxisResidue {
    /// The empty constraint `0 mod 1`.
    pub fn identity() -> Self {
        Self {
            residue: BigInt::zero(),
            modulus: BigInt::one(),
            combined: 0,
            skipped: 0,
        }
    }

    /// Merge one congruence when its modulus is coprime with the accumulator.
    pub fn absorb(self, congruence: &AxisCongruence) -> Self {
        let modulus = BigInt::from(congruence.modulus);
        if !self.modulus.gcd(&modulus).is_one() {
            return Self {
                skipped: self.skipped + 1,
                ..self
            };
        }

        let (residue, modulus) = crt_combine(
            &self.residue,
            &self.modulus,
            &BigInt::from(congruence.residue),
            &modulus,
        );
        Self {
            residue,
            modulus,
            combined: self.combined + 1,
            skipped: self.skipped,
        }
    }

    /// Whether `coordinate` is congruent to the residue.
    pub fn admits(&self, coordinate: i128) -> bool {
        BigInt::from(coordinate).mod_floor(&self.modulus) == self.residue
    }
}

/// Fold a sequence of congruences for one axis, in order.
pub fn reconstruct_axis<'a>(congruences: impl IntoIterator<Item = &'a AxisCongruence>) -> AxisResidue {
    congruences
        .into_iter()
        .fold(AxisResidue::identity(), AxisResidue::absorb)
}

/// Per-axis residues for one velocity and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    pub velocity: Vec3,
    pub axes: [AxisResidue; 3],
    #[serde(serialize_with = "as_decimal")]
    pub residue_sum: BigInt,
}

impl Reconstruction {
    /// Whether every coordinate of `position` agrees with its axis residue.
    pub fn admits(&self, position: &[i128; 3]) -> bool {
        self.axes.iter().zip(position).all(|(axis, &c)| axis.admits(c))
    }
}

/// Reconstruct the rock's residues assuming it moves at `velocity`.
pub fn reconstruct(hailstones: &[Hailstone], velocity: &Vec3) -> Result<Reconstruction, SolveError> {
    if hailstones.is_empty() {
        return Err(SolveError::NoHailstones);
    }

    let per_stone: Vec<[AxisCongruence; 3]> = hailstones
        .iter()
        .enumerate()
        .map(|(index, stone)| {
            axis_congruences(stone, velocity).ok_or(SolveError::DegenerateVelocity {
                velocity: *velocity,
                index,
            })
        })
        .collect::<Result<_, _>>()?;

    let axes: [AxisResidue; 3] =
        std::array::from_fn(|axis| reconstruct_axis(per_stone.iter().map(|c| &c[axis])));

    for (name, axis) in AXIS_NAMES.iter().zip(&axes) {
        log::debug!(
            "axis {}: {} mod {} ({} combined, {} skipped)",
            name,
            axis.residue,
            axis.modulus,
            axis.combined,
            axis.skipped
        );
    }

    let residue_sum: BigInt = axes.iter().map(|a| &a.residue).sum();
    Ok(Reconstruction {
        velocity: *velocity,
        axes,
        residue_sum,
    })
}
