//! Per-axis congruences induced by a candidate rock velocity.
//!
//! If the rock moves with velocity S and meets hailstone (p, v) at integer
//! time t, then R = p + t(v - S). Dividing v - S by the gcd of its components
//! gives the smallest integer step w along that line, so on every axis
//! R ≡ p (mod |w|).

use num_integer::Integer;
use serde::Serialize;

use hail_core::{Hailstone, Vec3};

/// `coordinate ≡ residue (mod modulus)` on one axis, with `modulus >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisCongruence {
    pub residue: i64,
    pub modulus: i64,
}

/// Reduced, sign-normalized step of `velocity - candidate`.
///
/// Zero components become 1: an axis where the velocities match is left
/// unconstrained. Returns `None` when the relative velocity is zero on all
/// three axes, or when a reduced component does not fit in i64.
pub fn reduced_step(velocity: &Vec3, candidate: &Vec3) -> Option<Vec3> {
    // i64 differences can reach 2^64, so reduce in i128.
    let w: [i128; 3] = std::array::from_fn(|axis| velocity[axis] as i128 - candidate[axis] as i128);

    let g = w.iter().fold(0i128, |acc, c| acc.gcd(c));
    if g == 0 {
        return None;
    }

    let mut step = [1i64; 3];
    for axis in 0..3 {
        let c = (w[axis] / g).abs();
        if c != 0 {
            step[axis] = i64::try_from(c).ok()?;
        }
    }
    Some(step)
}

/// The three congruences `hailstone` imposes on a rock moving at `candidate`.
pub fn axis_congruences(hailstone: &Hailstone, candidate: &Vec3) -> Option<[AxisCongruence; 3]> {
    let w = reduced_step(&hailstone.velocity, candidate)?;
    let mut out = [AxisCongruence { residue: 0, modulus: 1 }; 3];
    for axis in 0..3 {
        out[axis] = AxisCongruence {
            residue: hailstone.position[axis].rem_euclid(w[axis]),
            modulus: w[axis],
        };
    }
    Some(out)
}
