//! Future path crossings in the XY plane.
//!
//! Each pair of hailstones is projected onto X/Y and the two rays are
//! intersected exactly with i128 arithmetic. The crossing point is kept as a
//! rational with a shared positive denominator so bounds checks never round.

use rayon::prelude::*;
use serde::Serialize;

use crate::Hailstone;

/// Exact crossing point `(x_num / den, y_num / den)` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrossPoint {
    pub x_num: i128,
    pub y_num: i128,
    pub den: i128,
}

impl CrossPoint {
    /// True when both coordinates lie in the inclusive range `[lo, hi]`.
    pub fn within(&self, lo: i64, hi: i64) -> bool {
        let lo = lo as i128 * self.den;
        let hi = hi as i128 * self.den;
        (lo..=hi).contains(&self.x_num) && (lo..=hi).contains(&self.y_num)
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (
            self.x_num as f64 / self.den as f64,
            self.y_num as f64 / self.den as f64,
        )
    }
}

/// How two hailstone paths relate in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Crossing {
    /// The paths never meet: distinct parallel lines, or a stone at rest
    /// in XY that lies off the other stone's line.
    Parallel,
    /// Both stones travel along the same line, or both rest on the same point.
    Coincident,
    /// The lines cross, but at least one stone was there before t = 0.
    InPast,
    /// Both stones reach the point at t >= 0.
    Ahead(CrossPoint),
}

/// Intersect the XY projections of two hailstone paths.
pub fn crossing_xy(a: &Hailstone, b: &Hailstone) -> Crossing {
    let (ax, ay) = (a.position[0] as i128, a.position[1] as i128);
    let (bx, by) = (b.position[0] as i128, b.position[1] as i128);
    let (avx, avy) = (a.velocity[0] as i128, a.velocity[1] as i128);
    let (bvx, bvy) = (b.velocity[0] as i128, b.velocity[1] as i128);

    let dx = bx - ax;
    let dy = by - ay;
    let mut det = avx * bvy - avy * bvx;

    if det == 0 {
        let a_moves = avx != 0 || avy != 0;
        let b_moves = bvx != 0 || bvy != 0;
        return match (a_moves, b_moves) {
            (true, true) if dx * avy - dy * avx == 0 => Crossing::Coincident,
            (true, true) => Crossing::Parallel,
            (true, false) => crossing_at_rest(a, b),
            (false, true) => crossing_at_rest(b, a),
            (false, false) if dx == 0 && dy == 0 => Crossing::Coincident,
            (false, false) => Crossing::Parallel,
        };
    }

    // a.p + t a.v = b.p + u b.v, solved by Cramer's rule over the shared det.
    let mut t_num = dx * bvy - dy * bvx;
    let mut u_num = dx * avy - dy * avx;
    if det < 0 {
        det = -det;
        t_num = -t_num;
        u_num = -u_num;
    }

    if t_num < 0 || u_num < 0 {
        return Crossing::InPast;
    }

    Crossing::Ahead(CrossPoint {
        x_num: ax * det + t_num * avx,
        y_num: ay * det + t_num * avy,
        den: det,
    })
}

/// `resting` does not move in XY, so the pair meets only where `moving` passes over it.
fn crossing_at_rest(moving: &Hailstone, resting: &Hailstone) -> Crossing {
    let (mx, my) = (moving.position[0] as i128, moving.position[1] as i128);
    let (rx, ry) = (resting.position[0] as i128, resting.position[1] as i128);
    let (mvx, mvy) = (moving.velocity[0] as i128, moving.velocity[1] as i128);
    let (dx, dy) = (rx - mx, ry - my);

    if dx * mvy - dy * mvx != 0 {
        return Crossing::Parallel;
    }
    if dx * mvx + dy * mvy < 0 {
        return Crossing::InPast;
    }
    Crossing::Ahead(CrossPoint {
        x_num: rx,
        y_num: ry,
        den: 1,
    })
}

/// Count unordered pairs whose future XY paths cross inside `[lo, hi]²`.
pub fn count_crossings_in_area(hailstones: &[Hailstone], lo: i64, hi: i64) -> usize {
    (0..hailstones.len())
        .into_par_iter()
        .map(|i| {
            let a = &hailstones[i];
            hailstones[i + 1..]
                .iter()
                .filter(|b| match crossing_xy(a, b) {
                    Crossing::Ahead(point) => point.within(lo, hi),
                    Crossing::Coincident => {
                        log::warn!("Coincident XY paths: [{}] and [{}]", a, b);
                        false
                    }
                    Crossing::Parallel | Crossing::InPast => false,
                })
                .count()
        })
        .sum()
}
