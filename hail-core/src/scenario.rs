//! Synthetic hailstone sets with a known rock, for tests and benchmarks.

use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

use crate::{Hailstone, Vec3};

/// Upper bound for generated hit times.
const MAX_HIT_TIME: i64 = 1_000_000;

/// A rock with known position and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RockSpec {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Generate `count` hailstones that `rock` hits at distinct times in `1..=MAX_HIT_TIME`.
///
/// Velocities are drawn from `[-max_speed, max_speed]³` and never equal the
/// rock's own velocity, so every stone has a nonzero relative velocity.
///
/// # Panics
///
/// Panics if `max_speed` is not positive, if `count` exceeds the number of
/// distinct hit times, or if a generated position could overflow i64.
pub fn generate_scenario(
    rock: &RockSpec,
    count: usize,
    max_speed: i64,
    rng: &mut impl Rng,
) -> Vec<Hailstone> {
    assert!(max_speed > 0, "max_speed must be positive");
    assert!(
        count as u64 <= MAX_HIT_TIME as u64,
        "count must not exceed the {} distinct hit times",
        MAX_HIT_TIME
    );
    let reach = (0..3)
        .map(|axis| {
            let drift = (rock.velocity[axis] as i128).abs() + max_speed as i128;
            (rock.position[axis] as i128).abs() + MAX_HIT_TIME as i128 * drift
        })
        .max()
        .unwrap_or(0);
    assert!(
        reach <= i64::MAX as i128,
        "rock position and max_speed would place hailstones outside i64"
    );

    let mut used_times = HashSet::with_capacity(count);
    let mut hailstones = Vec::with_capacity(count);

    while hailstones.len() < count {
        let velocity: Vec3 = [
            rng.gen_range(-max_speed..=max_speed),
            rng.gen_range(-max_speed..=max_speed),
            rng.gen_range(-max_speed..=max_speed),
        ];
        if velocity == rock.velocity {
            continue;
        }

        let t = rng.gen_range(1..=MAX_HIT_TIME);
        if !used_times.insert(t) {
            continue;
        }

        // R + tS = p + tv  =>  p = R + t(S - v)
        let mut position = [0i64; 3];
        for axis in 0..3 {
            position[axis] = rock.position[axis] + t * (rock.velocity[axis] - velocity[axis]);
        }
        hailstones.push(Hailstone { position, velocity });
    }

    hailstones
}
