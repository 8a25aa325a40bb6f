//! Exact rock position for a known velocity.
//!
//! Seen from a frame moving with the rock, every hailstone travels along
//! `p + t(v - S)` and all of those lines pass through the rock's start R.
//! Two non-parallel lines pin R; every other stone is then checked for a
//! non-negative integer hit time. Arithmetic is i128, which covers inputs
//! with coordinates around 1e15 and speeds in the thousands.

use serde::Serialize;

use hail_core::{Hailstone, Vec3};

type Vec3Wide = [i128; 3];

/// A rock start position that hits every hailstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rock {
    pub position: Vec3Wide,
    pub velocity: Vec3,
    /// Hit time per hailstone, in input order.
    pub hit_times: Vec<i128>,
}

impl Rock {
    pub fn coordinate_sum(&self) -> i128 {
        self.position.iter().sum()
    }
}

fn widen(v: &Vec3) -> Vec3Wide {
    v.map(i128::from)
}

fn sub(a: &Vec3Wide, b: &Vec3Wide) -> Vec3Wide {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: &Vec3Wide, b: &Vec3Wide) -> Vec3Wide {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: &Vec3Wide, b: &Vec3Wide) -> i128 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn relative_velocity(stone: &Hailstone, velocity: &Vec3) -> Vec3Wide {
    sub(&widen(&stone.velocity), &widen(velocity))
}

/// Non-negative integer time at which `stone` reaches `position`, if any.
fn hit_time(stone: &Hailstone, position: &Vec3Wide, velocity: &Vec3) -> Option<i128> {
    let w = relative_velocity(stone, velocity);
    let offset = sub(position, &widen(&stone.position));

    let Some(axis) = (0..3).find(|&a| w[a] != 0) else {
        // Same velocity as the rock: they only meet if they start together.
        return (offset == [0, 0, 0]).then_some(0);
    };

    if offset[axis] % w[axis] != 0 {
        return None;
    }
    let t = offset[axis] / w[axis];
    if t < 0 {
        return None;
    }
    let rock_at: Vec3Wide = std::array::from_fn(|a| position[a] + t * i128::from(velocity[a]));
    (stone.position_at(t) == rock_at).then_some(t)
}

/// Hit times for every hailstone if a rock at `position` moving at `velocity` hits them all.
pub fn verify_rock(hailstones: &[Hailstone], position: &Vec3Wide, velocity: &Vec3) -> Option<Vec<i128>> {
    hailstones
        .iter()
        .map(|stone| hit_time(stone, position, velocity))
        .collect()
}

/// Candidate start from the first two non-parallel relative paths.
fn intersect_paths(hailstones: &[Hailstone], velocity: &Vec3) -> Option<Vec3Wide> {
    let relative: Vec<Vec3Wide> = hailstones
        .iter()
        .map(|stone| relative_velocity(stone, velocity))
        .collect();

    // A stone moving with the rock must share its start.
    if let Some(i) = relative.iter().position(|w| *w == [0, 0, 0]) {
        return Some(widen(&hailstones[i].position));
    }

    for i in 0..hailstones.len() {
        for j in i + 1..hailstones.len() {
            let (wi, wj) = (&relative[i], &relative[j]);
            let normal = cross(wi, wj);
            let den = dot(&normal, &normal);
            if den == 0 {
                continue;
            }

            let pi = widen(&hailstones[i].position);
            let pj = widen(&hailstones[j].position);
            let num = dot(&cross(&sub(&pj, &pi), wj), &normal);
            if num % den != 0 {
                log::debug!("Paths {} and {} meet at a fractional time", i, j);
                return None;
            }
            let a = num / den;
            if a < 0 {
                log::debug!("Paths {} and {} meet in the past", i, j);
                return None;
            }
            return Some([pi[0] + a * wi[0], pi[1] + a * wi[1], pi[2] + a * wi[2]]);
        }
    }

    None
}

/// Exact rock start for `velocity`, verified against every hailstone.
pub fn locate_rock(hailstones: &[Hailstone], velocity: &Vec3) -> Option<Rock> {
    let position = intersect_paths(hailstones, velocity)?;
    match verify_rock(hailstones, &position, velocity) {
        Some(hit_times) => Some(Rock {
            position,
            velocity: *velocity,
            hit_times,
        }),
        None => {
            log::warn!(
                "Start {:?} for velocity {:?} misses at least one hailstone",
                position,
                velocity
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Vec<Hailstone> {
        vec![
            Hailstone::new([19, 13, 30], [-2, 1, -2]),
            Hailstone::new([18, 19, 22], [-1, -1, -2]),
            Hailstone::new([20, 25, 34], [-2, -2, -4]),
            Hailstone::new([12, 31, 28], [-1, -2, -1]),
            Hailstone::new([20, 19, 15], [1, -5, -3]),
        ]
    }

    #[test]
    fn test_locate_example() {
        let rock = locate_rock(&example(), &[-3, 1, 2]).unwrap();
        assert_eq!(rock.position, [24, 13, 10]);
        assert_eq!(rock.hit_times, vec![5, 3, 4, 6, 1]);
        assert_eq!(rock.coordinate_sum(), 47);
    }

    #[test]
    fn test_locate_wrong_velocity() {
        // Passes the modular filter but no single start hits every stone.
        assert_eq!(locate_rock(&example(), &[-4, 0, 2]), None);
    }

    #[test]
    fn test_verify_rejects_wrong_position() {
        assert!(verify_rock(&example(), &[24, 13, 10], &[-3, 1, 2]).is_some());
        assert!(verify_rock(&example(), &[24, 13, 11], &[-3, 1, 2]).is_none());
    }

    #[test]
    fn test_verify_rejects_past_hit() {
        // Stone at 0 moving +1 along x; rock starting at -5 at rest would need t = -5.
        let stones = [Hailstone::new([0, 0, 0], [1, 0, 0])];
        assert!(verify_rock(&stones, &[-5, 0, 0], &[0, 0, 0]).is_none());
        assert_eq!(verify_rock(&stones, &[5, 0, 0], &[0, 0, 0]), Some(vec![5]));
    }

    #[test]
    fn test_shared_velocity_pins_start() {
        let mut stones = example();
        // A stone moving exactly like the rock, starting where the rock starts.
        stones.insert(0, Hailstone::new([24, 13, 10], [-3, 1, 2]));
        let rock = locate_rock(&stones, &[-3, 1, 2]).unwrap();
        assert_eq!(rock.position, [24, 13, 10]);
        assert_eq!(rock.hit_times[0], 0);
    }

    #[test]
    fn test_single_stone_is_underdetermined() {
        assert_eq!(locate_rock(&example()[..1], &[-3, 1, 2]), None);
    }
}
