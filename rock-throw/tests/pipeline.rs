//! End-to-end tests: parse → filter → reconstruct → locate.

use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hail_core::{generate_scenario, load_hailstones, parse_hailstones, Hailstone, RockSpec};
use rock_throw::{
    filter_candidates, locate_rock, reconstruct, solve, velocity_is_consistent, AxisRange,
    SearchBox, SolveError,
};

const EXAMPLE: &str = "\
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

fn example() -> Vec<Hailstone> {
    parse_hailstones(EXAMPLE).unwrap()
}

fn around(v: [i64; 3], radius: i64) -> SearchBox {
    SearchBox::new(
        AxisRange::new(v[0] - radius, v[0] + radius),
        AxisRange::new(v[1] - radius, v[1] + radius),
        AxisRange::new(v[2] - radius, v[2] + radius),
    )
}

// ============================================================
// Worked example
// ============================================================

#[test]
fn test_example_end_to_end() {
    let stones = example();
    let solution = solve(&stones, &SearchBox::single([-3, 1, 2])).unwrap();

    assert_eq!(solution.selected, [-3, 1, 2]);
    let residues: Vec<BigInt> = solution
        .reconstruction
        .axes
        .iter()
        .map(|a| a.residue.clone())
        .collect();
    assert_eq!(residues, vec![BigInt::from(0), BigInt::from(1), BigInt::from(10)]);
    assert_eq!(solution.residue_sum(), &BigInt::from(11));

    let rock = solution.located.as_ref().unwrap();
    assert_eq!(rock.position, [24, 13, 10]);
    assert_eq!(solution.position_sum(), Some(47));
    assert!(solution.reconstruction.admits(&rock.position));
}

#[test]
fn test_example_box_containing_velocity() {
    let stones = example();
    let search = around([-3, 1, 2], 3);
    let candidates = filter_candidates(&stones, &search);
    assert!(candidates.contains(&[-3, 1, 2]));
    assert!(locate_rock(&stones, &[-3, 1, 2]).is_some());
}

#[test]
fn test_example_box_excluding_velocity() {
    let stones = example();
    let search = SearchBox::new(
        AxisRange::new(100, 110),
        AxisRange::new(100, 110),
        AxisRange::new(100, 110),
    );
    assert!(filter_candidates(&stones, &search).is_empty());
    match solve(&stones, &search) {
        Err(SolveError::NoSolution { searched }) => assert_eq!(searched, 11 * 11 * 11),
        other => panic!("expected NoSolution, got {other:?}"),
    }
}

#[test]
fn test_example_pipeline_is_idempotent() {
    let stones = example();
    let search = around([0, 0, 0], 4);
    assert_eq!(solve(&stones, &search).unwrap(), solve(&stones, &search).unwrap());
}

#[test]
fn test_example_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hail.txt");
    std::fs::write(&path, EXAMPLE).unwrap();

    let stones = load_hailstones(&path).unwrap();
    let solution = solve(&stones, &SearchBox::single([-3, 1, 2])).unwrap();
    assert_eq!(solution.position_sum(), Some(47));
}

// ============================================================
// Generated scenarios
// ============================================================

fn scenario(seed: u64, count: usize) -> (RockSpec, Vec<Hailstone>) {
    let rock = RockSpec {
        position: [24_680, -13_579, 10_203],
        velocity: [-3, 1, 2],
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let stones = generate_scenario(&rock, count, 25, &mut rng);
    (rock, stones)
}

#[test]
fn test_true_velocity_always_consistent() {
    for seed in 0..10 {
        let (rock, stones) = scenario(seed, 30);
        assert!(
            velocity_is_consistent(&stones, &rock.velocity),
            "seed {seed}"
        );
    }
}

#[test]
fn test_residues_admit_true_position() {
    for seed in 0..10 {
        let (rock, stones) = scenario(seed, 30);
        let rec = reconstruct(&stones, &rock.velocity).unwrap();
        let position = rock.position.map(i128::from);
        assert!(rec.admits(&position), "seed {seed}");
    }
}

#[test]
fn test_locate_recovers_generated_rock() {
    for seed in 0..10 {
        let (rock, stones) = scenario(seed, 30);
        let found = locate_rock(&stones, &rock.velocity).unwrap();
        assert_eq!(found.position, rock.position.map(i128::from), "seed {seed}");
        assert!(found.hit_times.iter().all(|&t| t > 0));
    }
}

#[test]
fn test_search_box_keeps_true_velocity() {
    let (rock, stones) = scenario(99, 40);
    let candidates = filter_candidates(&stones, &around(rock.velocity, 2));
    assert!(candidates.contains(&rock.velocity));
}

#[test]
fn test_degenerate_candidate_never_passes() {
    let (_, stones) = scenario(5, 10);
    let taken = stones[3].velocity;
    assert!(!velocity_is_consistent(&stones, &taken));
    assert!(!filter_candidates(&stones, &SearchBox::single(taken)).contains(&taken));
}
