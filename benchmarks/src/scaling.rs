//! Scaling runs for the velocity filter.
//!
//! Generates hailstone sets around a fixed rock and measures how filter time
//! and the number of surviving velocities change with the hailstone count
//! and with the size of the search box. Results go to stdout and to
//! `scaling_results.json` (override with `--json=<path>`).

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use hail_core::{generate_scenario, Hailstone, RockSpec};
use rock_throw::{filter_candidates, locate_rock, reconstruct, AxisRange, SearchBox};

const ROCK: RockSpec = RockSpec {
    position: [24_680, -13_579, 10_203],
    velocity: [-3, 1, 2],
};

const MAX_SPEED: i64 = 50;

#[derive(Debug, Serialize)]
struct ScalingRow {
    hailstones: usize,
    box_radius: i64,
    box_size: u64,
    passing: usize,
    true_velocity_first: bool,
    located: bool,
    filter_ms: f64,
    reconstruct_ms: f64,
}

#[derive(Debug, Serialize)]
struct ScalingReport {
    rock: RockSpec,
    max_speed: i64,
    by_hailstones: Vec<ScalingRow>,
    by_box: Vec<ScalingRow>,
}

fn cube(radius: i64) -> SearchBox {
    let axis = AxisRange::new(-radius, radius);
    SearchBox::new(axis, axis, axis)
}

fn measure(stones: &[Hailstone], radius: i64) -> ScalingRow {
    let search = cube(radius);

    let start = Instant::now();
    let passing = filter_candidates(stones, &search);
    let filter_ms = start.elapsed().as_secs_f64() * 1e3;

    let start = Instant::now();
    let rebuilt = reconstruct(stones, &ROCK.velocity);
    let reconstruct_ms = start.elapsed().as_secs_f64() * 1e3;
    if let Err(e) = rebuilt {
        log::warn!("Reconstruction failed for {} stones: {}", stones.len(), e);
    }

    ScalingRow {
        hailstones: stones.len(),
        box_radius: radius,
        box_size: search.len(),
        passing: passing.len(),
        true_velocity_first: passing.first() == Some(&ROCK.velocity),
        located: locate_rock(stones, &ROCK.velocity).is_some(),
        filter_ms,
        reconstruct_ms,
    }
}

fn print_header() {
    println!(
        "  {:>6} {:>7} {:>9} {:>8} {:>7} {:>8} {:>11} {:>11}",
        "stones", "radius", "box", "passing", "first", "located", "filter_ms", "rebuild_ms"
    );
    println!("  {}", "-".repeat(76));
}

fn print_row(row: &ScalingRow) {
    println!(
        "  {:>6} {:>7} {:>9} {:>8} {:>7} {:>8} {:>11.3} {:>11.3}",
        row.hailstones,
        row.box_radius,
        row.box_size,
        row.passing,
        if row.true_velocity_first { "yes" } else { "no" },
        if row.located { "yes" } else { "no" },
        row.filter_ms,
        row.reconstruct_ms
    );
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json_path = args
        .iter()
        .find_map(|a| a.strip_prefix("--json="))
        .unwrap_or("scaling_results.json")
        .to_string();

    println!("================================================================");
    println!("  SCALING: velocity filter vs hailstone count and box size");
    println!("================================================================\n");
    println!(
        "  Rock: {:?} @ {:?}, hailstone speeds up to {}\n",
        ROCK.position, ROCK.velocity, MAX_SPEED
    );

    let mut rng = StdRng::seed_from_u64(12345);

    // ========================================================================
    // Hailstone count, fixed box
    // ========================================================================

    println!("  Fixed box radius 10, growing hailstone count:\n");
    print_header();
    let mut by_hailstones = Vec::new();
    for count in [5usize, 10, 20, 50, 100, 200] {
        let stones = generate_scenario(&ROCK, count, MAX_SPEED, &mut rng);
        let row = measure(&stones, 10);
        print_row(&row);
        by_hailstones.push(row);
    }
    println!();

    // ========================================================================
    // Box size, fixed hailstone count
    // ========================================================================

    println!("  Fixed 50 hailstones, growing box radius:\n");
    print_header();
    let stones = generate_scenario(&ROCK, 50, MAX_SPEED, &mut rng);
    let mut by_box = Vec::new();
    for radius in [3i64, 5, 10, 20, 40] {
        let row = measure(&stones, radius);
        print_row(&row);
        by_box.push(row);
    }
    println!();

    let report = ScalingReport {
        rock: ROCK,
        max_speed: MAX_SPEED,
        by_hailstones,
        by_box,
    };
    save_json(Path::new(&json_path), &report);
}

fn save_json<T: Serialize>(path: &Path, data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, &json) {
                eprintln!("  Warning: failed to write {}: {}", path.display(), e);
            } else {
                println!("Results saved to {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("  Warning: failed to serialize {}: {}", path.display(), e);
        }
    }
}
