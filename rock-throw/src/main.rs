//! rock-throw CLI: count XY crossings, then search for a rock that hits every hailstone.
//!
//! Usage:
//!   rock-throw <input> [--vx=lo..hi] [--vy=lo..hi] [--vz=lo..hi] [--area=lo..hi]
//!              [--config=<file.json>] [--json=<path>]
//!
//! Set RUST_LOG=debug to see every passing velocity and per-axis CRT detail.

use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use hail_core::{count_crossings_in_area, load_hailstones, AXIS_NAMES};
use rock_throw::config::SolverConfig;
use rock_throw::{solve, RockSolution, SearchBox};

/// What gets written by `--json`.
#[derive(Serialize)]
struct RunReport<'a> {
    hailstones: usize,
    test_area: [i64; 2],
    crossings_in_area: usize,
    search_box: SearchBox,
    wall_seconds: f64,
    solution: &'a RockSolution,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match SolverConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Usage: rock-throw <input> [--vx=lo..hi] [--vy=lo..hi] [--vz=lo..hi]");
            eprintln!("                  [--area=lo..hi] [--config=<file.json>] [--json=<path>]");
            std::process::exit(1);
        }
    };

    let Some(input) = config.input.as_ref() else {
        eprintln!("Error: no input file given");
        std::process::exit(1);
    };

    let hailstones = match load_hailstones(input) {
        Ok(stones) => stones,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    println!("========================================");
    println!("  rock-throw");
    println!("========================================");
    println!("  Input:       {} ({} hailstones)", input.display(), hailstones.len());
    println!("  Search box:  {} ({} velocities)", config.search_box, config.search_box.len());
    println!();

    let start = Instant::now();

    let area = config.test_area;
    let crossings = count_crossings_in_area(&hailstones, area.lo, area.hi);
    println!("XY crossings inside {}: {}", area, crossings);
    println!();

    let solution = match solve(&hailstones, &config.search_box) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed().as_secs_f64();

    print_solution(&solution);
    println!();
    println!("Wall time: {:.2}s", elapsed);

    if let Some(path) = config.json_output.as_ref() {
        let report = RunReport {
            hailstones: hailstones.len(),
            test_area: [area.lo, area.hi],
            crossings_in_area: crossings,
            search_box: config.search_box,
            wall_seconds: elapsed,
            solution: &solution,
        };
        save_json(path, &report);
    }
}

fn print_solution(solution: &RockSolution) {
    println!("Consistent velocities: {}", solution.candidates.len());
    for v in solution.candidates.iter().take(10) {
        println!("  {:?}", v);
    }
    if solution.candidates.len() > 10 {
        println!("  ... {} more", solution.candidates.len() - 10);
    }
    println!();

    println!("Selected velocity: {:?}", solution.selected);
    for (name, axis) in AXIS_NAMES.iter().zip(&solution.reconstruction.axes) {
        println!(
            "  {}: {} mod {}  ({} combined, {} skipped)",
            name, axis.residue, axis.modulus, axis.combined, axis.skipped
        );
    }
    println!("Residue sum: {}", solution.residue_sum());
    println!();

    match &solution.located {
        Some(rock) => {
            println!("Rock start:  {:?}", rock.position);
            println!("Position sum: {}", rock.coordinate_sum());
            if !solution.residues_pin_position() {
                println!("  (residues do not pin the start; moduli are too small)");
            }
        }
        None => println!("Rock start:  not verified for this velocity"),
    }
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
