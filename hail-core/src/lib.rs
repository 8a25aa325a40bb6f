//! Shared types, input parsing, and scenario generation for the rock-throw experiments.
//!
//! A hailstone is a point moving with constant integer velocity through
//! integer time steps. Everything that looks at hailstones (the XY crossing
//! count, the velocity search, the CRT reconstruction) starts from the
//! [`Hailstone`] defined here.

pub mod crossing;
pub mod scenario;

use serde::Serialize;
use std::fmt;
use std::path::Path;

pub use crossing::{count_crossings_in_area, crossing_xy, CrossPoint, Crossing};
pub use scenario::{generate_scenario, RockSpec};

/// Integer 3-vector, indexed x = 0, y = 1, z = 2.
pub type Vec3 = [i64; 3];

/// Axis labels in index order.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// A hailstone: starting position and constant velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Hailstone {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Hailstone {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// Position after `t` steps, widened to i128 so large inputs cannot overflow.
    pub fn position_at(&self, t: i128) -> [i128; 3] {
        let mut out = [0i128; 3];
        for axis in 0..3 {
            out[axis] = self.position[axis] as i128 + t * self.velocity[axis] as i128;
        }
        out
    }
}

impl fmt::Display for Hailstone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        let [vx, vy, vz] = self.velocity;
        write!(f, "{}, {}, {} @ {}, {}, {}", x, y, z, vx, vy, vz)
    }
}

/// Errors raised while reading hailstone input.
#[derive(Debug, thiserror::Error)]
pub enum HailError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse hailstones from `x, y, z @ vx, vy, vz` lines. Blank lines are skipped.
pub fn parse_hailstones(text: &str) -> Result<Vec<Hailstone>, HailError> {
    let mut hailstones = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let (pos, vel) = line.split_once('@').ok_or_else(|| HailError::Parse {
            line: line_no,
            reason: "missing '@' between position and velocity".to_string(),
        })?;

        let position = parse_triple(pos, line_no, "position")?;
        let velocity = parse_triple(vel, line_no, "velocity")?;
        hailstones.push(Hailstone { position, velocity });
    }

    log::debug!("Parsed {} hailstones", hailstones.len());
    Ok(hailstones)
}

/// Read and parse a hailstone file.
pub fn load_hailstones(path: impl AsRef<Path>) -> Result<Vec<Hailstone>, HailError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_hailstones(&text)
}

fn parse_triple(s: &str, line: usize, what: &str) -> Result<Vec3, HailError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(HailError::Parse {
            line,
            reason: format!("{} has {} components, expected 3", what, parts.len()),
        });
    }

    let mut out = [0i64; 3];
    for (slot, token) in out.iter_mut().zip(&parts) {
        *slot = token.parse::<i64>().map_err(|_| HailError::Parse {
            line,
            reason: format!("{} component '{}' is not an integer", what, token),
        })?;
    }
    Ok(out)
}
