//! Rock throw: find an integer rock trajectory that hits every hailstone.
//!
//! The rock's velocity is guessed from a bounded box. For each guess every
//! hailstone induces one congruence per axis on the rock's start position,
//! and a guess survives only if those congruences are pairwise consistent.
//! The first survivor is turned into per-axis residues by partial CRT and,
//! separately, into an exact start position by intersecting two paths.

pub mod arith;
pub mod config;
pub mod filter;
pub mod locate;
pub mod reconstruct;
pub mod reduce;

use num_bigint::BigInt;
use serde::Serialize;

use hail_core::{Hailstone, Vec3};

pub use filter::{filter_candidates, velocity_is_consistent, AxisRange, SearchBox};
pub use locate::{locate_rock, verify_rock, Rock};
pub use reconstruct::{reconstruct, AxisResidue, Reconstruction};
pub use reduce::{axis_congruences, reduced_step, AxisCongruence};

/// Errors from the velocity search and reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("no hailstones to solve against")]
    NoHailstones,

    #[error("no solution found: none of {searched} candidate velocities passed")]
    NoSolution { searched: u64 },

    #[error("velocity {velocity:?} gives no usable step against hailstone {index}")]
    DegenerateVelocity { velocity: Vec3, index: usize },
}

/// Everything the search produced for one hailstone set and box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RockSolution {
    /// Passing velocities in enumeration order.
    pub candidates: Vec<Vec3>,
    /// The first passing velocity.
    pub selected: Vec3,
    pub reconstruction: Reconstruction,
    /// Exact start for `selected`, when two paths pin one that hits every stone.
    pub located: Option<Rock>,
}

impl RockSolution {
    /// Sum of the three reconstructed residues.
    pub fn residue_sum(&self) -> &BigInt {
        &self.reconstruction.residue_sum
    }

    /// Coordinate sum of the located rock, if any.
    pub fn position_sum(&self) -> Option<i128> {
        self.located.as_ref().map(Rock::coordinate_sum)
    }

    /// Whether the residues equal the located coordinates exactly.
    pub fn residues_pin_position(&self) -> bool {
        match &self.located {
            Some(rock) => self
                .reconstruction
                .axes
                .iter()
                .zip(&rock.position)
                .all(|(axis, &c)| axis.residue == BigInt::from(c)),
            None => false,
        }
    }
}

/// Filter `search`, pick the first passing velocity, and reconstruct the rock.
pub fn solve(hailstones: &[Hailstone], search: &SearchBox) -> Result<RockSolution, SolveError> {
    if hailstones.is_empty() {
        return Err(SolveError::NoHailstones);
    }

    let candidates = filter_candidates(hailstones, search);
    let selected = *candidates.first().ok_or(SolveError::NoSolution {
        searched: search.len(),
    })?;
    if candidates.len() > 1 {
        log::info!(
            "{} velocities passed; taking the first, {:?}",
            candidates.len(),
            selected
        );
    }

    let reconstruction = reconstruct(hailstones, &selected)?;
    log::info!(
        "Residue sum for velocity {:?}: {}",
        selected,
        reconstruction.residue_sum
    );

    let located = locate_rock(hailstones, &selected);
    match &located {
        Some(rock) if !reconstruction.admits(&rock.position) => {
            log::warn!("Located start {:?} disagrees with the residues", rock.position)
        }
        Some(rock) => log::info!("Rock starts at {:?}", rock.position),
        None => log::warn!("Could not verify an exact start for {:?}", selected),
    }

    Ok(RockSolution {
        candidates,
        selected,
        reconstruction,
        located,
    })
}
