/// Rep scoring
///
/// Turns a finished rep's accumulator into a 0-100 score and the ordered
/// list of faults that were deducted.

use crate::config::EngineConfig;
use crate::models::{LeanFault, RepAccumulator, RepFault, RepScore, Side};

const SHALLOW_PENALTY: i32 = 50;
const VALGUS_PENALTY: i32 = 20;
const ASYMMETRY_WARN_PENALTY: i32 = 10;
const ASYMMETRY_CRIT_PENALTY: i32 = 20;
const HIP_SHIFT_PENALTY: i32 = 15;
const LEAN_PENALTY: i32 = 10;
const MISMATCH_PENALTY: i32 = 15;
const FALLING_PENALTY: i32 = 20;
const EXCESSIVE_LEAN_PENALTY: i32 = 25;
const SPEED_PENALTY: i32 = 15;

/// Score a completed rep
pub fn score_rep(rep: &RepAccumulator, config: &EngineConfig) -> RepScore {
    let mut score: i32 = 100;
    let mut faults = Vec::new();

    if rep.min_angle >= config.phase.parallel_angle {
        score -= SHALLOW_PENALTY;
        faults.push(RepFault::ShallowDepth);
    }

    if rep.valgus {
        score -= VALGUS_PENALTY;
        faults.push(RepFault::KneeValgus);
    }

    if rep.asymmetry {
        let side = rep.asymmetry_side.unwrap_or(Side::Left);
        score -= if rep.max_asymmetry > config.asymmetry.asymmetry_crit {
            ASYMMETRY_CRIT_PENALTY
        } else {
            ASYMMETRY_WARN_PENALTY
        };
        faults.push(RepFault::Asymmetry(side));
    }

    if rep.hip_shift {
        let side = rep.hip_shift_side.unwrap_or(Side::Left);
        score -= HIP_SHIFT_PENALTY;
        faults.push(RepFault::HipShift(side));
    }

    if rep.lean {
        let (penalty, fault) = if rep.max_lean_excess > config.lean.lean_crit {
            (EXCESSIVE_LEAN_PENALTY, RepFault::ExcessiveLean)
        } else {
            match rep.lean_fault {
                Some(LeanFault::Falling) => (FALLING_PENALTY, RepFault::FallingForward),
                Some(LeanFault::Mismatch) => (MISMATCH_PENALTY, RepFault::TorsoShinMismatch),
                _ => (LEAN_PENALTY, RepFault::TorsoLean),
            }
        };
        score -= penalty;
        faults.push(fault);
    }

    if rep.too_fast {
        score -= SPEED_PENALTY;
        faults.push(RepFault::TooFast);
    }

    RepScore {
        score: score.clamp(0, 100) as u8,
        faults,
    }
}
