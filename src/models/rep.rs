use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body side a fault is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "LEFT"),
            Side::Right => write!(f, "RIGHT"),
        }
    }
}

/// Which torso-lean check fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeanFault {
    /// Sustained lean beyond the depth-scaled limit
    Static,
    /// Torso pitched forward during the descent
    Falling,
    /// Large frame-to-frame torso swings
    Instability,
    /// Torso steeper than the shins
    Mismatch,
}

/// Named fault contributing to a rep score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepFault {
    ShallowDepth,
    KneeValgus,
    Asymmetry(Side),
    HipShift(Side),
    TorsoLean,
    TorsoShinMismatch,
    FallingForward,
    ExcessiveLean,
    TooFast,
}

impl RepFault {
    /// Label shown to the user and sent to coaching consumers
    pub fn label(&self) -> String {
        match self {
            RepFault::ShallowDepth => "GO DEEPER".to_string(),
            RepFault::KneeValgus => "KNEE VALGUS".to_string(),
            RepFault::Asymmetry(side) => format!("ASYMMETRY ({})", side),
            RepFault::HipShift(side) => format!("HIP SHIFT ({})", side),
            RepFault::TorsoLean => "TORSO LEAN".to_string(),
            RepFault::TorsoShinMismatch => "TORSO/SHIN MISMATCH".to_string(),
            RepFault::FallingForward => "FALLING FORWARD".to_string(),
            RepFault::ExcessiveLean => "EXCESSIVE LEAN".to_string(),
            RepFault::TooFast => "TOO FAST".to_string(),
        }
    }
}

impl std::fmt::Display for RepFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything observed about the rep in progress
///
/// Replaced wholesale at every rep boundary, never patched field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct RepAccumulator {
    pub min_angle: f32,
    pub depth_reached: bool,
    pub deep_reached: bool,
    pub descent_start_ms: i64,
    pub ascent_start_ms: Option<i64>,
    pub descent_start_torso: Option<f32>,
    /// Hip center x and hip width when the descent began
    pub hip_baseline: Option<(f32, f32)>,

    pub valgus: bool,
    pub max_valgus_deviation: f32,
    pub valgus_side: Option<Side>,

    pub asymmetry: bool,
    pub max_asymmetry: f32,
    pub asymmetry_side: Option<Side>,

    pub hip_shift: bool,
    pub max_hip_shift: f32,
    pub hip_shift_side: Option<Side>,

    pub lean: bool,
    pub max_lean_excess: f32,
    pub lean_fault: Option<LeanFault>,

    pub too_fast: bool,
}

impl RepAccumulator {
    /// Fresh accumulator for a rep starting at `angle`
    pub fn start(angle: f32, now_ms: i64) -> Self {
        Self {
            min_angle: angle,
            depth_reached: false,
            deep_reached: false,
            descent_start_ms: now_ms,
            ascent_start_ms: None,
            descent_start_torso: None,
            hip_baseline: None,
            valgus: false,
            max_valgus_deviation: 0.0,
            valgus_side: None,
            asymmetry: false,
            max_asymmetry: 0.0,
            asymmetry_side: None,
            hip_shift: false,
            max_hip_shift: 0.0,
            hip_shift_side: None,
            lean: false,
            max_lean_excess: 0.0,
            lean_fault: None,
            too_fast: false,
        }
    }

    /// Track the running minimum angle (never increases within a rep)
    pub fn track_angle(&mut self, angle: f32) {
        if angle < self.min_angle {
            self.min_angle = angle;
        }
    }

    /// Record a lean fault, keeping the most severe variant seen this rep
    pub fn record_lean(&mut self, fault: LeanFault) {
        self.lean = true;
        let rank = |f: Option<LeanFault>| match f {
            None => 0,
            Some(LeanFault::Instability) | Some(LeanFault::Static) => 1,
            Some(LeanFault::Mismatch) => 2,
            Some(LeanFault::Falling) => 3,
        };
        if rank(Some(fault)) > rank(self.lean_fault) {
            self.lean_fault = Some(fault);
        }
    }
}

impl Default for RepAccumulator {
    fn default() -> Self {
        Self::start(180.0, 0)
    }
}

/// Score of a completed rep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepScore {
    /// 0-100
    pub score: u8,
    /// Faults in the order they were deducted
    pub faults: Vec<RepFault>,
}

impl RepScore {
    /// Fault labels in deduction order
    pub fn fault_labels(&self) -> Vec<String> {
        self.faults.iter().map(RepFault::label).collect()
    }
}

/// History entry for one completed rep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRecord {
    pub rep_number: u32,
    pub score: u8,
    pub faults: Vec<RepFault>,
    pub min_angle: f32,
    pub descent_ms: Option<i64>,
    pub duration_ms: i64,
    pub completed_at_ms: i64,
}

/// Aggregate view over the session's rep history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_reps: u32,
    pub average_score: Option<f64>,
    pub best_score: Option<u8>,
    pub worst_score: Option<u8>,
    /// Occurrences per fault label
    pub fault_counts: BTreeMap<String, u32>,
    pub recent: Vec<RepRecord>,
}

impl SessionSummary {
    /// Summarize rep records, keeping the last `recent` of them verbatim
    pub fn from_records(total_reps: u32, records: &[RepRecord], recent: usize) -> Self {
        let average_score = if records.is_empty() {
            None
        } else {
            let sum: f64 = records.iter().map(|r| r.score as f64).sum();
            Some(sum / records.len() as f64)
        };

        let mut fault_counts = BTreeMap::new();
        for fault in records.iter().flat_map(|r| r.faults.iter()) {
            *fault_counts.entry(fault.label()).or_insert(0) += 1;
        }

        let start = records.len().saturating_sub(recent);

        Self {
            total_reps,
            average_score,
            best_score: records.iter().map(|r| r.score).max(),
            worst_score: records.iter().map(|r| r.score).min(),
            fault_counts,
            recent: records[start..].to_vec(),
        }
    }

    /// Serialize for the coaching/telemetry collaborator
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
