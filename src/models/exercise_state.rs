use serde::{Deserialize, Serialize};

use super::rep::RepFault;

/// Movement phase of the squat state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Initializing,
    Neutral,
    Descending,
    Ascending,
}

impl Phase {
    /// Phases during which baselines are (re)calibrated
    pub fn is_calibrating(&self) -> bool {
        matches!(self, Phase::Initializing | Phase::Neutral)
    }

    /// Phases that belong to an active rep
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Descending | Phase::Ascending)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Initializing => write!(f, "INITIALIZING"),
            Phase::Neutral => write!(f, "NEUTRAL"),
            Phase::Descending => write!(f, "DESCENDING"),
            Phase::Ascending => write!(f, "ASCENDING"),
        }
    }
}

/// Confidence tier of the current frame's joint estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackingMode {
    /// Both legs individually visible
    Optimal,
    /// Only one leg visible, its angle stands in for both
    Degraded,
    /// Skeleton interpolated or held by the stabilizer
    Estimated,
    /// No usable skeleton
    Lost,
}

/// Display color of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackColor {
    White,
    Green,
    Yellow,
    Orange,
    Red,
}

impl FeedbackColor {
    /// CSS color for the rendering layer
    pub fn hex(&self) -> &'static str {
        match self {
            FeedbackColor::White => "#ffffff",
            FeedbackColor::Green => "#00ff88",
            FeedbackColor::Yellow => "#ffd400",
            FeedbackColor::Orange => "#ff8c00",
            FeedbackColor::Red => "#ff3b30",
        }
    }
}

/// Verdict on the most recent completed rep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepVerdict {
    Good,
    Bad,
}

impl RepVerdict {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            RepVerdict::Good
        } else {
            RepVerdict::Bad
        }
    }
}

/// Boolean overlays for the skeleton renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualFlags {
    pub valgus: bool,
    pub deep: bool,
    pub lean: bool,
    pub hip_shift: bool,
    pub asymmetry: bool,
    /// Calibrated standing knee height, for drawing the depth target
    pub knee_baseline_y: Option<f32>,
}

/// Message and color shown for the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub color: FeedbackColor,
}

impl Feedback {
    pub fn new(message: impl Into<String>, color: FeedbackColor) -> Self {
        Self {
            message: message.into(),
            color,
        }
    }
}

/// Per-frame output of the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseState {
    pub phase: Phase,
    /// Smoothed knee angle in degrees
    pub angle: f32,
    pub rep_count: u32,
    pub feedback: Feedback,
    pub rep_verdict: Option<RepVerdict>,
    /// True only on the frame a rep is counted
    pub rep_completed: bool,
    pub tracking_mode: TrackingMode,
    pub flags: VisualFlags,
    /// Score of the last completed rep
    pub last_score: Option<u8>,
    /// Minimum angle of the rep in progress
    pub current_min_angle: f32,
    pub depth_reached: bool,
    /// Faults behind `last_score`
    pub last_faults: Vec<RepFault>,
}

impl ExerciseState {
    /// Fault labels behind the last score
    pub fn last_fault_labels(&self) -> Vec<String> {
        self.last_faults.iter().map(RepFault::label).collect()
    }
}
