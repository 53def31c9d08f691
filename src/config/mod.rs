use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AnalysisError;
use crate::services::fault_detector::FaultDetectorConfig;
use crate::services::landmark_stabilizer::StabilizerConfig;

/// Engine configuration
///
/// Every threshold of the analysis engine. Defaults are the tuned values;
/// any section or field may be overridden from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub phase: PhaseConfig,

    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub smoothing: SmoothingConfig,

    #[serde(default)]
    pub valgus: ValgusConfig,

    #[serde(default)]
    pub lean: LeanConfig,

    #[serde(default)]
    pub asymmetry: AsymmetryConfig,

    #[serde(default)]
    pub hip_shift: HipShiftConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Knee angle thresholds of the rep state machine (degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub standing_angle: f32,
    pub descent_start_angle: f32,
    pub parallel_angle: f32,
    pub deep_squat_angle: f32,
    /// Rise above the running minimum that confirms the ascent
    pub ascent_threshold: f32,
    /// Net drop from the ascent peak that counts as a new descent
    pub min_stand_delta: f32,
    /// Ascent frames required before a collapse counts as a new rep
    pub min_ascent_frames: u32,
    /// Frames after which initialization force-calibrates
    pub calibration_frames: u32,
    /// Descents faster than this are flagged
    pub speed_min_ms: i64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            standing_angle: 120.0,
            descent_start_angle: 115.0,
            parallel_angle: 110.0,
            deep_squat_angle: 65.0,
            ascent_threshold: 3.0,
            min_stand_delta: 3.0,
            min_ascent_frames: 5,
            calibration_frames: 30,
            speed_min_ms: 500,
        }
    }
}

/// Visibility gating and stabilizer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub visibility_min: f32,
    pub max_missing_frames: u32,
    pub trust_visibility: f32,
    pub distrust_visibility: f32,
    pub min_blend: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            visibility_min: 0.5,
            max_missing_frames: 10,
            trust_visibility: 0.7,
            distrust_visibility: 0.5,
            min_blend: 0.1,
        }
    }
}

impl TrackingConfig {
    pub fn stabilizer_config(&self) -> StabilizerConfig {
        StabilizerConfig {
            max_missing_frames: self.max_missing_frames,
            trust_visibility: self.trust_visibility,
            distrust_visibility: self.distrust_visibility,
            min_blend: self.min_blend,
        }
    }
}

/// Window lengths in frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub smoothing_frames: usize,
    pub torso_frames: usize,
    pub knee_baseline_frames: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            smoothing_frames: 5,
            torso_frames: 5,
            knee_baseline_frames: 10,
        }
    }
}

/// Knee valgus detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValgusConfig {
    pub valgus_on: f32,
    pub valgus_off: f32,
    pub confirm_frames: u32,
    pub clear_frames: u32,
    /// Standing frames before the knee/ankle width baseline is trusted
    pub calibration_frames: u32,
    pub baseline_window: usize,
    /// Inward knee travel past the ankle, in normalized width
    pub margin: f32,
}

impl Default for ValgusConfig {
    fn default() -> Self {
        Self {
            valgus_on: 0.18,
            valgus_off: 0.12,
            confirm_frames: 5,
            clear_frames: 3,
            calibration_frames: 20,
            baseline_window: 30,
            margin: 0.02,
        }
    }
}

impl ValgusConfig {
    pub fn detector_config(&self) -> FaultDetectorConfig {
        FaultDetectorConfig::new(
            self.valgus_on,
            self.valgus_off,
            self.confirm_frames,
            self.clear_frames,
        )
    }
}

/// Torso lean detection (degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeanConfig {
    /// Excess below which a static lean clears
    pub lean_info: f32,
    /// Excess above which a static lean is suspected
    pub lean_warn: f32,
    /// Excess that earns the heaviest deduction
    pub lean_crit: f32,
    pub confirm_frames: u32,
    pub clear_frames: u32,
    /// Allowed lean when standing straight
    pub base_allowance: f32,
    /// Extra allowed lean per degree of knee bend
    pub allowance_per_degree: f32,
    pub falling_threshold: f32,
    pub instability_threshold: f32,
    pub mismatch_threshold: f32,
}

impl Default for LeanConfig {
    fn default() -> Self {
        Self {
            lean_info: 3.0,
            lean_warn: 5.0,
            lean_crit: 15.0,
            confirm_frames: 5,
            clear_frames: 3,
            base_allowance: 10.0,
            allowance_per_degree: 0.375,
            falling_threshold: 15.0,
            instability_threshold: 5.0,
            mismatch_threshold: 15.0,
        }
    }
}

impl LeanConfig {
    pub fn detector_config(&self) -> FaultDetectorConfig {
        FaultDetectorConfig::new(
            self.lean_warn,
            self.lean_info,
            self.confirm_frames,
            self.clear_frames,
        )
    }

    /// Lean tolerated at a given knee angle
    pub fn allowed_lean(&self, knee_angle: f32) -> f32 {
        self.base_allowance + (180.0 - knee_angle) * self.allowance_per_degree
    }
}

/// Left/right knee angle difference (degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsymmetryConfig {
    pub asymmetry_info: f32,
    pub asymmetry_warn: f32,
    pub asymmetry_crit: f32,
}

impl Default for AsymmetryConfig {
    fn default() -> Self {
        Self {
            asymmetry_info: 8.0,
            asymmetry_warn: 15.0,
            asymmetry_crit: 25.0,
        }
    }
}

/// Lateral hip displacement in hip widths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HipShiftConfig {
    pub hip_shift_threshold: f32,
    pub hip_shift_off: f32,
    pub confirm_frames: u32,
    pub clear_frames: u32,
}

impl Default for HipShiftConfig {
    fn default() -> Self {
        Self {
            hip_shift_threshold: 0.05,
            hip_shift_off: 0.03,
            confirm_frames: 4,
            clear_frames: 3,
        }
    }
}

impl HipShiftConfig {
    pub fn detector_config(&self) -> FaultDetectorConfig {
        FaultDetectorConfig::new(
            self.hip_shift_threshold,
            self.hip_shift_off,
            self.confirm_frames,
            self.clear_frames,
        )
    }
}

/// Priority-lock durations (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub hint_duration_ms: i64,
    pub fault_duration_ms: i64,
    pub success_duration_ms: i64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            hint_duration_ms: 800,
            fault_duration_ms: 1500,
            success_duration_ms: 2000,
        }
    }
}

fn default_history_limit() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            phase: PhaseConfig::default(),
            tracking: TrackingConfig::default(),
            smoothing: SmoothingConfig::default(),
            valgus: ValgusConfig::default(),
            lean: LeanConfig::default(),
            asymmetry: AsymmetryConfig::default(),
            hip_shift: HipShiftConfig::default(),
            feedback: FeedbackConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML, falling back to defaults for
    /// anything not given
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(contents).context("Failed to parse engine config")?;
        config.validate().context("Engine config rejected")?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {:?}", path))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize engine config")
    }

    /// Check that thresholds are consistently ordered
    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        let invalid = |msg: &str| Err(AnalysisError::InvalidConfig(msg.to_string()));
        let p = &self.phase;

        if !(p.deep_squat_angle < p.parallel_angle
            && p.parallel_angle < p.descent_start_angle
            && p.descent_start_angle < p.standing_angle)
        {
            return invalid("angles must satisfy deep < parallel < descent start < standing");
        }
        if p.ascent_threshold <= 0.0 || p.min_stand_delta <= 0.0 {
            return invalid("ascent threshold and stand delta must be positive");
        }
        if self.valgus.valgus_on <= self.valgus.valgus_off {
            return invalid("valgus on threshold must exceed off threshold");
        }
        if self.lean.lean_warn <= self.lean.lean_info {
            return invalid("lean warn threshold must exceed info threshold");
        }
        if self.hip_shift.hip_shift_threshold <= self.hip_shift.hip_shift_off {
            return invalid("hip shift threshold must exceed its off threshold");
        }
        if !(self.asymmetry.asymmetry_info <= self.asymmetry.asymmetry_warn
            && self.asymmetry.asymmetry_warn <= self.asymmetry.asymmetry_crit)
        {
            return invalid("asymmetry thresholds must be ordered info <= warn <= crit");
        }
        if self.tracking.distrust_visibility >= self.tracking.trust_visibility {
            return invalid("stabilizer trust band must be non-empty");
        }
        if self.smoothing.smoothing_frames == 0
            || self.smoothing.torso_frames == 0
            || self.smoothing.knee_baseline_frames == 0
            || self.valgus.baseline_window == 0
        {
            return invalid("smoothing windows must be at least one frame");
        }

        Ok(())
    }
}
