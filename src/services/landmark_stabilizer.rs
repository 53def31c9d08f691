/// Landmark stabilization
///
/// Gates frames on joint visibility and blends each accepted skeleton with
/// the previous one by confidence, holding the last skeleton through short
/// dropouts.

use crate::models::{PoseLandmark, Skeleton, LOWER_BODY};

/// True iff every listed landmark's visibility exceeds `threshold`
pub fn joints_visible(skeleton: &Skeleton, indices: &[PoseLandmark], threshold: f32) -> bool {
    indices
        .iter()
        .all(|&idx| skeleton.get(idx).visibility_or_zero() > threshold)
}

/// Stabilizer tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizerConfig {
    /// Consecutive invalid frames bridged with the held skeleton
    pub max_missing_frames: u32,
    /// Average lower-body visibility at or above which the frame is trusted fully
    pub trust_visibility: f32,
    /// Average lower-body visibility at or below which history dominates
    pub distrust_visibility: f32,
    /// Blend factor used at or below `distrust_visibility`
    pub min_blend: f32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            max_missing_frames: 10,
            trust_visibility: 0.7,
            distrust_visibility: 0.5,
            min_blend: 0.1,
        }
    }
}

/// Result of stabilizing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizedFrame {
    /// Skeleton to analyze, None when tracking is lost
    pub skeleton: Option<Skeleton>,
    /// True when the skeleton was held or blended with history
    pub estimated: bool,
}

impl StabilizedFrame {
    fn lost() -> Self {
        Self {
            skeleton: None,
            estimated: false,
        }
    }
}

/// Confidence-weighted landmark stabilizer
#[derive(Debug, Clone)]
pub struct LandmarkStabilizer {
    config: StabilizerConfig,
    last_accepted: Option<Skeleton>,
    missing_frames: u32,
}

impl LandmarkStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            config,
            last_accepted: None,
            missing_frames: 0,
        }
    }

    /// Stabilize the current frame
    ///
    /// `current` is None when the upstream model produced no skeleton;
    /// `is_valid` is the caller's visibility verdict on it.
    pub fn process(&mut self, current: Option<&Skeleton>, is_valid: bool) -> StabilizedFrame {
        let current = match current {
            Some(skeleton) if is_valid => skeleton,
            _ => return self.hold(),
        };

        let last = match &self.last_accepted {
            None => {
                self.last_accepted = Some(current.clone());
                self.missing_frames = 0;
                return StabilizedFrame {
                    skeleton: Some(current.clone()),
                    estimated: false,
                };
            }
            Some(last) => last,
        };

        self.missing_frames = 0;

        let t = self.blend_factor(current.average_visibility(&LOWER_BODY));
        let blended = last.lerp(current, t);
        self.last_accepted = Some(blended.clone());

        StabilizedFrame {
            skeleton: Some(blended),
            estimated: t < 1.0,
        }
    }

    /// Interpolation weight of the current frame for a given visibility
    pub fn blend_factor(&self, avg_visibility: f32) -> f32 {
        let StabilizerConfig {
            trust_visibility: hi,
            distrust_visibility: lo,
            min_blend,
            ..
        } = self.config;

        if avg_visibility >= hi {
            1.0
        } else if avg_visibility <= lo {
            min_blend
        } else {
            ((avg_visibility - lo) / (hi - lo)).clamp(0.0, 1.0)
        }
    }

    fn hold(&mut self) -> StabilizedFrame {
        let Some(last) = &self.last_accepted else {
            return StabilizedFrame::lost();
        };

        self.missing_frames = self.missing_frames.saturating_add(1);
        if self.missing_frames <= self.config.max_missing_frames {
            StabilizedFrame {
                skeleton: Some(last.clone()),
                estimated: true,
            }
        } else {
            StabilizedFrame::lost()
        }
    }

    pub fn missing_frames(&self) -> u32 {
        self.missing_frames
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
        self.missing_frames = 0;
    }
}

impl Default for LandmarkStabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}
