#![allow(dead_code)]

use squat_coach::models::{ExerciseState, Landmark, PoseLandmark, Skeleton};
use squat_coach::{EngineConfig, ManualClock, SquatAnalyzer};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Camera frame interval used by the replays (10 fps)
pub const FRAME_MS: i64 = 100;

const SHIN_LENGTH: f32 = 0.2;
const THIGH_LENGTH: f32 = 0.2;
const TORSO_LENGTH: f32 = 0.3;
const LEFT_X: f32 = 0.6;
const RIGHT_X: f32 = 0.4;
const KNEE_Y: f32 = 0.7;

/// Synthetic front-facing squat pose
///
/// Ankles are fixed and the thigh swings through the depth axis so that
/// each knee angle is exact. Everything defaults to a clean pose.
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    left_angle: f32,
    right_angle: f32,
    knee_inset: f32,
    hip_shift: f32,
    torso_lean: f32,
    visibility: f32,
    right_ankle_visibility: Option<f32>,
}

impl PoseBuilder {
    pub fn new(angle: f32) -> Self {
        Self {
            left_angle: angle,
            right_angle: angle,
            knee_inset: 0.0,
            hip_shift: 0.0,
            torso_lean: 0.0,
            visibility: 0.95,
            right_ankle_visibility: None,
        }
    }

    pub fn legs(mut self, left: f32, right: f32) -> Self {
        self.left_angle = left;
        self.right_angle = right;
        self
    }

    /// Move both knees towards the midline
    pub fn knee_inset(mut self, inset: f32) -> Self {
        self.knee_inset = inset;
        self
    }

    /// Move hips and shoulders sideways (positive is towards the left hip)
    pub fn hip_shift(mut self, shift: f32) -> Self {
        self.hip_shift = shift;
        self
    }

    /// Forward torso lean in degrees
    pub fn torso_lean(mut self, degrees: f32) -> Self {
        self.torso_lean = degrees;
        self
    }

    pub fn visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn right_ankle_visibility(mut self, visibility: f32) -> Self {
        self.right_ankle_visibility = Some(visibility);
        self
    }

    pub fn build(&self) -> Skeleton {
        let mut skeleton = Skeleton::default();
        self.place_leg(
            &mut skeleton,
            LEFT_X,
            LEFT_X - self.knee_inset,
            self.left_angle,
            [
                PoseLandmark::LeftShoulder,
                PoseLandmark::LeftHip,
                PoseLandmark::LeftKnee,
                PoseLandmark::LeftAnkle,
            ],
        );
        self.place_leg(
            &mut skeleton,
            RIGHT_X,
            RIGHT_X + self.knee_inset,
            self.right_angle,
            [
                PoseLandmark::RightShoulder,
                PoseLandmark::RightHip,
                PoseLandmark::RightKnee,
                PoseLandmark::RightAnkle,
            ],
        );
        if let Some(visibility) = self.right_ankle_visibility {
            skeleton.get_mut(PoseLandmark::RightAnkle).visibility = Some(visibility);
        }
        skeleton
    }

    fn place_leg(
        &self,
        skeleton: &mut Skeleton,
        ankle_x: f32,
        knee_x: f32,
        angle: f32,
        [shoulder, hip, knee, ankle]: [PoseLandmark; 4],
    ) {
        let ankle_pos = (ankle_x, KNEE_Y + SHIN_LENGTH);

        // Unit vector knee -> ankle in the image plane
        let (dx, dy) = (ankle_pos.0 - knee_x, ankle_pos.1 - KNEE_Y);
        let len = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = (dx / len, dy / len);

        let theta = angle.to_radians();
        let hip_x = knee_x + THIGH_LENGTH * theta.cos() * ux + self.hip_shift;
        let hip_y = KNEE_Y + THIGH_LENGTH * theta.cos() * uy;
        let hip_z = THIGH_LENGTH * theta.sin();

        let lean = self.torso_lean.to_radians();
        let shoulder_x = hip_x + TORSO_LENGTH * lean.sin();
        let shoulder_y = hip_y - TORSO_LENGTH * lean.cos();

        let v = self.visibility;
        *skeleton.get_mut(ankle) = Landmark::new(ankle_pos.0, ankle_pos.1, 0.0, v);
        *skeleton.get_mut(knee) = Landmark::new(knee_x, KNEE_Y, 0.0, v);
        *skeleton.get_mut(hip) = Landmark::new(hip_x, hip_y, hip_z, v);
        *skeleton.get_mut(shoulder) = Landmark::new(shoulder_x, shoulder_y, hip_z, v);
    }
}

/// Clean pose at a given knee angle
pub fn pose(angle: f32) -> Skeleton {
    PoseBuilder::new(angle).build()
}

/// Full-depth rep: stand, descend to 90°, hold, stand back up
pub fn clean_rep_angles() -> Vec<f32> {
    let mut angles = vec![170.0, 160.0, 150.0, 140.0, 130.0, 120.0, 110.0, 100.0];
    angles.extend([90.0; 6]);
    angles.extend([100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
    angles.extend([170.0; 3]);
    angles
}

/// Rep that bottoms out above parallel
pub fn shallow_rep_angles() -> Vec<f32> {
    let mut angles = vec![170.0, 160.0, 150.0, 140.0, 130.0, 120.0];
    angles.extend([112.0; 10]);
    angles.extend([120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
    angles.extend([170.0; 3]);
    angles
}

/// Analyzer driven by a manual clock that ticks once per frame
pub struct Replay {
    pub analyzer: SquatAnalyzer<ManualClock>,
    pub clock: ManualClock,
    pub frame_ms: i64,
}

impl Replay {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        init_test_logging();
        let clock = ManualClock::new(0);
        let analyzer = SquatAnalyzer::with_clock(config, clock.clone())
            .expect("default test config is valid");
        Self {
            analyzer,
            clock,
            frame_ms: FRAME_MS,
        }
    }

    pub fn frame_ms(mut self, frame_ms: i64) -> Self {
        self.frame_ms = frame_ms;
        self
    }

    pub fn frame(&mut self, skeleton: Option<&Skeleton>) -> ExerciseState {
        let state = self.analyzer.update(skeleton);
        self.clock.advance(self.frame_ms);
        state
    }

    pub fn poses(&mut self, poses: &[Skeleton]) -> Vec<ExerciseState> {
        poses.iter().map(|p| self.frame(Some(p))).collect()
    }

    pub fn angles(&mut self, angles: &[f32]) -> Vec<ExerciseState> {
        angles.iter().map(|&a| self.frame(Some(&pose(a)))).collect()
    }

    pub fn missing(&mut self, frames: usize) -> Vec<ExerciseState> {
        (0..frames).map(|_| self.frame(None)).collect()
    }

    /// Reset the analyzer and rewind the clock
    pub fn restart(&mut self) {
        self.analyzer.reset();
        self.clock.set(0);
    }
}
