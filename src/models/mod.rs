// Data models for the squat analysis engine

pub mod exercise_state;
pub mod landmark;
pub mod rep;

pub use exercise_state::*;
pub use landmark::{
    Landmark, PoseLandmark, Skeleton, LANDMARK_COUNT, LEFT_LEG, LOWER_BODY, RIGHT_LEG, TORSO,
    VALUES_PER_LANDMARK,
};
pub use rep::*;
