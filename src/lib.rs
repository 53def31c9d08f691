//! Real-time squat analysis
//!
//! Feed one pose skeleton per frame into a [`SquatAnalyzer`] and read back
//! the frame's [`ExerciseState`]: phase, smoothed knee angle, rep count,
//! tracking confidence, fault overlays and the coaching message to show.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::EngineConfig;
pub use error::{AnalysisError, Result};
pub use models::{ExerciseState, Landmark, Phase, PoseLandmark, Skeleton, TrackingMode};
pub use services::{Clock, ManualClock, SquatAnalyzer, SystemClock};
