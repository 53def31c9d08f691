// Frame-processing services

pub mod clock;
pub mod fault_detector;
pub mod feedback;
pub mod geometry;
pub mod landmark_stabilizer;
pub mod rep_scoring;
pub mod smoothing;
pub mod squat_analyzer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fault_detector::{FaultDetector, FaultDetectorConfig, FaultState};
pub use feedback::{FeedbackArbiter, FeedbackLock, FeedbackPriority, FeedbackRequest};
pub use landmark_stabilizer::{LandmarkStabilizer, StabilizedFrame, StabilizerConfig};
pub use rep_scoring::score_rep;
pub use smoothing::{ExponentialMovingAverage, MovingAverage};
pub use squat_analyzer::SquatAnalyzer;
