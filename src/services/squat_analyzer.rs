/// Squat Analysis Engine
///
/// Consumes one pose skeleton per frame and produces the frame's exercise
/// state:
/// - Visibility gating and landmark stabilization (tracking mode)
/// - Knee angle and torso lean measurement with temporal smoothing
/// - Rep phase state machine and rep counting
/// - Valgus, asymmetry, hip shift, lean and tempo fault detection
/// - Rep scoring and priority-locked coaching feedback

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{
    ExerciseState, Feedback, FeedbackColor, LeanFault, Phase, PoseLandmark, RepAccumulator,
    RepRecord, RepScore, RepVerdict, SessionSummary, Side, Skeleton, TrackingMode, VisualFlags,
    LEFT_LEG, RIGHT_LEG, TORSO,
};
use crate::services::clock::{elapsed_ms, Clock, SystemClock};
use crate::services::fault_detector::FaultDetector;
use crate::services::feedback::{FeedbackArbiter, FeedbackPriority, FeedbackRequest};
use crate::services::geometry::{joint_angle, shin_lean, torso_lean};
use crate::services::landmark_stabilizer::{joints_visible, LandmarkStabilizer};
use crate::services::rep_scoring::score_rep;
use crate::services::smoothing::{ExponentialMovingAverage, MovingAverage};

/// Hip widths below this cannot normalize a hip shift
const MIN_HIP_WIDTH: f32 = 0.01;

/// Ankle widths below this cannot normalize a knee/ankle ratio
const MIN_ANKLE_WIDTH: f32 = 0.01;

const SHIN: [PoseLandmark; 4] = [
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

const HIPS: [PoseLandmark; 2] = [PoseLandmark::LeftHip, PoseLandmark::RightHip];

/// Everything that lives for one session and is rebuilt by `reset`
#[derive(Debug, Clone)]
struct Session {
    phase: Phase,
    rep_count: u32,
    init_frames: u32,
    smoothed_angle: f32,

    stabilizer: LandmarkStabilizer,
    angle_filter: MovingAverage,
    torso_filter: MovingAverage,
    knee_baseline: ExponentialMovingAverage,
    valgus_baseline: ExponentialMovingAverage,
    valgus_calibration_frames: u32,
    prev_torso: Option<f32>,

    valgus_detector: FaultDetector,
    lean_detector: FaultDetector,
    hip_shift_detector: FaultDetector,
    arbiter: FeedbackArbiter,

    rep: RepAccumulator,
    ascent_max: f32,
    ascent_frames: u32,

    last_score: Option<RepScore>,
    last_verdict: Option<RepVerdict>,
    last_tracking: Option<TrackingMode>,
    history: Vec<RepRecord>,
}

impl Session {
    fn new(config: &EngineConfig) -> Self {
        Self {
            phase: Phase::Initializing,
            rep_count: 0,
            init_frames: 0,
            smoothed_angle: 180.0,
            stabilizer: LandmarkStabilizer::new(config.tracking.stabilizer_config()),
            angle_filter: MovingAverage::new(config.smoothing.smoothing_frames),
            torso_filter: MovingAverage::new(config.smoothing.torso_frames),
            knee_baseline: ExponentialMovingAverage::new(config.smoothing.knee_baseline_frames),
            valgus_baseline: ExponentialMovingAverage::new(config.valgus.baseline_window),
            valgus_calibration_frames: 0,
            prev_torso: None,
            valgus_detector: FaultDetector::new(config.valgus.detector_config()),
            lean_detector: FaultDetector::new(config.lean.detector_config()),
            hip_shift_detector: FaultDetector::new(config.hip_shift.detector_config()),
            arbiter: FeedbackArbiter::new(),
            rep: RepAccumulator::default(),
            ascent_max: 0.0,
            ascent_frames: 0,
            last_score: None,
            last_verdict: None,
            last_tracking: None,
            history: Vec::new(),
        }
    }
}

/// Measurements of one stabilized frame
struct FrameMetrics<'a> {
    skeleton: &'a Skeleton,
    mode: TrackingMode,
    left_angle: f32,
    right_angle: f32,
    /// Smoothed knee angle
    angle: f32,
    /// Smoothed torso lean, when the torso is visible
    torso: Option<f32>,
    now: i64,
}

/// Squat analysis engine
pub struct SquatAnalyzer<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    session: Session,
}

impl SquatAnalyzer<SystemClock> {
    /// Create an analyzer on the wall clock
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for SquatAnalyzer<SystemClock> {
    fn default() -> Self {
        let config = EngineConfig::default();
        let session = Session::new(&config);
        Self {
            config,
            clock: SystemClock,
            session,
        }
    }
}

impl<C: Clock> SquatAnalyzer<C> {
    /// Create an analyzer on a caller-supplied clock
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let session = Session::new(&config);
        Ok(Self {
            config,
            clock,
            session,
        })
    }

    /// Analyze one frame
    ///
    /// `skeleton` is None when the pose model detected nobody this frame.
    pub fn update(&mut self, skeleton: Option<&Skeleton>) -> ExerciseState {
        let now = self.clock.now_ms();
        let visibility_min = self.config.tracking.visibility_min;

        let (left_visible, right_visible) = skeleton
            .map(|s| {
                (
                    joints_visible(s, &LEFT_LEG, visibility_min),
                    joints_visible(s, &RIGHT_LEG, visibility_min),
                )
            })
            .unwrap_or((false, false));

        let frame = self
            .session
            .stabilizer
            .process(skeleton, left_visible || right_visible);

        let Some(stable) = frame.skeleton else {
            return self.lost_state();
        };

        let left_angle = leg_angle(&stable, &LEFT_LEG);
        let right_angle = leg_angle(&stable, &RIGHT_LEG);
        let both = (left_angle + right_angle) / 2.0;

        let (mode, raw_angle) = if frame.estimated {
            (TrackingMode::Estimated, both)
        } else if left_visible && right_visible {
            (TrackingMode::Optimal, both)
        } else if left_visible {
            (TrackingMode::Degraded, left_angle)
        } else {
            (TrackingMode::Degraded, right_angle)
        };
        self.note_tracking(mode);

        let angle = self.session.angle_filter.update(raw_angle);
        self.session.smoothed_angle = angle;

        if self.session.phase.is_calibrating() && mode == TrackingMode::Optimal {
            let knee_y = (stable.get(PoseLandmark::LeftKnee).y
                + stable.get(PoseLandmark::RightKnee).y)
                / 2.0;
            self.session.knee_baseline.update(knee_y);
        }

        let torso = if joints_visible(&stable, &TORSO, visibility_min) {
            Some(self.session.torso_filter.update(torso_lean(&stable)))
        } else {
            None
        };

        let metrics = FrameMetrics {
            skeleton: &stable,
            mode,
            left_angle,
            right_angle,
            angle,
            torso,
            now,
        };

        let rep_count_before = self.session.rep_count;
        let instant = self.advance_phase(&metrics);
        let rep_completed = self.session.rep_count > rep_count_before;

        let mut flags = VisualFlags {
            knee_baseline_y: self.session.knee_baseline.value(),
            deep: self.session.phase.is_active() && angle < self.config.phase.parallel_angle,
            ..VisualFlags::default()
        };
        self.detect_valgus(&metrics, &mut flags);
        self.detect_asymmetry_and_hip_shift(&metrics, &mut flags);
        self.detect_lean(&metrics, &mut flags);
        match torso {
            Some(_) => self.session.prev_torso = torso,
            None => self.forget_torso(),
        }

        let feedback = self.session.arbiter.resolve(instant, now);
        self.build_state(feedback, mode, flags, rep_completed)
    }

    /// Return every internal field to its initial value
    pub fn reset(&mut self) {
        tracing::debug!("Resetting squat analyzer");
        self.session = Session::new(&self.config);
    }

    pub fn rep_count(&self) -> u32 {
        self.session.rep_count
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Completed reps of this session, oldest first
    pub fn history(&self) -> &[RepRecord] {
        &self.session.history
    }

    /// Summary of the session keeping the last `recent` reps verbatim
    pub fn session_summary(&self, recent: usize) -> SessionSummary {
        SessionSummary::from_records(self.session.rep_count, &self.session.history, recent)
    }

    fn advance_phase(&mut self, m: &FrameMetrics<'_>) -> Feedback {
        let phase_cfg = self.config.phase.clone();
        let angle = m.angle;

        match self.session.phase {
            Phase::Initializing => {
                self.session.init_frames += 1;
                if angle > phase_cfg.standing_angle {
                    self.set_phase(Phase::Neutral);
                    self.hint("READY", FeedbackColor::Green, m.now);
                    Feedback::new("READY", FeedbackColor::Green)
                } else if angle < phase_cfg.descent_start_angle {
                    self.start_rep(m);
                    Feedback::new("DESCENDING", FeedbackColor::White)
                } else if self.session.init_frames >= phase_cfg.calibration_frames
                    && angle > phase_cfg.parallel_angle
                {
                    tracing::debug!(
                        "Force-calibrating after {} frames at {:.1}°",
                        self.session.init_frames,
                        angle
                    );
                    self.set_phase(Phase::Neutral);
                    Feedback::new("READY", FeedbackColor::Green)
                } else {
                    Feedback::new("STAND IN FRAME", FeedbackColor::White)
                }
            }
            Phase::Neutral => {
                if angle < phase_cfg.descent_start_angle {
                    self.start_rep(m);
                    Feedback::new("DESCENDING", FeedbackColor::White)
                } else {
                    Feedback::new("STAND TALL", FeedbackColor::White)
                }
            }
            Phase::Descending => {
                self.session.rep.track_angle(angle);

                if angle < phase_cfg.parallel_angle && !self.session.rep.depth_reached {
                    self.session.rep.depth_reached = true;
                    self.hint("GOOD DEPTH", FeedbackColor::Green, m.now);
                }
                if angle < phase_cfg.deep_squat_angle {
                    self.session.rep.deep_reached = true;
                }

                let rep = &self.session.rep;
                if angle > rep.min_angle + phase_cfg.ascent_threshold
                    && rep.min_angle < phase_cfg.descent_start_angle
                {
                    self.start_ascent(m);
                    return Feedback::new("DRIVE UP", FeedbackColor::White);
                }

                if self.session.rep.deep_reached {
                    Feedback::new("ATG!", FeedbackColor::Green)
                } else if self.session.rep.depth_reached {
                    Feedback::new("GOOD DEPTH", FeedbackColor::Green)
                } else {
                    Feedback::new("LOWER", FeedbackColor::White)
                }
            }
            Phase::Ascending => {
                self.session.ascent_frames += 1;
                if angle > self.session.ascent_max {
                    self.session.ascent_max = angle;
                }

                let collapsed = self.session.ascent_frames >= phase_cfg.min_ascent_frames
                    && angle < phase_cfg.standing_angle
                    && self.session.ascent_max - angle > phase_cfg.min_stand_delta;

                if collapsed {
                    self.complete_rep(m.now);
                    self.start_rep(m);
                    Feedback::new("DESCENDING", FeedbackColor::White)
                } else if angle > phase_cfg.standing_angle {
                    self.complete_rep(m.now);
                    self.set_phase(Phase::Neutral);
                    Feedback::new("STAND TALL", FeedbackColor::White)
                } else {
                    Feedback::new("DRIVE UP", FeedbackColor::White)
                }
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.session.phase != phase {
            tracing::debug!("Phase {} -> {}", self.session.phase, phase);
            self.session.phase = phase;
        }
    }

    /// Begin a rep: fresh accumulator, fresh detectors, new baselines
    fn start_rep(&mut self, m: &FrameMetrics<'_>) {
        let mut rep = RepAccumulator::start(m.angle, m.now);
        rep.descent_start_torso = m.torso;

        if joints_visible(m.skeleton, &HIPS, self.config.tracking.visibility_min) {
            let (center_x, _) = m.skeleton.midpoint(PoseLandmark::LeftHip, PoseLandmark::RightHip);
            let width = (m.skeleton.get(PoseLandmark::LeftHip).x
                - m.skeleton.get(PoseLandmark::RightHip).x)
                .abs();
            if width >= MIN_HIP_WIDTH {
                rep.hip_baseline = Some((center_x, width));
            }
        }

        self.session.rep = rep;
        self.session.valgus_detector.reset();
        self.session.lean_detector.reset();
        self.session.hip_shift_detector.reset();
        self.session.ascent_max = 0.0;
        self.session.ascent_frames = 0;
        self.set_phase(Phase::Descending);
    }

    fn start_ascent(&mut self, m: &FrameMetrics<'_>) {
        let descent_ms = elapsed_ms(self.session.rep.descent_start_ms, m.now);
        self.session.rep.ascent_start_ms = Some(m.now);
        self.session.ascent_max = m.angle;
        self.session.ascent_frames = 0;

        if descent_ms < self.config.phase.speed_min_ms {
            self.session.rep.too_fast = true;
            self.fault("SLOW DOWN", FeedbackColor::Orange, m.now);
        } else if !self.session.rep.depth_reached {
            self.hint("GO DEEPER", FeedbackColor::Yellow, m.now);
        }

        tracing::debug!(
            "Ascent after {}ms descent, bottom {:.1}°",
            descent_ms,
            self.session.rep.min_angle
        );
        self.set_phase(Phase::Ascending);
    }

    fn complete_rep(&mut self, now: i64) {
        let score = score_rep(&self.session.rep, &self.config);
        self.session.rep_count += 1;

        let rep = &self.session.rep;
        let record = RepRecord {
            rep_number: self.session.rep_count,
            score: score.score,
            faults: score.faults.clone(),
            min_angle: rep.min_angle,
            descent_ms: rep
                .ascent_start_ms
                .map(|ascent| elapsed_ms(rep.descent_start_ms, ascent)),
            duration_ms: elapsed_ms(rep.descent_start_ms, now),
            completed_at_ms: now,
        };

        tracing::info!(
            "Rep {} complete: score {} faults {:?}",
            record.rep_number,
            record.score,
            score.fault_labels()
        );

        self.session.history.push(record);
        let limit = self.config.history_limit;
        if self.session.history.len() > limit {
            let excess = self.session.history.len() - limit;
            self.session.history.drain(..excess);
        }

        let (message, color) = completion_message(&score);
        self.request(
            message,
            color,
            FeedbackPriority::Success,
            self.config.feedback.success_duration_ms,
            now,
        );

        self.session.last_verdict = Some(RepVerdict::from_score(score.score));
        self.session.last_score = Some(score);
    }

    fn detect_valgus(&mut self, m: &FrameMetrics<'_>, flags: &mut VisualFlags) {
        let Some(ratio) = knee_ankle_ratio(m.skeleton) else {
            return;
        };
        if m.mode == TrackingMode::Degraded {
            return;
        }

        let valgus_cfg = &self.config.valgus;

        if self.session.phase.is_calibrating() {
            if m.mode == TrackingMode::Optimal {
                self.session.valgus_baseline.update(ratio);
                self.session.valgus_calibration_frames += 1;
                if self.session.valgus_calibration_frames == valgus_cfg.calibration_frames {
                    tracing::debug!("Valgus baseline calibrated at ratio {:.3}", ratio);
                }
            }
            return;
        }

        if self.session.valgus_calibration_frames < valgus_cfg.calibration_frames {
            return;
        }
        let Some(baseline) = self.session.valgus_baseline.value() else {
            return;
        };
        if baseline <= 0.0 {
            return;
        }

        let deviation = ((baseline - ratio) / baseline).max(0.0);
        let inward = knee_inward_side(m.skeleton, valgus_cfg.margin);
        let gated = if inward.is_some() { deviation } else { 0.0 };

        let rep = &mut self.session.rep;
        if gated > rep.max_valgus_deviation {
            rep.max_valgus_deviation = gated;
            if inward.is_some() {
                rep.valgus_side = inward;
            }
        }

        if self.session.valgus_detector.update(gated) {
            self.session.rep.valgus = true;
            flags.valgus = true;
            self.fault("KNEES OUT", FeedbackColor::Red, m.now);
        }
    }

    fn detect_asymmetry_and_hip_shift(&mut self, m: &FrameMetrics<'_>, flags: &mut VisualFlags) {
        if m.mode != TrackingMode::Optimal || !self.session.phase.is_active() {
            return;
        }

        let asym_cfg = &self.config.asymmetry;
        let diff = (m.left_angle - m.right_angle).abs();
        let rep = &mut self.session.rep;
        if diff > rep.max_asymmetry {
            rep.max_asymmetry = diff;
            if diff > asym_cfg.asymmetry_info {
                // The leg bending further is carrying the load
                rep.asymmetry_side = Some(if m.left_angle < m.right_angle {
                    Side::Left
                } else {
                    Side::Right
                });
            }
        }
        if diff > asym_cfg.asymmetry_warn {
            rep.asymmetry = true;
            flags.asymmetry = true;
            self.fault("EVEN OUT YOUR LEGS", FeedbackColor::Orange, m.now);
        }

        let Some((base_x, width)) = self.session.rep.hip_baseline else {
            return;
        };
        let (center_x, _) = m.skeleton.midpoint(PoseLandmark::LeftHip, PoseLandmark::RightHip);
        let shift = (center_x - base_x) / width;

        let rep = &mut self.session.rep;
        if shift.abs() > rep.max_hip_shift {
            rep.max_hip_shift = shift.abs();
        }

        if self.session.hip_shift_detector.update(shift.abs()) {
            let toward_left = m.skeleton.get(PoseLandmark::LeftHip).x
                - m.skeleton.get(PoseLandmark::RightHip).x;
            let side = if shift * toward_left > 0.0 {
                Side::Left
            } else {
                Side::Right
            };
            let rep = &mut self.session.rep;
            rep.hip_shift = true;
            rep.hip_shift_side = Some(side);
            flags.hip_shift = true;
            self.fault("CENTER YOUR HIPS", FeedbackColor::Orange, m.now);
        }
    }

    fn detect_lean(&mut self, m: &FrameMetrics<'_>, flags: &mut VisualFlags) {
        let Some(torso) = m.torso else {
            return;
        };
        if !self.session.phase.is_active() {
            return;
        }

        let lean_cfg = self.config.lean.clone();
        let excess = (torso - lean_cfg.allowed_lean(m.angle)).max(0.0);
        if excess > self.session.rep.max_lean_excess {
            self.session.rep.max_lean_excess = excess;
        }
        let static_lean = self.session.lean_detector.update(excess);

        let mut fired = None;
        if self.session.phase == Phase::Descending {
            if let Some(start) = self.session.rep.descent_start_torso {
                if torso - start > lean_cfg.falling_threshold {
                    fired = Some(LeanFault::Falling);
                }
            }
        }
        if static_lean {
            fired = Some(LeanFault::Static);
        }
        if fired.is_none() {
            if let Some(prev) = self.session.prev_torso {
                if (torso - prev).abs() > lean_cfg.instability_threshold {
                    fired = Some(LeanFault::Instability);
                }
            }
        }
        if fired.is_none()
            && joints_visible(m.skeleton, &SHIN, self.config.tracking.visibility_min)
            && torso - shin_lean(m.skeleton) > lean_cfg.mismatch_threshold
        {
            fired = Some(LeanFault::Mismatch);
        }

        let Some(fault) = fired else {
            return;
        };
        self.session.rep.record_lean(fault);
        flags.lean = true;

        let message = match fault {
            LeanFault::Static => "CHEST UP",
            LeanFault::Falling => "DON'T FALL FORWARD",
            LeanFault::Instability => "STAY STEADY",
            LeanFault::Mismatch => "TORSO WITH SHINS",
        };
        self.fault(message, FeedbackColor::Orange, m.now);
    }

    fn hint(&mut self, message: &str, color: FeedbackColor, now: i64) {
        let duration = self.config.feedback.hint_duration_ms;
        self.request(message.to_string(), color, FeedbackPriority::Hint, duration, now);
    }

    fn fault(&mut self, message: &str, color: FeedbackColor, now: i64) {
        let duration = self.config.feedback.fault_duration_ms;
        self.request(message.to_string(), color, FeedbackPriority::Fault, duration, now);
    }

    fn request(
        &mut self,
        message: String,
        color: FeedbackColor,
        priority: FeedbackPriority,
        duration_ms: i64,
        now: i64,
    ) {
        let request = FeedbackRequest::new(message, color, priority, duration_ms);
        self.session.arbiter.request(request, now);
    }

    fn note_tracking(&mut self, mode: TrackingMode) {
        if self.session.last_tracking == Some(TrackingMode::Lost) && mode != TrackingMode::Lost {
            tracing::warn!("Tracking recovered ({:?})", mode);
        }
        self.session.last_tracking = Some(mode);
    }

    /// Drop torso history so the next visible frame starts a fresh reading
    fn forget_torso(&mut self) {
        self.session.prev_torso = None;
        self.session.torso_filter.reset();
    }

    fn lost_state(&mut self) -> ExerciseState {
        if self.session.last_tracking != Some(TrackingMode::Lost) {
            tracing::warn!("Tracking lost in phase {}", self.session.phase);
            self.session.last_tracking = Some(TrackingMode::Lost);
        }
        self.forget_torso();

        let flags = VisualFlags {
            knee_baseline_y: self.session.knee_baseline.value(),
            ..VisualFlags::default()
        };
        self.build_state(
            Feedback::new("BODY NOT VISIBLE", FeedbackColor::Red),
            TrackingMode::Lost,
            flags,
            false,
        )
    }

    fn build_state(
        &self,
        feedback: Feedback,
        tracking_mode: TrackingMode,
        flags: VisualFlags,
        rep_completed: bool,
    ) -> ExerciseState {
        let session = &self.session;
        ExerciseState {
            phase: session.phase,
            angle: session.smoothed_angle,
            rep_count: session.rep_count,
            feedback,
            rep_verdict: session.last_verdict,
            rep_completed,
            tracking_mode,
            flags,
            last_score: session.last_score.as_ref().map(|s| s.score),
            current_min_angle: session.rep.min_angle,
            depth_reached: session.rep.depth_reached,
            last_faults: session
                .last_score
                .as_ref()
                .map(|s| s.faults.clone())
                .unwrap_or_default(),
        }
    }
}

/// Knee angle of one leg (hip, knee, ankle)
fn leg_angle(skeleton: &Skeleton, leg: &[PoseLandmark; 3]) -> f32 {
    joint_angle(
        skeleton.get(leg[0]),
        skeleton.get(leg[1]),
        skeleton.get(leg[2]),
    )
}

/// Knee width over ankle width
fn knee_ankle_ratio(skeleton: &Skeleton) -> Option<f32> {
    let knee_width =
        (skeleton.get(PoseLandmark::LeftKnee).x - skeleton.get(PoseLandmark::RightKnee).x).abs();
    let ankle_width =
        (skeleton.get(PoseLandmark::LeftAnkle).x - skeleton.get(PoseLandmark::RightAnkle).x).abs();
    if ankle_width < MIN_ANKLE_WIDTH {
        return None;
    }
    Some(knee_width / ankle_width)
}

/// Side whose knee sits further inside its ankle, if either exceeds `margin`
fn knee_inward_side(skeleton: &Skeleton, margin: f32) -> Option<Side> {
    let left_ankle = skeleton.get(PoseLandmark::LeftAnkle).x;
    let right_ankle = skeleton.get(PoseLandmark::RightAnkle).x;
    let mid = (left_ankle + right_ankle) / 2.0;

    let inward = |knee: PoseLandmark, ankle_x: f32| {
        (ankle_x - mid).abs() - (skeleton.get(knee).x - mid).abs()
    };
    let left = inward(PoseLandmark::LeftKnee, left_ankle);
    let right = inward(PoseLandmark::RightKnee, right_ankle);

    if left.max(right) <= margin {
        None
    } else if left >= right {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}

fn completion_message(score: &RepScore) -> (String, FeedbackColor) {
    match score.score {
        90..=100 => ("PERFECT REP!".to_string(), FeedbackColor::Green),
        70..=89 => ("GOOD REP".to_string(), FeedbackColor::Green),
        50..=69 => ("OKAY REP".to_string(), FeedbackColor::Yellow),
        _ => match score.faults.first() {
            Some(fault) => (format!("TRY AGAIN: {}", fault.label()), FeedbackColor::Red),
            None => ("TRY AGAIN".to_string(), FeedbackColor::Red),
        },
    }
}
