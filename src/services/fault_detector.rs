// Fault confirmation state machine
//
// A four-state hysteresis detector over a scalar signal. A fault is only
// confirmed after the signal stays above the on-threshold for a dwell time,
// and only cleared after it stays below the off-threshold for another.

/// Detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultState {
    Clear,
    Suspected,
    Confirmed,
    Clearing,
}

/// Thresholds and dwell times of one detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultDetectorConfig {
    pub on_threshold: f32,
    pub off_threshold: f32,
    pub frames_to_confirm: u32,
    pub frames_to_clear: u32,
}

impl FaultDetectorConfig {
    pub fn new(
        on_threshold: f32,
        off_threshold: f32,
        frames_to_confirm: u32,
        frames_to_clear: u32,
    ) -> Self {
        Self {
            on_threshold,
            off_threshold,
            frames_to_confirm,
            frames_to_clear,
        }
    }
}

/// Hysteresis fault detector
#[derive(Debug, Clone)]
pub struct FaultDetector {
    config: FaultDetectorConfig,
    state: FaultState,
    /// Frames counted towards the current state's exit
    frames_in_state: u32,
    /// Consecutive at-or-below frames while suspected
    below_count: u32,
}

/// Misses in a row that drop a suspected fault
const SUSPECT_MISSES: u32 = 2;

impl FaultDetector {
    pub fn new(config: FaultDetectorConfig) -> Self {
        Self {
            config,
            state: FaultState::Clear,
            frames_in_state: 0,
            below_count: 0,
        }
    }

    /// Feed one frame; returns true while the fault is asserted
    /// (confirmed or clearing)
    pub fn update(&mut self, value: f32) -> bool {
        let FaultDetectorConfig {
            on_threshold,
            off_threshold,
            frames_to_confirm,
            frames_to_clear,
        } = self.config;

        let previous = self.state;

        match self.state {
            FaultState::Clear => {
                if value > on_threshold {
                    self.enter(FaultState::Suspected);
                    self.frames_in_state = 1;
                    if self.frames_in_state >= frames_to_confirm {
                        self.enter(FaultState::Confirmed);
                    }
                }
            }
            FaultState::Suspected => {
                if value > on_threshold {
                    self.below_count = 0;
                    self.frames_in_state += 1;
                    if self.frames_in_state >= frames_to_confirm {
                        self.enter(FaultState::Confirmed);
                    }
                } else {
                    // Two misses in a row drop the suspicion, independent of frames_to_clear
                    self.below_count += 1;
                    if self.below_count >= SUSPECT_MISSES {
                        self.enter(FaultState::Clear);
                    }
                }
            }
            FaultState::Confirmed => {
                if value < off_threshold {
                    self.enter(FaultState::Clearing);
                    self.frames_in_state = 1;
                    if self.frames_in_state >= frames_to_clear {
                        self.enter(FaultState::Clear);
                    }
                }
            }
            FaultState::Clearing => {
                if value < off_threshold {
                    self.frames_in_state += 1;
                    if self.frames_in_state >= frames_to_clear {
                        self.enter(FaultState::Clear);
                    }
                } else {
                    self.enter(FaultState::Confirmed);
                }
            }
        }

        if previous != self.state {
            tracing::trace!(
                "Fault detector {:?} -> {:?} (value {:.3})",
                previous,
                self.state,
                value
            );
        }

        self.is_asserted()
    }

    fn enter(&mut self, state: FaultState) {
        self.state = state;
        self.frames_in_state = 0;
        self.below_count = 0;
    }

    /// Confirmed or clearing
    pub fn is_asserted(&self) -> bool {
        matches!(self.state, FaultState::Confirmed | FaultState::Clearing)
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == FaultState::Confirmed
    }

    pub fn state(&self) -> FaultState {
        self.state
    }

    pub fn config(&self) -> &FaultDetectorConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.enter(FaultState::Clear);
    }
}
