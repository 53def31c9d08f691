/// Feedback arbitration
///
/// Picks the single message displayed each frame. A message holds a
/// priority lock until its expiry; while the lock is active only requests
/// of equal or higher priority may replace it.

use crate::models::{Feedback, FeedbackColor};

/// Message priority tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedbackPriority {
    State = 0,
    Hint = 1,
    Fault = 2,
    Success = 3,
}

/// A message asking to be displayed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub message: String,
    pub color: FeedbackColor,
    pub priority: FeedbackPriority,
    pub duration_ms: i64,
}

impl FeedbackRequest {
    pub fn new(
        message: impl Into<String>,
        color: FeedbackColor,
        priority: FeedbackPriority,
        duration_ms: i64,
    ) -> Self {
        Self {
            message: message.into(),
            color,
            priority,
            duration_ms,
        }
    }
}

/// The message currently holding the display
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackLock {
    pub message: String,
    pub color: FeedbackColor,
    pub priority: FeedbackPriority,
    pub expires_at_ms: i64,
}

impl FeedbackLock {
    /// Lock that has already expired
    pub fn idle() -> Self {
        Self {
            message: String::new(),
            color: FeedbackColor::White,
            priority: FeedbackPriority::State,
            expires_at_ms: i64::MIN,
        }
    }

    pub fn is_active(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }

    /// The lock that results from `request` arriving at `now_ms`, or None
    /// when the request is blocked by this lock
    pub fn try_override(&self, request: &FeedbackRequest, now_ms: i64) -> Option<FeedbackLock> {
        if self.is_active(now_ms) && request.priority < self.priority {
            return None;
        }

        Some(FeedbackLock {
            message: request.message.clone(),
            color: request.color,
            priority: request.priority,
            expires_at_ms: now_ms.saturating_add(request.duration_ms.max(0)),
        })
    }
}

/// Owns the current lock and resolves each frame's displayed message
#[derive(Debug, Clone)]
pub struct FeedbackArbiter {
    lock: FeedbackLock,
}

impl FeedbackArbiter {
    pub fn new() -> Self {
        Self {
            lock: FeedbackLock::idle(),
        }
    }

    /// Ask for a message; returns whether it took the display
    pub fn request(&mut self, request: FeedbackRequest, now_ms: i64) -> bool {
        match self.lock.try_override(&request, now_ms) {
            Some(lock) => {
                self.lock = lock;
                true
            }
            None => false,
        }
    }

    /// Message to display: the locked one while active, otherwise the
    /// frame's instant message
    pub fn resolve(&mut self, instant: Feedback, now_ms: i64) -> Feedback {
        if self.lock.is_active(now_ms) {
            return Feedback::new(self.lock.message.clone(), self.lock.color);
        }

        self.lock.priority = FeedbackPriority::State;
        instant
    }

    pub fn current(&self) -> &FeedbackLock {
        &self.lock
    }

    pub fn reset(&mut self) {
        self.lock = FeedbackLock::idle();
    }
}

impl Default for FeedbackArbiter {
    fn default() -> Self {
        Self::new()
    }
}
