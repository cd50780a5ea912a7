// src/services/pomodoro.rs

//! Pomodoro study timer.
//!
//! Pure state machine driven by `tick`; the caller owns the clock.

use std::time::Duration;

use serde::Serialize;

/// Every fourth completed work session is followed by a long break.
pub const LONG_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKind {
    Work,
    Break,
    LongBreak,
}

impl SessionKind {
    pub fn duration(self) -> Duration {
        match self {
            SessionKind::Work => Duration::from_secs(25 * 60),
            SessionKind::Break => Duration::from_secs(5 * 60),
            SessionKind::LongBreak => Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroTimer {
    kind: SessionKind,
    remaining: Duration,
    active: bool,
    paused: bool,
    completed_sessions: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    pub fn new() -> Self {
        Self {
            kind: SessionKind::Work,
            remaining: SessionKind::Work.duration(),
            active: false,
            paused: false,
            completed_sessions: 0,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Running and not paused.
    pub fn is_running(&self) -> bool {
        self.active && !self.paused
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn start(&mut self) {
        self.active = true;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if self.active {
            self.paused = true;
        }
    }

    /// Stops and rewinds the current session.
    pub fn reset(&mut self) {
        self.active = false;
        self.paused = false;
        self.remaining = self.kind.duration();
    }

    /// Switches session kind. Ignored while a session is active.
    pub fn switch_to(&mut self, kind: SessionKind) -> bool {
        if self.active {
            return false;
        }
        self.kind = kind;
        self.remaining = kind.duration();
        true
    }

    /// Advances the clock. Returns the kind that just finished, if any.
    ///
    /// Time beyond the end of a session is discarded: the next session
    /// starts stopped.
    pub fn tick(&mut self, elapsed: Duration) -> Option<SessionKind> {
        if !self.is_running() {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }

        let finished = self.kind;
        self.complete();
        Some(finished)
    }

    fn complete(&mut self) {
        self.active = false;
        self.paused = false;

        self.kind = match self.kind {
            SessionKind::Work => {
                self.completed_sessions += 1;
                if self.completed_sessions % LONG_BREAK_EVERY == 0 {
                    SessionKind::LongBreak
                } else {
                    SessionKind::Break
                }
            }
            SessionKind::Break | SessionKind::LongBreak => SessionKind::Work,
        };
        self.remaining = self.kind.duration();
    }

    /// Share of the current session already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining.as_secs_f64() / self.kind.duration().as_secs_f64()
    }

    /// Remaining time as `MM:SS`, rounded up to the next whole second.
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining.as_millis().div_ceil(1000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
