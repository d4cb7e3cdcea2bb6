//! Gym math: plate loading and rest timing

/// Plates available per side, heaviest first (lb)
pub const PLATES: &[f64] = &[45.0, 35.0, 25.0, 10.0, 5.0, 2.5];

/// Standard barbell weights (lb)
pub const BAR_WEIGHTS: &[f64] = &[45.0, 35.0];

/// Rest presets in seconds
pub const REST_PRESETS: &[u32] = &[60, 90, 120, 180];

pub const DEFAULT_REST_SECS: u32 = 90;

/// Plates to load on each side of the bar, heaviest first.
/// Empty when the target is not above the bar weight.
pub fn plates_per_side(target: f64, bar: f64) -> Vec<f64> {
    if !target.is_finite() || target <= bar {
        return Vec::new();
    }

    let mut remaining = (target - bar) / 2.0;
    let mut plates = Vec::new();
    for &plate in PLATES {
        while remaining >= plate {
            plates.push(plate);
            remaining -= plate;
        }
    }
    plates
}

/// Colour band of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Calm,
    Warning,
    Critical,
}

/// Countdown between sets
#[derive(Debug, Clone, PartialEq)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    active: bool,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECS)
    }
}

impl RestTimer {
    pub fn new(duration: u32) -> Self {
        Self { duration, remaining: duration, active: false }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Does nothing once the countdown has run out
    pub fn start(&mut self) {
        if self.remaining > 0 {
            self.active = true;
        }
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.remaining = self.duration;
    }

    pub fn set_preset(&mut self, secs: u32) {
        self.active = false;
        self.duration = secs;
        self.remaining = secs;
    }

    /// Advance one second. Returns true when this tick finished the countdown.
    pub fn tick(&mut self) -> bool {
        if !self.active || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn percentage(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining as f64 / self.duration as f64 * 100.0
    }

    pub fn phase(&self) -> TimerPhase {
        match self.percentage() {
            p if p > 50.0 => TimerPhase::Calm,
            p if p > 15.0 => TimerPhase::Warning,
            _ => TimerPhase::Critical,
        }
    }

    pub fn format_time(&self) -> String {
        format_time(self.remaining)
    }
}

/// "m:ss"
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
