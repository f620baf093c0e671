use std::time::Instant;

use crate::{duration::parse_duration, time_format::format_time};

/// What the user asked to time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
    name: String,
    total_seconds: f64,
}

impl TimerSpec {
    pub fn new(name: impl Into<String>, total_seconds: f64) -> Self {
        Self {
            name: name.into(),
            total_seconds,
        }
    }

    pub fn parse(name: impl Into<String>, length: &str) -> Self {
        Self::new(name, parse_duration(length))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn end_time(&self) -> String {
        format_time(self.total_seconds)
    }

    /// The timer runs while `elapsed` has not passed the total.
    pub fn phase_at(&self, elapsed: f64) -> Phase {
        if elapsed > self.total_seconds {
            return Phase::Done;
        }
        let fraction = if self.total_seconds > 0.0 {
            (elapsed / self.total_seconds).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Phase::Running { elapsed, fraction }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Running { elapsed: f64, fraction: f64 },
    Done,
}

/// A started timer, measured against the monotonic clock.
pub struct Countdown {
    spec: TimerSpec,
    started: Instant,
}

impl Countdown {
    pub fn start(spec: TimerSpec) -> Self {
        Self {
            spec,
            started: Instant::now(),
        }
    }

    pub fn spec(&self) -> &TimerSpec {
        &self.spec
    }

    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn phase(&self) -> Phase {
        self.spec.phase_at(self.elapsed())
    }
}

/// Number of filled cells for a bar `width` cells wide.
pub fn bar_width(fraction: f64, width: u16) -> u16 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    ((fraction * f64::from(width)).round() as u16).min(width)
}
