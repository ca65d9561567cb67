//! Structured logging and phase timing.

use std::time::{Duration, Instant};

/// Wall-clock durations of the phases of a run.
#[derive(Debug)]
pub struct PhaseTimer {
    start: Instant,
    phase_start: Instant,
    phases: Vec<(&'static str, Duration)>,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            phase_start: now,
            phases: Vec::new(),
        }
    }

    /// Closes the current phase under `name` and starts the next one.
    pub fn finish(&mut self, name: &'static str) -> Duration {
        let elapsed = self.phase_start.elapsed();
        tracing::debug!(
            phase = name,
            duration_ms = elapsed.as_millis() as u64,
            "Phase finished"
        );
        self.phases.push((name, elapsed));
        self.phase_start = Instant::now();
        elapsed
    }

    #[must_use]
    pub fn phases(&self) -> &[(&'static str, Duration)] {
        &self.phases
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_are_recorded_in_order() {
        let mut timer = PhaseTimer::new();
        timer.finish("architecture");
        timer.finish("mutation");
        let names: Vec<_> = timer.phases().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["architecture", "mutation"]);
        assert!(timer.elapsed() >= timer.phases()[0].1);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(tracing::Level::INFO);
        init_logging(tracing::Level::DEBUG);
    }
}
