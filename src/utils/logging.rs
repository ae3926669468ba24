use log::{debug, log_enabled, warn, Level};
use std::time::Instant;

/// Scoped timer that traces the wall-clock cost of a physics stage.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            let elapsed = self.start.elapsed();
            log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}

/// Reports time dropped by the accumulator clamp. Losing less than one step
/// is routine frame jitter and only logged at debug level.
pub fn warn_if_accumulator_clamped(accumulated: f32, limit: f32, step: f32) {
    let dropped = accumulated - limit;
    match clamp_log_level(dropped, step) {
        Some(Level::Warn) => warn!(
            "physics fell behind: dropping {:.2} ms of accumulated time (limit {:.2} ms)",
            dropped * 1000.0,
            limit * 1000.0
        ),
        Some(_) => debug!(
            "accumulator clamped: {:.2} ms dropped (limit {:.2} ms)",
            dropped * 1000.0,
            limit * 1000.0
        ),
        None => {}
    }
}

fn clamp_log_level(dropped: f32, step: f32) -> Option<Level> {
    if dropped <= 0.0 {
        None
    } else if dropped > step {
        Some(Level::Warn)
    } else {
        Some(Level::Debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn steady_sixty_hz_clamp_is_not_a_warning() {
        let accumulated = STEP * 2.0;
        assert_eq!(clamp_log_level(accumulated - 0.030, STEP), Some(Level::Debug));
        assert_eq!(clamp_log_level(0.020 - 0.030, STEP), None);
    }

    #[test]
    fn dropping_more_than_a_step_warns() {
        assert_eq!(clamp_log_level(0.25 - 0.030, STEP), Some(Level::Warn));
    }
}
