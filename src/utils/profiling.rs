use std::time::{Duration, Instant};

/// Timing and counter data for the physics steps run since the last reset.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub integration_time: Duration,
    pub narrow_phase_time: Duration,
    pub resolution_time: Duration,

    pub ticks: usize,
    pub updates: usize,
    pub pairs_tested: usize,
    pub overlaps: usize,
    pub contacts_resolved: usize,
    pub callbacks_fired: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        if self.updates == 0 {
            return;
        }

        log::info!(
            "physics profile: {} ticks, {} updates, {} pairs tested, {} overlaps, {} contacts, {} callbacks",
            self.ticks,
            self.updates,
            self.pairs_tested,
            self.overlaps,
            self.contacts_resolved,
            self.callbacks_fired
        );
        log::info!(
            "  integration {:.3} ms, narrow phase {:.3} ms, resolution {:.3} ms",
            self.integration_time.as_secs_f32() * 1000.0,
            self.narrow_phase_time.as_secs_f32() * 1000.0,
            self.resolution_time.as_secs_f32() * 1000.0
        );
    }
}

/// Adds the elapsed time of its scope to a profiler field.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
