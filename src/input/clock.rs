//! Resettable monotonic clock.

use super::InputError;
use std::time::Instant;

/// Seconds since the clock was created or last set.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
    offset: f64,
}

impl Clock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: 0.0,
        }
    }

    /// Current time in seconds.
    pub fn time(&self) -> f64 {
        self.offset + self.origin.elapsed().as_secs_f64()
    }

    /// Rebase the clock so it reads `seconds` now.
    pub fn set_time(&mut self, seconds: f64) -> Result<(), InputError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(InputError::InvalidTime(seconds));
        }
        self.origin = Instant::now();
        self.offset = seconds;
        Ok(())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
