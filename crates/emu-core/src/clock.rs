//! Master clock configuration.

use crate::Ticks;

/// Master clock configuration for a system.
///
/// Every machine has one crystal that paces the CPU. Frame pacing and
/// interrupt cadence derive from this frequency.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// CPU clock frequency in Hz (e.g., `2_000_000` for Space Invaders).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Ticks per frame at the given frame rate (integer division).
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        Ticks::new(self.frequency_hz / frames_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_megahertz_at_sixty_hz() {
        let clock = MasterClock::new(2_000_000);
        assert_eq!(clock.ticks_per_frame(60), Ticks::new(33_333));
    }
}
