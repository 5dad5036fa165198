use std::time::{SystemTime, UNIX_EPOCH};

/// Animation phase as a pure function of wall-clock time.
///
/// `phase = seconds since the Unix epoch × speed`. Nothing is accumulated
/// between frames, so playback speed is locked to real time rather than to
/// the frame rate. The phase is `f64`: epoch seconds exceed the precision of
/// `f32` by several orders of magnitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationClock {
    speed: f64,
}

impl AnimationClock {
    pub const fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// Phase at `at`. Times before the epoch map to negative phases.
    pub fn phase_at(&self, at: SystemTime) -> f64 {
        let seconds = match at.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as f64 / 1000.0,
            Err(e) => -(e.duration().as_millis() as f64) / 1000.0,
        };
        seconds * self.speed
    }
}

impl Default for AnimationClock {
    /// One radian of orbit per second.
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn epoch_is_phase_zero() {
        assert_eq!(AnimationClock::default().phase_at(UNIX_EPOCH), 0.0);
    }

    #[test]
    fn millisecond_resolution() {
        let at = UNIX_EPOCH + Duration::from_millis(1_500);
        assert_eq!(AnimationClock::default().phase_at(at), 1.5);
    }

    #[test]
    fn speed_scales_phase() {
        let at = UNIX_EPOCH + Duration::from_secs(10);
        assert_eq!(AnimationClock::new(0.5).phase_at(at), 5.0);
    }

    #[test]
    fn before_epoch_is_negative() {
        let at = UNIX_EPOCH - Duration::from_secs(2);
        assert_eq!(AnimationClock::default().phase_at(at), -2.0);
    }

    #[test]
    fn phase_is_pure() {
        let clock = AnimationClock::default();
        let at = UNIX_EPOCH + Duration::from_millis(1_760_000_000_123);
        assert_eq!(clock.phase_at(at), clock.phase_at(at));
    }
}
