use std::time::{Duration, Instant, SystemTime};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Wall-clock timestamp taken at the tick.
    ///
    /// Animation phase derives from this so every consumer in a frame sees the
    /// same instant.
    pub wall: SystemTime,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Per-window frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a huge `dt`. The clock also keeps a running frame rate that is
/// refreshed once per `report_interval`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,

    window_start: Instant,
    window_frames: u32,
    report_interval: Duration,
    fps: Option<f32>,
}

impl FrameClock {
    /// Creates a clock clamping `dt` to `[0.1 ms, 250 ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
            window_start: now,
            window_frames: 0,
            report_interval: Duration::from_secs(2),
            fps: None,
        }
    }

    /// Frame rate measured over the last completed report interval.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        self.window_frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.report_interval {
            let fps = self.window_frames as f32 / elapsed.as_secs_f32();
            log::debug!("{fps:.1} fps over {} frames", self.window_frames);
            self.fps = Some(fps);
            self.window_start = now;
            self.window_frames = 0;
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            wall: SystemTime::now(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_advances() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let dt = clock.tick().dt;
        assert!((0.005 - 1e-6..=0.010 + 1e-6).contains(&dt), "dt = {dt}");
    }

    #[test]
    fn no_fps_before_first_interval() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.fps(), None);
    }
}
