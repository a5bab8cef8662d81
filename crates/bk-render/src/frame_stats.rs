use std::time::Instant;

/// Smoothing factor for the frame-time moving average.
const EMA_ALPHA: f64 = 0.1;

/// Frame pacing stats for the footer line. Exponential moving average
/// over frame intervals — zero allocation, one `Instant` of state.
///
/// # Example
/// ```
/// use bk_render::frame_stats::FrameStats;
/// let mut stats = FrameStats::new();
/// stats.tick();
/// assert!(stats.fps() >= 0.0);
/// ```
pub struct FrameStats {
    last: Option<Instant>,
    ema_frame_s: f64,
    /// Raw duration of the last frame, in milliseconds.
    pub frame_time_ms: f64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            ema_frame_s: 0.0,
            frame_time_ms: 0.0,
        }
    }

    /// Appeler une fois par frame, après le rendu.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f64();
            self.frame_time_ms = dt * 1000.0;
            self.ema_frame_s = if self.ema_frame_s == 0.0 {
                dt
            } else {
                self.ema_frame_s * (1.0 - EMA_ALPHA) + dt * EMA_ALPHA
            };
        }
        self.last = Some(now);
    }

    /// Smoothed frames per second. Zero until two ticks have happened.
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.ema_frame_s > 0.0 {
            1.0 / self.ema_frame_s
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fps_is_zero_before_two_ticks() {
        let mut stats = FrameStats::new();
        assert!(stats.fps().abs() < f64::EPSILON);
        stats.tick();
        assert!(stats.fps().abs() < f64::EPSILON);
    }

    #[test]
    fn fps_tracks_frame_interval() {
        let mut stats = FrameStats::new();
        stats.tick();
        std::thread::sleep(Duration::from_millis(10));
        stats.tick();
        let fps = stats.fps();
        assert!(fps > 0.0);
        assert!(fps < 150.0, "10ms frame should not read as >150 fps: {fps}");
        assert!(stats.frame_time_ms >= 9.0);
    }
}
