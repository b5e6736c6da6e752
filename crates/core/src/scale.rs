use crate::config::ViewerConfig;

/// Owns the current/target zoom scale and the per-frame interpolation.
///
/// The scale is "distance units visible across half the viewport width":
/// a larger value means more of the world fits on screen. Every frame
/// `advance` multiplies `current` by `step_factor`; a factor above 1 zooms
/// out toward a larger `target`, a factor below 1 zooms in. Wheel input
/// bypasses the animation and multiplies `current` directly.
#[derive(Debug, Clone)]
pub struct ScaleController {
    current: f64,
    target: f64,
    step_factor: f64,
    paused: bool,
    wheel_sensitivity: f64,
    boost_multiplier: f64,
}

impl ScaleController {
    pub fn new(current: f64, target: f64, step_factor: f64, config: &ViewerConfig) -> Self {
        Self {
            current,
            target,
            step_factor,
            paused: false,
            wheel_sensitivity: config.wheel_sensitivity,
            boost_multiplier: config.boost_multiplier,
        }
    }

    /// Advance the animation by one frame.
    ///
    /// Returns `true` once `current` has reached `target`. While paused no
    /// numeric change happens and the return value reports whether progress
    /// is still pending (`current < target`).
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return self.current < self.target;
        }
        self.current *= self.step_factor;
        if self.current > self.target {
            self.current = self.target;
            return true;
        }
        false
    }

    /// Apply a wheel delta: `current *= step_factor^(-k * delta)` where `k`
    /// is the configured sensitivity (boosted while the modifier key is
    /// held). Mutates `current` only — the animation `target` is left
    /// untouched, so manual zoom always overrides an in-flight animation
    /// without redirecting it.
    pub fn apply_wheel(&mut self, delta: f64, boosted: bool) {
        let mut k = self.wheel_sensitivity;
        if boosted {
            k *= self.boost_multiplier;
        }
        self.current *= self.step_factor.powf(-k * delta);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(current: f64, target: f64, step: f64) -> ScaleController {
        ScaleController::new(current, target, step, &ViewerConfig::default())
    }

    #[test]
    fn advance_converges_monotonically_and_hits_target_exactly() {
        let mut c = controller(1.0, 1000.0, 1.1);
        let mut prev = c.current();
        let mut done = false;
        for _ in 0..200 {
            done = c.advance();
            assert!(c.current() >= prev);
            prev = c.current();
            if done {
                break;
            }
        }
        assert!(done, "animation should finish within 200 frames");
        assert_eq!(c.current(), 1000.0);
        // Once complete, further frames stay clamped at the target.
        c.advance();
        assert_eq!(c.current(), 1000.0);
    }

    #[test]
    fn pause_freezes_current_and_resume_continues() {
        let mut c = controller(1.0, 1000.0, 1.5);
        c.advance();
        let frozen = c.current();
        c.toggle_pause();
        for _ in 0..10 {
            assert!(c.advance(), "pending progress is reported while paused");
            assert_eq!(c.current(), frozen);
        }
        c.toggle_pause();
        c.advance();
        assert_eq!(c.current(), frozen * 1.5);
    }

    #[test]
    fn paused_advance_reports_false_once_target_reached() {
        let mut c = controller(10.0, 10.0, 2.0);
        c.toggle_pause();
        assert!(!c.advance());
    }

    #[test]
    fn wheel_multiplies_current_independent_of_target() {
        let mut c = controller(100.0, 1000.0, 1.01);
        c.apply_wheel(1.0, false);
        let expected = 100.0 * 1.01f64.powf(-7.0);
        assert!((c.current() - expected).abs() < 1e-9);
        assert_eq!(c.target(), 1000.0);

        let before = c.current();
        c.apply_wheel(-2.0, true);
        let expected = before * 1.01f64.powf(70.0);
        assert!((c.current() - expected).abs() < 1e-6);
    }

    #[test]
    fn wheel_works_while_paused() {
        let mut c = controller(100.0, 1000.0, 1.01);
        c.toggle_pause();
        c.apply_wheel(1.0, false);
        assert!(c.current() < 100.0);
        assert!(c.is_paused());
    }
}
