use glam::Vec3;

/// Rotation speed; offsets also move at `rate * DEGREES_PER_SECOND` units per second.
pub const DEGREES_PER_SECOND: f32 = 30.0;

/// Absolute Y offset beyond which all rates reverse.
pub const BOUNCE_LIMIT: f32 = 2.5;

/// How a scene uses the animation state when building its model-view matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Motion {
    /// Fixed in front of the camera.
    Still,
    /// Rotates by the current angle about `axis`.
    Spin { axis: Vec3 },
    /// Rotates about `axis` and translates by the bouncing offsets.
    SpinAndBounce { axis: Vec3 },
}

/// Mutable animation record owned by the render loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    /// Accumulated rotation in degrees.
    pub angle: f32,
    /// Positional offsets.
    pub offset: Vec3,
    /// Signed per-axis rates.
    pub rate: Vec3,
}

impl AnimationState {
    pub fn new(rate: Vec3) -> Self {
        Self {
            angle: 0.0,
            offset: Vec3::ZERO,
            rate,
        }
    }

    /// Advances by `dt_ms` milliseconds.
    ///
    /// Non-positive (or NaN) deltas are no-ops. The bounce only fires while the Y
    /// offset is past [`BOUNCE_LIMIT`] and still moving outward, so one crossing
    /// flips the rates exactly once however small the ticks are.
    pub fn tick(&mut self, dt_ms: f32) {
        if !(dt_ms > 0.0) {
            return;
        }

        let step = DEGREES_PER_SECOND * dt_ms / 1000.0;
        self.angle += step;
        self.offset += self.rate * step;

        if self.offset.y.abs() > BOUNCE_LIMIT && self.offset.y * self.rate.y > 0.0 {
            self.rate = -self.rate;
            log::trace!("bounce at y = {:.3}", self.offset.y);
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(Vec3::new(0.2, -0.4, 0.3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f32 = 15.0;

    #[test]
    fn zero_tick_is_identity() {
        let mut s = AnimationState::default();
        s.tick(100.0);
        let before = s;
        s.tick(0.0);
        assert_eq!(s, before);
    }

    #[test]
    fn negative_tick_is_ignored() {
        let mut s = AnimationState::default();
        s.tick(-15.0);
        assert_eq!(s, AnimationState::default());
    }

    #[test]
    fn angle_accumulates_additively() {
        let mut s = AnimationState::default();
        s.tick(15.0);
        s.tick(485.0);
        let expected = 30.0 * (15.0 + 485.0) / 1000.0;
        assert!((s.angle - expected).abs() < 1e-4, "angle {} != {expected}", s.angle);
    }

    #[test]
    fn offsets_move_along_signed_rates() {
        let mut s = AnimationState::default();
        s.tick(1000.0);
        assert!((s.offset - Vec3::new(6.0, -12.0, 9.0)).length() < 1e-4);
    }

    #[test]
    fn bounce_flips_all_rates() {
        let mut s = AnimationState::new(Vec3::new(0.2, 0.4, -0.3));
        s.offset.y = BOUNCE_LIMIT - 0.01;
        s.tick(FRAME_MS);
        assert!(s.offset.y > BOUNCE_LIMIT);
        assert_eq!(s.rate, Vec3::new(-0.2, -0.4, 0.3));
    }

    #[test]
    fn bounce_fires_once_per_crossing() {
        let initial = AnimationState::default();
        let mut s = initial;
        let mut flips = 0;
        let mut crossings = 0;
        let mut outside = false;

        // ~20 s of 15 ms frames.
        for _ in 0..1333 {
            let rate_before = s.rate;
            s.tick(FRAME_MS);

            let now_outside = s.offset.y.abs() > BOUNCE_LIMIT;
            if now_outside && !outside {
                crossings += 1;
            }
            outside = now_outside;

            if s.rate != rate_before {
                flips += 1;
                assert_eq!(s.rate, -rate_before);
            }
        }

        assert!(crossings > 1);
        assert_eq!(flips, crossings);
    }

    #[test]
    fn offsets_stay_near_the_bound() {
        let mut s = AnimationState::default();
        for _ in 0..10_000 {
            s.tick(FRAME_MS);
            assert!(s.offset.y.abs() < BOUNCE_LIMIT + 0.5);
        }
    }
}
