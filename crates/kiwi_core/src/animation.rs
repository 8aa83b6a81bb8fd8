//! Frame-based walk-cycle animation.
//!
//! The animator advances a cyclic frame index on a fixed per-frame duration
//! while the sprite is moving, and snaps back to frame 0 the moment it stops.
//!
//! The cycle length is `frame_count - 1`: the last loaded frame is never shown.
//! This matches the shipped animation and is kept as-is until the art
//! direction says otherwise.

/// Runtime state for the sprite's walk cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    pub frame_index: usize,
    pub elapsed_in_frame: f64,
    pub frame_duration: f64,
    pub is_moving: bool,
    frame_count: usize,
}

impl Animator {
    /// `frame_count` is the number of loaded frames; `frame_duration` is in
    /// seconds and must be positive.
    pub fn new(frame_count: usize, frame_duration: f64) -> Self {
        Self {
            frame_index: 0,
            elapsed_in_frame: 0.0,
            frame_duration,
            is_moving: false,
            frame_count,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Number of distinct frames the cycle visits. Never zero, so a
    /// single-frame sheet holds frame 0.
    pub fn cycle_len(&self) -> usize {
        self.frame_count.saturating_sub(1).max(1)
    }

    pub fn advance(&mut self, dt: f64, is_moving: bool) {
        self.is_moving = is_moving;
        if !is_moving {
            self.frame_index = 0;
            self.elapsed_in_frame = 0.0;
            return;
        }
        if self.frame_duration <= 0.0 {
            return;
        }

        self.elapsed_in_frame += dt;
        let cycle = self.cycle_len();
        while self.elapsed_in_frame >= self.frame_duration {
            self.frame_index = (self.frame_index + 1) % cycle;
            self.elapsed_in_frame -= self.frame_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn stays_on_first_frame_until_duration_elapses() {
        let mut anim = Animator::new(4, 0.1);
        anim.advance(0.05, true);
        assert_eq!(anim.frame_index, 0);
        anim.advance(0.06, true);
        assert_eq!(anim.frame_index, 1);
        assert!((anim.elapsed_in_frame - 0.01).abs() < 1e-9);
    }

    #[test]
    fn large_dt_advances_several_frames() {
        let mut anim = Animator::new(6, 0.1);
        anim.advance(0.35, true);
        assert_eq!(anim.frame_index, 3);
        assert!(anim.elapsed_in_frame < anim.frame_duration);
    }

    #[test]
    fn stopping_resets_within_one_tick() {
        let mut anim = Animator::new(4, 0.1);
        for _ in 0..20 {
            anim.advance(DT, true);
        }
        assert_ne!((anim.frame_index, anim.elapsed_in_frame), (0, 0.0));

        anim.advance(DT, false);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_in_frame, 0.0);
        assert!(!anim.is_moving);
    }

    // The last loaded frame is deliberately excluded from the cycle.
    #[test]
    fn cycle_skips_last_loaded_frame() {
        let mut anim = Animator::new(4, 0.1);
        let mut seen = Vec::new();
        for _ in 0..8 {
            anim.advance(0.1, true);
            seen.push(anim.frame_index);
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1, 2]);
        assert!(!seen.contains(&3));
    }

    #[test]
    fn single_and_two_frame_sheets_hold_frame_zero() {
        for count in [0, 1, 2] {
            let mut anim = Animator::new(count, 0.1);
            for _ in 0..30 {
                anim.advance(DT, true);
                assert_eq!(anim.frame_index, 0);
            }
        }
    }

    #[test]
    fn frame_index_stays_in_cycle_range() {
        let mut anim = Animator::new(5, 0.05);
        for i in 0..500 {
            anim.advance(DT, i % 37 != 0);
            assert!(anim.frame_index < anim.cycle_len());
        }
    }

    #[test]
    fn identical_inputs_give_identical_state() {
        let mut a = Animator::new(8, 0.08);
        let mut b = Animator::new(8, 0.08);
        for i in 0..240 {
            let moving = (i / 40) % 2 == 0;
            a.advance(DT, moving);
            b.advance(DT, moving);
        }
        assert_eq!(a, b);
    }
}
