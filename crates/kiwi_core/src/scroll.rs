//! Background panning versus sprite walking.
//!
//! Each tick decides whether the world scrolls past a centered sprite or the
//! sprite walks on its own, using only the current background offset and the
//! sprite position. There is no explicit scroll/walk mode: every tick
//! recomputes the edge predicates and re-applies the clamps.
//!
//! Invariant after every tick: `min_offset() <= offset_x <= 0`.

use crate::input::MoveIntent;

/// Background scroll state. `offset_x` is the draw position of the
/// background's left edge, so panning left makes it more negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset_x: f64,
    pub background_width: f64,
    pub background_height: f64,
    /// Pan speed in px/s.
    pub scroll_speed: f64,
}

impl ScrollState {
    pub fn new(background_width: f64, background_height: f64, scroll_speed: f64) -> Self {
        Self {
            offset_x: 0.0,
            background_width,
            background_height,
            scroll_speed,
        }
    }

    /// Lowest legal offset for a viewport `screen_width` wide. A background
    /// no wider than the viewport cannot pan, so this is then 0.
    pub fn min_offset(&self, screen_width: f64) -> f64 {
        -(self.background_width - screen_width).max(0.0)
    }

    pub fn at_left_edge(&self) -> bool {
        self.offset_x >= 0.0
    }

    pub fn at_right_edge(&self, screen_width: f64) -> bool {
        self.offset_x <= self.min_offset(screen_width)
    }

    pub fn clamp_offset(&mut self, screen_width: f64) {
        self.offset_x = self.offset_x.clamp(self.min_offset(screen_width), 0.0);
    }
}

/// Everything about the viewport and sprite the scroll policy reads but never
/// writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollView {
    pub screen_width: f64,
    pub sprite_width: f64,
    /// Sprite walk speed in px/s.
    pub sprite_speed: f64,
    pub center_epsilon: f64,
}

impl ScrollView {
    /// Sprite x that puts it in the middle of the screen.
    pub fn centered_x(&self) -> f64 {
        self.screen_width / 2.0 - self.sprite_width / 2.0
    }

    pub fn max_sprite_x(&self) -> f64 {
        self.screen_width - self.sprite_width
    }

    pub fn is_centered(&self, sprite_x: f64) -> bool {
        (sprite_x - self.centered_x()).abs() < self.center_epsilon
    }
}

/// One tick of the scroll policy. Pure: returns the new scroll state and
/// sprite x.
///
/// Moving right: while the background still has room it pans left and the
/// sprite is pulled back to center if it drifted; the sprite then advances.
/// Once the background is at its right edge the sprite walks freely up to the
/// screen edge; otherwise a sprite that started the tick centered is
/// re-pinned to center. Moving left mirrors this against the left edge and
/// `x = 0`. The offset is clamped into range last, whatever the input.
pub fn scroll_step(
    mut scroll: ScrollState,
    sprite_x: f64,
    intent: MoveIntent,
    dt: f64,
    view: &ScrollView,
) -> (ScrollState, f64) {
    let mut x = sprite_x;
    let centered_x = view.centered_x();
    let was_centered = view.is_centered(sprite_x);

    if intent.moving {
        if intent.moving_right {
            if !scroll.at_right_edge(view.screen_width) {
                scroll.offset_x -= scroll.scroll_speed * dt;
                if !was_centered {
                    x = centered_x;
                }
            }
            x += view.sprite_speed * dt;
            if scroll.at_right_edge(view.screen_width) {
                x = x.min(view.max_sprite_x());
            } else if was_centered {
                x = centered_x;
            }
        } else {
            if !scroll.at_left_edge() {
                scroll.offset_x += scroll.scroll_speed * dt;
                if !was_centered {
                    x = centered_x;
                }
            }
            x -= view.sprite_speed * dt;
            if scroll.at_left_edge() {
                x = x.max(0.0);
            } else if was_centered {
                x = centered_x;
            }
        }
    }

    scroll.clamp_offset(view.screen_width);
    (scroll, x)
}

/// Stateful wrapper that owns the scroll state between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollController {
    pub state: ScrollState,
}

impl ScrollController {
    pub fn new(state: ScrollState) -> Self {
        Self { state }
    }

    /// Advance one tick, updating `sprite_x` in place.
    pub fn tick(&mut self, dt: f64, intent: MoveIntent, sprite_x: &mut f64, view: &ScrollView) {
        let (state, x) = scroll_step(self.state, *sprite_x, intent, dt, view);
        self.state = state;
        *sprite_x = x;
    }
}
