//! Per-tick state of the playable screen.
//!
//! `PlaySimulation` owns the sprite, its animator and the background scroll
//! controller. It is mutated only by `step()`; rendering reads it.

use crate::animation::Animator;
use crate::input::MoveIntent;
use crate::physics::{SimTuning, SpriteState};
use crate::scroll::{ScrollController, ScrollState, ScrollView};

/// Sizes the simulation is built from. Background size comes from the loaded
/// image, or equals the screen when the image is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayLayout {
    pub screen_width: f64,
    pub screen_height: f64,
    pub sprite_width: f64,
    pub sprite_height: f64,
    pub background_width: f64,
    pub background_height: f64,
    pub frame_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaySimulation {
    pub sprite: SpriteState,
    pub animation: Animator,
    pub scroll: ScrollController,
    pub screen_width: f64,
    pub screen_height: f64,
    tuning: SimTuning,
}

impl PlaySimulation {
    /// Sprite starts centered and grounded, background at offset 0.
    pub fn new(layout: PlayLayout, tuning: SimTuning) -> Self {
        let centered_x = layout.screen_width / 2.0 - layout.sprite_width / 2.0;
        let sprite = SpriteState::new(
            centered_x,
            layout.sprite_width,
            layout.sprite_height,
            layout.screen_height,
            &tuning,
        );
        Self {
            sprite,
            animation: Animator::new(layout.frame_count, tuning.frame_duration),
            scroll: ScrollController::new(ScrollState::new(
                layout.background_width,
                layout.background_height,
                tuning.scroll_speed,
            )),
            screen_width: layout.screen_width,
            screen_height: layout.screen_height,
            tuning,
        }
    }

    pub fn tuning(&self) -> &SimTuning {
        &self.tuning
    }

    pub fn scroll_view(&self) -> ScrollView {
        ScrollView {
            screen_width: self.screen_width,
            sprite_width: self.sprite.width,
            sprite_speed: self.tuning.sprite_speed,
            center_epsilon: self.tuning.center_epsilon,
        }
    }

    /// Picks up a new viewport size on the next tick. Ground level keeps the
    /// value computed at construction.
    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn step(&mut self, dt: f64, intent: MoveIntent, jump_requested: bool) {
        if jump_requested {
            self.sprite.body.jump();
        }
        self.sprite.body.integrate(dt);
        self.animation.advance(dt, intent.moving);
        if intent.moving {
            self.sprite.facing_right = intent.moving_right;
        }

        let view = self.scroll_view();
        self.scroll.tick(dt, intent, &mut self.sprite.x, &view);
    }
}
