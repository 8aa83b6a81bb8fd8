//! Vertical motion: constant gravity, a landing clamp at ground level, and a
//! single-impulse jump that only fires when grounded.
//!
//! Screen space is y-down, so gravity is positive and the launch velocity is
//! negative.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub y: f64,
    pub vertical_velocity: f64,
    pub ground_y: f64,
    pub gravity: f64,
    pub launch_velocity: f64,
}

impl PhysicsBody {
    /// A body resting on `ground_y`.
    pub fn grounded_at(ground_y: f64, gravity: f64, launch_velocity: f64) -> Self {
        Self {
            y: ground_y,
            vertical_velocity: 0.0,
            ground_y,
            gravity,
            launch_velocity,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.y == self.ground_y
    }

    /// Semi-implicit Euler step followed by the landing clamp. Upward motion
    /// is never clamped. Touching ground exactly also zeroes the velocity, so
    /// a body at `ground_y` is never still falling.
    pub fn integrate(&mut self, dt: f64) {
        self.vertical_velocity += self.gravity * dt;
        self.y += self.vertical_velocity * dt;
        if self.y >= self.ground_y {
            self.y = self.ground_y;
            self.vertical_velocity = 0.0;
        }
    }

    /// Apply the launch impulse. No-op while airborne. Returns whether the
    /// impulse was applied.
    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vertical_velocity = self.launch_velocity;
        true
    }
}

/// The player sprite: horizontal position, fixed size, facing, and its
/// vertical body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteState {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub facing_right: bool,
    pub body: PhysicsBody,
}

impl SpriteState {
    /// Place a grounded sprite at `x`. `ground_y` is `screen_height - height`.
    pub fn new(x: f64, width: f64, height: f64, screen_height: f64, tuning: &SimTuning) -> Self {
        let ground_y = screen_height - height;
        Self {
            x,
            width,
            height,
            facing_right: true,
            body: PhysicsBody::grounded_at(ground_y, tuning.gravity, tuning.launch_velocity),
        }
    }

    pub fn y(&self) -> f64 {
        self.body.y
    }
}

/// Tunable constants for the play simulation, loadable from the game config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    /// px/s², positive is down.
    pub gravity: f64,
    /// px/s, negative is up.
    pub launch_velocity: f64,
    /// Seconds per animation frame.
    pub frame_duration: f64,
    /// Background pan speed in px/s.
    pub scroll_speed: f64,
    /// Sprite walk speed in px/s.
    pub sprite_speed: f64,
    /// Tolerance for the "sprite is centered" predicate, in px.
    pub center_epsilon: f64,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            gravity: 500.0,
            launch_velocity: -300.0,
            frame_duration: 0.1,
            scroll_speed: 200.0,
            sprite_speed: 200.0,
            center_epsilon: 1.0,
        }
    }
}

impl SimTuning {
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_duration.is_nan() || self.frame_duration <= 0.0 {
            return Err(format!(
                "frame_duration must be > 0, got {}",
                self.frame_duration
            ));
        }
        if self.scroll_speed < 0.0 || self.sprite_speed < 0.0 {
            return Err("scroll_speed and sprite_speed must be >= 0".to_string());
        }
        if self.gravity < 0.0 {
            return Err(format!("gravity must be >= 0, got {}", self.gravity));
        }
        if self.launch_velocity > 0.0 {
            return Err(format!(
                "launch_velocity must be <= 0 (up is negative), got {}",
                self.launch_velocity
            ));
        }
        if self.center_epsilon < 0.0 {
            return Err("center_epsilon must be >= 0".to_string());
        }
        Ok(())
    }
}
