//! Keyboard and mouse state with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   physically down. Movement intent is derived from held keys.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only until
//!   `end_frame()`, which the driver calls after each fixed step that
//!   consumed them. A press landing on a zero-step frame waits for the next
//!   step instead of being lost.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    Space,
    Escape,
    M,
    F3,
}

impl Key {
    /// Every key in a fixed order, for deterministic event dispatch.
    pub const ALL: &'static [Key] = &[
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::A,
        Key::D,
        Key::W,
        Key::Space,
        Key::Escape,
        Key::M,
        Key::F3,
    ];

    fn direction(self) -> Option<Direction> {
        match self {
            Key::Left | Key::A => Some(Direction::Left),
            Key::Right | Key::D => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Per-tick horizontal movement intent derived from held direction keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub moving: bool,
    pub moving_right: bool,
}

impl MoveIntent {
    pub const IDLE: MoveIntent = MoveIntent {
        moving: false,
        moving_right: false,
    };
    pub const RIGHT: MoveIntent = MoveIntent {
        moving: true,
        moving_right: true,
    };
    pub const LEFT: MoveIntent = MoveIntent {
        moving: true,
        moving_right: false,
    };

    /// Build an intent from a signed axis value (`< 0` left, `> 0` right).
    pub fn from_axis(move_x: f32) -> Self {
        if move_x > 0.0 {
            Self::RIGHT
        } else if move_x < 0.0 {
            Self::LEFT
        } else {
            Self::IDLE
        }
    }
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
    // Most recently pressed direction wins when both are held.
    last_direction: Option<Direction>,

    mouse_held: HashSet<MouseBtn>,
    mouse_just_pressed: HashSet<MouseBtn>,
    mouse_just_released: HashSet<MouseBtn>,

    /// Cursor position in logical pixels, origin top-left.
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            last_direction: None,
            mouse_held: HashSet::new(),
            mouse_just_pressed: HashSet::new(),
            mouse_just_released: HashSet::new(),
            mouse_position: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
            if let Some(direction) = key.direction() {
                self.last_direction = Some(direction);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        if self.mouse_held.insert(btn) {
            self.mouse_just_pressed.insert(btn);
        }
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        if self.mouse_held.remove(&btn) {
            self.mouse_just_released.insert(btn);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Keys pressed since the last `end_frame()`, in `Key::ALL` order.
    pub fn just_pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL
            .iter()
            .copied()
            .filter(|key| self.just_pressed.contains(key))
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse_held.contains(&btn)
    }

    pub fn is_mouse_just_pressed(&self, btn: MouseBtn) -> bool {
        self.mouse_just_pressed.contains(&btn)
    }

    pub fn is_mouse_just_released(&self, btn: MouseBtn) -> bool {
        self.mouse_just_released.contains(&btn)
    }

    fn direction_held(&self, direction: Direction) -> bool {
        self.held.iter().any(|key| key.direction() == Some(direction))
    }

    /// Movement intent for this tick. Releasing every direction key yields
    /// `moving == false`.
    pub fn move_intent(&self) -> MoveIntent {
        let left = self.direction_held(Direction::Left);
        let right = self.direction_held(Direction::Right);
        match (left, right) {
            (false, false) => MoveIntent::IDLE,
            (true, false) => MoveIntent::LEFT,
            (false, true) => MoveIntent::RIGHT,
            (true, true) => match self.last_direction {
                Some(Direction::Left) => MoveIntent::LEFT,
                _ => MoveIntent::RIGHT,
            },
        }
    }

    /// Jump is edge-triggered on Up, W or Space.
    pub fn jump_requested(&self) -> bool {
        self.is_just_pressed(Key::Up)
            || self.is_just_pressed(Key::W)
            || self.is_just_pressed(Key::Space)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_just_pressed.clear();
        self.mouse_just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
