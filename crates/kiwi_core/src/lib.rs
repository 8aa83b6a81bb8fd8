//! Kiwi Lore simulation core: everything that runs inside a fixed step and
//! needs no window, GPU or audio device.

pub mod animation;
pub mod draw;
pub mod input;
pub mod menu;
pub mod mode;
pub mod physics;
pub mod scroll;
pub mod sim;
pub mod time;

pub use animation::Animator;
pub use draw::{Color, DrawCommand, DrawList, Rect};
pub use input::{InputState, Key, MouseBtn, MoveIntent};
pub use menu::{Menu, MenuAction, MenuState};
pub use mode::{GameMode, Resolution};
pub use physics::{PhysicsBody, SimTuning, SpriteState};
pub use scroll::{scroll_step, ScrollController, ScrollState, ScrollView};
pub use sim::{PlayLayout, PlaySimulation};
pub use time::FrameClock;
