//! Screen capability interface and the closed set of screens.
//!
//! Screens never touch the window, GPU or audio device. They push
//! `ScreenCommand`s, which the engine applies at the frame boundary after the
//! fixed steps have run.

use kiwi_core::{DrawList, GameMode, InputState, Key, MouseBtn, Resolution};

use crate::menu_screen::MenuScreen;
use crate::play_screen::PlayScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    SetWindowSize(Resolution),
    StartGame { resolution: Resolution, mode: GameMode },
    ReturnToMenu,
    SetMusic { playing: bool },
}

pub trait Screen {
    fn title(&self) -> &'static str;

    /// Called once when the screen becomes active.
    fn init(&mut self, _commands: &mut Vec<ScreenCommand>) {}

    /// One fixed simulation step.
    fn update(&mut self, dt: f64, input: &InputState);

    fn render(&self) -> DrawList;

    fn on_key(&mut self, key: Key, commands: &mut Vec<ScreenCommand>);

    /// Left click at `point` in logical pixels.
    fn on_mouse(&mut self, point: (f64, f64), commands: &mut Vec<ScreenCommand>);

    fn on_resize(&mut self, width: f64, height: f64);

    /// Extra lines for the debug overlay.
    fn debug_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

pub enum ActiveScreen {
    Menu(MenuScreen),
    Play(PlayScreen),
}

impl ActiveScreen {
    pub fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Menu(menu) => menu,
            Self::Play(play) => play,
        }
    }

    pub fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Menu(menu) => menu,
            Self::Play(play) => play,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Menu(_) => "Menu",
            Self::Play(_) => "Play",
        }
    }
}

/// Run one fixed step: deliver this step's key presses and left click, then
/// update. Edge-triggered input must be cleared by the caller afterwards so
/// each press is delivered exactly once.
pub fn run_tick(
    screen: &mut dyn Screen,
    input: &InputState,
    dt: f64,
    commands: &mut Vec<ScreenCommand>,
) {
    for key in input.just_pressed_keys() {
        screen.on_key(key, commands);
    }
    if input.is_mouse_just_pressed(MouseBtn::Left) {
        screen.on_mouse(input.mouse_position, commands);
    }
    screen.update(dt, input);
}
