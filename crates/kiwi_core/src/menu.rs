//! Main-menu state machine and button hit-testing.
//!
//! States: `Main -> {Settings, GameModeSelection} -> Main`. ESC returns to
//! `Main` from either child; `Main` has no parent. Every state change
//! recomputes the button rectangles for the current viewport.

use crate::draw::Rect;
use crate::input::Key;
use crate::mode::{GameMode, Resolution};

pub const BUTTON_WIDTH: f64 = 220.0;
pub const BUTTON_HEIGHT: f64 = 60.0;
pub const MUTE_BUTTON_SIZE: f64 = 45.0;
pub const MUTE_BUTTON_MARGIN: f64 = 20.0;
pub const RESOLUTION_BUTTON_WIDTH: f64 = 200.0;
pub const RESOLUTION_BUTTON_HEIGHT: f64 = 40.0;
pub const RESOLUTION_BUTTON_SPACING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    Main,
    Settings,
    GameModeSelection,
}

/// Button rectangles for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub play: Rect,
    pub settings: Rect,
    pub story_mode: Rect,
    pub multiplayer: Rect,
    pub mute: Rect,
    pub resolutions: Vec<Rect>,
}

impl MenuLayout {
    pub fn compute(width: f64, height: f64, resolution_count: usize) -> Self {
        let center_x = width / 2.0;
        let mid_y = height / 2.0;
        let button_x = center_x - BUTTON_WIDTH / 2.0;

        let first_resolution_y = mid_y - 30.0;
        let resolutions = (0..resolution_count)
            .map(|i| {
                Rect::new(
                    center_x - RESOLUTION_BUTTON_WIDTH / 2.0,
                    first_resolution_y
                        + i as f64 * (RESOLUTION_BUTTON_HEIGHT + RESOLUTION_BUTTON_SPACING),
                    RESOLUTION_BUTTON_WIDTH,
                    RESOLUTION_BUTTON_HEIGHT,
                )
            })
            .collect();

        Self {
            play: Rect::new(button_x, mid_y - BUTTON_HEIGHT - 20.0, BUTTON_WIDTH, BUTTON_HEIGHT),
            settings: Rect::new(
                button_x,
                mid_y + BUTTON_HEIGHT / 2.0 + 10.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            story_mode: Rect::new(button_x, mid_y - BUTTON_HEIGHT - 5.0, BUTTON_WIDTH, BUTTON_HEIGHT),
            multiplayer: Rect::new(
                button_x,
                mid_y + BUTTON_HEIGHT / 2.0 - 5.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            mute: Rect::new(
                width - MUTE_BUTTON_SIZE - MUTE_BUTTON_MARGIN,
                height - MUTE_BUTTON_SIZE - MUTE_BUTTON_MARGIN,
                MUTE_BUTTON_SIZE,
                MUTE_BUTTON_SIZE,
            ),
            resolutions,
        }
    }
}

/// Side effects the menu asks its owner to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Music should now be playing iff `muted` is false.
    ToggleMute { muted: bool },
    SetResolution(Resolution),
    StartGame { resolution: Resolution, mode: GameMode },
}

#[derive(Debug, Clone)]
pub struct Menu {
    state: MenuState,
    layout: MenuLayout,
    resolutions: Vec<Resolution>,
    current_resolution: Resolution,
    muted: bool,
    viewport: (f64, f64),
}

impl Menu {
    /// `viewport` is the current window size in logical pixels.
    pub fn new(
        viewport: (f64, f64),
        resolutions: Vec<Resolution>,
        current_resolution: Resolution,
        muted: bool,
    ) -> Self {
        let layout = MenuLayout::compute(viewport.0, viewport.1, resolutions.len());
        Self {
            state: MenuState::Main,
            layout,
            resolutions,
            current_resolution,
            muted,
            viewport,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn current_resolution(&self) -> Resolution {
        self.current_resolution
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        self.recalculate_layout();
    }

    fn recalculate_layout(&mut self) {
        self.layout = MenuLayout::compute(self.viewport.0, self.viewport.1, self.resolutions.len());
    }

    fn transition(&mut self, next: MenuState) {
        log::info!("Menu: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.recalculate_layout();
    }

    /// Handle a left click at `point` (logical pixels). The mute button is
    /// live in every state and checked first.
    pub fn on_click(&mut self, point: (f64, f64)) -> Option<MenuAction> {
        if self.layout.mute.contains(point) {
            return Some(self.toggle_mute());
        }

        match self.state {
            MenuState::Main => {
                if self.layout.play.contains(point) {
                    self.transition(MenuState::GameModeSelection);
                } else if self.layout.settings.contains(point) {
                    self.transition(MenuState::Settings);
                }
                None
            }
            MenuState::GameModeSelection => {
                let mode = if self.layout.story_mode.contains(point) {
                    GameMode::Story
                } else if self.layout.multiplayer.contains(point) {
                    GameMode::Multiplayer
                } else {
                    return None;
                };
                log::info!("{} selected at {}", mode, self.current_resolution);
                Some(MenuAction::StartGame {
                    resolution: self.current_resolution,
                    mode,
                })
            }
            MenuState::Settings => {
                let index = self
                    .layout
                    .resolutions
                    .iter()
                    .position(|rect| rect.contains(point))?;
                let selected = self.resolutions[index];
                if selected == self.current_resolution {
                    return None;
                }
                log::info!("Resolution changed to {}", selected);
                self.current_resolution = selected;
                self.viewport = (f64::from(selected.width), f64::from(selected.height));
                self.recalculate_layout();
                Some(MenuAction::SetResolution(selected))
            }
        }
    }

    pub fn toggle_mute(&mut self) -> MenuAction {
        self.muted = !self.muted;
        log::info!(
            "Background music {}",
            if self.muted { "muted" } else { "unmuted" }
        );
        MenuAction::ToggleMute { muted: self.muted }
    }

    /// ESC backs out of a child state (no-op in `Main`); M toggles mute from
    /// anywhere.
    pub fn on_key(&mut self, key: Key) -> Option<MenuAction> {
        match key {
            Key::M => Some(self.toggle_mute()),
            Key::Escape => {
                if self.state != MenuState::Main {
                    self.transition(MenuState::Main);
                }
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(
            (800.0, 600.0),
            Resolution::PRESETS.to_vec(),
            Resolution::new(800, 600),
            false,
        )
    }

    fn click(menu: &mut Menu, rect: Rect) -> Option<MenuAction> {
        menu.on_click(rect.center())
    }

    #[test]
    fn layout_matches_800x600() {
        let layout = MenuLayout::compute(800.0, 600.0, 3);
        assert_eq!(layout.play, Rect::new(290.0, 220.0, 220.0, 60.0));
        assert_eq!(layout.settings, Rect::new(290.0, 340.0, 220.0, 60.0));
        assert_eq!(layout.story_mode, Rect::new(290.0, 235.0, 220.0, 60.0));
        assert_eq!(layout.multiplayer, Rect::new(290.0, 325.0, 220.0, 60.0));
        assert_eq!(layout.mute, Rect::new(735.0, 535.0, 45.0, 45.0));
        assert_eq!(layout.resolutions[0], Rect::new(300.0, 270.0, 200.0, 40.0));
        assert_eq!(layout.resolutions[2].y, 370.0);
    }

    #[test]
    fn settings_click_enters_settings_and_esc_returns() {
        let mut m = menu();
        let settings = m.layout().settings;
        assert_eq!(click(&mut m, settings), None);
        assert_eq!(m.state(), MenuState::Settings);
        assert_eq!(m.layout().resolutions.len(), 3);

        assert_eq!(m.on_key(Key::Escape), None);
        assert_eq!(m.state(), MenuState::Main);
    }

    #[test]
    fn play_enters_mode_selection() {
        let mut m = menu();
        let play = m.layout().play;
        click(&mut m, play);
        assert_eq!(m.state(), MenuState::GameModeSelection);
        m.on_key(Key::Escape);
        assert_eq!(m.state(), MenuState::Main);
    }

    #[test]
    fn esc_in_main_is_a_no_op() {
        let mut m = menu();
        assert_eq!(m.on_key(Key::Escape), None);
        assert_eq!(m.on_key(Key::Left), None);
        assert_eq!(m.state(), MenuState::Main);
    }

    #[test]
    fn m_key_toggles_mute() {
        let mut m = menu();
        assert_eq!(m.on_key(Key::M), Some(MenuAction::ToggleMute { muted: true }));
        assert!(m.is_muted());
        assert_eq!(m.on_key(Key::M), Some(MenuAction::ToggleMute { muted: false }));
    }

    #[test]
    fn choosing_a_mode_starts_the_game_with_current_resolution() {
        let mut m = menu();
        let play = m.layout().play;
        click(&mut m, play);
        let multiplayer = m.layout().multiplayer;
        assert_eq!(
            click(&mut m, multiplayer),
            Some(MenuAction::StartGame {
                resolution: Resolution::new(800, 600),
                mode: GameMode::Multiplayer,
            })
        );
    }

    #[test]
    fn selecting_a_new_resolution_resizes_and_relayouts() {
        let mut m = menu();
        let settings = m.layout().settings;
        click(&mut m, settings);
        let second = m.layout().resolutions[1];
        assert_eq!(
            click(&mut m, second),
            Some(MenuAction::SetResolution(Resolution::new(1024, 768)))
        );
        assert_eq!(m.current_resolution(), Resolution::new(1024, 768));
        assert_eq!(m.layout().mute.x, 1024.0 - 65.0);
        assert_eq!(m.state(), MenuState::Settings);
    }

    #[test]
    fn selecting_the_active_resolution_does_nothing() {
        let mut m = menu();
        let settings = m.layout().settings;
        click(&mut m, settings);
        let first = m.layout().resolutions[0];
        assert_eq!(click(&mut m, first), None);
        assert_eq!(m.current_resolution(), Resolution::new(800, 600));
    }

    #[test]
    fn mute_toggles_in_every_state() {
        let mut m = menu();
        let mute = m.layout().mute;
        assert_eq!(click(&mut m, mute), Some(MenuAction::ToggleMute { muted: true }));
        let settings = m.layout().settings;
        click(&mut m, settings);
        let mute = m.layout().mute;
        assert_eq!(click(&mut m, mute), Some(MenuAction::ToggleMute { muted: false }));
        assert_eq!(m.state(), MenuState::Settings);
    }

    #[test]
    fn clicks_outside_buttons_are_ignored() {
        let mut m = menu();
        assert_eq!(m.on_click((5.0, 5.0)), None);
        assert_eq!(m.state(), MenuState::Main);
    }

    #[test]
    fn main_buttons_are_inactive_in_child_states() {
        let mut m = menu();
        let settings = m.layout().settings;
        click(&mut m, settings);
        // The play button area overlaps nothing in Settings.
        let play = m.layout().play;
        assert_eq!(m.on_click((play.x + 1.0, play.y + 1.0)), None);
        assert_eq!(m.state(), MenuState::Settings);
    }

    #[test]
    fn viewport_change_moves_buttons() {
        let mut m = menu();
        m.set_viewport(1280.0, 720.0);
        assert_eq!(m.layout().play.x, 640.0 - 110.0);
    }
}
