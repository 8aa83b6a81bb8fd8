use kiwi_core::menu::MenuState;
use kiwi_core::{Color, DrawList, InputState, Key, Menu, MenuAction, Rect, Resolution};

use crate::screen::{Screen, ScreenCommand};

const SKY: Color = Color::rgb(135, 206, 250);
const TITLE_GREEN: Color = Color::rgb(0, 100, 0);
const PLAY_GREEN: Color = Color::rgb(34, 139, 34);
const SETTINGS_ORANGE: Color = Color::rgb(255, 165, 0);
const STORY_BLUE: Color = Color::rgb(70, 130, 180);
const MULTIPLAYER_RED: Color = Color::rgb(220, 20, 60);
const RESOLUTION_ACTIVE: Color = Color::rgb(100, 180, 100);
const RESOLUTION_IDLE: Color = Color::rgb(180, 180, 220);
const MUTE_ON: Color = Color::rgb(150, 150, 150);
const MUTE_OFF: Color = Color::rgb(100, 100, 100);

const TITLE_SIZE: f32 = 70.0;
const HEADER_SIZE: f32 = 40.0;
const BUTTON_TEXT_SIZE: f32 = 28.0;
const INFO_SIZE: f32 = 18.0;

pub struct MenuScreen {
    menu: Menu,
}

impl MenuScreen {
    pub fn new(
        viewport: (f64, f64),
        resolutions: Vec<Resolution>,
        current: Resolution,
        muted: bool,
    ) -> Self {
        Self {
            menu: Menu::new(viewport, resolutions, current, muted),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    fn apply(action: MenuAction, commands: &mut Vec<ScreenCommand>) {
        commands.push(match action {
            MenuAction::ToggleMute { muted } => ScreenCommand::SetMusic { playing: !muted },
            MenuAction::SetResolution(resolution) => ScreenCommand::SetWindowSize(resolution),
            MenuAction::StartGame { resolution, mode } => {
                ScreenCommand::StartGame { resolution, mode }
            }
        });
    }

    fn button(list: &mut DrawList, rect: Rect, fill: Color, label: &str, size: f32, text: Color) {
        list.rect(rect, fill);
        list.bold_text(label, rect.center(), size, text);
    }
}

impl Screen for MenuScreen {
    fn title(&self) -> &'static str {
        "KIWI LORE - Main Menu"
    }

    fn init(&mut self, commands: &mut Vec<ScreenCommand>) {
        commands.push(ScreenCommand::SetMusic {
            playing: !self.menu.is_muted(),
        });
    }

    fn update(&mut self, _dt: f64, _input: &InputState) {}

    fn render(&self) -> DrawList {
        let layout = self.menu.layout();
        let (width, height) = self.menu.viewport();
        let center_x = width / 2.0;
        let mid_y = height / 2.0;

        let mut list = DrawList::new(SKY);
        list.bold_text("KIWI LORE", (center_x, 75.0), TITLE_SIZE, TITLE_GREEN);

        match self.menu.state() {
            MenuState::Main => {
                Self::button(
                    &mut list,
                    layout.play,
                    PLAY_GREEN,
                    "Play",
                    BUTTON_TEXT_SIZE,
                    Color::WHITE,
                );
                Self::button(
                    &mut list,
                    layout.settings,
                    SETTINGS_ORANGE,
                    "Settings",
                    BUTTON_TEXT_SIZE,
                    Color::WHITE,
                );
            }
            MenuState::GameModeSelection => {
                list.bold_text(
                    "Select Game Mode",
                    (center_x, mid_y - 125.0),
                    HEADER_SIZE,
                    Color::BLACK,
                );
                Self::button(
                    &mut list,
                    layout.story_mode,
                    STORY_BLUE,
                    "Story Mode",
                    BUTTON_TEXT_SIZE,
                    Color::WHITE,
                );
                Self::button(
                    &mut list,
                    layout.multiplayer,
                    MULTIPLAYER_RED,
                    "Multiplayer",
                    BUTTON_TEXT_SIZE,
                    Color::WHITE,
                );
                list.text(
                    "Press ESC to go back",
                    (center_x, height - 66.0),
                    INFO_SIZE,
                    Color::BLACK,
                );
            }
            MenuState::Settings => {
                list.bold_text(
                    "Settings",
                    (center_x, mid_y - 175.0),
                    HEADER_SIZE,
                    Color::BLACK,
                );
                list.bold_text(
                    "Resolution:",
                    (center_x, mid_y - 110.0),
                    BUTTON_TEXT_SIZE,
                    Color::BLACK,
                );
                let current = self.menu.current_resolution();
                for (resolution, rect) in self.menu.resolutions().iter().zip(&layout.resolutions) {
                    let fill = if *resolution == current {
                        RESOLUTION_ACTIVE
                    } else {
                        RESOLUTION_IDLE
                    };
                    list.rect(*rect, fill);
                    list.text(&resolution.to_string(), rect.center(), INFO_SIZE, Color::BLACK);
                }
                list.text(
                    "Press ESC to go back",
                    (center_x, height - 66.0),
                    INFO_SIZE,
                    Color::BLACK,
                );
            }
        }

        let (fill, icon) = if self.menu.is_muted() {
            (MUTE_ON, "🔇")
        } else {
            (MUTE_OFF, "🔊")
        };
        list.rect(layout.mute, fill);
        list.text(icon, layout.mute.center(), BUTTON_TEXT_SIZE, Color::WHITE);
        list
    }

    fn on_key(&mut self, key: Key, commands: &mut Vec<ScreenCommand>) {
        if let Some(action) = self.menu.on_key(key) {
            Self::apply(action, commands);
        }
    }

    fn on_mouse(&mut self, point: (f64, f64), commands: &mut Vec<ScreenCommand>) {
        if let Some(action) = self.menu.on_click(point) {
            Self::apply(action, commands);
        }
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        self.menu.set_viewport(width, height);
    }

    fn debug_lines(&self) -> Vec<String> {
        let menu = self.menu();
        vec![
            format!("Menu state: {:?}", menu.state()),
            format!("Resolution: {}", menu.current_resolution()),
            format!("Muted: {}", menu.is_muted()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwi_core::{DrawCommand, GameMode};

    fn screen(muted: bool) -> MenuScreen {
        MenuScreen::new(
            (800.0, 600.0),
            Resolution::PRESETS.to_vec(),
            Resolution::new(800, 600),
            muted,
        )
    }

    fn texts(list: &DrawList) -> Vec<String> {
        list.texts()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn init_starts_music_unless_muted() {
        let mut commands = Vec::new();
        screen(false).init(&mut commands);
        assert_eq!(commands, vec![ScreenCommand::SetMusic { playing: true }]);

        let mut commands = Vec::new();
        screen(true).init(&mut commands);
        assert_eq!(commands, vec![ScreenCommand::SetMusic { playing: false }]);
    }

    #[test]
    fn main_menu_draws_title_buttons_and_mute() {
        let list = screen(false).render();
        assert_eq!(list.clear_color, Some(SKY));
        assert_eq!(texts(&list), vec!["KIWI LORE", "Play", "Settings", "🔊"]);
        assert!(list.commands.contains(&DrawCommand::FilledRect {
            rect: Rect::new(290.0, 220.0, 220.0, 60.0),
            color: PLAY_GREEN,
        }));
    }

    #[test]
    fn clicking_through_to_story_mode_emits_start_game() {
        let mut s = screen(false);
        let mut commands = Vec::new();
        let play = s.menu().layout().play.center();
        s.on_mouse(play, &mut commands);
        assert!(commands.is_empty());
        assert!(texts(&s.render()).contains(&"Select Game Mode".to_string()));

        let story = s.menu().layout().story_mode.center();
        s.on_mouse(story, &mut commands);
        assert_eq!(
            commands,
            vec![ScreenCommand::StartGame {
                resolution: Resolution::new(800, 600),
                mode: GameMode::Story,
            }]
        );
    }

    #[test]
    fn settings_highlight_follows_selection() {
        let mut s = screen(false);
        let mut commands = Vec::new();
        let settings = s.menu().layout().settings.center();
        s.on_mouse(settings, &mut commands);
        let second = s.menu().layout().resolutions[1];
        s.on_mouse(second.center(), &mut commands);
        assert_eq!(
            commands,
            vec![ScreenCommand::SetWindowSize(Resolution::new(1024, 768))]
        );

        let list = s.render();
        let highlighted: Vec<Rect> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FilledRect { rect, color } if *color == RESOLUTION_ACTIVE => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect();
        assert_eq!(highlighted, vec![s.menu().layout().resolutions[1]]);
        assert!(texts(&list).contains(&"1024 x 768".to_string()));
    }

    #[test]
    fn mute_click_and_m_key_toggle_music() {
        let mut s = screen(false);
        let mut commands = Vec::new();
        let mute = s.menu().layout().mute.center();
        s.on_mouse(mute, &mut commands);
        s.on_key(Key::M, &mut commands);
        assert_eq!(
            commands,
            vec![
                ScreenCommand::SetMusic { playing: false },
                ScreenCommand::SetMusic { playing: true },
            ]
        );
    }

    #[test]
    fn muted_button_is_lighter_and_shows_muted_icon() {
        let list = screen(true).render();
        assert!(texts(&list).contains(&"🔇".to_string()));
        assert!(list.commands.contains(&DrawCommand::FilledRect {
            rect: Rect::new(735.0, 535.0, 45.0, 45.0),
            color: MUTE_ON,
        }));
    }

    #[test]
    fn escape_backs_out_without_commands() {
        let mut s = screen(false);
        let mut commands = Vec::new();
        let settings = s.menu().layout().settings.center();
        s.on_mouse(settings, &mut commands);
        s.on_key(Key::Escape, &mut commands);
        assert_eq!(s.menu().state(), MenuState::Main);
        assert!(commands.is_empty());
    }
}
