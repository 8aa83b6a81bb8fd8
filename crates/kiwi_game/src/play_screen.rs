use kiwi_core::{DrawList, GameMode, InputState, Key, PlayLayout, PlaySimulation};

use crate::assets::ImageLoader;
use crate::config::GameConfig;
use crate::scene::{BackgroundArt, SceneRenderer};
use crate::screen::{Screen, ScreenCommand};

pub struct PlayScreen {
    mode: GameMode,
    sim: PlaySimulation,
    background: BackgroundArt,
    frames: Vec<Option<String>>,
}

impl PlayScreen {
    /// Load the play assets through `loader` and build the simulation for a
    /// `viewport`-sized window. Missing images degrade to flat fills.
    pub fn new(
        viewport: (f64, f64),
        mode: GameMode,
        config: &GameConfig,
        loader: &mut dyn ImageLoader,
    ) -> Self {
        let (screen_width, screen_height) = viewport;
        let (background, background_width, background_height) =
            match loader.load_image(&config.background) {
                Ok(info) => (
                    BackgroundArt::Image {
                        texture_key: config.background.clone(),
                    },
                    f64::from(info.width),
                    f64::from(info.height),
                ),
                Err(err) => {
                    log::warn!("{err}. Using a flat background.");
                    (BackgroundArt::Flat, screen_width, screen_height)
                }
            };

        let frames: Vec<Option<String>> = config
            .sprite
            .frames
            .iter()
            .map(|path| match loader.load_image(path) {
                Ok(_) => Some(path.clone()),
                Err(err) => {
                    log::warn!("{err}. Frame will draw as a box.");
                    None
                }
            })
            .collect();

        if mode == GameMode::Multiplayer {
            log::warn!("Multiplayer has no networking yet; starting a local session");
        }
        log::info!(
            "Play screen: {} at {}x{}, background {}x{}",
            mode,
            screen_width,
            screen_height,
            background_width,
            background_height
        );

        let sim = PlaySimulation::new(
            PlayLayout {
                screen_width,
                screen_height,
                sprite_width: f64::from(config.sprite.width),
                sprite_height: f64::from(config.sprite.height),
                background_width,
                background_height,
                frame_count: frames.len(),
            },
            config.tuning,
        );

        Self {
            mode,
            sim,
            background,
            frames,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn simulation(&self) -> &PlaySimulation {
        &self.sim
    }
}

impl Screen for PlayScreen {
    fn title(&self) -> &'static str {
        "KIWI LORE - Playing!"
    }

    fn update(&mut self, dt: f64, input: &InputState) {
        self.sim
            .step(dt, input.move_intent(), input.jump_requested());
    }

    fn render(&self) -> DrawList {
        SceneRenderer {
            background: &self.background,
            frames: &self.frames,
            mode: self.mode,
        }
        .compose(&self.sim)
    }

    fn on_key(&mut self, key: Key, commands: &mut Vec<ScreenCommand>) {
        if key == Key::Escape {
            log::info!("Leaving {}", self.mode);
            commands.push(ScreenCommand::ReturnToMenu);
        }
    }

    fn on_mouse(&mut self, _point: (f64, f64), _commands: &mut Vec<ScreenCommand>) {}

    fn on_resize(&mut self, width: f64, height: f64) {
        self.sim.set_screen_size(width, height);
    }

    fn debug_lines(&self) -> Vec<String> {
        let sim = self.simulation();
        let sprite = &sim.sprite;
        vec![
            format!("Mode: {}", self.mode()),
            format!("Sprite: x={:.1} y={:.1}", sprite.x, sprite.y()),
            format!(
                "Velocity: {:.1}  grounded: {}",
                sprite.body.vertical_velocity,
                sprite.body.is_grounded()
            ),
            format!("Frame: {}", sim.animation.frame_index),
            format!("Background offset: {:.1}", sim.scroll.state.offset_x),
        ]
    }
}
