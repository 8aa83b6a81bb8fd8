//! Composes a play-screen frame from simulation state.
//!
//! Draw order: background, sprite, HUD text. Assets that failed to load are
//! replaced by flat fills so the frame is always complete.

use kiwi_core::{Color, DrawList, GameMode, PlaySimulation, Rect};

/// MediumSeaGreen, shown behind everything and as the missing-background fill.
pub const PLAY_BACKGROUND: Color = Color::rgb(60, 179, 113);
/// Fill for a sprite frame whose image is missing.
pub const SPRITE_FALLBACK: Color = Color::rgb(139, 90, 43);

const HUD_TITLE_SIZE: f32 = 30.0;
const HUD_INFO_SIZE: f32 = 18.0;

/// What the play screen knows about its loaded images. Texture keys are the
/// image paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundArt {
    Image { texture_key: String },
    Flat,
}

pub struct SceneRenderer<'a> {
    pub background: &'a BackgroundArt,
    /// One entry per animation frame; `None` marks a frame that failed to load.
    pub frames: &'a [Option<String>],
    pub mode: GameMode,
}

impl SceneRenderer<'_> {
    pub fn compose(&self, sim: &PlaySimulation) -> DrawList {
        let mut list = DrawList::new(PLAY_BACKGROUND);

        match self.background {
            BackgroundArt::Image { texture_key } => list.image(
                texture_key,
                Rect::new(
                    sim.scroll.state.offset_x,
                    0.0,
                    sim.scroll.state.background_width,
                    sim.scroll.state.background_height,
                ),
                false,
            ),
            BackgroundArt::Flat => list.rect(
                Rect::new(0.0, 0.0, sim.screen_width, sim.screen_height),
                PLAY_BACKGROUND,
            ),
        }

        let sprite = &sim.sprite;
        let dest = Rect::new(sprite.x, sprite.y(), sprite.width, sprite.height);
        match self
            .frames
            .get(sim.animation.frame_index)
            .and_then(Option::as_deref)
        {
            Some(texture_key) => list.image(texture_key, dest, !sprite.facing_right),
            None => list.rect(dest, SPRITE_FALLBACK),
        }

        let center_x = sim.screen_width / 2.0;
        list.bold_text(
            &format!("Now Playing: {}", self.mode.label()),
            (center_x, 40.0),
            HUD_TITLE_SIZE,
            Color::WHITE,
        );
        list.text(
            "Press ESC to return to menu",
            (center_x, sim.screen_height - 50.0),
            HUD_INFO_SIZE,
            Color::WHITE,
        );
        list
    }
}
