use std::str::FromStr;

/// Game mode picked on the mode-selection menu.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    #[default]
    Story,
    /// Selectable, but there is no networking behind it yet.
    Multiplayer,
}

impl GameMode {
    /// All modes in menu order.
    pub const ALL: &'static [GameMode] = &[GameMode::Story, GameMode::Multiplayer];

    /// Human-readable label for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            Self::Story => "Story Mode",
            Self::Multiplayer => "Multiplayer Mode",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "story" => Ok(Self::Story),
            "multiplayer" => Ok(Self::Multiplayer),
            other => Err(format!(
                "unknown game mode '{other}' (expected 'story' or 'multiplayer')"
            )),
        }
    }
}

/// Window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Presets offered on the settings screen.
    pub const PRESETS: &'static [Resolution] = &[
        Resolution::new(800, 600),
        Resolution::new(1024, 768),
        Resolution::new(1280, 720),
    ];
}

impl Default for Resolution {
    fn default() -> Self {
        Self::PRESETS[0]
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_story() {
        assert_eq!(GameMode::default(), GameMode::Story);
    }

    #[test]
    fn display_matches_label() {
        for &mode in GameMode::ALL {
            assert_eq!(format!("{}", mode), mode.label());
        }
    }

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!("story".parse::<GameMode>(), Ok(GameMode::Story));
        assert_eq!("Multiplayer".parse::<GameMode>(), Ok(GameMode::Multiplayer));
        assert!("coop".parse::<GameMode>().unwrap_err().contains("coop"));
    }

    #[test]
    fn resolution_label_and_default() {
        assert_eq!(Resolution::default(), Resolution::new(800, 600));
        assert_eq!(Resolution::new(1280, 720).to_string(), "1280 x 720");
        assert_eq!(Resolution::PRESETS.len(), 3);
    }
}
