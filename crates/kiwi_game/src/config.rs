use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use kiwi_core::{Resolution, SimTuning};

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/kiwi.json";
const SUPPORTED_VERSION: &str = "0.1";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    pub version: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_music")]
    pub music: String,
    #[serde(default)]
    pub sprite: SpriteConfig,
    #[serde(default)]
    pub tuning: SimTuning,
    #[serde(default = "default_resolutions")]
    pub resolutions: Vec<Resolution>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpriteConfig {
    /// Walk-cycle frame images in play order.
    pub frames: Vec<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            frames: (1..=4)
                .map(|i| format!("assets/images/kiwi_walk_{i}.png"))
                .collect(),
            width: 64,
            height: 64,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION.to_string(),
            background: default_background(),
            music: default_music(),
            sprite: SpriteConfig::default(),
            tuning: SimTuning::default(),
            resolutions: default_resolutions(),
        }
    }
}

pub fn load_config_from_path(config_path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config file {}: {e}", config_path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", config_path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load `config_path`, falling back to defaults when it is absent or invalid.
pub fn load_or_default(config_path: &Path) -> GameConfig {
    match fs::metadata(config_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "Config '{}' not found, using built-in defaults",
                config_path.display()
            );
            return GameConfig::default();
        }
        _ => {}
    }
    match load_config_from_path(config_path) {
        Ok(config) => {
            log::info!("Loaded config '{}'", config_path.display());
            config
        }
        Err(err) => {
            log::error!("{err}. Using built-in defaults.");
            GameConfig::default()
        }
    }
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.version != SUPPORTED_VERSION {
        return Err(format!(
            "Config validation failed: unsupported version '{}' (expected '{}')",
            config.version, SUPPORTED_VERSION
        ));
    }
    if config.sprite.frames.is_empty() {
        return Err("Config validation failed: sprite.frames is empty".to_string());
    }
    if config.sprite.width == 0 || config.sprite.height == 0 {
        return Err(format!(
            "Config validation failed: sprite size must be non-zero, got {}x{}",
            config.sprite.width, config.sprite.height
        ));
    }
    if config.tuning.scroll_speed <= 0.0 || config.tuning.sprite_speed <= 0.0 {
        return Err("Config validation failed: scroll_speed and sprite_speed must be > 0".to_string());
    }
    config
        .tuning
        .validate()
        .map_err(|e| format!("Config validation failed: tuning: {e}"))?;
    if config.resolutions.is_empty() {
        return Err("Config validation failed: resolutions list is empty".to_string());
    }
    if let Some(bad) = config
        .resolutions
        .iter()
        .find(|r| r.width == 0 || r.height == 0)
    {
        return Err(format!(
            "Config validation failed: resolution {} has a zero dimension",
            bad
        ));
    }
    Ok(())
}

fn default_background() -> String {
    "assets/images/background.png".to_string()
}

fn default_music() -> String {
    "assets/audio/background_music.wav".to_string()
}

fn default_resolutions() -> Vec<Resolution> {
    Resolution::PRESETS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "kiwi_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_config_file(path: &Path, body: &str) {
        fs::write(path, body).expect("write config file");
    }

    #[test]
    fn load_config_parses_full_file() {
        let path = temp_file_path("full");
        write_config_file(
            &path,
            r#"{
              "version": "0.1",
              "background": "bg.png",
              "music": "loop.wav",
              "sprite": { "frames": ["a.png", "b.png"], "width": 32, "height": 48 },
              "tuning": { "gravity": 800.0, "sprite_speed": 150.0 },
              "resolutions": [ { "width": 640, "height": 480 } ]
            }"#,
        );

        let config = load_config_from_path(&path).expect("config should load");
        assert_eq!(config.background, "bg.png");
        assert_eq!(config.music, "loop.wav");
        assert_eq!(config.sprite.frames.len(), 2);
        assert_eq!(config.sprite.height, 48);
        assert_eq!(config.tuning.gravity, 800.0);
        assert_eq!(config.tuning.sprite_speed, 150.0);
        // Unspecified tuning fields keep their defaults.
        assert_eq!(config.tuning.launch_velocity, -300.0);
        assert_eq!(config.resolutions, vec![Resolution::new(640, 480)]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let path = temp_file_path("minimal");
        write_config_file(&path, r#"{ "version": "0.1" }"#);

        let config = load_config_from_path(&path).expect("config should load");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.resolutions.len(), 3);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_unknown_version() {
        let path = temp_file_path("version");
        write_config_file(&path, r#"{ "version": "9.9" }"#);

        let err = load_config_from_path(&path).expect_err("version should be rejected");
        assert!(err.contains("unsupported version"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_empty_frames() {
        let path = temp_file_path("frames");
        write_config_file(
            &path,
            r#"{ "version": "0.1", "sprite": { "frames": [], "width": 32, "height": 32 } }"#,
        );

        let err = load_config_from_path(&path).expect_err("empty frames should be rejected");
        assert!(err.contains("sprite.frames is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_zero_sprite_size() {
        let path = temp_file_path("size");
        write_config_file(
            &path,
            r#"{ "version": "0.1", "sprite": { "frames": ["a.png"], "width": 0, "height": 32 } }"#,
        );

        let err = load_config_from_path(&path).expect_err("zero size should be rejected");
        assert!(err.contains("non-zero"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_bad_tuning() {
        let path = temp_file_path("tuning");
        write_config_file(
            &path,
            r#"{ "version": "0.1", "tuning": { "frame_duration": 0.0 } }"#,
        );

        let err = load_config_from_path(&path).expect_err("zero frame duration should be rejected");
        assert!(err.contains("frame_duration"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_zero_speed() {
        let path = temp_file_path("speed");
        write_config_file(&path, r#"{ "version": "0.1", "tuning": { "scroll_speed": 0.0 } }"#);

        let err = load_config_from_path(&path).expect_err("zero scroll speed should be rejected");
        assert!(err.contains("must be > 0"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_config_rejects_empty_resolutions() {
        let path = temp_file_path("resolutions");
        write_config_file(&path, r#"{ "version": "0.1", "resolutions": [] }"#);

        let err = load_config_from_path(&path).expect_err("empty resolutions should be rejected");
        assert!(err.contains("resolutions list is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_or_missing_config_falls_back_to_defaults() {
        let path = temp_file_path("malformed");
        write_config_file(&path, "{ not json");
        assert_eq!(load_or_default(&path), GameConfig::default());
        let _ = fs::remove_file(&path);

        assert_eq!(load_or_default(&path), GameConfig::default());
    }

    #[test]
    fn shipped_config_references_shipped_assets() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let config = load_config_from_path(&root.join(DEFAULT_CONFIG_PATH))
            .expect("shipped config should load");
        assert_eq!(config, GameConfig::default());

        let mut paths = vec![config.background.clone(), config.music.clone()];
        paths.extend(config.sprite.frames.iter().cloned());
        for path in paths {
            let bytes = fs::read(root.join(&path))
                .unwrap_or_else(|e| panic!("{path} should ship with the game: {e}"));
            if path.ends_with(".png") {
                assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{path} is not a PNG");
            } else {
                assert_eq!(&bytes[..4], b"RIFF", "{path} is not a WAV");
            }
        }
    }
}
