use kiwi_core::MoveIntent;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub jump_pressed: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// One `(intent, jump)` pair per fixed step. A jump is only requested on
    /// the first step of a repeated frame, as a key press would be.
    pub fn expanded_inputs(&self) -> Vec<(MoveIntent, bool)> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let intent = MoveIntent::from_axis(frame.move_x.clamp(-1.0, 1.0));
            for i in 0..frame.repeat.max(1) {
                out.push((intent, frame.jump_pressed && i == 0));
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt.is_nan() || replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f64 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwi_core::{PlayLayout, PlaySimulation, SimTuning};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "kiwi_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn sample_sim() -> PlaySimulation {
        PlaySimulation::new(
            PlayLayout {
                screen_width: 800.0,
                screen_height: 600.0,
                sprite_width: 32.0,
                sprite_height: 32.0,
                background_width: 1600.0,
                background_height: 600.0,
                frame_count: 4,
            },
            SimTuning::default(),
        )
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "move_x": 1.0, "repeat": 3 },
                { "jump_pressed": true, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0], (MoveIntent::RIGHT, false));
        assert_eq!(expanded[3], (MoveIntent::IDLE, true));
        assert_eq!(expanded[4], (MoveIntent::IDLE, false));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "move_x": 1.0, "repeat": 60 },
                { "move_x": 1.0, "jump_pressed": true, "repeat": 1 },
                { "move_x": 1.0, "repeat": 120 },
                { "move_x": -1.0, "repeat": 45 },
                { "repeat": 30 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let inputs = replay.expanded_inputs();

        let mut run_a = sample_sim();
        let mut run_b = sample_sim();
        for (intent, jump) in &inputs {
            run_a.step(replay.fixed_dt, *intent, *jump);
            run_b.step(replay.fixed_dt, *intent, *jump);
            let min = run_a.scroll.state.min_offset(run_a.screen_width);
            assert!(run_a.scroll.state.offset_x <= 0.0 && run_a.scroll.state.offset_x >= min);
            assert!(run_a.sprite.y() <= run_a.sprite.body.ground_y);
        }

        assert_eq!(run_a, run_b);
        assert!(run_a.sprite.body.is_grounded());
        assert!(!run_a.sprite.facing_right);
        assert_eq!(run_a.animation.frame_index, 0);
        assert!(run_a.scroll.state.offset_x < 0.0);

        let _ = fs::remove_file(path);
    }
}
