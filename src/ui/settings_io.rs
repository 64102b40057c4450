use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::evaluation_results::EvaluationResults;
use crate::ui::settings::Settings;

const APP_DIR: &str = "finqa_eval";

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push("settings.json");
    path
}

/// Defaults, overridden by the user's settings file when one exists.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
            return Settings::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(settings) => {
            info!(path = %path.display(), "Loaded settings override");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed settings file");
            Settings::default()
        }
    }
}

pub fn save_summary(path: &Path, results: &EvaluationResults) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).with_context(|| format!("Failed to write summary: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_missing_file_gives_defaults_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let (actual, logs) = capture_logs(|| load_settings_from(&path));

        assert_eq!(actual, Settings::default());
        assert_eq!(logs, "");
    }

    #[test]
    fn test_unreadable_file_gives_defaults_with_warning() {
        let dir = tempfile::tempdir().unwrap();

        let (actual, logs) = capture_logs(|| load_settings_from(dir.path()));

        assert_eq!(actual, Settings::default());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Ignoring unreadable settings file"));
    }

    #[test]
    fn test_override_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"sleep_between_calls": 0.0, "max_dialogues": 3}"#).unwrap();

        let actual = load_settings_from(&path);

        assert_eq!(actual.max_dialogues, Some(3));
        assert_eq!(actual.sleep_between_calls, 0.0);
        assert_eq!(actual.model_name, "gpt-4o");
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let (actual, logs) = capture_logs(|| load_settings_from(&path));

        assert_eq!(actual, Settings::default());
        assert!(logs.contains("Ignoring malformed settings file"));
    }

    #[test]
    fn test_save_summary_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let mut results = EvaluationResults::default();
        results.add_dialogue_result("d", 1, 2, 1);

        save_summary(&path, &results).unwrap();

        let actual: EvaluationResults =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(actual, results);
    }
}
