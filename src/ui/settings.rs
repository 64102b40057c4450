use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::answer_matcher::Tolerance;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub data_path: PathBuf,
    pub model_name: String,
    /// `None` evaluates every dialogue in the dataset.
    pub max_dialogues: Option<usize>,
    /// Seconds to wait after each model call.
    pub sleep_between_calls: f64,
    pub results_file: PathBuf,
    pub summary_file: Option<PathBuf>,
    pub temperature: f32,
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    pub prompt_path: PathBuf,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let tolerance = Tolerance::default();

        Self {
            data_path: PathBuf::from("data/dev_turn.json"),
            model_name: "gpt-4o".into(),
            max_dialogues: Some(100),
            sleep_between_calls: 1.0,
            results_file: PathBuf::from("results.txt"),
            summary_file: None,
            temperature: 0.1,
            relative_tolerance: tolerance.relative,
            absolute_tolerance: tolerance.absolute,
            prompt_path: PathBuf::from("prompts/system_prompt.txt"),
            api_base_url: "https://api.openai.com/v1".into(),
            request_timeout_secs: 120,
        }
    }
}

impl Settings {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            relative: self.relative_tolerance,
            absolute: self.absolute_tolerance,
        }
    }

    /// Negative or non-finite values mean no delay.
    pub fn call_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.sleep_between_calls).unwrap_or(Duration::ZERO)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.model_name, "gpt-4o");
        assert_eq!(settings.max_dialogues, Some(100));
        assert_eq!(settings.call_delay(), Duration::from_secs(1));
        assert_eq!(settings.tolerance(), Tolerance::default());
        assert_eq!(settings.temperature, 0.1);
    }

    #[test]
    fn test_partial_json_keeps_remaining_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"model_name": "gpt-4o-mini", "max_dialogues": null}"#)
                .unwrap();

        assert_eq!(settings.model_name, "gpt-4o-mini");
        assert_eq!(settings.max_dialogues, None);
        assert_eq!(settings.results_file, PathBuf::from("results.txt"));
    }

    #[test]
    fn test_negative_delay_is_zero() {
        let settings = Settings {
            sleep_between_calls: -1.0,
            ..Settings::default()
        };
        assert_eq!(settings.call_delay(), Duration::ZERO);
    }
}
