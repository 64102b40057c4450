use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Floor for the relative-difference denominator when the gold answer is zero.
const MIN_DENOMINATOR: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-3,
            absolute: 1e-4,
        }
    }
}

/// Numeric value of an answer. `null` and unparseable text both become 0.0;
/// the latter also logs a warning.
pub fn normalize(value: &Value) -> f64 {
    let text = match value {
        Value::Null => return 0.0,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let stripped: Vec<char> = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '$' | '%'))
        .collect();

    // `_` is accepted only as a separator between two digits, e.g. "1_000".
    let cleaned: String = stripped
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            c != '_'
                || !(i > 0
                    && stripped[i - 1].is_ascii_digit()
                    && stripped.get(i + 1).is_some_and(char::is_ascii_digit))
        })
        .map(|(_, &c)| c)
        .collect();

    match cleaned.parse::<f64>() {
        Ok(number) => number,
        Err(_) => {
            warn!(answer = %text, "Could not convert answer to a number");
            0.0
        }
    }
}

/// Accepts when either the absolute or the relative difference is in tolerance.
pub fn answers_match(pred: &Value, gold: &Value, tolerance: Tolerance) -> bool {
    let pred = normalize(pred);
    let gold = normalize(gold);
    let abs_diff = (pred - gold).abs();
    let rel_diff = abs_diff / gold.abs().max(MIN_DENOMINATOR);
    abs_diff <= tolerance.absolute || rel_diff <= tolerance.relative
}
