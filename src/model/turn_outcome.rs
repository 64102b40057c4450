use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened when one question was put to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    Answered { reply: String, response: Value },
    ParseError { message: String, raw: String },
    CallError { message: String },
}

impl TurnOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, TurnOutcome::Answered { .. })
    }

    /// The `answer` field of a decoded reply. A reply without one yields an
    /// empty string, which later normalizes to zero.
    pub fn answer(&self) -> Option<Value> {
        match self {
            TurnOutcome::Answered { response, .. } => Some(
                response
                    .get("answer")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new())),
            ),
            _ => None,
        }
    }
}
