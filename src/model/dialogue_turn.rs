use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record of the turn-level dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// Composite identifier, `<dialogue id>_<turn index>`.
    pub id: String,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Every question of the dialogue, in order.
    pub dialogue_break: Vec<String>,
    pub turn_ind: usize,
    /// Gold answer; usually a number, occasionally a string such as "yes".
    pub exe_ans: Value,
    #[serde(default)]
    pub amt_pre_text: String,
    pub amt_table: String,
    #[serde(default)]
    pub amt_post_text: String,
}

impl DialogueTurn {
    /// Gold answer in string form: strings verbatim, everything else as JSON text.
    pub fn gold_answer(&self) -> String {
        match &self.annotation.exe_ans {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserializes_without_optional_text_and_ignores_extra_fields() {
        let fixture = json!({
            "id": "Single_JKHY/2009/page_28.pdf-3_0",
            "doc": {"pre_text": "ignored"},
            "annotation": {
                "dialogue_break": ["what was the change?"],
                "turn_ind": 0,
                "exe_ans": 206588,
                "amt_table": "<table></table>",
                "qa_split": [false]
            }
        });

        let actual: DialogueTurn = serde_json::from_value(fixture).unwrap();

        assert_eq!(actual.annotation.amt_pre_text, "");
        assert_eq!(actual.annotation.amt_post_text, "");
        assert_eq!(actual.gold_answer(), "206588");
    }

    #[test]
    fn test_gold_answer_keeps_strings_verbatim() {
        let turn: DialogueTurn = serde_json::from_value(json!({
            "id": "d_0",
            "annotation": {
                "dialogue_break": ["q"],
                "turn_ind": 0,
                "exe_ans": "yes",
                "amt_table": ""
            }
        }))
        .unwrap();

        assert_eq!(turn.gold_answer(), "yes");
    }

    #[test]
    fn test_gold_answer_renders_floats() {
        let turn: DialogueTurn = serde_json::from_value(json!({
            "id": "d_0",
            "annotation": {
                "dialogue_break": ["q"],
                "turn_ind": 0,
                "exe_ans": 0.14136,
                "amt_table": ""
            }
        }))
        .unwrap();

        assert_eq!(turn.gold_answer(), "0.14136");
    }
}
