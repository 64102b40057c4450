use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::error::DatasetError;
use crate::model::dialogue_turn::DialogueTurn;

/// Turns of one dialogue, ordered by `turn_ind`.
pub type Dialogues = IndexMap<String, Vec<DialogueTurn>>;

pub fn load_dataset(path: &Path) -> Result<Vec<DialogueTurn>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))
}

/// `"dialogue_1_0"` -> `"dialogue_1"`. Ids without a trailing numeric
/// segment are returned unchanged.
pub fn extract_dialogue_id(full_id: &str) -> String {
    let mut parts: Vec<&str> = full_id.split('_').collect();
    let numeric_suffix = parts
        .last()
        .is_some_and(|last| !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()));

    if numeric_suffix {
        parts.pop();
        parts.join("_")
    } else {
        full_id.to_string()
    }
}

/// Groups turns by dialogue id. Groups keep the order in which their first
/// turn appeared; turns inside a group are sorted by `turn_ind` (stable).
pub fn group_by_dialogue(records: Vec<DialogueTurn>) -> Dialogues {
    let mut dialogues = Dialogues::new();
    for record in records {
        dialogues
            .entry(extract_dialogue_id(&record.id))
            .or_default()
            .push(record);
    }

    for turns in dialogues.values_mut() {
        turns.sort_by_key(|turn| turn.annotation.turn_ind);
    }

    dialogues
}

pub fn extract_document_context(turn: &DialogueTurn) -> String {
    let annotation = &turn.annotation;
    format!(
        "Text before table:\n{}\n\nHTML Table:\n{}\n\nText after table:\n{}",
        annotation.amt_pre_text, annotation.amt_table, annotation.amt_post_text
    )
    .trim()
    .to_string()
}

/// Returns `(questions, gold_answers)` in turn order.
pub fn extract_questions_and_answers(
    turns: &[DialogueTurn],
) -> Result<(Vec<String>, Vec<String>), DatasetError> {
    let mut questions = Vec::with_capacity(turns.len());
    let mut gold_answers = Vec::with_capacity(turns.len());

    for turn in turns {
        let annotation = &turn.annotation;
        let question = annotation
            .dialogue_break
            .get(annotation.turn_ind)
            .ok_or_else(|| DatasetError::QuestionOutOfRange {
                id: turn.id.clone(),
                turn_ind: annotation.turn_ind,
                len: annotation.dialogue_break.len(),
            })?;

        questions.push(question.clone());
        gold_answers.push(turn.gold_answer());
    }

    Ok((questions, gold_answers))
}
