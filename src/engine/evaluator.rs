use std::thread;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

use crate::engine::answer_matcher::answers_match;
use crate::engine::dialogue_processor::{
    extract_document_context, extract_questions_and_answers, group_by_dialogue,
};
use crate::engine::llm_client::ChatClient;
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::response_parser::parse_response;
use crate::model::dialogue_turn::DialogueTurn;
use crate::model::evaluation_results::EvaluationResults;
use crate::model::memory::ConversationMemory;
use crate::model::turn_outcome::TurnOutcome;
use crate::ui::settings::Settings;
use crate::ui::transcript::Transcript;

/// Replays dialogues against a chat model and scores the answers.
///
/// Dialogues run one after another and the turns of a dialogue strictly in
/// order: each request carries the whole history produced by earlier turns.
pub struct Evaluator<C: ChatClient> {
    settings: Settings,
    client: C,
    prompts: PromptBuilder,
}

impl<C: ChatClient> Evaluator<C> {
    pub fn new(settings: Settings, client: C, prompts: PromptBuilder) -> Self {
        Self {
            settings,
            client,
            prompts,
        }
    }

    pub fn evaluate(
        &self,
        records: Vec<DialogueTurn>,
        transcript: &mut Transcript,
    ) -> Result<EvaluationResults> {
        let mut dialogues = group_by_dialogue(records);
        if let Some(max) = self.settings.max_dialogues {
            dialogues.truncate(max);
        }

        let mut results = EvaluationResults::default();

        transcript.line(format!(
            "Using model {} with conversation memory",
            self.settings.model_name
        ));
        transcript.line(format!("Processing {} dialogues", dialogues.len()));
        transcript.line(format!(
            "Results will be saved to: {}",
            self.settings.results_file.display()
        ));

        for (dialogue_id, turns) in &dialogues {
            let (correct, errors) = self.evaluate_dialogue(dialogue_id, turns, transcript)?;
            results.add_dialogue_result(dialogue_id.as_str(), correct, turns.len(), errors);
        }

        transcript.blank();
        transcript.rule();
        transcript.line("FINAL RESULTS");
        transcript.rule();
        transcript.line(format!("Model: {}", self.settings.model_name));
        transcript.line(format!("Total Dialogues: {}", dialogues.len()));
        transcript.line(format!("Total Questions: {}", results.total_questions));
        transcript.line(format!("Total Correct: {}", results.total_correct));
        transcript.line(format!("Total Errors: {}", results.total_errors));
        if results.total_questions > 0 {
            transcript.line(format!("Overall Accuracy: {}", percent(results.accuracy())));
        }

        info!(
            dialogues = dialogues.len(),
            correct = results.total_correct,
            total = results.total_questions,
            "Evaluation finished"
        );

        Ok(results)
    }

    /// Returns `(correct, errors)` for one dialogue.
    pub fn evaluate_dialogue(
        &self,
        dialogue_id: &str,
        turns: &[DialogueTurn],
        transcript: &mut Transcript,
    ) -> Result<(usize, usize)> {
        transcript.blank();
        transcript.rule();
        transcript.line(format!("Processing Dialogue: {dialogue_id}"));
        transcript.line(format!("Number of turns: {}", turns.len()));
        transcript.rule();

        let Some(first) = turns.first() else {
            return Ok((0, 0));
        };
        let document_context = extract_document_context(first);
        let (questions, gold_answers) = extract_questions_and_answers(turns)?;

        transcript.line(format!("Starting conversation with {} questions...", questions.len()));
        let outcomes =
            self.process_dialogue(&document_context, &questions, &gold_answers, transcript);

        let mut correct = 0;
        let mut errors = 0;
        for (outcome, gold) in outcomes.iter().zip(&gold_answers) {
            if outcome.is_error() {
                errors += 1;
            } else if let Some(pred) = outcome.answer() {
                if answers_match(&pred, &Value::String(gold.clone()), self.settings.tolerance()) {
                    correct += 1;
                }
            }
        }

        let accuracy = if questions.is_empty() {
            0.0
        } else {
            correct as f64 / questions.len() as f64
        };
        transcript.line(format!("Dialogue {dialogue_id} Results:"));
        transcript.line(format!("  Correct: {correct}/{}", questions.len()));
        transcript.line(format!("  Errors: {errors}"));
        transcript.line(format!("  Accuracy: {}", percent(accuracy)));

        Ok((correct, errors))
    }

    /// Runs every question of a dialogue through one conversation.
    pub fn process_dialogue(
        &self,
        document_context: &str,
        questions: &[String],
        gold_answers: &[String],
        transcript: &mut Transcript,
    ) -> Vec<TurnOutcome> {
        let mut memory = ConversationMemory::new();
        memory.set_system_prompt(self.prompts.system_prompt(document_context));

        let tolerance = self.settings.tolerance();
        let delay = self.settings.call_delay();
        let mut outcomes = Vec::with_capacity(questions.len());

        for (i, question) in questions.iter().enumerate() {
            let turn = i + 1;
            memory.add_user_message(PromptBuilder::question_message(question));

            let outcome = self.ask(&memory);
            match &outcome {
                TurnOutcome::Answered { reply, response } => {
                    memory.add_assistant_message(reply.clone());

                    let pred = outcome.answer().unwrap_or(Value::Null);
                    let gold = gold_answers.get(i).map(String::as_str).unwrap_or_default();
                    let is_correct =
                        answers_match(&pred, &Value::String(gold.to_string()), tolerance);

                    transcript.line(format!("  Turn {turn}: Q: {question}"));
                    transcript.line(format!("  Turn {turn}: Pred: {}", display_value(&pred)));
                    transcript.line(format!("  Turn {turn}: Gold: {gold}"));
                    transcript.line(format!("  Turn {turn}: Match: {is_correct}"));
                    transcript.line(format!("  Turn {turn}: Details: {response}"));
                    transcript.line(format!("  Turn {turn}: Memory has {} messages", memory.len()));
                    transcript.blank();
                }
                TurnOutcome::ParseError { message, raw } => {
                    transcript.line(format!("JSON parsing error for question {turn}: {message}"));
                    transcript.line(format!("Raw response: {raw}"));
                    memory.add_assistant_message(format!("Error: {message}"));
                }
                TurnOutcome::CallError { message } => {
                    transcript.line(format!("LLM API error for question {turn}: {message}"));
                    memory.add_assistant_message(format!("Error: {message}"));
                }
            }
            outcomes.push(outcome);

            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        transcript.line(format!("  Conversation memory contains {} messages", memory.len()));
        memory.clear();
        transcript.line("  Memory cleared for next dialogue");

        outcomes
    }

    fn ask(&self, memory: &ConversationMemory) -> TurnOutcome {
        let history = memory.history();
        debug!(messages = history.len(), "Submitting conversation");

        match self.client.complete(&history) {
            Ok(reply) => match parse_response(&reply) {
                Ok(response) => TurnOutcome::Answered { reply, response },
                Err(e) => TurnOutcome::ParseError {
                    message: e.to_string(),
                    raw: reply,
                },
            },
            Err(e) => TurnOutcome::CallError {
                message: format!("{e:#}"),
            },
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
