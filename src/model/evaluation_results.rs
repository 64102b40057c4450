use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueResult {
    pub dialogue_id: String,
    pub correct: usize,
    pub total: usize,
    pub errors: usize,
    pub accuracy: f64,
}

/// Running totals for a whole run. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub total_correct: usize,
    pub total_questions: usize,
    pub total_errors: usize,
    pub dialogue_results: Vec<DialogueResult>,
}

impl EvaluationResults {
    pub fn accuracy(&self) -> f64 {
        ratio(self.total_correct, self.total_questions)
    }

    pub fn add_dialogue_result(
        &mut self,
        dialogue_id: impl Into<String>,
        correct: usize,
        total: usize,
        errors: usize,
    ) {
        self.total_correct += correct;
        self.total_questions += total;
        self.total_errors += errors;
        self.dialogue_results.push(DialogueResult {
            dialogue_id: dialogue_id.into(),
            correct,
            total,
            errors,
            accuracy: ratio(correct, total),
        });
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_results_have_zero_accuracy() {
        assert_eq!(EvaluationResults::default().accuracy(), 0.0);
    }

    #[test]
    fn test_add_dialogue_result_accumulates() {
        let mut results = EvaluationResults::default();
        results.add_dialogue_result("a", 3, 4, 1);
        results.add_dialogue_result("b", 1, 4, 0);

        assert_eq!(results.total_correct, 4);
        assert_eq!(results.total_questions, 8);
        assert_eq!(results.total_errors, 1);
        assert_eq!(results.accuracy(), 0.5);
        assert_eq!(
            results.dialogue_results[0],
            DialogueResult {
                dialogue_id: "a".to_string(),
                correct: 3,
                total: 4,
                errors: 1,
                accuracy: 0.75,
            }
        );
    }

    #[test]
    fn test_dialogue_with_no_questions_has_zero_accuracy() {
        let mut results = EvaluationResults::default();
        results.add_dialogue_result("empty", 0, 0, 0);
        assert_eq!(results.dialogue_results[0].accuracy, 0.0);
    }
}
