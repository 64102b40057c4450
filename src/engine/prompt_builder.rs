use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::InitError;

/// Formats the text sent to the model. No networking, no parsing.
#[derive(Debug)]
pub struct PromptBuilder {
    template: String,
}

impl PromptBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Reads the system prompt template once. A missing file is fatal.
    pub fn load(path: &Path) -> Result<Self, InitError> {
        match fs::read_to_string(path) {
            Ok(template) => Ok(Self::new(template.trim())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(InitError::PromptNotFound(path.to_path_buf()))
            }
            Err(source) => Err(InitError::PromptUnreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn system_prompt(&self, document_context: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(&self.template);
        prompt.push_str("\n\nFinancial Document Content:\n");
        prompt.push_str(document_context);
        prompt.push_str(
            "\n\nI will ask you multiple questions about this document. \
             Please answer each question with the specified JSON format.",
        );

        prompt
    }

    pub fn question_message(question: &str) -> String {
        format!("Question: {question}\n\nReturn only JSON:")
    }
}
