use std::path::PathBuf;

/// Errors raised while mutating a conversation history.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    #[error("Invalid role: {0}. Must be 'user', 'assistant', or 'system'")]
    InvalidRole(String),
}

/// A model reply that could not be decoded as JSON.
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse JSON: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);

/// Fatal problems detected before the first dialogue runs.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("System prompt file not found: {}", .0.display())]
    PromptNotFound(PathBuf),
    #[error("Failed to load system prompt from {}: {source}", .path.display())]
    PromptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("Turn {id}: turn_ind {turn_ind} is out of range for {len} questions")]
    QuestionOutOfRange { id: String, turn_ind: usize, len: usize },
}
