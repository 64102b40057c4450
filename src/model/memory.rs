use crate::error::MemoryError;
use crate::model::message::{ChatMessage, Role};

/// Message history for a single dialogue.
///
/// The system prompt is held apart from the appended messages so that it is
/// always emitted first by [`ConversationMemory::history`], no matter when it
/// was set.
#[derive(Debug, Default, Clone)]
pub struct ConversationMemory {
    messages: Vec<ChatMessage>,
    system_prompt: Option<String>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = Some(prompt.into());
    }

    /// Appends a message whose role is given by name. Unknown roles leave the
    /// memory untouched.
    pub fn add_message(
        &mut self,
        role: &str,
        content: impl Into<String>,
    ) -> Result<(), MemoryError> {
        let role: Role = role.parse()?;
        self.push(role, content);
        Ok(())
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        let mut history = Vec::with_capacity(self.messages.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            history.push(ChatMessage::new(Role::System, prompt.clone()));
        }
        history.extend(self.messages.iter().cloned());
        history
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.system_prompt = None;
    }

    /// Number of appended messages; the system prompt is not counted.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.system_prompt.is_some()
    }
}
