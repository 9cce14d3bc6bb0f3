//! Conversation session: the accumulated turn history that gives the
//! model context continuity across sends.

use super::wire::{Content, Part};

/// Single live handle to the model conversation. One per application
/// instance; owned by the chat worker and accessed sequentially.
#[derive(Debug, Clone)]
pub struct ChatSession {
    system_prompt: String,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history: Vec::new(),
        }
    }

    pub fn system_instruction(&self) -> Content {
        Content::system(self.system_prompt.clone())
    }

    /// The contents for the next request: prior turns plus the new user
    /// turn. History itself is only updated once the reply succeeds.
    pub fn contents_with(&self, user_parts: Vec<Part>) -> Vec<Content> {
        let mut contents = self.history.clone();
        contents.push(Content::user(user_parts));
        contents
    }

    /// Record a completed exchange.
    pub fn record_turn(&mut self, user_parts: Vec<Part>, model_text: &str) {
        self.history.push(Content::user(user_parts));
        self.history.push(Content::model(model_text));
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn turn_count(&self) -> usize {
        self.history.len()
    }
}
