use super::types::{Message, Role};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Append-only ordered message store shared between the controller and
/// the view. Insertion order is display order. In-place mutation is
/// limited to the streaming placeholder.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a message and return its id.
    ///
    /// Appending a thinking placeholder finalizes any previous one so
    /// that at most one message is ever in the thinking state.
    pub fn push(&self, message: Message) -> Uuid {
        let id = message.id;
        let mut messages = self.messages.write();
        if message.is_thinking {
            for msg in messages.iter_mut() {
                msg.is_thinking = false;
            }
        }
        messages.push(message);
        id
    }

    /// Replace the placeholder's text with the accumulated response so
    /// far, clearing its thinking state on the first fragment.
    pub fn apply_fragment(&self, id: Uuid, accumulated: &str) {
        let mut messages = self.messages.write();
        if let Some(msg) = messages.iter_mut().find(|m| m.id == id) {
            msg.text = accumulated.to_string();
            msg.is_thinking = false;
        }
    }

    /// Mark a streaming message as terminal. Its text no longer changes.
    pub fn finalize(&self, id: Uuid) {
        let mut messages = self.messages.write();
        if let Some(msg) = messages.iter_mut().find(|m| m.id == id) {
            msg.is_thinking = false;
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Message> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Whether any message is currently in the thinking state.
    pub fn has_thinking(&self) -> bool {
        self.messages.read().iter().any(|m| m.is_thinking)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
