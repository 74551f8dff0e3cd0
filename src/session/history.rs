//! Ordered message history owned by one session

use super::state::{Message, Role};
use crate::classifier::Category;
use chrono::Utc;

/// Append-only message list. Order is append order.
#[derive(Debug, Clone, Default)]
pub struct MessageHistory {
    messages: Vec<Message>,
    next_sequence_id: u64,
}

impl MessageHistory {
    /// History seeded with the assistant welcome message
    pub fn with_welcome(text: &str) -> Self {
        let mut history = Self::default();
        history.append(Role::Assistant, text, None);
        history
    }

    pub fn append(
        &mut self,
        role: Role,
        text: impl Into<String>,
        category: Option<Category>,
    ) -> &Message {
        self.next_sequence_id += 1;
        self.messages.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            sequence_id: self.next_sequence_id,
            role,
            text: text.into(),
            created_at: Utc::now(),
            category,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
