use chrono::{DateTime, Utc};

use crate::{
    foundation::error::{ChoreoError, ChoreoResult},
    roster::dancer::DancerId,
};

/// A note from a dancer to the choreo head.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub id: i64, // creation time in unix millis, bumped to stay unique
    pub dancer_id: DancerId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Append-only inbox; entries change only by being marked read or deleted.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.read).count()
    }

    pub fn for_dancer<'a>(&'a self, dancer: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages
            .iter()
            .filter(move |m| m.dancer_id.as_str() == dancer)
    }

    pub fn add(&mut self, dancer: DancerId, text: &str) -> ChoreoResult<Message> {
        self.add_at(dancer, text, Utc::now())
    }

    pub fn add_at(
        &mut self,
        dancer: DancerId,
        text: &str,
        now: DateTime<Utc>,
    ) -> ChoreoResult<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChoreoError::EmptyMessage);
        }

        let mut id = now.timestamp_millis();
        if let Some(last) = self.messages.iter().map(|m| m.id).max() {
            id = id.max(last + 1);
        }

        let message = Message {
            id,
            dancer_id: dancer,
            message: text.to_string(),
            timestamp: now,
            read: false,
        };
        self.messages.push(message.clone());
        tracing::debug!(id, dancer = %message.dancer_id, "message added");
        Ok(message)
    }

    pub fn mark_read(&mut self, id: i64) {
        if let Some(m) = self.messages.iter_mut().find(|m| m.id == id) {
            m.read = true;
        }
    }

    pub fn delete(&mut self, id: i64) -> Option<Message> {
        let idx = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(idx))
    }
}
