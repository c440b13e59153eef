//! Notification channel between the rules engine and the presentation layer.
//!
//! The engine never formats or draws anything itself. It pushes
//! `(message, category)` pairs and the sink decides how to show them
//! (the category drives color-coding in a presentation layer).

use super::constants::MESSAGE_LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    Info,
    Combat,
    Item,
    Warning,
    System,
    Success,
    Quest,
}

impl LogCategory {
    pub fn name(&self) -> &'static str {
        match self {
            LogCategory::Info => "info",
            LogCategory::Combat => "combat",
            LogCategory::Item => "item",
            LogCategory::Warning => "warning",
            LogCategory::System => "system",
            LogCategory::Success => "success",
            LogCategory::Quest => "quest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub category: LogCategory,
}

impl Notice {
    pub fn new(message: impl Into<String>, category: LogCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }
}

/// Receiver for engine notifications.
pub trait LogSink {
    fn push(&mut self, message: String, category: LogCategory);

    fn push_notice(&mut self, notice: Notice) {
        self.push(notice.message, notice.category);
    }

    fn extend_notices(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            self.push_notice(notice);
        }
    }
}

/// Bounded in-memory log keeping the most recent entries.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<Notice>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(MESSAGE_LOG_CAPACITY)
    }
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|n| n.message.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for MessageLog {
    fn push(&mut self, message: String, category: LogCategory) {
        log::trace!("[{}] {}", category.name(), message);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Notice { message, category });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_log_is_bounded() {
        let mut log = MessageLog::new(3);
        for i in 0..5 {
            log.push(format!("entry {i}"), LogCategory::Info);
        }
        assert_eq!(log.len(), 3);
        let messages: Vec<_> = log.entries().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_extend_notices_keeps_categories() {
        let mut log = MessageLog::default();
        log.extend_notices(vec![
            Notice::new("a", LogCategory::Quest),
            Notice::new("b", LogCategory::Warning),
        ]);
        assert_eq!(log.last().map(|n| n.category), Some(LogCategory::Warning));
        assert!(log.contains("a"));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(LogCategory::Success.name(), "success");
        assert_eq!(LogCategory::Quest.name(), "quest");
    }
}
