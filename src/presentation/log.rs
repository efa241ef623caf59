use std::collections::VecDeque;

use serde::Serialize;

use crate::core::constants::LOG_CAPACITY;

/// Append-only message feed that keeps the most recent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for GameLog {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl GameLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds an entry, evicting the oldest once full.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_eviction() {
        let mut log = GameLog::with_capacity(3);
        for i in 0..5 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), 3);
        let lines: Vec<_> = log.iter().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.latest(), Some("line 4"));
    }

    #[test]
    fn test_default_capacity() {
        let mut log = GameLog::default();
        assert_eq!(log.capacity(), 50);
        for i in 0..120 {
            log.push(i.to_string());
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.iter().next(), Some("70"));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = GameLog::with_capacity(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest(), Some("b"));
    }
}
