// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounded, newest-first message log shown next to the grid.

use std::collections::VecDeque;

/// Keeps the `capacity` most recent messages, newest at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl SystemLog {
    /// Creates an empty log. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends `message`, evicting the oldest entry when full.
    pub fn push<S: Into<String>>(&mut self, message: S) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(message.into());
    }

    /// Messages newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent message.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no message has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained messages.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_first_and_evicts_oldest() {
        let mut log = SystemLog::new(3);
        for i in 0..5 {
            log.push(format!("m{i}"));
        }
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["m4", "m3", "m2"]);
        assert_eq!(log.latest(), Some("m4"));
        assert_eq!(log.len(), 3);
    }
}
