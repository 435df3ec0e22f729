//! Player message log
//!
//! Timestamped messages shown to the player, persisted with the save.

use serde::{Deserialize, Serialize};

/// A single logged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Game turn the message was logged on
    pub gtime: u64,
    pub message: String,
}

/// Messages for the player, with support for silent state transitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
    #[serde(skip)]
    muted: u32,
    #[serde(skip)]
    gtime: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the log is muted
    pub fn add(&mut self, message: impl Into<String>) {
        if self.muted > 0 {
            return;
        }
        let message = message.into();
        log::trace!("[{}] {}", self.gtime, message);
        self.entries.push(LogEntry { gtime: self.gtime, message });
    }

    /// Suppress messages until the matching `unmute`
    pub fn mute(&mut self) {
        self.muted += 1;
    }

    pub fn unmute(&mut self) {
        self.muted = self.muted.saturating_sub(1);
    }

    pub fn is_muted(&self) -> bool {
        self.muted > 0
    }

    /// Stamp subsequent messages with this turn
    pub fn set_time(&mut self, gtime: u64) {
        self.gtime = gtime;
    }

    /// The most recent `n` entries, oldest first
    pub fn last(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry matches exactly
    pub fn contains(&self, message: &str) -> bool {
        self.entries.iter().any(|e| e.message == message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_nests() {
        let mut log = MessageLog::new();
        log.add("one");
        log.mute();
        log.mute();
        log.add("hidden");
        log.unmute();
        log.add("still hidden");
        log.unmute();
        log.add("two");
        assert_eq!(log.len(), 2);
        assert!(!log.contains("hidden"));
    }

    #[test]
    fn test_last_and_time() {
        let mut log = MessageLog::new();
        for i in 0..5 {
            log.set_time(i);
            log.add(format!("msg {}", i));
        }
        let tail = log.last(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "msg 3");
        assert_eq!(tail[1].gtime, 4);
        assert_eq!(log.last(10).len(), 5);
    }
}
