//! Submission History
//!
//! The most recent successful submissions, oldest first, in memory only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of submissions kept for the charts
pub const HISTORY_CAPACITY: usize = 7;

/// One successful submission as shown on the charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub weight: f64,
    pub steps: u64,
    pub date: NaiveDate,
}

impl HistoryEntry {
    pub fn new(weight: f64, steps: u64, date: NaiveDate) -> Self {
        Self {
            weight,
            steps,
            date,
        }
    }

    /// Short day label for chart axes, e.g. `3/14`
    pub fn label(&self) -> String {
        self.date.format("%-m/%-d").to_string()
    }
}

/// Bounded submission history. Pushing past capacity evicts the oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, dropping the oldest ones beyond capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
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

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_push_grows_until_capacity() {
        let mut history = History::new();
        for i in 0..HISTORY_CAPACITY {
            let before = history.len();
            history.push(HistoryEntry::new(60.0, i as u64, day(1)));
            assert_eq!(history.len(), (before + 1).min(HISTORY_CAPACITY));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut history = History::new();
        for i in 1..=8u32 {
            history.push(HistoryEntry::new(60.0 + i as f64, i as u64 * 1000, day(i)));
        }

        assert_eq!(history.len(), 7);
        let steps: Vec<u64> = history.iter().map(|e| e.steps).collect();
        assert_eq!(steps, vec![2000, 3000, 4000, 5000, 6000, 7000, 8000]);
        assert_eq!(history.latest().unwrap().date, day(8));
    }

    #[test]
    fn test_label() {
        let entry = HistoryEntry::new(70.0, 100, day(14));
        assert_eq!(entry.label(), "3/14");
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut history = History::with_capacity(0);
        history.push(HistoryEntry::new(70.0, 1, day(1)));
        history.push(HistoryEntry::new(71.0, 2, day(2)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().steps, 2);
    }
}
