//! Append-only transcript of attributable messages.

use std::{collections::VecDeque, num::NonZeroUsize};

use super::entity::HistoryRecord;

/// Ordered history of chat messages
///
/// Unbounded unless a limit is given, in which case the oldest record is
/// evicted once the limit is exceeded.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
    limit: Option<NonZeroUsize>,
}

impl HistoryLog {
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Append a record, returning the evicted one if the limit was hit.
    pub fn append(&mut self, record: HistoryRecord) -> Option<HistoryRecord> {
        self.records.push_back(record);
        match self.limit {
            Some(limit) if self.records.len() > limit.get() => self.records.pop_front(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
