use crate::aerodrome::{Landing, Transfer};
use crate::aircraft::AircraftId;
use crate::time::Time;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Added { id: AircraftId, runway: usize },
    SentAround { id: AircraftId },
    Transferred(Transfer),
    Landed(Landing),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Added { id, runway } => write!(f, "{} added to runway {}", id, runway + 1),
            Event::SentAround { id } => write!(f, "{} sent around", id),
            Event::Transferred(t) => write!(f, "{} moved from runway {} to runway {}", t.id, t.from + 1, t.to + 1),
            Event::Landed(l) => write!(f, "{} landed on runway {}", l.id, l.runway + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub at: Time,
    pub event: Event,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[T+{:>4}] {}", self.at.0, self.event)
    }
}

/// Bounded log of what happened on the field, oldest entries drop off first.
#[derive(Debug, Clone)]
pub struct Journal {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl Journal {
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new(capacity: usize) -> Journal {
        Journal {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn record(&mut self, at: Time, event: Event) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Entry { at, event });
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Journal::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_oldest_entries_are_dropped() {
        let mut journal = Journal::new(2);
        for (i, id) in ["A", "B", "C"].into_iter().enumerate() {
            journal.record(Time(i as i64), Event::SentAround { id: Arc::from(id) });
        }

        let kept: Vec<String> = journal.entries().map(|e| e.event.to_string()).collect();
        assert_eq!(vec!["B sent around", "C sent around"], kept);
    }

    #[test]
    fn test_entry_display_uses_one_based_runways() {
        let entry = Entry {
            at: Time(42),
            event: Event::Transferred(Transfer { id: Arc::from("IL-18-47"), from: 0, to: 1 }),
        };
        assert_eq!("[T+  42] IL-18-47 moved from runway 1 to runway 2", entry.to_string());
    }
}
