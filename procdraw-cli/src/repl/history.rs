use std::collections::VecDeque;

/// Previously entered REPL input, oldest first.
///
/// Holds at most `capacity` entries; pushing past that forgets the oldest.
/// `cursor` is where Up/Down navigation currently points. It equals `len()`
/// when the user is editing a fresh line.
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");

        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Record an entry and move the cursor past the end.
    ///
    /// Blank input and repeats of the most recent entry aren't recorded.
    pub fn push(&mut self, entry: &str) {
        let is_repeat = self.entries.back().map_or(false, |last| last == entry);
        if !entry.trim().is_empty() && !is_repeat {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(String::from(entry));
        }
        self.cursor = self.entries.len();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Step back to an older entry. Stays on the oldest once it is reached.
    pub fn older(&mut self) -> Option<&str> {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.entries.get(self.cursor).map(String::as_str)
        } else {
            None
        }
    }

    /// Step forward to a newer entry.
    ///
    /// Returns `None` when the cursor moves past the newest entry, which means
    /// the input line should be cleared.
    pub fn newer(&mut self) -> Option<&str> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
