use std::collections::VecDeque;

/// Recently entered command lines with a recall cursor.
///
/// Consecutive duplicates are stored once. The cursor sits past the newest
/// line after every push and is clamped to the stored lines while stepping.
#[derive(Debug, Clone, Default)]
pub struct History {
    lines: VecDeque<String>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Creates a history keeping at most `limit` lines. Zero means unbounded.
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            cursor: 0,
            limit,
        }
    }

    /// Records a line unless it repeats the newest one, then resets the
    /// cursor past the newest line.
    pub fn push(&mut self, line: &str) {
        if self.lines.back().map(String::as_str) != Some(line) {
            self.lines.push_back(line.to_string());

            if self.limit > 0 && self.lines.len() > self.limit {
                self.lines.pop_front();
            }
        }

        self.cursor = self.lines.len();
    }

    /// Steps toward older lines. Empty string when nothing is stored.
    pub fn older(&mut self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Steps toward newer lines. Empty string when nothing is stored.
    pub fn newer(&mut self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        self.cursor = (self.cursor + 1).min(self.lines.len() - 1);
        self.current()
    }

    /// Cursor position in `[0, len]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when no line is stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stored lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Forgets every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.cursor = 0;
    }

    fn current(&self) -> String {
        self.lines.get(self.cursor).cloned().unwrap_or_default()
    }
}
