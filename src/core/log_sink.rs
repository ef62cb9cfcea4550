use std::collections::VecDeque;

/// Lines kept by the on-screen diagnostic log.
pub const LOG_CAPACITY: usize = 1000;

/// Marker left behind by `LogSink::clear`.
pub const CLEARED_MARKER: &str = "Log cleared.";

/// Bounded, append-only ring of diagnostic lines shown in the log pane.
///
/// Appending past capacity evicts the oldest line. Owned by the UI loop,
/// which is its only writer.
#[derive(Debug, Clone)]
pub struct LogSink {
    capacity: usize,
    lines: VecDeque<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Drop every line and leave a single "cleared" marker.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push_back(CLEARED_MARKER.to_string());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        self.lines.iter().skip(self.lines.len().saturating_sub(n)).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_within_capacity() {
        let mut sink = LogSink::with_capacity(3);
        sink.append("a");
        sink.append(String::from("b"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_1001_appends_evict_first_line() {
        let mut sink = LogSink::new();
        for i in 0..=LOG_CAPACITY {
            sink.append(format!("line {}", i));
        }

        assert_eq!(sink.len(), LOG_CAPACITY);
        assert!(!sink.lines().any(|l| l == "line 0"));
        assert_eq!(sink.lines().next(), Some("line 1"));
        assert_eq!(sink.last(), Some("line 1000"));
    }

    #[test]
    fn test_clear_leaves_marker() {
        let mut sink = LogSink::with_capacity(5);
        sink.append("one");
        sink.append("two");
        sink.clear();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.last(), Some(CLEARED_MARKER));
    }

    #[test]
    fn test_tail() {
        let mut sink = LogSink::with_capacity(10);
        for i in 0..5 {
            sink.append(i.to_string());
        }

        assert_eq!(sink.tail(2).collect::<Vec<_>>(), vec!["3", "4"]);
        assert_eq!(sink.tail(50).count(), 5);
    }
}
