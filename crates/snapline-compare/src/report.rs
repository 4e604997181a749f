//! Expected/received transcript accumulation.

use std::fmt::Write as _;

/// Placeholder line standing in for an omitted run of matching lines.
pub const ELISION_MARKER: &str = "...";

/// Separator between a line number and the line content.
const ENTRY_SEPARATOR: &str = " | ";

/// Builds the two parallel transcripts of a comparison.
///
/// Both transcripts always receive the same entries and markers, so their
/// line-number prefixes stay in lockstep.
#[derive(Clone, Debug, Default)]
pub struct ReportBuilder {
    expected: String,
    received: String,
    last_position: Option<u64>,
    entries: u64,
}

impl ReportBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a differing line at `position` (1-based).
    ///
    /// Positions must be recorded in increasing order. An elision marker is
    /// written first when this position is not adjacent to the previous
    /// recorded one.
    pub fn record(&mut self, position: u64, expected: &str, received: &str) {
        if let Some(last) = self.last_position {
            debug_assert!(position > last, "positions must increase: {last} then {position}");
            if position.saturating_sub(last) > 1 {
                push_line(&mut self.expected, ELISION_MARKER);
                push_line(&mut self.received, ELISION_MARKER);
            }
        }

        push_entry(&mut self.expected, position, expected);
        push_entry(&mut self.received, position, received);

        self.last_position = Some(position);
        self.entries += 1;
    }

    /// Number of entries recorded so far.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Consume the builder, returning the `(expected, received)` transcripts
    /// with leading and trailing whitespace removed.
    pub fn finish(self) -> (String, String) {
        (
            self.expected.trim().to_string(),
            self.received.trim().to_string(),
        )
    }
}

fn push_entry(buf: &mut String, position: u64, content: &str) {
    // Writing into a String cannot fail.
    let _ = write!(buf, "{position}{ENTRY_SEPARATOR}{content}");
    buf.push('\n');
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_finishes_empty() {
        let builder = ReportBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.finish(), (String::new(), String::new()));
    }

    #[test]
    fn single_entry() {
        let mut builder = ReportBuilder::new();
        builder.record(3, "old", "new");
        assert_eq!(builder.entries(), 1);
        assert_eq!(
            builder.finish(),
            ("3 | old".to_string(), "3 | new".to_string())
        );
    }

    #[test]
    fn adjacent_positions_have_no_marker() {
        let mut builder = ReportBuilder::new();
        builder.record(1, "a", "x");
        builder.record(2, "b", "y");
        let (expected, received) = builder.finish();
        assert_eq!(expected, "1 | a\n2 | b");
        assert_eq!(received, "1 | x\n2 | y");
    }

    #[test]
    fn single_skipped_position_inserts_marker() {
        let mut builder = ReportBuilder::new();
        builder.record(2, "b", "x");
        builder.record(4, "d", "y");
        let (expected, _) = builder.finish();
        assert_eq!(expected, "2 | b\n...\n4 | d");
    }

    #[test]
    fn wider_gap_inserts_marker_in_both() {
        let mut builder = ReportBuilder::new();
        builder.record(2, "b", "x");
        builder.record(5, "e", "y");
        let (expected, received) = builder.finish();
        assert_eq!(expected, "2 | b\n...\n5 | e");
        assert_eq!(received, "2 | x\n...\n5 | y");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "positions must increase")]
    fn out_of_order_position_is_rejected() {
        let mut builder = ReportBuilder::new();
        builder.record(5, "a", "b");
        builder.record(3, "c", "d");
    }

    #[test]
    fn first_entry_never_gets_marker() {
        let mut builder = ReportBuilder::new();
        builder.record(40, "a", "b");
        let (expected, _) = builder.finish();
        assert!(!expected.contains(ELISION_MARKER));
    }

    #[test]
    fn empty_content_is_trimmed_only_at_the_ends() {
        let mut builder = ReportBuilder::new();
        builder.record(1, "", "a");
        builder.record(2, "b", "");
        let (expected, received) = builder.finish();
        assert_eq!(expected, "1 | \n2 | b");
        assert_eq!(received, "1 | a\n2 |");
    }
}
