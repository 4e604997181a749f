//! Lockstep comparison of a reference and a received line sequence.

use serde::{Deserialize, Serialize};

use crate::lines::LineSequence;
use crate::report::ReportBuilder;

/// The outcome of comparing a reference against a received value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComparisonResult {
    /// Every line position agreed.
    Match,
    /// At least one line position disagreed.
    Mismatch(Mismatch),
}

impl ComparisonResult {
    /// Returns `true` if the two sequences were identical.
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonResult::Match)
    }

    /// Number of differing positions (zero for a match).
    pub fn difference_count(&self) -> u64 {
        match self {
            ComparisonResult::Match => 0,
            ComparisonResult::Mismatch(m) => m.difference_count,
        }
    }

    /// Returns the mismatch payload, if any.
    pub fn into_mismatch(self) -> Option<Mismatch> {
        match self {
            ComparisonResult::Match => None,
            ComparisonResult::Mismatch(m) => Some(m),
        }
    }
}

/// Diagnostic payload of a failed comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Number of line positions at which the sequences disagreed.
    pub difference_count: u64,
    /// Line-numbered reference lines at the differing positions.
    pub expected_report: String,
    /// Line-numbered received lines at the differing positions.
    pub received_report: String,
}

/// Compare two line sequences position by position.
///
/// Both sequences advance together. Once one side runs out, it contributes
/// an empty line at every remaining position of the other side. Lines are
/// compared for exact equality.
pub fn compare<R, S>(reference: R, received: S) -> ComparisonResult
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    let mut reference = reference.into_iter();
    let mut received = received.into_iter();

    let mut position: u64 = 0;
    let mut report = ReportBuilder::new();

    loop {
        let (expected, actual) = match (reference.next(), received.next()) {
            (None, None) => break,
            pair => pair,
        };
        position += 1;

        let expected = line_or_empty(&expected);
        let actual = line_or_empty(&actual);
        if expected == actual {
            continue;
        }

        report.record(position, expected, actual);
    }

    if report.is_empty() {
        return ComparisonResult::Match;
    }

    let difference_count = report.entries();
    let (expected_report, received_report) = report.finish();
    ComparisonResult::Mismatch(Mismatch {
        difference_count,
        expected_report,
        received_report,
    })
}

/// Compare two text blobs after splitting each into lines.
pub fn compare_text(reference: &str, received: &str) -> ComparisonResult {
    compare(LineSequence::new(reference), LineSequence::new(received))
}

fn line_or_empty<T: AsRef<str>>(line: &Option<T>) -> &str {
    match line {
        Some(l) => AsRef::<str>::as_ref(l),
        None => "",
    }
}
