//! Positional line comparator for Snapline.
//!
//! Compares a recorded reference text against a freshly received text one
//! line at a time. Lines are matched strictly by position: there is no
//! alignment, no longest-common-subsequence search and no word-level diff.
//!
//! # Key Types
//!
//! - [`LineSequence`] -- Lazily split lines of a text blob
//! - [`ComparisonResult`] / [`Mismatch`] -- Verdict of a comparison
//! - [`ReportBuilder`] -- Accumulates the expected/received transcripts
//!
//! # Report Layout
//!
//! Each differing position produces one `"<position> | <content>"` line in
//! both transcripts. A run of matching lines between two differences
//! collapses into a single [`ELISION_MARKER`] line; adjacent differences are
//! printed back to back.

pub mod compare;
pub mod lines;
pub mod report;

pub use compare::{compare, compare_text, ComparisonResult, Mismatch};
pub use lines::LineSequence;
pub use report::{ReportBuilder, ELISION_MARKER};
