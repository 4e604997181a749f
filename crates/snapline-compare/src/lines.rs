//! Line splitting for snapshot text.

use std::str::Lines;

/// The lines of a text blob, produced lazily and in order.
///
/// Splits on `\n` (a `\r` directly before it is dropped). A `\r` ending the
/// text is dropped as well, so `"a\r"` yields `"a"`. A trailing line
/// terminator does not produce an extra empty line, so `"a\nb\n"` and
/// `"a\nb"` both yield two lines. The empty string yields none.
#[derive(Clone, Debug)]
pub struct LineSequence<'a> {
    inner: Lines<'a>,
}

impl<'a> LineSequence<'a> {
    /// Split `text` into lines without copying it.
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_suffix('\r').unwrap_or(text);
        Self {
            inner: text.lines(),
        }
    }
}

impl<'a> Iterator for LineSequence<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> From<&'a str> for LineSequence<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}
