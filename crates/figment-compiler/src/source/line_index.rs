//! Byte offset → line number conversion.

use figment_core::LineRange;
use rowan::{TextRange, TextSize};

/// Start offsets of every line in a document.
#[derive(Clone, Debug)]
pub struct LineIndex {
    starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![TextSize::from(0)];
        starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from(offset as u32 + 1)),
        );
        Self { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: TextSize) -> u32 {
        self.starts.partition_point(|&start| start <= offset) as u32
    }

    /// Lines covered by `range`. Empty ranges cover the line they sit on.
    pub fn lines(&self, range: TextRange) -> LineRange {
        let start = self.line(range.start());
        if range.is_empty() {
            return LineRange::single(start);
        }
        let end = self.line(range.end() - TextSize::from(1));
        LineRange::new(start, end.max(start))
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
