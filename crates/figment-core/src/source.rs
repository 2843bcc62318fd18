//! Source locations carried by every IR node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path recorded on definitions synthesized by the compiler.
pub const BUILTIN_PATH: &str = "<builtin>";

/// Inclusive, 1-based line range within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start >= 1, "line numbers are 1-based");
        debug_assert!(start <= end, "line range {start}-{end} is inverted");
        Self { start, end }
    }

    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered (never zero).
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_single_line(&self) -> bool {
        self.start == self.end
    }
}

/// File path plus line range, used for diagnostics in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    pub path: String,
    pub lines: LineRange,
}

impl Source {
    pub fn new(path: impl Into<String>, lines: LineRange) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Location of compiler-synthesized definitions.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_PATH, LineRange::single(1))
    }

    pub fn is_builtin(&self) -> bool {
        self.path == BUILTIN_PATH
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_single_line() {
            write!(f, "{}:{}", self.path, self.lines.start)
        } else {
            write!(f, "{}:{}-{}", self.path, self.lines.start, self.lines.end)
        }
    }
}
