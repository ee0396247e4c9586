use crate::source_file::SourceFile;
use crate::SourceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Characters kept per snippet line.
const MAX_LINE_WIDTH: usize = 250;

/// Window size when none is configured.
const DEFAULT_WINDOW_SIZE: usize = 10;

/// A contiguous block of source lines keyed by absolute 1-indexed line
/// number. Serializes as a line-number-keyed JSON object. An empty snippet
/// is a valid result: it means the source could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSnippet {
    lines: BTreeMap<usize, String>,
}

impl CodeSnippet {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, number: usize) -> Option<&str> {
        self.lines.get(&number).map(String::as_str)
    }

    pub fn lines(&self) -> &BTreeMap<usize, String> {
        &self.lines
    }
}

/// Extracts a window of source lines around a line of interest.
#[derive(Debug, Clone)]
pub struct SnippetExtractor {
    surrounding_line: usize,
    window_size: usize,
}

impl Default for SnippetExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl SnippetExtractor {
    pub fn new(window_size: usize) -> Self {
        Self {
            surrounding_line: 1,
            window_size: window_size.max(1),
        }
    }

    /// Set the line the window centers on. Clamped to 1.
    pub fn surrounding_line(mut self, line: usize) -> Self {
        self.surrounding_line = line.max(1);
        self
    }

    /// Read the window around the surrounding line.
    ///
    /// Never fails: a missing file or any error during the read yields an
    /// empty snippet.
    pub fn extract(&self, path: &Path) -> CodeSnippet {
        if !path.exists() {
            return CodeSnippet::default();
        }

        match self.read_window(path) {
            Ok(snippet) => snippet,
            Err(err) => {
                debug!("Snippet extraction failed for {}: {}", path.display(), err);
                CodeSnippet::default()
            }
        }
    }

    fn read_window(&self, path: &Path) -> Result<CodeSnippet, SourceError> {
        let mut source = SourceFile::open(path)?;
        let total_lines = source.line_count()?;
        let (start, end) = self.bounds(total_lines);

        let mut lines = BTreeMap::new();
        for number in start..=end {
            let line = source.line_at(number)?;
            let truncated: String = line.chars().take(MAX_LINE_WIDTH).collect();
            lines.insert(number, truncated.trim_end().to_string());
        }

        Ok(CodeSnippet { lines })
    }

    /// Window bounds clamped at both file boundaries. Near an edge the
    /// window is asymmetric around the surrounding line: the start never
    /// drops below 1 and the end never passes the last line.
    fn bounds(&self, total_lines: usize) -> (usize, usize) {
        let start = self
            .surrounding_line
            .saturating_sub(self.window_size.div_ceil(2))
            .max(1);
        let end = (start + self.window_size - 1).min(total_lines);
        (start, end)
    }
}
