use crate::SourceError;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

/// Random-access line reader over a single source file.
///
/// Holds one buffered handle and a line cursor, so memory use stays constant
/// relative to file size. Seeking backwards rewinds to the start and scans
/// forward; asking for the line already under the cursor is served from a
/// one-line cache without touching the file.
pub struct SourceFile {
    reader: BufReader<File>,
    cursor: usize,
    current: Option<(usize, String)>,
}

impl SourceFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            cursor: 1,
            current: None,
        })
    }

    /// Total number of lines. The last line counts even without a trailing
    /// newline. The cursor is rewound when done.
    pub fn line_count(&mut self) -> Result<usize, SourceError> {
        self.rewind()?;

        let mut count = 0;
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            count += 1;
        }

        self.rewind()?;
        Ok(count)
    }

    /// Get line `n` (1-indexed), without its line terminator.
    ///
    /// Fails for `n < 1` and for lines past the end of the file.
    pub fn line_at(&mut self, n: usize) -> Result<String, SourceError> {
        if n < 1 {
            return Err(SourceError::InvalidLineNumber(n));
        }

        if let Some((cached, line)) = &self.current {
            if *cached == n {
                return Ok(line.clone());
            }
        }

        if n < self.cursor {
            self.rewind()?;
        }

        let mut line = String::new();
        while self.cursor <= n {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(SourceError::InvalidLineNumber(n));
            }
            self.cursor += 1;
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        self.current = Some((n, line.clone()));
        Ok(line)
    }

    /// Sequential read: the line at the cursor, advancing it.
    pub fn next_line(&mut self) -> Result<String, SourceError> {
        self.line_at(self.cursor)
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.cursor = 1;
        Ok(())
    }
}
