use crate::fault::Fault;
use crate::snippet::{CodeSnippet, SnippetExtractor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path segment marking third-party dependency code.
const DEPENDENCY_SEGMENT: &str = "vendor";

/// Decides whether a stack frame's file belongs to the application or to a
/// third-party dependency tree under the project root.
#[derive(Debug, Clone)]
pub struct FrameClassifier {
    project_root: String,
}

impl FrameClassifier {
    pub fn new(project_root: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// The path with the project-root prefix removed. Paths outside the
    /// project root come back unchanged.
    pub fn relative_path<'a>(&self, file: &'a str) -> &'a str {
        if self.project_root.is_empty() {
            return file;
        }
        file.strip_prefix(self.project_root.as_str()).unwrap_or(file)
    }

    /// True when the root-relative path has no `vendor` path segment. A
    /// frame without a file path is never application code.
    pub fn is_application(&self, file: &str) -> bool {
        if file.is_empty() {
            return false;
        }
        !has_dependency_segment(self.relative_path(file))
    }
}

fn has_dependency_segment(path: &str) -> bool {
    path.split(['/', '\\'])
        .any(|segment| segment == DEPENDENCY_SEGMENT)
}

/// The single frame chosen for deep inspection, with its path made
/// root-relative for the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub file: String,
    pub line: usize,
}

/// Outcome of frame selection: at most one frame and its snippet. Both
/// sides always have the same length.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub trace: Vec<TraceEntry>,
    pub code_snippet: Vec<CodeSnippet>,
}

/// Walks a fault's call chain and picks the single most relevant
/// application-owned frame: the throw site when it is application code,
/// otherwise the first application frame in the caller chain. Faults that
/// never leave dependency code produce an empty selection.
#[derive(Debug, Clone)]
pub struct StackResolver {
    classifier: FrameClassifier,
    window_size: usize,
}

impl StackResolver {
    pub fn new(project_root: impl Into<String>, window_size: usize) -> Self {
        Self {
            classifier: FrameClassifier::new(project_root),
            window_size,
        }
    }

    pub fn resolve(&self, fault: &Fault) -> Selection {
        let mut selection = Selection::default();

        if self.classifier.is_application(&fault.file) {
            self.select(&mut selection, &fault.file, fault.line);
            return selection;
        }

        for frame in &fault.trace {
            if self.classifier.is_application(&frame.file) {
                self.select(&mut selection, &frame.file, frame.line);
                break;
            }
        }

        selection
    }

    fn select(&self, selection: &mut Selection, file: &str, line: usize) {
        let snippet = SnippetExtractor::new(self.window_size)
            .surrounding_line(line)
            .extract(Path::new(file));

        selection.trace.push(TraceEntry {
            file: self.classifier.relative_path(file).to_string(),
            line,
        });
        selection.code_snippet.push(snippet);
    }
}
