//! One open project: the edit history plus the validity of its current
//! document.

use crate::classify::{classify, has_beat_schema_error, is_valid, MulmoError};
use crate::document::ScriptDocument;
use crate::history::ScriptHistory;
use crate::issue::ValidationIssue;
use crate::schema::IssueSource;

/// Edit session for a single script.
///
/// Every change to the current document re-runs the issue source, so
/// [`errors`](Self::errors) always describes [`current`](Self::current).
pub struct ScriptSession<S: IssueSource> {
    source: S,
    history: ScriptHistory,
    issues: Vec<ValidationIssue>,
    errors: MulmoError,
}

impl<S: IssueSource> ScriptSession<S> {
    /// Start a session with `document` as the single history entry.
    pub fn open(source: S, document: ScriptDocument) -> Self {
        let mut history = ScriptHistory::new();
        history.init(document);
        let mut session = ScriptSession {
            source,
            history,
            issues: Vec::new(),
            errors: MulmoError::default(),
        };
        session.revalidate();
        session
    }

    /// Apply an uncommitted edit (e.g. a keystroke).
    pub fn edit(&mut self, document: ScriptDocument) {
        self.history.update_current(document);
        self.revalidate();
    }

    /// Apply an edit and record it in history.
    ///
    /// Returns whether a new history entry was created.
    pub fn commit(&mut self, name: &str, document: ScriptDocument) -> bool {
        let recorded = self.history.push(name, &document);
        self.history.update_current(document);
        self.revalidate();
        recorded
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.revalidate();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.revalidate();
        }
        moved
    }

    /// The history's current document. Always `Some` once opened.
    pub fn current(&self) -> Option<&ScriptDocument> {
        self.history.current()
    }

    pub fn history(&self) -> &ScriptHistory {
        &self.history
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> &MulmoError {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.issues)
    }

    pub fn has_beat_schema_error(&self) -> bool {
        has_beat_schema_error(&self.issues)
    }

    pub fn undoable(&self) -> bool {
        self.history.undoable()
    }

    pub fn redoable(&self) -> bool {
        self.history.redoable()
    }

    fn revalidate(&mut self) {
        let (issues, beats) = match self.history.current() {
            Some(document) => (self.source.issues(document), document.beat_count()),
            None => (Vec::new(), 0),
        };
        self.errors = classify(&issues);
        self.issues = issues;
        tracing::debug!(issues = self.issues.len(), beats, "script revalidated");
    }
}
