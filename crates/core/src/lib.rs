//! mulmo-core: MulmoScript validation-error classification and edit history.
//!
//! Two in-memory components sit at the heart of the crate:
//!
//! - [`classify()`] -- folds a list of schema violations ([`ValidationIssue`])
//!   into the fixed [`MulmoError`] taxonomy the editor renders inline
//! - [`ScriptHistory`] -- a linear undo/redo log of [`ScriptDocument`]
//!   snapshots with duplicate suppression and branch truncation
//!
//! [`SchemaValidator`] produces issues from the embedded MulmoScript JSON
//! Schema, and [`ScriptSession`] ties a history and an issue source together
//! for one open project.

pub mod classify;
pub mod document;
pub mod error;
pub mod history;
pub mod issue;
pub mod schema;
pub mod session;

// ── Convenience re-exports ───────────────────────────────────────────

pub use classify::{classify, has_beat_schema_error, is_valid, MulmoError, ScriptErrors, Section};
pub use document::ScriptDocument;
pub use error::ScriptError;
pub use history::{HistoryEntry, ScriptHistory};
pub use issue::{format_path, parse_issue_list, IssueCode, PathSegment, ValidationIssue};
pub use schema::{IssueSource, SchemaValidator};
pub use session::ScriptSession;
