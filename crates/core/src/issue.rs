//! Schema violations as reported by an external validator.
//!
//! The shape mirrors the issue objects a Zod `safeParse` failure carries
//! (`code`, `path`, `message` plus code-specific fields), so issue lists
//! exported by the desktop editor deserialize directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScriptError;

/// One step in the path locating an offending node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Violation class, serialized as the snake_case validator code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueCode {
    UnrecognizedKeys,
    InvalidType,
    TooSmall,
    TooBig,
    InvalidUnion,
    InvalidFormat,
    InvalidValue,
    Custom,
    /// A code this crate has no rule for; kept verbatim for diagnostics.
    Other(String),
}

impl IssueCode {
    pub fn as_str(&self) -> &str {
        match self {
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::InvalidFormat => "invalid_format",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::Custom => "custom",
            IssueCode::Other(code) => code.as_str(),
        }
    }
}

impl From<String> for IssueCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "unrecognized_keys" => IssueCode::UnrecognizedKeys,
            "invalid_type" => IssueCode::InvalidType,
            "too_small" => IssueCode::TooSmall,
            "too_big" => IssueCode::TooBig,
            "invalid_union" => IssueCode::InvalidUnion,
            "invalid_format" => IssueCode::InvalidFormat,
            "invalid_value" => IssueCode::InvalidValue,
            "custom" => IssueCode::Custom,
            _ => IssueCode::Other(code),
        }
    }
}

impl From<IssueCode> for String {
    fn from(code: IssueCode) -> Self {
        match code {
            IssueCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural problem found in a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    #[serde(default)]
    pub message: String,
    /// Offending field names (`unrecognized_keys`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    /// Expected type name (`invalid_type`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Failed string format (`invalid_format`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, path: Vec<PathSegment>) -> Self {
        ValidationIssue {
            code,
            path,
            message: String::new(),
            keys: Vec::new(),
            expected: None,
            format: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// A required field is absent: an `invalid_type` that names what it
    /// expected and received `undefined`.
    pub fn is_required_but_absent(&self) -> bool {
        self.code == IssueCode::InvalidType
            && self.expected.is_some()
            && self.message.contains("received undefined")
    }

    /// First path segment, when it is a key.
    pub fn root_key(&self) -> Option<&str> {
        self.path.first().and_then(PathSegment::as_key)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}'", self.code, format_path(&self.path))?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Render a path for display.
///
/// Keys are joined with `.`, indices render as `[n]` directly after the
/// preceding segment, and a leading `.` is stripped:
/// `["beats", 2, "image"]` becomes `beats[2].image`, `[2, "image"]`
/// becomes `[2].image`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    match out.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => out,
    }
}

/// Parse an exported issue list.
///
/// Accepts a bare JSON array of issues or a serialized validation error
/// object of the form `{"issues": [...]}`.
pub fn parse_issue_list(src: &str) -> Result<Vec<ValidationIssue>, ScriptError> {
    let mut value: Value =
        serde_json::from_str(src).map_err(|e| ScriptError::parse("issue list", e))?;
    if let Some(inner) = value.get_mut("issues").map(Value::take) {
        value = inner;
    }
    serde_json::from_value(value).map_err(|e| ScriptError::parse("issue list", e))
}
