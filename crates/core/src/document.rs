//! The MulmoScript document.
//!
//! The core treats a script as an opaque JSON tree. Only `beats` and the
//! top-level section names are known keys; everything else passes through
//! untouched so schema evolution does not require changes here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScriptError;

/// Key of the format marker section.
pub const MULMOCAST_KEY: &str = "$mulmocast";
/// Key of the beat list.
pub const BEATS_KEY: &str = "beats";

/// A presentation script: a plain, acyclic JSON tree.
///
/// Equality is structural and `clone` is a deep copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptDocument(Value);

impl ScriptDocument {
    pub fn new(value: Value) -> Self {
        ScriptDocument(value)
    }

    pub fn from_json_str(src: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(src)
            .map(ScriptDocument)
            .map_err(|e| ScriptError::parse("script", e))
    }

    /// Read a script from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let src = std::fs::read_to_string(path).map_err(|e| ScriptError::io(path, e))?;
        serde_json::from_str(&src)
            .map(ScriptDocument)
            .map_err(|e| ScriptError::parse(format!("'{}'", path.display()), e))
    }

    /// Write the script as pretty-printed JSON with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<(), ScriptError> {
        let mut out = serde_json::to_string_pretty(&self.0)
            .map_err(|e| ScriptError::parse(format!("'{}'", path.display()), e))?;
        out.push('\n');
        std::fs::write(path, out).map_err(|e| ScriptError::io(path, e))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    /// The beat list, if present and an array.
    pub fn beats(&self) -> Option<&[Value]> {
        self.0.get(BEATS_KEY).and_then(Value::as_array).map(Vec::as_slice)
    }

    pub fn beat_count(&self) -> usize {
        self.beats().map_or(0, <[Value]>::len)
    }

    pub fn lang(&self) -> Option<&str> {
        self.0.get("lang").and_then(Value::as_str)
    }
}

impl From<Value> for ScriptDocument {
    fn from(value: Value) -> Self {
        ScriptDocument(value)
    }
}
