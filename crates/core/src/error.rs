use std::path::PathBuf;

/// Errors raised while loading scripts, issue lists, or schemas.
///
/// Classification and history operations never fail; only the I/O and
/// parsing edges of the crate return this type.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The file could not be read or written.
    #[error("error accessing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input was not valid JSON, or did not have the expected shape.
    #[error("error parsing JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON Schema failed to compile.
    #[error("failed to compile schema: {0}")]
    Schema(String),
}

impl ScriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        ScriptError::Parse {
            origin: origin.into(),
            source,
        }
    }
}
