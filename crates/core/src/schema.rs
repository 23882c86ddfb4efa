//! JSON Schema issue source.
//!
//! Validates a [`ScriptDocument`] against the embedded MulmoScript schema
//! and reshapes each `jsonschema` error into a [`ValidationIssue`], so the
//! classifier sees the same issue vocabulary whichever validator produced
//! it.

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde_json::Value;

use crate::document::ScriptDocument;
use crate::error::ScriptError;
use crate::issue::{IssueCode, PathSegment, ValidationIssue};

static SCRIPT_SCHEMA_STR: &str = include_str!("../schema/mulmo-script-schema.json");

/// Anything that can report schema violations for a script.
pub trait IssueSource {
    fn issues(&self, document: &ScriptDocument) -> Vec<ValidationIssue>;
}

/// A compiled JSON Schema validator for scripts.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile the embedded MulmoScript schema.
    pub fn new() -> Result<Self, ScriptError> {
        let schema: Value = serde_json::from_str(SCRIPT_SCHEMA_STR)
            .map_err(|e| ScriptError::parse("embedded script schema", e))?;
        Self::from_schema(&schema)
    }

    /// Compile a caller-supplied schema. String formats are enforced.
    pub fn from_schema(schema: &Value) -> Result<Self, ScriptError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| ScriptError::Schema(e.to_string()))?;
        Ok(SchemaValidator { validator })
    }

    pub fn is_valid(&self, document: &ScriptDocument) -> bool {
        self.validator.is_valid(document.as_value())
    }
}

impl IssueSource for SchemaValidator {
    fn issues(&self, document: &ScriptDocument) -> Vec<ValidationIssue> {
        let instance = document.as_value();
        self.validator
            .iter_errors(instance)
            .map(|error| to_issue(instance, &error))
            .collect()
    }
}

fn to_issue(instance: &Value, error: &ValidationError<'_>) -> ValidationIssue {
    let mut path = resolve_pointer(instance, &error.instance_path().to_string());
    let message = error.to_string();

    let issue = match error.kind() {
        ValidationErrorKind::AdditionalProperties { unexpected }
        | ValidationErrorKind::UnevaluatedProperties { unexpected } => {
            ValidationIssue::new(IssueCode::UnrecognizedKeys, path)
                .with_keys(unexpected.iter().cloned())
        }
        ValidationErrorKind::Type { .. } => ValidationIssue::new(IssueCode::InvalidType, path),
        ValidationErrorKind::Required { property } => {
            // Reported on the parent object; address the missing child.
            let name = match property {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            path.push(PathSegment::Key(name));
            return ValidationIssue::new(IssueCode::InvalidType, path)
                .with_expected("value")
                .with_message("Invalid input: expected value, received undefined");
        }
        ValidationErrorKind::MinItems { .. }
        | ValidationErrorKind::MinLength { .. }
        | ValidationErrorKind::Minimum { .. }
        | ValidationErrorKind::ExclusiveMinimum { .. } => {
            ValidationIssue::new(IssueCode::TooSmall, path)
        }
        ValidationErrorKind::MaxItems { .. }
        | ValidationErrorKind::MaxLength { .. }
        | ValidationErrorKind::Maximum { .. }
        | ValidationErrorKind::ExclusiveMaximum { .. } => {
            ValidationIssue::new(IssueCode::TooBig, path)
        }
        ValidationErrorKind::AnyOf { .. }
        | ValidationErrorKind::OneOfNotValid { .. }
        | ValidationErrorKind::OneOfMultipleValid { .. } => {
            ValidationIssue::new(IssueCode::InvalidUnion, path)
        }
        ValidationErrorKind::Format { format } => {
            ValidationIssue::new(IssueCode::InvalidFormat, path).with_format(normalize_format(format))
        }
        ValidationErrorKind::Pattern { .. } => {
            ValidationIssue::new(IssueCode::InvalidFormat, path).with_format("regex")
        }
        ValidationErrorKind::Enum { .. } | ValidationErrorKind::Constant { .. } => {
            ValidationIssue::new(IssueCode::InvalidValue, path)
        }
        _ => {
            tracing::debug!(%message, "schema error mapped to custom issue");
            ValidationIssue::new(IssueCode::Custom, path)
        }
    };
    issue.with_message(message)
}

fn normalize_format(format: &str) -> &str {
    match format {
        "uri" | "iri" | "url" | "uri-reference" | "iri-reference" => "url",
        other => other,
    }
}

/// Turn a JSON pointer into path segments, using the instance to tell
/// array positions from object keys.
fn resolve_pointer(instance: &Value, pointer: &str) -> Vec<PathSegment> {
    let mut node = Some(instance);
    let mut path = Vec::new();

    for raw in pointer.split('/').skip(1) {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let segment = match node {
            Some(Value::Array(items)) => match token.parse::<usize>() {
                Ok(index) => {
                    node = items.get(index);
                    PathSegment::Index(index)
                }
                Err(_) => {
                    node = None;
                    PathSegment::Key(token)
                }
            },
            Some(Value::Object(map)) => {
                node = map.get(&token);
                PathSegment::Key(token)
            }
            _ => {
                node = None;
                PathSegment::Key(token)
            }
        };
        path.push(segment);
    }

    path
}
