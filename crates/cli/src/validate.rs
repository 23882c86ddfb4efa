use std::path::Path;
use std::process;

use mulmo_core::{classify, has_beat_schema_error, IssueSource, SchemaValidator, ScriptDocument};

use crate::{report_error, to_pretty_json, OutputFormat};

pub(crate) fn cmd_validate(script_path: &Path, output: OutputFormat, quiet: bool) {
    let validator = match SchemaValidator::new() {
        Ok(v) => v,
        Err(e) => {
            report_error(&format!("internal error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let doc = match ScriptDocument::load(script_path) {
        Ok(d) => d,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let issues = validator.issues(&doc);
    if issues.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    let errors = classify(&issues);
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid script ({} issue(s))", issues.len());
                for line in errors.to_text().lines() {
                    eprintln!("  - {}", line);
                }
                let unrouted = issues.len().saturating_sub(errors.message_count());
                if unrouted > 0 {
                    eprintln!("  ({} issue(s) have no editor message; see --verbose)", unrouted);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "hasBeatSchemaError": has_beat_schema_error(&issues),
                "errors": errors,
                "issues": issues,
            });
            eprintln!("{}", to_pretty_json(&json));
        }
    }
    process::exit(1);
}
