use std::path::Path;
use std::process;

use mulmo_core::{classify, has_beat_schema_error, is_valid, parse_issue_list};

use crate::{report_error, to_pretty_json, OutputFormat};

pub(crate) fn cmd_classify(issues_path: &Path, output: OutputFormat, quiet: bool) {
    let src = match std::fs::read_to_string(issues_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", issues_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let issues = match parse_issue_list(&src) {
        Ok(i) => i,
        Err(e) => {
            let msg = format!("'{}': {}", issues_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors = classify(&issues);
    match output {
        OutputFormat::Text => {
            if errors.is_empty() {
                println!("no editor messages ({} issue(s))", issues.len());
            } else {
                println!("{}", errors.to_text());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": is_valid(&issues),
                "hasBeatSchemaError": has_beat_schema_error(&issues),
                "errors": errors,
            });
            println!("{}", to_pretty_json(&json));
        }
    }
}
