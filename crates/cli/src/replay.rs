//! `mulmo history`: drive a ScriptSession from a recorded operation list.

use std::path::Path;
use std::process;

use mulmo_core::{SchemaValidator, ScriptDocument, ScriptSession};
use serde::Deserialize;

use crate::{report_error, to_pretty_json, OutputFormat};

/// One recorded editor action.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum HistoryOp {
    Push {
        #[serde(default = "default_push_name")]
        name: String,
        data: ScriptDocument,
    },
    Update {
        data: ScriptDocument,
    },
    Undo,
    Redo,
}

fn default_push_name() -> String {
    "push".to_string()
}

pub(crate) fn cmd_history(script_path: &Path, ops_path: &Path, output: OutputFormat, quiet: bool) {
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

    let ops_str = match std::fs::read_to_string(ops_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", ops_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let ops: Vec<HistoryOp> = match serde_json::from_str(&ops_str) {
        Ok(o) => o,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", ops_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut session = ScriptSession::open(validator, doc);
    for (step, op) in ops.into_iter().enumerate() {
        let applied = match op {
            HistoryOp::Push { name, data } => session.commit(&name, data),
            HistoryOp::Update { data } => {
                session.edit(data);
                true
            }
            HistoryOp::Undo => session.undo(),
            HistoryOp::Redo => session.redo(),
        };
        if !applied {
            tracing::debug!(step, "operation had no effect");
        }
    }

    let history = session.history();
    let names: Vec<&str> = history.entries().iter().map(|e| e.name.as_str()).collect();

    match output {
        OutputFormat::Text => {
            if quiet {
                return;
            }
            println!("index: {}/{}", history.index(), history.len());
            println!("entries: {}", names.join(", "));
            println!("undoable: {}", session.undoable());
            println!("redoable: {}", session.redoable());
            if session.is_valid() {
                println!("valid: true");
            } else {
                println!("valid: false");
                for line in session.errors().to_text().lines() {
                    println!("  - {}", line);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "index": history.index(),
                "length": history.len(),
                "entries": names,
                "undoable": session.undoable(),
                "redoable": session.redoable(),
                "valid": session.is_valid(),
                "errors": session.errors(),
                "current": session.current(),
            });
            println!("{}", to_pretty_json(&json));
        }
    }
}
