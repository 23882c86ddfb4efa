//! Validates scripts against the embedded MulmoScript schema and checks
//! the issues it produces classify into the expected buckets.

use mulmo_core::{
    classify, IssueCode, IssueSource, PathSegment, SchemaValidator, ScriptDocument,
    ValidationIssue,
};
use serde_json::{json, Value};

fn validator() -> SchemaValidator {
    SchemaValidator::new().unwrap_or_else(|e| panic!("embedded schema: {}", e))
}

fn minimal() -> Value {
    json!({
        "$mulmocast": { "version": "1.1" },
        "lang": "en",
        "canvasSize": { "width": 1280, "height": 720 },
        "beats": [
            { "speaker": "Presenter", "text": "Hello", "imagePrompt": "A sunrise" },
            {
                "speaker": "Presenter",
                "text": "A chart",
                "image": {
                    "type": "image",
                    "source": { "kind": "url", "url": "https://example.com/a.png" }
                }
            }
        ]
    })
}

fn issues_for(value: Value) -> Vec<ValidationIssue> {
    validator().issues(&ScriptDocument::new(value))
}

fn has_issue(issues: &[ValidationIssue], code: IssueCode, path: &[PathSegment]) -> bool {
    issues.iter().any(|i| i.code == code && i.path == path)
}

fn issues_with(schema: Value, value: Value) -> Vec<ValidationIssue> {
    SchemaValidator::from_schema(&schema)
        .unwrap_or_else(|e| panic!("test schema: {}", e))
        .issues(&ScriptDocument::new(value))
}

fn keys(names: &[&str]) -> Vec<PathSegment> {
    names.iter().map(|s| PathSegment::from(*s)).collect()
}

#[test]
fn minimal_script_is_valid() {
    let doc = ScriptDocument::new(minimal());
    let v = validator();
    assert!(v.is_valid(&doc));
    assert!(v.issues(&doc).is_empty());
}

#[test]
fn is_valid_agrees_with_issue_list() {
    let v = validator();
    let mut broken = minimal();
    broken["beats"] = json!([]);
    broken["lang"] = json!("x");

    for value in [minimal(), broken, json!({}), json!([1, 2])] {
        let doc = ScriptDocument::new(value);
        assert_eq!(v.is_valid(&doc), v.issues(&doc).is_empty(), "{:?}", doc);
    }
}

#[test]
fn missing_marker_is_required_but_absent() {
    let mut value = minimal();
    value.as_object_mut().unwrap().remove("$mulmocast");
    let issues = issues_for(value);

    let marker = issues
        .iter()
        .find(|i| i.path == [PathSegment::Key("$mulmocast".into())])
        .expect("issue for $mulmocast");
    assert!(marker.is_required_but_absent());
    assert_eq!(classify(&issues).script.mulmocast, vec!["$mulmocast must set."]);
}

#[test]
fn missing_beats_classifies_as_must_set() {
    let mut value = minimal();
    value.as_object_mut().unwrap().remove("beats");
    let errors = classify(&issues_for(value));
    assert_eq!(errors.script.beats, vec!["Beats must set."]);
}

#[test]
fn empty_beats_is_too_small() {
    let mut value = minimal();
    value["beats"] = json!([]);
    let issues = issues_for(value);

    assert!(has_issue(&issues, IssueCode::TooSmall, &[PathSegment::Key("beats".into())]));
    let errors = classify(&issues);
    assert_eq!(errors.script.beats, vec!["Beats must contain at least 1 beat(s)."]);
    assert!(errors.beats.is_empty());
}

#[test]
fn extra_beat_field_is_unrecognized_key() {
    let mut value = minimal();
    value["beats"][1]["colour"] = json!("red");
    let issues = issues_for(value);

    let issue = issues
        .iter()
        .find(|i| i.code == IssueCode::UnrecognizedKeys)
        .expect("unrecognized_keys issue");
    assert_eq!(
        issue.path,
        vec![PathSegment::Key("beats".into()), PathSegment::Index(1)]
    );
    assert_eq!(issue.keys, vec!["colour"]);

    let errors = classify(&issues);
    assert_eq!(
        errors.beat(1),
        ["The object at '' contains unrecognized key(s): 'colour'."]
    );
    assert!(errors.beat(0).is_empty());
}

#[test]
fn wrong_section_type_routes_to_section() {
    let mut value = minimal();
    value["canvasSize"]["height"] = json!("tall");
    let issues = issues_for(value);

    assert!(has_issue(
        &issues,
        IssueCode::InvalidType,
        &[
            PathSegment::Key("canvasSize".into()),
            PathSegment::Key("height".into())
        ]
    ));
    let errors = classify(&issues);
    assert_eq!(errors.canvas_size.len(), 1);
    assert!(errors.canvas_size[0].starts_with("'height' contains invalid data: "));
    assert!(errors.canvas_size[0].ends_with('.'));
}

#[test]
fn unknown_image_variant_is_invalid_union() {
    let mut value = minimal();
    value["beats"][0]["image"] = json!({ "type": "hologram" });
    let issues = issues_for(value);

    assert!(has_issue(
        &issues,
        IssueCode::InvalidUnion,
        &[
            PathSegment::Key("beats".into()),
            PathSegment::Index(0),
            PathSegment::Key("image".into())
        ]
    ));
    assert_eq!(
        classify(&issues).beat(0),
        ["invalid_union: something broken."]
    );
}

#[test]
fn bad_reference_url_is_invalid_format() {
    let mut value = minimal();
    value["references"] = json!([{ "url": "not a url" }]);
    let issues = issues_for(value);

    let issue = issues
        .iter()
        .find(|i| i.code == IssueCode::InvalidFormat)
        .expect("invalid_format issue");
    assert_eq!(issue.format.as_deref(), Some("url"));
    assert_eq!(
        issue.path,
        vec![
            PathSegment::Key("references".into()),
            PathSegment::Index(0),
            PathSegment::Key("url".into())
        ]
    );
    // `references` has no error bucket.
    assert!(classify(&issues).is_empty());
}

// ──────────────────────────────────────────────
// Keyword mapping
// ──────────────────────────────────────────────

#[test]
fn unevaluated_properties_are_unrecognized_keys() {
    let schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "canvasSize": {
                "type": "object",
                "properties": { "width": { "type": "number" } },
                "unevaluatedProperties": false
            }
        },
        "unevaluatedProperties": false
    });
    let issues = issues_with(
        schema,
        json!({ "title2": 1, "canvasSize": { "width": 1, "depth": 2 } }),
    );

    let root = issues
        .iter()
        .find(|i| i.code == IssueCode::UnrecognizedKeys && i.path.is_empty())
        .expect("root unrecognized_keys issue");
    assert_eq!(root.keys, vec!["title2"]);
    let nested = issues
        .iter()
        .find(|i| i.code == IssueCode::UnrecognizedKeys && i.path == keys(&["canvasSize"]))
        .expect("canvasSize unrecognized_keys issue");
    assert_eq!(nested.keys, vec!["depth"]);

    let errors = classify(&issues);
    assert_eq!(
        errors.script.script,
        vec!["The object at '' contains unrecognized key(s): 'title2'."]
    );
    assert_eq!(
        errors.canvas_size,
        vec!["The object at 'canvasSize' contains unrecognized key(s): 'depth'."]
    );
}

#[test]
fn maximum_is_too_big_and_has_no_message() {
    let schema = json!({
        "type": "object",
        "properties": {
            "audioParams": {
                "type": "object",
                "properties": { "bgmVolume": { "type": "number", "maximum": 2 } }
            }
        }
    });
    let issues = issues_with(schema, json!({ "audioParams": { "bgmVolume": 3 } }));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::TooBig);
    assert_eq!(issues[0].path, keys(&["audioParams", "bgmVolume"]));
    assert!(classify(&issues).is_empty());
}

#[test]
fn enum_mismatch_is_invalid_value() {
    let mut value = minimal();
    value["imageParams"] = json!({ "provider": "acme" });
    let issues = issues_for(value);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::InvalidValue);
    assert_eq!(issues[0].path, keys(&["imageParams", "provider"]));
    let errors = classify(&issues);
    assert!(errors.image_params.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn const_mismatch_is_invalid_value_not_missing_marker() {
    let mut value = minimal();
    value["$mulmocast"]["version"] = json!("2.0");
    let issues = issues_for(value);

    assert!(has_issue(
        &issues,
        IssueCode::InvalidValue,
        &keys(&["$mulmocast", "version"])
    ));
    assert!(issues.iter().all(|i| !i.is_required_but_absent()));
    assert!(classify(&issues).script.mulmocast.is_empty());
}

#[test]
fn pattern_mismatch_is_regex_format() {
    let schema = json!({
        "type": "object",
        "properties": {
            "beats": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "id": { "type": "string", "pattern": "^[a-z]+$" } }
                }
            }
        }
    });
    let issues = issues_with(schema, json!({ "beats": [{ "id": "Bad Id" }] }));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::InvalidFormat);
    assert_eq!(issues[0].format.as_deref(), Some("regex"));
    assert_eq!(
        issues[0].path,
        vec![
            PathSegment::Key("beats".into()),
            PathSegment::Index(0),
            PathSegment::Key("id".into())
        ]
    );
    assert_eq!(classify(&issues).beat(0), ["invalid string: id."]);
}

#[test]
fn nested_required_addresses_missing_child() {
    let mut value = minimal();
    value["canvasSize"] = json!({ "width": 1280 });
    let issues = issues_for(value);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.code, IssueCode::InvalidType);
    assert_eq!(issue.path, keys(&["canvasSize", "height"]));
    assert!(issue.is_required_but_absent());
    assert_eq!(
        classify(&issues).canvas_size,
        vec!["'height' contains invalid data: Invalid input: expected value, received undefined."]
    );
}
