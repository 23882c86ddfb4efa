//! Classification of schema violations into the editor's error taxonomy.
//!
//! [`classify`] folds an issue list into a [`MulmoError`]: per-beat message
//! lists, document-level presence errors, and one list per top-level
//! section. Each issue lands in exactly one bucket or is dropped; dropped
//! issues are reported at `debug` level and never surface as failures.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::{BEATS_KEY, MULMOCAST_KEY};
use crate::issue::{format_path, IssueCode, PathSegment, ValidationIssue};

pub const BEATS_TOO_SMALL: &str = "Beats must contain at least 1 beat(s).";
pub const BEATS_MISSING: &str = "Beats must set.";
pub const MULMOCAST_MISSING: &str = "$mulmocast must set.";
pub const INVALID_UNION: &str = "invalid_union: something broken.";

/// Top-level keys that own a message list in [`MulmoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Lang,
    CanvasSize,
    SpeechParams,
    ImageParams,
    MovieParams,
    SoundEffectParams,
    LipSyncParams,
    HtmlImageParams,
    TextSlideParams,
    CaptionParams,
    AudioParams,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Lang,
        Section::CanvasSize,
        Section::SpeechParams,
        Section::ImageParams,
        Section::MovieParams,
        Section::SoundEffectParams,
        Section::LipSyncParams,
        Section::HtmlImageParams,
        Section::TextSlideParams,
        Section::CaptionParams,
        Section::AudioParams,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Lang => "lang",
            Section::CanvasSize => "canvasSize",
            Section::SpeechParams => "speechParams",
            Section::ImageParams => "imageParams",
            Section::MovieParams => "movieParams",
            Section::SoundEffectParams => "soundEffectParams",
            Section::LipSyncParams => "lipSyncParams",
            Section::HtmlImageParams => "htmlImageParams",
            Section::TextSlideParams => "textSlideParams",
            Section::CaptionParams => "captionParams",
            Section::AudioParams => "audioParams",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.as_str() == key)
    }

    /// Whether issues nested below this key are routed to it. `lang` is a
    /// scalar, so only issues addressed at `lang` itself count.
    pub fn is_param_section(self) -> bool {
        self != Section::Lang
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-level errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptErrors {
    /// Unrecognized keys on the document root.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
    /// The beat list is missing or empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub beats: Vec<String>,
    /// The `$mulmocast` marker is missing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mulmocast: Vec<String>,
}

impl ScriptErrors {
    pub fn is_empty(&self) -> bool {
        self.script.is_empty() && self.beats.is_empty() && self.mulmocast.is_empty()
    }
}

/// UI-facing classification of a script's schema violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MulmoError {
    /// Messages per beat index.
    pub beats: BTreeMap<usize, Vec<String>>,
    pub script: ScriptErrors,
    pub lang: Vec<String>,
    pub canvas_size: Vec<String>,
    pub speech_params: Vec<String>,
    pub image_params: Vec<String>,
    pub movie_params: Vec<String>,
    pub sound_effect_params: Vec<String>,
    pub lip_sync_params: Vec<String>,
    pub html_image_params: Vec<String>,
    pub text_slide_params: Vec<String>,
    pub caption_params: Vec<String>,
    pub audio_params: Vec<String>,
}

impl MulmoError {
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Lang => &self.lang,
            Section::CanvasSize => &self.canvas_size,
            Section::SpeechParams => &self.speech_params,
            Section::ImageParams => &self.image_params,
            Section::MovieParams => &self.movie_params,
            Section::SoundEffectParams => &self.sound_effect_params,
            Section::LipSyncParams => &self.lip_sync_params,
            Section::HtmlImageParams => &self.html_image_params,
            Section::TextSlideParams => &self.text_slide_params,
            Section::CaptionParams => &self.caption_params,
            Section::AudioParams => &self.audio_params,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Lang => &mut self.lang,
            Section::CanvasSize => &mut self.canvas_size,
            Section::SpeechParams => &mut self.speech_params,
            Section::ImageParams => &mut self.image_params,
            Section::MovieParams => &mut self.movie_params,
            Section::SoundEffectParams => &mut self.sound_effect_params,
            Section::LipSyncParams => &mut self.lip_sync_params,
            Section::HtmlImageParams => &mut self.html_image_params,
            Section::TextSlideParams => &mut self.text_slide_params,
            Section::CaptionParams => &mut self.caption_params,
            Section::AudioParams => &mut self.audio_params,
        }
    }

    /// Messages for one beat; empty when nothing targeted it.
    pub fn beat(&self, index: usize) -> &[String] {
        self.beats.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    pub fn message_count(&self) -> usize {
        let beats: usize = self.beats.values().map(Vec::len).sum();
        let script =
            self.script.script.len() + self.script.beats.len() + self.script.mulmocast.len();
        let sections: usize = Section::ALL.iter().map(|s| self.section(*s).len()).sum();
        beats + script + sections
    }

    /// Format as human-readable text, one `location: message` per line.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        for msg in &self.script.script {
            lines.push(format!("script: {}", msg));
        }
        for msg in &self.script.mulmocast {
            lines.push(format!("{}: {}", MULMOCAST_KEY, msg));
        }
        for msg in &self.script.beats {
            lines.push(format!("beats: {}", msg));
        }
        for (index, messages) in &self.beats {
            for msg in messages {
                lines.push(format!("beats[{}]: {}", index, msg));
            }
        }
        for section in Section::ALL {
            for msg in self.section(section) {
                lines.push(format!("{}: {}", section, msg));
            }
        }

        lines.join("\n")
    }
}

/// Fold an issue list into a fresh [`MulmoError`].
pub fn classify(issues: &[ValidationIssue]) -> MulmoError {
    issues.iter().fold(MulmoError::default(), |mut acc, issue| {
        if !route(&mut acc, issue) {
            tracing::debug!(
                code = %issue.code,
                path = %format_path(&issue.path),
                message = %issue.message,
                "validation issue not routed to any error bucket"
            );
        }
        acc
    })
}

/// True iff any issue is located under `beats`.
pub fn has_beat_schema_error(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.root_key() == Some(BEATS_KEY))
}

pub fn is_valid(issues: &[ValidationIssue]) -> bool {
    issues.is_empty()
}

/// Push `issue` into its bucket. Returns false when no rule matched.
fn route(acc: &mut MulmoError, issue: &ValidationIssue) -> bool {
    let Some((first, rest)) = issue.path.split_first() else {
        if issue.code != IssueCode::UnrecognizedKeys {
            return false;
        }
        acc.script
            .script
            .push(unrecognized_keys_message(&issue.path, &issue.keys));
        return true;
    };
    let Some(root) = first.as_key() else {
        return false;
    };

    if root == BEATS_KEY {
        return route_beats(acc, issue, rest);
    }

    if root == MULMOCAST_KEY {
        if !issue.is_required_but_absent() {
            return false;
        }
        acc.script.mulmocast.push(MULMOCAST_MISSING.to_string());
        return true;
    }

    let Some(section) = Section::from_key(root) else {
        return false;
    };
    // Issues on the key itself display the full path; nested ones display
    // the path below the section.
    let shown = if rest.is_empty() {
        issue.path.as_slice()
    } else if section.is_param_section() {
        rest
    } else {
        return false;
    };
    match field_message(issue, shown) {
        Some(msg) => {
            acc.section_mut(section).push(msg);
            true
        }
        None => false,
    }
}

fn route_beats(acc: &mut MulmoError, issue: &ValidationIssue, rest: &[PathSegment]) -> bool {
    let Some((index, beat_path)) = rest.split_first() else {
        if issue.code == IssueCode::TooSmall {
            acc.script.beats.push(BEATS_TOO_SMALL.to_string());
        } else if issue.is_required_but_absent() {
            acc.script.beats.push(BEATS_MISSING.to_string());
        } else {
            return false;
        }
        return true;
    };
    let Some(index) = index.as_index() else {
        return false;
    };

    let msg = match issue.code {
        IssueCode::InvalidUnion => Some(INVALID_UNION.to_string()),
        IssueCode::InvalidFormat => Some(invalid_string_message(beat_path, issue.format.as_deref())),
        _ => field_message(issue, beat_path),
    };
    match msg {
        Some(msg) => {
            acc.beats.entry(index).or_default().push(msg);
            true
        }
        None => false,
    }
}

/// Messages shared by beat and section routing.
fn field_message(issue: &ValidationIssue, path: &[PathSegment]) -> Option<String> {
    match issue.code {
        IssueCode::UnrecognizedKeys => Some(unrecognized_keys_message(path, &issue.keys)),
        IssueCode::InvalidType => Some(invalid_data_message(path, &issue.message)),
        _ => None,
    }
}

fn unrecognized_keys_message(path: &[PathSegment], keys: &[String]) -> String {
    let keys = keys
        .iter()
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The object at '{}' contains unrecognized key(s): {}.",
        format_path(path),
        keys
    )
}

fn invalid_data_message(path: &[PathSegment], message: &str) -> String {
    // Validator messages may or may not end in a period; emit exactly one.
    let message = message.trim_end();
    let message = message.strip_suffix('.').unwrap_or(message);
    format!("'{}' contains invalid data: {}.", format_path(path), message)
}

fn invalid_string_message(path: &[PathSegment], format: Option<&str>) -> String {
    match format {
        Some("url") => format!(
            "invalid string: {}. url must be a valid URL.",
            format_path(path)
        ),
        _ => format!("invalid string: {}.", format_path(path)),
    }
}
