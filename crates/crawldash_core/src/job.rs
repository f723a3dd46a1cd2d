//! Server-reported job records and their per-column rendering.
//!
//! The status endpoint reuses one name for two meanings: `_comments` is a
//! running counter while `comments` only appears once the sub-resource is
//! finished and then holds the final value. Records are decoded into
//! [`Progress`] once, so rendering never inspects field presence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PENDING_TEXT: &str = "Pending";
pub const STATUS_DEFAULT_TEXT: &str = "In progress";

/// Sub-resources tracked per video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Comments,
    Captions,
}

impl Resource {
    /// Field carrying the final value once the resource is complete.
    pub fn terminal_field(self) -> &'static str {
        match self {
            Resource::Comments => "comments",
            Resource::Captions => "captions",
        }
    }

    /// Field carrying the running counter while downloading.
    pub fn progress_field(self) -> &'static str {
        match self {
            Resource::Comments => "_comments",
            Resource::Captions => "_captions",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Nothing reported yet.
    Pending,
    InProgress { count: Value },
    Completed { value: Value },
}

impl Progress {
    fn decode(record: &Value, resource: Resource) -> Self {
        let Some(object) = record.as_object() else {
            return Progress::Pending;
        };
        // Presence alone marks completion, whatever the value.
        if let Some(value) = object.get(resource.terminal_field()) {
            return Progress::Completed {
                value: value.clone(),
            };
        }
        match object.get(resource.progress_field()) {
            None | Some(Value::Null) => Progress::Pending,
            Some(count) => Progress::InProgress {
                count: count.clone(),
            },
        }
    }

    pub fn render(&self) -> String {
        match self {
            Progress::Pending => PENDING_TEXT.to_string(),
            Progress::Completed { value } => format!("Done: {}", display_value(value)),
            Progress::InProgress { count } if is_zero(count) => "Downloading".to_string(),
            Progress::InProgress { count } => format!("Downloading {}", display_value(count)),
        }
    }
}

/// One job as last reported by the server.
///
/// The raw value is kept so the table always mirrors the server snapshot
/// exactly; the typed fields are derived from it at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct JobRecord {
    raw: Value,
    title: Option<String>,
    status: Option<Value>,
    comments: Progress,
    captions: Progress,
}

impl JobRecord {
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn progress(&self, resource: Resource) -> &Progress {
        match resource {
            Resource::Comments => &self.comments,
            Resource::Captions => &self.captions,
        }
    }

    pub fn title_text(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| PENDING_TEXT.to_string())
    }

    pub fn status_text(&self) -> String {
        self.status
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| STATUS_DEFAULT_TEXT.to_string())
    }
}

impl From<Value> for JobRecord {
    fn from(raw: Value) -> Self {
        let title = raw
            .pointer("/details/title")
            .filter(|value| !value.is_null())
            .map(display_value);
        let status = raw.get("status").filter(|value| !value.is_null()).cloned();
        let comments = Progress::decode(&raw, Resource::Comments);
        let captions = Progress::decode(&raw, Resource::Captions);
        Self {
            raw,
            title,
            status,
            comments,
            captions,
        }
    }
}

impl From<JobRecord> for Value {
    fn from(record: JobRecord) -> Self {
        record.raw
    }
}

/// Renders a JSON value the way string concatenation shows it: strings
/// without quotes, integral floats without a fraction, everything else in
/// its JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(float) if float == 0.0 => "0".to_string(),
            Some(float) => float.to_string(),
            None => number.to_string(),
        },
        other => other.to_string(),
    }
}

fn is_zero(value: &Value) -> bool {
    value.as_f64() == Some(0.0)
}
