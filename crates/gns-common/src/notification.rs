use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Decoded body of a notify or health call. The server does not commit to a
/// schema, so callers get the raw JSON object.
pub type NotificationResponse = Map<String, Value>;

/// Body of `POST /api/v1/notify`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub task_id: String,

    /// Template variables substituted into the task's message.
    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,

    /// Overrides the task's configured priority when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl SendRequest {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    /// Base64 text. Passed through as-is.
    pub content: String,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Build an attachment from raw bytes using the standard base64 alphabet.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(filename, STANDARD.encode(bytes))
    }
}

/// Priority labels understood by the server. The wire field is a free-form
/// string, so any `&str` works wherever a `Priority` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_and_omits_empty_optionals() {
        let req = SendRequest::new("task-1").with_field("name", "Rust Developer");
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value,
            json!({ "taskId": "task-1", "data": { "name": "Rust Developer" } })
        );
    }

    #[test]
    fn round_trips_nested_payload() {
        let req = SendRequest::new("task-2")
            .with_field("count", 3)
            .with_field("tags", json!(["a", "b"]))
            .with_field("meta", json!({ "nested": { "ok": true }, "none": null }))
            .with_attachment(Attachment::new("report.txt", "aGVsbG8="))
            .with_priority(Priority::High);

        let encoded = serde_json::to_string(&req).unwrap();
        let decoded: SendRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn empty_task_id_passes_through() {
        let value = serde_json::to_value(SendRequest::new("")).unwrap();
        assert_eq!(value["taskId"], "");
        assert_eq!(value["data"], json!({}));
    }

    #[test]
    fn attachment_from_bytes_encodes_base64() {
        let att = Attachment::from_bytes("hello.txt", b"hello");
        assert_eq!(att.content, "aGVsbG8=");
        assert_eq!(att.filename, "hello.txt");
    }

    #[test]
    fn priority_accepts_enum_or_free_string() {
        assert_eq!(
            SendRequest::new("t").with_priority(Priority::Low).priority.as_deref(),
            Some("Low")
        );
        assert_eq!(
            SendRequest::new("t").with_priority("Urgent").priority.as_deref(),
            Some("Urgent")
        );
        assert_eq!(Priority::High.to_string(), "High");
    }
}
