use std::path::Path;

use anyhow::{Context, Result};
use gns_client::{Attachment, Priority, SendRequest};
use serde_json::{Map, Value};

/// Template data sent when no `--data` is given.
pub fn sample_data() -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("name".to_string(), Value::from("Rust Developer"));
    data.insert("service".to_string(), Value::from("Rust Microservice"));
    data
}

/// Parse `key=value`. The value is taken as JSON when it parses, otherwise
/// as a plain string, so `count=3` sends a number and `name=Ada` a string.
pub fn parse_field(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

pub fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Attachment::from_bytes(filename, &bytes))
}

pub fn build_request(
    task_id: &str,
    fields: Vec<(String, Value)>,
    attachments: &[impl AsRef<Path>],
    priority: Option<String>,
) -> Result<SendRequest> {
    let data = if fields.is_empty() {
        sample_data()
    } else {
        fields.into_iter().collect()
    };

    let mut request = SendRequest::new(task_id)
        .with_data(data)
        .with_priority(priority.unwrap_or_else(|| Priority::High.into()));

    for path in attachments {
        request = request.with_attachment(read_attachment(path.as_ref())?);
    }

    Ok(request)
}
