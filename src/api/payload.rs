//! Write payloads.
//!
//! A payload is a flat JSON object plus optional binary attachments. Without
//! attachments it is sent as a JSON body; with attachments it becomes a
//! multipart form where every attachment is a named file part, scalar fields
//! are text parts and nested objects/arrays are JSON-stringified text parts.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ApiError;

/// A binary file part (animal photo, receipt, invoice, document...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name the server expects (e.g. `photo`, `receipt`).
    pub field: String,
    pub file_name: String,
    /// Explicit MIME type; guessed from `file_name` when absent.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read an attachment from disk, naming it after the file.
    pub fn from_path(field: impl Into<String>, path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(field, file_name, bytes))
    }

    pub fn mime_type(&self) -> String {
        match &self.content_type {
            Some(ct) => ct.clone(),
            None => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }

    fn to_part(&self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type())
            .map_err(|e| ApiError::Parse(format!("Invalid content type for '{}': {}", self.field, e)))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload {
    fields: Map<String, Value>,
    attachments: Vec<Attachment>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from any record that serializes to a JSON object.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(record).map_err(|e| ApiError::Parse(e.to_string()))? {
            Value::Object(fields) => Ok(Self {
                fields,
                attachments: Vec::new(),
            }),
            other => Err(ApiError::Parse(format!(
                "Payload must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn is_multipart(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Text parts of the multipart encoding, in field order. Null fields are
    /// omitted.
    pub fn text_parts(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.clone(), text))
            })
            .collect()
    }

    pub(crate) fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, text) in self.text_parts() {
            form = form.text(name, text);
        }
        for attachment in &self.attachments {
            form = form.part(attachment.field.clone(), attachment.to_part()?);
        }
        Ok(form)
    }

    pub(crate) fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Draft {
        name: String,
        tag_number: String,
        weight: f64,
        vaccinated: bool,
        notes: Option<String>,
        location: Value,
    }

    fn draft() -> Draft {
        Draft {
            name: "Daisy".into(),
            tag_number: "KE-001".into(),
            weight: 412.5,
            vaccinated: true,
            notes: None,
            location: json!({ "paddock": "north", "gps": [1.2, 36.8] }),
        }
    }

    #[test]
    fn record_becomes_fields() {
        let payload = Payload::from_record(&draft()).unwrap();
        assert_eq!(payload.fields()["tagNumber"], "KE-001");
        assert!(!payload.is_multipart());
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(Payload::from_record(&vec![1, 2, 3]).is_err());
    }

    #[test]
    fn text_parts_stringify_nested_and_skip_nulls() {
        let payload = Payload::from_record(&draft()).unwrap();
        let parts: std::collections::HashMap<_, _> = payload.text_parts().into_iter().collect();

        assert_eq!(parts["name"], "Daisy");
        assert_eq!(parts["weight"], "412.5");
        assert_eq!(parts["vaccinated"], "true");
        assert!(!parts.contains_key("notes"));

        let location: Value = serde_json::from_str(&parts["location"]).unwrap();
        assert_eq!(location["paddock"], "north");
    }

    #[test]
    fn attachment_makes_payload_multipart() {
        let payload = Payload::new()
            .field("name", "Daisy")
            .attach(Attachment::new("photo", "daisy.jpg", vec![0xff, 0xd8]));
        assert!(payload.is_multipart());
        assert_eq!(payload.attachments()[0].mime_type(), "image/jpeg");
        assert!(payload.to_form().is_ok());
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        let a = Attachment::new("document", "deed.zzz", vec![1]);
        assert_eq!(a.mime_type(), "application/octet-stream");
        let a = a.with_content_type("application/pdf");
        assert_eq!(a.mime_type(), "application/pdf");
    }
}
