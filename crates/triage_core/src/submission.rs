use crate::{FileHandle, InputSource, ValidationError};

/// Path of the remote analyze operation.
pub const ANALYZE_PATH: &str = "/api/analyze";
pub const FIELD_EMAIL_FILE: &str = "email_file";
pub const FIELD_EMAIL_TEXT: &str = "email_text";

/// Payload of one analyze call. At least one field is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    email_text: Option<String>,
    email_file: Option<FileHandle>,
}

impl SubmissionRequest {
    /// Attaches trimmed non-empty text and any non-empty file; both when both exist.
    pub fn from_input(input: &InputSource) -> Result<Self, ValidationError> {
        let text = input.text().trim();
        let email_text = (!text.is_empty()).then(|| text.to_string());
        let email_file = input.file().filter(|file| file.size() > 0).cloned();

        if email_text.is_none() && email_file.is_none() {
            return Err(ValidationError::EmptyInput);
        }
        Ok(Self {
            email_text,
            email_file,
        })
    }

    pub fn email_text(&self) -> Option<&str> {
        self.email_text.as_deref()
    }

    pub fn email_file(&self) -> Option<&FileHandle> {
        self.email_file.as_ref()
    }

    /// Names of the multipart fields this request carries, file first.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(2);
        if self.email_file.is_some() {
            fields.push(FIELD_EMAIL_FILE);
        }
        if self.email_text.is_some() {
            fields.push(FIELD_EMAIL_TEXT);
        }
        fields
    }
}
