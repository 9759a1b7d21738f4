use thiserror::Error;

/// Shown when the server answers with something that is not JSON.
pub const PROTOCOL_FAILURE: &str = "Invalid server response.";
/// Shown when a failed response carries no usable message.
pub const GENERIC_REQUEST_FAILURE: &str = "Failed to process the email.";
/// Shown when the transport fails without a message of its own.
pub const GENERIC_TRANSPORT_FAILURE: &str = "Error while processing the email.";

/// Local rejections that never reach the network.
///
/// The `Display` text is what the user sees in the notification area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Files larger than 2 MB are not allowed.")]
    FileTooLarge { size: u64, max: u64 },
    #[error("Only .txt or .pdf files are accepted.")]
    UnsupportedFileType { name: String },
    #[error("Paste some text or attach a file.")]
    EmptyInput,
}

/// Failures of a submitted analyze call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The response body was not parseable JSON, whatever the status.
    #[error("Invalid server response.")]
    Protocol,
    /// Non-success status with a JSON body.
    #[error("{message}")]
    Request { status: u16, message: String },
    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },
}

impl SubmitError {
    /// Builds a request error, falling back to the generic message when the
    /// server supplied none.
    pub fn request(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| GENERIC_REQUEST_FAILURE.to_string());
        SubmitError::Request { status, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_TRANSPORT_FAILURE.to_string()
        } else {
            message
        };
        SubmitError::Transport { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_uses_server_message_verbatim() {
        let err = SubmitError::request(500, Some("model unavailable".to_string()));
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn request_error_without_message_is_generic() {
        assert_eq!(
            SubmitError::request(502, None).to_string(),
            GENERIC_REQUEST_FAILURE
        );
        assert_eq!(
            SubmitError::request(502, Some(String::new())).to_string(),
            GENERIC_REQUEST_FAILURE
        );
    }

    #[test]
    fn protocol_error_has_fixed_message() {
        assert_eq!(SubmitError::Protocol.to_string(), PROTOCOL_FAILURE);
    }

    #[test]
    fn blank_transport_message_is_generic() {
        assert_eq!(
            SubmitError::transport("  ").to_string(),
            GENERIC_TRANSPORT_FAILURE
        );
        assert_eq!(
            SubmitError::transport("connection refused").to_string(),
            "connection refused"
        );
    }
}
