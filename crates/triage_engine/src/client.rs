use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use triage_core::{
    SubmissionRequest, SubmitError, ANALYZE_PATH, FIELD_EMAIL_FILE, FIELD_EMAIL_TEXT,
};
use triage_logging::{triage_debug, triage_info, triage_warn};
use url::Url;

pub const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Server root, e.g. `http://127.0.0.1:8000`. Endpoint paths are appended.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// The remote classification service.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// One POST of the payload. Resolves to the parsed JSON body on success.
    async fn analyze(&self, request: &SubmissionRequest) -> Result<Value, SubmitError>;

    async fn health(&self) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClientSettings,
}

impl ReqwestClassifier {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, SubmitError> {
        let raw = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        Url::parse(&raw)
            .map_err(|err| SubmitError::transport(format!("invalid server url {raw}: {err}")))
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::transport(err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SubmitError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large(max_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn analyze(&self, request: &SubmissionRequest) -> Result<Value, SubmitError> {
        let url = self.endpoint(ANALYZE_PATH)?;
        let client = self.build_client()?;
        let form = build_form(request)?;
        let started = Instant::now();

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                let err = map_reqwest_error(err);
                triage_warn!("Analyze request failed: {err}");
                err
            })?;
        let status = response.status();
        let body = self.read_body(response).await?;
        triage_info!(
            "Analyze finished status={} bytes={} elapsed_ms={}",
            status.as_u16(),
            body.len(),
            started.elapsed().as_millis()
        );

        interpret_response(status.as_u16(), &body)
    }

    async fn health(&self) -> Result<(), SubmitError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        triage_debug!("Health probe status={}", status.as_u16());
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::request(status.as_u16(), None))
        }
    }
}

/// Turns a status and raw body into the analysis JSON or a typed failure.
///
/// The body is parsed before the status is looked at, so an unparseable body
/// is a protocol error whatever the status.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Value, SubmitError> {
    let data: Value = serde_json::from_slice(body).map_err(|err| {
        triage_warn!("Unparseable response body (status {status}): {err}");
        SubmitError::Protocol
    })?;
    if (200..300).contains(&status) {
        Ok(data)
    } else {
        Err(SubmitError::request(status, server_message(&data)))
    }
}

fn server_message(data: &Value) -> Option<String> {
    ["detail", "message"].iter().find_map(|key| {
        data.get(key)
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(ToOwned::to_owned)
    })
}

fn build_form(request: &SubmissionRequest) -> Result<Form, SubmitError> {
    let mut form = Form::new();
    if let Some(file) = request.email_file() {
        let mut part = Part::bytes(file.contents().to_vec()).file_name(file.name().to_string());
        if let Some(kind) = file.kind() {
            part = part
                .mime_str(kind.mime_type())
                .map_err(|err| SubmitError::transport(err.to_string()))?;
        }
        form = form.part(FIELD_EMAIL_FILE, part);
    }
    if let Some(text) = request.email_text() {
        form = form.text(FIELD_EMAIL_TEXT, text.to_string());
    }
    Ok(form)
}

fn too_large(max_bytes: u64) -> SubmitError {
    SubmitError::transport(format!("server response larger than {max_bytes} bytes"))
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::transport("request timed out");
    }
    if err.is_connect() {
        return SubmitError::transport(format!("could not connect to server: {err}"));
    }
    SubmitError::transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use triage_core::{GENERIC_REQUEST_FAILURE, PROTOCOL_FAILURE};

    #[test]
    fn detail_takes_priority_over_message() {
        let body = br#"{"detail":"first","message":"second"}"#;
        assert_eq!(
            interpret_response(422, body),
            Err(SubmitError::Request {
                status: 422,
                message: "first".to_string()
            })
        );
    }

    #[test]
    fn non_string_detail_falls_through_to_message() {
        let body = br#"{"detail":[{"loc":["body"]}],"message":"bad form"}"#;
        assert_eq!(
            interpret_response(422, body).unwrap_err().to_string(),
            "bad form"
        );
    }

    #[test]
    fn failure_without_message_is_generic() {
        assert_eq!(
            interpret_response(503, b"{}").unwrap_err().to_string(),
            GENERIC_REQUEST_FAILURE
        );
    }

    #[test]
    fn unparseable_body_is_protocol_error_on_any_status() {
        assert_eq!(
            interpret_response(200, b"<html>oops</html>"),
            Err(SubmitError::Protocol)
        );
        assert_eq!(
            interpret_response(500, b"Internal Server Error")
                .unwrap_err()
                .to_string(),
            PROTOCOL_FAILURE
        );
    }

    #[test]
    fn success_returns_parsed_body() {
        assert_eq!(
            interpret_response(200, br#"{"category":"Produtivo"}"#),
            Ok(json!({"category": "Produtivo"}))
        );
    }

    #[test]
    fn endpoint_appends_path_to_base() {
        let classifier = ReqwestClassifier::new(ClientSettings {
            base_url: "http://localhost:9000/triage/".to_string(),
            ..ClientSettings::default()
        });
        assert_eq!(
            classifier.endpoint(ANALYZE_PATH).unwrap().as_str(),
            "http://localhost:9000/triage/api/analyze"
        );
    }

    #[test]
    fn invalid_base_url_is_transport_error() {
        let classifier = ReqwestClassifier::new(ClientSettings {
            base_url: "not a url".to_string(),
            ..ClientSettings::default()
        });
        assert!(matches!(
            classifier.endpoint(ANALYZE_PATH),
            Err(SubmitError::Transport { .. })
        ));
    }
}
