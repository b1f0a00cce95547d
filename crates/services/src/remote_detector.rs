use std::env;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::error::RemoteDetectorError;

/// Public CyberSafe analysis backend.
pub const DEFAULT_DETECTOR_BASE_URL: &str = "https://cybersafe-backend-zb49.onrender.com";

const DETECT_PATH: &str = "api/ai/detect";
const FALLBACK_REASON: &str = "Potential threat detected";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteDetectorConfig {
    pub base_url: String,
}

impl RemoteDetectorConfig {
    /// Reads `CYBERSAFE_DETECT_BASE_URL`, falling back to the public backend.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("CYBERSAFE_DETECT_BASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DETECTOR_BASE_URL.into());
        Self { base_url }
    }

    /// Full URL of the detect endpoint, appended to any path the base carries.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the base URL is not absolute.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(self.base_url.trim_end_matches('/'))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(DETECT_PATH)
    }
}

impl Default for RemoteDetectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DETECTOR_BASE_URL.into(),
        }
    }
}

/// How the backend judged the submitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteVerdict {
    Safe,
    Suspicious { reason: String },
    /// The body had no `safe` key; shown verbatim.
    Unrecognized(String),
}

impl RemoteVerdict {
    /// Interpret a response body of the form `{safe, reason?}`.
    ///
    /// `safe` and `reason` are judged by truthiness: `null`, `false`, `0` and
    /// `""` are falsy, everything else is truthy. A truthy reason is shown as
    /// sent; non-string reasons are rendered as compact JSON.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let Some(safe) = body.get("safe") else {
            return RemoteVerdict::Unrecognized(
                serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()),
            );
        };
        if is_truthy(safe) {
            return RemoteVerdict::Safe;
        }
        let reason = match body.get("reason") {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(other) if is_truthy(other) => other.to_string(),
            _ => FALLBACK_REASON.to_string(),
        };
        RemoteVerdict::Suspicious { reason }
    }

    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            RemoteVerdict::Safe => "✅ Safe Content".to_string(),
            RemoteVerdict::Suspicious { reason } => format!("⚠️ Suspicious: {reason}"),
            RemoteVerdict::Unrecognized(raw) => raw.clone(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    text: &'a str,
}

/// Thin passthrough to the remote analysis endpoint.
#[derive(Clone)]
pub struct RemoteDetectorService {
    client: Client,
    endpoint: Url,
}

impl RemoteDetectorService {
    /// # Errors
    ///
    /// Returns `RemoteDetectorError::InvalidBaseUrl` if the endpoint cannot be built.
    pub fn new(config: &RemoteDetectorConfig) -> Result<Self, RemoteDetectorError> {
        Ok(Self {
            client: Client::new(),
            endpoint: config.endpoint()?,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `text` for remote analysis. Blank input is not sent and yields `None`.
    ///
    /// The body is interpreted whatever the HTTP status, so error payloads
    /// shaped like verdicts are still shown.
    ///
    /// # Errors
    ///
    /// Returns `RemoteDetectorError` when the request fails, the body is not
    /// JSON, or the body is JSON `null`.
    pub async fn analyze_remote(
        &self,
        text: &str,
    ) -> Result<Option<RemoteVerdict>, RemoteDetectorError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&DetectRequest { text })
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "Remote detector request failed.");
                RemoteDetectorError::Http(err)
            })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|_| {
            warn!(%status, "Remote detector returned a non-JSON body.");
            RemoteDetectorError::InvalidBody
        })?;
        if body.is_null() {
            warn!(%status, "Remote detector returned a null body.");
            return Err(RemoteDetectorError::InvalidBody);
        }

        let verdict = RemoteVerdict::from_body(&body);
        info!(%status, ?verdict, "Remote analysis complete.");
        Ok(Some(verdict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers one HTTP request with `status` and `body`; the handle yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            let head_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "connection closed before the request head");
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&request[..head_end]).to_string();
            let length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < head_end + length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_string()
        });
        (base, handle)
    }

    fn service_at(base_url: String) -> RemoteDetectorService {
        RemoteDetectorService::new(&RemoteDetectorConfig { base_url }).unwrap()
    }

    #[test]
    fn default_endpoint_targets_detect_path() {
        let url = RemoteDetectorConfig::default().endpoint().unwrap();
        assert_eq!(
            url.as_str(),
            "https://cybersafe-backend-zb49.onrender.com/api/ai/detect"
        );
    }

    #[test]
    fn endpoint_ignores_trailing_slash_and_rejects_relative() {
        let config = RemoteDetectorConfig {
            base_url: "http://localhost:8080/".into(),
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://localhost:8080/api/ai/detect"
        );

        let bad = RemoteDetectorConfig {
            base_url: "not a url".into(),
        };
        assert!(RemoteDetectorService::new(&bad).is_err());
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        for base_url in [
            "https://proxy.example.com/cybersafe",
            "https://proxy.example.com/cybersafe/",
        ] {
            let config = RemoteDetectorConfig {
                base_url: base_url.into(),
            };
            assert_eq!(
                config.endpoint().unwrap().as_str(),
                "https://proxy.example.com/cybersafe/api/ai/detect"
            );
        }
    }

    #[test]
    fn safe_body_is_safe() {
        let verdict = RemoteVerdict::from_body(&json!({ "safe": true }));
        assert_eq!(verdict, RemoteVerdict::Safe);
        assert_eq!(verdict.display_text(), "✅ Safe Content");
    }

    #[test]
    fn unsafe_body_uses_reason_or_fallback() {
        let verdict = RemoteVerdict::from_body(&json!({ "safe": false, "reason": "spoofed sender" }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious: spoofed sender");

        let verdict = RemoteVerdict::from_body(&json!({ "safe": false }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious: Potential threat detected");

        let verdict = RemoteVerdict::from_body(&json!({ "safe": false, "reason": "" }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious: Potential threat detected");

        let verdict = RemoteVerdict::from_body(&json!({ "safe": false, "reason": "  spaced " }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious:   spaced ");
    }

    #[test]
    fn safe_and_reason_follow_truthiness() {
        assert_eq!(RemoteVerdict::from_body(&json!({ "safe": 1 })), RemoteVerdict::Safe);
        assert_eq!(RemoteVerdict::from_body(&json!({ "safe": "yes" })), RemoteVerdict::Safe);
        for falsy in [json!(null), json!(0), json!(""), json!(false)] {
            let verdict = RemoteVerdict::from_body(&json!({ "safe": falsy, "reason": 0 }));
            assert_eq!(
                verdict.display_text(),
                "⚠️ Suspicious: Potential threat detected"
            );
        }

        let verdict = RemoteVerdict::from_body(&json!({ "safe": false, "reason": 42 }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious: 42");
        let verdict = RemoteVerdict::from_body(&json!({ "safe": false, "reason": ["a", "b"] }));
        assert_eq!(verdict.display_text(), "⚠️ Suspicious: [\"a\",\"b\"]");
    }

    #[test]
    fn unknown_shape_is_shown_verbatim() {
        let body = json!({ "error": "rate limited" });
        let verdict = RemoteVerdict::from_body(&body);
        assert_eq!(
            verdict,
            RemoteVerdict::Unrecognized("{\n  \"error\": \"rate limited\"\n}".into())
        );
    }

    #[test]
    fn failure_message_is_generic() {
        let err = RemoteDetectorError::InvalidBody;
        assert_eq!(err.user_message(), "Error contacting server");
    }

    #[tokio::test]
    async fn blank_input_is_not_sent() {
        let service = RemoteDetectorService::new(&RemoteDetectorConfig {
            base_url: "http://127.0.0.1:9".into(),
        })
        .unwrap();
        assert_eq!(service.analyze_remote("   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        let service = RemoteDetectorService::new(&RemoteDetectorConfig {
            base_url: "http://127.0.0.1:9".into(),
        })
        .unwrap();
        let err = service.analyze_remote("hello").await.unwrap_err();
        assert!(matches!(err, RemoteDetectorError::Http(_)));
    }

    #[tokio::test]
    async fn safe_response_posts_to_prefixed_endpoint() {
        let (base, server) = serve_once("200 OK", r#"{"safe":true}"#).await;
        let service = service_at(format!("{base}/proxy"));

        let verdict = service.analyze_remote("  hello there ").await.unwrap();
        assert_eq!(verdict, Some(RemoteVerdict::Safe));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /proxy/api/ai/detect HTTP/1.1\r\n"), "{request}");
        assert!(request.ends_with(r#"{"text":"hello there"}"#), "{request}");
    }

    #[tokio::test]
    async fn unsafe_response_shows_reason() {
        let (base, server) =
            serve_once("200 OK", r#"{"safe":false,"reason":"spoofed sender"}"#).await;
        let verdict = service_at(base).analyze_remote("click here").await.unwrap();
        assert_eq!(
            verdict.map(|v| v.display_text()).as_deref(),
            Some("⚠️ Suspicious: spoofed sender")
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn error_status_with_unknown_shape_is_shown_verbatim() {
        let (base, server) =
            serve_once("500 Internal Server Error", r#"{"error":"model offline"}"#).await;
        let verdict = service_at(base).analyze_remote("click here").await.unwrap();
        assert_eq!(
            verdict,
            Some(RemoteVerdict::Unrecognized(
                "{\n  \"error\": \"model offline\"\n}".into()
            ))
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_response_is_a_contact_error() {
        let (base, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
        let err = service_at(base).analyze_remote("click here").await.unwrap_err();
        assert!(matches!(err, RemoteDetectorError::InvalidBody));
        assert_eq!(err.user_message(), "Error contacting server");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn null_response_is_a_contact_error() {
        let (base, server) = serve_once("200 OK", "null").await;
        let err = service_at(base).analyze_remote("click here").await.unwrap_err();
        assert!(matches!(err, RemoteDetectorError::InvalidBody));
        server.await.unwrap();
    }
}
