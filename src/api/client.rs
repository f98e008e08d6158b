//! Async HTTP client for the arena REST API.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::types::{
    CommitRequest, Difficulty, QualifyStartRequest, RankingPeriod, RankingType, RegisterRequest,
    RevealRequest, RoundMoveRequest,
};
use crate::strategy::Move;

/// Default production deployment.
pub const DEFAULT_BASE: &str = "https://agent-arena-rps.vercel.app";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Header carrying the agent API key.
const KEY_HEADER: &str = "x-agent-key";

/// Arena API client. One instance is shared by every call in a command.
#[derive(Debug, Clone)]
pub struct ArenaClient {
    http: reqwest::Client,
    base: String,
}

impl ArenaClient {
    /// Create a client for `base` (trailing slashes are ignored).
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = base.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Send one request and decode the response.
    ///
    /// `content-type` is only set when there is a body, `x-agent-key` only when
    /// a non-empty key is given. Non-2xx answers become `ApiError::Status`.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        key: Option<&str>,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base, path);
        debug!(%method, %url, "arena request");

        let mut request = self
            .http
            .request(method, &url)
            .header("accept", "application/json");
        if let Some(body) = body {
            // .json() also sets content-type: application/json
            request = request.json(body);
        }
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            request = request.header(KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "arena response");

        if status.is_success() {
            Ok(decode_success(&text))
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                payload: decode_failure(status.as_u16(), &text),
            })
        }
    }

    async fn get(&self, path: &str, key: Option<&str>) -> Result<Value, ApiError> {
        self.request::<Value>(Method::GET, path, key, None).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        key: Option<&str>,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        self.request(Method::POST, path, key, body).await
    }

    // ---- agents & qualification ----

    pub async fn register(&self, req: &RegisterRequest) -> Result<Value, ApiError> {
        self.post("/api/agents", None, Some(req)).await
    }

    pub async fn qualify_start(&self, key: &str, difficulty: Difficulty) -> Result<Value, ApiError> {
        let body = QualifyStartRequest { difficulty };
        self.post("/api/agents/me/qualify", Some(key), Some(&body)).await
    }

    pub async fn qualify_round(
        &self,
        key: &str,
        qual_id: &str,
        round_no: u32,
        mv: Move,
    ) -> Result<Value, ApiError> {
        let path = format!(
            "/api/agents/me/qualify/{}/rounds/{}",
            urlencoding::encode(qual_id),
            round_no
        );
        self.post(&path, Some(key), Some(&RoundMoveRequest { mv })).await
    }

    // ---- queue ----

    pub async fn join_queue(&self, key: &str) -> Result<Value, ApiError> {
        self.post::<Value>("/api/queue", Some(key), None).await
    }

    pub async fn leave_queue(&self, key: &str) -> Result<Value, ApiError> {
        self.request::<Value>(Method::DELETE, "/api/queue", Some(key), None)
            .await
    }

    pub async fn queue(&self) -> Result<Value, ApiError> {
        self.get("/api/queue", None).await
    }

    pub async fn queue_me(&self, key: &str) -> Result<Value, ApiError> {
        self.get("/api/queue/me", Some(key)).await
    }

    // ---- matches ----

    pub async fn matches(&self) -> Result<Value, ApiError> {
        self.get("/api/matches", None).await
    }

    pub async fn get_match(&self, match_id: &str) -> Result<Value, ApiError> {
        self.get(&match_path(match_id, ""), None).await
    }

    pub async fn ready(&self, key: &str, match_id: &str) -> Result<Value, ApiError> {
        self.post::<Value>(&match_path(match_id, "/ready"), Some(key), None)
            .await
    }

    pub async fn commit(
        &self,
        key: &str,
        match_id: &str,
        round_no: u32,
        req: &CommitRequest,
    ) -> Result<Value, ApiError> {
        let path = match_path(match_id, &format!("/rounds/{}/commit", round_no));
        self.post(&path, Some(key), Some(req)).await
    }

    pub async fn reveal(
        &self,
        key: &str,
        match_id: &str,
        round_no: u32,
        req: &RevealRequest,
    ) -> Result<Value, ApiError> {
        let path = match_path(match_id, &format!("/rounds/{}/reveal", round_no));
        self.post(&path, Some(key), Some(req)).await
    }

    // ---- public info ----

    pub async fn rules(&self) -> Result<Value, ApiError> {
        self.get("/api/rules", None).await
    }

    pub async fn time(&self) -> Result<Value, ApiError> {
        self.get("/api/time", None).await
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get("/api/health", None).await
    }

    pub async fn rankings(&self, kind: RankingType, period: RankingPeriod) -> Result<Value, ApiError> {
        let path = format!("/api/rankings?type={}&period={}", kind.as_str(), period.as_str());
        self.get(&path, None).await
    }
}

fn match_path(match_id: &str, suffix: &str) -> String {
    format!("/api/matches/{}{}", urlencoding::encode(match_id), suffix)
}

/// Decode a 2xx body: empty means `{"ok": true}`, non-JSON is wrapped as `raw`.
pub fn decode_success(text: &str) -> Value {
    if text.is_empty() {
        return json!({"ok": true});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({"raw": text}))
}

/// Decode an error body into the payload reported to the user.
pub fn decode_failure(status: u16, text: &str) -> Value {
    let code = format!("HTTP_{}", status);
    if text.is_empty() {
        return json!({"error": code});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({"error": code, "raw": text}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_empty_body_is_ok_marker() {
        assert_eq!(decode_success(""), json!({"ok": true}));
    }

    #[test]
    fn success_non_json_is_wrapped() {
        assert_eq!(decode_success("<html>hi</html>"), json!({"raw": "<html>hi</html>"}));
    }

    #[test]
    fn success_json_passes_through() {
        assert_eq!(decode_success(r#"{"total":2}"#), json!({"total": 2}));
        assert_eq!(decode_success("[1,2]"), json!([1, 2]));
    }

    #[test]
    fn failure_empty_body_uses_status_code() {
        assert_eq!(decode_failure(502, ""), json!({"error": "HTTP_502"}));
    }

    #[test]
    fn failure_non_json_keeps_raw_text() {
        assert_eq!(
            decode_failure(500, "Internal Server Error"),
            json!({"error": "HTTP_500", "raw": "Internal Server Error"})
        );
    }

    #[test]
    fn failure_json_passes_through() {
        let payload = decode_failure(409, r#"{"error":"NAME_TAKEN","message":"taken"}"#);
        assert_eq!(payload, json!({"error": "NAME_TAKEN", "message": "taken"}));
    }

    #[test]
    fn new_strips_trailing_slashes() {
        let client = ArenaClient::new("http://localhost:3000//", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base(), "http://localhost:3000");
    }

    #[test]
    fn new_rejects_non_http_base() {
        let err = ArenaClient::new("ftp://example.com", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn match_path_encodes_id() {
        assert_eq!(match_path("m 1", "/ready"), "/api/matches/m%201/ready");
        assert_eq!(match_path("m-1", ""), "/api/matches/m-1");
    }
}
