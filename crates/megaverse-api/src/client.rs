//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Map, Value};
use tokio::time::Instant;
use tracing::{debug, instrument};
use url::Url;

use crate::api::MegaverseApi;
use crate::error::MegaverseError;
use crate::throttle::RequestThrottle;
use crate::types::{ComethDirection, EntityKind, GoalMap, Position, SoloonColor};

const CANDIDATE_FIELD: &str = "candidateId";
const USER_AGENT: &str = concat!("megaverse/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`MegaverseClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API root, e.g. `https://challenge.crossmint.io/api`.
    pub base_url: String,
    /// Candidate identifier sent with every request.
    pub candidate_id: String,
    /// Minimum spacing between consecutive requests.
    pub min_request_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

/// Self-throttling HTTP client for the Megaverse API.
#[derive(Debug)]
pub struct MegaverseClient {
    http: Client,
    base_url: Url,
    candidate_id: String,
    throttle: RequestThrottle,
}

impl MegaverseClient {
    /// Build a client from connection settings.
    pub fn new(settings: ClientSettings) -> Result<Self, MegaverseError> {
        let base_url = Url::parse(settings.base_url.trim_end_matches('/')).map_err(|err| {
            MegaverseError::unexpected(format!(
                "invalid base url '{}': {}",
                settings.base_url, err
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MegaverseError::unexpected(format!(
                "invalid base url '{}': cannot carry a path",
                settings.base_url
            )));
        }
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| {
                MegaverseError::unexpected(format!("failed to build http client: {}", err))
            })?;
        let throttle = RequestThrottle::new(settings.min_request_interval);
        debug!(
            base_url = %base_url,
            min_interval_ms = throttle.interval().as_millis() as u64,
            "megaverse client ready"
        );
        Ok(Self {
            http,
            base_url,
            candidate_id: settings.candidate_id,
            throttle,
        })
    }

    /// Candidate identifier attached to requests.
    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    /// Issue one throttled call against `endpoint`, a `/`-separated path
    /// relative to the base URL. Each segment is percent-encoded.
    ///
    /// Mutating calls receive `candidateId` merged into the JSON body; `GET`
    /// calls receive it as a query parameter and send no body. The parsed
    /// response body is returned (`Value::Null` when empty or not JSON).
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Map<String, Value>>,
    ) -> Result<Value, MegaverseError> {
        let url = self.endpoint_url(endpoint.split('/').filter(|segment| !segment.is_empty()))?;
        self.send(method, url, payload).await
    }

    fn endpoint_url<'s>(
        &self,
        segments: impl IntoIterator<Item = &'s str>,
    ) -> Result<Url, MegaverseError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MegaverseError::unexpected("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, url, payload), fields(url = %url))]
    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Option<Map<String, Value>>,
    ) -> Result<Value, MegaverseError> {
        let _permit = self.throttle.acquire().await;

        let builder = self.http.request(method.clone(), url);
        let builder = if method == Method::GET {
            builder.query(&[(CANDIDATE_FIELD, self.candidate_id.as_str())])
        } else {
            let mut body = payload.unwrap_or_default();
            body.insert(
                CANDIDATE_FIELD.to_owned(),
                Value::String(self.candidate_id.clone()),
            );
            builder.json(&body)
        };

        let started = Instant::now();
        let result = execute(builder).await;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            status = result.as_ref().err().and_then(MegaverseError::status),
            ok = result.is_ok(),
            "request completed"
        );
        result
    }

    async fn mutate(
        &self,
        method: Method,
        kind: EntityKind,
        body: Value,
    ) -> Result<(), MegaverseError> {
        let Value::Object(payload) = body else {
            return Err(MegaverseError::unexpected("payload must be a JSON object"));
        };
        self.request(method, kind.endpoint(), Some(payload))
            .await
            .map(|_| ())
    }
}

async fn execute(builder: RequestBuilder) -> Result<Value, MegaverseError> {
    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null));
    }
    Err(MegaverseError::Http {
        status: status.as_u16(),
        body: parse_body(&bytes),
        message: format!("request failed with status code {}", status.as_u16()),
    })
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

#[async_trait]
impl MegaverseApi for MegaverseClient {
    async fn create_polyanet(&self, position: Position) -> Result<(), MegaverseError> {
        let body = json!({ "row": position.row, "column": position.column });
        self.mutate(Method::POST, EntityKind::Polyanet, body).await
    }

    async fn delete_polyanet(&self, position: Position) -> Result<(), MegaverseError> {
        let body = json!({ "row": position.row, "column": position.column });
        self.mutate(Method::DELETE, EntityKind::Polyanet, body)
            .await
    }

    async fn create_soloon(
        &self,
        position: Position,
        color: SoloonColor,
    ) -> Result<(), MegaverseError> {
        let body = json!({ "row": position.row, "column": position.column, "color": color });
        self.mutate(Method::POST, EntityKind::Soloon, body).await
    }

    async fn delete_soloon(&self, position: Position) -> Result<(), MegaverseError> {
        let body = json!({ "row": position.row, "column": position.column });
        self.mutate(Method::DELETE, EntityKind::Soloon, body).await
    }

    async fn create_cometh(
        &self,
        position: Position,
        direction: ComethDirection,
    ) -> Result<(), MegaverseError> {
        let body = json!({
            "row": position.row,
            "column": position.column,
            "direction": direction,
        });
        self.mutate(Method::POST, EntityKind::Cometh, body).await
    }

    async fn delete_cometh(&self, position: Position) -> Result<(), MegaverseError> {
        let body = json!({ "row": position.row, "column": position.column });
        self.mutate(Method::DELETE, EntityKind::Cometh, body).await
    }

    async fn goal_map(&self) -> Result<GoalMap, MegaverseError> {
        let url = self.endpoint_url(["map", self.candidate_id.as_str(), "goal"])?;
        let body = self.send(Method::GET, url, None).await?;
        serde_json::from_value(body)
            .map_err(|err| MegaverseError::unexpected(format!("malformed goal map: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> ClientSettings {
        ClientSettings {
            base_url: base_url.to_owned(),
            candidate_id: "candidate".to_owned(),
            min_request_interval: Duration::from_millis(10),
            request_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = MegaverseClient::new(settings("not a url")).unwrap_err();
        assert!(err.to_string().contains("invalid base url"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = MegaverseClient::new(settings("http://localhost:1/api/")).unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:1/api");
        assert_eq!(client.candidate_id(), "candidate");
    }

    #[test]
    fn endpoint_segments_are_escaped() {
        let client = MegaverseClient::new(settings("http://localhost:1/api/")).unwrap();
        let url = client
            .endpoint_url(["map", "team a/b?c", "goal"])
            .unwrap();
        assert_eq!(url.path(), "/api/map/team%20a%2Fb%3Fc/goal");
        assert_eq!(url.query(), None);

        let bare = MegaverseClient::new(settings("http://localhost:1")).unwrap();
        let url = bare.endpoint_url("/polyanets".split('/').filter(|s| !s.is_empty())).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1/polyanets");
    }

    #[test]
    fn opaque_base_url_is_rejected() {
        let err = MegaverseClient::new(settings("mailto:ops@example.com")).unwrap_err();
        assert!(err.to_string().contains("cannot carry a path"));
    }

    #[test]
    fn body_parsing_falls_back_to_text() {
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(br#"{"a":1}"#), Some(json!({ "a": 1 })));
        assert_eq!(parse_body(b"plain"), Some(Value::String("plain".into())));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Port 9 (discard) is closed on test hosts.
        let client = MegaverseClient::new(settings("http://127.0.0.1:9")).unwrap();
        let err = client.create_polyanet(Position::new(0, 0)).await.unwrap_err();
        assert!(matches!(err, MegaverseError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
