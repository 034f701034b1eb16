use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use url::Url;

use crate::domain::{UserId, UserPayload, UserRecord};
use crate::error::{ApiError, GENERIC_SERVER_MESSAGE};
use crate::store::UserStore;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// HTTP client for the users API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`, e.g.
    /// `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::request(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        // Url::join only appends below a base ending in '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized)
            .map_err(|e| ApiError::request(format!("Invalid API URL {}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::request(format!("Invalid API URL: {}", base_url)));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::request(format!("Failed to build URL for path {}: {}", path, e)))
    }

    fn user_endpoint(&self, id: &UserId) -> Result<Url, ApiError> {
        // Percent-encoding leaves dots alone, so empty or all-dot ids would
        // resolve to the collection or above it.
        if id.as_str().chars().all(|c| c == '.') {
            return Err(ApiError::request(format!("Invalid user id: {:?}", id.as_str())));
        }
        self.endpoint(&format!("users/{}", urlencoding::encode(id.as_str())))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        tracing::debug!("calling {}", call_name);
        let response = request
            .send()
            .await
            .map_err(|e| normalize_transport_error(e, call_name))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(normalize_failure_response(status, &body, call_name))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                tracing::warn!("{} returned an undecodable body: {}", call_name, e);
                ApiError::server(format!("Unexpected response from server: {}", e))
            } else {
                normalize_transport_error(e, call_name)
            }
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[async_trait]
impl UserStore for ApiClient {
    async fn list_all(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get_json(self.client.get(self.endpoint("users/")?), "GET /users/")
            .await
    }

    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, ApiError> {
        self.get_json(self.client.get(self.user_endpoint(id)?), "GET /users/:id")
            .await
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, ApiError> {
        self.get_json(
            self.client
                .post(self.endpoint("users/")?)
                .json(&UserPayload::from(record)),
            "POST /users/",
        )
        .await
    }

    async fn update(&self, id: &UserId, record: &UserRecord) -> Result<UserRecord, ApiError> {
        self.get_json(
            self.client
                .put(self.user_endpoint(id)?)
                .json(&UserPayload::from(record)),
            "PUT /users/:id",
        )
        .await
    }

    async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        self.send_without_body(self.client.delete(self.user_endpoint(id)?), "DELETE /users/:id")
            .await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// Extracts the server's message from an error body.
///
/// `detail` is usually a string. Request validation failures carry a list
/// of `{"msg": ...}` objects instead, whose messages are joined.
fn detail_message(body: &[u8]) -> Option<String> {
    let detail = serde_json::from_slice::<ErrorBody>(body).ok()?.detail?;
    match detail {
        Value::String(message) if !message.is_empty() => Some(message),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn normalize_failure_response(status: StatusCode, body: &[u8], call_name: &str) -> ApiError {
    let message = detail_message(body).unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
    tracing::warn!("{} returned {}: {}", call_name, status, message);
    ApiError::server(message)
}

fn normalize_transport_error(error: reqwest::Error, call_name: &str) -> ApiError {
    if error.is_builder() {
        tracing::warn!("could not build {} request: {}", call_name, error);
        return ApiError::request(error.to_string());
    }
    tracing::warn!("no response for {}: {}", call_name, error);
    ApiError::network()
}
