use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{ApiError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the workshop REST backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and decode the payload, if any. A `204`, an empty
    /// body, or a non-JSON body all decode to `None`; a JSON object wrapped
    /// in a `value` envelope is unwrapped first.
    async fn request_opt<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            debug!(%method, path, status = status.as_u16(), "request completed");
            return Ok(None);
        }
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(ApiError::Request { status: status.as_u16(), body: text });
        }
        debug!(%method, path, status = status.as_u16(), "request completed");
        if text.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };
        let decoded = serde_json::from_value(unwrap_envelope(value))
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(Some(decoded))
    }

    async fn request_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_opt(method, path, body)
            .await?
            .ok_or_else(|| ApiError::Parse(format!("empty response body for {path}")))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json::<Value, T>(Method::GET, path, None).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn post_opt<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_opt(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let _: Option<Value> = self.request_opt(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn put_opt<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_opt(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let _: Option<Value> = self.request_opt(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn patch_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let _: Option<Value> = self.request_opt(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<()> {
        let _: Option<Value> = self.request_opt::<Value, Value>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Some endpoints wrap the payload as `{"value": ...}`; callers always get
/// the bare value.
fn unwrap_envelope(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        if let Some(inner) = map.remove("value") {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::unwrap_envelope;

    #[test]
    fn unwraps_value_envelope() {
        let wrapped = json!({"value": {"id": "abc"}});
        assert_eq!(unwrap_envelope(wrapped), json!({"id": "abc"}));
    }

    #[test]
    fn leaves_bare_payloads_alone() {
        let bare = json!([1, 2, 3]);
        assert_eq!(unwrap_envelope(bare.clone()), bare);
        let object = json!({"id": "abc"});
        assert_eq!(unwrap_envelope(object.clone()), object);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = super::ApiClient::new("http://localhost:5000/api/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }
}
