//! Dynamic client for any service speaking the JSON-over-POST protocol
//!
//! Each method is `POST {endpoint}/{wire_name}` with a JSON object body.
//! Statuses in `[200, 300)` succeed; anything else becomes an [`RpcError`].

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use zeroize::Zeroizing;

use super::codec;
use super::error::{ClientError, CodecError, Result, RpcError};
use crate::schema::Service;

pub struct RpcClient {
    http: reqwest::Client,
    endpoint: Url,
    service: Arc<Service>,
    auth_token: Option<Zeroizing<String>>,
}

impl RpcClient {
    pub fn new(endpoint: &str, service: Arc<Service>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Self::with_http_client(endpoint, service, http)
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(
        endpoint: &str,
        service: Arc<Service>,
        http: reqwest::Client,
    ) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
            service,
            auth_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every call
    ///
    /// Takes `&mut self`, so a token cannot change while a call borrows the client.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(Zeroizing::new(token.into()));
    }

    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Call a method by wire name
    ///
    /// Returns the decoded output object, or `Value::Null` for methods
    /// without an output shape.
    pub async fn call(&self, method: &str, input: Option<Value>) -> Result<Value> {
        let method = self
            .service
            .method_by_wire_name(method)
            .ok_or_else(|| ClientError::UnknownMethod(method.to_string()))?;

        let url = format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            method.wire_name
        );
        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(id) = method.input {
            let body = codec::encode(&self.service, id, input.as_ref()).map_err(ClientError::Encode)?;
            request = request.body(body.to_string());
        }
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token.as_str());
        }

        tracing::debug!(method = %method.wire_name, %url, "Calling method");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            // 3xx fails like 4xx/5xx
            let body = response.bytes().await.unwrap_or_default();
            return Err(RpcError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                &body,
            )
            .into());
        }

        let body = response.bytes().await?;
        let Some(id) = method.output else {
            return Ok(Value::Null);
        };

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| ClientError::Decode(CodecError::new("$", format!("invalid JSON body: {e}"))))?;
        codec::decode(&self.service, id, &value).map_err(ClientError::Decode)
    }
}
