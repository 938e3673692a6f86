//! Outbound request shape and the HTTP transport that delivers it.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::{decode_response, GraphqlRequest};

/// A GraphQL request plus the headers middleware has attached to it.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub body: GraphqlRequest,
    pub headers: HeaderMap,
}

impl OutboundRequest {
    pub fn new(body: GraphqlRequest) -> Self {
        Self {
            body,
            headers: HeaderMap::new(),
        }
    }

    pub const fn operation_name(&self) -> &'static str {
        self.body.operation_name
    }

    /// Set the bearer credential, replacing any existing `Authorization` header.
    pub fn set_bearer(&mut self, token: &str) -> Result<()> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::InvalidInput("token contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    pub fn has_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// The bearer credential, if one is attached.
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
    }
}

/// Delivers a decorated request and returns the `data` object of the response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<Value>;
}

/// GraphQL-over-HTTP transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.clone().normalized()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            endpoint: config.api_url,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(request.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&request.body)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() || error.is_connect() {
                    Error::Transport(error.to_string())
                } else {
                    Error::Http(error)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;
        decode_response(status, &body)
    }
}
