//! GraphQL-over-HTTP request and response envelopes.

pub mod documents;

use std::fmt;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::util::compact_text;

/// Error codes that mean the attached credential was rejected.
const UNAUTHORIZED_CODES: [&str; 2] = ["UNAUTHENTICATED", "UNAUTHORIZED"];

/// Message fragment used by servers that report auth failures without a code.
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// A single GraphQL operation, serialized as the standard JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    pub fn new(query: &'static str, operation_name: &'static str) -> Self {
        Self {
            query,
            operation_name,
            variables: Map::new(),
        }
    }

    /// Attach a variable. Serialization failures surface as `Error::Serialization`.
    pub fn variable(mut self, name: &str, value: impl Serialize) -> Result<Self> {
        self.variables
            .insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ErrorExtensions>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: Some(ErrorExtensions {
                code: Some(code.into()),
            }),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.code.as_deref())
    }

    /// A structured code wins; the message is only consulted when no code is present.
    pub fn is_unauthorized(&self) -> bool {
        self.code().map_or_else(
            || self.message.contains(UNAUTHORIZED_MESSAGE),
            |code| UNAUTHORIZED_CODES.contains(&code),
        )
    }
}

/// Non-empty list of errors returned by a GraphQL response.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlErrors(Vec<GraphqlError>);

impl GraphqlErrors {
    pub fn iter(&self) -> impl Iterator<Item = &GraphqlError> {
        self.0.iter()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0.first().map(|error| error.message.as_str())
    }
}

impl From<Vec<GraphqlError>> for GraphqlErrors {
    fn from(value: Vec<GraphqlError>) -> Self {
        Self(value)
    }
}

impl fmt::Display for GraphqlErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .0
            .iter()
            .map(|error| error.message.trim())
            .collect::<Vec<_>>();
        formatter.write_str(&messages.join("; "))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// Decode an HTTP response body into the `data` object of a GraphQL response.
///
/// A non-empty `errors` array fails the call even when partial data is present.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Value> {
    let parsed = serde_json::from_str::<GraphqlResponse>(body).ok();

    if status == StatusCode::UNAUTHORIZED {
        let message = parsed
            .as_ref()
            .and_then(|response| response.errors.as_ref())
            .and_then(|errors| errors.first())
            .map_or_else(
                || format!("HTTP {}", status.as_u16()),
                |error| error.message.clone(),
            );
        return Err(Error::Unauthorized(message));
    }

    let Some(response) = parsed else {
        if status.is_success() {
            return Err(Error::MalformedResponse(format!(
                "response is not a GraphQL payload: {}",
                compact_text(body)
            )));
        }
        return Err(Error::Status {
            status: status.as_u16(),
            body: compact_text(body),
        });
    };

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(Error::Graphql(errors.into()));
    }

    match response.data {
        Some(Value::Null) | None if status.is_success() => Err(Error::MalformedResponse(
            "response did not include data".to_string(),
        )),
        Some(Value::Null) | None => Err(Error::Status {
            status: status.as_u16(),
            body: compact_text(body),
        }),
        Some(data) => Ok(data),
    }
}

/// Pull a top-level field out of a `data` object and deserialize it.
pub fn take_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| Error::MalformedResponse(format!("response is missing `{field}`")))?;
    Ok(serde_json::from_value(value)?)
}
