//! Middleware pipeline wrapped around every outbound GraphQL call.
//!
//! Stages run in registration order before dispatch and in reverse order
//! after the transport returns. A stage can decorate the request or observe
//! the outcome, but never replaces the outcome: whatever the transport
//! produced is what the caller receives.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::graphql::{take_field, GraphqlRequest};
use crate::session::{read_token, SessionManager};
use crate::storage::{TokenStore, ACCESS_TOKEN_KEY};
use crate::transport::{OutboundRequest, Transport};

#[async_trait]
pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn before(&self, _request: &mut OutboundRequest) -> Result<()> {
        Ok(())
    }

    async fn after(&self, _request: &OutboundRequest, _outcome: &Result<Value>) {}
}

/// Anything that can answer "which access token should this request carry".
pub trait AccessTokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

impl<T: AccessTokenSource + ?Sized> AccessTokenSource for Arc<T> {
    fn access_token(&self) -> Option<String> {
        (**self).access_token()
    }
}

impl AccessTokenSource for SessionManager {
    fn access_token(&self) -> Option<String> {
        Self::access_token(self)
    }
}

/// Reads the access token straight from persisted storage.
///
/// Used by the pipeline that carries the auth mutations themselves, which
/// exists before any `SessionManager` does.
pub struct StoredAccessToken(pub Arc<dyn TokenStore>);

impl AccessTokenSource for StoredAccessToken {
    fn access_token(&self) -> Option<String> {
        read_token(self.0.as_ref(), ACCESS_TOKEN_KEY)
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is held.
///
/// Requests that already carry an `Authorization` header are left alone, and
/// requests without a token go out with no header at all.
pub struct BearerAuth<S> {
    source: S,
}

impl<S: AccessTokenSource> BearerAuth<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: AccessTokenSource> Middleware for BearerAuth<S> {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    async fn before(&self, request: &mut OutboundRequest) -> Result<()> {
        if request.has_authorization() {
            return Ok(());
        }
        let Some(token) = self.source.access_token() else {
            return Ok(());
        };
        if let Err(error) = request.set_bearer(&token) {
            tracing::warn!(
                operation = request.operation_name(),
                "Dispatching without credential: {}",
                error
            );
        }
        Ok(())
    }
}

/// Forces a logout when the server rejects the session's credential.
///
/// Runs once per response, so a response carrying several unauthorized
/// errors still triggers a single logout.
pub struct LogoutOnUnauthorized {
    session: Arc<SessionManager>,
}

impl LogoutOnUnauthorized {
    pub const fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for LogoutOnUnauthorized {
    fn name(&self) -> &'static str {
        "logout-on-unauthorized"
    }

    async fn after(&self, request: &OutboundRequest, outcome: &Result<Value>) {
        if let Err(error) = outcome {
            if error.is_unauthorized() {
                tracing::warn!(
                    operation = request.operation_name(),
                    "Credential rejected, ending session"
                );
                self.session.logout().await;
            }
        }
    }
}

/// Ordered middleware around a transport.
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            middleware: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, stage: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.middleware.iter().map(|stage| stage.name()).collect()
    }

    pub async fn execute(&self, mut request: OutboundRequest) -> Result<Value> {
        for stage in &self.middleware {
            stage.before(&mut request).await?;
        }

        tracing::debug!(
            operation = request.operation_name(),
            authenticated = request.has_authorization(),
            "Dispatching GraphQL request"
        );
        let outcome = self.transport.send(&request).await;
        if let Err(error) = &outcome {
            tracing::warn!(
                operation = request.operation_name(),
                "GraphQL request failed: {}",
                error
            );
        }

        for stage in self.middleware.iter().rev() {
            stage.after(&request, &outcome).await;
        }
        outcome
    }

    /// Execute and deserialize one top-level field of the response data.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: GraphqlRequest,
        field: &str,
    ) -> Result<T> {
        let data = self.execute(OutboundRequest::new(request)).await?;
        take_field(data, field)
    }
}
