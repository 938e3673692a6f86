//! Remote side of the session: the auth mutations.

use async_trait::async_trait;

use super::{Credentials, SignInInput, SignUpInput};
use crate::error::Result;
use crate::graphql::documents::{LOGOUT, REFRESH_TOKENS, SIGN_IN, SIGN_UP};
use crate::graphql::{take_field, GraphqlRequest};
use crate::pipeline::Pipeline;
use crate::transport::OutboundRequest;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_up(&self, input: &SignUpInput) -> Result<Credentials>;
    async fn sign_in(&self, input: &SignInInput) -> Result<Credentials>;
    /// Invalidate the credential currently held in storage.
    async fn logout(&self) -> Result<()>;
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<Credentials>;
}

/// Auth mutations over GraphQL.
///
/// The pipeline given here must not end the session on unauthorized
/// responses: a rejected sign-in is an authentication failure, and a rejected
/// logout is already on its way out.
pub struct GraphqlAuthApi {
    pipeline: Pipeline,
}

impl GraphqlAuthApi {
    pub const fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl AuthApi for GraphqlAuthApi {
    async fn sign_up(&self, input: &SignUpInput) -> Result<Credentials> {
        let request = GraphqlRequest::new(SIGN_UP, "SignUp").variable("input", input)?;
        self.pipeline.fetch(request, "signUp").await
    }

    async fn sign_in(&self, input: &SignInInput) -> Result<Credentials> {
        let request = GraphqlRequest::new(SIGN_IN, "SignIn").variable("input", input)?;
        self.pipeline.fetch(request, "signIn").await
    }

    async fn logout(&self) -> Result<()> {
        let acknowledged: bool = self
            .pipeline
            .fetch(GraphqlRequest::new(LOGOUT, "Logout"), "logout")
            .await?;
        if !acknowledged {
            tracing::debug!("Server did not acknowledge logout");
        }
        Ok(())
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<Credentials> {
        let mut request =
            OutboundRequest::new(GraphqlRequest::new(REFRESH_TOKENS, "RefreshTokens"));
        request.set_bearer(refresh_token)?;
        let data = self.pipeline.execute(request).await?;
        take_field(data, "refreshTokens")
    }
}
