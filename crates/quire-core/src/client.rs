//! Wiring of session, pipelines and typed operations over one transport.

use std::sync::Arc;

use crate::api::Api;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::pipeline::{BearerAuth, LogoutOnUnauthorized, Pipeline, StoredAccessToken};
use crate::session::{GraphqlAuthApi, SessionManager};
use crate::storage::TokenStore;
use crate::transport::{HttpTransport, Transport};

#[derive(Clone)]
pub struct Client {
    session: Arc<SessionManager>,
    api: Api,
}

impl Client {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::debug!(endpoint = transport.endpoint(), "Client configured");
        Ok(Self::with_transport(Arc::new(transport), store))
    }

    /// Build a client over any transport.
    ///
    /// The auth mutations get their own pipeline without the logout stage;
    /// everything else goes through bearer auth and logout-on-unauthorized.
    pub fn with_transport(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
        let auth_pipeline = Pipeline::new(transport.clone())
            .with(BearerAuth::new(StoredAccessToken(store.clone())));
        let session = Arc::new(SessionManager::new(
            store,
            Arc::new(GraphqlAuthApi::new(auth_pipeline)),
        ));

        let pipeline = Pipeline::new(transport)
            .with(BearerAuth::new(session.clone()))
            .with(LogoutOnUnauthorized::new(session.clone()));

        Self {
            session,
            api: Api::new(pipeline),
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub const fn api(&self) -> &Api {
        &self.api
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Client")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
