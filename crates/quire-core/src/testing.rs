//! Scripted doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::graphql::{GraphqlError, GraphqlErrors};
use crate::session::{AuthApi, Credentials, SignInInput, SignUpInput};
use crate::storage::{MemoryTokenStore, TokenStore};
use crate::transport::{OutboundRequest, Transport};

pub enum Reply {
    Data(Value),
    GraphqlErrors(Vec<GraphqlError>),
    UnauthorizedStatus,
    Network(String),
}

impl Reply {
    pub const fn data(value: Value) -> Self {
        Self::Data(value)
    }

    pub fn graphql_errors(errors: Vec<(&str, Option<&str>)>) -> Self {
        Self::GraphqlErrors(
            errors
                .into_iter()
                .map(|(message, code)| match code {
                    Some(code) => GraphqlError::with_code(message, code),
                    None => GraphqlError::new(message),
                })
                .collect(),
        )
    }

    pub fn network(message: &str) -> Self {
        Self::Network(message.to_string())
    }

    fn into_result(self) -> Result<Value> {
        match self {
            Self::Data(value) => Ok(value),
            Self::GraphqlErrors(errors) => Err(Error::Graphql(GraphqlErrors::from(errors))),
            Self::UnauthorizedStatus => Err(Error::Unauthorized("HTTP 401".to_string())),
            Self::Network(message) => Err(Error::Transport(message)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation_name: &'static str,
    pub authorization: Option<String>,
    pub header_names: Vec<String>,
    pub variables: Map<String, Value>,
}

/// Transport that replays canned replies in order and records what was sent.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<Value> {
        self.sent.lock().unwrap().push(RecordedRequest {
            operation_name: request.operation_name(),
            authorization: request
                .headers
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            header_names: request
                .headers
                .keys()
                .map(|name| name.as_str().to_string())
                .collect(),
            variables: request.body.variables.clone(),
        });
        let reply = self.replies.lock().unwrap().pop_front();
        reply.map_or_else(
            || Err(Error::Transport("no scripted reply left".to_string())),
            Reply::into_result,
        )
    }
}

/// Auth API double: hands out credentials unless told to fail.
#[derive(Default)]
pub struct ScriptedAuthApi {
    credentials: Mutex<VecDeque<Result<Credentials>>>,
    logout_failures: Mutex<VecDeque<Error>>,
    logout_calls: AtomicUsize,
    sign_in_calls: AtomicUsize,
}

impl ScriptedAuthApi {
    pub fn issuing(credentials: impl IntoIterator<Item = Result<Credentials>>) -> Self {
        Self {
            credentials: Mutex::new(credentials.into_iter().collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_logout(self, error: Error) -> Self {
        self.logout_failures.lock().unwrap().push_back(error);
        self
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    fn next_credentials(&self) -> Result<Credentials> {
        self.credentials
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(credentials("access-token", "refresh-token")))
    }
}

#[async_trait]
impl AuthApi for ScriptedAuthApi {
    async fn sign_up(&self, _input: &SignUpInput) -> Result<Credentials> {
        self.next_credentials()
    }

    async fn sign_in(&self, _input: &SignInInput) -> Result<Credentials> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.next_credentials()
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        match self.logout_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn refresh_tokens(&self, _refresh_token: &str) -> Result<Credentials> {
        self.next_credentials()
    }
}

pub fn credentials(access: &str, refresh: &str) -> Credentials {
    Credentials {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

/// Memory store whose `set` fails for one chosen key, and optionally every `remove`.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryTokenStore,
    fail_set_for: Mutex<Option<&'static str>>,
    fail_remove: AtomicBool,
}

impl FlakyStore {
    pub fn fail_set_for(&self, key: &'static str) {
        *self.fail_set_for.lock().unwrap() = Some(key);
    }

    pub fn fail_removals(&self) {
        self.fail_remove.store(true, Ordering::SeqCst);
    }
}

impl TokenStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.fail_set_for.lock().unwrap() == Some(key) {
            return Err(Error::Storage(format!("refusing to write {key}")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!("refusing to remove {key}")));
        }
        self.inner.remove(key)
    }
}
