use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::graphql::GraphqlError;
use crate::storage::MemoryTokenStore;
use crate::testing::{credentials, FlakyStore, ScriptedAuthApi};

fn manager(store: &Arc<MemoryTokenStore>, remote: &Arc<ScriptedAuthApi>) -> SessionManager {
    SessionManager::new(store.clone(), remote.clone())
}

#[tokio::test]
async fn sign_in_persists_tokens_across_instances() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([Ok(credentials("A", "R"))]));
    let session = manager(&store, &remote);
    assert!(!session.is_authenticated());

    let issued = session.sign_in("ada@example.com", "hunter2").await.unwrap();

    assert_eq!(issued, credentials("A", "R"));
    assert_eq!(session.access_token().as_deref(), Some("A"));
    assert_eq!(session.refresh_token().as_deref(), Some("R"));
    assert!(session.is_authenticated());

    let reopened = manager(&store, &remote);
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.access_token().as_deref(), Some("A"));
}

#[tokio::test]
async fn sign_up_starts_session() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);

    session
        .sign_up("ada@example.com", "hunter2", "Ada")
        .await
        .unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.access_token().as_deref(), Some("access-token"));
}

#[tokio::test]
async fn logout_clears_state_even_when_remote_fails() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(
        ScriptedAuthApi::default().failing_logout(Error::Transport("offline".to_string())),
    );
    let session = manager(&store, &remote);
    session.sign_in("ada@example.com", "hunter2").await.unwrap();

    session.logout().await;

    assert_eq!(remote.logout_calls(), 1);
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert!(!session.is_authenticated());
    assert!(!manager(&store, &remote).is_authenticated());
}

#[tokio::test]
async fn logout_twice_is_harmless() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);
    session.sign_in("ada@example.com", "hunter2").await.unwrap();

    session.logout().await;
    assert!(!session.is_authenticated());

    session.logout().await;
    assert!(!session.is_authenticated());
    assert_eq!(session.access_token(), None);
    // Nothing left to invalidate on the second call.
    assert_eq!(remote.logout_calls(), 1);
}

#[tokio::test]
async fn rejected_sign_in_leaves_prior_session_intact() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([
        Ok(credentials("A", "R")),
        Err(Error::Graphql(
            vec![GraphqlError::new("Invalid credentials")].into(),
        )),
    ]));
    let session = manager(&store, &remote);
    session.sign_in("ada@example.com", "hunter2").await.unwrap();

    let error = session
        .sign_in("ada@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(
        matches!(error, Error::Authentication(ref message) if message == "Invalid credentials")
    );
    assert!(session.is_authenticated());
    assert_eq!(session.access_token().as_deref(), Some("A"));
}

#[tokio::test]
async fn transport_failure_on_sign_in_is_not_an_authentication_failure() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([Err(Error::Transport(
        "connection refused".to_string(),
    ))]));
    let session = manager(&store, &remote);

    let error = session
        .sign_in("ada@example.com", "hunter2")
        .await
        .unwrap_err();

    assert!(error.is_transport());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn blank_credentials_never_reach_the_server() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);

    assert!(matches!(
        session.sign_in("  ", "hunter2").await,
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        session.sign_in("ada@example.com", " ").await,
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        session.sign_up("ada@example.com", "hunter2", "").await,
        Err(Error::InvalidInput(_))
    ));
    assert_eq!(remote.sign_in_calls(), 0);
}

#[tokio::test]
async fn failed_second_write_restores_previous_pair() {
    let store = Arc::new(FlakyStore::default());
    store.inner.set(ACCESS_TOKEN_KEY, "old-access").unwrap();
    store.inner.set(REFRESH_TOKEN_KEY, "old-refresh").unwrap();
    let remote = Arc::new(ScriptedAuthApi::issuing([Ok(credentials("new", "new"))]));
    let session = SessionManager::new(store.clone(), remote);
    store.fail_set_for(REFRESH_TOKEN_KEY);

    let error = session
        .sign_in("ada@example.com", "hunter2")
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Storage(_)));
    assert_eq!(session.access_token().as_deref(), Some("old-access"));
    assert_eq!(session.refresh_token().as_deref(), Some("old-refresh"));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn failed_write_on_fresh_store_leaves_nothing_behind() {
    let store = Arc::new(FlakyStore::default());
    store.fail_set_for(REFRESH_TOKEN_KEY);
    let session = SessionManager::new(store.clone(), Arc::new(ScriptedAuthApi::default()));

    assert!(session.sign_in("ada@example.com", "hunter2").await.is_err());

    assert_eq!(store.inner.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_blanks_tokens_when_removal_fails() {
    let store = Arc::new(FlakyStore::default());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = SessionManager::new(store.clone(), remote.clone());
    session.sign_in("ada@example.com", "hunter2").await.unwrap();
    store.fail_removals();

    session.logout().await;

    assert!(!session.is_authenticated());
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert!(!SessionManager::new(store, remote).is_authenticated());
}

#[tokio::test]
async fn logout_flag_tracks_storage_when_token_cannot_be_cleared() {
    let store = Arc::new(FlakyStore::default());
    let session = SessionManager::new(store.clone(), Arc::new(ScriptedAuthApi::default()));
    session.sign_in("ada@example.com", "hunter2").await.unwrap();
    store.fail_removals();
    store.fail_set_for(ACCESS_TOKEN_KEY);
    let mut events = session.subscribe();

    session.logout().await;

    assert_eq!(session.access_token().as_deref(), Some("access-token"));
    assert!(session.is_authenticated());
    assert!(events.recv().await.unwrap());
}

#[tokio::test]
async fn failed_restore_that_flips_the_flag_is_announced() {
    let store = Arc::new(FlakyStore::default());
    store.fail_set_for(REFRESH_TOKEN_KEY);
    store.fail_removals();
    let session = SessionManager::new(store.clone(), Arc::new(ScriptedAuthApi::default()));
    let mut events = session.subscribe();

    assert!(session.sign_in("ada@example.com", "hunter2").await.is_err());

    // The new access token could not be rolled back.
    assert_eq!(session.access_token().as_deref(), Some("access-token"));
    assert!(session.is_authenticated());
    assert!(events.recv().await.unwrap());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn failed_write_with_clean_rollback_emits_nothing() {
    let store = Arc::new(FlakyStore::default());
    store.fail_set_for(REFRESH_TOKEN_KEY);
    let session = SessionManager::new(store.clone(), Arc::new(ScriptedAuthApi::default()));
    let mut events = session.subscribe();

    assert!(session.sign_in("ada@example.com", "hunter2").await.is_err());

    assert!(!session.is_authenticated());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn empty_access_token_from_server_is_rejected() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([Ok(credentials("", "R"))]));
    let session = manager(&store, &remote);

    let error = session
        .sign_in("ada@example.com", "hunter2")
        .await
        .unwrap_err();

    assert!(matches!(error, Error::MalformedResponse(_)));
    assert!(!session.is_authenticated());
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn subscribers_see_one_event_per_mutation() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);
    let mut events = session.subscribe();

    session.sign_in("ada@example.com", "hunter2").await.unwrap();
    session.logout().await;
    session.logout().await;

    assert!(events.recv().await.unwrap());
    assert!(!events.recv().await.unwrap());
    assert!(!events.recv().await.unwrap());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn failed_sign_in_emits_nothing() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([Err(Error::Transport(
        "offline".to_string(),
    ))]));
    let session = manager(&store, &remote);
    let mut events = session.subscribe();

    assert!(session.sign_in("ada@example.com", "hunter2").await.is_err());

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn refresh_rotates_tokens() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([
        Ok(credentials("A1", "R1")),
        Ok(credentials("A2", "R2")),
    ]));
    let session = manager(&store, &remote);
    session.sign_in("ada@example.com", "hunter2").await.unwrap();

    let rotated = session.refresh_tokens().await.unwrap();

    assert_eq!(rotated, credentials("A2", "R2"));
    assert_eq!(session.access_token().as_deref(), Some("A2"));
    assert_eq!(session.refresh_token().as_deref(), Some("R2"));
}

#[tokio::test]
async fn refresh_without_session_is_refused() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);

    assert!(matches!(
        session.refresh_tokens().await,
        Err(Error::NotSignedIn)
    ));
}

#[tokio::test]
async fn concurrent_sign_ins_leave_consistent_state() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::issuing([
        Ok(credentials("first", "first-r")),
        Ok(credentials("second", "second-r")),
    ]));
    let session = Arc::new(manager(&store, &remote));

    let (left, right) = tokio::join!(
        session.sign_in("ada@example.com", "hunter2"),
        session.sign_in("ada@example.com", "hunter2"),
    );
    left.unwrap();
    right.unwrap();

    let access = session.access_token().unwrap();
    let refresh = session.refresh_token().unwrap();
    assert_eq!(format!("{access}-r"), refresh);
    assert!(session.is_authenticated());
}

#[test]
fn require_authenticated_guards_signed_out_session() {
    let store = Arc::new(MemoryTokenStore::new());
    let remote = Arc::new(ScriptedAuthApi::default());
    let session = manager(&store, &remote);
    assert!(matches!(
        require_authenticated(&session),
        Err(Error::NotSignedIn)
    ));

    store.set(ACCESS_TOKEN_KEY, "A").unwrap();
    assert!(require_authenticated(&manager(&store, &remote)).is_ok());
}

#[test]
fn blank_stored_token_does_not_count_as_signed_in() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(ACCESS_TOKEN_KEY, "   ").unwrap();
    let session = manager(&store, &Arc::new(ScriptedAuthApi::default()));
    assert!(!session.is_authenticated());
    assert_eq!(session.access_token(), None);
}

#[test]
fn credentials_debug_redacts_tokens() {
    let rendered = format!("{:?}", credentials("secret-access", "secret-refresh"));
    assert!(!rendered.contains("secret-access"));
    assert!(!rendered.contains("secret-refresh"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn sign_in_input_debug_redacts_password() {
    let input = SignInInput {
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    let rendered = format!("{input:?}");
    assert!(rendered.contains("ada@example.com"));
    assert!(!rendered.contains("hunter2"));
}
