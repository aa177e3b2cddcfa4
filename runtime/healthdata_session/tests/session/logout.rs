//! Tests for [`SessionStore::logout`].
use crate::fixtures::{ReadOnlyBackend, SESSION_KEY, restored_store, spy_store, store_over};
use googletest::{
    assert_that,
    prelude::{eq, none, some},
};
use healthdata_session::errors::LogoutError;
use healthdata_session::storage::SessionStorageBackend;
use healthdata_session::{Role, SessionConfig, SessionState, SessionStorage, SessionStore};
use healthdata_session_memory_store::InMemorySessionStore;

#[test]
fn logout_clears_state_and_storage() {
    let (mut store, backend) = restored_store();
    store.login("P1001", "pw", Some(Role::Doctor)).unwrap();

    store.logout().unwrap();

    assert_that!(store.state(), eq(&SessionState::Anonymous));
    assert_that!(backend.load(SESSION_KEY).unwrap(), none());
}

#[test]
fn logout_is_idempotent() {
    let (mut store, backend) = restored_store();

    store.logout().unwrap();
    store.logout().unwrap();

    assert_that!(store.state(), eq(&SessionState::Anonymous));
    assert!(backend.is_empty());
}

#[test]
fn logout_clears_an_unreadable_record() {
    let backend = InMemorySessionStore::new();
    backend.store(SESSION_KEY, "garbage").unwrap();
    let mut store = store_over(&backend);
    store.restore();

    store.logout().unwrap();

    assert_that!(store.state(), eq(&SessionState::Anonymous));
    assert!(backend.is_empty());
}

#[test]
fn logout_deletes_the_persisted_session() {
    let (mut store, call_tracker) = spy_store();
    store.restore();

    store.logout().unwrap();

    assert_that!(
        call_tracker.operation_log(),
        eq(&vec![format!("load {SESSION_KEY}"), format!("delete {SESSION_KEY}")])
    );
}

#[test]
fn logout_before_restore_is_refused() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend);

    assert!(matches!(store.logout(), Err(LogoutError::NotReady)));
    assert_that!(store.state(), eq(&SessionState::Uninitialized));
}

#[test]
fn a_storage_failure_keeps_the_user_logged_in() {
    let backend = InMemorySessionStore::new();
    let mut writer = store_over(&backend);
    writer.restore();
    let doctor = writer.login("P1001", "pw", Some(Role::Doctor)).unwrap();

    let mut store = SessionStore::new(
        SessionStorage::new(ReadOnlyBackend(backend.clone())),
        &SessionConfig::default(),
    );
    store.restore();

    assert!(matches!(store.logout(), Err(LogoutError::Storage(_))));
    assert_that!(store.identity(), some(eq(&doctor)));
    assert!(backend.load(SESSION_KEY).unwrap().is_some());
}
