use fixtures::{restored_store, spy_store, store_over};
use googletest::{
    assert_that,
    prelude::{eq, none},
};
use healthdata_session::{SessionState, SessionStorage, SessionStore};
use healthdata_session_memory_store::InMemorySessionStore;

mod login;
mod logout;
mod restore;

static_assertions::assert_impl_all!(SessionStore: Send, Sync);
static_assertions::assert_impl_all!(SessionStorage: Send, Sync);

#[test]
fn a_new_store_is_uninitialized_and_does_not_touch_storage() {
    let (store, call_tracker) = spy_store();

    assert_that!(store.state(), eq(&SessionState::Uninitialized));
    assert!(!store.is_ready());
    assert!(!store.is_authenticated());
    assert_that!(store.identity(), none());

    call_tracker.assert_storage_was_untouched();
}

#[test]
fn the_storage_key_is_namespaced() {
    let (store, _) = restored_store();
    assert_that!(store.storage_key(), eq("healthdata.session"));
}

#[test]
fn the_namespace_can_be_configured() {
    let backend = InMemorySessionStore::new();
    let mut config = healthdata_session::SessionConfig::default();
    config.namespace = "ward-7".into();

    let mut store = SessionStore::new(SessionStorage::new(backend.clone()), &config);
    store.restore();
    store
        .login("P1001", "pw", Some(healthdata_session::Role::Doctor))
        .unwrap();

    assert_that!(store.storage_key(), eq("ward-7.session"));
    // A store using the default namespace doesn't see the session.
    let mut other = store_over(&backend);
    assert_that!(other.restore(), eq(&SessionState::Anonymous));
}

#[test]
fn a_doctor_logs_in_and_an_incomplete_staff_login_is_rejected() {
    let (mut store, _) = restored_store();

    let identity = store
        .login("P1001", "anything", "doctor".parse().ok())
        .unwrap();
    assert_that!(identity.id(), eq("P1001"));

    store.logout().unwrap();
    assert!(store.login("", "x", "staff".parse().ok()).is_err());
    assert_that!(store.state(), eq(&SessionState::Anonymous));
}
