//! Tests for the restoration of a persisted session.
use crate::fixtures::{BrokenBackend, SESSION_KEY, restored_store, spy_store, store_over};
use googletest::{
    assert_that,
    prelude::{eq, none, some},
};
use healthdata_session::storage::SessionStorageBackend;
use healthdata_session::{Role, SessionConfig, SessionState, SessionStorage, SessionStore};
use healthdata_session_memory_store::InMemorySessionStore;

fn restore_from(raw: &str) -> SessionState {
    let backend = InMemorySessionStore::new();
    backend.store(SESSION_KEY, raw).unwrap();
    let mut store = store_over(&backend);
    store.restore().to_owned()
}

#[test]
fn restoring_without_a_persisted_session_yields_anonymous() {
    let (mut store, call_tracker) = spy_store();

    assert_that!(store.restore(), eq(&SessionState::Anonymous));
    assert!(store.is_ready());
    assert_that!(
        call_tracker.operation_log(),
        eq(&vec![format!("load {SESSION_KEY}")])
    );
}

#[test]
fn a_well_formed_record_is_restored() {
    let state = restore_from(r#"{"id":"P1001","name":"Dr. P1001","role":"doctor"}"#);

    let identity = state.identity().unwrap();
    assert_that!(identity.id(), eq("P1001"));
    assert_that!(identity.name(), eq("Dr. P1001"));
    assert_that!(identity.role(), eq(Role::Doctor));
}

#[test]
fn the_persisted_name_is_kept_as_is() {
    let state = restore_from(r#"{"id":"S1","name":"Nurse Joy","role":"staff"}"#);

    let identity = state.identity().unwrap();
    assert_that!(identity.name(), eq("Nurse Joy"));
    assert_that!(identity.role(), eq(Role::Staff));
}

#[test]
fn non_json_data_yields_anonymous() {
    assert_that!(restore_from("definitely not json"), eq(&SessionState::Anonymous));
    assert_that!(restore_from(""), eq(&SessionState::Anonymous));
    assert_that!(restore_from("{"), eq(&SessionState::Anonymous));
}

#[test]
fn records_with_the_wrong_shape_yield_anonymous() {
    let malformed = [
        // Not an object
        r#"["P1001","Dr. P1001","doctor"]"#,
        r#""P1001""#,
        "null",
        // Missing fields
        r#"{"id":"P1001","role":"doctor"}"#,
        r#"{"name":"Dr. P1001","role":"doctor"}"#,
        r#"{"id":"P1001","name":"Dr. P1001"}"#,
        // A null role means "no session"
        r#"{"id":"P1001","name":"Dr. P1001","role":null}"#,
        // Unknown roles
        r#"{"id":"P1001","name":"Dr. P1001","role":"admin"}"#,
        r#"{"id":"P1001","name":"Dr. P1001","role":"Doctor"}"#,
        // Wrong types
        r#"{"id":1001,"name":"Dr. P1001","role":"doctor"}"#,
        // Empty values
        r#"{"id":"","name":"Dr. ","role":"doctor"}"#,
        r#"{"id":"P1001","name":"","role":"doctor"}"#,
        // Unexpected fields
        r#"{"id":"P1001","name":"Dr. P1001","role":"doctor","admin":true}"#,
    ];
    for raw in malformed {
        assert_that!(restore_from(raw), eq(&SessionState::Anonymous));
    }
}

#[test]
fn a_record_laid_out_as_an_array_is_not_a_session() {
    let (mut writer, backend) = restored_store();
    writer.login("P1001", "pw", Some(Role::Doctor)).unwrap();
    // Same values, same order, but not an object.
    backend
        .store(SESSION_KEY, r#"["P1001","Dr. P1001","doctor"]"#)
        .unwrap();

    let mut store = store_over(&backend);
    assert_that!(store.restore(), eq(&SessionState::Anonymous));
    assert_that!(store.identity(), none());
}

#[test]
fn a_storage_failure_yields_anonymous() {
    let mut store = SessionStore::new(
        SessionStorage::new(BrokenBackend),
        &SessionConfig::default(),
    );

    assert_that!(store.restore(), eq(&SessionState::Anonymous));
    assert!(store.is_ready());
}

#[test]
fn restore_only_happens_once() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend);
    assert_that!(store.restore(), eq(&SessionState::Anonymous));

    // Another process logs in on the same profile...
    let mut other = store_over(&backend);
    other.restore();
    other.login("P1001", "pw", Some(Role::Doctor)).unwrap();

    // ...but restoring again doesn't pick it up.
    assert_that!(store.restore(), eq(&SessionState::Anonymous));
    assert_that!(store.identity(), none());
}

#[test]
fn a_login_survives_a_restart() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend);
    store.restore();
    let logged_in = store.login("S2002", "secret", Some(Role::Staff)).unwrap();

    // A fresh process over the same profile.
    let mut restarted = store_over(&backend);
    restarted.restore();

    assert_that!(restarted.identity(), some(eq(&logged_in)));
}

#[test]
fn a_logout_survives_a_restart() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend);
    store.restore();
    store.login("S2002", "secret", Some(Role::Staff)).unwrap();
    store.logout().unwrap();

    let mut restarted = store_over(&backend);
    assert_that!(restarted.restore(), eq(&SessionState::Anonymous));
}
