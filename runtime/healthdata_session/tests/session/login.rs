//! Tests for [`SessionStore::login`].
use crate::fixtures::{ReadOnlyBackend, SESSION_KEY, restored_store, spy_store, store_over};
use googletest::{
    assert_that,
    prelude::{eq, none, some},
};
use healthdata_session::errors::{LoginError, ValidationError};
use healthdata_session::storage::SessionStorageBackend;
use healthdata_session::{
    CredentialVerifier, Credentials, Role, SessionConfig, SessionState, SessionStorage,
    SessionStore, VerificationError,
};
use healthdata_session_memory_store::InMemorySessionStore;

#[test]
fn any_non_empty_password_is_accepted() {
    for password in ["anything", "x", " ", "🔑"] {
        let (mut store, _) = restored_store();
        let identity = store.login("P1001", password, Some(Role::Doctor)).unwrap();

        assert_that!(identity.id(), eq("P1001"));
        assert_that!(identity.name(), eq("Dr. P1001"));
        assert_that!(identity.role(), eq(Role::Doctor));
        assert_that!(store.identity(), some(eq(&identity)));
    }
}

#[test]
fn a_successful_login_is_persisted_before_returning() {
    let (mut store, backend) = restored_store();

    store.login("S20029999", "pw", Some(Role::Staff)).unwrap();

    let persisted: serde_json::Value =
        serde_json::from_str(&backend.load(SESSION_KEY).unwrap().unwrap()).unwrap();
    assert_that!(
        persisted,
        eq(&serde_json::json!({
            "id": "S20029999",
            "name": "Staff S2002",
            "role": "staff"
        }))
    );
}

#[test]
fn login_touches_storage_exactly_once() {
    let (mut store, call_tracker) = spy_store();
    store.restore();

    store.login("P1001", "pw", Some(Role::Doctor)).unwrap();

    assert_that!(
        call_tracker.operation_log(),
        eq(&vec![format!("load {SESSION_KEY}"), format!("store {SESSION_KEY}")])
    );
}

#[test]
fn incomplete_credentials_are_rejected() {
    let cases = [
        ("", "pw", Some(Role::Doctor), ValidationError::MissingId),
        ("P1001", "", Some(Role::Doctor), ValidationError::MissingPassword),
        ("P1001", "pw", None, ValidationError::MissingRole),
        ("", "", None, ValidationError::MissingRole),
        ("", "x", Some(Role::Staff), ValidationError::MissingId),
    ];
    for (id, password, role, expected) in cases {
        let (mut store, backend) = restored_store();

        let outcome = store.login(id, password, role);

        let Err(LoginError::Validation(e)) = outcome else {
            panic!("Expected a validation error for {id:?}/{password:?}/{role:?}, got {outcome:?}");
        };
        assert_that!(e, eq(expected));
        assert_that!(store.state(), eq(&SessionState::Anonymous));
        assert!(backend.is_empty());
    }
}

#[test]
fn validation_messages_match_the_login_form() {
    assert_that!(
        ValidationError::MissingRole.to_string(),
        eq("Please select a role")
    );
    assert_that!(
        ValidationError::MissingId.to_string(),
        eq("Please enter your ID and password")
    );
    assert_that!(
        ValidationError::MissingPassword.to_string(),
        eq("Please enter your ID and password")
    );
}

#[test]
fn a_failed_login_leaves_the_current_session_untouched() {
    let (mut store, backend) = restored_store();
    let doctor = store.login("P1001", "pw", Some(Role::Doctor)).unwrap();

    assert!(store.login("", "pw", Some(Role::Staff)).is_err());

    assert_that!(store.identity(), some(eq(&doctor)));
    let mut restarted = store_over(&backend);
    restarted.restore();
    assert_that!(restarted.identity(), some(eq(&doctor)));
}

#[test]
fn logging_in_again_replaces_the_identity() {
    let (mut store, backend) = restored_store();
    store.login("P1001", "pw", Some(Role::Doctor)).unwrap();
    let staff = store.login("S2002", "pw", Some(Role::Staff)).unwrap();

    assert_that!(store.identity(), some(eq(&staff)));
    let mut restarted = store_over(&backend);
    restarted.restore();
    assert_that!(restarted.identity(), some(eq(&staff)));
}

#[test]
fn login_before_restore_is_refused() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend);

    let outcome = store.login("P1001", "pw", Some(Role::Doctor));

    assert!(matches!(outcome, Err(LoginError::NotReady)));
    assert_that!(store.state(), eq(&SessionState::Uninitialized));
    assert!(backend.is_empty());
}

#[test]
fn a_storage_failure_fails_the_login() {
    let backend = InMemorySessionStore::new();
    let mut store = SessionStore::new(
        SessionStorage::new(ReadOnlyBackend(backend.clone())),
        &SessionConfig::default(),
    );
    store.restore();

    let outcome = store.login("P1001", "pw", Some(Role::Doctor));

    assert!(matches!(outcome, Err(LoginError::Storage(_))));
    assert_that!(store.identity(), none());
    assert!(backend.is_empty());
}

#[derive(Debug)]
struct OnlyPassword(&'static str);

impl CredentialVerifier for OnlyPassword {
    fn verify(&self, credentials: &Credentials<'_>) -> Result<(), VerificationError> {
        if credentials.password.expose_secret() == self.0 {
            Ok(())
        } else {
            Err(VerificationError::InvalidCredentials)
        }
    }
}

#[test]
fn the_credential_verifier_can_be_swapped() {
    let backend = InMemorySessionStore::new();
    let mut store = store_over(&backend).with_verifier(OnlyPassword("open sesame"));
    store.restore();

    let outcome = store.login("P1001", "wrong", Some(Role::Doctor));
    assert!(matches!(
        outcome,
        Err(LoginError::Rejected(VerificationError::InvalidCredentials))
    ));
    assert_that!(store.state(), eq(&SessionState::Anonymous));
    assert!(backend.is_empty());

    store.login("P1001", "open sesame", Some(Role::Doctor)).unwrap();
    assert!(store.is_authenticated());
}

#[test]
fn the_verifier_is_not_consulted_for_incomplete_credentials() {
    #[derive(Debug)]
    struct Unreachable;

    impl CredentialVerifier for Unreachable {
        fn verify(&self, _credentials: &Credentials<'_>) -> Result<(), VerificationError> {
            panic!("The verifier should not have been called")
        }
    }

    let (store, _) = restored_store();
    let mut store = store.with_verifier(Unreachable);
    assert!(store.login("P1001", "", Some(Role::Doctor)).is_err());
}

#[test]
fn passwords_are_redacted_in_debug_output() {
    let password = redact::Secret::new("hunter2".to_owned());
    let credentials = Credentials {
        id: "P1001",
        password: &password,
        role: Role::Doctor,
    };
    assert!(!format!("{credentials:?}").contains("hunter2"));
}
