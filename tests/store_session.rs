mod common;

use agrisync::api::{ApiError, NETWORK_ERROR_MESSAGE};
use agrisync::resource::Animal;
use agrisync::session::{AuthIntent, NavigationGate, SubscriptionTier, ROOT_KEY};
use agrisync::slice::LoadState;
use agrisync::storage::KeyValueStorage;
use agrisync::validation::{LoginForm, RegistrationForm};
use serde_json::json;

use common::mock_backend::{MockBackend, MockResponse};
use common::{animal_json, auth_json, session, store_for, store_with_failing, user_json};

#[tokio::test]
async fn login_success_authenticates_and_persists() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);
    assert_eq!(store.gate(), NavigationGate::Unauthenticated);

    mock.enqueue_response(MockResponse::data(auth_json("tok-login")))
        .await;

    let session = store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap();
    assert_eq!(session.token().expose(), "tok-login");
    assert_eq!(session.subscription(), SubscriptionTier::Basic);
    assert_eq!(store.gate(), NavigationGate::Authenticated);

    let raw = storage.get(ROOT_KEY).unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted["auth"]["session"]["token"], "tok-login");

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/auth/login");
    assert_eq!(
        requests[0].body_json(),
        json!({ "email": "amina@example.com", "password": "goats2024" })
    );
}

#[tokio::test]
async fn invalid_credentials_keep_session_absent() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);

    mock.enqueue_response(MockResponse::error(401, "Invalid credentials"))
        .await;

    let err = store
        .login(&LoginForm::new("amina@example.com", "wrong-pass1"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid credentials");

    let auth = store.select(|s| s.auth.clone());
    assert!(auth.session.is_none());
    assert!(!auth.loading);
    assert_eq!(auth.error.as_deref(), Some("Invalid credentials"));
    assert!(!storage.contains(ROOT_KEY));
}

#[tokio::test]
async fn invalid_form_never_reaches_network() {
    let mock = MockBackend::start().await;
    let (store, _) = store_for(&mock);

    let err = store
        .login(&LoginForm::new("not-an-email", ""))
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(errors) => {
            assert!(errors.get("email").is_some());
            assert!(errors.get("password").is_some());
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn empty_token_from_server_is_not_a_session() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);

    mock.enqueue_response(MockResponse::data(auth_json(""))).await;

    let err = store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "parse_error");
    assert!(store.session().is_none());
    assert!(!storage.contains(ROOT_KEY));
}

#[tokio::test]
async fn register_sends_profile_fields() {
    let mock = MockBackend::start().await;
    let (store, _) = store_for(&mock);

    mock.enqueue_response(MockResponse::data(auth_json("tok-new")))
        .await;

    let form = RegistrationForm {
        name: "Amina Wanjiru".into(),
        email: "amina@example.com".into(),
        password: "goats2024".into(),
        confirm_password: "goats2024".into(),
        farm_name: "Green Hill".into(),
        phone: Some("+254 712 345678".into()),
    };
    let session = store.register(&form).await.unwrap();
    assert_eq!(session.farm_name(), "Green Hill");

    let body = mock.captured_requests().await[0].body_json();
    assert_eq!(body["farmName"], "Green Hill");
    assert_eq!(body["phone"], "+254 712 345678");
    assert!(body.get("confirmPassword").is_none());
}

#[tokio::test]
async fn load_user_refreshes_profile() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);
    store
        .dispatch_auth(AuthIntent::Authenticated { session: session() })
        .unwrap();

    let mut upgraded = user_json();
    upgraded["subscription"] = json!("premium");
    mock.enqueue_response(MockResponse::data(json!({ "user": upgraded })))
        .await;

    let user = store.load_user().await.unwrap().unwrap();
    assert_eq!(user.subscription, SubscriptionTier::Premium);

    let session = store.session().unwrap();
    assert_eq!(session.token().expose(), "tok-abc");
    assert_eq!(session.subscription(), SubscriptionTier::Premium);

    let raw = storage.get(ROOT_KEY).unwrap().unwrap();
    assert!(raw.contains("premium"));

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].path, "/api/auth/me");
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok-abc"));
}

#[tokio::test]
async fn load_user_401_clears_session() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);
    store
        .dispatch_auth(AuthIntent::Authenticated { session: session() })
        .unwrap();

    mock.enqueue_response(MockResponse::data(json!([animal_json("a1", "Bessie")])))
        .await;
    mock.enqueue_response(MockResponse::error(401, "Token expired"))
        .await;

    store.fetch::<Animal>(&[]).await.unwrap();
    store.load_user().await.unwrap_err();
    assert!(store.session().is_none());
    assert_eq!(store.gate(), NavigationGate::Unauthenticated);
    assert!(!storage.contains(ROOT_KEY));

    let animals = store.slice::<Animal>();
    assert!(animals.is_empty());
    assert_eq!(animals.status, LoadState::Idle);
}

#[tokio::test]
async fn load_user_server_error_keeps_session() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);
    store
        .dispatch_auth(AuthIntent::Authenticated { session: session() })
        .unwrap();

    mock.enqueue_response(MockResponse::raw(500, "oops")).await;

    store.load_user().await.unwrap_err();
    assert!(store.session().is_some());
    assert!(storage.contains(ROOT_KEY));
    assert_eq!(
        store.select(|s| s.auth.error.clone()).as_deref(),
        Some(NETWORK_ERROR_MESSAGE)
    );
}

#[tokio::test]
async fn load_user_without_session_sends_nothing() {
    let mock = MockBackend::start().await;
    let (store, _) = store_for(&mock);
    assert!(store.load_user().await.unwrap().is_none());
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn logout_clears_memory_storage_and_slices() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_for(&mock);

    mock.enqueue_response(MockResponse::data(auth_json("tok-login")))
        .await;
    mock.enqueue_response(MockResponse::data(json!([animal_json("a1", "Bessie")])))
        .await;

    store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap();
    store.fetch::<Animal>(&[]).await.unwrap();

    store.logout().unwrap();

    assert!(store.session().is_none());
    assert!(!storage.contains(ROOT_KEY));
    let animals = store.slice::<Animal>();
    assert!(animals.is_empty());
    assert_eq!(animals.status, LoadState::Idle);

    // Restart against the same storage.
    let restarted = common::store_with(&mock.base_url(), std::sync::Arc::new(storage.clone()));
    assert!(restarted.rehydrate().unwrap().is_none());
    assert_eq!(restarted.gate(), NavigationGate::Unauthenticated);
}

#[tokio::test]
async fn login_with_unwritable_storage_stays_signed_out() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_with_failing(&mock);
    storage.fail_set(true);

    mock.enqueue_response(MockResponse::data(auth_json("tok-login")))
        .await;

    let err = store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Storage(_)));

    let auth = store.select(|s| s.auth.clone());
    assert!(auth.session.is_none());
    assert!(!auth.loading);
    assert!(auth.error.is_some());
    assert_eq!(store.gate(), NavigationGate::Unauthenticated);
    assert!(!storage.inner.contains(ROOT_KEY));
}

#[tokio::test]
async fn logout_with_undeletable_root_still_signs_out_after_restart() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_with_failing(&mock);

    mock.enqueue_response(MockResponse::data(auth_json("tok-login")))
        .await;
    mock.enqueue_response(MockResponse::data(json!([animal_json("a1", "Bessie")])))
        .await;

    store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap();
    store.fetch::<Animal>(&[]).await.unwrap();

    storage.fail_remove(true);
    store.logout().unwrap();

    assert!(store.session().is_none());
    assert!(store.slice::<Animal>().is_empty());

    let restarted = common::store_with(&mock.base_url(), std::sync::Arc::new(storage.clone()));
    assert!(restarted.rehydrate().unwrap().is_none());
    assert_eq!(restarted.gate(), NavigationGate::Unauthenticated);
}

#[tokio::test]
async fn logout_with_broken_storage_still_clears_memory() {
    let mock = MockBackend::start().await;
    let (store, storage) = store_with_failing(&mock);

    mock.enqueue_response(MockResponse::data(auth_json("tok-login")))
        .await;
    mock.enqueue_response(MockResponse::data(json!([animal_json("a1", "Bessie")])))
        .await;

    store
        .login(&LoginForm::new("amina@example.com", "goats2024"))
        .await
        .unwrap();
    store.fetch::<Animal>(&[]).await.unwrap();

    storage.fail_set(true);
    storage.fail_remove(true);
    assert!(store.logout().is_err());

    assert!(store.session().is_none());
    assert_eq!(store.gate(), NavigationGate::Unauthenticated);
    let animals = store.slice::<Animal>();
    assert!(animals.is_empty());
    assert_eq!(animals.status, LoadState::Idle);
}

#[tokio::test]
async fn gate_reports_loading_while_in_flight() {
    let mock = MockBackend::start().await;
    let (store, _) = store_for(&mock);
    let mut rx = store.subscribe();

    mock.enqueue_response(MockResponse::data(auth_json("tok")).with_delay(100))
        .await;

    let form = LoginForm::new("amina@example.com", "goats2024");
    let watcher = async {
        rx.changed().await.unwrap();
        rx.borrow_and_update().auth.gate()
    };
    let (result, gate) = tokio::join!(store.login(&form), watcher);
    result.unwrap();

    assert_eq!(gate, NavigationGate::Loading);
    assert_eq!(store.gate(), NavigationGate::Authenticated);
}
