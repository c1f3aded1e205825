use super::*;
use crate::config::AppConfig;
use crate::http::{HttpMethod, MockHttpClient};
use crate::routes::{AppRoute, AuthStatus, RouteDecision};
use crate::storage::MemoryStorage;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::atomic::AtomicUsize;

const LOGIN_URL: &str = "http://localhost:8080/api/usuarios/login";

// =========================================================
// Helpers
// =========================================================

fn setup() -> (Arc<MemoryStorage>, SessionStore, ApiClient<MockHttpClient>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone());
    let api = ApiClient::new(&AppConfig::default(), MockHttpClient::new(), storage.clone());
    (storage, store, api)
}

fn stored_user(storage: &MemoryStorage) -> Option<Value> {
    storage
        .get(STORAGE_USER_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

fn status_of(store: &SessionStore) -> AuthStatus {
    AuthStatus::from_session(store.current_user().as_ref())
}

// =========================================================
// Rehydration
// =========================================================

#[test]
fn test_new_rehydrates_from_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            STORAGE_USER_KEY,
            &json!({ "id": 4, "nomeCompleto": "Bia", "token": "t", "isAdmin": true }).to_string(),
        )
        .unwrap();

    let store = SessionStore::new(storage);
    let session = store.current_user().unwrap();
    assert_eq!(session.user_id(), Some(4));
    assert_eq!(session.token.as_deref(), Some("t"));
    assert!(store.is_admin());
}

#[test]
fn test_new_with_garbage_is_logged_out() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(STORAGE_USER_KEY, "{not json").unwrap();

    let store = SessionStore::new(storage);
    assert!(!store.is_authenticated());
    assert!(!store.state().is_loading);
}

// =========================================================
// Login / logout
// =========================================================

#[tokio::test]
async fn test_login_admin_persists_session() {
    let (storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({
            "usuario": { "id": 1, "nome_completo": "Ana Souza", "role": "ROLE_ADMIN" },
            "token": "tok-1"
        }),
    );

    let session = store.login(&api, " ana@synergia.org ", "segredo").await.unwrap();
    assert!(session.is_admin);
    assert_eq!(session.user.nome_completo.as_deref(), Some("Ana Souza"));

    let persisted = stored_user(&storage).unwrap();
    assert_eq!(persisted["isAdmin"], json!(true));
    assert_eq!(persisted["token"], json!("tok-1"));
    assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("tok-1"));

    let sent = api.http().last_request().unwrap();
    match sent.body {
        crate::http::RequestBody::Json(body) => {
            let body: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body, json!({ "email": "ana@synergia.org", "senha": "segredo" }));
        }
        other => panic!("unexpected body: {:?}", other),
    }

    let state = store.state();
    assert!(!state.is_loading);
    assert_eq!(state.last_error, None);
}

#[tokio::test]
async fn test_login_with_numeric_phone_and_null_name() {
    let (storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({
            "usuario": {
                "id": 3,
                "nomeCompleto": null,
                "telefone": 11999990000u64,
                "cpf": 12345678901u64
            },
            "token": "tok-3"
        }),
    );

    let session = store.login(&api, "bia@synergia.org", "123456").await.unwrap();
    assert_eq!(session.user.telefone.as_deref(), Some("11999990000"));
    assert_eq!(session.user.cpf.as_deref(), Some("12345678901"));
    assert_eq!(session.user.display_name(), "Usuário");
    assert!(store.is_authenticated());

    let persisted = stored_user(&storage).unwrap();
    assert_eq!(persisted["telefone"], json!("11999990000"));
}

#[tokio::test]
async fn test_login_then_guards_then_logout() {
    let (storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({ "data": { "usuario": { "id": 2, "nomeCompleto": "Caio" }, "token": "tok-2" } }),
    );

    store.login(&api, "caio@synergia.org", "123456").await.unwrap();
    assert!(!store.is_admin());
    assert_eq!(stored_user(&storage).unwrap()["isAdmin"], json!(false));

    // non-admin on an admin page
    assert_eq!(
        AppRoute::AdminDashboard.guard(status_of(&store), false),
        RouteDecision::Redirect(AppRoute::Locations)
    );
    assert_eq!(AppRoute::Locations.guard(status_of(&store), false), RouteDecision::Allow);

    store.logout();
    assert_eq!(storage.get(STORAGE_USER_KEY), None);
    assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
    assert_eq!(
        AppRoute::Locations.guard(status_of(&store), false),
        RouteDecision::Redirect(AppRoute::Login)
    );
    assert_eq!(
        AppRoute::Profile.guard(status_of(&store), false),
        RouteDecision::Redirect(AppRoute::Login)
    );
}

#[tokio::test]
async fn test_login_rejected_keeps_storage_and_records_error() {
    let (storage, store, api) = setup();
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let calls = hook_calls.clone();
    let api = api.with_unauthorized_hook(move || {
        calls.fetch_add(1, Ordering::SeqCst);
    });
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        401,
        json!({ "message": "Email ou senha inválidos" }),
    );

    let err = store.login(&api, "x@y.com", "errada").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        store.state().last_error.as_deref(),
        Some("Email ou senha inválidos")
    );
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_login_unknown_shape_is_decode_error() {
    let (_storage, store, api) = setup();
    api.http()
        .mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({ "ok": true }));

    let err = store.login(&api, "a@b.co", "123456").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(!store.is_authenticated());
    assert!(store.state().last_error.is_some());
}

#[tokio::test]
async fn test_login_network_failure_message() {
    let (_storage, store, api) = setup();
    api.http().mock_failure(
        HttpMethod::Post,
        LOGIN_URL,
        ApiError::Network("connection refused".into()),
    );

    store.login(&api, "a@b.co", "123456").await.unwrap_err();
    assert!(
        store
            .state()
            .last_error
            .unwrap()
            .starts_with("Nenhuma resposta do servidor")
    );
}

#[tokio::test]
async fn test_listeners_see_loading_transitions() {
    let (_storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({ "id": 3, "nomeCompleto": "Duda", "token": "tok-3" }),
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = store.subscribe(move |state| {
        sink.lock().push((state.is_loading, state.is_authenticated()));
    });

    store.login(&api, "duda@synergia.org", "123456").await.unwrap();
    assert_eq!(*seen.lock(), vec![(true, false), (false, true)]);

    store.unsubscribe(id);
    store.logout();
    assert_eq!(seen.lock().len(), 2);
}

// =========================================================
// Register / update
// =========================================================

#[tokio::test]
async fn test_register_does_not_log_in() {
    let (storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        "http://localhost:8080/api/usuarios/cadastro",
        201,
        json!({ "id": 10, "nome_completo": "Eva", "email": "eva@synergia.org" }),
    );

    let payload = RegisterRequest {
        nome_completo: "Eva".into(),
        data_nascimento: "2000-01-01".into(),
        cpf: "12345678901".into(),
        email: "eva@synergia.org".into(),
        senha: "123456".into(),
    };
    let user = store.register(&api, &payload).await.unwrap();
    assert_eq!(user.id, Some(10));
    assert_eq!(user.nome_completo.as_deref(), Some("Eva"));
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_register_conflict_reports_server_text() {
    let (_storage, store, api) = setup();
    api.http().mock_raw(
        HttpMethod::Post,
        "http://localhost:8080/api/usuarios/cadastro",
        409,
        "Email já cadastrado",
    );

    let payload = RegisterRequest {
        nome_completo: "Eva".into(),
        data_nascimento: "2000-01-01".into(),
        cpf: "12345678901".into(),
        email: "eva@synergia.org".into(),
        senha: "123456".into(),
    };
    let err = store.register(&api, &payload).await.unwrap_err();
    assert_eq!(err.user_message(), "Email já cadastrado");
    assert_eq!(store.state().last_error.as_deref(), Some("Email já cadastrado"));
}

#[test]
fn test_update_user_keeps_token_and_role() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            STORAGE_USER_KEY,
            &json!({ "id": 4, "nomeCompleto": "Bia", "token": "t-4", "isAdmin": true }).to_string(),
        )
        .unwrap();
    let store = SessionStore::new(storage.clone());

    let mut user = store.current_user().unwrap().user;
    user.nome_completo = Some("Beatriz".into());
    store.update_user(user);

    let session = store.current_user().unwrap();
    assert_eq!(session.display_name(), "Beatriz");
    assert_eq!(session.token.as_deref(), Some("t-4"));
    assert!(session.is_admin);
    assert_eq!(stored_user(&storage).unwrap()["nomeCompleto"], json!("Beatriz"));
}

// =========================================================
// Cross-tab sync and 401
// =========================================================

#[test]
fn test_storage_event_sync() {
    let (_storage, store, _api) = setup();

    let other_tab = json!({ "id": 8, "nomeCompleto": "Gil", "token": "t-8" }).to_string();
    store.sync_from_storage_event(Some(STORAGE_USER_KEY), Some(&other_tab));
    assert_eq!(store.current_user().unwrap().user_id(), Some(8));

    // unrelated keys are ignored
    store.sync_from_storage_event(Some("theme"), None);
    assert!(store.is_authenticated());

    store.sync_from_storage_event(Some(STORAGE_USER_KEY), Some("garbage"));
    assert!(!store.is_authenticated());

    store.sync_from_storage_event(Some(STORAGE_USER_KEY), Some(&other_tab));
    store.sync_from_storage_event(None, None);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_response_clears_everything() {
    let (storage, store, api) = setup();
    api.http().mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({ "usuario": { "id": 1, "nomeCompleto": "Ana" }, "token": "tok-1" }),
    );
    store.login(&api, "ana@synergia.org", "123456").await.unwrap();

    let hook_calls = Arc::new(AtomicUsize::new(0));
    let calls = hook_calls.clone();
    let api = api.with_unauthorized_hook(move || {
        calls.fetch_add(1, Ordering::SeqCst);
    });
    api.http().mock_response(
        HttpMethod::Get,
        "http://localhost:8080/api/locais",
        401,
        json!({ "message": "expired" }),
    );

    let err = api.list_locations().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert!(storage.is_empty());

    // the bearer token was still sent on the failing call
    let sent = api.http().last_request().unwrap();
    assert_eq!(
        sent.headers.get("Authorization").map(String::as_str),
        Some("Bearer tok-1")
    );

    store.reload_from_storage();
    assert!(!store.is_authenticated());
}

#[test]
fn test_handle_unauthorized() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(STORAGE_USER_KEY, &json!({ "id": 1, "token": "t" }).to_string())
        .unwrap();
    storage.set(STORAGE_TOKEN_KEY, "t").unwrap();
    let store = SessionStore::new(storage.clone());
    assert!(store.is_authenticated());

    store.handle_unauthorized();
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
    assert!(store.state().last_error.is_some());
}
