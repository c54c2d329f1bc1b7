//! End-to-end tests over the public client surface
//!
//! **Coverage:**
//! - Session persistence across a simulated restart (file-backed storage)
//! - Unauthorized recovery: notification, session wipe, login redirect
//! - The silent generic-error band, observed from outside the crate
//!
//! **Infrastructure:**
//! - Real file-backed storage (tempdir)
//! - WireMock HTTP server standing in for the VaultView API

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::json;
use vaultview_client::{
    ApiClient, ApiClientConfig, ApiError, FileStorage, NavTarget, Navigator, Notifier,
    RequestOptions, SessionStore, UiHooks,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt().with_env_filter("info").with_test_writer().init();
});

#[derive(Default)]
struct RecordingUi {
    errors: Mutex<Vec<String>>,
    redirects: Mutex<Vec<NavTarget>>,
}

impl Notifier for RecordingUi {
    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

impl Navigator for RecordingUi {
    fn redirect(&self, target: NavTarget) {
        self.redirects.lock().push(target);
    }
}

fn hooks(ui: &Arc<RecordingUi>) -> UiHooks {
    UiHooks { notifier: ui.clone(), navigator: ui.clone(), ..UiHooks::default() }
}

#[tokio::test]
async fn session_written_at_login_survives_a_restart() {
    Lazy::force(&TRACING);
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let storage = Arc::new(FileStorage::new(dir.path()).expect("storage"));
        let session = SessionStore::load(storage);
        session.set_token("abc");
        session.set_token_head("Bearer");
        session.set_user_name("alice");
    }

    // Fresh storage + store over the same directory, as after a restart.
    let storage = Arc::new(FileStorage::new(dir.path()).expect("storage"));
    let session = Arc::new(SessionStore::load(storage));
    assert_eq!(session.token(), "abc");
    assert_eq!(session.user_name(), "alice");

    // The rehydrated token is what goes on the wire.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "message": "ok", "data": {"name": "alice"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(ApiClientConfig::new(server.uri()), session, UiHooks::default())
        .expect("client");
    let envelope = client
        .get::<serde_json::Value, ()>("/me", None, RequestOptions::default())
        .await
        .expect("ok");
    assert!(envelope.is_success());
}

#[tokio::test]
async fn unauthorized_round_trip_recovers_the_session() {
    Lazy::force(&TRACING);
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(FileStorage::new(dir.path()).expect("storage"));
    let session = Arc::new(SessionStore::load(storage));
    session.set_token("stale");
    session.set_user_name("alice");
    session.set_avatar("https://cdn/a.png");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 401, "message": "token expired", "data": null})),
        )
        .mount(&server)
        .await;

    let ui = Arc::new(RecordingUi::default());
    let client =
        ApiClient::new(ApiClientConfig::new(server.uri()), session.clone(), hooks(&ui))
            .expect("client");

    let result = client.get::<serde_json::Value, ()>("/me", None, RequestOptions::default()).await;
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    assert_eq!(*ui.redirects.lock(), vec![NavTarget::Login]);
    assert_eq!(ui.errors.lock().len(), 1);

    // The wipe reached durable storage too: a reloaded store sees it.
    let reloaded = SessionStore::load(Arc::new(FileStorage::new(dir.path()).expect("storage")));
    assert_eq!(reloaded.token(), "");
    assert_eq!(reloaded.user_name(), "");
}

#[tokio::test]
async fn generic_error_band_stays_silent_from_the_outside() {
    Lazy::force(&TRACING);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 418, "message": "teapot", "data": null})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let session =
        Arc::new(SessionStore::load(Arc::new(FileStorage::new(dir.path()).expect("storage"))));
    let ui = Arc::new(RecordingUi::default());
    let client = ApiClient::new(ApiClientConfig::new(server.uri()), session, hooks(&ui))
        .expect("client");

    let result =
        client.get::<serde_json::Value, ()>("/things", None, RequestOptions::default()).await;
    assert!(matches!(result, Err(ApiError::Api { code: 418, .. })));
    assert!(ui.errors.lock().is_empty());
    assert!(ui.redirects.lock().is_empty());
}
