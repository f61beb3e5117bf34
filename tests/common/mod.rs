#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Router,
};
use hearthstone_table::{AppConfig, CatalogClient};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "USfakeAccessToken123";
/// `test-client:test-secret` in base64.
const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

/// A request the fake API received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
}

/// Canned status and raw body for one endpoint.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body: body.to_string() }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: json!({"error": "nope"}).to_string() }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self { status, body: body.to_string() }
    }
}

#[derive(Clone)]
struct FakeState {
    token: Arc<Mutex<Canned>>,
    metadata: Arc<Mutex<Canned>>,
    cards: Arc<Mutex<Canned>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// An in-process stand-in for the Battle.net token endpoint and the
/// Hearthstone catalog API.
pub struct FakeApi {
    pub base_url: String,
    state: FakeState,
    ct: CancellationToken,
}

pub fn default_metadata() -> serde_json::Value {
    json!({
        "sets": [{"id": 1635, "name": "Core"}, {"id": 1691, "name": "Showdown in the Badlands"}],
        "types": [{"id": 4, "name": "Minion"}, {"id": 5, "name": "Spell"}],
        "rarities": [{"id": 5, "name": "Legendary"}],
        "classes": [{"id": 2, "name": "Druid"}, {"id": 9, "name": "Warlock"}],
        "keywords": [{"id": 1, "name": "Taunt"}]
    })
}

pub fn raw_card(id: i32, name: &str, class_id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "classId": class_id,
        "cardTypeId": 4,
        "cardSetId": 1635,
        "rarityId": 5,
        "name": name,
        "image": format!("https://img.example/{}.png", id),
        "manaCost": 8
    })
}

pub fn default_cards() -> serde_json::Value {
    json!({
        "cards": [
            raw_card(5, "Ysera", 2),
            raw_card(1, "Lord Jaraxxus", 9),
            raw_card(3, "Cenarius", 2)
        ],
        "cardCount": 3,
        "pageCount": 1,
        "page": 1
    })
}

async fn token_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        path: "/oauth/token".to_string(),
        authorization: authorization.clone(),
        query: form.clone(),
    });

    let json_header = [(header::CONTENT_TYPE, "application/json")];
    if authorization.as_deref() != Some(BASIC_AUTH)
        || form.get("grant_type").map(String::as_str) != Some("client_credentials")
    {
        return (StatusCode::UNAUTHORIZED, json_header, json!({"error": "invalid_client"}).to_string());
    }

    respond(&state.token, json_header)
}

fn catalog_handler(
    canned: &Mutex<Canned>,
    requests: &Mutex<Vec<RecordedRequest>>,
    path: &str,
    headers: HeaderMap,
    query: HashMap<String, String>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    requests.lock().unwrap().push(RecordedRequest {
        path: path.to_string(),
        authorization: authorization.clone(),
        query,
    });

    let json_header = [(header::CONTENT_TYPE, "application/json")];
    if authorization != Some(format!("Bearer {}", ACCESS_TOKEN)) {
        return (StatusCode::UNAUTHORIZED, json_header, String::new());
    }

    respond(canned, json_header)
}

fn respond(
    canned: &Mutex<Canned>,
    json_header: [(header::HeaderName, &'static str); 1],
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let canned = canned.lock().unwrap().clone();
    let status = StatusCode::from_u16(canned.status).unwrap();
    (status, json_header, canned.body)
}

async fn metadata_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    catalog_handler(&state.metadata, &state.requests, "/hearthstone/metadata/", headers, query)
}

async fn cards_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    catalog_handler(&state.cards, &state.requests, "/hearthstone/cards/", headers, query)
}

impl FakeApi {
    pub async fn start() -> Self {
        let state = FakeState {
            token: Arc::new(Mutex::new(Canned::ok(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "bearer",
                "expires_in": 86399
            })))),
            metadata: Arc::new(Mutex::new(Canned::ok(default_metadata()))),
            cards: Arc::new(Mutex::new(Canned::ok(default_cards()))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/oauth/token", post(token_handler))
            .route("/hearthstone/metadata/", get(metadata_handler))
            .route("/hearthstone/cards/", get(cards_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake API");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let ct = CancellationToken::new();
        let shutdown = ct.clone();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
                .expect("fake API server");
        });

        Self { base_url, state, ct }
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url)
    }

    pub fn api_url(&self) -> String {
        format!("{}/hearthstone", self.base_url)
    }

    pub fn set_token(&self, canned: Canned) {
        *self.state.token.lock().unwrap() = canned;
    }

    pub fn set_metadata(&self, canned: Canned) {
        *self.state.metadata.lock().unwrap() = canned;
    }

    pub fn set_cards(&self, canned: Canned) {
        *self.state.cards.lock().unwrap() = canned;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn config(&self, client_secret: &str) -> AppConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            ("HEARTHSTONE_CLIENT_ID", CLIENT_ID.to_string()),
            ("HEARTHSTONE_CLIENT_SECRET", client_secret.to_string()),
            ("HEARTHSTONE_TOKEN_URL", self.token_url()),
            ("HEARTHSTONE_API_URL", self.api_url()),
            ("BIND_ADDR", "127.0.0.1:0".to_string()),
        ]);
        AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
    }

    pub async fn catalog_client(&self) -> CatalogClient {
        CatalogClient::new(self.api_url(), ACCESS_TOKEN.to_string())
            .await
            .expect("catalog client against fake API")
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.ct.cancel();
    }
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
