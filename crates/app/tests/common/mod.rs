//! In-process fake of an IPFS Pinning Service API endpoint
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use url::Url;

use common::prelude::{Cid, PinStatus};
use common::testkit::test_cid;

pub const KEY: &str = "test-access-token";

#[derive(Debug, Clone)]
pub struct FakePin {
    pub requestid: String,
    pub cid: Cid,
    pub name: Option<String>,
    pub status: PinStatus,
    pub created: OffsetDateTime,
    pub delegates: Vec<String>,
}

impl FakePin {
    fn to_json(&self) -> Value {
        let mut pin = json!({ "cid": self.cid.to_string() });
        if let Some(name) = &self.name {
            pin["name"] = json!(name);
        }
        json!({
            "requestid": self.requestid,
            "status": self.status.as_str(),
            "created": self.created.format(&Rfc3339).unwrap(),
            "pin": pin,
            "delegates": self.delegates,
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub pins: Vec<FakePin>,
    pub next_id: u64,
    /// Each status lookup moves a pin one step towards `pinned`
    pub advance_on_get: bool,
    /// Pins that should end up `failed` instead of `pinned`
    pub doomed: Vec<Cid>,
    pub list_queries: Vec<ListParams>,
    pub deleted: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeService {
    pub url: Url,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeService {
    /// Insert `count` pinned pins named `pin-<i>`, each a second newer than
    /// the last.
    pub fn seed(&self, count: u8) {
        let mut state = self.state.lock().unwrap();
        let base = datetime!(2024-01-01 00:00:00 UTC);
        for i in 0..count {
            state.next_id += 1;
            let requestid = format!("req-{}", state.next_id);
            state.pins.push(FakePin {
                requestid,
                cid: test_cid(i),
                name: Some(format!("pin-{}", i)),
                status: PinStatus::Pinned,
                created: base + Duration::seconds(i as i64),
                delegates: Vec::new(),
            });
        }
    }

    pub fn advance_on_get(&self) {
        self.state.lock().unwrap().advance_on_get = true;
    }

    pub fn doom(&self, cid: Cid) {
        self.state.lock().unwrap().doomed.push(cid);
    }

    pub fn pin_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.pins.iter().map(|p| p.requestid.clone()).collect()
    }

    pub fn list_queries(&self) -> Vec<ListParams> {
        self.state.lock().unwrap().list_queries.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub cid: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "match")]
    pub match_mode: Option<String>,
    pub status: Option<String>,
    pub before: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct AddBody {
    cid: String,
    name: Option<String>,
}

type Shared = Arc<Mutex<FakeState>>;

fn failure(status: StatusCode, reason: &str, details: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "reason": reason, "details": details } })),
    )
        .into_response()
}

fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", KEY);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(failure(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "access token is missing or invalid",
        )),
    }
}

async fn add_pin(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<AddBody>,
) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }
    let Ok(cid) = body.cid.parse::<Cid>() else {
        return failure(StatusCode::BAD_REQUEST, "BAD_REQUEST", "invalid cid");
    };

    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let pin = FakePin {
        requestid: format!("req-{}", state.next_id),
        cid,
        name: body.name,
        status: PinStatus::Queued,
        created: OffsetDateTime::now_utc(),
        delegates: vec![
            "/ip4/203.0.113.7/tcp/4001/p2p/12D3KooWGzxzKZYveHXtpG6AsrUJBcWxHBFS2HsEoGTxrMLvKXtf"
                .to_string(),
        ],
    };
    let response = pin.to_json();
    state.pins.push(pin);
    (StatusCode::ACCEPTED, Json(response)).into_response()
}

async fn get_pin(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(requestid): Path<String>,
) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }

    let mut state = state.lock().unwrap();
    let advance = state.advance_on_get;
    let doomed = state.doomed.clone();
    let Some(pin) = state.pins.iter_mut().find(|p| p.requestid == requestid) else {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "no such pin request");
    };
    if advance {
        pin.status = match pin.status {
            PinStatus::Queued => PinStatus::Pinning,
            PinStatus::Pinning if doomed.contains(&pin.cid) => PinStatus::Failed,
            PinStatus::Pinning => PinStatus::Pinned,
            other => other,
        };
    }
    Json(pin.to_json()).into_response()
}

async fn delete_pin(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(requestid): Path<String>,
) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }

    let mut state = state.lock().unwrap();
    let before = state.pins.len();
    state.pins.retain(|p| p.requestid != requestid);
    if state.pins.len() == before {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "no such pin request");
    }
    state.deleted.push(requestid);
    StatusCode::ACCEPTED.into_response()
}

async fn list_pins(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }

    let mut state = state.lock().unwrap();
    state.list_queries.push(params.clone());

    let statuses: Vec<String> = params
        .status
        .as_deref()
        .unwrap_or("pinned")
        .split(',')
        .map(str::to_string)
        .collect();
    let cids: Option<Vec<String>> = params
        .cid
        .as_ref()
        .map(|c| c.split(',').map(str::to_string).collect());
    let before = match params.before.as_deref().map(|b| OffsetDateTime::parse(b, &Rfc3339)) {
        Some(Ok(before)) => Some(before),
        Some(Err(_)) => return failure(StatusCode::BAD_REQUEST, "BAD_REQUEST", "bad before"),
        None => None,
    };

    let mut matching: Vec<&FakePin> = state
        .pins
        .iter()
        .filter(|p| statuses.iter().any(|s| s == p.status.as_str()))
        .filter(|p| match &cids {
            Some(cids) => cids.contains(&p.cid.to_string()),
            None => true,
        })
        .filter(|p| match &params.name {
            Some(name) => p.name.as_ref() == Some(name),
            None => true,
        })
        .filter(|p| before.map_or(true, |before| p.created < before))
        .collect();
    matching.sort_by(|a, b| b.created.cmp(&a.created));

    let count = matching.len();
    let limit = params.limit.unwrap_or(10);
    let results: Vec<Value> = matching.iter().take(limit).map(|p| p.to_json()).collect();
    Json(json!({ "count": count, "results": results })).into_response()
}

/// Serve a fresh fake at `http://127.0.0.1:<port>/psa`.
pub async fn spawn_service() -> FakeService {
    let state: Shared = Arc::new(Mutex::new(FakeState::default()));
    let app = Router::new()
        .route("/psa/pins", get(list_pins).post(add_pin))
        .route("/psa/pins/:requestid", get(get_pin).delete(delete_pin))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeService {
        url: Url::parse(&format!("http://{}/psa", addr)).unwrap(),
        state,
    }
}
