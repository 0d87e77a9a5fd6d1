//! Integration tests for the webhook REST surface.
//!
//! Exercises the full HTTP stack: payload parsing, routing, order
//! building, downstream forwarding, and error mapping. Downstream
//! endpoints are real in-process HTTP servers that capture what the
//! gateway sends them.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use signal_gateway::{create_router, AppState, BroadcastHub, HttpForwarder, RouteTable};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

/// In-process downstream endpoint that records every payload it receives.
struct Downstream {
    received: Mutex<Vec<Value>>,
    status: StatusCode,
}

async fn capture(State(downstream): State<Arc<Downstream>>, Json(body): Json<Value>) -> StatusCode {
    downstream.received.lock().push(body);
    downstream.status
}

/// Start a capture server and return its URL plus the capture handle.
async fn start_downstream(status: StatusCode) -> (String, Arc<Downstream>) {
    let downstream = Arc::new(Downstream {
        received: Mutex::new(Vec::new()),
        status,
    });

    let app = Router::new()
        .route("/webhook", post(capture))
        .with_state(Arc::clone(&downstream));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/webhook", addr), downstream)
}

fn test_app(routes: RouteTable) -> Router {
    let state = Arc::new(AppState::new(
        routes,
        Arc::new(HttpForwarder::new()),
        Arc::new(BroadcastHub::default()),
    ));
    create_router(state)
}

async fn post_webhook(app: &Router, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pine-entry")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Diagnostics
// ============================================================================

#[tokio::test]
async fn test_diagnostic_endpoints() {
    let app = test_app(RouteTable::default());

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Root is working"}));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "alive"}));

    let (status, body) = get(&app, "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"pong": true}));
}

// ============================================================================
// Auto-trail entry route
// ============================================================================

#[tokio::test]
async fn test_market_entry_has_no_relative_fields() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "BUY",
            "ticker": "AAPL",
            "quantity": 10,
            "orderType": "market"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("alt_http_sent"));
    assert_eq!(body["order_type"], json!("market"));
    assert_eq!(body["has_trailing"], json!(false));
    assert!(body["tp_payload"].get("price").is_none());
    assert!(body["tp_payload"].get("trailingStop").is_none());

    let sent = downstream.received.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["quantityType"], json!("fixed_quantity"));
    assert!(sent[0].get("price").is_none());
}

#[tokio::test]
async fn test_limit_entry_with_full_trailing_block() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "buy",
            "ticker": "AAPL",
            "quantity": 10,
            "orderType": "limit",
            "price": 150,
            "stopLoss": { "amount": 2 },
            "extras": { "autoTrail": { "stopLoss": 1, "trigger": 0.5 } }
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_trailing"], json!(true));
    assert_eq!(body["tp_payload"]["price"], json!(150));
    assert_eq!(body["tp_payload"]["trailingStop"], json!(true));
    assert_eq!(body["tp_payload"]["trailAmount"], json!(1));
    assert_eq!(body["tp_payload"]["triggerDistance"], json!(0.5));

    assert_eq!(
        downstream.received.lock()[0]["stopLoss"],
        json!({"type": "stop", "amount": 2})
    );
}

#[tokio::test]
async fn test_limit_entry_missing_trail_input_degrades() {
    let (url, _downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "buy",
            "ticker": "AAPL",
            "quantity": 10,
            "orderType": "limit",
            "price": 150,
            "stopLoss": { "amount": 2 },
            "extras": { "autoTrail": { "stopLoss": 1 } }
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_trailing"], json!(false));
    assert_eq!(body["tp_payload"]["price"], json!(150));
    for key in ["stopLoss", "trailingStop", "trailAmount", "triggerDistance"] {
        assert!(body["tp_payload"].get(key).is_none());
    }
}

#[tokio::test]
async fn test_entry_with_invalid_order_fields_is_400() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    // Limit order with no resolvable price anywhere in the chain.
    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "buy",
            "ticker": "AAPL",
            "quantity": 10,
            "orderType": "limit"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Malformed bracket data"), "got: {detail}");
    assert!(downstream.received.lock().is_empty());
}

// ============================================================================
// Auto-trail exit route
// ============================================================================

#[tokio::test]
async fn test_exit_passes_document_through_with_price_backfill() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "exit",
            "ticker": "AAPL",
            "close": 187.25,
            "custom_tag": "eod"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("alt_http_sent"));
    assert_eq!(body["payload"]["price"], json!(187.25));
    assert_eq!(body["payload"]["custom_tag"], json!("eod"));

    assert_eq!(downstream.received.lock()[0]["price"], json!(187.25));
}

// ============================================================================
// Pass-through routes
// ============================================================================

#[tokio::test]
async fn test_core_forward_is_verbatim() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        core_url: Some(url),
        ..RouteTable::default()
    });

    let document = json!({
        "strategy_id": "Tiger-Core",
        "action": "sell",
        "ticker": "AAPL",
        "anything": { "goes": [1, 2, 3] }
    });

    let (status, body) = post_webhook(&app, document.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "forwarded", "to": "Tiger-Core"}));
    assert_eq!(downstream.received.lock()[0], document);
}

#[tokio::test]
async fn test_runner_forward() {
    let (url, _downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        runner_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Runner",
            "action": "buy",
            "ticker": "AAPL"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["to"], json!("Tiger-Runner"));
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_unknown_route_is_400() {
    let app = test_app(RouteTable::default());

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Unknown",
            "action": "buy",
            "ticker": "AAPL"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        json!("Unknown strategy_id: Tiger-Unknown")
    );
}

#[tokio::test]
async fn test_missing_routing_fields_is_400() {
    let app = test_app(RouteTable::default());

    let (status, body) = post_webhook(
        &app,
        json!({"strategy_id": "Tiger-Core", "action": "buy"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        json!("Missing or invalid strategy_id/action/ticker")
    );
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = test_app(RouteTable::default());

    let (status, body) = post_webhook(&app, "this is not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Malformed payload"));
}

#[tokio::test]
async fn test_double_encoded_body_is_accepted() {
    let (url, downstream) = start_downstream(StatusCode::OK).await;
    let app = test_app(RouteTable {
        core_url: Some(url),
        ..RouteTable::default()
    });

    let inner = json!({
        "strategy_id": "Tiger-Core",
        "action": "buy",
        "ticker": "AAPL"
    })
    .to_string();
    // The whole document serialized again as a JSON string literal.
    let body = serde_json::to_string(&inner).unwrap();

    let (status, _body) = post_webhook(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(downstream.received.lock()[0]["action"], json!("buy"));
}

// ============================================================================
// Forwarding failures
// ============================================================================

#[tokio::test]
async fn test_unconfigured_endpoint_is_500() {
    // No URLs configured at all; selecting the core route must fail at
    // request time, not at startup.
    let app = test_app(RouteTable::default());

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Core",
            "action": "buy",
            "ticker": "AAPL"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Forwarding error"}));
}

#[tokio::test]
async fn test_downstream_rejection_is_500() {
    let (url, _downstream) = start_downstream(StatusCode::SERVICE_UNAVAILABLE).await;
    let app = test_app(RouteTable {
        alt_url: Some(url),
        ..RouteTable::default()
    });

    let (status, body) = post_webhook(
        &app,
        json!({
            "strategy_id": "Tiger-Alt",
            "action": "buy",
            "ticker": "AAPL",
            "quantity": 10,
            "orderType": "market"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Forwarding error"}));
}
