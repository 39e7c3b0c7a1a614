use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use atlas_server::{api::app_router, build_state, config::Config};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn countries_payload() -> Value {
    json!([
        {
            "name": "France",
            "capital": "Paris",
            "region": "Europe",
            "population": 67391582,
            "flag": "https://flags.example/fr.svg",
            "currencies": [{ "code": "EUR", "name": "Euro", "symbol": "€" }]
        },
        {
            "name": "Testland",
            "capital": "Test City",
            "region": "Oceania",
            "population": 1000,
            "flag": "https://flags.example/tl.svg",
            "currencies": [{ "code": "TST" }]
        },
        {
            "name": "Antarctica",
            "region": "Polar",
            "population": 1000,
            "flag": "https://flags.example/aq.svg"
        }
    ])
}

fn rates_payload() -> Value {
    json!({
        "result": "success",
        "base_code": "USD",
        "rates": { "USD": 1, "EUR": 0.92, "TST": 2 }
    })
}

/// Local stand-in for both upstream endpoints. The returned flag sets the
/// HTTP status the rates endpoint answers with.
async fn spawn_upstream() -> (SocketAddr, Arc<AtomicU16>) {
    let rates_status = Arc::new(AtomicU16::new(200));
    let status = rates_status.clone();

    let app = Router::new()
        .route("/countries", get(|| async { Json(countries_payload()) }))
        .route(
            "/rates",
            get(move || {
                let status = status.clone();
                async move {
                    let code = StatusCode::from_u16(status.load(Ordering::SeqCst)).unwrap();
                    (code, Json(rates_payload()))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, rates_status)
}

fn test_config(upstream: SocketAddr, tmp: &TempDir) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        (
            "ATLAS_DB_PATH",
            tmp.path().join("test.db").to_string_lossy().to_string(),
        ),
        ("ATLAS_COUNTRIES_URL", format!("http://{}/countries", upstream)),
        ("ATLAS_RATES_URL", format!("http://{}/rates", upstream)),
        ("ATLAS_FETCH_TIMEOUT_MS", "5000".to_string()),
        ("ATLAS_GDP_MULTIPLIER", "1500".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
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

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn healthz_works() {
    let (upstream, _) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);
    let app = app_router(build_state(&config).await.unwrap(), &config);

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn refresh_then_read() {
    let (upstream, _) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);
    let app = app_router(build_state(&config).await.unwrap(), &config);

    let (status, body) = send(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_countries"], 0);
    assert!(body["last_refreshed_at"].is_null());

    let (status, body) = send(&app, "POST", "/countries/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countries"], 3);
    assert_eq!(body["multiplier"], 1500);
    let refreshed_at = timestamp(&body["last_refreshed_at"]);

    let (_, body) = send(&app, "GET", "/countries").await;
    assert_eq!(names(&body), vec!["Antarctica", "France", "Testland"]);

    let (status, body) = send(&app, "GET", "/countries/Testland").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "TST");
    assert_eq!(body["rate"].as_f64(), Some(2.0));
    assert_eq!(body["estimated_gdp"].as_f64(), Some(750000.0));

    let (_, body) = send(&app, "GET", "/countries/Antarctica").await;
    assert_eq!(body["capital"], "");
    assert!(body["currency"].is_null());
    assert!(body["rate"].is_null());
    assert!(body["estimated_gdp"].is_null());

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["total_countries"], 3);
    assert_eq!(timestamp(&body["last_refreshed_at"]), refreshed_at);
}

#[tokio::test]
async fn filters_and_errors() {
    let (upstream, _) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);
    let app = app_router(build_state(&config).await.unwrap(), &config);
    send(&app, "POST", "/refresh").await;

    let (status, body) = send(&app, "GET", "/countries?population=%3E%3D1000000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["France"]);

    let (_, body) = send(&app, "GET", "/countries?region=Oceania&population=1000").await;
    assert_eq!(names(&body), vec!["Testland"]);

    let (_, body) = send(&app, "GET", "/countries?name=land").await;
    assert_eq!(names(&body), vec!["Testland"]);

    let (_, body) = send(&app, "GET", "/countries?name=LAND").await;
    assert!(names(&body).is_empty());

    let (status, body) = send(&app, "GET", "/countries?population=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(&app, "GET", "/countries?color=red").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/countries/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn delete_country() {
    let (upstream, _) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);
    let app = app_router(build_state(&config).await.unwrap(), &config);
    send(&app, "POST", "/refresh").await;

    let (status, body) = send(&app, "DELETE", "/countries/France").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);

    let (status, _) = send(&app, "DELETE", "/countries/France").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["total_countries"], 2);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_data() {
    let (upstream, rates_status) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);
    let app = app_router(build_state(&config).await.unwrap(), &config);

    let (_, body) = send(&app, "POST", "/refresh").await;
    let refreshed_at = timestamp(&body["last_refreshed_at"]);

    rates_status.store(503, Ordering::SeqCst);
    let (status, body) = send(&app, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);
    assert!(body["message"].as_str().unwrap().contains("/rates"));

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["total_countries"], 3);
    assert_eq!(timestamp(&body["last_refreshed_at"]), refreshed_at);
}

#[tokio::test]
async fn restart_restores_last_refresh_time() {
    let (upstream, _) = spawn_upstream().await;
    let tmp = tempdir().unwrap();
    let config = test_config(upstream, &tmp);

    let first = app_router(build_state(&config).await.unwrap(), &config);
    let (_, body) = send(&first, "POST", "/refresh").await;
    let refreshed_at = timestamp(&body["last_refreshed_at"]);

    let second = app_router(build_state(&config).await.unwrap(), &config);
    let (_, body) = send(&second, "GET", "/status").await;
    assert_eq!(body["total_countries"], 3);
    let restored = timestamp(&body["last_refreshed_at"]);
    assert!((restored - refreshed_at).num_milliseconds().abs() <= 1);
}
