// HTTP-level tests: drive the router in-process with tower's oneshot
#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde_json::{json, Value};
use swift_codes::api::{router, AppState};
use swift_codes::{import_reader, setup_database};
use tower::ServiceExt;

const FIXTURE: &str = "\
COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,TOWN NAME,COUNTRY NAME,TIME ZONE
PL,BPKOPLPWXXX,BIC11,PKO BANK POLSKI,\"UL. PULAWSKA 15, WARSZAWA\",WARSZAWA,POLAND,Europe/Warsaw
PL,BPKOPLPWKRA,BIC11,PKO BANK POLSKI,\"RYNEK GLOWNY 31, KRAKOW\",KRAKOW,POLAND,Europe/Warsaw
PL,PKOPPLPWXXX,BIC11,BANK PEKAO,GRZYBOWSKA 53,WARSZAWA,POLAND,Europe/Warsaw
PL,PKOPPLPWGDA,BIC11,BANK PEKAO,,GDANSK,POLAND,Europe/Warsaw
US,CITIUS33XXX,BIC11,CITIBANK NA,399 PARK AVENUE,NEW YORK,UNITED STATES,America/New_York
";

// ── Test app builder ───────────────────────────────────────────

fn build_test_app() -> Router {
    let mut conn = Connection::open_in_memory().unwrap();
    setup_database(&conn).unwrap();
    import_reader(&mut conn, FIXTURE.as_bytes()).unwrap();
    router(AppState::new(conn))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/v1/swift-codes", Some(body.to_string())).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

fn add_body(code: &str, bank: &str, hq: bool) -> Value {
    json!({
        "swiftCode": code,
        "bankName": bank,
        "countryISO2": "PL",
        "countryName": "POLAND",
        "address": "WARSZAWA, GRZYBOWSKA 53",
        "isHeadquarter": hq
    })
}

// ── GET /health ────────────────────────────────────────────────

#[tokio::test]
async fn test_health_check() {
    let app = build_test_app();
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ── GET /v1/swift-codes/:code ──────────────────────────────────

#[tokio::test]
async fn test_headquarter_with_branches() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/BPKOPLPWXXX").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["swiftCode"], "BPKOPLPWXXX");
    assert_eq!(body["bankName"], "PKO BANK POLSKI");
    assert_eq!(body["countryISO2"], "PL");
    assert_eq!(body["countryName"], "POLAND");
    assert_eq!(body["address"], "UL. PULAWSKA 15, WARSZAWA");
    assert_eq!(body["isHeadquarter"], true);
    assert_eq!(body["branches"].as_array().unwrap().len(), 1);
    assert_eq!(body["branches"][0]["swiftCode"], "BPKOPLPWKRA");
    assert_eq!(body["branches"][0]["address"], "RYNEK GLOWNY 31, KRAKOW");
    assert_eq!(body["branches"][0]["isHeadquarter"], false);
}

#[tokio::test]
async fn test_branch_details_without_branches() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/PKOPPLPWGDA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHeadquarter"], false);
    assert_eq!(body["address"], "GDANSK, POLAND");
    assert!(body.get("branches").is_none());
}

#[tokio::test]
async fn test_eight_character_code() {
    let app = build_test_app();
    let (short_status, short) = get(&app, "/v1/swift-codes/bpkoplpw").await;
    let (_, full) = get(&app, "/v1/swift-codes/BPKOPLPWXXX").await;

    assert_eq!(short_status, StatusCode::OK);
    assert_eq!(short, full);
}

#[tokio::test]
async fn test_unknown_code_is_404() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/DEUTDEFFXXX").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["message"].as_str().unwrap().contains("not found"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_bad_length_is_400() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/BPKO").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid SWIFT code length"));
}

// ── GET /v1/swift-codes/country/:iso2 ──────────────────────────

#[tokio::test]
async fn test_country_listing() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/country/pl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryISO2"], "PL");
    assert_eq!(body["countryName"], "POLAND");

    let codes = body["swiftCodes"].as_array().unwrap();
    assert_eq!(codes.len(), 4);
    let listed: Vec<&str> = codes.iter().map(|c| c["swiftCode"].as_str().unwrap()).collect();
    assert_eq!(listed, vec!["BPKOPLPWKRA", "BPKOPLPWXXX", "PKOPPLPWGDA", "PKOPPLPWXXX"]);
    assert_eq!(codes[1]["isHeadquarter"], true);
    assert_eq!(codes[2]["isHeadquarter"], false);
    assert!(codes.iter().all(|c| c.get("branches").is_none()));
}

#[tokio::test]
async fn test_unknown_country_is_404() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/country/XY").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Country with ISO2 code XY not found"));
}

#[tokio::test]
async fn test_invalid_country_is_400() {
    let app = build_test_app();
    let (status, body) = get(&app, "/v1/swift-codes/country/P1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid country code format. Must be exactly 2 letters."));
}

// ── POST /v1/swift-codes ───────────────────────────────────────

#[tokio::test]
async fn test_add_then_get() {
    let app = build_test_app();
    let (status, body) = post(&app, add_body("BPKOPLPWWAW", "PKO BANK POLSKI", false)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "SWIFT code added successfully");

    let (status, body) = get(&app, "/v1/swift-codes/BPKOPLPWWAW").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bankName"], "PKO BANK POLSKI");
    assert_eq!(body["address"], "WARSZAWA, GRZYBOWSKA 53");
    assert_eq!(body["isHeadquarter"], false);

    let (_, hq) = get(&app, "/v1/swift-codes/BPKOPLPWXXX").await;
    assert_eq!(hq["branches"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_new_country_and_bank() {
    let app = build_test_app();
    let body = json!({
        "swiftCode": "DEUTDEFFXXX",
        "bankName": "DEUTSCHE BANK",
        "countryISO2": "de",
        "countryName": "germany",
        "address": "TAUNUSANLAGE 12",
        "isHeadquarter": true
    });

    let (status, _) = post(&app, body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, "/v1/swift-codes/country/DE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryName"], "GERMANY");
}

#[tokio::test]
async fn test_add_duplicate_is_409() {
    let app = build_test_app();
    let (status, body) = post(&app, add_body("BPKOPLPWXXX", "PKO BANK POLSKI", true)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_add_invalid_code_is_400() {
    let app = build_test_app();
    let (status, body) = post(&app, add_body("INVALID", "PKO BANK POLSKI", true)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid SWIFT code format"));
}

#[tokio::test]
async fn test_add_missing_fields_is_400() {
    let app = build_test_app();
    let body = json!({
        "swiftCode": "BPKOPLPWXXX",
        "address": "WARSZAWA, PULAWSKA 15",
        "isHeadquarter": true
    });
    let (status, body) = post(&app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn test_add_inconsistent_flag_is_400() {
    let app = build_test_app();
    let (status, body) = post(&app, add_body("BPKOPLPWWAW", "PKO BANK POLSKI", true)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Inconsistent headquarters flag"));
}

#[tokio::test]
async fn test_add_bank_name_mismatch_is_400() {
    let app = build_test_app();
    let (status, body) = post(&app, add_body("BPKOPLPWWAW", "BANK PEKAO", false)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Bank name mismatch"));
    assert!(message.contains("PKO BANK POLSKI"));
    assert!(message.contains("BANK PEKAO"));
}

#[tokio::test]
async fn test_add_malformed_json_is_400() {
    let app = build_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/swift-codes",
        Some("{\"swiftCode\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid request body"));
}

// ── DELETE /v1/swift-codes/:code ───────────────────────────────

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = build_test_app();
    let (status, body) = delete(&app, "/v1/swift-codes/BPKOPLPWKRA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SWIFT code deleted successfully");

    let (status, _) = get(&app, "/v1/swift-codes/BPKOPLPWKRA").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Headquarters and its bank survive
    let (status, hq) = get(&app, "/v1/swift-codes/BPKOPLPWXXX").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hq["branches"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_last_code_frees_base_code() {
    let app = build_test_app();
    let (status, _) = delete(&app, "/v1/swift-codes/CITIUS33").await;
    assert_eq!(status, StatusCode::OK);

    // Bank CITIUS33 is gone, so a different bank name is accepted now
    let body = json!({
        "swiftCode": "CITIUS33XXX",
        "bankName": "CITIGROUP",
        "countryISO2": "US",
        "countryName": "UNITED STATES",
        "address": "388 GREENWICH ST",
        "isHeadquarter": true
    });
    let (status, _) = post(&app, body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, details) = get(&app, "/v1/swift-codes/CITIUS33XXX").await;
    assert_eq!(details["bankName"], "CITIGROUP");
}

#[tokio::test]
async fn test_delete_errors() {
    let app = build_test_app();

    let (status, body) = delete(&app, "/v1/swift-codes/DEUTDEFFXXX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));

    let (status, body) = delete(&app, "/v1/swift-codes/BPK").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid SWIFT code length"));
}
