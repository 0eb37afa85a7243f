// API Handlers - thin wrappers: lock connection, call service, shape response

use super::{ApiError, AppState};
use crate::dto::{AddSwiftCodeRequest, CountrySwiftCodesResponse, MessageResponse, SwiftCodeDetails};
use crate::service;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

/// GET /health - Health check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /v1/swift-codes/:swift_code - Details (with branches for headquarters)
pub async fn get_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<SwiftCodeDetails>, ApiError> {
    let conn = state.conn()?;
    let details = service::get_details(&conn, &swift_code)?;

    Ok(Json(details))
}

/// GET /v1/swift-codes/country/:country_iso2 - All codes of a country
pub async fn get_country_swift_codes(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<CountrySwiftCodesResponse>, ApiError> {
    let conn = state.conn()?;
    let response = service::get_by_country(&conn, &country_iso2)?;

    Ok(Json(response))
}

/// POST /v1/swift-codes - Add a SWIFT code
pub async fn add_swift_code(
    State(state): State<AppState>,
    payload: Result<Json<AddSwiftCodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let mut conn = state.conn()?;
    let message = service::add_record(&mut conn, &request)?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(message))))
}

/// DELETE /v1/swift-codes/:swift_code - Delete a SWIFT code
pub async fn delete_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.conn()?;
    let message = service::delete_record(&mut conn, &swift_code)?;

    Ok(Json(MessageResponse::new(message)))
}
