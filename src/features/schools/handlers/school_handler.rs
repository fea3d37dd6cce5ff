use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::schools::dtos::{
    AddSchoolDto, ListSchoolsQuery, SchoolWithDistanceDto, INVALID_QUERY_POINT,
};
use crate::features::schools::services::SchoolService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Register a school
#[utoipa::path(
    post,
    path = "/addSchool",
    request_body = AddSchoolDto,
    responses(
        (status = 201, description = "School added", body = MessageResponse),
        (status = 400, description = "Invalid field or malformed body", body = ErrorResponse),
        (status = 500, description = "Database failure, driver detail in `err`", body = ErrorResponse)
    ),
    tag = "schools"
)]
pub async fn add_school(
    State(service): State<Arc<SchoolService>>,
    AppJson(dto): AppJson<AddSchoolDto>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    service.add(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("School added successfully.")),
    ))
}

/// List all schools, nearest first
///
/// Every school is annotated with its great-circle distance in kilometers
/// from the given point.
#[utoipa::path(
    get,
    path = "/listSchools",
    params(ListSchoolsQuery),
    responses(
        (status = 200, description = "Schools sorted by ascending distance", body = Vec<SchoolWithDistanceDto>),
        (status = 400, description = "Missing or non-numeric coordinates", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "schools"
)]
pub async fn list_schools(
    State(service): State<Arc<SchoolService>>,
    query: std::result::Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<Json<Vec<SchoolWithDistanceDto>>> {
    // Any unreadable query string (e.g. a repeated key) is the same client error
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Query rejected: {}", rejection.body_text());
        AppError::BadRequest(INVALID_QUERY_POINT.to_string())
    })?;
    let (latitude, longitude) = query.point().map_err(AppError::BadRequest)?;
    let schools = service.list_by_distance(latitude, longitude).await?;
    Ok(Json(schools))
}
