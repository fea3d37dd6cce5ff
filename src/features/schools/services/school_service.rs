use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::schools::dtos::{AddSchoolDto, SchoolWithDistanceDto};
use crate::features::schools::repositories::SchoolRepository;
use crate::shared::geo::format_distance_km;

pub const ADD_FAILED: &str = "Failed to add school.";
pub const FETCH_FAILED: &str = "Failed to fetch schools.";

/// Service for registering schools and ranking them by proximity
pub struct SchoolService {
    repository: Arc<dyn SchoolRepository>,
}

impl SchoolService {
    pub fn new(repository: Arc<dyn SchoolRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a school, returning its new id.
    ///
    /// The repository is not called when validation fails.
    pub async fn add(&self, dto: AddSchoolDto) -> Result<i64> {
        let school = dto.into_new_school().map_err(AppError::Validation)?;

        let id = self
            .repository
            .insert(&school)
            .await
            .map_err(|e| AppError::database_with_detail(ADD_FAILED, e))?;

        tracing::info!("School added: id={}, name={:?}", id, school.name);

        Ok(id)
    }

    /// All schools, nearest first, each annotated with its distance from
    /// (`latitude`, `longitude`)
    pub async fn list_by_distance(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<SchoolWithDistanceDto>> {
        let schools = self
            .repository
            .fetch_all()
            .await
            .map_err(|e| AppError::database(FETCH_FAILED, e))?;

        let mut annotated: Vec<SchoolWithDistanceDto> = schools
            .into_iter()
            .map(|school| {
                let distance =
                    format_distance_km(latitude, longitude, school.latitude, school.longitude);
                SchoolWithDistanceDto::new(school, distance)
            })
            .collect();

        // Order by the rounded value the caller sees, numerically; ties keep
        // fetch order
        annotated.sort_by(|a, b| a.distance_km().total_cmp(&b.distance_km()));

        tracing::debug!(
            "Listed {} schools around ({}, {})",
            annotated.len(),
            latitude,
            longitude
        );

        Ok(annotated)
    }
}
