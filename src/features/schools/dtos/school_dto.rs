use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::schools::models::{NewSchool, School};
use crate::shared::validation::{first_error_message, non_blank_string, number_in_range};

pub const INVALID_NAME: &str = "Invalid name.";
pub const INVALID_ADDRESS: &str = "Invalid address.";
pub const INVALID_LATITUDE: &str = "Invalid latitude. Must be a number between -90 and 90.";
pub const INVALID_LONGITUDE: &str = "Invalid longitude. Must be a number between -180 and 180.";
pub const INVALID_QUERY_POINT: &str =
    "Invalid query parameters. latitude and longitude must be numbers.";

/// Order in which field failures are reported; only the first one is returned
const FIELD_ORDER: [&str; 4] = ["name", "address", "latitude", "longitude"];

/// Request DTO for registering a school.
///
/// Fields are kept as raw JSON so that a wrong type (e.g. a string latitude)
/// is reported with the field's own message instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddSchoolDto {
    #[serde(default)]
    #[schema(value_type = String, example = "Test School")]
    #[validate(custom(function = "validate_name"))]
    pub name: Value,

    #[serde(default)]
    #[schema(value_type = String, example = "123 Main St")]
    #[validate(custom(function = "validate_address"))]
    pub address: Value,

    #[serde(default)]
    #[schema(value_type = f64, minimum = -90.0, maximum = 90.0, example = 12.9716)]
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Value,

    #[serde(default)]
    #[schema(value_type = f64, minimum = -180.0, maximum = 180.0, example = 77.5946)]
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Value,
}

fn validate_name(value: &Value) -> Result<(), ValidationError> {
    non_blank_string(value, "name", INVALID_NAME)
}

fn validate_address(value: &Value) -> Result<(), ValidationError> {
    non_blank_string(value, "address", INVALID_ADDRESS)
}

fn validate_latitude(value: &Value) -> Result<(), ValidationError> {
    number_in_range(value, -90.0, 90.0, "latitude", INVALID_LATITUDE)
}

fn validate_longitude(value: &Value) -> Result<(), ValidationError> {
    number_in_range(value, -180.0, 180.0, "longitude", INVALID_LONGITUDE)
}

impl AddSchoolDto {
    /// Validate and convert into the typed record the repository inserts.
    ///
    /// On failure returns the message of the first failing field in
    /// name, address, latitude, longitude order.
    pub fn into_new_school(self) -> Result<NewSchool, String> {
        self.validate().map_err(|errors| {
            first_error_message(&errors, &FIELD_ORDER).unwrap_or_else(|| errors.to_string())
        })?;

        match (
            self.name,
            self.address,
            self.latitude.as_f64(),
            self.longitude.as_f64(),
        ) {
            (Value::String(name), Value::String(address), Some(latitude), Some(longitude)) => {
                Ok(NewSchool {
                    name,
                    address,
                    latitude,
                    longitude,
                })
            }
            // validate() has already rejected every other shape
            _ => Err(INVALID_NAME.to_string()),
        }
    }
}

/// Query params for listing schools by proximity
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSchoolsQuery {
    /// Latitude of the reference point, in degrees
    #[param(value_type = f64, example = 12.9716)]
    pub latitude: Option<String>,

    /// Longitude of the reference point, in degrees
    #[param(value_type = f64, example = 77.5946)]
    pub longitude: Option<String>,
}

impl ListSchoolsQuery {
    /// Parse the reference point. Absent, malformed and non-finite values are
    /// rejected rather than turned into NaN distances.
    pub fn point(&self) -> Result<(f64, f64), String> {
        let latitude = parse_coordinate(self.latitude.as_deref());
        let longitude = parse_coordinate(self.longitude.as_deref());

        latitude
            .zip(longitude)
            .ok_or_else(|| INVALID_QUERY_POINT.to_string())
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Response DTO for a school annotated with its distance to the query point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolWithDistanceDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometers, always two decimals (e.g. "12.34")
    #[schema(example = "12.34")]
    pub distance: String,
}

impl SchoolWithDistanceDto {
    pub fn new(school: School, distance: String) -> Self {
        Self {
            id: school.id,
            name: school.name,
            address: school.address,
            latitude: school.latitude,
            longitude: school.longitude,
            distance,
        }
    }

    /// Numeric value of `distance`, used for ordering
    pub fn distance_km(&self) -> f64 {
        self.distance.parse().unwrap_or(f64::NAN)
    }
}
