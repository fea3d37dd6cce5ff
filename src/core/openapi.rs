use utoipa::{Modify, OpenApi};

use crate::features::schools::{dtos as schools_dtos, handlers as schools_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        schools_handlers::add_school,
        schools_handlers::list_schools,
    ),
    components(
        schemas(
            // Shared
            MessageResponse,
            ErrorResponse,
            // Schools
            schools_dtos::AddSchoolDto,
            schools_dtos::SchoolWithDistanceDto,
        )
    ),
    tags(
        (name = "schools", description = "School registration and proximity listing"),
    ),
    info(
        title = "Schools API",
        version = "0.1.0",
        description = "Register schools and list them by proximity",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_both_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/addSchool"));
        assert!(doc.paths.paths.contains_key("/listSchools"));
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Campus Finder".to_string(),
            version: "9.9.9".to_string(),
            description: "custom".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Campus Finder");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("custom"));
    }
}
