use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn, routing::get, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::schools::{routes as schools_routes, SchoolService};

/// Liveness only; does not touch the database
async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(config: &Config) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let docs = Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        docs.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        docs
    }
}

/// Full application router: docs, schools, health, and the shared layers
pub fn build_router(config: &Config, school_service: Arc<SchoolService>) -> Router {
    let health_route = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(swagger_routes(config))
        .merge(schools_routes::routes(school_service))
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AppConfig, DatabaseConfig, SwaggerConfig};
    use crate::features::schools::repositories::SchoolRepository;
    use crate::shared::test_helpers::{InMemorySchoolRepository, UnavailableSchoolRepository};
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};
    use uuid::Uuid;

    const X_REQUEST_ID: &str = "x-request-id";

    fn config(max_request_body_size: usize, credentials: Option<(&str, &str)>) -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
                max_request_body_size,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 3306,
                user: "schools".to_string(),
                password: String::new(),
                database: "schools".to_string(),
                max_connections: 10,
                min_connections: 0,
                acquire_timeout_secs: 5,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            swagger: SwaggerConfig {
                username: credentials.map(|(u, _)| u.to_string()),
                password: credentials.map(|(_, p)| p.to_string()),
                title: "Schools API".to_string(),
                version: "0.1.0".to_string(),
                description: "test".to_string(),
            },
        }
    }

    fn server(config: &Config, repository: Arc<dyn SchoolRepository>) -> TestServer {
        let service = Arc::new(SchoolService::new(repository));
        TestServer::new(build_router(config, service)).unwrap()
    }

    #[tokio::test]
    async fn test_health_does_not_touch_database() {
        let server = server(&config(1024, None), Arc::new(UnavailableSchoolRepository));

        let response = server.get("/health").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let server = server(
            &config(1024, None),
            Arc::new(InMemorySchoolRepository::default()),
        );

        let response = server
            .get("/health")
            .add_header(
                HeaderName::from_static(X_REQUEST_ID),
                HeaderValue::from_static("req-abc-123"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(X_REQUEST_ID), "req-abc-123");
    }

    #[tokio::test]
    async fn test_request_id_generated_when_absent() {
        let server = server(
            &config(1024, None),
            Arc::new(InMemorySchoolRepository::default()),
        );

        let response = server.get("/listSchools?latitude=0&longitude=0").await;

        response.assert_status_ok();
        let header = response.header(X_REQUEST_ID);
        let id = Uuid::parse_str(header.to_str().unwrap()).unwrap();
        assert_eq!(id.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let server = server(
            &config(1024, None),
            Arc::new(InMemorySchoolRepository::default()),
        );

        let response = server
            .get("/health")
            .add_header(
                axum::http::header::ORIGIN,
                HeaderValue::from_static("https://schools.example"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = server(
            &config(1024, None),
            Arc::new(InMemorySchoolRepository::default()),
        );

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc = response.json::<Value>();
        assert_eq!(doc["info"]["title"], "Schools API");
        assert!(doc["paths"]["/addSchool"].is_object());
        assert!(doc["paths"]["/listSchools"].is_object());
    }

    #[tokio::test]
    async fn test_openapi_document_behind_basic_auth() {
        let server = server(
            &config(1024, Some(("docs", "secret"))),
            Arc::new(InMemorySchoolRepository::default()),
        );

        server
            .get("/api-docs/openapi.json")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let value = format!("Basic {}", BASE64_STANDARD.encode("docs:secret"));
        server
            .get("/api-docs/openapi.json")
            .add_header(
                axum::http::header::AUTHORIZATION,
                HeaderValue::from_str(&value).unwrap(),
            )
            .await
            .assert_status_ok();

        // API routes stay open
        server
            .get("/listSchools?latitude=0&longitude=0")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let repo = Arc::new(InMemorySchoolRepository::default());
        let server = server(&config(64, None), repo.clone());

        let response = server
            .post("/addSchool")
            .json(&json!({
                "name": "N".repeat(200),
                "address": "123 Main St",
                "latitude": 12.9716,
                "longitude": 77.5946
            }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.json::<Value>()["message"].is_string());
        assert!(repo.schools().is_empty());
    }

    #[tokio::test]
    async fn test_body_within_limit_accepted() {
        let server = server(
            &config(1024, None),
            Arc::new(InMemorySchoolRepository::default()),
        );

        let response = server
            .post("/addSchool")
            .json(&json!({
                "name": "Test School",
                "address": "123 Main St",
                "latitude": 12.9716,
                "longitude": 77.5946
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
    }
}
