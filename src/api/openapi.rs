//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::types::{
    ClientTokenData, HealthData, NextLessonData, OwnershipData, ProgressRowData, ResumeData,
    WatchStatusRequest,
};
use crate::checkout::types::{SettlementReceipt, SettlementRequest};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HS256 token issued by the session service; `sub` is the user id",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LearnHub API",
        version = "1.0.0",
        description = "Course checkout settlement and lesson progress tracking.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::api::handlers::health_check,
        crate::api::handlers::complete_purchase,
        crate::api::handlers::client_token,
        crate::api::handlers::update_watch_status,
        crate::api::handlers::resume_course,
        crate::api::handlers::enroll_status,
        crate::api::handlers::progress_summary,
        crate::api::handlers::my_progress,
    ),
    components(
        schemas(
            HealthData,
            ClientTokenData,
            SettlementRequest,
            SettlementReceipt,
            WatchStatusRequest,
            NextLessonData,
            ResumeData,
            OwnershipData,
            ProgressRowData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and diagnostics"),
        (name = "Checkout", description = "Purchase settlement"),
        (name = "Enrollment", description = "Ownership and lesson progress"),
    )
)]
pub struct ApiDoc;
