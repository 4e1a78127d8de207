// src/presentation/http/openapi.rs
use crate::application::dto::AuditLogDto;
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Documented shape of `PageDto<AuditLogDto>`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogPageResponse {
    pub content: Vec<AuditLogDto>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page_number: u32,
    pub page_size: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::audit::list_recent,
        crate::presentation::http::controllers::audit::list_by_actor,
        crate::presentation::http::controllers::audit::list_by_entity_type,
        crate::presentation::http::controllers::audit::history,
        crate::presentation::http::controllers::audit::list_in_range,
        crate::presentation::http::controllers::audit::search,
        crate::presentation::http::controllers::audit::count_by_action_type,
        crate::presentation::http::controllers::audit::count_by_entity_type,
        crate::presentation::http::controllers::audit::summary,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            AuditLogPageResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::application::dto::AuditLogDto,
            crate::application::dto::ActorDto,
            crate::application::dto::ActionTypeCountDto,
            crate::application::dto::EntityTypeCountDto,
            crate::application::dto::AuditSummaryDto,
            crate::domain::audit::ActionType
        )
    ),
    tags(
        (name = "Audit", description = "Read-only audit log queries for the PM dashboard"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Onboarding Audit API",
        description = "Audit log service for the instructor onboarding portal",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs` (which also serves `/openapi.json`) and Redoc at
/// `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Write the OpenAPI document to `OPENAPI_SNAPSHOT_PATH` (default
/// `spec/openapi.json`) and return the path written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let document = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(output_path)
}
