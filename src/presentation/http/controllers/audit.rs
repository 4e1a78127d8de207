use crate::application::{
    dto::{
        ActionTypeCountDto, AuditLogDto, AuditSummaryDto, EntityTypeCountDto, PageDto,
    },
    queries::audit::{
        AuditHistoryQuery, ListAuditLogsByActorInRangeQuery, ListAuditLogsByActorQuery,
        ListAuditLogsByEntityTypeQuery, ListAuditLogsInRangeQuery, PageQuery,
        SearchAuditLogsQuery,
    },
};
use crate::domain::audit::FilterValue;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiPath, ApiQuery, Authenticated};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0).
    pub page: Option<i64>,
    /// Page size (default 20).
    pub size: Option<i64>,
}

impl From<&PageParams> for PageQuery {
    fn from(params: &PageParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActorAuditParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Inclusive RFC 3339 lower bound; requires `end`. Use `Z` or a
    /// `%2B`-encoded offset.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive RFC 3339 upper bound; requires `start`.
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeAuditParams {
    /// Inclusive RFC 3339 lower bound, e.g. `2024-01-01T00:00:00Z`. A `+hh:mm`
    /// offset must be sent as `%2Bhh:mm`.
    pub start: DateTime<Utc>,
    /// Inclusive RFC 3339 upper bound.
    pub end: DateTime<Utc>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchAuditParams {
    /// CREATE, UPDATE, DELETE, LOGIN or LOGOUT. Omit to match all.
    pub action_type: Option<String>,
    /// Omit to match all entity types.
    pub entity_type: Option<String>,
    /// RFC 3339 with `Z` or a `%2B`-encoded offset. Defaults to the Unix epoch.
    pub start: Option<DateTime<Utc>>,
    /// Defaults to now.
    pub end: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

fn filter_from_param(value: Option<String>) -> FilterValue<String> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .into()
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/recent",
    params(PageParams),
    responses(
        (status = 200, description = "Newest audit entries.", body = crate::presentation::http::openapi::AuditLogPageResponse),
        (status = 400, description = "Invalid paging.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_recent(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<Json<PageDto<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .recent_for_dashboard(&actor, PageQuery::from(&params))
        .await
        .into_http()?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/users/{user_id}",
    params(("user_id" = i64, Path, description = "Acting user id"), ActorAuditParams),
    responses(
        (status = 200, description = "Entries performed by one user.", body = crate::presentation::http::openapi::AuditLogPageResponse),
        (status = 400, description = "Invalid paging or range.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_by_actor(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<ActorAuditParams>,
) -> HttpResult<Json<PageDto<AuditLogDto>>> {
    let paging = PageQuery {
        page: params.page,
        size: params.size,
    };
    let queries = &state.services.audit_queries;

    let page = match (params.start, params.end) {
        (Some(start), Some(end)) => queries
            .list_by_actor_in_range(
                &actor,
                ListAuditLogsByActorInRangeQuery {
                    user_id,
                    start,
                    end,
                    paging,
                },
            )
            .await
            .into_http()?,
        (None, None) => queries
            .list_by_actor(&actor, ListAuditLogsByActorQuery { user_id, paging })
            .await
            .into_http()?,
        _ => {
            return Err(HttpError::bad_request(
                "start and end must be provided together",
            ));
        }
    };

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/entity-types/{entity_type}",
    params(("entity_type" = String, Path, description = "Resource class, e.g. Track"), PageParams),
    responses(
        (status = 200, description = "Entries for one resource class.", body = crate::presentation::http::openapi::AuditLogPageResponse),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_by_entity_type(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath(entity_type): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<Json<PageDto<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .list_by_entity_type(
            &actor,
            ListAuditLogsByEntityTypeQuery {
                entity_type,
                paging: PageQuery::from(&params),
            },
        )
        .await
        .into_http()?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/history/{entity_type}/{entity_id}",
    params(
        ("entity_type" = String, Path, description = "Resource class"),
        ("entity_id" = i64, Path, description = "Resource id")
    ),
    responses(
        (status = 200, description = "Full change history, oldest first.", body = [AuditLogDto]),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn history(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath((entity_type, entity_id)): ApiPath<(String, i64)>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let items = state
        .services
        .audit_queries
        .history(
            &actor,
            AuditHistoryQuery {
                entity_type,
                entity_id,
            },
        )
        .await
        .into_http()?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/range",
    params(RangeAuditParams),
    responses(
        (status = 200, description = "Entries within an inclusive time range.", body = crate::presentation::http::openapi::AuditLogPageResponse),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_in_range(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiQuery(params): ApiQuery<RangeAuditParams>,
) -> HttpResult<Json<PageDto<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .list_in_range(
            &actor,
            ListAuditLogsInRangeQuery {
                start: params.start,
                end: params.end,
                paging: PageQuery {
                    page: params.page,
                    size: params.size,
                },
            },
        )
        .await
        .into_http()?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/search",
    params(SearchAuditParams),
    responses(
        (status = 200, description = "Entries matching the optional filters.", body = crate::presentation::http::openapi::AuditLogPageResponse),
        (status = 400, description = "Unknown action type or invalid paging.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn search(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiQuery(params): ApiQuery<SearchAuditParams>,
) -> HttpResult<Json<PageDto<AuditLogDto>>> {
    let query = SearchAuditLogsQuery {
        action_type: filter_from_param(params.action_type),
        entity_type: filter_from_param(params.entity_type),
        start: params.start,
        end: params.end,
        paging: PageQuery {
            page: params.page,
            size: params.size,
        },
    };

    let page = state
        .services
        .audit_queries
        .search(&actor, query)
        .await
        .into_http()?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/stats/action-types",
    responses(
        (status = 200, description = "Row counts per action type.", body = [ActionTypeCountDto]),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn count_by_action_type(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<Vec<ActionTypeCountDto>>> {
    let counts = state
        .services
        .audit_queries
        .count_by_action_type(&actor)
        .await
        .into_http()?;
    Ok(Json(counts))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/stats/entity-types",
    responses(
        (status = 200, description = "Row counts per entity type, most frequent first.", body = [EntityTypeCountDto]),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn count_by_entity_type(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<Vec<EntityTypeCountDto>>> {
    let counts = state
        .services
        .audit_queries
        .count_by_entity_type(&actor)
        .await
        .into_http()?;
    Ok(Json(counts))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/stats/summary",
    responses(
        (status = 200, description = "Totals for the dashboard widgets.", body = AuditSummaryDto),
        (status = 403, description = "Caller is not a PM.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn summary(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<AuditSummaryDto>> {
    let summary = state
        .services
        .audit_queries
        .summary(&actor)
        .await
        .into_http()?;
    Ok(Json(summary))
}
