use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::checker::lists::ListKind;
use crate::checker::EmailChecker;

const DEFAULT_PAGE_LIMIT: usize = 50;
const MAX_PAGE_LIMIT: usize = 1000;

#[derive(Deserialize)]
pub struct DomainsQuery {
    /// "disposable" (alias "blacklist") or "whitelist"
    #[serde(rename = "type")]
    kind: Option<String>,
    search: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct DomainListResponse {
    #[serde(rename = "type")]
    pub kind: String,
    /// Domains matching the filter, before paging.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub domains: Vec<String>,
}

/// # Domain Listing Endpoint
///
/// Pages through the domain lists currently being served. Intended for
/// operators inspecting what a deployment actually matched against.
///
/// ## Request
/// - Method: GET
/// - Query Parameters:
///   - `type` (optional): `disposable` (default) or `whitelist`
///   - `search` (optional): substring filter, case-insensitive
///   - `limit` (optional): page size, default 50, capped at 1000
///   - `offset` (optional): start position within the sorted matches
///
/// ## Responses
/// - **200 OK**: One page of domains
/// - **400 Bad Request**: Unknown `type` value
#[utoipa::path(
    get,
    path = "/api/v1/domains",
    params(
        ("type" = Option<String>, Query, description = "List to read: disposable or whitelist"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("limit" = Option<usize>, Query, description = "Page size, capped at 1000"),
        ("offset" = Option<usize>, Query, description = "Start position in the sorted matches")
    ),
    responses(
        (status = 200, description = "One page of domains", body = DomainListResponse),
        (status = 400, description = "Unknown list type")
    ),
    tag = "Domain Lists"
)]
#[get("/domains")]
pub async fn list_domains(
    query: web::Query<DomainsQuery>,
    checker: web::Data<EmailChecker>,
) -> impl Responder {
    let kind = match query.kind.as_deref() {
        None => ListKind::Disposable,
        Some(raw) => match ListKind::parse(raw) {
            Some(kind) => kind,
            None => {
                return HttpResponse::BadRequest().json(json!({
                    "error": "UNKNOWN_LIST_TYPE",
                    "message": format!("unknown list type {raw:?}, expected disposable or whitelist")
                }));
            }
        },
    };

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let page = checker.domains(kind, query.search.as_deref(), offset, limit);
    HttpResponse::Ok().json(DomainListResponse {
        kind: match kind {
            ListKind::Disposable => "disposable".to_string(),
            ListKind::Whitelist => "whitelist".to_string(),
        },
        total: page.total,
        offset,
        limit,
        domains: page.domains,
    })
}

/// # Domain Update Endpoint
///
/// Fetches fresh blacklist data from the configured remote sources, merges
/// it with the list on disk, reloads both lists and swaps them in atomically.
/// With no sources configured this degrades to a reload from disk, which is
/// also how deployments pick up hand-edited list files.
///
/// ## Responses
/// - **200 OK**: Lists updated, body carries the new counts
/// - **500 Internal Server Error**: No source produced data, or the reload failed
#[utoipa::path(
    post,
    path = "/api/v1/update-domains",
    responses(
        (status = 200, description = "Domain lists updated"),
        (status = 500, description = "Update failed, previous lists keep serving")
    ),
    tag = "Domain Lists"
)]
#[post("/update-domains")]
pub async fn update_domains(
    checker: web::Data<EmailChecker>,
) -> Result<impl Responder, actix_web::Error> {
    match checker.update_domains().await {
        Ok((disposable, whitelisted)) => Ok(HttpResponse::Ok().json(json!({
            "status": "updated",
            "disposable_domains": disposable,
            "whitelist_domains": whitelisted,
            "timestamp": Utc::now().to_rfc3339()
        }))),
        Err(err) => {
            error!("domain list update failed: {err}");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "UPDATE_FAILED",
                "message": err.to_string()
            })))
        }
    }
}

/// Registers the domain list endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_domains).service(update_domains);
}
