use actix_web::{get, web, HttpResponse, Responder};

use crate::checker::EmailChecker;

/// # Service Statistics Endpoint
///
/// Returns a point-in-time snapshot of the engine's counters: list sizes,
/// cache occupancy, check and lookup totals, and uptime. Counters are read
/// without locking, so a snapshot taken under load is approximate across
/// fields but each field is exact.
///
/// ## Responses
///
/// - **200 OK**: Current statistics
///
/// ## Example Response
///
/// ```json
/// {
///   "disposable_domains_count": 3454,
///   "whitelist_domains_count": 120,
///   "cache_size": 212,
///   "cache_ttl_seconds": 3600,
///   "uptime_seconds": 86400,
///   "emails_checked": 15023,
///   "bulk_batches": 47,
///   "cache_hits": 9311,
///   "resolution_lookups": 4010,
///   "started_at": "2025-06-13T08:21:07.412Z"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Current service statistics", body = crate::models::StatsSnapshot)
    ),
    tag = "Monitoring"
)]
#[get("/stats")]
pub async fn stats(checker: web::Data<EmailChecker>) -> impl Responder {
    HttpResponse::Ok().json(checker.stats())
}

/// Registers the statistics endpoint.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(stats);
}
