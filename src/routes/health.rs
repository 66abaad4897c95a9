use actix_web::{get, web, HttpResponse, Responder};

use crate::checker::EmailChecker;

/// # Health Check Endpoint
///
/// Reports the engine's component health: loaded domain lists, resolver
/// recency, cache occupancy and the classification pipeline itself. The
/// probe runs offline and does not spend a DNS lookup.
///
/// ## Responses
///
/// - **200 OK**: Service is healthy (warnings allowed)
/// - **503 Service Unavailable**: At least one component check failed
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-06-14T08:21:07.412Z",
///   "checks": {
///     "domain_lists": { "status": "healthy", "message": "3454 disposable, 120 whitelisted domains loaded" }
///   }
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = crate::models::HealthReport),
        (status = 503, description = "Service is unhealthy", body = crate::models::HealthReport)
    ),
    tag = "Monitoring"
)]
#[get("/health")]
pub async fn health(checker: web::Data<EmailChecker>) -> impl Responder {
    let report = checker.health().await;
    if report.is_healthy() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}

/// Registers the health endpoint.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
