use actix_web::web;

/// # Email Checking Endpoints
///
/// Single and bulk classification:
///
/// - `POST /api/v1/check`: classify one address
/// - `POST /api/v1/bulk-check`: classify a batch, bounded concurrency,
///   results in input order
pub mod email;

/// # Domain List Endpoints
///
/// Operator access to the serving lists:
///
/// - `GET /api/v1/domains`: page through the blacklist or whitelist
/// - `POST /api/v1/update-domains`: fetch remote sources and reload
pub mod domains;

/// # Health Check Endpoint
///
/// `GET /api/v1/health`: component health, `200` when serving, `503` when a
/// component check fails.
pub mod health;

/// # Statistics Endpoint
///
/// `GET /api/v1/stats`: counter snapshot (list sizes, cache occupancy,
/// checks performed, uptime).
pub mod stats;

/// # GraphQL Endpoints
///
/// `POST /api/v1/graphql` for queries, `GET /api/v1/playground` for the
/// interactive console.
pub mod graphql;

/// # API Route Configuration
///
/// Mounts every endpoint under the `/api/v1` base path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(email::configure_routes)
            .configure(domains::configure_routes)
            .configure(health::configure_routes)
            .configure(stats::configure_routes)
            .configure(graphql::configure_routes),
    );
}
