use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural
/// macros. The spec is generated at compile time from the route annotations;
/// changes to the API surface should be reflected there first.
///
/// # Endpoints
/// - Email Check: `POST /api/v1/check`
/// - Bulk Check: `POST /api/v1/bulk-check`
/// - Domain Listing: `GET /api/v1/domains`
/// - Domain Update: `POST /api/v1/update-domains`
/// - Health Check: `GET /api/v1/health`
/// - Statistics: `GET /api/v1/stats`
///
/// # Tags
/// 1. **Email Checking**: Classification endpoints
/// 2. **Domain Lists**: Operator access to the serving lists
/// 3. **Monitoring**: Health and statistics endpoints
/// 4. **GraphQL**: Unified query interface
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::email::check_email,
        crate::routes::email::bulk_check_emails,
        crate::routes::domains::list_domains,
        crate::routes::domains::update_domains,
        crate::routes::health::health,
        crate::routes::stats::stats,
    ),
    components(
        schemas(
            crate::routes::email::EmailRequest,
            crate::routes::email::BulkEmailRequest,
            crate::routes::domains::DomainListResponse,
            crate::models::Verdict,
            crate::models::DomainChecks,
            crate::models::RiskLevel,
            crate::models::BulkReport,
            crate::models::BulkEntry,
            crate::models::ErrorEntry,
            crate::models::BulkSummary,
            crate::models::RiskDistribution,
            crate::models::HealthReport,
            crate::models::HealthCheck,
            crate::models::StatsSnapshot
        )
    ),
    tags(
        (name = "Email Checking", description = "Single and bulk email classification"),
        (name = "Domain Lists", description = "Inspection and refresh of the domain lists"),
        (name = "Monitoring", description = "Service health and statistics"),
        (name = "GraphQL", description = "GraphQL API mirroring the REST surface")
    ),
    info(
        description = "Disposable email detection service with REST and GraphQL interfaces",
        title = "Disposable Email Checker API",
        version = "2.0.0",
    )
)]
pub struct ApiDoc;
