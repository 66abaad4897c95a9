use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::checker::EmailChecker;
use crate::config::Config;

#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkEmailRequest {
    emails: Vec<String>,
}

/// # Email Check Endpoint
///
/// Classifies a single email address. The response is always a full verdict:
/// malformed addresses are reported through `is_valid_format` and the risk
/// score rather than an HTTP error.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field
///
/// ## Responses
/// - **200 OK**: Classification verdict
/// - **400 Bad Request**: Malformed request body
///
/// ## Example Request
/// ```json
/// { "email": "user@mailinator.com" }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/check",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Classification verdict", body = crate::models::Verdict),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Email Checking"
)]
#[post("/check")]
pub async fn check_email(
    req: web::Json<EmailRequest>,
    checker: web::Data<EmailChecker>,
) -> Result<impl Responder, actix_web::Error> {
    let verdict = checker.check(&req.email).await;
    Ok(HttpResponse::Ok().json(verdict))
}

/// # Bulk Email Check Endpoint
///
/// Classifies a batch of addresses concurrently and returns one result per
/// input, in input order, plus aggregate counts. A single failing entry does
/// not fail the batch.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `emails` array field
///
/// ## Responses
/// - **200 OK**: Per-entry results and summary
/// - **400 Bad Request**: Empty batch, or batch larger than the configured cap
///
/// ## Example Request
/// ```json
/// { "emails": ["user@mailinator.com", "user@gmail.com"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/bulk-check",
    request_body = BulkEmailRequest,
    responses(
        (status = 200, description = "Bulk results and summary", body = crate::models::BulkReport),
        (status = 400, description = "Empty or oversized batch")
    ),
    tag = "Email Checking"
)]
#[post("/bulk-check")]
pub async fn bulk_check_emails(
    req: web::Json<BulkEmailRequest>,
    checker: web::Data<EmailChecker>,
    config: web::Data<Config>,
) -> Result<impl Responder, actix_web::Error> {
    if req.emails.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "EMPTY_BATCH",
            "message": "The emails array must contain at least one address"
        })));
    }
    if req.emails.len() > config.bulk_max_emails {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "BATCH_TOO_LARGE",
            "message": format!(
                "A batch may contain at most {} addresses, got {}",
                config.bulk_max_emails,
                req.emails.len()
            )
        })));
    }

    let report = checker.check_bulk(&req.emails).await;
    Ok(HttpResponse::Ok().json(report))
}

/// Registers the email checking endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(check_email).service(bulk_check_emails);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::lists::DomainListStore;
    use crate::checker::resolver::{MockResolve, ResolutionStatus};
    use actix_web::{test, App};
    use serde_json::Value;
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            blacklist_sources: Vec::new(),
            bulk_max_emails: 3,
            ..Config::default()
        }
    }

    fn test_checker() -> EmailChecker {
        let mut resolver = MockResolve::new();
        resolver
            .expect_resolve()
            .returning(|_, _| ResolutionStatus::Resolvable);
        let lists = DomainListStore::from_sets(&["mailinator.com", "tempmail.org"], &["gmail.com"]);
        EmailChecker::new(&test_config(), lists, Arc::new(resolver))
    }

    async fn test_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_checker()))
                .app_data(web::Data::new(test_config()))
                .configure(crate::routes::configure),
        )
        .await
    }

    #[actix_web::test]
    async fn test_check_flags_disposable_address() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/v1/check")
            .set_json(json!({ "email": "user@mailinator.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], "user@mailinator.com");
        assert_eq!(body["is_disposable"], true);
        assert_eq!(body["risk_score"], 85);
        assert_eq!(body["risk_level"], "high");
        assert_eq!(body["checks"]["domain_blacklist"], true);
        assert_eq!(body["checks"]["mx_record_exists"], true);
    }

    #[actix_web::test]
    async fn test_check_accepts_malformed_address_with_a_verdict() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/v1/check")
            .set_json(json!({ "email": "not-an-email" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        // Bad addresses are data, not errors
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["is_valid_format"], false);
        assert_eq!(body["risk_score"], 100);
        assert_eq!(body["risk_level"], "critical");
        assert!(body["domain"].is_null());
    }

    #[actix_web::test]
    async fn test_check_rejects_missing_email_field() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/v1/check")
            .set_json(json!({ "address": "user@gmail.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_bulk_check_returns_ordered_results_and_summary() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/v1/bulk-check")
            .set_json(json!({
                "emails": ["user@mailinator.com", "broken", "user@gmail.com"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["email"], "user@mailinator.com");
        assert_eq!(results[1]["email"], "broken");
        assert_eq!(results[2]["email"], "user@gmail.com");

        assert_eq!(body["summary"]["total_checked"], 3);
        assert_eq!(body["summary"]["disposable_count"], 1);
        assert_eq!(body["summary"]["invalid_count"], 1);
        assert_eq!(body["summary"]["valid_count"], 1);
        assert_eq!(body["summary"]["error_count"], 0);
    }

    #[actix_web::test]
    async fn test_bulk_check_rejects_empty_batch() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/v1/bulk-check")
            .set_json(json!({ "emails": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "EMPTY_BATCH");
    }

    #[actix_web::test]
    async fn test_bulk_check_rejects_oversized_batch() {
        let app = test_app().await;

        // test_config caps batches at 3 addresses
        let req = test::TestRequest::post()
            .uri("/api/v1/bulk-check")
            .set_json(json!({
                "emails": ["a@x.example", "b@x.example", "c@x.example", "d@x.example"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "BATCH_TOO_LARGE");
    }
}
