use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web::Data};
use anyhow::Context;
use disposable_email_checker::checker::lists::DomainListStore;
use disposable_email_checker::checker::resolver::{MxResolver, Resolve};
use disposable_email_checker::checker::{EmailChecker, fetch};
use disposable_email_checker::config::Config;
use disposable_email_checker::graphql::schema::create_schema;
use disposable_email_checker::openapi::ApiDoc;
use log::{LevelFilter, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Disposable Email Checker Service Entry Point
///
/// Loads configuration, bootstraps the domain lists (fetching them from the
/// configured sources when no usable local copy exists) and launches the
/// Actix-web HTTP server with:
/// - REST endpoints under `/api/v1`
/// - GraphQL endpoint powered by Async-GraphQL
/// - Swagger UI for API documentation
///
/// # Endpoints
/// - REST: `/api/v1/check`, `/api/v1/bulk-check`, `/api/v1/domains`,
///   `/api/v1/update-domains`, `/api/v1/health`, `/api/v1/stats`
/// - GraphQL: `/api/v1/graphql` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// Environment variables, loaded from a `.env` file when present; see
/// [`Config`] for the full list. The server refuses to start without a
/// non-empty blacklist.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let config = Config::from_env().context("reading configuration")?;

    let lists = DomainListStore::open(&config.blacklist_path, &config.whitelist_path);
    if let Err(initial) = lists.reload() {
        if config.blacklist_sources.is_empty() {
            return Err(initial).context("blacklist unavailable and no sources configured");
        }
        warn!("blacklist not loadable ({initial}), fetching from configured sources");
        fetch::refresh_blacklist(&config.blacklist_sources, lists.blacklist_path())
            .await
            .context("fetching blacklist sources")?;
        lists.reload().context("blacklist still unusable after fetch")?;
    }

    let resolver: Arc<dyn Resolve> = Arc::new(MxResolver::new(config.resolver_timeout));
    let checker = EmailChecker::new(&config, lists, resolver);

    // Create GraphQL schema
    let schema = create_schema(checker.clone(), config.bulk_max_emails);

    let bind_addr = config.bind_addr.clone();
    log::info!("listening on http://{bind_addr}");

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(openapi.clone()))
            .app_data(Data::new(schema.clone()))
            .app_data(Data::new(checker.clone()))
            .app_data(Data::new(config.clone()))
            .configure(disposable_email_checker::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await?;

    Ok(())
}
