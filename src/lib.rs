pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::po_service::PoService;
pub use config::AppConfig;
pub use db::{create_pool, DbPool};

use infrastructure::in_memory::InMemoryPoRepository;
use infrastructure::po_repo::DieselPoRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::system::ping,
        handlers::legacy::create_po,
        handlers::legacy::list_pos,
        handlers::purchase_orders::create_customer_po,
        handlers::purchase_orders::create_supplier_po,
        handlers::purchase_orders::list_customer_pos,
        handlers::purchase_orders::list_supplier_pos,
        handlers::purchase_orders::get_customer_po,
        handlers::purchase_orders::get_supplier_po,
        handlers::reports::top_materials,
        handlers::reports::monthly_sales,
        handlers::reports::pending_pos,
    ),
    tags(
        (name = "purchase-orders", description = "Priced customer and supplier POs"),
        (name = "reports", description = "Aggregates over stored POs"),
        (name = "legacy", description = "Original unpriced PO form"),
        (name = "system", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Pick the store from configuration: Postgres when `DATABASE_URL` is set,
/// otherwise an in-memory store that forgets everything on restart.
pub fn build_service(config: &AppConfig) -> io::Result<PoService> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).map_err(io::Error::other)?;
            run_migrations(&pool).map_err(io::Error::other)?;
            log::info!("connected to the purchase order database");
            Ok(PoService::new(DieselPoRepository::new(pool)))
        }
        None => {
            log::warn!("DATABASE_URL is not set, purchase orders are kept in memory only");
            Ok(PoService::new(InMemoryPoRepository::default()))
        }
    }
}

/// Register every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{legacy, purchase_orders, reports, system};

    cfg.route("/", web::get().to(system::index))
        .service(
            web::resource("/po")
                .app_data(web::JsonConfig::default().error_handler(errors::legacy_json_error))
                .route(web::post().to(legacy::create_po))
                .route(web::get().to(legacy::list_pos)),
        )
        .service(
            web::scope("/api")
                .app_data(web::JsonConfig::default().error_handler(errors::api_json_error))
                .route("/ping", web::get().to(system::ping))
                .service(
                    web::scope("/customer-po")
                        .route("", web::post().to(purchase_orders::create_customer_po))
                        .route("", web::get().to(purchase_orders::list_customer_pos))
                        .route("/{id}", web::get().to(purchase_orders::get_customer_po)),
                )
                .service(
                    web::scope("/supplier-po")
                        .route("", web::post().to(purchase_orders::create_supplier_po))
                        .route("", web::get().to(purchase_orders::list_supplier_pos))
                        .route("/{id}", web::get().to(purchase_orders::get_supplier_po)),
                )
                .service(
                    web::scope("/reports")
                        .route("/top-materials", web::get().to(reports::top_materials))
                        .route("/monthly-sales", web::get().to(reports::monthly_sales))
                        .route("/pending-pos", web::get().to(reports::pending_pos)),
                ),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: PoService,
    host: &str,
    port: u16,
) -> io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
