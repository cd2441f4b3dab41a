use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use roster_engine::domain::catalog::ShiftCatalog;
use roster_engine::handlers::{catalog, cells, constraints, ledger};
use roster_engine::{CatalogStore, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Roster Engine API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting Roster Engine API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Seed the catalog store with the default service shifts; an
    // administrator replaces the snapshot through the catalog endpoint.
    let catalog_store = web::Data::new(CatalogStore::new(ShiftCatalog::default_catalog()));
    println!(
        "✅ Shift catalog seeded ({} definitions)",
        catalog_store.snapshot().len()
    );

    let client_base_url = config.client_base_url.clone();
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(catalog_store.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                    ])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/constraints")
                            .route("/parse", web::post().to(constraints::parse_constraint)),
                    )
                    .service(
                        web::scope("/cells").route("/validate", web::post().to(cells::validate)),
                    )
                    .service(web::scope("/ledger").route("/stats", web::post().to(ledger::stats)))
                    .service(
                        web::scope("/catalog")
                            .route("", web::get().to(catalog::get_catalog))
                            .route("", web::put().to(catalog::replace_catalog)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
