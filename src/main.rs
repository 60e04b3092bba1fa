use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kadra::config::Config;
use kadra::middleware::JwtAuth;
use kadra::modules::auth::controllers::{auth_controller, profile_controller};
use kadra::modules::costs::controllers::cost_controller;
use kadra::modules::employees::controllers::employee_controller;
use kadra::modules::reports::controllers::report_controller;
use kadra::modules::revenues::controllers::revenue_controller;
use kadra::modules::schedules::controllers::schedule_controller;
use kadra::modules::workplaces::controllers::workplace_controller;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kadra=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    tracing::info!("Starting kadra backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let security = config.security.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(security.clone()))
            .wrap(JwtAuth::new(security.jwt_secret.clone()))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .configure(auth_controller::configure)
            .configure(profile_controller::configure)
            .configure(employee_controller::configure)
            .configure(workplace_controller::configure)
            .configure(cost_controller::configure)
            .configure(revenue_controller::configure)
            .configure(schedule_controller::configure)
            .configure(report_controller::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "kadra"
    }))
}
