use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use gallery_backend::{
    db::postgres::{close_pool, create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    json_limit,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    web::cors::build_cors,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => {
            init_tracing(cfg.log_json);
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {}", e);
            std::io::Error::other(e)
        })?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(std::io::Error::other)?;
    }

    let app_state = web::Data::new(
        AppState::new(&config, pool.clone())
    );

    let server_addr = config.server_addr();
    let body_limit = json_limit(&config);
    let cors_origins = config.cors_origins();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, body_limit))
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(server_addr)?
    .run();

    let handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let result = tokio::select! {
        res = &mut server_task => res.map_err(std::io::Error::other).and_then(|r| r),
        _ = shutdown_signal() => {
            handle.stop(true).await;
            server_task.await.map_err(std::io::Error::other).and_then(|r| r)
        }
    };

    close_pool(pool).await;
    tracing::info!("Server stopped");

    result
}
