use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use hotel_ulin::{
    config::StorageBackend, create_app, init_observability, repositories::TableManager,
    shutdown_observability, AppState, Config, Metrics, Repositories, RouterLimits,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment().context("Failed to load configuration")?;
    println!("Configuration loaded successfully");

    init_observability(&config.observability).context("Failed to initialize observability")?;

    info!(
        "Starting {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Storage backend: {}", config.database.storage_backend);

    let metrics = Arc::new(Metrics::new().context("Failed to initialize metrics")?);

    let repositories = match config.database.storage_backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on restart");
            Repositories::in_memory()
        }
        StorageBackend::DynamoDb => {
            info!("Region: {}", config.database.region);
            info!(
                "DynamoDB Tables: rooms={}, menu={}, bookings={}, orders={}",
                config.database.rooms_table_name,
                config.database.menu_table_name,
                config.database.bookings_table_name,
                config.database.orders_table_name
            );

            let client = Arc::new(config.database.dynamodb_client().await);

            if config.database.auto_create_tables {
                TableManager::new(client.clone())
                    .create_all_tables(&config.database)
                    .await
                    .context("Failed to create DynamoDB tables")?;
                info!("DynamoDB tables ready");
            }

            Repositories::dynamodb(client, &config.database)
        }
    };

    if config.database.seed_on_startup {
        let report = repositories
            .seed_initializer()
            .run()
            .await
            .context("Failed to seed initial data")?;
        info!(
            rooms_created = report.rooms_created,
            menu_items_created = report.menu_items_created,
            "Seed complete"
        );
    }

    let state = AppState::new(
        &repositories,
        metrics,
        config.server.public_base_url.clone(),
    );
    let app = create_app(
        state,
        RouterLimits {
            request_timeout: config.server.request_timeout(),
            max_request_size: config.server.max_request_size,
        },
    );

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_observability().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
