// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use confstore_kernel::ConfigStore;
use confstore_node::config::NodeConfig;
use confstore_node::server::{build_router, serve, shared, shutdown_signal};
use confstore_node::telemetry;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_telemetry() {
        eprintln!("failed to install metrics recorder: {}", e);
        return ExitCode::FAILURE;
    }

    let cfg = match NodeConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Initializing config node with config: {:?}", cfg);

    let store = if cfg.seed {
        match ConfigStore::seeded() {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Failed to seed example configs: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        ConfigStore::new()
    };
    tracing::info!("Loaded {} configs", store.len());
    telemetry::set_record_count(store.len());

    let app = build_router(shared(store), cfg.request_timeout);

    let listener = match TcpListener::bind(cfg.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", cfg.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}", cfg.bind_addr);

    match serve(listener, app, cfg.shutdown_drain, shutdown_signal()).await {
        Ok(()) => {
            tracing::info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
