// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    routing::get,
    Router,
    extract::{Path, RawQuery, State},
    body::Bytes,
    http::StatusCode,
    Json,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use confstore_kernel::{ConfigStore, Record};

use crate::api::{ConfigPayload, MessageResponse, SearchQuery};
use crate::errors::ApiError;
use crate::telemetry;

/// Store shared by all handlers. Reads (`list`, `get`, `query`) take the
/// read lock and run concurrently; writes take the write lock.
pub type SharedStore = Arc<RwLock<ConfigStore>>;

pub fn shared(store: ConfigStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

pub fn build_router(state: SharedStore, request_timeout: Duration) -> Router {
    Router::new()
        .route("/configs", get(list_configs).post(add_config))
        .route(
            "/configs/:name",
            get(get_config)
                .put(put_config)
                .patch(patch_config)
                .delete(delete_config),
        )
        .route("/search", get(search_configs))
        .route("/health", get(health))
        // Observability
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse { message: "ok".to_string() })
}

async fn list_configs(State(state): State<SharedStore>) -> Json<Vec<Record>> {
    let store = state.read().await;
    telemetry::record_op("list");
    Json(store.list().to_vec())
}

async fn get_config(
    State(state): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let store = state.read().await;
    telemetry::record_op("get");
    let record = store.get(&name)?;
    Ok(Json(record.clone()))
}

async fn add_config(
    State(state): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = ConfigPayload::from_slice(&body)?.into_new_record()?;

    let mut store = state.write().await;
    telemetry::record_op("insert");
    store.insert(record.clone())?;
    telemetry::set_record_count(store.len());
    tracing::debug!("Inserted config {}", record.name);

    Ok((StatusCode::CREATED, Json(record)))
}

async fn put_config(
    State(state): State<SharedStore>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let record = ConfigPayload::from_slice(&body)?.into_update(&name)?;

    let mut store = state.write().await;
    telemetry::record_op("replace");
    store.replace(record.clone())?;
    tracing::debug!("Replaced config {}", name);

    Ok(Json(record))
}

async fn patch_config(
    State(state): State<SharedStore>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let partial = ConfigPayload::from_slice(&body)?.into_patch(&name)?;

    let mut store = state.write().await;
    telemetry::record_op("patch");
    let merged = store.patch(partial)?;
    tracing::debug!("Patched config {}", name);

    Ok(Json(merged.clone()))
}

async fn delete_config(
    State(state): State<SharedStore>,
    Path(name): Path<String>,
) -> StatusCode {
    let mut store = state.write().await;
    telemetry::record_op("delete");
    store.delete(&name);
    telemetry::set_record_count(store.len());
    StatusCode::NO_CONTENT
}

async fn search_configs(
    State(state): State<SharedStore>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Record>>, ApiError> {
    let SearchQuery { key, value } = SearchQuery::parse(raw.as_deref())?;

    let store = state.read().await;
    telemetry::record_op("query");
    Ok(Json(store.query(&key, &value)))
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Got signal: interrupt"),
        _ = terminate => tracing::info!("Got signal: terminated"),
    }
}

/// Serves `app` until `signal` resolves, then gives in-flight requests at most
/// `drain` to finish.
pub async fn serve<S>(
    listener: TcpListener,
    app: Router,
    drain: Duration,
    signal: S,
) -> std::io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut handle => {
            // Server stopped on its own.
            return res.map_err(std::io::Error::other)?;
        }
        _ = signal => {}
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(drain, &mut handle).await {
        Ok(res) => res.map_err(std::io::Error::other)?,
        Err(_) => {
            tracing::warn!("Shutdown drain of {:?} elapsed; stopping with connections still open", drain);
            handle.abort();
            Ok(())
        }
    }
}
