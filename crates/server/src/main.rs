use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::get,
    Router,
};
use server_api::ApiContext;
use storage::{seed_sample_brands, BrandStore, MemoryStore, Storage};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{
    healthz, http_brand_details, http_create_brand, http_create_form, http_delete_brand,
    http_delete_form, http_edit_brand, http_edit_form, http_list_brands,
};
use app_state::AppState;
use config::{load_settings, normalize_database_url, Settings, StoreBackend};

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let store = open_store(&settings).await?;
    if settings.seed_sample_data {
        let inserted = seed_sample_brands(store.as_ref())
            .await
            .context("failed to seed sample brands")?;
        info!(inserted, "seeded sample brands");
    }

    let state = AppState {
        api: ApiContext { store },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, backend = ?settings.store_backend, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn BrandStore>> {
    match settings.store_backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Sqlite => {
            let database_url = normalize_database_url(&settings.database_url);
            let storage = Storage::new(&database_url).await.map_err(|error| {
                error!(
                    %database_url,
                    %error,
                    "failed to open SQLite database; verify parent directory exists and permissions are correct"
                );
                error
            })?;
            Ok(Arc::new(storage))
        }
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/brands", get(http_list_brands).post(http_create_brand))
        .route("/brands/create", get(http_create_form))
        .route("/brands/:brand_id", get(http_brand_details))
        .route(
            "/brands/:brand_id/edit",
            get(http_edit_form).post(http_edit_brand),
        )
        .route(
            "/brands/:brand_id/delete",
            get(http_delete_form).post(http_delete_brand),
        )
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
