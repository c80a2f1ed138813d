pub mod config;
pub mod download;
pub mod error;
pub mod form;
pub mod storage;
pub mod upload;

use crate::download::download_file;
use crate::form::upload_form;
use crate::storage::UploadDir;
use crate::upload::upload_file;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub uploads: Arc<UploadDir>,
}

impl AppState {
    pub fn new(uploads: UploadDir) -> Self {
        Self {
            uploads: Arc::new(uploads),
        }
    }
}

/// Builds the router. Assumes the upload directory already exists.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        .route("/", get(upload_form))
        .route("/upload", post(upload_file))
        .route("/download", get(download_file))
        // uploads are unbounded
        .layer(DefaultBodyLimit::disable())
        .layer(middleware_stack)
        .with_state(state)
}
