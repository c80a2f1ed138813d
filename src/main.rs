use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_server::{app, config::Config, error::AppError, storage::UploadDir, AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=info,tower_http=info,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let uploads = UploadDir::new(config.upload_dir.clone());
    uploads.ensure_exists().await.map_err(|e| {
        AppError::from(e).with_context(format!("creating {}", uploads.root().display()))
    })?;

    let app = app(AppState::new(uploads));

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", config.bind, e)))?;
    tracing::info!(
        addr = %config.bind,
        upload_dir = %config.upload_dir.display(),
        "upload server running"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
