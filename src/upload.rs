use crate::{error::AppError, AppState};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tokio::{fs::File, io::AsyncWriteExt};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

/// Streams the `file` field into `<upload dir>/<client filename>`, replacing
/// whatever was stored under that name. The name is used verbatim.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(field = ?field.name(), "skipping multipart field");
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::validation(FILE_FIELD, "Expected a file upload"))?;

        let path = state.uploads.path_for(&filename);
        let mut file = File::create(&path)
            .await
            .map_err(|e| AppError::from(e).with_context(format!("creating {}", path.display())))?;

        // A failure part way through leaves the truncated file behind.
        let mut written: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::from(e).with_context(format!("writing {}", path.display())))?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(%filename, bytes = written, "stored upload");

        return Ok(Json(UploadResponse {
            message: "Upload complete".to_string(),
            filename,
        }));
    }

    Err(AppError::validation(FILE_FIELD, "Field required"))
}
