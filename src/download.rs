use crate::{error::AppError, AppState};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::fmt::Write;
use std::io::ErrorKind;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub filename: String,
}

pub async fn download_file(
    State(state): State<AppState>,
    Query(DownloadQuery { filename }): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let path = state.uploads.path_for(&filename);

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::not_found("file", filename))
        }
        Err(e) => {
            return Err(AppError::from(e).with_context(format!("opening {}", path.display())))
        }
    };
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(AppError::not_found("file", filename));
    }

    let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
    let disposition = HeaderValue::from_str(&content_disposition(&filename))
        .map_err(|e| AppError::Internal(format!("Bad Content-Disposition: {}", e)))?;

    tracing::info!(%filename, size = metadata.len(), "serving download");

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_str(mime_type.as_ref())
                    .map_err(|e| AppError::Internal(format!("Bad Content-Type: {}", e)))?,
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(metadata.len())),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

fn is_plain(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/')
}

/// `attachment; filename="..."` for names that need no escaping, otherwise the
/// RFC 5987 `filename*` form with the UTF-8 bytes percent-encoded.
pub fn content_disposition(filename: &str) -> String {
    if filename.bytes().all(is_plain) {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if is_plain(byte) {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }
    format!("attachment; filename*=utf-8''{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::content_disposition;

    #[test]
    fn plain_names_are_quoted() {
        assert_eq!(content_disposition("a.png"), "attachment; filename=\"a.png\"");
        assert_eq!(
            content_disposition("../secret.txt"),
            "attachment; filename=\"../secret.txt\""
        );
    }

    #[test]
    fn other_names_are_percent_encoded() {
        assert_eq!(
            content_disposition("my photo.jpg"),
            "attachment; filename*=utf-8''my%20photo.jpg"
        );
        assert_eq!(
            content_disposition("사진.png"),
            "attachment; filename*=utf-8''%EC%82%AC%EC%A7%84.png"
        );
        assert_eq!(
            content_disposition("a\"b.gif"),
            "attachment; filename*=utf-8''a%22b.gif"
        );
    }
}
