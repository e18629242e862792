//! Upload accumulation
//!
//! Turns an incoming request body into a single in-memory [`Upload`].
//! Multipart forms contribute a `data` text field and/or a file part; any
//! other body is read as one flat text stream.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use pastelink_domain::document::{DocumentError, Upload};
use tracing::{debug, error};

/// Name of the form field carrying a text payload
const DATA_FIELD: &str = "data";

/// Content type of a file part that does not declare one
const DEFAULT_PART_TYPE: &str = "text/plain";

/// Accumulate a request body into an upload
///
/// Returns either the completed upload or a single error; a failed body never
/// yields a partial upload.
///
/// # Errors
///
/// Returns `DocumentError::ConnectionError` if the body stream fails or the
/// multipart form cannot be read.
pub async fn accumulate(request: Request) -> Result<Upload, DocumentError> {
    let multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_multipart);

    if multipart {
        let form = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| {
                error!(error = %rejection, "Connection error");
                DocumentError::connection_error(rejection.to_string())
            })?;
        accumulate_multipart(form).await
    } else {
        accumulate_flat(request.into_body().into_data_stream()).await
    }
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"))
}

/// Read a multipart form until its closing boundary
///
/// The last `data` field or file part to arrive provides the payload. Only a
/// file part sets the content type.
async fn accumulate_multipart(mut form: Multipart) -> Result<Upload, DocumentError> {
    let mut payload = Vec::new();
    let mut content_type = None;

    while let Some(mut field) = form.next_field().await.map_err(multipart_error)? {
        if field.file_name().is_some() {
            content_type = Some(
                field
                    .content_type()
                    .unwrap_or(DEFAULT_PART_TYPE)
                    .to_string(),
            );

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                data.extend_from_slice(&chunk);
            }
            debug!(size = data.len(), content_type = ?content_type, "Received file part");
            payload = data;
        } else if field.name() == Some(DATA_FIELD) {
            payload = field.bytes().await.map_err(multipart_error)?.to_vec();
            debug!(size = payload.len(), "Received data field");
        }
    }

    Ok(match content_type {
        Some(content_type) => Upload::with_content_type(payload, content_type),
        None => Upload::new(payload),
    })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> DocumentError {
    error!(error = %err, "Connection error");
    DocumentError::connection_error(err.to_string())
}

/// Concatenate a flat body stream in arrival order
///
/// The body is decoded as UTF-8 text once complete; invalid sequences are
/// replaced. The first stream error aborts accumulation.
pub async fn accumulate_flat<S, E>(stream: S) -> Result<Upload, DocumentError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut payload = Vec::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => payload.extend_from_slice(&chunk),
            Err(err) => {
                error!(error = %err, "Connection error");
                return Err(DocumentError::connection_error(err.to_string()));
            }
        }
    }

    let text = match String::from_utf8(payload) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
    Ok(Upload::new(text.into_bytes()))
}
