//! Upload receiver
//!
//! Reads the multipart `files` parts of a request into [`UploadedFile`]s.
//! Every part is consumed chunk by chunk at ingestion time, before any
//! module runs, so the measured size and the bytes a module may inspect are
//! the same read. A part stream cannot be read twice.

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use pashu_common::FileMeta;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};

/// Multipart field name carrying uploaded files
pub const FILES_FIELD: &str = "files";

/// Content type reported when a part declares none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One fully-read uploaded file
#[derive(Debug, Clone)]
pub struct UploadedFile {
    meta: FileMeta,
    content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            meta: FileMeta {
                name: name.into(),
                content_type: content_type.into(),
                size_bytes: content.len() as u64,
            },
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn content_type(&self) -> &str {
        &self.meta.content_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.meta.size_bytes
    }

    pub fn meta(&self) -> &FileMeta {
        &self.meta
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// Read every `files` part of a request
///
/// A missing or non-multipart body counts as an empty batch. Parts under
/// any other field name are skipped.
///
/// **Errors:**
/// - `EmptyBatch`: no `files` parts
/// - `MalformedUpload`: the multipart stream could not be parsed
/// - `UploadTooLarge`: the body exceeded the configured limit
pub async fn receive_batch(multipart: Option<Multipart>) -> GatewayResult<Vec<UploadedFile>> {
    let Some(mut multipart) = multipart else {
        return Err(GatewayError::EmptyBatch);
    };

    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(FILES_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let mut buffer = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(upload_error)? {
            buffer.extend_from_slice(&chunk);
        }

        debug!("Received '{}' ({}, {} bytes)", name, content_type, buffer.len());
        files.push(UploadedFile::new(name, content_type, Bytes::from(buffer)));
    }

    if files.is_empty() {
        return Err(GatewayError::EmptyBatch);
    }

    Ok(files)
}

fn upload_error(err: MultipartError) -> GatewayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::UploadTooLarge(err.body_text())
    } else {
        GatewayError::MalformedUpload(err.body_text())
    }
}
