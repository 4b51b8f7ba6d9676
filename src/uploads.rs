use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use chrono::Utc;
use regex::Regex;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::structs::employee::FileDescriptor;

/// URL prefix the stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const WHITESPACE_RUN: &str = r"\s+";

/// Local directory holding uploaded documents.
#[derive(Clone, Debug)]
pub struct UploadDirectory {
    root: PathBuf,
    whitespace: Regex,
}

impl UploadDirectory {
    /// Opens the directory, creating it (and missing parents) first.
    pub async fn create(root: impl Into<PathBuf>) -> Result<UploadDirectory> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        let whitespace = Regex::new(WHITESPACE_RUN).map_err(|err| Error::internal(err.to_string()))?;
        Ok(UploadDirectory { root, whitespace })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Streams a file part to disk under a timestamped, sanitized name.
    #[tracing::instrument(name = "store upload", skip_all, fields(field = field.name()))]
    pub async fn store(&self, mut field: Field<'_>) -> Result<FileDescriptor> {
        let mimetype = field
            .content_type()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_owned();
        let filename = self.stored_filename(
            field.file_name().unwrap_or_default(),
            Utc::now().timestamp_millis(),
        );

        let mut file = tokio::fs::File::create(self.root.join(&filename)).await?;
        let mut size: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(%filename, size, "upload stored");
        Ok(FileDescriptor {
            path: public_path(&filename),
            filename,
            mimetype,
            size: i64::try_from(size).unwrap_or(i64::MAX),
        })
    }

    /// `<millis>-<name>`, where the name is the last path component of the
    /// client's filename with every whitespace run replaced by `_`.
    pub fn stored_filename(&self, original_name: &str, timestamp_millis: i64) -> String {
        let base = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        format!("{timestamp_millis}-{}", self.whitespace.replace_all(base, "_"))
    }
}

pub fn public_path(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}
