// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// Saving generated media to disk.
//
// Used by the `postsmith-cli` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::chunk::InlineData;

/// Errors from writing generated media.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File extension (with leading dot) for a MIME type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        "image/svg+xml" => ".svg",
        _ => ".bin",
    }
}

/// Writes inline media as `generated_image_{n}{ext}` with a running index.
#[derive(Debug)]
pub struct ImageSaver {
    dir: PathBuf,
    next_index: usize,
}

impl ImageSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_index: 0,
        }
    }

    /// Save one payload and return the path written.
    pub fn save(&mut self, inline: &InlineData) -> Result<PathBuf, MediaError> {
        let file_name = format!(
            "generated_image_{}{}",
            self.next_index,
            extension_for_mime(&inline.mime_type)
        );
        let path = save_binary_file(&self.dir, &file_name, &inline.data)?;
        self.next_index += 1;
        Ok(path)
    }
}

/// Write `data` to `dir/file_name`, creating `dir` if needed.
pub fn save_binary_file(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf, MediaError> {
    fs::create_dir_all(dir).map_err(|source| MediaError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    let mut file = fs::File::create(&path).map_err(|source| MediaError::WriteFile {
        path: path.clone(),
        source,
    })?;
    file.write_all(data).map_err(|source| MediaError::WriteFile {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = data.len(), "file saved");
    Ok(path)
}
