// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::error::TransformError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// Reads a source image into memory.
pub fn read_source(path: &Path) -> Result<Vec<u8>, TransformError> {
  fs::read(path).map_err(|e| TransformError::io(path, e))
}

/// Writes artifacts under a fixed output root.
///
/// Artifact paths are `{output_root}/{variant}/{entry}.{extension}`, so
/// re-running overwrites previous output instead of accumulating it.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
  output_root: PathBuf,
}

impl ArtifactStore {
  pub fn new(output_root: impl Into<PathBuf>) -> Self {
    Self {
      output_root: output_root.into(),
    }
  }

  pub fn resolve_output_path(&self, entry_id: &str, variant_name: &str, extension: &str) -> PathBuf {
    self
      .output_root
      .join(variant_name)
      .join(format!("{entry_id}.{extension}"))
  }

  /// Creates the parent directory of `path`. Safe to call concurrently.
  pub fn ensure_directory(&self, path: &Path) -> Result<(), TransformError> {
    match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => {
        fs::create_dir_all(parent).map_err(|e| TransformError::io(parent, e))
      }
      _ => Ok(()),
    }
  }

  pub fn write_artifact(&self, path: &Path, bytes: &[u8]) -> Result<(), TransformError> {
    fs::write(path, bytes).map_err(|e| TransformError::io(path, e))
  }

  /// Removes a leftover artifact from a previous run, if any.
  pub fn clear_artifact(&self, path: &Path) -> Result<(), TransformError> {
    match fs::remove_file(path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(TransformError::io(path, e)),
    }
  }

  pub fn artifact_size(&self, path: &Path) -> Result<u64, TransformError> {
    match fs::metadata(path) {
      Ok(meta) if meta.is_file() => Ok(meta.len()),
      Ok(_) => Err(TransformError::ArtifactMissing(path.to_path_buf())),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(TransformError::ArtifactMissing(path.to_path_buf()))
      }
      Err(e) => Err(TransformError::io(path, e)),
    }
  }
}
