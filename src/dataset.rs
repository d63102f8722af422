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
use crate::error::DatasetError;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

/// One source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
  pub id: String,
  pub source_path: PathBuf,
}

impl DatasetEntry {
  pub fn new(id: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
    Self {
      id: id.into(),
      source_path: source_path.into(),
    }
  }
}

/// Lists the images directly under `source_root`, sorted by file name.
pub fn discover(source_root: &Path) -> Result<Vec<DatasetEntry>, DatasetError> {
  tracing::info!("Scanning for source images in {}", source_root.display());

  if !source_root.is_dir() {
    return Err(DatasetError::RootNotFound(source_root.to_path_buf()));
  }

  let read_dir_err = |source: std::io::Error| DatasetError::ReadDir {
    path: source_root.to_path_buf(),
    source,
  };

  let mut paths = Vec::new();
  for entry in fs::read_dir(source_root).map_err(read_dir_err)? {
    let path = entry.map_err(read_dir_err)?.path();
    if path.is_file() && has_image_extension(&path) {
      paths.push(path);
    }
  }
  paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

  let mut seen: HashMap<String, PathBuf> = HashMap::new();
  let mut entries = Vec::with_capacity(paths.len());
  for path in paths {
    let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
      continue;
    };
    if let Some(first) = seen.get(&id) {
      return Err(DatasetError::DuplicateId {
        id,
        first: first.clone(),
        second: path,
      });
    }
    seen.insert(id.clone(), path.clone());
    entries.push(DatasetEntry::new(id, path));
  }

  tracing::info!("Found {} source images", entries.len());
  Ok(entries)
}

fn has_image_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
    })
}
