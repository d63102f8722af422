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
#![allow(dead_code)]

use image::Rgb;
use image::RgbImage;
use lqip_lab::dataset::DatasetEntry;
use lqip_lab::error::TransformError;
use lqip_lab::transform::Transform;
use lqip_lab::transform::TransformOutput;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Hands back `n` bytes for the runner to write.
#[derive(Debug)]
pub struct FixedBytes(pub usize);

impl Transform for FixedBytes {
  fn apply(&self, _source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    Ok(TransformOutput::Encoded {
      bytes: vec![0xAB; self.0],
    })
  }
}

#[derive(Debug)]
pub struct AlwaysFails;

impl Transform for AlwaysFails {
  fn apply(&self, _source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    Err(TransformError::Unsupported("boom".to_string()))
  }
}

/// Writes the artifact itself and returns a fixed preview.
#[derive(Debug)]
pub struct WritesDirectly;

impl Transform for WritesDirectly {
  fn apply(&self, _source: &Path, destination: &Path) -> Result<TransformOutput, TransformError> {
    fs::write(destination, "<svg/>").map_err(|source| TransformError::Io {
      path: destination.to_path_buf(),
      source,
    })?;
    Ok(TransformOutput::Written {
      preview: "data:image/svg+xml;base64,PHN2Zy8+".to_string(),
    })
  }
}

/// Claims to have written the artifact but never does.
#[derive(Debug)]
pub struct ClaimsWritten;

impl Transform for ClaimsWritten {
  fn apply(&self, _source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    Ok(TransformOutput::Written {
      preview: "data:,".to_string(),
    })
  }
}

#[derive(Debug)]
pub struct Panics;

impl Transform for Panics {
  fn apply(&self, _source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    panic!("encoder crashed");
  }
}

/// Sleeps before answering; the delay depends on the source name so that
/// pairs finish out of order under concurrency.
#[derive(Debug)]
pub struct Sleepy;

impl Transform for Sleepy {
  fn apply(&self, source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    let len = source.file_stem().map(|s| s.len()).unwrap_or(0) as u64;
    thread::sleep(Duration::from_millis(40_u64.saturating_sub(len * 10)));
    Ok(TransformOutput::Encoded {
      bytes: source.to_string_lossy().as_bytes().to_vec(),
    })
  }
}

/// Writes a small gradient PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
  let img = RgbImage::from_fn(width, height, |x, y| {
    Rgb([(x * 4 % 256) as u8, (y * 4 % 256) as u8, 128])
  });
  img.save(path).unwrap();
}

/// Creates placeholder source files (content is irrelevant to fake transforms).
pub fn fake_dataset(dir: &Path, ids: &[&str]) -> Vec<DatasetEntry> {
  fs::create_dir_all(dir).unwrap();
  ids
    .iter()
    .map(|id| {
      let path = dir.join(format!("{id}.png"));
      fs::write(&path, b"not really a png").unwrap();
      DatasetEntry::new(*id, path)
    })
    .collect()
}

pub fn count_files(dir: &Path) -> usize {
  if !dir.exists() {
    return 0;
  }
  fs::read_dir(dir)
    .unwrap()
    .map(|entry| {
      let path = entry.unwrap().path();
      if path.is_dir() { count_files(&path) } else { 1 }
    })
    .sum()
}
