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
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the lqip-lab library.
///
/// Every variant here is fatal: the run stops and no report is written.
/// Per-pair failures never surface as a `LabError`; they are recorded
/// as failed results instead.
#[derive(Error, Debug)]
pub enum LabError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Variant registry error: {0}")]
  Registry(#[from] RegistryError),

  #[error("Dataset error: {0}")]
  Dataset(#[from] DatasetError),

  #[error("Comparison run failed: {0}")]
  Run(#[from] RunError),

  #[error("Report error: {0}")]
  Report(#[from] ReportError),
}

/// Errors related to configuration resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Config file not found: {0}")]
  FileNotFound(PathBuf),

  #[error("Failed to resolve configuration: {0}")]
  Extract(#[from] Box<figment::Error>),

  #[error("concurrency must be at least 1, got {0}")]
  InvalidConcurrency(usize),
}

/// Errors related to building the variant registry (src/registry.rs).
#[derive(Error, Debug)]
pub enum RegistryError {
  #[error("Duplicate variant name '{0}' in registry")]
  DuplicateName(String),

  #[error(
    "Invalid variant name '{0}': use ASCII letters, digits, '-', '_' or '.' (and not '.' or '..')"
  )]
  InvalidName(String),

  #[error("Unknown variant '{name}'. Available: {available:?}")]
  UnknownVariant {
    name: String,
    available: Vec<String>,
  },

  #[error("Variant '{name}' uses a resize transform but targets non-raster type '{file_type}'")]
  UnsupportedFormat { name: String, file_type: String },

  #[error("Failed to read variants file: {path}")]
  ReadFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse variants file: {0}")]
  Parse(#[from] toml::de::Error),
}

/// Errors related to dataset discovery (src/dataset.rs).
#[derive(Error, Debug)]
pub enum DatasetError {
  #[error("Source directory not found: {0}")]
  RootNotFound(PathBuf),

  #[error("Failed to read source directory: {path}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Dataset id '{id}' is shared by {first} and {second}")]
  DuplicateId {
    id: String,
    first: PathBuf,
    second: PathBuf,
  },
}

/// Errors raised by a single transform invocation (src/transform).
///
/// These are always recorded against one (entry, variant) pair.
#[derive(Error, Debug)]
pub enum TransformError {
  #[error("I/O error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Image processing failed: {0}")]
  Image(#[from] image::ImageError),

  #[error("Failed to execute '{program}': {source}")]
  CommandSpawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Command '{program}' exited with {code:?}\n--- STDOUT ---\n{stdout}\n--- STDERR ---\n{stderr}")]
  CommandFailed {
    program: String,
    code: Option<i32>,
    stdout: String,
    stderr: String,
  },

  #[error("Transform reported success but wrote nothing at {0}")]
  ArtifactMissing(PathBuf),

  #[error("{0}")]
  Unsupported(String),
}

impl TransformError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    TransformError::Io {
      path: path.into(),
      source,
    }
  }
}

/// Errors related to the comparison run (src/runner.rs).
#[derive(Error, Debug)]
pub enum RunError {
  #[error("Source image for dataset entry '{id}' is missing: {path}")]
  MissingSource { id: String, path: PathBuf },

  #[error("Dataset entry id '{id}' appears more than once; its artifacts would collide")]
  DuplicateEntry { id: String },

  #[error("Worker task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  #[error("Worker pool closed unexpectedly")]
  PoolClosed(#[from] tokio::sync::AcquireError),
}

/// Errors related to reading and writing the report (src/report.rs, src/pipeline.rs).
#[derive(Error, Debug)]
pub enum ReportError {
  #[error("I/O error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to (de)serialize report: {0}")]
  Json(#[from] serde_json::Error),
}
