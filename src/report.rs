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
use crate::dataset::DatasetEntry;
use crate::error::ReportError;
use crate::registry::Registry;
use crate::variant::ResultFileType;
use crate::variant::VariantDescriptor;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Success,
  Failed,
}

/// Outcome of running one variant on one dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
  pub dataset_entry_id: String,
  pub variant_name: String,
  pub output_path: PathBuf,
  pub byte_size: u64,
  pub duration_ms: f64,
  /// Preview data URI, present on success.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub raw_output: Option<String>,
  pub status: Status,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ExecutionResult {
  pub fn is_success(&self) -> bool {
    self.status == Status::Success
  }
}

/// Column header data, copied from the variant descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
  pub name: String,
  pub title: String,
  pub description: String,
  pub result_file_type: ResultFileType,
  pub config: serde_json::Value,
  pub selected: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub blur: Option<u32>,
}

impl From<&VariantDescriptor> for Column {
  fn from(variant: &VariantDescriptor) -> Self {
    Self {
      name: variant.name.clone(),
      title: variant.title.clone(),
      description: variant.description.clone(),
      result_file_type: variant.result_file_type,
      config: variant.config.clone(),
      selected: variant.selected,
      blur: variant.blur,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum Cell {
  Result(ExecutionResult),
  /// No usable result; keeps the table shape intact.
  Missing {
    variant_name: String,
    reason: Option<String>,
  },
}

impl Cell {
  pub fn result(&self) -> Option<&ExecutionResult> {
    match self {
      Cell::Result(result) => Some(result),
      Cell::Missing { .. } => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
  pub entry_id: String,
  pub source_path: PathBuf,
  pub cells: Vec<Cell>,
}

/// Rows follow dataset order; every row has one cell per column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
  pub columns: Vec<Column>,
  pub rows: Vec<Row>,
}

impl ReportModel {
  pub fn cell_count(&self) -> usize {
    self.rows.iter().map(|row| row.cells.len()).sum()
  }
}

/// Groups flat results into one row per entry and one column per variant.
///
/// The shape depends only on `entries` and `registry`; results that are
/// absent or failed become [`Cell::Missing`].
pub fn aggregate(
  results: &[ExecutionResult],
  entries: &[DatasetEntry],
  registry: &Registry,
) -> ReportModel {
  let by_key: HashMap<(&str, &str), &ExecutionResult> = results
    .iter()
    .map(|r| ((r.dataset_entry_id.as_str(), r.variant_name.as_str()), r))
    .collect();

  let columns = registry
    .list_variants()
    .iter()
    .map(Column::from)
    .collect::<Vec<_>>();

  let rows = entries
    .iter()
    .map(|entry| Row {
      entry_id: entry.id.clone(),
      source_path: entry.source_path.clone(),
      cells: columns
        .iter()
        .map(|column| match by_key.get(&(entry.id.as_str(), column.name.as_str())) {
          Some(result) if result.is_success() => Cell::Result((*result).clone()),
          Some(result) => Cell::Missing {
            variant_name: column.name.clone(),
            reason: result.error.clone(),
          },
          None => Cell::Missing {
            variant_name: column.name.clone(),
            reason: None,
          },
        })
        .collect(),
    })
    .collect();

  ReportModel { columns, rows }
}

pub fn write_report(model: &ReportModel, path: &Path) -> Result<(), ReportError> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|source| ReportError::Io {
      path: parent.to_path_buf(),
      source,
    })?;
  }
  let json = serde_json::to_string_pretty(model)?;
  fs::write(path, json).map_err(|source| ReportError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  tracing::info!("Report written to {}", path.display());
  Ok(())
}

pub fn read_report(path: &Path) -> Result<ReportModel, ReportError> {
  let raw = fs::read_to_string(path).map_err(|source| ReportError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(serde_json::from_str(&raw)?)
}
