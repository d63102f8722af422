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
use crate::artifact::ArtifactStore;
use crate::config::Config;
use crate::dataset::discover;
use crate::error::LabError;
use crate::error::RegistryError;
use crate::error::ReportError;
use crate::registry::Registry;
use crate::render::render;
use crate::report::ReportModel;
use crate::report::aggregate;
use crate::report::write_report;
use crate::runner::Runner;
use std::fs;
use std::path::Path;
use tracing::Instrument;

/// Assembles the registry described by `config`.
pub fn build_registry(config: &Config) -> Result<Registry, RegistryError> {
  let mut registry = if config.include_builtin {
    Registry::builtin()?
  } else {
    Registry::new(Vec::new())?
  };

  if let Some(path) = &config.variants_file {
    tracing::info!("Loading variants from {}", path.display());
    registry = registry.extend(Registry::load(path)?)?;
  }

  registry.only(&config.only)
}

/// Runs the whole comparison and writes the report (and HTML page, if configured).
///
/// Fatal errors are returned before anything is written.
pub async fn run_comparison(config: &Config) -> Result<ReportModel, LabError> {
  let span = tracing::info_span!(
    "run_comparison",
    source_root = %config.source_root.display(),
    output_root = %config.output_root.display()
  );

  async {
    let registry = build_registry(config)?;
    tracing::info!(variants = ?registry.names(), "Registry ready");

    let entries = discover(&config.source_root)?;
    let runner = Runner::new(ArtifactStore::new(&config.output_root), config.concurrency);
    let results = runner.run(&entries, &registry).await?;

    let model = aggregate(&results, &entries, &registry);
    write_report(&model, &config.report_path)?;

    if let Some(html_path) = &config.html_path {
      write_html(&model, html_path)?;
    }

    Ok(model)
  }
  .instrument(span)
  .await
}

/// Renders `model` next to `html_path`.
pub fn write_html(model: &ReportModel, html_path: &Path) -> Result<(), ReportError> {
  let report_dir = html_path.parent().unwrap_or_else(|| Path::new(""));
  if !report_dir.as_os_str().is_empty() {
    fs::create_dir_all(report_dir).map_err(|source| ReportError::Io {
      path: report_dir.to_path_buf(),
      source,
    })?;
  }

  fs::write(html_path, render(model, report_dir)).map_err(|source| ReportError::Io {
    path: html_path.to_path_buf(),
    source,
  })?;
  tracing::info!("HTML page written to {}", html_path.display());
  Ok(())
}
