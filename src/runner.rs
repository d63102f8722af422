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
use crate::dataset::DatasetEntry;
use crate::error::RunError;
use crate::error::TransformError;
use crate::registry::Registry;
use crate::report::ExecutionResult;
use crate::report::Status;
use crate::transform::TransformOutput;
use crate::transform::data_uri;
use crate::variant::VariantDescriptor;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

/// Executes every (entry, variant) pair with at most `concurrency` in flight.
#[derive(Debug, Clone)]
pub struct Runner {
  store: Arc<ArtifactStore>,
  concurrency: usize,
}

impl Runner {
  pub fn new(store: ArtifactStore, concurrency: usize) -> Self {
    Self {
      store: Arc::new(store),
      concurrency: concurrency.max(1),
    }
  }

  /// Runs all pairs and returns one result per pair, in (entry, variant) order.
  ///
  /// Only a missing source image or a repeated entry id is fatal, and both
  /// are detected before any pair starts. Everything that goes wrong inside
  /// a pair is recorded as a failed result.
  pub async fn run(
    &self,
    entries: &[DatasetEntry],
    registry: &Registry,
  ) -> Result<Vec<ExecutionResult>, RunError> {
    let mut seen = HashSet::new();
    for entry in entries {
      if !seen.insert(entry.id.as_str()) {
        return Err(RunError::DuplicateEntry {
          id: entry.id.clone(),
        });
      }
      if !entry.source_path.is_file() {
        return Err(RunError::MissingSource {
          id: entry.id.clone(),
          path: entry.source_path.clone(),
        });
      }
    }

    let variants = registry.list_variants();
    let total = entries.len() * variants.len();
    tracing::info!(
      pairs = total,
      concurrency = self.concurrency,
      "--- Starting comparison run ---"
    );

    let semaphore = Arc::new(Semaphore::new(self.concurrency));
    let mut tasks = JoinSet::new();

    for (entry_index, entry) in entries.iter().enumerate() {
      for (variant_index, variant) in variants.iter().enumerate() {
        let index = entry_index * variants.len() + variant_index;
        let permit = semaphore.clone().acquire_owned().await?;
        let store = self.store.clone();
        let entry = entry.clone();
        let variant = variant.clone();
        let span = tracing::info_span!("pair", entry = %entry.id, variant = %variant.name);

        tasks.spawn(
          async move {
            let _permit = permit;
            let output_path = store.resolve_output_path(
              &entry.id,
              &variant.name,
              variant.result_file_type.extension(),
            );
            let fallback = (entry.id.clone(), variant.name.clone(), output_path.clone());

            let span = tracing::Span::current();
            let worker = tokio::task::spawn_blocking(move || {
              span.in_scope(|| execute_pair(&store, &entry, &variant, output_path))
            });
            let result = match worker.await {
              Ok(result) => result,
              Err(e) => {
                let (entry_id, variant_name, output_path) = fallback;
                failed(
                  entry_id,
                  variant_name,
                  output_path,
                  Duration::ZERO,
                  format!("transform panicked: {e}"),
                )
              }
            };
            (index, result)
          }
          .instrument(span),
        );
      }
    }

    let mut indexed = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
      indexed.push(joined?);
    }
    indexed.sort_by_key(|(index, _)| *index);

    let results: Vec<ExecutionResult> = indexed.into_iter().map(|(_, result)| result).collect();
    let failures = results.iter().filter(|r| !r.is_success()).count();
    tracing::info!(
      pairs = results.len(),
      failures,
      "--- Comparison run complete ---"
    );
    Ok(results)
  }
}

/// Runs one pair on the current (blocking) thread.
fn execute_pair(
  store: &ArtifactStore,
  entry: &DatasetEntry,
  variant: &VariantDescriptor,
  output_path: PathBuf,
) -> ExecutionResult {
  let prepared = store
    .clear_artifact(&output_path)
    .and_then(|()| store.ensure_directory(&output_path));
  if let Err(e) = prepared {
    tracing::warn!(error = %e, "Could not prepare output location");
    return failed(
      entry.id.clone(),
      variant.name.clone(),
      output_path,
      Duration::ZERO,
      e.to_string(),
    );
  }

  let started = Instant::now();
  let outcome = variant.transform.apply(&entry.source_path, &output_path);
  let elapsed = started.elapsed();

  let persisted = outcome.and_then(|output| persist(store, variant, &output_path, output));
  match persisted {
    Ok((byte_size, preview)) => {
      tracing::debug!(byte_size, duration = ?elapsed, "Variant finished");
      ExecutionResult {
        dataset_entry_id: entry.id.clone(),
        variant_name: variant.name.clone(),
        output_path,
        byte_size,
        duration_ms: as_millis(elapsed),
        raw_output: Some(preview),
        status: Status::Success,
        error: None,
      }
    }
    Err(e) => {
      tracing::warn!(error = %e, "Variant failed");
      failed(
        entry.id.clone(),
        variant.name.clone(),
        output_path,
        elapsed,
        e.to_string(),
      )
    }
  }
}

/// Makes sure the artifact is on disk and returns its size and preview.
fn persist(
  store: &ArtifactStore,
  variant: &VariantDescriptor,
  output_path: &Path,
  output: TransformOutput,
) -> Result<(u64, String), TransformError> {
  let preview = match output {
    TransformOutput::Written { preview } => preview,
    TransformOutput::Encoded { bytes } => {
      store.write_artifact(output_path, &bytes)?;
      data_uri(variant.result_file_type.media_type(), &bytes)
    }
  };
  let byte_size = store.artifact_size(output_path)?;
  Ok((byte_size, preview))
}

fn failed(
  dataset_entry_id: String,
  variant_name: String,
  output_path: PathBuf,
  elapsed: Duration,
  reason: String,
) -> ExecutionResult {
  ExecutionResult {
    dataset_entry_id,
    variant_name,
    output_path,
    byte_size: 0,
    duration_ms: as_millis(elapsed),
    raw_output: None,
    status: Status::Failed,
    error: Some(reason),
  }
}

fn as_millis(duration: Duration) -> f64 {
  duration.as_secs_f64() * 1000.0
}
