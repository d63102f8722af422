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
use Commands::Render;
use Commands::Run;
use Commands::Variants;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use lqip_lab::cli::Cli;
use lqip_lab::cli::Commands;
use lqip_lab::cli::RunArgs;
use lqip_lab::config::Config;
use lqip_lab::logging::setup_tracing;
use lqip_lab::pipeline::build_registry;
use lqip_lab::pipeline::run_comparison;
use lqip_lab::pipeline::write_html;
use lqip_lab::report::read_report;

#[tokio::main]
async fn main() -> Result<()> {
  let _guard = setup_tracing()?;

  let Cli { command } = Cli::parse();
  let main_span = tracing::info_span!("orchestrator");
  let _enter = main_span.enter();

  match command {
    Run(run_args) => {
      tracing::info!("Initializing comparison run...");

      let config = Config::load(&run_args)?;
      let model = run_comparison(&config).await?;

      tracing::info!(
        rows = model.rows.len(),
        columns = model.columns.len(),
        "Comparison complete."
      );
    }
    Variants(registry_args) => {
      let config = Config::load(&RunArgs {
        registry: registry_args,
        ..RunArgs::default()
      })?;
      let registry = build_registry(&config)?;

      for variant in registry.list_variants() {
        let marker = if variant.selected { "*" } else { " " };
        println!(
          "{marker} {}\t{}\t{}",
          variant.name, variant.result_file_type, variant.title
        );
      }
    }
    Render { report, out } => {
      let model = read_report(&report)
        .with_context(|| format!("Failed to load report {}", report.display()))?;
      write_html(&model, &out)?;
    }
  }

  Ok(())
}
