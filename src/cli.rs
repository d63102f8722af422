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
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Compare low-quality image placeholder techniques")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Run every variant on every source image and write the report.
  Run(RunArgs),

  /// List the variants that a run would use, in column order.
  Variants(RegistryArgs),

  /// Render an HTML page from an existing report JSON file.
  Render {
    /// Report JSON produced by `lqip run`.
    #[arg(long, default_value = "public/report.json")]
    report: PathBuf,

    /// Where to write the HTML page.
    #[arg(long, default_value = "public/index.html")]
    out: PathBuf,
  },
}

/// Options that decide which variants are registered.
#[derive(Debug, Clone, Default, Args)]
pub struct RegistryArgs {
  /// TOML config file. Defaults to `lqip.toml` when present.
  #[arg(long, env = "LQIP_CONFIG")]
  pub config: Option<PathBuf>,

  /// TOML file with additional `[[variant]]` definitions.
  #[arg(long)]
  pub variants_file: Option<PathBuf>,

  /// Do not register the built-in variants.
  #[arg(long)]
  pub no_builtin: bool,

  /// Only run these variants (comma separated).
  #[arg(long, value_delimiter = ',')]
  pub only: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
  #[command(flatten)]
  pub registry: RegistryArgs,

  /// Directory holding the original images.
  #[arg(long)]
  pub source_root: Option<PathBuf>,

  /// Directory that receives `{variant}/{image}.{ext}` artifacts.
  #[arg(long)]
  pub output_root: Option<PathBuf>,

  /// Where to write the report JSON.
  #[arg(long)]
  pub report_path: Option<PathBuf>,

  /// Where to write the HTML page.
  #[arg(long)]
  pub html_path: Option<PathBuf>,

  /// Skip writing the HTML page.
  #[arg(long)]
  pub no_html: bool,

  /// Maximum number of transforms running at once.
  #[arg(long)]
  pub concurrency: Option<usize>,
}
