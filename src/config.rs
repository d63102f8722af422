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
use crate::cli::RegistryArgs;
use crate::cli::RunArgs;
use crate::error::ConfigError;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "lqip.toml";

// --- Default Values ---
fn default_concurrency() -> usize {
  std::thread::available_parallelism()
    .map(|n| n.get())
    .unwrap_or(1)
}

/// Fully resolved configuration for a comparison run.
///
/// Layers, lowest priority first: built-in defaults, the TOML config file,
/// `LQIP_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub source_root: PathBuf,
  pub output_root: PathBuf,
  pub report_path: PathBuf,
  pub html_path: Option<PathBuf>,
  pub concurrency: usize,
  pub variants_file: Option<PathBuf>,
  pub include_builtin: bool,
  pub only: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_root: PathBuf::from("public/original"),
      output_root: PathBuf::from("public/processed"),
      report_path: PathBuf::from("public/report.json"),
      html_path: Some(PathBuf::from("public/index.html")),
      concurrency: default_concurrency(),
      variants_file: None,
      include_builtin: true,
      only: Vec::new(),
    }
  }
}

/// Command-line values; unset flags leave lower layers untouched.
#[derive(Debug, Default, Serialize)]
struct Overrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  source_root: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  output_root: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  report_path: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  html_path: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  concurrency: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  variants_file: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  include_builtin: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  only: Option<Vec<String>>,
}

impl Config {
  /// Builds the layered figment without extracting it.
  pub fn figment(config_file: Option<&Path>) -> Figment {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let figment = match config_file {
      Some(path) => figment.merge(Toml::file(path)),
      None => figment,
    };
    figment.merge(Env::prefixed("LQIP_").ignore(&["config", "log_file"]))
  }

  pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
    let config: Config = figment.extract().map_err(Box::new)?;
    config.validate()
  }

  pub fn load(args: &RunArgs) -> Result<Self, ConfigError> {
    let config_file = resolve_config_file(&args.registry)?;
    let overrides = Overrides {
      source_root: args.source_root.clone(),
      output_root: args.output_root.clone(),
      report_path: args.report_path.clone(),
      html_path: args.html_path.clone(),
      concurrency: args.concurrency,
      variants_file: args.registry.variants_file.clone(),
      include_builtin: args.registry.no_builtin.then_some(false),
      only: (!args.registry.only.is_empty()).then(|| args.registry.only.clone()),
    };

    let figment = Self::figment(config_file.as_deref()).merge(Serialized::defaults(overrides));
    let mut config = Self::from_figment(&figment)?;
    if args.no_html {
      config.html_path = None;
    }

    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
  }

  fn validate(self) -> Result<Self, ConfigError> {
    if self.concurrency == 0 {
      return Err(ConfigError::InvalidConcurrency(self.concurrency));
    }
    Ok(self)
  }
}

/// An explicit `--config` must exist; the default file is optional.
fn resolve_config_file(args: &RegistryArgs) -> Result<Option<PathBuf>, ConfigError> {
  match &args.config {
    Some(path) if path.is_file() => Ok(Some(path.clone())),
    Some(path) => Err(ConfigError::FileNotFound(path.clone())),
    None => {
      let default = PathBuf::from(DEFAULT_CONFIG_FILE);
      Ok(default.is_file().then_some(default))
    }
  }
}
