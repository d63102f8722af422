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
mod common;

use common::count_files;
use common::write_png;
use lqip_lab::config::Config;
use lqip_lab::error::DatasetError;
use lqip_lab::error::LabError;
use lqip_lab::error::RegistryError;
use lqip_lab::pipeline::run_comparison;
use lqip_lab::render::render;
use lqip_lab::report::Cell;
use lqip_lab::report::Column;
use lqip_lab::report::ReportModel;
use lqip_lab::report::Row;
use lqip_lab::report::read_report;
use lqip_lab::variant::ResultFileType;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn config_in(root: &Path) -> Config {
  Config {
    source_root: root.join("original"),
    output_root: root.join("processed"),
    report_path: root.join("report.json"),
    html_path: Some(root.join("index.html")),
    concurrency: 2,
    variants_file: None,
    include_builtin: true,
    only: vec!["thumbnail".to_string(), "lqip-modern-webp-16".to_string()],
  }
}

#[tokio::test]
async fn test_run_comparison_end_to_end() {
  let temp = tempdir().unwrap();
  let config = config_in(temp.path());
  fs::create_dir_all(&config.source_root).unwrap();
  write_png(&config.source_root.join("cat.png"), 640, 480);
  write_png(&config.source_root.join("dog.png"), 320, 320);

  let model = run_comparison(&config).await.unwrap();

  assert_eq!(model.rows.len(), 2);
  assert_eq!(model.cell_count(), 4);
  assert!(
    model
      .rows
      .iter()
      .flat_map(|row| &row.cells)
      .all(|cell| cell.result().is_some_and(|r| r.byte_size > 0))
  );
  assert!(config.output_root.join("thumbnail/cat.jpg").is_file());
  assert!(config.output_root.join("lqip-modern-webp-16/dog.webp").is_file());

  let stored = read_report(&config.report_path).unwrap();
  assert_eq!(stored.columns, model.columns);
  assert_eq!(stored.rows.len(), 2);

  let html = fs::read_to_string(config.html_path.as_ref().unwrap()).unwrap();
  assert!(html.contains("LQIP modern webp @ 16px"));
  assert!(html.contains("filter: blur(20px)"));
  assert!(html.contains("processed/thumbnail/cat.jpg"));
}

#[tokio::test]
async fn test_duplicate_variants_abort_before_any_work() {
  let temp = tempdir().unwrap();
  let mut config = config_in(temp.path());
  fs::create_dir_all(&config.source_root).unwrap();
  write_png(&config.source_root.join("cat.png"), 32, 32);

  let variants_file = temp.path().join("variants.toml");
  fs::write(
    &variants_file,
    "[[variant]]\nname = \"thumbnail\"\nresult_file_type = \"png\"\ntransform = { kind = \"resize\", width = 10 }\n",
  )
  .unwrap();
  config.variants_file = Some(variants_file);

  let err = run_comparison(&config).await.unwrap_err();

  assert!(matches!(
    err,
    LabError::Registry(RegistryError::DuplicateName(_))
  ));
  assert!(!config.report_path.exists());
  assert_eq!(count_files(&config.output_root), 0);
}

#[tokio::test]
async fn test_missing_source_root_is_fatal() {
  let temp = tempdir().unwrap();
  let config = config_in(temp.path());

  let err = run_comparison(&config).await.unwrap_err();

  assert!(matches!(
    err,
    LabError::Dataset(DatasetError::RootNotFound(_))
  ));
  assert!(!config.report_path.exists());
}

#[test]
fn test_render_marks_missing_cells() {
  let model = ReportModel {
    columns: vec![Column {
      name: "broken".to_string(),
      title: "Broken <tool>".to_string(),
      description: String::new(),
      result_file_type: ResultFileType::Png,
      config: serde_json::Value::Null,
      selected: true,
      blur: None,
    }],
    rows: vec![Row {
      entry_id: "cat".to_string(),
      source_path: "public/original/cat.png".into(),
      cells: vec![Cell::Missing {
        variant_name: "broken".to_string(),
        reason: Some("exit \"3\"".to_string()),
      }],
    }],
  };

  let html = render(&model, Path::new("public"));

  assert!(html.contains("<th class=\"selected\">Broken &lt;tool&gt;"));
  assert!(html.contains("<td class=\"missing\" title=\"exit &quot;3&quot;\">no result</td>"));
  assert!(!html.contains("<tool>"));
  assert!(html.contains("href=\"original/cat.png\""));
}

#[test]
fn test_config_layers() {
  let temp = tempdir().unwrap();
  let file = temp.path().join("lqip.toml");
  fs::write(&file, "source_root = \"images\"\nconcurrency = 3\nonly = [\"thumbnail\"]\n").unwrap();

  let config = Config::from_figment(&Config::figment(Some(&file))).unwrap();
  assert_eq!(config.source_root, Path::new("images"));
  assert_eq!(config.concurrency, 3);
  assert_eq!(config.only, ["thumbnail"]);
  assert_eq!(config.output_root, Path::new("public/processed"));

  fs::write(&file, "concurrency = 0\n").unwrap();
  assert!(Config::from_figment(&Config::figment(Some(&file))).is_err());
}

#[test]
fn test_parse_example_config() {
  let config = Config::from_figment(&Config::figment(Some(Path::new("lqip.example.toml")))).unwrap();
  assert_eq!(config.concurrency, 4);
  assert!(config.include_builtin);
  assert_eq!(config.html_path.as_deref(), Some(Path::new("public/index.html")));
}
