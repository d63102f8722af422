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

//! Static HTML rendering of a [`ReportModel`].

use crate::report::Cell;
use crate::report::Column;
use crate::report::ExecutionResult;
use crate::report::ReportModel;
use crate::report::Row;
use maud::DOCTYPE;
use maud::Markup;
use maud::PreEscaped;
use maud::html;
use std::path::Path;

const STYLE: &str = r#"
      body { font-family: sans-serif; background: black; padding: 2rem; color: white; }
      a { color: tomato; }
      a:visited { color: firebrick; }
      table { border-collapse: collapse; border-spacing: 0; table-layout: fixed; width: 100%; }
      td, th { width: 240px; position: relative; vertical-align: top; }
      th { text-align: left; padding: 1rem; }
      .description { font-weight: normal; font-size: 0.85em; }
      .selected { background: green; }
      .preview-wrapper { position: relative; overflow: hidden; }
      .preview { display: block; width: 100%; }
      .sizes { font-size: 0.8em; padding: 0.25rem 0.5rem; }
      .missing { padding: 1rem; color: #aaa; font-style: italic; }
"#;

/// Renders the report as a standalone HTML page.
///
/// `report_dir` is where the page will live; artifact links are made
/// relative to it when possible.
pub fn render(model: &ReportModel, report_dir: &Path) -> String {
  html! {
    (DOCTYPE)
    html {
      head {
        meta charset="UTF-8";
        title { "LQIP comparison" }
        style type="text/css" { (PreEscaped(STYLE)) }
      }
      body {
        h1 { "LQIP Comparison" }
        p {
          "Low Quality Image Placeholders are small previews shown while the full image loads. "
          "Each column is one technique, each row one source image."
        }
        table {
          thead {
            tr {
              th { "Original" }
              @for column in &model.columns {
                (header(column))
              }
            }
          }
          tbody {
            @for row in &model.rows {
              (body_row(model, row, report_dir))
            }
          }
        }
      }
    }
  }
  .into_string()
}

fn header(column: &Column) -> Markup {
  html! {
    th class=[column.selected.then_some("selected")] {
      (column.title)
      div.description { (column.description) }
    }
  }
}

fn body_row(model: &ReportModel, row: &Row, report_dir: &Path) -> Markup {
  html! {
    tr {
      td {
        a href=(link(&row.source_path, report_dir)) { (row.entry_id) }
      }
      @for (column, cell) in model.columns.iter().zip(&row.cells) {
        @match cell {
          Cell::Result(result) => {
            (result_cell(column, result, report_dir))
          },
          Cell::Missing { reason, .. } => {
            td.missing title=(reason.as_deref().unwrap_or("not run")) { "no result" }
          },
        }
      }
    }
  }
}

fn result_cell(column: &Column, result: &ExecutionResult, report_dir: &Path) -> Markup {
  let blur = column.blur.map(|px| format!("filter: blur({px}px)"));
  let src = result.raw_output.as_deref().unwrap_or_default();
  html! {
    td {
      div.preview-wrapper {
        img.preview src=(src) style=[blur];
      }
      div.sizes {
        a href=(link(&result.output_path, report_dir)) { (format_bytes(result.byte_size)) }
        " · "
        (format!("{:.1} ms", result.duration_ms))
      }
    }
  }
}

fn link(path: &Path, report_dir: &Path) -> String {
  pathdiff::diff_paths(path, report_dir)
    .unwrap_or_else(|| path.to_path_buf())
    .to_string_lossy()
    .replace('\\', "/")
}

fn format_bytes(bytes: u64) -> String {
  if bytes < 1024 {
    format!("{bytes} B")
  } else {
    format!("{:.1} KB", bytes as f64 / 1024.0)
  }
}
