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
use crate::transform::Transform;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Output container of a variant.
///
/// Only used to pick the artifact extension and the preview media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultFileType {
  #[serde(rename = "jpg", alias = "jpeg")]
  Jpeg,
  #[serde(rename = "webp")]
  Webp,
  #[serde(rename = "png")]
  Png,
  #[serde(rename = "svg")]
  Svg,
}

impl ResultFileType {
  pub fn extension(self) -> &'static str {
    match self {
      ResultFileType::Jpeg => "jpg",
      ResultFileType::Webp => "webp",
      ResultFileType::Png => "png",
      ResultFileType::Svg => "svg",
    }
  }

  pub fn media_type(self) -> &'static str {
    match self {
      ResultFileType::Jpeg => "image/jpeg",
      ResultFileType::Webp => "image/webp",
      ResultFileType::Png => "image/png",
      ResultFileType::Svg => "image/svg+xml",
    }
  }

  pub fn is_raster(self) -> bool {
    !matches!(self, ResultFileType::Svg)
  }
}

impl fmt::Display for ResultFileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

/// A named placeholder technique under comparison.
///
/// Everything except `name`, `result_file_type` and `transform` is display
/// metadata that the runner passes through untouched.
#[derive(Clone)]
pub struct VariantDescriptor {
  pub name: String,
  pub title: String,
  pub description: String,
  pub result_file_type: ResultFileType,
  pub config: serde_json::Value,
  pub selected: bool,
  /// CSS blur radius (px) applied when presenting the preview.
  pub blur: Option<u32>,
  pub transform: Arc<dyn Transform>,
}

impl VariantDescriptor {
  /// Creates a descriptor with empty display metadata.
  pub fn new(
    name: impl Into<String>,
    result_file_type: ResultFileType,
    transform: impl Transform + 'static,
  ) -> Self {
    let name = name.into();
    Self {
      title: name.clone(),
      name,
      description: String::new(),
      result_file_type,
      config: serde_json::Value::Null,
      selected: false,
      blur: None,
      transform: Arc::new(transform),
    }
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_config(mut self, config: serde_json::Value) -> Self {
    self.config = config;
    self
  }

  pub fn with_blur(mut self, blur: u32) -> Self {
    self.blur = Some(blur);
    self
  }

  pub fn selected(mut self) -> Self {
    self.selected = true;
    self
  }
}

impl fmt::Debug for VariantDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VariantDescriptor")
      .field("name", &self.name)
      .field("result_file_type", &self.result_file_type)
      .field("selected", &self.selected)
      .field("transform", &self.transform)
      .finish_non_exhaustive()
  }
}
