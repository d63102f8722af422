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
use crate::error::RegistryError;
use crate::transform::CommandTransform;
use crate::transform::ResizeTransform;
use crate::variant::ResultFileType;
use crate::variant::VariantDescriptor;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Blur applied to tiny placeholders when they are displayed.
const LQIP_BLUR_PX: u32 = 20;

/// Width of the classic blurred `lqip` preview.
const LQIP_WIDTH: u32 = 10;

/// Encoder quality used by the tiny placeholder variants.
const LQIP_QUALITY: u8 = 20;

/// An ordered, validated list of variants.
///
/// Names are unique and path-safe; order is the report's column order.
#[derive(Debug, Clone)]
pub struct Registry {
  variants: Vec<VariantDescriptor>,
}

impl Registry {
  pub fn new(variants: Vec<VariantDescriptor>) -> Result<Self, RegistryError> {
    let mut seen = HashSet::new();
    for variant in &variants {
      if !is_valid_name(&variant.name) {
        return Err(RegistryError::InvalidName(variant.name.clone()));
      }
      if !seen.insert(variant.name.as_str()) {
        return Err(RegistryError::DuplicateName(variant.name.clone()));
      }
    }
    Ok(Self { variants })
  }

  /// The default comparison set.
  pub fn builtin() -> Result<Self, RegistryError> {
    let mut variants = vec![
      VariantDescriptor::new(
        "thumbnail",
        ResultFileType::Jpeg,
        ResizeTransform::new(300, ResultFileType::Jpeg),
      )
      .with_title("Thumbnail")
      .with_description("300px JPEG thumbnail of the original image.")
      .with_config(json!({ "resize": 300, "format": "jpeg", "quality": 80 })),
      VariantDescriptor::new(
        "lqip",
        ResultFileType::Jpeg,
        ResizeTransform::new(LQIP_WIDTH, ResultFileType::Jpeg).with_quality(LQIP_QUALITY),
      )
      .with_title("LQIP")
      .with_description(format!(
        "{LQIP_WIDTH}px JPEG preview, shown blurred with a {LQIP_BLUR_PX}px filter."
      ))
      .with_config(json!({ "resize": LQIP_WIDTH, "format": "jpeg", "quality": LQIP_QUALITY }))
      .with_blur(LQIP_BLUR_PX),
    ];

    for size in [8, 16, 32] {
      for format in [ResultFileType::Webp, ResultFileType::Jpeg] {
        let lossless = format == ResultFileType::Webp;
        let label = if lossless { "webp" } else { "jpeg" };
        let mut variant = VariantDescriptor::new(
          format!("lqip-modern-{label}-{size}"),
          format,
          ResizeTransform::new(size, format).with_quality(LQIP_QUALITY),
        )
        .with_title(format!("LQIP modern {label} @ {size}px"))
        .with_description(format!(
          "{size}px {label} thumbnail, shown blurred with a {LQIP_BLUR_PX}px filter."
        ))
        .with_config(if lossless {
          json!({ "outputFormat": label, "resize": size, "lossless": true })
        } else {
          json!({ "outputFormat": label, "resize": size, "quality": LQIP_QUALITY })
        })
        .with_blur(LQIP_BLUR_PX);
        if size == 16 && format == ResultFileType::Webp {
          variant = variant.selected();
        }
        variants.push(variant);
      }
    }

    Self::new(variants)
  }

  /// Parses a variants file made of `[[variant]]` tables.
  pub fn from_toml_str(raw: &str) -> Result<Self, RegistryError> {
    let file: VariantsFile = toml::from_str(raw)?;
    let variants = file
      .variants
      .into_iter()
      .map(VariantSpec::into_descriptor)
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(variants)
  }

  pub fn load(path: &Path) -> Result<Self, RegistryError> {
    let raw = fs::read_to_string(path).map_err(|source| RegistryError::ReadFile {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&raw)
  }

  /// Appends `other` after `self`, rejecting name clashes.
  pub fn extend(self, other: Registry) -> Result<Self, RegistryError> {
    let mut variants = self.variants;
    variants.extend(other.variants);
    Self::new(variants)
  }

  /// Keeps only the named variants, in registry order.
  pub fn only(self, names: &[String]) -> Result<Self, RegistryError> {
    if names.is_empty() {
      return Ok(self);
    }

    for name in names {
      if !self.variants.iter().any(|v| &v.name == name) {
        return Err(RegistryError::UnknownVariant {
          name: name.clone(),
          available: self.names(),
        });
      }
    }

    let variants = self
      .variants
      .into_iter()
      .filter(|v| names.contains(&v.name))
      .collect();
    Ok(Self { variants })
  }

  pub fn list_variants(&self) -> &[VariantDescriptor] {
    &self.variants
  }

  pub fn names(&self) -> Vec<String> {
    self.variants.iter().map(|v| v.name.clone()).collect()
  }
}

fn is_valid_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[derive(Debug, Deserialize)]
struct VariantsFile {
  #[serde(default, rename = "variant")]
  variants: Vec<VariantSpec>,
}

#[derive(Debug, Deserialize)]
struct VariantSpec {
  name: String,
  title: Option<String>,
  #[serde(default)]
  description: String,
  result_file_type: ResultFileType,
  #[serde(default)]
  config: serde_json::Value,
  #[serde(default)]
  selected: bool,
  blur: Option<u32>,
  transform: TransformSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TransformSpec {
  Resize {
    width: u32,
    quality: Option<u8>,
  },
  Command {
    program: PathBuf,
    #[serde(default)]
    args: Vec<String>,
  },
}

impl VariantSpec {
  fn into_descriptor(self) -> Result<VariantDescriptor, RegistryError> {
    let format = self.result_file_type;
    let mut variant = match self.transform {
      TransformSpec::Resize { width, quality } => {
        if !format.is_raster() {
          return Err(RegistryError::UnsupportedFormat {
            name: self.name,
            file_type: format.to_string(),
          });
        }
        let mut resize = ResizeTransform::new(width, format);
        if let Some(quality) = quality {
          resize = resize.with_quality(quality);
        }
        VariantDescriptor::new(self.name, format, resize)
      }
      TransformSpec::Command { program, args } => {
        VariantDescriptor::new(self.name, format, CommandTransform::new(program, args, format))
      }
    };

    if let Some(title) = self.title {
      variant = variant.with_title(title);
    }
    if let Some(blur) = self.blur {
      variant = variant.with_blur(blur);
    }
    variant.description = self.description;
    variant.config = self.config;
    variant.selected = self.selected;
    Ok(variant)
  }
}
