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
use super::Transform;
use super::TransformOutput;
use crate::artifact::read_source;
use crate::error::TransformError;
use crate::variant::ResultFileType;
use image::ExtendedColorType;
use image::ImageEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use std::path::Path;

const DEFAULT_QUALITY: u8 = 80;

/// Downscales the source to a fixed width and re-encodes it.
///
/// Aspect ratio is preserved. WebP output is lossless, so `quality`
/// only affects JPEG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeTransform {
  pub width: u32,
  pub format: ResultFileType,
  pub quality: u8,
}

impl ResizeTransform {
  pub fn new(width: u32, format: ResultFileType) -> Self {
    Self {
      width,
      format,
      quality: DEFAULT_QUALITY,
    }
  }

  pub fn with_quality(mut self, quality: u8) -> Self {
    self.quality = quality.clamp(1, 100);
    self
  }

  fn target_height(&self, width: u32, height: u32) -> u32 {
    let scaled = u64::from(height) * u64::from(self.width) / u64::from(width);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
  }
}

impl Transform for ResizeTransform {
  fn apply(&self, source: &Path, _destination: &Path) -> Result<TransformOutput, TransformError> {
    if self.width == 0 {
      return Err(TransformError::Unsupported(
        "resize width must be greater than zero".to_string(),
      ));
    }

    let img = image::load_from_memory(&read_source(source)?)?;
    if img.width() == 0 || img.height() == 0 {
      return Err(TransformError::Unsupported(format!(
        "source image {} has no pixels",
        source.display()
      )));
    }

    let height = self.target_height(img.width(), img.height());
    let resized = img.resize_exact(self.width, height, FilterType::Lanczos3);
    tracing::debug!(
      from = ?(img.width(), img.height()),
      to = ?(self.width, height),
      format = %self.format,
      "Resized source"
    );

    let mut bytes = Vec::new();
    match self.format {
      ResultFileType::Jpeg => {
        let rgb = resized.to_rgb8();
        JpegEncoder::new_with_quality(&mut bytes, self.quality).write_image(
          rgb.as_raw(),
          rgb.width(),
          rgb.height(),
          ExtendedColorType::Rgb8,
        )?;
      }
      ResultFileType::Webp => {
        let rgba = resized.to_rgba8();
        WebPEncoder::new_lossless(&mut bytes).write_image(
          rgba.as_raw(),
          rgba.width(),
          rgba.height(),
          ExtendedColorType::Rgba8,
        )?;
      }
      ResultFileType::Png => {
        let rgba = resized.to_rgba8();
        PngEncoder::new(&mut bytes).write_image(
          rgba.as_raw(),
          rgba.width(),
          rgba.height(),
          ExtendedColorType::Rgba8,
        )?;
      }
      ResultFileType::Svg => {
        return Err(TransformError::Unsupported(
          "resize cannot produce svg output".to_string(),
        ));
      }
    }

    Ok(TransformOutput::Encoded { bytes })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn target_height_keeps_aspect_ratio() {
    let resize = ResizeTransform::new(300, ResultFileType::Jpeg);
    assert_eq!(resize.target_height(600, 400), 200);
    assert_eq!(resize.target_height(1200, 1), 1);
  }

  #[test]
  fn quality_is_clamped() {
    let resize = ResizeTransform::new(8, ResultFileType::Jpeg).with_quality(0);
    assert_eq!(resize.quality, 1);
  }
}
