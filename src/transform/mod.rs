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

//! The boundary between the runner and the actual image encoders.
//!
//! A [`Transform`] reads one source image and produces one artifact. It may
//! either write the artifact itself and hand back a preview, or hand back the
//! encoded bytes and let the runner persist them. Either way the runner sees
//! a single [`TransformOutput`] value.

mod command;
mod resize;

pub use command::CommandTransform;
pub use resize::ResizeTransform;

use crate::error::TransformError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Debug;
use std::path::Path;

/// What a transform produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutput {
  /// The artifact is already complete at the destination path.
  /// `preview` is a data URI describing it.
  Written { preview: String },
  /// Encoded artifact bytes, written to the destination by the runner.
  Encoded { bytes: Vec<u8> },
}

/// A placeholder technique.
///
/// Implementations must read only from `source` and, when returning
/// [`TransformOutput::Written`], must have fully written `destination`
/// before returning. Calls happen on blocking worker threads.
pub trait Transform: Debug + Send + Sync {
  fn apply(&self, source: &Path, destination: &Path) -> Result<TransformOutput, TransformError>;
}

/// Builds a base64 `data:` URI.
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
  format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
