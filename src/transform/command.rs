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
use super::data_uri;
use crate::error::TransformError;
use crate::variant::ResultFileType;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Runs an external tool (e.g. a vector tracer) that writes the artifact itself.
///
/// `{input}` and `{output}` in `args` are replaced with the source and
/// destination paths. If the tool prints a `data:` URI on stdout it becomes
/// the preview; otherwise the preview is built from the written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTransform {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub format: ResultFileType,
}

impl CommandTransform {
  pub fn new(program: impl Into<PathBuf>, args: Vec<String>, format: ResultFileType) -> Self {
    Self {
      program: program.into(),
      args,
      format,
    }
  }

  fn expand_args(&self, source: &Path, destination: &Path) -> Vec<String> {
    let input = source.display().to_string();
    let output = destination.display().to_string();
    self
      .args
      .iter()
      .map(|arg| {
        arg
          .replace(INPUT_PLACEHOLDER, &input)
          .replace(OUTPUT_PLACEHOLDER, &output)
      })
      .collect()
  }
}

impl Transform for CommandTransform {
  fn apply(&self, source: &Path, destination: &Path) -> Result<TransformOutput, TransformError> {
    let program = self.program.display().to_string();
    let args = self.expand_args(source, destination);

    tracing::debug!(%program, ?args, "Spawning transform command");
    let output = Command::new(&self.program)
      .args(&args)
      .output()
      .map_err(|source| TransformError::CommandSpawn {
        program: program.clone(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
      return Err(TransformError::CommandFailed {
        program,
        code: output.status.code(),
        stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      });
    }

    if !destination.is_file() {
      return Err(TransformError::ArtifactMissing(destination.to_path_buf()));
    }

    let printed = stdout.trim();
    let preview = if printed.starts_with("data:") {
      printed.to_string()
    } else {
      let bytes = fs::read(destination).map_err(|e| TransformError::io(destination, e))?;
      data_uri(self.format.media_type(), &bytes)
    };

    Ok(TransformOutput::Written { preview })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholders_are_substituted() {
    let cmd = CommandTransform::new(
      "sqip",
      vec![
        "--input={input}".to_string(),
        "-o".to_string(),
        "{output}".to_string(),
      ],
      ResultFileType::Svg,
    );
    let args = cmd.expand_args(Path::new("in/cat.jpg"), Path::new("out/potrace/cat.svg"));
    assert_eq!(args, vec!["--input=in/cat.jpg", "-o", "out/potrace/cat.svg"]);
  }
}
