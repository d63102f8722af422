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
use lqip_lab::error::RegistryError;
use lqip_lab::registry::Registry;
use lqip_lab::variant::ResultFileType;

const VARIANTS: &str = r#"
[[variant]]
name = "sqip-potrace"
title = "SQIP potrace"
description = "Default settings of sqip-plugin-potrace"
result_file_type = "svg"

[variant.transform]
kind = "command"
program = "sqip"
args = ["--input", "{input}", "--output", "{output}", "--plugins", "potrace,svgo"]

[variant.config]
plugins = ["potrace", "svgo", "data-uri"]

[[variant]]
name = "lqip-custom"
result_file_type = "jpeg"
selected = true
blur = 20

[variant.transform]
kind = "resize"
width = 32
quality = 40
"#;

#[test]
fn test_builtin_registry() {
  let registry = Registry::builtin().unwrap();
  let names = registry.names();

  assert_eq!(names[..2], ["thumbnail", "lqip"]);
  assert_eq!(names.len(), 8);
  assert_eq!(registry.list_variants()[1].blur, Some(20));

  let selected: Vec<_> = registry
    .list_variants()
    .iter()
    .filter(|v| v.selected)
    .map(|v| v.name.as_str())
    .collect();
  assert_eq!(selected, ["lqip-modern-webp-16"]);
}

#[test]
fn test_lossless_webp_config_reports_no_quality() {
  let registry = Registry::builtin().unwrap();
  for variant in registry.list_variants() {
    if variant.result_file_type == ResultFileType::Webp {
      assert_eq!(variant.config["lossless"], true, "{}", variant.name);
      assert!(variant.config.get("quality").is_none(), "{}", variant.name);
    }
  }
}

#[test]
fn test_parse_variants_file() {
  let registry = Registry::from_toml_str(VARIANTS).unwrap();
  let variants = registry.list_variants();

  assert_eq!(registry.names(), ["sqip-potrace", "lqip-custom"]);
  assert_eq!(variants[0].title, "SQIP potrace");
  assert_eq!(variants[0].result_file_type, ResultFileType::Svg);
  assert_eq!(variants[0].config["plugins"][0], "potrace");
  assert!(!variants[0].selected);

  assert_eq!(variants[1].title, "lqip-custom");
  assert_eq!(variants[1].result_file_type, ResultFileType::Jpeg);
  assert_eq!(variants[1].blur, Some(20));
  assert!(variants[1].selected);
}

#[test]
fn test_extend_rejects_clashes() {
  let file = Registry::from_toml_str(
    r#"
[[variant]]
name = "thumbnail"
result_file_type = "png"
transform = { kind = "resize", width = 100 }
"#,
  )
  .unwrap();

  let err = Registry::builtin().unwrap().extend(file).unwrap_err();
  assert!(matches!(err, RegistryError::DuplicateName(name) if name == "thumbnail"));
}

#[test]
fn test_resize_to_svg_rejected() {
  let err = Registry::from_toml_str(
    r#"
[[variant]]
name = "vector"
result_file_type = "svg"
transform = { kind = "resize", width = 8 }
"#,
  )
  .unwrap_err();

  assert!(matches!(err, RegistryError::UnsupportedFormat { .. }));
}

#[test]
fn test_unsafe_names_rejected() {
  for name in ["", "..", "a/b", "with space"] {
    let raw = format!(
      "[[variant]]\nname = \"{name}\"\nresult_file_type = \"png\"\ntransform = {{ kind = \"resize\", width = 8 }}\n"
    );
    let err = Registry::from_toml_str(&raw).unwrap_err();
    assert!(
      matches!(err, RegistryError::InvalidName(_)),
      "{name:?} should be rejected"
    );
  }
}

#[test]
fn test_only_keeps_registry_order() {
  let registry = Registry::builtin()
    .unwrap()
    .only(&["lqip-modern-jpeg-8".to_string(), "thumbnail".to_string()])
    .unwrap();
  assert_eq!(registry.names(), ["thumbnail", "lqip-modern-jpeg-8"]);

  let err = Registry::builtin()
    .unwrap()
    .only(&["nope".to_string()])
    .unwrap_err();
  assert!(matches!(err, RegistryError::UnknownVariant { .. }));
}

#[test]
fn test_malformed_file_is_a_parse_error() {
  let err = Registry::from_toml_str("[[variant]]\nname = 3\n").unwrap_err();
  assert!(matches!(err, RegistryError::Parse(_)));
}

#[test]
fn test_parse_example_variants_file() {
  let raw = include_str!("../variants.example.toml");
  let registry = Registry::builtin()
    .unwrap()
    .extend(Registry::from_toml_str(raw).unwrap())
    .unwrap();

  let names = registry.names();
  assert_eq!(names.len(), 11);
  assert_eq!(names[8..], ["sqip", "sqip-potrace", "lqip-custom"]);
}
