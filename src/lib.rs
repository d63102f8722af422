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

//! # lqip-lab
//!
//! `lqip-lab` compares low-quality image placeholder (LQIP) techniques.
//! Every registered variant is run on every source image; sizes and
//! timings are collected into a report that is written as JSON and
//! rendered as a static HTML table.
//!
//! ## Core Modules
//!
//! * [`registry`]: The ordered, validated list of variants. This is where
//!   new techniques are added.
//! * [`transform`]: The `Transform` trait every technique implements, plus
//!   the built-in resize and external-command adapters.
//! * [`artifact`]: Deterministic artifact paths and file I/O.
//! * [`runner`]: Executes all (image, variant) pairs with bounded
//!   concurrency, timing each transform.
//! * [`report`]: Result types and the aggregator that shapes them into rows
//!   and columns.
//! * [`render`]: Turns a report into an HTML page.
//! * [`dataset`]: Discovers source images.
//! * [`pipeline`]: Wires everything together for `lqip run`.
//! * [`cli`], [`config`], [`error`], [`logging`]: The `clap` interface,
//!   layered configuration, error types and tracing setup.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod report;
pub mod runner;
pub mod transform;
pub mod variant;
