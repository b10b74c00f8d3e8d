//! # chartwise - dataset profiling and chart recommendations
//!
//! chartwise inspects a tabular dataset, decides which columns are numeric,
//! categorical or temporal, recommends a handful of charts worth drawing, and
//! computes the grouped data those charts need.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chartwise::profiler::{build_profile, io::load_dataset};
//! use chartwise::recommend::HeuristicStrategy;
//!
//! # fn example() -> chartwise::error::Result<()> {
//! let df = load_dataset("sales.csv".as_ref())?;
//! let profile = build_profile(&df)?;
//!
//! for suggestion in HeuristicStrategy.suggest(&profile) {
//!     println!("{}: {}", suggestion.title, suggestion.insight);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`profiler`]: column classification, descriptive statistics and profiles
//! - [`recommend`]: heuristic and generation-backed chart suggestions
//!   - [`recommend::heuristic`]: deterministic column-pattern rules
//!   - [`recommend::generated`]: text-generation strategy with fallback
//! - [`chart`]: request validation and chart-data aggregation
//! - [`service`]: request-level operations and response shapes
//! - [`ai`]: OpenAI-compatible text-generation client
//! - [`config`]: layered settings (file, `.env`, environment)
//! - [`error`]: error taxonomy and the `{error, message}` envelope
//! - [`logging`]: console and rolling-file tracing setup
//!
//! ## Charts
//!
//! Bar, line and pie charts group rows by the x column, in order of first
//! appearance, and aggregate the y column:
//!
//! ```no_run
//! use chartwise::chart::{ChartRequest, RequestParameters};
//!
//! let request = ChartRequest {
//!     filepath: "sales.csv".to_owned(),
//!     chart_type: "bar".to_owned(),
//!     parameters: RequestParameters {
//!         x_axis: Some("Region".to_owned()),
//!         y_axis: Some("Sales".to_owned()),
//!     },
//!     aggregation: Some("mean".to_owned()),
//! };
//! let response = chartwise::service::chart_data(&request)?;
//! # Ok::<(), chartwise::error::ChartError>(())
//! ```
//!
//! Scatter charts skip grouping and return every `(x, y)` pair.

#![warn(clippy::all, rust_2018_idioms)]

pub mod ai;
pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod profiler;
pub mod recommend;
pub mod service;
pub mod utils;
