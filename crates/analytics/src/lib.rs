//! # Sales Performance Analytics
//!
//! This crate derives probability and streak metrics from a salesperson's ordered
//! log of outcomes. It acts as the "unbiased judge" of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   rendering. It depends only on `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` takes a `SalesLog` as input and
//!   produces a `PerformanceReport`. Running it twice on the same log gives the same report.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the calculation entry point.
//! - `PerformanceReport`: the nine headline metrics plus record counts.
//! - `stats`: the building blocks (`longest_run`, `Transitions`, `sample_std_dev`, ...).
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{Metric, MetricValue, PerformanceReport};
