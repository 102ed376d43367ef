//! Fixture adapter for Paidmedia
//!
//! Serves canonical metrics, hierarchy and data health from a JSON snapshot
//! file instead of a live ad platform. Latency and failures can be injected
//! through configuration, which makes it useful for local wiring and for
//! exercising the aggregation layer's partial-failure handling.
//!
//! # Architecture
//!
//! - `plugin` - `ProviderAdapter` implementation
//! - `config` - configuration parsing
//! - `types` - snapshot file format
//! - `mapper` - snapshot to canonical shape mapping
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paidmedia_plugin_api::ProviderRegistry;
//! use paidmedia_plugin_fixture::FixturePlugin;
//!
//! let registry = ProviderRegistry::new();
//! registry
//!     .register("meta", Arc::new(FixturePlugin::new()))
//!     .unwrap();
//! ```

mod config;
mod mapper;
mod metadata;
mod plugin;
mod types;

pub use config::{
    FailureMode,
    FixtureConfig,
};
pub use plugin::FixturePlugin;
pub use types::{
    FixtureHealth,
    FixtureMetricRow,
    FixtureSnapshot,
};

paidmedia_plugin_api::register_provider!(FixturePlugin);
