//! # Pidloop
//!
//! Single-axis PID control loops for actuators driven toward a target sensor
//! reading, with saturation, integral anti-windup, convergence detection and
//! live tuning through a shared configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use pidloop::prelude::*;
//!
//! let dashboard = TelemetryTable::new();
//! let config = SharedPidConfig::new(
//!     PidConfig::pi(0.8, 0.1)
//!         .with_output_limit(1.0)
//!         .with_tuning_output(true),
//! );
//! let mut lift = ControlLoop::with_sink(config.clone(), Arc::new(dashboard.clone()));
//!
//! lift.init(0.0, 2.0);
//! let mut height = 0.0;
//! while !lift.is_done(height) {
//!     height += lift.update(height);
//! }
//! assert!(dashboard.get("Output").is_some());
//! ```
//!
//! ## Features
//!
//! - **Permissive configuration**: any limit of 0 or less is simply disabled
//! - **Shared, live-tunable configuration** via [`SharedPidConfig`](prelude::SharedPidConfig)
//! - **Injected telemetry** via [`TelemetrySink`](prelude::TelemetrySink)
//! - **YAML/TOML parameter files** via [`RuntimeParams`](prelude::RuntimeParams)

// Re-export core components (avoiding conflicts)
pub use pidloop_core::{self, *};

// Re-export standard library with alias
pub use pidloop_library as library;

/// The pidloop prelude - everything you need to get started
pub mod prelude {
    // Control
    pub use pidloop_library::algorithms::pid::{saturate, ControlLoop, PidTerms};
    pub use pidloop_library::messages::control::{PidConfig, SharedPidConfig};

    // Telemetry and parameters
    pub use pidloop_core::params::RuntimeParams;
    pub use pidloop_core::telemetry::{
        LogSink, LogSummary, NullSink, TelemetrySink, TelemetryTable,
    };

    // Error types
    pub use pidloop_core::error::{PidError, PidResult};
    pub type Result<T> = PidResult<T>;

    // Common std types
    pub use std::sync::Arc;

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get pidloop version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert_eq!(super::version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_prelude_errors_work_with_anyhow() {
        fn tune(config: &SharedPidConfig) -> AnyResult<()> {
            config
                .set_param("p_gain", 1.0)
                .context("tuning lift loop")?;
            Ok(())
        }

        let config = SharedPidConfig::default();
        let err = tune(&config).unwrap_err();
        assert_eq!(err.to_string(), "tuning lift loop");
        assert!(err.chain().any(|cause| cause.to_string().contains("p_gain")));
    }
}
