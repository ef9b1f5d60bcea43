//! # Pidloop Core
//!
//! Runtime building blocks shared by the pidloop crates:
//!
//! - **Errors**: [`PidError`] and the [`PidResult`] alias for the fallible
//!   configuration surfaces
//! - **Parameters**: [`RuntimeParams`], a key-value store loaded from YAML or
//!   TOML files
//! - **Telemetry**: the [`TelemetrySink`] interface controllers publish their
//!   tuning values through, plus a few ready-made sinks
//!
//! ## Quick Start
//!
//! ```rust
//! use pidloop_core::{TelemetrySink, TelemetryTable};
//!
//! let table = TelemetryTable::new();
//! table.put_number("Output", 0.5);
//! assert_eq!(table.get_number("Output", 0.0), 0.5);
//! ```

pub mod error;
pub mod params;
pub mod telemetry;

// Re-export commonly used types for easy access
pub use error::{PidError, PidResult};
pub use params::{ParamFormat, RuntimeParams};
pub use telemetry::{LogSink, LogSummary, NullSink, TelemetrySink, TelemetryTable};
