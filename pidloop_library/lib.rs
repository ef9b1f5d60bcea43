//! # Pidloop Standard Library
//!
//! Single-axis PID control for actuators driven toward a target sensor
//! reading.
//!
//! ## Structure
//!
//! ```text
//! pidloop_library/
//! ── messages/       # PidConfig and the shared configuration handle
//! ── algorithms/     # ControlLoop and the saturation helper
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pidloop_library::{ControlLoop, PidConfig, SharedPidConfig};
//!
//! let config = SharedPidConfig::new(PidConfig::proportional(1.0).with_output_limit(5.0));
//! let mut lift = ControlLoop::new(config.clone());
//!
//! lift.init(0.0, 10.0);
//! let command = lift.update(2.0);
//! assert_eq!(command, 5.0);
//! assert!(!lift.is_done(2.0));
//! ```

pub mod algorithms;
pub mod messages;

// Re-export core traits needed for message types
pub use pidloop_core::LogSummary;

// Re-export message types at the crate root for convenience
pub use messages::*;

pub use algorithms::pid::{saturate, ControlLoop, PidTerms};
