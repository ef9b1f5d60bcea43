//! Message types for pidloop
//!
//! - Control: controller configuration ([`PidConfig`]) and the handle loops
//!   share it through ([`SharedPidConfig`])
//!
//! All message types are re-exported at the crate root for convenience.

pub mod control;

pub use control::{PidConfig, SharedPidConfig};
