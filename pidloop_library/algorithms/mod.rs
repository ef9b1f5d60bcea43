//! Pure computational algorithms
//!
//! Algorithms contain only computation logic; anything they publish goes
//! through an injected sink.
//!
//! ## Control
//! - **pid**: single-axis PID control loop with saturation, anti-windup and
//!   convergence detection

pub mod pid;
