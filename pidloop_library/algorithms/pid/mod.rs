//! PID (Proportional-Integral-Derivative) control loop
//!
//! Drives an actuator toward a target sensor reading. The loop does not keep
//! time: it is called once per control cycle at whatever cadence the caller
//! chooses, and works purely on successive error samples.
//!
//! # Features
//!
//! - Proportional, integral, and derivative terms
//! - Error, derivative, and output saturation
//! - Anti-windup expressed as a bound on the integral term itself
//! - Convergence/overshoot detection
//! - Optional per-cycle telemetry for live tuning
//!
//! # Example
//!
//! ```rust
//! use pidloop_library::algorithms::pid::ControlLoop;
//! use pidloop_library::messages::control::{PidConfig, SharedPidConfig};
//!
//! let config = SharedPidConfig::new(PidConfig::pi(0.5, 0.1).with_output_limit(1.0));
//! let mut pid = ControlLoop::new(config);
//!
//! pid.init(0.0, 10.0);
//! let mut position = 0.0;
//! while !pid.is_done(position) {
//!     position += pid.update(position);
//! }
//! assert!(position >= 10.0);
//! ```

use crate::messages::control::SharedPidConfig;
use pidloop_core::{LogSink, LogSummary, TelemetrySink};
use serde::Serialize;
use std::sync::Arc;

/// Limit `value` to `[-limit, limit]`.
///
/// A `limit` of 0 or less disables the limit and returns `value` unchanged.
pub fn saturate(value: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        value.clamp(-limit, limit)
    } else {
        value
    }
}

/// Intermediate values of one control cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidTerms {
    /// Saturated error
    pub error: f64,
    /// Saturated change of error since the previous cycle
    pub diff_error: f64,
    /// Accumulated error after anti-windup
    pub sum_error: f64,
    pub p_term: f64,
    pub i_term: f64,
    pub d_term: f64,
    /// Saturated actuator command
    pub output: f64,
}

impl PidTerms {
    /// Telemetry labels paired with their values, in publishing order
    pub fn labelled(&self) -> [(&'static str, f64); 7] {
        [
            ("Error", self.error),
            ("DiffError", self.diff_error),
            ("SumError", self.sum_error),
            ("PTerm", self.p_term),
            ("ITerm", self.i_term),
            ("DTerm", self.d_term),
            ("Output", self.output),
        ]
    }
}

impl LogSummary for PidTerms {
    fn log_summary(&self) -> String {
        format!(
            "err={:.4} derr={:.4} sum={:.4} p={:.4} i={:.4} d={:.4} out={:.4}",
            self.error,
            self.diff_error,
            self.sum_error,
            self.p_term,
            self.i_term,
            self.d_term,
            self.output
        )
    }
}

/// Single-axis PID control loop.
///
/// Reads its gains and limits from a [`SharedPidConfig`] once per cycle and
/// never writes to it, so any number of loops can share one configuration
/// while it is being tuned.
pub struct ControlLoop {
    config: SharedPidConfig,
    sink: Arc<dyn TelemetrySink>,
    name: Option<String>,

    initial_sensor_value: f64,
    desired_sensor_value: f64,

    old_error: f64,
    sum_error: f64,
    last_terms: PidTerms,
}

impl ControlLoop {
    /// Create a loop that publishes tuning values to the log
    pub fn new(config: SharedPidConfig) -> Self {
        Self::with_sink(config, Arc::new(LogSink))
    }

    /// Create a loop that publishes tuning values to `sink`
    pub fn with_sink(config: SharedPidConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            config,
            sink,
            name: None,
            initial_sensor_value: 0.0,
            desired_sensor_value: 0.0,
            old_error: 0.0,
            sum_error: 0.0,
            last_terms: PidTerms::default(),
        }
    }

    /// Prefix telemetry keys with `name/`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Start a new run from `initial_sensor_value` toward `desired_sensor_value`.
    ///
    /// Clears the integral and derivative history.
    pub fn init(&mut self, initial_sensor_value: f64, desired_sensor_value: f64) {
        self.initial_sensor_value = initial_sensor_value;
        self.desired_sensor_value = desired_sensor_value;
        self.old_error = 0.0;
        self.sum_error = 0.0;
        self.last_terms = PidTerms::default();

        log::debug!(
            "[{}] init {} -> {} with {}",
            self.name.as_deref().unwrap_or("pid"),
            initial_sensor_value,
            desired_sensor_value,
            self.config.snapshot().log_summary()
        );
    }

    /// Run one control cycle and return the actuator command
    pub fn update(&mut self, current_sensor_value: f64) -> f64 {
        let config = self.config.snapshot();

        let error = saturate(
            self.desired_sensor_value - current_sensor_value,
            config.max_abs_error,
        );

        // No derivative without a non-zero baseline (first cycle after init)
        let diff_error = if self.old_error != 0.0 {
            saturate(error - self.old_error, config.max_abs_diff_error)
        } else {
            0.0
        };

        self.sum_error += error;
        if config.i_fac > 0.0 {
            self.sum_error = saturate(self.sum_error, config.max_abs_i_term / config.i_fac);
        }

        let p_term = config.p_fac * error;
        let i_term = config.i_fac * self.sum_error;
        let d_term = config.d_fac * diff_error;
        let output = saturate(p_term + i_term + d_term, config.max_abs_output);

        self.old_error = error;

        let terms = PidTerms {
            error,
            diff_error,
            sum_error: self.sum_error,
            p_term,
            i_term,
            d_term,
            output,
        };

        if config.output_values_for_tuning {
            self.publish(&terms);
        }
        log::trace!("{}", terms.log_summary());

        self.last_terms = terms;
        output
    }

    /// Whether the run has reached, passed, or come close enough to its target.
    ///
    /// Depends only on the start, the target, `current_sensor_value` and the
    /// configured accuracy, never on the cycle history.
    pub fn is_done(&self, current_sensor_value: f64) -> bool {
        let initial = self.initial_sensor_value;
        let desired = self.desired_sensor_value;

        if initial <= desired && current_sensor_value >= desired {
            true
        } else if initial >= desired && current_sensor_value <= desired {
            true
        } else {
            let accuracy = self.config.snapshot().desired_accuracy;
            accuracy > 0.0 && (desired - current_sensor_value).abs() <= accuracy
        }
    }

    fn publish(&self, terms: &PidTerms) {
        for (label, value) in terms.labelled() {
            match &self.name {
                Some(name) => self.sink.put_number(&format!("{name}/{label}"), value),
                None => self.sink.put_number(label, value),
            }
        }
    }

    pub fn initial_sensor_value(&self) -> f64 {
        self.initial_sensor_value
    }

    pub fn desired_sensor_value(&self) -> f64 {
        self.desired_sensor_value
    }

    /// Saturated error of the previous cycle
    pub fn old_error(&self) -> f64 {
        self.old_error
    }

    /// Accumulated error feeding the integral term
    pub fn sum_error(&self) -> f64 {
        self.sum_error
    }

    /// Intermediate values of the most recent cycle
    pub fn last_terms(&self) -> PidTerms {
        self.last_terms
    }

    pub fn config(&self) -> &SharedPidConfig {
        &self.config
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
