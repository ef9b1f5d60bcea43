//! Control configuration messages
//!
//! [`PidConfig`] holds the gains and limits of one PID controller.
//! [`SharedPidConfig`] lets several control loops read the same configuration
//! while an operator tunes it live.

use parking_lot::RwLock;
use pidloop_core::{LogSummary, PidError, PidResult, RuntimeParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// PID gains and limits.
///
/// Every limit uses the same convention: a value of 0 or less disables it.
/// Nothing is validated; nonsensical values simply switch features off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidConfig {
    /// Proportional gain
    pub p_fac: f64,
    /// Integral gain
    pub i_fac: f64,
    /// Derivative gain
    pub d_fac: f64,
    /// Output saturation
    pub max_abs_output: f64,
    /// Error saturation
    pub max_abs_error: f64,
    /// Saturation of the error's change between cycles
    pub max_abs_diff_error: f64,
    /// Tolerance within which the loop counts as done
    pub desired_accuracy: f64,
    /// Bound on the integral term's contribution to the output
    pub max_abs_i_term: f64,
    /// Publish intermediate values to the telemetry sink every cycle
    pub output_values_for_tuning: bool,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            p_fac: 0.0,
            i_fac: 0.0,
            d_fac: 0.0,
            max_abs_output: 0.0,
            max_abs_error: 0.0,
            max_abs_diff_error: 0.0,
            desired_accuracy: 0.0,
            max_abs_i_term: 0.1,
            output_values_for_tuning: false,
        }
    }
}

impl PidConfig {
    /// Names accepted by [`get_param`](Self::get_param) and [`set_param`](Self::set_param)
    pub const PARAM_NAMES: [&'static str; 9] = [
        "p_fac",
        "i_fac",
        "d_fac",
        "max_abs_output",
        "max_abs_error",
        "max_abs_diff_error",
        "desired_accuracy",
        "max_abs_i_term",
        "output_values_for_tuning",
    ];

    /// Create a configuration with the given gains and default limits
    pub fn new(p_fac: f64, i_fac: f64, d_fac: f64) -> Self {
        Self {
            p_fac,
            i_fac,
            d_fac,
            ..Self::default()
        }
    }

    /// Create a P-only controller
    pub fn proportional(p_fac: f64) -> Self {
        Self::new(p_fac, 0.0, 0.0)
    }

    /// Create a PI controller
    pub fn pi(p_fac: f64, i_fac: f64) -> Self {
        Self::new(p_fac, i_fac, 0.0)
    }

    /// Create a PD controller
    pub fn pd(p_fac: f64, d_fac: f64) -> Self {
        Self::new(p_fac, 0.0, d_fac)
    }

    pub fn with_output_limit(mut self, max_abs_output: f64) -> Self {
        self.max_abs_output = max_abs_output;
        self
    }

    pub fn with_error_limit(mut self, max_abs_error: f64) -> Self {
        self.max_abs_error = max_abs_error;
        self
    }

    pub fn with_diff_error_limit(mut self, max_abs_diff_error: f64) -> Self {
        self.max_abs_diff_error = max_abs_diff_error;
        self
    }

    pub fn with_accuracy(mut self, desired_accuracy: f64) -> Self {
        self.desired_accuracy = desired_accuracy;
        self
    }

    pub fn with_i_term_limit(mut self, max_abs_i_term: f64) -> Self {
        self.max_abs_i_term = max_abs_i_term;
        self
    }

    pub fn with_tuning_output(mut self, enabled: bool) -> Self {
        self.output_values_for_tuning = enabled;
        self
    }

    /// Read a parameter by name. The tuning flag reads as 1.0 or 0.0.
    pub fn get_param(&self, name: &str) -> Option<f64> {
        let value = match name {
            "p_fac" => self.p_fac,
            "i_fac" => self.i_fac,
            "d_fac" => self.d_fac,
            "max_abs_output" => self.max_abs_output,
            "max_abs_error" => self.max_abs_error,
            "max_abs_diff_error" => self.max_abs_diff_error,
            "desired_accuracy" => self.desired_accuracy,
            "max_abs_i_term" => self.max_abs_i_term,
            "output_values_for_tuning" => {
                if self.output_values_for_tuning {
                    1.0
                } else {
                    0.0
                }
            }
            _ => return None,
        };
        Some(value)
    }

    /// Write a parameter by name. Any non-zero value enables the tuning flag.
    pub fn set_param(&mut self, name: &str, value: f64) -> PidResult<()> {
        match name {
            "p_fac" => self.p_fac = value,
            "i_fac" => self.i_fac = value,
            "d_fac" => self.d_fac = value,
            "max_abs_output" => self.max_abs_output = value,
            "max_abs_error" => self.max_abs_error = value,
            "max_abs_diff_error" => self.max_abs_diff_error = value,
            "desired_accuracy" => self.desired_accuracy = value,
            "max_abs_i_term" => self.max_abs_i_term = value,
            "output_values_for_tuning" => self.output_values_for_tuning = value != 0.0,
            _ => return Err(PidError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    /// Build a configuration from `"{prefix}.{param}"` keys.
    ///
    /// Keys that are missing or hold the wrong type keep their default.
    pub fn from_params(params: &RuntimeParams, prefix: &str) -> Self {
        let defaults = Self::default();
        let key = |name: &str| format!("{prefix}.{name}");

        Self {
            p_fac: params.get_f64(&key("p_fac"), defaults.p_fac),
            i_fac: params.get_f64(&key("i_fac"), defaults.i_fac),
            d_fac: params.get_f64(&key("d_fac"), defaults.d_fac),
            max_abs_output: params.get_f64(&key("max_abs_output"), defaults.max_abs_output),
            max_abs_error: params.get_f64(&key("max_abs_error"), defaults.max_abs_error),
            max_abs_diff_error: params
                .get_f64(&key("max_abs_diff_error"), defaults.max_abs_diff_error),
            desired_accuracy: params.get_f64(&key("desired_accuracy"), defaults.desired_accuracy),
            max_abs_i_term: params.get_f64(&key("max_abs_i_term"), defaults.max_abs_i_term),
            output_values_for_tuning: params.get_bool(
                &key("output_values_for_tuning"),
                defaults.output_values_for_tuning,
            ),
        }
    }

    /// Store every field under `"{prefix}.{param}"`
    pub fn write_params(&self, params: &RuntimeParams, prefix: &str) -> PidResult<()> {
        for name in Self::PARAM_NAMES {
            let key = format!("{prefix}.{name}");
            if name == "output_values_for_tuning" {
                params.set(&key, self.output_values_for_tuning)?;
            } else if let Some(value) = self.get_param(name) {
                params.set(&key, value)?;
            }
        }
        Ok(())
    }
}

impl LogSummary for PidConfig {
    fn log_summary(&self) -> String {
        format!(
            "PidConfig(p={:.4}, i={:.4}, d={:.4}, out<={}, err<={}, derr<={}, acc={}, iterm<={}, tuning={})",
            self.p_fac,
            self.i_fac,
            self.d_fac,
            self.max_abs_output,
            self.max_abs_error,
            self.max_abs_diff_error,
            self.desired_accuracy,
            self.max_abs_i_term,
            self.output_values_for_tuning
        )
    }
}

/// Shared, live-tunable handle to a [`PidConfig`].
///
/// Clones refer to the same configuration. Control loops only take
/// snapshots; edits made through [`tune`](Self::tune) or
/// [`set_param`](Self::set_param) are seen on the next snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedPidConfig {
    inner: Arc<RwLock<PidConfig>>,
}

impl SharedPidConfig {
    pub fn new(config: PidConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Build a handle from `"{prefix}.{param}"` keys of a parameter store
    pub fn from_params(params: &RuntimeParams, prefix: &str) -> Self {
        Self::new(PidConfig::from_params(params, prefix))
    }

    /// Load a YAML or TOML parameter file and build a handle from its `prefix` section
    pub fn load(path: impl AsRef<Path>, prefix: &str) -> PidResult<Self> {
        let params = RuntimeParams::from_file(path)?;
        let config = PidConfig::from_params(&params, prefix);
        log::info!("Loaded '{}': {}", prefix, config.log_summary());
        Ok(Self::new(config))
    }

    /// Consistent copy of the current configuration
    pub fn snapshot(&self) -> PidConfig {
        *self.inner.read()
    }

    /// Apply an edit under the write lock
    pub fn tune<F>(&self, edit: F)
    where
        F: FnOnce(&mut PidConfig),
    {
        let mut config = self.inner.write();
        edit(&mut *config);
    }

    /// Replace the whole configuration
    pub fn replace(&self, config: PidConfig) {
        *self.inner.write() = config;
    }

    pub fn get_param(&self, name: &str) -> Option<f64> {
        self.inner.read().get_param(name)
    }

    pub fn set_param(&self, name: &str, value: f64) -> PidResult<()> {
        self.inner.write().set_param(name, value)?;
        log::debug!("Tuned {} = {}", name, value);
        Ok(())
    }

    /// Whether two handles refer to the same configuration
    pub fn ptr_eq(&self, other: &SharedPidConfig) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<PidConfig> for SharedPidConfig {
    fn from(config: PidConfig) -> Self {
        Self::new(config)
    }
}
