//! Simple runtime parameter system for pidloop
//!
//! Provides a straightforward key-value store for runtime configuration.
//! Controller configurations are built from it by reading dotted keys such as
//! `lift.p_fac`, so one parameter file can describe several loops.

use crate::error::{PidError, PidResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// On-disk formats understood by [`RuntimeParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    Yaml,
    Toml,
}

impl ParamFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> PidResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ParamFormat::Yaml),
            Some("toml") => Ok(ParamFormat::Toml),
            _ => Err(PidError::config(format!(
                "unsupported parameter file '{}' (expected .yaml, .yml or .toml)",
                path.display()
            ))),
        }
    }
}

/// Simple runtime parameter store
#[derive(Clone, Default)]
pub struct RuntimeParams {
    /// Parameter storage - BTreeMap maintains sorted order
    params: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl RuntimeParams {
    /// Create an empty parameter store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from a YAML or TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PidResult<Self> {
        let params = Self::new();
        params.load_from_disk(path.as_ref())?;
        Ok(params)
    }

    /// Get a parameter value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let params = self.params.read();
        let value = params.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Get parameter with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get parameter as f64 with default
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    /// Get parameter as bool with default
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    /// Set a parameter value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> PidResult<()> {
        let json_value = serde_json::to_value(value)?;
        self.params.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Get all parameters
    pub fn get_all(&self) -> BTreeMap<String, Value> {
        self.params.read().clone()
    }

    /// List all parameter keys
    pub fn list_keys(&self) -> Vec<String> {
        self.params.read().keys().cloned().collect()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.read().contains_key(key)
    }

    /// Remove a parameter
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.params.write().remove(key)
    }

    /// Load parameters from a YAML or TOML file.
    ///
    /// Nested tables are flattened into dotted keys. Loaded keys override
    /// existing ones; keys absent from the file are kept.
    pub fn load_from_disk(&self, path: &Path) -> PidResult<()> {
        let format = ParamFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;

        let root: Value = match format {
            ParamFormat::Yaml => serde_yaml::from_str(&text)?,
            ParamFormat::Toml => {
                let table: toml::Table = toml::from_str(&text)?;
                serde_json::to_value(table)?
            }
        };

        let mut loaded = BTreeMap::new();
        match root {
            Value::Null => {}
            Value::Object(_) => flatten_into("", root, &mut loaded),
            _ => {
                return Err(PidError::config(format!(
                    "parameter file '{}' must contain a mapping at the top level",
                    path.display()
                )))
            }
        }

        log::info!(
            "Loaded {} parameters from {}",
            loaded.len(),
            path.display()
        );

        self.params.write().extend(loaded);
        Ok(())
    }

    /// Save parameters to a YAML or TOML file, creating parent directories
    pub fn save_to_disk(&self, path: &Path) -> PidResult<()> {
        let format = ParamFormat::from_path(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let params = self.get_all();
        let text = match format {
            ParamFormat::Yaml => serde_yaml::to_string(&params)?,
            ParamFormat::Toml => toml::to_string(&params)?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}

fn flatten_into(prefix: &str, value: Value, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&full_key, child, out);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let params = RuntimeParams::new();

        assert_eq!(params.get_f64("lift.p_fac", 0.25), 0.25);
        assert!(!params.has("lift.p_fac"));

        params.set("lift.p_fac", 42.5).unwrap();
        assert_eq!(params.get::<f64>("lift.p_fac"), Some(42.5));

        params.set("lift.p_fac", 2.0).unwrap();
        assert_eq!(params.get_f64("lift.p_fac", 0.0), 2.0);

        params.set("lift.output_values_for_tuning", true).unwrap();
        assert!(params.get_bool("lift.output_values_for_tuning", false));

        assert_eq!(
            params.list_keys(),
            vec!["lift.output_values_for_tuning", "lift.p_fac"]
        );

        assert!(params.remove("lift.p_fac").is_some());
        assert!(!params.has("lift.p_fac"));
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let params = RuntimeParams::new();
        params.set("arm.i_fac", "fast").unwrap();
        assert_eq!(params.get_f64("arm.i_fac", 0.5), 0.5);
    }

    #[test]
    fn test_clones_share_storage() {
        let params = RuntimeParams::new();
        let other = params.clone();
        other.set("shooter.d_fac", 0.3).unwrap();
        assert_eq!(params.get_f64("shooter.d_fac", 0.0), 0.3);
    }

    #[test]
    fn test_load_nested_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(
            &path,
            "lift:\n  p_fac: 0.8\n  max_abs_output: 1.0\nwrist.i_fac: 0.02\n",
        )
        .unwrap();

        let params = RuntimeParams::from_file(&path).unwrap();
        assert_eq!(params.get_f64("lift.p_fac", 0.0), 0.8);
        assert_eq!(params.get_f64("lift.max_abs_output", 0.0), 1.0);
        assert_eq!(params.get_f64("wrist.i_fac", 0.0), 0.02);
    }

    #[test]
    fn test_load_toml_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        std::fs::write(
            &path,
            "[drive]\np_fac = 1.5\noutput_values_for_tuning = true\n",
        )
        .unwrap();

        let params = RuntimeParams::from_file(&path).unwrap();
        assert_eq!(params.get_f64("drive.p_fac", 0.0), 1.5);
        assert!(params.get_bool("drive.output_values_for_tuning", false));
    }

    #[test]
    fn test_load_overrides_but_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.yml");
        std::fs::write(&path, "arm:\n  p_fac: 3.0\n").unwrap();

        let params = RuntimeParams::new();
        params.set("arm.p_fac", 1.0).unwrap();
        params.set("arm.d_fac", 0.1).unwrap();
        params.load_from_disk(&path).unwrap();

        assert_eq!(params.get_f64("arm.p_fac", 0.0), 3.0);
        assert_eq!(params.get_f64("arm.d_fac", 0.0), 0.1);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        let params = RuntimeParams::new();
        params.set("elevator.p_fac", 0.4).unwrap();
        params.set("elevator.max_abs_i_term", 0.2).unwrap();

        for name in ["nested/params.yaml", "nested/params.toml"] {
            let path = dir.path().join(name);
            params.save_to_disk(&path).unwrap();

            let reloaded = RuntimeParams::from_file(&path).unwrap();
            assert_eq!(reloaded.get_all(), params.get_all());
        }
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, "{}").unwrap();

        let err = RuntimeParams::from_file(&path).err().unwrap();
        assert!(matches!(err, PidError::Config(_)));
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.yaml");
        std::fs::write(&path, "- 1.0\n- 2.0\n").unwrap();

        let err = RuntimeParams::from_file(&path).err().unwrap();
        assert!(matches!(err, PidError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RuntimeParams::from_file(dir.path().join("absent.yaml"))
            .err()
            .unwrap();
        assert!(matches!(err, PidError::Io(_)));
    }
}
