//! Journey configuration and process settings.
//!
//! A journey server reads its `journey.json` once at startup. The file is
//! validated before anything is served; a bad file stops the process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::pb;

/// Directory holding the journey's bundled static assets.
pub const PUBLIC_ROOT: &str = "./public";

/// The journey's HTML shell, rendered with the resolved assets.
pub const INDEX_PATH: &str = "./public/index.html";

/// A journey's identity and the dependencies the registry resolves for it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct JourneyConfig {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl JourneyConfig {
    /// Reads, parses and validates a journey config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), journey = %config.name, "loaded journey configuration");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name is required".into()));
        }
        if self.version.trim().is_empty() {
            return Err(ConfigError::Invalid("version is required".into()));
        }

        let mut seen = HashSet::new();
        for (i, dep) in self.dependencies.iter().enumerate() {
            if dep.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("dependencies[{i}].name is required")));
            }
            if dep.version.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "dependencies[{i}].version is required"
                )));
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "dependency `{}` is listed more than once",
                    dep.name
                )));
            }
        }
        Ok(())
    }
}

impl From<&JourneyConfig> for pb::Journey {
    fn from(config: &JourneyConfig) -> Self {
        Self {
            name: config.name.clone(),
            version: config.version.clone(),
            dependencies: config
                .dependencies
                .iter()
                .map(|d| pb::Dependency { name: d.name.clone(), version: d.version.clone() })
                .collect(),
        }
    }
}

/// Returns the environment variable `key`, or `default` when it is unset.
///
/// A variable that is set but empty yields the empty string. A value that is
/// not valid UTF-8 is still used, lossily converted, with a warning.
pub fn env_or(key: &str, default: &str) -> String {
    lookup_or(lookup_env, key, default)
}

fn lookup_or(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

fn lookup_env(key: &str) -> Option<String> {
    let value = std::env::var_os(key)?;
    match value.into_string() {
        Ok(value) => Some(value),
        Err(raw) => {
            let value = raw.to_string_lossy().into_owned();
            warn!(key, value = %value, "environment variable is not valid UTF-8, using lossy value");
            Some(value)
        }
    }
}

/// Process settings for a journey server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Socket address the HTTP server binds.
    pub listen: String,
    /// `host:port` (or full URI) of the registry.
    pub registry: String,
    /// Mount prefix the journey is exposed under.
    pub path_prefix: String,
    pub journey_config: PathBuf,
    pub monitor_app_name: Option<String>,
    pub monitor_license_key: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(lookup_env)
    }

    /// Reads settings through `lookup`, applying the same defaults as
    /// [`Settings::from_env`] and [`env_or`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let or = |key: &str, default: &str| lookup_or(&lookup, key, default);
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            listen: format!("0.0.0.0:{}", or("PORT", "8080")),
            registry: or("REGISTRY_URL", "localhost:50051"),
            path_prefix: or("PATH_PREFIX", "/"),
            journey_config: PathBuf::from(or("JOURNEY_CONFIG", "./journey.json")),
            monitor_app_name: non_blank("MONITOR_APP_NAME"),
            monitor_license_key: non_blank("MONITOR_LICENSE_KEY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    const CHECKOUT: &str = r#"{
        "name": "checkout",
        "version": "1.4.0",
        "dependencies": [
            {"name": "react", "version": "18.2.0"},
            {"name": "design-system", "version": "3.1.0"}
        ]
    }"#;

    #[test]
    fn parses_a_valid_config() {
        let config = JourneyConfig::from_json(CHECKOUT).unwrap();
        assert_eq!(config.name, "checkout");
        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(config.dependencies[1].name, "design-system");
    }

    #[test]
    fn dependencies_default_to_empty() {
        let config = JourneyConfig::from_json(r#"{"name":"home","version":"1"}"#).unwrap();
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn rejects_blank_name() {
        let err = JourneyConfig::from_json(r#"{"name":"  ","version":"1"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("name")));
    }

    #[test]
    fn rejects_dependency_without_version() {
        let err = JourneyConfig::from_json(
            r#"{"name":"home","version":"1","dependencies":[{"name":"react","version":""}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("dependencies[0].version")));
    }

    #[test]
    fn rejects_duplicate_dependencies() {
        let err = JourneyConfig::from_json(
            r#"{"name":"home","version":"1","dependencies":[
                {"name":"react","version":"18"},
                {"name":"react","version":"17"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("more than once")));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = JourneyConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CHECKOUT.as_bytes()).unwrap();

        let config = JourneyConfig::load(file.path()).unwrap();
        assert_eq!(config.version, "1.4.0");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = JourneyConfig::load("/definitely/not/here/journey.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn converts_to_wire_message_in_order() {
        let config = JourneyConfig::from_json(CHECKOUT).unwrap();
        let journey = pb::Journey::from(&config);
        assert_eq!(journey.name, "checkout");
        let names: Vec<_> = journey.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["react", "design-system"]);
    }

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(env_or("TRAILHEAD_SURELY_UNSET_VARIABLE", "fallback"), "fallback");
    }

    #[test]
    fn set_but_empty_is_not_defaulted() {
        let env = |k: &str| (k == "PATH_PREFIX").then(String::new);
        assert_eq!(lookup_or(env, "PATH_PREFIX", "/"), "");
        assert_eq!(Settings::from_lookup(env).path_prefix, "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_value_is_used_not_dropped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "TRAILHEAD_TEST_NON_UTF8_PREFIX";
        // SAFETY: the key is unique to this test; no other thread reads it.
        unsafe { std::env::set_var(key, OsStr::from_bytes(b"/caf\xe9")) };

        let value = env_or(key, "/");
        unsafe { std::env::remove_var(key) };
        assert_eq!(value, "/caf\u{FFFD}");
    }

    #[test]
    fn settings_apply_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.listen, "0.0.0.0:8080");
        assert_eq!(settings.registry, "localhost:50051");
        assert_eq!(settings.path_prefix, "/");
        assert_eq!(settings.monitor_app_name, None);
    }

    #[test]
    fn settings_read_overrides_and_drop_blank_credentials() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9000"),
            ("REGISTRY_URL", "registry:7000"),
            ("PATH_PREFIX", "/checkout"),
            ("MONITOR_APP_NAME", "checkout"),
            ("MONITOR_LICENSE_KEY", "   "),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.listen, "0.0.0.0:9000");
        assert_eq!(settings.registry, "registry:7000");
        assert_eq!(settings.path_prefix, "/checkout");
        assert_eq!(settings.monitor_app_name.as_deref(), Some("checkout"));
        assert_eq!(settings.monitor_license_key, None);
    }
}
