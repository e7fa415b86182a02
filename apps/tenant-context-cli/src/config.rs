//! Application configuration.
//!
//! Layering: built-in defaults, then the YAML file given with `--config`,
//! then `TC__*` environment variables (`__` separates nesting levels, e.g.
//! `TC__LOGGING__LEVEL=debug`), then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_tc_plugin::StaticTcPluginConfig;
use tenant_context::TenantContextConfig;

const ENV_PREFIX: &str = "TC__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub tenant_context: TenantContextConfig,
    pub static_tc_plugin: StaticTcPluginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `tenant_context=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any layer does not
    /// match the configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// `-v` raises the log level to info, `-vv` to debug, `-vvv` to trace.
    pub fn apply_cli_overrides(&mut self, verbose: u8) {
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.tenant_context.default_tenant.id.as_str(), "jt-telecom");
        assert!(!config.static_tc_plugin.tenants.is_empty());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
logging:
  format: json
tenant_context:
  include_inactive: true
static_tc_plugin:
  tenants:
    - id: "acme"
      name: "Acme"
      domain: "acme.io"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert!(config.tenant_context.include_inactive);
        assert_eq!(config.static_tc_plugin.tenants.len(), 1);
        assert!(!config.static_tc_plugin.products.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 8080").unwrap();

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn verbosity_overrides_level() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(0);
        assert_eq!(config.logging.level, "info");
        config.apply_cli_overrides(2);
        assert_eq!(config.logging.level, "debug");
        config.apply_cli_overrides(5);
        assert_eq!(config.logging.level, "trace");
    }
}
