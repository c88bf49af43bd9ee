use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::agents::config::{LlmProviderConfig, OrchestrationConfig, RouterConfig};
use crate::cli::Cli;

const ENV_PREFIX: &str = "CAREORBIT";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8001;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Text-completion service; absent means demo mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<LlmProviderConfig>,
    #[serde(default)]
    pub orchestration: OrchestrationConfig,
    #[serde(default)]
    pub router: RouterConfig,
    /// Seed the in-memory store with the demo patient
    #[serde(default = "default_demo_data")]
    pub demo_data: bool,
}

fn default_demo_data() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `careorbit.{toml,json,yaml}` from `root`, if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let settings = Self::load(&Path::new(root).join("careorbit"))?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(config_path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(demo_data) = cli.demo_data {
            self.demo_data = demo_data;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Bind address for the HTTP server
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            completion: None,
            orchestration: OrchestrationConfig::default(),
            router: RouterConfig::default(),
            demo_data: default_demo_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli::parse_from([
            "careorbit",
            "--config",
            "/nonexistent/careorbit.toml",
            "--port",
            "9100",
            "--demo-data",
            "false",
        ]);
        let mut settings = Settings::default();
        settings.apply_cli_overrides(&cli);

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(!settings.demo_data);
    }

    #[test]
    fn test_default_address() {
        assert_eq!(Settings::default().address(), "127.0.0.1:8001");
    }
}
