/*
[INPUT]:  Optional YAML configuration file, GREENSPIN__* environment variables
[OUTPUT]: Parsed service and session configuration
[POS]:    Configuration layer - client and controller setup
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use greenspin_adapter::{ClientConfig, DEFAULT_BASE_URL};
use url::Url;

use crate::controller::{ControllerConfig, DEFAULT_SPIN_DELAY};

const ENV_PREFIX: &str = "GREENSPIN";
const ENV_SEPARATOR: &str = "__";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GreenSpinConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote task service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout; unset waits indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Session controller settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Minimum visual spin duration before a task is revealed
    #[serde(default = "default_spin_delay_ms")]
    pub spin_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            spin_delay_ms: default_spin_delay_ms(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_spin_delay_ms() -> u64 {
    DEFAULT_SPIN_DELAY.as_millis() as u64
}

impl GreenSpinConfig {
    /// Load defaults, then the optional YAML file, then `GREENSPIN__*` env vars
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`load`](Self::load) with an explicit environment map instead of
    /// the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.service.base_url.trim();
        let url = Url::parse(base_url)
            .map_err(|err| anyhow::anyhow!("invalid service.base_url {base_url:?}: {err}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("service.base_url must be http(s), got {}", url.scheme());
        }
        if self.service.request_timeout_secs == Some(0) {
            anyhow::bail!("service.request_timeout_secs must be positive when set");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.service.base_url.clone(),
            timeout: self.service.request_timeout_secs.map(Duration::from_secs),
            connect_timeout: Duration::from_secs(self.service.connect_timeout_secs),
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            spin_delay: Duration::from_millis(self.session.spin_delay_ms),
        }
    }
}
