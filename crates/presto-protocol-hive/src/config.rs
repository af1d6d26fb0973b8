use figment::providers::{Env, Format, Toml};
use figment::Figment;
use presto_protocol::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("default.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveProtocolConfig {
    pub connector_id: String,
}

impl HiveProtocolConfig {
    /// Loads the configuration from the embedded defaults and `PRESTO_HIVE__*` environment variables.
    pub fn load() -> ProtocolResult<Self> {
        Self::extract(
            Self::figment()
                .admerge(Env::prefixed("PRESTO_HIVE__").map(|p| p.as_str().replace("__", ".").into())),
        )
    }

    /// The embedded defaults, for callers that layer their own providers.
    pub fn figment() -> Figment {
        Figment::from(Toml::string(DEFAULT_CONFIG))
    }

    pub fn extract(figment: Figment) -> ProtocolResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| ProtocolError::InvalidArgument(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ProtocolResult<()> {
        if self.connector_id.trim().is_empty() {
            return Err(ProtocolError::invalid("connector_id must not be empty"));
        }
        Ok(())
    }
}

impl Default for HiveProtocolConfig {
    fn default() -> Self {
        Self {
            connector_id: "hive".to_string(),
        }
    }
}
