use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

/// Client configuration shared by every element and proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URI of the graph, e.g. `http://localhost:8182/graphs/graph`.
    pub root_uri: String,
    /// Name under which the element ID is also exposed (`eid` by default).
    pub id_var: String,
    /// Property holding a typed vertex model's element key.
    pub type_var: String,
    /// Property name conventionally used for labels in typed models.
    pub label_var: String,
    pub vertex_index: String,
    pub edge_index: String,
    /// Request timeout for network clients, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_uri: "http://localhost:8182/graphs/graph".to_string(),
            id_var: "eid".to_string(),
            type_var: "element_type".to_string(),
            label_var: "label".to_string(),
            vertex_index: "vertex".to_string(),
            edge_index: "edge".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn new(root_uri: impl Into<String>) -> Self {
        Self {
            root_uri: root_uri.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_uri.trim().is_empty() {
            return Err(Error::InvalidConfig("root_uri must not be empty".to_string()));
        }
        for (name, value) in [
            ("id_var", &self.id_var),
            ("type_var", &self.type_var),
            ("vertex_index", &self.vertex_index),
            ("edge_index", &self.edge_index),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Root URI without a trailing slash.
    pub fn root(&self) -> &str {
        self.root_uri.trim_end_matches('/')
    }
}
