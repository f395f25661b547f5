use graphbind_core::{Elements, Index, Result, SharedClient, Vertex};
use serde_json::Value;
use std::sync::Arc;

use crate::rest::RestClient;

/// A named vertex index on the server.
pub struct RestIndex {
    name: String,
    client: Arc<RestClient>,
}

impl RestIndex {
    pub fn new(name: impl Into<String>, client: Arc<RestClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }
}

impl Index for RestIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str, value: &Value) -> Result<Elements<Vertex>> {
        let response = self.client.lookup(&self.name, key, value)?;
        let client: SharedClient = self.client.clone();
        Ok(Elements::new(client, response))
    }
}
