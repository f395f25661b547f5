use graphbind_core::{Elements, Index, Result, SharedClient, Vertex};
use serde_json::Value;
use std::sync::Arc;

use crate::client::MemoryClient;

/// Property index backed by a scan of the in-memory vertex table.
pub struct MemoryIndex {
    name: String,
    client: Arc<MemoryClient>,
}

impl MemoryIndex {
    pub fn new(name: impl Into<String>, client: Arc<MemoryClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }
}

impl Index for MemoryIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str, value: &Value) -> Result<Elements<Vertex>> {
        let response = self.client.lookup(key, value)?;
        let client: SharedClient = self.client.clone();
        Ok(Elements::new(client, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphbind_core::{Client, Config, PropertyData};
    use serde_json::json;

    #[test]
    fn test_get_unique() {
        let client = Arc::new(MemoryClient::new(Config::default()));
        client
            .create_vertex(&PropertyData::new().with("name", "James"))
            .unwrap();
        let index = client.index("vertex");

        let james = index.get_unique("name", &json!("James")).unwrap().unwrap();
        assert_eq!(james.attr("name").unwrap(), json!("James"));
        assert!(index.get_unique("name", &json!("Nobody")).unwrap().is_none());
        assert_eq!(index.name(), "vertex");
    }
}
