use serde_json::Value;

use crate::{Elements, Result, Vertex};

/// Key/value lookup over vertices, used by `VertexProxy::get_or_create`.
pub trait Index: Send + Sync {
    fn name(&self) -> &str;

    /// All vertices whose property `key` equals `value` exactly.
    fn lookup(&self, key: &str, value: &Value) -> Result<Elements<Vertex>>;

    /// The first match of [`Index::lookup`], if any.
    fn get_unique(&self, key: &str, value: &Value) -> Result<Option<Vertex>> {
        self.lookup(key, value)?.next().transpose()
    }
}
