use graphbind_core::{
    BaseType, Client, Config, Direction, ElementId, Error, PropertyData, Registry, Response,
    Result,
};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;

use crate::index::RestIndex;

/// [`Client`] speaking the Rexster REST dialect over blocking HTTP.
///
/// ```rust,no_run
/// use graphbind_client::RestClient;
/// use graphbind_core::{Config, SharedClient};
/// use std::sync::Arc;
///
/// let client: SharedClient = Arc::new(RestClient::new(Config::new("http://localhost:8182/graphs/graph"))?);
/// # Ok::<(), graphbind_core::Error>(())
/// ```
pub struct RestClient {
    http: HttpClient,
    config: Config,
    registry: Registry,
}

impl RestClient {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            registry: Registry::new(),
        })
    }

    /// An index on the server, looked up by key/value.
    pub fn index(self: &Arc<Self>, name: impl Into<String>) -> RestIndex {
        RestIndex::new(name, self.clone())
    }

    /// `GET {root}/indices/{index}?key=..&value=..`, with `value` sent as
    /// JSON text so numbers and booleans keep their type.
    pub fn lookup(&self, index: &str, key: &str, value: &Value) -> Result<Response> {
        let value = value.to_string();
        self.send(
            self.http
                .get(self.url(&["indices", index])?)
                .query(&[("key", key), ("value", value.as_str())]),
        )
    }

    /// `{root}/{segments..}`, each segment percent-encoded on its own so
    /// string IDs like `urn:a/b` or `#9:1` stay a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(self.config.root())
            .map_err(|e| Error::InvalidConfig(format!("root_uri: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidConfig(format!("root_uri {} cannot be a base", self.config.root())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status();
        let url = response.url().to_string();
        let text = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;
        tracing::trace!("{} -> {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(message_of(&text, &url)));
        }
        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
                message: message_of(&text, &url),
            });
        }
        if text.trim().is_empty() {
            return Ok(Response::empty());
        }

        let body: Value = serde_json::from_str(&text)?;
        Response::from_json(body, self.config.root())
    }
}

/// The server's `message` field, else the raw body, else `fallback`.
fn message_of(body: &str, fallback: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        if let Some(message) = object.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

impl Client for RestClient {
    fn config(&self) -> &Config {
        &self.config
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn create_vertex(&self, data: &PropertyData) -> Result<Response> {
        self.send(self.http.post(self.url(&["vertices"])?).json(data))
    }

    fn get_vertex(&self, id: &ElementId) -> Result<Response> {
        self.send(self.http.get(self.url(&["vertices", &id.to_string()])?))
    }

    fn get_all_vertices(&self) -> Result<Response> {
        self.send(self.http.get(self.url(&["vertices"])?))
    }

    fn update_vertex(&self, id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.send(self.http.put(self.url(&["vertices", &id.to_string()])?).json(data))
    }

    fn remove_vertex_properties(&self, id: &ElementId) -> Result<Response> {
        self.send(
            self.http
                .delete(self.url(&["vertices", &id.to_string(), "properties"])?),
        )
    }

    fn delete_vertex(&self, id: &ElementId) -> Result<Response> {
        self.send(self.http.delete(self.url(&["vertices", &id.to_string()])?))
    }

    fn create_edge(
        &self,
        out_v: &ElementId,
        label: &str,
        in_v: &ElementId,
        data: &PropertyData,
    ) -> Result<Response> {
        let mut body = data.clone().into_map();
        body.insert("_outV".to_string(), out_v.to_json());
        body.insert("_label".to_string(), Value::from(label));
        body.insert("_inV".to_string(), in_v.to_json());
        self.send(self.http.post(self.url(&["edges"])?).json(&body))
    }

    fn get_edge(&self, id: &ElementId) -> Result<Response> {
        self.send(self.http.get(self.url(&["edges", &id.to_string()])?))
    }

    fn get_all_edges(&self) -> Result<Response> {
        self.send(self.http.get(self.url(&["edges"])?))
    }

    fn update_edge(&self, id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.send(self.http.put(self.url(&["edges", &id.to_string()])?).json(data))
    }

    fn remove_edge_properties(&self, id: &ElementId) -> Result<Response> {
        self.send(self.http.delete(self.url(&["edges", &id.to_string(), "properties"])?))
    }

    fn delete_edge(&self, id: &ElementId) -> Result<Response> {
        self.send(self.http.delete(self.url(&["edges", &id.to_string()])?))
    }

    fn adjacent(
        &self,
        id: &ElementId,
        direction: Direction,
        target: BaseType,
        label: Option<&str>,
    ) -> Result<Response> {
        let mut request = self
            .http
            .get(self.url(&["vertices", &id.to_string(), direction.step(target)])?);
        if let Some(label) = label {
            request = request.query(&[("_label", label)]);
        }
        self.send(request)
    }
}
