use graphbind_core::{
    BaseType, Client, Config, Direction, ElementId, ElementResult, Error, PropertyData, Registry,
    Response, Result,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::graph::{user_properties, MemoryGraph, StoredEdge, StoredVertex};
use crate::index::MemoryIndex;

/// A [`Client`] answering from a [`MemoryGraph`] in the same process.
///
/// Every trait call counts as one request, which lets tests assert that an
/// operation did (or did not) reach the backend.
pub struct MemoryClient {
    graph: Arc<MemoryGraph>,
    config: Config,
    registry: Registry,
    requests: AtomicUsize,
    last_payload: Mutex<Option<Value>>,
}

impl MemoryClient {
    pub fn new(config: Config) -> Self {
        let name = config
            .root()
            .rsplit('/')
            .next()
            .unwrap_or("graph")
            .to_string();
        Self::with_graph(config, Arc::new(MemoryGraph::new(name)))
    }

    /// Share an existing graph, e.g. the one a test server is serving.
    pub fn with_graph(config: Config, graph: Arc<MemoryGraph>) -> Self {
        Self {
            graph,
            config,
            registry: Registry::new(),
            requests: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn graph(&self) -> &Arc<MemoryGraph> {
        &self.graph
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Body of the most recent create or update request.
    pub fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().clone()
    }

    /// An index over this client's vertices.
    pub fn index(self: &Arc<Self>, name: impl Into<String>) -> MemoryIndex {
        MemoryIndex::new(name, self.clone())
    }

    /// Exact-match lookup of vertices by property.
    pub fn lookup(&self, key: &str, value: &Value) -> Result<Response> {
        self.record(None);
        tracing::trace!("lookup {}={}", key, value);
        let found = self.graph.lookup(key, value);
        Ok(Response::from_results(
            found.iter().map(|v| self.vertex_result(v)).collect(),
        ))
    }

    fn record(&self, payload: Option<Value>) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if payload.is_some() {
            *self.last_payload.lock() = payload;
        }
    }

    fn vertex_result(&self, vertex: &StoredVertex) -> ElementResult {
        ElementResult::vertex(
            vertex.id,
            format!("{}/vertices/{}", self.config.root(), vertex.id),
            vertex.properties.clone(),
        )
    }

    fn edge_result(&self, edge: &StoredEdge) -> ElementResult {
        ElementResult::edge(
            edge.id,
            format!("{}/edges/{}", self.config.root(), edge.id),
            edge.out_v,
            edge.label.as_str(),
            edge.in_v,
            edge.properties.clone(),
        )
    }
}

/// Stored IDs are integers; anything else cannot name an element here.
fn numeric(id: &ElementId) -> Result<u64> {
    id.as_u64()
        .ok_or_else(|| Error::NotFound(format!("no element with id {}", id)))
}

impl Client for MemoryClient {
    fn config(&self) -> &Config {
        &self.config
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn create_vertex(&self, data: &PropertyData) -> Result<Response> {
        self.record(Some(data.clone().into_value()));
        let vertex = self.graph.add_vertex(user_properties(data));
        tracing::trace!("created vertex {}", vertex.id);
        Ok(Response::single(self.vertex_result(&vertex)))
    }

    fn get_vertex(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        let vertex = self
            .graph
            .vertex(numeric(id)?)
            .ok_or_else(|| Error::NotFound(format!("vertex {}", id)))?;
        Ok(Response::single(self.vertex_result(&vertex)))
    }

    fn get_all_vertices(&self) -> Result<Response> {
        self.record(None);
        Ok(Response::from_results(
            self.graph.vertices().iter().map(|v| self.vertex_result(v)).collect(),
        ))
    }

    fn update_vertex(&self, id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.record(Some(data.clone().into_value()));
        let vertex = self
            .graph
            .replace_vertex_properties(numeric(id)?, user_properties(data))?;
        Ok(Response::single(self.vertex_result(&vertex)))
    }

    fn remove_vertex_properties(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        self.graph.clear_vertex_properties(numeric(id)?)?;
        Ok(Response::empty())
    }

    fn delete_vertex(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        self.graph.remove_vertex(numeric(id)?)?;
        tracing::trace!("deleted vertex {}", id);
        Ok(Response::empty())
    }

    fn create_edge(
        &self,
        out_v: &ElementId,
        label: &str,
        in_v: &ElementId,
        data: &PropertyData,
    ) -> Result<Response> {
        let mut payload = data.clone().into_map();
        payload.insert("_outV".to_string(), out_v.to_json());
        payload.insert("_label".to_string(), Value::from(label));
        payload.insert("_inV".to_string(), in_v.to_json());
        self.record(Some(Value::Object(payload)));

        let edge = self
            .graph
            .add_edge(numeric(out_v)?, label, numeric(in_v)?, user_properties(data))?;
        tracing::trace!("created edge {} ({} -{}-> {})", edge.id, out_v, label, in_v);
        Ok(Response::single(self.edge_result(&edge)))
    }

    fn get_edge(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        let edge = self
            .graph
            .edge(numeric(id)?)
            .ok_or_else(|| Error::NotFound(format!("edge {}", id)))?;
        Ok(Response::single(self.edge_result(&edge)))
    }

    fn get_all_edges(&self) -> Result<Response> {
        self.record(None);
        Ok(Response::from_results(
            self.graph.edges().iter().map(|e| self.edge_result(e)).collect(),
        ))
    }

    fn update_edge(&self, id: &ElementId, data: &PropertyData) -> Result<Response> {
        self.record(Some(data.clone().into_value()));
        let edge = self
            .graph
            .replace_edge_properties(numeric(id)?, user_properties(data))?;
        Ok(Response::single(self.edge_result(&edge)))
    }

    fn remove_edge_properties(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        self.graph.clear_edge_properties(numeric(id)?)?;
        Ok(Response::empty())
    }

    fn delete_edge(&self, id: &ElementId) -> Result<Response> {
        self.record(None);
        self.graph.remove_edge(numeric(id)?)?;
        Ok(Response::empty())
    }

    fn adjacent(
        &self,
        id: &ElementId,
        direction: Direction,
        target: BaseType,
        label: Option<&str>,
    ) -> Result<Response> {
        self.record(None);
        let vertex = numeric(id)?;
        let results = match target {
            BaseType::Edge => self
                .graph
                .incident_edges(vertex, direction, label)?
                .iter()
                .map(|e| self.edge_result(e))
                .collect(),
            BaseType::Vertex => self
                .graph
                .neighbors(vertex, direction, label)?
                .iter()
                .map(|v| self.vertex_result(v))
                .collect(),
        };
        Ok(Response::from_results(results))
    }
}
