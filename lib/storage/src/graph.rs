use ahash::AHashMap;
use graphbind_core::response::is_reserved;
use graphbind_core::{Direction, Error, PropertyData, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

pub type VertexId = u64;
pub type EdgeId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredVertex {
    pub id: VertexId,
    pub properties: PropertyData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEdge {
    pub id: EdgeId,
    pub out_v: VertexId,
    pub in_v: VertexId,
    pub label: String,
    pub properties: PropertyData,
}

impl StoredVertex {
    /// Rexster wire shape: properties plus `_id`/`_type`.
    pub fn to_json(&self) -> Value {
        let mut object = self.properties.clone().into_map();
        object.insert("_id".to_string(), Value::from(self.id));
        object.insert("_type".to_string(), Value::from("vertex"));
        Value::Object(object)
    }
}

impl StoredEdge {
    pub fn to_json(&self) -> Value {
        let mut object = self.properties.clone().into_map();
        object.insert("_id".to_string(), Value::from(self.id));
        object.insert("_type".to_string(), Value::from("edge"));
        object.insert("_outV".to_string(), Value::from(self.out_v));
        object.insert("_inV".to_string(), Value::from(self.in_v));
        object.insert("_label".to_string(), Value::from(self.label.as_str()));
        Value::Object(object)
    }

    fn touches(&self, vertex: VertexId, direction: Direction) -> bool {
        match direction {
            Direction::Out => self.out_v == vertex,
            Direction::In => self.in_v == vertex,
            Direction::Both => self.out_v == vertex || self.in_v == vertex,
        }
    }

    /// The endpoint opposite to `vertex`.
    fn other_end(&self, vertex: VertexId) -> VertexId {
        if self.out_v == vertex {
            self.in_v
        } else {
            self.out_v
        }
    }
}

/// A whole property graph held in memory.
///
/// IDs are handed out from one counter per table, starting at 1, and are
/// never reused.
pub struct MemoryGraph {
    name: String,
    vertices: RwLock<AHashMap<VertexId, StoredVertex>>,
    edges: RwLock<AHashMap<EdgeId, StoredEdge>>,
    next_vertex: AtomicU64,
    next_edge: AtomicU64,
}

impl MemoryGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: RwLock::new(AHashMap::new()),
            edges: RwLock::new(AHashMap::new()),
            next_vertex: AtomicU64::new(1),
            next_edge: AtomicU64::new(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.read().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    pub fn add_vertex(&self, properties: PropertyData) -> StoredVertex {
        let id = self.next_vertex.fetch_add(1, Ordering::Relaxed);
        let vertex = StoredVertex { id, properties };
        self.vertices.write().insert(id, vertex.clone());
        vertex
    }

    pub fn vertex(&self, id: VertexId) -> Option<StoredVertex> {
        self.vertices.read().get(&id).cloned()
    }

    /// All vertices ordered by ID.
    pub fn vertices(&self) -> Vec<StoredVertex> {
        let mut all: Vec<StoredVertex> = self.vertices.read().values().cloned().collect();
        all.sort_by_key(|v| v.id);
        all
    }

    pub fn replace_vertex_properties(&self, id: VertexId, properties: PropertyData) -> Result<StoredVertex> {
        let mut vertices = self.vertices.write();
        let vertex = vertices.get_mut(&id).ok_or_else(|| vertex_not_found(id))?;
        vertex.properties = properties;
        Ok(vertex.clone())
    }

    pub fn clear_vertex_properties(&self, id: VertexId) -> Result<()> {
        self.replace_vertex_properties(id, PropertyData::new()).map(|_| ())
    }

    /// Remove a vertex together with every edge touching it.
    pub fn remove_vertex(&self, id: VertexId) -> Result<()> {
        if self.vertices.write().remove(&id).is_none() {
            return Err(vertex_not_found(id));
        }
        self.edges
            .write()
            .retain(|_, edge| !edge.touches(id, Direction::Both));
        Ok(())
    }

    pub fn add_edge(
        &self,
        out_v: VertexId,
        label: impl Into<String>,
        in_v: VertexId,
        properties: PropertyData,
    ) -> Result<StoredEdge> {
        // Held until the edge is in place so a concurrent `remove_vertex`
        // either fails this check or sweeps the new edge.
        let vertices = self.vertices.read();
        for endpoint in [out_v, in_v] {
            if !vertices.contains_key(&endpoint) {
                return Err(vertex_not_found(endpoint));
            }
        }

        let id = self.next_edge.fetch_add(1, Ordering::Relaxed);
        let edge = StoredEdge {
            id,
            out_v,
            in_v,
            label: label.into(),
            properties,
        };
        self.edges.write().insert(id, edge.clone());
        Ok(edge)
    }

    pub fn edge(&self, id: EdgeId) -> Option<StoredEdge> {
        self.edges.read().get(&id).cloned()
    }

    pub fn edges(&self) -> Vec<StoredEdge> {
        let mut all: Vec<StoredEdge> = self.edges.read().values().cloned().collect();
        all.sort_by_key(|e| e.id);
        all
    }

    pub fn replace_edge_properties(&self, id: EdgeId, properties: PropertyData) -> Result<StoredEdge> {
        let mut edges = self.edges.write();
        let edge = edges.get_mut(&id).ok_or_else(|| edge_not_found(id))?;
        edge.properties = properties;
        Ok(edge.clone())
    }

    pub fn clear_edge_properties(&self, id: EdgeId) -> Result<()> {
        self.replace_edge_properties(id, PropertyData::new()).map(|_| ())
    }

    pub fn remove_edge(&self, id: EdgeId) -> Result<()> {
        self.edges
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| edge_not_found(id))
    }

    /// Edges incident to `vertex`, ordered by ID.
    pub fn incident_edges(
        &self,
        vertex: VertexId,
        direction: Direction,
        label: Option<&str>,
    ) -> Result<Vec<StoredEdge>> {
        if !self.vertices.read().contains_key(&vertex) {
            return Err(vertex_not_found(vertex));
        }
        let mut matched: Vec<StoredEdge> = self
            .edges
            .read()
            .values()
            .filter(|edge| edge.touches(vertex, direction))
            .filter(|edge| label.map_or(true, |l| edge.label == l))
            .cloned()
            .collect();
        matched.sort_by_key(|e| e.id);
        Ok(matched)
    }

    /// The vertex at the far end of each matching incident edge. A vertex
    /// reachable through several edges appears once per edge.
    pub fn neighbors(
        &self,
        vertex: VertexId,
        direction: Direction,
        label: Option<&str>,
    ) -> Result<Vec<StoredVertex>> {
        let edges = self.incident_edges(vertex, direction, label)?;
        let vertices = self.vertices.read();
        Ok(edges
            .iter()
            .filter_map(|edge| vertices.get(&edge.other_end(vertex)).cloned())
            .collect())
    }

    /// Vertices whose property `key` equals `value`.
    pub fn lookup(&self, key: &str, value: &Value) -> Vec<StoredVertex> {
        let mut matched: Vec<StoredVertex> = self
            .vertices
            .read()
            .values()
            .filter(|v| v.properties.get(key) == Some(value))
            .cloned()
            .collect();
        matched.sort_by_key(|v| v.id);
        matched
    }
}

/// `data` without the reserved `_`-prefixed wire keys.
pub fn user_properties(data: &PropertyData) -> PropertyData {
    data.iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn vertex_not_found(id: VertexId) -> Error {
    Error::NotFound(format!("vertex {}", id))
}

fn edge_not_found(id: EdgeId) -> Error {
    Error::NotFound(format!("edge {}", id))
}
