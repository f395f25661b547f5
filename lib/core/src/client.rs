use std::sync::Arc;

use crate::{BaseType, Config, ElementId, PropertyData, Registry, Response, Result};

/// Which side of a vertex an adjacency query follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Out,
    In,
    Both,
}

impl Direction {
    /// Path step used by Rexster-style servers, e.g. `outE` or `both`.
    pub fn step(&self, target: BaseType) -> &'static str {
        match (self, target) {
            (Direction::Out, BaseType::Edge) => "outE",
            (Direction::In, BaseType::Edge) => "inE",
            (Direction::Both, BaseType::Edge) => "bothE",
            (Direction::Out, BaseType::Vertex) => "out",
            (Direction::In, BaseType::Vertex) => "in",
            (Direction::Both, BaseType::Vertex) => "both",
        }
    }

    pub fn from_step(step: &str) -> Option<(Direction, BaseType)> {
        match step {
            "outE" => Some((Direction::Out, BaseType::Edge)),
            "inE" => Some((Direction::In, BaseType::Edge)),
            "bothE" => Some((Direction::Both, BaseType::Edge)),
            "out" => Some((Direction::Out, BaseType::Vertex)),
            "in" => Some((Direction::In, BaseType::Vertex)),
            "both" => Some((Direction::Both, BaseType::Vertex)),
            _ => None,
        }
    }
}

/// Network client of a graph server.
///
/// Every call is a single blocking request. `get_vertex`/`get_edge` must
/// return [`crate::Error::NotFound`] for missing elements; everything else
/// is passed through to callers untouched. Timeouts and retries are the
/// implementation's business.
pub trait Client: Send + Sync {
    fn config(&self) -> &Config;

    fn registry(&self) -> &Registry;

    fn create_vertex(&self, data: &PropertyData) -> Result<Response>;

    fn get_vertex(&self, id: &ElementId) -> Result<Response>;

    fn get_all_vertices(&self) -> Result<Response>;

    fn update_vertex(&self, id: &ElementId, data: &PropertyData) -> Result<Response>;

    fn remove_vertex_properties(&self, id: &ElementId) -> Result<Response>;

    fn delete_vertex(&self, id: &ElementId) -> Result<Response>;

    fn create_edge(
        &self,
        out_v: &ElementId,
        label: &str,
        in_v: &ElementId,
        data: &PropertyData,
    ) -> Result<Response>;

    fn get_edge(&self, id: &ElementId) -> Result<Response>;

    fn get_all_edges(&self) -> Result<Response>;

    fn update_edge(&self, id: &ElementId, data: &PropertyData) -> Result<Response>;

    fn remove_edge_properties(&self, id: &ElementId) -> Result<Response>;

    fn delete_edge(&self, id: &ElementId) -> Result<Response>;

    /// Elements adjacent to vertex `id`, optionally restricted to edges
    /// with the given label.
    fn adjacent(
        &self,
        id: &ElementId,
        direction: Direction,
        target: BaseType,
        label: Option<&str>,
    ) -> Result<Response>;

    fn out_e(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::Out, BaseType::Edge, label)
    }

    fn in_e(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::In, BaseType::Edge, label)
    }

    fn both_e(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::Both, BaseType::Edge, label)
    }

    fn out_v(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::Out, BaseType::Vertex, label)
    }

    fn in_v(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::In, BaseType::Vertex, label)
    }

    fn both_v(&self, id: &ElementId, label: Option<&str>) -> Result<Response> {
        self.adjacent(id, Direction::Both, BaseType::Vertex, label)
    }
}

/// Shared handle to a client; elements and proxies all hold one.
pub type SharedClient = Arc<dyn Client>;
