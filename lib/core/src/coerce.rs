//! Normalizes caller input into request payloads and identifiers.
use serde_json::Value;

use crate::{ElementId, PropertyData, Vertex};

/// Keyword-style property pairs, e.g. `&[("name", json!("James"))]`.
pub type Fields<'a> = &'a [(&'a str, Value)];

/// Merge an optional base map with keyword fields. Fields win on key
/// collision; a missing base means an empty map.
pub fn build_data(data: Option<PropertyData>, fields: Fields<'_>) -> PropertyData {
    let mut data = data.unwrap_or_default();
    for (key, value) in fields {
        data.set(*key, value.clone());
    }
    data
}

/// A vertex given either as an element or as a raw identifier.
#[derive(Debug, Clone)]
pub enum VertexRef<'a> {
    Vertex(&'a Vertex),
    Id(ElementId),
}

impl<'a> From<&'a Vertex> for VertexRef<'a> {
    fn from(vertex: &'a Vertex) -> Self {
        VertexRef::Vertex(vertex)
    }
}

impl From<ElementId> for VertexRef<'_> {
    fn from(id: ElementId) -> Self {
        VertexRef::Id(id)
    }
}

impl From<&ElementId> for VertexRef<'_> {
    fn from(id: &ElementId) -> Self {
        VertexRef::Id(id.clone())
    }
}

impl From<u64> for VertexRef<'_> {
    fn from(id: u64) -> Self {
        VertexRef::Id(ElementId::Integer(id))
    }
}

impl From<&str> for VertexRef<'_> {
    fn from(raw: &str) -> Self {
        VertexRef::Id(coerce_id(raw))
    }
}

impl From<String> for VertexRef<'_> {
    fn from(raw: String) -> Self {
        VertexRef::Id(coerce_id(&raw))
    }
}

/// Turn a raw identifier into an [`ElementId`]. Numeric strings become
/// integers; anything else (URIs, record IDs) is kept verbatim.
pub fn coerce_id(raw: &str) -> ElementId {
    ElementId::parse(raw)
}

pub fn coerce_vertex<'a>(vertex: impl Into<VertexRef<'a>>) -> ElementId {
    match vertex.into() {
        VertexRef::Vertex(v) => v.id().clone(),
        VertexRef::Id(id) => id,
    }
}

pub fn coerce_vertices<'a, 'b>(
    out_v: impl Into<VertexRef<'a>>,
    in_v: impl Into<VertexRef<'b>>,
) -> (ElementId, ElementId) {
    (coerce_vertex(out_v), coerce_vertex(in_v))
}
