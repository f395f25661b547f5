use std::ops::{Deref, DerefMut};

use crate::{BaseType, Direction, Edge, Element, Elements, Response, Result};

/// A vertex returned by a proxy, traversal or index lookup.
///
/// ```rust,ignore
/// let mut james = graph.vertices.get(3u64)?.expect("vertex 3");
/// james.set_attr("age", 34)?;
/// james.save()?;
///
/// for friend in james.out_v(Some("knows"))? {
///     println!("{}", friend?);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    element: Element,
}

impl Vertex {
    pub(crate) fn wrap(element: Element) -> Self {
        Self { element }
    }

    pub fn as_element(&self) -> &Element {
        &self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }

    fn edges_towards(&self, direction: Direction, label: Option<&str>) -> Result<Elements<Edge>> {
        let response = self
            .client()
            .adjacent(self.id(), direction, BaseType::Edge, label)?;
        Ok(Elements::new(self.client().clone(), response))
    }

    fn vertices_towards(&self, direction: Direction, label: Option<&str>) -> Result<Elements<Vertex>> {
        let response = self
            .client()
            .adjacent(self.id(), direction, BaseType::Vertex, label)?;
        Ok(Elements::new(self.client().clone(), response))
    }

    /// Outgoing edges, optionally only those with `label`.
    pub fn out_e(&self, label: Option<&str>) -> Result<Elements<Edge>> {
        self.edges_towards(Direction::Out, label)
    }

    /// Incoming edges.
    pub fn in_e(&self, label: Option<&str>) -> Result<Elements<Edge>> {
        self.edges_towards(Direction::In, label)
    }

    /// Incoming and outgoing edges.
    pub fn both_e(&self, label: Option<&str>) -> Result<Elements<Edge>> {
        self.edges_towards(Direction::Both, label)
    }

    /// Vertices reached through outgoing edges.
    pub fn out_v(&self, label: Option<&str>) -> Result<Elements<Vertex>> {
        self.vertices_towards(Direction::Out, label)
    }

    /// Vertices reached through incoming edges.
    pub fn in_v(&self, label: Option<&str>) -> Result<Elements<Vertex>> {
        self.vertices_towards(Direction::In, label)
    }

    pub fn both_v(&self, label: Option<&str>) -> Result<Elements<Vertex>> {
        self.vertices_towards(Direction::Both, label)
    }

    /// Send the current property data to the server. The local copy is not
    /// refreshed afterwards.
    pub fn save(&self) -> Result<Response> {
        self.element
            .vertices()
            .update(self.id(), Some(self.map().clone()), &[])
    }
}

impl Deref for Vertex {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl DerefMut for Vertex {
    fn deref_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.element, f)
    }
}
