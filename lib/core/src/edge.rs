use std::ops::{Deref, DerefMut};

use crate::{Element, ElementId, Error, Response, Result, Vertex};

/// A directed, labeled edge between two vertices.
///
/// Endpoints and label come from the server result and cannot be changed;
/// only property data is writable.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    element: Element,
}

impl Edge {
    pub(crate) fn wrap(element: Element) -> Self {
        Self { element }
    }

    pub fn as_element(&self) -> &Element {
        &self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }

    fn endpoint<'a>(&self, id: Option<&'a ElementId>, key: &str) -> Result<&'a ElementId> {
        id.ok_or_else(|| Error::Serialization(format!("edge {} has no {}", self.id(), key)))
    }

    /// ID of the vertex this edge leaves.
    pub fn out_v_id(&self) -> Result<&ElementId> {
        self.endpoint(self.result().out_v(), "_outV")
    }

    /// ID of the vertex this edge enters.
    pub fn in_v_id(&self) -> Result<&ElementId> {
        self.endpoint(self.result().in_v(), "_inV")
    }

    /// Fetch the outgoing vertex. One request per call; `None` if it no
    /// longer exists.
    pub fn out_v(&self) -> Result<Option<Vertex>> {
        self.element.vertices().get(self.out_v_id()?)
    }

    /// Fetch the incoming vertex.
    pub fn in_v(&self) -> Result<Option<Vertex>> {
        self.element.vertices().get(self.in_v_id()?)
    }

    pub fn label(&self) -> &str {
        self.result().label().unwrap_or_default()
    }

    /// Send the current property data to the server.
    pub fn save(&self) -> Result<Response> {
        self.element
            .edges()
            .update(self.id(), Some(self.map().clone()), &[])
    }
}

impl Deref for Edge {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl DerefMut for Edge {
    fn deref_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.element, f)
    }
}
