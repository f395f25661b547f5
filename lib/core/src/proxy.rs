//! Repositories for vertices and edges.
//!
//! Proxies hold no state besides their element class, the shared client and
//! an optional index. Every call is exactly one client request.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::coerce::{build_data, coerce_vertices, Fields, VertexRef};
use crate::{
    initialize_element, BaseType, Edge, ElementClass, ElementId, Elements, Error, Index,
    PropertyData, Response, Result, SharedClient, Vertex,
};

fn check_base(class: &ElementClass, expected: BaseType) -> Result<()> {
    if class.base_type() != expected {
        return Err(Error::InvalidArgument(format!(
            "{} is a {} class, expected {}",
            class.name(),
            class.base_type(),
            expected
        )));
    }
    Ok(())
}

/// CRUD for vertices of one element class.
///
/// ```rust,ignore
/// let james = vertices.create(None, &[("name", json!("James"))])?;
/// vertices.update(james.id(), None, &[("age", json!(34))])?;
/// let james = vertices.get(james.id())?;
/// vertices.delete(james.id())?;
/// ```
#[derive(Clone)]
pub struct VertexProxy {
    class: Arc<ElementClass>,
    client: SharedClient,
    index: Option<Arc<dyn Index>>,
}

impl VertexProxy {
    /// Create a proxy and register `class` so results decode into it.
    pub fn new(class: ElementClass, client: SharedClient) -> Result<Self> {
        check_base(&class, BaseType::Vertex)?;
        let class = client.registry().add_class(class);
        Ok(Self {
            class,
            client,
            index: None,
        })
    }

    pub(crate) fn base(client: SharedClient) -> Self {
        Self {
            class: client.registry().base_class(BaseType::Vertex),
            client,
            index: None,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: Arc<dyn Index>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn index(&self) -> Option<&Arc<dyn Index>> {
        self.index.as_ref()
    }

    pub fn element_class(&self) -> &ElementClass {
        &self.class
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    /// Typed models carry their element key so results decode back into them.
    fn stamp(&self, data: &mut PropertyData) {
        if self.class.is_base() {
            return;
        }
        let type_var = &self.client.config().type_var;
        if !data.contains_key(type_var) {
            data.set(type_var.clone(), self.class.element_key());
        }
    }

    pub fn create(&self, data: Option<PropertyData>, fields: Fields<'_>) -> Result<Vertex> {
        let mut data = build_data(data, fields);
        self.stamp(&mut data);
        debug!(class = self.class.name(), keys = data.len(), "create vertex");

        let response = self.client.create_vertex(&data)?;
        initialize_element(&self.client, response.one()?)?.into_vertex()
    }

    /// Fetch a vertex; `Ok(None)` when the server does not know the ID.
    pub fn get(&self, id: impl Into<ElementId>) -> Result<Option<Vertex>> {
        let id = id.into();
        debug!(%id, "get vertex");
        match self.client.get_vertex(&id) {
            Ok(response) => initialize_element(&self.client, response.one()?)?
                .into_vertex()
                .map(Some),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Look `key`/`value` up in the attached index and create the vertex if
    /// nothing matches. `key`/`value` are added to the payload when absent.
    ///
    /// Not atomic: lookup and create are separate requests, so concurrent
    /// callers can both miss and both create.
    pub fn get_or_create(
        &self,
        key: &str,
        value: impl Into<Value>,
        data: Option<PropertyData>,
        fields: Fields<'_>,
    ) -> Result<Vertex> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| Error::IndexNotAttached(self.class.name().to_string()))?;
        let value = value.into();

        if let Some(vertex) = index.get_unique(key, &value)? {
            return Ok(vertex);
        }

        let mut data = build_data(data, fields);
        if !data.contains_key(key) {
            data.set(key, value);
        }
        self.create(Some(data), &[])
    }

    pub fn get_all(&self) -> Result<Elements<Vertex>> {
        let response = self.client.get_all_vertices()?;
        Ok(Elements::new(self.client.clone(), response))
    }

    /// Replace the vertex's properties. Returns the raw response; servers
    /// are not required to echo the element back.
    pub fn update(
        &self,
        id: impl Into<ElementId>,
        data: Option<PropertyData>,
        fields: Fields<'_>,
    ) -> Result<Response> {
        let id = id.into();
        let data = build_data(data, fields);
        debug!(%id, keys = data.len(), "update vertex");
        self.client.update_vertex(&id, &data)
    }

    pub fn remove_properties(&self, id: impl Into<ElementId>) -> Result<Response> {
        self.client.remove_vertex_properties(&id.into())
    }

    pub fn delete(&self, id: impl Into<ElementId>) -> Result<Response> {
        let id = id.into();
        debug!(%id, "delete vertex");
        self.client.delete_vertex(&id)
    }
}

/// CRUD for edges of one element class.
#[derive(Clone)]
pub struct EdgeProxy {
    class: Arc<ElementClass>,
    client: SharedClient,
}

impl EdgeProxy {
    pub fn new(class: ElementClass, client: SharedClient) -> Result<Self> {
        check_base(&class, BaseType::Edge)?;
        let class = client.registry().add_class(class);
        Ok(Self { class, client })
    }

    pub(crate) fn base(client: SharedClient) -> Self {
        Self {
            class: client.registry().base_class(BaseType::Edge),
            client,
        }
    }

    pub fn element_class(&self) -> &ElementClass {
        &self.class
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    /// Create an edge `out_v -[label]-> in_v`. Endpoints may be vertices or
    /// raw IDs. A blank label is rejected before any request is made.
    pub fn create<'a, 'b>(
        &self,
        out_v: impl Into<VertexRef<'a>>,
        label: &str,
        in_v: impl Into<VertexRef<'b>>,
        data: Option<PropertyData>,
        fields: Fields<'_>,
    ) -> Result<Edge> {
        if label.trim().is_empty() {
            return Err(Error::InvalidArgument("edge label must not be empty".to_string()));
        }
        let data = build_data(data, fields);
        let (out_v, in_v) = coerce_vertices(out_v, in_v);
        debug!(%out_v, label, %in_v, "create edge");

        let response = self.client.create_edge(&out_v, label, &in_v, &data)?;
        initialize_element(&self.client, response.one()?)?.into_edge()
    }

    /// Fetch an edge; `Ok(None)` when the server does not know the ID.
    pub fn get(&self, id: impl Into<ElementId>) -> Result<Option<Edge>> {
        let id = id.into();
        debug!(%id, "get edge");
        match self.client.get_edge(&id) {
            Ok(response) => initialize_element(&self.client, response.one()?)?
                .into_edge()
                .map(Some),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn get_all(&self) -> Result<Elements<Edge>> {
        let response = self.client.get_all_edges()?;
        Ok(Elements::new(self.client.clone(), response))
    }

    pub fn update(
        &self,
        id: impl Into<ElementId>,
        data: Option<PropertyData>,
        fields: Fields<'_>,
    ) -> Result<Response> {
        let id = id.into();
        let data = build_data(data, fields);
        debug!(%id, keys = data.len(), "update edge");
        self.client.update_edge(&id, &data)
    }

    pub fn remove_properties(&self, id: impl Into<ElementId>) -> Result<Response> {
        self.client.remove_edge_properties(&id.into())
    }

    pub fn delete(&self, id: impl Into<ElementId>) -> Result<Response> {
        let id = id.into();
        debug!(%id, "delete edge");
        self.client.delete_edge(&id)
    }
}
