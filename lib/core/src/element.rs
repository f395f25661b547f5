//! Shared base of [`Vertex`] and [`Edge`].
//!
//! An element has two attribute tiers:
//!
//! - *declared* attributes, which belong to the element object itself and
//!   are never sent to the server (declared on the [`ElementClass`] or
//!   written before initialization), and
//! - *property data*, the user-defined key/values stored in the graph.
//!
//! [`Element::set_attr`] routes a write per key: a name that is already a
//! declared attribute updates that attribute, any other name becomes (or
//! overwrites) a property. Structural names (`_id`, `_type`, the configured
//! ID var and, for edges, `_outV`/`_inV`/`_label`) are read-only.

use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    BaseType, Edge, EdgeProxy, ElementClass, ElementId, ElementResult, Error, PropertyData,
    Response, Result, SharedClient, Vertex, VertexProxy,
};

const EDGE_STRUCTURAL: [&str; 3] = ["_outV", "_inV", "_label"];

/// An element that has been constructed but not yet filled from a server
/// result. Every attribute write lands in the declared-attribute store.
pub(crate) struct PendingElement {
    client: SharedClient,
    class: Arc<ElementClass>,
    fields: PropertyData,
}

impl PendingElement {
    pub(crate) fn new(client: SharedClient, class: Arc<ElementClass>) -> Self {
        let mut pending = Self {
            client,
            class: class.clone(),
            fields: PropertyData::new(),
        };
        for (name, value) in class.fields() {
            pending.set_attr(name.clone(), value.clone());
        }
        pending
    }

    pub(crate) fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.set(name, value);
    }

    /// Fill the element from a decoded result. Property data is copied so
    /// later writes never reach back into the result.
    pub(crate) fn initialize(self, result: ElementResult) -> Element {
        let data = result.map().clone();
        let structural = structural_values(&result, &self.client.config().id_var);
        let vertices = VertexProxy::base(self.client.clone());
        let edges = EdgeProxy::base(self.client.clone());

        Element {
            client: self.client,
            class: self.class,
            result,
            structural,
            data,
            fields: self.fields,
            vertices,
            edges,
        }
    }
}

/// Read-only values addressable by name: the ID (also under `id_var`), the
/// base type and, for edges, the endpoints and label.
fn structural_values(result: &ElementResult, id_var: &str) -> PropertyData {
    let mut values = PropertyData::new()
        .with("_id", result.id().to_json())
        .with("_type", result.element_type().as_str());
    values.set(id_var, result.id().to_json());
    if let Some(out_v) = result.out_v() {
        values.set("_outV", out_v.to_json());
    }
    if let Some(in_v) = result.in_v() {
        values.set("_inV", in_v.to_json());
    }
    if let Some(label) = result.label() {
        values.set("_label", label);
    }
    values
}

/// A vertex or edge backed by a decoded server result.
#[derive(Clone)]
pub struct Element {
    client: SharedClient,
    class: Arc<ElementClass>,
    result: ElementResult,
    structural: PropertyData,
    data: PropertyData,
    fields: PropertyData,
    vertices: VertexProxy,
    edges: EdgeProxy,
}

impl Element {
    /// The element's primary key on the server.
    ///
    /// Some backends reuse IDs after deletion, so an ID alone does not
    /// identify an element across its lifetime.
    pub fn id(&self) -> &ElementId {
        self.result.id()
    }

    /// The ID under its configured name (see [`crate::Config::id_var`]).
    pub fn pretty_id(&self) -> &ElementId {
        self.result.id()
    }

    pub fn id_var(&self) -> &str {
        &self.client.config().id_var
    }

    pub fn element_type(&self) -> BaseType {
        self.result.element_type()
    }

    pub fn uri(&self) -> &str {
        self.result.uri()
    }

    pub fn class(&self) -> &ElementClass {
        &self.class
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    pub fn result(&self) -> &ElementResult {
        &self.result
    }

    /// Declared (non-database) attributes.
    pub fn fields(&self) -> &PropertyData {
        &self.fields
    }

    pub fn is_structural(&self, name: &str) -> bool {
        name == "_id"
            || name == "_type"
            || name == self.id_var()
            || (self.element_type() == BaseType::Edge && EDGE_STRUCTURAL.contains(&name))
    }

    /// Read an attribute: structural names first, then declared attributes,
    /// then property data.
    pub fn attr(&self, name: &str) -> Result<Value> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| Error::MissingProperty(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.structural
            .get(name)
            .or_else(|| self.fields.get(name))
            .or_else(|| self.data.get(name))
    }

    /// Like [`Element::attr`] but yields `None` instead of failing.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.attr(name).ok()
    }

    /// Write an attribute. Declared attributes are updated in place; any
    /// other name is stored as property data and persisted on `save()`.
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.is_structural(name) {
            return Err(Error::ReadOnlyAttribute(name.to_string()));
        }
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value.into();
        } else {
            self.data.set(name, value);
        }
        Ok(())
    }

    /// Property data only, bypassing declared attributes.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.set(key, value)
    }

    /// The live property data. Not a copy: changes made through
    /// [`Element::map_mut`] are what `save()` sends.
    pub fn map(&self) -> &PropertyData {
        &self.data
    }

    pub fn map_mut(&mut self) -> &mut PropertyData {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub(crate) fn vertices(&self) -> &VertexProxy {
        &self.vertices
    }

    pub(crate) fn edges(&self) -> &EdgeProxy {
        &self.edges
    }
}

/// Equal when both are the same class, with the same ID and the same
/// property data. The data check guards against backends that recycle IDs;
/// it is a heuristic, not a guarantee.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.class.base_type() == other.class.base_type()
            && self.class.name() == other.class.name()
            && self.id() == other.id()
            && self.data == other.data
    }
}

impl std::ops::Index<&str> for Element {
    type Output = Value;

    /// Resolves like [`Element::attr`]; panics where `attr` would fail.
    fn index(&self, key: &str) -> &Value {
        match self.lookup(key) {
            Some(value) => value,
            None => panic!("no property named {:?} on {}", key, self),
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}: {}>", self.class.name(), self.uri())
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.class.name())
            .field("id", self.id())
            .field("uri", &self.uri())
            .field("data", &self.data)
            .finish()
    }
}

/// Either kind of element, as produced by polymorphic decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyElement {
    Vertex(Vertex),
    Edge(Edge),
}

impl AnyElement {
    pub fn element(&self) -> &Element {
        match self {
            AnyElement::Vertex(v) => v.as_element(),
            AnyElement::Edge(e) => e.as_element(),
        }
    }

    pub fn into_vertex(self) -> Result<Vertex> {
        match self {
            AnyElement::Vertex(v) => Ok(v),
            AnyElement::Edge(_) => Err(Error::UnexpectedElementType {
                expected: "vertex".to_string(),
                actual: "edge".to_string(),
            }),
        }
    }

    pub fn into_edge(self) -> Result<Edge> {
        match self {
            AnyElement::Edge(e) => Ok(e),
            AnyElement::Vertex(_) => Err(Error::UnexpectedElementType {
                expected: "edge".to_string(),
                actual: "vertex".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for AnyElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.element(), f)
    }
}

/// Conversion out of a decoded element, used by [`Elements`].
pub trait FromElement: Sized {
    fn from_element(element: AnyElement) -> Result<Self>;
}

impl FromElement for AnyElement {
    fn from_element(element: AnyElement) -> Result<Self> {
        Ok(element)
    }
}

impl FromElement for Vertex {
    fn from_element(element: AnyElement) -> Result<Self> {
        element.into_vertex()
    }
}

impl FromElement for Edge {
    fn from_element(element: AnyElement) -> Result<Self> {
        element.into_edge()
    }
}

/// Decode one result into an initialized element of its registered class.
pub fn initialize_element(client: &SharedClient, result: ElementResult) -> Result<AnyElement> {
    let class = client.registry().resolve(&result, client.config());
    let base_type = result.element_type();
    let element = PendingElement::new(client.clone(), class).initialize(result);

    Ok(match base_type {
        BaseType::Vertex => AnyElement::Vertex(Vertex::wrap(element)),
        BaseType::Edge => AnyElement::Edge(Edge::wrap(element)),
    })
}

/// Lazily initialized elements of one response.
///
/// The request has already been made; iteration only decodes. The sequence
/// is finite and cannot be restarted without repeating the request.
pub struct Elements<T> {
    client: SharedClient,
    results: std::vec::IntoIter<ElementResult>,
    total_size: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Elements<T> {
    pub fn new(client: SharedClient, response: Response) -> Self {
        let total_size = response.total_size();
        Self {
            client,
            results: response.into_results().into_iter(),
            total_size,
            marker: PhantomData,
        }
    }

    /// Total count reported by the server.
    pub fn total_size(&self) -> usize {
        self.total_size
    }
}

impl<T: FromElement> Iterator for Elements<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.results.next()?;
        Some(initialize_element(&self.client, result).and_then(T::from_element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.results.size_hint()
    }
}

impl<T: FromElement> ExactSizeIterator for Elements<T> {}
