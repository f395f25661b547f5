use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::{Config, ElementResult, Error, Result};

/// The two base element types a graph server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Vertex,
    Edge,
}

impl BaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Vertex => "vertex",
            BaseType::Edge => "edge",
        }
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vertex" => Ok(BaseType::Vertex),
            "edge" => Ok(BaseType::Edge),
            other => Err(Error::UnexpectedElementType {
                expected: "vertex or edge".to_string(),
                actual: other.to_string(),
            }),
        }
    }
}

/// Describes a concrete element type: the plain `Vertex`/`Edge` or a typed
/// model layered on top of one of them.
///
/// Vertex models are told apart by the element key stored under
/// [`Config::type_var`]; edge models by their label.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementClass {
    name: String,
    base_type: BaseType,
    element_key: String,
    index_name: Option<String>,
    fields: Vec<(String, serde_json::Value)>,
}

impl ElementClass {
    pub fn vertex() -> Self {
        Self {
            name: "Vertex".to_string(),
            base_type: BaseType::Vertex,
            element_key: "vertex".to_string(),
            index_name: None,
            fields: Vec::new(),
        }
    }

    pub fn edge() -> Self {
        Self {
            name: "Edge".to_string(),
            base_type: BaseType::Edge,
            element_key: "edge".to_string(),
            index_name: None,
            fields: Vec::new(),
        }
    }

    pub fn vertex_model(name: impl Into<String>, element_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_key: element_key.into(),
            ..Self::vertex()
        }
    }

    pub fn edge_model(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_key: label.into(),
            ..Self::edge()
        }
    }

    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Declare a non-database attribute with its initial value. Declared
    /// attributes live on the element itself and are never saved.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, default: impl Into<serde_json::Value>) -> Self {
        self.fields.push((name.into(), default.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    pub fn element_key(&self) -> &str {
        &self.element_key
    }

    pub fn fields(&self) -> &[(String, serde_json::Value)] {
        &self.fields
    }

    /// Index used for this class, defaulting to the configured one.
    pub fn index_name<'a>(&'a self, config: &'a Config) -> &'a str {
        match (&self.index_name, self.base_type) {
            (Some(name), _) => name,
            (None, BaseType::Vertex) => &config.vertex_index,
            (None, BaseType::Edge) => &config.edge_index,
        }
    }

    /// True for the plain `Vertex`/`Edge` classes.
    pub fn is_base(&self) -> bool {
        self.element_key == self.base_type.as_str()
    }
}

/// Lookup table used to decode raw results into the right element class.
pub struct Registry {
    classes: RwLock<AHashMap<(BaseType, String), Arc<ElementClass>>>,
    vertex: Arc<ElementClass>,
    edge: Arc<ElementClass>,
}

impl Registry {
    pub fn new() -> Self {
        let vertex = Arc::new(ElementClass::vertex());
        let edge = Arc::new(ElementClass::edge());
        let mut classes = AHashMap::new();
        classes.insert((BaseType::Vertex, vertex.element_key.clone()), vertex.clone());
        classes.insert((BaseType::Edge, edge.element_key.clone()), edge.clone());

        Self {
            classes: RwLock::new(classes),
            vertex,
            edge,
        }
    }

    /// Register a class, replacing any earlier class with the same key.
    pub fn add_class(&self, class: ElementClass) -> Arc<ElementClass> {
        let key = (class.base_type, class.element_key.clone());
        let class = Arc::new(class);
        self.classes.write().insert(key, class.clone());
        class
    }

    pub fn get_class(&self, base_type: BaseType, element_key: &str) -> Option<Arc<ElementClass>> {
        self.classes
            .read()
            .get(&(base_type, element_key.to_string()))
            .cloned()
    }

    pub fn base_class(&self, base_type: BaseType) -> Arc<ElementClass> {
        match base_type {
            BaseType::Vertex => self.vertex.clone(),
            BaseType::Edge => self.edge.clone(),
        }
    }

    /// Pick the class a decoded result should be initialized as.
    pub fn resolve(&self, result: &ElementResult, config: &Config) -> Arc<ElementClass> {
        let base_type = result.element_type();
        let key = match base_type {
            BaseType::Vertex => result
                .map()
                .get(&config.type_var)
                .and_then(|v| v.as_str()),
            BaseType::Edge => result.label(),
        };

        key.and_then(|k| self.get_class(base_type, k))
            .unwrap_or_else(|| self.base_class(base_type))
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementId, PropertyData};

    #[test]
    fn test_resolve_falls_back_to_base() {
        let registry = Registry::new();
        let config = Config::default();
        let result = ElementResult::vertex(1u64, "uri", PropertyData::new().with("element_type", "person"));

        assert_eq!(registry.resolve(&result, &config).name(), "Vertex");

        registry.add_class(ElementClass::vertex_model("Person", "person"));
        assert_eq!(registry.resolve(&result, &config).name(), "Person");
    }

    #[test]
    fn test_resolve_edge_by_label() {
        let registry = Registry::new();
        let config = Config::default();
        registry.add_class(ElementClass::edge_model("Knows", "knows"));

        let knows = ElementResult::edge(ElementId::from(9u64), "uri", 1u64, "knows", 2u64, PropertyData::new());
        let likes = ElementResult::edge(ElementId::from(10u64), "uri", 1u64, "likes", 2u64, PropertyData::new());
        assert_eq!(registry.resolve(&knows, &config).name(), "Knows");
        assert_eq!(registry.resolve(&likes, &config).name(), "Edge");
    }

    #[test]
    fn test_index_name_override() {
        let config = Config::default();
        assert_eq!(ElementClass::vertex().index_name(&config), "vertex");
        assert_eq!(ElementClass::edge().index_name(&config), "edge");
        let person = ElementClass::vertex_model("Person", "person").with_index_name("people");
        assert_eq!(person.index_name(&config), "people");
        assert!(!person.is_base());
    }

    #[test]
    fn test_add_class_counts() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 2);
        registry.add_class(ElementClass::vertex_model("Person", "person"));
        registry.add_class(ElementClass::vertex_model("Person", "person"));
        assert_eq!(registry.len(), 3);
    }
}
