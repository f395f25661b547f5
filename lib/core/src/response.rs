//! Decoded server payloads.
//!
//! Elements travel in the Rexster JSON shape: reserved keys are prefixed
//! with an underscore (`_id`, `_type`, `_outV`, `_inV`, `_label`) and every
//! other key is a user property. A response body wraps either a single
//! element or a list under `results`.

use serde_json::{Map, Value};

use crate::{BaseType, ElementId, Error, PropertyData, Result};

const ID_KEY: &str = "_id";
const TYPE_KEY: &str = "_type";
const OUT_V_KEY: &str = "_outV";
const IN_V_KEY: &str = "_inV";
const LABEL_KEY: &str = "_label";

/// One decoded vertex or edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementResult {
    id: ElementId,
    element_type: BaseType,
    uri: String,
    out_v: Option<ElementId>,
    in_v: Option<ElementId>,
    label: Option<String>,
    properties: PropertyData,
}

impl ElementResult {
    pub fn vertex(id: impl Into<ElementId>, uri: impl Into<String>, properties: PropertyData) -> Self {
        Self {
            id: id.into(),
            element_type: BaseType::Vertex,
            uri: uri.into(),
            out_v: None,
            in_v: None,
            label: None,
            properties,
        }
    }

    pub fn edge(
        id: impl Into<ElementId>,
        uri: impl Into<String>,
        out_v: impl Into<ElementId>,
        label: impl Into<String>,
        in_v: impl Into<ElementId>,
        properties: PropertyData,
    ) -> Self {
        Self {
            id: id.into(),
            element_type: BaseType::Edge,
            uri: uri.into(),
            out_v: Some(out_v.into()),
            in_v: Some(in_v.into()),
            label: Some(label.into()),
            properties,
        }
    }

    /// Decode one element object. `root` is the graph URI used to build the
    /// element's own location.
    pub fn from_json(value: &Value, root: &str) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::Serialization(format!("expected element object, got {}", value)))?;

        let id = id_field(object, ID_KEY, "element")?;

        let element_type: BaseType = object
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Serialization("element is missing _type".to_string()))?
            .parse()?;

        let properties: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let root = root.trim_end_matches('/');
        match element_type {
            BaseType::Vertex => Ok(Self::vertex(
                id.clone(),
                format!("{}/vertices/{}", root, id),
                properties.into(),
            )),
            BaseType::Edge => {
                let endpoint = |key: &str| id_field(object, key, "edge");
                let label = object
                    .get(LABEL_KEY)
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::Serialization("edge is missing _label".to_string()))?;

                Ok(Self::edge(
                    id.clone(),
                    format!("{}/edges/{}", root, id),
                    endpoint(OUT_V_KEY)?,
                    label,
                    endpoint(IN_V_KEY)?,
                    properties.into(),
                ))
            }
        }
    }

    /// Encode back into the wire shape.
    pub fn to_json(&self) -> Value {
        let mut object = self.properties.clone().into_map();
        object.insert(ID_KEY.to_string(), self.id.to_json());
        object.insert(TYPE_KEY.to_string(), Value::from(self.element_type.as_str()));
        if let Some(out_v) = &self.out_v {
            object.insert(OUT_V_KEY.to_string(), out_v.to_json());
        }
        if let Some(in_v) = &self.in_v {
            object.insert(IN_V_KEY.to_string(), in_v.to_json());
        }
        if let Some(label) = &self.label {
            object.insert(LABEL_KEY.to_string(), Value::from(label.as_str()));
        }
        Value::Object(object)
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn element_type(&self) -> BaseType {
        self.element_type
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn out_v(&self) -> Option<&ElementId> {
        self.out_v.as_ref()
    }

    pub fn in_v(&self) -> Option<&ElementId> {
        self.in_v.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Raw property payload.
    pub fn map(&self) -> &PropertyData {
        &self.properties
    }
}

/// Keys that carry structure rather than user data.
pub fn is_reserved(key: &str) -> bool {
    matches!(key, ID_KEY | TYPE_KEY | OUT_V_KEY | IN_V_KEY | LABEL_KEY)
}

/// A decoded response: zero or more element results plus the raw body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    results: Vec<ElementResult>,
    total_size: usize,
    raw: Value,
}

impl Response {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_results(results: Vec<ElementResult>) -> Self {
        let total_size = results.len();
        let raw = serde_json::json!({
            "results": results.iter().map(ElementResult::to_json).collect::<Vec<_>>(),
            "totalSize": total_size,
        });
        Self {
            results,
            total_size,
            raw,
        }
    }

    pub fn single(result: ElementResult) -> Self {
        let raw = serde_json::json!({ "results": result.to_json() });
        Self {
            results: vec![result],
            total_size: 1,
            raw,
        }
    }

    /// Decode a response body. `results` may be absent, null, a single
    /// element object or a list of them.
    pub fn from_json(body: Value, root: &str) -> Result<Self> {
        let results = match body.get("results") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| ElementResult::from_json(item, root))
                .collect::<Result<Vec<_>>>()?,
            Some(item) => vec![ElementResult::from_json(item, root)?],
        };

        let total_size = body
            .get("totalSize")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(results.len());

        Ok(Self {
            results,
            total_size,
            raw: body,
        })
    }

    pub fn results(&self) -> &[ElementResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ElementResult> {
        self.results
    }

    /// The single result of a create/get call.
    pub fn one(self) -> Result<ElementResult> {
        self.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Serialization("response carried no element".to_string()))
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Identifiers are non-negative integers or strings; anything else is
/// reported as unsupported rather than missing.
fn id_field(object: &Map<String, Value>, key: &str, owner: &str) -> Result<ElementId> {
    match object.get(key) {
        None | Some(Value::Null) => Err(Error::Serialization(format!("{} is missing {}", owner, key))),
        Some(value) => ElementId::from_json(value).ok_or_else(|| {
            Error::Serialization(format!("unsupported {} value {}", key, value))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "http://localhost:8182/graphs/graph";

    #[test]
    fn test_decode_vertex() {
        let body = json!({"results": {"_id": 1, "_type": "vertex", "name": "James"}});
        let response = Response::from_json(body, ROOT).unwrap();
        let vertex = response.one().unwrap();

        assert_eq!(vertex.id(), &ElementId::Integer(1));
        assert_eq!(vertex.element_type(), BaseType::Vertex);
        assert_eq!(vertex.uri(), "http://localhost:8182/graphs/graph/vertices/1");
        assert_eq!(vertex.map().len(), 1);
        assert_eq!(vertex.map().get("name"), Some(&json!("James")));
    }

    #[test]
    fn test_decode_edge_list() {
        let body = json!({
            "results": [
                {"_id": "7", "_type": "edge", "_outV": 1, "_inV": "2", "_label": "knows", "since": 2020}
            ],
            "totalSize": 1
        });
        let response = Response::from_json(body, ROOT).unwrap();
        assert_eq!(response.total_size(), 1);

        let edge = &response.results()[0];
        assert_eq!(edge.id(), &ElementId::Integer(7));
        assert_eq!(edge.out_v(), Some(&ElementId::Integer(1)));
        assert_eq!(edge.in_v(), Some(&ElementId::Integer(2)));
        assert_eq!(edge.label(), Some("knows"));
        assert_eq!(edge.uri(), "http://localhost:8182/graphs/graph/edges/7");
        assert_eq!(edge.map().clone().into_value(), json!({"since": 2020}));
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response = Response::from_json(json!({"queryTime": 0.5}), ROOT).unwrap();
        assert!(response.is_empty());
        assert!(matches!(response.one(), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_edge_without_label_rejected() {
        let body = json!({"results": {"_id": 3, "_type": "edge", "_outV": 1, "_inV": 2}});
        assert!(Response::from_json(body, ROOT).is_err());
    }

    #[test]
    fn test_unsupported_id_reported() {
        for id in [json!(-4), json!(1.5), json!(true)] {
            let body = json!({"results": {"_id": id, "_type": "vertex"}});
            match Response::from_json(body, ROOT) {
                Err(Error::Serialization(message)) => {
                    assert!(message.starts_with("unsupported _id value"), "{}", message)
                }
                other => panic!("expected serialization error, got {:?}", other),
            }
        }

        let body = json!({"results": {"_type": "vertex"}});
        match Response::from_json(body, ROOT) {
            Err(Error::Serialization(message)) => assert_eq!(message, "element is missing _id"),
            other => panic!("expected serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_to_json_restores_reserved_keys() {
        let edge = ElementResult::edge(3u64, "uri", 1u64, "knows", 2u64, PropertyData::new().with("w", 0.5));
        assert_eq!(
            edge.to_json(),
            json!({"_id": 3, "_type": "edge", "_outV": 1, "_inV": 2, "_label": "knows", "w": 0.5})
        );
    }
}
