use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a vertex or edge as reported by the server.
///
/// Most backends hand out integer IDs, but some use strings (record IDs,
/// linked-data URIs). Strings that look like integers are normalized to
/// [`ElementId::Integer`] so `"5"` and `5` address the same element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    Integer(u64),
    String(String),
}

impl ElementId {
    /// Coerce a raw textual identifier.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(i) => ElementId::Integer(i),
            Err(_) => ElementId::String(raw.to_string()),
        }
    }

    /// Read an identifier out of a JSON payload field.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(ElementId::Integer),
            Value::String(s) => Some(Self::parse(s)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ElementId::Integer(i) => Value::from(*i),
            ElementId::String(s) => Value::String(s.clone()),
        }
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ElementId::Integer(i) => Some(*i),
            ElementId::String(_) => None,
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementId::Integer(i) => write!(f, "{}", i),
            ElementId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ElementId {
    fn from(i: u64) -> Self {
        ElementId::Integer(i)
    }
}

impl From<u32> for ElementId {
    fn from(i: u32) -> Self {
        ElementId::Integer(u64::from(i))
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        ElementId::parse(s)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        ElementId::parse(&s)
    }
}

impl From<&ElementId> for ElementId {
    fn from(id: &ElementId) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(ElementId::parse("42"), ElementId::Integer(42));
        assert_eq!(ElementId::parse(" 7 "), ElementId::Integer(7));
    }

    #[test]
    fn test_parse_keeps_non_numeric() {
        let uri = "http://example.org/people/james";
        assert_eq!(ElementId::parse(uri), ElementId::String(uri.to_string()));
        assert_eq!(ElementId::parse("#9:1"), ElementId::String("#9:1".to_string()));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(ElementId::from_json(&json!(3)), Some(ElementId::Integer(3)));
        assert_eq!(ElementId::from_json(&json!("3")), Some(ElementId::Integer(3)));
        assert_eq!(ElementId::from_json(&json!(null)), None);
        assert_eq!(ElementId::from_json(&json!(-1)), None);
    }
}
