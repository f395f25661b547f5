// Integration tests for graphbind against the in-memory backend
use graphbind_core::{
    Edge, EdgeProxy, ElementClass, ElementId, Error, Result, SharedClient, Vertex, VertexProxy,
};
use graphbind_storage::MemoryClient;
use graphbind_core::Config;
use serde_json::json;
use std::sync::Arc;

struct Graph {
    memory: Arc<MemoryClient>,
    vertices: VertexProxy,
    edges: EdgeProxy,
}

fn graph() -> Graph {
    let memory = Arc::new(MemoryClient::new(Config::default()));
    let client: SharedClient = memory.clone();
    let vertices = VertexProxy::new(ElementClass::vertex(), client.clone())
        .unwrap()
        .with_index(Arc::new(memory.index("vertex")));
    let edges = EdgeProxy::new(ElementClass::edge(), client).unwrap();
    Graph {
        memory,
        vertices,
        edges,
    }
}

fn person(g: &Graph, name: &str) -> Vertex {
    g.vertices.create(None, &[("name", json!(name))]).unwrap()
}

#[test]
fn test_james_knows_julie() {
    let g = graph();
    let james = person(&g, "James");
    let julie = person(&g, "Julie");
    g.edges
        .create(&james, "knows", &julie, None, &[("since", json!(2020))])
        .unwrap();

    let edges: Vec<Edge> = james
        .out_e(Some("knows"))
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(edges.len(), 1);

    let knows = &edges[0];
    assert_eq!(knows.in_v().unwrap(), Some(julie.clone()));
    assert_eq!(knows.out_v().unwrap(), Some(james.clone()));
    assert_eq!(knows.map().clone().into_value(), json!({"since": 2020}));

    let friends: Vec<Vertex> = james
        .out_v(Some("knows"))
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(friends, vec![julie.clone()]);
    assert_eq!(julie.in_e(None).unwrap().len(), 1);
    assert_eq!(julie.out_e(None).unwrap().len(), 0);
}

#[test]
fn test_get_or_create_is_idempotent() {
    let g = graph();
    let first = g
        .vertices
        .get_or_create("name", "James", None, &[("age", json!(34))])
        .unwrap();
    let second = g.vertices.get_or_create("name", "James", None, &[]).unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(second.attr("age").unwrap(), json!(34));
    assert_eq!(g.memory.graph().vertex_count(), 1);
}

#[test]
fn test_get_or_create_without_index_fails() {
    let g = graph();
    let client: SharedClient = g.memory.clone();
    let unindexed = VertexProxy::new(ElementClass::vertex(), client).unwrap();
    assert!(matches!(
        unindexed.get_or_create("name", "James", None, &[]),
        Err(Error::IndexNotAttached(_))
    ));
}

#[test]
fn test_missing_vertex_is_none() {
    let g = graph();
    assert!(g.vertices.get(42u64).unwrap().is_none());
    assert!(g.edges.get(42u64).unwrap().is_none());
}

#[test]
fn test_blank_label_makes_no_request() {
    let g = graph();
    let james = person(&g, "James");
    let julie = person(&g, "Julie");
    let before = g.memory.request_count();

    for label in ["", "   "] {
        let err = g.edges.create(&james, label, &julie, None, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
    assert_eq!(g.memory.request_count(), before);
}

#[test]
fn test_vertex_and_raw_id_give_same_payload() {
    let g = graph();
    let james = person(&g, "James");
    let julie = person(&g, "Julie");

    g.edges.create(&james, "knows", &julie, None, &[]).unwrap();
    let by_vertex = g.memory.last_payload();
    g.edges.create(1u64, "knows", 2u64, None, &[]).unwrap();
    let by_id = g.memory.last_payload();

    assert_eq!(by_vertex, by_id);
    assert_eq!(by_id, Some(json!({"_outV": 1, "_label": "knows", "_inV": 2})));
}

#[test]
fn test_attributes_and_save() {
    let g = graph();
    let mut james = person(&g, "James");

    james.set_attr("age", 34).unwrap();
    james.set_attr("city", "Dallas").unwrap();
    assert_eq!(james.attr("age").unwrap(), json!(34));
    assert_eq!(
        james.map().clone().into_value(),
        json!({"name": "James", "age": 34, "city": "Dallas"})
    );
    assert!(matches!(james.set_attr("_id", 7), Err(Error::ReadOnlyAttribute(_))));
    assert!(matches!(james.attr("height"), Err(Error::MissingProperty(_))));

    james.save().unwrap();
    let stored = g.vertices.get(james.id()).unwrap().unwrap();
    assert_eq!(stored, james);
    assert_eq!(stored["city"], json!("Dallas"));
}

#[test]
fn test_equality() {
    let g = graph();
    let james = person(&g, "James");
    let again = g.vertices.get(james.id()).unwrap().unwrap();
    assert_eq!(james, again);

    let mut changed = again.clone();
    changed.set_attr("age", 1).unwrap();
    assert_ne!(james, changed);

    let twin = person(&g, "James");
    assert_ne!(james, twin);
}

#[test]
fn test_update_remove_and_delete() {
    let g = graph();
    let james = person(&g, "James");
    let julie = person(&g, "Julie");
    let knows = g.edges.create(&james, "knows", &julie, None, &[]).unwrap();

    g.vertices.update(james.id(), None, &[("age", json!(34))]).unwrap();
    let fetched = g.vertices.get(james.id()).unwrap().unwrap();
    assert_eq!(fetched.map().clone().into_value(), json!({"age": 34}));

    g.edges.update(knows.id(), None, &[("weight", json!(0.5))]).unwrap();
    g.edges.remove_properties(knows.id()).unwrap();
    assert!(g.edges.get(knows.id()).unwrap().unwrap().is_empty());

    g.vertices.delete(james.id()).unwrap();
    assert!(g.vertices.get(james.id()).unwrap().is_none());
    assert!(g.edges.get(knows.id()).unwrap().is_none());
    assert!(g.vertices.delete(james.id()).unwrap_err().is_not_found());
}

#[test]
fn test_typed_models_decode_polymorphically() {
    let g = graph();
    let client: SharedClient = g.memory.clone();
    let people = VertexProxy::new(ElementClass::vertex_model("Person", "person"), client.clone()).unwrap();
    let knows = EdgeProxy::new(ElementClass::edge_model("Knows", "knows"), client).unwrap();

    let james = people.create(None, &[("name", json!("James"))]).unwrap();
    assert_eq!(james.class().name(), "Person");
    assert_eq!(james.attr("element_type").unwrap(), json!("person"));

    let plain = person(&g, "Julie");
    knows.create(&james, "knows", &plain, None, &[]).unwrap();

    let all: Vec<Vertex> = g.vertices.get_all().unwrap().collect::<Result<_>>().unwrap();
    let classes: Vec<&str> = all.iter().map(|v| v.class().name()).collect();
    assert_eq!(classes, vec!["Person", "Vertex"]);

    let edge = g.edges.get_all().unwrap().next().unwrap().unwrap();
    assert_eq!(edge.class().name(), "Knows");
    assert_eq!(edge.to_string(), "<Knows: http://localhost:8182/graphs/graph/edges/1>");
}

#[test]
fn test_pretty_id_and_string_ids() {
    let g = graph();
    let james = person(&g, "James");
    assert_eq!(james.pretty_id(), &ElementId::Integer(1));
    assert_eq!(james.attr("eid").unwrap(), json!(1));
    assert!(g.vertices.get("not-a-number").unwrap().is_none());
}
