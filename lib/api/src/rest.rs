use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use graphbind_core::{BaseType, Direction, ElementId, Error, PropertyData, Result};
use graphbind_storage::{user_properties, MemoryGraph, StoredEdge, StoredVertex};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

#[derive(Deserialize)]
struct AdjacencyQuery {
    #[serde(rename = "_label")]
    label: Option<String>,
}

#[derive(Deserialize)]
struct IndexQuery {
    key: String,
    value: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(graph: Arc<MemoryGraph>, port: u16) -> std::io::Result<()> {
        let (server, addrs) = Self::bind(graph, ("0.0.0.0", port))?;
        for addr in &addrs {
            tracing::info!("REST API listening on http://{}", addr);
        }
        server.await
    }

    /// Bind without running, so callers can learn the bound addresses
    /// (e.g. when asking for port 0).
    pub fn bind(
        graph: Arc<MemoryGraph>,
        addr: impl ToSocketAddrs,
    ) -> std::io::Result<(Server, Vec<SocketAddr>)> {
        let data = web::Data::from(graph);
        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(data.clone())
                .configure(routes)
        })
        .bind(addr)?;

        let addrs = server.addrs();
        Ok((server.run(), addrs))
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/graphs/{graph}/vertices", web::post().to(create_vertex))
        .route("/graphs/{graph}/vertices", web::get().to(list_vertices))
        .route("/graphs/{graph}/vertices/{id}", web::get().to(get_vertex))
        .route("/graphs/{graph}/vertices/{id}", web::put().to(update_vertex))
        .route("/graphs/{graph}/vertices/{id}", web::delete().to(delete_vertex))
        .route(
            "/graphs/{graph}/vertices/{id}/properties",
            web::delete().to(remove_vertex_properties),
        )
        .route("/graphs/{graph}/vertices/{id}/{step}", web::get().to(adjacent))
        .route("/graphs/{graph}/edges", web::post().to(create_edge))
        .route("/graphs/{graph}/edges", web::get().to(list_edges))
        .route("/graphs/{graph}/edges/{id}", web::get().to(get_edge))
        .route("/graphs/{graph}/edges/{id}", web::put().to(update_edge))
        .route("/graphs/{graph}/edges/{id}", web::delete().to(delete_edge))
        .route(
            "/graphs/{graph}/edges/{id}/properties",
            web::delete().to(remove_edge_properties),
        )
        .route("/graphs/{graph}/indices/{index}", web::get().to(index_lookup));
}

fn reply(result: Result<Value>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            let message = err.to_string();
            tracing::warn!("request rejected: {}", message);
            let mut builder = match err {
                Error::NotFound(_) => HttpResponse::NotFound(),
                Error::InvalidArgument(_) | Error::Serialization(_) => HttpResponse::BadRequest(),
                _ => HttpResponse::InternalServerError(),
            };
            builder.json(json!({ "message": message }))
        }
    }
}

fn check_graph(graph: &MemoryGraph, name: &str) -> Result<()> {
    if graph.name() == name {
        Ok(())
    } else {
        Err(Error::NotFound(format!("graph {}", name)))
    }
}

fn parse_id(raw: &str, kind: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| Error::NotFound(format!("{} {}", kind, raw)))
}

fn single(value: Value) -> Value {
    json!({ "results": value })
}

fn listing(values: Vec<Value>) -> Value {
    let total = values.len();
    json!({ "results": values, "totalSize": total })
}

fn vertex_listing(vertices: &[StoredVertex]) -> Value {
    listing(vertices.iter().map(StoredVertex::to_json).collect())
}

fn edge_listing(edges: &[StoredEdge]) -> Value {
    listing(edges.iter().map(StoredEdge::to_json).collect())
}

fn body_properties(body: Value) -> Result<PropertyData> {
    Ok(user_properties(&PropertyData::from_value(body)?))
}

fn endpoint(body: &Value, key: &str) -> Result<u64> {
    body.get(key)
        .and_then(ElementId::from_json)
        .and_then(|id| id.as_u64())
        .ok_or_else(|| Error::InvalidArgument(format!("{} must be a vertex id", key)))
}

async fn create_vertex(
    graph: web::Data<MemoryGraph>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &path)?;
        let vertex = graph.add_vertex(body_properties(body.into_inner())?);
        tracing::debug!("created vertex {}", vertex.id);
        Ok(single(vertex.to_json()))
    })()))
}

async fn list_vertices(
    graph: web::Data<MemoryGraph>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(reply(
        check_graph(&graph, &path).map(|_| vertex_listing(&graph.vertices())),
    ))
}

async fn get_vertex(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        let vertex = graph
            .vertex(parse_id(&id, "vertex")?)
            .ok_or_else(|| Error::NotFound(format!("vertex {}", id)))?;
        Ok(single(vertex.to_json()))
    })()))
}

async fn update_vertex(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        let properties = body_properties(body.into_inner())?;
        let vertex = graph.replace_vertex_properties(parse_id(&id, "vertex")?, properties)?;
        Ok(single(vertex.to_json()))
    })()))
}

async fn delete_vertex(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        graph.remove_vertex(parse_id(&id, "vertex")?)?;
        tracing::debug!("deleted vertex {}", id);
        Ok(json!({}))
    })()))
}

async fn remove_vertex_properties(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        graph.clear_vertex_properties(parse_id(&id, "vertex")?)?;
        Ok(json!({}))
    })()))
}

async fn adjacent(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String, String)>,
    query: web::Query<AdjacencyQuery>,
) -> ActixResult<HttpResponse> {
    let (name, id, step) = path.into_inner();
    let label = query.into_inner().label;
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        let (direction, target): (Direction, BaseType) = Direction::from_step(&step)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown traversal step {}", step)))?;
        let vertex = parse_id(&id, "vertex")?;
        match target {
            BaseType::Edge => Ok(edge_listing(&graph.incident_edges(
                vertex,
                direction,
                label.as_deref(),
            )?)),
            BaseType::Vertex => Ok(vertex_listing(&graph.neighbors(
                vertex,
                direction,
                label.as_deref(),
            )?)),
        }
    })()))
}

async fn create_edge(
    graph: web::Data<MemoryGraph>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &path)?;
        let out_v = endpoint(&body, "_outV")?;
        let in_v = endpoint(&body, "_inV")?;
        let label = body
            .get("_label")
            .and_then(Value::as_str)
            .filter(|label| !label.trim().is_empty())
            .ok_or_else(|| Error::InvalidArgument("_label must be a non-empty string".to_string()))?
            .to_string();
        let edge = graph.add_edge(out_v, label, in_v, body_properties(body.clone())?)?;
        tracing::debug!("created edge {} ({} -> {})", edge.id, out_v, in_v);
        Ok(single(edge.to_json()))
    })()))
}

async fn list_edges(
    graph: web::Data<MemoryGraph>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    Ok(reply(
        check_graph(&graph, &path).map(|_| edge_listing(&graph.edges())),
    ))
}

async fn get_edge(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        let edge = graph
            .edge(parse_id(&id, "edge")?)
            .ok_or_else(|| Error::NotFound(format!("edge {}", id)))?;
        Ok(single(edge.to_json()))
    })()))
}

async fn update_edge(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        let properties = body_properties(body.into_inner())?;
        let edge = graph.replace_edge_properties(parse_id(&id, "edge")?, properties)?;
        Ok(single(edge.to_json()))
    })()))
}

async fn delete_edge(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        graph.remove_edge(parse_id(&id, "edge")?)?;
        Ok(json!({}))
    })()))
}

async fn remove_edge_properties(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, id) = path.into_inner();
    Ok(reply((|| -> Result<Value> {
        check_graph(&graph, &name)?;
        graph.clear_edge_properties(parse_id(&id, "edge")?)?;
        Ok(json!({}))
    })()))
}

/// Every vertex property is indexed, so any index name answers lookups.
/// `value` is read as JSON when it parses (`34`, `true`) and as a plain
/// string otherwise.
async fn index_lookup(
    graph: web::Data<MemoryGraph>,
    path: web::Path<(String, String)>,
    query: web::Query<IndexQuery>,
) -> ActixResult<HttpResponse> {
    let (name, _index) = path.into_inner();
    let IndexQuery { key, value } = query.into_inner();
    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
    Ok(reply(
        check_graph(&graph, &name).map(|_| vertex_listing(&graph.lookup(&key, &value))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn seeded() -> Arc<MemoryGraph> {
        let graph = Arc::new(MemoryGraph::new("graph"));
        let james = graph.add_vertex(PropertyData::new().with("name", "James")).id;
        let julie = graph.add_vertex(PropertyData::new().with("name", "Julie")).id;
        graph
            .add_edge(james, "knows", julie, PropertyData::new().with("since", 2020))
            .unwrap();
        graph
    }

    macro_rules! app {
        ($graph:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($graph.clone()))
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_get_vertex() {
        let graph = seeded();
        let app = app!(graph);

        let req = test::TestRequest::get().uri("/graphs/graph/vertices/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"results": {"_id": 1, "_type": "vertex", "name": "James"}}));
    }

    #[actix_web::test]
    async fn test_missing_vertex_is_404() {
        let graph = seeded();
        let app = app!(graph);

        for uri in ["/graphs/graph/vertices/99", "/graphs/graph/vertices/abc", "/graphs/other/vertices/1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 404, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_create_edge() {
        let graph = seeded();
        let app = app!(graph);

        let req = test::TestRequest::post()
            .uri("/graphs/graph/edges")
            .set_json(json!({"_outV": 2, "_label": "likes", "_inV": 1, "weight": 0.5}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"]["_label"], json!("likes"));
        assert_eq!(body["results"]["weight"], json!(0.5));
        assert_eq!(graph.edge_count(), 2);
    }

    #[actix_web::test]
    async fn test_create_edge_without_label_is_400() {
        let graph = seeded();
        let app = app!(graph);

        let req = test::TestRequest::post()
            .uri("/graphs/graph/edges")
            .set_json(json!({"_outV": 2, "_inV": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(graph.edge_count(), 1);
    }

    #[actix_web::test]
    async fn test_adjacency_with_label() {
        let graph = seeded();
        let app = app!(graph);

        let req = test::TestRequest::get()
            .uri("/graphs/graph/vertices/1/outE?_label=knows")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalSize"], json!(1));
        assert_eq!(body["results"][0]["since"], json!(2020));

        let req = test::TestRequest::get()
            .uri("/graphs/graph/vertices/2/in")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"][0]["name"], json!("James"));
    }

    #[actix_web::test]
    async fn test_index_lookup_parses_json_values() {
        let graph = seeded();
        graph.add_vertex(PropertyData::new().with("age", 34));
        let app = app!(graph);

        let req = test::TestRequest::get()
            .uri("/graphs/graph/indices/vertex?key=age&value=34")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalSize"], json!(1));

        let req = test::TestRequest::get()
            .uri("/graphs/graph/indices/vertex?key=name&value=Julie")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"][0]["_id"], json!(2));
    }

    #[actix_web::test]
    async fn test_update_replaces_properties() {
        let graph = seeded();
        let app = app!(graph);

        let req = test::TestRequest::put()
            .uri("/graphs/graph/vertices/1")
            .set_json(json!({"age": 34}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            graph.vertex(1).unwrap().properties.into_value(),
            json!({"age": 34})
        );
    }
}
