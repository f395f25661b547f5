//! # graphbind
//!
//! Object mapping for graph databases reached over a REST API.
//!
//! Vertices and edges come back from the server as live objects: their
//! properties can be read and written like attributes, and a vertex can walk
//! to its neighbors without any query language.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! graphbind --port 8182 --graph graph
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use graphbind::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let config = Config::new("http://localhost:8182/graphs/graph");
//! let client: SharedClient = Arc::new(RestClient::new(config)?);
//!
//! let vertices = VertexProxy::new(ElementClass::vertex(), client.clone())?;
//! let edges = EdgeProxy::new(ElementClass::edge(), client.clone())?;
//!
//! let james = vertices.create(None, &[("name", json!("James"))])?;
//! let julie = vertices.create(None, &[("name", json!("Julie"))])?;
//! edges.create(&james, "knows", &julie, None, &[("since", json!(2020))])?;
//!
//! for friend in james.out_v(Some("knows"))? {
//!     println!("{}", friend?.attr("name")?);
//! }
//! # Ok::<(), graphbind::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `graphbind-core` - elements, proxies, registry, the `Client` trait
//! - `graphbind-client` - blocking HTTP client for Rexster-style servers
//! - `graphbind-storage` - in-memory graph and client, handy in tests
//! - `graphbind-api` - reference REST server over the in-memory graph

// Re-export core types
pub use graphbind_core::{
    build_data, coerce_id, coerce_vertex, coerce_vertices, initialize_element, AnyElement,
    BaseType, Client, Config, Direction, Edge, EdgeProxy, Element, ElementClass, ElementId,
    ElementResult, Elements, Error, Index, PropertyData, Registry, Response, Result,
    SharedClient, Vertex, VertexProxy, VertexRef,
};

// Re-export backends
pub use graphbind_client::{RestClient, RestIndex};
pub use graphbind_storage::{MemoryClient, MemoryGraph, MemoryIndex};

// Re-export API
pub use graphbind_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Client, Config, Edge, EdgeProxy, Element, ElementClass, ElementId, Error, Index,
        MemoryClient, PropertyData, Result, RestClient, SharedClient, Vertex, VertexProxy,
    };
}
