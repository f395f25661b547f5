//! # graphbind Core
//!
//! Object mapping for graph databases reached over a network client.
//!
//! This crate provides:
//!
//! - [`Vertex`] / [`Edge`] - elements backed by a decoded server result, with
//!   free-form property access and graph navigation
//! - [`VertexProxy`] / [`EdgeProxy`] - CRUD repositories over a [`Client`]
//! - [`PropertyData`] - the user-defined key/values of an element
//! - [`Registry`] / [`ElementClass`] - polymorphic decoding into typed models
//!
//! The network itself is behind the [`Client`] trait; see `graphbind-client`
//! for an HTTP implementation and `graphbind-storage` for an in-memory one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use graphbind_core::{ElementClass, EdgeProxy, VertexProxy};
//! use serde_json::json;
//!
//! let vertices = VertexProxy::new(ElementClass::vertex(), client.clone())?;
//! let edges = EdgeProxy::new(ElementClass::edge(), client.clone())?;
//!
//! let james = vertices.create(None, &[("name", json!("James"))])?;
//! let julie = vertices.create(None, &[("name", json!("Julie"))])?;
//! edges.create(&james, "knows", &julie, None, &[("since", json!(2020))])?;
//!
//! for edge in james.out_e(Some("knows"))? {
//!     let edge = edge?;
//!     println!("{} -> {:?}", edge, edge.in_v()?);
//! }
//! ```

pub mod client;
pub mod coerce;
pub mod config;
pub mod edge;
pub mod element;
pub mod error;
pub mod id;
pub mod index;
pub mod property;
pub mod proxy;
pub mod registry;
pub mod response;
pub mod vertex;

#[cfg(test)]
mod testing;

pub use client::{Client, Direction, SharedClient};
pub use coerce::{build_data, coerce_id, coerce_vertex, coerce_vertices, Fields, VertexRef};
pub use config::Config;
pub use edge::Edge;
pub use element::{initialize_element, AnyElement, Element, Elements, FromElement};
pub use error::{Error, Result};
pub use id::ElementId;
pub use index::Index;
pub use property::PropertyData;
pub use proxy::{EdgeProxy, VertexProxy};
pub use registry::{BaseType, ElementClass, Registry};
pub use response::{ElementResult, Response};
pub use vertex::Vertex;
