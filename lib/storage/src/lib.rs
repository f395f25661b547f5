pub mod client;
pub mod graph;
pub mod index;

pub use client::MemoryClient;
pub use graph::{user_properties, EdgeId, MemoryGraph, StoredEdge, StoredVertex, VertexId};
pub use index::MemoryIndex;
