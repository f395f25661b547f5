pub mod index;
pub mod rest;

pub use index::RestIndex;
pub use rest::RestClient;
