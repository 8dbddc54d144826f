//! Domain models for the file bridge.

pub mod request;

pub use request::{QueryParameters, RequestDescriptor};
