//! Vertex schema engine.
//!
//! - [`types`]: scalar kinds and `<kind><n>` attribute type strings
//! - [`VertexSchema`]: attribute descriptors resolved into a byte layout
//! - [`VertexWriter`] / [`FluentVertexWriter`]: typed values serialized at that layout
//!
//! Interleaved layouts come for free: omit every offset and stride and attributes are
//! packed back to back. Structure-of-arrays layouts pin each attribute with an explicit
//! offset (array base) and stride.

mod error;
mod fluent;
mod schema;
pub mod types;
mod value;
mod writer;

pub use error::{SchemaError, SchemaResult, WriterError, WriterResult};
pub use fluent::FluentVertexWriter;
pub use schema::{Attribute, AttributeDescriptor, VertexSchema, parse_vertex_schema};
pub use types::{AttributeType, ScalarKind};
pub use value::{AttributeKey, Components, VertexValue};
pub use writer::VertexWriter;
