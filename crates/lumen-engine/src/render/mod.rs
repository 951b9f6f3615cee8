//! GPU-facing consumers of CPU vertex data.
//!
//! The engine does not own devices or pipelines. This module only describes how a
//! buffer produced by [`vertex::VertexWriter`](crate::vertex::VertexWriter) is bound.

mod layout;

pub use layout::{
    GpuVertexBinding, LayoutError, LayoutResult, STRIDE_ALIGNMENT, vertex_format,
};
