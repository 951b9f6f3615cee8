use super::error::WriterResult;
use super::value::{AttributeKey, VertexValue};
use super::writer::VertexWriter;

/// Cursor over a [`VertexWriter`]: writes go to the current vertex.
///
/// ```
/// use lumen_engine::coords::{ColorRgba, Vec2};
/// use lumen_engine::vertex::{AttributeDescriptor, VertexSchema, VertexWriter};
///
/// let schema = VertexSchema::new(&[
///     AttributeDescriptor::new("position", "float2"),
///     AttributeDescriptor::new("color", "ubyte4").normalized(),
/// ])?;
/// let mut buf = schema.allocate(2);
/// let mut w = VertexWriter::new(&schema, &mut buf).fluent();
/// w.set("position", Vec2::new(0.0, 0.0))?.set("color", ColorRgba::white())?.advance();
/// w.set("position", Vec2::new(1.0, 0.0))?.set("color", ColorRgba::black())?.advance();
/// assert_eq!(w.vertex_index(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FluentVertexWriter<'a> {
    writer: VertexWriter<'a>,
    vertex: usize,
}

impl<'a> FluentVertexWriter<'a> {
    #[inline]
    pub fn new(writer: VertexWriter<'a>) -> Self {
        Self { writer, vertex: 0 }
    }

    #[inline]
    pub fn vertex_index(&self) -> usize {
        self.vertex
    }

    /// Writes `value` into `key` of the current vertex.
    #[inline]
    pub fn set<'k, 'v>(
        &mut self,
        key: impl Into<AttributeKey<'k>>,
        value: impl Into<VertexValue<'v>>,
    ) -> WriterResult<&mut Self> {
        self.writer.write_attribute(self.vertex, key, value)?;
        Ok(self)
    }

    /// Moves to the next vertex.
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        self.vertex += 1;
        self
    }

    #[inline]
    pub fn seek(&mut self, vertex: usize) -> &mut Self {
        self.vertex = vertex;
        self
    }

    #[inline]
    pub fn writer(&self) -> &VertexWriter<'a> {
        &self.writer
    }

    #[inline]
    pub fn into_inner(self) -> VertexWriter<'a> {
        self.writer
    }
}
