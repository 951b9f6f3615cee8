use super::error::{WriterError, WriterResult};
use super::fluent::FluentVertexWriter;
use super::schema::{Attribute, VertexSchema};
use super::types::ScalarKind;
use super::value::{AttributeKey, Components, VertexValue};

/// Random-access serializer of attribute values into a caller-owned byte buffer.
///
/// Scalars are stored in host byte order, which is what `wgpu::Queue::write_buffer`
/// uploads verbatim (little-endian on every supported target).
///
/// Quantization policy:
/// - `float`: stored as-is
/// - normalized integers: clamped to `[0, 1]` (unsigned) or `[-1, 1]` (signed),
///   scaled by the kind's max, rounded to nearest
/// - plain integers: truncated toward zero and saturated to the kind's range; NaN stores 0
///
/// No write panics or allocates; a destination past the end of the buffer
/// returns [`WriterError::OutOfBounds`] and leaves the buffer untouched.
pub struct VertexWriter<'a> {
    schema: &'a VertexSchema,
    buffer: &'a mut [u8],
}

impl<'a> VertexWriter<'a> {
    #[inline]
    pub fn new(schema: &'a VertexSchema, buffer: &'a mut [u8]) -> Self {
        Self { schema, buffer }
    }

    #[inline]
    pub fn schema(&self) -> &'a VertexSchema {
        self.schema
    }

    #[inline]
    pub fn buffer(&self) -> &[u8] {
        self.buffer
    }

    /// Wraps the writer in a cursor that tracks the current vertex.
    #[inline]
    pub fn fluent(self) -> FluentVertexWriter<'a> {
        FluentVertexWriter::new(self)
    }

    /// Writes one attribute of one vertex.
    pub fn write_attribute<'k, 'v>(
        &mut self,
        vertex: usize,
        key: impl Into<AttributeKey<'k>>,
        value: impl Into<VertexValue<'v>>,
    ) -> WriterResult<()> {
        let attr = resolve(self.schema, key.into())?;
        let value = value.into();

        if value.arity() != attr.size {
            return Err(WriterError::ArityMismatch {
                attribute: attr.name.clone(),
                expected: attr.size,
                got: value.arity(),
            });
        }

        let range = byte_range(attr, vertex, self.buffer.len())?;
        let dst = &mut self.buffer[range];

        let mut scratch = [0.0; 4];
        let width = attr.kind.byte_width();
        for (v, chunk) in value
            .components(&mut scratch)
            .iter()
            .zip(dst.chunks_exact_mut(width))
        {
            encode(attr.kind, attr.normalized, *v, chunk);
        }
        Ok(())
    }

    /// Reads one attribute of one vertex back, undoing normalization.
    ///
    /// Normalized values come back quantized: within `1 / scale` of what was written.
    pub fn read_attribute<'k>(
        &self,
        vertex: usize,
        key: impl Into<AttributeKey<'k>>,
    ) -> WriterResult<Components> {
        let attr = resolve(self.schema, key.into())?;
        let range = byte_range(attr, vertex, self.buffer.len())?;

        let mut values = [0.0; 4];
        for (out, chunk) in values
            .iter_mut()
            .zip(self.buffer[range].chunks_exact(attr.kind.byte_width()))
        {
            *out = decode(attr.kind, attr.normalized, chunk);
        }
        Ok(Components::new(values, attr.size))
    }
}

fn resolve<'s>(schema: &'s VertexSchema, key: AttributeKey<'_>) -> WriterResult<&'s Attribute> {
    schema
        .attribute(key)
        .ok_or_else(|| WriterError::UnknownAttribute(key.to_string()))
}

fn byte_range(
    attr: &Attribute,
    vertex: usize,
    capacity: usize,
) -> WriterResult<core::ops::Range<usize>> {
    let start = attr.byte_offset(vertex);
    let end = start.and_then(|s| s.checked_add(attr.byte_extent()));

    match (start, end) {
        (Some(start), Some(end)) if end <= capacity => Ok(start..end),
        _ => Err(WriterError::OutOfBounds {
            attribute: attr.name.clone(),
            vertex,
            end: end.unwrap_or(usize::MAX),
            capacity,
        }),
    }
}

#[inline]
fn quantize(kind: ScalarKind, normalized: bool, v: f32) -> f32 {
    match kind.norm_scale() {
        Some(scale) if normalized => {
            let lo = if kind.is_signed() { -1.0 } else { 0.0 };
            (v.clamp(lo, 1.0) * scale).round()
        }
        _ => v,
    }
}

#[inline]
fn encode(kind: ScalarKind, normalized: bool, v: f32, dst: &mut [u8]) {
    let v = quantize(kind, normalized, v);
    // `as` truncates toward zero and saturates (NaN -> 0).
    match kind {
        ScalarKind::Byte => dst.copy_from_slice(bytemuck::bytes_of(&(v as i8))),
        ScalarKind::UByte => dst.copy_from_slice(bytemuck::bytes_of(&(v as u8))),
        ScalarKind::Short => dst.copy_from_slice(bytemuck::bytes_of(&(v as i16))),
        ScalarKind::UShort => dst.copy_from_slice(bytemuck::bytes_of(&(v as u16))),
        ScalarKind::Float => dst.copy_from_slice(bytemuck::bytes_of(&v)),
    }
}

#[inline]
fn decode(kind: ScalarKind, normalized: bool, src: &[u8]) -> f32 {
    let raw = match kind {
        ScalarKind::Byte => bytemuck::pod_read_unaligned::<i8>(src) as f32,
        ScalarKind::UByte => bytemuck::pod_read_unaligned::<u8>(src) as f32,
        ScalarKind::Short => bytemuck::pod_read_unaligned::<i16>(src) as f32,
        ScalarKind::UShort => bytemuck::pod_read_unaligned::<u16>(src) as f32,
        ScalarKind::Float => return bytemuck::pod_read_unaligned::<f32>(src),
    };
    match kind.norm_scale() {
        Some(scale) if normalized => (raw / scale).max(-1.0),
        _ => raw,
    }
}
