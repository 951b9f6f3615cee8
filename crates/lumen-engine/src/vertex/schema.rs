use std::collections::HashMap;

use super::error::{SchemaError, SchemaResult};
use super::types::{AttributeType, ScalarKind};
use super::value::AttributeKey;

/// Declarative attribute input, as written at primitive-construction sites.
///
/// ```
/// use lumen_engine::vertex::AttributeDescriptor;
///
/// let color = AttributeDescriptor::new("color", "ubyte4").normalized();
/// let uv = AttributeDescriptor::new("uv", "float2").with_offset(64).with_stride(8);
/// # let _ = (color, uv);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    /// Type string, e.g. `"float3"` or `"ubyte4"`.
    pub ty: String,
    pub normalized: bool,
    /// Explicit byte offset. `None` = next tightly packed offset.
    pub offset: Option<usize>,
    /// Explicit stride. `None` = the schema's total vertex size.
    pub stride: Option<usize>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            normalized: false,
            offset: None,
            stride: None,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    #[inline]
    fn is_explicit(&self) -> bool {
        self.offset.is_some() || self.stride.is_some()
    }
}

/// Resolved attribute with a concrete byte location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub kind: ScalarKind,
    /// Component count. Also the element count handed to the GPU attribute pointer.
    pub size: usize,
    pub normalized: bool,
    pub offset: usize,
    pub stride: usize,
    /// Declaration index; doubles as the shader location.
    pub location: usize,
}

impl Attribute {
    #[inline]
    pub fn ty(&self) -> AttributeType {
        AttributeType {
            kind: self.kind,
            components: self.size as u8,
        }
    }

    /// Bytes taken by one vertex worth of this attribute.
    #[inline]
    pub fn byte_extent(&self) -> usize {
        self.size * self.kind.byte_width()
    }

    /// First byte of `vertex`'s value, or `None` if it is not addressable.
    #[inline]
    pub fn byte_offset(&self, vertex: usize) -> Option<usize> {
        vertex
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(self.offset))
    }
}

/// Immutable byte layout of one vertex.
///
/// Built once per primitive type and shared by writers and the GPU binding layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexSchema {
    attributes: Vec<Attribute>,
    total_size: usize,
    by_name: HashMap<String, usize>,
}

impl VertexSchema {
    /// Same as [`parse_vertex_schema`].
    pub fn new(descriptors: &[AttributeDescriptor]) -> SchemaResult<Self> {
        parse_vertex_schema(descriptors)
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Size of one interleaved vertex record (a.k.a. vertex size).
    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Looks up an attribute by name or location.
    pub fn attribute<'k>(&self, key: impl Into<AttributeKey<'k>>) -> Option<&Attribute> {
        match key.into() {
            AttributeKey::Name(name) => self.by_name.get(name).map(|&i| &self.attributes[i]),
            AttributeKey::Location(i) => self.attributes.get(i),
        }
    }

    /// Resolves a name to its location once, so hot loops can write by index.
    #[inline]
    pub fn location_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Exact number of bytes touched when writing `vertex_count` vertices.
    ///
    /// Unlike `total_size * vertex_count`, this is correct for
    /// structure-of-arrays layouts whose arrays start past the first record.
    /// Saturates at `usize::MAX` when the span is not addressable.
    pub fn required_bytes(&self, vertex_count: usize) -> usize {
        if vertex_count == 0 {
            return 0;
        }
        self.attributes
            .iter()
            .map(|a| {
                a.byte_offset(vertex_count - 1)
                    .and_then(|start| start.checked_add(a.byte_extent()))
                    .unwrap_or(usize::MAX)
            })
            .max()
            .unwrap_or(0)
    }

    /// Zeroed buffer large enough for `vertex_count` vertices.
    pub fn allocate(&self, vertex_count: usize) -> Vec<u8> {
        vec![0; self.required_bytes(vertex_count)]
    }
}

/// Resolves descriptors into a [`VertexSchema`].
///
/// Layout rules:
/// - attributes without an explicit offset are packed back to back in declaration order
///   (the running offset advances past every attribute, explicit or not)
/// - `total_size` is the packed sum, raised to cover any explicit `offset + extent`
///   or explicit stride
/// - attributes without an explicit stride use `total_size`
///
/// Validation covers what can be checked without a vertex count: type strings,
/// names, addressable offsets, `extent <= stride`, and overlap between any two
/// attributes within vertex 0.
pub fn parse_vertex_schema(descriptors: &[AttributeDescriptor]) -> SchemaResult<VertexSchema> {
    let mut by_name = HashMap::with_capacity(descriptors.len());
    let mut resolved = Vec::with_capacity(descriptors.len());

    let mut packed = 0usize;
    let mut floor = 0usize;

    for (location, desc) in descriptors.iter().enumerate() {
        if desc.name.is_empty() {
            return Err(SchemaError::EmptyName(location));
        }
        let ty = desc
            .ty
            .parse::<AttributeType>()
            .map_err(|e| e.for_attribute(&desc.name))?;
        if by_name.insert(desc.name.clone(), location).is_some() {
            return Err(SchemaError::DuplicateAttribute(desc.name.clone()));
        }

        let extent = ty.byte_extent();
        let offset = match desc.offset {
            Some(offset) => {
                let end = offset
                    .checked_add(extent)
                    .ok_or_else(|| SchemaError::OffsetOverflow {
                        attribute: desc.name.clone(),
                        offset,
                    })?;
                floor = floor.max(end);
                offset
            }
            None => packed,
        };
        packed += extent;
        if let Some(stride) = desc.stride {
            floor = floor.max(stride);
        }

        resolved.push((desc, ty, offset));
    }

    let total_size = packed.max(floor);

    let explicit = descriptors.iter().filter(|d| d.is_explicit()).count();
    if explicit > 0 && explicit < descriptors.len() {
        log::warn!(
            "vertex schema mixes {} explicit and {} auto-packed attributes; total size {} bytes",
            explicit,
            descriptors.len() - explicit,
            total_size
        );
    }

    let attributes: Vec<Attribute> = resolved
        .into_iter()
        .enumerate()
        .map(|(location, (desc, ty, offset))| Attribute {
            name: desc.name.clone(),
            kind: ty.kind,
            size: ty.components as usize,
            normalized: desc.normalized,
            offset,
            stride: desc.stride.unwrap_or(total_size),
            location,
        })
        .collect();

    validate_layout(&attributes)?;

    log::debug!(
        "vertex schema: {} attributes, {} bytes per vertex",
        attributes.len(),
        total_size
    );

    Ok(VertexSchema {
        attributes,
        total_size,
        by_name,
    })
}

fn validate_layout(attributes: &[Attribute]) -> SchemaResult<()> {
    for a in attributes {
        if a.byte_extent() > a.stride {
            return Err(SchemaError::StrideTooSmall {
                attribute: a.name.clone(),
                extent: a.byte_extent(),
                stride: a.stride,
            });
        }
    }

    // Vertex 0 of every attribute; ends were range-checked while resolving.
    for (i, a) in attributes.iter().enumerate() {
        for b in &attributes[i + 1..] {
            let a_end = a.offset + a.byte_extent();
            let b_end = b.offset + b.byte_extent();
            if a.offset < b_end && b.offset < a_end {
                return Err(SchemaError::Overlap {
                    first: a.name.clone(),
                    second: b.name.clone(),
                    at: a.offset.max(b.offset),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str, ty: &str) -> AttributeDescriptor {
        AttributeDescriptor::new(name, ty)
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn packs_in_declaration_order() {
        let schema = parse_vertex_schema(&[
            desc("position", "float2"),
            desc("color", "ubyte3").normalized(),
        ])
        .unwrap();

        let offsets: Vec<usize> = schema.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8]);
        assert_eq!(schema.total_size(), 11);
        assert!(schema.attributes().iter().all(|a| a.stride == 11));
    }

    #[test]
    fn size_is_component_count() {
        let schema = parse_vertex_schema(&[desc("normal", "short3")]).unwrap();
        let a = &schema.attributes()[0];
        assert_eq!(a.size, 3);
        assert_eq!(a.kind, ScalarKind::Short);
        assert_eq!(a.byte_extent(), 6);
    }

    #[test]
    fn locations_follow_declaration_order() {
        let schema = parse_vertex_schema(&[
            desc("a", "float"),
            desc("b", "float"),
            desc("c", "float"),
        ])
        .unwrap();
        assert_eq!(schema.location_of("c"), Some(2));
        assert_eq!(schema.attribute("b").map(|a| a.location), Some(1));
        assert_eq!(schema.attribute(0usize).map(|a| a.name.as_str()), Some("a"));
        assert!(schema.attribute("missing").is_none());
        assert!(schema.attribute(3usize).is_none());
    }

    #[test]
    fn empty_schema_has_zero_size() {
        let schema = parse_vertex_schema(&[]).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.total_size(), 0);
        assert_eq!(schema.required_bytes(10), 0);
    }

    // ── explicit layout ───────────────────────────────────────────────────

    #[test]
    fn explicit_offsets_raise_total_size() {
        let schema = parse_vertex_schema(&[
            desc("a", "float").with_offset(0).with_stride(4),
            desc("b", "float2").with_offset(16).with_stride(8),
        ])
        .unwrap();
        assert_eq!(schema.total_size(), 24);
        assert_eq!(schema.attributes()[0].stride, 4);
        assert_eq!(schema.attributes()[1].stride, 8);
        assert_eq!(schema.attributes()[1].offset, 16);
    }

    #[test]
    fn explicit_stride_larger_than_packed() {
        let schema = parse_vertex_schema(&[
            desc("position", "float3").with_stride(32),
            desc("uv", "float2").with_stride(32),
        ])
        .unwrap();
        assert_eq!(schema.total_size(), 32);
        assert_eq!(schema.attributes()[1].offset, 12);
    }

    #[test]
    fn required_bytes_covers_struct_of_arrays() {
        let schema = parse_vertex_schema(&[
            desc("a", "float").with_offset(0).with_stride(4),
            desc("b", "float2").with_offset(16).with_stride(8),
        ])
        .unwrap();
        // a: 0 + 4*3 + 4 = 16, b: 16 + 8*3 + 8 = 48
        assert_eq!(schema.required_bytes(4), 48);
        assert_eq!(schema.allocate(4).len(), 48);
        assert_eq!(schema.required_bytes(0), 0);
    }

    #[test]
    fn required_bytes_interleaved_is_total_times_count() {
        let schema = parse_vertex_schema(&[desc("p", "float3"), desc("c", "ubyte4")]).unwrap();
        assert_eq!(schema.required_bytes(5), schema.total_size() * 5);
    }

    #[test]
    fn mixed_auto_and_explicit_resolve() {
        let schema = parse_vertex_schema(&[
            desc("a", "float2"),
            desc("b", "float").with_offset(8),
            desc("c", "ubyte4").normalized(),
        ])
        .unwrap();
        let offsets: Vec<usize> = schema.attributes().iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8, 12]);
        assert_eq!(schema.total_size(), 16);
        assert!(schema.attributes().iter().all(|a| a.stride == 16));

        // Explicit stride on the first attribute widens the record for the auto one.
        let schema = parse_vertex_schema(&[
            desc("p", "float3").with_stride(32),
            desc("uv", "float2"),
        ])
        .unwrap();
        let uv = schema.attribute("uv").unwrap();
        assert_eq!((uv.offset, uv.stride), (12, 32));
        assert_eq!(schema.total_size(), 32);
        assert_eq!(schema.required_bytes(2), 32 + 12 + 8);
    }

    #[test]
    fn required_bytes_saturates() {
        let schema = parse_vertex_schema(&[desc("p", "float3")]).unwrap();
        assert_eq!(schema.required_bytes(usize::MAX), usize::MAX);
        assert_eq!(schema.attributes()[0].byte_offset(usize::MAX), None);
        assert_eq!(schema.attributes()[0].byte_offset(3), Some(36));
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn invalid_type_names_attribute() {
        let err = parse_vertex_schema(&[desc("position", "double3")]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidType {
                attribute: "position".into(),
                ty: "double3".into(),
            }
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = parse_vertex_schema(&[desc("p", "float2"), desc("p", "float3")]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateAttribute("p".into()));
    }

    #[test]
    fn empty_name_rejected() {
        let err = parse_vertex_schema(&[desc("p", "float2"), desc("", "float")]).unwrap_err();
        assert_eq!(err, SchemaError::EmptyName(1));
    }

    #[test]
    fn stride_smaller_than_extent_rejected() {
        let err = parse_vertex_schema(&[desc("p", "float3").with_stride(8)]).unwrap_err();
        assert!(matches!(err, SchemaError::StrideTooSmall { extent: 12, stride: 8, .. }));
    }

    #[test]
    fn overlapping_explicit_offsets_rejected() {
        let err = parse_vertex_schema(&[
            desc("p", "float3").with_offset(0).with_stride(20),
            desc("uv", "float2").with_offset(8).with_stride(20),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::Overlap { at: 8, .. }));
    }

    #[test]
    fn mixed_auto_and_explicit_overlap_rejected() {
        // `b` is auto-packed at 4, where `a` was pinned.
        let err = parse_vertex_schema(&[
            desc("a", "float").with_offset(4),
            desc("b", "float2"),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::Overlap { .. }));
    }

    #[test]
    fn distinct_arrays_with_same_stride_do_not_conflict() {
        let schema = parse_vertex_schema(&[
            desc("a", "float").with_offset(0).with_stride(4),
            desc("b", "float").with_offset(400).with_stride(4),
        ])
        .unwrap();
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn straddling_record_boundary_overlap_rejected() {
        // `a` covers bytes 6..10 of vertex 0 and runs into `b` at 8.
        let err = parse_vertex_schema(&[
            desc("a", "ubyte4").with_offset(6).with_stride(8),
            desc("b", "ubyte4").with_offset(8).with_stride(8),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::Overlap {
                first: "a".into(),
                second: "b".into(),
                at: 8,
            }
        );
    }

    #[test]
    fn overlap_across_strides_rejected() {
        let err = parse_vertex_schema(&[
            desc("p", "float3").with_offset(0).with_stride(12),
            desc("q", "float").with_offset(4).with_stride(16),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::Overlap { at: 4, .. }));
    }

    #[test]
    fn unaddressable_offset_rejected() {
        let err = parse_vertex_schema(&[desc("p", "float").with_offset(usize::MAX)]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::OffsetOverflow {
                attribute: "p".into(),
                offset: usize::MAX,
            }
        );
    }
}
