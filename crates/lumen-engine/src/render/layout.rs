//! Translation of a [`VertexSchema`] into `wgpu` vertex buffer bindings.
//!
//! A schema addresses one byte buffer with per-attribute offset/stride (GL attribute
//! pointer style). `wgpu` instead wants one stride per bound buffer and attribute
//! offsets inside that stride, so attributes are grouped by `(stride, record window)`
//! and each group becomes a binding of the same buffer at `buffer_offset`.

use thiserror::Error;

use crate::vertex::{Attribute, AttributeType, ScalarKind, VertexSchema};

/// Required alignment of `array_stride`, in bytes.
pub const STRIDE_ALIGNMENT: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// GPUs have no 3-component 8/16-bit vertex formats.
    #[error("attribute `{attribute}` of type {ty} (normalized: {normalized}) has no GPU vertex format")]
    UnsupportedFormat {
        attribute: String,
        ty: AttributeType,
        normalized: bool,
    },

    #[error("stride {stride} of attribute `{attribute}` is not a multiple of {}", STRIDE_ALIGNMENT)]
    UnalignedStride { attribute: String, stride: usize },

    #[error("offset {offset} of attribute `{attribute}` is not aligned to {align} bytes")]
    UnalignedOffset {
        attribute: String,
        offset: usize,
        align: usize,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// One vertex buffer binding: a window into the schema's buffer plus its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuVertexBinding {
    /// Byte offset to bind the shared buffer at.
    pub buffer_offset: u64,
    pub array_stride: u64,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl GpuVertexBinding {
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// GPU format for an attribute; `None` for 3-component 8/16-bit types.
pub fn vertex_format(attr: &Attribute) -> Option<wgpu::VertexFormat> {
    use wgpu::VertexFormat as F;

    let format = match (attr.kind, attr.normalized, attr.size) {
        (ScalarKind::Float, _, 1) => F::Float32,
        (ScalarKind::Float, _, 2) => F::Float32x2,
        (ScalarKind::Float, _, 3) => F::Float32x3,
        (ScalarKind::Float, _, 4) => F::Float32x4,

        (ScalarKind::Byte, false, 1) => F::Sint8,
        (ScalarKind::Byte, false, 2) => F::Sint8x2,
        (ScalarKind::Byte, false, 4) => F::Sint8x4,
        (ScalarKind::Byte, true, 1) => F::Snorm8,
        (ScalarKind::Byte, true, 2) => F::Snorm8x2,
        (ScalarKind::Byte, true, 4) => F::Snorm8x4,

        (ScalarKind::UByte, false, 1) => F::Uint8,
        (ScalarKind::UByte, false, 2) => F::Uint8x2,
        (ScalarKind::UByte, false, 4) => F::Uint8x4,
        (ScalarKind::UByte, true, 1) => F::Unorm8,
        (ScalarKind::UByte, true, 2) => F::Unorm8x2,
        (ScalarKind::UByte, true, 4) => F::Unorm8x4,

        (ScalarKind::Short, false, 1) => F::Sint16,
        (ScalarKind::Short, false, 2) => F::Sint16x2,
        (ScalarKind::Short, false, 4) => F::Sint16x4,
        (ScalarKind::Short, true, 1) => F::Snorm16,
        (ScalarKind::Short, true, 2) => F::Snorm16x2,
        (ScalarKind::Short, true, 4) => F::Snorm16x4,

        (ScalarKind::UShort, false, 1) => F::Uint16,
        (ScalarKind::UShort, false, 2) => F::Uint16x2,
        (ScalarKind::UShort, false, 4) => F::Uint16x4,
        (ScalarKind::UShort, true, 1) => F::Unorm16,
        (ScalarKind::UShort, true, 2) => F::Unorm16x2,
        (ScalarKind::UShort, true, 4) => F::Unorm16x4,

        _ => return None,
    };
    Some(format)
}

impl VertexSchema {
    /// Groups attributes into `wgpu` buffer bindings, in order of first appearance.
    ///
    /// Shader locations are the attribute locations.
    pub fn gpu_bindings(&self) -> LayoutResult<Vec<GpuVertexBinding>> {
        let mut bindings: Vec<GpuVertexBinding> = Vec::new();

        for attr in self.attributes() {
            let format = vertex_format(attr).ok_or_else(|| LayoutError::UnsupportedFormat {
                attribute: attr.name.clone(),
                ty: attr.ty(),
                normalized: attr.normalized,
            })?;

            if attr.stride as u64 % STRIDE_ALIGNMENT != 0 {
                return Err(LayoutError::UnalignedStride {
                    attribute: attr.name.clone(),
                    stride: attr.stride,
                });
            }

            let align = attr.byte_extent().min(STRIDE_ALIGNMENT as usize);
            if attr.offset % align != 0 {
                return Err(LayoutError::UnalignedOffset {
                    attribute: attr.name.clone(),
                    offset: attr.offset,
                    align,
                });
            }

            let window = attr.offset / attr.stride;
            let buffer_offset = (window * attr.stride) as u64;
            let array_stride = attr.stride as u64;

            let gpu_attr = wgpu::VertexAttribute {
                format,
                offset: (attr.offset % attr.stride) as u64,
                shader_location: attr.location as u32,
            };

            match bindings
                .iter_mut()
                .find(|b| b.array_stride == array_stride && b.buffer_offset == buffer_offset)
            {
                Some(binding) => binding.attributes.push(gpu_attr),
                None => bindings.push(GpuVertexBinding {
                    buffer_offset,
                    array_stride,
                    attributes: vec![gpu_attr],
                }),
            }
        }

        log::debug!(
            "vertex schema -> {} gpu binding(s) for {} attributes",
            bindings.len(),
            self.len()
        );
        Ok(bindings)
    }
}
