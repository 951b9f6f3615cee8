use core::fmt;

use crate::coords::{ColorRgba, Vec2, Vec3, Vec4};

/// Attribute lookup key: name, or a location resolved once via
/// [`VertexSchema::location_of`](super::VertexSchema::location_of).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttributeKey<'a> {
    Name(&'a str),
    Location(usize),
}

impl<'a> From<&'a str> for AttributeKey<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        AttributeKey::Name(name)
    }
}

impl<'a> From<&'a String> for AttributeKey<'a> {
    #[inline]
    fn from(name: &'a String) -> Self {
        AttributeKey::Name(name)
    }
}

impl From<usize> for AttributeKey<'_> {
    #[inline]
    fn from(location: usize) -> Self {
        AttributeKey::Location(location)
    }
}

impl fmt::Display for AttributeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::Name(name) => f.write_str(name),
            AttributeKey::Location(i) => write!(f, "#{i}"),
        }
    }
}

/// One attribute value for one vertex.
///
/// Structured shapes expand to components in a fixed order:
/// `Vec2` → `x, y`; `Vec3` → `x, y, z`; `Vec4` → `x, y, z, w`; `Color` → `r, g, b, a`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VertexValue<'a> {
    Scalar(f32),
    Tuple(&'a [f32]),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Color(ColorRgba),
}

impl<'a> VertexValue<'a> {
    /// Number of components this value expands to.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            VertexValue::Scalar(_) => 1,
            VertexValue::Tuple(t) => t.len(),
            VertexValue::Vec2(_) => 2,
            VertexValue::Vec3(_) => 3,
            VertexValue::Vec4(_) | VertexValue::Color(_) => 4,
        }
    }

    /// Expands into components, using `scratch` for structured shapes.
    #[inline]
    pub fn components<'s>(&'s self, scratch: &'s mut [f32; 4]) -> &'s [f32] {
        let n = match *self {
            VertexValue::Tuple(t) => return t,
            VertexValue::Scalar(v) => {
                scratch[0] = v;
                1
            }
            VertexValue::Vec2(v) => {
                scratch[..2].copy_from_slice(&[v.x, v.y]);
                2
            }
            VertexValue::Vec3(v) => {
                scratch[..3].copy_from_slice(&[v.x, v.y, v.z]);
                3
            }
            VertexValue::Vec4(v) => {
                *scratch = [v.x, v.y, v.z, v.w];
                4
            }
            VertexValue::Color(c) => {
                *scratch = c.to_array();
                4
            }
        };
        &scratch[..n]
    }
}

impl From<f32> for VertexValue<'_> {
    #[inline]
    fn from(v: f32) -> Self {
        VertexValue::Scalar(v)
    }
}

impl<'a> From<&'a [f32]> for VertexValue<'a> {
    #[inline]
    fn from(t: &'a [f32]) -> Self {
        VertexValue::Tuple(t)
    }
}

impl<'a, const N: usize> From<&'a [f32; N]> for VertexValue<'a> {
    #[inline]
    fn from(t: &'a [f32; N]) -> Self {
        VertexValue::Tuple(t)
    }
}

impl From<Vec2> for VertexValue<'_> {
    #[inline]
    fn from(v: Vec2) -> Self {
        VertexValue::Vec2(v)
    }
}

impl From<Vec3> for VertexValue<'_> {
    #[inline]
    fn from(v: Vec3) -> Self {
        VertexValue::Vec3(v)
    }
}

impl From<Vec4> for VertexValue<'_> {
    #[inline]
    fn from(v: Vec4) -> Self {
        VertexValue::Vec4(v)
    }
}

impl From<ColorRgba> for VertexValue<'_> {
    #[inline]
    fn from(c: ColorRgba) -> Self {
        VertexValue::Color(c)
    }
}

/// Decoded attribute components, at most four.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Components {
    values: [f32; 4],
    len: usize,
}

impl Components {
    #[inline]
    pub(crate) fn new(values: [f32; 4], len: usize) -> Self {
        debug_assert!(len <= 4);
        Self { values, len }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
