use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use super::error::SchemaError;

/// Scalar element kind stored in a vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Byte,
    UByte,
    Short,
    UShort,
    Float,
}

impl ScalarKind {
    /// All kinds, longest names first so prefix matching is unambiguous.
    pub const ALL: [ScalarKind; 5] = [
        ScalarKind::UShort,
        ScalarKind::UByte,
        ScalarKind::Short,
        ScalarKind::Float,
        ScalarKind::Byte,
    ];

    #[inline]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Byte | Self::UByte => 1,
            Self::Short | Self::UShort => 2,
            Self::Float => 4,
        }
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::Float)
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Float)
    }

    /// Largest representable integer, used as the normalization scale.
    ///
    /// `None` for `Float`.
    #[inline]
    pub const fn norm_scale(self) -> Option<f32> {
        match self {
            Self::Byte => Some(i8::MAX as f32),
            Self::UByte => Some(u8::MAX as f32),
            Self::Short => Some(i16::MAX as f32),
            Self::UShort => Some(u16::MAX as f32),
            Self::Float => None,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::UByte => "ubyte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar kind plus component count, e.g. `ubyte3`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttributeType {
    pub kind: ScalarKind,
    /// Always in `1..=4`.
    pub components: u8,
}

impl AttributeType {
    /// Returns `None` when `components` is outside `1..=4`.
    #[inline]
    pub const fn new(kind: ScalarKind, components: u8) -> Option<Self> {
        if components >= 1 && components <= 4 {
            Some(Self { kind, components })
        } else {
            None
        }
    }

    /// Bytes taken by one value of this type.
    #[inline]
    pub const fn byte_extent(self) -> usize {
        self.components as usize * self.kind.byte_width()
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.components)
    }
}

/// Parse failure for an attribute type string, without attribute context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid attribute type `{0}`")]
pub struct InvalidAttributeType(pub String);

impl FromStr for AttributeType {
    type Err = InvalidAttributeType;

    /// Accepts `<kind>` (one component) or `<kind><n>` with `n` in `1..=4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidAttributeType(s.to_owned());

        let kind = ScalarKind::ALL
            .into_iter()
            .find(|k| s.starts_with(k.name()))
            .ok_or_else(invalid)?;

        let rest = &s[kind.name().len()..];
        let components = match rest.as_bytes() {
            [] => 1,
            [d @ b'1'..=b'4'] => d - b'0',
            _ => return Err(invalid()),
        };

        AttributeType::new(kind, components).ok_or_else(invalid)
    }
}

impl InvalidAttributeType {
    pub(crate) fn for_attribute(self, attribute: &str) -> SchemaError {
        SchemaError::InvalidType {
            attribute: attribute.to_owned(),
            ty: self.0,
        }
    }
}
