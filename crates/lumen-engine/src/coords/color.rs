/// Linear RGBA color, straight alpha.
///
/// Channels are nominally in `[0, 1]`. Out-of-range values are kept as-is until the
/// color is quantized (see [`ColorRgba::to_packed_u32`] and the vertex writer).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Channels in `r, g, b, a` order.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes to four unorm bytes and packs them as a little-endian `u32`.
    ///
    /// Byte 0 is red, byte 3 is alpha, matching a `ubyte4` normalized vertex
    /// attribute read as one 32-bit word: `{0.6, 0.4, 0.2, 1.0}` packs to `0xFF336699`.
    #[inline]
    pub fn to_packed_u32(self) -> u32 {
        u32::from_le_bytes([
            unorm8(self.r),
            unorm8(self.g),
            unorm8(self.b),
            unorm8(self.a),
        ])
    }

    /// Inverse of [`to_packed_u32`](Self::to_packed_u32), exact to within `1 / 255`.
    #[inline]
    pub fn from_packed_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }
}

#[inline]
fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_reference_color() {
        let c = ColorRgba::new(0.6, 0.4, 0.2, 1.0);
        assert_eq!(c.to_packed_u32(), 0xFF33_6699);
    }

    #[test]
    fn packing_clamps_out_of_range_channels() {
        let c = ColorRgba::new(-1.0, 2.0, 0.0, 1.0);
        assert_eq!(c.to_packed_u32(), 0xFF00_FF00);
    }

    #[test]
    fn unpack_is_within_one_step() {
        let c = ColorRgba::new(0.6, 0.4, 0.2, 1.0);
        let back = ColorRgba::from_packed_u32(c.to_packed_u32());
        for (a, b) in c.to_array().into_iter().zip(back.to_array()) {
            assert!((a - b).abs() <= 1.0 / 255.0);
        }
    }
}
