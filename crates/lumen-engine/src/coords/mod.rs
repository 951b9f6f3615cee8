//! Coordinate and color value types shared by the vertex writer and contour finder.
//!
//! Conventions:
//! - all components are `f32`
//! - planar winding is described for a +Y-up basis (counter-clockwise = positive area)

mod color;
mod vec2;
mod vec3;
mod vec4;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
