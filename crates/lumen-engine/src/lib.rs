//! Lumen engine crate.
//!
//! CPU-side geometry plumbing for the lumen playground:
//! - [`vertex`]: declarative vertex schemas and a binary vertex writer
//! - [`hull`]: convex hull / contour of projected silhouettes
//! - [`render`]: `wgpu` buffer layouts derived from vertex schemas
//!
//! Everything here is synchronous and free of global state apart from the logger.

pub mod coords;
pub mod hull;
pub mod logging;
pub mod render;
pub mod vertex;
