//! 2D convex hull and contour extraction.
//!
//! Used to outline a projected 3D silhouette: project the object's vertices to the
//! screen plane, then [`find_contour`] returns the outline polygon counter-clockwise.
//!
//! Winding is described for a +Y-up basis. In a +Y-down basis (pixels) the same
//! sequence reads clockwise.

mod contour;
mod quickhull;

pub use contour::{find_contour, find_contour_with, signed_area};
pub use quickhull::{find_convex_hull, find_convex_hull_with};

/// Distance below which a point counts as lying on a hull edge.
pub const EPS: f32 = 1e-5;

/// Hull tolerances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HullConfig {
    /// Points closer than this to a candidate edge are dropped.
    ///
    /// Absorbs floating noise so near-collinear boundary points do not survive as
    /// extra hull vertices.
    pub epsilon: f32,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self { epsilon: EPS }
    }
}
