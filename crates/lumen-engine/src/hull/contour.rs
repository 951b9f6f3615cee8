use crate::coords::Vec2;

use super::{HullConfig, find_convex_hull_with};

/// Outline polygon of a projected point set, counter-clockwise for +Y up.
#[inline]
pub fn find_contour(points: &[Vec2]) -> Vec<Vec2> {
    find_contour_with(points, &HullConfig::default())
}

pub fn find_contour_with(points: &[Vec2], config: &HullConfig) -> Vec<Vec2> {
    let mut hull = find_convex_hull_with(points, config);
    hull.reverse();
    hull
}

/// Shoelace area; positive for counter-clockwise polygons (+Y up).
pub fn signed_area(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| polygon[i].cross(polygon[(i + 1) % n]))
        .sum();
    twice * 0.5
}
