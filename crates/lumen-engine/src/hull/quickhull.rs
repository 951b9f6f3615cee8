use crate::coords::Vec2;

use super::HullConfig;

/// Convex hull with the default tolerance. See [`find_convex_hull_with`].
#[inline]
pub fn find_convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    find_convex_hull_with(points, &HullConfig::default())
}

/// Divide-and-conquer (quickhull) convex hull.
///
/// Output starts at the leftmost point (lowest y on ties) and runs clockwise for +Y up;
/// [`find_contour`](super::find_contour) reverses it. Only extreme points are kept:
/// interior and collinear boundary points are dropped.
///
/// Inputs with fewer than 3 points are returned unchanged. An input whose points all
/// coincide collapses to a single point.
///
/// Non-finite coordinates are not rejected; NaN fails every comparison and the
/// result is unspecified.
pub fn find_convex_hull_with(points: &[Vec2], config: &HullConfig) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let (min, max) = seeds(points);
    if min == max {
        return vec![min];
    }

    let eps = config.epsilon;
    let mut above = Vec::new();
    let mut below = Vec::new();
    for &p in points {
        let d = signed_distance(min, max, p);
        if d > eps {
            above.push(p);
        } else if d < -eps {
            below.push(p);
        }
    }

    let mut hull = Vec::with_capacity(above.len() + below.len() + 2);
    hull.push(min);
    hull_chain(min, max, &above, eps, &mut hull);
    hull.push(max);
    hull_chain(max, min, &below, eps, &mut hull);

    log::trace!("convex hull: {} points -> {} vertices", points.len(), hull.len());
    hull
}

/// Leftmost point (lowest y on ties) and rightmost point (highest y on ties).
fn seeds(points: &[Vec2]) -> (Vec2, Vec2) {
    let mut min = points[0];
    let mut max = points[0];
    for &p in &points[1..] {
        if p.x < min.x || (p.x == min.x && p.y < min.y) {
            min = p;
        }
        if p.x > max.x || (p.x == max.x && p.y > max.y) {
            max = p;
        }
    }
    (min, max)
}

/// Perpendicular distance of `p` from the line `a -> b`, positive on the left.
#[inline]
fn signed_distance(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let dir = b - a;
    dir.cross(p - a) / dir.length()
}

/// Appends the hull vertices strictly between `p1` and `p2`.
///
/// `points` all lie outside (left of) `p1 -> p2`.
fn hull_chain(p1: Vec2, p2: Vec2, points: &[Vec2], eps: f32, out: &mut Vec<Vec2>) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };

    // Strictly greater replaces, so the earliest point wins ties.
    let mut far = first;
    let mut far_d = signed_distance(p1, p2, first);
    for &p in rest {
        let d = signed_distance(p1, p2, p);
        if d > far_d {
            far = p;
            far_d = d;
        }
    }

    let left: Vec<Vec2> = points
        .iter()
        .copied()
        .filter(|&p| signed_distance(p1, far, p) > eps)
        .collect();
    let right: Vec<Vec2> = points
        .iter()
        .copied()
        .filter(|&p| signed_distance(far, p2, p) > eps)
        .collect();

    hull_chain(p1, far, &left, eps, out);
    out.push(far);
    hull_chain(far, p2, &right, eps, out);
}
