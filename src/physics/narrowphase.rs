//! Narrowphase collision detection: GJK intersection over support maps.

use glam::Vec3;

use crate::error::Result;

use super::collider::{minkowski_support, SupportMap};
use super::simplex::Simplex;

/// Iteration bound for [`gjk`]. Well-formed convex inputs finish in far fewer.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// Below this squared length the search direction carries no information.
const DEGENERATE_DIRECTION_EPSILON: f32 = 1e-12;

/// Result of a single GJK query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionInfo {
    pub colliding: bool,
    /// Mean of the enclosing tetrahedron in Minkowski-difference space.
    /// Only meaningful when `colliding` is true; zero otherwise.
    pub collision_centroid: Vec3,
}

impl CollisionInfo {
    pub const SEPARATED: Self = Self {
        colliding: false,
        collision_centroid: Vec3::ZERO,
    };

    fn enclosed(simplex: &Simplex) -> Self {
        Self {
            colliding: true,
            collision_centroid: simplex.centroid(),
        }
    }
}

/// GJK intersection test with the default iteration bound.
pub fn gjk<A, B>(a: &A, b: &B) -> Result<CollisionInfo>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    gjk_with_max_iterations(a, b, DEFAULT_MAX_ITERATIONS)
}

/// GJK intersection test. Exceeding `max_iterations` is reported as a
/// separated pair with a warning.
pub fn gjk_with_max_iterations<A, B>(a: &A, b: &B, max_iterations: usize) -> Result<CollisionInfo>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let first = minkowski_support(a, b, Vec3::X)?;

    let mut simplex = Simplex::new();
    simplex.push_front(first);
    let mut direction = -first;

    for _ in 0..max_iterations {
        if direction.length_squared() <= DEGENERATE_DIRECTION_EPSILON {
            // The origin lies on the current simplex feature.
            match probe_perpendicular(a, b, &simplex)? {
                Some(perpendicular) => direction = perpendicular,
                None => {
                    tracing::trace!(size = simplex.len(), "GJK origin on boundary");
                    return Ok(CollisionInfo::SEPARATED);
                }
            }
        }

        let support = minkowski_support(a, b, direction)?;
        if support.dot(direction) <= 0.0 {
            return Ok(CollisionInfo::SEPARATED);
        }
        simplex.push_front(support);

        if do_simplex(&mut simplex, &mut direction) {
            return Ok(CollisionInfo::enclosed(&simplex));
        }
    }

    tracing::warn!(
        max_iterations,
        "GJK did not converge, treating pair as separated"
    );
    Ok(CollisionInfo::SEPARATED)
}

/// Approximate centroids for both orderings of a colliding pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    /// Centroid from `gjk(a, b)`.
    pub centroid_a: Vec3,
    /// Centroid from `gjk(b, a)`.
    pub centroid_b: Vec3,
}

/// Run GJK in both directions. `None` when the pair does not collide.
///
/// The decision comes from `gjk(a, b)`. If the reverse query disagrees
/// numerically, its centroid falls back to the negated forward centroid
/// (the Minkowski difference `b - a` mirrors `a - b`).
pub fn detect_collision<A, B>(a: &A, b: &B, max_iterations: usize) -> Result<Option<PairContact>>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let forward = gjk_with_max_iterations(a, b, max_iterations)?;
    if !forward.colliding {
        return Ok(None);
    }

    let reverse = gjk_with_max_iterations(b, a, max_iterations)?;
    let centroid_b = if reverse.colliding {
        reverse.collision_centroid
    } else {
        tracing::debug!("reverse GJK disagreed, mirroring forward centroid");
        -forward.collision_centroid
    };

    Ok(Some(PairContact {
        centroid_a: forward.collision_centroid,
        centroid_b,
    }))
}

/// Pick a search direction off a simplex that passes through the origin.
///
/// `None` when the Minkowski difference does not extend past the origin on
/// both sides of that direction, i.e. the shapes only touch.
fn probe_perpendicular<A, B>(a: &A, b: &B, simplex: &Simplex) -> Result<Option<Vec3>>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let perpendicular = match simplex.len() {
        2 => edge_perpendicular(simplex[0], simplex[1]),
        3 => {
            let normal = (simplex[1] - simplex[0]).cross(simplex[2] - simplex[0]);
            if normal.length_squared() > DEGENERATE_DIRECTION_EPSILON {
                Some(normal)
            } else {
                edge_perpendicular(simplex[0], simplex[1])
            }
        }
        _ => None,
    };
    let Some(perpendicular) = perpendicular else {
        return Ok(None);
    };

    let forward = minkowski_support(a, b, perpendicular)?;
    let backward = minkowski_support(a, b, -perpendicular)?;
    if forward.dot(perpendicular) <= 0.0 || backward.dot(-perpendicular) <= 0.0 {
        return Ok(None);
    }
    Ok(Some(perpendicular))
}

#[inline]
fn edge_perpendicular(a: Vec3, b: Vec3) -> Option<Vec3> {
    (b - a).try_normalize().map(|edge| edge.any_orthonormal_vector())
}

#[inline]
fn same_direction(direction: Vec3, ao: Vec3) -> bool {
    direction.dot(ao) > 0.0
}

/// Reduce the simplex towards the origin and pick the next search direction.
/// Returns true once the origin is enclosed.
fn do_simplex(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    match simplex.len() {
        2 => do_simplex_line(simplex, direction),
        3 => do_simplex_triangle(simplex, direction),
        4 => do_simplex_tetrahedron(simplex, direction),
        _ => false,
    }
}

fn do_simplex_line(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0]; // Most recently added
    let b = simplex[1];
    let ab = b - a;
    let ao = -a;

    if same_direction(ab, ao) {
        *direction = ab.cross(ao).cross(ab);
    } else {
        simplex.assign(&[a]);
        *direction = ao;
    }
    false
}

fn do_simplex_triangle(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    let abc = ab.cross(ac);

    if same_direction(abc.cross(ac), ao) {
        if same_direction(ac, ao) {
            simplex.assign(&[a, c]);
            *direction = ac.cross(ao).cross(ac);
        } else {
            simplex.assign(&[a, b]);
            return do_simplex_line(simplex, direction);
        }
    } else if same_direction(ab.cross(abc), ao) {
        simplex.assign(&[a, b]);
        return do_simplex_line(simplex, direction);
    } else if same_direction(abc, ao) {
        *direction = abc;
    } else {
        // Below the triangle: flip winding so the normal faces the origin.
        simplex.assign(&[a, c, b]);
        *direction = -abc;
    }
    false
}

fn do_simplex_tetrahedron(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let d = simplex[3];
    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let ao = -a;

    let abc = ab.cross(ac);
    let acd = ac.cross(ad);
    let adb = ad.cross(ab);

    if same_direction(abc, ao) {
        simplex.assign(&[a, b, c]);
        return do_simplex_triangle(simplex, direction);
    }
    if same_direction(acd, ao) {
        simplex.assign(&[a, c, d]);
        return do_simplex_triangle(simplex, direction);
    }
    if same_direction(adb, ao) {
        simplex.assign(&[a, d, b]);
        return do_simplex_triangle(simplex, direction);
    }

    true
}
