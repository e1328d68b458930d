/// Ray — origin + direction with precomputed intersection state.
///
/// The box overlap tests use the slope-based classification of
/// Eisemann/Mahovsky/Wyvill: `set()` classifies the direction once into
/// one of 27 sign patterns (negative / zero / positive per axis) and
/// precomputes the reciprocals, pairwise slopes and offset constants the
/// specialized tests need. Each per-pattern test is then a handful of
/// compares and multiplies — no divisions, no branches on direction
/// signs, no epsilon guards for axis-aligned rays (the zero-axis
/// patterns simply omit the cross terms that would divide by zero).
///
/// World-space query rays should be built with a normalized direction so
/// that the distances reported by `bbox_intersection_test_ex` are in
/// world units. A zero direction is a contract violation; such a ray
/// reports no intersections.

use glam::{Mat4, Vec3};
use super::aabb::Aabb;

/// Determinant threshold below which a triangle is treated as
/// parallel or degenerate.
const EPSILON: f32 = 1e-6;

// ===== DIRECTION SIGN CLASSIFICATION =====

/// Per-axis direction sign pattern (M = negative, O = zero, P = positive).
///
/// One of 3^3 = 27 patterns. Computed once in `Ray::set` and used to
/// dispatch to the specialized box test for that pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlopeClass {
    Mmm, Mmp, Mpm, Mpp, Pmm, Pmp, Ppm, Ppp,
    Omm, Omp, Opm, Opp,
    Mom, Mop, Pom, Pop,
    Mmo, Mpo, Pmo, Ppo,
    Moo, Poo, Omo, Opo, Oom, Oop,
    Ooo,
}

#[derive(Clone, Copy)]
enum Sign {
    M,
    O,
    P,
}

fn sign(value: f32) -> Sign {
    if value < 0.0 {
        Sign::M
    } else if value > 0.0 {
        Sign::P
    } else {
        Sign::O
    }
}

impl SlopeClass {
    fn classify(direction: Vec3) -> Self {
        match (sign(direction.x), sign(direction.y), sign(direction.z)) {
            (Sign::M, Sign::M, Sign::M) => SlopeClass::Mmm,
            (Sign::M, Sign::M, Sign::P) => SlopeClass::Mmp,
            (Sign::M, Sign::P, Sign::M) => SlopeClass::Mpm,
            (Sign::M, Sign::P, Sign::P) => SlopeClass::Mpp,
            (Sign::P, Sign::M, Sign::M) => SlopeClass::Pmm,
            (Sign::P, Sign::M, Sign::P) => SlopeClass::Pmp,
            (Sign::P, Sign::P, Sign::M) => SlopeClass::Ppm,
            (Sign::P, Sign::P, Sign::P) => SlopeClass::Ppp,
            (Sign::O, Sign::M, Sign::M) => SlopeClass::Omm,
            (Sign::O, Sign::M, Sign::P) => SlopeClass::Omp,
            (Sign::O, Sign::P, Sign::M) => SlopeClass::Opm,
            (Sign::O, Sign::P, Sign::P) => SlopeClass::Opp,
            (Sign::M, Sign::O, Sign::M) => SlopeClass::Mom,
            (Sign::M, Sign::O, Sign::P) => SlopeClass::Mop,
            (Sign::P, Sign::O, Sign::M) => SlopeClass::Pom,
            (Sign::P, Sign::O, Sign::P) => SlopeClass::Pop,
            (Sign::M, Sign::M, Sign::O) => SlopeClass::Mmo,
            (Sign::M, Sign::P, Sign::O) => SlopeClass::Mpo,
            (Sign::P, Sign::M, Sign::O) => SlopeClass::Pmo,
            (Sign::P, Sign::P, Sign::O) => SlopeClass::Ppo,
            (Sign::M, Sign::O, Sign::O) => SlopeClass::Moo,
            (Sign::P, Sign::O, Sign::O) => SlopeClass::Poo,
            (Sign::O, Sign::M, Sign::O) => SlopeClass::Omo,
            (Sign::O, Sign::P, Sign::O) => SlopeClass::Opo,
            (Sign::O, Sign::O, Sign::M) => SlopeClass::Oom,
            (Sign::O, Sign::O, Sign::P) => SlopeClass::Oop,
            (Sign::O, Sign::O, Sign::O) => SlopeClass::Ooo,
        }
    }
}

// ===== RAY =====

/// A ray with precomputed state for fast box overlap tests.
///
/// `set()` (and the constructor) precompute, from origin (x, y, z) and
/// direction (i, j, k):
/// - reciprocals `ii = 1/i`, `ij = 1/j`, `ik = 1/k`
/// - pairwise slopes, e.g. `jbyi = j/i`
/// - offset constants, e.g. `c_xy = y - (j/i)·x`
///
/// The offset constants are the ray's axis-plane line equations in
/// precomputed form: `jbyi·X + c_xy` is the ray's y at x = X. The box
/// tests compare those against box corners, so a test never divides nor
/// reads anything but box corners and this cached state.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,

    // Reciprocals of the direction components
    ii: f32,
    ij: f32,
    ik: f32,

    // Pairwise direction slopes
    ibyj: f32,
    jbyi: f32,
    jbyk: f32,
    kbyj: f32,
    ibyk: f32,
    kbyi: f32,

    // Precomputed line-equation offsets
    c_xy: f32,
    c_xz: f32,
    c_yx: f32,
    c_yz: f32,
    c_zx: f32,
    c_zy: f32,

    class: SlopeClass,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    ///
    /// The direction of world-space query rays should be normalized so
    /// that reported distances are in world units.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let mut ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::ZERO,
            ii: 0.0,
            ij: 0.0,
            ik: 0.0,
            ibyj: 0.0,
            jbyi: 0.0,
            jbyk: 0.0,
            kbyj: 0.0,
            ibyk: 0.0,
            kbyi: 0.0,
            c_xy: 0.0,
            c_xz: 0.0,
            c_yx: 0.0,
            c_yz: 0.0,
            c_zx: 0.0,
            c_zy: 0.0,
            class: SlopeClass::Ooo,
        };
        ray.set(origin, direction);
        ray
    }

    /// Replace origin and direction, recomputing all derived state.
    ///
    /// This is the cheap way to reuse one ray as scratch space (the
    /// raycast visitor re-targets a single local-space ray per object
    /// instead of building new rays).
    pub fn set(&mut self, origin: Vec3, direction: Vec3) {
        self.origin = origin;
        self.direction = direction;

        let (i, j, k) = (direction.x, direction.y, direction.z);
        let (x, y, z) = (origin.x, origin.y, origin.z);

        // Zero components produce inf/NaN here; the matching sign
        // patterns never read the affected fields.
        self.ii = 1.0 / i;
        self.ij = 1.0 / j;
        self.ik = 1.0 / k;

        self.ibyj = i * self.ij;
        self.jbyi = j * self.ii;
        self.jbyk = j * self.ik;
        self.kbyj = k * self.ij;
        self.ibyk = i * self.ik;
        self.kbyi = k * self.ii;

        self.c_xy = y - self.jbyi * x;
        self.c_xz = z - self.kbyi * x;
        self.c_yx = x - self.ibyj * y;
        self.c_yz = z - self.kbyj * y;
        self.c_zx = x - self.ibyk * z;
        self.c_zy = y - self.jbyk * z;

        self.class = SlopeClass::classify(direction);
    }

    /// Ray origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Ray direction. Not necessarily unit length after a transform.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point on the ray at parameter `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform this ray by a matrix, returning a new ray.
    ///
    /// The direction is deliberately NOT renormalized: a point at
    /// parameter `t` on the source ray maps to parameter `t` on the
    /// transformed ray, so distances measured in different local spaces
    /// stay directly comparable.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray::new(
            matrix.transform_point3(self.origin),
            matrix.transform_vector3(self.direction),
        )
    }

    /// Test whether this ray overlaps an AABB.
    ///
    /// Dispatches on the direction sign pattern computed in `set()`:
    /// up to 3 origin-vs-corner compares followed by up to 6
    /// precomputed slope inequalities. Division free. Boxes entirely
    /// behind the origin report no overlap; a box containing the origin
    /// reports overlap.
    pub fn bbox_intersection_test(&self, aabb: &Aabb) -> bool {
        let (x, y, z) = (self.origin.x, self.origin.y, self.origin.z);
        let (x0, y0, z0) = (aabb.min.x, aabb.min.y, aabb.min.z);
        let (x1, y1, z1) = (aabb.max.x, aabb.max.y, aabb.max.z);

        match self.class {
            SlopeClass::Mmm => {
                !(x < x0 || y < y0 || z < z0
                    || self.jbyi * x0 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x1 + self.c_yx > 0.0
                    || self.jbyk * z0 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z1 + self.c_yz > 0.0
                    || self.kbyi * x0 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Mmp => {
                !(x < x0 || y < y0 || z > z1
                    || self.jbyi * x0 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x1 + self.c_yx > 0.0
                    || self.jbyk * z1 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z0 + self.c_yz < 0.0
                    || self.kbyi * x0 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Mpm => {
                !(x < x0 || y > y1 || z < z0
                    || self.jbyi * x0 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x1 + self.c_yx > 0.0
                    || self.jbyk * z0 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z1 + self.c_yz > 0.0
                    || self.kbyi * x0 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Mpp => {
                !(x < x0 || y > y1 || z > z1
                    || self.jbyi * x0 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x1 + self.c_yx > 0.0
                    || self.jbyk * z1 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z0 + self.c_yz < 0.0
                    || self.kbyi * x0 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Pmm => {
                !(x > x1 || y < y0 || z < z0
                    || self.jbyi * x1 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x0 + self.c_yx < 0.0
                    || self.jbyk * z0 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z1 + self.c_yz > 0.0
                    || self.kbyi * x1 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Pmp => {
                !(x > x1 || y < y0 || z > z1
                    || self.jbyi * x1 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x0 + self.c_yx < 0.0
                    || self.jbyk * z1 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z0 + self.c_yz < 0.0
                    || self.kbyi * x1 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Ppm => {
                !(x > x1 || y > y1 || z < z0
                    || self.jbyi * x1 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x0 + self.c_yx < 0.0
                    || self.jbyk * z0 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z1 + self.c_yz > 0.0
                    || self.kbyi * x1 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Ppp => {
                !(x > x1 || y > y1 || z > z1
                    || self.jbyi * x1 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x0 + self.c_yx < 0.0
                    || self.jbyk * z1 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z0 + self.c_yz < 0.0
                    || self.kbyi * x1 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Omm => {
                !(x < x0 || x > x1 || y < y0 || z < z0
                    || self.jbyk * z0 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z1 + self.c_yz > 0.0)
            }
            SlopeClass::Omp => {
                !(x < x0 || x > x1 || y < y0 || z > z1
                    || self.jbyk * z1 - y1 + self.c_zy > 0.0
                    || self.kbyj * y0 - z0 + self.c_yz < 0.0)
            }
            SlopeClass::Opm => {
                !(x < x0 || x > x1 || y > y1 || z < z0
                    || self.jbyk * z0 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z1 + self.c_yz > 0.0)
            }
            SlopeClass::Opp => {
                !(x < x0 || x > x1 || y > y1 || z > z1
                    || self.jbyk * z1 - y0 + self.c_zy < 0.0
                    || self.kbyj * y1 - z0 + self.c_yz < 0.0)
            }
            SlopeClass::Mom => {
                !(y < y0 || y > y1 || x < x0 || z < z0
                    || self.kbyi * x0 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Mop => {
                !(y < y0 || y > y1 || x < x0 || z > z1
                    || self.kbyi * x0 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x1 + self.c_zx > 0.0)
            }
            SlopeClass::Pom => {
                !(y < y0 || y > y1 || x > x1 || z < z0
                    || self.kbyi * x1 - z1 + self.c_xz > 0.0
                    || self.ibyk * z0 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Pop => {
                !(y < y0 || y > y1 || x > x1 || z > z1
                    || self.kbyi * x1 - z0 + self.c_xz < 0.0
                    || self.ibyk * z1 - x0 + self.c_zx < 0.0)
            }
            SlopeClass::Mmo => {
                !(z < z0 || z > z1 || x < x0 || y < y0
                    || self.jbyi * x0 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x1 + self.c_yx > 0.0)
            }
            SlopeClass::Mpo => {
                !(z < z0 || z > z1 || x < x0 || y > y1
                    || self.jbyi * x0 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x1 + self.c_yx > 0.0)
            }
            SlopeClass::Pmo => {
                !(z < z0 || z > z1 || x > x1 || y < y0
                    || self.jbyi * x1 - y1 + self.c_xy > 0.0
                    || self.ibyj * y0 - x0 + self.c_yx < 0.0)
            }
            SlopeClass::Ppo => {
                !(z < z0 || z > z1 || x > x1 || y > y1
                    || self.jbyi * x1 - y0 + self.c_xy < 0.0
                    || self.ibyj * y1 - x0 + self.c_yx < 0.0)
            }
            SlopeClass::Moo => {
                !(x < x0 || y < y0 || y > y1 || z < z0 || z > z1)
            }
            SlopeClass::Poo => {
                !(x > x1 || y < y0 || y > y1 || z < z0 || z > z1)
            }
            SlopeClass::Omo => {
                !(y < y0 || x < x0 || x > x1 || z < z0 || z > z1)
            }
            SlopeClass::Opo => {
                !(y > y1 || x < x0 || x > x1 || z < z0 || z > z1)
            }
            SlopeClass::Oom => {
                !(z < z0 || x < x0 || x > x1 || y < y0 || y > y1)
            }
            SlopeClass::Oop => {
                !(z > z1 || x < x0 || x > x1 || y < y0 || y > y1)
            }
            // Degenerate zero direction: a point overlaps nothing
            SlopeClass::Ooo => false,
        }
    }

    /// Like `bbox_intersection_test`, but also computes the entry
    /// distance along the ray.
    ///
    /// Returns `f32::INFINITY` when the ray misses the box, so a result
    /// is a hit if and only if it is finite. On a hit the entry distance
    /// is the latest per-axis entry time: each negative axis enters
    /// through the box's max face, each positive axis through its min
    /// face, and zero axes contribute nothing. For a ray starting inside
    /// the box the entry distance is negative (the entry point lies
    /// behind the origin).
    pub fn bbox_intersection_test_ex(&self, aabb: &Aabb) -> f32 {
        if !self.bbox_intersection_test(aabb) {
            return f32::INFINITY;
        }

        let mut t = f32::NEG_INFINITY;

        if self.direction.x < 0.0 {
            t = t.max((aabb.max.x - self.origin.x) * self.ii);
        } else if self.direction.x > 0.0 {
            t = t.max((aabb.min.x - self.origin.x) * self.ii);
        }

        if self.direction.y < 0.0 {
            t = t.max((aabb.max.y - self.origin.y) * self.ij);
        } else if self.direction.y > 0.0 {
            t = t.max((aabb.min.y - self.origin.y) * self.ij);
        }

        if self.direction.z < 0.0 {
            t = t.max((aabb.max.z - self.origin.z) * self.ik);
        } else if self.direction.z > 0.0 {
            t = t.max((aabb.min.z - self.origin.z) * self.ik);
        }

        t
    }

    /// Test this ray against a triangle (Möller–Trumbore).
    ///
    /// With `cull = true` the test is one-sided: triangles whose front
    /// face (counter-clockwise winding) points away from the ray are
    /// rejected before any division. With `cull = false` both sides
    /// hit. Returns the hit distance, or `None` for a miss. Hits behind
    /// the origin (t < 0) report a miss.
    pub fn intersection_test_triangle(
        &self,
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        cull: bool,
    ) -> Option<f32> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let pvec = self.direction.cross(edge2);
        let det = edge1.dot(pvec);

        if cull {
            // One-sided: reject back-facing and parallel triangles while
            // the barycentrics are still scaled by det (division deferred)
            if det < EPSILON {
                return None;
            }

            let tvec = self.origin - v0;
            let u = tvec.dot(pvec);
            if u < 0.0 || u > det {
                return None;
            }

            let qvec = tvec.cross(edge1);
            let v = self.direction.dot(qvec);
            if v < 0.0 || u + v > det {
                return None;
            }

            let t = edge2.dot(qvec) / det;
            if t < 0.0 {
                return None;
            }
            Some(t)
        } else {
            if det.abs() < EPSILON {
                return None;
            }
            let inv_det = 1.0 / det;

            let tvec = self.origin - v0;
            let u = tvec.dot(pvec) * inv_det;
            if u < 0.0 || u > 1.0 {
                return None;
            }

            let qvec = tvec.cross(edge1);
            let v = self.direction.dot(qvec) * inv_det;
            if v < 0.0 || u + v > 1.0 {
                return None;
            }

            let t = edge2.dot(qvec) * inv_det;
            if t < 0.0 {
                return None;
            }
            Some(t)
        }
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
