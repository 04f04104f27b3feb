//! Triangulated polyhedra
//!
//! Vertices are stored once, in the body-local frame, and faces refer to them
//! by index. Every face is wound so that its area vector points outward,
//! which is what the volume and cross-section formulas rely on.

use std::f64::consts::TAU;

use crate::math::vector::{Cartesian, NVec3};
use crate::shapes::frame::{link_ring, Edge};

#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<NVec3>,
    faces: Vec<[usize; 3]>,
}

/// `n` vertices evenly spaced on a horizontal circle of `radius` at height `y`
pub fn ring(n: usize, y: f64, radius: f64) -> Vec<NVec3> {
    let step = TAU / n as f64;
    (0..n)
        .map(|i| {
            let theta = i as f64 * step;
            NVec3::new(radius * theta.cos(), y, radius * theta.sin())
        })
        .collect()
}

/// Side faces of a pyramid with the given apex over a closed base ring
pub fn open_pyramid(apex: &NVec3, base: &[NVec3]) -> Vec<[NVec3; 3]> {
    let n = base.len();
    (0..n).map(|i| [*apex, base[(i + n - 1) % n], base[i]]).collect()
}

impl Polyhedron {
    /// Build from triangles given by their corner positions.
    ///
    /// Corners that compare equal become one shared vertex. Each triangle is
    /// re-wound if needed so its area vector points away from `interior`
    /// (any point inside works for a convex shape).
    pub fn from_triangles(triangles: &[[NVec3; 3]], interior: &NVec3) -> Self {
        let mut poly = Self { vertices: Vec::new(), faces: Vec::with_capacity(triangles.len()) };
        for tri in triangles {
            let mut face = [0usize; 3];
            for (slot, corner) in face.iter_mut().zip(tri) {
                *slot = poly.vertex_index(corner);
            }
            let area = poly.area_of(&face);
            if area.dot(&(tri[0] - interior)) < 0.0 {
                face.swap(1, 2);
            }
            poly.faces.push(face);
        }
        poly
    }

    /// Build from an explicit vertex list and already outward-wound faces
    pub fn from_faces(vertices: Vec<NVec3>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Closed pyramid: the open sides plus a fan over the base
    pub fn pyramid(apex: &NVec3, base: &[NVec3]) -> Self {
        let mut triangles = open_pyramid(apex, base);
        for i in 1..base.len().saturating_sub(1) {
            triangles.push([base[0], base[i], base[i + 1]]);
        }
        let interior = (base.iter().sum::<NVec3>() / base.len() as f64 + apex) * 0.5;
        Self::from_triangles(&triangles, &interior)
    }

    /// Two pyramids sharing one base ring, e.g. a flying saucer
    pub fn bipyramid(top: &NVec3, bottom: &NVec3, ring: &[NVec3]) -> Self {
        let mut triangles = open_pyramid(top, ring);
        triangles.extend(open_pyramid(bottom, ring));
        Self::from_triangles(&triangles, &((top + bottom) * 0.5))
    }

    /// Axis-aligned box centred on the origin
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        let (hx, hy, hz) = (0.5 * width, 0.5 * height, 0.5 * depth);
        let vertices: Vec<NVec3> = (0..8)
            .map(|i| {
                NVec3::new(
                    if i & 1 == 0 { -hx } else { hx },
                    if i & 2 == 0 { -hy } else { hy },
                    if i & 4 == 0 { -hz } else { hz },
                )
            })
            .collect();
        // two triangles per side, given as quads (a, b, c, d)
        let quads = [[0, 1, 3, 2], [4, 6, 7, 5], [0, 4, 5, 1], [2, 3, 7, 6], [0, 2, 6, 4], [1, 5, 7, 3]];
        let triangles: Vec<[NVec3; 3]> = quads
            .iter()
            .flat_map(|q| {
                [
                    [vertices[q[0]], vertices[q[1]], vertices[q[2]]],
                    [vertices[q[0]], vertices[q[2]], vertices[q[3]]],
                ]
            })
            .collect();
        Self::from_triangles(&triangles, &NVec3::zeros())
    }

    fn vertex_index(&mut self, corner: &NVec3) -> usize {
        match self.vertices.iter().position(|v| v == corner) {
            Some(i) => i,
            None => {
                self.vertices.push(*corner);
                self.vertices.len() - 1
            }
        }
    }

    fn area_of(&self, face: &[usize; 3]) -> NVec3 {
        let v0 = self.vertices[face[0]];
        let u = self.vertices[face[1]] - v0;
        let w = self.vertices[face[2]] - v0;
        u.cross(&w) * 0.5
    }

    /// Area vector of face `i`: normal to the face, outward, |a| = area
    pub fn area_vector(&self, i: usize) -> NVec3 {
        self.area_of(&self.faces[i])
    }

    pub fn vertices(&self) -> &[NVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Distinct edges over all faces, as vertex index pairs
    pub fn edges(&self) -> Vec<Edge<usize>> {
        let mut edges: Vec<Edge<usize>> = Vec::new();
        for face in &self.faces {
            for e in link_ring(face) {
                if !edges.contains(&e) {
                    edges.push(e);
                }
            }
        }
        edges
    }

    /// V = 1/3 Σ (x · a) over faces, with x any vertex of the face and a its
    /// outward area vector. Works for concave shapes too.
    pub fn volume(&self) -> f64 {
        let sum: f64 = self
            .faces
            .iter()
            .map(|face| self.vertices[face[0]].dot(&self.area_of(face)))
            .sum();
        sum / 3.0
    }

    /// Projected area seen along `axis`: half the sum of |a · axiŝ| over all
    /// faces. Indentations of a concave shape are counted as covered. Along a
    /// zero axis nothing is seen.
    pub fn cross_section(&self, axis: &NVec3) -> f64 {
        let len = axis.norm();
        if len == 0.0 {
            return 0.0;
        }
        let sum: f64 = self.faces.iter().map(|face| self.area_of(face).dot(axis).abs()).sum();
        0.5 * sum / len
    }

    /// Radius of the smallest origin-centred sphere containing every vertex
    pub fn bounding_radius(&self) -> f64 {
        self.vertices.iter().map(|v| v.norm_squared()).fold(0.0, f64::max).sqrt()
    }

    /// Shift the vertices so their (equally weighted) mean is the origin.
    /// Returns the translation applied.
    pub fn center(&mut self) -> NVec3 {
        if self.vertices.is_empty() {
            return NVec3::zeros();
        }
        let offset = -self.vertices.iter().sum::<NVec3>() / self.vertices.len() as f64;
        for v in &mut self.vertices {
            v.translate(&offset);
        }
        offset
    }

    /// Uniformly scale every vertex about the origin
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            *v *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;

    #[test]
    fn cube_volume_and_cross_section() {
        let cube = Polyhedron::cuboid(2.0, 2.0, 2.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        assert!((cube.volume() - 8.0).abs() < 1e-12);
        assert!((cube.cross_section(&vec3(0.0, 1.0, 0.0)) - 4.0).abs() < 1e-12);
        // axis length does not matter
        assert!((cube.cross_section(&vec3(0.0, 0.0, 5.0)) - 4.0).abs() < 1e-12);
        assert_eq!(cube.cross_section(&NVec3::zeros()), 0.0);
        assert!((cube.bounding_radius() - 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(cube.edges().len(), 18);
    }

    #[test]
    fn winding_is_fixed_from_interior() {
        // deliberately inward-wound tetrahedron
        let o = NVec3::zeros();
        let (x, y, z) = (vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0));
        let tris = [[o, x, y], [o, z, x], [o, y, z], [x, z, y]];
        let tet = Polyhedron::from_triangles(&tris, &vec3(0.1, 0.1, 0.1));
        assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-12, "got {}", tet.volume());
    }

    #[test]
    fn pyramid_volume() {
        // square base of side sqrt(2) at y = 0, apex at height 3
        let base = ring(4, 0.0, 1.0);
        let p = Polyhedron::pyramid(&vec3(0.0, 3.0, 0.0), &base);
        assert!((p.volume() - 2.0).abs() < 1e-9, "got {}", p.volume());
    }

    #[test]
    fn center_moves_mean_to_origin() {
        let mut cube = Polyhedron::cuboid(1.0, 1.0, 1.0);
        cube.scale(2.0);
        for v in cube.vertices.iter_mut() {
            *v += vec3(5.0, 0.0, 0.0);
        }
        let offset = cube.center();
        assert!((offset - vec3(-5.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((cube.volume() - 8.0).abs() < 1e-12);
    }
}
