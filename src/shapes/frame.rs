//! Edges and edge-linking helpers
//!
//! An [`Edge`] joins two endpoints of any copyable handle type: vertex
//! indices inside a polyhedron, or `BodyId`s when a mesh links bodies with
//! tethers.

use crate::error::{PhysicsError, Result};

/// Undirected edge: `Edge::new(a, b) == Edge::new(b, a)`
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge<T> {
    pub a: T,
    pub b: T,
}

impl<T: Copy + PartialEq> Edge<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn endpoints(&self) -> [T; 2] {
        [self.a, self.b]
    }

    pub fn contains(&self, endpoint: T) -> bool {
        self.a == endpoint || self.b == endpoint
    }

    /// Two distinct edges sharing an endpoint
    pub fn is_connected(&self, other: &Edge<T>) -> bool {
        self != other && (other.contains(self.a) || other.contains(self.b))
    }
}

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// Endpoint shared by every edge, if there is one
pub fn common_endpoint<T: Copy + PartialEq>(edges: &[Edge<T>]) -> Option<T> {
    let (first, rest) = edges.split_first()?;
    first
        .endpoints()
        .into_iter()
        .find(|&p| rest.iter().all(|e| e.contains(p)))
}

/// Close a ring: 0-(n-1), 1-0, 2-1, ... Two vertices give a single edge.
pub fn link_ring<T: Copy + PartialEq>(vertices: &[T]) -> Vec<Edge<T>> {
    match vertices.len() {
        0 | 1 => Vec::new(),
        2 => vec![Edge::new(vertices[0], vertices[1])],
        n => {
            let mut edges = Vec::with_capacity(n);
            edges.push(Edge::new(vertices[0], vertices[n - 1]));
            for i in 1..n {
                edges.push(Edge::new(vertices[i], vertices[i - 1]));
            }
            edges
        }
    }
}

/// Join `one` to each of `many`
pub fn link_one_to_many<T: Copy + PartialEq>(one: T, many: &[T]) -> Vec<Edge<T>> {
    many.iter().map(|&m| Edge::new(one, m)).collect()
}

/// Join `a[i]` to `b[i]` for every i. Both sides must have the same length.
pub fn link_bijectively<T: Copy + PartialEq>(a: &[T], b: &[T]) -> Result<Vec<Edge<T>>> {
    if a.len() != b.len() {
        return Err(PhysicsError::MismatchedLink { left: a.len(), right: b.len() });
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| Edge::new(x, y)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected() {
        assert_eq!(Edge::new(1, 2), Edge::new(2, 1));
        assert!(Edge::new(1, 2).is_connected(&Edge::new(2, 3)));
        assert!(!Edge::new(1, 2).is_connected(&Edge::new(2, 1)));
    }

    #[test]
    fn ring_closes() {
        let edges = link_ring(&[0, 1, 2, 3]);
        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&Edge::new(3, 0)));
        assert_eq!(link_ring(&[5, 6]), vec![Edge::new(5, 6)]);
    }

    #[test]
    fn fan_has_common_endpoint() {
        let edges = link_one_to_many(9, &[1, 2, 3]);
        assert_eq!(common_endpoint(&edges), Some(9));
        assert_eq!(common_endpoint(&link_ring(&[0, 1, 2])), None);
    }

    #[test]
    fn bijective_link_rejects_mismatched_lengths() {
        let err = link_bijectively(&[1, 2, 3], &[4, 5]).unwrap_err();
        assert_eq!(err, PhysicsError::MismatchedLink { left: 3, right: 2 });
        assert_eq!(link_bijectively(&[1], &[2]).unwrap(), vec![Edge::new(1, 2)]);
    }
}
