pub mod orientation;
pub mod frame;
pub mod polyhedron;
