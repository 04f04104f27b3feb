pub mod states;
pub mod shape;
pub mod material;
pub mod catalog;
pub mod params;
pub mod engine;
pub mod forces;
pub mod drag;
pub mod magnetic;
pub mod tethers;
pub mod rocketry;
pub mod controls;
pub mod trace;
pub mod mesh;
pub mod world;
pub mod integrator;
pub mod scenario;
