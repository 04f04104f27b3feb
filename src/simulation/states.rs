//! Body state for the simulation kernel
//!
//! A [`Body`] is one record: a kinematic core (position, velocity,
//! acceleration, force accumulator, mass, charge, orientation), a [`Shape`]
//! and, for rigid shapes, a [`RigidState`] with angular kinematics and the
//! inertia tensor. Shape-specific behaviour is dispatched on the shape
//! variant rather than through a type hierarchy.
//!
//! Per tick the world calls, in order: [`Body::zero_force`], forces call
//! [`Body::apply_force`]/[`Body::apply_torque`], then
//! [`Body::update_accelerations`], [`Body::update_velocity`] and
//! [`Body::update_position`].

use nalgebra::Matrix3;

use crate::error::{PhysicsError, Result};
use crate::math::quaternion::Quaternion;
use crate::math::vector::{Cartesian, NVec3};
use crate::shapes::orientation::Orientation;
use crate::shapes::polyhedron::Polyhedron;
use crate::simulation::material::{Color, Material};
use crate::simulation::shape::{invert_inertia, sphere_volume, Shape};

/// How a body is allowed to move
#[derive(Debug, Clone, PartialEq)]
pub enum Restraint {
    Free,
    /// Ignores applied forces and never accelerates
    Fixed,
    /// Velocity only changes along these unit degrees of freedom
    Axes(Vec<NVec3>),
}

/// Rotational state carried by sphere and polyhedron bodies
#[derive(Debug, Clone, PartialEq)]
pub struct RigidState {
    pub angular_velocity: NVec3,     // body frame (roll, pitch, yaw rates)
    pub angular_acceleration: NVec3, // body frame
    net_torque: NVec3,               // torque accumulator, body frame
    inertia_tensor: Matrix3<f64>,
    inertia_tensor_inv: Matrix3<f64>,
    density: f64,
    material: Option<Material>,
}

impl RigidState {
    fn new(shape: &Shape, mass: f64) -> Self {
        let mut rigid = Self {
            angular_velocity: NVec3::zeros(),
            angular_acceleration: NVec3::zeros(),
            net_torque: NVec3::zeros(),
            inertia_tensor: Matrix3::zeros(),
            inertia_tensor_inv: Matrix3::zeros(),
            density: 0.0,
            material: None,
        };
        rigid.refresh(shape, mass);
        rigid
    }

    /// Recompute density and inertia after mass or shape changed
    fn refresh(&mut self, shape: &Shape, mass: f64) {
        self.density = mass / shape.volume();
        self.inertia_tensor = shape.inertia_tensor(mass);
        self.inertia_tensor_inv = invert_inertia(&self.inertia_tensor);
    }

    pub fn net_torque(&self) -> &NVec3 {
        &self.net_torque
    }

    pub fn inertia_tensor(&self) -> &Matrix3<f64> {
        &self.inertia_tensor
    }

    pub fn inertia_tensor_inv(&self) -> &Matrix3<f64> {
        &self.inertia_tensor_inv
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn material(&self) -> Option<Material> {
        self.material
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,            // display only
    pub color: Color,            // display only
    pub position: NVec3,         // m
    pub velocity: NVec3,         // m/s
    pub acceleration: NVec3,     // m/s^2
    net_force: NVec3,            // N, reset every tick
    mass: f64,                   // kg
    charge: f64,                 // C
    orientation: Orientation,
    shape: Shape,
    rigid: Option<RigidState>,   // Some exactly when the shape is rigid
    restraint: Restraint,
}

impl Body {
    fn build(mass: f64, shape: Shape, position: Option<NVec3>, velocity: Option<NVec3>) -> Self {
        let rigid = shape.is_rigid().then(|| RigidState::new(&shape, mass));
        Self {
            name: "unnamed".to_string(),
            color: Color::default(),
            position: position.unwrap_or_else(NVec3::zeros),
            velocity: velocity.unwrap_or_else(NVec3::zeros),
            acceleration: NVec3::zeros(),
            net_force: NVec3::zeros(),
            mass,
            charge: 0.0,
            orientation: Orientation::new(),
            shape,
            rigid,
            restraint: Restraint::Free,
        }
    }

    /// Point particle. `None` position/velocity means the zero vector.
    pub fn particle(mass: f64, charge: f64, position: Option<NVec3>, velocity: Option<NVec3>) -> Self {
        let mut body = Self::build(mass, Shape::Point, position, velocity);
        body.charge = charge;
        body
    }

    /// Solid sphere with uniform density
    pub fn sphere(mass: f64, radius: f64, position: Option<NVec3>, velocity: Option<NVec3>) -> Result<Self> {
        if radius < 0.0 {
            return Err(PhysicsError::NegativeRadius(radius));
        }
        Ok(Self::sphere_unchecked(mass, radius, position, velocity))
    }

    /// For radii known to be non-negative (catalog constants)
    pub(crate) fn sphere_unchecked(mass: f64, radius: f64, position: Option<NVec3>, velocity: Option<NVec3>) -> Self {
        debug_assert!(radius >= 0.0);
        Self::build(mass, Shape::Sphere { radius }, position, velocity)
    }

    /// Rigid polyhedron. Its vertices are taken as body-local coordinates
    /// around the body's position.
    pub fn poly(mass: f64, body: Polyhedron, position: Option<NVec3>, velocity: Option<NVec3>) -> Self {
        Self::build(mass, Shape::Polyhedron(body), position, velocity)
    }

    /// Particle that ignores every force (a pendulum fulcrum, a mesh pole,
    /// the eye of a moving vortex). It keeps whatever `velocity` it is given.
    pub fn fixed_point(mass: f64, position: Option<NVec3>, velocity: Option<NVec3>) -> Self {
        let mut body = Self::build(mass, Shape::Point, position, velocity);
        body.restraint = Restraint::Fixed;
        body
    }

    /// Particle free to move only along `dofs`. The axes are copied and
    /// normalized; none of them may be zero.
    pub fn restrained(mass: f64, charge: f64, position: Option<NVec3>, velocity: Option<NVec3>, dofs: &[NVec3]) -> Self {
        let mut body = Self::particle(mass, charge, position, velocity);
        body.restraint = Restraint::Axes(dofs.iter().map(|n| n.normalize()).collect());
        body
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    // =====================================================================================
    // accessors
    // =====================================================================================

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn net_force(&self) -> &NVec3 {
        &self.net_force
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rigid(&self) -> Option<&RigidState> {
        self.rigid.as_ref()
    }

    pub fn restraint(&self) -> &Restraint {
        &self.restraint
    }

    pub fn is_rigid(&self) -> bool {
        self.rigid.is_some()
    }

    pub fn radius(&self) -> f64 {
        self.shape.radius()
    }

    pub fn volume(&self) -> f64 {
        self.shape.volume()
    }

    /// Projected area seen along a world-space `axis`
    pub fn cross_section(&self, axis: &NVec3) -> f64 {
        self.shape.cross_section(&self.orientation.to_local(axis))
    }

    pub fn angular_velocity(&self) -> NVec3 {
        self.rigid.as_ref().map_or_else(NVec3::zeros, |r| r.angular_velocity)
    }

    pub fn net_torque(&self) -> NVec3 {
        self.rigid.as_ref().map_or_else(NVec3::zeros, |r| r.net_torque)
    }

    pub fn inertia_tensor(&self) -> Option<&Matrix3<f64>> {
        self.rigid.as_ref().map(|r| &r.inertia_tensor)
    }

    pub fn density(&self) -> Option<f64> {
        self.rigid.as_ref().map(|r| r.density)
    }

    pub fn material(&self) -> Option<Material> {
        self.rigid.as_ref().and_then(|r| r.material)
    }

    /// World-space vertices of a polyhedron body
    pub fn world_vertices(&self) -> Vec<NVec3> {
        match &self.shape {
            Shape::Polyhedron(p) => p
                .vertices()
                .iter()
                .map(|v| self.position + self.orientation.to_world(v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `pos` relative to this body, expressed in the body's own axes
    pub fn position_in_body_frame(&self, pos: &NVec3) -> NVec3 {
        let mut rel = pos - self.position;
        rel.set_basis(&self.orientation);
        rel
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    /// Translational plus rotational kinetic energy
    pub fn kinetic_energy(&self) -> f64 {
        let linear = 0.5 * self.mass * self.velocity.norm_squared();
        let angular = self.rigid.as_ref().map_or(0.0, |r| {
            0.5 * r.angular_velocity.dot(&(r.inertia_tensor * r.angular_velocity))
        });
        linear + angular
    }

    // =====================================================================================
    // mutation of physical properties
    // =====================================================================================

    /// Set the mass. Rigid bodies keep their volume, so density and the
    /// inertia tensor are recomputed.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.refresh(&self.shape, mass);
        }
    }

    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    /// Resize a sphere, keeping its mass
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        if radius < 0.0 {
            return Err(PhysicsError::NegativeRadius(radius));
        }
        match &mut self.shape {
            Shape::Sphere { radius: r } => *r = radius,
            _ => return Err(PhysicsError::UnsupportedShape("set_radius needs a sphere")),
        }
        self.refresh_rigid();
        Ok(())
    }

    /// Change density keeping volume: the mass follows
    pub fn set_density_preserve_volume(&mut self, density: f64) {
        if self.rigid.is_none() {
            return;
        }
        self.mass = self.shape.volume() * density;
        self.refresh_rigid();
    }

    /// Change density keeping mass: the body grows or shrinks to the new
    /// volume. Polyhedra are scaled uniformly about their origin.
    pub fn set_density_preserve_mass(&mut self, density: f64) {
        let volume = self.mass / density;
        match &mut self.shape {
            Shape::Point => return,
            Shape::Sphere { radius } => *radius = (volume / sphere_volume(1.0)).cbrt(),
            Shape::Polyhedron(p) => {
                let factor = (volume / p.volume()).cbrt();
                p.scale(factor);
            }
        }
        self.refresh_rigid();
    }

    /// Take on a material's density (keeping mass) and color
    pub fn set_material(&mut self, material: Option<Material>) {
        let Some(mat) = material else {
            if let Some(rigid) = self.rigid.as_mut() {
                rigid.material = None;
            }
            return;
        };
        if self.rigid.is_none() {
            return;
        }
        self.set_density_preserve_mass(mat.density());
        self.color = mat.color();
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.material = Some(mat);
        }
    }

    fn refresh_rigid(&mut self) {
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.refresh(&self.shape, self.mass);
        }
    }

    // =====================================================================================
    // per-tick contract
    // =====================================================================================

    /// Add `force` (N) to the accumulator. Fixed bodies ignore it.
    pub fn apply_force(&mut self, force: &NVec3) {
        if self.restraint != Restraint::Fixed {
            self.net_force += force;
        }
    }

    /// Add `torque` (N·m, body frame). Point particles ignore it.
    pub fn apply_torque(&mut self, torque: &NVec3) {
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.net_torque += torque;
        }
    }

    /// Reset the force and torque accumulators
    pub fn zero_force(&mut self) {
        self.net_force = NVec3::zeros();
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.net_torque = NVec3::zeros();
        }
    }

    /// a = F / m, α = I⁻¹ τ
    pub fn update_accelerations(&mut self) {
        if self.restraint == Restraint::Fixed {
            return;
        }
        self.acceleration = self.net_force / self.mass;
        if let Some(rigid) = self.rigid.as_mut() {
            rigid.angular_acceleration = rigid.inertia_tensor_inv * rigid.net_torque;
        }
    }

    /// v += a·dt (only along the allowed axes for restrained bodies)
    pub fn update_velocity(&mut self, dt: f64) {
        match &self.restraint {
            Restraint::Free => {
                self.velocity.translate_scaled(&self.acceleration, dt);
            }
            Restraint::Fixed => {}
            Restraint::Axes(dofs) => {
                for n in dofs {
                    self.velocity.translate_scaled(n, n.dot(&self.acceleration) * dt);
                }
            }
        }
        if let Some(rigid) = self.rigid.as_mut() {
            let alpha = rigid.angular_acceleration;
            rigid.angular_velocity.translate_scaled(&alpha, dt);
        }
    }

    /// x += v·dt using the already-updated velocity, then turn the body by
    /// ω·dt about its own roll, pitch and yaw axes.
    pub fn update_position(&mut self, dt: f64) {
        self.position.translate_scaled(&self.velocity, dt);

        let omega = self.angular_velocity();
        if omega == NVec3::zeros() {
            return;
        }
        let o = &self.orientation;
        let rot = Quaternion::compose_axis_rotations(&[
            (omega.x * dt, *o.x_axis()),
            (omega.y * dt, *o.y_axis()),
            (omega.z * dt, *o.z_axis()),
        ]);
        self.rotate(&rot);
    }

    pub fn rotate(&mut self, q: &Quaternion) {
        self.orientation.rotate(q);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;

    #[test]
    fn none_vectors_default_to_zero() {
        let p = Body::particle(1.0, 0.0, None, None);
        assert_eq!(p.position, NVec3::zeros());
        assert_eq!(p.velocity, NVec3::zeros());
        assert!(!p.is_rigid());
        assert_eq!(p.cross_section(&vec3(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn negative_radius_rejected() {
        assert_eq!(
            Body::sphere(1.0, -1.0, None, None).unwrap_err(),
            PhysicsError::NegativeRadius(-1.0)
        );
        let mut s = Body::sphere(1.0, 1.0, None, None).unwrap();
        assert!(s.set_radius(-0.5).is_err());
        assert_eq!(s.radius(), 1.0);
    }

    #[test]
    fn set_mass_recomputes_density_and_inertia() {
        let mut s = Body::sphere(1.0, 1.0, None, None).unwrap();
        s.set_mass(2.0);
        assert!((s.density().unwrap() - 2.0 / sphere_volume(1.0)).abs() < 1e-12);
        assert_eq!(s.inertia_tensor().unwrap()[(0, 0)], 0.4 * 2.0 * 1.0 * 1.0);
    }

    #[test]
    fn density_preserving_mass_resizes_sphere() {
        let mut s = Body::sphere(1000.0, 1.0, None, None).unwrap();
        s.set_density_preserve_mass(1000.0 / sphere_volume(2.0));
        assert!((s.radius() - 2.0).abs() < 1e-9);
        assert_eq!(s.mass(), 1000.0);
    }

    #[test]
    fn density_preserving_mass_scales_polyhedron() {
        let mut b = Body::poly(8.0, Polyhedron::cuboid(1.0, 1.0, 1.0), None, None);
        b.set_density_preserve_mass(1.0);
        assert!((b.volume() - 8.0).abs() < 1e-9, "got {}", b.volume());
    }

    #[test]
    fn density_preserving_volume_changes_mass() {
        let mut b = Body::poly(1.0, Polyhedron::cuboid(1.0, 2.0, 3.0), None, None);
        b.set_density_preserve_volume(10.0);
        assert!((b.mass() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn material_sets_density_and_color() {
        let mut s = Body::sphere(2700.0, 0.5, None, None).unwrap();
        s.set_material(Some(Material::Aluminum));
        assert!((s.density().unwrap() - 2700.0).abs() < 1e-9);
        assert!((s.volume() - 1.0).abs() < 1e-9);
        assert_eq!(s.color, Material::Aluminum.color());
        assert_eq!(s.material(), Some(Material::Aluminum));
    }

    #[test]
    fn fixed_point_ignores_forces() {
        let mut f = Body::fixed_point(1.0, Some(vec3(0.0, 1.0, 0.0)), None);
        f.apply_force(&vec3(10.0, 0.0, 0.0));
        f.update_accelerations();
        f.update_velocity(1.0);
        f.update_position(1.0);
        assert_eq!(f.position, vec3(0.0, 1.0, 0.0));
        assert_eq!(*f.net_force(), NVec3::zeros());
    }

    #[test]
    fn restrained_particle_moves_along_dof_only() {
        let mut r = Body::restrained(1.0, 0.0, None, None, &[vec3(0.0, 0.0, 3.0)]);
        r.apply_force(&vec3(1.0, 1.0, 2.0));
        r.update_accelerations();
        r.update_velocity(0.5);
        assert!((r.velocity - vec3(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn torque_spins_sphere() {
        let mut s = Body::sphere(5.0, 1.0, None, None).unwrap();
        s.apply_torque(&vec3(0.0, 0.0, 2.0)); // I = 2, so α = 1 rad/s²
        s.update_accelerations();
        s.update_velocity(1.0);
        assert!((s.angular_velocity() - vec3(0.0, 0.0, 1.0)).norm() < 1e-12);

        s.update_position(std::f64::consts::FRAC_PI_2);
        assert!((s.orientation().x_axis() - vec3(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn particles_ignore_torque() {
        let mut p = Body::particle(1.0, 0.0, None, None);
        p.apply_torque(&vec3(1.0, 0.0, 0.0));
        assert_eq!(p.net_torque(), NVec3::zeros());
    }

    #[test]
    fn body_frame_position() {
        let mut b = Body::sphere(1.0, 1.0, Some(vec3(1.0, 0.0, 0.0)), None).unwrap();
        b.rotate(&Quaternion::rotation(std::f64::consts::FRAC_PI_2, &vec3(0.0, 0.0, 1.0)));
        let local = b.position_in_body_frame(&vec3(1.0, 2.0, 0.0));
        assert!((local - vec3(2.0, 0.0, 0.0)).norm() < 1e-12, "got {local:?}");
    }
}
