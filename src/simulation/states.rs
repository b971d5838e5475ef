//! Core state types for the particle simulation.
//!
//! - `Particle`          one slot of the fixed-capacity pool
//! - `GravitationalBody` an external attractor, rebuilt by the caller every tick
//! - `Aggregate`         pool-wide mass and center of mass
//! - `RenderParticle`    what a renderer needs from a live particle

use nalgebra::{Vector3, Vector4};
pub type NVec3 = Vector3<f64>;
pub type NVec4 = Vector4<f64>; // rgba

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub color: NVec4, // rgba, alpha follows remaining life
    pub life: f64, // remaining life, <= 0 means dead / free slot
    pub m: f64, // mass
    pub density: f64, // recomputed every tick
    pub pressure: f64, // recomputed every tick, may be negative
    pub force: NVec3, // accumulated force, recomputed every tick
}

impl Particle {
    /// A dead slot, as created at pool initialization
    pub fn dead() -> Self {
        Self {
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            color: NVec4::new(1.0, 1.0, 1.0, 1.0),
            life: 0.0,
            m: 0.0,
            density: 0.0,
            pressure: 0.0,
            force: NVec3::zeros(),
        }
    }

    /// Live particles take part in physics and rendering
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::dead()
    }
}

/// External mass source. `mu` is G * mass, so the force law needs one multiply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitationalBody {
    pub x: NVec3, // position
    pub mu: f64, // gravitational parameter
}

impl GravitationalBody {
    pub fn new(x: NVec3, mu: f64) -> Self {
        Self { x, mu }
    }
}

/// Total live mass and mass-weighted center of the pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub total_mass: f64,
    pub center_of_mass: NVec3,
}

impl Aggregate {
    pub fn empty() -> Self {
        Self {
            total_mass: 0.0,
            center_of_mass: NVec3::zeros(),
        }
    }

    /// Treat the whole swarm as one attractor with gravitational parameter `G * total_mass`
    pub fn as_body(&self, G: f64) -> GravitationalBody {
        GravitationalBody::new(self.center_of_mass, G * self.total_mass)
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParticle {
    pub position: NVec3,
    pub color: NVec4,
}
