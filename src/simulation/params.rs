//! Numerical and physical parameters for the simulation
//!
//! - `Parameters`        step size, end time, seed, softening and `G`
//! - `SphParameters`     smoothing radius and the fluid equation of state
//! - `EmitterParameters` jet respawn policy constants

use std::f64::consts::PI;

use super::states::NVec4;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // step size
    pub seed: u64, // deterministic seed for the emitter
    pub softening: f64, // added (squared) to body distances
    pub G: f64, // gravitational constant, used for the swarm's own aggregate
}

#[derive(Debug, Clone)]
pub struct SphParameters {
    pub h: f64, // smoothing radius
    pub gas_constant: f64, // stiffness of the equation of state
    pub rest_density: f64,
    pub viscosity: f64, // viscosity coefficient
}

impl SphParameters {
    /// Poly6 normalization `315 / (64 π h⁹)`
    pub fn poly6_coefficient(&self) -> f64 {
        315.0 / (64.0 * PI * self.h.powi(9))
    }

    /// Spiky gradient constant `-45 / (π h⁶)`
    pub fn spiky_gradient_coefficient(&self) -> f64 {
        -45.0 / (PI * self.h.powi(6))
    }

    /// Viscosity Laplacian constant `45 / (π h⁶)`
    pub fn viscosity_laplacian_coefficient(&self) -> f64 {
        45.0 / (PI * self.h.powi(6))
    }

    /// Ideal-gas-like equation of state, negative below rest density
    #[inline]
    pub fn pressure(&self, density: f64) -> f64 {
        self.gas_constant * (density - self.rest_density)
    }
}

/// Bipolar jet emission. This is a visual policy, not a physical law:
/// successive respawns alternate between +X and -X.
#[derive(Debug, Clone)]
pub struct EmitterParameters {
    pub spawn_radius: f64, // distance from origin along the jet axis
    pub jet_speed: f64,
    pub perturbation: f64, // radius of the random velocity ball, < 1 keeps the jet sign
    pub initial_life: f64,
    pub mass: f64,
    pub color_pos: NVec4, // palette for +X
    pub color_neg: NVec4, // palette for -X
}
