//! Force contributors for the particle pool
//!
//! Each term implements [`ForceTerm`] and a [`ForceSet`] sums them per
//! particle: SPH pressure gradient, SPH viscosity, and gravity from the
//! external bodies handed in for the current tick.

use rayon::prelude::*;

use crate::simulation::kernels::{spiky_gradient, viscosity_laplacian};
use crate::simulation::params::SphParameters;
use crate::simulation::states::{GravitationalBody, NVec3, Particle};

/// Read-only view of one tick: the pool after the density pass plus the
/// borrowed body list. Nothing here outlives the tick.
pub struct ForceContext<'a> {
    pub particles: &'a [Particle],
    pub bodies: &'a [GravitationalBody],
}

/// Trait for force sources.
/// `force_on` is only called for live particles and returns that term's
/// contribution to particle `i`.
pub trait ForceTerm {
    fn force_on(&self, i: usize, ctx: &ForceContext) -> NVec3;
}

/// Collection of force terms summed into one force per particle
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// The full SPH + gravity set used by scenarios
    pub fn sph_with_gravity(sph: &SphParameters, softening: f64) -> Self {
        Self::new()
            .with(SphPressure::new(sph))
            .with(SphViscosity::new(sph))
            .with(ExternalGravity { softening })
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceTerm + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total force on particle `i`, zero for dead particles
    pub fn total_force(&self, i: usize, ctx: &ForceContext) -> NVec3 {
        if !ctx.particles[i].is_alive() {
            return NVec3::zeros();
        }
        let mut f = NVec3::zeros();
        for term in &self.terms {
            f += term.force_on(i, ctx);
        }
        f
    }

    /// Compute forces for every particle into `out` (same length as the pool).
    /// Reads only from `ctx`, so the parallel path gives identical results.
    pub fn accumulate_forces(&self, ctx: &ForceContext, out: &mut [NVec3], parallel: bool) {
        if parallel {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, f)| *f = self.total_force(i, ctx));
        } else {
            for (i, f) in out.iter_mut().enumerate() {
                *f = self.total_force(i, ctx);
            }
        }
    }

    /// Run the force pass and store the result in each particle's `force`
    pub fn apply(&self, particles: &mut [Particle], bodies: &[GravitationalBody], parallel: bool) {
        let mut out = vec![NVec3::zeros(); particles.len()];
        {
            let ctx = ForceContext {
                particles: &*particles,
                bodies,
            };
            self.accumulate_forces(&ctx, &mut out, parallel);
        }
        for (p, f) in particles.iter_mut().zip(out) {
            p.force = f;
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Pressure gradient via the Spiky kernel.
///
/// For each live neighbour `j != i` within `h`:
/// `-dir(x_i - x_j) * m_i * (p_i + p_j) / (2 ρ_j) * spiky(h - r)²`.
/// Neighbours with zero density, or sitting exactly on `i`, contribute nothing.
pub struct SphPressure {
    pub h: f64,
    pub spiky_coeff: f64,
}

impl SphPressure {
    pub fn new(sph: &SphParameters) -> Self {
        Self {
            h: sph.h,
            spiky_coeff: sph.spiky_gradient_coefficient(),
        }
    }
}

impl ForceTerm for SphPressure {
    fn force_on(&self, i: usize, ctx: &ForceContext) -> NVec3 {
        let pi = &ctx.particles[i];
        let mut f = NVec3::zeros();

        for (j, pj) in ctx.particles.iter().enumerate() {
            if j == i || !pj.is_alive() || pj.density == 0.0 {
                continue;
            }
            let rij = pi.x - pj.x;
            let r = rij.norm();
            if r >= self.h {
                continue;
            }
            // coincident particles have no direction to push along
            let Some(dir) = rij.try_normalize(0.0) else {
                continue;
            };

            let shared = (pi.pressure + pj.pressure) / (2.0 * pj.density);
            f += -dir * pi.m * shared * spiky_gradient(r, self.h, self.spiky_coeff);
        }
        f
    }
}

/// Viscosity via the Laplacian of the viscosity kernel.
///
/// For each live neighbour `j != i` within `h`:
/// `μ * m_j * (v_j - v_i) / ρ_j * lap(h - r)`. Zero-density neighbours skipped.
pub struct SphViscosity {
    pub h: f64,
    pub viscosity: f64,
    pub laplacian_coeff: f64,
}

impl SphViscosity {
    pub fn new(sph: &SphParameters) -> Self {
        Self {
            h: sph.h,
            viscosity: sph.viscosity,
            laplacian_coeff: sph.viscosity_laplacian_coefficient(),
        }
    }
}

impl ForceTerm for SphViscosity {
    fn force_on(&self, i: usize, ctx: &ForceContext) -> NVec3 {
        let pi = &ctx.particles[i];
        let mut f = NVec3::zeros();

        for (j, pj) in ctx.particles.iter().enumerate() {
            if j == i || !pj.is_alive() || pj.density == 0.0 {
                continue;
            }
            let r = (pi.x - pj.x).norm();
            if r >= self.h {
                continue;
            }
            let lap = viscosity_laplacian(r, self.h, self.laplacian_coeff);
            f += self.viscosity * pj.m * (pj.v - pi.v) / pj.density * lap;
        }
        f
    }
}

/// Softened Newtonian pull toward every external body:
/// `dir(body - x) * μ_body * m / (|body - x|² + softening²)`.
/// A body exactly at the particle position contributes nothing.
pub struct ExternalGravity {
    pub softening: f64,
}

impl ForceTerm for ExternalGravity {
    fn force_on(&self, i: usize, ctx: &ForceContext) -> NVec3 {
        let p = &ctx.particles[i];
        let soft2 = self.softening * self.softening;
        let mut f = NVec3::zeros();

        for body in ctx.bodies {
            let r = body.x - p.x;
            let Some(dir) = r.try_normalize(0.0) else {
                continue;
            };
            let d2 = r.norm_squared();
            f += dir * (body.mu * p.m) / (d2 + soft2);
        }
        f
    }
}
