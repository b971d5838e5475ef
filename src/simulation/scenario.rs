//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`, `SphParameters`)
//! - the particle pool with its emitter
//! - active force set (`ForceSet`)
//! - the star and, optionally, the spacetime grid
//!
//! The scenario plays the caller's role from the core's point of view: it
//! rebuilds the body list every tick and feeds the pool's aggregate back in.

use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::grid::SpacetimeGrid;
use crate::simulation::integrator::{sph_step, TickInput, TickStats};
use crate::simulation::params::{EmitterParameters, Parameters, SphParameters};
use crate::simulation::pool::ParticlePool;
use crate::simulation::states::{GravitationalBody, NVec3, NVec4, RenderParticle};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub sph: SphParameters,
    pub pool: ParticlePool,
    pub forces: ForceSet,
    pub star: GravitationalBody,
    pub grid: Option<SpacetimeGrid>,
    pub t: f64, // simulated time
    pub ticks: u64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            seed: p_cfg.seed,
            softening: p_cfg.softening,
            G: p_cfg.G,
        };

        let sph = SphParameters {
            h: cfg.sph.h,
            gas_constant: cfg.sph.gas_constant,
            rest_density: cfg.sph.rest_density,
            viscosity: cfg.sph.viscosity,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            capacity: e_cfg.capacity,
            spawn_per_tick: e_cfg.spawn_per_tick,
            parallel: e_cfg.parallel,
            swarm_self_gravity: e_cfg.swarm_self_gravity,
            swarm_mass_threshold: e_cfg.swarm_mass_threshold,
        };

        let em = cfg.emitter;
        let emitter = EmitterParameters {
            spawn_radius: em.spawn_radius,
            jet_speed: em.jet_speed,
            perturbation: em.perturbation,
            initial_life: em.initial_life,
            mass: em.mass,
            color_pos: NVec4::from(em.color_pos),
            color_neg: NVec4::from(em.color_neg),
        };

        let pool = ParticlePool::new(engine.capacity, emitter, parameters.seed);
        let forces = ForceSet::sph_with_gravity(&sph, parameters.softening);
        let star = GravitationalBody::new(NVec3::from(cfg.star.x), cfg.star.mu);

        let g_cfg = cfg.grid;
        let grid = g_cfg.enabled.then(|| {
            SpacetimeGrid::new(
                g_cfg.size,
                g_cfg.scale,
                g_cfg.smoothing,
                g_cfg.visual_scale,
                parameters.softening,
            )
        });

        Self {
            engine,
            parameters,
            sph,
            pool,
            forces,
            star,
            grid,
            t: 0.0,
            ticks: 0,
        }
    }

    /// Body list for the next tick: the star, plus the swarm aggregate when
    /// enabled and heavier than the threshold (an empty pool must not attract
    /// itself).
    pub fn bodies(&self) -> Vec<GravitationalBody> {
        let mut bodies = vec![self.star];
        let aggregate = self.pool.aggregate();
        if self.engine.swarm_self_gravity && aggregate.total_mass > self.engine.swarm_mass_threshold {
            bodies.push(aggregate.as_body(self.parameters.G));
        }
        bodies
    }

    /// Advance by the configured fixed step `h0`
    pub fn step(&mut self) -> TickStats {
        self.step_dt(self.parameters.h0)
    }

    /// Advance by an externally timed `dt`
    pub fn step_dt(&mut self, dt: f64) -> TickStats {
        let bodies = self.bodies();

        let stats = sph_step(
            &mut self.pool,
            &self.forces,
            &self.sph,
            TickInput {
                dt,
                bodies: &bodies,
                spawn_count: self.engine.spawn_per_tick,
                origin: self.star.x,
            },
            self.engine.parallel,
        );

        if let Some(grid) = self.grid.as_mut() {
            grid.deform(&bodies);
        }

        self.t += dt;
        self.ticks += 1;
        stats
    }

    /// Number of fixed steps needed to reach `t_end`
    pub fn planned_ticks(&self) -> u64 {
        (self.parameters.t_end / self.parameters.h0).ceil() as u64
    }

    /// Run `ticks` fixed steps, logging a summary every `log_every` ticks
    pub fn run(&mut self, ticks: u64, log_every: u64) -> TickStats {
        info!(
            "running {} ticks: capacity {}, spawn {}/tick, parallel {}",
            ticks, self.engine.capacity, self.engine.spawn_per_tick, self.engine.parallel
        );

        let mut last = TickStats {
            spawned: 0,
            spawn_failures: 0,
            live: self.pool.live_count(),
            total_mass: self.pool.aggregate().total_mass,
            center_of_mass: self.pool.aggregate().center_of_mass,
            max_density: 0.0,
        };

        for _ in 0..ticks {
            last = self.step();
            if log_every > 0 && self.ticks % log_every == 0 {
                let com = last.center_of_mass;
                info!(
                    "t = {:.3}: live {}, mass {:.2}, com ({:.3}, {:.3}, {:.3}), max density {:.4}",
                    self.t, last.live, last.total_mass, com.x, com.y, com.z, last.max_density
                );
            }
        }

        info!(
            "finished at t = {:.3} after {} ticks, {} spawn requests skipped in total",
            self.t,
            self.ticks,
            self.pool.spawn_failures()
        );
        last
    }

    /// Live particles for a renderer
    pub fn render_snapshot(&self) -> Vec<RenderParticle> {
        self.pool.render_snapshot()
    }
}
