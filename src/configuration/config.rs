//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – pool capacity, spawn rate, parallel passes, swarm feedback
//! - [`ParametersConfig`] – step size, run length, seed, softening, `G`
//! - [`SphConfig`]        – smoothing radius and fluid equation of state
//! - [`EmitterConfig`]    – jet respawn policy
//! - [`StarConfig`]       – the primary attractor
//! - [`GridConfig`]       – spacetime grid deformation
//!
//! Every section and field falls back to a default, so partial files work.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   capacity: 5000
//!   spawn_per_tick: 5
//!   parallel: true
//!   swarm_self_gravity: true
//!   swarm_mass_threshold: 0.1
//!
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   h0: 0.0166667           # fixed step size
//!   seed: 42                # emitter seed
//!   softening: 0.5
//!   G: 0.01                 # applied to the swarm aggregate
//!
//! sph:
//!   h: 1.0
//!   gas_constant: 2.0
//!   rest_density: 1.0
//!   viscosity: 0.25
//!
//! emitter:
//!   spawn_radius: 1.2
//!   jet_speed: 3.0
//!   perturbation: 0.3
//!   initial_life: 8.0
//!   mass: 1.0
//!   color_pos: [1.0, 0.45, 0.2, 1.0]
//!   color_neg: [0.25, 0.5, 1.0, 1.0]
//!
//! star:
//!   x: [0.0, 1.0, 0.0]
//!   mu: 50.0
//!
//! grid:
//!   enabled: true
//!   size: 100
//!   scale: 0.5
//!   smoothing: 0.08
//!   visual_scale: 0.02
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// Engine-level switches
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub capacity: usize, // fixed particle pool size
    pub spawn_per_tick: usize, // particles requested every tick
    pub parallel: bool, // run density/force passes with rayon
    pub swarm_self_gravity: bool, // feed the swarm aggregate back as a body
    pub swarm_mass_threshold: f64, // aggregate ignored at or below this mass
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 5000,
            spawn_per_tick: 5,
            parallel: true,
            swarm_self_gravity: true,
            swarm_mass_threshold: 0.1,
        }
    }
}

/// Global numerical and physical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64, // time step size
    pub seed: u64, // deterministic seed to make runs reproducible
    pub softening: f64, // prevents singular forces at very small separations
    pub G: f64, // gravitational constant for the swarm aggregate
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: 10.0,
            h0: 1.0 / 60.0,
            seed: 42,
            softening: 0.5,
            G: 0.01,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SphConfig {
    pub h: f64, // smoothing radius
    pub gas_constant: f64,
    pub rest_density: f64,
    pub viscosity: f64,
}

impl Default for SphConfig {
    fn default() -> Self {
        Self {
            h: 1.0,
            gas_constant: 2.0,
            rest_density: 1.0,
            viscosity: 0.25,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EmitterConfig {
    pub spawn_radius: f64,
    pub jet_speed: f64,
    pub perturbation: f64,
    pub initial_life: f64,
    pub mass: f64,
    pub color_pos: [f64; 4], // reddish, +X jet
    pub color_neg: [f64; 4], // blueish, -X jet
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            spawn_radius: 1.2,
            jet_speed: 3.0,
            perturbation: 0.3,
            initial_life: 8.0,
            mass: 1.0,
            color_pos: [1.0, 0.45, 0.2, 1.0],
            color_neg: [0.25, 0.5, 1.0, 1.0],
        }
    }
}

/// The primary attractor; particles are emitted from its position
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StarConfig {
    pub x: [f64; 3], // position
    pub mu: f64, // gravitational parameter G * M
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            x: [0.0, 1.0, 0.0],
            mu: 50.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub size: usize, // cells per side
    pub scale: f64, // vertex spacing
    pub smoothing: f64, // relaxation fraction per tick
    pub visual_scale: f64, // potential -> height
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 100,
            scale: 0.5,
            smoothing: 0.08,
            visual_scale: 0.02,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub sph: SphConfig,
    pub emitter: EmitterConfig,
    pub star: StarConfig,
    pub grid: GridConfig,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes as null, which means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.engine.capacity == 0 {
            return fail("engine.capacity must be at least 1");
        }
        if self.engine.swarm_mass_threshold < 0.0 {
            return fail("engine.swarm_mass_threshold must be non-negative");
        }
        if !(self.parameters.h0 > 0.0) {
            return fail("parameters.h0 must be positive");
        }
        if !(self.parameters.t_end >= 0.0) {
            return fail("parameters.t_end must be non-negative");
        }
        if self.parameters.softening < 0.0 {
            return fail("parameters.softening must be non-negative");
        }
        if !(self.sph.h > 0.0) {
            return fail("sph.h must be positive");
        }
        if self.sph.viscosity < 0.0 {
            return fail("sph.viscosity must be non-negative");
        }
        if !(self.emitter.initial_life > 0.0) {
            return fail("emitter.initial_life must be positive");
        }
        if !(self.emitter.mass > 0.0) {
            return fail("emitter.mass must be positive");
        }
        if !(0.0..1.0).contains(&self.emitter.perturbation) {
            return fail("emitter.perturbation must be in [0, 1)");
        }
        if self.grid.enabled && !(self.grid.smoothing > 0.0 && self.grid.smoothing <= 1.0) {
            return fail("grid.smoothing must be in (0, 1]");
        }
        Ok(())
    }
}
