pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Particle, GravitationalBody, Aggregate, RenderParticle, NVec3, NVec4};
pub use simulation::params::{Parameters, SphParameters, EmitterParameters};
pub use simulation::pool::ParticlePool;
pub use simulation::forces::{ForceSet, ForceTerm, ForceContext, SphPressure, SphViscosity, ExternalGravity};
pub use simulation::density::density_pressure_pass;
pub use simulation::integrator::{euler_integrator, sph_step, TickInput, TickStats};
pub use simulation::grid::SpacetimeGrid;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, EngineConfig, ParametersConfig, SphConfig, EmitterConfig, StarConfig, GridConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_density, bench_tick_curve};
