//! High-level runtime engine settings
//!
//! Selects parallel passes, spawn rate and whether the swarm's own
//! aggregate is fed back as an attractor.

#[derive(Debug, Clone)]
pub struct Engine {
    pub capacity: usize, // fixed pool size
    pub spawn_per_tick: usize, // particles requested every tick
    pub parallel: bool, // false = sequential passes, true = rayon
    pub swarm_self_gravity: bool, // add the pool aggregate to the body list
    pub swarm_mass_threshold: f64, // aggregate only counts above this mass
}
