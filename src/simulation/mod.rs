pub mod states;
pub mod params;
pub mod engine;
pub mod kernels;
pub mod pool;
pub mod density;
pub mod forces;
pub mod integrator;
pub mod grid;
pub mod scenario;
