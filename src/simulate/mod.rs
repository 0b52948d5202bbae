//! Simulate Module - Hourly What-If Projection

pub mod engine;

// Re-export common types
pub use engine::{simulate_flood, SimulationFrame, DEFAULT_SIMULATION_HOURS, PRESSURE_STEP_HPA};
