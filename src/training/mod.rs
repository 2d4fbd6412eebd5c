//! Training infrastructure: step environment, learning loop orchestration,
//! match simulation, and metrics collection.

pub mod environment;
pub mod episode;
pub mod metrics;
pub mod trainer;
