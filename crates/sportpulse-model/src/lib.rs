mod engine;
mod tree;

pub use engine::{DemandEngine, DemandModel, TrainedDemandModel};
