//! Plan orchestrator - the bounded reasoning loop behind every chat turn

mod engine;
mod outcome;

pub use engine::PlannerEngine;
pub use outcome::TurnOutcome;
