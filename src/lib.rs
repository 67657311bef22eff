mod action;
mod belief;
mod error;
mod goal;
mod plan;
mod planner;
mod strategy;
mod visualizer;

pub use action::{Action, ActionBuilder, Actions};
pub use belief::{Belief, Beliefs, PerceptionSource};
pub use error::{PraxisError, Result};
pub use goal::{Goal, GoalBuilder, Goals};
pub use nalgebra::Point3;
pub use plan::Plan;
pub use planner::Planner;
pub use strategy::{ActionStrategy, FnStrategy, IdleStrategy, InstantStrategy};
pub use visualizer::PlanVisualizer;
