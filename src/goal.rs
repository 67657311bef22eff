//! # Goal Module
//!
//! Goals are the agent's competing motivations: each names a set of belief
//! outcomes it wants true and carries a priority. The planner considers
//! candidate goals in descending priority order and plans for the first
//! one it can actually achieve.
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use praxis::{Belief, Goal};
//!
//! let fire_lit = Arc::new(Belief::new("fire_lit", || false));
//!
//! let keep_warm = Goal::builder("keep_warm")
//!     .priority(5.0)
//!     .desired_effect(fire_lit)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(keep_warm.name(), "keep_warm");
//! assert_eq!(keep_warm.priority(), 5.0);
//! assert!(!keep_warm.is_satisfied());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::belief::Belief;
use crate::error::{PraxisError, Result};

/// A named, prioritized set of desired belief outcomes.
///
/// Like beliefs, goals are identified by name: two goals compare equal iff
/// their names match. Priority is a mutable cell the owning system may edit
/// at any time; the planner reads the current value when it sorts
/// candidates.
pub struct Goal {
    /// The name of the goal
    name: String,
    /// Current priority, stored as `f32` bits (higher = more urgent)
    priority: AtomicU32,
    /// The beliefs this goal wants to be true
    desired_effects: HashSet<Arc<Belief>>,
}

impl Goal {
    /// Starts building a goal with the given name.
    ///
    /// The builder defaults to priority 1 and an empty desired-effect set
    /// (which must be filled before `build()` succeeds).
    pub fn builder(name: impl Into<String>) -> GoalBuilder {
        GoalBuilder::new(name)
    }

    /// Gets the name of the goal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current priority, read fresh on every call.
    pub fn priority(&self) -> f32 {
        f32::from_bits(self.priority.load(Ordering::Relaxed))
    }

    /// Re-prioritizes the goal. Values below zero are clamped to zero.
    pub fn set_priority(&self, priority: f32) {
        self.priority
            .store(priority.max(0.0).to_bits(), Ordering::Relaxed);
    }

    /// The beliefs this goal wants to be true.
    pub fn desired_effects(&self) -> &HashSet<Arc<Belief>> {
        &self.desired_effects
    }

    /// Whether every desired effect currently evaluates true.
    ///
    /// Satisfied goals are skipped by the planner; callers can also use
    /// this to pre-filter their candidate list.
    pub fn is_satisfied(&self) -> bool {
        self.desired_effects.iter().all(|b| b.evaluate())
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("name", &self.name)
            .field("priority", &self.priority())
            .field(
                "desired_effects",
                &self
                    .desired_effects
                    .iter()
                    .map(|b| b.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Goal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Goal {}

impl std::hash::Hash for Goal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Staged construction for [`Goal`], validated at [`GoalBuilder::build`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use praxis::{Belief, Goal, PraxisError};
///
/// // A goal with no desired effects is vacuously satisfied, so it is rejected.
/// let result = Goal::builder("nothing").build();
/// assert!(matches!(result, Err(PraxisError::GoalWithoutDesiredEffects(_))));
///
/// // Negative priority is rejected.
/// let safe = Arc::new(Belief::new("safe", || false));
/// let result = Goal::builder("flee").priority(-1.0).desired_effect(safe).build();
/// assert!(matches!(result, Err(PraxisError::InvalidGoalPriority)));
/// ```
pub struct GoalBuilder {
    name: String,
    priority: f32,
    desired_effects: HashSet<Arc<Belief>>,
}

impl GoalBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 1.0,
            desired_effects: HashSet::new(),
        }
    }

    /// Sets the goal's priority (higher = more urgent; default 1).
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a desired-effect belief. Duplicates (by name) collapse.
    pub fn desired_effect(mut self, belief: Arc<Belief>) -> Self {
        self.desired_effects.insert(belief);
        self
    }

    /// Validates the configuration and produces the goal.
    ///
    /// # Errors
    ///
    /// * [`PraxisError::InvalidGoalPriority`] if the priority is negative
    /// * [`PraxisError::GoalWithoutDesiredEffects`] if no desired effect
    ///   was added
    pub fn build(self) -> Result<Goal> {
        if self.priority < 0.0 {
            return Err(PraxisError::InvalidGoalPriority);
        }
        if self.desired_effects.is_empty() {
            return Err(PraxisError::GoalWithoutDesiredEffects(self.name));
        }
        Ok(Goal {
            name: self.name,
            priority: AtomicU32::new(self.priority.to_bits()),
            desired_effects: self.desired_effects,
        })
    }
}

/// An agent's set of goals, in insertion order (the planner's tie-break
/// order for equal priorities), with duplicate names rejected.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use praxis::{Belief, Goal, Goals};
///
/// let fed = Arc::new(Belief::new("fed", || false));
///
/// let mut goals = Goals::new();
/// goals
///     .add(Goal::builder("eat").priority(3.0).desired_effect(fed.clone()).build().unwrap())
///     .unwrap();
///
/// let result = goals.add(Goal::builder("eat").desired_effect(fed).build().unwrap());
/// assert!(result.is_err());
/// ```
#[derive(Default)]
pub struct Goals {
    goals: Vec<Arc<Goal>>,
}

impl Goals {
    /// Creates an empty goal set.
    pub fn new() -> Self {
        Self { goals: Vec::new() }
    }

    /// Adds a goal.
    ///
    /// # Returns
    ///
    /// A shared handle to the added goal.
    ///
    /// # Errors
    ///
    /// Returns [`PraxisError::GoalAlreadyInCollection`] if a goal with the
    /// same name is already present.
    pub fn add(&mut self, goal: Goal) -> Result<Arc<Goal>> {
        if self.goals.iter().any(|g| g.name() == goal.name()) {
            return Err(PraxisError::GoalAlreadyInCollection(goal.name().to_string()));
        }
        let goal = Arc::new(goal);
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Looks up a goal by name.
    pub fn get(&self, name: &str) -> Option<Arc<Goal>> {
        self.goals.iter().find(|g| g.name() == name).cloned()
    }

    /// The goals, in insertion order.
    pub fn as_slice(&self) -> &[Arc<Goal>] {
        &self.goals
    }

    /// The number of goals.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Iterates over the goals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Goal>> {
        self.goals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    fn belief(name: &str, value: bool) -> Arc<Belief> {
        Arc::new(Belief::new(name, move || value))
    }

    #[test]
    fn test_builder_defaults() {
        let goal = Goal::builder("idle")
            .desired_effect(belief("rested", false))
            .build()
            .unwrap();
        assert_eq!(goal.priority(), 1.0);
        assert_eq!(goal.desired_effects().len(), 1);
    }

    #[test]
    fn test_builder_rejects_negative_priority() {
        let result = Goal::builder("bad")
            .priority(-3.0)
            .desired_effect(belief("x", false))
            .build();
        assert!(matches!(result, Err(PraxisError::InvalidGoalPriority)));
    }

    #[test]
    fn test_builder_rejects_empty_desired_effects() {
        let result = Goal::builder("empty").build();
        assert!(matches!(
            result,
            Err(PraxisError::GoalWithoutDesiredEffects(name)) if name == "empty"
        ));
    }

    #[test]
    fn test_priority_cell() {
        let goal = Goal::builder("flee")
            .priority(2.0)
            .desired_effect(belief("safe", false))
            .build()
            .unwrap();
        goal.set_priority(9.0);
        assert_eq!(goal.priority(), 9.0);
        goal.set_priority(-1.0);
        assert_eq!(goal.priority(), 0.0);
    }

    #[test]
    fn test_is_satisfied_follows_world() {
        let flag = Arc::new(AtomicBool::new(false));
        let watched = flag.clone();
        let goal = Goal::builder("flag_goal")
            .desired_effect(Arc::new(Belief::new("flag", move || {
                watched.load(Ordering::Relaxed)
            })))
            .build()
            .unwrap();

        assert!(!goal.is_satisfied());
        flag.store(true, Ordering::Relaxed);
        assert!(goal.is_satisfied());
    }

    #[test]
    fn test_goal_identity_is_name() {
        let a = Goal::builder("same")
            .desired_effect(belief("x", false))
            .build()
            .unwrap();
        let b = Goal::builder("same")
            .priority(9.0)
            .desired_effect(belief("y", false))
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_collection_rejects_duplicates() {
        let mut goals = Goals::new();
        goals
            .add(Goal::builder("eat").desired_effect(belief("fed", false)).build().unwrap())
            .unwrap();
        let result =
            goals.add(Goal::builder("eat").desired_effect(belief("fed", false)).build().unwrap());
        assert!(matches!(
            result,
            Err(PraxisError::GoalAlreadyInCollection(name)) if name == "eat"
        ));
    }
}
