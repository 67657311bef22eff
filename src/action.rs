//! # Action Module
//!
//! Actions are the units of change the planner sequences: each one names a
//! thing the agent can do, what must already be true for it (precondition
//! beliefs), what it makes true (effect beliefs), and what it costs.
//!
//! Actions are built through [`ActionBuilder`], which validates its fields,
//! and are shared by reference (`Arc`) between the agent's pool and any
//! plans that use them. An action owns no beliefs; it only references
//! beliefs owned by the agent's registry.
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use praxis::{Action, Belief};
//!
//! let has_axe = Arc::new(Belief::new("has_axe", || true));
//! let has_wood = Arc::new(Belief::new("has_wood", || false));
//!
//! let chop_wood = Action::builder("chop_wood")
//!     .cost(2.0)
//!     .precondition(has_axe.clone())
//!     .effect(has_wood.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(chop_wood.name(), "chop_wood");
//! assert_eq!(chop_wood.cost(), 2.0);
//! assert!(chop_wood.preconditions().contains(&has_axe));
//! assert!(chop_wood.effects().contains(&has_wood));
//! ```
//!
//! ## Dynamic costing
//!
//! Cost is a mutable cell read at search time, so a consumer holding only a
//! shared handle can re-cost an action between planning passes (say, from a
//! current risk estimate) and the next `plan()` call sees the new value:
//!
//! ```
//! use std::sync::Arc;
//! use praxis::{Action, Belief};
//!
//! let fed = Arc::new(Belief::new("fed", || false));
//! let hunt = Arc::new(
//!     Action::builder("hunt").effect(fed).build().unwrap(),
//! );
//!
//! assert_eq!(hunt.cost(), 1.0); // default
//! hunt.set_cost(6.5);
//! assert_eq!(hunt.cost(), 6.5);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::belief::Belief;
use crate::error::{PraxisError, Result};
use crate::strategy::{ActionStrategy, InstantStrategy};

/// A named, costed unit of change with precondition and effect belief sets.
///
/// The planner reads `name`, `cost`, `preconditions` and `effects`; the
/// execution hooks ([`Action::start`], [`Action::update`], [`Action::stop`],
/// [`Action::can_perform`], [`Action::is_complete`]) delegate to the
/// [`ActionStrategy`] chosen at build time and are only ever driven by the
/// execution consumer.
pub struct Action {
    /// The name of the action
    name: String,
    /// Current cost, stored as `f32` bits so shared handles can re-cost it
    cost: AtomicU32,
    /// Beliefs that must hold before this action can run
    preconditions: HashSet<Arc<Belief>>,
    /// Beliefs this action is expected to make true
    effects: HashSet<Arc<Belief>>,
    /// How the action does its work, frame by frame
    strategy: Mutex<Box<dyn ActionStrategy>>,
}

impl Action {
    /// Starts building an action with the given name.
    ///
    /// The builder defaults to cost 1, empty precondition set, empty effect
    /// set, and an [`InstantStrategy`].
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    /// Gets the name of the action.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current cost of the action, read fresh on every call.
    pub fn cost(&self) -> f32 {
        f32::from_bits(self.cost.load(Ordering::Relaxed))
    }

    /// Re-costs the action. Values below zero are clamped to zero so a
    /// shared handle can never inject a negative cost mid-flight.
    pub fn set_cost(&self, cost: f32) {
        self.cost.store(cost.max(0.0).to_bits(), Ordering::Relaxed);
    }

    /// The beliefs that must hold before this action can run.
    pub fn preconditions(&self) -> &HashSet<Arc<Belief>> {
        &self.preconditions
    }

    /// The beliefs this action is expected to make true once performed.
    pub fn effects(&self) -> &HashSet<Arc<Belief>> {
        &self.effects
    }

    /// Whether the strategy reports the action as currently performable.
    pub fn can_perform(&self) -> bool {
        self.strategy().can_perform()
    }

    /// Whether the strategy reports the action's work as finished.
    pub fn is_complete(&self) -> bool {
        self.strategy().is_complete()
    }

    /// Starts the action's work. Called once by the execution consumer.
    pub fn start(&self) {
        self.strategy().start();
    }

    /// Steps the action's work with the elapsed time since the last step.
    pub fn update(&self, dt: Duration) {
        self.strategy().update(dt);
    }

    /// Stops the action's work. Called once on completion or abandonment.
    pub fn stop(&self) {
        self.strategy().stop();
    }

    fn strategy(&self) -> std::sync::MutexGuard<'_, Box<dyn ActionStrategy>> {
        self.strategy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("cost", &self.cost())
            .field(
                "preconditions",
                &self.preconditions.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field(
                "effects",
                &self.effects.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.name, self.cost())
    }
}

/// Staged construction for [`Action`], validated at [`ActionBuilder::build`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use praxis::{Action, Belief, PraxisError};
///
/// let lit = Arc::new(Belief::new("fire_lit", || false));
///
/// // Negative cost is rejected at build time.
/// let result = Action::builder("light_fire").cost(-1.0).effect(lit).build();
/// assert!(matches!(result, Err(PraxisError::InvalidActionCost)));
///
/// // An action with no effects can never progress a goal and is rejected.
/// let result = Action::builder("shrug").build();
/// assert!(matches!(result, Err(PraxisError::ActionWithoutEffects(_))));
/// ```
pub struct ActionBuilder {
    name: String,
    cost: f32,
    preconditions: HashSet<Arc<Belief>>,
    effects: HashSet<Arc<Belief>>,
    strategy: Box<dyn ActionStrategy>,
}

impl ActionBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 1.0,
            preconditions: HashSet::new(),
            effects: HashSet::new(),
            strategy: Box::new(InstantStrategy),
        }
    }

    /// Sets the action's cost (lower is preferred; default 1).
    pub fn cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    /// Adds a precondition belief. Duplicate beliefs (by name) collapse.
    pub fn precondition(mut self, belief: Arc<Belief>) -> Self {
        self.preconditions.insert(belief);
        self
    }

    /// Adds an effect belief. Duplicate beliefs (by name) collapse.
    pub fn effect(mut self, belief: Arc<Belief>) -> Self {
        self.effects.insert(belief);
        self
    }

    /// Selects the execution strategy (default [`InstantStrategy`]).
    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: ActionStrategy + 'static,
    {
        self.strategy = Box::new(strategy);
        self
    }

    /// Validates the configuration and produces the action.
    ///
    /// # Errors
    ///
    /// * [`PraxisError::InvalidActionCost`] if the cost is negative
    /// * [`PraxisError::ActionWithoutEffects`] if no effect was added
    pub fn build(self) -> Result<Action> {
        if self.cost < 0.0 {
            return Err(PraxisError::InvalidActionCost);
        }
        if self.effects.is_empty() {
            return Err(PraxisError::ActionWithoutEffects(self.name));
        }
        Ok(Action {
            name: self.name,
            cost: AtomicU32::new(self.cost.to_bits()),
            preconditions: self.preconditions,
            effects: self.effects,
            strategy: Mutex::new(self.strategy),
        })
    }
}

/// An agent's pool of available actions.
///
/// Keeps insertion order (the planner's documented tie-break order for
/// expansion) and rejects duplicate names.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use praxis::{Action, Actions, Belief};
///
/// let rested = Arc::new(Belief::new("rested", || false));
///
/// let mut actions = Actions::new();
/// actions
///     .add(Action::builder("nap").effect(rested.clone()).build().unwrap())
///     .unwrap();
///
/// // A second "nap" is rejected.
/// let result = actions.add(Action::builder("nap").effect(rested).build().unwrap());
/// assert!(result.is_err());
/// assert_eq!(actions.len(), 1);
/// ```
#[derive(Default)]
pub struct Actions {
    actions: Vec<Arc<Action>>,
}

impl Actions {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action to the pool.
    ///
    /// # Returns
    ///
    /// A shared handle to the pooled action.
    ///
    /// # Errors
    ///
    /// Returns [`PraxisError::ActionAlreadyInCollection`] if an action with
    /// the same name is already pooled.
    pub fn add(&mut self, action: Action) -> Result<Arc<Action>> {
        if self.actions.iter().any(|a| a.name() == action.name()) {
            return Err(PraxisError::ActionAlreadyInCollection(
                action.name().to_string(),
            ));
        }
        let action = Arc::new(action);
        self.actions.push(action.clone());
        Ok(action)
    }

    /// Looks up an action by name.
    pub fn get(&self, name: &str) -> Option<Arc<Action>> {
        self.actions.iter().find(|a| a.name() == name).cloned()
    }

    /// The pooled actions, in insertion order.
    pub fn as_slice(&self) -> &[Arc<Action>] {
        &self.actions
    }

    /// The number of pooled actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates over the pooled actions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::IdleStrategy;

    fn belief(name: &str, value: bool) -> Arc<Belief> {
        Arc::new(Belief::new(name, move || value))
    }

    #[test]
    fn test_builder_defaults() {
        let action = Action::builder("wait")
            .effect(belief("waited", false))
            .build()
            .unwrap();
        assert_eq!(action.name(), "wait");
        assert_eq!(action.cost(), 1.0);
        assert!(action.preconditions().is_empty());
        assert_eq!(action.effects().len(), 1);
    }

    #[test]
    fn test_builder_rejects_negative_cost() {
        let result = Action::builder("bad")
            .cost(-0.5)
            .effect(belief("done", false))
            .build();
        assert!(matches!(result, Err(PraxisError::InvalidActionCost)));
    }

    #[test]
    fn test_builder_accepts_zero_cost() {
        let action = Action::builder("free")
            .cost(0.0)
            .effect(belief("done", false))
            .build()
            .unwrap();
        assert_eq!(action.cost(), 0.0);
    }

    #[test]
    fn test_builder_rejects_empty_effects() {
        let result = Action::builder("noop")
            .precondition(belief("ready", true))
            .build();
        assert!(matches!(
            result,
            Err(PraxisError::ActionWithoutEffects(name)) if name == "noop"
        ));
    }

    #[test]
    fn test_duplicate_beliefs_collapse() {
        let action = Action::builder("gather")
            .precondition(belief("has_basket", true))
            .precondition(belief("has_basket", false))
            .effect(belief("has_berries", false))
            .build()
            .unwrap();
        assert_eq!(action.preconditions().len(), 1);
    }

    #[test]
    fn test_set_cost_clamps_at_zero() {
        let action = Action::builder("move")
            .effect(belief("moved", false))
            .build()
            .unwrap();
        action.set_cost(3.5);
        assert_eq!(action.cost(), 3.5);
        action.set_cost(-2.0);
        assert_eq!(action.cost(), 0.0);
    }

    #[test]
    fn test_default_strategy_is_instant() {
        let action = Action::builder("blink")
            .effect(belief("blinked", false))
            .build()
            .unwrap();
        assert!(action.can_perform());
        assert!(action.is_complete());
    }

    #[test]
    fn test_idle_strategy_drives_completion() {
        let action = Action::builder("rest")
            .effect(belief("rested", false))
            .strategy(IdleStrategy::new(Duration::from_millis(50)))
            .build()
            .unwrap();
        action.start();
        assert!(!action.is_complete());
        action.update(Duration::from_millis(50));
        assert!(action.is_complete());
        action.stop();
    }

    #[test]
    fn test_pool_rejects_duplicate_names() {
        let mut actions = Actions::new();
        actions
            .add(Action::builder("wander").effect(belief("wandered", false)).build().unwrap())
            .unwrap();
        let result =
            actions.add(Action::builder("wander").effect(belief("wandered", false)).build().unwrap());
        assert!(matches!(
            result,
            Err(PraxisError::ActionAlreadyInCollection(name)) if name == "wander"
        ));
    }

    #[test]
    fn test_pool_preserves_insertion_order() {
        let mut actions = Actions::new();
        for name in ["a", "b", "c"] {
            actions
                .add(Action::builder(name).effect(belief("x", false)).build().unwrap())
                .unwrap();
        }
        let names: Vec<_> = actions.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(actions.get("b").is_some());
        assert!(actions.get("z").is_none());
    }
}
