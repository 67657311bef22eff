//! # Belief Module
//!
//! Beliefs are the atoms of the planning system: named boolean predicates
//! over live world state, with an optional spatial hint for consumers that
//! care about *where* a fact holds.
//!
//! ## What is a Belief?
//!
//! A belief answers a single yes/no question about the world right now:
//! "do I have an axe?", "am I near the campfire?", "is an enemy in sight?".
//! Actions and goals never store world state themselves; they reference
//! beliefs, and every belief re-reads the world each time it is evaluated.
//!
//! Three construction forms are supported:
//!
//! * [`Belief::new`]: a plain name + predicate pair
//! * [`Belief::at_location`]: true while the agent is within range of a
//!   (possibly moving) target point
//! * [`Belief::from_perception`]: predicate and location both delegated to
//!   an external [`PerceptionSource`]
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use praxis::{Belief, Beliefs};
//!
//! // World state lives outside the library; beliefs close over it.
//! let has_wood = Arc::new(AtomicBool::new(false));
//!
//! let mut beliefs = Beliefs::new();
//! let watched = has_wood.clone();
//! let belief = beliefs
//!     .add("has_wood", move || watched.load(Ordering::Relaxed))
//!     .unwrap();
//!
//! assert!(!belief.evaluate());
//! has_wood.store(true, Ordering::Relaxed);
//! assert!(belief.evaluate());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nalgebra::{distance, Point3};

use crate::error::{PraxisError, Result};

/// A source of perception data consumed when building perception-derived
/// beliefs.
///
/// The planner treats a perception source purely as another boolean/point
/// supplier; how detection actually happens (physics triggers, vision cones,
/// network events) is entirely the implementor's business.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use praxis::{Belief, PerceptionSource};
/// use std::sync::Arc;
///
/// struct FixedSighting;
///
/// impl PerceptionSource for FixedSighting {
///     fn target_detected(&self) -> bool {
///         true
///     }
///
///     fn target_position(&self) -> Point3<f32> {
///         Point3::new(4.0, 0.0, 2.0)
///     }
/// }
///
/// let belief = Belief::from_perception("enemy_in_sight", Arc::new(FixedSighting));
/// assert!(belief.evaluate());
/// assert_eq!(belief.location(), Some(Point3::new(4.0, 0.0, 2.0)));
/// ```
pub trait PerceptionSource: Send + Sync {
    /// Whether a target is currently detected
    fn target_detected(&self) -> bool;

    /// The last known position of the detected target
    fn target_position(&self) -> Point3<f32>;
}

type Condition = Arc<dyn Fn() -> bool + Send + Sync>;
type LocationFn = Arc<dyn Fn() -> Point3<f32> + Send + Sync>;

/// A named boolean fact about the world, re-evaluated on demand.
///
/// Beliefs are identified by name: two beliefs compare equal (and hash
/// identically) iff their names match. Actions and goals hold beliefs in
/// hash sets, so uniqueness-by-identity falls out of that rule.
///
/// Evaluation never mutates anything; the planner only ever calls
/// [`Belief::evaluate`]. The optional location hint is for consumers
/// (movement, diagnostics) and plays no part in planning logic.
///
/// # Examples
///
/// ```
/// use praxis::Belief;
///
/// let belief = Belief::new("door_open", || false);
/// assert_eq!(belief.name(), "door_open");
/// assert!(!belief.evaluate());
/// assert!(belief.location().is_none());
/// ```
#[derive(Clone)]
pub struct Belief {
    /// The unique name of the belief
    name: String,
    /// The predicate consulted on every evaluation
    condition: Condition,
    /// Optional accessor for where this fact holds
    location: Option<LocationFn>,
}

impl Belief {
    /// Creates a plain belief from a name and a boolean predicate.
    ///
    /// # Arguments
    ///
    /// * `name` - A unique identifier for the belief
    /// * `condition` - The predicate consulted each time the belief is
    ///   evaluated
    ///
    /// # Examples
    ///
    /// ```
    /// use praxis::Belief;
    ///
    /// let belief = Belief::new("always_true", || true);
    /// assert!(belief.evaluate());
    /// ```
    pub fn new<F>(name: impl Into<String>, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            condition: Arc::new(condition),
            location: None,
        }
    }

    /// Creates a located belief: true while the distance between the agent
    /// and a target point is below `range`.
    ///
    /// Both positions are accessors, evaluated lazily on every call, so a
    /// moving agent or a moving target is handled for free. The target
    /// accessor doubles as the belief's location hint.
    ///
    /// # Arguments
    ///
    /// * `name` - A unique identifier for the belief
    /// * `range` - The distance below which the belief holds
    /// * `agent_position` - Accessor for the agent's current position
    /// * `target` - Accessor for the target point
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use praxis::Belief;
    ///
    /// let belief = Belief::at_location(
    ///     "near_campfire",
    ///     5.0,
    ///     || Point3::new(0.0, 0.0, 0.0),
    ///     || Point3::new(3.0, 0.0, 0.0),
    /// );
    /// assert!(belief.evaluate());
    ///
    /// let far = Belief::at_location(
    ///     "near_tower",
    ///     5.0,
    ///     || Point3::new(0.0, 0.0, 0.0),
    ///     || Point3::new(30.0, 0.0, 0.0),
    /// );
    /// assert!(!far.evaluate());
    /// ```
    pub fn at_location<A, T>(name: impl Into<String>, range: f32, agent_position: A, target: T) -> Self
    where
        A: Fn() -> Point3<f32> + Send + Sync + 'static,
        T: Fn() -> Point3<f32> + Send + Sync + 'static,
    {
        let target: LocationFn = Arc::new(target);
        let location = target.clone();
        Self {
            name: name.into(),
            condition: Arc::new(move || distance(&agent_position(), &(*target)()) < range),
            location: Some(location),
        }
    }

    /// Creates a perception-derived belief whose condition and location are
    /// both delegated to a [`PerceptionSource`].
    pub fn from_perception(name: impl Into<String>, source: Arc<dyn PerceptionSource>) -> Self {
        let detector = source.clone();
        Self {
            name: name.into(),
            condition: Arc::new(move || detector.target_detected()),
            location: Some(Arc::new(move || source.target_position())),
        }
    }

    /// Gets the name of the belief.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the belief against live world state.
    ///
    /// The result is read fresh on every call; nothing is cached.
    pub fn evaluate(&self) -> bool {
        (*self.condition)()
    }

    /// The current location hint, if this belief carries one.
    ///
    /// Never consulted by the planner; intended for movement and
    /// diagnostics on the consumer side.
    pub fn location(&self) -> Option<Point3<f32>> {
        self.location.as_deref().map(|f| f())
    }
}

impl fmt::Debug for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Belief")
            .field("name", &self.name)
            .field("located", &self.location.is_some())
            .finish()
    }
}

impl fmt::Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Belief {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Belief {}

impl std::hash::Hash for Belief {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A named registry of beliefs owned by one agent.
///
/// Registering two beliefs under the same name is a caller error and is
/// rejected with [`PraxisError::BeliefAlreadyInRegistry`]; lookup by name
/// always succeeds for any name that was accepted.
///
/// # Examples
///
/// ```
/// use praxis::Beliefs;
///
/// let mut beliefs = Beliefs::new();
/// beliefs.add("has_axe", || true).unwrap();
///
/// assert!(beliefs.get("has_axe").is_some());
/// assert!(beliefs.get("has_sword").is_none());
///
/// // Duplicate names are rejected, never silently overwritten.
/// assert!(beliefs.add("has_axe", || false).is_err());
/// ```
#[derive(Default)]
pub struct Beliefs {
    beliefs: HashMap<String, Arc<Belief>>,
}

impl Beliefs {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            beliefs: HashMap::new(),
        }
    }

    /// Registers an already-constructed belief.
    ///
    /// # Returns
    ///
    /// A shared handle to the registered belief, for wiring into actions
    /// and goals.
    ///
    /// # Errors
    ///
    /// Returns [`PraxisError::BeliefAlreadyInRegistry`] if a belief with
    /// the same name is already present.
    pub fn insert(&mut self, belief: Belief) -> Result<Arc<Belief>> {
        if self.beliefs.contains_key(belief.name()) {
            return Err(PraxisError::BeliefAlreadyInRegistry(belief.name().to_string()));
        }
        let belief = Arc::new(belief);
        self.beliefs.insert(belief.name().to_string(), belief.clone());
        Ok(belief)
    }

    /// Registers a plain belief. See [`Belief::new`].
    pub fn add<F>(&mut self, name: impl Into<String>, condition: F) -> Result<Arc<Belief>>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.insert(Belief::new(name, condition))
    }

    /// Registers a located belief. See [`Belief::at_location`].
    pub fn add_located<A, T>(
        &mut self,
        name: impl Into<String>,
        range: f32,
        agent_position: A,
        target: T,
    ) -> Result<Arc<Belief>>
    where
        A: Fn() -> Point3<f32> + Send + Sync + 'static,
        T: Fn() -> Point3<f32> + Send + Sync + 'static,
    {
        self.insert(Belief::at_location(name, range, agent_position, target))
    }

    /// Registers a perception-derived belief. See [`Belief::from_perception`].
    pub fn add_perceived(
        &mut self,
        name: impl Into<String>,
        source: Arc<dyn PerceptionSource>,
    ) -> Result<Arc<Belief>> {
        self.insert(Belief::from_perception(name, source))
    }

    /// Looks up a belief by name.
    pub fn get(&self, name: &str) -> Option<Arc<Belief>> {
        self.beliefs.get(name).cloned()
    }

    /// The number of registered beliefs.
    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Iterates over all registered beliefs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Belief>> {
        self.beliefs.values()
    }
}
