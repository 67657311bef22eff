use thiserror::Error;

/// Error type for the planning library.
///
/// Every variant is an expected, recoverable outcome: setup-time caller
/// errors (duplicate registration, invalid construction values) or the
/// benign "nothing can be done" planning result. None of them indicate a
/// broken internal invariant.
///
/// # Examples
///
/// ```
/// use praxis::PraxisError;
///
/// let err = PraxisError::BeliefAlreadyInRegistry("has_axe".to_string());
/// assert_eq!(format!("{}", err), "Belief already in registry: has_axe");
/// ```
#[derive(Error, Debug)]
pub enum PraxisError {
    // Registration errors
    /// A belief with the same name is already registered
    #[error("Belief already in registry: {0}")]
    BeliefAlreadyInRegistry(String),

    /// An action with the same name is already in the pool
    #[error("Action already in collection: {0}")]
    ActionAlreadyInCollection(String),

    /// A goal with the same name is already in the pool
    #[error("Goal already in collection: {0}")]
    GoalAlreadyInCollection(String),

    // Construction errors
    /// Error when attempting to build an action with a negative cost
    #[error("Action cost must be non-negative")]
    InvalidActionCost,

    /// Error when attempting to build a goal with a negative priority
    #[error("Goal priority must be non-negative")]
    InvalidGoalPriority,

    /// Error when attempting to build an action with an empty effect set.
    /// Such an action can never make progress on any required effect and
    /// would be dead weight in the pool.
    #[error("Action has no effects: {0}")]
    ActionWithoutEffects(String),

    /// Error when attempting to build a goal with no desired effects.
    /// Such a goal is vacuously satisfied and would never be planned for.
    #[error("Goal has no desired effects: {0}")]
    GoalWithoutDesiredEffects(String),

    // Planning outcome
    /// No candidate goal yields a feasible action sequence from the current
    /// belief state. This is a normal result ("nothing to do"), not a fault.
    #[error("No valid plan found for any candidate goal")]
    NoPlanFound,

    // IO errors
    /// A wrapper around standard IO errors (plan visualization output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Other errors
    /// Catch-all for errors that don't fit into other categories
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for planning operations
///
/// # Examples
///
/// ```
/// use praxis::{PraxisError, Result};
///
/// fn might_fail(succeed: bool) -> Result<&'static str> {
///     if succeed {
///         Ok("ok")
///     } else {
///         Err(PraxisError::Other("nope".to_string()))
///     }
/// }
///
/// assert!(might_fail(true).is_ok());
/// assert!(might_fail(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, PraxisError>;
