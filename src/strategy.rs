//! Execution strategies for actions.
//!
//! A strategy is how an action "does its work" once the execution consumer
//! reaches it in a plan: started once, stepped with elapsed time until it
//! reports completion, then stopped. Strategies are selected per action at
//! construction time ([`crate::ActionBuilder::strategy`]) and are driven
//! exclusively by the consumer; the planner never calls into them.

use std::time::Duration;

/// The polymorphic execution capability attached to an action.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use praxis::ActionStrategy;
///
/// struct CountdownStrategy {
///     remaining: u32,
/// }
///
/// impl ActionStrategy for CountdownStrategy {
///     fn is_complete(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn update(&mut self, _dt: Duration) {
///         self.remaining = self.remaining.saturating_sub(1);
///     }
/// }
///
/// let mut strategy = CountdownStrategy { remaining: 2 };
/// strategy.start();
/// strategy.update(Duration::from_millis(16));
/// strategy.update(Duration::from_millis(16));
/// assert!(strategy.is_complete());
/// ```
pub trait ActionStrategy: Send + Sync {
    /// Whether the action can currently run. Consulted by the execution
    /// consumer before stepping; defaults to always-ready.
    fn can_perform(&self) -> bool {
        true
    }

    /// Whether the action has finished its work.
    fn is_complete(&self) -> bool;

    /// Called once when the consumer begins executing the action.
    fn start(&mut self) {}

    /// Called repeatedly with the elapsed time since the previous step.
    fn update(&mut self, _dt: Duration) {}

    /// Called once when the action completes or is abandoned.
    fn stop(&mut self) {}
}

/// A strategy that is complete the moment it is reached.
///
/// This is the default strategy for actions built without an explicit one:
/// the action's planning semantics (preconditions/effects/cost) are all
/// that matter, and execution is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantStrategy;

impl ActionStrategy for InstantStrategy {
    fn is_complete(&self) -> bool {
        true
    }
}

/// A strategy that completes after a fixed amount of accumulated step time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use praxis::{ActionStrategy, IdleStrategy};
///
/// let mut idle = IdleStrategy::new(Duration::from_secs(2));
/// idle.start();
/// assert!(!idle.is_complete());
///
/// idle.update(Duration::from_secs(1));
/// idle.update(Duration::from_secs(1));
/// assert!(idle.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct IdleStrategy {
    duration: Duration,
    elapsed: Duration,
}

impl IdleStrategy {
    /// Creates an idle strategy that waits for `duration` of stepped time.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }
}

impl ActionStrategy for IdleStrategy {
    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn start(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn update(&mut self, dt: Duration) {
        self.elapsed += dt;
    }
}

/// A strategy that runs a closure once on start, then reports completion.
///
/// Handy for actions whose work is a single side effect on the caller's
/// world model.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use praxis::{ActionStrategy, FnStrategy};
///
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = fired.clone();
/// let mut strategy = FnStrategy::new(move || flag.store(true, Ordering::Relaxed));
///
/// assert!(!strategy.is_complete());
/// strategy.start();
/// assert!(strategy.is_complete());
/// assert!(fired.load(Ordering::Relaxed));
/// ```
pub struct FnStrategy {
    work: Box<dyn FnMut() + Send + Sync>,
    done: bool,
}

impl FnStrategy {
    /// Creates a strategy from a closure.
    pub fn new<F>(work: F) -> Self
    where
        F: FnMut() + Send + Sync + 'static,
    {
        Self {
            work: Box::new(work),
            done: false,
        }
    }
}

impl ActionStrategy for FnStrategy {
    fn is_complete(&self) -> bool {
        self.done
    }

    fn start(&mut self) {
        (self.work)();
        self.done = true;
    }

    fn stop(&mut self) {
        self.done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_strategy_is_always_complete() {
        let strategy = InstantStrategy;
        assert!(strategy.can_perform());
        assert!(strategy.is_complete());
    }

    #[test]
    fn test_idle_strategy_accumulates_time() {
        let mut idle = IdleStrategy::new(Duration::from_millis(100));
        idle.start();
        idle.update(Duration::from_millis(40));
        assert!(!idle.is_complete());
        idle.update(Duration::from_millis(60));
        assert!(idle.is_complete());

        // restarting resets the clock
        idle.start();
        assert!(!idle.is_complete());
    }

    #[test]
    fn test_fn_strategy_runs_once_per_start() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let counter = Arc::new(AtomicUsize::new(0));
        let shared = counter.clone();
        let mut strategy = FnStrategy::new(move || {
            shared.fetch_add(1, Ordering::Relaxed);
        });

        strategy.start();
        assert!(strategy.is_complete());
        assert_eq!(counter.load(Ordering::Relaxed), 1);

        strategy.stop();
        assert!(!strategy.is_complete());
        strategy.start();
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }
}
