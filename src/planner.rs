//! # Planner Module
//!
//! The search engine of the library: given an action pool and a set of
//! competing goals, it works *backward* from the most urgent achievable
//! goal's desired effects toward the current world state and returns the
//! action sequence it finds, cheapest-first at every branch.
//!
//! ## How planning works
//!
//! 1. Candidate goals whose desired effects are all already true are
//!    skipped; there is nothing to plan for.
//! 2. The remaining goals are tried in descending priority order. A goal
//!    equal to the previously achieved one has its priority nudged down by
//!    a small epsilon for ordering purposes, so tied goals alternate
//!    instead of oscillating onto the same goal every pass.
//! 3. For the goal under consideration, the search keeps a set of
//!    *required effects*: beliefs that still must become true. Beliefs
//!    that already evaluate true are dropped; for each action whose
//!    effects overlap what remains, the action's effects are removed from
//!    the set, its preconditions are added, and the search recurses. An
//!    action is withheld from the pool of its own subtree, so it cannot
//!    chain directly into itself; a depth ceiling bounds pathological
//!    pools.
//! 4. Every action branch is explored and each successful branch becomes a
//!    leaf of its parent node. The plan is then read off the finished tree
//!    by descending into the cheapest leaf at each step. This is
//!    deliberately greedy: the choice at each node looks only at the
//!    immediate leaf costs, not the whole subtree, so the result is a
//!    local-cheapest approximation rather than a globally optimal path.
//! 5. The first goal that yields a plan wins. If no candidate goal does,
//!    [`PraxisError::NoPlanFound`] is returned: a normal "nothing to do"
//!    outcome, not a fault.
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use praxis::{Action, Belief, Goal, Planner};
//!
//! // World: nothing is true yet.
//! let has_axe = Arc::new(Belief::new("has_axe", || false));
//! let has_wood = Arc::new(Belief::new("has_wood", || false));
//! let fire_lit = Arc::new(Belief::new("fire_lit", || false));
//!
//! let take_axe = Arc::new(
//!     Action::builder("take_axe").effect(has_axe.clone()).build().unwrap(),
//! );
//! let chop_wood = Arc::new(
//!     Action::builder("chop_wood")
//!         .precondition(has_axe)
//!         .effect(has_wood.clone())
//!         .build()
//!         .unwrap(),
//! );
//! let light_fire = Arc::new(
//!     Action::builder("light_fire")
//!         .cost(2.0)
//!         .precondition(has_wood)
//!         .effect(fire_lit.clone())
//!         .build()
//!         .unwrap(),
//! );
//!
//! let keep_warm = Arc::new(
//!     Goal::builder("keep_warm").priority(5.0).desired_effect(fire_lit).build().unwrap(),
//! );
//!
//! let planner = Planner::new();
//! let plan = planner
//!     .plan(&[take_axe, chop_wood, light_fire], &[keep_warm], None)
//!     .unwrap();
//!
//! let steps: Vec<_> = plan.actions().map(|a| a.name().to_string()).collect();
//! assert_eq!(steps, ["take_axe", "chop_wood", "light_fire"]);
//! assert_eq!(plan.cost(), 4.0);
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::action::Action;
use crate::belief::Belief;
use crate::error::{PraxisError, Result};
use crate::goal::Goal;
use crate::plan::Plan;

/// Priority penalty applied to the previously achieved goal when ordering
/// candidates, so exact priority ties don't re-elect the same goal forever.
const PRIORITY_EPSILON: f32 = 0.01;

/// Default recursion-depth ceiling for the backward search.
const DEFAULT_MAX_DEPTH: usize = 32;

/// One state in the backward-chaining tree: the action that produced it,
/// the beliefs still required above this point, the cumulative cost from
/// the root, and the successful child branches.
///
/// Nodes live only for the duration of a single `plan()` call; nothing is
/// cached across calls.
struct Node {
    /// The action this node attributes (`None` only for the root)
    action: Option<Arc<Action>>,
    /// Beliefs that still must become true above this point
    required: HashSet<Arc<Belief>>,
    /// Cumulative cost from the root down to this node
    cost: f32,
    /// Child branches that reached the current world state
    leaves: Vec<Node>,
}

/// The planning engine.
///
/// A `Planner` is stateless apart from its configuration: each call to
/// [`Planner::plan`] owns its search tree exclusively and discards it
/// before returning, so any number of agents can run their own planner
/// concurrently without coordination, provided each owns its collections.
///
/// Belief predicates and action costs are read at the moment the search
/// needs them (never cached across the call), so a pass always plans
/// against the live world.
#[derive(Debug, Clone)]
pub struct Planner {
    /// Recursion ceiling; branches deeper than this are abandoned
    max_depth: usize,
}

impl Planner {
    /// Creates a planner with the default depth ceiling.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a planner with a custom recursion-depth ceiling.
    ///
    /// The ceiling is a backstop for pathological action pools; a branch
    /// that exceeds it is treated as a dead end, and if every branch does,
    /// the pass reports [`PraxisError::NoPlanFound`] rather than hanging.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Finds an action sequence satisfying the most urgent achievable goal.
    ///
    /// # Arguments
    ///
    /// * `actions` - The full pool of actions available to the agent.
    ///   Costs are re-read on this call, so dynamic re-costing between
    ///   passes is honored.
    /// * `goals` - The candidate goals for this pass. Callers typically
    ///   pre-filter (e.g., to goals of strictly higher priority than one
    ///   already in progress, enabling priority-based interruption);
    ///   goals whose desired effects are all currently true are skipped
    ///   here regardless.
    /// * `previous_goal` - The goal achieved by the last pass, if any.
    ///   Used only as an ordering penalty so tied goals alternate.
    ///
    /// # Returns
    ///
    /// The plan for the first goal, in descending effective-priority
    /// order, whose desired effects are reachable from the current belief
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`PraxisError::NoPlanFound`] when no candidate goal yields
    /// a feasible sequence. This is an expected outcome ("nothing needs
    /// doing"), distinct from every setup-time error.
    pub fn plan(
        &self,
        actions: &[Arc<Action>],
        goals: &[Arc<Goal>],
        previous_goal: Option<&Arc<Goal>>,
    ) -> Result<Plan> {
        let mut candidates: Vec<&Arc<Goal>> =
            goals.iter().filter(|g| !g.is_satisfied()).collect();

        // Descending effective priority; the sort is stable, so exact ties
        // keep the caller's insertion order.
        candidates.sort_by(|a, b| {
            let pa = effective_priority(a, previous_goal);
            let pb = effective_priority(b, previous_goal);
            pb.partial_cmp(&pa).unwrap_or(Ordering::Equal)
        });

        for goal in candidates {
            debug!(
                "planning for goal '{}' (priority {})",
                goal.name(),
                goal.priority()
            );

            let mut root = Node {
                action: None,
                required: goal.desired_effects().clone(),
                cost: 0.0,
                leaves: Vec::new(),
            };

            if self.find_path(&mut root, actions, 0) && !root.leaves.is_empty() {
                let plan = extract_plan(goal.clone(), &root);
                debug!("found plan {}", plan);
                return Ok(plan);
            }

            trace!("goal '{}' is unreachable, trying next", goal.name());
        }

        debug!("no candidate goal yields a plan");
        Err(PraxisError::NoPlanFound)
    }

    /// Expands `node` against `pool`, attaching every action branch that
    /// reaches the current world state as a leaf.
    ///
    /// Returns `true` if the node's requirements are already met or at
    /// least one branch succeeded.
    fn find_path(&self, node: &mut Node, pool: &[Arc<Action>], depth: usize) -> bool {
        // Requirements the world already satisfies are met for free.
        node.required.retain(|belief| !belief.evaluate());
        if node.required.is_empty() {
            return true;
        }

        if depth >= self.max_depth {
            trace!("depth ceiling {} reached, abandoning branch", self.max_depth);
            return false;
        }

        for action in pool {
            if !action.effects().iter().any(|e| node.required.contains(e)) {
                continue;
            }

            // What the child still requires: the current requirements minus
            // what this action resolves, plus what it demands itself.
            let mut required: HashSet<Arc<Belief>> = node
                .required
                .iter()
                .filter(|b| !action.effects().contains(*b))
                .cloned()
                .collect();
            required.extend(action.preconditions().iter().cloned());

            let mut child = Node {
                action: Some(action.clone()),
                required,
                cost: node.cost + action.cost(),
                leaves: Vec::new(),
            };

            // An action is withheld from its own subtree: it must not be
            // chained directly into itself to re-satisfy requirements it
            // just introduced.
            let remaining: Vec<Arc<Action>> = pool
                .iter()
                .filter(|candidate| !Arc::ptr_eq(candidate, action))
                .cloned()
                .collect();

            if self.find_path(&mut child, &remaining, depth + 1) {
                trace!(
                    "action '{}' viable at depth {} (cumulative cost {})",
                    action.name(),
                    depth,
                    child.cost
                );
                node.leaves.push(child);
            }
        }

        !node.leaves.is_empty()
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_priority(goal: &Goal, previous_goal: Option<&Arc<Goal>>) -> f32 {
    let mut priority = goal.priority();
    if previous_goal.map_or(false, |prev| prev.name() == goal.name()) {
        priority -= PRIORITY_EPSILON;
    }
    priority
}

/// Reads the plan off a finished tree: descend into the cheapest leaf at
/// each step (ties keep the earliest-expanded branch), then reverse the
/// collected actions into execution order. The plan's cost is the
/// cumulative cost of the final node reached.
fn extract_plan(goal: Arc<Goal>, root: &Node) -> Plan {
    let mut sequence = Vec::new();
    let mut current = root;

    while !current.leaves.is_empty() {
        let mut cheapest = &current.leaves[0];
        for leaf in &current.leaves[1..] {
            if leaf.cost < cheapest.cost {
                cheapest = leaf;
            }
        }
        if let Some(action) = &cheapest.action {
            sequence.push(action.clone());
        }
        current = cheapest;
    }

    let cost = current.cost;
    sequence.reverse();
    Plan::new(goal, sequence.into(), cost)
}
