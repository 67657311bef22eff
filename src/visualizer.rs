use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

use crate::action::Action;
use crate::belief::Belief;
use crate::error::Result;
use crate::plan::Plan;

/// A diagnostic visualizer that renders an action pool and a produced plan
/// as a Graphviz DOT file
pub struct PlanVisualizer;

impl PlanVisualizer {
    /// Create a new plan visualizer
    pub fn new() -> Self {
        Self
    }

    /// Generate a DOT file showing the pool, the goal, and the chosen chain
    pub fn visualize_plan(
        &self,
        actions: &[Arc<Action>],
        plan: &Plan,
        filename: &str,
    ) -> Result<()> {
        let mut file = File::create(filename)?;

        // Write DOT file header
        writeln!(file, "digraph plan {{")?;
        writeln!(file, "    rankdir=LR;")?;
        writeln!(
            file,
            "    node [shape=box, style=filled, fillcolor=lightblue];"
        )?;
        writeln!(file, "    edge [fontsize=10];")?;

        // Write the goal being served
        writeln!(
            file,
            "    goal [label=\"Goal: {}\\n{}\", fillcolor=lightpink];",
            plan.goal().name(),
            Self::belief_names(plan.goal().desired_effects())
        )?;

        // Write all available actions
        for (i, action) in actions.iter().enumerate() {
            writeln!(
                file,
                "    action_{} [label=\"{}\\nCost: {}\\nPre: {}\\nEff: {}\"];",
                i,
                action.name(),
                action.cost(),
                Self::belief_names(action.preconditions()),
                Self::belief_names(action.effects())
            )?;
        }

        // Highlight the chosen chain in execution order
        writeln!(file, "    edge [color=red, penwidth=2.0];")?;
        let mut previous: Option<usize> = None;
        for step in plan.actions() {
            if let Some(idx) = actions.iter().position(|a| a.name() == step.name()) {
                writeln!(file, "    action_{} [fillcolor=lightcoral];", idx)?;
                if let Some(prev_idx) = previous {
                    writeln!(file, "    action_{} -> action_{};", prev_idx, idx)?;
                }
                previous = Some(idx);
            }
        }
        if let Some(last) = previous {
            writeln!(file, "    action_{} -> goal [label=\"achieves\"];", last)?;
        }

        // Write closing brace
        writeln!(file, "}}")?;

        Ok(())
    }

    /// Helper to render a belief set as a label fragment, sorted for
    /// deterministic output
    fn belief_names(beliefs: &HashSet<Arc<Belief>>) -> String {
        let mut names: Vec<_> = beliefs.iter().map(|b| b.name()).collect();
        names.sort_unstable();
        names.join("\\n")
    }
}
