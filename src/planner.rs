//! Human-readable explanation of a sequence description.
//!
//! [`explain`] walks the [`Describe`] tree depth-first, inputs before the
//! operator that consumes them, and produces an [`ExecutionExplanation`]:
//! one [`ExplainStep`] per node plus a [`CostEstimate`] summary. Nothing is
//! opened or pulled while explaining.
//!
//! ```
//! use ironlinq::*;
//!
//! let q = from_vec(vec![3, 1, 2]).filter(|x| *x > 1).order();
//! let plan = q.explain();
//! assert_eq!(plan.cost_estimate.barriers, 1);
//! assert_eq!(plan.cost_estimate.source_size, Some(3));
//! println!("{plan}");
//! ```

use crate::collection::{Elem, Seq};
use crate::node::Describe;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// The result of [`explain`].
#[derive(Debug, Clone)]
pub struct ExecutionExplanation {
    /// Steps in the order their cursors would first be pulled.
    pub steps: Vec<ExplainStep>,
    pub cost_estimate: CostEstimate,
}

/// A single node of the description.
#[derive(Debug, Clone)]
pub struct ExplainStep {
    /// 1-based position in [`ExecutionExplanation::steps`].
    pub step: usize,
    /// Distance from the outermost operator; `0` is the sequence itself.
    pub depth: usize,
    pub label: String,
    /// Whether opening this node drains its input.
    pub is_barrier: bool,
    pub cost_hint: u8,
    pub known_len: Option<usize>,
}

/// Summary counts over the whole description.
#[derive(Debug, Clone, Default)]
pub struct CostEstimate {
    /// Sum of the known lengths of all leaves, or `None` if any leaf is
    /// unbounded or of unknown size.
    pub source_size: Option<usize>,
    /// Number of non-leaf nodes.
    pub total_ops: usize,
    /// Operators that pull on demand.
    pub lazy_ops: usize,
    /// Operators that drain their input when opened.
    pub barriers: usize,
    /// Sum of per-node cost hints.
    pub total_cost: u64,
}

/// Explain any description: a [`Seq`] or a custom operator.
#[must_use]
pub fn explain(root: &dyn Describe) -> ExecutionExplanation {
    let mut steps = Vec::new();
    let mut cost = CostEstimate { source_size: Some(0), ..CostEstimate::default() };
    visit(root, 0, &mut steps, &mut cost);
    for (i, step) in steps.iter_mut().enumerate() {
        step.step = i + 1;
    }
    ExecutionExplanation { steps, cost_estimate: cost }
}

fn visit(node: &dyn Describe, depth: usize, steps: &mut Vec<ExplainStep>, cost: &mut CostEstimate) {
    let inputs = node.inputs();
    for input in &inputs {
        visit(*input, depth + 1, steps, cost);
    }

    let known_len = node.known_len();
    if inputs.is_empty() {
        cost.source_size = match (cost.source_size, known_len) {
            (Some(acc), Some(n)) => acc.checked_add(n),
            _ => None,
        };
    } else {
        cost.total_ops += 1;
        if node.is_barrier() {
            cost.barriers += 1;
        } else {
            cost.lazy_ops += 1;
        }
    }
    cost.total_cost += u64::from(node.cost_hint());

    steps.push(ExplainStep {
        step: 0,
        depth,
        label: node.label(),
        is_barrier: node.is_barrier(),
        cost_hint: node.cost_hint(),
        known_len,
    });
}

impl<T: Elem> Seq<T> {
    /// Describe this sequence without opening it. See [`explain`].
    #[must_use]
    pub fn explain(&self) -> ExecutionExplanation {
        explain(self)
    }
}

impl Display for ExecutionExplanation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        writeln!(
            f,
            "╔═══════════════════════════════════════════════════════════════╗"
        )?;
        writeln!(
            f,
            "║              SEQUENCE PLAN EXPLANATION                        ║"
        )?;
        writeln!(
            f,
            "╚═══════════════════════════════════════════════════════════════╝"
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "┌─ COST ESTIMATES ─────────────────────────────────────────────┐"
        )?;
        writeln!(
            f,
            "│ Source Size:       {:>10}",
            self.cost_estimate
                .source_size
                .map_or_else(|| "Unknown".to_string(), |s| s.to_string())
        )?;
        writeln!(f, "│ Total Operations:  {:>10}", self.cost_estimate.total_ops)?;
        writeln!(f, "│ Lazy Ops:          {:>10}", self.cost_estimate.lazy_ops)?;
        writeln!(f, "│ Barrier Ops:       {:>10}", self.cost_estimate.barriers)?;
        writeln!(f, "│ Total Cost:        {:>10}", self.cost_estimate.total_cost)?;
        writeln!(
            f,
            "└──────────────────────────────────────────────────────────────┘"
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "┌─ EXECUTION STEPS ────────────────────────────────────────────┐"
        )?;
        for step in &self.steps {
            let barrier_marker = if step.is_barrier { " [BARRIER]" } else { "" };
            let indent = "  ".repeat(step.depth);
            writeln!(f, "│")?;
            writeln!(f, "│ Step {}: {indent}{}{barrier_marker}", step.step, step.label)?;
            match step.known_len {
                Some(n) => writeln!(f, "│   {indent}Cost: {} ({n} elements)", step.cost_hint)?,
                None => writeln!(f, "│   {indent}Cost: {}", step.cost_hint)?,
            }
        }
        writeln!(f, "│")?;
        writeln!(
            f,
            "└──────────────────────────────────────────────────────────────┘"
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn steps_list_inputs_first() {
        let q = from_vec(vec![1, 2, 3]).map(|x: &i32| x + 1).take(2);
        let plan = q.explain();
        let labels: Vec<_> = plan.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels.len(), 3);
        assert_eq!(plan.steps[0].depth, 2);
        assert_eq!(plan.steps[2].depth, 0);
        assert_eq!(labels[1], "Map");
        assert_eq!(plan.cost_estimate.total_ops, 2);
        assert_eq!(plan.cost_estimate.lazy_ops, 2);
        assert_eq!(plan.cost_estimate.source_size, Some(3));
    }

    #[test]
    fn unbounded_source_has_unknown_size() {
        let plan = iota(0).take(5).order().explain();
        assert_eq!(plan.cost_estimate.source_size, None);
        assert_eq!(plan.cost_estimate.barriers, 1);
        assert!(plan.to_string().contains("[BARRIER]"));
        assert!(plan.to_string().contains("Unknown"));
    }

    #[test]
    fn concat_sums_leaf_sizes() {
        let plan = from_vec(vec![1, 2]).concat(from_vec(vec![3])).explain();
        assert_eq!(plan.cost_estimate.source_size, Some(3));
        assert_eq!(plan.steps.len(), 3);
    }
}
