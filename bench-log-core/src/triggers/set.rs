//! Combination of several triggers into a single one

use super::Trigger;
use crate::types::{EvaluationSnapshot, ProblemDescriptor};

/// How the members of a [`TriggerSet`] are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combination {
    /// Logical "or". An empty set never fires.
    #[default]
    Any,
    /// Logical "and". An empty set always fires.
    All,
}

/// Ordered collection of triggers under a combination policy
///
/// Members are evaluated in insertion order and evaluation stops at the first
/// member that decides the result, so stateful members placed after a
/// deciding one do not see that event. `reset()` always reaches every member.
#[derive(Default)]
pub struct TriggerSet {
    combination: Combination,
    triggers: Vec<Box<dyn Trigger>>,
}

impl TriggerSet {
    /// Create a set with the given policy and members
    pub fn new(combination: Combination, triggers: Vec<Box<dyn Trigger>>) -> Self {
        Self {
            combination,
            triggers,
        }
    }

    /// Append a member
    pub fn push(&mut self, trigger: Box<dyn Trigger>) {
        self.triggers.push(trigger);
    }

    /// Builder method: append a member
    pub fn with(mut self, trigger: Box<dyn Trigger>) -> Self {
        self.push(trigger);
        self
    }

    pub fn combination(&self) -> Combination {
        self.combination
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl std::fmt::Debug for TriggerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerSet")
            .field("combination", &self.combination)
            .field("len", &self.triggers.len())
            .finish()
    }
}

impl Trigger for TriggerSet {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, problem: &ProblemDescriptor) -> bool {
        match self.combination {
            Combination::Any => self.triggers.iter_mut().any(|t| t.evaluate(snapshot, problem)),
            Combination::All => self.triggers.iter_mut().all(|t| t.evaluate(snapshot, problem)),
        }
    }

    fn reset(&mut self) {
        for trigger in &mut self.triggers {
            trigger.reset();
        }
    }
}

/// Do log if ANY of the given triggers fires
pub fn any(triggers: Vec<Box<dyn Trigger>>) -> TriggerSet {
    TriggerSet::new(Combination::Any, triggers)
}

/// Do log if ALL the given triggers fire
pub fn all(triggers: Vec<Box<dyn Trigger>>) -> TriggerSet {
    TriggerSet::new(Combination::All, triggers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::tests::{problem, snapshot};
    use crate::triggers::{always, on_improvement, Always};
    use crate::types::OptimizationType;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Returns a fixed answer and counts calls
    struct Fixed {
        answer: bool,
        calls: Rc<Cell<usize>>,
        resets: Rc<Cell<usize>>,
    }

    fn fixed(answer: bool) -> (Box<dyn Trigger>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let resets = Rc::new(Cell::new(0));
        let trigger = Fixed {
            answer,
            calls: calls.clone(),
            resets: resets.clone(),
        };
        (Box::new(trigger), calls, resets)
    }

    impl Trigger for Fixed {
        fn evaluate(&mut self, _: &EvaluationSnapshot, _: &ProblemDescriptor) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.answer
        }

        fn reset(&mut self) {
            self.resets.set(self.resets.get() + 1);
        }
    }

    #[test]
    fn test_empty_sets() {
        assert!(!any(vec![]).evaluate(&snapshot(0.0, 1), &problem()));
        assert!(all(vec![]).evaluate(&snapshot(0.0, 1), &problem()));
    }

    #[test]
    fn test_any_short_circuits() {
        let (first, first_calls, _) = fixed(true);
        let (second, second_calls, _) = fixed(false);
        let mut set = any(vec![first, second]);
        assert!(set.evaluate(&snapshot(0.0, 1), &problem()));
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_all_short_circuits() {
        let (first, _, _) = fixed(false);
        let (second, second_calls, _) = fixed(true);
        let mut set = all(vec![first, second]);
        assert!(!set.evaluate(&snapshot(0.0, 1), &problem()));
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_reset_reaches_every_member() {
        let (first, _, first_resets) = fixed(true);
        let (second, _, second_resets) = fixed(true);
        let mut set = any(vec![first, second]);
        set.reset();
        assert_eq!(first_resets.get(), 1);
        assert_eq!(second_resets.get(), 1);
    }

    #[test]
    fn test_nested_sets() {
        let inner: Box<dyn Trigger> = Box::new(any(vec![on_improvement(
            OptimizationType::Minimization,
        )]));
        let mut set = all(vec![always(), inner]);
        assert!(set.evaluate(&snapshot(2.0, 1), &problem()));
        assert!(!set.evaluate(&snapshot(2.0, 2), &problem()));
        set.reset();
        assert!(set.evaluate(&snapshot(2.0, 1), &problem()));
    }

    #[test]
    fn test_builder() {
        let set = TriggerSet::default().with(Box::new(Always));
        assert_eq!(set.len(), 1);
        assert_eq!(set.combination(), Combination::Any);
    }
}
