//! Property-based tests for triggers and the attainment grid.
//!
//! - any/all over fixed answers behave like boolean OR/AND
//! - OnImprovement fires exactly on strict improvements
//! - the ECDF total never decreases while a run is logged

use proptest::prelude::*;

use bench_log_core::{
    all as all_of, any as any_of, EcdfConfig, EcdfLogger, EcdfSum, EvaluationSnapshot, Logger,
    OnImprovement, OptimizationType, ProblemDescriptor, Reducer, Trigger,
};

/// Trigger returning a fixed answer
struct Fixed(bool);

impl Trigger for Fixed {
    fn evaluate(&mut self, _snapshot: &EvaluationSnapshot, _problem: &ProblemDescriptor) -> bool {
        self.0
    }
}

fn fixed(answers: &[bool]) -> Vec<Box<dyn Trigger>> {
    answers
        .iter()
        .map(|&a| Box::new(Fixed(a)) as Box<dyn Trigger>)
        .collect()
}

fn snapshot(y: f64, best: f64, evaluations: usize) -> EvaluationSnapshot {
    EvaluationSnapshot {
        raw_y: y,
        transformed_y: y,
        raw_y_best: best,
        transformed_y_best: best,
        evaluations,
        optimum: None,
    }
}

proptest! {
    #[test]
    fn test_any_is_or(answers in prop::collection::vec(any::<bool>(), 0..8)) {
        let problem = ProblemDescriptor::new(1, 1, 2);
        let mut set = any_of(fixed(&answers));
        let expected = answers.iter().any(|&a| a);
        prop_assert_eq!(set.evaluate(&snapshot(1.0, 1.0, 1), &problem), expected);
    }

    #[test]
    fn test_all_is_and(answers in prop::collection::vec(any::<bool>(), 0..8)) {
        let problem = ProblemDescriptor::new(1, 1, 2);
        let mut set = all_of(fixed(&answers));
        let expected = answers.iter().all(|&a| a);
        prop_assert_eq!(set.evaluate(&snapshot(1.0, 1.0, 1), &problem), expected);
    }

    #[test]
    fn test_improvement_is_strict(values in prop::collection::vec(-1e3f64..1e3, 1..50)) {
        let problem = ProblemDescriptor::new(1, 1, 2);
        let mut trigger = OnImprovement::new(OptimizationType::Minimization);
        let mut best = f64::INFINITY;
        for (i, &y) in values.iter().enumerate() {
            let fired = trigger.evaluate(&snapshot(y, best.min(y), i + 1), &problem);
            prop_assert_eq!(fired, y < best);
            best = best.min(y);
        }
        prop_assert_eq!(trigger.best(), Some(best));
    }

    #[test]
    fn test_ecdf_total_is_monotone(values in prop::collection::vec(0.0f64..120.0, 1..80)) {
        let config = EcdfConfig::new(0.0, 100.0, 20, 0.0, 100.0, 20);
        let mut logger = EcdfLogger::new(config).unwrap();
        logger.attach_problem(&ProblemDescriptor::new(1, 1, 2));

        let mut best = f64::INFINITY;
        let mut previous = 0;
        for (i, &y) in values.iter().enumerate() {
            best = best.min(y);
            logger.log(&snapshot(y, best, i + 1)).unwrap();
            let total = EcdfSum.reduce(logger.data());
            prop_assert!(total >= previous);
            prop_assert!(total <= 20 * 20);
            previous = total;
        }
        prop_assert_eq!(logger.size().runs, 1);
    }
}
