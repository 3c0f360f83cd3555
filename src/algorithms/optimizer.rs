use tracing::{debug, info, warn};

use crate::{
    algorithms::AnnealingDecision,
    core::{
        CountingObjective, OptimizationData, OptimizationSummary, Point, SimplexOptimizerConfig,
        SimplexStatus,
    },
    error::{Budget, SimplexError, SimplexResult},
    traits::{ConvergenceChecker, CostFunction, Observer},
};

/// A derivative-free optimizer which drives a [`Simplex`](crate::algorithms::Simplex) until a
/// [`ConvergenceChecker`] is satisfied by every vertex, optionally perturbing the best vertex with
/// a [`SimulatedAnnealing`](crate::algorithms::SimulatedAnnealing) policy.
///
/// Each run goes through the following steps:
///
/// 0. Apply the given [`OptimizationData`] on top of the settings of earlier runs and validate
///    them. Nothing is evaluated if this fails.
/// 1. Build the simplex at the starting point, evaluate every vertex, and take the best vertex as
///    the best point so far.
/// 2. From the second pass on, stop if the checker accepts every pair of vertices at the same
///    index in the simplex before and after the previous pass.
/// 3. Take one simplex step and update the best point if the best vertex improved on it.
/// 4. While the annealing policy is active, propose a replacement for the best vertex and, if it
///    is accepted, write it into the simplex and update the best point again.
/// 5. Count the iteration, report to the observers, and go to **Step 2**.
///
/// The returned point is the best point ever evaluated. Annealing can move the simplex away from
/// it, so it is not necessarily a vertex of the final simplex.
pub struct SimplexOptimizer {
    /// The [`SimplexStatus`] of the most recent run.
    pub status: SimplexStatus,
    checker: Box<dyn ConvergenceChecker>,
    observers: Vec<Box<dyn Observer>>,
    config: SimplexOptimizerConfig,
}

impl SimplexOptimizer {
    /// Create an optimizer which stops when `checker` accepts every vertex.
    pub fn new<C: ConvergenceChecker + 'static>(checker: C) -> Self {
        Self {
            status: SimplexStatus::default(),
            checker: Box::new(checker),
            observers: Vec::default(),
            config: SimplexOptimizerConfig::default(),
        }
    }
    /// Attach an [`Observer`] which is notified after every iteration and every annealing
    /// decision.
    pub fn with_observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }
    /// Apply configuration items without running.
    pub fn configure<I: IntoIterator<Item = OptimizationData>>(&mut self, data: I) -> &mut Self {
        for item in data {
            self.config.apply(item);
        }
        self
    }
    /// The settings which the next run will start from.
    pub const fn config(&self) -> &SimplexOptimizerConfig {
        &self.config
    }
    /// Apply `data` and run the search on `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] or [`SimplexError::UnsupportedConstraint`]
    /// before any evaluation if the settings cannot work, [`SimplexError::BudgetExhausted`] if the
    /// evaluation or iteration budget runs out, and [`SimplexError::Objective`] if `problem`
    /// fails. No partial result is returned in any of these cases.
    pub fn optimize<P, U, E, I>(
        &mut self,
        problem: &P,
        args: &U,
        data: I,
    ) -> SimplexResult<OptimizationSummary, E>
    where
        P: CostFunction<U, E> + ?Sized,
        I: IntoIterator<Item = OptimizationData>,
    {
        self.configure(data);
        let result = self.search(problem, args);
        match &result {
            Ok(summary) => info!(
                iterations = summary.iterations,
                evaluations = summary.cost_evals,
                fx = summary.fx,
                "simplex search converged"
            ),
            Err(SimplexError::BudgetExhausted { budget, limit }) => warn!(
                %budget,
                limit,
                iteration = self.status.iteration,
                fx = self.status.fx,
                "budget exhausted before convergence"
            ),
            Err(_) => {}
        }
        result
    }

    fn search<P, U, E>(&mut self, problem: &P, args: &U) -> SimplexResult<OptimizationSummary, E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        self.config.validate().map_err(SimplexError::widen)?;
        let Self {
            status,
            checker,
            observers,
            config,
        } = self;
        let (Some(simplex_config), Some(x0)) = (config.simplex.as_ref(), config.x0.as_ref()) else {
            return Err(SimplexError::invalid("optimizer is missing a simplex or a start point"));
        };
        let goal = config.goal;
        let max_iterations = config.max_iterations;
        let mut simplex = simplex_config.build(x0).map_err(SimplexError::widen)?;
        status.with_x0(x0.iter().copied());
        status.reset();
        let mut objective: CountingObjective<'_, P, U, E> =
            CountingObjective::new(problem, args, config.max_evaluations);
        if let Some(annealing) = config.annealing.as_mut() {
            annealing.reset_counters();
        }

        simplex.evaluate(&mut objective, goal)?;
        let mut best = simplex.best().clone();
        status.with_position((best.x.clone(), best.fx_checked()));
        status.n_f_evals = objective.evaluations();
        debug!(
            dimension = simplex.dimension(),
            fx = status.fx,
            evaluations = status.n_f_evals,
            "initial simplex evaluated"
        );

        let mut iteration = 0;
        let mut previous: Vec<Point> = Vec::with_capacity(simplex.size());
        loop {
            if iteration > 0
                && previous
                    .iter()
                    .zip(simplex.points())
                    .all(|(p, c)| checker.converged(iteration, p, c))
            {
                break;
            }
            previous.clear();
            previous.extend_from_slice(simplex.points());

            let kind = simplex.iterate(&mut objective, goal)?;
            if goal.is_better(simplex.best(), &best) {
                best = simplex.best().clone();
            }

            if let Some(annealing) = config.annealing.as_mut() {
                if annealing.is_active(iteration) {
                    let candidate = annealing.propose(&simplex, 0, &mut objective)?;
                    let current = simplex.best().fx_checked();
                    let accepted =
                        annealing.accept(current, candidate.fx_checked(), goal, iteration);
                    let decision = AnnealingDecision {
                        iteration,
                        temperature: annealing.temperature(iteration),
                        current,
                        candidate: candidate.fx_checked(),
                        accepted,
                    };
                    debug!(
                        iteration,
                        temperature = decision.temperature,
                        current,
                        candidate = decision.candidate,
                        accepted,
                        "annealing decision"
                    );
                    for observer in observers.iter_mut() {
                        observer.observe_annealing(iteration, &decision);
                    }
                    if accepted {
                        if goal.is_better(&candidate, &best) {
                            best = candidate.clone();
                        }
                        simplex.set_point(0, candidate).map_err(SimplexError::widen)?;
                    }
                }
            }

            iteration += 1;
            status.iteration = iteration;
            status.n_f_evals = objective.evaluations();
            status.with_position((best.x.clone(), best.fx_checked()));
            status.with_message(kind.message());
            if iteration > max_iterations {
                return Err(SimplexError::BudgetExhausted {
                    budget: Budget::Iterations,
                    limit: max_iterations,
                });
            }
            debug!(
                iteration,
                step = kind.message(),
                fx = status.fx,
                evaluations = status.n_f_evals,
                "simplex iteration"
            );
            for observer in observers.iter_mut() {
                observer.observe_step(iteration, status);
            }
        }

        status.set_converged();
        status.with_message("CONVERGED");
        let (annealing_accepted, annealing_rejected) = config
            .annealing
            .as_ref()
            .map_or((0, 0), |a| (a.accepted(), a.rejected()));
        let (x, fx) = best.destructure();
        Ok(OptimizationSummary {
            goal,
            message: status.message.clone(),
            x0: status.x0.iter().copied().collect(),
            x: x.iter().copied().collect(),
            fx,
            iterations: iteration,
            cost_evals: objective.evaluations(),
            annealing_accepted,
            annealing_rejected,
            converged: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::{CoolingSchedule, SimplexConfig, SimplexLayout, SimulatedAnnealing},
        core::{Bound, GoalType, HistoryObserver, SimplePointChecker, SimpleValueChecker},
        test_functions::{Paraboloid, TwoWells},
        DVector, Float,
    };
    use approx::assert_relative_eq;
    use std::{cell::Cell, convert::Infallible, rc::Rc};

    struct Counted<F> {
        f: F,
        calls: Cell<usize>,
    }
    impl<F: Fn(&DVector<Float>) -> Float> CostFunction for Counted<F> {
        fn evaluate(&self, x: &DVector<Float>, _: &()) -> Result<Float, Infallible> {
            self.calls.set(self.calls.get() + 1);
            Ok((self.f)(x))
        }
    }
    fn counted<F: Fn(&DVector<Float>) -> Float>(f: F) -> Counted<F> {
        Counted {
            f,
            calls: Cell::new(0),
        }
    }

    fn bowl(x: &DVector<Float>) -> Float {
        (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2)
    }

    fn nelder_mead_2d() -> OptimizationData {
        SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.0)).into()
    }

    #[test]
    fn test_two_dimensional_minimization() {
        let mut optimizer = SimplexOptimizer::new(
            SimplePointChecker::new(1e-10, 1e-10).and(SimpleValueChecker::new(1e-10, 1e-10)),
        );
        let summary = optimizer
            .optimize(
                &Paraboloid::new(vec![1.0, 2.0]),
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.0, 0.0]),
                    nelder_mead_2d(),
                    GoalType::Minimize.into(),
                ],
            )
            .unwrap();
        assert!(summary.converged);
        assert!(summary.iterations < 100);
        assert_relative_eq!(summary.x[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(summary.x[1], 2.0, epsilon = 1e-8);
        assert!(summary.fx < 1e-12);
        assert_eq!(summary.x0, vec![0.0, 0.0]);
        assert!(optimizer.status.converged);
        assert_eq!(optimizer.status.iteration, summary.iterations);
        assert_eq!(optimizer.status.n_f_evals, summary.cost_evals);
    }

    #[test]
    fn test_bounds_are_rejected_before_any_evaluation() {
        let problem = counted(bowl);
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::default());
        let result = optimizer.optimize(
            &problem,
            &(),
            [
                OptimizationData::InitialGuess(vec![0.0, 0.0]),
                nelder_mead_2d(),
                OptimizationData::Bounds(vec![(-1.0, 1.0).into(), (-1.0, 1.0).into()]),
            ],
        );
        assert!(matches!(
            result,
            Err(SimplexError::UnsupportedConstraint(_))
        ));
        assert_eq!(problem.calls.get(), 0);
    }

    #[test]
    fn test_unconstraining_bounds_are_accepted() {
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10));
        let summary = optimizer
            .optimize(
                &counted(bowl),
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.0, 0.0]),
                    nelder_mead_2d(),
                    OptimizationData::Bounds(vec![Bound::NoBound; 2]),
                ],
            )
            .unwrap();
        assert!(summary.converged);
    }

    #[test]
    fn test_invalid_configurations() {
        let problem = counted(bowl);
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::default());
        let missing_simplex =
            optimizer.optimize(&problem, &(), [OptimizationData::InitialGuess(vec![0.0, 0.0])]);
        assert!(matches!(
            missing_simplex,
            Err(SimplexError::InvalidConfiguration(_))
        ));

        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::default());
        let missing_start = optimizer.optimize(&problem, &(), [nelder_mead_2d()]);
        assert!(matches!(
            missing_start,
            Err(SimplexError::InvalidConfiguration(_))
        ));

        let mismatch = optimizer.optimize(
            &problem,
            &(),
            [OptimizationData::InitialGuess(vec![0.0, 0.0, 0.0])],
        );
        assert!(matches!(
            mismatch,
            Err(SimplexError::InvalidConfiguration(_))
        ));

        let degenerate = optimizer.optimize(
            &problem,
            &(),
            [
                OptimizationData::InitialGuess(vec![0.0, 0.0]),
                SimplexConfig::nelder_mead(SimplexLayout::from_steps([1.0, 0.0])).into(),
            ],
        );
        assert!(matches!(
            degenerate,
            Err(SimplexError::InvalidConfiguration(_))
        ));
        assert_eq!(problem.calls.get(), 0);
    }

    #[test]
    fn test_best_never_regresses() {
        let history = HistoryObserver::build();
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-12))
            .with_observer(history.clone());
        let summary = optimizer
            .optimize(
                &TwoWells::default(),
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.05, 0.05]),
                    SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.5)).into(),
                    SimulatedAnnealing::with_seed(
                        400,
                        CoolingSchedule::Geometric {
                            initial: 5.0,
                            alpha: 0.99,
                        },
                        1,
                    )
                    .into(),
                ],
            )
            .unwrap();
        let history = history.read();
        assert_eq!(history.steps.len(), summary.iterations);
        assert!(history.steps.windows(2).all(|w| w[1].fx <= w[0].fx));
        assert_eq!(
            history.decisions.len(),
            summary.annealing_accepted + summary.annealing_rejected
        );
        assert!(history.decisions.iter().any(|d| d.accepted && d.candidate > d.current));
        let last = history.steps.last().unwrap();
        assert_eq!(last.fx, summary.fx);
    }

    #[test]
    fn test_convergence_requires_every_vertex() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        // the third pair (of three) never passes
        let stubborn = move |_: usize, _: &Point, _: &Point| {
            let call = counter.get();
            counter.set(call + 1);
            call % 3 != 2
        };
        let mut optimizer = SimplexOptimizer::new(stubborn);
        let result = optimizer.optimize(
            &counted(bowl),
            &(),
            [
                OptimizationData::InitialGuess(vec![0.0, 0.0]),
                nelder_mead_2d(),
                OptimizationData::MaxIterations(20),
            ],
        );
        assert_eq!(
            result,
            Err(SimplexError::BudgetExhausted {
                budget: Budget::Iterations,
                limit: 20
            })
        );
        assert_eq!(calls.get(), 20 * 3);
    }

    #[test]
    fn test_first_check_follows_first_iteration() {
        let mut optimizer = SimplexOptimizer::new(|_: usize, _: &Point, _: &Point| true);
        let summary = optimizer
            .optimize(
                &counted(bowl),
                &(),
                [OptimizationData::InitialGuess(vec![0.0, 0.0]), nelder_mead_2d()],
            )
            .unwrap();
        assert_eq!(summary.iterations, 1);
    }

    fn step_evaluations(message: &str, n: usize) -> usize {
        match message {
            "REFLECT" => 1,
            "EXPAND" | "CONTRACT OUT" | "CONTRACT IN" => 2,
            "SHRINK" => n + 2,
            _ => 2 * n,
        }
    }

    #[test]
    fn test_evaluation_accounting_nelder_mead() {
        let history = HistoryObserver::build();
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10))
            .with_observer(history.clone());
        let problem = counted(|x: &DVector<Float>| {
            x.iter()
                .enumerate()
                .map(|(i, v)| (i as Float + 1.0) * (v - 0.5).powi(2))
                .sum()
        });
        let summary = optimizer
            .optimize(
                &problem,
                &(),
                [
                    OptimizationData::InitialGuess(vec![3.0, -1.0, 2.0]),
                    SimplexConfig::nelder_mead(SimplexLayout::orthogonal(3, 1.0)).into(),
                ],
            )
            .unwrap();
        let history = history.read();
        let mut expected = 4;
        for status in history.steps.iter() {
            expected += step_evaluations(&status.message, 3);
            assert_eq!(status.n_f_evals, expected);
        }
        assert_eq!(summary.cost_evals, expected);
        assert_eq!(problem.calls.get(), expected);
    }

    #[test]
    fn test_evaluation_accounting_multi_directional() {
        let history = HistoryObserver::build();
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10))
            .with_observer(history.clone());
        let summary = optimizer
            .optimize(
                &Paraboloid::new(vec![1.0, 2.0]),
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.0, 0.0]),
                    SimplexConfig::multi_directional(SimplexLayout::orthogonal(2, 1.0)).into(),
                ],
            )
            .unwrap();
        for (k, status) in history.read().steps.iter().enumerate() {
            assert_eq!(status.n_f_evals, 3 + (k + 1) * 4);
        }
        assert_eq!(summary.cost_evals, 3 + summary.iterations * 4);
        assert!(summary.converged);
        assert_relative_eq!(summary.x[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(summary.x[1], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_maximize() {
        let hill = |x: &DVector<Float>, _: &()| -> Result<Float, Infallible> { Ok(-bowl(x)) };
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10));
        let summary = optimizer
            .optimize(
                &hill,
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.0, 0.0]),
                    nelder_mead_2d(),
                    GoalType::Maximize.into(),
                ],
            )
            .unwrap();
        assert_eq!(summary.goal, GoalType::Maximize);
        assert_relative_eq!(summary.x[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(summary.x[1], 2.0, epsilon = 1e-4);
        assert!(summary.fx <= 0.0);
        assert!(summary.fx > -1e-8);
    }

    #[test]
    fn test_configuration_is_reused() {
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10));
        let problem = Paraboloid::new(vec![1.0, 2.0]);
        let first = optimizer
            .optimize(
                &problem,
                &(),
                [OptimizationData::InitialGuess(vec![0.0, 0.0]), nelder_mead_2d()],
            )
            .unwrap();
        let second = optimizer
            .optimize(&problem, &(), [OptimizationData::InitialGuess(vec![4.0, 4.0])])
            .unwrap();
        assert!(first.converged && second.converged);
        assert_eq!(second.x0, vec![4.0, 4.0]);
        assert_relative_eq!(second.x[0], 1.0, epsilon = 1e-4);
        let repeat = optimizer
            .optimize(&problem, &(), Vec::<OptimizationData>::new())
            .unwrap();
        assert_eq!(repeat, second);
    }

    #[test]
    fn test_evaluation_budget() {
        let problem = counted(bowl);
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-10));
        let result = optimizer.optimize(
            &problem,
            &(),
            [
                OptimizationData::InitialGuess(vec![0.0, 0.0]),
                nelder_mead_2d(),
                OptimizationData::MaxEvaluations(10),
            ],
        );
        assert_eq!(
            result,
            Err(SimplexError::BudgetExhausted {
                budget: Budget::Evaluations,
                limit: 10
            })
        );
        assert_eq!(problem.calls.get(), 10);
        assert!(!optimizer.status.converged);
    }

    #[test]
    fn test_objective_errors_propagate() {
        let calls = Cell::new(0);
        let flaky = |x: &DVector<Float>, _: &()| -> Result<Float, String> {
            calls.set(calls.get() + 1);
            if calls.get() > 5 {
                Err("lost connection".to_string())
            } else {
                Ok(bowl(x))
            }
        };
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::default());
        let result = optimizer.optimize(
            &flaky,
            &(),
            [OptimizationData::InitialGuess(vec![0.0, 0.0]), nelder_mead_2d()],
        );
        assert_eq!(
            result,
            Err(SimplexError::Objective("lost connection".to_string()))
        );
    }

    fn two_wells(annealing: Option<SimulatedAnnealing>) -> OptimizationSummary {
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-12));
        let mut data = vec![
            OptimizationData::InitialGuess(vec![0.05, 0.05]),
            SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.5)).into(),
        ];
        data.extend(annealing.map(OptimizationData::from));
        optimizer.optimize(&TwoWells::default(), &(), data).unwrap()
    }

    fn generous(seed: u64) -> SimulatedAnnealing {
        SimulatedAnnealing::with_seed(
            400,
            CoolingSchedule::Geometric {
                initial: 5.0,
                alpha: 0.99,
            },
            seed,
        )
    }

    #[test]
    fn test_without_annealing_stays_in_local_well() {
        let summary = two_wells(None);
        assert!(summary.converged);
        assert!(summary.fx > -1.5);
        assert!(summary.x.iter().all(|v| v.abs() < 0.2));
        assert_eq!(summary.annealing_accepted + summary.annealing_rejected, 0);
    }

    #[test]
    fn test_annealing_escapes_local_well() {
        let escaped = (0..20)
            .filter(|&seed| two_wells(Some(generous(seed))).fx < -1.5)
            .count();
        assert!(escaped > 10, "only {} of 20 runs escaped", escaped);
    }

    #[test]
    fn test_annealing_runs_are_reproducible() {
        assert_eq!(two_wells(Some(generous(3))), two_wells(Some(generous(3))));
    }

    #[test]
    fn test_disable_annealing() {
        let mut optimizer = SimplexOptimizer::new(SimpleValueChecker::new(1e-10, 1e-12));
        let annealed = optimizer
            .optimize(
                &TwoWells::default(),
                &(),
                [
                    OptimizationData::InitialGuess(vec![0.05, 0.05]),
                    SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.5)).into(),
                    generous(0).into(),
                ],
            )
            .unwrap();
        assert!(annealed.annealing_accepted + annealed.annealing_rejected > 0);
        let plain = optimizer
            .optimize(&TwoWells::default(), &(), [OptimizationData::DisableAnnealing])
            .unwrap();
        assert_eq!(plain, two_wells(None));
    }
}
