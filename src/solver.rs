use crate::components::assert_single_component;
use crate::errors::{RunnerError, SolveError};
use crate::exact::{search_stream, BranchAndBound, CoverSolution};
use crate::preprocessing::GraphBuilder;
use crate::runner::{run_bounded, BoundedStream, TimeoutPolicy};
#[cfg(feature = "log")]
use log::info;
use std::time::Duration;

/// Front door wiring the pieces together: graph preprocessing, the
/// optional single-component check, the anytime search, and the
/// bounded runner when a per-step timeout is configured.
pub struct Solver {
    check_components: bool,
    per_step_timeout: Option<Duration>,
    timeout_policy: TimeoutPolicy,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            check_components: true,
            per_step_timeout: None,
            timeout_policy: TimeoutPolicy::Raise,
        }
    }
}

/// Either the search iterator itself or its isolated, per-step bounded
/// wrapping; both stream strictly improving covers.
pub enum CoverStream<F> {
    Direct(BranchAndBound<F>),
    Bounded(BoundedStream<CoverSolution>),
}

impl<F> Iterator for CoverStream<F>
where
    F: Fn(usize) -> f64,
{
    type Item = Result<CoverSolution, RunnerError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            CoverStream::Direct(search) => search.next().map(Ok),
            CoverStream::Bounded(stream) => stream.next(),
        }
    }
}

impl Solver {
    pub fn check_components(mut self, check_components: bool) -> Self {
        self.check_components = check_components;
        self
    }

    pub fn per_step_timeout(mut self, per_step_timeout: Option<Duration>) -> Self {
        self.per_step_timeout = per_step_timeout;
        self
    }

    pub fn timeout_policy(mut self, timeout_policy: TimeoutPolicy) -> Self {
        self.timeout_policy = timeout_policy;
        self
    }

    /// Builds the search input and returns the stream of improving
    /// covers. The caller decides how far to drain it; only draining
    /// it fully certifies the optimum.
    pub fn solve_stream<F>(
        &self,
        node_count: usize,
        edges: &[(usize, usize)],
        weight_fn: F,
    ) -> Result<CoverStream<F>, SolveError>
    where
        F: Fn(usize) -> f64 + Send + 'static,
    {
        let (graph, order) = GraphBuilder::build(node_count, edges, &weight_fn)?;
        #[cfg(feature = "log")]
        info!(
            "searching cover over {} of {} nodes carrying edges",
            graph.order(),
            node_count
        );
        if self.check_components {
            assert_single_component(&graph, node_count)?;
        }
        let stream = match self.per_step_timeout {
            Some(timeout) => CoverStream::Bounded(run_bounded(
                search_stream(graph, order, weight_fn),
                timeout,
                self.timeout_policy,
            )),
            None => CoverStream::Direct(search_stream(graph, order, weight_fn)),
        };
        Ok(stream)
    }

    /// Drains the stream and returns the optimum, or the best cover
    /// seen before a silent timeout ended the stream early.
    pub fn solve<F>(
        &self,
        node_count: usize,
        edges: &[(usize, usize)],
        weight_fn: F,
    ) -> Result<Option<CoverSolution>, SolveError>
    where
        F: Fn(usize) -> f64 + Send + 'static,
    {
        let mut best = None;
        for solution in self.solve_stream(node_count, edges, weight_fn)? {
            let solution = solution?;
            #[cfg(feature = "log")]
            info!(
                "improving cover: count={} weight={}",
                solution.count, solution.weight_sum
            );
            best = Some(solution);
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::Solver;
    use crate::errors::{ComponentError, SolveError};
    use crate::preprocessing::constant_weight;
    use crate::runner::TimeoutPolicy;
    use std::time::Duration;

    #[test]
    fn solves_a_triangle_end_to_end() {
        let best = Solver::default()
            .solve(3, &[(0, 1), (1, 2), (0, 2)], constant_weight)
            .unwrap()
            .unwrap();
        assert_eq!(best.count, 2);
        assert_eq!(best.weight_sum, 2.0);
    }

    #[test]
    fn bounded_and_direct_runs_agree() {
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (1, 3)];
        let direct = Solver::default()
            .solve(5, &edges, constant_weight)
            .unwrap()
            .unwrap();
        let bounded = Solver::default()
            .per_step_timeout(Some(Duration::from_secs(5)))
            .timeout_policy(TimeoutPolicy::Raise)
            .solve(5, &edges, constant_weight)
            .unwrap()
            .unwrap();
        assert_eq!(direct.count, bounded.count);
        assert_eq!(direct.weight_sum, bounded.weight_sum);
    }

    #[test]
    fn component_check_rejects_split_input() {
        let edges = vec![(0, 1), (2, 3)];
        let err = Solver::default()
            .solve(4, &edges, constant_weight)
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::Component(ComponentError::MultiComponent)
        );
    }

    #[test]
    fn component_check_can_be_disabled() {
        // callers owning pre-verified input may skip the traversal;
        // per-component optima are then not guaranteed, covers are
        let best = Solver::default()
            .check_components(false)
            .solve(4, &[(0, 1), (2, 3)], constant_weight)
            .unwrap()
            .unwrap();
        assert_eq!(best.count, 2);
    }
}
