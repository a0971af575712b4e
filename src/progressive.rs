use crate::exact::CoverSolution;
use crate::graph::CoverGraph;
use fxhash::FxHashSet;

/// Capability set for search problems that report incremental progress.
/// Generic drivers can describe a problem, fold streamed progress into
/// it, query the best solution so far and verify a claimed solution.
///
/// Carried as plain scaffolding: nothing in this crate depends on it,
/// it exists so the cover search can be plugged into such a driver.
pub trait ProgressiveProblem {
    type Progress;
    type Solution;

    fn describe(&self) -> String;
    fn merge_progress(self, progress: Self::Progress) -> Self;
    fn current_solution(&self) -> Option<&Self::Solution>;
    fn verify(&self, solution: &Self::Solution) -> bool;
}

/// A vertex cover instance together with the best cover streamed so
/// far. Folding the searcher's output through `merge_progress` keeps
/// `current_solution` at the incumbent.
pub struct CoverProblem {
    graph: CoverGraph,
    node_count: usize,
    best: Option<CoverSolution>,
}

impl CoverProblem {
    pub fn new(graph: CoverGraph, node_count: usize) -> Self {
        Self {
            graph,
            node_count,
            best: None,
        }
    }
}

fn improves(challenger: &CoverSolution, incumbent: &CoverSolution) -> bool {
    challenger.count < incumbent.count
        || (challenger.count == incumbent.count && challenger.weight_sum < incumbent.weight_sum)
}

impl ProgressiveProblem for CoverProblem {
    type Progress = CoverSolution;
    type Solution = CoverSolution;

    fn describe(&self) -> String {
        format!(
            "minimum-weight vertex cover over {} nodes and {} covered ones",
            self.node_count,
            self.graph.order()
        )
    }

    fn merge_progress(mut self, progress: CoverSolution) -> Self {
        let adopt = match self.best.as_ref() {
            None => true,
            Some(incumbent) => improves(&progress, incumbent),
        };
        if adopt {
            self.best = Some(progress);
        }
        self
    }

    fn current_solution(&self) -> Option<&CoverSolution> {
        self.best.as_ref()
    }

    fn verify(&self, solution: &CoverSolution) -> bool {
        let chosen: FxHashSet<usize> = solution.cover.iter().copied().collect();
        self.graph.vertices().all(|u| {
            chosen.contains(&u)
                || self
                    .graph
                    .neighborhood(u)
                    .iter()
                    .all(|v| chosen.contains(v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CoverProblem, ProgressiveProblem};
    use crate::exact::CoverSolution;
    use crate::preprocessing::GraphBuilder;

    fn triangle_problem() -> CoverProblem {
        let edges = vec![(0, 1), (1, 2), (0, 2)];
        let (graph, _) = GraphBuilder::build_unweighted(3, &edges).unwrap();
        CoverProblem::new(graph, 3)
    }

    fn solution(cover: Vec<usize>) -> CoverSolution {
        let count = cover.len();
        CoverSolution {
            cover,
            count,
            weight_sum: count as f64,
        }
    }

    #[test]
    fn verify_accepts_covers_and_rejects_non_covers() {
        let problem = triangle_problem();
        assert!(problem.verify(&solution(vec![0, 1])));
        assert!(problem.verify(&solution(vec![0, 1, 2])));
        // edge (1, 2) is uncovered
        assert!(!problem.verify(&solution(vec![0])));
    }

    #[test]
    fn merge_keeps_the_incumbent_unless_beaten() {
        let problem = triangle_problem()
            .merge_progress(solution(vec![0, 1, 2]))
            .merge_progress(solution(vec![0, 1]));
        assert_eq!(problem.current_solution().unwrap().count, 2);

        // an equal challenger does not replace the incumbent
        let problem = problem.merge_progress(solution(vec![1, 2]));
        assert_eq!(problem.current_solution().unwrap().cover, vec![0, 1]);
    }

    #[test]
    fn describe_names_the_instance() {
        let problem = triangle_problem();
        assert!(problem.describe().contains("3 nodes"));
    }
}
