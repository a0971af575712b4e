use crate::graph::CoverGraph;

/// An improving vertex cover reported by the search, with its derived
/// objective. `cover` lists the chosen nodes in decision order.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverSolution {
    pub cover: Vec<usize>,
    pub count: usize,
    pub weight_sum: f64,
}

struct Frame {
    decision_index: usize,
    candidate: Vec<usize>,
    weight_sum: f64,
    graph: CoverGraph,
}

/// Anytime exact search for a minimum-weight vertex cover.
///
/// Yields every cover that strictly improves on the best one seen so
/// far under the lexicographic objective `(count, weight_sum)`; the
/// last solution before exhaustion is a provable optimum. Optimality is
/// certified only by draining the iterator, not by stopping early.
///
/// The recursion over decision indices runs as an explicit frame stack
/// so that consumption stays lazy and the search can be dropped at any
/// point. A fresh search over the same input is started by constructing
/// a new value; no state survives across runs.
pub struct BranchAndBound<F> {
    order: Vec<usize>,
    weight_fn: F,
    stack: Vec<Frame>,
    best_count: usize,
    best_weight: f64,
}

/// Streams strictly improving covers of `graph` along `order`.
///
/// `graph` and `order` come from
/// [`GraphBuilder::build`](crate::preprocessing::GraphBuilder::build);
/// `weight_fn` must be the function the order was built with.
pub fn search_stream<F>(graph: CoverGraph, order: Vec<usize>, weight_fn: F) -> BranchAndBound<F>
where
    F: Fn(usize) -> f64,
{
    BranchAndBound {
        order,
        weight_fn,
        stack: vec![Frame {
            decision_index: 0,
            candidate: Vec::new(),
            weight_sum: 0.0,
            graph,
        }],
        best_count: usize::MAX,
        best_weight: f64::INFINITY,
    }
}

impl<F> Iterator for BranchAndBound<F>
where
    F: Fn(usize) -> f64,
{
    type Item = CoverSolution;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let count = frame.candidate.len();

            // The objective only grows under further decisions, so a
            // partial candidate that cannot strictly beat the best
            // found closes its whole subtree.
            if count > self.best_count {
                continue;
            }
            if count == self.best_count && frame.weight_sum >= self.best_weight {
                continue;
            }

            if frame.graph.is_empty() {
                // no uncovered edge left: a complete, improving cover
                self.best_count = count;
                self.best_weight = frame.weight_sum;
                return Some(CoverSolution {
                    cover: frame.candidate,
                    count,
                    weight_sum: frame.weight_sum,
                });
            }

            if frame.decision_index >= self.order.len() {
                // edges remain but every node has been decided
                continue;
            }

            let node = self.order[frame.decision_index];
            let include = if frame.graph.has_vertex(node) {
                let mut candidate = frame.candidate.clone();
                candidate.push(node);
                Some(Frame {
                    decision_index: frame.decision_index + 1,
                    candidate,
                    weight_sum: frame.weight_sum + (self.weight_fn)(node),
                    graph: frame.graph.without_vertex(node),
                })
            } else {
                // already removed by an earlier inclusion: skipping is
                // the only branch
                None
            };

            self.stack.push(Frame {
                decision_index: frame.decision_index + 1,
                candidate: frame.candidate,
                weight_sum: frame.weight_sum,
                graph: frame.graph,
            });
            if let Some(include) = include {
                // pushed last so inclusion is explored first; reaching
                // a feasible cover early makes the bound bite sooner
                self.stack.push(include);
            }
        }
        None
    }
}
