use std::time::Duration;
use thiserror::Error;

/// Caller misuse when assembling the input graph. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("edge ({u}, {v}) references unknown node {offending}, node count is {node_count}")]
    UnknownNode {
        u: usize,
        v: usize,
        offending: usize,
        node_count: usize,
    },

    #[error("cannot build a coverable graph from an empty node or edge set")]
    EmptyNodeSet,
}

/// Raised by the optional single-component precondition check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("graph splits into more than one connected component, search each component separately")]
    MultiComponent,

    #[error("only {covered} of {expected} nodes appear in an edge, exclude isolated nodes before searching")]
    DisconnectedInput { covered: usize, expected: usize },
}

/// Failure modes of a bounded streaming run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("worker failed: {reason}")]
    Worker { reason: String },

    #[error("no progress within {timeout:?}")]
    StepTimeout { timeout: Duration },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
