pub use branch_bound::{search_stream, BranchAndBound, CoverSolution};

mod branch_bound;
