pub use cover_graph::{CoverGraph, CoverGraphDfs};

mod cover_graph;
