//! Navigation core: priority frontier, tile graph interface, path search,
//! and steering math.

pub mod error;
pub mod frontier;
pub mod graph;
pub mod path;
pub mod steering;
