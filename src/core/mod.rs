pub mod clock;
pub mod graph;
pub mod ids;
pub mod memory;
pub mod model;
