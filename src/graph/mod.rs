pub mod city;
pub mod cost_matrix;
pub mod edge;
pub mod instance;
pub mod tour;

pub type Node = u32;
pub type NumNodes = Node;

/// Edge weight. Non-negative; `Cost::INFINITY` marks an absent edge.
pub type Cost = f64;

pub use city::*;
pub use cost_matrix::*;
pub use edge::*;
pub use instance::*;
pub use tour::*;
