pub mod animation;
pub mod geometry;
pub mod graph;
pub mod light;
pub mod node;
pub mod node_tree;
