//! UI building blocks: the canvas network engine and the details panel.

pub mod details;
pub mod force_graph;
