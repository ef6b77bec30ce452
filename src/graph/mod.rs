//! Graph model, engine options and the engine interface.

mod engine;
mod model;
mod options;

pub use engine::{EventHandler, GraphEngine, Mount, Network, NetworkEvent, RenderError};
pub use model::{
	Arrows, GraphEdge, GraphNode, NODE_FONT_FACE, NetworkGraph, NodeFont, NodeShape, Smooth,
	map_to_graph, tooltip,
};
pub use options::{
	BarnesHut, ColorInherit, EdgeColor, EdgeOptions, InteractionOptions, NetworkOptions,
	NodeOptions, PhysicsOptions, ShapeProperties, StabilizationOptions,
};
