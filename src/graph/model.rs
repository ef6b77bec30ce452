//! Engine-agnostic graph model and the mapping from roster records into it.

use serde::Serialize;

use crate::roster::{Member, MemberId, Relation};

/// Font face preference list used for node labels.
pub const NODE_FONT_FACE: &str = "Inter, Roboto, system-ui";

/// Visual shape of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
	/// Rounded rectangle around the label.
	#[default]
	Box,
}

/// Label font settings for a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeFont {
	/// Labels may span multiple lines.
	pub multi: bool,
	/// CSS font family list.
	pub face: String,
}

impl Default for NodeFont {
	fn default() -> Self {
		Self {
			multi: true,
			face: NODE_FONT_FACE.to_string(),
		}
	}
}

/// Which end(s) of an edge carry an arrowhead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrows {
	/// Arrowhead at the target end.
	#[default]
	To,
}

/// Edge path style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Smooth {
	/// Cubic Bezier bowed to one side of the straight line.
	#[default]
	CubicBezier,
}

/// One node per member.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
	/// Id of the member this node stands for.
	pub id: MemberId,
	/// Text drawn inside the node.
	pub label: String,
	/// Hover text: name, nickname, class and bio on separate lines.
	pub title: String,
	/// Outline the engine draws around the label.
	pub shape: NodeShape,
	/// Label font.
	pub font: NodeFont,
	/// Cohort used for colouring. `None` when the member has no class.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
}

/// One directed edge per relation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphEdge {
	/// Source node id.
	pub from: MemberId,
	/// Target node id.
	pub to: MemberId,
	/// Arrowhead placement.
	pub arrows: Arrows,
	/// Curve style, used when curves are enabled in the edge options.
	pub smooth: Smooth,
}

/// Nodes and edges ready to hand to a [`GraphEngine`](super::GraphEngine).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkGraph {
	/// One per member, in roster order.
	pub nodes: Vec<GraphNode>,
	/// One per relation, in roster order.
	pub edges: Vec<GraphEdge>,
}

/// Four-line tooltip. Absent values leave their line blank.
pub fn tooltip(member: &Member) -> String {
	format!(
		"{}\n{}\n{}\n{}",
		member.name,
		member.nick().unwrap_or_default(),
		member.class().unwrap_or_default(),
		member.bio().unwrap_or_default()
	)
}

/// Map roster records into the graph model.
///
/// The input is trusted: duplicate edges, cycles and relations pointing at
/// unknown members pass through untouched.
pub fn map_to_graph(members: &[Member], relations: &[Relation]) -> NetworkGraph {
	let nodes = members
		.iter()
		.map(|m| GraphNode {
			id: m.id.clone(),
			label: m.name.clone(),
			title: tooltip(m),
			shape: NodeShape::Box,
			font: NodeFont::default(),
			group: m.class().map(str::to_string),
		})
		.collect();

	let edges = relations
		.iter()
		.map(|r| GraphEdge {
			from: r.from.clone(),
			to: r.to.clone(),
			arrows: Arrows::To,
			smooth: Smooth::CubicBezier,
		})
		.collect();

	NetworkGraph { nodes, edges }
}
