//! Engine configuration: node box styling, physics tuning, interaction and edges.
//!
//! The defaults are the fixed configuration of the alumni graph. Field names
//! serialize in the camelCase shape graph engines conventionally accept, which
//! also makes the configuration readable in debug logs.

use serde::Serialize;

/// Complete options object handed to a [`GraphEngine`](super::GraphEngine).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOptions {
	/// Node box styling.
	pub nodes: NodeOptions,
	/// Layout simulation.
	pub physics: PhysicsOptions,
	/// Pointer and keyboard behaviour.
	pub interaction: InteractionOptions,
	/// Edge styling.
	pub edges: EdgeOptions,
}

/// Styling shared by every node box.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
	/// Border stroke width in world units.
	pub border_width: f64,
	/// Corner rounding.
	pub shape_properties: ShapeProperties,
	/// Padding between the label and the box border.
	pub margin: f64,
}

/// Box corner settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
	/// Corner radius in world units.
	pub border_radius: f64,
}

impl Default for NodeOptions {
	fn default() -> Self {
		Self {
			border_width: 1.0,
			shape_properties: ShapeProperties { border_radius: 6.0 },
			margin: 8.0,
		}
	}
}

/// Force-directed layout settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsOptions {
	/// Run the simulation at all. Nodes stay where they were placed otherwise.
	pub enabled: bool,
	/// Pre-run before the first frame.
	pub stabilization: StabilizationOptions,
	/// Force tuning.
	pub barnes_hut: BarnesHut,
}

/// Whether to settle the layout before the first frame, and for how long at most.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilizationOptions {
	/// Pre-run the layout before showing it.
	pub enabled: bool,
	/// Upper bound on pre-run steps.
	pub iterations: u32,
}

/// Attraction/spring tuning.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
	/// Negative values repel nodes from each other.
	pub gravitational_constant: f64,
	/// Stiffness of the edge springs.
	pub spring_constant: f64,
}

impl Default for PhysicsOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			stabilization: StabilizationOptions {
				enabled: true,
				iterations: 1000,
			},
			barnes_hut: BarnesHut {
				gravitational_constant: -2000.0,
				spring_constant: 0.05,
			},
		}
	}
}

/// User interaction switches.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOptions {
	/// Highlight the node under the pointer and its neighbours.
	pub hover: bool,
	/// Show on-canvas pan/zoom/fit buttons.
	pub navigation_buttons: bool,
	/// Pan and zoom with the keyboard.
	pub keyboard: bool,
}

impl Default for InteractionOptions {
	fn default() -> Self {
		Self {
			hover: true,
			navigation_buttons: true,
			keyboard: true,
		}
	}
}

/// Edge styling shared by every edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeOptions {
	/// Edge colour source.
	pub color: EdgeColor,
	/// Draw edges as curves rather than straight lines.
	pub smooth: bool,
}

/// Edge colour settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeColor {
	/// Endpoint whose node colour the edge takes.
	pub inherit: ColorInherit,
}

/// Which endpoint an edge takes its colour from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorInherit {
	/// The source node.
	#[default]
	From,
	/// The target node.
	To,
}

impl Default for EdgeOptions {
	fn default() -> Self {
		Self {
			color: EdgeColor {
				inherit: ColorInherit::From,
			},
			smooth: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn default_options_match_the_fixed_configuration() {
		let value = serde_json::to_value(NetworkOptions::default()).unwrap();
		assert_eq!(
			value,
			json!({
				"nodes": {
					"borderWidth": 1.0,
					"shapeProperties": { "borderRadius": 6.0 },
					"margin": 8.0
				},
				"physics": {
					"enabled": true,
					"stabilization": { "enabled": true, "iterations": 1000 },
					"barnesHut": { "gravitationalConstant": -2000.0, "springConstant": 0.05 }
				},
				"interaction": { "hover": true, "navigationButtons": true, "keyboard": true },
				"edges": { "color": { "inherit": "from" }, "smooth": true }
			})
		);
	}
}
