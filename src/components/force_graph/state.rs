//! Network simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node box metadata, view
//! transforms for pan/zoom, hover highlight with smooth intensity transitions,
//! and detection of when the layout has settled.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use crate::graph::{Arrows, NetworkGraph, NetworkOptions, NodeShape, Smooth};
use crate::roster::MemberId;

/// Converts a Barnes-Hut gravitational constant into `force_graph` charge.
/// The default constant of -2000 maps to a charge of 150.
const CHARGE_PER_GRAVITY: f64 = -0.075;

/// Largest per-step node movement (world units) at which the layout counts as settled.
const SETTLED_MOVEMENT: f32 = 0.1;

/// Fixed step used while pre-stabilizing before the first frame.
pub const STABILIZE_DT: f32 = 0.016;

/// Empty border left around the content by [`NetworkState::fit`], in pixels.
const FIT_PADDING: f64 = 30.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
/// `fit` never zooms in beyond 100%.
const FIT_MAX_ZOOM: f64 = 1.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: MemberId,
	pub lines: Vec<String>,
	pub title: String,
	/// Canvas font string, e.g. `14px Inter, Roboto, system-ui`.
	pub font: String,
	pub color: Color,
	/// Box size in world units, margin included.
	pub width: f64,
	pub height: f64,
}

/// A drawn edge. Self-loops are drawn but take no part in the physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeInfo {
	pub from: DefaultNodeIdx,
	pub to: DefaultNodeIdx,
	/// Arrowhead at the `to` end.
	pub arrow: bool,
	/// Cubic Bezier instead of a straight line.
	pub curved: bool,
}

impl EdgeInfo {
	pub fn is_loop(&self) -> bool {
		self.from == self.to
	}
}

/// Position, size and colour of a node box for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox {
	pub x: f64,
	pub y: f64,
	pub half_w: f64,
	pub half_h: f64,
	pub color: Color,
}

/// Pan and zoom transform applied to the entire view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to MIN_ZOOM..MAX_ZOOM).
	pub k: f64,
}

/// Tracks a pointer press on a node: a drag if it moves, a click if it doesn't.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks a pointer press on the background: a pan if it moves, a click if it doesn't.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel (pixels) below which a press still counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

/// Smooth hover highlight of a node and its neighbours.
///
/// Each node carries its own intensity (0.0 to 1.0) that eases towards 1.0
/// while it is in the target set and decays back to 0.0 afterwards.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	target_set: HashSet<DefaultNodeIdx>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

impl HighlightState {
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, edges: &[EdgeInfo]) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for edge in edges {
				if edge.from == idx {
					self.target_set.insert(edge.to);
				} else if edge.to == idx {
					self.target_set.insert(edge.from);
				}
			}
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !self.target_set.contains(idx) {
				*intensity *= fade_out;
			}
			new_max = new_max.max(*intensity);
			*intensity > 0.005
		});
		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean keeps edges in step with both endpoints.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Core network state combining physics with interaction tracking.
///
/// Created once when the engine mounts, then mutated each frame by the
/// animation loop and by pointer/keyboard handlers.
pub struct NetworkState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub physics_enabled: bool,
	pub hover_enabled: bool,
	pub scale: ScaleConfig,
	edges: Vec<EdgeInfo>,
	settled: bool,
}

impl NetworkState {
	/// Build the simulation. `measure` returns the width of a label line in
	/// world units for the given canvas font.
	pub fn new(
		data: &NetworkGraph,
		options: &NetworkOptions,
		theme: &Theme,
		scale: ScaleConfig,
		width: f64,
		height: f64,
		measure: impl Fn(&str, &str) -> f64,
	) -> Self {
		let barnes_hut = &options.physics.barnes_hut;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: (barnes_hut.gravitational_constant * CHARGE_PER_GRAVITY) as f32,
			force_spring: barnes_hut.spring_constant as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut group_colors: HashMap<&str, Color> = HashMap::new();
		let margin = options.nodes.margin;
		let line_height = scale.node.label_size * scale.node.line_height;

		for (i, node) in data.nodes.iter().enumerate() {
			let color = match node.group.as_deref() {
				Some(group) => {
					let next = group_colors.len();
					*group_colors
						.entry(group)
						.or_insert_with(|| theme.palette.get(next))
				}
				None => theme.palette.fallback,
			};

			let font = format!("{}px {}", scale.node.label_size, node.font.face);
			let lines: Vec<String> = if node.font.multi {
				node.label.split('\n').map(str::to_string).collect()
			} else {
				vec![node.label.replace('\n', " ")]
			};
			let text_width = lines
				.iter()
				.map(|line| measure(line, &font))
				.fold(0.0, f64::max);

			let (width, height) = match node.shape {
				NodeShape::Box => (
					text_width + 2.0 * margin,
					lines.len() as f64 * line_height + 2.0 * margin,
				),
			};

			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let spread = 40.0 * (data.nodes.len() as f64).sqrt().max(1.0);
			let (x, y) = (
				(spread * angle.cos()) as f32,
				(spread * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					width,
					height,
					lines,
					title: node.title.clone(),
					font,
					color,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for edge in &data.edges {
			let (Some(&from), Some(&to)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to))
			else {
				continue;
			};
			// force_graph panics on an edge from a node to itself.
			if from != to {
				graph.add_edge(from, to, EdgeData::default());
			}
			edges.push(EdgeInfo {
				from,
				to,
				arrow: match edge.arrows {
					Arrows::To => true,
				},
				curved: match edge.smooth {
					Smooth::CubicBezier => options.edges.smooth,
				},
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			physics_enabled: options.physics.enabled,
			hover_enabled: options.interaction.hover,
			scale,
			settled: false,
		}
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	/// Every edge with known endpoints, in input order.
	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	/// Current box of every node, keyed by index.
	pub fn node_boxes(&self) -> HashMap<DefaultNodeIdx, NodeBox> {
		let mut boxes = HashMap::new();
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			boxes.insert(
				node.index(),
				NodeBox {
					x: node.x() as f64,
					y: node.y() as f64,
					half_w: info.width / 2.0,
					half_h: info.height / 2.0,
					color: info.color,
				},
			);
		});
		boxes
	}

	pub fn is_settled(&self) -> bool {
		self.settled
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box (plus hit slop) contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let pad = ScaledValues::new(&self.scale, self.transform.k).hit_padding;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let (dx, dy) = ((node.x() as f64 - gx).abs(), (node.y() as f64 - gy).abs());
			if dx <= info.width / 2.0 + pad && dy <= info.height / 2.0 + pad {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		let node = node.filter(|_| self.hover_enabled);
		self.highlight.set_hover(node, &self.edges);
	}

	/// Advance physics by one step. Returns true when the layout has just
	/// come to rest.
	pub fn step(&mut self, dt: f32) -> bool {
		if !self.physics_enabled {
			return false;
		}
		let before = self.positions();
		self.graph.update(dt);
		let movement = before
			.iter()
			.zip(self.positions())
			.map(|(&(x0, y0), (x1, y1))| (x1 - x0).abs().max((y1 - y0).abs()))
			.fold(0.0, f32::max);

		let settled = movement < SETTLED_MOVEMENT;
		let just_settled = settled && !self.settled;
		self.settled = settled;
		just_settled
	}

	/// Run physics until the layout settles or `max_iterations` steps have
	/// elapsed. Returns the number of steps taken.
	pub fn stabilize(&mut self, max_iterations: u32) -> u32 {
		for i in 0..max_iterations {
			if self.step(STABILIZE_DT) {
				return i + 1;
			}
		}
		max_iterations
	}

	/// One animation frame: physics plus highlight easing. Returns true when
	/// the layout has just come to rest.
	pub fn tick(&mut self, dt: f32) -> bool {
		let just_settled = self.step(dt);
		self.highlight.tick(dt as f64);
		just_settled
	}

	fn positions(&self) -> Vec<(f32, f32)> {
		let mut out = Vec::new();
		self.graph.visit_nodes(|node| out.push((node.x(), node.y())));
		out
	}

	/// World-space bounding box of all node boxes as (min_x, min_y, max_x, max_y).
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let (x, y) = (node.x() as f64, node.y() as f64);
			let (hw, hh) = (info.width / 2.0, info.height / 2.0);
			let b = bounds.get_or_insert((x - hw, y - hh, x + hw, y + hh));
			b.0 = b.0.min(x - hw);
			b.1 = b.1.min(y - hh);
			b.2 = b.2.max(x + hw);
			b.3 = b.3.max(y + hh);
		});
		bounds
	}

	/// Zoom and pan so every node is visible, centred in the canvas.
	pub fn fit(&mut self) {
		let Some((x0, y0, x1, y1)) = self.bounds() else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};
		let (bw, bh) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let avail_w = (self.width - 2.0 * FIT_PADDING).max(1.0);
		let avail_h = (self.height - 2.0 * FIT_PADDING).max(1.0);
		let k = (avail_w / bw).min(avail_h / bh).clamp(MIN_ZOOM, FIT_MAX_ZOOM);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Zoom by `factor` keeping the screen point (x, y) fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zoom around the canvas centre.
	pub fn zoom(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Move the view by a screen-space offset.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.x += dx;
		self.transform.y += dy;
	}

	/// Move a node to a world position and pin it there.
	pub fn move_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
		self.settled = false;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::map_to_graph;
	use crate::roster::{Member, Relation};

	fn member(id: i64, name: &str, class: &str) -> Member {
		Member {
			id: MemberId::from(id),
			name: name.into(),
			nick: None,
			class: class.into(),
			bio: None,
		}
	}

	fn state(members: &[Member], relations: &[Relation]) -> NetworkState {
		let graph = map_to_graph(members, relations);
		// Fixed-width glyphs keep box sizes predictable.
		NetworkState::new(
			&graph,
			&NetworkOptions::default(),
			&Theme::default(),
			ScaleConfig::default(),
			800.0,
			600.0,
			|line, _font| line.chars().count() as f64 * 7.0,
		)
	}

	fn trio() -> NetworkState {
		state(
			&[
				member(1, "Ada", "1990"),
				member(2, "Grace", "1991"),
				member(3, "Alan", "1990"),
			],
			&[
				Relation {
					from: MemberId::from(1),
					to: MemberId::from(2),
				},
				Relation {
					from: MemberId::from(3),
					to: MemberId::from(1),
				},
			],
		)
	}

	#[test]
	fn boxes_fit_label_and_margin() {
		let s = state(&[member(1, "Ada", "1990")], &[]);
		let mut sizes = Vec::new();
		s.graph
			.visit_nodes(|n| sizes.push((n.data.user_data.width, n.data.user_data.height)));
		// 3 glyphs * 7 + 2 * 8 margin; one 14 * 1.25 line + 2 * 8 margin.
		assert_eq!(sizes, vec![(37.0, 33.5)]);
	}

	#[test]
	fn cohorts_share_a_color() {
		let s = trio();
		let mut colors = HashMap::new();
		s.graph.visit_nodes(|n| {
			colors.insert(n.data.user_data.id.clone(), n.data.user_data.color);
		});
		assert_eq!(colors[&MemberId::from(1)], colors[&MemberId::from(3)]);
		assert_ne!(colors[&MemberId::from(1)], colors[&MemberId::from(2)]);
	}

	#[test]
	fn dangling_relations_are_not_drawn() {
		let s = state(
			&[member(1, "Ada", "1990")],
			&[Relation {
				from: MemberId::from(1),
				to: MemberId::from(99),
			}],
		);
		let mut edges = 0;
		s.graph.visit_edges(|_, _, _| edges += 1);
		assert_eq!(edges, 0);
		assert!(s.edges().is_empty());
		assert_eq!(s.node_count(), 1);
	}

	#[test]
	fn self_relation_is_drawn_but_not_simulated() {
		let mut s = state(
			&[member(1, "Ada", "1990"), member(2, "Grace", "1991")],
			&[
				Relation {
					from: MemberId::from(1),
					to: MemberId::from(1),
				},
				Relation {
					from: MemberId::from(1),
					to: MemberId::from(2),
				},
			],
		);
		s.stabilize(1000);

		let mut simulated = 0;
		s.graph.visit_edges(|_, _, _| simulated += 1);
		assert_eq!(simulated, 1);
		assert_eq!(s.edges().len(), 2);
		assert!(s.edges()[0].is_loop());
		assert!(!s.edges()[1].is_loop());
		assert!(s.edges().iter().all(|e| e.arrow && e.curved));

		// Hovering a node with a loop still highlights its real neighbour.
		let ada = s.edges()[0].from;
		let grace = s.edges()[1].to;
		s.set_hover(Some(ada));
		s.tick(0.1);
		assert!(s.highlight.node_intensity(grace) > 0.0);
	}

	#[test]
	fn straight_edges_when_curves_are_off() {
		let graph = map_to_graph(
			&[member(1, "Ada", "1990"), member(2, "Grace", "1991")],
			&[Relation {
				from: MemberId::from(1),
				to: MemberId::from(2),
			}],
		);
		let mut options = NetworkOptions::default();
		options.edges.smooth = false;
		let s = NetworkState::new(
			&graph,
			&options,
			&Theme::default(),
			ScaleConfig::default(),
			800.0,
			600.0,
			|line, _font| line.chars().count() as f64 * 7.0,
		);
		assert!(!s.edges()[0].curved);
	}

	#[test]
	fn node_boxes_match_the_simulation() {
		let s = state(&[member(1, "Ada", "1990")], &[]);
		let boxes = s.node_boxes();
		let mut found = None;
		s.graph.visit_nodes(|n| found = Some((n.index(), n.x() as f64, n.y() as f64)));
		let (idx, x, y) = found.unwrap();
		let b = boxes[&idx];
		assert_eq!((b.x, b.y), (x, y));
		assert_eq!((b.half_w, b.half_h), (18.5, 16.75));
	}

	#[test]
	fn hit_testing_finds_the_box_under_the_pointer() {
		let s = state(&[member(1, "Ada", "1990")], &[]);
		let mut centre = (0.0, 0.0);
		s.graph.visit_nodes(|n| centre = (n.x() as f64, n.y() as f64));
		let t = &s.transform;
		let (sx, sy) = (centre.0 * t.k + t.x, centre.1 * t.k + t.y);

		let hit = s.node_at_position(sx + 15.0, sy - 10.0);
		assert!(hit.is_some());
		assert_eq!(s.node_info(hit.unwrap()).unwrap().id, MemberId::from(1));
		// Half-width is 18.5, plus 3px of slop.
		assert!(s.node_at_position(sx + 25.0, sy).is_none());
	}

	#[test]
	fn stabilization_reports_settling_once() {
		let mut s = trio();
		let steps = s.stabilize(5000);
		assert!(steps < 5000, "layout never settled");
		assert!(s.is_settled());
		// Already at rest: further steps do not report again.
		assert!(!s.step(STABILIZE_DT));
	}

	#[test]
	fn disturbing_the_layout_allows_another_settle() {
		let mut s = trio();
		s.stabilize(5000);
		let mut first = None;
		s.graph.visit_nodes(|n| {
			if first.is_none() {
				first = Some(n.index());
			}
		});
		s.move_node(first.unwrap(), 500.0, 500.0);
		assert!(!s.is_settled());
		let mut reported = false;
		for _ in 0..5000 {
			if s.step(STABILIZE_DT) {
				reported = true;
				break;
			}
		}
		assert!(reported);
	}

	#[test]
	fn fit_brings_every_box_into_view() {
		let mut s = trio();
		s.stabilize(5000);
		s.transform = ViewTransform {
			x: -5000.0,
			y: 9000.0,
			k: 7.0,
		};
		s.fit();

		let (x0, y0, x1, y1) = s.bounds().unwrap();
		let t = &s.transform;
		let (sx0, sy0) = (x0 * t.k + t.x, y0 * t.k + t.y);
		let (sx1, sy1) = (x1 * t.k + t.x, y1 * t.k + t.y);
		assert!(sx0 >= 0.0 && sy0 >= 0.0, "top-left off screen");
		assert!(sx1 <= s.width && sy1 <= s.height, "bottom-right off screen");
		assert!(t.k <= 1.0);
	}

	#[test]
	fn fit_on_empty_graph_resets_the_view() {
		let mut s = state(&[], &[]);
		s.zoom(3.0);
		s.fit();
		assert_eq!(
			s.transform,
			ViewTransform {
				x: 400.0,
				y: 300.0,
				k: 1.0
			}
		);
	}

	#[test]
	fn zoom_keeps_the_anchor_point_fixed() {
		let mut s = trio();
		let before = s.screen_to_graph(100.0, 50.0);
		s.zoom_at(100.0, 50.0, 2.0);
		let after = s.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		s.zoom(1000.0);
		assert_eq!(s.transform.k, MAX_ZOOM);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut s = trio();
		let mut ids = HashMap::new();
		s.graph.visit_nodes(|n| {
			ids.insert(n.data.user_data.id.clone(), n.index());
		});
		let ada = ids[&MemberId::from(1)];
		s.set_hover(Some(ada));
		s.tick(0.1);
		assert!(s.highlight.node_intensity(ids[&MemberId::from(2)]) > 0.0);
		assert!(s.highlight.node_intensity(ids[&MemberId::from(3)]) > 0.0);
	}
}
