//! Canvas rendering for the network.
//!
//! Rendering uses two passes for correct z-ordering:
//! 1. Edges (curves, self-loops and arrowheads) in world space
//! 2. Node boxes and labels on top, hovered node last

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::ScaledValues;
use super::state::{NetworkState, NodeInfo};
use super::theme::Theme;
use crate::graph::{ColorInherit, NetworkOptions};

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

type Point = (f64, f64);

/// Where the ray from a box centre towards `toward` leaves the box.
pub fn box_border_point(centre: Point, half_w: f64, half_h: f64, toward: Point) -> Point {
	let (dx, dy) = (toward.0 - centre.0, toward.1 - centre.1);
	if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
		return centre;
	}
	let tx = if dx.abs() > f64::EPSILON {
		half_w / dx.abs()
	} else {
		f64::INFINITY
	};
	let ty = if dy.abs() > f64::EPSILON {
		half_h / dy.abs()
	} else {
		f64::INFINITY
	};
	let t = tx.min(ty);
	(centre.0 + dx * t, centre.1 + dy * t)
}

/// Geometry of one edge, clipped to the endpoint boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
	pub start: Point,
	/// Cubic control points; `None` for straight edges.
	pub controls: Option<(Point, Point)>,
	/// End of the stroked line, at the arrowhead base.
	pub end: Point,
	pub tip: Point,
	/// Unit vector along the arrowhead.
	pub dir: Point,
}

/// Lay out an edge between two node boxes. The curve bows to the left of the
/// direction of travel, so opposite edges between one pair do not overlap.
pub fn edge_path(
	from: Point,
	from_half: Point,
	to: Point,
	to_half: Point,
	roundness: Option<f64>,
	arrow_size: f64,
) -> Option<EdgePath> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}

	let controls = roundness.map(|r| {
		let (px, py) = (-dy * r, dx * r);
		(
			(from.0 + dx / 3.0 + px, from.1 + dy / 3.0 + py),
			(from.0 + dx * 2.0 / 3.0 + px, from.1 + dy * 2.0 / 3.0 + py),
		)
	});
	let (aim_start, aim_end) = controls.unwrap_or((to, from));

	let start = box_border_point(from, from_half.0, from_half.1, aim_start);
	let tip = box_border_point(to, to_half.0, to_half.1, aim_end);
	let (ax, ay) = (tip.0 - aim_end.0, tip.1 - aim_end.1);
	let alen = (ax * ax + ay * ay).sqrt();
	if alen < 0.001 {
		return None;
	}
	let dir = (ax / alen, ay / alen);
	let end = (tip.0 - dir.0 * arrow_size, tip.1 - dir.1 * arrow_size);

	Some(EdgePath {
		start,
		controls,
		end,
		tip,
		dir,
	})
}

/// Largest self-loop radius in world units.
const LOOP_RADIUS: f64 = 14.0;

/// Geometry of a self-loop: an arc above the top border of the box that comes
/// back down into it.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopPath {
	pub centre: Point,
	pub radius: f64,
	/// Canvas angles; the arc runs anticlockwise from start to end.
	pub start_angle: f64,
	pub end_angle: f64,
	/// End of the stroked arc, at the arrowhead base.
	pub end: Point,
	/// Where the loop re-enters the box.
	pub tip: Point,
	/// Unit vector along the arrowhead.
	pub dir: Point,
}

/// Lay out a loop on the box at `centre`. The circle sits half above the top
/// border and crosses it at 30 and 150 degrees, both inside the box width.
pub fn loop_path(centre: Point, (half_w, half_h): Point, arrow_size: f64) -> LoopPath {
	let radius = LOOP_RADIUS.min(half_w * 0.9);
	let c = (centre.0, centre.1 - half_h - radius / 2.0);
	let at = |angle: f64| (c.0 + radius * angle.cos(), c.1 + radius * angle.sin());

	let start_angle = PI / 6.0;
	let tip_angle = -7.0 * PI / 6.0;
	let end_angle = tip_angle + (arrow_size / radius).min(PI / 2.0);
	let (tip, end) = (at(tip_angle), at(end_angle));
	let (dx, dy) = (tip.0 - end.0, tip.1 - end.1);
	let len = dx.hypot(dy).max(f64::EPSILON);

	LoopPath {
		centre: c,
		radius,
		start_angle,
		end_angle,
		end,
		tip,
		dir: (dx / len, dy / len),
	}
}

/// Renders the complete network to the canvas.
pub fn render(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	options: &NetworkOptions,
	theme: &Theme,
) {
	let scale = ScaledValues::new(&state.scale, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, options, &scale, theme);
	draw_nodes(state, ctx, options, &scale, theme);

	ctx.restore();
}

fn draw_edges(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	options: &NetworkOptions,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let boxes = state.node_boxes();

	for edge in state.edges() {
		let (Some(a), Some(b)) = (boxes.get(&edge.from), boxes.get(&edge.to)) else {
			continue;
		};
		let arrow_size = if edge.arrow { scale.arrow_size } else { 0.0 };

		let edge_t = smooth_step(state.highlight.edge_intensity(edge.from, edge.to));
		let base = theme.edge.alpha;
		let dimmed = base - (base - theme.edge.dimmed_alpha) * max_t;
		let alpha = (dimmed + (base - dimmed) * edge_t) * scale.edge_alpha;

		let source = match options.edges.color.inherit {
			ColorInherit::From => a,
			ColorInherit::To => b,
		};
		let color = source
			.color
			.darken(theme.node.border_darken)
			.with_alpha(alpha)
			.to_css();

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(scale.edge_line_width * (1.0 + edge_t));
		ctx.begin_path();
		let head = if edge.is_loop() {
			let path = loop_path((a.x, a.y), (a.half_w, a.half_h), arrow_size);
			let _ = ctx.arc_with_anticlockwise(
				path.centre.0,
				path.centre.1,
				path.radius,
				path.start_angle,
				path.end_angle,
				true,
			);
			(path.end, path.tip, path.dir)
		} else {
			let Some(path) = edge_path(
				(a.x, a.y),
				(a.half_w, a.half_h),
				(b.x, b.y),
				(b.half_w, b.half_h),
				edge.curved.then_some(theme.edge.roundness),
				arrow_size,
			) else {
				continue;
			};
			ctx.move_to(path.start.0, path.start.1);
			match path.controls {
				Some((c1, c2)) => {
					ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, path.end.0, path.end.1)
				}
				None => ctx.line_to(path.end.0, path.end.1),
			}
			(path.end, path.tip, path.dir)
		};
		ctx.stroke();

		if edge.arrow {
			ctx.set_fill_style_str(&color);
			draw_arrowhead(ctx, head, arrow_size);
		}
	}
}

fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	(end, tip, dir): (Point, Point, Point),
	size: f64,
) {
	let (px, py) = (-dir.1 * size * 0.5, dir.0 * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(end.0 + px, end.1 + py);
	ctx.line_to(end.0 - px, end.1 - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	options: &NetworkOptions,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let hovered = state.highlight.hovered_node;

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		if Some(node.index()) == hovered {
			return;
		}
		let node_t = smooth_step(state.highlight.node_intensity(node.index()));
		let dimmed = 1.0 - (1.0 - theme.node.dimmed_alpha) * max_t;
		let alpha = dimmed + (1.0 - dimmed) * node_t;
		let point = (node.x() as f64, node.y() as f64);
		draw_node(ctx, &node.data.user_data, point, options, scale, theme, alpha, 1.0);
	});

	if let Some(idx) = hovered {
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				let point = (node.x() as f64, node.y() as f64);
				draw_node(
					ctx,
					&node.data.user_data,
					point,
					options,
					scale,
					theme,
					1.0,
					theme.node.hover_border_mult,
				);
			}
		});
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): Point,
	options: &NetworkOptions,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	border_mult: f64,
) {
	let (w, h) = (info.width, info.height);
	let (left, top) = (x - w / 2.0, y - h / 2.0);
	let radius = options
		.nodes
		.shape_properties
		.border_radius
		.min(w / 2.0)
		.min(h / 2.0);

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	ctx.move_to(left + radius, top);
	let _ = ctx.arc_to(left + w, top, left + w, top + h, radius);
	let _ = ctx.arc_to(left + w, top + h, left, top + h, radius);
	let _ = ctx.arc_to(left, top + h, left, top, radius);
	let _ = ctx.arc_to(left, top, left + w, top, radius);
	ctx.close_path();

	ctx.set_fill_style_str(&info.color.to_css());
	ctx.fill();

	if options.nodes.border_width > 0.0 {
		ctx.set_stroke_style_str(&info.color.darken(theme.node.border_darken).to_css());
		ctx.set_line_width(options.nodes.border_width * border_mult);
		ctx.stroke();
	}

	if scale.label_alpha > 0.01 {
		let line_height = h - 2.0 * options.nodes.margin;
		let line_height = line_height / info.lines.len().max(1) as f64;
		let first_y = y - line_height * (info.lines.len() as f64 - 1.0) / 2.0;

		ctx.set_global_alpha(alpha * scale.label_alpha);
		ctx.set_fill_style_str(&theme.node.text.to_css());
		ctx.set_font(&info.font);
		for (i, line) in info.lines.iter().enumerate() {
			let _ = ctx.fill_text(line, x, first_y + line_height * i as f64);
		}
	}

	ctx.set_global_alpha(1.0);
}
