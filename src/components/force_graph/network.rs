//! DOM side of the canvas engine.
//!
//! [`CanvasEngine::render`] mounts a canvas, a tooltip and (optionally) the
//! navigation buttons into the container, wires mouse, wheel and keyboard
//! handlers, and starts an animation loop via `requestAnimationFrame` that
//! advances the physics simulation and redraws each frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
	KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::navigation::{BUTTONS, NavAction};
use super::render;
use super::scale::ScaleConfig;
use super::state::{CLICK_TOLERANCE, DragState, NetworkState, PanState};
use super::theme::Theme;
use crate::graph::{
	EventHandler, GraphEngine, Network, NetworkEvent, NetworkGraph, NetworkOptions, RenderError,
};

/// Longest frame step fed to the physics, in seconds. Keeps the layout stable
/// after the tab was in the background.
const MAX_FRAME_DT: f64 = 0.05;

/// Force-directed network drawn on an HTML canvas.
#[derive(Clone, Debug, Default)]
pub struct CanvasEngine {
	/// Colours and overlay styles.
	pub theme: Theme,
	/// Zoom-dependent sizes.
	pub scale: ScaleConfig,
}

struct Inner {
	state: RefCell<NetworkState>,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	container: HtmlElement,
	tooltip: HtmlElement,
	options: NetworkOptions,
	theme: Theme,
	on_event: RefCell<EventHandler>,
	listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
	frame: RefCell<Option<Closure<dyn FnMut()>>>,
	/// Report the pre-run stabilization on the first frame.
	pending_ready: Cell<bool>,
	last_frame: Cell<f64>,
}

/// Handle to a mounted canvas network. Cheap to clone.
///
/// The animation loop holds a handle of its own, so the network keeps running
/// for the rest of the session even if every other handle is dropped.
#[derive(Clone)]
pub struct CanvasNetwork {
	inner: Rc<Inner>,
}

impl Network for CanvasNetwork {
	fn fit(&self) {
		self.inner.state.borrow_mut().fit();
	}
}

fn create<T: JsCast>(document: &Document, tag: &'static str) -> Result<T, RenderError> {
	document
		.create_element(tag)
		.ok()
		.and_then(|el| el.dyn_into::<T>().ok())
		.ok_or(RenderError::CreateElement(tag))
}

fn container_size(container: &HtmlElement) -> (f64, f64) {
	let (w, h) = (container.client_width(), container.client_height());
	(
		if w > 0 { w as f64 } else { 800.0 },
		if h > 0 { h as f64 } else { 600.0 },
	)
}

impl GraphEngine for CanvasEngine {
	type Container = HtmlElement;
	type Network = CanvasNetwork;

	fn render(
		&self,
		container: &HtmlElement,
		graph: &NetworkGraph,
		options: &NetworkOptions,
		on_event: EventHandler,
	) -> Result<CanvasNetwork, RenderError> {
		let window: Window = web_sys::window().ok_or(RenderError::NoWindow)?;
		let document = window.document().ok_or(RenderError::NoWindow)?;

		let canvas: HtmlCanvasElement = create(&document, "canvas")?;
		let tooltip: HtmlElement = create(&document, "div")?;

		container.set_inner_text("");
		let _ = container.style().set_property("position", "relative");
		let (w, h) = container_size(container);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let _ = canvas.set_attribute("tabindex", "0");
		let _ = canvas.set_attribute("class", "network-canvas");
		let _ = canvas.set_attribute("style", "display: block; cursor: grab; outline: none;");
		let _ = tooltip.set_attribute("style", self.theme.tooltip_css);
		let _ = tooltip.set_attribute("class", "network-tooltip");
		container
			.append_child(&canvas)
			.map_err(|_| RenderError::CreateElement("canvas"))?;
		container
			.append_child(&tooltip)
			.map_err(|_| RenderError::CreateElement("div"))?;

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.ok_or(RenderError::NoContext)?;

		let mut state = NetworkState::new(
			graph,
			options,
			&self.theme,
			self.scale.clone(),
			w,
			h,
			|line, font| {
				ctx.set_font(font);
				ctx.measure_text(line).map(|m| m.width()).unwrap_or(0.0)
			},
		);

		let physics = &options.physics;
		let pre_stabilize = physics.enabled && physics.stabilization.enabled;
		if pre_stabilize {
			let steps = state.stabilize(physics.stabilization.iterations);
			debug!("alumni-graph: stabilized in {} iterations", steps);
		}
		if let Ok(json) = serde_json::to_string(options) {
			debug!("alumni-graph: network options {}", json);
		}
		info!(
			"alumni-graph: mounted network with {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);

		let network = CanvasNetwork {
			inner: Rc::new(Inner {
				state: RefCell::new(state),
				canvas,
				ctx,
				container: container.clone(),
				tooltip,
				options: options.clone(),
				theme: self.theme.clone(),
				on_event: RefCell::new(on_event),
				listeners: RefCell::new(Vec::new()),
				frame: RefCell::new(None),
				pending_ready: Cell::new(pre_stabilize),
				last_frame: Cell::new(js_sys::Date::now()),
			}),
		};

		network.attach_pointer()?;
		if options.interaction.keyboard {
			network.attach_keyboard()?;
		}
		if options.interaction.navigation_buttons {
			network.attach_buttons(&document)?;
		}
		network.attach_resize(&window)?;
		network.start_loop(&window);
		Ok(network)
	}
}

impl CanvasNetwork {
	/// Deliver an event. Callers must not hold a borrow of the state.
	fn emit(&self, event: NetworkEvent) {
		debug!("alumni-graph: {:?}", event);
		if let Ok(mut handler) = self.inner.on_event.try_borrow_mut() {
			let handler = &mut *handler;
			handler(&event, self);
		}
	}

	fn listen<E: JsCast + 'static>(
		&self,
		target: &EventTarget,
		name: &'static str,
		mut handler: impl FnMut(E) + 'static,
	) -> Result<(), RenderError> {
		let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
			if let Ok(ev) = ev.dyn_into::<E>() {
				handler(ev);
			}
		});
		target
			.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
			.map_err(|_| RenderError::Listener(name))?;
		self.inner.listeners.borrow_mut().push(closure);
		Ok(())
	}

	fn pointer(&self, ev: &MouseEvent) -> (f64, f64) {
		let rect = self.inner.canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}

	fn set_cursor(&self, cursor: &str) {
		let _ = self.inner.canvas.style().set_property("cursor", cursor);
	}

	fn attach_pointer(&self) -> Result<(), RenderError> {
		let canvas: &EventTarget = &self.inner.canvas;

		let this = self.clone();
		self.listen(canvas, "mousedown", move |ev: MouseEvent| {
			this.on_mouse_down(&ev)
		})?;
		let this = self.clone();
		self.listen(canvas, "mousemove", move |ev: MouseEvent| {
			this.on_mouse_move(&ev)
		})?;
		let this = self.clone();
		self.listen(canvas, "mouseup", move |ev: MouseEvent| this.on_mouse_up(&ev))?;
		let this = self.clone();
		self.listen(canvas, "mouseleave", move |_: MouseEvent| {
			this.on_mouse_leave()
		})?;
		let this = self.clone();
		self.listen(canvas, "wheel", move |ev: WheelEvent| this.on_wheel(&ev))
	}

	fn on_mouse_down(&self, ev: &MouseEvent) {
		let (x, y) = self.pointer(ev);
		let mut s = self.inner.state.borrow_mut();
		if let Some(idx) = s.node_at_position(x, y) {
			let mut start = (0.0, 0.0);
			s.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			s.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: start.0,
				node_start_y: start.1,
			};
		} else {
			let (tx, ty) = (s.transform.x, s.transform.y);
			s.pan = PanState {
				active: true,
				moved: false,
				start_x: x,
				start_y: y,
				transform_start_x: tx,
				transform_start_y: ty,
			};
			drop(s);
			self.set_cursor("grabbing");
		}
	}

	fn on_mouse_move(&self, ev: &MouseEvent) {
		let (x, y) = self.pointer(ev);
		let mut s = self.inner.state.borrow_mut();

		if s.drag.active {
			let (dx, dy) = (x - s.drag.start_x, y - s.drag.start_y);
			if !s.drag.moved && dx.hypot(dy) > CLICK_TOLERANCE {
				s.drag.moved = true;
				drop(s);
				self.hide_tooltip();
				s = self.inner.state.borrow_mut();
			}
			if let (true, Some(idx)) = (s.drag.moved, s.drag.node_idx) {
				let k = s.transform.k;
				let nx = s.drag.node_start_x + (dx / k) as f32;
				let ny = s.drag.node_start_y + (dy / k) as f32;
				s.move_node(idx, nx, ny);
			}
		} else if s.pan.active {
			let (dx, dy) = (x - s.pan.start_x, y - s.pan.start_y);
			if !s.pan.moved && dx.hypot(dy) > CLICK_TOLERANCE {
				s.pan.moved = true;
			}
			if s.pan.moved {
				s.transform.x = s.pan.transform_start_x + dx;
				s.transform.y = s.pan.transform_start_y + dy;
			}
		} else {
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
			let title = hovered.and_then(|idx| s.node_info(idx)).map(|info| info.title);
			drop(s);
			match title {
				Some(title) => {
					self.show_tooltip(&title, x, y);
					self.set_cursor("pointer");
				}
				None => {
					self.hide_tooltip();
					self.set_cursor("grab");
				}
			}
		}
	}

	fn on_mouse_up(&self, _ev: &MouseEvent) {
		let clicked = {
			let mut s = self.inner.state.borrow_mut();
			let clicked = if s.drag.active && !s.drag.moved {
				let id = s.drag.node_idx.and_then(|idx| s.node_info(idx)).map(|i| i.id);
				Some(id.into_iter().collect())
			} else if s.pan.active && !s.pan.moved {
				Some(Vec::new())
			} else {
				None
			};
			s.drag = DragState::default();
			s.pan = PanState::default();
			clicked
		};
		self.set_cursor("grab");
		if let Some(nodes) = clicked {
			self.emit(NetworkEvent::Click { nodes });
		}
	}

	fn on_mouse_leave(&self) {
		{
			let mut s = self.inner.state.borrow_mut();
			s.drag = DragState::default();
			s.pan = PanState::default();
			s.set_hover(None);
		}
		self.hide_tooltip();
		self.set_cursor("grab");
	}

	fn on_wheel(&self, ev: &WheelEvent) {
		ev.prevent_default();
		let (x, y) = self.pointer(ev);
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		self.inner.state.borrow_mut().zoom_at(x, y, factor);
	}

	fn show_tooltip(&self, title: &str, x: f64, y: f64) {
		let tooltip = &self.inner.tooltip;
		tooltip.set_inner_text(title);
		let style = tooltip.style();
		let _ = style.set_property("left", &format!("{}px", x + 12.0));
		let _ = style.set_property("top", &format!("{}px", y + 12.0));
		let _ = style.set_property("display", "block");
	}

	fn hide_tooltip(&self) {
		let _ = self.inner.tooltip.style().set_property("display", "none");
	}

	fn navigate(&self, action: NavAction) {
		action.apply(&mut self.inner.state.borrow_mut());
	}

	fn attach_keyboard(&self) -> Result<(), RenderError> {
		let this = self.clone();
		self.listen(&self.inner.canvas, "keydown", move |ev: KeyboardEvent| {
			if let Some(action) = NavAction::from_key(&ev.key()) {
				ev.prevent_default();
				this.navigate(action);
			}
		})
	}

	fn attach_buttons(&self, document: &Document) -> Result<(), RenderError> {
		let bar: HtmlElement = create(document, "div")?;
		let _ = bar.set_attribute("class", "network-navigation");
		let _ = bar.set_attribute(
			"style",
			"position: absolute; right: 10px; bottom: 10px; display: flex;",
		);

		for &(glyph, title, action) in BUTTONS {
			let button: HtmlElement = create(document, "button")?;
			button.set_inner_text(glyph);
			let _ = button.set_attribute("title", title);
			let _ = button.set_attribute("type", "button");
			let _ = button.set_attribute("style", self.inner.theme.button_css);
			let this = self.clone();
			self.listen(&button, "click", move |_: Event| this.navigate(action))?;
			bar.append_child(&button)
				.map_err(|_| RenderError::CreateElement("button"))?;
		}

		self.inner
			.container
			.append_child(&bar)
			.map_err(|_| RenderError::CreateElement("div"))?;
		Ok(())
	}

	fn attach_resize(&self, window: &Window) -> Result<(), RenderError> {
		let this = self.clone();
		self.listen(window, "resize", move |_: Event| {
			let (w, h) = container_size(&this.inner.container);
			this.inner.canvas.set_width(w as u32);
			this.inner.canvas.set_height(h as u32);
			this.inner.state.borrow_mut().resize(w, h);
		})
	}

	fn start_loop(&self, window: &Window) {
		let this = self.clone();
		*self.inner.frame.borrow_mut() = Some(Closure::new(move || {
			this.frame();
			if let (Some(win), Some(cb)) = (web_sys::window(), this.inner.frame.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *self.inner.frame.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}

	fn frame(&self) {
		let now = js_sys::Date::now();
		let dt = ((now - self.inner.last_frame.replace(now)) / 1000.0).clamp(0.0, MAX_FRAME_DT);

		let settled = self.inner.state.borrow_mut().tick(dt as f32);
		if self.inner.pending_ready.replace(false) || settled {
			self.emit(NetworkEvent::StabilizationDone);
		}

		render::render(
			&self.inner.state.borrow(),
			&self.inner.ctx,
			&self.inner.options,
			&self.inner.theme,
		);
	}
}
