//! The narrow interface between the application and a graph rendering engine.
//!
//! An engine takes a container, the mapped [`NetworkGraph`] and the
//! [`NetworkOptions`], and returns a live [`Network`]. From then on it owns
//! layout, physics, pan/zoom and hit-testing, and reports user-visible events
//! through the [`EventHandler`] it was given.

use thiserror::Error;

use super::model::NetworkGraph;
use super::options::NetworkOptions;
use crate::roster::MemberId;

/// Something that can replace its content with plain text.
pub trait Mount {
	/// Replace everything inside with `text`.
	fn show_text(&self, text: &str);
}

impl Mount for web_sys::HtmlElement {
	fn show_text(&self, text: &str) {
		self.set_inner_text(text);
	}
}

/// Handle to a running engine instance.
pub trait Network {
	/// Zoom and pan so every node is visible.
	fn fit(&self);
}

/// Events reported by an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkEvent {
	/// A click on the canvas. `nodes` is empty when the background was clicked.
	Click {
		/// Ids of the clicked nodes.
		nodes: Vec<MemberId>,
	},
	/// The physics simulation settled. May be reported again after the layout is
	/// disturbed.
	StabilizationDone,
}

/// Callback invoked for every [`NetworkEvent`], with the emitting network.
pub type EventHandler = Box<dyn FnMut(&NetworkEvent, &dyn Network)>;

/// Failure to bring up an engine inside its container.
#[derive(Debug, Error)]
pub enum RenderError {
	/// A DOM element of the given tag could not be created or attached.
	#[error("failed to create {0}")]
	CreateElement(&'static str),

	/// The canvas has no 2d context.
	#[error("canvas 2d context unavailable")]
	NoContext,

	/// No `window` or `document`, e.g. outside a browser.
	#[error("browser window unavailable")]
	NoWindow,

	/// Registering an event listener failed.
	#[error("failed to listen for {0} events")]
	Listener(&'static str),
}

/// A graph rendering engine.
pub trait GraphEngine {
	/// Element the engine mounts into.
	type Container: Mount;
	/// Live handle returned by [`GraphEngine::render`].
	type Network: Network;

	/// Build a live network inside `container`.
	fn render(
		&self,
		container: &Self::Container,
		graph: &NetworkGraph,
		options: &NetworkOptions,
		on_event: EventHandler,
	) -> Result<Self::Network, RenderError>;
}
