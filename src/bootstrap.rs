//! Startup orchestration: loaded roster in, running network out.

use leptos::prelude::*;
use log::error;

use crate::graph::{GraphEngine, Mount, Network, NetworkEvent, NetworkOptions, map_to_graph};
use crate::interaction::Interaction;
use crate::roster::{DataLoadError, Member, Roster};

/// Map the roster, hand it to `engine` and route engine events to the
/// interaction handler.
///
/// All or nothing: if loading or mounting failed, the error is logged, the
/// container shows `fallback` and no network is returned.
pub fn start<E: GraphEngine>(
	engine: &E,
	container: &E::Container,
	loaded: Result<Roster, DataLoadError>,
	options: &NetworkOptions,
	selected: RwSignal<Option<Member>>,
	fallback: &str,
) -> Option<E::Network> {
	let roster = match loaded {
		Ok(roster) => roster,
		Err(e) => {
			error!("alumni-graph: {}", e);
			container.show_text(fallback);
			return None;
		}
	};

	let graph = map_to_graph(&roster.members, &roster.relations);
	let interaction = Interaction::new(roster.members, selected);

	match engine.render(
		container,
		&graph,
		options,
		Box::new(move |event: &NetworkEvent, network: &dyn Network| {
			interaction.handle(event, network)
		}),
	) {
		Ok(network) => Some(network),
		Err(e) => {
			error!("alumni-graph: {}", e);
			container.show_text(fallback);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};

	use leptos::reactive::owner::Owner;

	use super::*;
	use crate::graph::{EventHandler, NetworkGraph, RenderError};
	use crate::roster::{MemberId, Relation, parse_roster};

	const FALLBACK: &str = "Failed to load data";

	#[derive(Default)]
	struct TextBox {
		text: RefCell<String>,
	}

	impl Mount for TextBox {
		fn show_text(&self, text: &str) {
			*self.text.borrow_mut() = text.to_string();
		}
	}

	#[derive(Default)]
	struct FakeNetwork {
		fits: Cell<usize>,
	}

	impl Network for FakeNetwork {
		fn fit(&self) {
			self.fits.set(self.fits.get() + 1);
		}
	}

	/// Records what it was asked to render and keeps the handler so tests can
	/// play engine events.
	#[derive(Default)]
	struct FakeEngine {
		fail: bool,
		renders: Cell<usize>,
		graph: RefCell<Option<NetworkGraph>>,
		handler: RefCell<Option<EventHandler>>,
	}

	impl FakeEngine {
		fn fire(&self, event: NetworkEvent, network: &FakeNetwork) {
			let mut handler = self.handler.borrow_mut();
			let handler = handler.as_mut().expect("engine was never rendered");
			handler(&event, network);
		}
	}

	impl GraphEngine for FakeEngine {
		type Container = TextBox;
		type Network = ();

		fn render(
			&self,
			_container: &TextBox,
			graph: &NetworkGraph,
			_options: &NetworkOptions,
			on_event: EventHandler,
		) -> Result<(), RenderError> {
			self.renders.set(self.renders.get() + 1);
			if self.fail {
				return Err(RenderError::NoContext);
			}
			*self.graph.borrow_mut() = Some(graph.clone());
			*self.handler.borrow_mut() = Some(on_event);
			Ok(())
		}
	}

	impl Network for () {
		fn fit(&self) {}
	}

	fn roster() -> Roster {
		Roster {
			members: vec![
				Member {
					id: MemberId::from("x"),
					name: "Ada".into(),
					nick: None,
					class: "1990".into(),
					bio: Some("Analyst".into()),
				},
				Member {
					id: MemberId::from("y"),
					name: "Grace".into(),
					nick: None,
					class: "1991".into(),
					bio: None,
				},
			],
			relations: vec![Relation {
				from: MemberId::from("x"),
				to: MemberId::from("y"),
			}],
		}
	}

	fn setup() -> (Owner, RwSignal<Option<Member>>) {
		let owner = Owner::new();
		owner.set();
		(owner, RwSignal::new(None))
	}

	#[test]
	fn load_failure_shows_fallback_without_rendering() {
		let (_owner, selected) = setup();
		let engine = FakeEngine::default();
		let container = TextBox::default();
		let loaded = parse_roster(false, 500, "Internal Server Error", "");

		let network = start(
			&engine,
			&container,
			loaded,
			&NetworkOptions::default(),
			selected,
			FALLBACK,
		);

		assert!(network.is_none());
		assert_eq!(*container.text.borrow(), FALLBACK);
		assert_eq!(engine.renders.get(), 0);
	}

	#[test]
	fn render_failure_also_shows_fallback() {
		let (_owner, selected) = setup();
		let engine = FakeEngine {
			fail: true,
			..Default::default()
		};
		let container = TextBox::default();

		let network = start(
			&engine,
			&container,
			Ok(roster()),
			&NetworkOptions::default(),
			selected,
			FALLBACK,
		);

		assert!(network.is_none());
		assert_eq!(engine.renders.get(), 1);
		assert_eq!(*container.text.borrow(), FALLBACK);
	}

	#[test]
	fn successful_start_renders_the_mapped_graph() {
		let (_owner, selected) = setup();
		let engine = FakeEngine::default();
		let container = TextBox::default();

		let network = start(
			&engine,
			&container,
			Ok(roster()),
			&NetworkOptions::default(),
			selected,
			FALLBACK,
		);

		assert!(network.is_some());
		assert_eq!(engine.renders.get(), 1);
		assert!(container.text.borrow().is_empty());
		let graph = engine.graph.borrow().clone().unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.edges.len(), 1);
	}

	#[test]
	fn engine_events_reach_the_interaction_handler() {
		let (_owner, selected) = setup();
		let engine = FakeEngine::default();
		let container = TextBox::default();
		start(
			&engine,
			&container,
			Ok(roster()),
			&NetworkOptions::default(),
			selected,
			FALLBACK,
		);
		let network = FakeNetwork::default();

		engine.fire(
			NetworkEvent::Click {
				nodes: vec![MemberId::from("y")],
			},
			&network,
		);
		assert_eq!(
			selected.get_untracked().map(|m| m.name),
			Some("Grace".to_string())
		);

		engine.fire(NetworkEvent::Click { nodes: vec![] }, &network);
		assert_eq!(
			selected.get_untracked().map(|m| m.name),
			Some("Grace".to_string())
		);

		engine.fire(NetworkEvent::StabilizationDone, &network);
		engine.fire(NetworkEvent::StabilizationDone, &network);
		assert_eq!(network.fits.get(), 1);
	}
}
