//! alumni-graph: interactive relationship graph of an alumni roster.
//!
//! The page fetches a roster of members and directed relations, lays them
//! out as a force-directed network on a canvas and shows the details of the
//! member last clicked in a side panel.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};
use web_sys::HtmlElement;

pub mod bootstrap;
pub mod components;
pub mod config;
pub mod graph;
pub mod interaction;
pub mod roster;

pub use components::details::DetailsPanel;
pub use components::force_graph::{CanvasEngine, CanvasNetwork};
pub use config::AppConfig;
pub use roster::{DataLoadError, Member, MemberId, Relation, Roster, load_roster};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("alumni-graph: logging initialized");
}

/// Main application component.
/// Mounts the network container and details panel, then loads the roster.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::default();
	let selected = RwSignal::new(None::<Member>);
	let network_ref = NodeRef::<leptos::html::Div>::new();

	Effect::new(move |_| {
		let Some(div) = network_ref.get() else {
			return;
		};
		let container: HtmlElement = div.into();
		spawn_local(async move {
			let loaded = load_roster(config.data_url).await;
			// The canvas owns its listeners and animation loop; the handle is
			// only needed by callers that drive the view themselves.
			let _network = bootstrap::start(
				&CanvasEngine::default(),
				&container,
				loaded,
				&graph::NetworkOptions::default(),
				selected,
				config.fallback_message,
			);
		});
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=config.title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<header class="page-header">
			<h1>{config.title}</h1>
			<p class="subtitle">"Click a member for details. Drag to move, scroll to zoom."</p>
		</header>
		<main class="layout">
			<div id=config.network_id class="network" node_ref=network_ref></div>
			<DetailsPanel selected=selected id=config.details_id />
		</main>
	}
}
