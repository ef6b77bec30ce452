//! Force-directed network engine drawn on an HTML canvas.
//!
//! Implements [`GraphEngine`](crate::graph::GraphEngine) with:
//! - Physics-based layout via the `force_graph` simulation, pre-stabilized
//!   before the first frame
//! - Rounded box nodes sized to their labels, coloured per cohort
//! - Curved directed edges coloured after their source node
//! - Pan, zoom, node dragging, hover highlight and tooltips
//! - Keyboard and on-canvas button navigation
//!
//! # Example
//!
//! ```ignore
//! use alumni_graph::components::force_graph::CanvasEngine;
//! use alumni_graph::graph::{GraphEngine, NetworkOptions, map_to_graph};
//!
//! let graph = map_to_graph(&roster.members, &roster.relations);
//! let network = CanvasEngine::default().render(
//!     &container,
//!     &graph,
//!     &NetworkOptions::default(),
//!     Box::new(|event, _network| log::info!("{:?}", event)),
//! )?;
//! ```

mod navigation;
mod network;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use network::{CanvasEngine, CanvasNetwork};
pub use theme::Theme;
