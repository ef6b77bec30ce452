//! Reacts to engine events: node clicks select a member, the first settled
//! layout fits the view.

use std::cell::Cell;

use leptos::prelude::*;
use log::{debug, warn};

use crate::graph::{Network, NetworkEvent};
use crate::roster::{Member, MemberId, find_member};

/// Click and stabilization handling for one session.
///
/// The selected member lives in a reactive cell; the details panel subscribes
/// to it. The fit-on-settle binding fires once, guarded by `fitted`.
pub struct Interaction {
	members: Vec<Member>,
	selected: RwSignal<Option<Member>>,
	fitted: Cell<bool>,
}

impl Interaction {
	/// Start with nothing fitted yet.
	pub fn new(members: Vec<Member>, selected: RwSignal<Option<Member>>) -> Self {
		Self {
			members,
			selected,
			fitted: Cell::new(false),
		}
	}

	/// React to one engine event.
	pub fn handle(&self, event: &NetworkEvent, network: &dyn Network) {
		match event {
			NetworkEvent::Click { nodes } => self.select(nodes),
			NetworkEvent::StabilizationDone => self.fit_once(network),
		}
	}

	/// Select the first clicked node. Background clicks and unknown ids leave the
	/// current selection untouched.
	fn select(&self, nodes: &[MemberId]) {
		let Some(id) = nodes.first() else {
			return;
		};
		match find_member(&self.members, id) {
			Some(member) => {
				debug!("alumni-graph: selected member {}", id);
				self.selected.set(Some(member.clone()));
			}
			None => warn!("alumni-graph: clicked node {} has no matching member", id),
		}
	}

	fn fit_once(&self, network: &dyn Network) {
		if self.fitted.replace(true) {
			return;
		}
		debug!("alumni-graph: layout stabilized, fitting view");
		network.fit();
	}
}

#[cfg(test)]
mod tests {
	use leptos::reactive::owner::Owner;

	use super::*;

	#[derive(Default)]
	struct CountingNetwork {
		fits: Cell<usize>,
	}

	impl Network for CountingNetwork {
		fn fit(&self) {
			self.fits.set(self.fits.get() + 1);
		}
	}

	fn ada() -> Member {
		Member {
			id: MemberId::from("x"),
			name: "Ada".into(),
			nick: Some(String::new()),
			class: "1990".into(),
			bio: Some("Wrote the first program".into()),
		}
	}

	fn grace() -> Member {
		Member {
			id: MemberId::from(2),
			name: "Grace".into(),
			nick: None,
			class: "1991".into(),
			bio: None,
		}
	}

	fn setup() -> (Owner, RwSignal<Option<Member>>, Interaction) {
		let owner = Owner::new();
		owner.set();
		let selected = RwSignal::new(None);
		let interaction = Interaction::new(vec![ada(), grace()], selected);
		(owner, selected, interaction)
	}

	fn click(ids: &[MemberId]) -> NetworkEvent {
		NetworkEvent::Click {
			nodes: ids.to_vec(),
		}
	}

	#[test]
	fn click_selects_the_matching_member() {
		let (_owner, selected, interaction) = setup();
		let network = CountingNetwork::default();

		interaction.handle(&click(&[MemberId::from("x")]), &network);

		assert_eq!(selected.get_untracked(), Some(ada()));
	}

	#[test]
	fn only_the_first_clicked_node_counts() {
		let (_owner, selected, interaction) = setup();
		let network = CountingNetwork::default();

		interaction.handle(&click(&[MemberId::from(2), MemberId::from("x")]), &network);

		assert_eq!(selected.get_untracked(), Some(grace()));
	}

	#[test]
	fn empty_click_keeps_previous_selection() {
		let (_owner, selected, interaction) = setup();
		let network = CountingNetwork::default();

		interaction.handle(&click(&[MemberId::from(2)]), &network);
		interaction.handle(&click(&[]), &network);

		assert_eq!(selected.get_untracked(), Some(grace()));
	}

	#[test]
	fn unknown_id_is_ignored() {
		let (_owner, selected, interaction) = setup();
		let network = CountingNetwork::default();

		interaction.handle(&click(&[MemberId::from("x")]), &network);
		interaction.handle(&click(&[MemberId::from(404)]), &network);

		assert_eq!(selected.get_untracked(), Some(ada()));
	}

	#[test]
	fn fit_happens_on_first_stabilization_only() {
		let (_owner, _selected, interaction) = setup();
		let network = CountingNetwork::default();

		assert_eq!(network.fits.get(), 0);
		interaction.handle(&NetworkEvent::StabilizationDone, &network);
		interaction.handle(&NetworkEvent::StabilizationDone, &network);
		interaction.handle(&click(&[]), &network);
		interaction.handle(&NetworkEvent::StabilizationDone, &network);

		assert_eq!(network.fits.get(), 1);
	}
}
