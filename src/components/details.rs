//! Side panel showing the selected member.

use leptos::prelude::*;

use crate::roster::Member;

/// Placeholder for absent nickname or class.
pub const PLACEHOLDER: &str = "—";

/// Display fields for one member, with placeholders already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDetails {
	/// Member name.
	pub heading: String,
	/// Nickname or the placeholder.
	pub nickname: String,
	/// Cohort or the placeholder.
	pub class: String,
	/// Empty when the member has no bio.
	pub bio: String,
	/// Raw member id.
	pub id: String,
}

impl From<&Member> for MemberDetails {
	fn from(member: &Member) -> Self {
		Self {
			heading: member.name.clone(),
			nickname: member.nick().unwrap_or(PLACEHOLDER).to_string(),
			class: member.class().unwrap_or(PLACEHOLDER).to_string(),
			bio: member.bio().unwrap_or_default().to_string(),
			id: member.id.to_string(),
		}
	}
}

/// Renders the selected member, or a hint while nothing is selected.
#[component]
pub fn DetailsPanel(
	#[prop(into)] selected: Signal<Option<Member>>,
	#[prop(into)] id: String,
) -> impl IntoView {
	let details = Memo::new(move |_| selected.get().as_ref().map(MemberDetails::from));

	view! {
		<aside id=id class="details-panel">
			{move || match details.get() {
				Some(d) => view! {
					<h3>{d.heading}</h3>
					<p><b>"Nickname:"</b>" "{d.nickname}</p>
					<p><b>"Class:"</b>" "{d.class}</p>
					<p>{d.bio}</p>
					<p><small>"ID: "{d.id}</small></p>
				}
				.into_any(),
				None => view! { <p class="hint">"Click a member to see details."</p> }.into_any(),
			}}
		</aside>
	}
}
