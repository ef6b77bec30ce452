//! Application-level settings: where the data lives and where to mount.

/// Fixed settings for one page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Path of the roster JSON document, relative to the page.
	pub data_url: &'static str,
	/// Id of the element hosting the network canvas.
	pub network_id: &'static str,
	/// Id of the details side panel.
	pub details_id: &'static str,
	/// Shown in place of the network when loading fails.
	pub fallback_message: &'static str,
	/// Page title and heading.
	pub title: &'static str,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: "data/relations.json",
			network_id: "network",
			details_id: "details",
			fallback_message: "Failed to load data \u{2014} check console.",
			title: "Alumni Network",
		}
	}
}
