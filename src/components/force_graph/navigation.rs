//! Keyboard and on-canvas button navigation.

use super::state::NetworkState;

/// Screen pixels moved per pan step.
const PAN_STEP: f64 = 40.0;
/// Zoom multiplier per zoom step.
const ZOOM_STEP: f64 = 1.2;

/// A view change triggered by a key or a navigation button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavAction {
	/// Move the view by a screen-space offset.
	Pan(f64, f64),
	/// Zoom around the canvas centre.
	Zoom(f64),
	Fit,
}

impl NavAction {
	/// Arrow keys pan, `+`/`-` zoom, `0` or `f` fits.
	pub fn from_key(key: &str) -> Option<Self> {
		Some(match key {
			"ArrowUp" => NavAction::Pan(0.0, PAN_STEP),
			"ArrowDown" => NavAction::Pan(0.0, -PAN_STEP),
			"ArrowLeft" => NavAction::Pan(PAN_STEP, 0.0),
			"ArrowRight" => NavAction::Pan(-PAN_STEP, 0.0),
			"+" | "=" => NavAction::Zoom(ZOOM_STEP),
			"-" | "_" => NavAction::Zoom(1.0 / ZOOM_STEP),
			"0" | "f" => NavAction::Fit,
			_ => return None,
		})
	}

	pub fn apply(self, state: &mut NetworkState) {
		match self {
			NavAction::Pan(dx, dy) => state.pan_by(dx, dy),
			NavAction::Zoom(factor) => state.zoom(factor),
			NavAction::Fit => state.fit(),
		}
	}
}

/// Navigation buttons as (glyph, tooltip, action), in display order.
pub const BUTTONS: &[(&str, &str, NavAction)] = &[
	("\u{25B2}", "Move up", NavAction::Pan(0.0, PAN_STEP)),
	("\u{25BC}", "Move down", NavAction::Pan(0.0, -PAN_STEP)),
	("\u{25C0}", "Move left", NavAction::Pan(PAN_STEP, 0.0)),
	("\u{25B6}", "Move right", NavAction::Pan(-PAN_STEP, 0.0)),
	("+", "Zoom in", NavAction::Zoom(ZOOM_STEP)),
	("\u{2212}", "Zoom out", NavAction::Zoom(1.0 / ZOOM_STEP)),
	("\u{2922}", "Fit to view", NavAction::Fit),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_map_to_actions() {
		assert_eq!(NavAction::from_key("ArrowLeft"), Some(NavAction::Pan(PAN_STEP, 0.0)));
		assert_eq!(NavAction::from_key("="), Some(NavAction::Zoom(ZOOM_STEP)));
		assert_eq!(NavAction::from_key("f"), Some(NavAction::Fit));
		assert_eq!(NavAction::from_key("q"), None);
	}

	#[test]
	fn every_key_action_has_a_button() {
		for key in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "+", "-", "0"] {
			let action = NavAction::from_key(key).unwrap();
			assert!(
				BUTTONS.iter().any(|(_, _, a)| *a == action),
				"no button for {key}"
			);
		}
	}
}
