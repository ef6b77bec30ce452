//! Visual theming for the network canvas.
//!
//! Provides colors, the per-cohort palette and overlay styles.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba(..)` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors assigned to cohorts in order of first appearance.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Colours handed out in order.
	pub colors: Vec<Color>,
	/// Fill for nodes without a cohort.
	pub fallback: Color,
}

impl NodePalette {
	/// Bright pastel fills that keep dark label text readable.
	pub fn cohorts() -> Self {
		Self {
			colors: vec![
				Color::rgb(151, 194, 252), // Sky
				Color::rgb(251, 126, 129), // Coral
				Color::rgb(123, 225, 65),  // Lime
				Color::rgb(235, 125, 244), // Orchid
				Color::rgb(255, 168, 7),   // Amber
				Color::rgb(173, 133, 228), // Lavender
				Color::rgb(255, 255, 0),   // Lemon
				Color::rgb(194, 250, 188), // Mint
				Color::rgb(255, 192, 203), // Pink
				Color::rgb(110, 110, 253), // Periwinkle
			],
			fallback: Color::rgb(210, 215, 222),
		}
	}

	/// Colour for the `index`-th group, wrapping around.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// How much darker the border is than the fill.
	pub border_darken: f64,
	/// Border width multiplier for the hovered node.
	pub hover_border_mult: f64,
	/// Label colour.
	pub text: Color,
	/// Opacity of nodes outside the hover highlight.
	pub dimmed_alpha: f64,
}

/// Edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Normal edge opacity.
	pub alpha: f64,
	/// Opacity of edges outside the hover highlight.
	pub dimmed_alpha: f64,
	/// Perpendicular bow of smooth edges, as a fraction of their length.
	pub roundness: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Node box styling.
	pub node: NodeStyle,
	/// Edge styling.
	pub edge: EdgeStyle,
	/// Cohort colours.
	pub palette: NodePalette,
	/// Inline CSS for the hover tooltip.
	pub tooltip_css: &'static str,
	/// Inline CSS shared by the navigation buttons.
	pub button_css: &'static str,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			node: NodeStyle {
				border_darken: 0.35,
				hover_border_mult: 2.0,
				text: Color::rgb(52, 52, 52),
				dimmed_alpha: 0.35,
			},
			edge: EdgeStyle {
				alpha: 0.8,
				dimmed_alpha: 0.2,
				roundness: 0.25,
			},
			palette: NodePalette::cohorts(),
			tooltip_css: "position: absolute; display: none; pointer-events: none; \
				white-space: pre-line; padding: 5px 8px; font: 13px Inter, Roboto, system-ui; \
				color: #222; background: #f5f4ed; border: 1px solid #808074; \
				border-radius: 3px; box-shadow: 3px 3px 10px rgba(0, 0, 0, 0.2);",
			button_css: "width: 30px; height: 30px; margin: 2px; border: 1px solid #b0b0b0; \
				border-radius: 15px; background: rgba(255, 255, 255, 0.9); cursor: pointer; \
				font: 14px system-ui; color: #444;",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_omits_alpha_when_opaque() {
		assert_eq!(Color::rgb(151, 194, 252).to_css(), "#97c2fc");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
	}

	#[test]
	fn palette_wraps_around() {
		let palette = NodePalette::cohorts();
		assert_eq!(palette.get(0), palette.get(palette.colors.len()));
	}
}
