//! Zoom-dependent scaling configuration for network visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! Node boxes, labels and borders live in world-space and grow with zoom like any
//! diagram. Hit slop and arrowheads are kept readable with screen-space bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Node box and label scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Label font size in world units.
	pub label_size: f64,
	/// Line height as a multiple of `label_size`.
	pub line_height: f64,
	/// Extra hit slop around each box.
	pub hit_padding: f64,
	/// How hit slop scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Labels fade out when zoomed far out.
	pub label_alpha: AlphaBehavior,
}

/// Edge and arrowhead scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base stroke width.
	pub line_width: f64,
	/// How stroke width scales with zoom.
	pub line_behavior: ScaleBehavior,
	/// Base arrowhead length.
	pub arrow_size: f64,
	/// How arrowheads scale with zoom.
	pub arrow_behavior: ScaleBehavior,
	/// Edge opacity by zoom.
	pub alpha: AlphaBehavior,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node sizes.
	pub node: NodeScaleConfig,
	/// Edge sizes.
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				label_size: 14.0,
				line_height: 1.25,
				hit_padding: 3.0,
				hit_behavior: ScaleBehavior::Screen,
				label_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 0.2,
					full_alpha_k: 0.45,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.0,
				line_behavior: ScaleBehavior::Clamped {
					min_screen: 0.75,
					max_screen: f64::INFINITY,
				},
				arrow_size: 8.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 16.0,
				},
				alpha: AlphaBehavior::Constant,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Hit slop in world units.
	pub hit_padding: f64,
	/// Label opacity.
	pub label_alpha: f64,
	/// Edge stroke width in world units.
	pub edge_line_width: f64,
	/// Edge opacity multiplier.
	pub edge_alpha: f64,
	/// Arrowhead length in world units.
	pub arrow_size: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			hit_padding: config.node.hit_behavior.apply(config.node.hit_padding, k),
			label_alpha: config.node.label_alpha.apply(k),
			edge_line_width: config
				.edge
				.line_behavior
				.apply(config.edge.line_width, k),
			edge_alpha: config.edge.alpha.apply(k),
			arrow_size: config
				.edge
				.arrow_behavior
				.apply(config.edge.arrow_size, k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_values_shrink_in_world_space_when_zoomed_in() {
		assert_eq!(ScaleBehavior::Screen.apply(3.0, 2.0), 1.5);
		assert_eq!(ScaleBehavior::World.apply(3.0, 2.0), 3.0);
	}

	#[test]
	fn clamped_values_respect_screen_bounds() {
		let arrow = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 16.0,
		};
		// At k=4 an 8-unit arrow would be 32px on screen; capped to 16px.
		assert_eq!(arrow.apply(8.0, 4.0), 4.0);
		// At k=0.25 it would be 2px; raised to 4px.
		assert_eq!(arrow.apply(8.0, 0.25), 16.0);
	}

	#[test]
	fn labels_fade_out_when_zoomed_out() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 0.1);
		assert_eq!(scale.label_alpha, 0.0);
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scale.label_alpha, 1.0);
	}
}
