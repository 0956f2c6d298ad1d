//! Zoom-dependent sizes for the canvas painter.
//!
//! The painter draws in screen space after mapping every world point through
//! the camera, so each size here resolves to screen pixels for the current
//! camera scale `k`.
//!
//! - [`ScaleBehavior::World`]: grows and shrinks with zoom (`base * k`).
//! - [`ScaleBehavior::Clamped`]: follows zoom but stays within pixel bounds.

/// How a visual property responds to zoom.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	World,
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Screen-pixel size of `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base * k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => (base * k).clamp(*min_screen, *max_screen),
		}
	}
}

/// A base size paired with its zoom behaviour.
#[derive(Clone, Debug)]
pub struct Scaled {
	pub base: f64,
	pub behavior: ScaleBehavior,
}

impl Scaled {
	pub const fn world(base: f64) -> Self {
		Self {
			base,
			behavior: ScaleBehavior::World,
		}
	}

	pub fn at(&self, k: f64) -> f64 {
		self.behavior.apply(self.base, k)
	}
}

/// Base sizes for every zoom-dependent element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub label_size: Scaled,
	/// Relative-highlight ring drawn inside a node's outline.
	pub ring_width: Scaled,
	pub ring_glow: Scaled,
	pub edge_highlight_width: Scaled,
	pub edge_highlight_glow: Scaled,
	pub marriage_width: Scaled,
	pub marriage_highlight_width: Scaled,
	pub marriage_highlight_glow: Scaled,
	/// Union dash pattern (dash, gap).
	pub marriage_dash: (Scaled, Scaled),
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			label_size: Scaled {
				base: 14.0,
				behavior: ScaleBehavior::Clamped {
					min_screen: 12.0,
					max_screen: f64::INFINITY,
				},
			},
			ring_width: Scaled::world(16.0),
			ring_glow: Scaled::world(32.0),
			edge_highlight_width: Scaled::world(3.0),
			edge_highlight_glow: Scaled::world(10.0),
			marriage_width: Scaled::world(3.0),
			marriage_highlight_width: Scaled::world(6.0),
			marriage_highlight_glow: Scaled::world(18.0),
			marriage_dash: (Scaled::world(10.0), Scaled::world(8.0)),
		}
	}
}

/// Sizes resolved for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	/// CSS font shorthand for node labels.
	pub label_font: String,
	pub ring_width: f64,
	pub ring_glow: f64,
	pub edge_highlight_width: f64,
	pub edge_highlight_glow: f64,
	pub marriage_width: f64,
	pub marriage_highlight_width: f64,
	pub marriage_highlight_glow: f64,
	pub marriage_dash: (f64, f64),
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64, font_family: &str) -> Self {
		Self {
			k,
			label_font: format!("{}px {}", config.label_size.at(k), font_family),
			ring_width: config.ring_width.at(k),
			ring_glow: config.ring_glow.at(k),
			edge_highlight_width: config.edge_highlight_width.at(k),
			edge_highlight_glow: config.edge_highlight_glow.at(k),
			marriage_width: config.marriage_width.at(k),
			marriage_highlight_width: config.marriage_highlight_width.at(k),
			marriage_highlight_glow: config.marriage_highlight_glow.at(k),
			marriage_dash: (config.marriage_dash.0.at(k), config.marriage_dash.1.at(k)),
		}
	}

	/// On-screen radius of a node with world radius `radius`.
	pub fn node_radius(&self, radius: f64) -> f64 {
		radius * self.k
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_font_never_drops_below_minimum() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.5, "Arial").label_font, "12px Arial");
		assert_eq!(ScaledValues::new(&config, 2.0, "Arial").label_font, "28px Arial");
	}

	#[test]
	fn world_sizes_follow_zoom() {
		let values = ScaledValues::new(&ScaleConfig::default(), 2.0, "Arial");
		assert_eq!(values.ring_width, 32.0);
		assert_eq!(values.marriage_dash, (20.0, 16.0));
		assert_eq!(values.node_radius(40.0), 80.0);
	}
}
