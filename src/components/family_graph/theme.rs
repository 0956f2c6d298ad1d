//! Visual theming for the family graph.
//!
//! Provides the color type, the generation palette used to tint nodes by row,
//! and the stroke/fill styles of the canvas painter.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FamilyGraphError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses `#RRGGBB` and `rgb()`/`rgba()` functional notation.
	pub fn parse(css: &str) -> Option<Self> {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return None;
			}
			let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
			return Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
		}

		let body = css
			.strip_prefix("rgba(")
			.or_else(|| css.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		match parts.as_slice() {
			[r, g, b] => Some(Color::rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?)),
			[r, g, b, a] => Some(Color::rgba(
				r.parse().ok()?,
				g.parse().ok()?,
				b.parse().ok()?,
				a.parse().ok()?,
			)),
			_ => None,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = FamilyGraphError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Color::parse(&value).ok_or(FamilyGraphError::InvalidColor(value))
	}
}

/// Node colors keyed by generation, with a fallback for deeper rows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationPalette {
	pub colors: BTreeMap<u32, Color>,
	pub fallback: Color,
}

impl GenerationPalette {
	pub fn get(&self, generation: u32) -> Color {
		self.colors.get(&generation).copied().unwrap_or(self.fallback)
	}
}

impl Default for GenerationPalette {
	fn default() -> Self {
		Self {
			colors: BTreeMap::from([
				(0, Color::rgb(0x4a, 0x90, 0xe2)), // Blue
				(1, Color::rgb(0x50, 0xc8, 0x78)), // Emerald
				(2, Color::rgb(0xe2, 0x5d, 0x5d)), // Coral red
			]),
			fallback: Color::rgb(255, 255, 255),
		}
	}
}

/// Parent-child and union line styles.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Screen-space width, unaffected by zoom.
	pub width: f64,
	pub marriage_color: Color,
}

/// Node fill, shadow and label styles.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub shadow_color: Color,
	pub shadow_blur: f64,
	pub shadow_offset_y: f64,
	/// Extra screen-space radius while hovered.
	pub hover_grow: f64,
	pub selected_stroke: Color,
	pub selected_stroke_width: f64,
	pub label_color: Color,
	pub label_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	/// Glow used for the selected individual's relatives and their edges.
	pub highlight: Color,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(0x1a, 0x1a, 0x2e),
			highlight: Color::rgb(0xff, 0xe0, 0x66),
			edge: EdgeStyle {
				color: Color::rgba(255, 255, 255, 0.4),
				width: 2.0,
				marriage_color: Color::rgb(0xff, 0xb3, 0xc6),
			},
			node: NodeStyle {
				shadow_color: Color::rgba(0, 0, 0, 0.3),
				shadow_blur: 10.0,
				shadow_offset_y: 4.0,
				hover_grow: 5.0,
				selected_stroke: Color::rgb(255, 255, 255),
				selected_stroke_width: 4.0,
				label_color: Color::rgb(255, 255, 255),
				label_family: "Arial",
			},
		}
	}
}
