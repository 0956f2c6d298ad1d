//! Row-per-generation node placement.
//!
//! Rows are stacked top to bottom in ascending generation order, each row is
//! centered horizontally on the canvas, and members keep the order they have
//! in the input. The result is a pure function of its arguments.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::Deserialize;

use super::generation::Generations;
use super::theme::{Color, GenerationPalette};
use super::types::{Individual, IndividualId, Point};

/// Spacing and sizing constants for the layout, all in world units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	pub node_radius: f64,
	/// Distance between neighbouring node centers in a row.
	pub horizontal_spacing: f64,
	/// Distance between consecutive rows.
	pub vertical_spacing: f64,
	/// Vertical position of the first row.
	pub top_offset: f64,
	pub palette: GenerationPalette,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_radius: 40.0,
			horizontal_spacing: 200.0,
			vertical_spacing: 150.0,
			top_offset: 100.0,
			palette: GenerationPalette::default(),
		}
	}
}

/// A positioned individual. Rebuilt on every layout pass, so hold on to the
/// individual's id rather than the node itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub individual: Individual,
	pub generation: u32,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: Color,
}

impl Node {
	pub fn id(&self) -> IndividualId {
		self.individual.id
	}

	pub fn center(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Whether a world-space point falls within the node's radius.
	pub fn contains(&self, world: Point) -> bool {
		self.center().distance(world) <= self.radius
	}
}

/// Axis-aligned box around all node centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min: Point,
	pub max: Point,
}

impl Bounds {
	pub fn center(&self) -> Point {
		Point::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
	}
}

/// Output of a layout pass: nodes in input order plus an id lookup.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	pub nodes: Vec<Node>,
	node_index: HashMap<IndividualId, usize>,
}

impl Layout {
	pub fn node(&self, id: IndividualId) -> Option<&Node> {
		self.node_index.get(&id).map(|&i| &self.nodes[i])
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// First node, in input order, whose disc contains `world`.
	pub fn node_at(&self, world: Point) -> Option<&Node> {
		self.nodes.iter().find(|node| node.contains(world))
	}

	/// Bounding box of node centers, or `None` when there are no nodes.
	pub fn bounds(&self) -> Option<Bounds> {
		let first = self.nodes.first()?.center();
		let init = Bounds {
			min: first,
			max: first,
		};
		Some(self.nodes.iter().fold(init, |b, node| Bounds {
			min: Point::new(b.min.x.min(node.x), b.min.y.min(node.y)),
			max: Point::new(b.max.x.max(node.x), b.max.y.max(node.y)),
		}))
	}
}

/// Place every individual on its generation row.
///
/// Individuals missing from `generations` are treated as generation 0. Ids
/// must be unique; with duplicates the lookup keeps the last one.
pub fn compute_layout(
	individuals: &[Individual],
	generations: &Generations,
	canvas_width: f64,
	config: &LayoutConfig,
) -> Layout {
	let mut rows: BTreeMap<u32, Vec<&Individual>> = BTreeMap::new();
	for individual in individuals {
		let generation = generations.get(&individual.id).copied().unwrap_or(0);
		rows.entry(generation).or_default().push(individual);
	}

	let mut layout = Layout {
		nodes: Vec::with_capacity(individuals.len()),
		node_index: HashMap::with_capacity(individuals.len()),
	};

	let spacing = config.horizontal_spacing;
	let mut y = config.top_offset;
	for (&generation, members) in &rows {
		let row_width = members.len() as f64 * spacing;
		let mut x = (canvas_width - row_width) / 2.0 + spacing / 2.0;
		for &individual in members {
			let previous = layout.node_index.insert(individual.id, layout.nodes.len());
			debug_assert!(previous.is_none(), "duplicate individual id {}", individual.id);
			layout.nodes.push(Node {
				individual: individual.clone(),
				generation,
				x,
				y,
				radius: config.node_radius,
				color: config.palette.get(generation),
			});
			x += spacing;
		}
		y += config.vertical_spacing;
	}

	debug!(
		"layout: placed {} nodes on {} rows (width {})",
		layout.nodes.len(),
		rows.len(),
		canvas_width
	);
	layout
}
