//! Application state for one family graph canvas.
//!
//! Owns the family data and everything derived from it. Any change to the
//! data or the canvas size reruns the whole pipeline (resolve generations,
//! lay out rows, re-center the camera) rather than patching the previous
//! layout. Hover and selection are kept by id and revalidated afterwards.

use log::{debug, info};
use serde::Deserialize;

use super::camera::{AnimationStatus, Camera, CameraConfig, Viewport};
use super::generation::resolve_generations;
use super::interaction::{InteractionConfig, InteractionContext, InteractionController, InteractionResponse};
use super::layout::{Layout, LayoutConfig, Node, compute_layout};
use super::types::{FamilyData, Individual, IndividualId, Point};
use crate::error::Result;

/// Name given to individuals created by clicking the canvas in edit mode.
pub const NEW_INDIVIDUAL_NAME: &str = "New individual";

/// Tunables for layout, camera and pointer handling.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub layout: LayoutConfig,
	pub camera: CameraConfig,
	pub interaction: InteractionConfig,
}

impl GraphConfig {
	/// Decode a (possibly partial) configuration; omitted fields keep defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Core state combining data, layout, camera and interaction.
///
/// Created once when the canvas mounts, then mutated by pointer handlers and
/// the animation loop.
pub struct GraphState {
	pub family: FamilyData,
	pub config: GraphConfig,
	pub layout: Layout,
	pub camera: Camera,
	pub interaction: InteractionController,
	pub width: f64,
	pub height: f64,
	needs_redraw: bool,
}

impl GraphState {
	pub fn new(family: FamilyData, width: f64, height: f64, config: GraphConfig) -> Self {
		let mut state = Self {
			family,
			layout: Layout::default(),
			camera: Camera::new(config.camera.initial_scale),
			interaction: InteractionController::new(config.interaction.clone()),
			config,
			width,
			height,
			needs_redraw: true,
		};
		state.relayout();
		state
	}

	pub fn viewport(&self) -> Viewport {
		Viewport::new(self.width, self.height)
	}

	/// Rebuild the layout from the current data and canvas width, center the
	/// camera on it, and drop hover/selection ids that no longer exist.
	///
	/// A selection flight in progress is steered to the selected node's new
	/// position, or dropped if that individual is gone.
	pub fn relayout(&mut self) {
		let generations = resolve_generations(&self.family.members);
		self.layout = compute_layout(&self.family.members, &generations, self.width, &self.config.layout);
		if let Some(bounds) = self.layout.bounds() {
			self.camera.center_on(bounds.center());
		}
		self.interaction.retain_known(&self.layout);
		if self.camera.is_animating() {
			match self.selected_node().map(Node::center) {
				Some(center) => self.camera.retarget(center),
				None => self.camera.cancel_animation(),
			}
		}
		let viewport = self.viewport();
		self.interaction.refresh_hover(&self.layout, &self.camera, viewport);
		self.needs_redraw = true;
		debug!(
			"family-graph: relayout at {}x{}, camera on ({:.1}, {:.1})",
			self.width, self.height, self.camera.x, self.camera.y
		);
	}

	/// Replace the data set.
	pub fn set_family(&mut self, family: FamilyData) {
		info!(
			"family-graph: loaded {} individuals, {} unions",
			family.members.len(),
			family.marriages.len()
		);
		self.family = family;
		self.relayout();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.relayout();
	}

	/// Append a parentless individual and relayout. The layout is row-based,
	/// so `world` only identifies where the user clicked.
	pub fn add_individual_at(&mut self, world: Point) -> IndividualId {
		let id = self.family.next_id();
		info!(
			"family-graph: adding individual {} (requested at {:.0}, {:.0})",
			id, world.x, world.y
		);
		self.family
			.members
			.push(Individual::new(id, NEW_INDIVIDUAL_NAME, Vec::new()));
		self.relayout();
		id
	}

	pub fn hovered_node(&self) -> Option<&Node> {
		self.interaction.hovered().and_then(|id| self.layout.node(id))
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.interaction.selected().and_then(|id| self.layout.node(id))
	}

	pub fn request_redraw(&mut self) {
		self.needs_redraw = true;
	}

	/// Per-frame hook: advance any camera animation to `now_ms` and report
	/// whether the canvas should be repainted this frame.
	pub fn frame(&mut self, now_ms: f64) -> bool {
		let animated = self.camera.tick(now_ms) != AnimationStatus::Idle;
		std::mem::take(&mut self.needs_redraw) || animated
	}

	pub fn pointer_down(&mut self, screen: Point, now_ms: f64) -> InteractionResponse {
		self.dispatch(now_ms, |c, ctx| c.pointer_down(ctx, screen))
	}

	pub fn pointer_move(&mut self, screen: Point, now_ms: f64) -> InteractionResponse {
		self.dispatch(now_ms, |c, ctx| c.pointer_move(ctx, screen))
	}

	pub fn pointer_up(&mut self, screen: Point, now_ms: f64) -> InteractionResponse {
		self.dispatch(now_ms, |c, ctx| c.pointer_up(ctx, screen))
	}

	pub fn pointer_leave(&mut self) -> InteractionResponse {
		let response = self.interaction.pointer_leave();
		self.needs_redraw |= response.redraw;
		response
	}

	pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> InteractionResponse {
		self.dispatch(now_ms, |c, ctx| c.wheel(ctx, delta_y))
	}

	fn dispatch(
		&mut self,
		now_ms: f64,
		handler: impl FnOnce(&mut InteractionController, &mut InteractionContext<'_>) -> InteractionResponse,
	) -> InteractionResponse {
		let viewport = self.viewport();
		let mut ctx = InteractionContext {
			layout: &self.layout,
			camera: &mut self.camera,
			camera_config: &self.config.camera,
			viewport,
			now_ms,
		};
		let response = handler(&mut self.interaction, &mut ctx);
		self.needs_redraw |= response.redraw;
		response
	}
}
