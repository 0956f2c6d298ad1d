//! Pointer-driven panning, zooming, hover and selection.
//!
//! The controller is a small state machine over `{idle, dragging}` with hover,
//! selection and edit-mode flags layered on top. It never touches the DOM:
//! every handler returns an [`InteractionResponse`] telling the host whether
//! to repaint, which cursor to show, and whether an individual should be
//! created. Hover and selection are tracked by individual id so they survive
//! relayouts.

use log::debug;
use serde::Deserialize;

use super::camera::{Camera, CameraConfig, CameraTarget, Viewport};
use super::layout::{Layout, Node};
use super::types::{IndividualId, Point};

/// Click/drag discrimination and selection focus behaviour.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Largest per-axis pointer travel, in screen pixels, still counted as a click.
	pub drag_threshold: f64,
	/// Zoom level the camera flies to when an individual is selected.
	pub selection_scale: f64,
	pub selection_duration_ms: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			drag_threshold: 5.0,
			selection_scale: 2.0,
			selection_duration_ms: 700.0,
		}
	}
}

/// Pointer affordance the host should display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	/// Over a node.
	Pointer,
	Grab,
	Grabbing,
}

impl Cursor {
	pub fn css(self) -> &'static str {
		match self {
			Cursor::Pointer => "pointer",
			Cursor::Grab => "grab",
			Cursor::Grabbing => "grabbing",
		}
	}
}

/// Work the controller hands back to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionAction {
	/// Edit mode press on empty canvas: create an individual at this world point.
	AddIndividualAt(Point),
}

/// Outcome of a single pointer or wheel event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionResponse {
	pub redraw: bool,
	pub cursor: Option<Cursor>,
	pub action: Option<InteractionAction>,
}

impl InteractionResponse {
	fn redraw() -> Self {
		Self {
			redraw: true,
			..Self::default()
		}
	}
}

/// Tracks an in-progress press.
#[derive(Clone, Copy, Debug, Default)]
struct DragState {
	active: bool,
	/// Where the press started, for click detection.
	origin: Point,
	/// Last processed pointer position, for incremental panning.
	anchor: Point,
}

/// Everything a handler needs besides the controller's own state.
pub struct InteractionContext<'a> {
	pub layout: &'a Layout,
	pub camera: &'a mut Camera,
	pub camera_config: &'a CameraConfig,
	pub viewport: Viewport,
	/// Current frame time, used to start selection animations.
	pub now_ms: f64,
}

/// Hover, selection and drag state for one canvas.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	pub config: InteractionConfig,
	/// When set, pressing empty canvas requests a new individual.
	pub edit_mode: bool,
	hovered: Option<IndividualId>,
	selected: Option<IndividualId>,
	drag: DragState,
	/// Last known pointer position on the canvas, in screen space.
	pointer: Option<Point>,
}

impl InteractionController {
	pub fn new(config: InteractionConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn hovered(&self) -> Option<IndividualId> {
		self.hovered
	}

	pub fn selected(&self) -> Option<IndividualId> {
		self.selected
	}

	pub fn set_hovered(&mut self, id: Option<IndividualId>) {
		self.hovered = id;
	}

	pub fn set_selected(&mut self, id: Option<IndividualId>) {
		self.selected = id;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.active
	}

	/// Drop hover/selection ids that no longer exist after a relayout.
	pub fn retain_known(&mut self, layout: &Layout) {
		if self.hovered.is_some_and(|id| layout.node(id).is_none()) {
			self.hovered = None;
		}
		if self.selected.is_some_and(|id| layout.node(id).is_none()) {
			debug!("interaction: selected individual vanished after relayout");
			self.selected = None;
		}
	}

	/// Repeat the hover hit test at the last pointer position. Needed after a
	/// relayout moves nodes without the pointer moving.
	pub fn refresh_hover(&mut self, layout: &Layout, camera: &Camera, viewport: Viewport) {
		self.hovered = self
			.pointer
			.and_then(|screen| layout.node_at(camera.screen_to_world(screen, viewport)))
			.map(Node::id);
	}

	pub fn pointer_down(&mut self, ctx: &mut InteractionContext<'_>, screen: Point) -> InteractionResponse {
		self.pointer = Some(screen);
		if self.edit_mode {
			let world = ctx.camera.screen_to_world(screen, ctx.viewport);
			if ctx.layout.node_at(world).is_none() {
				return InteractionResponse {
					action: Some(InteractionAction::AddIndividualAt(world)),
					..InteractionResponse::default()
				};
			}
		}

		self.drag = DragState {
			active: true,
			origin: screen,
			anchor: screen,
		};
		InteractionResponse {
			cursor: Some(Cursor::Grabbing),
			..InteractionResponse::default()
		}
	}

	pub fn pointer_move(&mut self, ctx: &mut InteractionContext<'_>, screen: Point) -> InteractionResponse {
		self.pointer = Some(screen);
		if self.drag.active {
			let (dx, dy) = (screen.x - self.drag.anchor.x, screen.y - self.drag.anchor.y);
			ctx.camera.pan_by_screen(dx, dy);
			self.drag.anchor = screen;
			return InteractionResponse::redraw();
		}

		let world = ctx.camera.screen_to_world(screen, ctx.viewport);
		self.hovered = ctx.layout.node_at(world).map(Node::id);
		let cursor = if self.hovered.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Grab
		};
		InteractionResponse {
			redraw: true,
			cursor: Some(cursor),
			action: None,
		}
	}

	pub fn pointer_up(&mut self, ctx: &mut InteractionContext<'_>, screen: Point) -> InteractionResponse {
		let drag = std::mem::take(&mut self.drag);
		if !drag.active {
			return InteractionResponse::default();
		}

		let cursor = Some(if self.hovered.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Grab
		});
		let threshold = self.config.drag_threshold;
		let moved = (screen.x - drag.origin.x).abs() > threshold
			|| (screen.y - drag.origin.y).abs() > threshold;
		if moved {
			return InteractionResponse {
				cursor,
				..InteractionResponse::default()
			};
		}

		let response = InteractionResponse {
			redraw: true,
			cursor,
			action: None,
		};
		let layout = ctx.layout;
		let Some(node) = self.hovered.and_then(|id| layout.node(id)) else {
			if self.selected.take().is_some() {
				debug!("interaction: selection cleared");
				return response;
			}
			return InteractionResponse { cursor, ..InteractionResponse::default() };
		};

		if self.selected == Some(node.id()) {
			debug!("interaction: deselected individual {}", node.id());
			self.selected = None;
			return response;
		}

		debug!("interaction: selected individual {} ({})", node.id(), node.individual.name);
		self.selected = Some(node.id());
		let target = CameraTarget {
			x: node.x,
			y: node.y,
			scale: self.config.selection_scale,
		};
		ctx.camera
			.animate_to(target, self.config.selection_duration_ms, ctx.now_ms, None);
		response
	}

	/// Pointer left the canvas: abandon any drag and clear hover.
	pub fn pointer_leave(&mut self) -> InteractionResponse {
		self.drag = DragState::default();
		self.pointer = None;
		let had_hover = self.hovered.take().is_some();
		InteractionResponse {
			redraw: had_hover,
			cursor: Some(Cursor::Grab),
			action: None,
		}
	}

	/// Wheel notch: negative `delta_y` zooms in, zero (horizontal-only
	/// scroll) is ignored. Pan is left untouched.
	pub fn wheel(&mut self, ctx: &mut InteractionContext<'_>, delta_y: f64) -> InteractionResponse {
		if delta_y == 0.0 {
			return InteractionResponse::default();
		}
		let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
		ctx.camera.zoom(direction, ctx.camera_config);
		InteractionResponse::redraw()
	}
}
