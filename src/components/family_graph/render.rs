//! Canvas rendering for the family graph.
//!
//! Everything is drawn in screen space: world positions go through
//! [`Camera::world_to_screen`](super::camera::Camera::world_to_screen) first.
//! Passes, back to front:
//! 1. Background
//! 2. Union lines (dashed), then parent-child lines
//! 3. Nodes in layout order, with rings on the selection's close relatives

use std::collections::HashSet;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::Node;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::GraphState;
use super::theme::{Color, Theme};
use super::types::{IndividualId, Point};

/// The selected individual plus its direct parents and children.
struct Relatives {
	selected: Option<IndividualId>,
	ids: HashSet<IndividualId>,
}

impl Relatives {
	fn of(state: &GraphState) -> Self {
		let Some(selected) = state.selected_node() else {
			return Self {
				selected: None,
				ids: HashSet::new(),
			};
		};
		let id = selected.id();
		let mut ids: HashSet<IndividualId> = selected.individual.parent_ids.iter().copied().collect();
		ids.insert(id);
		ids.extend(
			state
				.layout
				.nodes
				.iter()
				.filter(|n| n.individual.parent_ids.contains(&id))
				.map(Node::id),
		);
		Self {
			selected: Some(id),
			ids,
		}
	}

	fn contains(&self, id: IndividualId) -> bool {
		self.ids.contains(&id)
	}

	/// A parent-child edge touching the selected individual.
	fn edge_touches_selection(&self, parent: IndividualId, child: IndividualId) -> bool {
		self.selected.is_some_and(|s| s == parent || s == child)
	}
}

/// Renders the complete graph to the canvas.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.camera.scale, theme.node.label_family);
	let relatives = Relatives::of(state);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_marriages(state, ctx, &scale, theme, &relatives);
	draw_lineage(state, ctx, &scale, theme, &relatives);

	let hovered = state.interaction.hovered();
	for node in &state.layout.nodes {
		let id = node.id();
		draw_node(
			state,
			ctx,
			&scale,
			theme,
			node,
			hovered == Some(id),
			relatives.selected == Some(id),
			relatives.contains(id),
		);
	}
}

fn screen(state: &GraphState, node: &Node) -> Point {
	state.camera.world_to_screen(node.center(), state.viewport())
}

fn stroke_line(ctx: &CanvasRenderingContext2d, from: Point, to: Point) {
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let segments = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&segments);
}

fn set_glow(ctx: &CanvasRenderingContext2d, color: Color, blur: f64) {
	ctx.set_shadow_color(&color.to_css());
	ctx.set_shadow_blur(blur);
}

fn draw_marriages(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	relatives: &Relatives,
) {
	for marriage in &state.family.marriages {
		let [a, b] = marriage.spouse_ids;
		let (Some(first), Some(second)) = (state.layout.node(a), state.layout.node(b)) else {
			continue;
		};
		let (from, to) = (screen(state, first), screen(state, second));

		ctx.save();
		set_dash(ctx, Some(scale.marriage_dash));
		if relatives.selected.is_some_and(|s| s == a || s == b) {
			ctx.save();
			set_glow(ctx, theme.highlight, scale.marriage_highlight_glow);
			ctx.set_stroke_style_str(&theme.highlight.to_css());
			ctx.set_line_width(scale.marriage_highlight_width);
			stroke_line(ctx, from, to);
			ctx.restore();
		}
		ctx.set_stroke_style_str(&theme.edge.marriage_color.to_css());
		ctx.set_line_width(scale.marriage_width);
		stroke_line(ctx, from, to);
		ctx.restore();
	}
	set_dash(ctx, None);
}

fn draw_lineage(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	relatives: &Relatives,
) {
	for child in &state.layout.nodes {
		let child_pos = screen(state, child);
		for &parent_id in &child.individual.parent_ids {
			let Some(parent) = state.layout.node(parent_id) else {
				continue;
			};
			let parent_pos = screen(state, parent);

			if relatives.edge_touches_selection(parent_id, child.id()) {
				ctx.save();
				set_glow(ctx, theme.highlight, scale.edge_highlight_glow);
				ctx.set_stroke_style_str(&theme.highlight.to_css());
				ctx.set_line_width(scale.edge_highlight_width);
				stroke_line(ctx, parent_pos, child_pos);
				ctx.restore();
			}

			ctx.set_stroke_style_str(&theme.edge.color.to_css());
			ctx.set_line_width(theme.edge.width);
			stroke_line(ctx, parent_pos, child_pos);
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node,
	hovered: bool,
	selected: bool,
	related: bool,
) {
	let Point { x, y } = screen(state, node);
	let radius = scale.node_radius(node.radius);
	let style = &theme.node;

	ctx.save();

	// Ring sits inside the outline so its outer edge matches the node radius.
	if related {
		ctx.save();
		ctx.begin_path();
		let _ = ctx.arc(x, y, (radius - scale.ring_width / 2.0).max(0.0), 0.0, 2.0 * PI);
		set_glow(ctx, theme.highlight, scale.ring_glow);
		ctx.set_stroke_style_str(&theme.highlight.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
		ctx.restore();
	}

	set_glow(ctx, style.shadow_color, style.shadow_blur);
	ctx.set_shadow_offset_x(0.0);
	ctx.set_shadow_offset_y(style.shadow_offset_y);

	let grow = if hovered { style.hover_grow } else { 0.0 };
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + grow, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color.to_css());
	ctx.fill();

	if selected {
		ctx.set_stroke_style_str(&style.selected_stroke.to_css());
		ctx.set_line_width(style.selected_stroke_width);
		ctx.stroke();
	}

	ctx.set_shadow_color("transparent");
	ctx.set_shadow_blur(0.0);

	ctx.set_fill_style_str(&style.label_color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&node.individual.name, x, y);

	ctx.restore();
}
