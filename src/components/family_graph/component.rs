//! Leptos component wrapping the family graph canvas.
//!
//! The component owns a [`GraphState`] behind `Rc<RefCell<..>>`, forwards
//! mouse and wheel events to it, and repaints from a `requestAnimationFrame`
//! loop whenever the state reports a pending redraw or a running camera
//! animation.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::clock::{BrowserClock, Clock};
use super::interaction::{InteractionAction, InteractionResponse};
use super::render;
use super::scale::ScaleConfig;
use super::state::{GraphConfig, GraphState};
use super::theme::Theme;
use super::types::{FamilyData, Individual, Point};

/// Graph state plus the visual configuration used to paint it.
struct GraphContext {
	state: GraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(HtmlCanvasElement, Point)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	let point = Point::new(
		f64::from(ev.client_x()) - rect.left(),
		f64::from(ev.client_y()) - rect.top(),
	);
	Some((canvas, point))
}

fn apply_cursor(canvas: &HtmlCanvasElement, response: &InteractionResponse) {
	if let Some(cursor) = response.cursor {
		let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor.css());
	}
}

/// Renders an interactive family tree on a canvas element.
///
/// Pass the family via the reactive `data` signal; a new value replaces the
/// data set and reruns the layout. The component sizes itself to its parent
/// container by default; set `fullscreen = true` to fill the viewport and
/// relayout with the window. Explicit `width`/`height` override automatic
/// sizing. While `edit_mode` is true, a press on empty canvas adds a new
/// individual. The selected individual is published to `selection` if given.
#[component]
pub fn FamilyGraphCanvas(
	#[prop(into)] data: Signal<FamilyData>,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(into, default = Signal::stored(false))] edit_mode: Signal<bool>,
	#[prop(optional)] selection: Option<WriteSignal<Option<Individual>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let publish = move |context: &SharedContext| {
		let Some(selection) = selection else {
			return;
		};
		let selected = context
			.borrow()
			.as_ref()
			.and_then(|c| c.state.selected_node().map(|n| n.individual.clone()));
		selection.maybe_update(|current| {
			let changed = *current != selected;
			if changed {
				*current = selected;
			}
			changed
		});
	};

	Effect::new(move |_| {
		let family = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		let mounted = context_init.borrow().is_some();
		if mounted {
			if let Some(c) = context_init.borrow_mut().as_mut() {
				c.state.set_family(family);
			}
			publish(&context_init);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| f64::from(p.client_width()))
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| f64::from(p.client_height()))
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("family-graph: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("family-graph: canvas 2d context unavailable");
				return;
			}
		};

		let mut state = GraphState::new(family, w, h, config.clone());
		state.interaction.edit_mode = edit_mode.get_untracked();
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(c) = context_resize.borrow_mut().as_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(cb) = resize_cb_init.borrow().as_ref() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(c) = context_anim.borrow_mut().as_mut() {
				if c.state.frame(BrowserClock.now_ms()) {
					render::render(&c.state, &ctx, &c.scale, &c.theme);
				}
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(cb) = animate_init.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_edit = context.clone();
	Effect::new(move |_| {
		let enabled = edit_mode.get();
		if let Some(c) = context_edit.borrow_mut().as_mut() {
			c.state.interaction.edit_mode = enabled;
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((canvas, point)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			let response = c.state.pointer_down(point, BrowserClock.now_ms());
			if let Some(InteractionAction::AddIndividualAt(world)) = response.action {
				c.state.add_individual_at(world);
			}
			apply_cursor(&canvas, &response);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((canvas, point)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			let response = c.state.pointer_move(point, BrowserClock.now_ms());
			apply_cursor(&canvas, &response);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((canvas, point)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_mu.borrow_mut().as_mut() {
			let response = c.state.pointer_up(point, BrowserClock.now_ms());
			apply_cursor(&canvas, &response);
		}
		publish(&context_mu);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((canvas, _)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			let response = c.state.pointer_leave();
			apply_cursor(&canvas, &response);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.wheel(ev.delta_y(), BrowserClock.now_ms());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="family-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
