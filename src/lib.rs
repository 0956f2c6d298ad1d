//! family-tree-graph: Interactive family tree visualization.
//!
//! This crate provides a WASM-based canvas component that lays a family out
//! in generation rows, with pan/zoom, hover, animated selection focus, and an
//! edit mode for adding individuals.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::family_graph::{
	FamilyData, FamilyGraphCanvas, GraphConfig, GraphState, Individual, IndividualId, Marriage,
};
pub use error::FamilyGraphError;

/// Element id of the `<script type="application/json">` holding family data.
pub const FAMILY_DATA_ELEMENT: &str = "family-data";
/// Element id of the optional configuration script.
pub const CONFIG_ELEMENT: &str = "family-graph-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("family-graph: logging initialized");
}

/// Text content of the script element with the given id, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load family data from the script element with id="family-data".
/// Expected format: JSON with { members: [...], marriages: [...] }
fn load_family_data() -> Option<FamilyData> {
	let json_text = script_text(FAMILY_DATA_ELEMENT)?;

	match FamilyData::from_json(&json_text) {
		Ok(data) => Some(data),
		Err(e) => {
			warn!("family-graph: failed to load family data: {}", e);
			None
		}
	}
}

/// Load overrides from the script element with id="family-graph-config".
fn load_config() -> Option<GraphConfig> {
	let json_text = script_text(CONFIG_ELEMENT)?;

	match GraphConfig::from_json(&json_text) {
		Ok(config) => Some(config),
		Err(e) => {
			warn!("family-graph: ignoring invalid configuration: {}", e);
			None
		}
	}
}

fn or_unknown(date: &str) -> String {
	if date.is_empty() { "unknown".to_owned() } else { date.to_owned() }
}

/// Main application component.
/// Loads family data from the DOM and renders the tree with its overlays.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let family = load_family_data().unwrap_or_default();
	let family_signal = Signal::derive(move || family.clone());
	let config = load_config().unwrap_or_default();

	let (edit_mode, set_edit_mode) = signal(false);
	let (selected, set_selected) = signal(None::<Individual>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Family Tree" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<FamilyGraphCanvas
				data=family_signal
				config=config
				fullscreen=true
				edit_mode=edit_mode
				selection=set_selected
			/>
			<div class="graph-overlay">
				<h1>"Family Tree"</h1>
				<p class="subtitle">"Click someone to focus them. Scroll to zoom. Drag to pan."</p>
				<button
					class="edit-toggle"
					class:active=move || edit_mode.get()
					on:click=move |_| set_edit_mode.update(|on| *on = !*on)
				>
					{move || if edit_mode.get() { "Edit mode: on" } else { "Edit mode: off" }}
				</button>
			</div>
			{move || {
				selected
					.get()
					.map(|individual| {
						view! {
							<div class="info-box">
								<h2>{individual.name.clone()}</h2>
								<p>"Born: " {or_unknown(&individual.birth_date)}</p>
								<p>"Died: " {or_unknown(&individual.death_date)}</p>
							</div>
						}
					})
			}}
		</div>
	}
}
