//! Interactive family tree visualization.
//!
//! Lays a family out in generation rows on an HTML canvas with:
//! - Generation resolution from parent links, tolerant of cycles and
//!   dangling references
//! - Pan, wheel zoom, hover and click selection with an animated camera focus
//! - Highlighting of the selected individual's unions, parents and children
//! - An edit mode that adds individuals on empty-canvas presses
//!
//! Everything except [`FamilyGraphCanvas`] and the painter is plain Rust and
//! runs natively, so the pipeline can be driven from tests through
//! [`GraphState`] and a [`ManualClock`].
//!
//! # Example
//!
//! ```ignore
//! use family_tree_graph::{FamilyData, FamilyGraphCanvas, Individual};
//!
//! let data = FamilyData {
//!     members: vec![
//!         Individual::new(1, "Ada", vec![]),
//!         Individual::new(2, "Ben", vec![1]),
//!     ],
//!     marriages: vec![],
//! };
//!
//! view! { <FamilyGraphCanvas data=Signal::stored(data) fullscreen=true /> }
//! ```

pub mod camera;
pub mod clock;
mod component;
pub mod generation;
pub mod interaction;
pub mod layout;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
mod types;

pub use camera::{AnimationStatus, Camera, CameraConfig, CameraTarget, Viewport};
pub use clock::{BrowserClock, Clock, ManualClock};
pub use component::FamilyGraphCanvas;
pub use generation::{Generations, resolve_generations};
pub use interaction::{Cursor, InteractionAction, InteractionConfig, InteractionController, InteractionResponse};
pub use layout::{Layout, LayoutConfig, Node, compute_layout};
pub use state::{GraphConfig, GraphState, NEW_INDIVIDUAL_NAME};
pub use theme::{Color, GenerationPalette, Theme};
pub use types::{FamilyData, Individual, IndividualId, Marriage, Point};
