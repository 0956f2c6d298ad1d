//! Errors raised at the data boundary.
//!
//! The layout pipeline itself is total and never fails; these only surface
//! while decoding family data or configuration supplied by the host page.

use thiserror::Error;

use crate::components::family_graph::IndividualId;

/// Failure to accept externally supplied family data or configuration.
#[derive(Debug, Error)]
pub enum FamilyGraphError {
	/// The JSON payload could not be decoded.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Two individuals share the same id.
	#[error("duplicate individual id {0}")]
	DuplicateId(IndividualId),
	/// A palette entry is not a recognised CSS color.
	#[error("invalid color {0:?}, expected #rrggbb, rgb() or rgba()")]
	InvalidColor(String),
}

/// Convenience alias for boundary operations.
pub type Result<T> = std::result::Result<T, FamilyGraphError>;
