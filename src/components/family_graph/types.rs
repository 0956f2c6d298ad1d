//! Family data structures supplied by the host page.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{FamilyGraphError, Result};

/// Stable identity of an individual across edits and relayouts.
pub type IndividualId = u32;

/// A point in either world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// One person in the family graph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
	/// Unique key. Referenced by `parent_ids` and marriages.
	pub id: IndividualId,
	#[serde(default)]
	pub name: String,
	/// Zero, one or two parents. Ids absent from the data set are ignored.
	#[serde(default)]
	pub parent_ids: Vec<IndividualId>,
	#[serde(default)]
	pub birth_date: String,
	#[serde(default)]
	pub death_date: String,
}

impl Individual {
	pub fn new(id: IndividualId, name: impl Into<String>, parent_ids: Vec<IndividualId>) -> Self {
		Self {
			id,
			name: name.into(),
			parent_ids,
			..Self::default()
		}
	}
}

/// A union between two individuals. Only used for drawing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marriage {
	pub spouse_ids: [IndividualId; 2],
}

/// Complete family data set, in the member order the host supplied.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FamilyData {
	#[serde(default)]
	pub members: Vec<Individual>,
	#[serde(default)]
	pub marriages: Vec<Marriage>,
}

impl FamilyData {
	/// Decode and validate a JSON document of the form
	/// `{ "members": [...], "marriages": [...] }`.
	pub fn from_json(json: &str) -> Result<Self> {
		let data: FamilyData = serde_json::from_str(json)?;
		data.validate()?;
		Ok(data)
	}

	/// Reject data sets whose individual ids are not unique.
	pub fn validate(&self) -> Result<()> {
		let mut seen = HashSet::with_capacity(self.members.len());
		for member in &self.members {
			if !seen.insert(member.id) {
				return Err(FamilyGraphError::DuplicateId(member.id));
			}
		}
		Ok(())
	}

	pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
		self.members.iter().find(|m| m.id == id)
	}

	/// Smallest id not yet in use (one past the current maximum).
	pub fn next_id(&self) -> IndividualId {
		self.members
			.iter()
			.map(|m| m.id)
			.max()
			.map_or(1, |max| max.saturating_add(1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_original_wire_format() {
		let json = r#"{
			"members": [
				{ "id": 1, "name": "Ada", "parentIds": [], "birthDate": "1900", "deathDate": "1980" },
				{ "id": 2, "name": "Ben" },
				{ "id": 3, "name": "Cy", "parentIds": [1, 2] }
			],
			"marriages": [{ "spouseIds": [1, 2] }]
		}"#;
		let data = FamilyData::from_json(json).unwrap();
		assert_eq!(data.members.len(), 3);
		assert_eq!(data.members[0].birth_date, "1900");
		assert!(data.members[1].parent_ids.is_empty());
		assert_eq!(data.members[2].parent_ids, vec![1, 2]);
		assert_eq!(data.marriages[0].spouse_ids, [1, 2]);
	}

	#[test]
	fn missing_marriages_default_to_empty() {
		let data = FamilyData::from_json(r#"{ "members": [{ "id": 7 }] }"#).unwrap();
		assert!(data.marriages.is_empty());
		assert_eq!(data.next_id(), 8);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let err = FamilyData::from_json(r#"{ "members": [{ "id": 4 }, { "id": 4 }] }"#).unwrap_err();
		assert!(matches!(err, FamilyGraphError::DuplicateId(4)));
	}

	#[test]
	fn rejects_non_numeric_id() {
		let err = FamilyData::from_json(r#"{ "members": [{ "id": "x" }] }"#).unwrap_err();
		assert!(matches!(err, FamilyGraphError::Json(_)));
	}

	#[test]
	fn next_id_of_empty_set_is_one() {
		assert_eq!(FamilyData::default().next_id(), 1);
	}
}
