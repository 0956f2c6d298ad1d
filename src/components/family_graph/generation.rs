//! Generation inference from partial parent links.
//!
//! Every individual receives a non-negative depth with the topmost ancestors
//! at 0. Resolution runs in three steps:
//!
//! 1. **Upward**: individuals without known parents start at 0; anyone whose
//!    known parents are all resolved gets `1 + max(parent generations)`.
//!    Repeated until a pass makes no progress, bounded by the number of
//!    individuals so cyclic ancestry cannot spin forever.
//! 2. **Downward**: a parentless individual is pulled down to sit one row
//!    above its highest child. This keeps someone who married into the family
//!    level with their spouse instead of floating at generation 0.
//! 3. **Normalize**: shift so the smallest generation is 0. Individuals that
//!    never resolved (ancestry cycles, or descendants of one) land on 0.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::types::{Individual, IndividualId};

/// Resolved depth per individual id.
pub type Generations = HashMap<IndividualId, u32>;

/// Resolve a generation for every individual. Total over any input: dangling
/// parent ids are ignored and cycles fall back to generation 0.
pub fn resolve_generations(individuals: &[Individual]) -> Generations {
	let known: HashSet<IndividualId> = individuals.iter().map(|i| i.id).collect();
	let known_parents = |individual: &Individual| -> Vec<IndividualId> {
		individual
			.parent_ids
			.iter()
			.copied()
			.filter(|pid| known.contains(pid))
			.collect()
	};
	let parents: Vec<Vec<IndividualId>> = individuals.iter().map(known_parents).collect();

	let mut generations = Generations::with_capacity(individuals.len());
	for (individual, parents) in individuals.iter().zip(&parents) {
		if parents.is_empty() {
			generations.insert(individual.id, 0);
		}
	}

	propagate_upward(individuals, &parents, &mut generations);

	let unresolved = individuals
		.iter()
		.filter(|i| !generations.contains_key(&i.id))
		.count();
	if unresolved > 0 {
		warn!(
			"generation: {} individual(s) have cyclic or unresolvable ancestry, placing them at generation 0",
			unresolved
		);
	}

	pull_down_parentless(individuals, &parents, &mut generations);
	normalize(&mut generations);

	for individual in individuals {
		generations.entry(individual.id).or_insert(0);
	}
	generations
}

fn propagate_upward(
	individuals: &[Individual],
	parents: &[Vec<IndividualId>],
	generations: &mut Generations,
) {
	// A productive pass resolves at least one individual.
	for _ in 0..individuals.len() {
		let mut changed = false;
		for (individual, parents) in individuals.iter().zip(parents) {
			if generations.contains_key(&individual.id) {
				continue;
			}
			let resolved: Option<Vec<u32>> =
				parents.iter().map(|pid| generations.get(pid).copied()).collect();
			if let Some(max) = resolved.and_then(|gens| gens.into_iter().max()) {
				generations.insert(individual.id, max + 1);
				changed = true;
			}
		}
		if !changed {
			break;
		}
	}
}

fn pull_down_parentless(
	individuals: &[Individual],
	parents: &[Vec<IndividualId>],
	generations: &mut Generations,
) {
	let mut children: HashMap<IndividualId, Vec<IndividualId>> = HashMap::new();
	for (individual, parents) in individuals.iter().zip(parents) {
		for &pid in parents {
			children.entry(pid).or_default().push(individual.id);
		}
	}

	for _ in 0..individuals.len() {
		let mut changed = false;
		for (individual, parents) in individuals.iter().zip(parents) {
			if !parents.is_empty() {
				continue;
			}
			let Some(kids) = children.get(&individual.id) else {
				continue;
			};
			let Some(min_child) = kids.iter().filter_map(|c| generations.get(c)).min().copied()
			else {
				continue;
			};
			let Some(current) = generations.get_mut(&individual.id) else {
				continue;
			};
			if min_child > 0 && *current < min_child - 1 {
				*current = min_child - 1;
				changed = true;
			}
		}
		if !changed {
			break;
		}
	}
}

fn normalize(generations: &mut Generations) {
	let Some(min) = generations.values().copied().min() else {
		return;
	};
	if min > 0 {
		for value in generations.values_mut() {
			*value -= min;
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn person(id: IndividualId, parents: &[IndividualId]) -> Individual {
		Individual::new(id, format!("#{id}"), parents.to_vec())
	}

	#[test]
	fn two_roots_and_child() {
		let family = [person(1, &[]), person(2, &[]), person(3, &[1, 2])];
		let generations = resolve_generations(&family);
		assert_eq!(generations, Generations::from([(1, 0), (2, 0), (3, 1)]));
	}

	#[test]
	fn three_cycle_terminates_at_zero() {
		let family = [person(1, &[2]), person(2, &[3]), person(3, &[1])];
		let generations = resolve_generations(&family);
		assert_eq!(generations, Generations::from([(1, 0), (2, 0), (3, 0)]));
	}

	#[test]
	fn self_parent_is_a_cycle() {
		let family = [person(1, &[]), person(2, &[2])];
		let generations = resolve_generations(&family);
		assert_eq!(generations[&1], 0);
		assert_eq!(generations[&2], 0);
	}

	#[test]
	fn descendants_of_a_cycle_fall_back_to_zero() {
		let family = [person(1, &[2]), person(2, &[1]), person(3, &[1]), person(4, &[])];
		let generations = resolve_generations(&family);
		assert!(family.iter().all(|i| generations[&i.id] == 0));
	}

	#[test]
	fn dangling_parent_is_ignored() {
		let family = [person(1, &[99]), person(2, &[1, 42])];
		let generations = resolve_generations(&family);
		assert_eq!(generations[&1], 0);
		assert_eq!(generations[&2], 1);
	}

	#[test]
	fn spouse_married_in_aligns_with_partner() {
		// 1 -> 2; 2 and 3 (no known parents) have child 4.
		let family = [person(1, &[]), person(2, &[1]), person(3, &[]), person(4, &[2, 3])];
		let generations = resolve_generations(&family);
		assert_eq!(generations[&1], 0);
		assert_eq!(generations[&2], 1);
		assert_eq!(generations[&3], 1);
		assert_eq!(generations[&4], 2);
	}

	#[test]
	fn deep_spouse_chain_is_pulled_down() {
		// 1 -> 2 -> 3; 3 and 4 have child 5; 4 must sit on row 2.
		let family = [
			person(4, &[]),
			person(5, &[3, 4]),
			person(3, &[2]),
			person(2, &[1]),
			person(1, &[]),
		];
		let generations = resolve_generations(&family);
		assert_eq!(generations[&4], 2);
		assert_eq!(generations[&5], 3);
		assert_eq!(generations[&1], 0);
	}

	#[test]
	fn children_listed_before_parents_still_resolve() {
		let family = [person(3, &[2]), person(2, &[1]), person(1, &[])];
		let generations = resolve_generations(&family);
		assert_eq!(generations, Generations::from([(1, 0), (2, 1), (3, 2)]));
	}

	#[test]
	fn empty_input_yields_empty_map() {
		assert!(resolve_generations(&[]).is_empty());
	}

	/// Random acyclic families: each individual picks up to two parents among
	/// the ones generated before it.
	fn acyclic_family() -> impl Strategy<Value = Vec<Individual>> {
		prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), 0usize..3), 1..40)
			.prop_map(|picks| {
				picks
					.into_iter()
					.enumerate()
					.map(|(i, (a, b, count))| {
						let id = i as IndividualId + 1;
						let mut parents = Vec::new();
						if i > 0 {
							if count >= 1 {
								parents.push(a.index(i) as IndividualId + 1);
							}
							if count == 2 {
								let second = b.index(i) as IndividualId + 1;
								if !parents.contains(&second) {
									parents.push(second);
								}
							}
						}
						person(id, &parents)
					})
					.collect()
			})
	}

	proptest! {
		#[test]
		fn child_sits_one_below_deepest_parent(family in acyclic_family()) {
			let generations = resolve_generations(&family);
			prop_assert_eq!(generations.len(), family.len());
			prop_assert_eq!(generations.values().copied().min(), Some(0));
			for individual in &family {
				if let Some(max) = individual.parent_ids.iter().map(|p| generations[p]).max() {
					prop_assert_eq!(generations[&individual.id], max + 1);
				}
			}
		}

		#[test]
		fn resolution_is_idempotent(family in acyclic_family()) {
			prop_assert_eq!(resolve_generations(&family), resolve_generations(&family));
		}
	}
}
