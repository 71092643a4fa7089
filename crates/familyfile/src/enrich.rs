//! Place-name enrichment.
//!
//! Place records in the primary data file hold names cut at a fixed width;
//! `places.cache` holds the full names. Each place is repaired with three
//! steps, tried in order:
//!
//! 1. The cache entry with the same ID extends the name.
//! 2. The shortest cache name that extends the name, when the cut looks
//!    genuine: the name ends in a space, or the cache name continues with an
//!    alphanumeric character. `Paris` never becomes `Paris, Texas`.
//! 3. The last `", "` component is completed from the set of trusted cache
//!    components.
//!
//! Every step strictly lengthens the name. Steps are reapplied to one place
//! until none applies, so running the pass again changes nothing.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::Place;

const COMPONENT_SEPARATOR: &str = ", ";

/// Lookup tables built once from the cache entries.
#[derive(Debug)]
pub struct PlaceNameIndex<'c> {
    by_id: FxHashMap<u32, &'c str>,
    /// Non-empty cache names, sorted and deduplicated.
    names: Vec<&'c str>,
    /// Trusted components, sorted.
    components: Vec<&'c str>,
    component_set: FxHashSet<&'c str>,
}

impl<'c> PlaceNameIndex<'c> {
    pub fn new(cache: &'c [Place]) -> Self {
        let mut by_id = FxHashMap::default();
        let mut names = Vec::with_capacity(cache.len());
        for place in cache.iter().filter(|p| !p.name.is_empty()) {
            by_id.insert(place.id, place.name.as_str());
            names.push(place.name.as_str());
        }
        names.sort_unstable();
        names.dedup();

        let component_set = trusted_components(cache);
        let mut components: Vec<&str> = component_set.iter().copied().collect();
        components.sort_unstable();

        Self {
            by_id,
            names,
            components,
            component_set,
        }
    }

    /// Returns the repaired name, or `None` when no step applies.
    pub fn repair(&self, id: u32, name: &str) -> Option<String> {
        let mut current = name.to_string();
        let mut changed = false;
        while let Some(next) = self.step(id, &current) {
            debug_assert!(next.len() > current.len());
            current = next;
            changed = true;
        }
        changed.then_some(current)
    }

    fn step(&self, id: u32, name: &str) -> Option<String> {
        if !name.is_empty() {
            if let Some(full) = self.by_id_extension(id, name) {
                return Some(full.to_string());
            }
            if let Some(full) = self.prefix_extension(name) {
                return Some(full.to_string());
            }
        }
        self.component_repair(name)
    }

    fn by_id_extension(&self, id: u32, name: &str) -> Option<&'c str> {
        self.by_id
            .get(&id)
            .copied()
            .filter(|full| full.len() > name.len() && full.starts_with(name))
    }

    fn prefix_extension(&self, name: &str) -> Option<&'c str> {
        let trailing_space = name.ends_with(' ');
        let mut best: Option<&'c str> = None;
        for &full in with_prefix(&self.names, name) {
            if full == name {
                // the name is already complete
                return None;
            }
            let genuine_cut = trailing_space
                || full[name.len()..].chars().next().is_some_and(char::is_alphanumeric);
            if genuine_cut && best.is_none_or(|b| full.len() < b.len()) {
                best = Some(full);
            }
        }
        best
    }

    fn component_repair(&self, name: &str) -> Option<String> {
        let split = name.rfind(COMPONENT_SEPARATOR)?;
        let head = &name[..split + COMPONENT_SEPARATOR.len()];
        let tail = &name[head.len()..];
        if tail.is_empty() || self.component_set.contains(tail) {
            return None;
        }
        let completion = with_prefix(&self.components, tail)
            .iter()
            .filter(|c| c.len() > tail.len())
            .min_by_key(|c| c.len())?;
        Some(format!("{head}{completion}"))
    }
}

/// The contiguous run of `sorted` entries starting with `prefix`.
fn with_prefix<'s, 'c>(sorted: &'s [&'c str], prefix: &str) -> &'s [&'c str] {
    let start = sorted.partition_point(|s| *s < prefix);
    let len = sorted[start..]
        .iter()
        .take_while(|s| s.starts_with(prefix))
        .count();
    &sorted[start..start + len]
}

/// Components of cache names, minus likely truncation artifacts.
///
/// A component seen once that is a strict prefix of a component seen more
/// than once is an artifact. Single-character components are ignored.
fn trusted_components(cache: &[Place]) -> FxHashSet<&str> {
    let mut freq: FxHashMap<&str, usize> = FxHashMap::default();
    for place in cache {
        for part in place.name.split(COMPONENT_SEPARATOR).map(str::trim) {
            if part.len() > 1 {
                *freq.entry(part).or_default() += 1;
            }
        }
    }

    freq.iter()
        .filter(|&(&comp, &count)| {
            count > 1
                || !freq.iter().any(|(&other, &other_count)| {
                    other_count > 1 && other.len() > comp.len() && other.starts_with(comp)
                })
        })
        .map(|(&comp, _)| comp)
        .collect()
}

/// Replaces truncated place names with their full form from `cache`.
///
/// Returns the number of places renamed.
pub fn enrich_place_names(places: &mut [Place], cache: &[Place]) -> usize {
    if cache.is_empty() {
        return 0;
    }
    let index = PlaceNameIndex::new(cache);
    let mut renamed = 0;
    for place in places.iter_mut() {
        if let Some(name) = index.repair(place.id, &place.name) {
            place.name = name;
            renamed += 1;
        }
    }
    renamed
}
