//! Term index over the universal entities.

use crate::entity::{EntityInfo, EntityKind, EntitySystem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const MIN_FRAGMENT_LEN: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub kind: Option<EntityKind>,
    pub system: Option<EntitySystem>,
    /// Falls back to the registry's configured limit.
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn kind(kind: EntityKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn system(system: EntitySystem) -> Self {
        Self {
            system: Some(system),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Lowercased term -> positions into the registry's entity order.
#[derive(Debug, Default)]
pub(super) struct SearchIndex {
    terms: HashMap<String, Vec<usize>>,
}

impl SearchIndex {
    pub(super) fn build(entities: &[Arc<EntityInfo>]) -> Self {
        let mut index = Self::default();
        for (pos, entity) in entities.iter().enumerate() {
            let terms = [
                Some(entity.id.as_str()),
                Some(entity.name.as_str()),
                entity.symbol.as_deref(),
            ]
            .into_iter()
            .flatten()
            .chain(entity.keywords.iter().map(String::as_str));
            for term in terms {
                let term = term.trim().to_lowercase();
                if term.is_empty() {
                    continue;
                }
                for fragment in term
                    .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
                    .filter(|w| w.chars().count() >= MIN_FRAGMENT_LEN && *w != term)
                {
                    index.add(fragment.to_string(), pos);
                }
                index.add(term, pos);
            }
        }
        index
    }

    fn add(&mut self, term: String, pos: usize) {
        let positions = self.terms.entry(term).or_default();
        if positions.last() != Some(&pos) {
            positions.push(pos);
        }
    }

    pub(super) fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Positions whose terms contain the query or are contained in it, plus any entity
    /// whose name contains the query. Unordered, deduplicated.
    pub(super) fn matches(&self, query: &str, entities: &[Arc<EntityInfo>]) -> Vec<usize> {
        let mut hit = vec![false; entities.len()];
        for (term, positions) in &self.terms {
            if term.contains(query) || query.contains(term.as_str()) {
                for &pos in positions {
                    hit[pos] = true;
                }
            }
        }
        for (pos, entity) in entities.iter().enumerate() {
            if !hit[pos] && entity.name.to_lowercase().contains(query) {
                hit[pos] = true;
            }
        }
        hit.iter()
            .enumerate()
            .filter_map(|(pos, &h)| h.then_some(pos))
            .collect()
    }
}

/// Exact name/id matches first, then names starting with the query, then shorter names.
/// Stable, so ties keep registry order.
pub(super) fn rank(results: &mut [Arc<EntityInfo>], query: &str) {
    results.sort_by_cached_key(|e| {
        let name = e.name.to_lowercase();
        let exact = name == query || e.id == query;
        let starts = name.starts_with(query);
        (!exact, !starts, e.name.chars().count())
    });
}
