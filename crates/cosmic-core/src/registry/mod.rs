//! The entity registry: one lookup surface over universal and profile-scoped entities.
//!
//! ## Lifecycle
//!
//! | Phase | When | What |
//! |-------|------|------|
//! | universal populated | [`EntityRegistry::new`] | Tables projected and indexed once; never rebuilt. |
//! | profile populated | [`EntityRegistry::load_profile`] | Profile entities derived, then swapped in whole. |
//! | profile cleared | [`EntityRegistry::clear_profile`] | Empty snapshot swapped in. |
//! | personal context | [`EntityRegistry::register_personal_context`] | `pc-*` overlay replaced in the current snapshot. |
//!
//! Profile state lives behind an [`ArcSwap`]: readers load one snapshot and see either
//! the old profile or the new one, never a mix. The registry is `Send + Sync`; share it
//! behind an `Arc`.
//!
//! Lookups never fail. Unknown ids and empty profile state yield `None` or an empty vec.

mod profile;
mod search;

pub use profile::ProfileSnapshot;
pub use search::SearchOptions;

use crate::config::AtlasConfig;
use crate::entity::{universal_entities, EntityInfo, EntityKind, EntitySystem};
use crate::knowledge::ReferenceTables;
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use search::SearchIndex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Runtime knobs taken from [`AtlasConfig`].
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub default_profile_id: String,
    pub log_lookup_misses: bool,
    pub search_limit: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&AtlasConfig::default())
    }
}

impl From<&AtlasConfig> for RegistrySettings {
    fn from(config: &AtlasConfig) -> Self {
        Self {
            default_profile_id: config.default_profile_id.clone(),
            log_lookup_misses: config.log_lookup_misses,
            search_limit: config.search_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total: usize,
    pub by_system: BTreeMap<EntitySystem, usize>,
    pub by_kind: BTreeMap<EntityKind, usize>,
    /// Universal ids dropped because an earlier table already used them.
    pub id_collisions: usize,
    pub search_terms: usize,
    pub profile_id: Option<String>,
    pub profile_entities: usize,
}

pub struct EntityRegistry {
    tables: Arc<ReferenceTables>,
    settings: RegistrySettings,
    /// Universal entities in registration order.
    entities: Vec<Arc<EntityInfo>>,
    by_id: HashMap<String, Arc<EntityInfo>>,
    by_kind: IndexMap<EntityKind, Vec<Arc<EntityInfo>>>,
    by_system: IndexMap<EntitySystem, Vec<Arc<EntityInfo>>>,
    search: SearchIndex,
    id_collisions: usize,
    profile: ArcSwap<ProfileSnapshot>,
}

impl std::fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("universal", &self.entities.len())
            .field("profile_id", &self.profile.load().profile_id)
            .finish()
    }
}

impl EntityRegistry {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self::with_settings(tables, RegistrySettings::default())
    }

    pub fn with_config(tables: Arc<ReferenceTables>, config: &AtlasConfig) -> Self {
        Self::with_settings(tables, RegistrySettings::from(config))
    }

    /// Project and index every universal entity. Runs once per registry.
    pub fn with_settings(tables: Arc<ReferenceTables>, settings: RegistrySettings) -> Self {
        let mut entities = Vec::new();
        let mut by_id = HashMap::new();
        let mut by_kind: IndexMap<EntityKind, Vec<Arc<EntityInfo>>> = IndexMap::new();
        let mut by_system: IndexMap<EntitySystem, Vec<Arc<EntityInfo>>> =
            EntitySystem::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        let mut id_collisions = 0;

        for entity in universal_entities(&tables) {
            if by_id.contains_key(&entity.id) {
                tracing::warn!(target: "atlas::registry", id = %entity.id, kind = %entity.kind(), "Universal id already registered; keeping the first");
                id_collisions += 1;
                continue;
            }
            let entity = Arc::new(entity);
            by_id.insert(entity.id.clone(), Arc::clone(&entity));
            by_kind.entry(entity.kind()).or_default().push(Arc::clone(&entity));
            by_system.entry(entity.system).or_default().push(Arc::clone(&entity));
            entities.push(entity);
        }

        let search = SearchIndex::build(&entities);
        tracing::info!(
            target: "atlas::registry",
            entities = entities.len(),
            kinds = by_kind.len(),
            search_terms = search.term_count(),
            id_collisions,
            "Universal index built"
        );

        Self {
            tables,
            settings,
            entities,
            by_id,
            by_kind,
            by_system,
            search,
            id_collisions,
            profile: ArcSwap::from_pointee(ProfileSnapshot::empty()),
        }
    }

    pub fn tables(&self) -> &Arc<ReferenceTables> {
        &self.tables
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    // ------------------------------------
    // Lookup
    // ------------------------------------

    /// Universal namespace first, then the active profile.
    pub fn get_entity(&self, id: &str) -> Option<Arc<EntityInfo>> {
        self.get_universal(id)
            .or_else(|| self.profile.load().entities.get(id).cloned())
    }

    pub fn get_universal(&self, id: &str) -> Option<Arc<EntityInfo>> {
        self.by_id.get(id).cloned()
    }

    /// True when `id` resolves in either namespace.
    pub fn has(&self, id: &str) -> bool {
        self.by_id.contains_key(id) || self.profile.load().entities.contains_key(id)
    }

    /// Resolve several ids, dropping the unknown ones.
    pub fn get_many<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Arc<EntityInfo>> {
        ids.iter().filter_map(|id| self.get_entity(id.as_ref())).collect()
    }

    /// The entities an entity's `related_ids` point at, in that order, skipping dangling ids.
    pub fn related(&self, id: &str) -> Vec<Arc<EntityInfo>> {
        match self.get_entity(id) {
            Some(entity) => self.get_many(&entity.related_ids),
            None => Vec::new(),
        }
    }

    /// Universal ids in registration order.
    pub fn all_ids(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn universal_entities(&self) -> &[Arc<EntityInfo>] {
        &self.entities
    }

    /// Entities of one kind. Profile kinds read the active profile.
    pub fn by_kind(&self, kind: EntityKind) -> Vec<Arc<EntityInfo>> {
        if kind.is_profile() {
            return self.profile_of_kind(kind);
        }
        self.by_kind.get(&kind).cloned().unwrap_or_default()
    }

    /// Universal entities of one system.
    pub fn by_system(&self, system: EntitySystem) -> Vec<Arc<EntityInfo>> {
        self.by_system.get(&system).cloned().unwrap_or_default()
    }

    /// Search universal entities by id, name, symbol and keywords.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<Arc<EntityInfo>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut results: Vec<_> = self
            .search
            .matches(&query, &self.entities)
            .into_iter()
            .map(|pos| Arc::clone(&self.entities[pos]))
            .filter(|e| options.kind.map_or(true, |k| e.kind() == k))
            .filter(|e| options.system.map_or(true, |s| e.system == s))
            .collect();
        search::rank(&mut results, &query);
        results.truncate(options.limit.unwrap_or(self.settings.search_limit));
        results
    }

    pub fn stats(&self) -> RegistryStats {
        let snapshot = self.profile.load();
        RegistryStats {
            total: self.entities.len(),
            by_system: self.by_system.iter().map(|(s, v)| (*s, v.len())).collect(),
            by_kind: self.by_kind.iter().map(|(k, v)| (*k, v.len())).collect(),
            id_collisions: self.id_collisions,
            search_terms: self.search.term_count(),
            profile_id: snapshot.profile_id.clone(),
            profile_entities: snapshot.entities.len(),
        }
    }
}
