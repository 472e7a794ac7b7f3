//! Profile namespace: snapshot swap and the typed filters over profile entities.
//!
//! Every filter scans the snapshot in derivation order, so "first match" always means the
//! earliest derived entity: personality activations before design ones, planetary aspects
//! before other aspects.

use super::EntityRegistry;
use crate::entity::{Consciousness, EntityInfo, EntityKind, GkSphereKey, PERSONAL_CONTEXT_PREFIX};
use crate::profile::{
    derive_profile_entities, personal_context_entities, CosmicProfile, PersonalContext,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;

/// One profile's entities, immutable once published.
#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    pub profile_id: Option<String>,
    pub entities: IndexMap<String, Arc<EntityInfo>>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl ProfileSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Arc<EntityInfo>> {
        self.entities.values().filter(move |e| e.kind() == kind)
    }
}

impl EntityRegistry {
    /// Derive the profile's entities and replace the current profile in one swap.
    /// Returns the id the entities were registered under.
    pub fn load_profile(&self, profile: &CosmicProfile) -> String {
        let derived =
            derive_profile_entities(&self.tables, profile, &self.settings.default_profile_id);
        let profile_id = derived.profile_id.clone();
        let count = derived.entities.len();
        let previous = self.profile.swap(Arc::new(ProfileSnapshot {
            profile_id: Some(derived.profile_id),
            entities: derived.entities,
            loaded_at: Some(Utc::now()),
        }));
        tracing::info!(
            target: "atlas::registry",
            profile_id = %profile_id,
            entities = count,
            duplicates = derived.duplicates,
            replaced = previous.profile_id.as_deref().unwrap_or("none"),
            "Profile loaded"
        );
        profile_id
    }

    /// Drop all profile entities.
    pub fn clear_profile(&self) {
        let previous = self.profile.swap(Arc::new(ProfileSnapshot::empty()));
        if let Some(id) = &previous.profile_id {
            tracing::info!(
                target: "atlas::registry",
                profile_id = %id,
                entities = previous.entities.len(),
                "Profile cleared"
            );
        }
    }

    /// Replace the personal-context overlay (`pc-occupation`, `pc-project-<id>`) in the
    /// current snapshot. Earlier `pc-*` entities are always dropped first, so repeated calls
    /// converge; `None` only drops them. Returns the number of overlay entities registered.
    pub fn register_personal_context(&self, ctx: Option<&PersonalContext>) -> usize {
        let overlay: Vec<Arc<EntityInfo>> = ctx
            .map(|c| personal_context_entities(&self.tables, c))
            .unwrap_or_default()
            .into_iter()
            .map(Arc::new)
            .collect();

        loop {
            let cur = self.profile.load_full();
            let mut entities: IndexMap<String, Arc<EntityInfo>> = cur
                .entities
                .iter()
                .filter(|(id, _)| !id.starts_with(PERSONAL_CONTEXT_PREFIX))
                .map(|(id, e)| (id.clone(), Arc::clone(e)))
                .collect();
            let removed = cur.entities.len() - entities.len();
            for entity in &overlay {
                entities.insert(entity.id.clone(), Arc::clone(entity));
            }
            let next = Arc::new(ProfileSnapshot {
                profile_id: cur.profile_id.clone(),
                entities,
                loaded_at: cur.loaded_at,
            });

            let prev = self.profile.compare_and_swap(&cur, next);
            if Arc::ptr_eq(&prev, &cur) {
                tracing::info!(
                    target: "atlas::registry",
                    registered = overlay.len(),
                    removed,
                    "Personal context registered"
                );
                return overlay.len();
            }
        }
    }

    pub fn personal_context_entities(&self) -> Vec<Arc<EntityInfo>> {
        self.all_profile(|e| e.id.starts_with(PERSONAL_CONTEXT_PREFIX))
    }

    pub fn current_profile_id(&self) -> Option<String> {
        self.profile.load().profile_id.clone()
    }

    /// The current snapshot; stays valid (and unchanged) across later loads.
    pub fn profile_snapshot(&self) -> Arc<ProfileSnapshot> {
        self.profile.load_full()
    }

    /// Strictly profile-scoped lookup by full id (`<profileId>:<scope>:<localId>`).
    pub fn get_profile_entity(&self, id: &str) -> Option<Arc<EntityInfo>> {
        let found = self.profile.load().entities.get(id).cloned();
        if found.is_none() && self.settings.log_lookup_misses {
            tracing::debug!(target: "atlas::registry", id = %id, "Profile entity not found");
        }
        found
    }

    /// Every entity of the active profile in derivation order.
    pub fn all_profile_entities(&self) -> Vec<Arc<EntityInfo>> {
        self.profile.load().entities.values().cloned().collect()
    }

    pub(super) fn profile_of_kind(&self, kind: EntityKind) -> Vec<Arc<EntityInfo>> {
        self.profile.load().of_kind(kind).cloned().collect()
    }

    fn first_profile(&self, pred: impl Fn(&EntityInfo) -> bool) -> Option<Arc<EntityInfo>> {
        let found = self.profile.load().entities.values().find(|e| pred(e)).cloned();
        if found.is_none() && self.settings.log_lookup_misses {
            tracing::debug!(target: "atlas::registry", "Profile filter matched nothing");
        }
        found
    }

    fn all_profile(&self, pred: impl Fn(&EntityInfo) -> bool) -> Vec<Arc<EntityInfo>> {
        self.profile
            .load()
            .entities
            .values()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    pub fn profile_placements(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfilePlacement)
    }

    pub fn profile_aspects(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfileAspect)
    }

    pub fn profile_configurations(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfileConfiguration)
    }

    pub fn profile_gk_placements(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfileGkPlacement)
    }

    pub fn profile_hd_placements(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfileHdPlacement)
    }

    pub fn profile_channels(&self) -> Vec<Arc<EntityInfo>> {
        self.profile_of_kind(EntityKind::ProfileChannel)
    }

    /// First activation of `gate_number` with the given consciousness. With `None`, the
    /// first activation of either kind, which is the personality one when both exist.
    pub fn hd_placement_by_gate(
        &self,
        gate_number: u8,
        consciousness: Option<Consciousness>,
    ) -> Option<Arc<EntityInfo>> {
        self.first_profile(|e| {
            e.as_hd_placement().is_some_and(|p| {
                p.gate_number == gate_number
                    && consciousness.map_or(true, |c| p.consciousness == c)
            })
        })
    }

    pub fn gk_placement_by_sphere(&self, sphere: GkSphereKey) -> Option<Arc<EntityInfo>> {
        self.first_profile(|e| e.as_gk_placement().is_some_and(|p| p.sphere_key == sphere))
    }

    pub fn placements_in_sign(&self, sign_id: &str) -> Vec<Arc<EntityInfo>> {
        self.all_profile(|e| e.as_placement().is_some_and(|p| p.sign_id == sign_id))
    }

    pub fn placements_in_house(&self, house_id: &str) -> Vec<Arc<EntityInfo>> {
        self.all_profile(|e| e.as_placement().is_some_and(|p| p.house_id == house_id))
    }

    pub fn aspects_involving(&self, planet_id: &str) -> Vec<Arc<EntityInfo>> {
        self.all_profile(|e| e.as_aspect().is_some_and(|a| a.involves(planet_id)))
    }

    pub fn aspects_by_type(&self, aspect_id: &str) -> Vec<Arc<EntityInfo>> {
        self.all_profile(|e| e.as_aspect().is_some_and(|a| a.aspect_id == aspect_id))
    }

    /// First aspect joining the two planets, in either order.
    pub fn aspect_between(&self, planet_a: &str, planet_b: &str) -> Option<Arc<EntityInfo>> {
        self.first_profile(|e| e.as_aspect().is_some_and(|a| a.between(planet_a, planet_b)))
    }
}
