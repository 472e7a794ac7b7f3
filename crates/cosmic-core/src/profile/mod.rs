//! The user profile aggregate supplied by the profile provider, and the derivation of its
//! profile-scoped entities.
//!
//! Only the parts the registry derives entities from are modelled. Unknown fields in the
//! provider's JSON (birth data, cached chart calculations, enrichment layers) are ignored.

mod derive;

pub use derive::{derive_profile_entities, personal_context_entities, ProfileEntities};

use crate::entity::GkSphereKey;
use crate::error::{AtlasError, AtlasResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmicProfile {
    #[serde(default)]
    pub profile_version: Option<u32>,
    #[serde(default)]
    pub meta: Option<ProfileMeta>,
    #[serde(default)]
    pub placements: Vec<NatalPlacement>,
    #[serde(default)]
    pub aspects: Option<ProfileAspects>,
    #[serde(default)]
    pub configurations: Vec<NatalConfiguration>,
    #[serde(default)]
    pub gene_keys_profile: Option<GeneKeysProfile>,
    #[serde(default)]
    pub human_design_profile: Option<HumanDesignProfile>,
    #[serde(default)]
    pub personal_context: Option<PersonalContext>,
}

impl CosmicProfile {
    pub fn from_json(raw: &str) -> AtlasResult<Self> {
        serde_json::from_str(raw).map_err(AtlasError::Profile)
    }

    pub fn from_path(path: &std::path::Path) -> AtlasResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// The profile's own id, if it carries a non-empty one.
    pub fn id(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .map(|m| m.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn placement(&self, placement_id: &str) -> Option<&NatalPlacement> {
        self.placements.iter().find(|p| p.id == placement_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_viewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartRuler {
    Traditional,
    Modern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalPlacement {
    #[serde(default)]
    pub id: String,
    pub planet_id: String,
    pub sign_id: String,
    pub house_id: String,
    #[serde(default)]
    pub decan_id: Option<String>,
    pub degree: f64,
    #[serde(default)]
    pub minute: f64,
    #[serde(default)]
    pub retrograde: bool,
    #[serde(default)]
    pub dignity_id: Option<String>,
    #[serde(default)]
    pub is_chart_ruler: Option<ChartRuler>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectDirection {
    Applying,
    Separating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAspects {
    #[serde(default)]
    pub planetary: Vec<NatalAspect>,
    #[serde(default)]
    pub other: Vec<NatalAspect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalAspect {
    #[serde(default)]
    pub id: String,
    pub aspect_id: String,
    pub planet1_id: String,
    pub planet2_id: String,
    #[serde(default)]
    pub orb_degree: f64,
    #[serde(default)]
    pub orb_minute: f64,
    #[serde(default)]
    pub direction: Option<AspectDirection>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalConfiguration {
    #[serde(default)]
    pub id: String,
    pub configuration_id: String,
    #[serde(default)]
    pub placement_ids: Vec<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneKeySphere {
    pub sphere_name: String,
    #[serde(default)]
    pub gene_key_id: Option<String>,
    pub gene_key_number: u8,
    pub line: u8,
    /// e.g. "Natal Sun", "Design Mars".
    #[serde(default)]
    pub planetary_source: Option<String>,
}

impl GeneKeySphere {
    pub fn is_personality(&self) -> bool {
        self.planetary_source
            .as_deref()
            .is_some_and(|s| s.starts_with("Natal"))
    }

    /// Planet id of the source: "Design North Node" -> "north-node".
    pub fn source_planet_id(&self) -> Option<String> {
        let source = self.planetary_source.as_deref()?;
        let planet = source
            .strip_prefix("Natal ")
            .or_else(|| source.strip_prefix("Design "))
            .unwrap_or(source);
        Some(planet_id_from_name(planet)).filter(|id| !id.is_empty())
    }
}

/// "North Node" -> "north-node".
pub fn planet_id_from_name(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneKeysProfile {
    #[serde(default)]
    pub lifes_work: Option<GeneKeySphere>,
    #[serde(default)]
    pub evolution: Option<GeneKeySphere>,
    #[serde(default)]
    pub radiance: Option<GeneKeySphere>,
    #[serde(default)]
    pub purpose: Option<GeneKeySphere>,
    #[serde(default)]
    pub attraction: Option<GeneKeySphere>,
    #[serde(default)]
    pub iq: Option<GeneKeySphere>,
    #[serde(default)]
    pub eq: Option<GeneKeySphere>,
    #[serde(default)]
    pub sq: Option<GeneKeySphere>,
    #[serde(default)]
    pub core: Option<GeneKeySphere>,
    #[serde(default)]
    pub vocation: Option<GeneKeySphere>,
    #[serde(default)]
    pub culture: Option<GeneKeySphere>,
    #[serde(default)]
    pub pearl: Option<GeneKeySphere>,
    #[serde(default)]
    pub brand: Option<GeneKeySphere>,
    #[serde(default)]
    pub creativity: Option<GeneKeySphere>,
    #[serde(default)]
    pub relating: Option<GeneKeySphere>,
    #[serde(default)]
    pub stability: Option<GeneKeySphere>,
}

impl GeneKeysProfile {
    pub fn sphere(&self, key: GkSphereKey) -> Option<&GeneKeySphere> {
        match key {
            GkSphereKey::LifesWork => self.lifes_work.as_ref(),
            GkSphereKey::Evolution => self.evolution.as_ref(),
            GkSphereKey::Radiance => self.radiance.as_ref(),
            GkSphereKey::Purpose => self.purpose.as_ref(),
            GkSphereKey::Attraction => self.attraction.as_ref(),
            GkSphereKey::Iq => self.iq.as_ref(),
            GkSphereKey::Eq => self.eq.as_ref(),
            GkSphereKey::Sq => self.sq.as_ref(),
            GkSphereKey::Core => self.core.as_ref(),
            GkSphereKey::Vocation => self.vocation.as_ref(),
            GkSphereKey::Culture => self.culture.as_ref(),
            GkSphereKey::Pearl => self.pearl.as_ref(),
            GkSphereKey::Brand => self.brand.as_ref(),
            GkSphereKey::Creativity => self.creativity.as_ref(),
            GkSphereKey::Relating => self.relating.as_ref(),
            GkSphereKey::Stability => self.stability.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateActivation {
    #[serde(default)]
    pub gate_id: Option<String>,
    pub gate_number: u8,
    pub line: u8,
    /// e.g. "Sun", "North Node".
    #[serde(default)]
    pub planet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanDesignProfile {
    #[serde(default, rename = "type")]
    pub hd_type: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub incarnation_cross: Option<String>,
    #[serde(default)]
    pub personality_gates: Vec<GateActivation>,
    #[serde(default)]
    pub design_gates: Vec<GateActivation>,
    #[serde(default)]
    pub defined_center_ids: Vec<String>,
    #[serde(default)]
    pub defined_channel_ids: Vec<String>,
}

impl HumanDesignProfile {
    pub fn is_gate_activated(&self, gate_number: u8) -> bool {
        self.personality_gates
            .iter()
            .chain(&self.design_gates)
            .any(|g| g.gate_number == gate_number)
    }
}

/// Work and project context the user attaches to a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalContext {
    #[serde(default)]
    pub occupations: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub professional_goals: Option<String>,
    #[serde(default)]
    pub active_projects: Vec<PersonalProject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// e.g. "active", "paused".
    #[serde(default)]
    pub status: Option<String>,
    /// House id the project is tied to.
    #[serde(default)]
    pub linked_key_area: Option<String>,
}
