//! Profile-scoped entity payloads and the `<profileId>:<scope>:<localId>` id convention.

use crate::knowledge::{AspectNature, Frequency};
use crate::profile::{AspectDirection, ChartRuler};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Id prefix shared by the personal-context overlay entities (`pc-occupation`, `pc-project-<id>`).
pub const PERSONAL_CONTEXT_PREFIX: &str = "pc-";

/// Personality (conscious, natal) or design (unconscious) activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consciousness {
    Personality,
    Design,
}

impl Consciousness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Design => "design",
        }
    }
}

/// The middle segment of a profile entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileScope {
    Placement,
    Aspect,
    Config,
    Gk,
    Hd,
    Channel,
}

impl ProfileScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placement => "placement",
            Self::Aspect => "aspect",
            Self::Config => "config",
            Self::Gk => "gk",
            Self::Hd => "hd",
            Self::Channel => "channel",
        }
    }
}

impl FromStr for ProfileScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "placement" => Self::Placement,
            "aspect" => Self::Aspect,
            "config" => Self::Config,
            "gk" => Self::Gk,
            "hd" => Self::Hd,
            "channel" => Self::Channel,
            _ => return Err(()),
        })
    }
}

/// A parsed profile entity id. The local part may itself contain `:`
/// (`p1:hd:13.4:design`), so only the first two separators split.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileEntityId {
    pub profile_id: String,
    pub scope: ProfileScope,
    pub local_id: String,
}

impl ProfileEntityId {
    pub fn new(profile_id: &str, scope: ProfileScope, local_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            scope,
            local_id: local_id.into(),
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        let mut parts = id.splitn(3, ':');
        let profile_id = parts.next().filter(|p| !p.is_empty())?;
        let scope = parts.next()?.parse().ok()?;
        let local_id = parts.next().filter(|l| !l.is_empty())?;
        Some(Self::new(profile_id, scope, local_id))
    }

    pub fn placement(profile_id: &str, planet_id: &str) -> Self {
        Self::new(profile_id, ProfileScope::Placement, planet_id)
    }

    pub fn hd(profile_id: &str, gate: u8, line: u8, consciousness: Consciousness) -> Self {
        Self::new(
            profile_id,
            ProfileScope::Hd,
            format!("{gate}.{line}:{}", consciousness.as_str()),
        )
    }
}

impl fmt::Display for ProfileEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.profile_id, self.scope.as_str(), self.local_id)
    }
}

/// The three Gene Keys sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GkSequence {
    #[serde(rename = "activation-sequence")]
    Activation,
    #[serde(rename = "venus-sequence")]
    Venus,
    #[serde(rename = "pearl-sequence")]
    Pearl,
}

impl GkSequence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation-sequence",
            Self::Venus => "venus-sequence",
            Self::Pearl => "pearl-sequence",
        }
    }
}

/// A Gene Keys hologenetic profile sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GkSphereKey {
    LifesWork,
    Evolution,
    Radiance,
    Purpose,
    Attraction,
    Iq,
    Eq,
    Sq,
    Core,
    Vocation,
    Culture,
    Pearl,
    Brand,
    Creativity,
    Relating,
    Stability,
}

impl GkSphereKey {
    /// Derivation order: the twelve core spheres by sequence, then the optional four.
    pub const ALL: [GkSphereKey; 16] = [
        Self::LifesWork,
        Self::Evolution,
        Self::Radiance,
        Self::Purpose,
        Self::Attraction,
        Self::Iq,
        Self::Eq,
        Self::Sq,
        Self::Core,
        Self::Vocation,
        Self::Culture,
        Self::Pearl,
        Self::Brand,
        Self::Creativity,
        Self::Relating,
        Self::Stability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LifesWork => "lifesWork",
            Self::Evolution => "evolution",
            Self::Radiance => "radiance",
            Self::Purpose => "purpose",
            Self::Attraction => "attraction",
            Self::Iq => "iq",
            Self::Eq => "eq",
            Self::Sq => "sq",
            Self::Core => "core",
            Self::Vocation => "vocation",
            Self::Culture => "culture",
            Self::Pearl => "pearl",
            Self::Brand => "brand",
            Self::Creativity => "creativity",
            Self::Relating => "relating",
            Self::Stability => "stability",
        }
    }

    /// Universal id of the sphere's reference entity.
    pub fn sphere_id(&self) -> String {
        format!("gk-sphere-{}", self.as_str())
    }

    pub fn sequence(&self) -> GkSequence {
        match self {
            Self::LifesWork | Self::Evolution | Self::Radiance | Self::Purpose | Self::Brand => {
                GkSequence::Activation
            }
            Self::Attraction | Self::Iq | Self::Eq | Self::Sq | Self::Core | Self::Relating => {
                GkSequence::Venus
            }
            Self::Vocation | Self::Culture | Self::Pearl | Self::Creativity | Self::Stability => {
                GkSequence::Pearl
            }
        }
    }
}

impl FromStr for GkSphereKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePlacement {
    pub profile_id: String,
    pub planet_id: String,
    pub sign_id: String,
    pub house_id: String,
    pub degree: f64,
    pub minute: f64,
    pub retrograde: bool,
    pub dignity_id: Option<String>,
    pub decan_id: Option<String>,
    pub chart_ruler: Option<ChartRuler>,
    pub absolute_degree: Option<f64>,
    /// Gate (and Gene Key, same number) owning the placement's degree.
    pub hd_gate_number: Option<u8>,
    pub gene_key_number: Option<u8>,
    pub hd_line: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAspect {
    pub profile_id: String,
    pub aspect_id: String,
    pub planet1_id: String,
    pub planet2_id: String,
    pub placement1_id: String,
    pub placement2_id: String,
    pub orb_degree: f64,
    pub orb_minute: f64,
    pub direction: Option<AspectDirection>,
    pub nature: AspectNature,
}

impl ProfileAspect {
    pub fn involves(&self, planet_id: &str) -> bool {
        self.planet1_id == planet_id || self.planet2_id == planet_id
    }

    pub fn between(&self, a: &str, b: &str) -> bool {
        (self.planet1_id == a && self.planet2_id == b)
            || (self.planet1_id == b && self.planet2_id == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfiguration {
    pub profile_id: String,
    pub configuration_id: String,
    pub configuration_name: String,
    /// Profile-scoped placement ids.
    pub placement_ids: Vec<String>,
    pub planet_ids: Vec<String>,
    pub sign_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GkPlacement {
    pub profile_id: String,
    pub sphere_key: GkSphereKey,
    pub sphere_name: String,
    pub sequence: GkSequence,
    pub sphere_id: String,
    pub gene_key_id: Option<String>,
    pub gene_key_number: u8,
    pub line_number: u8,
    pub line_id: Option<String>,
    pub planetary_source: Option<String>,
    /// Sourced from a natal (personality) planet rather than a design one.
    pub is_personality: bool,
    pub source_planet_id: Option<String>,
    pub shadow: Frequency,
    pub gift: Frequency,
    pub siddhi: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdPlacement {
    pub profile_id: String,
    pub gate_id: Option<String>,
    pub gate_number: u8,
    pub line_number: u8,
    pub line_id: Option<String>,
    pub center_id: Option<String>,
    pub planet_id: Option<String>,
    pub consciousness: Consciousness,
    /// The gate's channel partner is also activated (either side).
    pub is_channel_complete: bool,
    pub channel_id: Option<String>,
    pub partner_gate_id: Option<String>,
    pub gene_key_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChannel {
    pub profile_id: String,
    pub channel_id: String,
    pub gate1_number: u8,
    pub gate2_number: u8,
    pub gate1_placement_id: Option<String>,
    pub gate2_placement_id: Option<String>,
    pub center1_id: String,
    pub center2_id: String,
    pub circuit_type: Option<String>,
    pub stream_type: Option<String>,
    pub theme: Option<String>,
}

/// Payload of the `pc-occupation` overlay entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationContext {
    pub occupations: Vec<String>,
    pub specializations: Vec<String>,
    pub professional_goals: Option<String>,
}
