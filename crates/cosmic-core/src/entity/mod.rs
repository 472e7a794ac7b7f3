//! The uniform entity view: every universal record and every profile-derived entity is an
//! [`EntityInfo`] whose [`EntityData`] payload carries the typed record.

mod profile;
mod universal;

pub use profile::{
    Consciousness, GkPlacement, GkSequence, GkSphereKey, HdPlacement, OccupationContext,
    ProfileAspect, ProfileChannel, ProfileConfiguration, ProfileEntityId, ProfilePlacement,
    ProfileScope, PERSONAL_CONTEXT_PREFIX,
};
pub use universal::universal_entities;

use crate::knowledge::{
    Aspect, AspectConfiguration, AstroPoint, Chakra, CodonRing, Decan, Dignity, Element,
    GeneKey, GkSequenceInfo, GkSphereInfo, HdAuthority, HdCenter, HdChannel, HdGate, HdGate72,
    HdLine, HdProfile, House, NumerologyNumber, Planet, ZodiacSign,
};
use crate::profile::PersonalProject;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntitySystem {
    Astrology,
    HumanDesign,
    GeneKeys,
    Shared,
}

impl EntitySystem {
    pub const ALL: [EntitySystem; 4] = [
        Self::Astrology,
        Self::HumanDesign,
        Self::GeneKeys,
        Self::Shared,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Astrology => "astrology",
            Self::HumanDesign => "humanDesign",
            Self::GeneKeys => "geneKeys",
            Self::Shared => "shared",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Sign,
    Planet,
    Point,
    House,
    Element,
    Aspect,
    Configuration,
    Decan,
    Dignity,
    HdGate,
    LoGate,
    HdCenter,
    HdChannel,
    HdAuthority,
    HdProfile,
    HdLine,
    GeneKey,
    GkSphere,
    GkSequence,
    CodonRing,
    Chakra,
    NumerologyNumber,
    ProfilePlacement,
    ProfileAspect,
    ProfileConfiguration,
    ProfileGkPlacement,
    ProfileHdPlacement,
    ProfileChannel,
    Occupation,
    PersonalProject,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::Planet => "planet",
            Self::Point => "point",
            Self::House => "house",
            Self::Element => "element",
            Self::Aspect => "aspect",
            Self::Configuration => "configuration",
            Self::Decan => "decan",
            Self::Dignity => "dignity",
            Self::HdGate => "hd-gate",
            Self::LoGate => "lo-gate",
            Self::HdCenter => "hd-center",
            Self::HdChannel => "hd-channel",
            Self::HdAuthority => "hd-authority",
            Self::HdProfile => "hd-profile",
            Self::HdLine => "hd-line",
            Self::GeneKey => "gene-key",
            Self::GkSphere => "gk-sphere",
            Self::GkSequence => "gk-sequence",
            Self::CodonRing => "codon-ring",
            Self::Chakra => "chakra",
            Self::NumerologyNumber => "numerology-number",
            Self::ProfilePlacement => "profile-placement",
            Self::ProfileAspect => "profile-aspect",
            Self::ProfileConfiguration => "profile-configuration",
            Self::ProfileGkPlacement => "profile-gk-placement",
            Self::ProfileHdPlacement => "profile-hd-placement",
            Self::ProfileChannel => "profile-channel",
            Self::Occupation => "occupation",
            Self::PersonalProject => "personal-project",
        }
    }

    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            Self::ProfilePlacement
                | Self::ProfileAspect
                | Self::ProfileConfiguration
                | Self::ProfileGkPlacement
                | Self::ProfileHdPlacement
                | Self::ProfileChannel
                | Self::Occupation
                | Self::PersonalProject
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant payload. Universal variants share the table's `Arc`; profile variants own their data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "kebab-case")]
pub enum EntityData {
    Sign(Arc<ZodiacSign>),
    Planet(Arc<Planet>),
    Point(Arc<AstroPoint>),
    House(Arc<House>),
    Element(Arc<Element>),
    Aspect(Arc<Aspect>),
    Configuration(Arc<AspectConfiguration>),
    Decan(Arc<Decan>),
    Dignity(Arc<Dignity>),
    HdGate(Arc<HdGate>),
    LoGate(Arc<HdGate72>),
    HdCenter(Arc<HdCenter>),
    HdChannel(Arc<HdChannel>),
    HdAuthority(Arc<HdAuthority>),
    HdProfile(Arc<HdProfile>),
    HdLine(Arc<HdLine>),
    GeneKey(Arc<GeneKey>),
    GkSphere(Arc<GkSphereInfo>),
    GkSequence(Arc<GkSequenceInfo>),
    CodonRing(Arc<CodonRing>),
    Chakra(Arc<Chakra>),
    NumerologyNumber(Arc<NumerologyNumber>),
    ProfilePlacement(ProfilePlacement),
    ProfileAspect(ProfileAspect),
    ProfileConfiguration(ProfileConfiguration),
    ProfileGkPlacement(GkPlacement),
    ProfileHdPlacement(HdPlacement),
    ProfileChannel(ProfileChannel),
    Occupation(OccupationContext),
    PersonalProject(PersonalProject),
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Sign(_) => EntityKind::Sign,
            Self::Planet(_) => EntityKind::Planet,
            Self::Point(_) => EntityKind::Point,
            Self::House(_) => EntityKind::House,
            Self::Element(_) => EntityKind::Element,
            Self::Aspect(_) => EntityKind::Aspect,
            Self::Configuration(_) => EntityKind::Configuration,
            Self::Decan(_) => EntityKind::Decan,
            Self::Dignity(_) => EntityKind::Dignity,
            Self::HdGate(_) => EntityKind::HdGate,
            Self::LoGate(_) => EntityKind::LoGate,
            Self::HdCenter(_) => EntityKind::HdCenter,
            Self::HdChannel(_) => EntityKind::HdChannel,
            Self::HdAuthority(_) => EntityKind::HdAuthority,
            Self::HdProfile(_) => EntityKind::HdProfile,
            Self::HdLine(_) => EntityKind::HdLine,
            Self::GeneKey(_) => EntityKind::GeneKey,
            Self::GkSphere(_) => EntityKind::GkSphere,
            Self::GkSequence(_) => EntityKind::GkSequence,
            Self::CodonRing(_) => EntityKind::CodonRing,
            Self::Chakra(_) => EntityKind::Chakra,
            Self::NumerologyNumber(_) => EntityKind::NumerologyNumber,
            Self::ProfilePlacement(_) => EntityKind::ProfilePlacement,
            Self::ProfileAspect(_) => EntityKind::ProfileAspect,
            Self::ProfileConfiguration(_) => EntityKind::ProfileConfiguration,
            Self::ProfileGkPlacement(_) => EntityKind::ProfileGkPlacement,
            Self::ProfileHdPlacement(_) => EntityKind::ProfileHdPlacement,
            Self::ProfileChannel(_) => EntityKind::ProfileChannel,
            Self::Occupation(_) => EntityKind::Occupation,
            Self::PersonalProject(_) => EntityKind::PersonalProject,
        }
    }
}

/// One lookup result: common display attributes plus the typed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub id: String,
    pub name: String,
    pub symbol: Option<String>,
    pub system: EntitySystem,
    pub description: Option<String>,
    pub route_path: String,
    pub keywords: Vec<String>,
    /// Foreign-key ids this entity points at, universal or profile-scoped.
    pub related_ids: Vec<String>,
    pub data: EntityData,
}

impl EntityInfo {
    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    pub fn is_profile(&self) -> bool {
        self.kind().is_profile()
    }

    pub fn as_hd_placement(&self) -> Option<&HdPlacement> {
        match &self.data {
            EntityData::ProfileHdPlacement(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gk_placement(&self) -> Option<&GkPlacement> {
        match &self.data {
            EntityData::ProfileGkPlacement(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_placement(&self) -> Option<&ProfilePlacement> {
        match &self.data {
            EntityData::ProfilePlacement(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_aspect(&self) -> Option<&ProfileAspect> {
        match &self.data {
            EntityData::ProfileAspect(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&ProfileChannel> {
        match &self.data {
            EntityData::ProfileChannel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_configuration(&self) -> Option<&ProfileConfiguration> {
        match &self.data {
            EntityData::ProfileConfiguration(c) => Some(c),
            _ => None,
        }
    }
}

/// Collect non-empty ids, dropping `None` and blanks.
pub(crate) fn ids<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    candidates
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
