//! Record shapes for the reference tables.
//!
//! Only the fields the registry and the correspondence functions read are modelled; the
//! long-form descriptive text of the source data is carried in `description` and
//! everything else is ignored on load. Foreign keys are plain string ids.

use serde::{Deserialize, Serialize};

/// A row in one of the reference tables.
pub trait Record {
    /// Table name, also the JSON file stem the loader reads (`hd-gates` -> `hd-gates.json`).
    const TABLE: &'static str;

    fn id(&self) -> &str;
}

macro_rules! record {
    ($ty:ty, $table:literal) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

// ------------------------------------
// Astrology
// ------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZodiacSign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    /// 1 (Aries) through 12 (Pisces).
    pub order_in_zodiac: u8,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub sign_modality: Option<String>,
    #[serde(default)]
    pub ruling_planet_ids: Vec<String>,
    #[serde(default)]
    pub house_ruled: Option<String>,
    #[serde(default)]
    pub opposing_sign_id: Option<String>,
    #[serde(default)]
    pub key_phrase: Option<String>,
    #[serde(default, alias = "characteristicsAndQualities")]
    pub description: Option<String>,
}

impl ZodiacSign {
    /// Absolute ecliptic degree where this sign begins (Aries = 0).
    pub fn zero_point(&self) -> f64 {
        f64::from(self.order_in_zodiac.saturating_sub(1)) * 30.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub planet_type: Option<String>,
    #[serde(default)]
    pub signs_ruled: Vec<String>,
    #[serde(default, alias = "functionAndMeaning")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstroPoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default, alias = "functionAndMeaning")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub house_number: u8,
    #[serde(default)]
    pub house_type: Option<String>,
    #[serde(default)]
    pub ruling_sign_id: Option<String>,
    #[serde(default)]
    pub ruling_planet_id: Option<String>,
    #[serde(default)]
    pub life_area_focus: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub element_category: Option<String>,
    #[serde(default)]
    pub core_quality: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectNature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Harmonious => "harmonious",
            Self::Challenging => "challenging",
            Self::Neutral => "neutral",
        }
    }

    /// Nature of an aspect by its id. Trine and sextile flow; square, opposition and
    /// quincunx are tense; everything else (conjunction, minor aspects) is neutral.
    pub fn for_aspect_id(aspect_id: &str) -> Self {
        match aspect_id {
            "trine" | "sextile" => Self::Harmonious,
            "square" | "opposition" | "quincunx" => Self::Challenging,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub angle: f64,
    #[serde(default)]
    pub nature: Option<AspectNature>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub required_aspect_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Which plane a decan governs, fixed by its position within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecanDimension {
    Physical,
    Mental,
    Spiritual,
}

impl DecanDimension {
    const BY_NUMBER: [DecanDimension; 3] = [Self::Physical, Self::Mental, Self::Spiritual];

    pub fn for_decan(decan_number: u8) -> Option<Self> {
        Self::BY_NUMBER.get(usize::from(decan_number.checked_sub(1)?)).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Mental => "mental",
            Self::Spiritual => "spiritual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decan {
    pub id: String,
    pub sign_id: String,
    /// 1, 2 or 3.
    pub decan_number: u8,
    pub ruler_planet_id: String,
    #[serde(default)]
    pub subruler_sign_id: Option<String>,
    #[serde(default)]
    pub dimension: Option<DecanDimension>,
    #[serde(default)]
    pub degrees: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Decan {
    /// Explicit dimension from the table, falling back to the positional rulership.
    pub fn dimension(&self) -> Option<DecanDimension> {
        self.dimension.or_else(|| DecanDimension::for_decan(self.decan_number))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DignityType {
    Domicile,
    Exaltation,
    Detriment,
    Fall,
}

impl DignityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domicile => "Domicile",
            Self::Exaltation => "Exaltation",
            Self::Detriment => "Detriment",
            Self::Fall => "Fall",
        }
    }

    /// Domicile and exaltation strengthen the planet.
    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Domicile | Self::Exaltation)
    }
}

/// One cell of the planet x sign dignity matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dignity {
    pub id: String,
    pub planet_id: String,
    pub sign_id: String,
    #[serde(alias = "dignityName")]
    pub dignity_type: DignityType,
    #[serde(default)]
    pub description: Option<String>,
}

// ------------------------------------
// Human Design
// ------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdGate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub gate_number: u8,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub circuit_type: Option<String>,
    /// Gate on the other end of this gate's channel.
    #[serde(default)]
    pub channel_gate_id: Option<String>,
    #[serde(default)]
    pub tropical_sign_id: Option<String>,
    #[serde(default)]
    pub gene_key_id: Option<String>,
    /// Where the source data places the gate's arc. Checked against the wheel, never
    /// used for lookups.
    #[serde(default)]
    pub degree_start: Option<f64>,
    #[serde(default)]
    pub degree_end: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, alias = "hdDefinition")]
    pub description: Option<String>,
}

/// One 5° segment of the 72-segment Lost Octave wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdGate72 {
    pub id: String,
    /// 1–72.
    pub segment_number: u8,
    #[serde(default)]
    pub tropical_sign_id: Option<String>,
    pub degree_start: f64,
    /// `degree_start + 5`, wrapping past 360.
    pub degree_end: f64,
    #[serde(default)]
    pub start_sign: Option<String>,
    #[serde(default)]
    pub start_degree: Option<f64>,
    /// Precomputed: the 64-gate number this segment overlaps most.
    #[serde(rename = "overlapping64GateSegment")]
    pub overlapping_64_gate_segment: u8,
    #[serde(default)]
    pub gate_number: Option<u8>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_master_gate: bool,
    #[serde(default)]
    pub decan_number: Option<u8>,
}

impl HdGate72 {
    /// Decan (1–36) this segment sits in: two segments per decan unless the row says otherwise.
    pub fn decan(&self) -> u8 {
        self.decan_number.unwrap_or_else(|| self.segment_number.div_ceil(2))
    }

    pub fn contains_degree(&self, degree: f64) -> bool {
        if self.degree_start <= self.degree_end {
            degree >= self.degree_start && degree < self.degree_end
        } else {
            degree >= self.degree_start || degree < self.degree_end
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdCenter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub center_type: Option<String>,
    #[serde(default)]
    pub biological_correlate: Option<String>,
    #[serde(default)]
    pub gate_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub channel_number: u8,
    pub gate1_id: String,
    pub gate2_id: String,
    pub gate1_number: u8,
    pub gate2_number: u8,
    pub center1_id: String,
    pub center2_id: String,
    #[serde(default)]
    pub circuit_type: Option<String>,
    #[serde(default)]
    pub stream_type: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl HdChannel {
    pub fn connects_gates(&self, a: u8, b: u8) -> bool {
        (self.gate1_number == a && self.gate2_number == b)
            || (self.gate1_number == b && self.gate2_number == a)
    }

    pub fn touches_center(&self, center_id: &str) -> bool {
        self.center1_id == center_id || self.center2_id == center_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdAuthority {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub personality_line: u8,
    pub design_line: u8,
    pub personality_line_id: String,
    pub design_line_id: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdLine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub line_number: u8,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ------------------------------------
// Gene Keys
// ------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    pub name: String,
    #[serde(default)]
    pub key_expression: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub key_number: u8,
    #[serde(default)]
    pub shadow: Frequency,
    #[serde(default)]
    pub gift: Frequency,
    #[serde(default)]
    pub siddhi: Frequency,
    #[serde(default)]
    pub programming_partner_id: Option<String>,
    #[serde(default)]
    pub codon_ring_id: Option<String>,
    #[serde(default)]
    pub hd_gate_id: Option<String>,
    #[serde(default)]
    pub tropical_sign_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A hologenetic profile sphere as described in the reference data (`gk-sphere-<key>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GkSphereInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    /// "Activation", "Venus" or "Pearl".
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub sequence_order: u8,
    #[serde(default)]
    pub planetary_source: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub partner_sphere: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl GkSphereInfo {
    /// "Venus" -> "venus-sequence". Already-qualified ids pass through.
    pub fn sequence_id(&self) -> Option<String> {
        let name = self.sequence.as_deref()?.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(if name.ends_with("-sequence") {
            name
        } else {
            format!("{name}-sequence")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GkSequenceInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub sequence_order: u8,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub primary_question: Option<String>,
    /// Sphere ids in journey order.
    #[serde(default)]
    pub spheres: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodonRing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub gene_key_ids: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub primary_themes: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ------------------------------------
// Wisdom traditions
// ------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chakra {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    /// 1 (root) through 7 (crown).
    pub number: u8,
    #[serde(default)]
    pub sanskrit_name: Option<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub life_theme: Option<String>,
    #[serde(default)]
    pub related_signs: Vec<String>,
    #[serde(default, rename = "relatedHDCenters")]
    pub related_hd_centers: Vec<String>,
    #[serde(default)]
    pub related_gates: Vec<u8>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyNumber {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub number: u8,
    #[serde(default)]
    pub harmonic_tone: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub chakra_id: Option<String>,
    #[serde(default)]
    pub related_gates: Vec<u8>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_master_number: bool,
    #[serde(default)]
    pub description: Option<String>,
}

record!(ZodiacSign, "signs");
record!(Planet, "planets");
record!(AstroPoint, "points");
record!(House, "houses");
record!(Element, "elements");
record!(Aspect, "aspects");
record!(AspectConfiguration, "configurations");
record!(Decan, "decans");
record!(Dignity, "dignities");
record!(HdGate, "hd-gates");
record!(HdGate72, "hd-gates-72");
record!(HdCenter, "hd-centers");
record!(HdChannel, "hd-channels");
record!(HdAuthority, "hd-authorities");
record!(HdProfile, "hd-profiles");
record!(HdLine, "hd-lines");
record!(GeneKey, "gene-keys");
record!(GkSphereInfo, "gk-spheres");
record!(GkSequenceInfo, "gk-sequences");
record!(CodonRing, "codon-rings");
record!(Chakra, "chakras");
record!(NumerologyNumber, "numerology");
