//! cosmic-core: entity cross-reference registry and cross-system correspondences for
//! astrology, Human Design, Gene Keys, chakras and numerology.
//!
//! Reference tables are loaded once into an immutable [`ReferenceTables`]. The
//! [`EntityRegistry`] projects them into uniform [`EntityInfo`] records and layers one
//! active [`CosmicProfile`] on top. The `correspondence` functions derive one system's
//! entities from another's (degree to gate, gate to gene key, sign to chakra, ...).

mod config;
pub mod correspondence;
mod entity;
mod error;
pub mod integrity;
pub mod knowledge;
mod profile;
mod registry;

// Configuration + errors
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};

// Reference knowledge
pub use knowledge::{
    normalize_degree, Aspect, AspectConfiguration, AspectNature, AstroPoint, Chakra, CodonRing,
    Decan, DecanDimension, Dignity, DignityType, Element, Frequency, GateWheel, GateWheelFile,
    GeneKey, GkSequenceInfo, GkSphereInfo, HdAuthority, HdCenter, HdChannel, HdGate, HdGate72,
    HdLine, HdProfile, House, NumerologyNumber, Planet, Record, ReferenceTables, Table,
    WheelLocation, ZodiacSign,
};

// Correspondences
pub use correspondence::{
    absolute_degree_to_sign_position, get_center_for_gate, get_centers_in_order,
    get_chakra_by_center, get_chakra_by_sign, get_channel_by_gate_numbers,
    get_channels_between_centers, get_channels_for_center, get_channels_for_gate,
    get_decan_by_degree, get_dignity, get_earth_position, get_gate_by_degree,
    get_gate_by_gene_key, get_gate_by_number, get_gates_by_center, get_gates_by_sign,
    get_gates_for_chakra, get_gene_key_by_gate, get_gene_key_by_number,
    get_gene_key_by_zodiac_position, get_gene_keys_by_codon_ring, get_gene_keys_by_sign,
    get_lost_octave_by_degree, get_opposite_sign, get_planet_dignities, get_programming_partner,
    get_sequence_for_sphere, get_sign_decans, get_sign_dignities, get_signs_in_order,
    get_spheres_in_sequence, lost_octave_view, sign_position_to_absolute_degree, GateAtDegree, LostOctaveView,
    SignDecan, SignPosition,
};

// Entity view
pub use entity::{
    universal_entities, Consciousness, EntityData, EntityInfo, EntityKind, EntitySystem,
    GkPlacement, GkSequence, GkSphereKey, HdPlacement, OccupationContext, ProfileAspect,
    ProfileChannel, ProfileConfiguration, ProfileEntityId, ProfilePlacement, ProfileScope,
    PERSONAL_CONTEXT_PREFIX,
};

// Profiles
pub use profile::{
    derive_profile_entities, personal_context_entities, planet_id_from_name, AspectDirection,
    ChartRuler, CosmicProfile, GateActivation, GeneKeySphere, GeneKeysProfile,
    HumanDesignProfile, NatalAspect, NatalConfiguration, NatalPlacement, PersonalContext,
    PersonalProject, ProfileAspects, ProfileEntities, ProfileMeta,
};

// Registry
pub use registry::{
    EntityRegistry, ProfileSnapshot, RegistrySettings, RegistryStats, SearchOptions,
};

// Integrity
pub use integrity::{
    check_derivations_resolve, check_reference_integrity, BrokenReference, IntegrityReport,
    DEGREE_TOLERANCE,
};
