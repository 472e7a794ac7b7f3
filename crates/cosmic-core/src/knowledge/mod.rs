//! Reference knowledge: record shapes, immutable tables, the gate wheel and the loader.
//!
//! | File | Table | Record |
//! |------|-------|--------|
//! | signs.json | signs | [`ZodiacSign`] |
//! | planets.json | planets | [`Planet`] |
//! | points.json | points | [`AstroPoint`] |
//! | houses.json | houses | [`House`] |
//! | elements.json | elements | [`Element`] |
//! | aspects.json | aspects | [`Aspect`] |
//! | configurations.json | configurations | [`AspectConfiguration`] |
//! | decans.json | decans | [`Decan`] |
//! | dignities.json | dignities | [`Dignity`] |
//! | hd-gates.json | hd_gates | [`HdGate`] |
//! | hd-gates-72.json | hd_gates_72 | [`HdGate72`] |
//! | hd-centers.json | hd_centers | [`HdCenter`] |
//! | hd-channels.json | hd_channels | [`HdChannel`] |
//! | hd-authorities.json | hd_authorities | [`HdAuthority`] |
//! | hd-profiles.json | hd_profiles | [`HdProfile`] |
//! | hd-lines.json | hd_lines | [`HdLine`] |
//! | gene-keys.json | gene_keys | [`GeneKey`] |
//! | gk-spheres.json | gk_spheres | [`GkSphereInfo`] |
//! | gk-sequences.json | gk_sequences | [`GkSequenceInfo`] |
//! | codon-rings.json | codon_rings | [`CodonRing`] |
//! | chakras.json | chakras | [`Chakra`] |
//! | numerology.json | numerology | [`NumerologyNumber`] |
//! | gate-wheel.json (optional) | wheel | [`GateWheel`] |

mod loader;
mod records;
mod tables;
pub mod wheel;

pub use loader::{table_path, GATE_WHEEL_FILE};
pub use records::{
    Aspect, AspectConfiguration, AspectNature, AstroPoint, Chakra, CodonRing, Decan,
    DecanDimension, Dignity, DignityType, Element, Frequency, GeneKey, GkSequenceInfo,
    GkSphereInfo, HdAuthority, HdCenter, HdChannel, HdGate, HdGate72, HdLine, HdProfile, House,
    NumerologyNumber, Planet, Record, ZodiacSign,
};
pub use tables::{ReferenceTables, Table};
pub use wheel::{normalize_degree, GateWheel, GateWheelFile, WheelLocation};
