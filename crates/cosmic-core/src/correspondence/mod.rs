//! Cross-system correspondences.
//!
//! Every function here is a pure function of the [`ReferenceTables`](crate::knowledge::ReferenceTables)
//! it is handed. A missing or dangling reference yields `None` or an empty vec; use
//! [`crate::integrity`] to surface those.

mod degree;
mod gene_keys;
mod human_design;
mod zodiac;

pub use degree::{
    absolute_degree_to_sign_position, get_decan_by_degree, get_earth_position,
    get_gate_by_degree, get_gene_key_by_zodiac_position, get_lost_octave_by_degree,
    lost_octave_view, sign_position_to_absolute_degree, GateAtDegree, LostOctaveView,
    SignPosition, DECAN_ARC, SIGN_ARC,
};
pub use gene_keys::{
    get_gate_by_gene_key, get_gene_key_by_gate, get_gene_key_by_number,
    get_gene_keys_by_codon_ring, get_gene_keys_by_sign, get_programming_partner,
    get_sequence_for_sphere, get_spheres_in_sequence,
};
pub use human_design::{
    get_center_for_gate, get_centers_in_order, get_channel_by_gate_numbers,
    get_channels_between_centers, get_channels_for_center, get_channels_for_gate,
    get_gate_by_number, get_gates_by_center, get_gates_by_sign, CENTER_NORTH_TO_SOUTH,
};
pub use zodiac::{
    get_chakra_by_center, get_chakra_by_sign, get_dignity, get_gates_for_chakra,
    get_opposite_sign, get_planet_dignities, get_sign_decans, get_sign_dignities,
    get_signs_in_order, SignDecan,
};
